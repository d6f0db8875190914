use msbuild::LoadError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration file not found: {}", .0.display())]
    ConfigNotFound(PathBuf),
    #[error("Config file is invalid: {}: {reason}", .path.display())]
    ConfigInvalid { path: PathBuf, reason: String },
    #[error("Solution not found: {}", .0.display())]
    SolutionNotFound(PathBuf),
    #[error("Solution load failed: {0}")]
    SolutionLoad(#[from] LoadError),
    #[error("Diagram output file path is not configured.")]
    OutputPathMissing,
    #[error("Cannot write diagram to {}: {source}", .path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Cancelled")]
    Cancelled,
}

pub type Result<T> = std::result::Result<T, Error>;
