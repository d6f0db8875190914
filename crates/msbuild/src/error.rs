use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Unsupported solution format: {}", .0.display())]
    UnsupportedSolution(PathBuf),
    #[error("Cannot read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Cannot parse {}: {reason}", .path.display())]
    Parse { path: PathBuf, reason: String },
    #[error("Project {} references missing project {}", .referenced_by.display(), .path.display())]
    MissingReference { path: PathBuf, referenced_by: PathBuf },
}

impl LoadError {
    /// Path of the file that failed to load
    pub fn path(&self) -> &std::path::Path {
        match self {
            LoadError::UnsupportedSolution(path) => path,
            LoadError::Read { path, .. } => path,
            LoadError::Parse { path, .. } => path,
            LoadError::MissingReference { path, .. } => path,
        }
    }
}

pub type Result<T> = std::result::Result<T, LoadError>;
