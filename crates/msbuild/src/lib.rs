//! msbuild - solution and project file reader
//!
//! Turns a `.sln` / `.slnx` solution into the list of projects it contains,
//! each with its direct `ProjectReference` paths.

mod error;
mod paths;
mod project;
mod provider;
mod solution;
mod types;
mod xml;

pub use error::{LoadError, Result};
pub use paths::{normalize, path_key};
pub use project::read_project_references;
pub use provider::{GraphProvider, MsBuildProvider};
pub use solution::{read_solution, SolutionFormat};
pub use types::ProjectEntry;
