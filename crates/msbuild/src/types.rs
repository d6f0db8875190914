use std::path::{Path, PathBuf};

/// A project listed in a solution, with its direct project references
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectEntry {
    /// Absolute, normalized project file path
    pub path: PathBuf,
    /// Absolute, normalized paths of referenced project files
    pub references: Vec<PathBuf>,
}

impl ProjectEntry {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            references: Vec::new(),
        }
    }

    pub fn with_reference(mut self, path: impl Into<PathBuf>) -> Self {
        self.references.push(path.into());
        self
    }

    /// File name without extension, e.g. `Company.App` for `Company.App.csproj`
    pub fn stem(&self) -> &str {
        file_stem(&self.path)
    }
}

pub(crate) fn file_stem(path: &Path) -> &str {
    path.file_stem().and_then(|s| s.to_str()).unwrap_or_default()
}
