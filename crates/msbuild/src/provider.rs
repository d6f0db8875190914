use crate::error::{LoadError, Result};
use crate::paths::{normalize, path_key};
use crate::project::read_project_references;
use crate::solution::read_solution;
use crate::types::ProjectEntry;
use std::collections::HashSet;
use std::path::Path;

/// Source of the raw project graph of a solution
pub trait GraphProvider: Send + Sync {
    /// Every project of the solution with its direct references.
    ///
    /// Paths are absolute. A reference may point outside the solution.
    fn load_graph(&self, solution: &Path) -> Result<Vec<ProjectEntry>>;
}

/// Reads `.sln` / `.slnx` and project files straight from disk
#[derive(Debug, Clone, Copy, Default)]
pub struct MsBuildProvider;

impl MsBuildProvider {
    pub fn new() -> Self {
        Self
    }
}

impl GraphProvider for MsBuildProvider {
    fn load_graph(&self, solution: &Path) -> Result<Vec<ProjectEntry>> {
        let cwd = std::env::current_dir().map_err(|source| LoadError::Read {
            path: solution.to_path_buf(),
            source,
        })?;
        let solution = normalize(&cwd, &solution.to_string_lossy());

        tracing::info!("Loading solution {}", solution.display());
        let projects = read_solution(&solution)?;
        let listed: HashSet<String> = projects.iter().map(|p| path_key(p)).collect();

        let mut seen = HashSet::new();
        let mut entries = Vec::with_capacity(projects.len());
        for path in projects {
            // the same project listed twice is only read once
            if !seen.insert(path_key(&path)) {
                continue;
            }

            let references = read_project_references(&path)?;
            for reference in &references {
                // a solution project matched case-insensitively may differ in case on disk
                if !listed.contains(&path_key(reference)) && !reference.is_file() {
                    return Err(LoadError::MissingReference {
                        path: reference.clone(),
                        referenced_by: path.clone(),
                    });
                }
            }

            tracing::debug!("{}: {} project references", path.display(), references.len());
            entries.push(ProjectEntry { path, references });
        }

        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_load_graph_rejects_unknown_extension() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("build.proj");
        fs::write(&path, "<Project />").unwrap();

        let err = MsBuildProvider::new().load_graph(&path).unwrap_err();
        assert!(matches!(err, LoadError::UnsupportedSolution(_)));
    }

    #[test]
    fn test_load_graph_missing_solution() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing.slnx");

        let err = MsBuildProvider::new().load_graph(&path).unwrap_err();
        assert!(matches!(err, LoadError::Read { .. }));
        assert_eq!(err.path(), path.as_path());
    }

    #[test]
    fn test_load_graph_reads_duplicate_listing_once() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("A")).unwrap();
        fs::write(dir.path().join("A/A.csproj"), "<Project />").unwrap();
        let solution = dir.path().join("s.slnx");
        fs::write(
            &solution,
            r#"<Solution><Project Path="A/A.csproj" /><Project Path="./A/A.csproj" /></Solution>"#,
        )
        .unwrap();

        let entries = MsBuildProvider::new().load_graph(&solution).unwrap();
        assert_eq!(entries.len(), 1);
    }
}
