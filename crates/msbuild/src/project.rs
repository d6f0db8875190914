use crate::error::{LoadError, Result};
use crate::paths::normalize;
use crate::xml;
use std::path::{Path, PathBuf};

/// Read the direct `ProjectReference` items of a project file.
///
/// `Condition` attributes are not evaluated, every reference counts.
/// Includes that still hold an MSBuild property (`$(...)`) cannot be resolved
/// textually and are skipped.
pub fn read_project_references(project: &Path) -> Result<Vec<PathBuf>> {
    let content = std::fs::read_to_string(project).map_err(|source| LoadError::Read {
        path: project.to_path_buf(),
        source,
    })?;

    let includes = parse_references(&content).map_err(|reason| LoadError::Parse {
        path: project.to_path_buf(),
        reason,
    })?;

    let base = project.parent().unwrap_or_else(|| Path::new(""));
    let mut references = Vec::with_capacity(includes.len());
    for include in includes {
        if include.contains("$(") {
            tracing::debug!("Skipping unevaluated reference {} in {}", include, project.display());
            continue;
        }
        references.push(normalize(base, &include));
    }
    Ok(references)
}

fn parse_references(content: &str) -> std::result::Result<Vec<String>, String> {
    let mut includes = Vec::new();
    let root = xml::visit_elements(content, |name, element| {
        if name == b"ProjectReference" {
            if let Some(include) = xml::attribute(element, b"Include")? {
                includes.extend(
                    include
                        .split(';')
                        .map(str::trim)
                        .filter(|s| !s.is_empty())
                        .map(str::to_string),
                );
            }
        }
        Ok(())
    })?;

    if root.is_none() {
        return Err("empty project file".to_string());
    }
    Ok(includes)
}
