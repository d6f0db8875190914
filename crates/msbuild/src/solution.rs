use crate::error::{LoadError, Result};
use crate::paths::normalize;
use crate::xml;
use std::path::{Path, PathBuf};

const SLN_HEADER: &str = "Microsoft Visual Studio Solution File";

/// Solution file flavours
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolutionFormat {
    /// Classic text format (`.sln`)
    Sln,
    /// XML format (`.slnx`)
    Slnx,
}

impl SolutionFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "sln" => Some(Self::Sln),
            "slnx" => Some(Self::Slnx),
            _ => None,
        }
    }
}

/// Read the project files listed by a solution, in declaration order.
///
/// `solution` must be absolute; project paths are resolved against its
/// directory. Solution folders and non-project entries are skipped.
pub fn read_solution(solution: &Path) -> Result<Vec<PathBuf>> {
    let format = SolutionFormat::from_path(solution)
        .ok_or_else(|| LoadError::UnsupportedSolution(solution.to_path_buf()))?;

    let content = std::fs::read_to_string(solution).map_err(|source| LoadError::Read {
        path: solution.to_path_buf(),
        source,
    })?;

    let raw = match format {
        SolutionFormat::Sln => parse_sln(&content),
        SolutionFormat::Slnx => parse_slnx(&content),
    }
    .map_err(|reason| LoadError::Parse {
        path: solution.to_path_buf(),
        reason,
    })?;

    let base = solution.parent().unwrap_or_else(|| Path::new(""));
    Ok(raw
        .iter()
        .filter(|p| is_project_file(p))
        .map(|p| normalize(base, p))
        .collect())
}

/// `Project("{type-guid}") = "Name", "relative\path.csproj", "{guid}"`
fn parse_sln(content: &str) -> std::result::Result<Vec<String>, String> {
    if !content.contains(SLN_HEADER) {
        return Err(format!("missing '{}' header", SLN_HEADER));
    }

    let mut projects = Vec::new();
    for (number, line) in content.lines().enumerate() {
        let line = line.trim_start();
        if !line.starts_with("Project(") {
            continue;
        }
        let parts: Vec<&str> = line.split('"').collect();
        match parts.get(5).map(|path| path.trim()) {
            Some(path) if !path.is_empty() => projects.push(path.to_string()),
            _ => tracing::debug!("Skipping Project entry without a path on line {}", number + 1),
        }
    }
    Ok(projects)
}

/// `<Solution><Folder><Project Path="..." /></Folder></Solution>`
fn parse_slnx(content: &str) -> std::result::Result<Vec<String>, String> {
    let mut projects = Vec::new();
    let root = xml::visit_elements(content, |name, element| {
        if name == b"Project" {
            if let Some(path) = xml::attribute(element, b"Path")? {
                projects.push(path);
            }
        }
        Ok(())
    })?;

    match root.as_deref() {
        Some("Solution") => Ok(projects),
        Some(other) => Err(format!("expected <Solution> root, found <{}>", other)),
        None => Err("missing <Solution> root".to_string()),
    }
}

fn is_project_file(raw: &str) -> bool {
    let raw = raw.replace('\\', "/");
    Path::new(&raw)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase().ends_with("proj"))
        .unwrap_or(false)
}
