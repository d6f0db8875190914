use crate::error::{Error, Result};
use crate::mermaid::LINE_ENDING;
use std::path::Path;

/// Fence diagram text as a ```` ```mermaid ```` markdown block
pub fn wrap_markdown(text: &str) -> String {
    wrap_markdown_with(text, "mermaid")
}

pub fn wrap_markdown_with(text: &str, lang: &str) -> String {
    format!("```{lang}{nl}{text}{nl}```", nl = LINE_ENDING)
}

/// Write `content` to `target`, creating parent directories.
///
/// A missing or blank target is `OutputPathMissing`; IO failures are `Output`.
pub fn write_diagram(target: Option<&Path>, content: &str) -> Result<()> {
    let target = match target {
        Some(path) if !path.as_os_str().to_string_lossy().trim().is_empty() => path,
        _ => return Err(Error::OutputPathMissing),
    };

    let io_err = |source: std::io::Error| Error::Output {
        path: target.to_path_buf(),
        source,
    };

    if let Some(dir) = target.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir).map_err(io_err)?;
    }
    std::fs::write(target, content).map_err(io_err)
}
