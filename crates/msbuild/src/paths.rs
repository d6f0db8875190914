use std::path::{Component, Path, PathBuf};

/// Resolve `raw` against `base` and fold `.` / `..` segments without touching
/// the filesystem. Backslash separators from Windows-authored solution files
/// are accepted on every platform.
pub fn normalize(base: &Path, raw: &str) -> PathBuf {
    let raw = if cfg!(windows) {
        raw.to_string()
    } else {
        raw.replace('\\', "/")
    };

    let joined = base.join(raw.trim());
    let mut out = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                // never pop past the root
                if !matches!(out.components().next_back(), None | Some(Component::RootDir | Component::Prefix(_))) {
                    out.pop();
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Case-insensitive identity key for a project path.
pub fn path_key(path: &Path) -> String {
    path.to_string_lossy().to_lowercase()
}
