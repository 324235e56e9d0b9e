//! Lexical path resolution for user-supplied file arguments.

use std::env;
use std::path::{Component, Path, PathBuf};

/// Resolve `file` to an absolute path.
///
/// Absolute inputs are normalized and returned. Relative inputs are joined to
/// `base`, or to the process working directory when `base` is `None`.
/// Nothing touches the filesystem: a nonsensical input simply produces a path
/// that later existence checks reject.
pub fn resolve_path(file: impl AsRef<Path>, base: Option<&Path>) -> PathBuf {
    let file = file.as_ref();
    if file.is_absolute() {
        return normalize(file);
    }

    let base = base
        .map(Path::to_path_buf)
        .or_else(|| env::current_dir().ok())
        .unwrap_or_default();

    normalize(&base.join(file))
}

/// Drop `.` components and fold `..` into their parent.
///
/// `..` never climbs above a root; on a relative path with nothing left to pop
/// it is kept.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();

    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => out.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                if out.file_name().is_some() {
                    out.pop();
                } else if !out.has_root() {
                    out.push("..");
                }
            }
            Component::Normal(part) => out.push(part),
        }
    }

    out
}
