//! Child `PATH` construction for the document compiler.
//!
//! The compiler script shells out to `pandoc` by name. When the
//! configuration points at a specific Pandoc binary, its directory is put in
//! front of the inherited `PATH` so that binary wins.

use std::collections::HashSet;
use std::ffi::OsStr;
use std::path::Path;

/// Platform-specific PATH separator
#[cfg(unix)]
const PATH_SEPARATOR: &str = ":";
#[cfg(windows)]
const PATH_SEPARATOR: &str = ";";

/// Default paths appended on macOS, where GUI-launched assistants inherit a
/// minimal PATH.
#[cfg(target_os = "macos")]
const MACOS_DEFAULT_PATHS: &str = "/opt/homebrew/bin:/usr/local/bin:/usr/bin:/bin:/usr/sbin:/sbin";

/// Build the PATH for a child that must find `tool_path`.
///
/// Returns `None` when `tool_path` is a bare command name, in which case the
/// inherited PATH is already authoritative. Entries are deduplicated while
/// preserving order.
pub fn build_effective_path(tool_path: &str, current_path: Option<&OsStr>) -> Option<String> {
    let tool_dir = Path::new(tool_path)
        .parent()
        .and_then(Path::to_str)
        .filter(|dir| !dir.is_empty())?;

    let mut entries = vec![tool_dir.to_string()];

    if let Some(current) = current_path.and_then(OsStr::to_str) {
        entries.extend(
            current
                .split(PATH_SEPARATOR)
                .filter(|e| !e.is_empty())
                .map(String::from),
        );
    }

    #[cfg(target_os = "macos")]
    entries.extend(MACOS_DEFAULT_PATHS.split(':').map(String::from));

    let mut seen = HashSet::new();
    let deduped: Vec<String> = entries
        .into_iter()
        .filter(|entry| seen.insert(entry.clone()))
        .collect();

    Some(deduped.join(PATH_SEPARATOR))
}
