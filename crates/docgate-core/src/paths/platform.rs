//! Platform-specific root detection.
//!
//! This module contains private helpers for detecting the runtime environment
//! (local repo vs installed binary) and resolving platform-appropriate paths.
//! Public API is exposed through sibling modules.

use std::env;
use std::path::PathBuf;

use super::error::PathError;

/// Environment variable overriding the resource root.
pub(super) const RESOURCE_DIR_ENV: &str = "DOCGATE_RESOURCE_DIR";

/// Environment variable overriding the user configuration file.
pub(super) const CONFIG_FILE_ENV: &str = "DOCGATE_CONFIG";

/// Detect if we are running from the local repository.
///
/// Returns `Some(path)` in debug builds, or for release builds whose executable
/// sits inside the repository checkout. Returns `None` for installed binaries.
#[allow(clippy::unnecessary_wraps)] // Option is needed for release builds
pub(super) fn detect_local_repo() -> Option<PathBuf> {
    let repo_root = PathBuf::from(env!("DOCGATE_REPO_ROOT"));

    #[cfg(debug_assertions)]
    {
        // In debug mode, always assume we want to use the repo we are building from
        Some(repo_root)
    }

    #[cfg(not(debug_assertions))]
    {
        // The repo must still exist and carry the bundled assets
        if !repo_root.join("assets").is_dir() {
            return None;
        }

        // Executable must live inside the repo (e.g. target/release/docgate)
        let exe_path = env::current_exe().ok()?;
        let canonical_exe = exe_path.canonicalize().ok()?;
        let canonical_repo = repo_root.canonicalize().ok()?;
        canonical_exe
            .starts_with(&canonical_repo)
            .then_some(repo_root)
    }
}

/// Check if we are running from a pre-built binary (not from the source repo).
pub fn is_prebuilt_binary() -> bool {
    detect_local_repo().is_none()
}

/// Get the root directory bundled assets are resolved against.
///
/// Resolution order:
/// 1. `DOCGATE_RESOURCE_DIR` environment variable
/// 2. Local repository (if running from source)
/// 3. Directory containing the running executable
pub fn resource_root() -> Result<PathBuf, PathError> {
    // 1. Runtime override
    if let Ok(path) = env::var(RESOURCE_DIR_ENV) {
        return Ok(PathBuf::from(path));
    }

    // 2. Try local repo
    if let Some(repo) = detect_local_repo() {
        return Ok(repo);
    }

    // 3. Installed layout: assets ship next to the binary
    let exe = env::current_exe().map_err(|e| PathError::NoExecutableDir(e.to_string()))?;
    exe.parent()
        .map(std::path::Path::to_path_buf)
        .ok_or_else(|| PathError::NoExecutableDir(exe.display().to_string()))
}

/// Location of the user's configuration file.
///
/// Resolution order:
/// 1. `DOCGATE_CONFIG` environment variable
/// 2. `<user config dir>/docgate/config.json`
pub fn config_file_path() -> Result<PathBuf, PathError> {
    if let Ok(path) = env::var(CONFIG_FILE_ENV) {
        return Ok(PathBuf::from(path));
    }

    let config_dir = dirs::config_dir().ok_or(PathError::NoConfigDir)?;
    Ok(config_dir.join("docgate").join("config.json"))
}
