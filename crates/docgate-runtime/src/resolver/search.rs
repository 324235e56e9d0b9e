//! Platform-specific executable search logic.

use std::path::{Path, PathBuf};

use super::env::EnvProvider;
use super::fs::FsProvider;
use super::types::{Attempt, AttemptOutcome};

#[cfg(unix)]
const PATH_SEPARATOR: char = ':';
#[cfg(windows)]
const PATH_SEPARATOR: char = ';';

/// Searches candidate directories for an executable.
pub struct ExecutableSearcher<'a> {
    env: &'a dyn EnvProvider,
    fs: &'a dyn FsProvider,
}

impl<'a> ExecutableSearcher<'a> {
    pub fn new(env: &'a dyn EnvProvider, fs: &'a dyn FsProvider) -> Self {
        Self { env, fs }
    }

    /// Search each directory of `PATH`, stopping at the first hit.
    pub fn search_in_path(&self, command: &str) -> Vec<Attempt> {
        let Some(path_var) = self.env.get("PATH") else {
            return Vec::new();
        };
        let Some(path_str) = path_var.to_str() else {
            return Vec::new();
        };

        let dirs: Vec<&str> = path_str
            .split(PATH_SEPARATOR)
            .filter(|d| !d.is_empty())
            .collect();
        self.search_dirs(command, dirs)
    }

    /// Search `/etc/paths` and `/etc/paths.d/*`, which GUI-launched
    /// assistants on macOS do not inherit.
    #[cfg(target_os = "macos")]
    pub fn search_in_etc_paths(&self, command: &str) -> Vec<Attempt> {
        let mut dirs = Vec::new();
        let mut collect = |contents: String| {
            dirs.extend(
                contents
                    .lines()
                    .map(str::trim)
                    .filter(|l| !l.is_empty() && !l.starts_with('#'))
                    .map(String::from),
            );
        };

        if let Ok(contents) = std::fs::read_to_string("/etc/paths") {
            collect(contents);
        }
        if let Ok(entries) = std::fs::read_dir("/etc/paths.d") {
            for entry in entries.flatten() {
                if let Ok(contents) = std::fs::read_to_string(entry.path()) {
                    collect(contents);
                }
            }
        }

        self.search_dirs(command, dirs)
    }

    #[cfg(not(target_os = "macos"))]
    pub const fn search_in_etc_paths(&self, _command: &str) -> Vec<Attempt> {
        let _ = self;
        Vec::new()
    }

    /// Search well-known install locations for this platform.
    pub fn search_platform_defaults(&self, command: &str) -> Vec<Attempt> {
        self.search_dirs(command, platform_default_dirs())
    }

    /// Search caller-provided directories.
    pub fn search_user_paths(&self, command: &str, user_paths: &[String]) -> Vec<Attempt> {
        self.search_dirs(command, user_paths.iter().filter(|d| !d.is_empty()))
    }

    fn search_dirs<I, D>(&self, command: &str, dirs: I) -> Vec<Attempt>
    where
        I: IntoIterator<Item = D>,
        D: AsRef<Path>,
    {
        let mut attempts = Vec::new();
        for dir in dirs {
            for name in self.name_variants(command) {
                let candidate = dir.as_ref().join(&name);
                let outcome = self.fs.check_executable(&candidate);
                let found = outcome == AttemptOutcome::Ok;
                attempts.push(Attempt { candidate, outcome });
                if found {
                    return attempts;
                }
            }
        }
        attempts
    }

    /// File names a command may have on disk (PATHEXT variants on Windows).
    #[cfg(windows)]
    fn name_variants(&self, command: &str) -> Vec<String> {
        let mut variants = vec![command.to_string()];
        match self.env.get("PATHEXT").and_then(|p| p.into_string().ok()) {
            Some(pathext) => variants.extend(
                pathext
                    .split(';')
                    .filter(|ext| !ext.is_empty())
                    .map(|ext| format!("{command}{ext}")),
            ),
            None => variants.extend(
                [".cmd", ".exe", ".bat", ".com"]
                    .iter()
                    .map(|ext| format!("{command}{ext}")),
            ),
        }
        variants
    }

    #[cfg(not(windows))]
    fn name_variants(&self, command: &str) -> Vec<String> {
        let _ = self.env;
        vec![command.to_string()]
    }
}

fn platform_default_dirs() -> Vec<PathBuf> {
    #[cfg(target_os = "macos")]
    let dirs: &[&str] = &["/opt/homebrew/bin", "/usr/local/bin", "/usr/bin", "/bin"];

    #[cfg(windows)]
    let dirs: &[&str] = &[];

    #[cfg(not(any(target_os = "macos", windows)))]
    let dirs: &[&str] = &["/usr/local/bin", "/usr/bin", "/bin"];

    dirs.iter().map(PathBuf::from).collect()
}
