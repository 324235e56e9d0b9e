//! Executable resolution order.

use std::path::Path;

use super::env::{EnvProvider, SystemEnv};
use super::fs::{FsProvider, SystemFs};
use super::search::ExecutableSearcher;
use super::types::{Attempt, AttemptOutcome, ResolveError, ResolveResult};

/// Resolve a command to an absolute executable path.
///
/// Search order:
/// 1. If command is absolute and valid, return it
/// 2. `PATH`
/// 3. `/etc/paths` and `/etc/paths.d/*` (macOS only)
/// 4. Platform default directories
/// 5. Caller-provided extra directories
pub fn resolve_executable(
    command: &str,
    extra_dirs: &[String],
) -> Result<ResolveResult, ResolveError> {
    resolve_executable_with_deps(command, extra_dirs, &SystemEnv, &SystemFs)
}

/// Resolve with injected dependencies.
pub fn resolve_executable_with_deps(
    command: &str,
    extra_dirs: &[String],
    env: &dyn EnvProvider,
    fs: &dyn FsProvider,
) -> Result<ResolveResult, ResolveError> {
    if command.trim().is_empty() {
        return Err(ResolveError::EmptyCommand);
    }

    let mut attempts = Vec::new();
    let mut warnings = Vec::new();

    let command_path = Path::new(command);
    if command_path.is_absolute() {
        let outcome = fs.check_executable(command_path);
        let ok = outcome == AttemptOutcome::Ok;
        attempts.push(Attempt {
            candidate: command_path.to_path_buf(),
            outcome: outcome.clone(),
        });
        if ok {
            return Ok(ResolveResult {
                resolved_path: command_path.to_path_buf(),
                attempts,
                warnings,
            });
        }

        let Some(basename) = command_path.file_name().and_then(|n| n.to_str()) else {
            return Err(ResolveError::not_resolved(command, &attempts));
        };
        warnings.push(format!(
            "Absolute path '{command}' failed ({outcome}), falling back to basename '{basename}'"
        ));
        return search(basename, extra_dirs, env, fs, attempts, warnings);
    }

    search(command, extra_dirs, env, fs, attempts, warnings)
}

fn search(
    command: &str,
    extra_dirs: &[String],
    env: &dyn EnvProvider,
    fs: &dyn FsProvider,
    mut attempts: Vec<Attempt>,
    warnings: Vec<String>,
) -> Result<ResolveResult, ResolveError> {
    let searcher = ExecutableSearcher::new(env, fs);
    let strategies: [&dyn Fn() -> Vec<Attempt>; 4] = [
        &|| searcher.search_in_path(command),
        &|| searcher.search_in_etc_paths(command),
        &|| searcher.search_platform_defaults(command),
        &|| searcher.search_user_paths(command, extra_dirs),
    ];

    for strategy in strategies {
        let found = strategy();
        let hit = found
            .iter()
            .find(|a| a.outcome == AttemptOutcome::Ok)
            .map(|a| a.candidate.clone());
        attempts.extend(found);

        if let Some(resolved_path) = hit {
            return Ok(ResolveResult {
                resolved_path,
                attempts,
                warnings,
            });
        }
    }

    Err(ResolveError::not_resolved(command, &attempts))
}
