//! Paths command handler.
//!
//! Displays every resolved path for diagnosing installation problems.

use docgate_core::ResolvedPaths;

use crate::error::CliError;

/// Print all resolved paths in `key = value` format.
pub fn execute() -> Result<(), CliError> {
    let paths = ResolvedPaths::resolve()?;
    println!("{paths}");
    Ok(())
}
