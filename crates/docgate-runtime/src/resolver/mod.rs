//! Executable resolution for the converter commands.
//!
//! Answers "would this command name resolve at spawn time?" by searching the
//! same locations the OS would, without executing anything. The renderer
//! uses it to decide whether the `plantuml` launcher is installed before
//! trying the Java fallback.
//!
//! ## Architecture
//!
//! - `types`: Core types (`ResolveResult`, `Attempt`, `AttemptOutcome`)
//! - `env`: Environment variable access trait (injectable for testing)
//! - `fs`: Filesystem operations trait (injectable for testing)
//! - `search`: Platform-specific search strategies
//! - `resolve`: Resolution order and orchestration
//! - `probe`: `CommandProbe` adapter over the resolver
//!
//! ## Usage
//!
//! ```rust,no_run
//! use docgate_runtime::resolver::resolve_executable;
//!
//! let result = resolve_executable("java", &[]).unwrap();
//! println!("Resolved to: {}", result.resolved_path.display());
//!
//! for attempt in &result.attempts {
//!     println!("  {} - {}", attempt.candidate.display(), attempt.outcome);
//! }
//! ```

mod env;
mod fs;
mod probe;
mod resolve;
mod search;
mod types;

pub use env::{EnvProvider, SystemEnv};
pub use fs::{FsProvider, SystemFs};
pub use probe::PathCommandProbe;
pub use resolve::{resolve_executable, resolve_executable_with_deps};
pub use types::{Attempt, AttemptOutcome, ResolveError, ResolveResult};

#[cfg(test)]
pub use env::MockEnv;
#[cfg(test)]
pub use fs::MockFs;
