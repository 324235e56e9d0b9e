//! Child process execution for the external converters.

mod capture;
mod runner;
mod shell;

pub use runner::TokioProcessRunner;
pub use shell::{ShellKind, shell_command};
