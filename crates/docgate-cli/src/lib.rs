//! The `docgate` command-line adapter.
//!
//! `serve` runs the MCP server on stdio; `paths` and `check-config` help
//! diagnose an installation. All wiring happens in [`bootstrap`].

#![deny(unsafe_code)]

pub mod bootstrap;
pub mod error;
pub mod handlers;
pub mod parser;

pub use bootstrap::{CliConfig, bootstrap};
pub use error::CliError;
pub use parser::{Cli, Commands};
