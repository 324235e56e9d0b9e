//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces the operation handlers expect from
//! infrastructure. They contain no implementation details; the Tokio-backed
//! adapters live in `docgate-runtime` and tests substitute fakes.
//!
//! # Design Rules
//!
//! - No `tokio::process` types in any signature
//! - Process failures are data, never panics
//! - Intent-based invocations (direct program, or program run through the shell)

pub mod command_probe;
pub mod process_runner;

pub use command_probe::CommandProbe;
pub use process_runner::{
    DEFAULT_OUTPUT_LIMIT, Invocation, OutputStream, ProcessFailure, ProcessOutput, ProcessRunner,
};
