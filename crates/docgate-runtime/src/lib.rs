//! OS adapters for docgate.
//!
//! - [`TokioProcessRunner`] implements the `ProcessRunner` port with bounded
//!   output capture, an optional timeout and command-not-found classification.
//! - [`PathCommandProbe`] implements the `CommandProbe` port by searching for
//!   executables without running them.

#![deny(unsafe_code)]

pub mod process;
pub mod resolver;

pub use process::TokioProcessRunner;
pub use resolver::{PathCommandProbe, resolve_executable};
