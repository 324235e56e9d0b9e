//! Command handlers.
//!
//! Each handler is a thin wrapper: resolve what it needs through
//! [`crate::bootstrap`], do one thing, and report on stdout or stderr.

pub mod check_config;
pub mod paths;
pub mod serve;
