//! Core domain types and port definitions for docgate.
//!
//! This crate has no process or protocol dependencies. It owns:
//! - the tool configuration model, its loader and its validator
//! - path normalization and the platform roots assets are resolved from
//! - the operation catalogue and the uniform result envelope
//! - the ports (`ProcessRunner`, `CommandProbe`) that runtime adapters implement

#![deny(unsafe_code)]

pub mod config;
pub mod domain;
pub mod paths;
pub mod ports;

// Re-export commonly used types for convenience
pub use config::{
    ConfigError, ConfigSource, LoadedConfig, REQUIRED_KEYS, ToolConfig, ValidationReport,
};
pub use domain::{Operation, OutputFormat, ToolOutcome, UnknownOperation};
pub use paths::{AssetPaths, PathError, ResolvedPaths, resolve_path};
pub use ports::{
    CommandProbe, DEFAULT_OUTPUT_LIMIT, Invocation, OutputStream, ProcessFailure, ProcessOutput,
    ProcessRunner,
};
