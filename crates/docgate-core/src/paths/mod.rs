//! Path utilities for docgate: user path resolution and bundled asset locations.
//!
//! This module provides the canonical path resolution for all docgate components:
//! - Normalizing user-supplied file paths against an invocation working directory
//! - Resource root (bundled compiler script, templates, style guides)
//! - User configuration file location
//!
//! # Design
//!
//! - Returns `PathBuf` and `PathError` for clear error handling
//! - `resolve_path` is pure path arithmetic; existence checks happen in callers
//! - OS-specific logic is kept private in `platform`

mod assets;
mod error;
mod normalize;
mod platform;
mod resolver;

#[cfg(test)]
pub(crate) mod test_utils;

// Error type
pub use error::PathError;

// User path normalization
pub use normalize::{normalize, resolve_path};

// Platform detection and roots
pub use platform::{config_file_path, is_prebuilt_binary, resource_root};

// Bundled assets
pub use assets::{AssetPaths, PLANTUML_ARCHIVE};

// Snapshot for CLI introspection
pub use resolver::ResolvedPaths;
