//! Operation handlers.
//!
//! Each handler validates its arguments in a fixed order, builds an
//! [`Invocation`](docgate_core::Invocation), runs it through the injected
//! runner and checks that the promised artifact exists before reporting
//! success. Nothing is spawned or written until validation has passed.

mod compile;
mod render;
mod stub;

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use docgate_core::{AssetPaths, CommandProbe, ProcessRunner, ToolConfig, resolve_path};

use crate::error::OperationError;

pub use compile::compile_document;
pub use render::render_diagram;
pub use stub::{StubMetadata, generate_stub};

/// Everything a handler needs, injected once at startup and shared read-only.
#[derive(Clone)]
pub struct OperationContext {
    pub config: ToolConfig,
    pub assets: AssetPaths,
    /// Base for relative path arguments.
    pub working_dir: PathBuf,
    pub runner: Arc<dyn ProcessRunner>,
    pub probe: Arc<dyn CommandProbe>,
}

impl std::fmt::Debug for OperationContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OperationContext")
            .field("config", &self.config)
            .field("assets", &self.assets)
            .field("working_dir", &self.working_dir)
            .finish_non_exhaustive()
    }
}

impl OperationContext {
    pub fn new(
        config: ToolConfig,
        assets: AssetPaths,
        working_dir: PathBuf,
        runner: Arc<dyn ProcessRunner>,
        probe: Arc<dyn CommandProbe>,
    ) -> Self {
        Self {
            config,
            assets,
            working_dir,
            runner,
            probe,
        }
    }

    /// Resolve a user-supplied path against the invocation working directory.
    pub fn resolve(&self, path: &str) -> PathBuf {
        resolve_path(path, Some(&self.working_dir))
    }
}

/// Fail unless `path` is an existing regular file.
fn require_input_file(path: &Path) -> Result<(), OperationError> {
    if path.is_file() {
        Ok(())
    } else if path.exists() {
        Err(OperationError::validation(format!(
            "Input path is not a file: {}",
            path.display()
        )))
    } else {
        Err(OperationError::validation(format!(
            "Input file not found: {}",
            path.display()
        )))
    }
}

/// Case-insensitive extension check.
fn has_extension(path: &Path, ext: &str) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(ext))
}

/// Fail unless the directory an output will land in exists.
fn require_parent_dir(path: &Path) -> Result<(), OperationError> {
    match path.parent() {
        Some(parent) if parent.is_dir() => Ok(()),
        Some(parent) => Err(OperationError::validation(format!(
            "Output directory does not exist: {}",
            parent.display()
        ))),
        None => Err(OperationError::validation(format!(
            "Invalid output path: {}",
            path.display()
        ))),
    }
}

/// What an output path held before a converter ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputStamp {
    Absent,
    /// `None` when the platform reports no modification time.
    Present(Option<SystemTime>),
}

impl OutputStamp {
    fn take(path: &Path) -> Self {
        match fs::metadata(path) {
            Ok(meta) if meta.is_file() => Self::Present(meta.modified().ok()),
            _ => Self::Absent,
        }
    }

    /// True when `path` is now a file that is new or modified since the stamp.
    fn produced(self, path: &Path) -> bool {
        match (self, Self::take(path)) {
            (_, Self::Absent) => false,
            (Self::Absent, Self::Present(_)) | (Self::Present(None), Self::Present(_)) => true,
            (Self::Present(before), Self::Present(after)) => before != after,
        }
    }
}

fn path_string(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
