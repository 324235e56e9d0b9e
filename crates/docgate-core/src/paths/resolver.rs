//! Resolved path snapshot for CLI introspection.
//!
//! Captures every path docgate resolves in one call so `docgate paths` and
//! debugging sessions see the same answer the server uses.

use std::path::PathBuf;

use super::{AssetPaths, PathError, config_file_path, is_prebuilt_binary};

/// All resolved paths captured in a single struct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPaths {
    /// User configuration file (may not exist).
    pub config_file: PathBuf,
    /// Whether the binary runs outside the source repository.
    pub prebuilt: bool,
    /// Bundled assets.
    pub assets: AssetPaths,
}

impl ResolvedPaths {
    /// Resolve all paths using the current environment.
    pub fn resolve() -> Result<Self, PathError> {
        Ok(Self {
            config_file: config_file_path()?,
            prebuilt: is_prebuilt_binary(),
            assets: AssetPaths::discover()?,
        })
    }
}

impl std::fmt::Display for ResolvedPaths {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "config_file = {}", self.config_file.display())?;
        writeln!(f, "example_config = {}", self.assets.example_config.display())?;
        writeln!(f, "resource_root = {}", self.assets.root.display())?;
        writeln!(f, "compiler_script = {}", self.assets.compiler_script.display())?;
        writeln!(
            f,
            "signature_template = {}",
            self.assets.signature_template.display()
        )?;
        writeln!(f, "content_template = {}", self.assets.content_template.display())?;
        writeln!(f, "stub_template = {}", self.assets.stub_template.display())?;
        writeln!(f, "markdown_guide = {}", self.assets.markdown_guide.display())?;
        writeln!(f, "plantuml_guide = {}", self.assets.plantuml_guide.display())?;
        write!(f, "prebuilt = {}", self.prebuilt)
    }
}
