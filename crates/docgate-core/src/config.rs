//! Tool configuration: loading, required-key checks and installation validation.
//!
//! The configuration names the three external tools docgate drives. It is
//! loaded once at startup, never mutated, and handed to the dispatcher
//! explicitly.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::paths::AssetPaths;

/// JSON keys every configuration file must carry.
pub const REQUIRED_KEYS: [&str; 3] = ["pythonPath", "plantumlPath", "pandocPath"];

/// Paths to the external tools.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolConfig {
    /// Python interpreter that runs the document compiler.
    pub python_path: String,
    /// Directory containing `plantuml.jar`.
    pub plantuml_path: String,
    /// Pandoc executable used by the compiler.
    pub pandoc_path: String,
}

/// Where a loaded configuration came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSource {
    /// The user's own configuration file.
    User,
    /// The example file bundled with docgate.
    BundledExample,
}

/// A configuration together with its provenance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedConfig {
    pub config: ToolConfig,
    pub source: ConfigSource,
    pub path: PathBuf,
}

/// Errors raised while loading the configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("No configuration found at {user} and no bundled example at {fallback}")]
    NotFound { user: PathBuf, fallback: PathBuf },

    #[error("Failed to read configuration {path}: {reason}")]
    Read { path: PathBuf, reason: String },

    #[error("Invalid configuration {path}: {reason}")]
    Parse { path: PathBuf, reason: String },

    #[error("Configuration {path} is missing required keys: {}", .keys.join(", "))]
    MissingKeys { path: PathBuf, keys: Vec<String> },
}

impl ToolConfig {
    /// Load from `user_path`, falling back to the bundled example.
    ///
    /// Using the fallback is logged as a warning since its paths are
    /// placeholders for a typical installation.
    pub fn load_from(user_path: &Path, fallback_path: &Path) -> Result<LoadedConfig, ConfigError> {
        let (path, source) = if user_path.is_file() {
            (user_path, ConfigSource::User)
        } else if fallback_path.is_file() {
            warn!(
                "No configuration at {}, using bundled example {}",
                user_path.display(),
                fallback_path.display()
            );
            (fallback_path, ConfigSource::BundledExample)
        } else {
            return Err(ConfigError::NotFound {
                user: user_path.to_path_buf(),
                fallback: fallback_path.to_path_buf(),
            });
        };

        let text = fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let config = Self::parse(&text, path)?;
        debug!(path = %path.display(), ?source, "Configuration loaded");

        Ok(LoadedConfig {
            config,
            source,
            path: path.to_path_buf(),
        })
    }

    /// Parse configuration JSON, reporting every missing or empty required key.
    pub fn parse(text: &str, path: &Path) -> Result<Self, ConfigError> {
        let value: Value = serde_json::from_str(text).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let Value::Object(map) = value else {
            return Err(ConfigError::Parse {
                path: path.to_path_buf(),
                reason: "expected a JSON object".to_string(),
            });
        };

        let missing: Vec<String> = REQUIRED_KEYS
            .iter()
            .filter(|key| {
                map.get(**key)
                    .and_then(Value::as_str)
                    .is_none_or(|v| v.trim().is_empty())
            })
            .map(|key| (*key).to_string())
            .collect();

        if !missing.is_empty() {
            return Err(ConfigError::MissingKeys {
                path: path.to_path_buf(),
                keys: missing,
            });
        }

        serde_json::from_value(Value::Object(map)).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Directory holding the PlantUML archive.
    pub fn plantuml_dir(&self) -> PathBuf {
        PathBuf::from(&self.plantuml_path)
    }

    /// Check the installation this configuration points at.
    ///
    /// Only the compiler script is a hard requirement; everything else
    /// degrades to a warning so the server can still start.
    pub fn validate(&self, assets: &AssetPaths) -> ValidationReport {
        let mut report = ValidationReport::default();

        if !assets.compiler_script.is_file() {
            report.error(format!(
                "Document compiler script not found: {}",
                assets.compiler_script.display()
            ));
        }

        for (label, path) in [
            ("Signature template", &assets.signature_template),
            ("Content template", &assets.content_template),
            ("Markdown stub template", &assets.stub_template),
            ("Markdown style guide", &assets.markdown_guide),
            ("PlantUML style guide", &assets.plantuml_guide),
        ] {
            if !path.is_file() {
                report.warning(format!("{label} not found: {}", path.display()));
            }
        }

        let plantuml_dir = self.plantuml_dir();
        if !plantuml_dir.is_dir() {
            report.warning(format!(
                "PlantUML directory not found: {}",
                plantuml_dir.display()
            ));
        }

        // Bare command names are resolved through PATH at spawn time
        for (label, value) in [("Python", &self.python_path), ("Pandoc", &self.pandoc_path)] {
            let path = Path::new(value);
            if path.is_absolute() && !path.exists() {
                report.warning(format!("{label} executable not found: {value}"));
            }
        }

        report
    }
}

/// Result of validating an installation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    /// False only when a hard requirement failed.
    pub valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }
}

impl ValidationReport {
    fn error(&mut self, message: String) {
        self.valid = false;
        self.errors.push(message);
    }

    fn warning(&mut self, message: String) {
        self.warnings.push(message);
    }
}
