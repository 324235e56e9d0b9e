//! Locations of the assets bundled with docgate.

use std::path::{Path, PathBuf};

use super::error::PathError;
use super::platform::resource_root;

/// File name of the PlantUML archive expected inside `plantumlPath`.
pub const PLANTUML_ARCHIVE: &str = "plantuml.jar";

/// Every bundled asset path, resolved against one resource root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetPaths {
    /// Root all other paths hang off.
    pub root: PathBuf,
    /// Python document compiler driven by `compile-document`.
    pub compiler_script: PathBuf,
    /// Signature page Word template (first part of a compiled document).
    pub signature_template: PathBuf,
    /// Title/content Word template.
    pub content_template: PathBuf,
    /// Markdown skeleton copied by `generate-stub`.
    pub stub_template: PathBuf,
    /// Markdown authoring guide served as a resource.
    pub markdown_guide: PathBuf,
    /// PlantUML authoring guide served as a resource.
    pub plantuml_guide: PathBuf,
    /// Fallback configuration used when the user has none.
    pub example_config: PathBuf,
}

impl AssetPaths {
    /// Lay out the asset paths under `root`.
    pub fn under(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let assets = root.join("assets");
        let templates = assets.join("templates");
        let guides = assets.join("guides");

        Self {
            compiler_script: assets.join("compiler").join("generate_document.py"),
            signature_template: templates.join("TEMPLATE_Word_Signature.docx"),
            content_template: templates.join("TEMPLATE_Word_Content.docx"),
            stub_template: templates.join("TEMPLATE_Markdown_Stub.md"),
            markdown_guide: guides.join("MARKDOWN_STYLE_GUIDE.md"),
            plantuml_guide: guides.join("PLANTUML_STYLE_GUIDE.md"),
            example_config: assets.join("config.example.json"),
            root,
        }
    }

    /// Resolve the asset paths from the detected resource root.
    pub fn discover() -> Result<Self, PathError> {
        Ok(Self::under(resource_root()?))
    }

    /// Path of the PlantUML archive inside a configured renderer directory.
    pub fn plantuml_archive(plantuml_dir: &Path) -> PathBuf {
        plantuml_dir.join(PLANTUML_ARCHIVE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assets_hang_off_root() {
        let assets = AssetPaths::under("/opt/docgate");

        assert_eq!(assets.root, PathBuf::from("/opt/docgate"));
        assert!(assets.compiler_script.starts_with("/opt/docgate/assets/compiler"));
        assert!(assets.stub_template.ends_with("TEMPLATE_Markdown_Stub.md"));
        assert_eq!(
            assets.example_config,
            PathBuf::from("/opt/docgate/assets/config.example.json")
        );
    }

    #[test]
    fn archive_lives_in_renderer_dir() {
        assert_eq!(
            AssetPaths::plantuml_archive(Path::new("/tools/plantuml")),
            PathBuf::from("/tools/plantuml/plantuml.jar")
        );
    }
}
