//! Style guides served verbatim through `resources/list` and `resources/read`.

use std::path::PathBuf;

use docgate_core::AssetPaths;
use serde::Serialize;
use thiserror::Error;

pub const MARKDOWN_GUIDE_URI: &str = "docgate://guides/markdown";
pub const PLANTUML_GUIDE_URI: &str = "docgate://guides/plantuml";
const MIME_MARKDOWN: &str = "text/markdown";

#[derive(Debug, Error)]
pub enum ResourceError {
    #[error("Unknown resource: {0}")]
    Unknown(String),

    #[error("Failed to read resource {uri}: {reason}")]
    Read { uri: String, reason: String },
}

/// Entry in `resources/list`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceDescriptor {
    pub uri: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub mime_type: &'static str,
}

/// One item of a `resources/read` result.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceContents {
    pub uri: String,
    pub mime_type: &'static str,
    pub text: String,
}

/// The static resource set.
pub fn catalogue() -> [ResourceDescriptor; 2] {
    [
        ResourceDescriptor {
            uri: MARKDOWN_GUIDE_URI,
            name: "Markdown style guide",
            description: "Front matter fields and formatting rules for compiled documents",
            mime_type: MIME_MARKDOWN,
        },
        ResourceDescriptor {
            uri: PLANTUML_GUIDE_URI,
            name: "PlantUML style guide",
            description: "Diagram conventions for PlantUML sources",
            mime_type: MIME_MARKDOWN,
        },
    ]
}

fn locate(uri: &str, assets: &AssetPaths) -> Option<PathBuf> {
    match uri {
        MARKDOWN_GUIDE_URI => Some(assets.markdown_guide.clone()),
        PLANTUML_GUIDE_URI => Some(assets.plantuml_guide.clone()),
        _ => None,
    }
}

/// Read a resource's text from the asset directory.
pub async fn read(uri: &str, assets: &AssetPaths) -> Result<ResourceContents, ResourceError> {
    let path = locate(uri, assets).ok_or_else(|| ResourceError::Unknown(uri.to_string()))?;
    let text = tokio::fs::read_to_string(&path)
        .await
        .map_err(|e| ResourceError::Read {
            uri: uri.to_string(),
            reason: format!("{}: {e}", path.display()),
        })?;

    Ok(ResourceContents {
        uri: uri.to_string(),
        mime_type: MIME_MARKDOWN,
        text,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn reads_guides_verbatim() {
        let dir = tempdir().unwrap();
        let assets = AssetPaths::under(dir.path());
        std::fs::create_dir_all(assets.plantuml_guide.parent().unwrap()).unwrap();
        std::fs::write(&assets.plantuml_guide, "# PlantUML\n\nUse skinparam.\n").unwrap();

        let contents = read(PLANTUML_GUIDE_URI, &assets).await.unwrap();
        assert_eq!(contents.text, "# PlantUML\n\nUse skinparam.\n");
        assert_eq!(contents.mime_type, "text/markdown");
    }

    #[tokio::test]
    async fn unknown_and_missing_resources_fail() {
        let dir = tempdir().unwrap();
        let assets = AssetPaths::under(dir.path());

        assert!(matches!(
            read("docgate://guides/cobol", &assets).await,
            Err(ResourceError::Unknown(_))
        ));
        assert!(matches!(
            read(MARKDOWN_GUIDE_URI, &assets).await,
            Err(ResourceError::Read { .. })
        ));
    }
}
