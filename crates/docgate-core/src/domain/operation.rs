//! The fixed operation catalogue and the diagram output formats.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A callable capability exposed to the assistant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Operation {
    /// Markdown + YAML front matter into a styled Word document.
    CompileDocument,
    /// PlantUML source into an image.
    RenderDiagram,
    /// New Markdown document from the bundled template.
    GenerateStub,
}

impl Operation {
    /// Every operation, in catalogue order.
    pub const ALL: [Self; 3] = [Self::CompileDocument, Self::RenderDiagram, Self::GenerateStub];

    /// Wire name of the operation.
    pub const fn name(self) -> &'static str {
        match self {
            Self::CompileDocument => "compile-document",
            Self::RenderDiagram => "render-diagram",
            Self::GenerateStub => "generate-stub",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when a name is not part of the catalogue.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown tool: {0}")]
pub struct UnknownOperation(pub String);

impl FromStr for Operation {
    type Err = UnknownOperation;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|op| op.name() == s)
            .ok_or_else(|| UnknownOperation(s.to_string()))
    }
}

/// Image formats the diagram renderer can produce.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Png,
    Svg,
    Pdf,
}

impl OutputFormat {
    pub const ALL: [Self; 3] = [Self::Png, Self::Svg, Self::Pdf];

    /// File extension, also the renderer's `-t` flag value.
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Svg => "svg",
            Self::Pdf => "pdf",
        }
    }

    /// The `-t<format>` flag passed to PlantUML.
    pub fn renderer_flag(self) -> String {
        format!("-t{}", self.extension())
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.extension().to_ascii_uppercase())
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|f| f.extension() == lower)
            .ok_or_else(|| format!("Unsupported output format '{s}'. Expected one of: png, svg, pdf"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operation_names_round_trip() {
        for op in Operation::ALL {
            assert_eq!(op.name().parse::<Operation>().unwrap(), op);
        }
    }

    #[test]
    fn unknown_operation_is_reported() {
        let err = "delete-everything".parse::<Operation>().unwrap_err();
        assert_eq!(err.to_string(), "Unknown tool: delete-everything");
    }

    #[test]
    fn format_parsing_is_case_insensitive() {
        assert_eq!("SVG".parse::<OutputFormat>().unwrap(), OutputFormat::Svg);
        assert_eq!(" pdf ".parse::<OutputFormat>().unwrap(), OutputFormat::Pdf);
        assert!("gif".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn format_display_is_upper_case() {
        assert_eq!(OutputFormat::Svg.to_string(), "SVG");
        assert_eq!(OutputFormat::default(), OutputFormat::Png);
        assert_eq!(OutputFormat::Pdf.renderer_flag(), "-tpdf");
    }
}
