//! YAML front matter model for Markdown documents.
//!
//! A document opens with a `---` line, carries a YAML mapping, and closes the
//! block with `---` (or `...`). Everything after the closing line is the body
//! and is kept byte-for-byte.

use serde_yaml::{Mapping, Value};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FrontMatterError {
    #[error("Document does not start with a '---' front matter line")]
    Missing,

    #[error("Front matter block is not closed")]
    Unterminated,

    #[error("Invalid front matter YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Front matter must be a YAML mapping")]
    NotMapping,
}

/// A Markdown document split into its metadata mapping and body.
#[derive(Debug, Clone, PartialEq)]
pub struct FrontMatterDocument {
    pub meta: Mapping,
    pub body: String,
}

fn is_opening(line: &str) -> bool {
    line.trim_end() == "---"
}

fn is_closing(line: &str) -> bool {
    matches!(line.trim_end(), "---" | "...")
}

impl FrontMatterDocument {
    pub fn parse(text: &str) -> Result<Self, FrontMatterError> {
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        let mut lines = text.split_inclusive('\n');

        match lines.next() {
            Some(first) if is_opening(first) => {}
            _ => return Err(FrontMatterError::Missing),
        }

        let mut yaml = String::new();
        let mut offset = text.split_inclusive('\n').next().map_or(0, str::len);
        let mut closed = false;
        for line in lines {
            offset += line.len();
            if is_closing(line) {
                closed = true;
                break;
            }
            yaml.push_str(line);
        }
        if !closed {
            return Err(FrontMatterError::Unterminated);
        }

        let meta = if yaml.trim().is_empty() {
            Mapping::new()
        } else {
            match serde_yaml::from_str::<Value>(&yaml)? {
                Value::Mapping(map) => map,
                Value::Null => Mapping::new(),
                _ => return Err(FrontMatterError::NotMapping),
            }
        };

        Ok(Self {
            meta,
            body: text[offset..].to_string(),
        })
    }

    /// Set a string field, keeping its position if it already exists.
    pub fn set_str(&mut self, key: &str, value: &str) {
        self.set(key, Value::String(value.to_string()));
    }

    pub fn set(&mut self, key: &str, value: Value) {
        self.meta.insert(Value::String(key.to_string()), value);
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.meta.get(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    /// Serialize back to `---\n<yaml>---\n<body>`.
    pub fn render(&self) -> Result<String, FrontMatterError> {
        let yaml = if self.meta.is_empty() {
            String::new()
        } else {
            serde_yaml::to_string(&self.meta)?
        };
        Ok(format!("---\n{yaml}---\n{}", self.body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = "---\ntitle: Old\ncurrent_revision: '03'\nrevisions:\n  - number: '01'\n---\n\n# Heading\nBody text.\n";

    #[test]
    fn splits_meta_and_body() {
        let doc = FrontMatterDocument::parse(DOC).unwrap();
        assert_eq!(doc.get_str("title"), Some("Old"));
        assert_eq!(doc.get_str("current_revision"), Some("03"));
        assert_eq!(doc.body, "\n# Heading\nBody text.\n");
    }

    #[test]
    fn render_keeps_body_and_key_order() {
        let mut doc = FrontMatterDocument::parse(DOC).unwrap();
        doc.set_str("title", "New: with colon");

        let rendered = doc.render().unwrap();
        assert!(rendered.starts_with("---\ntitle:"));
        assert!(rendered.ends_with("---\n\n# Heading\nBody text.\n"));

        let reparsed = FrontMatterDocument::parse(&rendered).unwrap();
        assert_eq!(reparsed.get_str("title"), Some("New: with colon"));
        assert_eq!(reparsed.get_str("current_revision"), Some("03"));
    }

    #[test]
    fn crlf_documents_are_accepted() {
        let doc = FrontMatterDocument::parse("---\r\ntitle: A\r\n---\r\nbody\r\n").unwrap();
        assert_eq!(doc.get_str("title"), Some("A"));
        assert_eq!(doc.body, "body\r\n");
    }

    #[test]
    fn dots_close_the_block() {
        let doc = FrontMatterDocument::parse("---\na: b\n...\nrest").unwrap();
        assert_eq!(doc.body, "rest");
    }

    #[test]
    fn missing_and_unterminated_blocks_fail() {
        assert!(matches!(
            FrontMatterDocument::parse("# No front matter\n"),
            Err(FrontMatterError::Missing)
        ));
        assert!(matches!(
            FrontMatterDocument::parse("---\ntitle: x\n"),
            Err(FrontMatterError::Unterminated)
        ));
    }

    #[test]
    fn non_mapping_yaml_fails() {
        assert!(matches!(
            FrontMatterDocument::parse("---\n- a\n- b\n---\n"),
            Err(FrontMatterError::NotMapping)
        ));
    }
}
