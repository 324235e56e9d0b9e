//! `generate-stub`: a new Markdown document from the bundled template.

use std::io;

use docgate_core::ToolOutcome;
use serde_json::json;
use serde_yaml::{Mapping, Value};
use tokio::io::AsyncWriteExt;
use tracing::info;

use super::{OperationContext, path_string, require_parent_dir};
use crate::args::ToolArgs;
use crate::error::OperationError;
use crate::frontmatter::FrontMatterDocument;

/// Front matter values written into a new stub.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StubMetadata {
    pub title: String,
    pub author: String,
    pub department: String,
    pub doc_number: String,
    pub current_revision: String,
    pub regulatory_rep: String,
    pub quality_rep: String,
    pub department_head: String,
    pub revision_description: String,
    pub eco_number: String,
    pub eco_date: String,
}

impl Default for StubMetadata {
    fn default() -> Self {
        Self {
            title: "Document Title".into(),
            author: "Author Name".into(),
            department: "--".into(),
            doc_number: "XX-00000".into(),
            current_revision: "00".into(),
            regulatory_rep: "--".into(),
            quality_rep: "--".into(),
            department_head: "--".into(),
            revision_description: "Initial release".into(),
            eco_number: "--".into(),
            eco_date: "YYYY-MM-DD".into(),
        }
    }
}

impl StubMetadata {
    /// Read the optional fields, defaulting anything absent or blank.
    pub fn from_args(args: &ToolArgs) -> Result<Self, OperationError> {
        let d = Self::default();
        let field = |name: &str, default: &str| args.str_or(name, default).map(str::to_string);

        Ok(Self {
            title: field("title", &d.title)?,
            author: field("author", &d.author)?,
            department: field("department", &d.department)?,
            doc_number: field("doc_number", &d.doc_number)?,
            current_revision: field("current_revision", &d.current_revision)?,
            regulatory_rep: field("regulatory_rep", &d.regulatory_rep)?,
            quality_rep: field("quality_rep", &d.quality_rep)?,
            department_head: field("department_head", &d.department_head)?,
            revision_description: field("revision_description", &d.revision_description)?,
            eco_number: field("eco_number", &d.eco_number)?,
            eco_date: field("eco_date", &d.eco_date)?,
        })
    }

    /// Write the fields into `doc`, replacing its revision history with a
    /// single entry for the current revision.
    pub fn apply(&self, doc: &mut FrontMatterDocument) {
        for (key, value) in [
            ("title", &self.title),
            ("author", &self.author),
            ("department", &self.department),
            ("doc_number", &self.doc_number),
            ("current_revision", &self.current_revision),
            ("regulatory_rep", &self.regulatory_rep),
            ("quality_rep", &self.quality_rep),
            ("department_head", &self.department_head),
        ] {
            doc.set_str(key, value);
        }

        let mut revision = Mapping::new();
        for (key, value) in [
            ("number", &self.current_revision),
            ("description", &self.revision_description),
            ("eco_number", &self.eco_number),
            ("eco_date", &self.eco_date),
        ] {
            revision.insert(Value::String(key.into()), Value::String(value.clone()));
        }
        doc.set("revisions", Value::Sequence(vec![Value::Mapping(revision)]));
    }
}

pub async fn generate_stub(
    ctx: &OperationContext,
    args: &ToolArgs,
) -> Result<ToolOutcome, OperationError> {
    let output = ctx.resolve(args.required_str("output_path")?);

    let template = &ctx.assets.stub_template;
    if !template.is_file() {
        return Err(OperationError::internal(format!(
            "Markdown stub template not found: {}",
            template.display()
        )));
    }
    if output.exists() {
        return Err(already_exists(&output));
    }
    require_parent_dir(&output)?;

    let metadata = StubMetadata::from_args(args)?;
    let text = tokio::fs::read_to_string(template).await.map_err(|e| {
        OperationError::internal(format!(
            "Failed to read stub template {}: {e}",
            template.display()
        ))
    })?;
    let mut doc = FrontMatterDocument::parse(&text).map_err(|e| {
        OperationError::internal(format!(
            "Stub template {} is malformed: {e}",
            template.display()
        ))
    })?;
    metadata.apply(&mut doc);
    let rendered = doc
        .render()
        .map_err(|e| OperationError::internal(format!("Failed to serialize front matter: {e}")))?;

    // create_new closes the gap between the existence check and the write
    let mut file = tokio::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&output)
        .await
        .map_err(|e| match e.kind() {
            io::ErrorKind::AlreadyExists => already_exists(&output),
            _ => OperationError::internal(format!(
                "Failed to create {}: {e}",
                output.display()
            )),
        })?;
    let write_err = |e: io::Error| {
        OperationError::internal(format!("Failed to write {}: {e}", output.display()))
    };
    file.write_all(rendered.as_bytes()).await.map_err(write_err)?;
    file.flush().await.map_err(write_err)?;

    info!(output = %output.display(), title = %metadata.title, "Created document stub");
    Ok(ToolOutcome::success_with_data(
        format!("Created document stub: {}", output.display()),
        json!({
            "output": path_string(&output),
            "title": metadata.title,
            "doc_number": metadata.doc_number,
        }),
    ))
}

fn already_exists(path: &std::path::Path) -> OperationError {
    OperationError::validation(format!(
        "Output file already exists: {}. Refusing to overwrite.",
        path.display()
    ))
}
