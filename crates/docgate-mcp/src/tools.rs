//! Tool catalogue published through `tools/list`.

use docgate_core::Operation;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

/// Tool definition as sent to the assistant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDescriptor {
    pub name: String,
    pub description: String,
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

impl ToolDescriptor {
    fn new(operation: Operation, description: &str, required: &[&str], props: &[(&str, &str)]) -> Self {
        let properties: Map<String, Value> = props
            .iter()
            .map(|(name, desc)| ((*name).to_string(), json!({"type": "string", "description": desc})))
            .collect();

        Self {
            name: operation.name().to_string(),
            description: description.to_string(),
            input_schema: json!({
                "type": "object",
                "properties": properties,
                "required": required,
            }),
        }
    }
}

fn describe(operation: Operation) -> ToolDescriptor {
    match operation {
        Operation::CompileDocument => ToolDescriptor::new(
            operation,
            "Compile a Markdown file with YAML front matter into a styled Word document \
             using the signature and content templates.",
            &["input_markdown"],
            &[
                ("input_markdown", "Path to the Markdown (.md) source file"),
                ("output_word", "Output .docx path (default: input name with .docx)"),
                ("signature_template", "Override for the signature page Word template"),
                ("content_template", "Override for the content Word template"),
            ],
        ),
        Operation::RenderDiagram => {
            let mut tool = ToolDescriptor::new(
                operation,
                "Render a PlantUML (.puml) diagram to PNG, SVG or PDF beside the source file.",
                &["input_file"],
                &[
                    ("input_file", "Path to the PlantUML (.puml) source file"),
                    ("output_format", "Image format: png (default), svg or pdf"),
                    ("output_path", "Move the rendered image to this path"),
                ],
            );
            tool.input_schema["properties"]["output_format"]["enum"] = json!(["png", "svg", "pdf"]);
            tool
        }
        Operation::GenerateStub => ToolDescriptor::new(
            operation,
            "Create a new Markdown document from the standard template with its front \
             matter filled in. Never overwrites an existing file.",
            &["output_path"],
            &[
                ("output_path", "Path of the Markdown file to create"),
                ("title", "Document title (default: Document Title)"),
                ("author", "Author name (default: Author Name)"),
                ("department", "Owning department (default: --)"),
                ("doc_number", "Document number (default: XX-00000)"),
                ("current_revision", "Current revision (default: 00)"),
                ("regulatory_rep", "Regulatory representative (default: --)"),
                ("quality_rep", "Quality representative (default: --)"),
                ("department_head", "Department head (default: --)"),
                ("revision_description", "Revision description (default: Initial release)"),
                ("eco_number", "Engineering change order number (default: --)"),
                ("eco_date", "Engineering change order date (default: YYYY-MM-DD)"),
            ],
        ),
    }
}

/// Every tool, in catalogue order.
pub fn catalogue() -> Vec<ToolDescriptor> {
    Operation::ALL.into_iter().map(describe).collect()
}
