//! `compile-document`: Markdown with YAML front matter into a Word document.

use std::env;
use std::path::{Path, PathBuf};

use docgate_core::{Invocation, ToolOutcome};
use serde_json::json;
use tracing::{debug, info};

use super::{OperationContext, OutputStamp, has_extension, path_string, require_input_file};
use crate::args::ToolArgs;
use crate::error::OperationError;
use crate::path::build_effective_path;

/// Pick an override template if one was supplied, else the bundled one.
fn template(
    ctx: &OperationContext,
    args: &ToolArgs,
    name: &str,
    label: &str,
    bundled: &Path,
) -> Result<PathBuf, OperationError> {
    let Some(raw) = args.optional_str(name)? else {
        return Ok(bundled.to_path_buf());
    };

    let path = ctx.resolve(raw);
    if !path.is_file() {
        return Err(OperationError::validation(format!(
            "{label} not found: {}",
            path.display()
        )));
    }
    Ok(path)
}

pub async fn compile_document(
    ctx: &OperationContext,
    args: &ToolArgs,
) -> Result<ToolOutcome, OperationError> {
    let input = ctx.resolve(args.required_str("input_markdown")?);
    require_input_file(&input)?;
    if !has_extension(&input, "md") {
        return Err(OperationError::validation(format!(
            "Input file must be a Markdown (.md) file: {}",
            input.display()
        )));
    }

    let signature = template(
        ctx,
        args,
        "signature_template",
        "Signature template",
        &ctx.assets.signature_template,
    )?;
    let content = template(
        ctx,
        args,
        "content_template",
        "Content template",
        &ctx.assets.content_template,
    )?;

    let script = &ctx.assets.compiler_script;
    if !script.is_file() {
        return Err(OperationError::internal(format!(
            "Document compiler script not found: {}",
            script.display()
        )));
    }

    let output = match args.optional_str("output_word")? {
        Some(raw) => ctx.resolve(raw),
        None => input.with_extension("docx"),
    };

    let mut invocation = Invocation::direct(
        ctx.config.python_path.clone(),
        [script, &input, &output, &signature, &content].map(|p| path_string(p)),
    );
    if let Some(dir) = input.parent() {
        invocation = invocation.in_dir(dir);
    }
    if let Some(path) =
        build_effective_path(&ctx.config.pandoc_path, env::var_os("PATH").as_deref())
    {
        debug!(path = %path, "Extending compiler PATH with configured Pandoc");
        invocation = invocation.with_env("PATH", path);
    }

    info!(input = %input.display(), output = %output.display(), "Compiling document");
    let before = OutputStamp::take(&output);
    let result = ctx.runner.run(&invocation).await;

    if !result.success {
        return Err(OperationError::process(
            format!("Document compilation failed for {}", input.display()),
            &result,
        ));
    }
    if !before.produced(&output) {
        return Err(OperationError::postcondition(
            format!(
                "Compiler executed but did not create or update the output file: {}",
                output.display()
            ),
            &result,
        ));
    }

    let mut message = format!(
        "Compiled {} to {}",
        input.display(),
        output.display()
    );
    let stdout = result.stdout.trim();
    if !stdout.is_empty() {
        message.push_str("\n\n");
        message.push_str(stdout);
    }

    Ok(ToolOutcome::success_with_data(
        message,
        json!({
            "input": path_string(&input),
            "output": path_string(&output),
        }),
    ))
}
