//! `render-diagram`: PlantUML source into PNG, SVG or PDF.
//!
//! The `plantuml` launcher is preferred because operators often wrap the
//! archive with their own JVM flags. When it is not installed the archive is
//! run through `java -jar` instead.

use std::io;
use std::path::{Path, PathBuf};

use docgate_core::{AssetPaths, Invocation, OutputFormat, ProcessOutput, ToolOutcome};
use serde_json::json;
use tracing::{debug, info, warn};

use super::{
    OperationContext, OutputStamp, has_extension, path_string, require_input_file,
    require_parent_dir,
};
use crate::args::ToolArgs;
use crate::error::OperationError;

const LAUNCHER: &str = "plantuml";

pub async fn render_diagram(
    ctx: &OperationContext,
    args: &ToolArgs,
) -> Result<ToolOutcome, OperationError> {
    let input = ctx.resolve(args.required_str("input_file")?);
    require_input_file(&input)?;
    if !has_extension(&input, "puml") {
        return Err(OperationError::validation(format!(
            "Input file must be a PlantUML (.puml) file: {}",
            input.display()
        )));
    }

    let format = match args.optional_str("output_format")? {
        Some(raw) => raw.parse::<OutputFormat>().map_err(OperationError::Validation)?,
        None => OutputFormat::default(),
    };

    let archive = AssetPaths::plantuml_archive(&ctx.config.plantuml_dir());
    if !archive.is_file() {
        return Err(OperationError::internal(format!(
            "PlantUML archive not found at {}. Check plantumlPath in the configuration.",
            archive.display()
        )));
    }

    let requested = args.optional_str("output_path")?.map(|raw| ctx.resolve(raw));
    if let Some(target) = &requested {
        require_parent_dir(target)?;
    }

    let rendered = input.with_extension(format.extension());
    info!(input = %input.display(), %format, "Rendering diagram");
    let before = OutputStamp::take(&rendered);
    let result = run_renderer(ctx, &input, &archive, format).await;

    if !result.success {
        return Err(OperationError::process(
            format!("PlantUML rendering failed for {}", input.display()),
            &result,
        ));
    }
    if !before.produced(&rendered) {
        return Err(OperationError::postcondition(
            format!(
                "PlantUML executed but did not create or update the expected output file: {}. \
                 The renderer may have chosen a different output name (for example from \
                 an @startuml name).",
                rendered.display()
            ),
            &result,
        ));
    }

    let output = match requested {
        Some(target) if target != rendered => {
            move_file(&rendered, &target).await.map_err(|e| {
                OperationError::internal(format!(
                    "Rendered {} but could not move it to {}: {e}",
                    rendered.display(),
                    target.display()
                ))
            })?;
            target
        }
        _ => rendered,
    };

    Ok(ToolOutcome::success_with_data(
        format!(
            "Rendered {} to {} ({format})",
            input.display(),
            output.display()
        ),
        json!({
            "input": path_string(&input),
            "output": path_string(&output),
            "format": format.extension(),
        }),
    ))
}

/// Try the launcher, falling back to `java -jar` only when it is missing.
async fn run_renderer(
    ctx: &OperationContext,
    input: &Path,
    archive: &Path,
    format: OutputFormat,
) -> ProcessOutput {
    let dir = input.parent().map(Path::to_path_buf);
    let direct = with_dir(
        Invocation::direct(
            "java",
            [
                "-jar".to_string(),
                path_string(archive),
                format.renderer_flag(),
                path_string(input),
            ],
        ),
        dir.as_ref(),
    );

    if !ctx.probe.is_available(LAUNCHER) {
        debug!("plantuml launcher not on PATH, using java -jar");
        return ctx.runner.run(&direct).await;
    }

    let launcher = with_dir(
        Invocation::shell(LAUNCHER, [format.renderer_flag(), path_string(input)]),
        dir.as_ref(),
    );
    let result = ctx.runner.run(&launcher).await;
    if result.is_command_not_found() {
        warn!("plantuml launcher could not be run, retrying with java -jar");
        return ctx.runner.run(&direct).await;
    }
    result
}

fn with_dir(invocation: Invocation, dir: Option<&PathBuf>) -> Invocation {
    match dir {
        Some(dir) => invocation.in_dir(dir),
        None => invocation,
    }
}

async fn move_file(from: &Path, to: &Path) -> io::Result<()> {
    if tokio::fs::rename(from, to).await.is_ok() {
        return Ok(());
    }
    // Rename fails across filesystems
    tokio::fs::copy(from, to).await?;
    tokio::fs::remove_file(from).await
}
