//! Serve command handler: the stdio MCP server.

use docgate_mcp::McpServer;
use tracing::info;

use crate::bootstrap::{self, CliConfig};
use crate::error::CliError;

/// Bootstrap the dispatcher and serve until stdin closes.
pub async fn execute(config: &CliConfig) -> Result<(), CliError> {
    let dispatcher = bootstrap::bootstrap(config)?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        working_dir = %config.working_dir.display(),
        "docgate MCP server listening on stdio"
    );
    McpServer::new(dispatcher).serve_stdio().await?;
    info!("stdin closed, shutting down");
    Ok(())
}
