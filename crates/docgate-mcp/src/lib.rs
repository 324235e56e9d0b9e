//! Operation handlers and the stdio MCP server for docgate.
//!
//! Requests flow `server` → `dispatcher` → `handlers`. Handlers only see the
//! ports from `docgate-core`; the composition root injects concrete
//! runners and probes through [`OperationContext`].

#![deny(unsafe_code)]

pub mod args;
pub mod dispatcher;
pub mod error;
pub mod frontmatter;
pub mod handlers;
pub(crate) mod path;
pub mod protocol;
pub mod resources;
pub mod server;
pub mod tools;

pub use dispatcher::Dispatcher;
pub use error::OperationError;
pub use handlers::OperationContext;
pub use server::{McpServer, ServerError};

// Re-export domain types from core for convenience
pub use docgate_core::{Operation, OutputFormat, ToolOutcome};
