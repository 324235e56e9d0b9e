//! Maps operation names to handlers and turns every failure into an envelope.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use docgate_core::{Operation, ToolOutcome};
use futures_util::FutureExt;
use serde_json::{Map, Value};
use tracing::{error, info, warn};

use crate::args::ToolArgs;
use crate::handlers::{self, OperationContext};

/// Stateless request router over a shared, read-only context.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    ctx: Arc<OperationContext>,
}

impl Dispatcher {
    pub fn new(ctx: OperationContext) -> Self {
        Self { ctx: Arc::new(ctx) }
    }

    pub fn context(&self) -> &OperationContext {
        &self.ctx
    }

    /// Run the named operation. Never fails and never panics: unknown names,
    /// handler errors and handler panics all become error outcomes.
    pub async fn dispatch(&self, name: &str, arguments: Option<Value>) -> ToolOutcome {
        let Ok(operation) = name.parse::<Operation>() else {
            warn!(tool = name, "Unknown tool requested");
            return ToolOutcome::error(format!("Unknown tool: {name}"));
        };

        let args = match ToolArgs::from_value(arguments) {
            Ok(args) => args,
            Err(e) => return e.into(),
        };

        info!(%operation, "Dispatching operation");
        let fut = self.run(operation, args);
        match AssertUnwindSafe(fut).catch_unwind().await {
            Ok(outcome) => outcome,
            Err(panic) => {
                let reason = panic
                    .downcast_ref::<&str>()
                    .map(ToString::to_string)
                    .or_else(|| panic.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "unknown panic".to_string());
                error!(%operation, %reason, "Operation handler panicked");
                ToolOutcome::error_with_details(
                    format!("Internal error while running {operation}"),
                    reason,
                )
            }
        }
    }

    /// Convenience for callers holding a JSON object of arguments.
    pub async fn dispatch_map(&self, name: &str, arguments: Map<String, Value>) -> ToolOutcome {
        self.dispatch(name, Some(Value::Object(arguments))).await
    }

    async fn run(&self, operation: Operation, args: ToolArgs) -> ToolOutcome {
        let ctx = &*self.ctx;
        let result = match operation {
            Operation::CompileDocument => handlers::compile_document(ctx, &args).await,
            Operation::RenderDiagram => handlers::render_diagram(ctx, &args).await,
            Operation::GenerateStub => handlers::generate_stub(ctx, &args).await,
        };

        match result {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!(%operation, error = %e, "Operation failed");
                e.into()
            }
        }
    }
}
