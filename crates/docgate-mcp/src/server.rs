//! Line-delimited JSON-RPC server over stdio.
//!
//! Requests are read one line at a time and each is handled on its own task,
//! so a slow conversion never blocks `ping` or `tools/list`. All responses go
//! through a single writer task; stdout carries nothing else.

use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tracing::{debug, error, info, warn};

use crate::dispatcher::Dispatcher;
use crate::protocol::{
    CallToolParams, CallToolResult, InitializeResult, JSONRPC_VERSION, JsonRpcError,
    JsonRpcRequest, JsonRpcResponse, ReadResourceParams,
};
use crate::resources::{self, ResourceError};
use crate::tools;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("I/O error on the protocol stream: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize response: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Response writer task failed: {0}")]
    Writer(String),
}

/// The MCP server front end.
#[derive(Debug, Clone)]
pub struct McpServer {
    dispatcher: Dispatcher,
}

impl McpServer {
    pub const fn new(dispatcher: Dispatcher) -> Self {
        Self { dispatcher }
    }

    /// Serve on the process's stdin/stdout until stdin closes.
    pub async fn serve_stdio(self) -> Result<(), ServerError> {
        self.serve(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
            .await
    }

    /// Serve one connection until `reader` reaches EOF.
    ///
    /// In-flight requests are awaited and their responses flushed before
    /// returning.
    pub async fn serve<R, W>(self, mut reader: R, writer: W) -> Result<(), ServerError>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin + Send + 'static,
    {
        let (tx, rx) = mpsc::unbounded_channel();
        let writer_task = tokio::spawn(write_responses(writer, rx));
        let mut in_flight = JoinSet::new();
        let mut buf = Vec::new();

        let read_error = loop {
            buf.clear();
            match reader.read_until(b'\n', &mut buf).await {
                Ok(0) => break None,
                Ok(_) => {}
                Err(e) => break Some(e),
            }

            let line = match std::str::from_utf8(&buf) {
                Ok(line) => line.trim(),
                Err(e) => {
                    warn!(error = %e, "Input line is not valid UTF-8");
                    send(
                        &tx,
                        JsonRpcResponse::failure(Value::Null, JsonRpcError::parse_error(e)),
                    );
                    continue;
                }
            };
            if line.is_empty() {
                continue;
            }

            match parse_line(line) {
                Ok(request) if request.is_notification() => {
                    debug!(method = %request.method, "Notification received");
                }
                Ok(request) => {
                    let server = self.clone();
                    let tx = tx.clone();
                    in_flight.spawn(async move {
                        let response = server.handle(request).await;
                        send(&tx, response);
                    });
                }
                Err(response) => {
                    send(&tx, response);
                }
            }

            while let Some(done) = in_flight.try_join_next() {
                log_join(done);
            }
        };

        if let Some(e) = &read_error {
            error!(error = %e, "Reading the protocol stream failed");
        }
        debug!(pending = in_flight.len(), "Input closed, draining in-flight requests");
        while let Some(done) = in_flight.join_next().await {
            log_join(done);
        }
        drop(tx);

        let written = writer_task
            .await
            .map_err(|e| ServerError::Writer(e.to_string()))?;
        match read_error {
            Some(e) => Err(ServerError::Io(e)),
            None => written,
        }
    }

    async fn handle(&self, request: JsonRpcRequest) -> JsonRpcResponse {
        let id = request.id.unwrap_or(Value::Null);
        let params = request.params;

        let result = match request.method.as_str() {
            "initialize" => {
                if let Some(client) = params.as_ref().and_then(|p| p.get("clientInfo")) {
                    info!(%client, "Client connected");
                }
                serde_json::to_value(InitializeResult::new(env!("CARGO_PKG_VERSION")))
                    .map_err(JsonRpcError::internal)
            }
            "ping" => Ok(json!({})),
            "tools/list" => Ok(json!({ "tools": tools::catalogue() })),
            "tools/call" => self.call_tool(params).await,
            "resources/list" => Ok(json!({ "resources": resources::catalogue() })),
            "resources/read" => self.read_resource(params).await,
            other => Err(JsonRpcError::method_not_found(other)),
        };

        match result {
            Ok(value) => JsonRpcResponse::success(id, value),
            Err(error) => JsonRpcResponse::failure(id, error),
        }
    }

    async fn call_tool(&self, params: Option<Value>) -> Result<Value, JsonRpcError> {
        let call: CallToolParams = parse_params(params)?;
        let outcome = self.dispatcher.dispatch(&call.name, call.arguments).await;
        serde_json::to_value(CallToolResult::from(&outcome)).map_err(JsonRpcError::internal)
    }

    async fn read_resource(&self, params: Option<Value>) -> Result<Value, JsonRpcError> {
        let read: ReadResourceParams = parse_params(params)?;
        match resources::read(&read.uri, &self.dispatcher.context().assets).await {
            Ok(contents) => Ok(json!({ "contents": [contents] })),
            Err(ResourceError::Unknown(uri)) => Err(JsonRpcError::resource_not_found(&uri)),
            Err(e) => {
                error!(error = %e, "Resource read failed");
                Err(JsonRpcError::internal(e))
            }
        }
    }
}

/// Parse one input line; on failure returns the error response to send.
fn parse_line(line: &str) -> Result<JsonRpcRequest, JsonRpcResponse> {
    let value: Value = serde_json::from_str(line)
        .map_err(|e| JsonRpcResponse::failure(Value::Null, JsonRpcError::parse_error(e)))?;

    let id = value.get("id").cloned().unwrap_or(Value::Null);
    if !value.is_object() {
        return Err(JsonRpcResponse::failure(
            Value::Null,
            JsonRpcError::invalid_request("expected a JSON object"),
        ));
    }

    let request: JsonRpcRequest = serde_json::from_value(value)
        .map_err(|e| JsonRpcResponse::failure(id.clone(), JsonRpcError::invalid_request(e)))?;
    if request.jsonrpc != JSONRPC_VERSION {
        return Err(JsonRpcResponse::failure(
            id,
            JsonRpcError::invalid_request(format!("unsupported jsonrpc version '{}'", request.jsonrpc)),
        ));
    }
    Ok(request)
}

fn parse_params<T: DeserializeOwned>(params: Option<Value>) -> Result<T, JsonRpcError> {
    let params = params.ok_or_else(|| JsonRpcError::invalid_params("missing params"))?;
    serde_json::from_value(params).map_err(JsonRpcError::invalid_params)
}

/// Queue a response for the writer; false when the writer has gone away.
fn send(tx: &mpsc::UnboundedSender<JsonRpcResponse>, response: JsonRpcResponse) -> bool {
    let delivered = tx.send(response).is_ok();
    if !delivered {
        warn!("Response dropped, writer closed");
    }
    delivered
}

fn log_join(result: Result<(), tokio::task::JoinError>) {
    if let Err(e) = result {
        error!(error = %e, "Request task failed");
    }
}

async fn write_responses<W>(
    mut writer: W,
    mut rx: mpsc::UnboundedReceiver<JsonRpcResponse>,
) -> Result<(), ServerError>
where
    W: AsyncWrite + Unpin,
{
    while let Some(response) = rx.recv().await {
        let mut line = serde_json::to_string(&response)?;
        line.push('\n');
        writer.write_all(line.as_bytes()).await?;
        writer.flush().await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::codes;

    #[test]
    fn malformed_json_is_parse_error_with_null_id() {
        let resp = parse_line("{not json").unwrap_err();
        assert_eq!(resp.id, Value::Null);
        assert_eq!(resp.error.unwrap().code, codes::PARSE_ERROR);
    }

    #[test]
    fn non_object_is_invalid_request() {
        let resp = parse_line("[1,2]").unwrap_err();
        assert_eq!(resp.error.unwrap().code, codes::INVALID_REQUEST);
    }

    #[test]
    fn missing_method_keeps_id() {
        let resp = parse_line(r#"{"jsonrpc":"2.0","id":7}"#).unwrap_err();
        assert_eq!(resp.id, json!(7));
        assert_eq!(resp.error.unwrap().code, codes::INVALID_REQUEST);
    }

    #[test]
    fn wrong_version_is_invalid_request() {
        let resp = parse_line(r#"{"jsonrpc":"1.0","id":1,"method":"ping"}"#).unwrap_err();
        assert_eq!(resp.error.unwrap().code, codes::INVALID_REQUEST);
    }

    #[test]
    fn send_reports_closed_writer() {
        let (tx, rx) = mpsc::unbounded_channel();
        let response = || JsonRpcResponse::success(json!(1), json!({}));
        assert!(send(&tx, response()));
        drop(rx);
        assert!(!send(&tx, response()));
    }

    #[test]
    fn params_are_required_for_calls() {
        let err = parse_params::<CallToolParams>(None).unwrap_err();
        assert_eq!(err.code, codes::INVALID_PARAMS);
        let err = parse_params::<CallToolParams>(Some(json!({"arguments": {}}))).unwrap_err();
        assert_eq!(err.code, codes::INVALID_PARAMS);
    }
}
