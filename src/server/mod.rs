//! Minimal MCP (Model Context Protocol) server over stdio.
//!
//! Requests are newline-delimited JSON-RPC 2.0 messages on stdin, responses
//! go to stdout. Only the subset needed to expose tools is implemented:
//! initialize, ping, tools/list and tools/call.

use crate::{
    pool::PkgPool,
    tools::{self, Tool, ToolOutcome},
};

use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::{json, Map, Value};
use tokio::io::{self, AsyncBufReadExt, AsyncWriteExt, BufReader};

pub const PROTOCOL_VERSION: &str = "2024-11-05";
pub const SERVER_NAME: &str = "Alpine Package Database";

#[derive(Deserialize)]
struct Request {
    #[serde(default)]
    id: Option<Value>,
    method: String,
    #[serde(default)]
    params: Value,
}

pub struct Server {
    tools: Vec<Tool>,
}

impl Server {
    pub fn new() -> Self {
        Server {
            tools: tools::all_tools(),
        }
    }

    /// Serve requests until stdin is closed.
    pub async fn serve(&self, pool: &PkgPool) -> Result<()> {
        let stdin = BufReader::new(io::stdin());
        let mut stdout = io::stdout();
        let mut lines = stdin.lines();
        while let Some(line) = lines.next_line().await.context("Failed to read request")? {
            if line.trim().is_empty() {
                continue;
            }
            if let Some(resp) = self.handle_message(pool, &line) {
                let mut data =
                    serde_json::to_vec(&resp).context("Failed to encode response")?;
                data.push(b'\n');
                stdout
                    .write_all(&data)
                    .await
                    .context("Failed to write response")?;
                stdout.flush().await.context("Failed to flush response")?;
            }
        }
        Ok(())
    }

    // Returns None for notifications, which expect no response.
    fn handle_message(&self, pool: &PkgPool, line: &str) -> Option<Value> {
        let req: Request = match serde_json::from_str(line) {
            Ok(req) => req,
            Err(e) => return Some(error_response(Value::Null, -32700, &format!("Parse error: {e}"))),
        };
        if req.method.starts_with("notifications/") {
            return None;
        }
        let id = req.id.unwrap_or(Value::Null);

        let result = match req.method.as_str() {
            "initialize" => json!({
                "protocolVersion": PROTOCOL_VERSION,
                "capabilities": { "tools": {} },
                "serverInfo": {
                    "name": SERVER_NAME,
                    "version": env!("CARGO_PKG_VERSION"),
                },
            }),
            "ping" => json!({}),
            "tools/list" => json!({
                "tools": self.tools.iter().map(|t| &t.definition).collect::<Vec<_>>(),
            }),
            "tools/call" => return Some(self.call_tool(pool, id, &req.params)),
            _ => {
                return Some(error_response(
                    id,
                    -32601,
                    &format!("Method not found: {}", req.method),
                ))
            }
        };
        Some(json!({ "jsonrpc": "2.0", "id": id, "result": result }))
    }

    fn call_tool(&self, pool: &PkgPool, id: Value, params: &Value) -> Value {
        let name = match params.get("name").and_then(Value::as_str) {
            Some(name) => name,
            None => return error_response(id, -32602, "Missing tool name"),
        };
        let tool = match self.tools.iter().find(|t| t.name == name) {
            Some(tool) => tool,
            None => return error_response(id, -32602, &format!("Unknown tool: {name}")),
        };
        let empty = Map::new();
        let args = params
            .get("arguments")
            .and_then(Value::as_object)
            .unwrap_or(&empty);

        let (text, is_error) = match (tool.handler)(pool, args) {
            ToolOutcome::Text(text) => (text, false),
            ToolOutcome::Error(text) => (text, true),
        };
        json!({
            "jsonrpc": "2.0",
            "id": id,
            "result": {
                "content": [{ "type": "text", "text": text }],
                "isError": is_error,
            },
        })
    }
}

fn error_response(id: Value, code: i64, message: &str) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": id,
        "error": { "code": code, "message": message },
    })
}
