use super::{decode_args, Tool, ToolOutcome};
use crate::pool::PkgPool;

use serde::Deserialize;
use serde_json::{json, Map, Value};

pub(super) fn tool() -> Tool {
    Tool {
        name: "package_info",
        definition: json!({
            "name": "package_info",
            "description": "Get detailed information about a specific package",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "package": {
                        "type": "string",
                        "description": "The exact package name"
                    }
                },
                "required": ["package"]
            }
        }),
        handler: handle,
    }
}

#[derive(Deserialize)]
struct Args {
    package: String,
}

fn handle(pool: &PkgPool, args: &Map<String, Value>) -> ToolOutcome {
    let args: Args = match decode_args("package_info", args) {
        Ok(a) => a,
        Err(e) => return e,
    };

    let pkg = match pool.get(&args.package) {
        Some(pkg) => pkg,
        None => return ToolOutcome::Text(format!("Package '{}' not found.", args.package)),
    };

    match serde_json::to_string_pretty(pkg) {
        Ok(details) => ToolOutcome::Text(details),
        Err(e) => ToolOutcome::Error(format!("Error formatting package details: {e}")),
    }
}
