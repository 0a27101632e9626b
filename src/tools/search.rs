use super::{decode_args, Tool, ToolOutcome};
use crate::pool::PkgPool;

use serde::Deserialize;
use serde_json::{json, Map, Value};
use std::fmt::Write;

pub(super) fn tool() -> Tool {
    Tool {
        name: "search_packages",
        definition: json!({
            "name": "search_packages",
            "description": "Search for packages in the Alpine package database",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "query": {
                        "type": "string",
                        "description": "The package name to search for (supports partial matches)"
                    }
                },
                "required": ["query"]
            }
        }),
        handler: handle,
    }
}

#[derive(Deserialize)]
struct Args {
    query: String,
}

fn handle(pool: &PkgPool, args: &Map<String, Value>) -> ToolOutcome {
    let args: Args = match decode_args("search_packages", args) {
        Ok(a) => a,
        Err(e) => return e,
    };

    let results = pool.search(&args.query);
    if results.is_empty() {
        return ToolOutcome::Text("No packages found matching your query.".to_string());
    }

    let mut out = String::new();
    let _ = writeln!(
        out,
        "Found {} packages matching '{}':\n",
        results.len(),
        args.query
    );
    for (i, pkg) in results.iter().enumerate() {
        let _ = writeln!(out, "{}. {} ({})", i + 1, pkg.name, pkg.version);
        if !pkg.description.is_empty() {
            let _ = writeln!(out, "   Description: {}", pkg.description);
        }
        out.push('\n');
    }
    ToolOutcome::Text(out)
}
