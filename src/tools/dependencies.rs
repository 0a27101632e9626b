use super::{decode_args, Tool, ToolOutcome};
use crate::{
    pool::PkgPool,
    types::{bare_name, is_soname},
};

use serde::Deserialize;
use serde_json::{json, Map, Value};
use std::fmt::Write;

pub(super) fn tool() -> Tool {
    Tool {
        name: "package_dependencies",
        definition: json!({
            "name": "package_dependencies",
            "description": "List dependencies for a package",
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
    let args: Args = match decode_args("package_dependencies", args) {
        Ok(a) => a,
        Err(e) => return e,
    };

    let pkg = match pool.get(&args.package) {
        Some(pkg) => pkg,
        None => return ToolOutcome::Text(format!("Package '{}' not found.", args.package)),
    };

    let mut out = String::new();
    let _ = writeln!(out, "Dependencies for {} ({}):\n", pkg.name, pkg.version);

    if pkg.depends.is_empty() {
        out.push_str("No dependencies found.\n");
        return ToolOutcome::Text(out);
    }

    for (i, dep) in pkg.depends.iter().enumerate() {
        let _ = writeln!(out, "{}. {}", i + 1, dep);
        // Shared-library references are never resolved by name
        if is_soname(dep) {
            continue;
        }
        match pool.get(bare_name(dep)) {
            Some(dep_pkg) => {
                let _ = writeln!(out, "   Available: {} ({})", dep_pkg.name, dep_pkg.version);
            }
            None => out.push_str("   Not found in index\n"),
        }
    }
    ToolOutcome::Text(out)
}
