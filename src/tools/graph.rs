use super::{decode_args, Tool, ToolOutcome};
use crate::{
    pool::PkgPool,
    types::{bare_name, is_soname, PkgMeta},
};

use serde::Deserialize;
use serde_json::{json, Map, Value};
use std::collections::HashSet;
use std::fmt::Write;

// Traversal cost on cyclic or highly-connected graphs is bounded by the
// depth limit together with the one-expansion-per-name visited rule.
const MAX_DEPTH: usize = 5;

const SUPPORTED_MODES: &str = "requires, provides, depends_on, required_by, what_provides";

pub(super) fn tool() -> Tool {
    Tool {
        name: "package_graph",
        definition: json!({
            "name": "package_graph",
            "description": "Query the package dependency graph using provides and requires relationships",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "package": {
                        "type": "string",
                        "description": "The package name to start the graph query from"
                    },
                    "query_type": {
                        "type": "string",
                        "description": "The type of query to perform: 'requires', 'provides', 'depends_on', 'required_by', 'what_provides'"
                    },
                    "depth": {
                        "type": "string",
                        "description": "Maximum depth of the graph traversal (default: 1, max: 5)"
                    }
                },
                "required": ["package", "query_type"]
            }
        }),
        handler: handle,
    }
}

#[derive(Deserialize)]
struct Args {
    package: String,
    query_type: String,
    depth: Option<String>,
}

fn handle(pool: &PkgPool, args: &Map<String, Value>) -> ToolOutcome {
    let args: Args = match decode_args("package_graph", args) {
        Ok(a) => a,
        Err(e) => return e,
    };

    let depth = match &args.depth {
        Some(raw) => match raw.parse::<i64>() {
            // Clamp for performance and readability
            Ok(d) => d.clamp(1, MAX_DEPTH as i64) as usize,
            Err(_) => {
                return ToolOutcome::Error(format!(
                    "Invalid depth value '{raw}': expected an integer"
                ))
            }
        },
        None => 1,
    };

    let mode = args.query_type.to_lowercase();

    // what_provides resolves a capability, which need not be a package at all
    if mode == "what_provides" {
        let mut out = String::new();
        let _ = writeln!(out, "Packages that provide {}:\n", args.package);
        let mut providers = find_providing(pool, &args.package);
        if providers.is_empty() {
            out.push_str("No packages found that provide this capability.\n");
        } else {
            providers.sort();
            for (i, provider) in providers.iter().enumerate() {
                let _ = writeln!(out, "{}. {}", i + 1, provider);
            }
        }
        return ToolOutcome::Text(out);
    }

    let pkg = match pool.get(&args.package) {
        Some(pkg) => pkg,
        None => return ToolOutcome::Text(format!("Package '{}' not found.", args.package)),
    };

    let mut out = String::new();
    match mode.as_str() {
        "requires" | "dependencies" => {
            let _ = writeln!(
                out,
                "Dependencies required by {} ({}):\n",
                pkg.name, pkg.version
            );
            if pkg.depends.is_empty() {
                out.push_str("No dependencies found.\n");
            } else {
                for (i, dep) in pkg.depends.iter().enumerate() {
                    let _ = writeln!(out, "{}. {}", i + 1, dep);
                }
            }
        }
        "provides" => {
            let _ = writeln!(
                out,
                "Capabilities provided by {} ({}):\n",
                pkg.name, pkg.version
            );
            if pkg.provides.is_empty() {
                // Every package provides its own name at its own version
                out.push_str("No explicit provides found.\n");
                let _ = writeln!(
                    out,
                    "This package implicitly provides: {}={}",
                    pkg.name, pkg.version
                );
            } else {
                for (i, provide) in pkg.provides.iter().enumerate() {
                    let _ = writeln!(out, "{}. {}", i + 1, provide);
                }
            }
        }
        "depends_on" => {
            let _ = writeln!(
                out,
                "Dependency graph for {} ({}) with depth {}:\n",
                pkg.name, pkg.version, depth
            );
            let mut visited = HashSet::new();
            render_graph(pool, pkg, &mut out, "", 0, depth, &mut visited);
        }
        "required_by" => {
            let _ = writeln!(out, "Packages that depend on {}:\n", pkg.name);
            let mut dependents = find_requiring(pool, &pkg.name);
            if dependents.is_empty() {
                out.push_str("No packages found that depend on this package.\n");
            } else {
                dependents.sort();
                for (i, dep) in dependents.iter().enumerate() {
                    let _ = writeln!(out, "{}. {}", i + 1, dep);
                }
            }
        }
        _ => {
            return ToolOutcome::Error(format!(
                "Unknown query type: {}. Supported types: {}",
                args.query_type, SUPPORTED_MODES
            ))
        }
    }
    ToolOutcome::Text(out)
}

/// Depth-bounded dependency tree.
///
/// One visited set covers the whole traversal, so diamond dependencies are
/// expanded only at their first encounter and cycles terminate with an
/// "already visited" leaf.
fn render_graph(
    pool: &PkgPool,
    pkg: &PkgMeta,
    out: &mut String,
    prefix: &str,
    depth: usize,
    max_depth: usize,
    visited: &mut HashSet<String>,
) {
    visited.insert(pkg.name.clone());

    if depth == 0 {
        let _ = writeln!(out, "{} ({})", pkg.name, pkg.version);
    } else {
        let _ = writeln!(out, "{}├─ {} ({})", prefix, pkg.name, pkg.version);
    }

    if depth == max_depth {
        return;
    }

    let child_prefix = format!("{prefix}│  ");
    for (i, dep) in pkg.depends.iter().enumerate() {
        if is_soname(dep) {
            // Displayed verbatim, never recursed into
            let _ = writeln!(out, "{}├─ {}", child_prefix, dep);
        } else {
            let name = bare_name(dep);
            if visited.contains(name) {
                let _ = writeln!(out, "{}├─ {} [already visited]", child_prefix, name);
            } else if let Some(dep_pkg) = pool.get(name) {
                render_graph(pool, dep_pkg, out, &child_prefix, depth + 1, max_depth, visited);
            } else {
                let _ = writeln!(out, "{}├─ {} [not found in index]", child_prefix, name);
            }
        }
        // Blank line between top-level subtrees
        if depth == 0 && i + 1 < pkg.depends.len() {
            out.push('\n');
        }
    }
}

/// Names of winners whose dependency list references `name`, constraints
/// stripped. Each dependent contributes at most once.
fn find_requiring(pool: &PkgPool, name: &str) -> Vec<String> {
    let mut res = Vec::new();
    for pkg in pool.all_pkgs() {
        for dep in &pkg.depends {
            if is_soname(dep) {
                continue;
            }
            if bare_name(dep) == name {
                res.push(pkg.name.clone());
                break;
            }
        }
    }
    res
}

/// Winners providing `capability`: name match first (the implicit
/// self-provide), then explicit provides entries.
fn find_providing(pool: &PkgPool, capability: &str) -> Vec<String> {
    let mut res = Vec::new();
    for pkg in pool.all_pkgs() {
        if pkg.name == capability {
            res.push(pkg.name.clone());
            continue;
        }
        if pkg.provides.iter().any(|p| bare_name(p) == capability) {
            res.push(pkg.name.clone());
        }
    }
    res
}
