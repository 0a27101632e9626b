mod dependencies;
mod graph;
mod info;
mod search;
mod versions;

use crate::pool::PkgPool;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// Outcome of one tool invocation.
///
/// Not-found conditions are legitimate query results and come back as
/// `Text`; only invalid input (unknown query mode, malformed depth, bad
/// argument bag) uses the error channel.
pub enum ToolOutcome {
    Text(String),
    Error(String),
}

pub type ToolHandler = fn(&PkgPool, &Map<String, Value>) -> ToolOutcome;

pub struct Tool {
    pub name: &'static str,
    pub definition: Value,
    pub handler: ToolHandler,
}

pub fn all_tools() -> Vec<Tool> {
    vec![
        search::tool(),
        info::tool(),
        dependencies::tool(),
        versions::tool(),
        graph::tool(),
    ]
}

// Decode the untyped argument bag into the tool's typed request struct.
fn decode_args<T: DeserializeOwned>(tool: &str, args: &Map<String, Value>) -> Result<T, ToolOutcome> {
    serde_json::from_value(Value::Object(args.clone()))
        .map_err(|e| ToolOutcome::Error(format!("Invalid arguments for {tool}: {e}")))
}

#[cfg(test)]
pub(crate) mod test_util {
    use super::{Tool, ToolOutcome};
    use crate::{pool::PkgPool, types::PkgMeta};
    use serde_json::Value;

    /// Single-source pool from (name, version, depends, provides) tuples.
    pub fn pool_of(pkgs: Vec<(&str, &str, Vec<&str>, Vec<&str>)>) -> PkgPool {
        let mut pool = PkgPool::new();
        pool.import_source(
            pkgs.into_iter()
                .map(|(name, version, depends, provides)| PkgMeta {
                    name: name.to_string(),
                    version: version.to_string(),
                    depends: depends.into_iter().map(str::to_string).collect(),
                    provides: provides.into_iter().map(str::to_string).collect(),
                    ..Default::default()
                })
                .collect(),
        );
        pool.finalize();
        pool
    }

    pub fn run(pool: &PkgPool, tool: Tool, args: Value) -> ToolOutcome {
        let args = args.as_object().cloned().unwrap_or_default();
        (tool.handler)(pool, &args)
    }

    pub fn outcome_text(outcome: ToolOutcome) -> String {
        match outcome {
            ToolOutcome::Text(t) => t,
            ToolOutcome::Error(e) => panic!("unexpected tool error: {e}"),
        }
    }
}
