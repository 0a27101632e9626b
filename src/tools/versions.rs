use super::{decode_args, Tool, ToolOutcome};
use crate::pool::PkgPool;

use serde::Deserialize;
use serde_json::{json, Map, Value};
use std::fmt::Write;

pub(super) fn tool() -> Tool {
    Tool {
        name: "compare_versions",
        definition: json!({
            "name": "compare_versions",
            "description": "Compare versions of packages",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "package": {
                        "type": "string",
                        "description": "The package name to compare versions for"
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
    let args: Args = match decode_args("compare_versions", args) {
        Ok(a) => a,
        Err(e) => return e,
    };

    // Reads the multiversion pool: versions that lost the merge are listed too
    let versions = pool.get_versions(&args.package);
    if versions.is_empty() {
        return ToolOutcome::Text(format!(
            "No versions found for package '{}'.",
            args.package
        ));
    }

    let mut out = String::new();
    let _ = writeln!(out, "Versions of {}:\n", args.package);
    for (i, pkg) in versions.iter().enumerate() {
        let _ = writeln!(out, "{}. Version: {}", i + 1, pkg.version);
        let _ = writeln!(out, "   Architecture: {}", pkg.arch);
        let _ = writeln!(out, "   Size: {} bytes", pkg.size);
        if !pkg.origin.is_empty() {
            let _ = writeln!(out, "   Origin: {}", pkg.origin);
        }
        out.push('\n');
    }
    ToolOutcome::Text(out)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::pool::PkgPool;
    use crate::tools::test_util::{outcome_text, run};
    use crate::types::PkgMeta;

    fn record(version: &str, arch: &str) -> PkgMeta {
        PkgMeta {
            name: "busybox".to_string(),
            version: version.to_string(),
            arch: arch.to_string(),
            size: 924672,
            ..Default::default()
        }
    }

    #[test]
    fn lists_all_versions_ascending_including_merge_losers() {
        let mut pool = PkgPool::new();
        pool.import_source(vec![record("1.36.1-r2", "x86_64")]);
        pool.import_source(vec![record("1.36.0-r0", "aarch64")]);
        pool.finalize();

        let text = outcome_text(run(&pool, tool(), json!({"package": "busybox"})));
        assert!(text.starts_with("Versions of busybox:"));
        let first = text.find("1. Version: 1.36.0-r0").unwrap();
        let second = text.find("2. Version: 1.36.1-r2").unwrap();
        assert!(first < second);
        assert!(text.contains("   Architecture: aarch64"));
        assert!(text.contains("   Size: 924672 bytes"));
    }

    #[test]
    fn unknown_package_is_soft() {
        let pool = PkgPool::new();
        let text = outcome_text(run(&pool, tool(), json!({"package": "ghost"})));
        assert_eq!(text, "No versions found for package 'ghost'.");
    }
}
