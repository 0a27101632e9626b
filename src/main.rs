mod cli;
mod config;
mod fetch;
mod index;
mod pool;
mod server;
mod tools;
mod types;

use anyhow::{Context, Result};
use clap::Parser;
use config::Opts;

/// Exit codes:
/// 1 => program screwed up
#[tokio::main(flavor = "current_thread")]
async fn main() {
    if let Err(err) = try_main().await {
        error!("{}", err.to_string());
        err.chain().skip(1).for_each(|cause| {
            due_to!("{}", cause);
        });
        std::process::exit(1);
    }
}

async fn try_main() -> Result<()> {
    let opts = Opts::parse();

    let sources = if opts.indexes.is_empty() {
        let arch = opts
            .arch
            .clone()
            .unwrap_or_else(|| fetch::host_arch().to_string());
        vec![fetch::default_index_url(&arch)]
    } else {
        opts.indexes.clone()
    };

    let mut pool = pool::PkgPool::new();
    for source in &sources {
        let path = fetch::resolve_index(source)
            .await
            .with_context(|| format!("Failed to resolve index {}", source))?;
        info!("Loading APK index from {}...", path.display());
        let pkgs = index::load_index(&path)
            .with_context(|| format!("Failed to load index {}", source))?;
        info!("Loaded {} packages", pkgs.len());
        pool.import_source(pkgs);
    }
    pool.finalize();
    if pool.is_empty() {
        warn!("No packages loaded; all queries will come back empty");
    }
    if sources.len() > 1 || opts.verbose {
        msg!("{} distinct packages after merging", pool.len());
    }

    info!("Starting MCP server...");
    let server = server::Server::new();
    server.serve(&pool).await
}
