use crate::info;

use anyhow::{format_err, Context, Result};
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};

const CACHE_SUBDIR: &str = "apkscout";

/// Architecture component of the default index URL.
pub fn host_arch() -> &'static str {
    match std::env::consts::ARCH {
        "aarch64" => "aarch64",
        _ => "x86_64",
    }
}

pub fn default_index_url(arch: &str) -> String {
    format!("https://packages.wolfi.dev/os/{arch}/APKINDEX.tar.gz")
}

pub fn is_url(s: &str) -> bool {
    s.starts_with("http://") || s.starts_with("https://")
}

// XDG_CACHE_HOME, falling back to ~/.cache
fn cache_dir() -> Result<PathBuf> {
    if let Ok(cache_home) = std::env::var("XDG_CACHE_HOME") {
        if !cache_home.is_empty() {
            return Ok(PathBuf::from(cache_home).join(CACHE_SUBDIR));
        }
    }
    let home = std::env::var("HOME").context("Could not determine user home directory")?;
    Ok(PathBuf::from(home).join(".cache").join(CACHE_SUBDIR))
}

/// Cached filename for a remote index. Hash-based to avoid collisions
/// between mirrors and overlong paths.
fn cache_filename(url: &str) -> String {
    let digest = hex::encode(Sha256::digest(url.as_bytes()));
    format!("APKINDEX_{}.tar.gz", &digest[..8])
}

/// Resolve an index reference (local path or http(s) URL) to a local file
/// ready for parsing. Remote indexes land in the user cache directory.
pub async fn resolve_index(source: &str) -> Result<PathBuf> {
    if !is_url(source) {
        return Path::new(source)
            .canonicalize()
            .with_context(|| format!("Cannot access index file {}", source));
    }

    let dir = cache_dir()?;
    tokio::fs::create_dir_all(&dir)
        .await
        .with_context(|| format!("Failed to create cache directory {}", dir.display()))?;
    let path = dir.join(cache_filename(source));

    info!("Downloading APKINDEX from {}...", source);
    let contents = reqwest::get(source)
        .await
        .with_context(|| format!("Failed to download index from {}", source))?
        .error_for_status()
        .map_err(|e| format_err!("Bad response for {}: {}", source, e))?
        .bytes()
        .await
        .context("Failed to read index download")?;
    tokio::fs::write(&path, &contents)
        .await
        .with_context(|| format!("Failed to save index to {}", path.display()))?;

    Ok(path)
}
