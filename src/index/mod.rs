mod parse;
pub use parse::parse_index;

use crate::types::PkgMeta;

use anyhow::{bail, Context, Result};
use flate2::read::MultiGzDecoder;
use std::{fs::File, io::Read, path::Path};
use tar::Archive;

/// Extract and parse the APKINDEX member of an APKINDEX.tar.gz.
///
/// The archive is a concatenation of gzip streams (signature segment first),
/// hence the multi-member decoder.
pub fn load_index(path: &Path) -> Result<Vec<PkgMeta>> {
    let f = File::open(path)
        .with_context(|| format!("Failed to open index file {}", path.display()))?;
    let mut archive = Archive::new(MultiGzDecoder::new(f));
    for entry in archive.entries().context("Malformed index archive")? {
        let mut entry = entry.context("Malformed index archive")?;
        if entry.path()? != Path::new("APKINDEX") {
            continue;
        }
        let mut data = String::new();
        entry
            .read_to_string(&mut data)
            .context("APKINDEX is not valid UTF-8")?;
        return parse_index(&data)
            .with_context(|| format!("Failed to parse index {}", path.display()));
    }
    bail!("No APKINDEX member found in {}", path.display());
}
