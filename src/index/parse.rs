use crate::types::PkgMeta;

use anyhow::{format_err, Context, Result};

/// Parse the text contents of an APKINDEX file: stanzas of single-letter
/// `K:value` lines separated by blank lines, one stanza per package.
pub fn parse_index(data: &str) -> Result<Vec<PkgMeta>> {
    let mut res = Vec::new();
    for stanza in data.split("\n\n") {
        if stanza.trim().is_empty() {
            continue;
        }
        res.push(parse_stanza(stanza)?);
    }
    Ok(res)
}

fn parse_stanza(stanza: &str) -> Result<PkgMeta> {
    let mut name = None;
    let mut version = None;
    let mut meta = PkgMeta::default();

    for line in stanza.lines() {
        if line.is_empty() {
            continue;
        }
        let (key, value) = line
            .split_once(':')
            .ok_or_else(|| format_err!("Malformed line in APKINDEX: {}", line))?;
        match key {
            "P" => name = Some(value.to_string()),
            "V" => version = Some(value.to_string()),
            "T" => meta.description = value.to_string(),
            "A" => meta.arch = value.to_string(),
            "o" => meta.origin = value.to_string(),
            "S" => {
                meta.size = value
                    .parse()
                    .with_context(|| format!("Invalid package size: {}", value))?
            }
            "D" => meta.depends = value.split_whitespace().map(str::to_string).collect(),
            "p" => meta.provides = value.split_whitespace().map(str::to_string).collect(),
            // Checksums, timestamps, maintainer, license etc. are not indexed
            _ => (),
        }
    }

    meta.name = name.ok_or_else(|| format_err!("APKINDEX stanza without a package name"))?;
    meta.version = version
        .ok_or_else(|| format_err!("Package {} has no version", meta.name))?;
    Ok(meta)
}

#[cfg(test)]
mod test {
    use super::*;

    const SAMPLE: &str = "\
C:Q1abcdefghijklmnopqrstuvwxyz012345=
P:zlib
V:1.3.1-r0
A:x86_64
S:55255
T:A compression/decompression library
o:zlib
D:so:libc.musl-x86_64.so.1
p:so:libz.so.1=1.3.1

P:curl
V:8.7.1-r0
A:x86_64
S:267108
T:URL retrieval utility and library
D:ca-certificates-bundle zlib so:libc.musl-x86_64.so.1
";

    #[test]
    fn parse_sample_index() {
        let pkgs = parse_index(SAMPLE).unwrap();
        assert_eq!(pkgs.len(), 2);

        let zlib = &pkgs[0];
        assert_eq!(zlib.name, "zlib");
        assert_eq!(zlib.version, "1.3.1-r0");
        assert_eq!(zlib.arch, "x86_64");
        assert_eq!(zlib.size, 55255);
        assert_eq!(zlib.origin, "zlib");
        assert_eq!(zlib.depends, vec!["so:libc.musl-x86_64.so.1"]);
        assert_eq!(zlib.provides, vec!["so:libz.so.1=1.3.1"]);

        let curl = &pkgs[1];
        assert_eq!(curl.name, "curl");
        assert_eq!(curl.depends.len(), 3);
        assert!(curl.provides.is_empty());
        assert_eq!(curl.origin, "");
    }

    #[test]
    fn reject_incomplete_stanzas() {
        assert!(parse_index("V:1.0\n").is_err());
        assert!(parse_index("P:foo\n").is_err());
        assert!(parse_index("P:foo\nV:1.0\nS:big\n").is_err());
        assert!(parse_index("P:foo\nV:1.0\nnonsense\n").is_err());
    }

    #[test]
    fn empty_index_is_empty() {
        assert!(parse_index("").unwrap().is_empty());
        assert!(parse_index("\n\n").unwrap().is_empty());
    }
}
