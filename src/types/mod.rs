mod specifier;
pub use specifier::{bare_name, is_soname};

use serde::Serialize;

/// One package at one version, as read from an APKINDEX stanza.
///
/// `depends` and `provides` keep the raw specifier strings from the index
/// (e.g. `zlib>=1.2` or `so:libc.musl-x86_64.so.1`); use
/// [`bare_name`]/[`is_soname`] when a plain package name is needed.
#[derive(Clone, Debug, Default, Serialize)]
pub struct PkgMeta {
    pub name: String,
    pub version: String,
    pub description: String,
    pub arch: String,
    pub origin: String,
    pub size: u64,
    pub depends: Vec<String>,
    pub provides: Vec<String>,
}
