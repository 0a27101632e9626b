use clap::Parser;

#[derive(Parser)]
#[clap(about, version)]
pub struct Opts {
    /// Path or URL to an APKINDEX.tar.gz. Can be specified multiple times;
    /// later indexes override earlier ones. If not provided, the Wolfi
    /// repository index is downloaded.
    #[clap(long = "index")]
    pub indexes: Vec<String>,
    /// Architecture of the default index (x86_64 or aarch64)
    #[clap(long)]
    pub arch: Option<String>,
    #[clap(short, long, help = "Print additional debug information")]
    pub verbose: bool,
}
