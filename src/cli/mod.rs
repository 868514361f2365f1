pub mod build;

use clap::Parser;

/// proxysheet - Lay out card images on printable proxy sheets
#[derive(Parser, Debug)]
#[command(name = "proxysheet")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub build: build::BuildArgs,
}
