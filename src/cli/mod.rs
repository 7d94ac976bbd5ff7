// CLI module for reportgate
// Author: kelexine (https://github.com/kelexine)

use clap::Parser;

/// reportgate - Offline-first caching gateway for embedded BI report viewers
#[derive(Parser, Debug)]
#[command(name = "reportgate", version, about, long_about = None)]
pub struct Args {
    /// Rewrite ?v= version references in the configured HTML files, then exit
    #[arg(long)]
    pub stamp: bool,
}
