pub mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "gleaner")]
#[command(about = "Collect deduplicated product reviews from Ozon", long_about = None)]
pub struct Cli {
    /// Config file to use instead of ~/.config/gleaner/config.toml
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Collect reviews for a product
    Collect {
        /// Product URL (query strings and missing /reviews are fine)
        url: String,

        /// Reviews to collect from the newest-first listing
        #[arg(long)]
        max_reviews: Option<usize>,

        /// Reviews to collect from the lowest-score listing (0 skips it)
        #[arg(long)]
        max_negative: Option<usize>,

        /// Print a JSON report instead of one review per line
        #[arg(long)]
        json: bool,

        /// Show the browser window
        #[arg(long)]
        headed: bool,

        /// Stop the whole run after this many seconds
        #[arg(long)]
        timeout: Option<u64>,

        /// Sleep a fixed time after each page load instead of polling for reviews
        #[arg(long)]
        fixed_delays: bool,
    },
    /// Print the canonical reviews URL for a product URL
    Normalize {
        /// Product URL
        url: String,
    },
}
