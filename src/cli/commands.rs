use std::time::Duration;

use tokio::time::{sleep, Instant};

use crate::app::{GleanerError, Result};
use crate::config::Config;
use crate::normalizer::{normalize, parse_product_url};
use crate::scraper::spawn_collection;

const POLL_INTERVAL: Duration = Duration::from_millis(250);
const PROGRESS_INTERVAL: Duration = Duration::from_secs(15);

/// Per-invocation overrides of the loaded configuration
#[derive(Debug, Clone, Default)]
pub struct CollectOptions {
    pub max_reviews: Option<usize>,
    pub max_negative: Option<usize>,
    pub json: bool,
    pub headed: bool,
    pub timeout_secs: Option<u64>,
    pub fixed_delays: bool,
}

impl CollectOptions {
    /// Fold the command-line overrides into `config`.
    pub fn apply(&self, mut config: Config) -> Config {
        if let Some(max) = self.max_reviews {
            config.collector.max_reviews = max;
        }
        if let Some(max) = self.max_negative {
            config.collector.max_negative = max;
        }
        if self.headed {
            config.scraper.headless = false;
        }
        if let Some(secs) = self.timeout_secs {
            config.scraper.run_timeout_secs = secs;
        }
        if self.fixed_delays {
            config.scraper.wait_for_reviews = false;
        }
        config
    }
}

pub async fn collect(config: Config, url: &str, opts: &CollectOptions) -> Result<()> {
    let listing = parse_product_url(url)?;
    let config = opts.apply(config);

    eprintln!("Launching browser and collecting reviews (this may take a while)...");

    let handle = spawn_collection(config.scraper, listing, config.collector);
    let started = Instant::now();
    let mut last_progress = started;

    while !handle.is_finished() {
        sleep(POLL_INTERVAL).await;
        if last_progress.elapsed() >= PROGRESS_INTERVAL {
            eprintln!("  still collecting ({}s)", started.elapsed().as_secs());
            last_progress = Instant::now();
        }
    }

    let report = handle.join().await?;

    if report.is_empty() {
        return Err(GleanerError::Other(
            "No reviews collected. Check the link or try again later.".into(),
        ));
    }

    if opts.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        for review in &report.reviews {
            println!("{}", review.text);
        }
    }

    eprintln!("Collected {} reviews", report.reviews.len());
    Ok(())
}

pub fn print_normalized(url: &str) {
    println!("{}", normalize(url));
}
