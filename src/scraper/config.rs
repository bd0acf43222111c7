use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the browser session and page timing
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScraperConfig {
    /// Whether to run the browser in headless mode (default: true)
    pub headless: bool,

    /// Disable image loading to save bandwidth (default: true)
    pub block_images: bool,

    /// User agent string to use
    pub user_agent: Option<String>,

    /// Browser window and viewport width (default: 1920)
    pub window_width: u32,

    /// Browser window and viewport height (default: 1080)
    pub window_height: u32,

    /// Poll for review elements after navigation instead of a fixed sleep (default: true)
    pub wait_for_reviews: bool,

    /// Fixed wait after navigation when not polling, in milliseconds (default: 3000)
    pub settle_delay_ms: u64,

    /// Upper bound on readiness polling, in milliseconds (default: 10000)
    pub settle_timeout_ms: u64,

    /// Interval between readiness polls, in milliseconds (default: 250)
    pub settle_poll_ms: u64,

    /// Pause after scrolling to the bottom of a page, in milliseconds (default: 1000)
    pub scroll_pause_ms: u64,

    /// Deadline for a whole collection run in seconds, 0 for none (default: 0)
    pub run_timeout_secs: u64,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            headless: true,
            block_images: true,
            user_agent: Some(
                "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36"
                    .to_string(),
            ),
            window_width: 1920,
            window_height: 1080,
            wait_for_reviews: true,
            settle_delay_ms: 3000,
            settle_timeout_ms: 10_000,
            settle_poll_ms: 250,
            scroll_pause_ms: 1000,
            run_timeout_secs: 0,
        }
    }
}

impl ScraperConfig {
    /// Get the fixed settle delay as a Duration
    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    /// Get the readiness polling bound as a Duration
    pub fn settle_timeout(&self) -> Duration {
        Duration::from_millis(self.settle_timeout_ms)
    }

    /// Get the readiness poll interval as a Duration
    pub fn settle_poll(&self) -> Duration {
        Duration::from_millis(self.settle_poll_ms.max(1))
    }

    /// Get the post-scroll pause as a Duration
    pub fn scroll_pause(&self) -> Duration {
        Duration::from_millis(self.scroll_pause_ms)
    }

    /// Get the run deadline, if any
    pub fn run_timeout(&self) -> Option<Duration> {
        (self.run_timeout_secs > 0).then(|| Duration::from_secs(self.run_timeout_secs))
    }

    /// No waits at all; for drivers whose pages are ready on navigation
    pub fn instant() -> Self {
        Self {
            wait_for_reviews: false,
            settle_delay_ms: 0,
            settle_timeout_ms: 0,
            scroll_pause_ms: 0,
            ..Default::default()
        }
    }
}

/// Per-run review targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectorConfig {
    /// Target number of reviews from the newest-first listing (default: 100)
    pub max_reviews: usize,

    /// Target number of reviews from the lowest-score listing, 0 disables it (default: 50)
    pub max_negative: usize,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            max_reviews: 100,
            max_negative: 50,
        }
    }
}
