use std::future::Future;

use tracing::{debug, error, info, warn};

use crate::app::Result;
use crate::domain::{CollectionPass, CollectionReport, PassStats, ReviewSet, SortOrder, StopReason};
use crate::normalizer::{listing_url, normalize};
use crate::scraper::chrome::ChromeDriver;
use crate::scraper::config::{CollectorConfig, ScraperConfig};
use crate::scraper::extractor::ReviewExtractor;
use crate::scraper::pagination::{NextPage, Paginator};
use crate::scraper::PageDriver;

/// Collect reviews for a product URL with the default browser setup.
///
/// Never fails: problems are logged and whatever was collected is returned.
pub async fn collect(url: &str, max_reviews: usize, max_negative: usize) -> Vec<String> {
    Collector::new(ScraperConfig::default())
        .collect(url, max_reviews, max_negative)
        .await
}

/// Passes for one run: freshest always, most negative only when requested.
pub fn plan_passes(base: &str, limits: CollectorConfig) -> Vec<CollectionPass> {
    let mut passes = vec![CollectionPass::new(
        SortOrder::Freshest.label(),
        listing_url(base, SortOrder::Freshest),
        limits.max_reviews,
    )];

    if limits.max_negative > 0 {
        passes.push(CollectionPass::new(
            SortOrder::MostNegative.label(),
            listing_url(base, SortOrder::MostNegative),
            limits.max_negative,
        ));
    }

    passes
}

/// Runs collection passes against one browser session
pub struct Collector {
    config: ScraperConfig,
    extractor: ReviewExtractor,
    paginator: Paginator,
}

impl Collector {
    pub fn new(config: ScraperConfig) -> Self {
        let paginator = Paginator::new(config.scroll_pause());
        Self {
            config,
            extractor: ReviewExtractor::new(),
            paginator,
        }
    }

    /// Collect review texts in first-seen order.
    pub async fn collect(&self, url: &str, max_reviews: usize, max_negative: usize) -> Vec<String> {
        let limits = CollectorConfig {
            max_reviews,
            max_negative,
        };
        self.collect_report(url, limits).await.texts()
    }

    /// Launch a browser, run every planned pass, and tear the browser down.
    pub async fn collect_report(&self, url: &str, limits: CollectorConfig) -> CollectionReport {
        self.collect_report_using(url, limits, ChromeDriver::open).await
    }

    /// Like [`collect_report`](Self::collect_report), with the session
    /// started by `open`.
    pub async fn collect_report_using<D, F, Fut>(
        &self,
        url: &str,
        limits: CollectorConfig,
        open: F,
    ) -> CollectionReport
    where
        D: PageDriver,
        F: FnOnce(ScraperConfig) -> Fut,
        Fut: Future<Output = Result<D>>,
    {
        let base = normalize(url);
        info!(
            "Collecting {} fresh + {} negative reviews from {}",
            limits.max_reviews, limits.max_negative, base
        );

        let mut driver = match open(self.config.clone()).await {
            Ok(driver) => driver,
            Err(e) => {
                error!("Could not start browser session: {}", e);
                return CollectionReport::new(base, Vec::new(), Vec::new());
            }
        };

        let passes = plan_passes(&base, limits);
        self.collect_with(&mut driver, base, &passes).await
    }

    /// Run `passes` in order into one shared set, then close the driver.
    ///
    /// Errors and an expired run deadline end the run early; the reviews
    /// gathered until then are still returned.
    pub async fn collect_with<D: PageDriver>(
        &self,
        driver: &mut D,
        url: String,
        passes: &[CollectionPass],
    ) -> CollectionReport {
        let mut reviews = ReviewSet::new();
        let mut stats = Vec::with_capacity(passes.len());

        let run = self.run_passes(driver, passes, &mut reviews, &mut stats);
        let outcome = match self.config.run_timeout() {
            Some(deadline) => {
                let timed = tokio::time::timeout(deadline, run).await;
                match timed {
                    Ok(outcome) => outcome,
                    Err(_) => {
                        warn!("Collection run exceeded {:?}", deadline);
                        if let Some(current) = stats.last_mut() {
                            current.stop = StopReason::TimedOut;
                        }
                        Ok(())
                    }
                }
            }
            None => run.await,
        };

        if let Err(e) = outcome {
            error!("Collection aborted: {}", e);
            if let Some(current) = stats.last_mut() {
                current.stop = StopReason::Aborted(e.to_string());
            }
        }

        if let Err(e) = driver.close().await {
            warn!("Browser teardown failed: {}", e);
        }

        info!("Collected {} unique reviews", reviews.len());
        CollectionReport::new(url, stats, reviews.into_vec())
    }

    async fn run_passes<D: PageDriver>(
        &self,
        driver: &mut D,
        passes: &[CollectionPass],
        reviews: &mut ReviewSet,
        stats: &mut Vec<PassStats>,
    ) -> Result<()> {
        for pass in passes {
            stats.push(PassStats::started(&pass.label));
            let idx = stats.len() - 1;
            self.drive_pass(driver, pass, reviews, &mut stats[idx]).await?;
        }
        Ok(())
    }

    /// Sweep one listing into `reviews` until a stop condition holds.
    pub async fn run_pass<D: PageDriver>(
        &self,
        driver: &mut D,
        pass: &CollectionPass,
        reviews: &mut ReviewSet,
    ) -> Result<PassStats> {
        let mut stats = PassStats::started(&pass.label);
        self.drive_pass(driver, pass, reviews, &mut stats).await?;
        Ok(stats)
    }

    async fn drive_pass<D: PageDriver>(
        &self,
        driver: &mut D,
        pass: &CollectionPass,
        reviews: &mut ReviewSet,
        stats: &mut PassStats,
    ) -> Result<()> {
        let label = &pass.label;
        info!("[{}] Starting at {}", label, pass.target_url);

        if pass.limit == 0 {
            stats.stop = StopReason::LimitReached;
            return Ok(());
        }

        let mut url = pass.target_url.clone();
        let mut page_num = 1;

        loop {
            if page_num == 1 {
                driver.navigate(&url).await?;
            } else if let Err(e) = driver.navigate(&url).await {
                warn!("[{}] Could not load page {}: {}", label, page_num, e);
                stats.stop = StopReason::NavigationFailed(e.to_string());
                return Ok(());
            }
            stats.pages_visited += 1;
            debug!("[{}] Page {}", label, page_num);

            match self.extractor.extract(driver).await {
                Ok(extraction) => {
                    let new_in_step = reviews.extend(extraction.reviews);
                    stats.new_reviews += new_in_step;

                    info!(
                        "[{}] Page {}: +{} new (total {})",
                        label,
                        page_num,
                        new_in_step,
                        reviews.len()
                    );

                    if extraction.found == 0 && page_num > 1 {
                        info!("[{}] No review elements, listing exhausted", label);
                        stats.stop = StopReason::ListingExhausted;
                        return Ok(());
                    }

                    if stats.new_reviews >= pass.limit {
                        info!("[{}] Limit of {} reached", label, pass.limit);
                        stats.stop = StopReason::LimitReached;
                        return Ok(());
                    }
                }
                Err(e) => warn!("[{}] Extraction failed on page {}: {}", label, page_num, e),
            }

            match self.paginator.advance(driver, page_num).await {
                NextPage::HasNext(next) => {
                    url = next;
                    page_num += 1;
                }
                NextPage::NoNext => {
                    stats.stop = StopReason::NoNextPage;
                    return Ok(());
                }
                NextPage::LookupFailed(reason) => {
                    stats.stop = StopReason::NextLookupFailed(reason);
                    return Ok(());
                }
            }
        }
    }
}
