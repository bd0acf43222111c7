use tokio::task::JoinHandle;
use tracing::info;

use crate::app::{GleanerError, Result};
use crate::domain::CollectionReport;
use crate::scraper::collector::Collector;
use crate::scraper::config::{CollectorConfig, ScraperConfig};

/// Handle to a collection running on its own task
pub struct CollectionHandle {
    task: JoinHandle<CollectionReport>,
}

impl CollectionHandle {
    pub(crate) fn from_task(task: JoinHandle<CollectionReport>) -> Self {
        Self { task }
    }

    /// Whether the run has produced its report.
    ///
    /// An empty report after completion means nothing could be collected;
    /// `false` here means the run is still in progress.
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Wait for the run's report
    pub async fn join(self) -> Result<CollectionReport> {
        self.task
            .await
            .map_err(|e| GleanerError::Other(format!("Collection task failed: {}", e)))
    }
}

/// Run a whole collection, browser included, as a separate tokio task.
///
/// Each call owns a fresh browser session, so concurrent calls never share one.
pub fn spawn_collection(
    config: ScraperConfig,
    url: impl Into<String>,
    limits: CollectorConfig,
) -> CollectionHandle {
    let url = url.into();

    let task = tokio::spawn(async move {
        info!("Background collection started for {}", url);
        Collector::new(config).collect_report(&url, limits).await
    });

    CollectionHandle::from_task(task)
}
