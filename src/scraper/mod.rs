//! Browser-driven review collection.
//!
//! A product's review listing hydrates asynchronously, truncates long reviews
//! behind a "read more" control, and paginates through "next" links. This
//! module drives a headless browser through that flow.
//!
//! # Architecture
//!
//! ```text
//! URL → normalize → Collector ─┬─ pass "freshest" ─┐
//!                              └─ pass "negative" ─┴→ ReviewSet → Vec<String>
//!
//! per page: PageDriver::navigate → ReviewExtractor → Paginator
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use gleaner::scraper::{Collector, ScraperConfig};
//!
//! let collector = Collector::new(ScraperConfig::default());
//! let reviews = collector.collect("https://ozon.ru/product/123", 100, 50).await;
//! ```
//!
//! # Background collection
//!
//! ```rust,ignore
//! use gleaner::scraper::{spawn_collection, CollectorConfig, ScraperConfig};
//!
//! let handle = spawn_collection(ScraperConfig::default(), url, CollectorConfig::default());
//! // ... keep serving other work ...
//! let report = handle.join().await?;
//! ```

mod background;
mod chrome;
mod collector;
mod config;
mod extractor;
#[cfg(test)]
mod mock;
mod pagination;

pub use background::{spawn_collection, CollectionHandle};
pub use chrome::ChromeDriver;
pub use collector::{collect, plan_passes, Collector};
pub use config::{CollectorConfig, ScraperConfig};
pub use extractor::{Extraction, ReviewExtractor};
pub use pagination::{NextPage, Paginator};

use async_trait::async_trait;

use crate::app::Result;

/// Text of the control that expands a truncated review ("read more").
pub const EXPAND_LABEL: &str = "Читать полностью";

/// Attribute carried by every review container. Class names on the site
/// change between deployments; this attribute does not.
pub const REVIEW_MARKER_ATTR: &str = "data-review-uuid";

/// Text inside the pagination link to the following page ("next").
pub const NEXT_LABEL: &str = "Дальше";

/// How to locate elements in the current DOM.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Locator {
    Css(String),
    XPath(String),
}

impl Locator {
    /// "Read more" controls on truncated reviews
    pub fn expand_controls() -> Self {
        Locator::XPath(format!("//span[contains(text(), '{}')]", EXPAND_LABEL))
    }

    /// Review containers
    pub fn review_cards() -> Self {
        Locator::Css(format!("div[{}]", REVIEW_MARKER_ATTR))
    }

    /// Link wrapping the "next" label
    pub fn next_link() -> Self {
        Locator::XPath(format!(
            "//a[descendant::*[contains(text(), '{}')]]",
            NEXT_LABEL
        ))
    }
}

/// One browser session's view of the page currently loaded.
///
/// Implementations own the navigation state exclusively; it only changes
/// through `navigate`, `click` and `scroll_to_bottom`.
#[async_trait]
pub trait PageDriver: Send {
    /// Handle to an element of the current page
    type Element: Send + Sync;

    /// Load a URL and wait until the page has settled
    async fn navigate(&mut self, url: &str) -> Result<()>;

    /// All currently matching elements; empty when nothing matches
    async fn find_all(&mut self, locator: &Locator) -> Result<Vec<Self::Element>>;

    /// First currently matching element
    async fn find_one(&mut self, locator: &Locator) -> Result<Option<Self::Element>> {
        Ok(self.find_all(locator).await?.into_iter().next())
    }

    /// Dispatch a synthetic click, bypassing interactability checks
    async fn click(&mut self, element: &Self::Element) -> Result<()>;

    /// Scroll to the end of the document to mount lazy content
    async fn scroll_to_bottom(&mut self) -> Result<()>;

    /// Rendered text of an element
    async fn text(&mut self, element: &Self::Element) -> Result<String>;

    /// Resolved attribute value, e.g. an absolute `href`
    async fn attribute(&mut self, element: &Self::Element, name: &str) -> Result<Option<String>>;

    /// Tear down the session
    async fn close(&mut self) -> Result<()>;
}
