use std::time::Duration;

use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::app::Result;
use crate::normalizer::{ensure_variant_filter, is_site_url};
use crate::scraper::{Locator, PageDriver};

/// Where a listing goes after the current page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NextPage {
    /// URL of the following page, variant filter applied
    HasNext(String),
    /// The listing has no further page
    NoNext,
    /// The "next" control could not be looked up; treated as the end of the listing
    LookupFailed(String),
}

impl NextPage {
    pub fn is_end(&self) -> bool {
        !matches!(self, NextPage::HasNext(_))
    }
}

/// Finds the link to the next listing page
pub struct Paginator {
    next: Locator,
    scroll_pause: Duration,
}

impl Paginator {
    pub fn new(scroll_pause: Duration) -> Self {
        Self {
            next: Locator::next_link(),
            scroll_pause,
        }
    }

    /// Resolve the page after `page_num`.
    pub async fn advance<D: PageDriver>(&self, driver: &mut D, page_num: usize) -> NextPage {
        match self.resolve(driver).await {
            Ok(Some(url)) => {
                debug!("Page {} links to {}", page_num, url);
                NextPage::HasNext(url)
            }
            Ok(None) => {
                info!("No next page after page {}", page_num);
                NextPage::NoNext
            }
            Err(e) => {
                warn!("Next page lookup failed after page {}: {}", page_num, e);
                NextPage::LookupFailed(e.to_string())
            }
        }
    }

    async fn resolve<D: PageDriver>(&self, driver: &mut D) -> Result<Option<String>> {
        driver.scroll_to_bottom().await?;
        if !self.scroll_pause.is_zero() {
            sleep(self.scroll_pause).await;
        }

        let Some(link) = driver.find_one(&self.next).await? else {
            return Ok(None);
        };

        // A link without an on-site target is a disabled control.
        match driver.attribute(&link, "href").await? {
            Some(href) if is_site_url(&href) => Ok(Some(ensure_variant_filter(&href))),
            _ => Ok(None),
        }
    }
}
