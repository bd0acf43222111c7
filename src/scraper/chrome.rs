use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::element::Element;
use chromiumoxide::handler::viewport::Viewport;
use chromiumoxide::page::Page;
use futures::StreamExt;
use tokio::task::JoinHandle;
use tokio::time::{sleep, Instant};
use tracing::{debug, warn};

use crate::app::{GleanerError, Result};
use crate::scraper::config::ScraperConfig;
use crate::scraper::{Locator, PageDriver};

/// Page session backed by headless Chrome via chromiumoxide
pub struct ChromeDriver {
    browser: Browser,
    page: Page,
    handler: JoinHandle<()>,
    config: ScraperConfig,
    closed: bool,
}

impl ChromeDriver {
    /// Launch a browser with a low-profile, low-bandwidth setup and open one tab.
    ///
    /// Launch failures are returned as-is; there is no retry.
    pub async fn open(config: ScraperConfig) -> Result<Self> {
        let mut builder = BrowserConfig::builder()
            .viewport(Viewport {
                width: config.window_width,
                height: config.window_height,
                device_scale_factor: Some(1.0),
                emulating_mobile: false,
                is_landscape: true,
                has_touch: false,
            })
            .window_size(config.window_width, config.window_height)
            .arg("--no-sandbox")
            .arg("--disable-gpu")
            .arg("--disable-dev-shm-usage")
            .arg("--disable-notifications")
            .arg("--disable-blink-features=AutomationControlled");

        if !config.headless {
            builder = builder.with_head();
        }

        if config.block_images {
            builder = builder.arg("--blink-settings=imagesEnabled=false");
        }

        if let Some(ref ua) = config.user_agent {
            builder = builder.arg(format!("--user-agent={}", ua));
        }

        let browser_config = builder
            .build()
            .map_err(|e| GleanerError::Browser(format!("Failed to build browser config: {}", e)))?;

        let (mut browser, mut handler) = Browser::launch(browser_config).await.map_err(|e| {
            GleanerError::Browser(format!(
                "Failed to launch browser: {}. Is Chrome or Chromium installed and in PATH?",
                e
            ))
        })?;

        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    debug!("CDP handler error: {}", e);
                }
            }
        });

        let page = match browser.new_page("about:blank").await {
            Ok(page) => page,
            Err(e) => {
                // The process is up; do not leave it behind.
                let _ = browser.close().await;
                let _ = browser.wait().await;
                handler.abort();
                return Err(GleanerError::Browser(format!("Failed to create page: {}", e)));
            }
        };

        Ok(Self {
            browser,
            page,
            handler,
            config,
            closed: false,
        })
    }

    async fn query(&self, locator: &Locator) -> Result<Vec<Element>> {
        let found = match locator {
            Locator::Css(selector) => self.page.find_elements(selector.as_str()).await,
            Locator::XPath(xpath) => self.page.find_xpaths(xpath.as_str()).await,
        };

        found.map_err(|e| GleanerError::Element(format!("Lookup of {:?} failed: {}", locator, e)))
    }

    /// Wait for the asynchronously hydrated listing.
    ///
    /// Polls for a review container up to the configured bound, or sleeps a
    /// fixed delay when polling is disabled.
    async fn settle(&self) {
        if !self.config.wait_for_reviews {
            sleep(self.config.settle_delay()).await;
            return;
        }

        let locator = Locator::review_cards();
        let deadline = Instant::now() + self.config.settle_timeout();

        loop {
            match self.query(&locator).await {
                Ok(found) if !found.is_empty() => {
                    debug!("Page settled with {} review elements", found.len());
                    return;
                }
                Ok(_) => {}
                Err(e) => debug!("Readiness probe failed: {}", e),
            }

            if Instant::now() >= deadline {
                debug!("No review elements within {:?}", self.config.settle_timeout());
                return;
            }

            sleep(self.config.settle_poll()).await;
        }
    }
}

#[async_trait]
impl PageDriver for ChromeDriver {
    type Element = Element;

    async fn navigate(&mut self, url: &str) -> Result<()> {
        self.page
            .goto(url)
            .await
            .map_err(|e| GleanerError::Navigation(format!("{}: {}", url, e)))?;

        self.settle().await;
        Ok(())
    }

    async fn find_all(&mut self, locator: &Locator) -> Result<Vec<Element>> {
        self.query(locator).await
    }

    async fn click(&mut self, element: &Element) -> Result<()> {
        element
            .call_js_fn("function() { this.click(); }", false)
            .await
            .map_err(|e| GleanerError::Element(format!("Click failed: {}", e)))?;
        Ok(())
    }

    async fn scroll_to_bottom(&mut self) -> Result<()> {
        self.page
            .evaluate("window.scrollTo(0, document.body.scrollHeight);")
            .await
            .map_err(|e| GleanerError::Element(format!("Scroll failed: {}", e)))?;
        Ok(())
    }

    async fn text(&mut self, element: &Element) -> Result<String> {
        let text = element
            .inner_text()
            .await
            .map_err(|e| GleanerError::Element(format!("Failed to read text: {}", e)))?;
        Ok(text.unwrap_or_default())
    }

    async fn attribute(&mut self, element: &Element, name: &str) -> Result<Option<String>> {
        // Prefer the DOM property so links come back resolved against the page URL.
        let name = serde_json::to_string(name)?;
        let script = format!(
            "function() {{ const v = this[{name}] ?? this.getAttribute({name}); \
             return v == null ? null : String(v); }}"
        );

        let returns = element
            .call_js_fn(script, false)
            .await
            .map_err(|e| GleanerError::Element(format!("Failed to read attribute: {}", e)))?;

        Ok(returns
            .result
            .value
            .and_then(|v| v.as_str().map(str::to_string))
            .filter(|v| !v.is_empty()))
    }

    async fn close(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;

        let closed = self
            .browser
            .close()
            .await
            .map_err(|e| GleanerError::Browser(format!("Failed to close browser: {}", e)));

        if let Err(e) = self.browser.wait().await {
            warn!("Browser process did not exit cleanly: {}", e);
        }
        self.handler.abort();

        closed.map(|_| ())
    }
}
