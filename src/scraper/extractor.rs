use tracing::{debug, warn};

use crate::app::Result;
use crate::domain::ReviewText;
use crate::scraper::{Locator, PageDriver};

/// Review candidates found on one page
#[derive(Debug, Clone, Default)]
pub struct Extraction {
    /// Review containers present in the DOM, before any filtering
    pub found: usize,
    /// Normalized texts that passed the length filter, in page order
    pub reviews: Vec<ReviewText>,
}

/// Pulls review texts out of the page currently loaded in a driver
pub struct ReviewExtractor {
    expand: Locator,
    cards: Locator,
}

impl Default for ReviewExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl ReviewExtractor {
    pub fn new() -> Self {
        Self {
            expand: Locator::expand_controls(),
            cards: Locator::review_cards(),
        }
    }

    /// Expand truncated reviews, then read every review container.
    ///
    /// Expansion is best-effort. A container whose text cannot be read is
    /// skipped; failing to locate the containers at all is an error.
    pub async fn extract<D: PageDriver>(&self, driver: &mut D) -> Result<Extraction> {
        self.expand_all(driver).await;

        let cards = driver.find_all(&self.cards).await?;
        let mut reviews = Vec::with_capacity(cards.len());

        for (idx, card) in cards.iter().enumerate() {
            match driver.text(card).await {
                Ok(raw) => {
                    if let Some(review) = ReviewText::parse(&raw) {
                        reviews.push(review);
                    }
                }
                Err(e) => warn!("Skipping review element {}: {}", idx, e),
            }
        }

        Ok(Extraction {
            found: cards.len(),
            reviews,
        })
    }

    async fn expand_all<D: PageDriver>(&self, driver: &mut D) {
        let controls = match driver.find_all(&self.expand).await {
            Ok(controls) => controls,
            Err(e) => {
                debug!("Could not look up expand controls: {}", e);
                return;
            }
        };

        for control in &controls {
            if let Err(e) = driver.click(control).await {
                debug!("Expand click failed: {}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scraper::mock::{reviews, MockDriver, MockPage};

    const URL: &str = "https://ozon.ru/product/1/reviews";

    fn driver_with(page: MockPage) -> MockDriver {
        let mut driver = MockDriver::new().page(URL, page);
        driver.load(URL);
        driver
    }

    #[tokio::test]
    async fn test_extracts_long_reviews_in_order() {
        let texts = reviews("a", 3);
        let mut driver = driver_with(MockPage::with_cards(texts.clone()));

        let extraction = ReviewExtractor::new().extract(&mut driver).await.unwrap();

        assert_eq!(extraction.found, 3);
        let got: Vec<_> = extraction.reviews.iter().map(|r| r.as_str()).collect();
        assert_eq!(got, texts);
    }

    #[tokio::test]
    async fn test_short_block_is_dropped() {
        let block = "Товар пришёл, всё хорошо!";
        assert_eq!(block.chars().count(), 25);
        let mut driver = driver_with(MockPage::with_cards([block]));

        let extraction = ReviewExtractor::new().extract(&mut driver).await.unwrap();

        assert_eq!(extraction.found, 1);
        assert!(extraction.reviews.is_empty());
    }

    #[tokio::test]
    async fn test_multiline_cards_are_compacted() {
        let mut driver = driver_with(MockPage::with_cards([
            "Анна\n3 мая\nДостоинства: лёгкий\nНедостатки: нет",
        ]));

        let extraction = ReviewExtractor::new().extract(&mut driver).await.unwrap();

        assert_eq!(
            extraction.reviews[0].as_str(),
            "Анна 3 мая Достоинства: лёгкий Недостатки: нет"
        );
    }

    #[tokio::test]
    async fn test_clicks_every_expand_control() {
        let mut page = MockPage::with_cards(reviews("a", 2));
        page.expand_controls = 4;
        let mut driver = driver_with(page);

        ReviewExtractor::new().extract(&mut driver).await.unwrap();

        assert_eq!(driver.clicks, 4);
    }

    #[tokio::test]
    async fn test_failed_expand_clicks_are_ignored() {
        let mut page = MockPage::with_cards(reviews("a", 2));
        page.expand_controls = 2;
        let mut driver = driver_with(page);
        driver.failing_clicks = true;

        let extraction = ReviewExtractor::new().extract(&mut driver).await.unwrap();

        assert_eq!(extraction.reviews.len(), 2);
    }

    #[tokio::test]
    async fn test_unreadable_card_is_skipped() {
        let mut page = MockPage::with_cards(reviews("a", 2));
        page.cards.insert(1, Err("stale element reference".into()));
        let mut driver = driver_with(page);

        let extraction = ReviewExtractor::new().extract(&mut driver).await.unwrap();

        assert_eq!(extraction.found, 3);
        assert_eq!(extraction.reviews.len(), 2);
    }

    #[tokio::test]
    async fn test_card_lookup_failure_is_an_error() {
        let mut page = MockPage::with_cards(reviews("a", 2));
        page.cards_broken = true;
        let mut driver = driver_with(page);

        assert!(ReviewExtractor::new().extract(&mut driver).await.is_err());
    }
}
