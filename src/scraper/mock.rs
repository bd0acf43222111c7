//! Scripted page driver for tests.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;

use crate::app::{GleanerError, Result};
use crate::scraper::{Locator, PageDriver};

#[derive(Debug, Clone)]
pub enum MockNext {
    /// No "next" link on the page
    Absent,
    /// A "next" link with this href (None = link without a target)
    Link(Option<String>),
    /// Locating the link errors
    Broken,
}

#[derive(Debug, Clone)]
pub struct MockPage {
    /// Card texts; `Err` cards fail when their text is read
    pub cards: Vec<std::result::Result<String, String>>,
    pub expand_controls: usize,
    pub next: MockNext,
    /// Locating review cards errors
    pub cards_broken: bool,
}

impl MockPage {
    pub fn with_cards<I, S>(cards: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            cards: cards.into_iter().map(|c| Ok(c.into())).collect(),
            expand_controls: 0,
            next: MockNext::Absent,
            cards_broken: false,
        }
    }

    pub fn next(mut self, href: impl Into<String>) -> Self {
        self.next = MockNext::Link(Some(href.into()));
        self
    }

    pub fn next_state(mut self, next: MockNext) -> Self {
        self.next = next;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockElement {
    Expand(usize),
    Card(usize),
    Next,
}

/// In-memory site: URL → page. Unknown URLs load as empty pages.
#[derive(Debug, Default)]
pub struct MockDriver {
    pages: HashMap<String, MockPage>,
    current: Option<String>,
    pub navigations: Vec<String>,
    pub clicks: usize,
    pub failing_clicks: bool,
    pub failing_navigation: Vec<String>,
    /// Navigation to this URL sleeps first, to exercise deadlines
    pub slow_navigation: Option<(String, Duration)>,
    pub closed: bool,
}

impl MockDriver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, url: impl Into<String>, page: MockPage) -> Self {
        self.pages.insert(url.into(), page);
        self
    }

    /// Load a page without going through `navigate`.
    pub fn load(&mut self, url: &str) {
        self.current = Some(url.to_string());
    }

    fn current_page(&self) -> Option<&MockPage> {
        self.current.as_ref().and_then(|url| self.pages.get(url))
    }
}

/// `count` distinct review texts, all above the length threshold.
pub fn reviews(prefix: &str, count: usize) -> Vec<String> {
    (0..count)
        .map(|i| format!("{} отзыв номер {}: товар соответствует описанию", prefix, i))
        .collect()
}

#[async_trait]
impl PageDriver for MockDriver {
    type Element = MockElement;

    async fn navigate(&mut self, url: &str) -> Result<()> {
        self.navigations.push(url.to_string());

        if let Some((slow, delay)) = &self.slow_navigation {
            if slow == url {
                tokio::time::sleep(*delay).await;
            }
        }

        if self.failing_navigation.iter().any(|u| u == url) {
            return Err(GleanerError::Navigation(format!("{}: net::ERR_TIMED_OUT", url)));
        }

        self.current = Some(url.to_string());
        Ok(())
    }

    async fn find_all(&mut self, locator: &Locator) -> Result<Vec<MockElement>> {
        let Some(page) = self.current_page() else {
            return Ok(Vec::new());
        };

        if *locator == Locator::expand_controls() {
            Ok((0..page.expand_controls).map(MockElement::Expand).collect())
        } else if *locator == Locator::review_cards() {
            if page.cards_broken {
                return Err(GleanerError::Element("stale element reference".into()));
            }
            Ok((0..page.cards.len()).map(MockElement::Card).collect())
        } else if *locator == Locator::next_link() {
            match page.next {
                MockNext::Absent => Ok(Vec::new()),
                MockNext::Link(_) => Ok(vec![MockElement::Next]),
                MockNext::Broken => Err(GleanerError::Element("node detached".into())),
            }
        } else {
            Ok(Vec::new())
        }
    }

    async fn click(&mut self, _element: &MockElement) -> Result<()> {
        if self.failing_clicks {
            return Err(GleanerError::Element("element is not attached".into()));
        }
        self.clicks += 1;
        Ok(())
    }

    async fn scroll_to_bottom(&mut self) -> Result<()> {
        Ok(())
    }

    async fn text(&mut self, element: &MockElement) -> Result<String> {
        match (element, self.current_page()) {
            (MockElement::Card(i), Some(page)) => match page.cards.get(*i) {
                Some(Ok(text)) => Ok(text.clone()),
                Some(Err(e)) => Err(GleanerError::Element(e.clone())),
                None => Err(GleanerError::Element("no such card".into())),
            },
            _ => Ok(String::new()),
        }
    }

    async fn attribute(&mut self, element: &MockElement, name: &str) -> Result<Option<String>> {
        match (element, name, self.current_page()) {
            (MockElement::Next, "href", Some(page)) => match &page.next {
                MockNext::Link(href) => Ok(href.clone()),
                _ => Ok(None),
            },
            _ => Ok(None),
        }
    }

    async fn close(&mut self) -> Result<()> {
        self.closed = true;
        Ok(())
    }
}
