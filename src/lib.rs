//! # gleaner
//!
//! Collects product reviews from Ozon through a headless browser and returns
//! them as a deduplicated, ordered list of plain strings, ready to hand to a
//! summarizer.
//!
//! ## Architecture
//!
//! ```text
//! URL → Normalizer → Collector (freshest pass, negative pass) → ReviewSet
//!                        │
//!                        └─ per page: PageDriver → ReviewExtractor → Paginator
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! # Collect 100 fresh and 50 negative reviews
//! gleaner collect https://www.ozon.ru/product/some-phone-123456/
//!
//! # Only the freshest 30, as JSON
//! gleaner collect --max-reviews 30 --max-negative 0 --json <URL>
//!
//! # Show the listing URL a product link maps to
//! gleaner normalize <URL>
//! ```

/// Error type and `Result` alias.
pub mod app;

/// Command-line interface using clap.
///
/// - `collect <url>` - Collect reviews for a product
/// - `normalize <url>` - Print the canonical reviews URL
pub mod cli;

/// Configuration loaded from `~/.config/gleaner/config.toml`.
pub mod config;

/// Core domain models.
///
/// - [`ReviewText`](domain::ReviewText): one normalized review
/// - [`ReviewSet`](domain::ReviewSet): the deduplicated accumulator of a run
/// - [`CollectionPass`](domain::CollectionPass): one sorted sweep with a limit
/// - [`CollectionReport`](domain::CollectionReport): serialisable run result
pub mod domain;

/// Product URL canonicalization.
pub mod normalizer;

/// Browser-driven review collection.
///
/// - [`PageDriver`](scraper::PageDriver): async trait over one browser session
/// - [`ChromeDriver`](scraper::ChromeDriver): chromiumoxide implementation
/// - [`Collector`](scraper::Collector): runs passes into a shared set
pub mod scraper;

pub use scraper::collect;
