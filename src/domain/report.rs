use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::{PassStats, ReviewText};

/// Everything a collection run produced.
#[derive(Debug, Clone, Serialize)]
pub struct CollectionReport {
    pub url: String,
    pub collected_at: DateTime<Utc>,
    pub passes: Vec<PassStats>,
    pub reviews: Vec<ReviewEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReviewEntry {
    pub id: String,
    pub text: ReviewText,
}

impl ReviewEntry {
    pub fn new(text: ReviewText) -> Self {
        Self {
            id: text.digest(),
            text,
        }
    }
}

impl CollectionReport {
    pub fn new(url: String, passes: Vec<PassStats>, reviews: Vec<ReviewText>) -> Self {
        Self {
            url,
            collected_at: Utc::now(),
            passes,
            reviews: reviews.into_iter().map(ReviewEntry::new).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.reviews.is_empty()
    }

    /// Review texts in collection order
    pub fn texts(&self) -> Vec<String> {
        self.reviews
            .iter()
            .map(|r| r.text.as_str().to_string())
            .collect()
    }
}
