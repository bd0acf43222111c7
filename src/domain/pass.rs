use serde::Serialize;

/// Listing sort orders the collector sweeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    /// Newest reviews first
    Freshest,
    /// Lowest scores first
    MostNegative,
}

impl SortOrder {
    /// Value of the site's `sort` query parameter
    pub fn query_value(self) -> &'static str {
        match self {
            SortOrder::Freshest => "published_at_desc",
            SortOrder::MostNegative => "score_asc",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortOrder::Freshest => "freshest",
            SortOrder::MostNegative => "negative",
        }
    }
}

/// One sweep over a sorted listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionPass {
    pub label: String,
    pub target_url: String,
    /// Number of new reviews after which the pass stops requesting pages
    pub limit: usize,
}

impl CollectionPass {
    pub fn new(label: impl Into<String>, target_url: impl Into<String>, limit: usize) -> Self {
        Self {
            label: label.into(),
            target_url: target_url.into(),
            limit,
        }
    }
}

/// Why a pass stopped requesting pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum StopReason {
    /// A page after the first had no review elements
    ListingExhausted,
    /// The pass collected at least its limit of new reviews
    LimitReached,
    /// No usable "next" link on the last page
    NoNextPage,
    /// Looking up the "next" link failed
    NextLookupFailed(String),
    /// Loading a page after the first failed
    NavigationFailed(String),
    /// The run deadline expired mid-pass
    TimedOut,
    /// Navigation or another driver call aborted the pass
    Aborted(String),
}

/// Outcome of one pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PassStats {
    pub label: String,
    pub pages_visited: usize,
    pub new_reviews: usize,
    pub stop: StopReason,
}

impl PassStats {
    /// Stats for a pass that has begun but not yet stopped
    pub fn started(label: &str) -> Self {
        Self {
            label: label.to_string(),
            pages_visited: 0,
            new_reviews: 0,
            stop: StopReason::Aborted("pass did not finish".into()),
        }
    }
}
