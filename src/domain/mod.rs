pub mod pass;
pub mod report;
pub mod review;

pub use pass::{CollectionPass, PassStats, SortOrder, StopReason};
pub use report::{CollectionReport, ReviewEntry};
pub use review::{ReviewSet, ReviewText, MIN_REVIEW_CHARS};
