use std::collections::HashSet;

use serde::{Serialize, Serializer};
use sha2::{Digest, Sha256};

/// Texts at or below this many characters are placeholders or deleted reviews.
pub const MIN_REVIEW_CHARS: usize = 30;

/// The full visible text of one review card, compacted onto a single line.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ReviewText(String);

impl ReviewText {
    /// Normalize raw card text and apply the minimum-length filter.
    ///
    /// Line breaks are joined with single spaces and the result is stripped.
    pub fn parse(raw: &str) -> Option<Self> {
        let joined = raw
            .trim()
            .lines()
            .collect::<Vec<_>>()
            .join(" ");
        let text = joined.trim();

        if text.chars().count() > MIN_REVIEW_CHARS {
            Some(Self(text.to_string()))
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Hex SHA-256 of the text, for reports.
    pub fn digest(&self) -> String {
        hex::encode(Sha256::digest(self.0.as_bytes()))
    }
}

impl std::fmt::Display for ReviewText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for ReviewText {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

/// Deduplicated reviews of one collection run, in first-seen order.
///
/// Shared by every pass of a run; only ever grows.
#[derive(Debug, Default, Clone)]
pub struct ReviewSet {
    seen: HashSet<ReviewText>,
    order: Vec<ReviewText>,
}

impl ReviewSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a review, returning `true` if it was not already present.
    pub fn insert(&mut self, review: ReviewText) -> bool {
        if self.seen.contains(&review) {
            return false;
        }
        self.seen.insert(review.clone());
        self.order.push(review);
        true
    }

    /// Insert many reviews, returning how many were new.
    pub fn extend<I: IntoIterator<Item = ReviewText>>(&mut self, reviews: I) -> usize {
        let mut added = 0;
        for review in reviews {
            if self.insert(review) {
                added += 1;
            }
        }
        added
    }

    pub fn contains(&self, review: &ReviewText) -> bool {
        self.seen.contains(review)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn into_vec(self) -> Vec<ReviewText> {
        self.order
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn review(s: &str) -> ReviewText {
        ReviewText::parse(s).expect("review should pass the length filter")
    }

    #[test]
    fn test_parse_joins_lines() {
        let r = review("  Иван\n12 марта 2024\nДостоинства: отличный звук, батарея  \n");
        assert_eq!(
            r.as_str(),
            "Иван 12 марта 2024 Достоинства: отличный звук, батарея"
        );
    }

    #[test]
    fn test_parse_rejects_short_text() {
        assert!(ReviewText::parse("").is_none());
        assert!(ReviewText::parse("Отзыв удалён").is_none());
        assert!(ReviewText::parse(&"x".repeat(25)).is_none());
        assert!(ReviewText::parse(&"x".repeat(MIN_REVIEW_CHARS)).is_none());
        assert!(ReviewText::parse(&"x".repeat(MIN_REVIEW_CHARS + 1)).is_some());
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        // 20 Cyrillic characters are 40 bytes.
        assert!(ReviewText::parse(&"ж".repeat(20)).is_none());
        assert!(ReviewText::parse(&"ж".repeat(31)).is_some());
    }

    #[test]
    fn test_padding_does_not_count_towards_length() {
        let padded = format!("   {}   \n\n", "y".repeat(MIN_REVIEW_CHARS));
        assert!(ReviewText::parse(&padded).is_none());
    }

    #[test]
    fn test_digest_is_hex_sha256() {
        let r = review("Всё отлично, пришло быстро, рекомендую всем");
        let digest = r.digest();
        assert_eq!(digest.len(), 64);
        assert!(digest.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(digest, r.clone().digest());
    }

    #[test]
    fn test_set_deduplicates() {
        let mut set = ReviewSet::new();
        assert!(set.insert(review("Первый отзыв, достаточно длинный текст")));
        assert!(!set.insert(review("Первый отзыв, достаточно длинный текст")));
        assert!(set.insert(review("Второй отзыв, тоже достаточно длинный")));
        assert_eq!(set.len(), 2);
        assert!(set.contains(&review("Первый отзыв, достаточно длинный текст")));
    }

    #[test]
    fn test_set_preserves_first_seen_order() {
        let mut set = ReviewSet::new();
        let a = review("aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa");
        let b = review("bbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb");
        set.insert(b.clone());
        set.insert(a.clone());
        set.insert(b.clone());
        assert_eq!(set.into_vec(), vec![b, a]);
    }

    #[test]
    fn test_extend_counts_only_new() {
        let mut set = ReviewSet::new();
        let a = review("aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa");
        let b = review("bbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb");
        assert_eq!(set.extend(vec![a.clone(), b.clone(), a.clone()]), 2);
        assert_eq!(set.extend(vec![a, b]), 0);
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_lines_joined_equal_single_line() {
        let mut set = ReviewSet::new();
        set.insert(review("Пётр\nНедостатки: нет\nКомментарий: хорошо"));
        assert!(!set.insert(review("Пётр Недостатки: нет Комментарий: хорошо")));
    }
}
