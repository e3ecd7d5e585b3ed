//! Bookmark data model.

use serde::{Deserialize, Serialize};

/// Default bucket for bookmarks that have not been assigned a category.
/// Never listed as a real category.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// View filter meaning "no category filter". Never stored on a bookmark.
pub const ALL_BOOKMARKS: &str = "All Bookmarks";

/// A single saved bookmark.
///
/// `id` is immutable and unique within a store instance. `category` is
/// never empty; freshly imported bookmarks start in [`UNCATEGORIZED`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bookmark {
    pub id: String,
    pub title: String,
    pub url: String,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Epoch milliseconds.
    pub date_added: i64,
}

impl Bookmark {
    /// Create a bookmark with a fresh id in the default category.
    pub fn new(title: impl Into<String>, url: impl Into<String>, date_added: i64) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            title: title.into(),
            url: url.into(),
            category: UNCATEGORIZED.to_string(),
            icon: None,
            date_added,
        }
    }

    /// Attach a favicon URL.
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_bookmark_defaults() {
        let b = Bookmark::new("Example", "https://example.com", 1_700_000_000_000);
        assert_eq!(b.category, UNCATEGORIZED);
        assert!(b.icon.is_none());
        assert!(!b.id.is_empty());
    }

    #[test]
    fn test_fresh_ids_are_unique() {
        let a = Bookmark::new("a", "https://a.example", 0);
        let b = Bookmark::new("b", "https://b.example", 0);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_serde_uses_camel_case() {
        let b = Bookmark::new("Example", "https://example.com", 42).with_icon("data:,");
        let json = serde_json::to_value(&b).unwrap();
        assert_eq!(json["dateAdded"], 42);
        assert_eq!(json["icon"], "data:,");
    }
}
