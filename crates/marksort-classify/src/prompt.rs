//! Classification prompt construction.

use crate::sanitize::CompactBookmark;

/// Fixed system instruction for the classifier.
pub const SYSTEM_INSTRUCTION: &str = "\
You are a bookmark classification expert. Group bookmarks by content.

Rules:
1. Include every bookmark id (the numbers), with no omissions
2. Category names are short human-readable labels (e.g. \"Tech\", \"News\", \"Shopping\")
3-1. 6 <= number of categories <= 20
3-2. At most 50 bookmarks per category
4. Output the JSON directly, with no explanation

Format: {\"categories\":[{\"categoryName\":\"Label\",\"bookmarkIds\":[\"0\",\"1\"]}]}";

/// User message: batch size plus the compacted records as a JSON array.
pub fn user_message(records: &[CompactBookmark]) -> String {
    let payload = serde_json::to_string(records).unwrap_or_else(|_| "[]".to_string());
    format!("Classify {} bookmarks:\n{}", records.len(), payload)
}
