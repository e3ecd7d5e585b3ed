//! In-memory bookmark store.
//!
//! The authoritative collection of bookmarks and manually declared
//! category names. All mutation operations are total: absent ids and
//! unknown category names no-op instead of failing.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::model::{Bookmark, ALL_BOOKMARKS, UNCATEGORIZED};

/// Bookmark and category state.
#[derive(Debug, Clone, Default)]
pub struct BookmarkStore {
    bookmarks: Vec<Bookmark>,
    /// Categories declared explicitly by the user, so an empty category
    /// can exist before any bookmark is assigned to it. Kept sorted.
    manual_categories: Vec<String>,
}

impl BookmarkStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a store from persisted parts.
    pub fn from_parts(bookmarks: Vec<Bookmark>, manual_categories: Vec<String>) -> Self {
        Self {
            bookmarks,
            manual_categories,
        }
    }

    pub fn bookmarks(&self) -> &[Bookmark] {
        &self.bookmarks
    }

    pub fn manual_categories(&self) -> &[String] {
        &self.manual_categories
    }

    pub fn len(&self) -> usize {
        self.bookmarks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bookmarks.is_empty() && self.manual_categories.is_empty()
    }

    /// Append bookmarks whose URL is not already present.
    ///
    /// Dedup is by exact URL string equality (no normalization); the
    /// first-seen URL wins, including within the incoming batch itself.
    /// Returns the number of bookmarks actually imported.
    pub fn import(&mut self, batch: Vec<Bookmark>) -> usize {
        let mut seen: HashSet<String> = self.bookmarks.iter().map(|b| b.url.clone()).collect();
        let mut imported = 0;

        for bookmark in batch {
            if seen.insert(bookmark.url.clone()) {
                self.bookmarks.push(bookmark);
                imported += 1;
            }
        }

        debug!("Imported {} bookmarks ({} total)", imported, self.bookmarks.len());
        imported
    }

    /// Remove a single bookmark. No-op if the id is absent.
    pub fn delete_one(&mut self, id: &str) {
        self.bookmarks.retain(|b| b.id != id);
    }

    /// Remove every bookmark whose id is in the set. Idempotent.
    pub fn delete_many(&mut self, ids: &HashSet<String>) {
        self.bookmarks.retain(|b| !ids.contains(&b.id));
    }

    /// Delete a category: members cascade to [`UNCATEGORIZED`] first, then
    /// the name is removed from the manually declared set.
    pub fn delete_category(&mut self, name: &str) {
        for b in &mut self.bookmarks {
            if b.category == name {
                b.category = UNCATEGORIZED.to_string();
            }
        }
        self.manual_categories.retain(|c| c != name);
    }

    /// Assign `target` as the category of every bookmark in the set.
    ///
    /// Permissive: the target is not checked against declared categories —
    /// assigning to it declares it implicitly.
    pub fn move_many(&mut self, ids: &HashSet<String>, target: &str) {
        for b in &mut self.bookmarks {
            if ids.contains(&b.id) {
                b.category = target.to_string();
            }
        }
    }

    /// Declare a category name ahead of any members. The declared set is
    /// kept sorted; re-declaring is a no-op.
    pub fn create_category(&mut self, name: &str) {
        if !self.manual_categories.iter().any(|c| c == name) {
            self.manual_categories.push(name.to_string());
            self.manual_categories.sort();
        }
    }

    /// Overwrite the category of every bookmark whose id appears in the
    /// mapping; bookmarks absent from the mapping keep their category.
    /// Returns the number of bookmarks updated.
    pub fn apply_categorization(&mut self, mapping: &HashMap<String, String>) -> usize {
        let mut applied = 0;
        for b in &mut self.bookmarks {
            if let Some(category) = mapping.get(&b.id) {
                b.category = category.clone();
                applied += 1;
            }
        }
        debug!("Applied categorization to {} bookmarks", applied);
        applied
    }

    /// Distinct categories: bookmark categories unioned with manual
    /// declarations, minus [`UNCATEGORIZED`], sorted.
    pub fn categories(&self) -> Vec<String> {
        let mut set: HashSet<&str> = self.bookmarks.iter().map(|b| b.category.as_str()).collect();
        for c in &self.manual_categories {
            set.insert(c);
        }
        set.remove(UNCATEGORIZED);

        let mut categories: Vec<String> = set.into_iter().map(String::from).collect();
        categories.sort();
        categories
    }

    /// Bookmark count per category.
    pub fn counts(&self) -> HashMap<String, usize> {
        let mut counts = HashMap::new();
        for b in &self.bookmarks {
            *counts.entry(b.category.clone()).or_insert(0) += 1;
        }
        counts
    }

    /// Bookmarks in `selected` (unless it is [`ALL_BOOKMARKS`]) whose title
    /// or URL contains `query`, case-insensitively.
    pub fn filtered(&self, selected: &str, query: &str) -> Vec<&Bookmark> {
        let q = query.trim().to_lowercase();
        self.bookmarks
            .iter()
            .filter(|b| selected == ALL_BOOKMARKS || b.category == selected)
            .filter(|b| {
                q.is_empty()
                    || b.title.to_lowercase().contains(&q)
                    || b.url.to_lowercase().contains(&q)
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
