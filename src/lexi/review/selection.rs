//! Practice set selection.
//!
//! A practice set is never stored. It is computed from the language's words
//! every time a session starts, filtered by a [`SelectionMode`] and ordered
//! newest first.

use crate::error::{LexiError, Result};
use crate::model::VocabularyItem;
use std::cmp::Ordering;
use std::fmt;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SelectionMode {
    /// Every word not yet learned.
    All,
    /// Words not yet learned that belong to the given category.
    Category(Uuid),
    /// Words not yet learned that were forgotten often enough.
    Forgot,
}

impl SelectionMode {
    /// Learned words never match, whatever the mode.
    pub fn matches(&self, item: &VocabularyItem) -> bool {
        if item.learned {
            return false;
        }
        match self {
            SelectionMode::All => true,
            SelectionMode::Category(id) => item.category_id == Some(*id),
            SelectionMode::Forgot => item.is_forgotten(),
        }
    }
}

impl fmt::Display for SelectionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectionMode::All => f.write_str("all"),
            SelectionMode::Category(id) => write!(f, "category:{}", id),
            SelectionMode::Forgot => f.write_str("forgot"),
        }
    }
}

/// Newest first; equal timestamps fall back to ascending id.
pub fn practice_order(a: &VocabularyItem, b: &VocabularyItem) -> Ordering {
    b.created_at
        .cmp(&a.created_at)
        .then_with(|| a.id.cmp(&b.id))
}

/// Filters and orders `items` into a practice set.
///
/// Returns [`LexiError::EmptySet`] when nothing is left to practice.
pub fn select(items: Vec<VocabularyItem>, mode: SelectionMode) -> Result<Vec<VocabularyItem>> {
    let mut set: Vec<_> = items.into_iter().filter(|i| mode.matches(i)).collect();
    if set.is_empty() {
        return Err(LexiError::EmptySet);
    }
    set.sort_by(practice_order);
    Ok(set)
}
