//! # Storage Layer
//!
//! The [`DataStore`] trait is the only way the rest of lexi reaches persisted
//! data. It mirrors the handful of calls the hosted backend offered: list,
//! create, partial update and delete over languages, categories and words,
//! plus whole-record writes for notebook entries.
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: JSON files in a data directory
//!   - `languages.json`, `categories.json`, `words.json`, `notebook.json`
//!   - each file is a map of id → row, see [`rows`]
//!
//! - [`memory::InMemoryStore`]: maps in memory, for tests
//!   - can be told to reject writes, to exercise failure paths
//!
//! ## Records vs. Rows
//!
//! Files hold rows in the loose shape the backend used (nullable columns,
//! free-text difficulty, signed counters). Rows are validated into the typed
//! model when read, so a hand-edited file with a negative `forgot_count`
//! surfaces as [`LexiError::InvalidRecord`](crate::error::LexiError) instead
//! of leaking into a review session.

use crate::error::Result;
use crate::model::{Category, ItemPatch, Language, VocabularyItem};
use crate::notebook::{NotebookEntry, NotebookKind};
use crate::review::SelectionMode;
use uuid::Uuid;

pub mod fs;
pub mod memory;
pub mod rows;

/// Which words of a language to list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemQuery {
    /// Every word, learned ones included.
    Any,
    /// Words eligible for a practice set in the given mode.
    Practice(SelectionMode),
}

impl ItemQuery {
    pub fn matches(&self, item: &VocabularyItem) -> bool {
        match self {
            ItemQuery::Any => true,
            ItemQuery::Practice(mode) => mode.matches(item),
        }
    }
}

/// Abstract interface for vocabulary storage.
///
/// Writes touch a single record. `update_item` only changes the fields named
/// in the patch and returns the stored result.
pub trait DataStore {
    fn list_languages(&self) -> Result<Vec<Language>>;

    fn get_language(&self, id: &Uuid) -> Result<Language>;

    /// Save a language (create or update)
    fn save_language(&mut self, language: &Language) -> Result<()>;

    fn list_categories(&self, language_id: &Uuid) -> Result<Vec<Category>>;

    fn get_category(&self, id: &Uuid) -> Result<Category>;

    /// Save a category (create or update)
    fn save_category(&mut self, category: &Category) -> Result<()>;

    /// Delete a category. Words keep their (now dangling) reference.
    fn delete_category(&mut self, id: &Uuid) -> Result<()>;

    fn list_items(&self, language_id: &Uuid, query: &ItemQuery) -> Result<Vec<VocabularyItem>>;

    fn get_item(&self, id: &Uuid) -> Result<VocabularyItem>;

    fn create_item(&mut self, item: &VocabularyItem) -> Result<()>;

    fn update_item(&mut self, id: &Uuid, patch: &ItemPatch) -> Result<VocabularyItem>;

    fn delete_item(&mut self, id: &Uuid) -> Result<()>;

    fn list_entries(&self, language_id: &Uuid, kind: NotebookKind) -> Result<Vec<NotebookEntry>>;

    /// Save a notebook entry (create or update), children included.
    fn save_entry(&mut self, entry: &NotebookEntry) -> Result<()>;
}
