use super::{DataStore, ItemQuery};
use crate::error::{LexiError, Result};
use crate::model::{Category, ItemPatch, Language, VocabularyItem};
use crate::notebook::{NotebookEntry, NotebookKind};
use std::collections::HashMap;
use uuid::Uuid;

/// In-memory storage for testing and development.
/// Does NOT persist data.
#[derive(Default)]
pub struct InMemoryStore {
    languages: HashMap<Uuid, Language>,
    categories: HashMap<Uuid, Category>,
    items: HashMap<Uuid, VocabularyItem>,
    entries: HashMap<Uuid, NotebookEntry>,
    write_failure: Option<String>,
    writes: usize,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every following write fail with `reason`, or succeed again with `None`.
    pub fn set_write_failure(&mut self, reason: Option<String>) {
        self.write_failure = reason;
    }

    /// Number of successful writes so far.
    pub fn write_count(&self) -> usize {
        self.writes
    }

    fn check_write(&mut self) -> Result<()> {
        if let Some(reason) = &self.write_failure {
            return Err(LexiError::WriteFailed(reason.clone()));
        }
        self.writes += 1;
        Ok(())
    }
}

impl DataStore for InMemoryStore {
    fn list_languages(&self) -> Result<Vec<Language>> {
        Ok(self.languages.values().cloned().collect())
    }

    fn get_language(&self, id: &Uuid) -> Result<Language> {
        self.languages
            .get(id)
            .cloned()
            .ok_or(LexiError::LanguageNotFound(*id))
    }

    fn save_language(&mut self, language: &Language) -> Result<()> {
        self.check_write()?;
        self.languages.insert(language.id, language.clone());
        Ok(())
    }

    fn list_categories(&self, language_id: &Uuid) -> Result<Vec<Category>> {
        Ok(self
            .categories
            .values()
            .filter(|c| &c.language_id == language_id)
            .cloned()
            .collect())
    }

    fn get_category(&self, id: &Uuid) -> Result<Category> {
        self.categories
            .get(id)
            .cloned()
            .ok_or(LexiError::CategoryNotFound(*id))
    }

    fn save_category(&mut self, category: &Category) -> Result<()> {
        self.check_write()?;
        self.categories.insert(category.id, category.clone());
        Ok(())
    }

    fn delete_category(&mut self, id: &Uuid) -> Result<()> {
        if !self.categories.contains_key(id) {
            return Err(LexiError::CategoryNotFound(*id));
        }
        self.check_write()?;
        self.categories.remove(id);
        Ok(())
    }

    fn list_items(&self, language_id: &Uuid, query: &ItemQuery) -> Result<Vec<VocabularyItem>> {
        Ok(self
            .items
            .values()
            .filter(|i| &i.language_id == language_id && query.matches(i))
            .cloned()
            .collect())
    }

    fn get_item(&self, id: &Uuid) -> Result<VocabularyItem> {
        self.items.get(id).cloned().ok_or(LexiError::NotFound(*id))
    }

    fn create_item(&mut self, item: &VocabularyItem) -> Result<()> {
        self.check_write()?;
        self.items.insert(item.id, item.clone());
        Ok(())
    }

    fn update_item(&mut self, id: &Uuid, patch: &ItemPatch) -> Result<VocabularyItem> {
        if !self.items.contains_key(id) {
            return Err(LexiError::NotFound(*id));
        }
        self.check_write()?;
        let item = self.items.get_mut(id).ok_or(LexiError::NotFound(*id))?;
        patch.apply_to(item);
        Ok(item.clone())
    }

    fn delete_item(&mut self, id: &Uuid) -> Result<()> {
        if !self.items.contains_key(id) {
            return Err(LexiError::NotFound(*id));
        }
        self.check_write()?;
        self.items.remove(id);
        Ok(())
    }

    fn list_entries(&self, language_id: &Uuid, kind: NotebookKind) -> Result<Vec<NotebookEntry>> {
        Ok(self
            .entries
            .values()
            .filter(|e| &e.language_id == language_id && e.kind() == kind)
            .cloned()
            .collect())
    }

    fn save_entry(&mut self, entry: &NotebookEntry) -> Result<()> {
        self.check_write()?;
        self.entries.insert(entry.id, entry.clone());
        Ok(())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use chrono::{DateTime, Duration, Utc};

    /// Builds a store holding one language ("Spanish") and whatever words and
    /// categories the test adds. Each added word is one minute newer than the
    /// previous one, so practice order is predictable.
    pub struct StoreFixture {
        pub store: InMemoryStore,
        pub language: Language,
        clock: DateTime<Utc>,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            let mut store = InMemoryStore::new();
            let language = Language::new("Spanish".to_string());
            store.save_language(&language).unwrap();
            Self {
                store,
                language,
                clock: Utc::now() - Duration::days(1),
            }
        }

        pub fn with_category(mut self, name: &str) -> Self {
            let category = Category::new(self.language.id, name.to_string());
            self.store.save_category(&category).unwrap();
            self
        }

        pub fn with_word(self, term: &str) -> Self {
            self.with_progress_word(term, 0, false)
        }

        pub fn with_progress_word(mut self, term: &str, forgot_count: u32, learned: bool) -> Self {
            let mut item = self.next_item(term);
            item.forgot_count = forgot_count;
            item.learned = learned;
            self.store.create_item(&item).unwrap();
            self
        }

        pub fn with_category_word(mut self, term: &str, category: &str) -> Self {
            let mut item = self.next_item(term);
            item.category_id = Some(self.category_id(category));
            self.store.create_item(&item).unwrap();
            self
        }

        pub fn category_id(&self, name: &str) -> Uuid {
            self.store
                .list_categories(&self.language.id)
                .unwrap()
                .into_iter()
                .find(|c| c.name == name)
                .map(|c| c.id)
                .unwrap()
        }

        pub fn word(&self, term: &str) -> VocabularyItem {
            self.store
                .list_items(&self.language.id, &ItemQuery::Any)
                .unwrap()
                .into_iter()
                .find(|i| i.term == term)
                .unwrap()
        }

        fn next_item(&mut self, term: &str) -> VocabularyItem {
            self.clock += Duration::minutes(1);
            let mut item =
                VocabularyItem::new(self.language.id, term.to_string(), format!("{} def", term));
            item.created_at = self.clock;
            item
        }
    }
}
