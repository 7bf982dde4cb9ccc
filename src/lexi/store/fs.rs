use super::rows::{CategoryRow, LanguageRow, WordRow};
use super::{DataStore, ItemQuery};
use crate::error::{LexiError, Result};
use crate::model::{Category, ItemPatch, Language, VocabularyItem};
use crate::notebook::{NotebookEntry, NotebookKind};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use uuid::Uuid;

const LANGUAGES_FILE: &str = "languages.json";
const CATEGORIES_FILE: &str = "categories.json";
const WORDS_FILE: &str = "words.json";
const NOTEBOOK_FILE: &str = "notebook.json";

pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root)?;
        }
        Ok(())
    }

    fn load_table<R: DeserializeOwned>(&self, file: &str) -> Result<HashMap<Uuid, R>> {
        let path = self.root.join(file);
        if !path.exists() {
            return Ok(HashMap::new());
        }
        let content = fs::read_to_string(&path)?;
        let table: HashMap<Uuid, R> = serde_json::from_str(&content)?;
        debug!(path = %path.display(), rows = table.len(), "loaded table");
        Ok(table)
    }

    fn save_table<R: Serialize>(&self, file: &str, table: &HashMap<Uuid, R>) -> Result<()> {
        self.ensure_dir()?;
        let path = self.root.join(file);
        let content = serde_json::to_string_pretty(table)?;
        fs::write(&path, content)?;
        debug!(path = %path.display(), rows = table.len(), "saved table");
        Ok(())
    }

    fn load_words(&self) -> Result<HashMap<Uuid, WordRow>> {
        self.load_table(WORDS_FILE)
    }
}

impl DataStore for FileStore {
    fn list_languages(&self) -> Result<Vec<Language>> {
        let table: HashMap<Uuid, LanguageRow> = self.load_table(LANGUAGES_FILE)?;
        table.into_values().map(Language::try_from).collect()
    }

    fn get_language(&self, id: &Uuid) -> Result<Language> {
        let mut table: HashMap<Uuid, LanguageRow> = self.load_table(LANGUAGES_FILE)?;
        let row = table.remove(id).ok_or(LexiError::LanguageNotFound(*id))?;
        Language::try_from(row)
    }

    fn save_language(&mut self, language: &Language) -> Result<()> {
        let mut table: HashMap<Uuid, LanguageRow> = self.load_table(LANGUAGES_FILE)?;
        table.insert(language.id, LanguageRow::from(language));
        self.save_table(LANGUAGES_FILE, &table)
    }

    fn list_categories(&self, language_id: &Uuid) -> Result<Vec<Category>> {
        let table: HashMap<Uuid, CategoryRow> = self.load_table(CATEGORIES_FILE)?;
        table
            .into_values()
            .filter(|row| &row.language_id == language_id)
            .map(Category::try_from)
            .collect()
    }

    fn get_category(&self, id: &Uuid) -> Result<Category> {
        let mut table: HashMap<Uuid, CategoryRow> = self.load_table(CATEGORIES_FILE)?;
        let row = table.remove(id).ok_or(LexiError::CategoryNotFound(*id))?;
        Category::try_from(row)
    }

    fn save_category(&mut self, category: &Category) -> Result<()> {
        let mut table: HashMap<Uuid, CategoryRow> = self.load_table(CATEGORIES_FILE)?;
        table.insert(category.id, CategoryRow::from(category));
        self.save_table(CATEGORIES_FILE, &table)
    }

    fn delete_category(&mut self, id: &Uuid) -> Result<()> {
        let mut table: HashMap<Uuid, CategoryRow> = self.load_table(CATEGORIES_FILE)?;
        if table.remove(id).is_none() {
            return Err(LexiError::CategoryNotFound(*id));
        }
        self.save_table(CATEGORIES_FILE, &table)
    }

    fn list_items(&self, language_id: &Uuid, query: &ItemQuery) -> Result<Vec<VocabularyItem>> {
        let mut items = Vec::new();
        for row in self.load_words()?.into_values() {
            if &row.language_id != language_id {
                continue;
            }
            let item = VocabularyItem::try_from(row)?;
            if query.matches(&item) {
                items.push(item);
            }
        }
        Ok(items)
    }

    fn get_item(&self, id: &Uuid) -> Result<VocabularyItem> {
        let row = self
            .load_words()?
            .remove(id)
            .ok_or(LexiError::NotFound(*id))?;
        VocabularyItem::try_from(row)
    }

    fn create_item(&mut self, item: &VocabularyItem) -> Result<()> {
        let mut table = self.load_words()?;
        table.insert(item.id, WordRow::from(item));
        self.save_table(WORDS_FILE, &table)
    }

    fn update_item(&mut self, id: &Uuid, patch: &ItemPatch) -> Result<VocabularyItem> {
        let mut table = self.load_words()?;
        let row = table.remove(id).ok_or(LexiError::NotFound(*id))?;
        let mut item = VocabularyItem::try_from(row)?;
        patch.apply_to(&mut item);
        table.insert(item.id, WordRow::from(&item));
        self.save_table(WORDS_FILE, &table)?;
        Ok(item)
    }

    fn delete_item(&mut self, id: &Uuid) -> Result<()> {
        let mut table = self.load_words()?;
        if table.remove(id).is_none() {
            return Err(LexiError::NotFound(*id));
        }
        self.save_table(WORDS_FILE, &table)
    }

    fn list_entries(&self, language_id: &Uuid, kind: NotebookKind) -> Result<Vec<NotebookEntry>> {
        let table: HashMap<Uuid, NotebookEntry> = self.load_table(NOTEBOOK_FILE)?;
        Ok(table
            .into_values()
            .filter(|e| &e.language_id == language_id && e.kind() == kind)
            .collect())
    }

    fn save_entry(&mut self, entry: &NotebookEntry) -> Result<()> {
        let mut table: HashMap<Uuid, NotebookEntry> = self.load_table(NOTEBOOK_FILE)?;
        table.insert(entry.id, entry.clone());
        self.save_table(NOTEBOOK_FILE, &table)
    }
}
