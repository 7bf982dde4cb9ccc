use crate::error::{LexiError, Result};
use crate::model::{Category, Language, VocabularyItem};
use crate::notebook::{NotebookEntry, NotebookKind};
use crate::review::selection::practice_order;
use crate::store::{DataStore, ItemQuery};
use uuid::Uuid;

/// Languages in the order they are listed: oldest first.
pub fn ordered_languages<S: DataStore>(store: &S) -> Result<Vec<Language>> {
    let mut languages = store.list_languages()?;
    languages.sort_by(|a, b| {
        a.created_at
            .cmp(&b.created_at)
            .then_with(|| a.id.cmp(&b.id))
    });
    Ok(languages)
}

/// Categories of a language in the order they are listed: by name.
pub fn ordered_categories<S: DataStore>(store: &S, language_id: &Uuid) -> Result<Vec<Category>> {
    let mut categories = store.list_categories(language_id)?;
    categories.sort_by(|a, b| {
        a.name
            .to_lowercase()
            .cmp(&b.name.to_lowercase())
            .then_with(|| a.id.cmp(&b.id))
    });
    Ok(categories)
}

/// Every word of a language in the order they are listed: newest first.
pub fn ordered_words<S: DataStore>(store: &S, language_id: &Uuid) -> Result<Vec<VocabularyItem>> {
    let mut words = store.list_items(language_id, &ItemQuery::Any)?;
    words.sort_by(practice_order);
    Ok(words)
}

/// One notebook of a language in the order it is listed: newest first.
pub fn ordered_entries<S: DataStore>(
    store: &S,
    language_id: &Uuid,
    kind: NotebookKind,
) -> Result<Vec<NotebookEntry>> {
    let mut entries = store.list_entries(language_id, kind)?;
    entries.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| a.id.cmp(&b.id))
    });
    Ok(entries)
}

/// Trims `value` and rejects it when nothing is left.
pub fn require_text(field: &str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(LexiError::Validation(format!("{} is required", field)));
    }
    Ok(trimmed.to_string())
}

/// Trims an optional form field, dropping it when blank.
pub fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// "1 word", "3 words".
pub fn count_of(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("1 {}", noun)
    } else {
        format!("{} {}s", count, noun)
    }
}
