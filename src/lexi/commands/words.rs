use crate::commands::categories;
use crate::commands::helpers::{optional_text, ordered_categories, ordered_words, require_text};
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::index::{index_words, DisplayIndex, DisplayWord};
use crate::model::{Language, VocabularyItem};
use crate::store::DataStore;
use tracing::info;

#[derive(Debug, Clone, Default)]
pub struct NewWord {
    pub term: String,
    pub definition: String,
    pub example_sentence: Option<String>,
    pub image_url: Option<String>,
    pub category: Option<DisplayIndex>,
}

pub fn add<S: DataStore>(store: &mut S, language: &Language, new: NewWord) -> Result<CmdResult> {
    let term = require_text("Word", &new.term)?;
    let definition = require_text("Definition", &new.definition)?;
    let category_id = match new.category {
        Some(index) => Some(categories::resolve(store, language, index)?.id),
        None => None,
    };

    let mut item = VocabularyItem::new(language.id, term, definition);
    item.example_sentence = optional_text(new.example_sentence);
    item.image_url = optional_text(new.image_url);
    item.category_id = category_id;
    store.create_item(&item)?;
    info!(id = %item.id, term = %item.term, "word added");

    let message = CmdMessage::success(format!("Word added: {}", item.term));
    Ok(CmdResult::default()
        .with_affected_word(item)
        .with_message(message))
}

/// Lists the language's words, newest first.
///
/// Indexes are assigned before the search filter runs, so a filtered listing
/// shows the same numbers as the full one.
pub fn list<S: DataStore>(store: &S, language: &Language, search: Option<&str>) -> Result<CmdResult> {
    let words = ordered_words(store, &language.id)?;
    let categories = ordered_categories(store, &language.id)?;
    let mut listed = index_words(words, &categories);

    if let Some(term) = search.map(str::trim).filter(|t| !t.is_empty()) {
        listed.retain(|dw| matches_search(dw, term));
    }

    let mut result = CmdResult::default().with_listed_words(listed);
    if result.listed_words.is_empty() {
        result.add_message(CmdMessage::info("No words found."));
    }
    Ok(result)
}

fn matches_search(dw: &DisplayWord, term: &str) -> bool {
    let needle = term.to_lowercase();
    dw.word.term.to_lowercase().contains(&needle)
        || dw.word.definition.to_lowercase().contains(&needle)
}

pub fn resolve<S: DataStore>(store: &S, language: &Language, index: DisplayIndex) -> Result<VocabularyItem> {
    let words = ordered_words(store, &language.id)?;
    index.pick(&words).cloned()
}

pub fn delete<S: DataStore>(store: &mut S, language: &Language, index: DisplayIndex) -> Result<CmdResult> {
    let word = resolve(store, language, index)?;
    store.delete_item(&word.id)?;
    info!(id = %word.id, term = %word.term, "word deleted");

    let message = CmdMessage::success(format!("Word deleted ({}): {}", index, word.term));
    Ok(CmdResult::default()
        .with_affected_word(word)
        .with_message(message))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LexiError;
    use crate::store::memory::fixtures::StoreFixture;

    fn new_word(term: &str, definition: &str) -> NewWord {
        NewWord {
            term: term.into(),
            definition: definition.into(),
            ..NewWord::default()
        }
    }

    #[test]
    fn add_requires_term_and_definition() {
        let mut fixture = StoreFixture::new();
        let language = fixture.language.clone();
        for (term, def) in [("", "cat"), ("gato", " "), ("", "")] {
            let err = add(&mut fixture.store, &language, new_word(term, def)).unwrap_err();
            assert!(matches!(err, LexiError::Validation(_)));
        }
        assert_eq!(fixture.store.write_count(), 1); // the fixture's language
    }

    #[test]
    fn add_starts_with_fresh_progress() {
        let mut fixture = StoreFixture::new().with_category("Animals");
        let language = fixture.language.clone();
        let result = add(
            &mut fixture.store,
            &language,
            NewWord {
                example_sentence: Some("El gato duerme.".into()),
                image_url: Some("".into()),
                category: Some(DisplayIndex(1)),
                ..new_word("gato", "cat")
            },
        )
        .unwrap();

        let word = &result.affected_words[0];
        assert!(!word.learned);
        assert_eq!(word.forgot_count, 0);
        assert_eq!(word.difficulty, None);
        assert_eq!(word.image_url, None);
        assert_eq!(word.category_id, Some(fixture.category_id("Animals")));
    }

    #[test]
    fn add_with_unknown_category_index_fails() {
        let mut fixture = StoreFixture::new();
        let language = fixture.language.clone();
        let err = add(
            &mut fixture.store,
            &language,
            NewWord {
                category: Some(DisplayIndex(4)),
                ..new_word("gato", "cat")
            },
        )
        .unwrap_err();
        assert!(matches!(err, LexiError::Api(_)));
    }

    #[test]
    fn list_is_newest_first_with_categories() {
        let fixture = StoreFixture::new()
            .with_category("Food")
            .with_word("hola")
            .with_category_word("pan", "Food");

        let result = list(&fixture.store, &fixture.language, None).unwrap();
        let listed = &result.listed_words;
        assert_eq!(listed[0].word.term, "pan");
        assert_eq!(listed[0].category_label(), "Food");
        assert_eq!(listed[1].word.term, "hola");
        assert_eq!(listed[1].category_label(), "uncategorized");
    }

    #[test]
    fn search_is_case_insensitive_over_term_and_definition() {
        let fixture = StoreFixture::new()
            .with_word("Gato")
            .with_word("perro")
            .with_word("casa");

        let by_term = list(&fixture.store, &fixture.language, Some("gAT")).unwrap();
        assert_eq!(by_term.listed_words.len(), 1);
        assert_eq!(by_term.listed_words[0].word.term, "Gato");
        // Numbers match the unfiltered listing (newest first: casa, perro, Gato).
        assert_eq!(by_term.listed_words[0].index, DisplayIndex(3));

        // Fixture definitions are "<term> def".
        let by_definition = list(&fixture.store, &fixture.language, Some("PERRO DEF")).unwrap();
        assert_eq!(by_definition.listed_words.len(), 1);

        let none = list(&fixture.store, &fixture.language, Some("zzz")).unwrap();
        assert!(none.listed_words.is_empty());
        assert_eq!(none.messages.len(), 1);
    }

    #[test]
    fn delete_removes_by_index() {
        let mut fixture = StoreFixture::new().with_word("uno").with_word("dos");
        let language = fixture.language.clone();

        delete(&mut fixture.store, &language, DisplayIndex(1)).unwrap();

        let remaining = list(&fixture.store, &language, None).unwrap();
        assert_eq!(remaining.listed_words.len(), 1);
        assert_eq!(remaining.listed_words[0].word.term, "uno");
    }
}
