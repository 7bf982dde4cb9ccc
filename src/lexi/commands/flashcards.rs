use crate::commands::helpers::ordered_words;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::{Difficulty, Language};
use crate::review::{Completion, FlashcardDeck};
use crate::store::DataStore;
use tracing::info;

/// Opens a deck over every word of the language, learned ones included.
pub fn open<S: DataStore>(store: &S, language: &Language) -> Result<FlashcardDeck> {
    FlashcardDeck::new(ordered_words(store, &language.id)?)
}

pub fn tag<S: DataStore>(store: &mut S, deck: &mut FlashcardDeck, difficulty: Difficulty) -> Result<CmdResult> {
    let ticket = deck.begin_tag(difficulty)?;
    let outcome = store.update_item(&ticket.item_id, &ticket.patch);
    let stored = outcome.as_ref().ok().cloned();

    let mut result = CmdResult::default();
    if deck.complete_stored(&ticket, outcome)? == Completion::Discarded {
        return Ok(result);
    }
    if let Some(word) = stored {
        info!(id = %word.id, %difficulty, "difficulty tagged");
        result.add_message(CmdMessage::success(format!("{}: {}", word.term, difficulty)));
        result = result.with_affected_word(word);
    }
    Ok(result)
}

/// Reloads the deck from the store, e.g. after a word went missing.
pub fn refresh<S: DataStore>(store: &S, deck: &mut FlashcardDeck, language: &Language) -> Result<()> {
    deck.reconcile(ordered_words(store, &language.id)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LexiError;
    use crate::store::memory::fixtures::StoreFixture;

    #[test]
    fn deck_shows_learned_words_too() {
        let fixture = StoreFixture::new()
            .with_word("hola")
            .with_progress_word("adios", 0, true);
        let deck = open(&fixture.store, &fixture.language).unwrap();
        let terms: Vec<_> = deck.cards().iter().map(|c| c.term.as_str()).collect();
        assert_eq!(terms, vec!["adios", "hola"]);
    }

    #[test]
    fn empty_language_has_no_deck() {
        let fixture = StoreFixture::new();
        assert!(matches!(
            open(&fixture.store, &fixture.language),
            Err(LexiError::EmptySet)
        ));
    }

    #[test]
    fn tag_persists_and_advances() {
        let mut fixture = StoreFixture::new().with_word("hola").with_word("adios");
        let language = fixture.language.clone();
        let mut deck = open(&fixture.store, &language).unwrap();

        let result = tag(&mut fixture.store, &mut deck, Difficulty::Hard).unwrap();

        assert_eq!(result.affected_words[0].term, "adios");
        assert_eq!(fixture.word("adios").difficulty, Some(Difficulty::Hard));
        assert_eq!(deck.current().term, "hola");
    }

    #[test]
    fn rejected_tag_stays_put() {
        let mut fixture = StoreFixture::new().with_word("hola").with_word("adios");
        let language = fixture.language.clone();
        let mut deck = open(&fixture.store, &language).unwrap();
        fixture.store.set_write_failure(Some("offline".into()));

        let err = tag(&mut fixture.store, &mut deck, Difficulty::Easy).unwrap_err();

        assert!(matches!(err, LexiError::WriteFailed(_)));
        assert_eq!(deck.position(), 0);
        assert_eq!(fixture.word("adios").difficulty, None);
    }

    #[test]
    fn refresh_drops_deleted_word() {
        let mut fixture = StoreFixture::new().with_word("hola").with_word("adios");
        let language = fixture.language.clone();
        let mut deck = open(&fixture.store, &language).unwrap();
        let id = fixture.word("adios").id;
        fixture.store.delete_item(&id).unwrap();

        assert!(matches!(
            tag(&mut fixture.store, &mut deck, Difficulty::Easy),
            Err(LexiError::NotFound(_))
        ));
        refresh(&fixture.store, &mut deck, &language).unwrap();
        assert_eq!(deck.len(), 1);
        assert_eq!(deck.current().term, "hola");
    }
}
