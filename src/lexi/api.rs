//! # API Facade
//!
//! The API layer is a thin facade over the command layer and the single entry
//! point for lexi operations, whatever UI sits on top.
//!
//! The facade dispatches to `commands/*.rs`, turns user supplied strings
//! (display indexes, practice modes) into typed values and returns structured
//! results. It does no printing and holds no business logic.
//!
//! `LexiApi<S: DataStore>` is generic over the storage backend:
//! - Production: `LexiApi<FileStore>`
//! - Testing: `LexiApi<InMemoryStore>`
//!
//! Practice sessions and flashcard decks are owned by the caller. The facade
//! only performs the store round trip for each action, so an interactive UI
//! keeps its own session between keystrokes.

use crate::commands;
use crate::commands::practice::PracticeRequest;
use crate::config::LexiConfig;
use crate::error::Result;
use crate::index::DisplayIndex;
use crate::model::{Difficulty, Language};
use crate::notebook::NotebookKind;
use crate::review::{FlashcardDeck, ReviewSession, SessionState};
use crate::store::DataStore;
use std::str::FromStr;

pub struct LexiApi<S: DataStore> {
    store: S,
    paths: commands::LexiPaths,
}

impl<S: DataStore> LexiApi<S> {
    pub fn new(store: S, paths: commands::LexiPaths) -> Self {
        Self { store, paths }
    }

    pub fn paths(&self) -> &commands::LexiPaths {
        &self.paths
    }

    pub fn config(&self) -> Result<LexiConfig> {
        LexiConfig::load(&self.paths.data_dir)
    }

    /// The language commands act on: `index` when given, otherwise the
    /// configured current language.
    pub fn language(&self, index: Option<&str>) -> Result<Language> {
        match index {
            Some(index) => commands::languages::resolve(&self.store, parse_index(index)?),
            None => commands::languages::current(&self.store, &self.config()?),
        }
    }

    // --- languages ---

    pub fn add_language(&mut self, new: commands::NewLanguage) -> Result<commands::CmdResult> {
        commands::languages::add(&mut self.store, new)
    }

    pub fn list_languages(&self) -> Result<commands::CmdResult> {
        commands::languages::list(&self.store)
    }

    pub fn use_language(&self, index: &str) -> Result<commands::CmdResult> {
        commands::languages::select(&self.store, &self.paths, parse_index(index)?)
    }

    // --- categories ---

    pub fn add_category(
        &mut self,
        language: &Language,
        name: &str,
        color: Option<String>,
    ) -> Result<commands::CmdResult> {
        commands::categories::add(&mut self.store, language, name, color)
    }

    pub fn list_categories(&self, language: &Language) -> Result<commands::CmdResult> {
        commands::categories::list(&self.store, language)
    }

    pub fn rename_category(
        &mut self,
        language: &Language,
        index: &str,
        name: &str,
    ) -> Result<commands::CmdResult> {
        commands::categories::rename(&mut self.store, language, parse_index(index)?, name)
    }

    pub fn delete_category(&mut self, language: &Language, index: &str) -> Result<commands::CmdResult> {
        commands::categories::delete(&mut self.store, language, parse_index(index)?)
    }

    // --- words ---

    pub fn add_word(
        &mut self,
        language: &Language,
        mut word: commands::NewWord,
        category: Option<&str>,
    ) -> Result<commands::CmdResult> {
        word.category = category.map(parse_index).transpose()?;
        commands::words::add(&mut self.store, language, word)
    }

    pub fn list_words(&self, language: &Language, search: Option<&str>) -> Result<commands::CmdResult> {
        commands::words::list(&self.store, language, search)
    }

    pub fn delete_word(&mut self, language: &Language, index: &str) -> Result<commands::CmdResult> {
        commands::words::delete(&mut self.store, language, parse_index(index)?)
    }

    // --- practice ---

    /// Starts a practice session from the `--mode` / `--category` flags.
    pub fn start_practice(
        &self,
        language: &Language,
        mode: Option<&str>,
        category: Option<&str>,
    ) -> Result<ReviewSession> {
        let category = category.map(parse_index).transpose()?;
        let request = PracticeRequest::from_flags(mode, category, self.config()?.default_mode)?;
        let mode = commands::practice::selection_mode(&self.store, language, request)?;
        commands::practice::start(&self.store, language, mode)
    }

    pub fn mark_forgotten(&mut self, session: &mut ReviewSession) -> Result<commands::CmdResult> {
        commands::practice::mark_forgotten(&mut self.store, session)
    }

    pub fn mark_learned(&mut self, session: &mut ReviewSession) -> Result<commands::CmdResult> {
        commands::practice::mark_learned(&mut self.store, session)
    }

    pub fn refresh_practice(&self, session: &mut ReviewSession) -> Result<SessionState> {
        commands::practice::refresh(&self.store, session)
    }

    // --- flashcards ---

    pub fn open_flashcards(&self, language: &Language) -> Result<FlashcardDeck> {
        commands::flashcards::open(&self.store, language)
    }

    pub fn tag_flashcard(
        &mut self,
        deck: &mut FlashcardDeck,
        difficulty: Difficulty,
    ) -> Result<commands::CmdResult> {
        commands::flashcards::tag(&mut self.store, deck, difficulty)
    }

    pub fn refresh_flashcards(&self, deck: &mut FlashcardDeck, language: &Language) -> Result<()> {
        commands::flashcards::refresh(&self.store, deck, language)
    }

    // --- notebooks ---

    pub fn add_movie(&mut self, language: &Language, movie: commands::NewMovie) -> Result<commands::CmdResult> {
        commands::notebook::add_movie(&mut self.store, language, movie)
    }

    pub fn add_book(&mut self, language: &Language, book: commands::NewBook) -> Result<commands::CmdResult> {
        commands::notebook::add_book(&mut self.store, language, book)
    }

    pub fn add_song(&mut self, language: &Language, song: commands::NewSong) -> Result<commands::CmdResult> {
        commands::notebook::add_song(&mut self.store, language, song)
    }

    pub fn add_grammar_rule(
        &mut self,
        language: &Language,
        title: &str,
        content: &str,
    ) -> Result<commands::CmdResult> {
        commands::notebook::add_rule(&mut self.store, language, title, content)
    }

    pub fn add_grammar_exercise(
        &mut self,
        language: &Language,
        rule: &str,
        exercise: commands::NewExercise,
    ) -> Result<commands::CmdResult> {
        commands::notebook::add_exercise(&mut self.store, language, parse_index(rule)?, exercise)
    }

    pub fn add_speaking_topic(&mut self, language: &Language, title: &str) -> Result<commands::CmdResult> {
        commands::notebook::add_topic(&mut self.store, language, title)
    }

    pub fn add_speaking_question(
        &mut self,
        language: &Language,
        topic: &str,
        question: &str,
    ) -> Result<commands::CmdResult> {
        commands::notebook::add_question(&mut self.store, language, parse_index(topic)?, question)
    }

    pub fn list_notebook(&self, language: &Language, kind: NotebookKind) -> Result<commands::CmdResult> {
        commands::notebook::list(&self.store, language, kind)
    }

    // --- config ---

    pub fn configure(&self, action: ConfigAction) -> Result<commands::CmdResult> {
        commands::config::run(&self.paths, action)
    }
}

fn parse_index(input: &str) -> Result<DisplayIndex> {
    DisplayIndex::from_str(input)
}

pub use crate::commands::config::ConfigAction;
pub use commands::{
    CmdMessage, CmdResult, LexiPaths, MessageLevel, NewBook, NewExercise, NewLanguage, NewMovie,
    NewSong, NewWord,
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LexiError;
    use crate::review::SelectionMode;
    use crate::store::memory::InMemoryStore;

    fn make_api() -> (tempfile::TempDir, LexiApi<InMemoryStore>) {
        let dir = tempfile::tempdir().unwrap();
        let paths = LexiPaths {
            data_dir: dir.path().to_path_buf(),
        };
        (dir, LexiApi::new(InMemoryStore::new(), paths))
    }

    fn with_language(api: &mut LexiApi<InMemoryStore>, name: &str) -> Language {
        let result = api
            .add_language(NewLanguage {
                name: name.into(),
                ..NewLanguage::default()
            })
            .unwrap();
        result.languages[0].clone()
    }

    fn word(term: &str) -> NewWord {
        NewWord {
            term: term.into(),
            definition: format!("{} def", term),
            ..NewWord::default()
        }
    }

    #[test]
    fn language_defaults_to_first_and_follows_use() {
        let (_dir, mut api) = make_api();
        assert!(matches!(api.language(None), Err(LexiError::NoLanguageSelected)));

        let spanish = with_language(&mut api, "Spanish");
        assert_eq!(api.language(None).unwrap().id, spanish.id);

        let french = with_language(&mut api, "French");
        let listed = api.list_languages().unwrap();
        let position = listed.languages.iter().position(|l| l.id == french.id).unwrap();
        let index = (position + 1).to_string();
        assert_eq!(api.language(Some(&index)).unwrap().id, french.id);

        api.use_language(&index).unwrap();
        assert_eq!(api.language(None).unwrap().id, french.id);
    }

    #[test]
    fn indexes_are_parsed() {
        let (_dir, mut api) = make_api();
        let language = with_language(&mut api, "Spanish");
        assert!(matches!(
            api.delete_word(&language, "first"),
            Err(LexiError::Api(_))
        ));
        assert!(matches!(
            api.add_word(&language, word("gato"), Some("0")),
            Err(LexiError::Api(_))
        ));
    }

    #[test]
    fn word_with_category_index() {
        let (_dir, mut api) = make_api();
        let language = with_language(&mut api, "Spanish");
        api.add_category(&language, "Animals", None).unwrap();

        let result = api.add_word(&language, word("gato"), Some("1")).unwrap();
        let listed = api.list_words(&language, None).unwrap();

        assert!(result.affected_words[0].category_id.is_some());
        assert_eq!(listed.listed_words[0].category_label(), "Animals");
    }

    #[test]
    fn practice_uses_configured_default_mode() {
        let (_dir, mut api) = make_api();
        let language = with_language(&mut api, "Spanish");
        api.add_word(&language, word("gato"), None).unwrap();

        let session = api.start_practice(&language, None, None).unwrap();
        assert_eq!(session.mode(), SelectionMode::All);

        api.configure(ConfigAction::Set("default-mode".into(), "forgot".into()))
            .unwrap();
        assert!(matches!(
            api.start_practice(&language, None, None),
            Err(LexiError::EmptySet)
        ));
    }

    #[test]
    fn practice_round_trip_through_store() {
        let (_dir, mut api) = make_api();
        let language = with_language(&mut api, "Spanish");
        api.add_word(&language, word("gato"), None).unwrap();

        let mut session = api.start_practice(&language, Some("all"), None).unwrap();
        api.mark_forgotten(&mut session).unwrap();
        api.mark_learned(&mut session).unwrap();
        assert_eq!(session.state(), SessionState::Empty);

        let listed = api.list_words(&language, None).unwrap();
        assert!(listed.listed_words[0].word.learned);
        assert_eq!(listed.listed_words[0].word.forgot_count, 1);

        let mut deck = api.open_flashcards(&language).unwrap();
        api.tag_flashcard(&mut deck, Difficulty::Easy).unwrap();
        assert_eq!(deck.cards()[0].difficulty, Some(Difficulty::Easy));
    }

    #[test]
    fn practice_by_category_index() {
        let (_dir, mut api) = make_api();
        let language = with_language(&mut api, "Spanish");
        api.add_category(&language, "Food", None).unwrap();
        api.add_word(&language, word("pan"), Some("1")).unwrap();
        api.add_word(&language, word("gato"), None).unwrap();

        let session = api.start_practice(&language, None, Some("1")).unwrap();
        assert_eq!(session.len(), 1);
        assert_eq!(session.current().unwrap().term, "pan");
    }

    #[test]
    fn notebook_indexes_are_parsed() {
        let (_dir, mut api) = make_api();
        let language = with_language(&mut api, "Spanish");
        api.add_grammar_rule(&language, "Ser", "Identity").unwrap();
        let exercise = NewExercise {
            question: "Ella ___ médica.".into(),
            answer: "es".into(),
            explanation: None,
        };

        assert!(matches!(
            api.add_grammar_exercise(&language, "one", exercise.clone()),
            Err(LexiError::Api(_))
        ));
        api.add_grammar_exercise(&language, "1", exercise).unwrap();

        api.add_speaking_topic(&language, "Viajes").unwrap();
        api.add_speaking_question(&language, "1", "¿Adónde vas?").unwrap();

        let rules = api.list_notebook(&language, NotebookKind::Grammar).unwrap();
        assert_eq!(rules.entries.len(), 1);
        let movies = api.list_notebook(&language, NotebookKind::Movie).unwrap();
        assert!(movies.entries.is_empty());
    }
}
