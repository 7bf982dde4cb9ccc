use crate::config::LexiConfig;
use crate::index::DisplayWord;
use crate::model::{Category, Language, VocabularyItem};
use crate::notebook::NotebookEntry;
use std::path::PathBuf;

pub mod categories;
pub mod config;
pub mod flashcards;
pub mod helpers;
pub mod languages;
pub mod notebook;
pub mod practice;
pub mod words;

pub use languages::NewLanguage;
pub use notebook::{NewBook, NewExercise, NewMovie, NewSong};
pub use words::NewWord;

#[derive(Debug, Clone)]
pub struct LexiPaths {
    pub data_dir: PathBuf,
}

#[derive(Debug, Clone)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub languages: Vec<Language>,
    pub categories: Vec<Category>,
    pub listed_words: Vec<DisplayWord>,
    pub affected_words: Vec<VocabularyItem>,
    pub entries: Vec<NotebookEntry>,
    pub config: Option<LexiConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_languages(mut self, languages: Vec<Language>) -> Self {
        self.languages = languages;
        self
    }

    pub fn with_categories(mut self, categories: Vec<Category>) -> Self {
        self.categories = categories;
        self
    }

    pub fn with_listed_words(mut self, words: Vec<DisplayWord>) -> Self {
        self.listed_words = words;
        self
    }

    pub fn with_affected_word(mut self, word: VocabularyItem) -> Self {
        self.affected_words.push(word);
        self
    }

    pub fn with_entries(mut self, entries: Vec<NotebookEntry>) -> Self {
        self.entries = entries;
        self
    }

    pub fn with_config(mut self, config: LexiConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn with_message(mut self, message: CmdMessage) -> Self {
        self.messages.push(message);
        self
    }
}
