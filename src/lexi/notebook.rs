//! Study notebooks kept next to the vocabulary of a language.
//!
//! Each language has five notebooks: movies, books, songs, grammar rules and
//! speaking topics. They are plain records with no review progress. Grammar
//! rules carry their exercises and speaking topics their questions, so a
//! notebook entry is always read and written as a whole.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotebookKind {
    Movie,
    Book,
    Song,
    Grammar,
    Speaking,
}

impl NotebookKind {
    /// Lowercase plural, as used in listings.
    pub fn plural(&self) -> &'static str {
        match self {
            NotebookKind::Movie => "movies",
            NotebookKind::Book => "books",
            NotebookKind::Song => "songs",
            NotebookKind::Grammar => "grammar rules",
            NotebookKind::Speaking => "speaking topics",
        }
    }
}

impl fmt::Display for NotebookKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NotebookKind::Movie => "Movie",
            NotebookKind::Book => "Book",
            NotebookKind::Song => "Song",
            NotebookKind::Grammar => "Grammar rule",
            NotebookKind::Speaking => "Speaking topic",
        };
        f.write_str(name)
    }
}

/// Star rating from 1 to 5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Rating(u8);

impl Rating {
    pub const MAX: u8 = 5;

    pub fn stars(&self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Rating {
    type Error = String;

    fn try_from(stars: u8) -> Result<Self, Self::Error> {
        if (1..=Self::MAX).contains(&stars) {
            Ok(Rating(stars))
        } else {
            Err(format!("Rating must be between 1 and {}", Self::MAX))
        }
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> u8 {
        rating.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movie {
    pub title: String,
    pub review: Option<String>,
    pub summary: Option<String>,
    pub rating: Option<Rating>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub title: String,
    pub author: Option<String>,
    pub review: Option<String>,
    pub summary: Option<String>,
    pub rating: Option<Rating>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Song {
    pub title: String,
    pub artist: Option<String>,
    pub lyrics: Option<String>,
    pub translation: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrammarRule {
    pub title: String,
    pub content: String,
    /// Oldest first.
    #[serde(default)]
    pub exercises: Vec<GrammarExercise>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrammarExercise {
    pub id: Uuid,
    pub question: String,
    pub answer: String,
    pub explanation: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeakingTopic {
    pub title: String,
    /// Oldest first.
    #[serde(default)]
    pub questions: Vec<SpeakingQuestion>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeakingQuestion {
    pub id: Uuid,
    pub question: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum EntryBody {
    Movie(Movie),
    Book(Book),
    Song(Song),
    Grammar(GrammarRule),
    Speaking(SpeakingTopic),
}

/// One record in a language's notebook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotebookEntry {
    pub id: Uuid,
    pub language_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub body: EntryBody,
}

impl NotebookEntry {
    pub fn new(language_id: Uuid, body: EntryBody) -> Self {
        Self {
            id: Uuid::new_v4(),
            language_id,
            created_at: Utc::now(),
            body,
        }
    }

    pub fn kind(&self) -> NotebookKind {
        match self.body {
            EntryBody::Movie(_) => NotebookKind::Movie,
            EntryBody::Book(_) => NotebookKind::Book,
            EntryBody::Song(_) => NotebookKind::Song,
            EntryBody::Grammar(_) => NotebookKind::Grammar,
            EntryBody::Speaking(_) => NotebookKind::Speaking,
        }
    }

    pub fn title(&self) -> &str {
        match &self.body {
            EntryBody::Movie(m) => &m.title,
            EntryBody::Book(b) => &b.title,
            EntryBody::Song(s) => &s.title,
            EntryBody::Grammar(r) => &r.title,
            EntryBody::Speaking(t) => &t.title,
        }
    }
}
