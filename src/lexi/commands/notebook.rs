use crate::commands::helpers::{optional_text, ordered_entries, require_text};
use crate::commands::{CmdMessage, CmdResult};
use crate::error::{LexiError, Result};
use crate::index::DisplayIndex;
use crate::model::Language;
use crate::notebook::{
    Book, EntryBody, GrammarExercise, GrammarRule, Movie, NotebookEntry, NotebookKind, Rating,
    Song, SpeakingQuestion, SpeakingTopic,
};
use crate::store::DataStore;
use chrono::Utc;
use tracing::info;
use uuid::Uuid;

#[derive(Debug, Clone, Default)]
pub struct NewMovie {
    pub title: String,
    pub review: Option<String>,
    pub summary: Option<String>,
    pub rating: Option<u8>,
}

#[derive(Debug, Clone, Default)]
pub struct NewBook {
    pub title: String,
    pub author: Option<String>,
    pub review: Option<String>,
    pub summary: Option<String>,
    pub rating: Option<u8>,
}

#[derive(Debug, Clone, Default)]
pub struct NewSong {
    pub title: String,
    pub artist: Option<String>,
    pub lyrics: Option<String>,
    pub translation: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct NewExercise {
    pub question: String,
    pub answer: String,
    pub explanation: Option<String>,
}

fn rating(stars: Option<u8>) -> Result<Option<Rating>> {
    stars
        .map(Rating::try_from)
        .transpose()
        .map_err(LexiError::Validation)
}

pub fn add_movie<S: DataStore>(store: &mut S, language: &Language, new: NewMovie) -> Result<CmdResult> {
    let movie = Movie {
        title: require_text("Movie title", &new.title)?,
        review: optional_text(new.review),
        summary: optional_text(new.summary),
        rating: rating(new.rating)?,
    };
    add_entry(store, NotebookEntry::new(language.id, EntryBody::Movie(movie)))
}

pub fn add_book<S: DataStore>(store: &mut S, language: &Language, new: NewBook) -> Result<CmdResult> {
    let book = Book {
        title: require_text("Book title", &new.title)?,
        author: optional_text(new.author),
        review: optional_text(new.review),
        summary: optional_text(new.summary),
        rating: rating(new.rating)?,
    };
    add_entry(store, NotebookEntry::new(language.id, EntryBody::Book(book)))
}

pub fn add_song<S: DataStore>(store: &mut S, language: &Language, new: NewSong) -> Result<CmdResult> {
    let song = Song {
        title: require_text("Song title", &new.title)?,
        artist: optional_text(new.artist),
        lyrics: optional_text(new.lyrics),
        translation: optional_text(new.translation),
    };
    add_entry(store, NotebookEntry::new(language.id, EntryBody::Song(song)))
}

pub fn add_rule<S: DataStore>(
    store: &mut S,
    language: &Language,
    title: &str,
    content: &str,
) -> Result<CmdResult> {
    let rule = GrammarRule {
        title: require_text("Title", title)?,
        content: require_text("Content", content)?,
        exercises: Vec::new(),
    };
    add_entry(store, NotebookEntry::new(language.id, EntryBody::Grammar(rule)))
}

pub fn add_topic<S: DataStore>(store: &mut S, language: &Language, title: &str) -> Result<CmdResult> {
    let topic = SpeakingTopic {
        title: require_text("Topic title", title)?,
        questions: Vec::new(),
    };
    add_entry(store, NotebookEntry::new(language.id, EntryBody::Speaking(topic)))
}

fn add_entry<S: DataStore>(store: &mut S, entry: NotebookEntry) -> Result<CmdResult> {
    store.save_entry(&entry)?;
    info!(id = %entry.id, kind = ?entry.kind(), title = %entry.title(), "notebook entry added");

    let message = CmdMessage::success(format!("{} added: {}", entry.kind(), entry.title()));
    Ok(CmdResult::default()
        .with_entries(vec![entry])
        .with_message(message))
}

/// Adds an exercise to the grammar rule at `rule` in the rule listing.
pub fn add_exercise<S: DataStore>(
    store: &mut S,
    language: &Language,
    rule: DisplayIndex,
    new: NewExercise,
) -> Result<CmdResult> {
    let question = require_text("Question", &new.question)?;
    let answer = require_text("Answer", &new.answer)?;
    let mut entry = resolve(store, language, NotebookKind::Grammar, rule)?;
    let id = entry.id;
    let EntryBody::Grammar(target) = &mut entry.body else {
        return Err(LexiError::Store(format!("{} is not a grammar rule", id)));
    };
    target.exercises.push(GrammarExercise {
        id: Uuid::new_v4(),
        question,
        answer,
        explanation: optional_text(new.explanation),
        created_at: Utc::now(),
    });
    store.save_entry(&entry)?;
    info!(id = %entry.id, "grammar exercise added");

    let message = CmdMessage::success(format!("Exercise added to: {}", entry.title()));
    Ok(CmdResult::default()
        .with_entries(vec![entry])
        .with_message(message))
}

/// Adds a question to the speaking topic at `topic` in the topic listing.
pub fn add_question<S: DataStore>(
    store: &mut S,
    language: &Language,
    topic: DisplayIndex,
    question: &str,
) -> Result<CmdResult> {
    let question = require_text("Question", question)?;
    let mut entry = resolve(store, language, NotebookKind::Speaking, topic)?;
    let id = entry.id;
    let EntryBody::Speaking(target) = &mut entry.body else {
        return Err(LexiError::Store(format!("{} is not a speaking topic", id)));
    };
    target.questions.push(SpeakingQuestion {
        id: Uuid::new_v4(),
        question,
        created_at: Utc::now(),
    });
    store.save_entry(&entry)?;
    info!(id = %entry.id, "speaking question added");

    let message = CmdMessage::success(format!("Question added to: {}", entry.title()));
    Ok(CmdResult::default()
        .with_entries(vec![entry])
        .with_message(message))
}

/// Lists one notebook of the language, newest first.
pub fn list<S: DataStore>(store: &S, language: &Language, kind: NotebookKind) -> Result<CmdResult> {
    let entries = ordered_entries(store, &language.id, kind)?;
    let mut result = CmdResult::default().with_entries(entries);
    if result.entries.is_empty() {
        result.add_message(CmdMessage::info(format!("No {} yet.", kind.plural())));
    }
    Ok(result)
}

pub fn resolve<S: DataStore>(
    store: &S,
    language: &Language,
    kind: NotebookKind,
    index: DisplayIndex,
) -> Result<NotebookEntry> {
    let entries = ordered_entries(store, &language.id, kind)?;
    index.pick(&entries).cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::StoreFixture;

    fn titles(result: &CmdResult) -> Vec<&str> {
        result.entries.iter().map(|e| e.title()).collect()
    }

    #[test]
    fn movie_needs_title_and_valid_rating() {
        let mut fixture = StoreFixture::new();
        let language = fixture.language.clone();

        let err = add_movie(&mut fixture.store, &language, NewMovie::default()).unwrap_err();
        assert!(matches!(err, LexiError::Validation(ref m) if m == "Movie title is required"));

        let err = add_movie(
            &mut fixture.store,
            &language,
            NewMovie {
                title: "Roma".into(),
                rating: Some(7),
                ..NewMovie::default()
            },
        )
        .unwrap_err();
        assert!(matches!(err, LexiError::Validation(_)));
        assert_eq!(fixture.store.write_count(), 1); // the fixture's language
    }

    #[test]
    fn movie_is_stored_with_trimmed_fields() {
        let mut fixture = StoreFixture::new();
        let language = fixture.language.clone();

        let result = add_movie(
            &mut fixture.store,
            &language,
            NewMovie {
                title: " Roma ".into(),
                review: Some("  ".into()),
                summary: Some("Mexico City, 1971".into()),
                rating: Some(5),
            },
        )
        .unwrap();

        assert_eq!(result.messages[0].content, "Movie added: Roma");
        match &result.entries[0].body {
            EntryBody::Movie(movie) => {
                assert_eq!(movie.review, None);
                assert_eq!(movie.summary.as_deref(), Some("Mexico City, 1971"));
                assert_eq!(movie.rating.map(|r| r.stars()), Some(5));
            }
            other => panic!("unexpected entry: {:?}", other),
        }
    }

    #[test]
    fn notebooks_are_per_language_and_kind() {
        let mut fixture = StoreFixture::new();
        let spanish = fixture.language.clone();
        let french = Language::new("French".into());
        fixture.store.save_language(&french).unwrap();

        add_book(
            &mut fixture.store,
            &spanish,
            NewBook {
                title: "Cien años de soledad".into(),
                author: Some("García Márquez".into()),
                ..NewBook::default()
            },
        )
        .unwrap();
        add_song(
            &mut fixture.store,
            &spanish,
            NewSong {
                title: "La Bamba".into(),
                ..NewSong::default()
            },
        )
        .unwrap();

        let books = list(&fixture.store, &spanish, NotebookKind::Book).unwrap();
        assert_eq!(titles(&books), vec!["Cien años de soledad"]);

        let french_books = list(&fixture.store, &french, NotebookKind::Book).unwrap();
        assert!(french_books.entries.is_empty());
        assert_eq!(french_books.messages[0].content, "No books yet.");
    }

    #[test]
    fn list_is_newest_first() {
        let mut fixture = StoreFixture::new();
        let language = fixture.language.clone();
        for title in ["Viajes", "Comida"] {
            add_topic(&mut fixture.store, &language, title).unwrap();
        }

        // Same-instant timestamps are possible; pin the order explicitly.
        let mut entries = fixture
            .store
            .list_entries(&language.id, NotebookKind::Speaking)
            .unwrap();
        entries.sort_by_key(|e| e.title().to_string());
        entries[0].created_at = Utc::now() + chrono::Duration::minutes(1);
        fixture.store.save_entry(&entries[0]).unwrap();

        let listed = list(&fixture.store, &language, NotebookKind::Speaking).unwrap();
        assert_eq!(titles(&listed), vec!["Comida", "Viajes"]);
    }

    #[test]
    fn grammar_rule_collects_exercises() {
        let mut fixture = StoreFixture::new();
        let language = fixture.language.clone();

        let err = add_rule(&mut fixture.store, &language, "Ser vs estar", " ").unwrap_err();
        assert!(matches!(err, LexiError::Validation(ref m) if m == "Content is required"));

        add_rule(
            &mut fixture.store,
            &language,
            "Ser vs estar",
            "Ser for identity, estar for states.",
        )
        .unwrap();
        for (question, answer) in [("Yo ___ cansado.", "estoy"), ("Ella ___ médica.", "es")] {
            add_exercise(
                &mut fixture.store,
                &language,
                DisplayIndex(1),
                NewExercise {
                    question: question.into(),
                    answer: answer.into(),
                    explanation: None,
                },
            )
            .unwrap();
        }

        let listed = list(&fixture.store, &language, NotebookKind::Grammar).unwrap();
        match &listed.entries[0].body {
            EntryBody::Grammar(rule) => {
                let answers: Vec<_> = rule.exercises.iter().map(|e| e.answer.as_str()).collect();
                assert_eq!(answers, vec!["estoy", "es"]);
            }
            other => panic!("unexpected entry: {:?}", other),
        }
    }

    #[test]
    fn exercise_needs_answer_and_existing_rule() {
        let mut fixture = StoreFixture::new();
        let language = fixture.language.clone();
        let exercise = NewExercise {
            question: "Yo ___ cansado.".into(),
            answer: "estoy".into(),
            explanation: None,
        };

        let err = add_exercise(&mut fixture.store, &language, DisplayIndex(1), exercise.clone())
            .unwrap_err();
        assert!(matches!(err, LexiError::Api(ref m) if m == "Index 1 not found"));

        add_rule(&mut fixture.store, &language, "Ser", "Identity").unwrap();
        let err = add_exercise(
            &mut fixture.store,
            &language,
            DisplayIndex(1),
            NewExercise {
                answer: "".into(),
                ..exercise
            },
        )
        .unwrap_err();
        assert!(matches!(err, LexiError::Validation(ref m) if m == "Answer is required"));
    }

    #[test]
    fn speaking_topic_collects_questions() {
        let mut fixture = StoreFixture::new();
        let language = fixture.language.clone();
        add_topic(&mut fixture.store, &language, "Viajes").unwrap();

        let result = add_question(
            &mut fixture.store,
            &language,
            DisplayIndex(1),
            "¿Adónde fuiste el verano pasado?",
        )
        .unwrap();
        assert_eq!(result.messages[0].content, "Question added to: Viajes");

        let stored = resolve(&fixture.store, &language, NotebookKind::Speaking, DisplayIndex(1))
            .unwrap();
        match stored.body {
            EntryBody::Speaking(topic) => assert_eq!(topic.questions.len(), 1),
            other => panic!("unexpected entry: {:?}", other),
        }

        assert!(matches!(
            add_question(&mut fixture.store, &language, DisplayIndex(1), "  "),
            Err(LexiError::Validation(_))
        ));
    }

    #[test]
    fn rejected_write_adds_nothing() {
        let mut fixture = StoreFixture::new();
        let language = fixture.language.clone();
        fixture.store.set_write_failure(Some("offline".into()));

        let err = add_topic(&mut fixture.store, &language, "Viajes").unwrap_err();
        assert!(matches!(err, LexiError::WriteFailed(_)));

        fixture.store.set_write_failure(None);
        let listed = list(&fixture.store, &language, NotebookKind::Speaking).unwrap();
        assert!(listed.entries.is_empty());
    }
}
