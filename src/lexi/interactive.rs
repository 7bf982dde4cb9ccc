//! Line-driven review loops.
//!
//! Each line read from the input is one key. Errors are printed and the loop
//! carries on; only a failure to read input ends it early.

use crate::print::{print_card, print_flashcard, print_messages, print_session_error};
use colored::*;
use lexi::api::{CmdResult, LexiApi};
use lexi::commands::helpers::count_of;
use lexi::error::{LexiError, Result};
use lexi::model::{Difficulty, Language};
use lexi::review::{FlashcardDeck, ReviewSession, SelectionMode, SessionState};
use lexi::store::DataStore;
use std::io::BufRead;
use tracing::debug;

enum Key {
    Reveal,
    Next,
    Previous,
    Forgot,
    Learned,
    Tag(Difficulty),
    Quit,
    Unknown,
}

fn read_key(line: &str) -> Option<Key> {
    let key = match line.trim().to_ascii_lowercase().as_str() {
        "" => return None,
        "r" => Key::Reveal,
        "n" => Key::Next,
        "p" => Key::Previous,
        "f" => Key::Forgot,
        "l" => Key::Learned,
        "e" => Key::Tag(Difficulty::Easy),
        "m" => Key::Tag(Difficulty::Medium),
        "h" => Key::Tag(Difficulty::Hard),
        "q" => Key::Quit,
        _ => Key::Unknown,
    };
    Some(key)
}

fn mode_label(mode: SelectionMode) -> &'static str {
    match mode {
        SelectionMode::All => "all",
        SelectionMode::Category(_) => "category",
        SelectionMode::Forgot => "forgot",
    }
}

pub fn practice<S: DataStore, R: BufRead>(
    api: &mut LexiApi<S>,
    mut session: ReviewSession,
    input: R,
) -> Result<()> {
    println!(
        "{}",
        format!(
            "Practicing {} ({})",
            count_of(session.len(), "word"),
            mode_label(session.mode())
        )
        .bold()
    );
    print_card(&session);

    for line in input.lines() {
        let outcome = match read_key(&line?) {
            None => continue,
            Some(Key::Quit) => break,
            Some(Key::Reveal) => session.reveal().map(|_| CmdResult::default()),
            Some(Key::Next) => session.next().map(|_| CmdResult::default()),
            Some(Key::Previous) => session.previous().map(|_| CmdResult::default()),
            Some(Key::Forgot) => api.mark_forgotten(&mut session),
            Some(Key::Learned) => api.mark_learned(&mut session),
            Some(Key::Tag(_)) | Some(Key::Unknown) => {
                println!("{}", "Unknown key.".dimmed());
                continue;
            }
        };

        match outcome {
            Ok(result) => print_messages(&result.messages),
            Err(LexiError::NotFound(id)) => {
                debug!(%id, "word vanished, refreshing session");
                println!("{}", "That word was removed. Reloading.".yellow());
                if let Err(e) = api.refresh_practice(&mut session) {
                    print_session_error(&e);
                }
            }
            Err(e) => print_session_error(&e),
        }

        if session.state() == SessionState::Empty {
            println!("{}", "Session complete. Start another with `lexi practice`.".green());
            return Ok(());
        }
        print_card(&session);
    }
    Ok(())
}

pub fn flashcards<S: DataStore, R: BufRead>(
    api: &mut LexiApi<S>,
    language: &Language,
    mut deck: FlashcardDeck,
    input: R,
) -> Result<()> {
    println!("{}", count_of(deck.len(), "flashcard").bold());
    print_flashcard(&deck);

    for line in input.lines() {
        let outcome = match read_key(&line?) {
            None => continue,
            Some(Key::Quit) => break,
            Some(Key::Reveal) => {
                deck.flip();
                Ok(CmdResult::default())
            }
            Some(Key::Next) => deck.next().map(|_| CmdResult::default()),
            Some(Key::Previous) => deck.previous().map(|_| CmdResult::default()),
            Some(Key::Tag(difficulty)) => api.tag_flashcard(&mut deck, difficulty),
            Some(Key::Forgot) | Some(Key::Learned) | Some(Key::Unknown) => {
                println!("{}", "Unknown key.".dimmed());
                continue;
            }
        };

        match outcome {
            Ok(result) => print_messages(&result.messages),
            Err(LexiError::NotFound(id)) => {
                debug!(%id, "word vanished, refreshing deck");
                println!("{}", "That word was removed. Reloading.".yellow());
                match api.refresh_flashcards(&mut deck, language) {
                    Ok(()) => {}
                    Err(LexiError::EmptySet) => {
                        println!("{}", "No words left.".yellow());
                        return Ok(());
                    }
                    Err(e) => print_session_error(&e),
                }
            }
            Err(e) => print_session_error(&e),
        }
        print_flashcard(&deck);
    }
    Ok(())
}
