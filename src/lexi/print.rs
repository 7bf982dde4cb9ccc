use chrono::{DateTime, Utc};
use colored::*;
use lexi::api::{CmdMessage, MessageLevel};
use lexi::commands::helpers::count_of;
use lexi::error::LexiError;
use lexi::index::DisplayWord;
use lexi::model::{Category, Language, VocabularyItem};
use lexi::notebook::{EntryBody, NotebookEntry, Rating};
use lexi::review::{FlashcardDeck, ReviewSession, SessionState};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};
use uuid::Uuid;

const LINE_WIDTH: usize = 100;
const TIME_WIDTH: usize = 14;
const CATEGORY_WIDTH: usize = 18;
const LEARNED_MARKER: &str = "✓";
const CURRENT_MARKER: &str = "*";
const DETAIL_INDENT: &str = "      ";

pub fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

/// Errors inside an interactive session; the session keeps going.
pub fn print_session_error(err: &LexiError) {
    if err.is_recoverable() {
        eprintln!("{}", err.to_string().yellow());
    } else {
        eprintln!("{}", format!("Error: {}", err).red());
    }
}

pub fn print_languages(languages: &[Language], current: Option<Uuid>) {
    if languages.is_empty() {
        println!("No languages yet. Add one with `lexi language add <name>`.");
        return;
    }
    for (n, language) in languages.iter().enumerate() {
        let marker = if Some(language.id) == current {
            CURRENT_MARKER
        } else {
            " "
        };
        let role = language
            .role
            .map(|r| format!(" ({})", r))
            .unwrap_or_default();
        let line = format!("{} {}. {}{}", marker, n + 1, language.label(), role);
        if Some(language.id) == current {
            println!("{}", line.bold());
        } else {
            println!("{}", line);
        }
    }
}

pub fn print_categories(categories: &[Category]) {
    for (n, category) in categories.iter().enumerate() {
        let color = category
            .color
            .as_deref()
            .map(|c| format!(" [{}]", c))
            .unwrap_or_default();
        println!("{}{}{}", format!("{:>4}. ", n + 1).yellow(), category.name, color.dimmed());
    }
}

pub fn print_words(words: &[DisplayWord]) {
    let now = Utc::now();
    for dw in words {
        let line = word_line(dw, now);
        if dw.word.learned {
            println!("{}", line.dimmed());
        } else if dw.word.is_forgotten() {
            println!("{}", line.yellow());
        } else {
            println!("{}", line);
        }
    }
}

/// One dictionary row: index, term and definition, category, age.
pub fn word_line(dw: &DisplayWord, now: DateTime<Utc>) -> String {
    let idx_str = format!("{:>4}. ", dw.index.0);
    let marker = if dw.word.learned {
        format!("{} ", LEARNED_MARKER)
    } else {
        "  ".to_string()
    };
    let category = truncate_to_width(dw.category_label(), CATEGORY_WIDTH);
    let category_padding = CATEGORY_WIDTH.saturating_sub(category.width());
    let time_ago = format_time_ago(dw.word.created_at, now);

    let fixed_width = idx_str.width() + marker.width() + CATEGORY_WIDTH + TIME_WIDTH + 1;
    let available = LINE_WIDTH.saturating_sub(fixed_width);
    let text = truncate_to_width(
        &format!("{} · {}", dw.word.term, dw.word.definition),
        available,
    );
    let padding = available.saturating_sub(text.width());

    format!(
        "{}{}{}{} {}{}{}",
        idx_str,
        marker,
        text,
        " ".repeat(padding),
        category,
        " ".repeat(category_padding),
        time_ago
    )
}

/// One notebook listing, numbered for `exercise` / `question` commands.
pub fn print_entries(entries: &[NotebookEntry]) {
    for (n, entry) in entries.iter().enumerate() {
        let idx = format!("{:>4}. ", n + 1).yellow();
        match &entry.body {
            EntryBody::Movie(movie) => {
                println!("{}{}{}", idx, movie.title.bold(), stars(movie.rating));
                print_detail(movie.summary.as_deref());
                print_detail(movie.review.as_deref());
            }
            EntryBody::Book(book) => {
                let author = book
                    .author
                    .as_deref()
                    .map(|a| format!(" by {}", a))
                    .unwrap_or_default();
                println!("{}{}{}{}", idx, book.title.bold(), author, stars(book.rating));
                print_detail(book.summary.as_deref());
                print_detail(book.review.as_deref());
            }
            EntryBody::Song(song) => {
                let artist = song
                    .artist
                    .as_deref()
                    .map(|a| format!(" · {}", a))
                    .unwrap_or_default();
                println!("{}{}{}", idx, song.title.bold(), artist);
                print_detail(song.lyrics.as_deref());
                if let Some(translation) = &song.translation {
                    println!("{}{}", DETAIL_INDENT, "translation:".dimmed());
                    print_detail(Some(translation));
                }
            }
            EntryBody::Grammar(rule) => {
                println!("{}{}", idx, rule.title.bold());
                print_detail(Some(&rule.content));
                for exercise in &rule.exercises {
                    println!(
                        "{}- {} {}",
                        DETAIL_INDENT,
                        exercise.question,
                        format!("→ {}", exercise.answer).green()
                    );
                    if let Some(explanation) = &exercise.explanation {
                        println!("{}  {}", DETAIL_INDENT, explanation.dimmed());
                    }
                }
            }
            EntryBody::Speaking(topic) => {
                println!("{}{}", idx, topic.title.bold());
                for question in &topic.questions {
                    println!("{}- {}", DETAIL_INDENT, question.question);
                }
            }
        }
    }
}

fn print_detail(text: Option<&str>) {
    for line in text.unwrap_or_default().lines() {
        println!("{}{}", DETAIL_INDENT, line.dimmed());
    }
}

fn stars(rating: Option<Rating>) -> String {
    rating
        .map(|r| {
            let filled = r.stars() as usize;
            let empty = (Rating::MAX - r.stars()) as usize;
            format!("  {}{}", "★".repeat(filled), "☆".repeat(empty))
        })
        .unwrap_or_default()
}

pub fn print_card(session: &ReviewSession) {
    let Ok(item) = session.current() else {
        return;
    };
    let (index, revealed) = match session.state() {
        SessionState::Presenting { index, revealed } => (index, revealed),
        SessionState::Empty => return,
    };
    println!();
    println!(
        "{}",
        format!("Card {} of {}", index + 1, session.len()).dimmed()
    );
    print_face(item, revealed);
    if item.forgot_count > 0 {
        let times = count_of(item.forgot_count as usize, "time");
        println!("{}", format!("  forgotten {}", times).dimmed());
    }
    println!(
        "{}",
        "[r]eveal [n]ext [p]revious [f]orgot [l]earned [q]uit".dimmed()
    );
}

pub fn print_flashcard(deck: &FlashcardDeck) {
    let item = deck.current();
    println!();
    println!(
        "{}",
        format!("Card {} of {}", deck.position() + 1, deck.len()).dimmed()
    );
    print_face(item, deck.is_flipped());
    if let Some(difficulty) = item.difficulty {
        println!("{}", format!("  difficulty: {}", difficulty).dimmed());
    }
    println!(
        "{}",
        "[r] flip [n]ext [p]revious [e]asy [m]edium [h]ard [q]uit".dimmed()
    );
}

fn print_face(item: &VocabularyItem, revealed: bool) {
    println!("  {}", item.term.bold());
    if !revealed {
        return;
    }
    println!("  {}", item.definition.green());
    if let Some(example) = &item.example_sentence {
        println!("  {}", format!("\"{}\"", example).italic());
    }
    if let Some(url) = &item.image_url {
        println!("  {}", url.dimmed());
    }
}

pub fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }
    result
}

fn format_time_ago(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let duration = now.signed_duration_since(timestamp);
    let formatter = timeago::Formatter::new();
    let time_str = formatter.convert(duration.to_std().unwrap_or_default());
    format!("{:>width$}", time_str, width = TIME_WIDTH)
}
