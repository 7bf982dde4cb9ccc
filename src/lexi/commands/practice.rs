use crate::commands::categories;
use crate::commands::helpers::count_of;
use crate::commands::{CmdMessage, CmdResult};
use crate::config::DefaultMode;
use crate::error::{LexiError, Result};
use crate::index::DisplayIndex;
use crate::model::{Language, FORGOT_THRESHOLD};
use crate::review::selection::{self, practice_order};
use crate::review::{Completion, ReviewAction, ReviewSession, SelectionMode, SessionState, WriteTicket};
use crate::store::{DataStore, ItemQuery};
use tracing::info;

/// How the user asked to pick a practice set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PracticeRequest {
    All,
    Forgot,
    Category(DisplayIndex),
}

impl PracticeRequest {
    /// Reads the `--mode` / `--category` pair, falling back to `default`.
    ///
    /// A category index alone implies category mode.
    pub fn from_flags(
        mode: Option<&str>,
        category: Option<DisplayIndex>,
        default: DefaultMode,
    ) -> Result<Self> {
        let mode = mode.map(|m| m.trim().to_ascii_lowercase());
        match (mode.as_deref(), category) {
            (None, Some(index)) | (Some("category"), Some(index)) => Ok(Self::Category(index)),
            (Some("category"), None) => Err(LexiError::Validation(
                "category mode needs --category <index>".to_string(),
            )),
            (Some(_), Some(_)) => Err(LexiError::Validation(
                "--category only works with category mode".to_string(),
            )),
            (Some("all"), None) => Ok(Self::All),
            (Some("forgot"), None) => Ok(Self::Forgot),
            (Some(other), None) => Err(LexiError::Validation(format!(
                "unknown practice mode '{}' (use all, category or forgot)",
                other
            ))),
            (None, None) => Ok(match default {
                DefaultMode::All => Self::All,
                DefaultMode::Forgot => Self::Forgot,
            }),
        }
    }
}

pub fn selection_mode<S: DataStore>(
    store: &S,
    language: &Language,
    request: PracticeRequest,
) -> Result<SelectionMode> {
    Ok(match request {
        PracticeRequest::All => SelectionMode::All,
        PracticeRequest::Forgot => SelectionMode::Forgot,
        PracticeRequest::Category(index) => {
            SelectionMode::Category(categories::resolve(store, language, index)?.id)
        }
    })
}

/// Selects a practice set and opens a session over it.
pub fn start<S: DataStore>(store: &S, language: &Language, mode: SelectionMode) -> Result<ReviewSession> {
    let items = store.list_items(&language.id, &ItemQuery::Practice(mode))?;
    let set = selection::select(items, mode)?;
    ReviewSession::start(language.id, mode, set)
}

pub fn mark_forgotten<S: DataStore>(store: &mut S, session: &mut ReviewSession) -> Result<CmdResult> {
    let ticket = session.begin_mark_forgotten()?;
    send(store, session, ticket)
}

pub fn mark_learned<S: DataStore>(store: &mut S, session: &mut ReviewSession) -> Result<CmdResult> {
    let ticket = session.begin_mark_learned()?;
    send(store, session, ticket)
}

/// Re-runs the session's selection against the store.
pub fn refresh<S: DataStore>(store: &S, session: &mut ReviewSession) -> Result<SessionState> {
    let mut items = store.list_items(&session.language_id(), &ItemQuery::Practice(session.mode()))?;
    items.sort_by(practice_order);
    Ok(session.reconcile(items))
}

fn send<S: DataStore>(store: &mut S, session: &mut ReviewSession, ticket: WriteTicket) -> Result<CmdResult> {
    let outcome = store.update_item(&ticket.item_id, &ticket.patch);
    let stored = outcome.as_ref().ok().cloned();

    let mut result = CmdResult::default();
    if session.complete_stored(&ticket, outcome)? == Completion::Discarded {
        return Ok(result);
    }
    let Some(word) = stored else {
        return Ok(result);
    };

    match ticket.action {
        ReviewAction::MarkLearned => {
            info!(id = %word.id, term = %word.term, "word learned");
            result.add_message(CmdMessage::success(format!("Learned: {}", word.term)));
        }
        ReviewAction::MarkForgotten => {
            info!(id = %word.id, term = %word.term, forgot = word.forgot_count, "word forgotten");
            result.add_message(CmdMessage::info(format!(
                "Needs practice: {} (forgotten {})",
                word.term,
                count_of(word.forgot_count as usize, "time")
            )));
            if word.forgot_count == FORGOT_THRESHOLD {
                result.add_message(CmdMessage::warning(format!(
                    "{} now shows up in forgot practice",
                    word.term
                )));
            }
        }
        // Sessions never issue tag writes.
        ReviewAction::TagDifficulty => {}
    }
    if session.state() == SessionState::Empty {
        result.add_message(CmdMessage::success("All words in this set are learned."));
    }
    Ok(result.with_affected_word(word))
}
