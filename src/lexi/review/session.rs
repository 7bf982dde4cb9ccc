//! Review session state machine.
//!
//! A session walks a practice set one card at a time. Navigation and the
//! reveal toggle are immediate. Marking a card forgotten or learned goes
//! through a [`WriteTicket`]: `begin_*` hands out the write, the caller sends
//! it to the store, and `complete` applies the transition only when the write
//! succeeded. A failed write leaves the session exactly where it was.
//!
//! ```text
//!            reveal / next / previous
//!               ┌──────────┐
//!               ▼          │
//!   start ─▶ Presenting(i, revealed) ──mark learned (last card)──▶ Empty
//!               │          ▲
//!               └──────────┘
//!          mark forgotten / mark learned
//! ```

use super::cursor::Cursor;
use super::pending::{Completion, PendingWrites, ReviewAction, WriteTicket};
use super::selection::SelectionMode;
use crate::error::{LexiError, Result};
use crate::model::{ItemPatch, VocabularyItem};
use tracing::{debug, warn};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Presenting { index: usize, revealed: bool },
    /// Terminal. Only a new selection leaves this state.
    Empty,
}

#[derive(Debug, Clone)]
pub struct ReviewSession {
    language_id: Uuid,
    mode: SelectionMode,
    items: Vec<VocabularyItem>,
    cursor: Option<Cursor>,
    pending: PendingWrites,
}

impl ReviewSession {
    /// Starts a session over an already selected practice set.
    pub fn start(
        language_id: Uuid,
        mode: SelectionMode,
        items: Vec<VocabularyItem>,
    ) -> Result<Self> {
        if items.is_empty() {
            return Err(LexiError::EmptySet);
        }
        debug!(%language_id, %mode, cards = items.len(), "review session started");
        Ok(Self {
            language_id,
            mode,
            items,
            cursor: Some(Cursor::at(0)),
            pending: PendingWrites::new(),
        })
    }

    pub fn language_id(&self) -> Uuid {
        self.language_id
    }

    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    pub fn items(&self) -> &[VocabularyItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn state(&self) -> SessionState {
        match self.cursor {
            Some(c) => SessionState::Presenting {
                index: c.index,
                revealed: c.revealed,
            },
            None => SessionState::Empty,
        }
    }

    pub fn has_pending_write(&self) -> bool {
        self.pending.is_busy()
    }

    pub fn current(&self) -> Result<&VocabularyItem> {
        let cursor = self.cursor.ok_or(LexiError::EmptySet)?;
        self.items.get(cursor.index).ok_or(LexiError::EmptySet)
    }

    pub fn reveal(&mut self) -> Result<SessionState> {
        let cursor = self.cursor.ok_or(LexiError::EmptySet)?;
        self.cursor = Some(cursor.toggled());
        Ok(self.state())
    }

    pub fn next(&mut self) -> Result<SessionState> {
        let cursor = self.idle_cursor()?;
        self.cursor = Some(cursor.next(self.items.len()));
        Ok(self.state())
    }

    pub fn previous(&mut self) -> Result<SessionState> {
        let cursor = self.idle_cursor()?;
        self.cursor = Some(cursor.previous(self.items.len()));
        Ok(self.state())
    }

    pub fn begin_mark_forgotten(&mut self) -> Result<WriteTicket> {
        let id = self.idle_current()?.id;
        self.pending
            .issue(ReviewAction::MarkForgotten, id, ItemPatch::forgot())
    }

    pub fn begin_mark_learned(&mut self) -> Result<WriteTicket> {
        let id = self.idle_current()?.id;
        self.pending
            .issue(ReviewAction::MarkLearned, id, ItemPatch::learned())
    }

    /// Reports the store's answer for `ticket`.
    ///
    /// Stale or cancelled tickets are discarded whatever the outcome. For the
    /// ticket in flight, a failed outcome is returned as an error and the
    /// session does not move.
    pub fn complete(&mut self, ticket: &WriteTicket, outcome: Result<()>) -> Result<Completion> {
        self.settle(ticket, outcome.map(|_| None))
    }

    /// Like [`complete`](Self::complete), with the record the store wrote.
    ///
    /// The stored record replaces the session's copy, so counters reflect
    /// writes made by other sessions too.
    pub fn complete_stored(
        &mut self,
        ticket: &WriteTicket,
        outcome: Result<VocabularyItem>,
    ) -> Result<Completion> {
        self.settle(ticket, outcome.map(Some))
    }

    fn settle(
        &mut self,
        ticket: &WriteTicket,
        outcome: Result<Option<VocabularyItem>>,
    ) -> Result<Completion> {
        if !self.pending.settle(ticket) {
            debug!(item = %ticket.item_id, action = ?ticket.action, "discarding stale write result");
            return Ok(Completion::Discarded);
        }

        let stored = match outcome {
            Ok(stored) => stored,
            Err(err) => {
                warn!(item = %ticket.item_id, action = ?ticket.action, error = %err, "review write rejected");
                return Err(into_write_error(err));
            }
        };

        let (Some(cursor), Some(pos)) = (
            self.cursor,
            self.items.iter().position(|i| i.id == ticket.item_id),
        ) else {
            return Ok(Completion::Discarded);
        };

        match stored {
            Some(item) => self.items[pos] = item,
            None => ticket.patch.apply_to(&mut self.items[pos]),
        }

        match ticket.action {
            ReviewAction::MarkLearned => {
                self.items.remove(pos);
                self.cursor = if self.items.is_empty() {
                    None
                } else {
                    Some(Cursor::at(pos).wrapped(self.items.len()))
                };
            }
            ReviewAction::MarkForgotten | ReviewAction::TagDifficulty => {
                self.cursor = Some(cursor.next(self.items.len()));
            }
        }

        debug!(item = %ticket.item_id, action = ?ticket.action, state = ?self.state(), "review write applied");
        Ok(Completion::Applied)
    }

    /// Stops waiting for the outstanding write, if any.
    ///
    /// The write itself may still land in the store; its result is discarded
    /// when it comes back.
    pub fn cancel_pending(&mut self) -> bool {
        self.pending.cancel()
    }

    /// Replaces the cards with a freshly selected set.
    ///
    /// Keeps the current card when it is still there, otherwise stays near the
    /// same position. An empty refresh ends the session.
    pub fn reconcile(&mut self, fresh: Vec<VocabularyItem>) -> SessionState {
        self.pending.cancel();
        if self.cursor.is_none() {
            return SessionState::Empty;
        }
        let current = self.current().ok().map(|i| i.id);
        self.cursor = self
            .cursor
            .and_then(|c| c.relocate(current, &fresh));
        self.items = fresh;
        debug!(cards = self.items.len(), state = ?self.state(), "review session refreshed");
        self.state()
    }

    fn idle_cursor(&self) -> Result<Cursor> {
        let cursor = self.cursor.ok_or(LexiError::EmptySet)?;
        self.pending.ensure_idle()?;
        Ok(cursor)
    }

    fn idle_current(&self) -> Result<&VocabularyItem> {
        let cursor = self.idle_cursor()?;
        self.items.get(cursor.index).ok_or(LexiError::EmptySet)
    }
}

/// Failed writes surface as `WriteFailed` unless the store knows the item is gone.
pub(crate) fn into_write_error(err: LexiError) -> LexiError {
    match err {
        LexiError::NotFound(id) => LexiError::NotFound(id),
        LexiError::WriteFailed(reason) => LexiError::WriteFailed(reason),
        other => LexiError::WriteFailed(other.to_string()),
    }
}
