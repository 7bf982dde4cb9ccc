//! Flashcard deck for the dictionary view.
//!
//! Unlike a [`ReviewSession`](super::session::ReviewSession), the deck shows
//! every word of the language, learned ones included, and its only write is
//! the difficulty tag. Tagging advances like `next` once the write succeeded.

use super::cursor::Cursor;
use super::pending::{Completion, PendingWrites, ReviewAction, WriteTicket};
use super::selection::practice_order;
use super::session::into_write_error;
use crate::error::{LexiError, Result};
use crate::model::{Difficulty, ItemPatch, VocabularyItem};
use tracing::{debug, warn};

#[derive(Debug, Clone)]
pub struct FlashcardDeck {
    cards: Vec<VocabularyItem>,
    cursor: Cursor,
    pending: PendingWrites,
}

impl FlashcardDeck {
    pub fn new(mut cards: Vec<VocabularyItem>) -> Result<Self> {
        if cards.is_empty() {
            return Err(LexiError::EmptySet);
        }
        cards.sort_by(practice_order);
        Ok(Self {
            cards,
            cursor: Cursor::at(0),
            pending: PendingWrites::new(),
        })
    }

    pub fn cards(&self) -> &[VocabularyItem] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn position(&self) -> usize {
        self.cursor.index
    }

    pub fn is_flipped(&self) -> bool {
        self.cursor.revealed
    }

    pub fn current(&self) -> &VocabularyItem {
        &self.cards[self.cursor.index]
    }

    pub fn flip(&mut self) {
        self.cursor = self.cursor.toggled();
    }

    pub fn next(&mut self) -> Result<()> {
        self.pending.ensure_idle()?;
        self.cursor = self.cursor.next(self.cards.len());
        Ok(())
    }

    pub fn previous(&mut self) -> Result<()> {
        self.pending.ensure_idle()?;
        self.cursor = self.cursor.previous(self.cards.len());
        Ok(())
    }

    pub fn begin_tag(&mut self, difficulty: Difficulty) -> Result<WriteTicket> {
        let id = self.current().id;
        self.pending.issue(
            ReviewAction::TagDifficulty,
            id,
            ItemPatch::difficulty(difficulty),
        )
    }

    pub fn complete(&mut self, ticket: &WriteTicket, outcome: Result<()>) -> Result<Completion> {
        self.settle(ticket, outcome.map(|_| None))
    }

    /// Completes with the record the store wrote, which replaces the card.
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
            debug!(item = %ticket.item_id, "discarding stale tag result");
            return Ok(Completion::Discarded);
        }
        let stored = match outcome {
            Ok(stored) => stored,
            Err(err) => {
                warn!(item = %ticket.item_id, error = %err, "difficulty tag rejected");
                return Err(into_write_error(err));
            }
        };
        if let Some(card) = self.cards.iter_mut().find(|c| c.id == ticket.item_id) {
            match stored {
                Some(item) => *card = item,
                None => ticket.patch.apply_to(card),
            }
        }
        self.cursor = self.cursor.next(self.cards.len());
        Ok(Completion::Applied)
    }

    pub fn cancel_pending(&mut self) -> bool {
        self.pending.cancel()
    }

    /// Replaces the cards after the store reported a word missing.
    pub fn reconcile(&mut self, mut fresh: Vec<VocabularyItem>) -> Result<()> {
        self.pending.cancel();
        fresh.sort_by(practice_order);
        let current = Some(self.current().id);
        self.cursor = self
            .cursor
            .relocate(current, &fresh)
            .ok_or(LexiError::EmptySet)?;
        self.cards = fresh;
        Ok(())
    }
}
