use crate::error::{LexiError, Result};
use crate::model::ItemPatch;
use uuid::Uuid;

/// The mutation a ticket stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewAction {
    MarkForgotten,
    MarkLearned,
    TagDifficulty,
}

/// A write the caller must send to the store and report back with `complete`.
///
/// Tickets are bound to the session or deck that issued them. Completing a
/// ticket that is no longer the one in flight has no effect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteTicket {
    pub(crate) owner: Uuid,
    pub(crate) seq: u64,
    pub action: ReviewAction,
    pub item_id: Uuid,
    pub patch: ItemPatch,
}

/// What `complete` did with a ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Applied,
    /// The ticket was stale or cancelled; nothing changed.
    Discarded,
}

/// Tracks the single outstanding write of a session.
#[derive(Debug, Clone)]
pub(crate) struct PendingWrites {
    owner: Uuid,
    next_seq: u64,
    in_flight: Option<u64>,
}

impl PendingWrites {
    pub fn new() -> Self {
        Self {
            owner: Uuid::new_v4(),
            next_seq: 0,
            in_flight: None,
        }
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn ensure_idle(&self) -> Result<()> {
        if self.is_busy() {
            return Err(LexiError::WriteInFlight);
        }
        Ok(())
    }

    pub fn issue(
        &mut self,
        action: ReviewAction,
        item_id: Uuid,
        patch: ItemPatch,
    ) -> Result<WriteTicket> {
        self.ensure_idle()?;
        let seq = self.next_seq;
        self.next_seq += 1;
        self.in_flight = Some(seq);
        Ok(WriteTicket {
            owner: self.owner,
            seq,
            action,
            item_id,
            patch,
        })
    }

    /// Clears the in-flight marker if `ticket` is the current one.
    pub fn settle(&mut self, ticket: &WriteTicket) -> bool {
        if ticket.owner != self.owner || self.in_flight != Some(ticket.seq) {
            return false;
        }
        self.in_flight = None;
        true
    }

    pub fn cancel(&mut self) -> bool {
        self.in_flight.take().is_some()
    }
}
