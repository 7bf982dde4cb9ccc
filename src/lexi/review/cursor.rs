use crate::model::VocabularyItem;
use uuid::Uuid;

/// Position within a non-empty sequence of cards plus the reveal flag.
///
/// All moves are pure and return a new cursor; callers guarantee `len > 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    pub index: usize,
    pub revealed: bool,
}

impl Cursor {
    pub fn at(index: usize) -> Self {
        Self {
            index,
            revealed: false,
        }
    }

    pub fn toggled(self) -> Self {
        Self {
            revealed: !self.revealed,
            ..self
        }
    }

    pub fn next(self, len: usize) -> Self {
        Self::at((self.index + 1) % len)
    }

    pub fn previous(self, len: usize) -> Self {
        Self::at((self.index + len - 1) % len)
    }

    /// Keeps the index in range after the sequence shrank to `len`.
    pub fn wrapped(self, len: usize) -> Self {
        Self::at(self.index % len)
    }

    /// Cursor over a refreshed `items`, staying on `current` when it survived.
    ///
    /// Returns `None` when `items` is empty.
    pub fn relocate(self, current: Option<Uuid>, items: &[VocabularyItem]) -> Option<Self> {
        if items.is_empty() {
            return None;
        }
        let kept = current.and_then(|id| items.iter().position(|i| i.id == id));
        Some(match kept {
            Some(index) => Self { index, ..self },
            None => Self::at(self.index.min(items.len() - 1)),
        })
    }
}
