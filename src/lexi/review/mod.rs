//! # Review Engine
//!
//! Pure state for flashcard practice. Nothing in here talks to a store:
//! selection works on a list of words, and sessions hand out [`WriteTicket`]s
//! that the command layer sends to the store and reports back.
//!
//! - [`selection`]: practice set filters and ordering
//! - [`session`]: the review session state machine (forgot / learned)
//! - [`deck`]: the dictionary flashcard deck (difficulty tags)

mod cursor;
pub mod deck;
mod pending;
pub mod selection;
pub mod session;

pub use cursor::Cursor;
pub use deck::FlashcardDeck;
pub use pending::{Completion, ReviewAction, WriteTicket};
pub use selection::SelectionMode;
pub use session::{ReviewSession, SessionState};
