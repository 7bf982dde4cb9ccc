//! # Lexi Architecture
//!
//! Lexi is a vocabulary notebook with flashcard review. Words belong to a
//! language, may sit in a category and carry review progress (`learned`,
//! `forgot_count`, a difficulty tag). Practice sessions walk a selected set
//! of words and record what the learner remembered. Each language also keeps
//! notebooks of movies, books, songs, grammar rules and speaking topics.
//!
//! Like most of the code here, the binary is only one client: everything it
//! does goes through the library.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (main.rs, args.rs, print.rs, interactive.rs)     │
//! │  - Parses arguments, formats output, reads review keys      │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands                                │
//! │  - Normalizes inputs (display indexes, practice flags)      │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Business logic, store round trips for review actions     │
//! └─────────────────────────────────────────────────────────────┘
//!                     │                          │
//!                     ▼                          ▼
//! ┌──────────────────────────────┐ ┌────────────────────────────┐
//! │  Review (review/)            │ │  Storage Layer (store/)    │
//! │  - selection, session, deck  │ │  - DataStore trait         │
//! │  - no I/O at all             │ │  - FileStore, InMemoryStore│
//! └──────────────────────────────┘ └────────────────────────────┘
//! ```
//!
//! ## Review writes
//!
//! A review session never touches the store itself. Marking a card hands out
//! a [`review::WriteTicket`]; the command layer sends it to the store and
//! reports the outcome back. The session only moves when the write landed,
//! so a rejected write leaves the learner on the same card with the same
//! data. See [`review::session`].
//!
//! ## Testing
//!
//! - `review/`: state machine tests over plain vectors of words
//! - `commands/`: the bulk of the tests, against `InMemoryStore` fixtures
//! - `api.rs`: dispatch and input parsing
//! - `tests/`: the binary end to end, against a temporary `LEXI_HOME`
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`commands`]: Business logic for each command
//! - [`review`]: Practice selection, review session and flashcard deck
//! - [`store`]: Storage abstraction and implementations
//! - [`model`]: Core data types (`Language`, `Category`, `VocabularyItem`)
//! - [`notebook`]: Movies, books, songs, grammar rules and speaking topics
//! - [`index`]: 1-based display indexes used on the command line
//! - [`config`]: Configuration management
//! - [`logging`]: `tracing` subscriber setup
//! - [`error`]: Error types

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod index;
pub mod logging;
pub mod model;
pub mod notebook;
pub mod review;
pub mod store;
