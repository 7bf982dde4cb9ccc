use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum LexiError {
    /// No items match the selection, or the session ran out of items.
    #[error("No words to practice")]
    EmptySet,

    #[error("Write failed: {0}")]
    WriteFailed(String),

    #[error("Word not found: {0}")]
    NotFound(Uuid),

    #[error("A write is still in progress for this session")]
    WriteInFlight,

    #[error("Category not found: {0}")]
    CategoryNotFound(Uuid),

    #[error("Language not found: {0}")]
    LanguageNotFound(Uuid),

    #[error("No languages yet (add one with `lexi language add <name>`)")]
    NoLanguageSelected,

    #[error("{0}")]
    Validation(String),

    #[error("Invalid record {id}: {reason}")]
    InvalidRecord { id: Uuid, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Api Error: {0}")]
    Api(String),
}

impl LexiError {
    /// Whether the failure leaves the caller free to retry or reselect.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            LexiError::EmptySet
                | LexiError::WriteFailed(_)
                | LexiError::NotFound(_)
                | LexiError::WriteInFlight
        )
    }
}

pub type Result<T> = std::result::Result<T, LexiError>;
