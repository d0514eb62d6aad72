use thiserror::Error;

/// Outcome of a ledger operation that did not go through.
///
/// The first three kinds are refusals the user can act on and are shown as a
/// status message; `Storage` means the database itself failed.
#[derive(Debug, Error)]
pub(crate) enum LedgerError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("Initiative '{0}' already exists")]
    DuplicateName(String),

    #[error("Initiative '{0}' not found")]
    NotFound(String),

    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),
}

impl LedgerError {
    pub(crate) fn is_user_error(&self) -> bool {
        !matches!(self, Self::Storage(_))
    }
}

pub(crate) type LedgerResult<T> = std::result::Result<T, LedgerError>;
