//! Error types for the Ledger.

use recordgate_core::AccessError;
use recordgate_store::StoreError;
use thiserror::Error;

/// Errors that can occur during Ledger operations.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// The request was rejected by a domain rule.
    #[error("access error: {0}")]
    Access(#[from] AccessError),

    /// Storage error.
    #[error("storage error: {0}")]
    Store(#[from] StoreError),
}

impl LedgerError {
    /// The domain failure, if this is one.
    pub fn access(&self) -> Option<AccessError> {
        match self {
            LedgerError::Access(e) => Some(*e),
            LedgerError::Store(_) => None,
        }
    }
}

/// Result type for Ledger operations.
pub type Result<T> = std::result::Result<T, LedgerError>;
