//! The failure taxonomy shared by every RecordGate operation.

use thiserror::Error;

/// Errors returned to the immediate caller of a RecordGate operation.
///
/// Every variant has exactly one cause. None are transient, so none are
/// retried; a failed operation leaves all stores unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum AccessError {
    #[error("not authorized")]
    NotAuthorized,

    #[error("data not found")]
    DataNotFound,

    #[error("invalid permission label")]
    InvalidPermission,

    /// Reserved. No operation emits it: storing always overwrites.
    #[error("already exists")]
    AlreadyExists,

    /// Reserved. Expired grants surface as [`AccessError::NotAuthorized`].
    #[error("access expired")]
    ExpiredAccess,

    #[error("invalid block height")]
    InvalidBlockHeight,

    #[error("invalid input")]
    InvalidInput,

    #[error("invalid data id")]
    InvalidDataId,

    #[error("invalid data")]
    InvalidData,

    #[error("invalid data type")]
    InvalidDataType,
}

impl AccessError {
    /// Every variant, in numeric-code order.
    pub const ALL: [AccessError; 10] = [
        AccessError::NotAuthorized,
        AccessError::DataNotFound,
        AccessError::InvalidPermission,
        AccessError::AlreadyExists,
        AccessError::ExpiredAccess,
        AccessError::InvalidBlockHeight,
        AccessError::InvalidInput,
        AccessError::InvalidDataId,
        AccessError::InvalidData,
        AccessError::InvalidDataType,
    ];

    /// Stable tag for the outer caller layer.
    pub fn code(&self) -> &'static str {
        match self {
            AccessError::NotAuthorized => "NOT-AUTHORIZED",
            AccessError::DataNotFound => "DATA-NOT-FOUND",
            AccessError::InvalidPermission => "INVALID-PERMISSION",
            AccessError::AlreadyExists => "ALREADY-EXISTS",
            AccessError::ExpiredAccess => "EXPIRED-ACCESS",
            AccessError::InvalidBlockHeight => "INVALID-BLOCK-HEIGHT",
            AccessError::InvalidInput => "INVALID-INPUT",
            AccessError::InvalidDataId => "INVALID-DATA-ID",
            AccessError::InvalidData => "INVALID-DATA",
            AccessError::InvalidDataType => "INVALID-DATA-TYPE",
        }
    }

    /// Stable numeric code, starting at 100.
    pub fn numeric_code(&self) -> u32 {
        match self {
            AccessError::NotAuthorized => 100,
            AccessError::DataNotFound => 101,
            AccessError::InvalidPermission => 102,
            AccessError::AlreadyExists => 103,
            AccessError::ExpiredAccess => 104,
            AccessError::InvalidBlockHeight => 105,
            AccessError::InvalidInput => 106,
            AccessError::InvalidDataId => 107,
            AccessError::InvalidData => 108,
            AccessError::InvalidDataType => 109,
        }
    }

    /// Look up a variant by its numeric code.
    pub fn from_numeric_code(code: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|e| e.numeric_code() == code)
    }
}

/// Result type for core validation.
pub type Result<T> = std::result::Result<T, AccessError>;
