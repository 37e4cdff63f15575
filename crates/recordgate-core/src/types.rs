//! Strong type definitions for RecordGate.
//!
//! Identifiers and heights are newtypes to prevent misuse at compile time.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::crypto::Principal;

/// A point on the host's height counter.
///
/// Heights are supplied by the host and never decrease between calls.
/// As an expiration, [`Height::ZERO`] means "never expires".
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Height(pub u64);

impl Height {
    /// Height zero; as an expiration it means "never".
    pub const ZERO: Self = Self(0);

    /// Create a new height.
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Get the raw value.
    pub const fn get(self) -> u64 {
        self.0
    }

    /// Whether this is the zero height.
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for Height {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for Height {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// The name of a record within its owner's namespace.
///
/// Construction does not validate; the ledger checks ids against its
/// configured [`InputLimits`](crate::InputLimits) before they reach a store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RecordId(String);

impl RecordId {
    /// Wrap a string as a record id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume into the inner string.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for RecordId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RecordId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Caller identity and current height, supplied by the host once per call.
///
/// Operations never read either value from ambient state; the height stays
/// fixed for the whole operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestContext {
    /// Who is calling.
    pub caller: Principal,
    /// The host's current height.
    pub height: Height,
}

impl RequestContext {
    /// Create a new request context.
    pub fn new(caller: Principal, height: impl Into<Height>) -> Self {
        Self {
            caller,
            height: height.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_height_ordering() {
        assert!(Height(99) < Height(100));
        assert!(Height::ZERO.is_zero());
        assert_eq!(Height::from(7).get(), 7);
    }

    #[test]
    fn test_record_id_display() {
        let id = RecordId::new("medical-2024");
        assert_eq!(id.to_string(), "medical-2024");
        assert_eq!(id.as_str(), "medical-2024");
    }

    #[test]
    fn test_request_context_from_u64() {
        let caller = Principal::from_bytes([1u8; 32]);
        let ctx = RequestContext::new(caller, 42);
        assert_eq!(ctx.height, Height(42));
        assert_eq!(ctx.caller, caller);
    }
}
