//! Records and access log entries.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::crypto::Principal;
use crate::types::{Height, RecordId};

/// An owner-scoped data record.
///
/// Identified by `(owner, record_id)`. The `encrypted` flag records intent
/// only; content is stored as given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// The owning principal.
    pub owner: Principal,

    /// Name within the owner's namespace.
    pub record_id: RecordId,

    /// Record body.
    pub content: String,

    /// Caller-supplied content type.
    pub content_type: String,

    /// Whether the owner intends the content to be treated as encrypted.
    pub encrypted: bool,

    /// Height of the first store.
    pub created_at: Height,

    /// Height of the most recent store.
    pub last_modified: Height,
}

impl Record {
    /// Create a fresh record stored at `now`.
    pub fn new(
        owner: Principal,
        record_id: RecordId,
        content: impl Into<String>,
        content_type: impl Into<String>,
        encrypted: bool,
        now: Height,
    ) -> Self {
        Self {
            owner,
            record_id,
            content: content.into(),
            content_type: content_type.into(),
            encrypted,
            created_at: now,
            last_modified: now,
        }
    }

    /// Overwrite this record's body in place, keeping `created_at`.
    pub fn overwrite(
        &mut self,
        content: impl Into<String>,
        content_type: impl Into<String>,
        encrypted: bool,
        now: Height,
    ) {
        self.content = content.into();
        self.content_type = content_type.into();
        self.encrypted = encrypted;
        self.last_modified = now;
    }
}

/// The kind of interaction recorded in the access log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AccessAction {
    Read,
    Create,
    Update,
    Delete,
    Grant,
    Revoke,
    DeleteReq,
}

impl AccessAction {
    /// The wire form of this action.
    pub fn as_str(&self) -> &'static str {
        match self {
            AccessAction::Read => "read",
            AccessAction::Create => "create",
            AccessAction::Update => "update",
            AccessAction::Delete => "delete",
            AccessAction::Grant => "grant",
            AccessAction::Revoke => "revoke",
            AccessAction::DeleteReq => "delete-req",
        }
    }
}

impl fmt::Display for AccessAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccessAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "read" => Ok(AccessAction::Read),
            "create" => Ok(AccessAction::Create),
            "update" => Ok(AccessAction::Update),
            "delete" => Ok(AccessAction::Delete),
            "grant" => Ok(AccessAction::Grant),
            "revoke" => Ok(AccessAction::Revoke),
            "delete-req" => Ok(AccessAction::DeleteReq),
            other => Err(format!("unknown access action: {}", other)),
        }
    }
}

/// One access log entry.
///
/// Keyed by `(owner, record_id, height)`: a later action at the same height
/// replaces the earlier entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub owner: Principal,
    pub record_id: RecordId,
    pub height: Height,
    /// Who performed the action.
    pub actor: Principal,
    pub action: AccessAction,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overwrite_keeps_created_at() {
        let owner = Principal::from_bytes([1u8; 32]);
        let mut record = Record::new(owner, "id1".into(), "hello", "note", false, Height(10));
        record.overwrite("bye", "text", true, Height(20));

        assert_eq!(record.created_at, Height(10));
        assert_eq!(record.last_modified, Height(20));
        assert_eq!(record.content, "bye");
        assert_eq!(record.content_type, "text");
        assert!(record.encrypted);
    }

    #[test]
    fn test_action_wire_names() {
        assert_eq!(AccessAction::DeleteReq.as_str(), "delete-req");
        assert_eq!("delete-req".parse::<AccessAction>(), Ok(AccessAction::DeleteReq));
        assert!("purge".parse::<AccessAction>().is_err());

        let json = serde_json::to_string(&AccessAction::DeleteReq).unwrap();
        assert_eq!(json, "\"delete-req\"");
    }
}
