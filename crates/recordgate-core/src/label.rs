//! Permission labels.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::AccessError;

/// The class of action a grant authorizes.
///
/// `admin` is a superset credential: it satisfies any required label. It is
/// never meaningful as a *required* label for a read or write check.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionLabel {
    Read,
    Write,
    Admin,
    #[default]
    None,
}

impl PermissionLabel {
    /// All labels in the fixed set.
    pub const ALL: [PermissionLabel; 4] = [
        PermissionLabel::Read,
        PermissionLabel::Write,
        PermissionLabel::Admin,
        PermissionLabel::None,
    ];

    /// The wire form of this label.
    pub fn as_str(&self) -> &'static str {
        match self {
            PermissionLabel::Read => "read",
            PermissionLabel::Write => "write",
            PermissionLabel::Admin => "admin",
            PermissionLabel::None => "none",
        }
    }

    /// Whether a grant carrying this label satisfies `required`.
    ///
    /// True when this label is `admin` or equals `required` exactly.
    pub fn satisfies(&self, required: PermissionLabel) -> bool {
        *self == PermissionLabel::Admin || *self == required
    }
}

impl fmt::Display for PermissionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PermissionLabel {
    type Err = AccessError;

    /// Parse a label from the fixed set. Matching is exact and case-sensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "read" => Ok(PermissionLabel::Read),
            "write" => Ok(PermissionLabel::Write),
            "admin" => Ok(PermissionLabel::Admin),
            "none" => Ok(PermissionLabel::None),
            _ => Err(AccessError::InvalidPermission),
        }
    }
}
