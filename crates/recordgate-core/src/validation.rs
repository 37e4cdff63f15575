//! Boundary validation: length ceilings and non-empty checks.
//!
//! Length ceilings are checked first and fail with
//! [`AccessError::InvalidInput`]; only input that fits is then checked for
//! emptiness or membership in the label set. Lengths count characters.

use crate::error::{AccessError, Result};
use crate::label::PermissionLabel;
use crate::types::{Height, RecordId};

/// Maximum record id length.
pub const MAX_RECORD_ID_LEN: usize = 36;

/// Maximum content length.
pub const MAX_CONTENT_LEN: usize = 1024;

/// Maximum content type length.
pub const MAX_CONTENT_TYPE_LEN: usize = 64;

/// Maximum permission label length.
pub const MAX_LABEL_LEN: usize = 10;

/// String-length ceilings enforced before input reaches a store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputLimits {
    pub max_record_id_len: usize,
    pub max_content_len: usize,
    pub max_content_type_len: usize,
    pub max_label_len: usize,
}

impl Default for InputLimits {
    fn default() -> Self {
        Self {
            max_record_id_len: MAX_RECORD_ID_LEN,
            max_content_len: MAX_CONTENT_LEN,
            max_content_type_len: MAX_CONTENT_TYPE_LEN,
            max_label_len: MAX_LABEL_LEN,
        }
    }
}

impl InputLimits {
    /// Check a record id against its ceiling.
    pub fn check_record_id(&self, id: &str) -> Result<()> {
        check_len(id, self.max_record_id_len)
    }

    /// Check record content against its ceiling.
    pub fn check_content(&self, content: &str) -> Result<()> {
        check_len(content, self.max_content_len)
    }

    /// Check a content type against its ceiling.
    pub fn check_content_type(&self, content_type: &str) -> Result<()> {
        check_len(content_type, self.max_content_type_len)
    }

    /// Parse a permission label received as a string.
    pub fn label(&self, label: &str) -> Result<PermissionLabel> {
        check_len(label, self.max_label_len)?;
        label.parse()
    }
}

/// Require a non-empty record id and wrap it.
pub fn validate_record_id(id: &str) -> Result<RecordId> {
    if id.is_empty() {
        return Err(AccessError::InvalidDataId);
    }
    Ok(RecordId::new(id))
}

/// Require non-empty record content.
pub fn validate_content(content: &str) -> Result<()> {
    if content.is_empty() {
        return Err(AccessError::InvalidData);
    }
    Ok(())
}

/// Require a non-empty content type.
pub fn validate_content_type(content_type: &str) -> Result<()> {
    if content_type.is_empty() {
        return Err(AccessError::InvalidDataType);
    }
    Ok(())
}

/// Validate a grant expiration against the current height.
///
/// Zero (never expires) is always accepted; otherwise the expiration must be
/// strictly in the future.
pub fn validate_expiration(expiration: Height, now: Height) -> Result<()> {
    if expiration.is_zero() || expiration > now {
        Ok(())
    } else {
        Err(AccessError::InvalidBlockHeight)
    }
}

fn check_len(value: &str, max: usize) -> Result<()> {
    if value.chars().count() > max {
        return Err(AccessError::InvalidInput);
    }
    Ok(())
}
