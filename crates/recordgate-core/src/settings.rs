//! Per-owner privacy defaults.

use serde::{Deserialize, Serialize};

use crate::label::PermissionLabel;

/// Privacy defaults for one owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrivacySettings {
    /// Label the owner considers the default for new sharing.
    pub default_permission: PermissionLabel,

    /// Whether interactions with the owner's records are logged.
    pub enable_logging: bool,

    /// Whether stores default to the encrypted flag.
    pub encrypt_by_default: bool,
}

impl PrivacySettings {
    /// The settings an owner has before ever initializing: `none`, logging
    /// on, encryption off.
    pub const DEFAULT: Self = Self {
        default_permission: PermissionLabel::None,
        enable_logging: true,
        encrypt_by_default: false,
    };

    /// Create settings from their parts.
    pub fn new(
        default_permission: PermissionLabel,
        enable_logging: bool,
        encrypt_by_default: bool,
    ) -> Self {
        Self {
            default_permission,
            enable_logging,
            encrypt_by_default,
        }
    }

    /// Resolve a stored lookup, falling back to [`PrivacySettings::DEFAULT`].
    pub fn resolve(stored: Option<Self>) -> Self {
        stored.unwrap_or(Self::DEFAULT)
    }
}

impl Default for PrivacySettings {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = PrivacySettings::resolve(None);
        assert_eq!(settings.default_permission, PermissionLabel::None);
        assert!(settings.enable_logging);
        assert!(!settings.encrypt_by_default);
        assert_eq!(settings, PrivacySettings::default());
    }

    #[test]
    fn test_resolve_prefers_stored() {
        let stored = PrivacySettings::new(PermissionLabel::Read, false, true);
        assert_eq!(PrivacySettings::resolve(Some(stored)), stored);
    }
}
