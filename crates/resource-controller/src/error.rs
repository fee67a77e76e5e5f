//! # Controller Errors
//!
//! This module defines the error taxonomy shared by every resource client and controller.
//! By centralizing error definitions, every screen reports failures the same way, whether
//! they come from the in-memory store, the HTTP transport, or a mock.
//!
//! | Variant | Raised by | Recoverable on `list` |
//! |---------|-----------|-----------------------|
//! | [`ResourceError::Network`] | transport failures, timeouts, 5xx | yes (retry) |
//! | [`ResourceError::Validation`] | rejected input or filters | no |
//! | [`ResourceError::NotFound`] | stale id on get/update/delete | no |
//! | [`ResourceError::Conflict`] | concurrent modification | yes (retry) |
//!
//! The remaining variants are raised by the framework itself when an actor channel is gone.

use std::collections::BTreeMap;

/// Per-field messages, keyed by form field name.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// Errors surfaced by resource clients and controllers.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ResourceError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("Validation error: {message}")]
    Validation { message: String, fields: FieldErrors },
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("Store closed")]
    StoreClosed,
    #[error("Store dropped response channel")]
    StoreDropped,
    #[error("Controller closed")]
    ControllerClosed,
    #[error("Controller dropped response channel")]
    ControllerDropped,
}

impl ResourceError {
    /// Builds a validation error carrying a single field message.
    pub fn invalid_field(field: impl Into<String>, message: impl Into<String>) -> Self {
        let field = field.into();
        let message = message.into();
        let mut fields = FieldErrors::new();
        fields.insert(field.clone(), vec![message.clone()]);
        Self::Validation {
            message: format!("{field}: {message}"),
            fields,
        }
    }

    /// `true` for failures a list query may retry on its own (`Network`, `Conflict`).
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Network(_) | Self::Conflict(_))
    }

    /// Field-level messages, present only on validation errors.
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            Self::Validation { fields, .. } => Some(fields),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_network_and_conflict_are_recoverable() {
        assert!(ResourceError::Network("timeout".into()).is_recoverable());
        assert!(ResourceError::Conflict("version".into()).is_recoverable());
        assert!(!ResourceError::NotFound("7".into()).is_recoverable());
        assert!(!ResourceError::invalid_field("page", "must be positive").is_recoverable());
        assert!(!ResourceError::ControllerClosed.is_recoverable());
    }

    #[test]
    fn invalid_field_carries_the_message() {
        let err = ResourceError::invalid_field("date_start", "invalid date");
        let fields = err.field_errors().unwrap();
        assert_eq!(fields["date_start"], vec!["invalid date".to_string()]);
        assert_eq!(err.to_string(), "Validation error: date_start: invalid date");
    }
}
