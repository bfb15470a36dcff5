//! Error taxonomy surfaced to the UI layer
//!
//! Every failure in the submission pipeline is resolved to one of the
//! [`FormError`] kinds before it reaches rendering code. Raw transport errors
//! never leave the gateway.

use crate::schema::FieldErrors;

/// Raised when an event code has no descriptor in the registry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown eSocial event code: {0}")]
pub struct UnknownEventCode(pub String);

/// How a [`FormError`] is presented to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presentation {
    /// Messages rendered next to each offending field
    Inline,
    /// Dismissible global notification with a retry affordance
    Notification,
    /// Form replaced by a configuration-error panel
    ConfigurationError,
}

/// User-facing errors of one form session
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FormError {
    /// Local, pre-submission validation failures
    #[error("{} field(s) failed validation", .0.len())]
    FieldValidation(FieldErrors),

    /// Field errors returned by the event store
    #[error("event store rejected {} field(s)", .0.len())]
    ServerValidation(FieldErrors),

    /// Network, HTTP or session failure; the user may retry
    #[error("submission failed: {0}")]
    Transport(String),

    /// Registry misconfiguration, fatal for the form instance
    #[error(transparent)]
    UnknownEventCode(#[from] UnknownEventCode),
}

impl FormError {
    pub fn presentation(&self) -> Presentation {
        match self {
            FormError::FieldValidation(_) | FormError::ServerValidation(_) => Presentation::Inline,
            FormError::Transport(_) => Presentation::Notification,
            FormError::UnknownEventCode(_) => Presentation::ConfigurationError,
        }
    }

    /// Field errors to display inline, if any
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            FormError::FieldValidation(errors) | FormError::ServerValidation(errors) => {
                Some(errors)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_and_server_errors_share_presentation() {
        let mut errors = FieldErrors::new();
        errors.insert("cpf", "field required");
        let local = FormError::FieldValidation(errors.clone());
        let server = FormError::ServerValidation(errors);
        assert_eq!(local.presentation(), server.presentation());
        assert_eq!(local.presentation(), Presentation::Inline);
    }

    #[test]
    fn test_transport_is_a_notification() {
        let err = FormError::Transport("HTTP 500".to_string());
        assert_eq!(err.presentation(), Presentation::Notification);
        assert!(err.field_errors().is_none());
        assert_eq!(err.to_string(), "submission failed: HTTP 500");
    }

    #[test]
    fn test_unknown_code_is_a_configuration_error() {
        let err: FormError = UnknownEventCode("S-9999".to_string()).into();
        assert_eq!(err.presentation(), Presentation::ConfigurationError);
        assert_eq!(err.to_string(), "unknown eSocial event code: S-9999");
    }
}
