//! Submission state machine values and the common form navigation trait

use super::field::FormField;
use crate::error::{FormError, UnknownEventCode};
use crate::gateway::EventStatus;
use crate::schema::FieldErrors;

/// Trait for common form operations
pub trait Form {
    fn field_count(&self) -> usize;
    fn active_field(&self) -> usize;
    fn set_active_field(&mut self, index: usize);
    fn next_field(&mut self) {
        let count = self.field_count();
        if count == 0 {
            return;
        }
        let current = self.active_field();
        self.set_active_field((current + 1) % count);
    }
    fn prev_field(&mut self) {
        let count = self.field_count();
        if count == 0 {
            return;
        }
        let current = self.active_field();
        if current == 0 {
            self.set_active_field(count - 1);
        } else {
            self.set_active_field(current - 1);
        }
    }
    fn get_active_field_mut(&mut self) -> Option<&mut FormField>;
    fn get_field(&self, index: usize) -> Option<&FormField>;
}

/// Where a set of field errors came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSource {
    Local,
    Server,
}

/// State of one editing session's submission
#[derive(Debug, Clone, Default, PartialEq)]
pub enum FormState {
    /// Editable, nothing in flight
    #[default]
    Idle,
    /// Whole-object validation running
    Validating,
    /// Exactly one gateway call in flight
    Submitting { attempt: u32 },
    Succeeded {
        event_id: String,
        status: EventStatus,
    },
    ValidationFailed {
        errors: FieldErrors,
        source: ErrorSource,
    },
    /// Retryable by submitting again
    TransportFailed { reason: String },
    /// The event code has no descriptor; the session is unusable
    ConfigurationError { code: String },
}

impl FormState {
    pub fn is_submitting(&self) -> bool {
        matches!(self, FormState::Submitting { .. })
    }

    /// States from which a new submit request is accepted
    pub fn accepts_submit(&self) -> bool {
        matches!(
            self,
            FormState::Idle
                | FormState::ValidationFailed { .. }
                | FormState::TransportFailed { .. }
                | FormState::Succeeded { .. }
        )
    }

    /// Outcome states that fall back to `Idle` on the next edit
    pub fn is_settled(&self) -> bool {
        matches!(
            self,
            FormState::Succeeded { .. }
                | FormState::ValidationFailed { .. }
                | FormState::TransportFailed { .. }
        )
    }

    pub fn label(&self) -> &'static str {
        match self {
            FormState::Idle => "idle",
            FormState::Validating => "validating",
            FormState::Submitting { .. } => "submitting",
            FormState::Succeeded { .. } => "succeeded",
            FormState::ValidationFailed { .. } => "validation failed",
            FormState::TransportFailed { .. } => "transport failed",
            FormState::ConfigurationError { .. } => "configuration error",
        }
    }

    /// The user-facing error carried by this state, if any
    pub fn error(&self) -> Option<FormError> {
        match self {
            FormState::ValidationFailed {
                errors,
                source: ErrorSource::Local,
            } => Some(FormError::FieldValidation(errors.clone())),
            FormState::ValidationFailed {
                errors,
                source: ErrorSource::Server,
            } => Some(FormError::ServerValidation(errors.clone())),
            FormState::TransportFailed { reason } => Some(FormError::Transport(reason.clone())),
            FormState::ConfigurationError { code } => {
                Some(UnknownEventCode(code.clone()).into())
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Presentation;

    #[test]
    fn test_submit_gate() {
        assert!(FormState::Idle.accepts_submit());
        assert!(FormState::TransportFailed {
            reason: "HTTP 500".into()
        }
        .accepts_submit());
        assert!(!FormState::Submitting { attempt: 1 }.accepts_submit());
        assert!(!FormState::Validating.accepts_submit());
        assert!(!FormState::ConfigurationError {
            code: "S-0000".into()
        }
        .accepts_submit());
    }

    #[test]
    fn test_error_presentation_by_state() {
        let local = FormState::ValidationFailed {
            errors: FieldErrors::new(),
            source: ErrorSource::Local,
        };
        let server = FormState::ValidationFailed {
            errors: FieldErrors::new(),
            source: ErrorSource::Server,
        };
        assert_eq!(
            local.error().map(|e| e.presentation()),
            server.error().map(|e| e.presentation())
        );
        let config = FormState::ConfigurationError {
            code: "S-0000".into(),
        };
        assert_eq!(
            config.error().map(|e| e.presentation()),
            Some(Presentation::ConfigurationError)
        );
        assert!(FormState::Idle.error().is_none());
    }
}
