//! Form domain layer
//!
//! Input rows for one event type, the submission state machine and the
//! controller that drives it.

mod controller;
mod event_form;
mod field;
mod form_state;

pub use controller::{ControllerOptions, FormController, FormEvent, Resolution};
pub use event_form::{EventForm, FormRow};
pub use field::FormField;
pub use form_state::{ErrorSource, Form, FormState};
