//! Schema registry: declarative field specs per eSocial event and the single
//! routine that interprets them

mod catalog;
mod descriptor;
mod field;
mod outcome;
mod path;
mod registry;
mod validate;

pub use descriptor::EventTypeDescriptor;
pub use field::{FieldKind, FieldSpec};
pub use outcome::{FieldErrors, TypedPayload, ValidationOutcome};
pub use path::FieldPath;
pub use registry::{normalize_code, SchemaRegistry};

#[cfg(test)]
pub(crate) use catalog::sample_payload;
#[cfg(test)]
pub use outcome::{TypedValue, FIELD_REQUIRED};
