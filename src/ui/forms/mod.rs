//! Form rendering module
//!
//! - `field_renderer`: single field boxes and inline errors
//! - `event_form`: the schema-driven event form

mod event_form;
mod field_renderer;

pub use event_form::draw_event_form;
