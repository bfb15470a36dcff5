//! Event submission gateway: the boundary to the remote event store

mod auth;
mod client;
mod traits;
mod types;

pub use auth::{SessionProvider, StaticSession};
pub use client::HttpEventGateway;
pub use traits::EventGateway;
pub use types::{EventFilter, EventRecord, EventStatus, SubmissionResult};

#[cfg(test)]
pub use auth::{MockSessionProvider, Session};
#[cfg(test)]
pub use client::interpret_submission;
#[cfg(test)]
pub use traits::MockEventGateway;
