//! Trait abstraction for the event store client to enable mocking in tests

use super::types::{EventFilter, EventRecord, EventStatus, SubmissionResult};
use crate::schema::TypedPayload;
use anyhow::Result;
use async_trait::async_trait;

/// Event store operations
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EventGateway: Send + Sync {
    /// Send one validated payload. Performs exactly one request and never retries.
    async fn submit(&self, code: &str, payload: &TypedPayload) -> SubmissionResult;

    /// List recorded events matching the filter
    async fn list_events(&self, filter: &EventFilter) -> Result<Vec<EventRecord>>;

    /// Fetch one recorded event, `None` when the store does not know the id
    async fn get_event(&self, event_id: &str) -> Result<Option<EventRecord>>;

    /// Change the processing status of a recorded event
    async fn update_status(&self, event_id: &str, status: EventStatus) -> Result<EventRecord>;

    /// Remove a recorded event
    async fn delete_event(&self, event_id: &str) -> Result<()>;
}
