//! Authentication boundary
//!
//! Sessions are issued elsewhere; the pipeline only asks whether one exists
//! and who the acting user is.

/// Authenticated user as seen by the pipeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user_id: String,
    /// Bearer token, when the event store requires one
    pub access_token: Option<String>,
}

#[cfg_attr(test, mockall::automock)]
pub trait SessionProvider: Send + Sync {
    /// The current session, or `None` when nobody is signed in
    fn current_session(&self) -> Option<Session>;
}

/// Session fixed at startup from configuration
#[derive(Debug, Clone, Default)]
pub struct StaticSession {
    session: Option<Session>,
}

impl StaticSession {
    pub fn new(user_id: Option<String>, access_token: Option<String>) -> Self {
        let session = user_id
            .filter(|id| !id.trim().is_empty())
            .map(|user_id| Session {
                user_id,
                access_token: access_token.filter(|t| !t.is_empty()),
            });
        Self { session }
    }

    pub fn anonymous() -> Self {
        Self::default()
    }
}

impl SessionProvider for StaticSession {
    fn current_session(&self) -> Option<Session> {
        self.session.clone()
    }
}
