//! In-memory session manager.
//!
//! Keeps the resume target and the completed login in process state and
//! performs the post-login navigation through the navigator, the way a
//! hosted auth client would redirect the page.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use vestibule_application::{Navigator, SessionError, SessionManager};
use vestibule_domain::CredentialTokens;

/// Record of a completed login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletedLogin {
    /// Tokens the widget produced.
    pub tokens: CredentialTokens,
    /// When the session manager accepted them.
    pub completed_at: DateTime<Utc>,
}

#[derive(Default)]
struct SessionState {
    original_uri: Option<String>,
    completed: Option<CompletedLogin>,
}

/// In-memory [`SessionManager`] backing the demo binary and the tests.
pub struct MemorySessionManager {
    navigator: Arc<dyn Navigator>,
    state: RwLock<SessionState>,
}

impl MemorySessionManager {
    /// Creates a session manager redirecting through `navigator`.
    #[must_use]
    pub fn new(navigator: Arc<dyn Navigator>) -> Self {
        Self {
            navigator,
            state: RwLock::new(SessionState::default()),
        }
    }

    /// The completed login, if one was accepted.
    pub async fn completed(&self) -> Option<CompletedLogin> {
        self.state.read().await.completed.clone()
    }
}

#[async_trait]
impl SessionManager for MemorySessionManager {
    async fn original_uri(&self) -> Option<String> {
        self.state.read().await.original_uri.clone()
    }

    async fn set_original_uri(&self, uri: &str) {
        tracing::debug!(%uri, "resume target stored");
        self.state.write().await.original_uri = Some(uri.to_string());
    }

    async fn complete_login(&self, tokens: CredentialTokens) -> Result<(), SessionError> {
        if tokens.is_empty() {
            return Err(SessionError::Rejected(
                "credential bundle carries no tokens".to_string(),
            ));
        }
        let resume_target = {
            let mut state = self.state.write().await;
            state.completed = Some(CompletedLogin {
                tokens,
                completed_at: Utc::now(),
            });
            state.original_uri.clone()
        };
        let target = resume_target.unwrap_or_else(|| "/".to_string());
        self.navigator.navigate_to(&target);
        Ok(())
    }
}
