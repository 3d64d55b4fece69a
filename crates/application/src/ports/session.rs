//! Session manager port

use async_trait::async_trait;

use vestibule_domain::CredentialTokens;

/// Errors that can occur while completing a login.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SessionError {
    /// The session manager rejected the credential bundle.
    #[error("login rejected: {0}")]
    Rejected(String),
}

/// Port for the session manager owning the authenticated session.
///
/// The session manager persists the resume target across the redirect to
/// the identity provider and performs the final navigation once tokens
/// are exchanged.
#[async_trait]
pub trait SessionManager: Send + Sync {
    /// The URI the user originally attempted to reach, if one was stored.
    async fn original_uri(&self) -> Option<String>;

    /// Stores the URI the user should land on after authentication.
    async fn set_original_uri(&self, uri: &str);

    /// Exchanges the tokens for an active session and navigates to the
    /// stored resume target.
    ///
    /// # Errors
    /// Returns a [`SessionError`] if the bundle is rejected.
    async fn complete_login(&self, tokens: CredentialTokens) -> Result<(), SessionError>;
}
