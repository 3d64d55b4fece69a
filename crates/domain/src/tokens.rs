//! Credential token bundle.

use std::fmt;

use chrono::{DateTime, Utc};

/// Opaque bundle of tokens issued on successful sign-in.
///
/// The orchestrator forwards the bundle to the session manager exactly once
/// and never interprets its contents. `Debug` output reports which tokens
/// are present without exposing their material.
#[derive(Clone, PartialEq, Eq)]
pub struct CredentialTokens {
    id_token: Option<String>,
    access_token: Option<String>,
    refresh_token: Option<String>,
    received_at: DateTime<Utc>,
}

impl CredentialTokens {
    /// Creates a bundle stamped with the current time.
    #[must_use]
    pub fn new(
        id_token: Option<String>,
        access_token: Option<String>,
        refresh_token: Option<String>,
    ) -> Self {
        Self {
            id_token,
            access_token,
            refresh_token,
            received_at: Utc::now(),
        }
    }

    /// Creates a bundle carrying an id and access token.
    #[must_use]
    pub fn bearer(id_token: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self::new(Some(id_token.into()), Some(access_token.into()), None)
    }

    /// The identity token, if issued.
    #[must_use]
    pub fn id_token(&self) -> Option<&str> {
        self.id_token.as_deref()
    }

    /// The access token, if issued.
    #[must_use]
    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }

    /// The refresh token, if issued.
    #[must_use]
    pub fn refresh_token(&self) -> Option<&str> {
        self.refresh_token.as_deref()
    }

    /// When the bundle was received from the widget.
    #[must_use]
    pub const fn received_at(&self) -> DateTime<Utc> {
        self.received_at
    }

    /// True if no token was issued at all.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.id_token.is_none() && self.access_token.is_none() && self.refresh_token.is_none()
    }
}

impl fmt::Debug for CredentialTokens {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialTokens")
            .field("id_token", &redact(self.id_token.as_deref()))
            .field("access_token", &redact(self.access_token.as_deref()))
            .field("refresh_token", &redact(self.refresh_token.as_deref()))
            .field("received_at", &self.received_at)
            .finish()
    }
}

fn redact(token: Option<&str>) -> &'static str {
    match token {
        Some(_) => "<present>",
        None => "<absent>",
    }
}
