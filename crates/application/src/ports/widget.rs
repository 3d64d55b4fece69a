//! Sign-in widget port

use async_trait::async_trait;

use vestibule_domain::CredentialTokens;

/// Errors surfaced by the sign-in widget.
#[derive(Debug, Clone, thiserror::Error)]
pub enum WidgetError {
    /// The widget rejected its configuration (client id, redirect URI).
    #[error("widget configuration rejected: {0}")]
    Misconfigured(String),

    /// The sign-in attempt ended before tokens were issued.
    #[error("sign-in interrupted: {0}")]
    Interrupted(String),
}

/// Options for mounting the widget's sign-in view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignInOptions {
    /// Selector of the element the widget renders into.
    pub mount: String,
    /// Scopes requested with the sign-in.
    pub scopes: Vec<String>,
}

impl SignInOptions {
    /// Creates sign-in options for the given mount point and scopes.
    pub fn new(mount: impl Into<String>, scopes: Vec<String>) -> Self {
        Self {
            mount: mount.into(),
            scopes,
        }
    }
}

/// Port for the externally supplied sign-in widget.
///
/// The widget renders and drives its own screens; the orchestrator only
/// starts the sign-in action, observes lifecycle events (delivered on a
/// channel wired at construction time), and tears the widget down.
#[async_trait]
pub trait SignInWidget: Send + Sync {
    /// Renders the sign-in view and resolves once the user completes
    /// authentication.
    ///
    /// # Errors
    /// Returns a [`WidgetError`] if the widget rejects its configuration or
    /// the attempt is interrupted.
    async fn show_sign_in(&self, options: SignInOptions) -> Result<CredentialTokens, WidgetError>;

    /// Unmounts the widget. Safe to call more than once.
    fn remove(&self);
}
