//! Orchestrator configuration.
//!
//! A static record read once at construction: identity-provider settings,
//! widget display options, flow timings, and the logging filter. The core
//! never mutates it.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{DomainError, DomainResult};

/// Identity-provider settings for the hosted widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Issuer URL, typically `<base>/oauth2/<server-id>`.
    pub issuer: String,

    /// OAuth client identifier registered with the provider.
    pub client_id: String,

    /// Redirect URI the provider sends the user back to.
    pub redirect_uri: String,

    /// Scopes requested with each sign-in.
    #[serde(default = "default_scopes")]
    pub scopes: Vec<String>,

    /// Whether the token-exchange sign-in variant is enabled.
    #[serde(default)]
    pub token_exchange: bool,
}

impl ProviderConfig {
    /// The provider's base URL: the issuer with any `/oauth2` suffix cut off.
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.issuer.split("/oauth2").next().unwrap_or(&self.issuer)
    }

    /// Checks that the record is complete enough to start a flow.
    ///
    /// # Errors
    /// Returns a [`DomainError`] naming the first invalid field.
    pub fn validate(&self) -> DomainResult<()> {
        let issuer = Url::parse(&self.issuer)
            .map_err(|e| DomainError::InvalidIssuer(format!("{}: {e}", self.issuer)))?;
        if issuer.scheme() != "http" && issuer.scheme() != "https" {
            return Err(DomainError::InvalidIssuer(self.issuer.clone()));
        }
        if self.client_id.trim().is_empty() {
            return Err(DomainError::MissingClientId);
        }
        Url::parse(&self.redirect_uri)
            .map_err(|e| DomainError::InvalidRedirectUri(format!("{}: {e}", self.redirect_uri)))?;
        if self.scopes.is_empty() {
            return Err(DomainError::EmptyScopes);
        }
        Ok(())
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            issuer: "https://id.example.com/oauth2/default".to_string(),
            client_id: "demo-client".to_string(),
            redirect_uri: "http://localhost:4200/login/callback".to_string(),
            scopes: default_scopes(),
            token_exchange: false,
        }
    }
}

fn default_scopes() -> Vec<String> {
    vec![
        "openid".to_string(),
        "profile".to_string(),
        "email".to_string(),
    ]
}

/// Display options passed through to the widget at construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct WidgetOptions {
    /// Title override for the primary credential screen.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Logo asset path or URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
}

/// Durations driving the flow's timers.
///
/// The observed defaults are a 3 second enrollment hold and two independent
/// 300 second windows on the verification screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowTimings {
    /// Seconds the enrollment placeholder holds before navigating back.
    #[serde(default = "default_enrollment_hold_secs")]
    pub enrollment_hold_secs: u64,

    /// Seconds the resend-code control stays locked after auto-send.
    #[serde(default = "default_countdown_secs")]
    pub resend_lock_secs: u64,

    /// Seconds the confirm control stays active before expiring.
    #[serde(default = "default_countdown_secs")]
    pub confirm_window_secs: u64,
}

impl FlowTimings {
    /// The enrollment hold as a [`Duration`].
    #[must_use]
    pub const fn enrollment_hold(&self) -> Duration {
        Duration::from_secs(self.enrollment_hold_secs)
    }

    /// The resend lock window as a [`Duration`].
    #[must_use]
    pub const fn resend_lock(&self) -> Duration {
        Duration::from_secs(self.resend_lock_secs)
    }

    /// The confirm window as a [`Duration`].
    #[must_use]
    pub const fn confirm_window(&self) -> Duration {
        Duration::from_secs(self.confirm_window_secs)
    }
}

impl Default for FlowTimings {
    fn default() -> Self {
        Self {
            enrollment_hold_secs: default_enrollment_hold_secs(),
            resend_lock_secs: default_countdown_secs(),
            confirm_window_secs: default_countdown_secs(),
        }
    }
}

const fn default_enrollment_hold_secs() -> u64 {
    3
}

const fn default_countdown_secs() -> u64 {
    300
}

/// Logging preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Tracing filter directive, e.g. `vestibule=debug`.
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
        }
    }
}

fn default_log_filter() -> String {
    "vestibule=info".to_string()
}

/// Top-level application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// Identity-provider settings.
    #[serde(default)]
    pub provider: ProviderConfig,

    /// Widget display options.
    #[serde(default)]
    pub widget: WidgetOptions,

    /// Flow timing durations.
    #[serde(default)]
    pub timings: FlowTimings,

    /// Logging preferences.
    #[serde(default)]
    pub logging: LoggingConfig,
}
