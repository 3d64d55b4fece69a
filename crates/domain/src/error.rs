//! Domain error types

use thiserror::Error;

/// Domain-level errors that can occur during validation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The issuer URL is invalid or malformed.
    #[error("invalid issuer URL: {0}")]
    InvalidIssuer(String),

    /// The redirect URI is invalid or malformed.
    #[error("invalid redirect URI: {0}")]
    InvalidRedirectUri(String),

    /// No client identifier was configured.
    #[error("client identifier is required")]
    MissingClientId,

    /// The scope list is empty.
    #[error("at least one scope is required")]
    EmptyScopes,
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
