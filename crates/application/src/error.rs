//! Flow error types

use thiserror::Error;
use vestibule_domain::Selector;

use crate::ports::{SessionError, ViewError, WidgetError};

/// Errors surfaced while orchestrating the sign-in flow.
#[derive(Debug, Clone, Error)]
pub enum FlowError {
    /// The widget rejected the sign-in attempt. Not recoverable locally.
    #[error("sign-in failed: {0}")]
    SignIn(#[from] WidgetError),

    /// A control the current view's setup depends on is missing.
    #[error("required control missing: {selector}")]
    MissingControl {
        /// Selector that failed to resolve.
        selector: Selector,
    },

    /// The session manager rejected the completed login.
    #[error("login completion failed: {0}")]
    Completion(#[from] SessionError),
}

impl From<ViewError> for FlowError {
    fn from(error: ViewError) -> Self {
        let ViewError::MissingTarget(selector) = error;
        Self::MissingControl { selector }
    }
}

/// Result type alias for flow operations.
pub type FlowResult<T> = Result<T, FlowError>;
