//! Factor enrollment port
//!
//! Enrollment against the identity provider is a pending integration. The
//! port keeps it swappable: the shipped implementation simulates the call
//! with a timed hold, and a real provider adapter can replace it without
//! touching the router.

use async_trait::async_trait;

/// Errors that can occur during factor enrollment.
#[derive(Debug, Clone, thiserror::Error)]
pub enum EnrollmentError {
    /// The provider rejected the enrollment.
    #[error("enrollment rejected: {0}")]
    Rejected(String),

    /// The provider could not be reached.
    #[error("enrollment service unavailable: {0}")]
    Unavailable(String),
}

/// Port for enrolling the user's factor with the identity provider.
#[async_trait]
pub trait EnrollmentService: Send + Sync {
    /// Starts enrollment for the captured identifier, if one was captured.
    ///
    /// # Errors
    /// Returns an [`EnrollmentError`] if the provider rejects the request
    /// or cannot be reached.
    async fn enroll(&self, identifier: Option<&str>) -> Result<(), EnrollmentError>;
}
