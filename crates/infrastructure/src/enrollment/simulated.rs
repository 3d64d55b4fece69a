//! Simulated factor enrollment.

use std::time::Duration;

use async_trait::async_trait;

use vestibule_application::{EnrollmentError, EnrollmentService};

/// [`EnrollmentService`] that stands in for the provider integration.
///
/// Holds for a fixed duration and reports success, which keeps the
/// enrollment screen's timing observable while the real provider call is
/// still pending integration.
pub struct SimulatedEnrollment {
    hold: Duration,
}

impl SimulatedEnrollment {
    /// Creates a simulation holding for `hold` before reporting success.
    #[must_use]
    pub const fn new(hold: Duration) -> Self {
        Self { hold }
    }
}

#[async_trait]
impl EnrollmentService for SimulatedEnrollment {
    async fn enroll(&self, identifier: Option<&str>) -> Result<(), EnrollmentError> {
        match identifier {
            Some(identifier) => tracing::info!(%identifier, "simulating factor enrollment"),
            None => tracing::info!("simulating factor enrollment without an identifier"),
        }
        tokio::time::sleep(self.hold).await;
        Ok(())
    }
}
