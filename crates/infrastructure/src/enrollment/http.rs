//! Factor enrollment over HTTP.
//!
//! Posts the enrollment request to the identity provider's factor
//! endpoint. Wire this in place of the simulation once the provider
//! integration is approved.

use async_trait::async_trait;
use reqwest::Url;
use serde::{Deserialize, Serialize};

use vestibule_application::{EnrollmentError, EnrollmentService};

/// Factor type enrolled for the user.
const FACTOR_TYPE: &str = "sms";

/// Enrollment request payload.
#[derive(Debug, Serialize)]
struct EnrollmentRequest<'a> {
    factor_type: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    identifier: Option<&'a str>,
}

/// Provider error payload.
#[derive(Debug, Deserialize)]
struct EnrollmentErrorResponse {
    #[serde(rename = "errorSummary")]
    error_summary: String,
}

/// [`EnrollmentService`] calling the provider's factor enrollment endpoint.
pub struct HttpEnrollment {
    http_client: reqwest::Client,
    endpoint: Url,
    bearer_token: Option<String>,
}

impl HttpEnrollment {
    /// Creates an enrollment client for the given endpoint.
    #[must_use]
    pub fn new(endpoint: Url) -> Self {
        Self {
            http_client: reqwest::Client::builder()
                .build()
                .unwrap_or_else(|_| reqwest::Client::new()),
            endpoint,
            bearer_token: None,
        }
    }

    /// Authenticates enrollment requests with a bearer token.
    #[must_use]
    pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }
}

#[async_trait]
impl EnrollmentService for HttpEnrollment {
    async fn enroll(&self, identifier: Option<&str>) -> Result<(), EnrollmentError> {
        let payload = EnrollmentRequest {
            factor_type: FACTOR_TYPE,
            identifier,
        };

        let mut request = self.http_client.post(self.endpoint.clone()).json(&payload);
        if let Some(token) = &self.bearer_token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| EnrollmentError::Unavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(EnrollmentError::Rejected(rejection_message(status.as_u16(), &body)));
        }

        tracing::info!(factor = FACTOR_TYPE, "factor enrollment accepted");
        Ok(())
    }
}

/// Extracts the provider's error summary, falling back to the raw body.
fn rejection_message(status: u16, body: &str) -> String {
    serde_json::from_str::<EnrollmentErrorResponse>(body).map_or_else(
        |_| format!("enrollment request failed with status {status}: {body}"),
        |parsed| parsed.error_summary,
    )
}
