//! Request builder and response parser for the submission endpoint.
//!
//! # Design
//! `RegistrationClient` holds only the endpoint URL. `build_submit` turns a
//! `FormRecord` into an `HttpRequest` and `parse_submit` turns the matching
//! `HttpResponse` into an acknowledgment or a rejection. The caller executes
//! the round-trip in between.

use serde_json::Value;
use tracing::debug;

use crate::error::{ApiError, Rejection};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::record::FormRecord;

/// Where the form posts unless told otherwise.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:6080/submit";

/// A 2xx answer to a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Acknowledgement {
    pub status: u16,
    pub message: String,
}

/// Synchronous, stateless client for the submission endpoint.
#[derive(Debug, Clone)]
pub struct RegistrationClient {
    endpoint: String,
}

impl Default for RegistrationClient {
    fn default() -> Self {
        Self::new(DEFAULT_ENDPOINT)
    }
}

impl RegistrationClient {
    pub fn new(endpoint: &str) -> Self {
        Self {
            endpoint: endpoint.trim().to_string(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn build_submit(&self, record: &FormRecord) -> Result<HttpRequest, ApiError> {
        let body =
            serde_json::to_string(record).map_err(|e| ApiError::SerializationError(e.to_string()))?;
        debug!(endpoint = %self.endpoint, fields = record.len(), "built submit request");
        Ok(HttpRequest {
            method: HttpMethod::Post,
            url: self.endpoint.clone(),
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(body),
        })
    }

    /// Interpret the server's answer. Any 2xx is an acknowledgment; anything
    /// else is a `Rejection`. The body's `message` is used when present.
    pub fn parse_submit(&self, response: HttpResponse) -> Result<Acknowledgement, Rejection> {
        let message = extract_message(&response.body);
        if response.is_success() {
            return Ok(Acknowledgement {
                status: response.status,
                message: message.unwrap_or_else(|| "Submitted".to_string()),
            });
        }
        Err(Rejection {
            status: response.status,
            message: message
                .unwrap_or_else(|| format!("Submission failed (HTTP {})", response.status)),
        })
    }
}

/// Pull a displayable message out of a JSON body.
///
/// `message` is preferred; a string `detail` (the shape FastAPI uses for
/// `HTTPException`) is accepted as a fallback. Non-JSON bodies yield `None`.
fn extract_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    ["message", "detail"]
        .iter()
        .find_map(|key| value.get(key).and_then(Value::as_str))
        .map(str::to_string)
}
