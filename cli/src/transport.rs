//! ureq-backed `Transport`.

use registration_core::{HttpMethod, HttpRequest, HttpResponse, Transport, TransportError};

/// Executes requests with a blocking ureq agent.
///
/// Status codes are never turned into errors here: every response the server
/// sent comes back as data and only connection-level failures are `Err`.
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl UreqTransport {
    pub fn new() -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Transport for UreqTransport {
    fn execute(&self, req: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut builder = match req.method {
            HttpMethod::Post => self.agent.post(&req.url),
        };
        for (key, value) in &req.headers {
            builder = builder.header(key.as_str(), value.as_str());
        }
        let result = match req.body.as_deref() {
            Some(body) => builder.send(body.as_bytes()),
            None => builder.send_empty(),
        };
        let mut response = result.map_err(TransportError::new)?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(k, v)| Some((k.as_str().to_string(), v.to_str().ok()?.to_string())))
            .collect();
        // A body that cannot be read still settles the request by its status.
        let body = response.body_mut().read_to_string().unwrap_or_default();
        tracing::debug!(status, url = %req.url, "response received");
        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}
