//! HTTP client wrapper for database REST requests.

use std::time::Duration;

use reqwest::{Client, Method, StatusCode};

use crate::error::{Result, RtdbError};

/// Per-request timeout applied to every call made through the wrapper.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client for talking to the database's REST endpoint.
///
/// Unlike a general-purpose wrapper this one never treats a non-2xx
/// status as a transport failure: database errors arrive as JSON bodies
/// on error statuses, and the protocol layer wants to decode them.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Create a new HTTP client.
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(RtdbError::RequestError)?;

        Ok(Self { client })
    }

    /// Send a request and return the response status together with the
    /// raw body text.
    ///
    /// # Arguments
    /// * `method` - HTTP method to use
    /// * `url` - fully assembled request URL
    /// * `body` - optional JSON body, already serialized
    pub async fn send(
        &self,
        method: Method,
        url: &str,
        body: Option<String>,
    ) -> Result<(StatusCode, String)> {
        let mut request = self.client.request(method, url);
        if let Some(body) = body {
            request = request
                .header("Content-Type", "application/json")
                .body(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        Ok((status, text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        assert!(HttpClient::new().is_ok());
    }
}
