//! REST client for the Realtime Database wire protocol.
//!
//! Every node of the tree is addressed as `{base_url}{path}.json`. Reads
//! are GETs (with `shallow=true` for child listings), writes are
//! PUT/PATCH/POST, removal is DELETE. Values on the wire are plain JSON.

use reqwest::{Method, StatusCode, Url};
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::error::{Result, RtdbError};
use crate::http::HttpClient;

/// Response body of a push (POST) request.
#[derive(Debug, Deserialize)]
struct PushResponse {
    /// Server-generated child name, unique and time-ordered.
    name: String,
}

/// Error body the database attaches to non-2xx responses.
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: String,
}

/// Client for one Realtime Database instance.
///
/// Holds the normalized base URL and an optional auth token. The client
/// performs no retries and keeps no cache; a failed call surfaces its
/// error immediately.
#[derive(Debug)]
pub struct RtdbClient {
    http: HttpClient,
    base_url: String,
    auth_token: Option<String>,
}

impl RtdbClient {
    /// Create a client for the database at `url`.
    ///
    /// The URL is validated eagerly so a bad address fails at startup
    /// rather than on the first command. A trailing slash is stripped to
    /// keep endpoint assembly uniform.
    pub fn new(url: &str, auth_token: Option<String>) -> Result<Self> {
        let parsed = Url::parse(url)
            .map_err(|e| RtdbError::ConfigError(format!("invalid database URL {url:?}: {e}")))?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(RtdbError::ConfigError(format!(
                "invalid database URL {url:?}: expected http or https"
            )));
        }

        Ok(Self {
            http: HttpClient::new()?,
            base_url: url.trim_end_matches('/').to_string(),
            auth_token,
        })
    }

    /// The normalized base URL this client talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch the full value stored at `path`.
    pub async fn get(&self, path: &str) -> Result<Value> {
        let body = self.send(Method::GET, path, false, None).await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Fetch the shallow value at `path`: for objects, the child names
    /// mapped to `true` placeholders; scalars come back whole.
    pub async fn get_shallow(&self, path: &str) -> Result<Value> {
        let body = self.send(Method::GET, path, true, None).await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Overwrite the value at `path`.
    pub async fn put(&self, path: &str, value: &Value) -> Result<()> {
        let body = serde_json::to_string(value)?;
        self.send(Method::PUT, path, false, Some(body)).await?;
        Ok(())
    }

    /// Merge the given children into the object at `path`.
    pub async fn patch(&self, path: &str, entries: &Map<String, Value>) -> Result<()> {
        let body = serde_json::to_string(entries)?;
        self.send(Method::PATCH, path, false, Some(body)).await?;
        Ok(())
    }

    /// Create a new uniquely named child under `path` holding `value`.
    ///
    /// # Returns
    /// The absolute path of the generated child.
    pub async fn push(&self, path: &str, value: &Value) -> Result<String> {
        let body = serde_json::to_string(value)?;
        let response = self.send(Method::POST, path, false, Some(body)).await?;
        let pushed: PushResponse = serde_json::from_str(&response)?;

        if path == "/" {
            Ok(format!("/{}", pushed.name))
        } else {
            Ok(format!("{}/{}", path, pushed.name))
        }
    }

    /// Remove the value at `path` and all its descendants.
    pub async fn delete(&self, path: &str) -> Result<()> {
        self.send(Method::DELETE, path, false, None).await?;
        Ok(())
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        shallow: bool,
        body: Option<String>,
    ) -> Result<String> {
        let url = self.endpoint(path, shallow);
        debug!(%method, path, "rtdb request");

        let (status, text) = self.http.send(method, &url, body).await?;
        if !status.is_success() {
            warn!(%status, path, "rtdb request failed");
            return Err(decode_error(status, &text));
        }

        Ok(text)
    }

    /// Assemble the REST endpoint for `path`. The auth token, when
    /// present, rides along as a query parameter.
    fn endpoint(&self, path: &str, shallow: bool) -> String {
        let mut url = format!("{}{}.json", self.base_url, path);

        let mut sep = '?';
        if let Some(token) = &self.auth_token {
            url.push(sep);
            url.push_str("auth=");
            url.push_str(token);
            sep = '&';
        }
        if shallow {
            url.push(sep);
            url.push_str("shallow=true");
        }

        url
    }
}

/// Turn an error response into an `RtdbError`, preferring the server's
/// own diagnostic when the body carries one.
fn decode_error(status: StatusCode, body: &str) -> RtdbError {
    match serde_json::from_str::<ErrorResponse>(body) {
        Ok(parsed) => RtdbError::ApiError {
            status: status.as_u16(),
            message: parsed.error,
        },
        Err(_) => RtdbError::HttpError(status.as_u16()),
    }
}
