//! HTTP utilities for Better Uptime REST API calls

use super::error::ApiError;
use reqwest::{Client, Method, StatusCode};
use serde_json::Value;

/// Maximum length of response body to log (to avoid logging sensitive data)
const MAX_LOG_BODY_LENGTH: usize = 200;

/// Sanitize response body for logging
/// Truncates long responses and strips non-printable characters
fn sanitize_for_log(body: &str) -> String {
    let truncated = if body.len() > MAX_LOG_BODY_LENGTH {
        // Cut on a char boundary: bodies are arbitrary UTF-8 and a multibyte
        // character may straddle the byte limit.
        let end = (0..=MAX_LOG_BODY_LENGTH)
            .rev()
            .find(|&i| body.is_char_boundary(i))
            .unwrap_or(0);
        format!("{}... [truncated, {} bytes total]", &body[..end], body.len())
    } else {
        body.to_string()
    };

    truncated.replace(|c: char| !c.is_ascii_graphic() && c != ' ', "")
}

/// HTTP client wrapper for Better Uptime API calls
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Create a new HTTP client
    pub fn new() -> Result<Self, ApiError> {
        let client = Client::builder()
            .user_agent(concat!("betteruptime-provider/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client })
    }

    /// Make a GET request to the API
    pub async fn get(&self, url: &str, token: &str) -> Result<Value, ApiError> {
        self.request(Method::GET, url, token, None).await
    }

    /// Make a POST request to the API
    pub async fn post(&self, url: &str, token: &str, body: Option<&Value>) -> Result<Value, ApiError> {
        self.request(Method::POST, url, token, body).await
    }

    /// Make a PATCH request to the API
    pub async fn patch(&self, url: &str, token: &str, body: Option<&Value>) -> Result<Value, ApiError> {
        self.request(Method::PATCH, url, token, body).await
    }

    /// Make a DELETE request to the API
    pub async fn delete(&self, url: &str, token: &str) -> Result<Value, ApiError> {
        self.request(Method::DELETE, url, token, None).await
    }

    async fn request(
        &self,
        method: Method,
        url: &str,
        token: &str,
        body: Option<&Value>,
    ) -> Result<Value, ApiError> {
        tracing::debug!("{} {}", method, url);

        let mut request = self.client.request(method, url).bearer_auth(token);

        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;

        let status = response.status();
        let response_body = response.text().await?;

        if !status.is_success() {
            // Security: Only log sanitized/truncated error body to avoid leaking sensitive data
            tracing::error!("API error: {} - {}", status, sanitize_for_log(&response_body));
            return Err(classify_failure(status, response_body));
        }

        // Handle empty response (e.g. 204 on delete)
        if response_body.is_empty() {
            return Ok(Value::Null);
        }

        Ok(serde_json::from_str(&response_body)?)
    }
}

/// Map a non-2xx status onto the error taxonomy
fn classify_failure(status: StatusCode, body: String) -> ApiError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ApiError::Unauthorized { status, body },
        StatusCode::NOT_FOUND => ApiError::NotFound,
        _ => ApiError::Remote { status, body },
    }
}
