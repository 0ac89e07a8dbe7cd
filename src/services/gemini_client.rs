use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use super::wire::{GenerateContentRequest, GenerateContentResponse};
use crate::error::TransportError;

/// One `generateContent` exchange against some endpoint.
///
/// [`HttpTransport`] is the real implementation; tests substitute their own.
#[async_trait]
pub trait ModelTransport: Send + Sync + std::fmt::Debug {
    async fn generate_content(
        &self,
        call: &ModelCall<'_>,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, TransportError>;
}

/// Per-call parameters resolved by the assistant.
#[derive(Debug, Clone)]
pub struct ModelCall<'a> {
    pub api_key: &'a str,
    pub base_url: &'a str,
    pub model: &'a str,
    pub timeout: Option<Duration>,
}

impl ModelCall<'_> {
    pub fn url(&self) -> String {
        build_generate_url(self.base_url, self.model)
    }
}

/// reqwest-backed transport. A fresh client is built for every call.
#[derive(Debug, Default, Clone)]
pub struct HttpTransport;

#[async_trait]
impl ModelTransport for HttpTransport {
    async fn generate_content(
        &self,
        call: &ModelCall<'_>,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, TransportError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = call.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        let url = call.url();
        debug!(target: "safar::transport", %url, contents = request.contents.len(), "sending generateContent");

        let response = client
            .post(&url)
            .header("x-goog-api-key", call.api_key)
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(|err| classify(err, call.timeout))?;

        let status = response.status();
        let response_text = response
            .text()
            .await
            .map_err(|err| classify(err, call.timeout))?;

        if !status.is_success() {
            return Err(TransportError::Status {
                status: status.as_u16(),
                message: api_error_message(&response_text),
            });
        }

        Ok(serde_json::from_str(&response_text)?)
    }
}

fn classify(err: reqwest::Error, timeout: Option<Duration>) -> TransportError {
    match timeout {
        Some(limit) if err.is_timeout() => TransportError::Timeout(limit),
        _ => TransportError::Http(err),
    }
}

/// Pull `error.message` out of an error body, falling back to the raw text.
fn api_error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|json| {
            json.get("error")
                .and_then(|error| error.get("message"))
                .and_then(Value::as_str)
                .map(str::to_string)
        })
        .unwrap_or_else(|| body.to_string())
}

fn build_generate_url(base_url: &str, model: &str) -> String {
    let trimmed = base_url.trim_end_matches('/');
    if trimmed.ends_with(":generateContent") {
        return trimmed.to_string();
    }
    let model = model.trim_start_matches("models/");
    format!("{}/models/{}:generateContent", trimmed, model)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_from_base_and_model() {
        assert_eq!(
            build_generate_url(
                "https://generativelanguage.googleapis.com/v1beta/",
                "gemini-2.5-flash"
            ),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash:generateContent"
        );
        assert_eq!(
            build_generate_url("http://localhost:1234", "models/custom"),
            "http://localhost:1234/models/custom:generateContent"
        );
        assert_eq!(
            build_generate_url("http://proxy/x:generateContent", "ignored"),
            "http://proxy/x:generateContent"
        );
    }

    #[test]
    fn error_message_extraction() {
        let body = r#"{"error": {"code": 400, "message": "API key not valid.", "status": "INVALID_ARGUMENT"}}"#;
        assert_eq!(api_error_message(body), "API key not valid.");
        assert_eq!(api_error_message("Bad Gateway"), "Bad Gateway");
    }
}
