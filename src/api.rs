use crate::config::get_config;
use crate::errors::{MentorError, MentorResult};
use log::debug;
use reqwest::Client;
use serde_json::{json, Value};

// Generation parameters are fixed; only the credential and endpoint come from config.
pub const TEMPERATURE: f32 = 0.7;
pub const TOP_K: u32 = 40;
pub const TOP_P: f32 = 0.95;
pub const MAX_OUTPUT_TOKENS: u32 = 800;

/// Client for the generative-text endpoint. One POST per call; no retry, no
/// timeout, no cancellation — the call resolves or rejects exactly once.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: Client,
    base_url: String,
    model: String,
    api_key: String,
}

impl GeminiClient {
    pub fn new(
        base_url: impl Into<String>,
        model: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into(),
            model: model.into(),
            api_key: api_key.into(),
        }
    }

    pub fn from_config() -> Self {
        let config = get_config();
        Self::new(config.api_base_url, config.model, config.api_key)
    }

    /// Sends one prompt and returns the generated text, trimmed.
    pub async fn generate(&self, prompt: &str) -> MentorResult<String> {
        if self.api_key.is_empty() {
            return Err(MentorError::config_error(
                "no API key configured; set GEMINI_API_KEY or edit the config file",
            ));
        }

        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );

        let payload = json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
            "generationConfig": {
                "temperature": TEMPERATURE,
                "topK": TOP_K,
                "topP": TOP_P,
                "maxOutputTokens": MAX_OUTPUT_TOKENS,
            }
        });

        debug!("sending generation request ({} prompt chars)", prompt.len());

        let response = self
            .http
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&payload)
            .send()
            .await
            .map_err(|e| MentorError::network_error(format!("request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(MentorError::transport_error(status.as_u16()));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| MentorError::shape_error(format!("failed to parse response body: {}", e)))?;

        let text = body["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .ok_or_else(|| MentorError::shape_error("response missing candidate text"))?;

        Ok(text.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_MODEL;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn endpoint_path() -> String {
        format!("/v1beta/models/{}:generateContent", DEFAULT_MODEL)
    }

    #[tokio::test]
    async fn test_generate_extracts_and_trims_candidate_text() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(endpoint_path()))
            .and(query_param("key", "test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [{
                    "content": { "parts": [{ "text": "  Keep practicing History!\n" }] }
                }]
            })))
            .mount(&server)
            .await;

        let client = GeminiClient::new(server.uri(), DEFAULT_MODEL, "test-key");
        let reply = client.generate("any prompt").await.unwrap();
        assert_eq!(reply, "Keep practicing History!");
    }

    #[tokio::test]
    async fn test_non_success_status_is_a_transport_error_with_the_status() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(endpoint_path()))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = GeminiClient::new(server.uri(), DEFAULT_MODEL, "test-key");
        let err = client.generate("any prompt").await.unwrap_err();
        assert!(matches!(err, MentorError::Transport { status: 500 }));
    }

    #[tokio::test]
    async fn test_missing_candidate_path_is_a_shape_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(endpoint_path()))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": []
            })))
            .mount(&server)
            .await;

        let client = GeminiClient::new(server.uri(), DEFAULT_MODEL, "test-key");
        let err = client.generate("any prompt").await.unwrap_err();
        assert!(matches!(err, MentorError::Shape(_)));
    }

    #[tokio::test]
    async fn test_missing_api_key_fails_before_any_network_call() {
        let server = MockServer::start().await;

        // No request may reach the server when the credential is absent.
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let client = GeminiClient::new(server.uri(), DEFAULT_MODEL, "");
        let err = client.generate("any prompt").await.unwrap_err();
        assert!(matches!(err, MentorError::Config(_)));
    }
}
