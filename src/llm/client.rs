use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};

use crate::llm::error::LlmError;
use crate::llm::types::*;

/// Google Gemini API client
pub struct GeminiClient {
    api_key: String,
    base_url: String,
    http_client: reqwest::Client,
}

impl GeminiClient {
    pub fn new(api_key: impl Into<String>) -> Result<Self, LlmError> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(LlmError::authentication("API key cannot be empty"));
        }

        let http_client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(300))
            .build()
            .map_err(|e| LlmError::Network { source: e })?;

        Ok(Self {
            api_key,
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            http_client,
        })
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Single prompt in, trimmed text out. Returns EmptyResponse when the
    /// model answers with no usable text.
    pub async fn generate_text(&self, model: &str, prompt: &str) -> Result<String, LlmError> {
        let request = GeminiGenerateContentRequest {
            contents: vec![GeminiContent {
                role: GeminiRole::User,
                parts: vec![GeminiPart {
                    text: Some(prompt.to_string()),
                }],
            }],
        };

        let response = self.generate_content(model, request).await?;

        let text = response
            .candidates
            .first()
            .map(|candidate| {
                candidate
                    .content
                    .parts
                    .iter()
                    .filter_map(|part| part.text.as_deref())
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        let text = text.trim();
        if text.is_empty() {
            return Err(LlmError::EmptyResponse);
        }

        Ok(text.to_string())
    }

    pub async fn generate_content(
        &self,
        model: &str,
        request: GeminiGenerateContentRequest,
    ) -> Result<GeminiGenerateContentResponse, LlmError> {
        let url = format!("{}/v1beta/models/{}:generateContent", self.base_url, model);

        let mut headers = HeaderMap::new();
        headers.insert(
            "x-goog-api-key",
            HeaderValue::from_str(&self.api_key)
                .map_err(|e| LlmError::authentication(format!("Invalid API key format: {}", e)))?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let response = self
            .http_client
            .post(&url)
            .headers(headers)
            .json(&request)
            .send()
            .await
            .map_err(|e| LlmError::Network { source: e })?;

        let status = response.status();

        if !status.is_success() {
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read error response".to_string());

            if let Ok(error_response) = serde_json::from_str::<GeminiErrorResponse>(&error_body) {
                return Err(Self::map_error(
                    error_response.error.code,
                    error_response.error.message,
                ));
            }

            return Err(LlmError::api_error(status.as_u16(), error_body));
        }

        let generate_response = response
            .json::<GeminiGenerateContentResponse>()
            .await
            .map_err(|e| LlmError::internal(format!("Failed to parse response: {}", e)))?;

        Ok(generate_response)
    }

    fn map_error(status: u16, message: String) -> LlmError {
        match status {
            400 => LlmError::invalid_request(message),
            401 | 403 => LlmError::Authentication { message },
            429 => LlmError::rate_limit(message, None),
            _ => LlmError::api_error(status, message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = GeminiClient::new("test-key");
        assert!(client.is_ok());
    }

    #[test]
    fn test_client_creation_empty_key() {
        let client = GeminiClient::new("");
        assert!(client.is_err());
    }

    #[tokio::test]
    async fn generate_text_trims_model_output() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1beta/models/gemini-test:generateContent")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{
                    "candidates": [{
                        "content": {
                            "role": "model",
                            "parts": [{"text": "  SELECT COUNT(*) FROM colaboradores\n"}]
                        },
                        "finishReason": "STOP"
                    }],
                    "modelVersion": "gemini-test"
                }"#,
            )
            .create_async()
            .await;

        let client = GeminiClient::new("test-key")
            .unwrap()
            .with_base_url(server.url());

        let text = client
            .generate_text("gemini-test", "¿Cuantos colaboradores existen?")
            .await
            .unwrap();

        assert_eq!(text, "SELECT COUNT(*) FROM colaboradores");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn generate_text_empty_candidates_is_an_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/v1beta/models/gemini-test:generateContent")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"modelVersion": "gemini-test"}"#)
            .create_async()
            .await;

        let client = GeminiClient::new("test-key")
            .unwrap()
            .with_base_url(server.url());

        let err = client
            .generate_text("gemini-test", "anything")
            .await
            .unwrap_err();

        assert!(matches!(err, LlmError::EmptyResponse));
    }

    #[tokio::test]
    async fn generate_text_whitespace_only_is_an_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/v1beta/models/gemini-test:generateContent")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{
                    "candidates": [{
                        "content": {"role": "model", "parts": [{"text": "   \n"}]},
                        "finishReason": "STOP"
                    }]
                }"#,
            )
            .create_async()
            .await;

        let client = GeminiClient::new("test-key")
            .unwrap()
            .with_base_url(server.url());

        let err = client
            .generate_text("gemini-test", "anything")
            .await
            .unwrap_err();

        assert!(matches!(err, LlmError::EmptyResponse));
    }

    #[tokio::test]
    async fn api_error_status_is_mapped() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/v1beta/models/gemini-test:generateContent")
            .with_status(403)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"error": {"code": 403, "message": "API key not valid", "status": "PERMISSION_DENIED"}}"#,
            )
            .create_async()
            .await;

        let client = GeminiClient::new("bad-key")
            .unwrap()
            .with_base_url(server.url());

        let err = client
            .generate_text("gemini-test", "anything")
            .await
            .unwrap_err();

        assert!(matches!(err, LlmError::Authentication { .. }));
    }
}
