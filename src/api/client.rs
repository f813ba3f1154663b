use super::ImageApi;
use crate::models::{GenerationRequest, GenerationResponse};
use crate::prompts;
use crate::settings::Settings;
use crate::{Error, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;

const REQUEST_TIMEOUT_SECS: u64 = 60;
const MODEL: &str = "wanxiang";

pub struct ImageApiClient {
    client: Client,
}

impl ImageApiClient {
    pub fn new() -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("Failed to build HTTP client");

        Self { client }
    }

    pub fn new_with_client(client: Client) -> Self {
        Self { client }
    }
}

impl Default for ImageApiClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ImageApi for ImageApiClient {
    async fn request_image(&self, title: &str, settings: &Settings) -> Result<String> {
        let cleaned = prompts::clean_title(title)?;
        let request = GenerationRequest {
            model: MODEL.to_string(),
            prompt: prompts::build_prompt(&cleaned),
        };

        tracing::debug!("Sending image generation request to {}", settings.api_url);

        let response = self
            .client
            .post(&settings.api_url)
            .header("Authorization", format!("Bearer {}", settings.api_key))
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to send request to image API: {}", e);
                Error::RemoteRequestFailed(format!("Transport error: {}", e))
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!("Image API error (status {}): {}", status, error_text);
            return Err(Error::RemoteRequestFailed(format!(
                "API error (status {}): {}",
                status, error_text
            )));
        }

        let body: GenerationResponse = response.json().await.map_err(|e| {
            tracing::error!("Malformed image API response: {}", e);
            Error::RemoteRequestFailed(format!("Malformed response: {}", e))
        })?;

        body.data
            .into_iter()
            .next()
            .map(|image| image.url)
            .ok_or_else(|| {
                tracing::error!("Image API returned no image entries");
                Error::RemoteRequestFailed("No image URL in response".to_string())
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_settings(server: &MockServer) -> Settings {
        Settings {
            auto_generate: false,
            api_key: "test-key".to_string(),
            api_url: format!("{}/v1/images/generations", server.uri()),
        }
    }

    #[tokio::test]
    async fn test_request_image_success() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/images/generations"))
            .and(header("Authorization", "Bearer test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [{"url": "http://img/x.png"}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = ImageApiClient::new_with_client(reqwest::Client::new());
        let url = client
            .request_image("a red bicycle", &test_settings(&server))
            .await
            .unwrap();

        assert_eq!(url, "http://img/x.png");
    }

    #[tokio::test]
    async fn test_request_body_carries_model_and_prompt() {
        let server = MockServer::start().await;

        let expected_body = json!({
            "model": "wanxiang",
            "prompt": crate::prompts::build_prompt("a red bicycle"),
        });

        Mock::given(method("POST"))
            .and(body_json(&expected_body))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [{"url": "http://img/x.png"}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = ImageApiClient::new();
        client
            .request_image("a red bicycle", &test_settings(&server))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_request_image_non_200_status() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("upstream broke"))
            .mount(&server)
            .await;

        let client = ImageApiClient::new();
        let err = client
            .request_image("a red bicycle", &test_settings(&server))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::RemoteRequestFailed(_)));
    }

    #[tokio::test]
    async fn test_request_image_malformed_body() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json at all"))
            .mount(&server)
            .await;

        let client = ImageApiClient::new();
        let err = client
            .request_image("a red bicycle", &test_settings(&server))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::RemoteRequestFailed(_)));
    }

    #[tokio::test]
    async fn test_request_image_missing_url_field() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
            .mount(&server)
            .await;

        let client = ImageApiClient::new();
        let err = client
            .request_image("a red bicycle", &test_settings(&server))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::RemoteRequestFailed(_)));
    }

    #[tokio::test]
    async fn test_request_image_rejects_empty_title_without_network_call() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let client = ImageApiClient::new();
        let err = client
            .request_image("   ", &test_settings(&server))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::InvalidInput(_)));
    }
}
