//! HTTP dispatch to the Gemini REST API.
//!
//! This is the production [`ProviderApi`] implementation: it owns the API
//! credential, builds keyed URLs, and translates provider error envelopes.

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::CONTENT_TYPE;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::api::{GenerateContentRequest, GenerateContentResponse, VideoJobRequest, VideoOperation};
use crate::client::{GatewayError, ProviderApi};
use crate::http::{add_extra_headers, append_key, build_http_client, RequestBuilderExt, ResponseExt};
use crate::options::TransportOptions;

/// Gemini client over HTTP.
#[derive(Debug, Clone)]
pub struct GeminiApi {
    api_key: String,
    base_url: String,
    transport: TransportOptions,
}

impl GeminiApi {
    pub const DEFAULT_BASE_URL: &'static str =
        "https://generativelanguage.googleapis.com/v1beta";

    /// Create a client against the public endpoint.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: Self::DEFAULT_BASE_URL.to_string(),
            transport: TransportOptions::default(),
        }
    }

    pub fn with_transport(mut self, transport: TransportOptions) -> Self {
        self.transport = transport;
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn model_url(&self, model: &str, verb: &str) -> String {
        format!(
            "{}/models/{}:{}?key={}",
            self.base_url, model, verb, self.api_key
        )
    }

    async fn post_json<T: DeserializeOwned>(
        &self,
        url: &str,
        body: &(impl Serialize + ?Sized),
    ) -> Result<T, GatewayError> {
        let http = build_http_client(&self.transport)?;

        let mut request = http.post(url).header(CONTENT_TYPE, "application/json");
        request = add_extra_headers(request, &self.transport);

        let response = request.json_logged(body).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text_logged().await.unwrap_or_default();
            return Err(Self::error_from_response(status, &body));
        }

        response.json_logged().await
    }

    /// Map a non-2xx response to the provider error envelope when it parses,
    /// or to a raw status/body error otherwise.
    fn error_from_response(status: reqwest::StatusCode, body: &str) -> GatewayError {
        if let Ok(envelope) = serde_json::from_str::<ProviderErrorResponse>(body) {
            GatewayError::Provider {
                code: envelope.error.code,
                message: envelope.error.message,
            }
        } else {
            GatewayError::Provider {
                code: status.as_u16() as u32,
                message: body.to_string(),
            }
        }
    }
}

#[async_trait]
impl ProviderApi for GeminiApi {
    async fn generate(
        &self,
        model: &str,
        request: GenerateContentRequest,
    ) -> Result<GenerateContentResponse, GatewayError> {
        let url = self.model_url(model, "generateContent");
        self.post_json(&url, &request).await
    }

    async fn submit_video(
        &self,
        model: &str,
        request: VideoJobRequest,
    ) -> Result<VideoOperation, GatewayError> {
        let url = self.model_url(model, "predictLongRunning");
        self.post_json(&url, &request).await
    }

    async fn poll_video(&self, operation_name: &str) -> Result<VideoOperation, GatewayError> {
        let url = format!("{}/{}?key={}", self.base_url, operation_name, self.api_key);
        let http = build_http_client(&self.transport)?;

        let mut request = http.get(&url);
        request = add_extra_headers(request, &self.transport);

        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text_logged().await.unwrap_or_default();
            return Err(Self::error_from_response(status, &body));
        }

        response.json_logged().await
    }

    async fn download(&self, uri: &str) -> Result<Bytes, GatewayError> {
        // Signed download URIs are only fetchable with the API key appended.
        let url = append_key(uri, &self.api_key);
        let http = build_http_client(&self.transport)?;

        let mut request = http.get(&url);
        request = add_extra_headers(request, &self.transport);

        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text_logged().await.unwrap_or_default();
            return Err(Self::error_from_response(status, &body));
        }

        let bytes = response.bytes().await?;
        tracing::debug!("downloaded asset ({} bytes)", bytes.len());
        Ok(bytes)
    }
}

#[derive(Debug, Clone, Deserialize)]
struct ProviderErrorResponse {
    error: ProviderErrorBody,
}

#[derive(Debug, Clone, Deserialize)]
struct ProviderErrorBody {
    code: u32,
    message: String,
    #[allow(dead_code)]
    status: Option<String>,
}
