//! Provider seam and error types.

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

use crate::api::{GenerateContentRequest, GenerateContentResponse, VideoJobRequest, VideoOperation};

/// Errors that can occur inside the gateway.
///
/// Every failure is scoped to a single feature invocation; nothing here is
/// fatal to the process and nothing is retried automatically.
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("provider returned an unusable payload: {0}")]
    MalformedResponse(String),

    #[error("provider returned no inline image part")]
    NoImageReturned,

    #[error("video job completed without a download reference")]
    NoVideoReturned,

    #[error("a billing-capable API credential is required")]
    CredentialRequired,

    #[error("the configured API credential is no longer valid")]
    CredentialExpired,

    #[error("nearby lookup failed: {0}")]
    LookupFailed(String),

    #[error("another request is already in flight on this {0}")]
    Busy(&'static str),

    #[error("video job still pending after {0} polls")]
    JobTimedOut(u32),

    #[error("provider error ({code}): {message}")]
    Provider { code: u32, message: String },
}

impl GatewayError {
    /// True for the "Requested entity was not found" family of provider
    /// errors, which the video orchestrator re-signals as a credential
    /// problem rather than a generic failure.
    pub(crate) fn is_entity_missing(&self) -> bool {
        match self {
            GatewayError::Provider { message, .. } => {
                message.contains("Requested entity was not found")
            }
            _ => false,
        }
    }
}

/// Low-level dispatch to the generative-AI provider.
///
/// `GeminiApi` is the production implementation; tests script this trait
/// directly. All calls suspend the caller until the provider answers.
#[async_trait]
pub trait ProviderApi: Send + Sync {
    /// Single request/response content generation.
    async fn generate(
        &self,
        model: &str,
        request: GenerateContentRequest,
    ) -> Result<GenerateContentResponse, GatewayError>;

    /// Submit a long-running video synthesis job.
    async fn submit_video(
        &self,
        model: &str,
        request: VideoJobRequest,
    ) -> Result<VideoOperation, GatewayError>;

    /// Re-fetch the state of a previously submitted job.
    async fn poll_video(&self, operation_name: &str) -> Result<VideoOperation, GatewayError>;

    /// Fetch a completed asset from its signed download URI.
    async fn download(&self, uri: &str) -> Result<Bytes, GatewayError>;
}
