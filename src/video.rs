//! Video synthesis: submit a long-running job, poll it to completion, fetch
//! the asset.

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::api::{ImageInstance, VideoInstance, VideoJobRequest, VideoParameters};
use crate::client::{GatewayError, ProviderApi};
use crate::model::{HaircutStyle, ImagePayload, VideoAsset};
use crate::options::{ModelCatalog, PollPolicy};

/// Host-provided credential selection surface.
///
/// Video synthesis requires a billing-capable API credential. The gateway
/// only asks two things of the host: whether one is configured, and to open
/// the selection dialog.
#[async_trait]
pub trait CredentialGate: Send + Sync {
    async fn has_credential(&self) -> bool;

    /// Open the host's credential picker and wait for it to close.
    async fn open_selection(&self);
}

/// Orchestrates one video job at a time.
pub struct VideoSynthesizer<C> {
    client: C,
    model: String,
    policy: PollPolicy,
    flight: Mutex<()>,
}

impl<C: ProviderApi> VideoSynthesizer<C> {
    pub fn new(client: C, models: &ModelCatalog) -> Self {
        Self {
            client,
            model: models.video.clone(),
            policy: PollPolicy::default(),
            flight: Mutex::new(()),
        }
    }

    pub fn with_policy(mut self, policy: PollPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Single attempt: check the credential, run the job, fetch the asset.
    ///
    /// An "entity not found" provider error from submission or polling is
    /// re-signalled as [`GatewayError::CredentialExpired`] so the caller can
    /// re-trigger credential selection instead of showing a generic failure.
    pub async fn generate(
        &self,
        base: &ImagePayload,
        style: HaircutStyle,
        gate: &dyn CredentialGate,
    ) -> Result<VideoAsset, GatewayError> {
        let _guard = self
            .flight
            .try_lock()
            .map_err(|_| GatewayError::Busy("video synthesizer"))?;

        if !gate.has_credential().await {
            return Err(GatewayError::CredentialRequired);
        }

        self.run(base, style).await.map_err(|err| {
            if err.is_entity_missing() {
                warn!("provider lost the configured credential mid-job");
                GatewayError::CredentialExpired
            } else {
                err
            }
        })
    }

    /// [`generate`](Self::generate), plus the credential recovery path: on a
    /// missing or expired credential, open the host's selection dialog, wait
    /// for it, and retry exactly once.
    pub async fn generate_with_prompt(
        &self,
        base: &ImagePayload,
        style: HaircutStyle,
        gate: &dyn CredentialGate,
    ) -> Result<VideoAsset, GatewayError> {
        match self.generate(base, style, gate).await {
            Err(GatewayError::CredentialRequired) | Err(GatewayError::CredentialExpired) => {
                gate.open_selection().await;
                self.generate(base, style, gate).await
            }
            other => other,
        }
    }

    async fn run(
        &self,
        base: &ImagePayload,
        style: HaircutStyle,
    ) -> Result<VideoAsset, GatewayError> {
        let request = VideoJobRequest {
            instances: vec![VideoInstance {
                prompt: cinematic_prompt(style),
                image: Some(ImageInstance {
                    bytes_base64_encoded: base.to_base64(),
                    mime_type: base.mime_type.clone(),
                }),
            }],
            parameters: Some(VideoParameters {
                number_of_videos: Some(1),
                resolution: Some("720p".to_string()),
                aspect_ratio: Some("9:16".to_string()),
            }),
        };

        let mut operation = self.client.submit_video(&self.model, request).await?;
        debug!(job = %operation.name, "video job submitted");

        let mut attempts = 0u32;
        while !operation.done {
            if let Some(max_attempts) = self.policy.max_attempts {
                if attempts >= max_attempts {
                    return Err(GatewayError::JobTimedOut(attempts));
                }
            }

            tokio::time::sleep(self.policy.interval).await;
            operation = self.client.poll_video(&operation.name).await?;
            attempts += 1;
            debug!(job = %operation.name, attempts, done = operation.done, "video job polled");
        }

        let uri = operation
            .download_uri()
            .ok_or(GatewayError::NoVideoReturned)?;

        let data = self.client.download(uri).await?;
        Ok(VideoAsset {
            mime_type: "video/mp4".to_string(),
            data,
        })
    }
}

fn cinematic_prompt(style: HaircutStyle) -> String {
    format!(
        "A professional cinematic preview showing a person with a fresh {} haircut. \
         The hair should have realistic texture and slight natural movement. \
         The background is a high-end modern barbershop with soft bokeh lighting. \
         High quality, 4k detail.",
        style.english_label()
    )
}
