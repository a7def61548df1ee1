//! Wire types for the provider boundary.
//!
//! Shapes follow the Gemini REST protocol: camelCase fields, inline binary
//! parts as base64 `Blob`s, long-running jobs as named operations.
//! See: <https://ai.google.dev/api/rest>

use nonempty::NonEmpty;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use serde_with::skip_serializing_none;

pub mod gemini;

pub use gemini::GeminiApi;

// --- Content generation ---

#[skip_serializing_none]
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    pub system_instruction: Option<Content>,
    pub generation_config: Option<GenerationConfig>,
    pub tools: Option<Vec<ProviderTool>>,
    pub tool_config: Option<ToolConfig>,
}

impl GenerateContentRequest {
    pub fn new(contents: Vec<Content>) -> Self {
        Self {
            contents,
            system_instruction: None,
            generation_config: None,
            tools: None,
            tool_config: None,
        }
    }
}

#[derive(Debug, Copy, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ContentRole {
    User,
    Model,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<ContentRole>,
    #[serde(default)]
    pub parts: Vec<ContentPart>,
}

impl Content {
    pub fn user(parts: Vec<ContentPart>) -> Self {
        Self {
            role: Some(ContentRole::User),
            parts,
        }
    }

    pub fn model(parts: Vec<ContentPart>) -> Self {
        Self {
            role: Some(ContentRole::Model),
            parts,
        }
    }

    pub fn user_text(text: impl Into<String>) -> Self {
        Self::user(vec![ContentPart::text(text)])
    }

    /// System instructions carry no role on the wire.
    pub fn system(text: impl Into<String>) -> Self {
        Self {
            role: None,
            parts: vec![ContentPart::text(text)],
        }
    }
}

#[skip_serializing_none]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged, rename_all_fields = "camelCase")]
pub enum ContentPart {
    Text { text: String },
    InlineData { inline_data: Blob },
    // Parts the gateway never consumes (thoughts, tool calls) still have to
    // deserialize without failing the whole response.
    Other(Value),
}

impl ContentPart {
    pub fn text(text: impl Into<String>) -> Self {
        ContentPart::Text { text: text.into() }
    }

    pub fn inline_data(mime_type: impl Into<String>, data: impl Into<String>) -> Self {
        ContentPart::InlineData {
            inline_data: Blob {
                mime_type: mime_type.into(),
                data: data.into(),
            },
        }
    }
}

/// Inline binary payload, base64-encoded.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Blob {
    pub mime_type: String,
    pub data: String,
}

#[skip_serializing_none]
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub response_mime_type: Option<String>,
    /// Schema in the provider's own dialect (OBJECT/STRING/ARRAY type tags).
    pub response_schema: Option<Value>,
    pub temperature: Option<f32>,
}

#[skip_serializing_none]
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderTool {
    pub google_maps: Option<Value>,
}

impl ProviderTool {
    /// The maps-grounding tool; the empty object is the entire configuration.
    pub fn google_maps() -> Self {
        Self {
            google_maps: Some(serde_json::json!({})),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolConfig {
    pub retrieval_config: RetrievalConfig,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RetrievalConfig {
    pub lat_lng: LatLng,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LatLng {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    pub candidates: NonEmpty<Candidate>,
    pub model_version: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate.
    pub fn text(&self) -> String {
        self.candidates
            .first()
            .content
            .parts
            .iter()
            .filter_map(|part| match part {
                ContentPart::Text { text } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// First inline-image part of the first candidate, if any. Later image
    /// parts are deliberately ignored.
    pub fn first_inline_image(&self) -> Option<&Blob> {
        self.candidates
            .first()
            .content
            .parts
            .iter()
            .find_map(|part| match part {
                ContentPart::InlineData { inline_data } => Some(inline_data),
                _ => None,
            })
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub content: Content,
    pub grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroundingMetadata {
    #[serde(default)]
    pub grounding_chunks: Vec<GroundingChunk>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroundingChunk {
    pub web: Option<GroundingSource>,
    pub maps: Option<GroundingSource>,
}

impl GroundingChunk {
    /// The chunk's citation source; maps grounding wins over web grounding.
    pub fn source(&self) -> Option<&GroundingSource> {
        self.maps.as_ref().or(self.web.as_ref())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroundingSource {
    pub uri: Option<String>,
    pub title: Option<String>,
}

// --- Long-running video jobs ---

#[derive(Debug, Clone, Serialize)]
pub struct VideoJobRequest {
    pub instances: Vec<VideoInstance>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<VideoParameters>,
}

#[skip_serializing_none]
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoInstance {
    pub prompt: String,
    pub image: Option<ImageInstance>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageInstance {
    pub bytes_base64_encoded: String,
    pub mime_type: String,
}

#[skip_serializing_none]
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoParameters {
    pub number_of_videos: Option<u32>,
    pub resolution: Option<String>,
    pub aspect_ratio: Option<String>,
}

/// A provider job handle, polled until `done`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoOperation {
    pub name: String,
    #[serde(default)]
    pub done: bool,
    pub response: Option<VideoOperationResponse>,
}

impl VideoOperation {
    /// Download URI of the first generated sample, once the job is done.
    pub fn download_uri(&self) -> Option<&str> {
        self.response
            .as_ref()?
            .generate_video_response
            .as_ref()?
            .generated_samples
            .first()?
            .video
            .as_ref()?
            .uri
            .as_deref()
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoOperationResponse {
    pub generate_video_response: Option<GenerateVideoResponse>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateVideoResponse {
    #[serde(default)]
    pub generated_samples: Vec<GeneratedSample>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeneratedSample {
    pub video: Option<VideoRef>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VideoRef {
    pub uri: Option<String>,
}
