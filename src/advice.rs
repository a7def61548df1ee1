//! Style advice: a structured text+optional-image consultation.

use serde_json::{json, Value};
use tokio::sync::Mutex;
use tracing::debug;

use crate::api::{Content, ContentPart, GenerateContentRequest, GenerationConfig};
use crate::client::{GatewayError, ProviderApi};
use crate::language::Language;
use crate::model::{ImagePayload, StyleAdviceResult};
use crate::options::ModelCatalog;

/// Input for one consultation.
#[derive(Debug, Clone, Default)]
pub struct AdviceRequest {
    pub language: Language,
    pub prompt: Option<String>,
    pub image: Option<ImagePayload>,
}

impl AdviceRequest {
    pub fn new(language: Language) -> Self {
        Self {
            language,
            prompt: None,
            image: None,
        }
    }

    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = Some(prompt.into());
        self
    }

    pub fn with_image(mut self, image: ImagePayload) -> Self {
        self.image = Some(image);
        self
    }
}

/// Builds advice requests and validates the structured verdict.
pub struct StyleAdvisor<C> {
    client: C,
    model: String,
    flight: Mutex<()>,
}

impl<C: ProviderApi> StyleAdvisor<C> {
    pub fn new(client: C, models: &ModelCatalog) -> Self {
        Self {
            client,
            model: models.advice.clone(),
            flight: Mutex::new(()),
        }
    }

    /// One consultation round trip. No retry; transport and schema failures
    /// surface to the caller as-is.
    pub async fn advise(&self, request: AdviceRequest) -> Result<StyleAdviceResult, GatewayError> {
        let _guard = self
            .flight
            .try_lock()
            .map_err(|_| GatewayError::Busy("style advisor"))?;

        let prompt = match request.prompt.as_deref().map(str::trim) {
            Some(prompt) if !prompt.is_empty() => prompt.to_string(),
            _ if request.image.is_some() => {
                request.language.default_advice_prompt().to_string()
            }
            _ => {
                return Err(GatewayError::InvalidInput(
                    "advice needs a prompt or an image".to_string(),
                ))
            }
        };

        let mut parts = vec![ContentPart::text(prompt)];
        if let Some(image) = &request.image {
            parts.push(ContentPart::inline_data(
                image.mime_type.clone(),
                image.to_base64(),
            ));
        }

        let wire_request = GenerateContentRequest {
            system_instruction: Some(Content::system(persona(request.language))),
            generation_config: Some(GenerationConfig {
                response_mime_type: Some("application/json".to_string()),
                response_schema: Some(advice_schema()),
                ..GenerationConfig::default()
            }),
            ..GenerateContentRequest::new(vec![Content::user(parts)])
        };

        let response = self.client.generate(&self.model, wire_request).await?;
        let text = response.text();
        debug!(language = %request.language, "advice response received");

        parse_advice(&text)
    }
}

/// Validate the provider's verdict against the advice shape.
fn parse_advice(text: &str) -> Result<StyleAdviceResult, GatewayError> {
    if text.trim().is_empty() {
        return Err(GatewayError::MalformedResponse(
            "empty advice response".to_string(),
        ));
    }

    let advice: StyleAdviceResult = serde_json::from_str(text)
        .map_err(|err| GatewayError::MalformedResponse(err.to_string()))?;

    if advice.recommendation.trim().is_empty() || advice.maintenance.trim().is_empty() {
        return Err(GatewayError::MalformedResponse(
            "advice fields must be non-empty".to_string(),
        ));
    }

    Ok(advice)
}

fn persona(language: Language) -> String {
    format!(
        "You are an elite master barber at 'The G-Burg Cut' in Gaithersburg, MD.\n\
         Your goal is to provide professional, trendy, and personalized hair and beard styling advice.\n\
         Keep your tone cool, expert, and encouraging.\n\
         When suggesting styles, consider the user's input and image (if provided).\n\
         Focus on modern trends like fades, crops, and well-groomed beards.\n\
         IMPORTANT: You must provide your response in the language: {}.",
        language.name()
    )
}

/// Output schema in the provider's dialect; the response must conform exactly.
fn advice_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "recommendation": {
                "type": "STRING",
                "description": "A detailed style recommendation"
            },
            "tips": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": "Pro tips for achieving this look"
            },
            "maintenance": {
                "type": "STRING",
                "description": "How to maintain this style"
            }
        },
        "required": ["recommendation", "tips", "maintenance"]
    })
}
