//! Domain types produced and consumed by the gateway.

use std::fmt;
use std::str::FromStr;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use bytes::Bytes;
use nonempty::NonEmpty;
use serde::{Deserialize, Serialize};

use crate::client::GatewayError;
use crate::language::Language;

/// A decoded binary image tagged with its media type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePayload {
    pub mime_type: String,
    pub data: Bytes,
}

impl ImagePayload {
    pub fn new(mime_type: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self {
            mime_type: mime_type.into(),
            data: data.into(),
        }
    }

    /// Decode a `data:<mime>;base64,<payload>` URL, the shape browser file
    /// readers hand over.
    pub fn from_data_url(url: &str) -> Result<Self, GatewayError> {
        let rest = url
            .strip_prefix("data:")
            .ok_or_else(|| GatewayError::InvalidInput("not a data URL".to_string()))?;
        let (meta, payload) = rest
            .split_once(',')
            .ok_or_else(|| GatewayError::InvalidInput("data URL has no payload".to_string()))?;
        let mime_type = meta
            .strip_suffix(";base64")
            .ok_or_else(|| GatewayError::InvalidInput("data URL is not base64".to_string()))?;

        let data = BASE64
            .decode(payload.trim())
            .map_err(|err| GatewayError::InvalidInput(format!("invalid base64 payload: {err}")))?;

        Ok(Self {
            mime_type: if mime_type.is_empty() {
                "image/jpeg".to_string()
            } else {
                mime_type.to_string()
            },
            data: Bytes::from(data),
        })
    }

    pub fn to_base64(&self) -> String {
        BASE64.encode(&self.data)
    }
}

/// A fetched video asset, locally addressable for playback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoAsset {
    pub mime_type: String,
    pub data: Bytes,
}

/// One style consultation verdict. Request-scoped; a new consultation
/// replaces it wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleAdviceResult {
    pub recommendation: String,
    pub tips: NonEmpty<String>,
    pub maintenance: String,
}

/// A grounded locality answer: prose plus citation links.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroundedAnswer {
    pub text: String,
    pub references: Vec<Reference>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    pub title: Option<String>,
    pub uri: String,
}

/// One chat turn. The log is append-only and owned by its session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    pub role: TurnRole,
    pub text: String,
}

impl Turn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: TurnRole::User,
            text: text.into(),
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: TurnRole::Assistant,
            text: text.into(),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TurnRole {
    User,
    Assistant,
}

/// The fixed haircut style catalog offered by the visualizer.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum HaircutStyle {
    Buzz,
    Pompadour,
    Crew,
    Undercut,
    Fade,
    Long,
}

impl HaircutStyle {
    pub const ALL: [HaircutStyle; 6] = [
        HaircutStyle::Buzz,
        HaircutStyle::Pompadour,
        HaircutStyle::Crew,
        HaircutStyle::Undercut,
        HaircutStyle::Fade,
        HaircutStyle::Long,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            HaircutStyle::Buzz => "buzz",
            HaircutStyle::Pompadour => "pompadour",
            HaircutStyle::Crew => "crew",
            HaircutStyle::Undercut => "undercut",
            HaircutStyle::Fade => "fade",
            HaircutStyle::Long => "long",
        }
    }

    /// Name used in generation prompts.
    pub fn english_label(&self) -> &'static str {
        match self {
            HaircutStyle::Buzz => "Buzz Cut",
            HaircutStyle::Pompadour => "Pompadour",
            HaircutStyle::Crew => "Crew Cut",
            HaircutStyle::Undercut => "Classic Undercut",
            HaircutStyle::Fade => "High Skin Fade",
            HaircutStyle::Long => "Long Taper",
        }
    }

    /// Display label in the given language.
    pub fn label(&self, language: Language) -> &'static str {
        match language {
            Language::En => self.english_label(),
            Language::Es => match self {
                HaircutStyle::Buzz => "Corte Rapado (Buzz)",
                HaircutStyle::Pompadour => "Pompadour",
                HaircutStyle::Crew => "Corte Militar",
                HaircutStyle::Undercut => "Undercut Clásico",
                HaircutStyle::Fade => "Degradado Alto",
                HaircutStyle::Long => "Taper Largo",
            },
            Language::Ru => match self {
                HaircutStyle::Buzz => "Стрижка под машинку",
                HaircutStyle::Pompadour => "Помпадур",
                HaircutStyle::Crew => "Крю-кат",
                HaircutStyle::Undercut => "Классический андеркат",
                HaircutStyle::Fade => "Высокий фейд",
                HaircutStyle::Long => "Удлиненный тейпер",
            },
        }
    }
}

impl fmt::Display for HaircutStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for HaircutStyle {
    type Err = GatewayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HaircutStyle::ALL
            .into_iter()
            .find(|style| style.id() == s)
            .ok_or_else(|| GatewayError::InvalidInput(format!("unknown haircut style: {s:?}")))
    }
}
