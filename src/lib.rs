//! # chairside - AI Interaction Gateway
//!
//! The request/response core behind The G-Burg Cut's web experience: every
//! AI-assisted feature of the site goes through this crate, which turns user
//! input into provider requests, drives the long-running video job lifecycle,
//! and normalizes results and errors into UI-consumable shapes.
//!
//! ## Features
//! - Async-first, tokio compatible
//! - Structured style advice with strict output-shape validation
//! - Photo-to-photo haircut visualization
//! - Submit-then-poll video synthesis with credential recovery
//! - Language-bound concierge chat sessions with in-conversation fallbacks
//! - Location-grounded neighborhood lookup with citation links
//!
//! ## Architecture
//!
//! 1. **`GeminiApi`** owns authentication and low-level dispatch; the
//!    [`ProviderApi`] trait is the seam tests script against.
//! 2. **Feature components** (`StyleAdvisor`, `Visualizer`,
//!    `VideoSynthesizer`, `ChatSession`, `NearbyExplorer`) build requests,
//!    enforce single-flight per instance, and validate responses.
//! 3. **[`Gateway`]** bundles one shared client with one component per
//!    feature.
//!
//! Every result is request-scoped: a new call replaces the previous result,
//! nothing is cached across requests, and no call is retried automatically.
//!
//! ## Example
//! ```no_run
//! use chairside::advice::AdviceRequest;
//! use chairside::{Gateway, Language};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let gateway = Gateway::new(std::env::var("GEMINI_API_KEY")?);
//!
//!     let request = AdviceRequest::new(Language::En)
//!         .with_prompt("I want a low-maintenance professional cut");
//!     let advice = gateway.advisor().advise(request).await?;
//!
//!     println!("{}", advice.recommendation);
//!     for tip in advice.tips.iter() {
//!         println!("- {tip}");
//!     }
//!     Ok(())
//! }
//! ```

pub mod advice;
pub mod api;
pub mod chat;
pub mod client;
pub mod gateway;
pub mod http;
pub mod language;
pub mod model;
pub mod options;
pub mod places;
pub mod video;
pub mod visualize;

pub use api::GeminiApi;
pub use chat::ChatSession;
pub use client::{GatewayError, ProviderApi};
pub use gateway::Gateway;
pub use language::Language;
pub use model::{
    GroundedAnswer, HaircutStyle, ImagePayload, Reference, StyleAdviceResult, Turn, TurnRole,
    VideoAsset,
};
pub use options::{GatewayOptions, ModelCatalog, PollPolicy, TransportOptions};
pub use video::CredentialGate;
