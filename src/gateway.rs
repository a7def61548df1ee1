//! The gateway facade: one shared provider client, one component per feature.

use crate::advice::StyleAdvisor;
use crate::api::GeminiApi;
use crate::chat::ChatSession;
use crate::client::ProviderApi;
use crate::language::Language;
use crate::options::{GatewayOptions, ModelCatalog};
use crate::places::NearbyExplorer;
use crate::video::VideoSynthesizer;
use crate::visualize::Visualizer;

/// Bundles the per-feature components over a shared provider client.
///
/// Each component keeps its own single-flight guard, so the facade can be
/// shared freely; overlapping calls on the same feature are refused, not
/// queued.
pub struct Gateway<C: ProviderApi + Clone> {
    client: C,
    models: ModelCatalog,
    advisor: StyleAdvisor<C>,
    visualizer: Visualizer<C>,
    video: VideoSynthesizer<C>,
    explorer: NearbyExplorer<C>,
}

impl Gateway<GeminiApi> {
    /// Gateway against the public provider endpoint with default options.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_client(GeminiApi::new(api_key), GatewayOptions::default())
    }
}

impl<C: ProviderApi + Clone> Gateway<C> {
    pub fn with_client(client: C, options: GatewayOptions) -> Self {
        let GatewayOptions { models, poll } = options;
        Self {
            advisor: StyleAdvisor::new(client.clone(), &models),
            visualizer: Visualizer::new(client.clone(), &models),
            video: VideoSynthesizer::new(client.clone(), &models).with_policy(poll),
            explorer: NearbyExplorer::new(client.clone(), &models),
            client,
            models,
        }
    }

    pub fn advisor(&self) -> &StyleAdvisor<C> {
        &self.advisor
    }

    pub fn visualizer(&self) -> &Visualizer<C> {
        &self.visualizer
    }

    pub fn video(&self) -> &VideoSynthesizer<C> {
        &self.video
    }

    pub fn explorer(&self) -> &NearbyExplorer<C> {
        &self.explorer
    }

    /// Open a fresh concierge session in the given language.
    pub fn create_chat(&self, language: Language) -> ChatSession<C> {
        ChatSession::new(self.client.clone(), language, &self.models)
    }
}
