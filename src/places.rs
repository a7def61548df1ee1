//! Location-grounded neighborhood lookup.

use tracing::debug;

use crate::api::{
    Content, GenerateContentRequest, LatLng, ProviderTool, RetrievalConfig, ToolConfig,
};
use crate::client::{GatewayError, ProviderApi};
use crate::language::Language;
use crate::model::{GroundedAnswer, Reference};
use crate::options::ModelCatalog;

/// Issues a single grounded locality query and normalizes the citations.
pub struct NearbyExplorer<C> {
    client: C,
    model: String,
}

impl<C: ProviderApi> NearbyExplorer<C> {
    pub fn new(client: C, models: &ModelCatalog) -> Self {
        Self {
            client,
            model: models.places.clone(),
        }
    }

    /// Best-effort grounded answer about the shop's neighborhood.
    ///
    /// Coordinates, when both are present, bias the grounding; otherwise the
    /// textual locality in the query carries it. Any provider failure
    /// surfaces as [`GatewayError::LookupFailed`]; no retry.
    pub async fn find_nearby(
        &self,
        latitude: Option<f64>,
        longitude: Option<f64>,
        language: Language,
    ) -> Result<GroundedAnswer, GatewayError> {
        let query = format!(
            "What are some highly-rated coffee shops or restaurants near Main Street in \
             Gaithersburg, MD? Provide a brief summary. Answer in {}.",
            language.name()
        );

        let tool_config = match (latitude, longitude) {
            (Some(latitude), Some(longitude)) => Some(ToolConfig {
                retrieval_config: RetrievalConfig {
                    lat_lng: LatLng {
                        latitude,
                        longitude,
                    },
                },
            }),
            _ => None,
        };

        let request = GenerateContentRequest {
            tools: Some(vec![ProviderTool::google_maps()]),
            tool_config,
            ..GenerateContentRequest::new(vec![Content::user_text(query)])
        };

        let response = self
            .client
            .generate(&self.model, request)
            .await
            .map_err(|err| GatewayError::LookupFailed(err.to_string()))?;

        // Citations without a usable link are dropped before the caller sees them.
        let references: Vec<Reference> = response
            .candidates
            .first()
            .grounding_metadata
            .as_ref()
            .map(|metadata| {
                metadata
                    .grounding_chunks
                    .iter()
                    .filter_map(|chunk| chunk.source())
                    .filter_map(|source| {
                        source.uri.clone().map(|uri| Reference {
                            title: source.title.clone(),
                            uri,
                        })
                    })
                    .collect()
            })
            .unwrap_or_default();

        debug!(references = references.len(), "grounded lookup resolved");
        Ok(GroundedAnswer {
            text: response.text(),
            references,
        })
    }
}
