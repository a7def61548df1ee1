//! Haircut visualization: an image-edit round trip.

use bytes::Bytes;
use tokio::sync::Mutex;
use tracing::debug;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;

use crate::api::{Content, ContentPart, GenerateContentRequest};
use crate::client::{GatewayError, ProviderApi};
use crate::model::{HaircutStyle, ImagePayload};
use crate::options::ModelCatalog;

/// Builds image-edit requests against the style catalog.
pub struct Visualizer<C> {
    client: C,
    model: String,
    flight: Mutex<()>,
}

impl<C: ProviderApi> Visualizer<C> {
    pub fn new(client: C, models: &ModelCatalog) -> Self {
        Self {
            client,
            model: models.visualize.clone(),
            flight: Mutex::new(()),
        }
    }

    /// Re-render the base photo with the requested style. The first inline
    /// image part of the response wins; later parts are ignored.
    pub async fn visualize(
        &self,
        base: &ImagePayload,
        style: HaircutStyle,
    ) -> Result<ImagePayload, GatewayError> {
        let _guard = self
            .flight
            .try_lock()
            .map_err(|_| GatewayError::Busy("visualizer"))?;

        let request = GenerateContentRequest::new(vec![Content::user(vec![
            ContentPart::inline_data(base.mime_type.clone(), base.to_base64()),
            ContentPart::text(instruction(style)),
        ])]);

        let response = self.client.generate(&self.model, request).await?;

        let blob = response
            .first_inline_image()
            .ok_or(GatewayError::NoImageReturned)?;
        let data = BASE64
            .decode(&blob.data)
            .map_err(|err| GatewayError::MalformedResponse(format!("bad image payload: {err}")))?;

        debug!(style = %style, bytes = data.len(), "visualization rendered");
        Ok(ImagePayload {
            mime_type: blob.mime_type.clone(),
            data: Bytes::from(data),
        })
    }
}

fn instruction(style: HaircutStyle) -> String {
    let name = style.english_label();
    format!(
        "Modify the hair in this image to be a {name}.\n\
         Preserve the person's face, features, and the background exactly as they are.\n\
         Only change the hairstyle to a professionally cut {name}.\n\
         Ensure the results look photorealistic and natural as if taken in a barbershop."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn instruction_names_the_style_twice() {
        let text = instruction(HaircutStyle::Fade);
        assert_eq!(text.matches("High Skin Fade").count(), 2);
    }
}
