//! Image-generation service
//!
//! Dispatches an image request to Stable Diffusion or Replicate, or draws a
//! placeholder when neither is configured.
//!
//! Replicate predictions are asynchronous. This service returns the
//! prediction id as soon as Replicate accepts the job and does not poll for
//! the finished image, so clients receive a handle rather than image data.

use serde_json::Value;

use crate::config::ImageProvider;
use crate::schemas::image::{
    ImageGeneration, ImageRequest, PendingPrediction, Prediction, PredictionRequest, Txt2ImgRequest,
};
use crate::services::placeholder::mock_image;
use crate::services::upstream::{Upstream, UpstreamClient, UpstreamError};

pub const REPLICATE_INFO: &str = "Using Replicate API";

pub struct ImageService {
    provider: ImageProvider,
    upstream: UpstreamClient,
}

impl ImageService {
    pub fn new(provider: ImageProvider, upstream: UpstreamClient) -> Self {
        Self { provider, upstream }
    }

    pub fn provider(&self) -> &ImageProvider {
        &self.provider
    }

    /// Produce an image (or image handle) for `request`.
    pub async fn generate(&self, request: &ImageRequest) -> Result<ImageGeneration, UpstreamError> {
        match &self.provider {
            ImageProvider::StableDiffusion { base_url } => {
                let http = self
                    .upstream
                    .client()
                    .post(format!("{}/sdapi/v1/txt2img", base_url))
                    .json(&Txt2ImgRequest::new(request.prompt_text()));

                let body: Value = self.upstream.send_json(Upstream::StableDiffusion, http).await?;
                Ok(ImageGeneration::Passthrough(body))
            }
            ImageProvider::Replicate { api_token, base_url } => {
                let http = self
                    .upstream
                    .client()
                    .post(format!("{}/v1/predictions", base_url))
                    .header("Authorization", format!("Token {}", api_token))
                    .json(&PredictionRequest::new(request.prompt.as_deref()));

                let prediction: Prediction = self.upstream.send_json(Upstream::Replicate, http).await?;
                tracing::info!(prediction_id = ?prediction.id, "Replicate prediction created");

                Ok(ImageGeneration::Pending(PendingPrediction {
                    images: vec![prediction.id],
                    info: REPLICATE_INFO.to_string(),
                }))
            }
            ImageProvider::Mock => Ok(ImageGeneration::Mock(mock_image(request.prompt.as_deref()))),
        }
    }
}
