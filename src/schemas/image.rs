//! Image proxy schema definitions

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{take_field, FromFields};

/// Style tags appended to every Stable Diffusion prompt
pub const STYLE_SUFFIX: &str = "fantasy art, dream world, detailed";

pub const NEGATIVE_PROMPT: &str = "blurry, ugly, text, watermark";

pub const IMAGE_WIDTH: u32 = 512;
pub const IMAGE_HEIGHT: u32 = 384;

/// Pinned Replicate model version
pub const REPLICATE_MODEL_VERSION: &str =
    "stability-ai/stable-diffusion:ac732df83cea7fff18b8472768c88ad041fa750ff7682a21affe81863cbe77e4";

/// Body of `POST /api/sd-proxy`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImageRequest {
    pub prompt: Option<String>,
}

impl FromFields for ImageRequest {
    fn from_fields(mut fields: Map<String, Value>) -> Self {
        Self {
            prompt: take_field(&mut fields, "prompt"),
        }
    }
}

impl ImageRequest {
    pub fn prompt_text(&self) -> &str {
        self.prompt.as_deref().unwrap_or("")
    }
}

/// Stable Diffusion WebUI `txt2img` payload
#[derive(Debug, Serialize)]
pub struct Txt2ImgRequest {
    pub prompt: String,
    pub negative_prompt: &'static str,
    pub steps: u32,
    pub width: u32,
    pub height: u32,
    pub cfg_scale: u32,
}

impl Txt2ImgRequest {
    pub fn new(prompt: &str) -> Self {
        Self {
            prompt: format!("{}, {}", prompt, STYLE_SUFFIX),
            negative_prompt: NEGATIVE_PROMPT,
            steps: 20,
            width: IMAGE_WIDTH,
            height: IMAGE_HEIGHT,
            cfg_scale: 7,
        }
    }
}

/// Replicate `POST /v1/predictions` payload
#[derive(Debug, Serialize)]
pub struct PredictionRequest<'a> {
    pub version: &'static str,
    pub input: PredictionInput<'a>,
}

#[derive(Debug, Serialize)]
pub struct PredictionInput<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt: Option<&'a str>,
    pub width: u32,
    pub height: u32,
}

impl<'a> PredictionRequest<'a> {
    pub fn new(prompt: Option<&'a str>) -> Self {
        Self {
            version: REPLICATE_MODEL_VERSION,
            input: PredictionInput {
                prompt,
                width: IMAGE_WIDTH,
                height: IMAGE_HEIGHT,
            },
        }
    }
}

/// The subset of a Replicate prediction the proxy reads
#[derive(Debug, Default, Deserialize)]
pub struct Prediction {
    #[serde(default)]
    pub id: Option<String>,
}

/// Reply of the image proxy
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ImageGeneration {
    /// Stable Diffusion body, passed through as received
    Passthrough(Value),

    /// Replicate prediction handle; the image itself is not awaited
    Pending(PendingPrediction),

    /// Placeholder SVG
    Mock(MockImage),
}

#[derive(Debug, Clone, Serialize)]
pub struct PendingPrediction {
    /// Holds the prediction id, `null` when Replicate returned none
    pub images: Vec<Option<String>>,
    pub info: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct MockImage {
    /// One base64-encoded SVG document
    pub images: Vec<String>,
    pub parameters: MockParameters,
    pub info: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct MockParameters {
    pub prompt: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_txt2img_payload() {
        let body = serde_json::to_value(Txt2ImgRequest::new("castle")).unwrap();
        assert_eq!(
            body,
            json!({
                "prompt": "castle, fantasy art, dream world, detailed",
                "negative_prompt": "blurry, ugly, text, watermark",
                "steps": 20,
                "width": 512,
                "height": 384,
                "cfg_scale": 7
            })
        );
    }

    #[test]
    fn test_prediction_payload() {
        let body = serde_json::to_value(PredictionRequest::new(Some("castle"))).unwrap();
        assert_eq!(body["version"], REPLICATE_MODEL_VERSION);
        assert_eq!(body["input"], json!({"prompt": "castle", "width": 512, "height": 384}));
    }

    #[test]
    fn test_pending_prediction_keeps_missing_id_as_null() {
        let body = serde_json::to_value(ImageGeneration::Pending(PendingPrediction {
            images: vec![None],
            info: "Using Replicate API".to_string(),
        }))
        .unwrap();
        assert_eq!(body, json!({"images": [null], "info": "Using Replicate API"}));
    }
}
