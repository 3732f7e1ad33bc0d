//! Placeholder images for the image proxy

use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::schemas::image::{MockImage, MockParameters, IMAGE_HEIGHT, IMAGE_WIDTH};
use crate::utils::{escape_xml, truncate_str};

/// Characters of the prompt drawn on the placeholder
pub const TITLE_LIMIT: usize = 50;

/// Drawn when the prompt is missing or empty
pub const DEFAULT_TITLE: &str = "AI Dream Weaver";

pub const CAPTION: &str = "Production Server | Configure SD_API_URL or REPLICATE_API_TOKEN";

pub const MOCK_INFO: &str = "Mock response - configure SD_API_URL or REPLICATE_API_TOKEN";

/// Render the placeholder SVG for `prompt`.
pub fn render_placeholder(prompt: Option<&str>) -> String {
    let title = match prompt.map(|p| truncate_str(p, TITLE_LIMIT)) {
        Some(p) if !p.is_empty() => escape_xml(p),
        _ => DEFAULT_TITLE.to_string(),
    };
    let (cx, cy) = (IMAGE_WIDTH / 2, IMAGE_HEIGHT / 2);

    format!(
        r##"<svg width="{w}" height="{h}" xmlns="http://www.w3.org/2000/svg">
  <defs>
    <linearGradient id="grad" x1="0%" y1="0%" x2="100%" y2="100%">
      <stop offset="0%" style="stop-color:#4a6fff;stop-opacity:1" />
      <stop offset="100%" style="stop-color:#8a2fff;stop-opacity:1" />
    </linearGradient>
  </defs>
  <rect width="100%" height="100%" fill="url(#grad)"/>
  <text x="{cx}" y="{cy}" font-family="Arial" font-size="20" fill="white" text-anchor="middle">
    {title}
  </text>
  <text x="{cx}" y="350" font-family="Arial" font-size="14" fill="white" text-anchor="middle" opacity="0.7">
    {caption}
  </text>
</svg>
"##,
        w = IMAGE_WIDTH,
        h = IMAGE_HEIGHT,
        cx = cx,
        cy = cy,
        title = title,
        caption = CAPTION,
    )
}

/// Base64-encoded placeholder wrapped in the image-proxy reply shape.
pub fn mock_image(prompt: Option<&str>) -> MockImage {
    let svg = render_placeholder(prompt);

    MockImage {
        images: vec![STANDARD.encode(svg.as_bytes())],
        parameters: MockParameters {
            prompt: prompt.map(str::to_string),
        },
        info: MOCK_INFO.to_string(),
    }
}
