//! Export bindings.
//!
//! The crop surface reports its window in rotated-image pixels; these calls
//! turn that window plus rotation, flip and fill into a downloadable JPEG.

use photoratio_core::{render_with, Color, CropRect, FlipState, RenderError, RenderRequest};
use wasm_bindgen::prelude::*;

use crate::js_error;
use crate::types::{JsOutputImage, JsSourceImage};

/// Render and encode a crop described by a request object.
///
/// Only `crop` is required; `rotation` defaults to 0, `flip` to none,
/// `fill` to white and `filter` to bilinear.
///
/// ```typescript
/// const out = render_crop(source, {
///   crop: { x: 120, y: 40, width: 600, height: 400 },
///   rotation: 15,
///   flip: { horizontal: false, vertical: false },
///   fill: '#ffffff',
///   filter: 'lanczos3',
/// });
/// ```
#[wasm_bindgen]
pub fn render_crop(image: &JsSourceImage, request: JsValue) -> Result<JsOutputImage, JsValue> {
    let request: RenderRequest = serde_wasm_bindgen::from_value(request)
        .map_err(|e| js_error("Invalid render request", e))?;
    render_request(image, &request).map_err(|e| js_error("Failed to render crop", e))
}

/// Positional form of [`render_crop`] for callers that keep the crop state
/// in plain numbers.
///
/// `fill` is a CSS hex color (`#fff`, `#ffffff`, `#ffffff80`) or a basic
/// color name.
#[wasm_bindgen]
#[allow(clippy::too_many_arguments)]
pub fn render_crop_rect(
    image: &JsSourceImage,
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    rotation: f64,
    flip_horizontal: bool,
    flip_vertical: bool,
    fill: &str,
) -> Result<JsOutputImage, JsValue> {
    let fill = Color::parse(fill).map_err(|e| js_error("Invalid fill color", e))?;
    let request = RenderRequest {
        rotation,
        flip: FlipState::new(flip_horizontal, flip_vertical),
        fill,
        ..RenderRequest::new(CropRect::new(x, y, width, height))
    };
    render_request(image, &request).map_err(|e| js_error("Failed to render crop", e))
}

fn render_request(
    image: &JsSourceImage,
    request: &RenderRequest,
) -> Result<JsOutputImage, RenderError> {
    render_with(image.source(), request).map(JsOutputImage::from_output)
}
