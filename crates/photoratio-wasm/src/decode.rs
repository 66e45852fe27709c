//! Source decoding bindings.

use photoratio_core::decode;
use wasm_bindgen::prelude::*;

use crate::js_error;
use crate::types::JsSourceImage;

/// Decode an uploaded image file (JPEG, PNG, WebP, GIF, BMP).
///
/// EXIF orientation is applied, so the result matches what the `<img>`
/// preview shows.
///
/// ```typescript
/// const bytes = new Uint8Array(await file.arrayBuffer());
/// const source = decode_image(bytes);
/// console.log(`Decoded ${source.width}x${source.height}`);
/// ```
#[wasm_bindgen]
pub fn decode_image(bytes: &[u8]) -> Result<JsSourceImage, JsValue> {
    decode::decode_image(bytes)
        .map(JsSourceImage::from_source)
        .map_err(|e| js_error("Failed to decode image", e))
}
