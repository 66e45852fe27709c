//! PhotoRatio WASM - WebAssembly bindings for the crop engine
//!
//! # Module Structure
//!
//! - `types` - JS handles for decoded sources and encoded exports
//! - `decode` - uploaded file bytes to a source handle
//! - `render` - the export call made when the user presses download
//! - `transform` - bounding box and default frame helpers for the crop surface
//! - `aspect` - frame presets and custom sizes
//!
//! # Usage
//!
//! ```typescript
//! import init, { decode_image, render_crop } from '@photoratio/wasm';
//!
//! await init();
//!
//! const source = decode_image(new Uint8Array(await file.arrayBuffer()));
//! const out = render_crop(source, { crop: croppedAreaPixels, rotation, fill: '#ffffff' });
//! link.href = out.data_uri();
//! link.download = out.default_file_name();
//! ```

use std::fmt::Display;

use wasm_bindgen::prelude::*;

mod aspect;
mod decode;
mod render;
mod transform;
mod types;

pub use aspect::{aspect_presets, custom_ratio, find_preset_label};
pub use decode::decode_image;
pub use render::{render_crop, render_crop_rect};
pub use transform::{default_crop, rotated_bounds};
pub use types::{JsOutputImage, JsSourceImage};

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Log a failed call to the browser console and convert it into the value
/// the returned promise rejects with.
pub(crate) fn js_error(context: &str, err: impl Display) -> JsValue {
    let message = format!("{}: {}", context, err);
    web_sys::console::error_1(&JsValue::from_str(&message));
    JsValue::from_str(&message)
}
