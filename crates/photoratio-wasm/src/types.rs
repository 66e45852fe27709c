//! WASM-compatible handles for source images and exports.
//!
//! The decoded source stays in WASM memory for the whole editing session so
//! that each export only ships the crop parameters across the boundary.

use photoratio_core::{OutputImage, SourceImage};
use wasm_bindgen::prelude::*;

use crate::js_error;

/// A decoded source image held in WASM memory.
#[wasm_bindgen]
pub struct JsSourceImage {
    inner: SourceImage,
}

#[wasm_bindgen]
impl JsSourceImage {
    /// Wrap RGBA pixel data (4 bytes per pixel, row-major), e.g. from a
    /// canvas `ImageData`.
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<JsSourceImage, JsValue> {
        SourceImage::new(width, height, pixels)
            .map(JsSourceImage::from_source)
            .map_err(|e| js_error("Invalid source image", e))
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.inner.width()
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.inner.height()
    }

    /// Size of the RGBA buffer in bytes.
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.inner.pixels().len()
    }

    /// Explicitly free WASM memory when the user resets or replaces the photo.
    pub fn free(self) {}
}

impl JsSourceImage {
    pub(crate) fn from_source(inner: SourceImage) -> Self {
        Self { inner }
    }

    pub(crate) fn source(&self) -> &SourceImage {
        &self.inner
    }
}

/// An encoded export ready to be offered as a download.
#[wasm_bindgen]
pub struct JsOutputImage {
    inner: OutputImage,
}

#[wasm_bindgen]
impl JsOutputImage {
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    #[wasm_bindgen(getter)]
    pub fn mime(&self) -> String {
        self.inner.mime().to_string()
    }

    /// Encoded JPEG bytes as a `Uint8Array` (copied out of WASM memory).
    pub fn bytes(&self) -> Vec<u8> {
        self.inner.bytes.clone()
    }

    /// `data:image/jpeg;base64,...` for an anchor `href`.
    pub fn data_uri(&self) -> String {
        self.inner.to_data_uri()
    }

    /// Download name for an export made at `timestamp_ms`.
    pub fn file_name(&self, timestamp_ms: f64) -> String {
        OutputImage::file_name(timestamp_ms.max(0.0) as u64)
    }

    /// Download name stamped with the current time.
    pub fn default_file_name(&self) -> String {
        self.file_name(js_sys::Date::now())
    }
}

impl JsOutputImage {
    pub(crate) fn from_output(inner: OutputImage) -> Self {
        Self { inner }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn output(width: u32, height: u32) -> JsOutputImage {
        JsOutputImage::from_output(OutputImage {
            width,
            height,
            bytes: vec![0xFF, 0xD8, 0xFF, 0xD9],
        })
    }

    #[test]
    fn test_source_handle_accessors() {
        let src = SourceImage::new(10, 5, vec![0u8; 10 * 5 * 4]).unwrap();
        let handle = JsSourceImage::from_source(src);
        assert_eq!(handle.width(), 10);
        assert_eq!(handle.height(), 5);
        assert_eq!(handle.byte_length(), 200);
    }

    #[test]
    fn test_output_handle_accessors() {
        let out = output(600, 400);
        assert_eq!(out.width(), 600);
        assert_eq!(out.height(), 400);
        assert_eq!(out.mime(), "image/jpeg");
        assert_eq!(out.bytes(), vec![0xFF, 0xD8, 0xFF, 0xD9]);
        assert!(out.data_uri().starts_with("data:image/jpeg;base64,"));
    }

    #[test]
    fn test_file_name_from_timestamp() {
        let out = output(1, 1);
        assert_eq!(out.file_name(1_700_000_000_123.0), "cropped-image-1700000000123.jpg");
    }
}
