//! The crop engine: source image + crop window + rotation + flip + fill
//! color in, encoded frame out.
//!
//! Every call is a pure function of its arguments. Nothing is cached
//! between calls and the source image is only borrowed, so the UI can call
//! [`render`] again each time a slider moves.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::color::Color;
use crate::decode::{decode_image, DecodeError, SourceImage};
use crate::encode::{encode_raster, to_data_uri, EncodeError, JPEG_MIME};
use crate::transform::{
    extract_region, normalize_degrees, rotate_onto_canvas, CropRect, FlipState, GeometryError,
    InterpolationFilter, Raster,
};

/// Errors surfaced by the engine. Crop windows outside the source are not
/// errors; they render as fill color.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Source bytes could not be decoded.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// Crop size or angle is unusable (non-finite, zero, oversized).
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(#[from] GeometryError),

    /// Output could not be encoded.
    #[error(transparent)]
    Encode(#[from] EncodeError),
}

/// Everything the UI sends for one export, minus the image itself.
///
/// Deserialized from the JS side in camelCase; only `crop` is required.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderRequest {
    /// Crop window in rotated-image pixels.
    pub crop: CropRect,
    /// Rotation in degrees, any real value.
    #[serde(default)]
    pub rotation: f64,
    #[serde(default)]
    pub flip: FlipState,
    /// Padding color, white unless specified.
    #[serde(default)]
    pub fill: Color,
    #[serde(default)]
    pub filter: InterpolationFilter,
}

impl RenderRequest {
    /// Request with no rotation, no flip and a white fill.
    pub fn new(crop: CropRect) -> Self {
        Self {
            crop,
            rotation: 0.0,
            flip: FlipState::NONE,
            fill: Color::WHITE,
            filter: InterpolationFilter::Bilinear,
        }
    }
}

/// An encoded export with its pixel dimensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputImage {
    pub width: u32,
    pub height: u32,
    /// Encoded JPEG bytes.
    pub bytes: Vec<u8>,
}

impl OutputImage {
    pub fn mime(&self) -> &'static str {
        JPEG_MIME
    }

    /// `data:image/jpeg;base64,...` for an anchor `href`.
    pub fn to_data_uri(&self) -> String {
        to_data_uri(JPEG_MIME, &self.bytes)
    }

    /// Download name for an export made at `timestamp_ms` (Unix millis).
    pub fn file_name(timestamp_ms: u64) -> String {
        format!("cropped-image-{}.jpg", timestamp_ms)
    }
}

/// Render a crop of `source` and encode it.
///
/// The output is exactly `round(crop.width) x round(crop.height)`. Any part
/// of the window not covered by the rotated source is `fill`.
///
/// # Errors
///
/// - [`RenderError::InvalidGeometry`] for non-finite values or a crop that
///   rounds to an empty or oversized frame
/// - [`RenderError::Encode`] if the encoder fails
pub fn render(
    source: &SourceImage,
    crop: &CropRect,
    rotation_degrees: f64,
    flip: FlipState,
    fill: Color,
) -> Result<OutputImage, RenderError> {
    render_with(
        source,
        &RenderRequest {
            crop: *crop,
            rotation: rotation_degrees,
            flip,
            fill,
            filter: InterpolationFilter::default(),
        },
    )
}

/// [`render`] driven by a [`RenderRequest`], honoring its filter choice.
pub fn render_with(source: &SourceImage, request: &RenderRequest) -> Result<OutputImage, RenderError> {
    let raster = render_raster(source, request)?;
    let bytes = encode_raster(&raster)?;

    tracing::debug!(
        width = raster.width,
        height = raster.height,
        encoded_bytes = bytes.len(),
        "Encoded export"
    );

    Ok(OutputImage {
        width: raster.width,
        height: raster.height,
        bytes,
    })
}

/// Decode `bytes` and render them in one step.
pub fn render_bytes(bytes: &[u8], request: &RenderRequest) -> Result<OutputImage, RenderError> {
    let source = decode_image(bytes)?;
    render_with(&source, request)
}

/// Run the geometric pipeline without encoding.
///
/// Geometry is validated before anything is allocated.
pub fn render_raster(source: &SourceImage, request: &RenderRequest) -> Result<Raster, RenderError> {
    if !request.rotation.is_finite() {
        return Err(GeometryError::NonFinite {
            field: "rotation",
            value: request.rotation,
        }
        .into());
    }
    request.crop.output_size()?;

    let angle = normalize_degrees(request.rotation);

    tracing::debug!(
        crop_x = request.crop.x,
        crop_y = request.crop.y,
        crop_width = request.crop.width,
        crop_height = request.crop.height,
        angle,
        fill = %request.fill,
        "Rendering crop"
    );

    let rotated = rotate_onto_canvas(source, angle, request.flip, request.fill, request.filter);
    let output = extract_region(&rotated, &request.crop, request.fill)?;
    Ok(output)
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::transform::rotated_bounds;
    use proptest::prelude::*;

    /// Smooth gradient so resampling error stays small.
    fn gradient_source(width: u32, height: u32) -> SourceImage {
        let mut pixels = Vec::with_capacity((width * height * 4) as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.extend_from_slice(&[
                    (x * 255 / width) as u8,
                    (y * 255 / height) as u8,
                    128,
                    255,
                ]);
            }
        }
        SourceImage::new(width, height, pixels).unwrap()
    }

    proptest! {
        /// Property: output dimensions equal the rounded crop size for any
        /// angle and any source size.
        #[test]
        fn prop_output_size_is_rounded_crop(
            (width, height) in (1u32..=24, 1u32..=24),
            angle in -720.0f64..720.0,
            x in -30.0f64..30.0,
            y in -30.0f64..30.0,
            crop_w in 0.5f64..40.0,
            crop_h in 0.5f64..40.0,
        ) {
            let source = gradient_source(width, height);
            let mut request = RenderRequest::new(CropRect::new(x, y, crop_w, crop_h));
            request.rotation = angle;
            let out = render_raster(&source, &request).unwrap();

            prop_assert_eq!(out.width, crop_w.round() as u32);
            prop_assert_eq!(out.height, crop_h.round() as u32);
        }

        /// Property: with no rotation, an inside crop copies the source block.
        #[test]
        fn prop_identity_crop_copies_source(
            (width, height) in (2u32..=30, 2u32..=30),
            fx in 0.0f64..1.0,
            fy in 0.0f64..1.0,
        ) {
            let source = gradient_source(width, height);
            let x = (fx * (width - 1) as f64).floor();
            let y = (fy * (height - 1) as f64).floor();
            let crop = CropRect::new(x, y, width as f64 - x, height as f64 - y);
            let out = render_raster(&source, &RenderRequest::new(crop)).unwrap();

            for oy in 0..out.height {
                for ox in 0..out.width {
                    let p = source.pixel(ox + x as u32, oy + y as u32);
                    prop_assert_eq!(out.get(ox, oy), [p[0], p[1], p[2]]);
                }
            }
        }

        /// Property: a crop entirely outside the rotated box is pure fill.
        #[test]
        fn prop_outside_crop_is_fill(
            (width, height) in (1u32..=20, 1u32..=20),
            angle in 0.0f64..360.0,
            offset in 1.0f64..50.0,
        ) {
            let source = gradient_source(width, height);
            let (bw, _) = rotated_bounds(width as f64, height as f64, angle);
            let mut request = RenderRequest::new(CropRect::new(bw.round() + offset, 0.0, 8.0, 8.0));
            request.rotation = angle;
            request.fill = Color::rgb(3, 5, 7);
            let out = render_raster(&source, &request).unwrap();

            prop_assert!(out.pixels.chunks(3).all(|p| p == [3, 5, 7]));
        }

        /// Property: rotating by θ and then by 360-θ restores the interior
        /// of the original within resampling tolerance.
        #[test]
        fn prop_rotation_round_trip(angle in 1.0f64..359.0) {
            let (w, h) = (40u32, 30u32);
            let source = gradient_source(w, h);

            let (bw, bh) = rotated_bounds(w as f64, h as f64, angle);
            let mut forward = RenderRequest::new(CropRect::new(0.0, 0.0, bw, bh));
            forward.rotation = angle;
            let rotated = render_raster(&source, &forward).unwrap();

            let rotated_source = SourceImage::from_rgb(rotated.width, rotated.height, &rotated.pixels).unwrap();
            let (bw2, bh2) = rotated_bounds(rotated.width as f64, rotated.height as f64, 360.0 - angle);
            let mut back = RenderRequest::new(CropRect::new(
                ((bw2 - w as f64) / 2.0).round(),
                ((bh2 - h as f64) / 2.0).round(),
                w as f64,
                h as f64,
            ));
            back.rotation = 360.0 - angle;
            let restored = render_raster(&rotated_source, &back).unwrap();

            // Skip a border where edge blending with the fill dominates
            for y in 6..h - 6 {
                for x in 6..w - 6 {
                    let original = source.pixel(x, y);
                    let got = restored.get(x, y);
                    for c in 0..3 {
                        let diff = (original[c] as i32 - got[c] as i32).abs();
                        prop_assert!(diff <= 24, "channel {} at ({}, {}): {} vs {}", c, x, y, original[c], got[c]);
                    }
                }
            }
        }
    }
}
