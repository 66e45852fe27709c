//! Geometry shared by the transform stages: rotation normalization, the
//! rotated bounding box, flip flags and the crop rectangle.
//!
//! All rectangles live in the coordinate space of the *rotated* source, with
//! the origin at the top-left corner of the rotated bounding box and y
//! pointing down.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Largest output side accepted, matching the browser canvas limit.
pub const MAX_DIMENSION: u32 = 32_767;

/// Angles closer than this to a multiple of 90° are treated as exact.
const QUADRANT_EPSILON: f64 = 1e-9;

/// Crop geometry the engine refuses to render.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    /// A coordinate, size or angle is NaN or infinite.
    #[error("{field} must be finite, got {value}")]
    NonFinite { field: &'static str, value: f64 },

    /// Width or height rounds to zero or below.
    #[error("Crop size {width}x{height} must round to at least 1x1")]
    NonPositiveSize { width: f64, height: f64 },

    /// Output would exceed [`MAX_DIMENSION`] on one side.
    #[error("Crop size {width}x{height} exceeds the {max}px limit")]
    TooLarge { width: u32, height: u32, max: u32 },

    /// Aspect ratio is not a finite positive number.
    #[error("Aspect ratio must be finite and positive, got {0}")]
    InvalidRatio(f64),
}

/// Normalize an angle in degrees into `[0, 360)`.
pub fn normalize_degrees(angle_degrees: f64) -> f64 {
    let n = angle_degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if n >= 360.0 {
        0.0
    } else {
        n
    }
}

/// `(sin, cos)` of a rotation in degrees.
///
/// Multiples of 90° return exact values so quarter turns map pixel centers
/// onto pixel centers without resampling drift.
pub fn rotation_sin_cos(angle_degrees: f64) -> (f64, f64) {
    let normalized = normalize_degrees(angle_degrees);
    let quadrant = (normalized / 90.0).round();
    if (normalized - quadrant * 90.0).abs() < QUADRANT_EPSILON {
        return match quadrant as u32 % 4 {
            0 => (0.0, 1.0),
            1 => (1.0, 0.0),
            2 => (0.0, -1.0),
            _ => (-1.0, 0.0),
        };
    }
    normalized.to_radians().sin_cos()
}

/// Exact (unrounded) bounding box of a `width x height` rectangle rotated by
/// `angle_degrees`.
///
/// ```text
/// new_w = |w*cos| + |h*sin|
/// new_h = |w*sin| + |h*cos|
/// ```
pub fn rotated_bounds(width: f64, height: f64, angle_degrees: f64) -> (f64, f64) {
    let (sin, cos) = rotation_sin_cos(angle_degrees);
    let (sin, cos) = (sin.abs(), cos.abs());
    (width * cos + height * sin, width * sin + height * cos)
}

/// Pixel dimensions of the raster that holds a rotated image.
///
/// This is the single place where the bounding box is rounded; both sides
/// are at least 1.
///
/// # Example
///
/// ```
/// use photoratio_core::transform::compute_rotated_bounds;
///
/// // 90-degree rotation swaps dimensions
/// assert_eq!(compute_rotated_bounds(800, 600, 90.0), (600, 800));
/// ```
pub fn compute_rotated_bounds(width: u32, height: u32, angle_degrees: f64) -> (u32, u32) {
    let (w, h) = rotated_bounds(width as f64, height as f64, angle_degrees);
    ((w.round() as u32).max(1), (h.round() as u32).max(1))
}

/// Horizontal / vertical mirroring of the source.
///
/// Mirroring happens in the source frame before the rotation, matching the
/// canvas call order translate, rotate, scale, draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FlipState {
    pub horizontal: bool,
    pub vertical: bool,
}

impl FlipState {
    pub const NONE: FlipState = FlipState {
        horizontal: false,
        vertical: false,
    };

    pub fn new(horizontal: bool, vertical: bool) -> Self {
        Self {
            horizontal,
            vertical,
        }
    }

    /// Axis scale factors: `-1` on each flipped axis.
    pub fn scale(self) -> (f64, f64) {
        (
            if self.horizontal { -1.0 } else { 1.0 },
            if self.vertical { -1.0 } else { 1.0 },
        )
    }
}

/// Crop window in the pixel space of the rotated bounding box.
///
/// The rectangle may extend past the bounding box or lie entirely outside
/// it; uncovered pixels are painted with the fill color.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CropRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl CropRect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Output raster size: `round(width) x round(height)`.
    ///
    /// Rounding is half away from zero and identical on both axes.
    pub fn output_size(&self) -> Result<(u32, u32), GeometryError> {
        self.check_finite()?;

        let (w, h) = (self.width.round(), self.height.round());
        if w < 1.0 || h < 1.0 {
            return Err(GeometryError::NonPositiveSize {
                width: self.width,
                height: self.height,
            });
        }
        if w > MAX_DIMENSION as f64 || h > MAX_DIMENSION as f64 {
            return Err(GeometryError::TooLarge {
                width: w.min(u32::MAX as f64) as u32,
                height: h.min(u32::MAX as f64) as u32,
                max: MAX_DIMENSION,
            });
        }
        Ok((w as u32, h as u32))
    }

    /// Integer top-left corner, rounded the same way as the size.
    pub fn origin(&self) -> (i64, i64) {
        (self.x.round() as i64, self.y.round() as i64)
    }

    /// Largest rectangle of aspect `ratio` (width / height) centered in a
    /// `bounds_width x bounds_height` area.
    ///
    /// This is the frame the crop surface starts from before the user pans
    /// or zooms.
    pub fn fit_aspect(
        bounds_width: f64,
        bounds_height: f64,
        ratio: f64,
    ) -> Result<CropRect, GeometryError> {
        if !ratio.is_finite() || ratio <= 0.0 {
            return Err(GeometryError::InvalidRatio(ratio));
        }
        for (field, value) in [("bounds width", bounds_width), ("bounds height", bounds_height)] {
            if !value.is_finite() {
                return Err(GeometryError::NonFinite { field, value });
            }
        }

        let (width, height) = if bounds_width / bounds_height > ratio {
            (bounds_height * ratio, bounds_height)
        } else {
            (bounds_width, bounds_width / ratio)
        };

        Ok(CropRect {
            x: (bounds_width - width) / 2.0,
            y: (bounds_height - height) / 2.0,
            width,
            height,
        })
    }

    fn check_finite(&self) -> Result<(), GeometryError> {
        for (field, value) in [
            ("x", self.x),
            ("y", self.y),
            ("width", self.width),
            ("height", self.height),
        ] {
            if !value.is_finite() {
                return Err(GeometryError::NonFinite { field, value });
            }
        }
        Ok(())
    }
}
