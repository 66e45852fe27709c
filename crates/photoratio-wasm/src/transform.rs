//! Geometry helpers for the crop surface.

use photoratio_core::transform::{compute_rotated_bounds, CropRect};
use wasm_bindgen::prelude::*;

use crate::js_error;

/// Size of the canvas a `width x height` image occupies after rotating by
/// `angle_degrees`, as `[width, height]`.
///
/// Crop coordinates passed to `render_crop` are relative to this box.
#[wasm_bindgen]
pub fn rotated_bounds(width: u32, height: u32, angle_degrees: f64) -> Vec<u32> {
    let (w, h) = compute_rotated_bounds(width, height, angle_degrees);
    vec![w, h]
}

/// Largest centered window of `ratio` (width / height) inside the rotated
/// bounds, as `[x, y, width, height]`. Used as the initial frame when the
/// user picks a preset.
#[wasm_bindgen]
pub fn default_crop(
    width: u32,
    height: u32,
    angle_degrees: f64,
    ratio: f64,
) -> Result<Vec<f64>, JsValue> {
    fit_rotated(width, height, angle_degrees, ratio)
        .map(|rect| vec![rect.x, rect.y, rect.width, rect.height])
        .map_err(|e| js_error("Invalid aspect ratio", e))
}

fn fit_rotated(
    width: u32,
    height: u32,
    angle_degrees: f64,
    ratio: f64,
) -> Result<CropRect, photoratio_core::transform::GeometryError> {
    let (bw, bh) = compute_rotated_bounds(width, height, angle_degrees);
    CropRect::fit_aspect(f64::from(bw), f64::from(bh), ratio)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotated_bounds() {
        assert_eq!(rotated_bounds(800, 600, 0.0), vec![800, 600]);
        assert_eq!(rotated_bounds(800, 600, 90.0), vec![600, 800]);
        assert_eq!(rotated_bounds(800, 600, 45.0), vec![990, 990]);
    }

    #[test]
    fn test_default_crop_square_in_landscape() {
        let crop = default_crop(800, 600, 0.0, 1.0).unwrap();
        assert_eq!(crop, vec![100.0, 0.0, 600.0, 600.0]);
    }

    #[test]
    fn test_fit_rotated_uses_rotated_box() {
        let rect = fit_rotated(800, 600, 90.0, 1.0).unwrap();
        assert_eq!((rect.x, rect.y, rect.width, rect.height), (0.0, 100.0, 600.0, 600.0));
    }

    #[test]
    fn test_fit_rotated_rejects_zero_ratio() {
        assert!(fit_rotated(800, 600, 0.0, 0.0).is_err());
    }
}
