//! Aspect ratio presets and custom frame sizes offered by the UI.
//!
//! The engine never reads these; they describe the frames a user can pick,
//! and the crop surface turns the chosen ratio into a [`CropRect`].
//!
//! [`CropRect`]: crate::transform::CropRect

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Screen pixels per centimeter used when a custom size is entered in cm.
pub const CM_TO_PX: f64 = 37.8;

/// Two ratios closer than this are the same preset.
pub const RATIO_TOLERANCE: f64 = 0.01;

/// Errors from custom ratio input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AspectError {
    #[error("Width and height must be positive numbers, got {width} x {height}")]
    InvalidSize { width: f64, height: f64 },

    #[error("Could not parse {0:?} as a number")]
    NotANumber(String),
}

/// Which section of the picker a preset is listed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AspectGroup {
    /// Screen and photo formats.
    Standard,
    /// Document photo and paper formats.
    #[serde(rename = "docs")]
    Documents,
}

/// A named frame ratio (width / height).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AspectPreset {
    pub label: &'static str,
    pub ratio: f64,
    pub group: AspectGroup,
    pub description: &'static str,
}

const fn preset(
    label: &'static str,
    ratio: f64,
    group: AspectGroup,
    description: &'static str,
) -> AspectPreset {
    AspectPreset {
        label,
        ratio,
        group,
        description,
    }
}

/// All presets, in display order.
pub const ASPECT_PRESETS: &[AspectPreset] = &[
    preset("1:1", 1.0, AspectGroup::Standard, "Square"),
    preset("9:16", 9.0 / 16.0, AspectGroup::Standard, "Stories"),
    preset("16:9", 16.0 / 9.0, AspectGroup::Standard, "Screen"),
    preset("3:4", 3.0 / 4.0, AspectGroup::Standard, "Portrait photo"),
    preset("4:3", 4.0 / 3.0, AspectGroup::Standard, "Photo"),
    preset("2:3", 2.0 / 3.0, AspectGroup::Standard, "10x15"),
    preset("3:2", 3.0 / 2.0, AspectGroup::Standard, "Classic"),
    preset("9:21", 9.0 / 21.0, AspectGroup::Standard, "Portrait cinema"),
    preset("21:9", 21.0 / 9.0, AspectGroup::Standard, "Cinema"),
    preset("3x4 cm", 3.0 / 4.0, AspectGroup::Documents, "Document"),
    preset("3.5x4.5", 3.5 / 4.5, AspectGroup::Documents, "Passport"),
    preset("5x5 cm", 1.0, AspectGroup::Documents, "Visa"),
    preset("A4", 210.0 / 297.0, AspectGroup::Documents, "Sheet"),
];

/// Presets listed under `group`.
pub fn presets_in(group: AspectGroup) -> impl Iterator<Item = &'static AspectPreset> {
    ASPECT_PRESETS.iter().filter(move |p| p.group == group)
}

/// First preset whose ratio is within [`RATIO_TOLERANCE`] of `ratio`.
pub fn find_preset(ratio: f64) -> Option<&'static AspectPreset> {
    ASPECT_PRESETS
        .iter()
        .find(|p| (p.ratio - ratio).abs() < RATIO_TOLERANCE)
}

/// Unit of a custom frame size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LengthUnit {
    #[default]
    Px,
    Cm,
}

impl LengthUnit {
    /// Convert a length in this unit to screen pixels.
    pub fn to_px(self, value: f64) -> f64 {
        match self {
            LengthUnit::Px => value,
            LengthUnit::Cm => value * CM_TO_PX,
        }
    }
}

/// Ratio of a custom `width x height` frame.
///
/// Both sides are in the same unit, so the unit only matters for the pixel
/// size, not the ratio; it is converted anyway to keep the two paths equal.
pub fn custom_ratio(width: f64, height: f64, unit: LengthUnit) -> Result<f64, AspectError> {
    if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
        return Err(AspectError::InvalidSize { width, height });
    }
    Ok(unit.to_px(width) / unit.to_px(height))
}

/// [`custom_ratio`] from the raw text of the two input fields.
pub fn parse_custom_ratio(width: &str, height: &str, unit: LengthUnit) -> Result<f64, AspectError> {
    let parse = |s: &str| {
        s.trim()
            .parse::<f64>()
            .map_err(|_| AspectError::NotANumber(s.to_string()))
    };
    custom_ratio(parse(width)?, parse(height)?, unit)
}
