//! Frame preset bindings.

use photoratio_core::aspect::{self, LengthUnit, ASPECT_PRESETS};
use wasm_bindgen::prelude::*;

use crate::js_error;

/// All frame presets as `{ label, ratio, group, description }` objects,
/// with `group` either `"standard"` or `"docs"`.
#[wasm_bindgen]
pub fn aspect_presets() -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(ASPECT_PRESETS).map_err(|e| js_error("Failed to list presets", e))
}

/// Ratio of a custom frame typed into the width and height fields.
///
/// `unit` is `"px"` or `"cm"`; anything else is treated as pixels.
#[wasm_bindgen]
pub fn custom_ratio(width: &str, height: &str, unit: &str) -> Result<f64, JsValue> {
    aspect::parse_custom_ratio(width, height, parse_unit(unit))
        .map_err(|e| js_error("Invalid custom size", e))
}

/// Label of the preset matching `ratio`, if any, to highlight it in the
/// picker.
#[wasm_bindgen]
pub fn find_preset_label(ratio: f64) -> Option<String> {
    aspect::find_preset(ratio).map(|p| p.label.to_string())
}

fn parse_unit(unit: &str) -> LengthUnit {
    if unit.trim().eq_ignore_ascii_case("cm") {
        LengthUnit::Cm
    } else {
        LengthUnit::Px
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_unit() {
        assert_eq!(parse_unit("cm"), LengthUnit::Cm);
        assert_eq!(parse_unit(" CM "), LengthUnit::Cm);
        assert_eq!(parse_unit("px"), LengthUnit::Px);
        assert_eq!(parse_unit(""), LengthUnit::Px);
    }

    #[test]
    fn test_custom_ratio_ok() {
        let ratio = custom_ratio("3", "4", "cm").unwrap();
        assert!((ratio - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_find_preset_label() {
        assert_eq!(find_preset_label(16.0 / 9.0).as_deref(), Some("16:9"));
        assert_eq!(find_preset_label(1.0).as_deref(), Some("1:1"));
        assert_eq!(find_preset_label(5.0), None);
    }
}
