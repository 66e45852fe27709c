//! Extracting the crop window from the rotated raster.
//!
//! Unlike a clamping crop, the output always has exactly the requested
//! size: the part of the window that overlaps the rotated raster is copied,
//! everything else keeps the fill color.
//!
//! # Example
//!
//! ```ignore
//! // Source ends at x=800: columns 100..200 of the output are padding
//! let out = extract_region(&rotated, &CropRect::new(700.0, 0.0, 200.0, 200.0), Color::WHITE)?;
//! ```

use crate::color::Color;

use super::geometry::{CropRect, GeometryError};
use super::raster::Raster;

/// Copy `crop` out of `raster` into a new raster of `crop.output_size()`.
///
/// # Errors
///
/// Returns a [`GeometryError`] when the crop size is non-finite, rounds to
/// zero, or exceeds the maximum dimension. A window partially or entirely
/// outside `raster` is not an error.
pub fn extract_region(
    raster: &Raster,
    crop: &CropRect,
    fill: Color,
) -> Result<Raster, GeometryError> {
    let (out_w, out_h) = crop.output_size()?;
    let (origin_x, origin_y) = crop.origin();

    let mut output = Raster::filled(out_w, out_h, fill);

    // Overlap of the window with the raster, in raster coordinates. Origins
    // far outside the raster saturate instead of overflowing.
    let left = origin_x.max(0);
    let top = origin_y.max(0);
    let right = origin_x
        .saturating_add(i64::from(out_w))
        .min(i64::from(raster.width));
    let bottom = origin_y
        .saturating_add(i64::from(out_h))
        .min(i64::from(raster.height));

    if left >= right || top >= bottom {
        tracing::debug!(
            x = origin_x,
            y = origin_y,
            width = out_w,
            height = out_h,
            "Crop window outside rotated raster, output is all fill"
        );
        return Ok(output);
    }

    let span = (right - left) as usize * 3;
    let src_col = left as usize * 3;
    let dst_col = (left - origin_x) as usize * 3;

    // Copy pixel data row by row for efficiency
    for src_y in top..bottom {
        let dst_y = (src_y - origin_y) as u32;
        let src_row = raster.row(src_y as u32);
        let dst_start = (dst_y as usize * out_w as usize) * 3 + dst_col;
        output.pixels[dst_start..dst_start + span]
            .copy_from_slice(&src_row[src_col..src_col + span]);
    }

    Ok(output)
}


// ============================================================================
// Property-Based Tests
// ============================================================================
