//! Geometric stages of the crop engine: rotation, flipping and cropping.
//!
//! # Pipeline
//!
//! 1. Normalize the angle and compute the rotated bounding box
//! 2. Allocate a raster of that size filled with the fill color
//! 3. Draw the source through translate-to-center, rotate, flip
//! 4. Copy the crop window into a fill-initialized output raster
//!
//! # Coordinate System
//!
//! - Rotation angles are in degrees, positive = clockwise (y-down plane)
//! - Crop coordinates are pixels in the rotated bounding box
//! - Origin is top-left corner

mod crop;
mod geometry;
mod raster;
mod rotation;

pub use crop::extract_region;
pub use geometry::{
    compute_rotated_bounds, normalize_degrees, rotated_bounds, rotation_sin_cos, CropRect,
    FlipState, GeometryError, MAX_DIMENSION,
};
pub use raster::Raster;
pub use rotation::{rotate_onto_canvas, InterpolationFilter};
