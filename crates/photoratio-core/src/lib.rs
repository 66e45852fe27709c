//! PhotoRatio Core - crop-to-frame engine
//!
//! Takes a decoded photo, a rotation, optional flips and a crop window chosen
//! on an interactive crop surface, and produces a JPEG of exactly the window's
//! size. Wherever the window reaches past the photo the frame is padded with a
//! solid fill color.
//!
//! # Module Structure
//!
//! - `decode` - uploaded bytes to [`SourceImage`], EXIF orientation applied
//! - `transform` - rotated bounding box, rotate/flip drawing, crop extraction
//! - `encode` - fixed-quality JPEG and `data:` URI output
//! - `render` - the engine entry points tying the stages together
//! - `color` - fill color parsing
//! - `aspect` - frame presets and custom sizes for the UI
//!
//! # Example
//!
//! ```ignore
//! use photoratio_core::{decode_image, render, Color, CropRect, FlipState};
//!
//! let source = decode_image(&bytes)?;
//! let crop = CropRect::new(700.0, 0.0, 200.0, 200.0);
//! let out = render(&source, &crop, 0.0, FlipState::NONE, Color::WHITE)?;
//! assert_eq!((out.width, out.height), (200, 200));
//! ```

pub mod aspect;
pub mod color;
pub mod decode;
pub mod encode;
pub mod render;
pub mod transform;

pub use color::{Color, ColorParseError};
pub use decode::{decode_image, DecodeError, SourceImage};
pub use render::{render, render_bytes, render_raster, render_with, OutputImage, RenderError, RenderRequest};
pub use transform::{compute_rotated_bounds, CropRect, FlipState, InterpolationFilter};
