//! Source image decoding.
//!
//! The UI collaborator hands over the raw bytes of the uploaded file; this
//! module turns them into an immutable [`SourceImage`] with EXIF orientation
//! already applied. Decoding is synchronous and single-threaded.

mod source;
mod types;

pub use source::{decode_image, get_orientation};
pub use types::{DecodeError, Orientation, SourceImage};
