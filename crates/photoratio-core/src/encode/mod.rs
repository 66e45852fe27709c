//! Output encoding.
//!
//! The final raster is encoded as JPEG at a single fixed quality and can be
//! packaged as a `data:` URI for the browser download link.
//!
//! # Examples
//!
//! ```ignore
//! use photoratio_core::encode::{encode_jpeg, JPEG_QUALITY};
//!
//! let pixels = vec![128u8; 100 * 100 * 3]; // Gray image
//! let jpeg_bytes = encode_jpeg(&pixels, 100, 100, JPEG_QUALITY).unwrap();
//! println!("Encoded {} bytes", jpeg_bytes.len());
//! ```

mod data_uri;
mod jpeg;

pub use data_uri::to_data_uri;
pub use jpeg::{encode_jpeg, encode_raster, EncodeError, JPEG_MIME, JPEG_QUALITY};
