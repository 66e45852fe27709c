//! Source image decoding with EXIF orientation handling.

use std::io::Cursor;

use exif::{In, Reader, Tag};
use image::{DynamicImage, ImageReader};

use super::{DecodeError, Orientation, SourceImage};

/// Decode an uploaded image file into a [`SourceImage`].
///
/// The container format is sniffed from the bytes (JPEG, PNG, WebP, GIF, BMP).
/// The EXIF orientation tag is applied so the pixel grid matches what the
/// browser shows the user while they position the crop.
///
/// # Errors
///
/// - `DecodeError::EmptyInput` for an empty slice
/// - `DecodeError::InvalidFormat` when the format cannot be recognized
/// - `DecodeError::CorruptedFile` when the decoder fails
pub fn decode_image(bytes: &[u8]) -> Result<SourceImage, DecodeError> {
    if bytes.is_empty() {
        return Err(DecodeError::EmptyInput);
    }

    let orientation = extract_orientation(bytes);

    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    let format = reader.format().ok_or(DecodeError::InvalidFormat)?;

    let img = reader
        .decode()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    tracing::debug!(
        format = ?format,
        width = img.width(),
        height = img.height(),
        orientation = ?orientation,
        "Decoded source image"
    );

    let oriented = apply_orientation(img, orientation);
    SourceImage::from_rgba_image(oriented.into_rgba8())
}

/// Extract EXIF orientation value from image bytes.
///
/// Returns `Orientation::Normal` when there is no EXIF block or the tag
/// cannot be read.
pub fn get_orientation(bytes: &[u8]) -> Orientation {
    extract_orientation(bytes)
}

fn extract_orientation(bytes: &[u8]) -> Orientation {
    let mut cursor = Cursor::new(bytes);

    match Reader::new().read_from_container(&mut cursor) {
        Ok(exif) => exif
            .get_field(Tag::Orientation, In::PRIMARY)
            .and_then(|field| field.value.get_uint(0))
            .map(Orientation::from)
            .unwrap_or_default(),
        Err(exif::Error::NotFound(_)) => Orientation::Normal,
        Err(e) => {
            tracing::warn!(error = %e, "Ignoring unreadable EXIF block");
            Orientation::Normal
        }
    }
}

fn apply_orientation(img: DynamicImage, orientation: Orientation) -> DynamicImage {
    match orientation {
        Orientation::Normal => img,
        Orientation::FlipHorizontal => img.fliph(),
        Orientation::Rotate180 => img.rotate180(),
        Orientation::FlipVertical => img.flipv(),
        Orientation::Transpose => img.rotate90().fliph(),
        Orientation::Rotate90CW => img.rotate90(),
        Orientation::Transverse => img.rotate270().fliph(),
        Orientation::Rotate270CW => img.rotate270(),
    }
}
