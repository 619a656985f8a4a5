//! PNG/JPEG decoding into RGB8 buffers.

use std::io::Cursor;
use std::path::Path;

use image::ImageReader;

use super::{DecodeError, DecodedImage};
use crate::format::{ExtensionMatch, ImageFormat};

/// Decode an image from bytes.
///
/// The format is guessed from the content; `hint` is used when the content
/// does not identify itself.
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` if no format can be determined and
/// `DecodeError::CorruptedFile` if the data cannot be decoded.
pub fn decode_bytes(bytes: &[u8], hint: Option<ImageFormat>) -> Result<DecodedImage, DecodeError> {
    let mut reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::IoError(e.to_string()))?;

    if reader.format().is_none() {
        match hint {
            Some(format) => reader.set_format(format.to_image_format()),
            None => return Err(DecodeError::InvalidFormat),
        }
    }

    let img = reader
        .decode()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    Ok(DecodedImage::from_rgb_image(img.into_rgb8()))
}

/// Read and decode an image file, using its extension as the format hint.
pub fn decode_file(path: &Path) -> Result<DecodedImage, DecodeError> {
    let bytes = std::fs::read(path).map_err(|e| DecodeError::IoError(e.to_string()))?;
    let hint = ImageFormat::from_path(path, ExtensionMatch::CaseInsensitive);
    decode_bytes(&bytes, hint)
}
