//! Image encoding for augmented outputs.
//!
//! Each output is written in the format of the file it was derived from:
//! PNG sources produce PNG copies, JPEG sources produce JPEG copies at the
//! configured quality.
//!
//! # Examples
//!
//! ```ignore
//! use augmentor_core::encode::{encode_image, EncodeOptions};
//! use augmentor_core::ImageFormat;
//!
//! let bytes = encode_image(&image, ImageFormat::Jpeg, EncodeOptions::default())?;
//! println!("Encoded {} bytes", bytes.len());
//! ```

mod jpeg;
mod png;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::decode::DecodedImage;
use crate::format::ImageFormat;

pub use jpeg::encode_jpeg;
pub use png::encode_png;

/// Default JPEG quality, matching common imaging library defaults.
pub const DEFAULT_JPEG_QUALITY: u8 = 75;

/// Errors that can occur during encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 3), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// The underlying encoder failed
    #[error("{format:?} encoding failed: {message}")]
    EncodingFailed { format: ImageFormat, message: String },
}

/// Encoder settings shared across a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodeOptions {
    /// JPEG quality (1-100). Ignored for PNG.
    pub jpeg_quality: u8,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            jpeg_quality: DEFAULT_JPEG_QUALITY,
        }
    }
}

/// Encode an image in the given format.
pub fn encode_image(
    image: &DecodedImage,
    format: ImageFormat,
    options: EncodeOptions,
) -> Result<Vec<u8>, EncodeError> {
    match format {
        ImageFormat::Png => encode_png(image),
        ImageFormat::Jpeg => encode_jpeg(image, options.jpeg_quality),
    }
}

/// Check that an image buffer is encodable.
fn validate(image: &DecodedImage) -> Result<(), EncodeError> {
    let (width, height) = (image.width, image.height);
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }

    let expected = (width as usize) * (height as usize) * 3;
    if image.pixels.len() != expected {
        return Err(EncodeError::InvalidPixelData {
            expected,
            actual: image.pixels.len(),
        });
    }
    Ok(())
}
