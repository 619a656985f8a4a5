//! Image decoding for the augmentation pipeline.
//!
//! Every source image is decoded into a [`DecodedImage`]: a plain RGB8 buffer.
//! Alpha channels and palettes are dropped here, so all later stages work on
//! three channels and uncovered areas (rotation corners) come out black.
//!
//! # Examples
//!
//! ```ignore
//! use augmentor_core::decode::decode_file;
//!
//! let image = decode_file(Path::new("photo.jpg"))?;
//! println!("Decoded {}x{} image", image.width, image.height);
//! ```

mod reader;
mod types;

pub use reader::{decode_bytes, decode_file};
pub use types::{DecodeError, DecodedImage, FilterType};
