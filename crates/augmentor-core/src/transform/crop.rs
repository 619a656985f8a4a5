//! Random-window cropping.
//!
//! A crop window is given in pixels. The window size comes from the resolved
//! parameters; only its top-left corner is random, and it is always chosen so
//! the whole window lies inside the image.

use crate::decode::DecodedImage;
use crate::error::{AugmentError, Result};
use crate::random::RandomSource;

/// A pixel rectangle inside an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropWindow {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl CropWindow {
    /// True if the window is non-empty and lies entirely inside a
    /// `width` x `height` image.
    pub fn fits_within(&self, width: u32, height: u32) -> bool {
        self.width > 0
            && self.height > 0
            && self.x as u64 + self.width as u64 <= width as u64
            && self.y as u64 + self.height as u64 <= height as u64
    }
}

/// Place a `crop_width` x `crop_height` window at a uniformly random offset.
///
/// # Errors
///
/// Returns `AugmentError::DegenerateCrop` if the window is empty or larger
/// than the image on either axis, since no valid offset exists.
pub fn random_crop_window<R: RandomSource + ?Sized>(
    width: u32,
    height: u32,
    crop_width: u32,
    crop_height: u32,
    rng: &mut R,
) -> Result<CropWindow> {
    if crop_width == 0 || crop_height == 0 || crop_width > width || crop_height > height {
        return Err(AugmentError::DegenerateCrop {
            crop_width,
            crop_height,
            width,
            height,
        });
    }

    let x = rng.crop_offset(width - crop_width);
    let y = rng.crop_offset(height - crop_height);

    Ok(CropWindow {
        x,
        y,
        width: crop_width,
        height: crop_height,
    })
}

/// Copy the pixels inside `window` into a new image.
///
/// # Errors
///
/// Returns `AugmentError::DegenerateCrop` if the window does not fit.
pub fn apply_crop(image: &DecodedImage, window: CropWindow) -> Result<DecodedImage> {
    if !window.fits_within(image.width, image.height) {
        return Err(AugmentError::DegenerateCrop {
            crop_width: window.width,
            crop_height: window.height,
            width: image.width,
            height: image.height,
        });
    }

    // Full-size window is a plain copy
    if window.width == image.width && window.height == image.height {
        return Ok(image.clone());
    }

    let row_bytes = window.width as usize * 3;
    let mut output = Vec::with_capacity(row_bytes * window.height as usize);

    for y in window.y..window.y + window.height {
        let start = image.offset(window.x, y);
        output.extend_from_slice(&image.pixels[start..start + row_bytes]);
    }

    Ok(DecodedImage::new(window.width, window.height, output))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::scripted::ScriptedSource;

    /// Create a test image where each pixel encodes its position.
    fn test_image(width: u32, height: u32) -> DecodedImage {
        let mut pixels = Vec::with_capacity((width * height * 3) as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.push(x as u8);
                pixels.push(y as u8);
                pixels.push(0);
            }
        }
        DecodedImage::new(width, height, pixels)
    }

    #[test]
    fn test_full_window_is_copy() {
        let img = test_image(20, 10);
        let window = CropWindow {
            x: 0,
            y: 0,
            width: 20,
            height: 10,
        };
        assert_eq!(apply_crop(&img, window).unwrap(), img);
    }

    #[test]
    fn test_crop_pixel_values_preserved() {
        let img = test_image(10, 10);
        let window = CropWindow {
            x: 3,
            y: 4,
            width: 5,
            height: 2,
        };
        let result = apply_crop(&img, window).unwrap();

        assert_eq!((result.width, result.height), (5, 2));
        assert_eq!(result.pixel(0, 0), [3, 4, 0]);
        assert_eq!(result.pixel(4, 1), [7, 5, 0]);
    }

    #[test]
    fn test_crop_out_of_bounds_is_degenerate() {
        let img = test_image(10, 10);
        let window = CropWindow {
            x: 6,
            y: 0,
            width: 5,
            height: 5,
        };
        assert!(matches!(
            apply_crop(&img, window),
            Err(AugmentError::DegenerateCrop { .. })
        ));
    }

    #[test]
    fn test_random_window_uses_scripted_offsets() {
        let mut rng = ScriptedSource::new(&[12, 30], &[], &[]);
        let window = random_crop_window(100, 80, 50, 50, &mut rng).unwrap();
        assert_eq!(
            window,
            CropWindow {
                x: 12,
                y: 30,
                width: 50,
                height: 50
            }
        );
    }

    #[test]
    fn test_random_window_full_size_has_zero_offset() {
        let mut rng = ScriptedSource::new(&[0, 0], &[], &[]);
        let window = random_crop_window(64, 48, 64, 48, &mut rng).unwrap();
        assert_eq!((window.x, window.y), (0, 0));
    }

    #[test]
    fn test_random_window_too_wide() {
        let mut rng = ScriptedSource::default();
        let err = random_crop_window(40, 40, 41, 10, &mut rng).unwrap_err();
        assert!(matches!(
            err,
            AugmentError::DegenerateCrop {
                crop_width: 41,
                crop_height: 10,
                width: 40,
                height: 40
            }
        ));
    }

    #[test]
    fn test_random_window_zero_size() {
        let mut rng = ScriptedSource::default();
        assert!(random_crop_window(40, 40, 0, 10, &mut rng).is_err());
    }
}
