//! 3x3 convolution filters.
//!
//! Border pixels have no full neighborhood and are copied from the source
//! unchanged. Results are rounded and clamped to 0-255.

use crate::decode::DecodedImage;

/// A 3x3 kernel in row-major order with its normalizing divisor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Kernel3x3 {
    pub weights: [f32; 9],
    pub divisor: f32,
}

/// High-pass kernel that keeps only intensity changes.
pub const FIND_EDGES: Kernel3x3 = Kernel3x3 {
    weights: [-1.0, -1.0, -1.0, -1.0, 8.0, -1.0, -1.0, -1.0, -1.0],
    divisor: 1.0,
};

/// Mild low-pass kernel, used as the "blurred" end of sharpness.
pub const SMOOTH: Kernel3x3 = Kernel3x3 {
    weights: [1.0, 1.0, 1.0, 1.0, 5.0, 1.0, 1.0, 1.0, 1.0],
    divisor: 13.0,
};

/// Convolve every interior pixel with `kernel`.
pub fn convolve3x3(image: &DecodedImage, kernel: &Kernel3x3) -> DecodedImage {
    let mut output = image.pixels.clone();
    if image.width < 3 || image.height < 3 {
        return DecodedImage::new(image.width, image.height, output);
    }

    for y in 1..image.height - 1 {
        for x in 1..image.width - 1 {
            let mut acc = [0.0f32; 3];
            for (k, weight) in kernel.weights.iter().enumerate() {
                let sx = x + (k as u32 % 3) - 1;
                let sy = y + (k as u32 / 3) - 1;
                let idx = image.offset(sx, sy);
                for c in 0..3 {
                    acc[c] += image.pixels[idx + c] as f32 * weight;
                }
            }

            let dst = image.offset(x, y);
            for c in 0..3 {
                output[dst + c] = (acc[c] / kernel.divisor).round().clamp(0.0, 255.0) as u8;
            }
        }
    }

    DecodedImage::new(image.width, image.height, output)
}

/// Replace an image with its edge response.
pub fn find_edges(image: &DecodedImage) -> DecodedImage {
    convolve3x3(image, &FIND_EDGES)
}

/// Slightly blur an image.
pub fn smooth(image: &DecodedImage) -> DecodedImage {
    convolve3x3(image, &SMOOTH)
}
