//! The augmentation pipeline: one source image in, one variant out.
//!
//! The steps run in a fixed order, since reordering changes the output:
//!
//! 1. Random crop of the resolved window size
//! 2. Random rotation in `[min_rotation, max_rotation]`
//! 3. Horizontal flip with probability `flip_horizontal`
//! 4. Vertical flip with probability `flip_vertical`
//! 5. Edge detection, if enabled
//! 6. Brightness, contrast, sharpness, color
//! 7. Resize to the target size
//!
//! Random draws happen in the same order (crop x, crop y, angle, horizontal
//! flip, vertical flip), so a seeded source reproduces a run exactly.

use tracing::trace;

use crate::adjustments::apply_enhancements;
use crate::decode::DecodedImage;
use crate::error::{AugmentError, Result};
use crate::params::{AugmentParams, ResolvedParams};
use crate::random::RandomSource;
use crate::transform::{
    apply_crop, apply_rotation, find_edges, flip_horizontal, flip_vertical, random_crop_window,
    resize,
};

/// Produce one augmented variant of `image`.
///
/// # Errors
///
/// - `AugmentError::DegenerateCrop` if the resolved crop window does not fit
///   inside `image` (parameters resolved for a different image)
/// - `AugmentError::Configuration` if the target size has a zero axis or
///   the rotation range is not a finite interval
pub fn augment<R: RandomSource + ?Sized>(
    image: &DecodedImage,
    params: &ResolvedParams,
    rng: &mut R,
) -> Result<DecodedImage> {
    let window = random_crop_window(
        image.width,
        image.height,
        params.crop_width,
        params.crop_height,
        rng,
    )?;
    let mut result = apply_crop(image, window)?;

    if !(params.max_rotation - params.min_rotation).is_finite() {
        return Err(AugmentError::config(format!(
            "rotation range {}..{} is not a finite interval",
            params.min_rotation, params.max_rotation
        )));
    }
    let angle = rng.rotation(params.min_rotation, params.max_rotation);
    result = apply_rotation(
        &result,
        angle,
        params.rotation_filter,
        params.expand_rotation,
    );

    let mirror_h = rng.chance(params.flip_horizontal);
    if mirror_h {
        result = flip_horizontal(&result)?;
    }
    let mirror_v = rng.chance(params.flip_vertical);
    if mirror_v {
        result = flip_vertical(&result)?;
    }

    trace!(?window, angle, mirror_h, mirror_v, "random draws");

    if params.edges {
        result = find_edges(&result);
    }

    result = apply_enhancements(&result, &params.enhancements);

    resize(
        &result,
        params.target_size.width,
        params.target_size.height,
        params.resize_filter,
    )
}

/// Resolve `params` against `image` and produce one variant.
///
/// Convenience for single images; batches resolve through
/// [`crate::params::ParamResolver`] instead.
pub fn augment_image<R: RandomSource + ?Sized>(
    image: &DecodedImage,
    params: &AugmentParams,
    rng: &mut R,
) -> Result<DecodedImage> {
    let resolved = params.resolve(image.width, image.height);
    augment(image, &resolved, rng)
}
