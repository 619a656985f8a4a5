//! The Parameter Set and its per-image resolution.
//!
//! [`AugmentParams`] is built once per run and never mutated by the pipeline.
//! Its "auto" fields (crop size 0, no target size) are turned into concrete
//! values for a particular image by [`AugmentParams::resolve`], producing a
//! [`ResolvedParams`] working copy.

use serde::{Deserialize, Serialize};

use crate::adjustments::Enhancements;
use crate::decode::FilterType;
use crate::error::{AugmentError, Result};
use crate::transform::InterpolationFilter;

/// Output dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetSize {
    pub width: u32,
    pub height: u32,
}

impl TargetSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// A size with a zero axis means "keep the source size".
    pub fn is_auto(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Randomized transformation ranges and fixed enhancement factors for a run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AugmentParams {
    /// Final output size. `None` resolves to the source size.
    pub target_size: Option<TargetSize>,
    /// Lower bound of the random rotation, in degrees.
    pub min_rotation: f64,
    /// Upper bound of the random rotation, in degrees. Clamped to at least `min_rotation`.
    pub max_rotation: f64,
    /// Probability of a left-right mirror.
    pub flip_horizontal: f64,
    /// Probability of a top-bottom mirror.
    pub flip_vertical: f64,
    /// Crop window width. 0 or wider than the image means full width.
    pub crop_width: u32,
    /// Crop window height. 0 or taller than the image means full height.
    pub crop_height: u32,
    /// Replace the image with its edge response.
    pub edges: bool,
    /// Brightness, contrast, sharpness and color factors.
    pub enhancements: Enhancements,
    /// Sampling used by rotation.
    pub rotation_filter: InterpolationFilter,
    /// Grow the canvas to fit the rotated image instead of clipping corners.
    pub expand_rotation: bool,
    /// Resampling used by the final resize.
    pub resize_filter: FilterType,
}

impl Default for AugmentParams {
    fn default() -> Self {
        Self {
            target_size: None,
            min_rotation: 0.0,
            max_rotation: 360.0,
            flip_horizontal: 0.5,
            flip_vertical: 0.5,
            crop_width: 0,
            crop_height: 0,
            edges: false,
            enhancements: Enhancements::default(),
            rotation_filter: InterpolationFilter::default(),
            expand_rotation: false,
            resize_filter: FilterType::default(),
        }
    }
}

impl AugmentParams {
    /// Parameters that leave an image untouched (apart from format conversion).
    pub fn identity() -> Self {
        Self {
            max_rotation: 0.0,
            flip_horizontal: 0.0,
            flip_vertical: 0.0,
            ..Self::default()
        }
    }

    /// Reject values no image could be augmented with.
    ///
    /// Flip probabilities are deliberately not range-checked: values outside
    /// [0, 1] mean never/always.
    pub fn validate(&self) -> Result<()> {
        let floats = [
            ("min_rotation", self.min_rotation),
            ("max_rotation", self.max_rotation),
            ("flip_horizontal", self.flip_horizontal),
            ("flip_vertical", self.flip_vertical),
        ];
        for (name, value) in floats.into_iter().chain(self.enhancements.named()) {
            if !value.is_finite() {
                return Err(AugmentError::config(format!(
                    "{name} must be a finite number, got {value}"
                )));
            }
        }

        let span = self.max_rotation.max(self.min_rotation) - self.min_rotation;
        if !span.is_finite() {
            return Err(AugmentError::config(format!(
                "rotation range {}..{} is too wide",
                self.min_rotation, self.max_rotation
            )));
        }
        Ok(())
    }

    /// Resolve the auto fields against a `width` x `height` source image.
    pub fn resolve(&self, width: u32, height: u32) -> ResolvedParams {
        let crop_width = resolve_axis(self.crop_width, width);
        let crop_height = resolve_axis(self.crop_height, height);

        let target_size = match self.target_size {
            Some(size) if !size.is_auto() => size,
            _ => TargetSize::new(width, height),
        };

        ResolvedParams {
            crop_width,
            crop_height,
            target_size,
            min_rotation: self.min_rotation,
            max_rotation: self.max_rotation.max(self.min_rotation),
            flip_horizontal: self.flip_horizontal,
            flip_vertical: self.flip_vertical,
            edges: self.edges,
            enhancements: self.enhancements,
            rotation_filter: self.rotation_filter,
            expand_rotation: self.expand_rotation,
            resize_filter: self.resize_filter,
        }
    }
}

/// 0 or larger than the axis means the whole axis.
fn resolve_axis(requested: u32, available: u32) -> u32 {
    if requested == 0 || requested > available {
        available
    } else {
        requested
    }
}

/// Concrete parameters for augmenting one image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedParams {
    pub crop_width: u32,
    pub crop_height: u32,
    pub target_size: TargetSize,
    pub min_rotation: f64,
    /// Always `>= min_rotation`.
    pub max_rotation: f64,
    pub flip_horizontal: f64,
    pub flip_vertical: f64,
    pub edges: bool,
    pub enhancements: Enhancements,
    pub rotation_filter: InterpolationFilter,
    pub expand_rotation: bool,
    pub resize_filter: FilterType,
}

/// How auto fields are resolved across the images of one batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResolutionMode {
    /// Every image resolves against its own dimensions.
    #[default]
    PerImage,
    /// Resolved values carry over to later images: the target size is pinned
    /// by the first image and the crop window can only shrink.
    BatchGlobal,
}

/// Resolves parameters image by image according to a [`ResolutionMode`].
#[derive(Debug, Clone)]
pub struct ParamResolver {
    params: AugmentParams,
    mode: ResolutionMode,
}

impl ParamResolver {
    pub fn new(params: AugmentParams, mode: ResolutionMode) -> Self {
        Self { params, mode }
    }

    /// Resolve for the next image in the batch.
    pub fn resolve(&mut self, width: u32, height: u32) -> ResolvedParams {
        let resolved = self.params.resolve(width, height);

        if self.mode == ResolutionMode::BatchGlobal {
            self.params.crop_width = resolved.crop_width;
            self.params.crop_height = resolved.crop_height;
            self.params.target_size = Some(resolved.target_size);
        }

        resolved
    }

}
