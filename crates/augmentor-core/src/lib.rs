//! Augmentor Core - image augmentation library
//!
//! This crate turns one source image into randomized training variants
//! (crop, rotation, flips, edge detection, enhancements, resize) and drives
//! that pipeline over whole directories of PNG and JPEG files.

pub mod adjustments;
pub mod batch;
pub mod decode;
pub mod encode;
pub mod error;
pub mod format;
pub mod luminance;
pub mod params;
pub mod pipeline;
pub mod random;
pub mod transform;

pub use adjustments::Enhancements;
pub use batch::{
    discover_images, BatchDriver, BatchFailure, BatchOptions, BatchSummary, FailurePolicy,
    Progress, SourceImage,
};
pub use decode::{DecodedImage, FilterType};
pub use encode::EncodeOptions;
pub use error::{AugmentError, DirectoryRole, Result};
pub use format::{ExtensionMatch, ImageFormat};
pub use params::{AugmentParams, ParamResolver, ResolutionMode, ResolvedParams, TargetSize};
pub use pipeline::{augment, augment_image};
pub use random::RandomSource;
pub use transform::InterpolationFilter;
