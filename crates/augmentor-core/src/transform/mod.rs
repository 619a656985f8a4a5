//! Geometric and filter transforms used by the augmentation pipeline.
//!
//! # Transform Order
//!
//! The pipeline applies these in a fixed order:
//! 1. Random crop
//! 2. Rotation
//! 3. Horizontal flip, then vertical flip
//! 4. Edge detection (optional)
//! 5. Enhancements (see [`crate::adjustments`])
//! 6. Resize
//!
//! # Coordinate System
//!
//! - Crop windows are in pixels, origin top-left
//! - Rotation angles are in degrees, positive = counter-clockwise

mod crop;
mod filter;
mod flip;
mod resize;
mod rotation;

pub use crop::{apply_crop, random_crop_window, CropWindow};
pub use filter::{convolve3x3, find_edges, smooth, Kernel3x3, FIND_EDGES, SMOOTH};
pub use flip::{flip_horizontal, flip_vertical};
pub use resize::resize;
pub use rotation::{apply_rotation, compute_rotated_bounds, InterpolationFilter};
