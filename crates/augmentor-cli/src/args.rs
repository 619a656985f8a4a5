//! Command-line arguments for `augment`.

use std::path::PathBuf;

use augmentor_core::{
    AugmentParams, BatchOptions, EncodeOptions, Enhancements, ExtensionMatch, FailurePolicy,
    FilterType, InterpolationFilter, ResolutionMode, TargetSize,
};
use clap::{Parser, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "augment")]
#[command(about = "Create randomized variants of every image in a directory", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Number of variants to create per source image
    pub count: u32,

    /// Directory containing the source images (default: current directory)
    pub input: Option<PathBuf>,

    /// Directory receiving the output folders (default: the input directory)
    pub output: Option<PathBuf>,

    /// Minimum rotation in degrees
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub minrot: f64,

    /// Maximum rotation in degrees
    #[arg(long, default_value_t = 360.0, allow_negative_numbers = true)]
    pub maxrot: f64,

    /// Probability of a horizontal flip
    #[arg(long, default_value_t = 0.5)]
    pub fliph: f64,

    /// Probability of a vertical flip
    #[arg(long, default_value_t = 0.5)]
    pub flipv: f64,

    /// Crop width in pixels (0 keeps the full width)
    #[arg(long, default_value_t = 0)]
    pub cwidth: u32,

    /// Crop height in pixels (0 keeps the full height)
    #[arg(long, default_value_t = 0)]
    pub cheight: u32,

    /// Output size; omitted or 0 0 keeps the source size
    #[arg(long, num_args = 2, value_names = ["WIDTH", "HEIGHT"])]
    pub size: Option<Vec<u32>>,

    /// Replace each variant with its edge response
    #[arg(long)]
    pub edges: bool,

    /// Color factor (0 is grayscale)
    #[arg(long, default_value_t = 1.0)]
    pub color: f64,

    /// Brightness factor (0 is black)
    #[arg(long, default_value_t = 1.0)]
    pub brightness: f64,

    /// Contrast factor (0 is solid gray)
    #[arg(long, default_value_t = 1.0)]
    pub contrast: f64,

    /// Sharpness factor (0 blurs, 2 sharpens)
    #[arg(long, default_value_t = 1.0)]
    pub sharpness: f64,

    /// Include images in subdirectories
    #[arg(short, long)]
    pub recurse: bool,

    /// Seed for reproducible runs
    #[arg(long)]
    pub seed: Option<u64>,

    /// JPEG quality (1-100)
    #[arg(long, default_value_t = augmentor_core::encode::DEFAULT_JPEG_QUALITY)]
    pub quality: u8,

    /// Sampling used when rotating
    #[arg(long, value_enum, default_value_t = RotationFilterArg::Nearest)]
    pub rotation_filter: RotationFilterArg,

    /// Resampling used for the final resize
    #[arg(long, value_enum, default_value_t = ResizeFilterArg::Bicubic)]
    pub resize_filter: ResizeFilterArg,

    /// Grow the canvas to fit rotated images instead of clipping corners
    #[arg(long)]
    pub expand: bool,

    /// Match file extensions regardless of case
    #[arg(long)]
    pub ignore_case: bool,

    /// How crop and size defaults are resolved across images
    #[arg(long, value_enum, default_value_t = ResolveArg::PerImage)]
    pub resolve: ResolveArg,

    /// Skip images that fail instead of stopping
    #[arg(long)]
    pub keep_going: bool,

    /// Enable debug logging
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RotationFilterArg {
    Nearest,
    Bilinear,
    Lanczos3,
}

impl From<RotationFilterArg> for InterpolationFilter {
    fn from(arg: RotationFilterArg) -> Self {
        match arg {
            RotationFilterArg::Nearest => InterpolationFilter::Nearest,
            RotationFilterArg::Bilinear => InterpolationFilter::Bilinear,
            RotationFilterArg::Lanczos3 => InterpolationFilter::Lanczos3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ResizeFilterArg {
    Nearest,
    Bilinear,
    Bicubic,
    Lanczos3,
}

impl From<ResizeFilterArg> for FilterType {
    fn from(arg: ResizeFilterArg) -> Self {
        match arg {
            ResizeFilterArg::Nearest => FilterType::Nearest,
            ResizeFilterArg::Bilinear => FilterType::Bilinear,
            ResizeFilterArg::Bicubic => FilterType::Bicubic,
            ResizeFilterArg::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ResolveArg {
    /// Every image uses its own size
    PerImage,
    /// The first image's crop and size carry over to the rest
    Batch,
}

impl From<ResolveArg> for ResolutionMode {
    fn from(arg: ResolveArg) -> Self {
        match arg {
            ResolveArg::PerImage => ResolutionMode::PerImage,
            ResolveArg::Batch => ResolutionMode::BatchGlobal,
        }
    }
}

impl Cli {
    pub fn input_dir(&self) -> PathBuf {
        self.input.clone().unwrap_or_else(|| PathBuf::from("."))
    }

    pub fn output_dir(&self) -> PathBuf {
        self.output.clone().unwrap_or_else(|| self.input_dir())
    }

    pub fn params(&self) -> AugmentParams {
        let target_size = self
            .size
            .as_deref()
            .and_then(|size| match size {
                [width, height] => Some(TargetSize::new(*width, *height)),
                _ => None,
            })
            .filter(|size| !size.is_auto());

        AugmentParams {
            target_size,
            min_rotation: self.minrot,
            max_rotation: self.maxrot,
            flip_horizontal: self.fliph,
            flip_vertical: self.flipv,
            crop_width: self.cwidth,
            crop_height: self.cheight,
            edges: self.edges,
            enhancements: Enhancements {
                color: self.color,
                brightness: self.brightness,
                contrast: self.contrast,
                sharpness: self.sharpness,
            },
            rotation_filter: self.rotation_filter.into(),
            expand_rotation: self.expand,
            resize_filter: self.resize_filter.into(),
        }
    }

    pub fn batch_options(&self) -> BatchOptions {
        BatchOptions {
            count: self.count,
            recurse: self.recurse,
            extension_match: if self.ignore_case {
                ExtensionMatch::CaseInsensitive
            } else {
                ExtensionMatch::CaseSensitive
            },
            resolution: self.resolve.into(),
            failure_policy: if self.keep_going {
                FailurePolicy::Continue
            } else {
                FailurePolicy::Abort
            },
            encode: EncodeOptions {
                jpeg_quality: self.quality,
            },
        }
    }
}
