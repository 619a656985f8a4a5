//! Error type shared by the pipeline and the batch driver.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::decode::DecodeError;
use crate::encode::EncodeError;

/// Which directory argument a path error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectoryRole {
    Input,
    Output,
}

impl fmt::Display for DirectoryRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DirectoryRole::Input => f.write_str("input"),
            DirectoryRole::Output => f.write_str("output"),
        }
    }
}

/// Errors raised while augmenting images.
#[derive(Debug, Error)]
pub enum AugmentError {
    /// An argument or parameter value is invalid.
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    /// The input or output directory does not exist.
    #[error("The {role} directory does not exist: {}", path.display())]
    MissingDirectory { role: DirectoryRole, path: PathBuf },

    /// The input or output path exists but is not a directory.
    #[error("The {role} path is not a directory: {}", path.display())]
    NotADirectory { role: DirectoryRole, path: PathBuf },

    /// The crop window cannot be placed inside the image.
    #[error(
        "Degenerate crop window: {crop_width}x{crop_height} does not fit inside a {width}x{height} image"
    )]
    DegenerateCrop {
        crop_width: u32,
        crop_height: u32,
        width: u32,
        height: u32,
    },

    /// The file extension does not select a supported encoder.
    #[error("Unsupported image format: {}", path.display())]
    UnsupportedFormat { path: PathBuf },

    /// A source image could not be decoded.
    #[error("Failed to decode {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: DecodeError,
    },

    /// An output image could not be encoded.
    #[error("Failed to encode {}: {source}", path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: EncodeError,
    },

    /// A filesystem operation failed.
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An error without its own path, attributed to the source image being processed.
    #[error("Failed to augment {}: {source}", path.display())]
    Source {
        path: PathBuf,
        #[source]
        source: Box<AugmentError>,
    },
}

impl AugmentError {
    /// Shorthand for a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        AugmentError::Configuration(message.into())
    }

    /// Attach the source image path to errors that do not name a file.
    pub fn in_source(self, path: &std::path::Path) -> Self {
        match self {
            AugmentError::Configuration(_) | AugmentError::DegenerateCrop { .. } => {
                AugmentError::Source {
                    path: path.to_path_buf(),
                    source: Box::new(self),
                }
            }
            other => other,
        }
    }

    /// True for errors about the input/output directories.
    pub fn is_path_error(&self) -> bool {
        matches!(
            self,
            AugmentError::MissingDirectory { .. } | AugmentError::NotADirectory { .. }
        )
    }
}

pub type Result<T, E = AugmentError> = std::result::Result<T, E>;
