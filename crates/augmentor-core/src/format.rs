//! Supported image formats and extension matching.
//!
//! The file extension selects both whether a file takes part in a batch and
//! which encoder writes its augmented copies.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Image formats the tool can read and write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageFormat {
    Png,
    Jpeg,
}

/// Recognized extensions, without the leading dot.
const EXTENSIONS: [(&str, ImageFormat); 3] = [
    ("png", ImageFormat::Png),
    ("jpg", ImageFormat::Jpeg),
    ("jpeg", ImageFormat::Jpeg),
];

/// How file extensions are compared against the supported set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExtensionMatch {
    /// Only lowercase extensions match (`photo.JPG` is ignored).
    #[default]
    CaseSensitive,
    /// Extensions match regardless of case.
    CaseInsensitive,
}

impl ImageFormat {
    /// Look up the format for a bare extension (no leading dot).
    pub fn from_extension(ext: &str, matching: ExtensionMatch) -> Option<Self> {
        EXTENSIONS.iter().find_map(|&(known, format)| {
            let hit = match matching {
                ExtensionMatch::CaseSensitive => ext == known,
                ExtensionMatch::CaseInsensitive => ext.eq_ignore_ascii_case(known),
            };
            hit.then_some(format)
        })
    }

    /// Look up the format for a file path by its extension.
    pub fn from_path(path: &Path, matching: ExtensionMatch) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| Self::from_extension(ext, matching))
    }

    /// Convert to the image crate's format for decoding hints.
    pub fn to_image_format(self) -> image::ImageFormat {
        match self {
            ImageFormat::Png => image::ImageFormat::Png,
            ImageFormat::Jpeg => image::ImageFormat::Jpeg,
        }
    }
}
