//! Batch driver: augment every supported image in a directory.
//!
//! For each source file, in discovery order, the driver decodes it once,
//! resolves the parameters for its dimensions, runs the pipeline `count`
//! times and writes `0.<ext>` .. `<count-1>.<ext>` into a fresh folder named
//! `<stem>_<run timestamp>` under the output directory.
//!
//! Directories are validated before anything is read or written. The output
//! folder of a source is only created once its first variant is ready, so a
//! file that fails to decode leaves nothing behind.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, info_span, warn};
use walkdir::{DirEntry, WalkDir};

use crate::decode::{decode_file, DecodedImage};
use crate::encode::{encode_image, EncodeOptions};
use crate::error::{AugmentError, DirectoryRole, Result};
use crate::format::{ExtensionMatch, ImageFormat};
use crate::params::{AugmentParams, ParamResolver, ResolutionMode};
use crate::pipeline::augment;
use crate::random::RandomSource;

/// Timestamp layout used in output folder names.
pub const TIMESTAMP_FORMAT: &str = "%m-%d-%Y-%H-%M-%S";

/// What to do when one source image fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FailurePolicy {
    /// Stop the batch and return the error.
    #[default]
    Abort,
    /// Log the error, skip the file and report it in the summary.
    Continue,
}

/// Batch-level settings besides the Parameter Set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchOptions {
    /// Variants to produce per source image.
    pub count: u32,
    /// Descend into subdirectories of the input directory.
    pub recurse: bool,
    pub extension_match: ExtensionMatch,
    pub resolution: ResolutionMode,
    pub failure_policy: FailurePolicy,
    pub encode: EncodeOptions,
}

impl BatchOptions {
    pub fn new(count: u32) -> Self {
        Self {
            count,
            recurse: false,
            extension_match: ExtensionMatch::default(),
            resolution: ResolutionMode::default(),
            failure_policy: FailurePolicy::default(),
            encode: EncodeOptions::default(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.count == 0 {
            return Err(AugmentError::config("count must be at least 1"));
        }
        if !(1..=100).contains(&self.encode.jpeg_quality) {
            return Err(AugmentError::config(format!(
                "JPEG quality must be between 1 and 100, got {}",
                self.encode.jpeg_quality
            )));
        }
        Ok(())
    }
}

/// A supported image found in the input directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceImage {
    pub path: PathBuf,
    /// Directory of the file relative to the input root (empty at the top level).
    pub relative_dir: PathBuf,
    pub format: ImageFormat,
}

/// Progress notification, sent after each source file.
#[derive(Debug)]
pub struct Progress<'a> {
    /// 1-based position of the source in discovery order.
    pub index: usize,
    pub total: usize,
    pub source: &'a Path,
    /// Folder the variants went to, `None` if the source failed.
    pub folder: Option<&'a Path>,
}

/// A source image skipped under [`FailurePolicy::Continue`].
#[derive(Debug)]
pub struct BatchFailure {
    pub source: PathBuf,
    pub error: AugmentError,
}

/// Outcome of a batch run.
#[derive(Debug, Default)]
pub struct BatchSummary {
    /// Supported images found.
    pub discovered: usize,
    /// Images fully augmented.
    pub processed: usize,
    /// Output files written.
    pub written: usize,
    /// Output folders created, in processing order.
    pub folders: Vec<PathBuf>,
    pub failures: Vec<BatchFailure>,
}

impl BatchSummary {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Format a run timestamp for folder names.
pub fn run_timestamp(now: DateTime<Local>) -> String {
    now.format(TIMESTAMP_FORMAT).to_string()
}

/// True for folder names this driver produces: `<stem>_<timestamp>`,
/// optionally followed by a `-N` uniqueness suffix.
pub fn is_run_folder(name: &str) -> bool {
    let Some((_, stamp)) = name.rsplit_once('_') else {
        return false;
    };
    let stamp = match stamp.rsplit_once('-') {
        Some((head, n)) if stamp.split('-').count() == 7 => {
            if n.is_empty() || !n.bytes().all(|b| b.is_ascii_digit()) {
                return false;
            }
            head
        }
        _ => stamp,
    };
    NaiveDateTime::parse_from_str(stamp, TIMESTAMP_FORMAT).is_ok()
}

/// How the output directory sits relative to the input directory.
#[derive(Debug, Clone, PartialEq, Eq)]
enum OutputOverlap {
    /// Output folders are written straight into the input tree.
    Same,
    /// The output root is this directory below the input root.
    Nested(PathBuf),
}

fn canonical(path: &Path) -> Result<PathBuf> {
    path.canonicalize().map_err(|e| AugmentError::Io {
        path: path.to_path_buf(),
        source: e,
    })
}

fn output_overlap(input: &Path, output: &Path) -> Result<Option<OutputOverlap>> {
    let input = canonical(input)?;
    let output = canonical(output)?;
    Ok(match output.strip_prefix(&input) {
        Ok(rel) if rel.as_os_str().is_empty() => Some(OutputOverlap::Same),
        Ok(rel) => Some(OutputOverlap::Nested(rel.to_path_buf())),
        Err(_) => None,
    })
}

/// Directories holding output of earlier runs are left out of discovery.
fn is_earlier_output(entry: &DirEntry, input: &Path, overlap: Option<&OutputOverlap>) -> bool {
    if entry.depth() == 0 || !entry.file_type().is_dir() {
        return false;
    }
    let skip = match overlap {
        None => false,
        Some(OutputOverlap::Same) => entry.file_name().to_str().is_some_and(is_run_folder),
        Some(OutputOverlap::Nested(rel)) => entry
            .path()
            .strip_prefix(input)
            .is_ok_and(|path| path == rel.as_path()),
    };
    if skip {
        debug!(path = %entry.path().display(), "skipping output directory");
    }
    skip
}

/// List supported images in `input`, sorted by file name within each directory.
///
/// When `output` lies inside `input`, output written by earlier runs is not
/// picked up again: a nested output root is skipped entirely, and with
/// `output == input` every folder named like a run folder is skipped.
pub fn discover_images(
    input: &Path,
    output: Option<&Path>,
    recurse: bool,
    matching: ExtensionMatch,
) -> Result<Vec<SourceImage>> {
    let max_depth = if recurse { usize::MAX } else { 1 };
    let overlap = match output {
        Some(output) => output_overlap(input, output)?,
        None => None,
    };
    let mut images = Vec::new();

    let walker = WalkDir::new(input)
        .min_depth(1)
        .max_depth(max_depth)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| !is_earlier_output(entry, input, overlap.as_ref()));

    for entry in walker {
        let entry = entry.map_err(|e| AugmentError::Io {
            path: e.path().unwrap_or(input).to_path_buf(),
            source: e.into(),
        })?;

        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(format) = ImageFormat::from_path(path, matching) else {
            debug!(path = %path.display(), "skipping unsupported file");
            continue;
        };

        let relative_dir = path
            .parent()
            .and_then(|parent| parent.strip_prefix(input).ok())
            .map(Path::to_path_buf)
            .unwrap_or_default();

        images.push(SourceImage {
            path: path.to_path_buf(),
            relative_dir,
            format,
        });
    }

    Ok(images)
}

/// Check that `path` is an existing directory.
fn require_directory(path: &Path, role: DirectoryRole) -> Result<()> {
    if !path.exists() {
        return Err(AugmentError::MissingDirectory {
            role,
            path: path.to_path_buf(),
        });
    }
    if !path.is_dir() {
        return Err(AugmentError::NotADirectory {
            role,
            path: path.to_path_buf(),
        });
    }
    Ok(())
}

/// Pick `<parent>/<base>`, or `<parent>/<base>-N` if that is taken.
fn unique_folder(parent: &Path, base: &str) -> PathBuf {
    let candidate = parent.join(base);
    if !candidate.exists() {
        return candidate;
    }
    (1..)
        .map(|n| parent.join(format!("{base}-{n}")))
        .find(|path| !path.exists())
        .unwrap_or(candidate)
}

/// Runs the pipeline over a directory of images.
#[derive(Debug, Clone)]
pub struct BatchDriver {
    input: PathBuf,
    output: PathBuf,
    params: AugmentParams,
    options: BatchOptions,
    timestamp: String,
}

impl BatchDriver {
    /// Create a driver; the run timestamp is taken now.
    pub fn new(
        input: impl Into<PathBuf>,
        output: impl Into<PathBuf>,
        params: AugmentParams,
        options: BatchOptions,
    ) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            params,
            options,
            timestamp: run_timestamp(Local::now()),
        }
    }

    /// Override the run timestamp used in folder names.
    pub fn with_timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = timestamp.into();
        self
    }

    /// Validate options, parameters and both directories.
    pub fn validate(&self) -> Result<()> {
        self.options.validate()?;
        self.params.validate()?;
        require_directory(&self.input, DirectoryRole::Input)?;
        require_directory(&self.output, DirectoryRole::Output)?;
        Ok(())
    }

    /// Augment every supported image, calling `on_progress` after each one.
    ///
    /// # Errors
    ///
    /// Validation errors are always returned before any work is done. Errors
    /// for individual images are returned immediately under
    /// [`FailurePolicy::Abort`] and collected in the summary under
    /// [`FailurePolicy::Continue`].
    pub fn run<R, F>(&self, rng: &mut R, mut on_progress: F) -> Result<BatchSummary>
    where
        R: RandomSource + ?Sized,
        F: FnMut(&Progress<'_>),
    {
        self.validate()?;

        let sources = discover_images(
            &self.input,
            Some(&self.output),
            self.options.recurse,
            self.options.extension_match,
        )?;
        let total = sources.len();
        let mut summary = BatchSummary {
            discovered: total,
            ..Default::default()
        };

        if total == 0 {
            info!(input = %self.input.display(), "no supported images found");
            return Ok(summary);
        }
        info!(
            total,
            count = self.options.count,
            timestamp = %self.timestamp,
            "augmenting images"
        );

        let mut resolver = ParamResolver::new(self.params, self.options.resolution);

        for (i, source) in sources.iter().enumerate() {
            let _span = info_span!("source", path = %source.path.display()).entered();

            match self.process_source(source, &mut resolver, rng) {
                Ok(folder) => {
                    summary.processed += 1;
                    summary.written += self.options.count as usize;
                    on_progress(&Progress {
                        index: i + 1,
                        total,
                        source: &source.path,
                        folder: Some(&folder),
                    });
                    summary.folders.push(folder);
                }
                Err(error) => {
                    let error = error.in_source(&source.path);
                    match self.options.failure_policy {
                        FailurePolicy::Abort => return Err(error),
                        FailurePolicy::Continue => {
                            warn!(%error, "skipping image");
                            on_progress(&Progress {
                                index: i + 1,
                                total,
                                source: &source.path,
                                folder: None,
                            });
                            summary.failures.push(BatchFailure {
                                source: source.path.clone(),
                                error,
                            });
                        }
                    }
                }
            }
        }

        info!(
            processed = summary.processed,
            written = summary.written,
            failed = summary.failures.len(),
            "batch finished"
        );
        Ok(summary)
    }

    /// Write all variants of one source; returns the folder used.
    fn process_source<R: RandomSource + ?Sized>(
        &self,
        source: &SourceImage,
        resolver: &mut ParamResolver,
        rng: &mut R,
    ) -> Result<PathBuf> {
        let image = decode_file(&source.path).map_err(|e| AugmentError::Decode {
            path: source.path.clone(),
            source: e,
        })?;
        let resolved = resolver.resolve(image.width, image.height);
        debug!(
            width = image.width,
            height = image.height,
            ?resolved,
            "decoded source"
        );

        let stem = source
            .path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let extension = source
            .path
            .extension()
            .map(|e| e.to_string_lossy().into_owned())
            .unwrap_or_default();

        let mut folder: Option<PathBuf> = None;
        for index in 0..self.options.count {
            let variant = augment(&image, &resolved, rng)?;

            let dir = match &folder {
                Some(dir) => dir.clone(),
                None => {
                    let dir = self.create_output_folder(source, &stem)?;
                    folder = Some(dir.clone());
                    dir
                }
            };

            let out_path = dir.join(format!("{index}.{extension}"));
            self.write_variant(&variant, source.format, &out_path)?;
        }

        folder.ok_or_else(|| AugmentError::config("count must be at least 1"))
    }

    fn create_output_folder(&self, source: &SourceImage, stem: &str) -> Result<PathBuf> {
        let parent = self.output.join(&source.relative_dir);
        fs::create_dir_all(&parent).map_err(|e| AugmentError::Io {
            path: parent.clone(),
            source: e,
        })?;

        let dir = unique_folder(&parent, &format!("{stem}_{}", self.timestamp));
        fs::create_dir(&dir).map_err(|e| AugmentError::Io {
            path: dir.clone(),
            source: e,
        })?;
        debug!(folder = %dir.display(), "created output folder");
        Ok(dir)
    }

    fn write_variant(&self, image: &DecodedImage, format: ImageFormat, path: &Path) -> Result<()> {
        let bytes =
            encode_image(image, format, self.options.encode).map_err(|e| AugmentError::Encode {
                path: path.to_path_buf(),
                source: e,
            })?;
        fs::write(path, bytes).map_err(|e| AugmentError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        debug!(path = %path.display(), width = image.width, height = image.height, "wrote variant");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::TargetSize;
    use image::{Rgb, RgbImage};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use tempfile::TempDir;

    fn write_image(path: &Path, width: u32, height: u32) {
        let img = RgbImage::from_fn(width, height, |x, y| Rgb([x as u8, y as u8, 128]));
        img.save(path).unwrap();
    }

    fn list_dir(path: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(path)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    fn subdirs(path: &Path) -> Vec<PathBuf> {
        let mut dirs: Vec<PathBuf> = fs::read_dir(path)
            .unwrap()
            .map(|e| e.unwrap().path())
            .filter(|p| p.is_dir())
            .collect();
        dirs.sort();
        dirs
    }

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(2024)
    }

    /// Driver with default parameters.
    fn driver(input: &Path, output: &Path, options: BatchOptions) -> BatchDriver {
        BatchDriver::new(input, output, AugmentParams::default(), options)
    }

    fn recursive(count: u32) -> BatchOptions {
        let mut options = BatchOptions::new(count);
        options.recurse = true;
        options
    }

    #[test]
    fn test_jpeg_and_text_file_count_three() {
        let input = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();
        write_image(&input.path().join("photo.jpg"), 32, 24);
        fs::write(input.path().join("readme.txt"), "not an image").unwrap();

        let summary = driver(input.path(), output.path(), BatchOptions::new(3))
            .with_timestamp("01-02-2026-03-04-05")
            .run(&mut rng(), |_| {})
            .unwrap();

        assert_eq!(summary.discovered, 1);
        assert_eq!(summary.written, 3);

        let folders = subdirs(output.path());
        assert_eq!(folders.len(), 1);
        assert_eq!(folders[0].file_name().unwrap(), "photo_01-02-2026-03-04-05");
        assert_eq!(list_dir(&folders[0]), vec!["0.jpg", "1.jpg", "2.jpg"]);
    }

    #[test]
    fn test_outputs_decode_at_target_size() {
        let input = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();
        write_image(&input.path().join("a.png"), 40, 30);

        let params = AugmentParams {
            target_size: Some(TargetSize::new(16, 8)),
            ..Default::default()
        };
        let summary = BatchDriver::new(input.path(), output.path(), params, BatchOptions::new(2))
            .run(&mut rng(), |_| {})
            .unwrap();

        let out = summary.folders[0].join("1.png");
        let decoded = decode_file(&out).unwrap();
        assert_eq!((decoded.width, decoded.height), (16, 8));
    }

    #[test]
    fn test_missing_input_writes_nothing() {
        let output = TempDir::new().unwrap();
        let missing = output.path().join("does-not-exist");

        let err = driver(&missing, output.path(), BatchOptions::new(3))
            .run(&mut rng(), |_| {})
            .unwrap_err();

        assert!(matches!(
            err,
            AugmentError::MissingDirectory {
                role: DirectoryRole::Input,
                ..
            }
        ));
        assert!(list_dir(output.path()).is_empty());
    }

    #[test]
    fn test_missing_output_is_path_error() {
        let input = TempDir::new().unwrap();
        write_image(&input.path().join("a.png"), 8, 8);

        let err = driver(input.path(), &input.path().join("nope"), BatchOptions::new(1))
            .run(&mut rng(), |_| {})
            .unwrap_err();

        assert!(err.is_path_error());
        assert_eq!(list_dir(input.path()), vec!["a.png"]);
    }

    #[test]
    fn test_output_is_a_file() {
        let input = TempDir::new().unwrap();
        let file = input.path().join("out.txt");
        fs::write(&file, "x").unwrap();

        let err = driver(input.path(), &file, BatchOptions::new(1))
            .validate()
            .unwrap_err();
        assert!(matches!(
            err,
            AugmentError::NotADirectory {
                role: DirectoryRole::Output,
                ..
            }
        ));
    }

    #[test]
    fn test_zero_count_is_configuration_error() {
        let dir = TempDir::new().unwrap();
        let err = driver(dir.path(), dir.path(), BatchOptions::new(0))
            .run(&mut rng(), |_| {})
            .unwrap_err();
        assert!(matches!(err, AugmentError::Configuration(_)));
    }

    #[test]
    fn test_empty_input_succeeds() {
        let input = TempDir::new().unwrap();
        fs::write(input.path().join("notes.md"), "# nothing").unwrap();

        let mut calls = 0;
        let summary = driver(input.path(), input.path(), BatchOptions::new(5))
            .run(&mut rng(), |_| calls += 1)
            .unwrap();

        assert_eq!(summary.discovered, 0);
        assert_eq!(summary.written, 0);
        assert_eq!(calls, 0);
        assert!(summary.is_success());
    }

    #[test]
    fn test_two_runs_use_separate_folders() {
        let input = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();
        write_image(&input.path().join("cat.png"), 12, 12);

        // Same timestamp on purpose: a same-second rerun must not reuse the folder
        for _ in 0..2 {
            driver(input.path(), output.path(), BatchOptions::new(2))
                .with_timestamp("05-06-2026-07-08-09")
                .run(&mut rng(), |_| {})
                .unwrap();
        }

        let names = list_dir(output.path());
        assert_eq!(
            names,
            vec!["cat_05-06-2026-07-08-09", "cat_05-06-2026-07-08-09-1"]
        );
        for dir in subdirs(output.path()) {
            assert_eq!(list_dir(&dir), vec!["0.png", "1.png"]);
        }
    }

    #[test]
    fn test_recursive_rerun_into_input_ignores_earlier_output() {
        let input = TempDir::new().unwrap();
        write_image(&input.path().join("cat.png"), 12, 12);

        let stamps = [
            "01-02-2026-03-04-05",
            "01-02-2026-03-04-05",
            "01-02-2026-03-04-06",
        ];
        for stamp in stamps {
            let summary = driver(input.path(), input.path(), recursive(2))
                .with_timestamp(stamp)
                .run(&mut rng(), |_| {})
                .unwrap();
            assert_eq!(summary.discovered, 1);
            assert_eq!(summary.folders.len(), 1);
        }

        assert_eq!(
            list_dir(input.path()),
            vec![
                "cat.png",
                "cat_01-02-2026-03-04-05",
                "cat_01-02-2026-03-04-05-1",
                "cat_01-02-2026-03-04-06",
            ]
        );
        for dir in subdirs(input.path()) {
            assert_eq!(list_dir(&dir), vec!["0.png", "1.png"]);
        }
    }

    #[test]
    fn test_recursive_rerun_into_nested_output_ignores_it() {
        let input = TempDir::new().unwrap();
        let output = input.path().join("augmented");
        fs::create_dir(&output).unwrap();
        write_image(&input.path().join("cat.png"), 12, 12);

        for stamp in ["T1", "T2"] {
            let summary = driver(input.path(), &output, recursive(2))
                .with_timestamp(stamp)
                .run(&mut rng(), |_| {})
                .unwrap();
            assert_eq!(summary.discovered, 1);
        }

        assert_eq!(list_dir(&output), vec!["cat_T1", "cat_T2"]);
    }

    #[test]
    fn test_is_run_folder() {
        assert!(is_run_folder("cat_01-02-2026-03-04-05"));
        assert!(is_run_folder("my_cat_12-31-2025-23-59-59"));
        assert!(is_run_folder("cat_01-02-2026-03-04-05-12"));

        assert!(!is_run_folder("cat"));
        assert!(!is_run_folder("cat_summer"));
        assert!(!is_run_folder("cat_01-02-2026"));
        assert!(!is_run_folder("cat_01-02-2026-03-04-05-x"));
        assert!(!is_run_folder("cat_13-40-2026-03-04-05"));
    }

    #[test]
    fn test_ordinary_subfolders_still_discovered() {
        let input = TempDir::new().unwrap();
        fs::create_dir(input.path().join("summer_2025")).unwrap();
        write_image(&input.path().join("summer_2025/beach.png"), 8, 8);

        let found = discover_images(
            input.path(),
            Some(input.path()),
            true,
            ExtensionMatch::CaseSensitive,
        )
        .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].relative_dir, PathBuf::from("summer_2025"));
    }

    #[test]
    fn test_output_defaults_into_input_dir() {
        let input = TempDir::new().unwrap();
        write_image(&input.path().join("b.png"), 10, 10);
        write_image(&input.path().join("a.png"), 10, 10);

        let mut seen = Vec::new();
        driver(input.path(), input.path(), BatchOptions::new(1))
            .with_timestamp("T")
            .run(&mut rng(), |p| {
                seen.push((p.index, p.total, p.source.to_path_buf()))
            })
            .unwrap();

        // Discovery is sorted by name and progress is 1-based
        assert_eq!(
            seen,
            vec![
                (1, 2, input.path().join("a.png")),
                (2, 2, input.path().join("b.png")),
            ]
        );
        assert_eq!(list_dir(input.path()), vec!["a.png", "a_T", "b.png", "b_T"]);
    }

    #[test]
    fn test_extension_case_matching() {
        let input = TempDir::new().unwrap();
        write_image(&input.path().join("LOUD.JPG"), 8, 8);
        write_image(&input.path().join("quiet.jpg"), 8, 8);

        let sensitive =
            discover_images(input.path(), None, false, ExtensionMatch::CaseSensitive).unwrap();
        assert_eq!(sensitive.len(), 1);
        assert_eq!(sensitive[0].path, input.path().join("quiet.jpg"));

        let insensitive =
            discover_images(input.path(), None, false, ExtensionMatch::CaseInsensitive).unwrap();
        assert_eq!(insensitive.len(), 2);
    }

    #[test]
    fn test_uppercase_extension_kept_in_output_name() {
        let input = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();
        write_image(&input.path().join("LOUD.JPG"), 8, 8);

        let mut options = BatchOptions::new(1);
        options.extension_match = ExtensionMatch::CaseInsensitive;
        let summary = driver(input.path(), output.path(), options)
            .run(&mut rng(), |_| {})
            .unwrap();

        assert_eq!(list_dir(&summary.folders[0]), vec!["0.JPG"]);
    }

    #[test]
    fn test_recursive_discovery_mirrors_tree() {
        let input = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();
        fs::create_dir_all(input.path().join("dogs/small")).unwrap();
        write_image(&input.path().join("top.png"), 8, 8);
        write_image(&input.path().join("dogs/small/pug.png"), 8, 8);

        let flat =
            discover_images(input.path(), None, false, ExtensionMatch::CaseSensitive).unwrap();
        assert_eq!(flat.len(), 1);

        let summary = driver(input.path(), output.path(), recursive(1))
            .with_timestamp("T")
            .run(&mut rng(), |_| {})
            .unwrap();

        assert_eq!(summary.processed, 2);
        assert!(output.path().join("dogs/small/pug_T/0.png").is_file());
        assert!(output.path().join("top_T/0.png").is_file());
    }

    #[test]
    fn test_corrupt_file_aborts_by_default() {
        let input = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();
        fs::write(input.path().join("a_broken.png"), b"garbage").unwrap();
        write_image(&input.path().join("b_fine.png"), 8, 8);

        let err = driver(input.path(), output.path(), BatchOptions::new(2))
            .run(&mut rng(), |_| {})
            .unwrap_err();

        assert!(matches!(err, AugmentError::Decode { .. }));
        // Nothing written: the broken file comes first and folders are lazy
        assert!(list_dir(output.path()).is_empty());
    }

    #[test]
    fn test_corrupt_file_skipped_when_continuing() {
        let input = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();
        fs::write(input.path().join("a_broken.png"), b"garbage").unwrap();
        write_image(&input.path().join("b_fine.png"), 8, 8);

        let mut options = BatchOptions::new(2);
        options.failure_policy = FailurePolicy::Continue;
        let mut failed_progress = 0;
        let summary = driver(input.path(), output.path(), options)
            .run(&mut rng(), |p| {
                if p.folder.is_none() {
                    failed_progress += 1;
                }
            })
            .unwrap();

        assert_eq!(summary.processed, 1);
        assert_eq!(summary.written, 2);
        assert_eq!(summary.failures.len(), 1);
        assert_eq!(summary.failures[0].source, input.path().join("a_broken.png"));
        assert_eq!(failed_progress, 1);
        assert!(!summary.is_success());
    }

    #[test]
    fn test_batch_global_resolution_pins_size() {
        let input = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();
        write_image(&input.path().join("a_small.png"), 20, 10);
        write_image(&input.path().join("b_large.png"), 60, 40);

        let mut options = BatchOptions::new(1);
        options.resolution = ResolutionMode::BatchGlobal;
        let summary = driver(input.path(), output.path(), options)
            .run(&mut rng(), |_| {})
            .unwrap();

        let second = decode_file(&summary.folders[1].join("0.png")).unwrap();
        assert_eq!((second.width, second.height), (20, 10));
    }

    #[test]
    fn test_per_image_resolution_keeps_native_size() {
        let input = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();
        write_image(&input.path().join("a_small.png"), 20, 10);
        write_image(&input.path().join("b_large.png"), 60, 40);

        let summary = driver(input.path(), output.path(), BatchOptions::new(1))
            .run(&mut rng(), |_| {})
            .unwrap();

        let second = decode_file(&summary.folders[1].join("0.png")).unwrap();
        assert_eq!((second.width, second.height), (60, 40));
    }

    #[test]
    fn test_huge_rotation_range_rejected_before_any_work() {
        let input = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();
        write_image(&input.path().join("a.png"), 8, 8);

        let params = AugmentParams {
            min_rotation: -1e308,
            max_rotation: 1e308,
            ..Default::default()
        };
        let err = BatchDriver::new(input.path(), output.path(), params, BatchOptions::new(1))
            .run(&mut rng(), |_| {})
            .unwrap_err();

        assert!(matches!(err, AugmentError::Configuration(_)));
        assert!(list_dir(output.path()).is_empty());
    }

    #[test]
    fn test_jpeg_quality_validated() {
        let mut options = BatchOptions::new(1);
        options.encode.jpeg_quality = 0;
        assert!(options.validate().is_err());
        options.encode.jpeg_quality = 100;
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_options_serde_names() {
        let mut options = BatchOptions::new(4);
        options.extension_match = ExtensionMatch::CaseInsensitive;
        options.resolution = ResolutionMode::BatchGlobal;
        options.failure_policy = FailurePolicy::Continue;

        let json = serde_json::to_value(options).unwrap();
        assert_eq!(json["extension_match"], "case-insensitive");
        assert_eq!(json["resolution"], "batch-global");
        assert_eq!(json["failure_policy"], "continue");
        assert_eq!(json["encode"]["jpeg_quality"], 75);

        let back: BatchOptions = serde_json::from_value(json).unwrap();
        assert_eq!(back, options);
    }

    #[test]
    fn test_run_timestamp_format() {
        use chrono::TimeZone;
        let when = Local.with_ymd_and_hms(2026, 3, 9, 14, 5, 7).unwrap();
        assert_eq!(run_timestamp(when), "03-09-2026-14-05-07");
    }
}
