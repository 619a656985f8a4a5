//! `augment`: write randomized variants of every image in a directory.
//!
//! ```text
//! augment 10 photos/ augmented/ --cwidth 200 --cheight 200 --size 128 128
//! ```

mod args;
mod logging;

use anyhow::{bail, Context, Result};
use augmentor_core::BatchDriver;
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{error, info};

use crate::args::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::setup_logging(cli.verbose, cli.quiet)?;

    let input = cli.input_dir();
    let output = cli.output_dir();
    let driver = BatchDriver::new(&input, &output, cli.params(), cli.batch_options());

    let mut rng = match cli.seed {
        Some(seed) => {
            info!(seed, "using fixed seed");
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    };

    let summary = driver
        .run(&mut rng, |progress| {
            println!("{}/{}", progress.index, progress.total);
        })
        .with_context(|| format!("Failed to augment images in {}", input.display()))?;

    if summary.discovered == 0 {
        println!("No PNG or JPEG images found in {}", input.display());
        return Ok(());
    }

    if !summary.is_success() {
        for failure in &summary.failures {
            error!(source = %failure.source.display(), "{}", failure.error);
        }
        bail!(
            "{} of {} images failed",
            summary.failures.len(),
            summary.discovered
        );
    }

    info!(
        images = summary.processed,
        files = summary.written,
        output = %output.display(),
        "done"
    );
    Ok(())
}
