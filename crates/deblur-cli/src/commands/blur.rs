use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use deblur_core::frame::Frame;
use deblur_core::io::image_io::{load_image, save_image};
use deblur_core::metrics::QualityReport;
use deblur_core::pipeline::Deblurrer;

use super::ConfigOverrides;

#[derive(Args)]
pub struct BlurArgs {
    /// Clean source image
    pub file: PathBuf,

    #[command(flatten)]
    pub overrides: ConfigOverrides,

    /// Output file path
    #[arg(short, long, default_value = "corrupted.tiff")]
    pub output: PathBuf,
}

pub fn run(args: &BlurArgs) -> Result<()> {
    let config = args.overrides.resolve()?;
    let source = load_image(&args.file)
        .with_context(|| format!("Failed to load {}", args.file.display()))?;

    let deblurrer = Deblurrer::from_config(config, source.shape())?;
    let corrupted = deblurrer.observe(&source.data)?;

    let report = QualityReport::compare(&source.data, &corrupted)?;
    println!("Corrupted: {report}");

    save_image(&Frame::new(corrupted, source.original_bit_depth), &args.output)?;
    println!("Saved to {}", args.output.display());

    Ok(())
}
