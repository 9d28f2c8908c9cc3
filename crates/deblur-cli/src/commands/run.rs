use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use deblur_core::frame::Frame;
use deblur_core::io::image_io::{load_image, save_image};
use deblur_core::metrics::QualityReport;
use deblur_core::pipeline::Deblurrer;

use super::{reconstruct_with_progress, ConfigOverrides};

#[derive(Args)]
pub struct RunArgs {
    /// Clean source image (PNG, TIFF, ...)
    pub file: PathBuf,

    #[command(flatten)]
    pub overrides: ConfigOverrides,

    /// Where to write the reconstruction
    #[arg(short, long, default_value = "deblurred.tiff")]
    pub output: PathBuf,

    /// Also save the corrupted observation
    #[arg(long)]
    pub save_corrupted: Option<PathBuf>,
}

pub fn run(args: &RunArgs) -> Result<()> {
    let config = args.overrides.resolve()?;
    let source = load_image(&args.file)
        .with_context(|| format!("Failed to load {}", args.file.display()))?;
    println!("Loaded {}x{} image", source.width(), source.height());

    crate::summary::print_config_summary(&config);

    let deblurrer = Deblurrer::from_config(config, source.shape())?;
    let truth = &source.data;

    let blurred = deblurrer.operator().forward(truth)?;
    let corrupted = deblurrer.observe(truth)?;

    let rec = reconstruct_with_progress(&deblurrer, &corrupted, Some(truth))?;

    let rows = [
        ("Blurred", QualityReport::compare(truth, &blurred)?),
        ("Corrupted", QualityReport::compare(truth, &corrupted)?),
        ("Reconstructed", QualityReport::compare(truth, &rec.image)?),
    ];
    crate::summary::print_quality_table(&rows);
    crate::summary::print_history(&rec.solution);

    if let Some(ref path) = args.save_corrupted {
        save_image(&Frame::new(corrupted, source.original_bit_depth), path)?;
        println!("Saved corrupted image to {}", path.display());
    }
    save_image(&Frame::new(rec.image, source.original_bit_depth), &args.output)?;
    println!("Saved to {}", args.output.display());

    Ok(())
}
