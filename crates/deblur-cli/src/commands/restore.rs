use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use deblur_core::frame::Frame;
use deblur_core::io::image_io::{load_image, save_image};
use deblur_core::metrics::QualityReport;
use deblur_core::pipeline::Deblurrer;

use super::{reconstruct_with_progress, ConfigOverrides};

#[derive(Args)]
pub struct RestoreArgs {
    /// Blurred, noisy image
    pub file: PathBuf,

    #[command(flatten)]
    pub overrides: ConfigOverrides,

    /// Known clean image, for PSNR/MSE reporting
    #[arg(long)]
    pub reference: Option<PathBuf>,

    /// Output file path
    #[arg(short, long, default_value = "deblurred.tiff")]
    pub output: PathBuf,
}

pub fn run(args: &RestoreArgs) -> Result<()> {
    let config = args.overrides.resolve()?;
    let observed = load_image(&args.file)
        .with_context(|| format!("Failed to load {}", args.file.display()))?;

    let reference = match &args.reference {
        Some(path) => Some(
            load_image(path).with_context(|| format!("Failed to load {}", path.display()))?,
        ),
        None => None,
    };

    crate::summary::print_config_summary(&config);

    let deblurrer = Deblurrer::from_config(config, observed.shape())?;
    // Without a clean reference, track distance from the observation.
    let residual_ref = reference.as_ref().map_or(&observed.data, |r| &r.data);
    let rec = reconstruct_with_progress(&deblurrer, &observed.data, Some(residual_ref))?;

    if let Some(ref clean) = reference {
        let rows = [
            ("Observed", QualityReport::compare(&clean.data, &observed.data)?),
            ("Reconstructed", QualityReport::compare(&clean.data, &rec.image)?),
        ];
        crate::summary::print_quality_table(&rows);
    }
    crate::summary::print_history(&rec.solution);

    save_image(&Frame::new(rec.image, observed.original_bit_depth), &args.output)?;
    println!("Saved to {}", args.output.display());

    Ok(())
}
