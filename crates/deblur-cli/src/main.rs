mod commands;
mod summary;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "deblur", about = "Gaussian blur removal by regularized least squares")]
#[command(version)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Degrade a clean image, reconstruct it, and report PSNR/MSE
    Run(commands::run::RunArgs),
    /// Blur an image and add noise
    Blur(commands::blur::BlurArgs),
    /// Reconstruct an already degraded image
    Restore(commands::restore::RestoreArgs),
    /// Print or save the default configuration as TOML
    Config(commands::config::ConfigArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match &cli.command {
        Commands::Run(args) => commands::run::run(args),
        Commands::Blur(args) => commands::blur::run(args),
        Commands::Restore(args) => commands::restore::run(args),
        Commands::Config(args) => commands::config::run(args),
    }
}
