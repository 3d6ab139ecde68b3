//! Swyft CLI - Batch Image Resizer
//!
//! Resizes every supported image in an input folder into an output
//! folder, optionally deriving the missing dimension to preserve the
//! aspect ratio.

use std::path::PathBuf;
use std::process;
use std::sync::Arc;

use clap::{ArgAction, Args, Parser, Subcommand};
use console::style;

use swyft::{init, BatchProcessor, BatchRequest, BatchSummary, ImageRsBackend, SwyftError};

/// Swyft - Batch Image Resizer
#[derive(Parser)]
#[command(
    name = "swyft",
    version,
    about = "Resize images in batch",
    long_about = "Swyft resizes every supported image (jpg, jpeg, png, gif, webp) found in an \
                  input folder into an output folder. With --keepAspectRatio only one of \
                  --width/--height is needed; the other is derived from the source image."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode (errors only)
    #[arg(short = 'Q', long, global = true, conflicts_with = "verbose")]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Resize images in batch
    Resize(ResizeArgs),
}

// -h is claimed by --height, so the auto short help flag is disabled
// for this subcommand; --help stays available.
#[derive(Args)]
#[command(disable_help_flag = true)]
struct ResizeArgs {
    /// Input folder containing images
    #[arg(short, long, value_name = "DIR")]
    input: PathBuf,

    /// Output folder for resized images (created if absent)
    #[arg(short, long, value_name = "DIR")]
    output: PathBuf,

    /// Target width for resized images
    #[arg(short, long, value_name = "PIXELS", value_parser = clap::value_parser!(u32).range(1..))]
    width: Option<u32>,

    /// Target height for resized images
    #[arg(short, long, value_name = "PIXELS", value_parser = clap::value_parser!(u32).range(1..))]
    height: Option<u32>,

    /// Preserve aspect ratio; only one of width or height is required
    #[arg(short = 'a', long = "keepAspectRatio")]
    keep_aspect_ratio: bool,

    /// Overwrite existing files in the output folder
    #[arg(short = 'y', long)]
    overwrite: bool,

    /// Print help
    #[arg(long, action = ArgAction::Help)]
    help: Option<bool>,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "info"
    };
    init(log_level);

    match cli.command {
        Commands::Resize(args) => {
            if let Err(e) = run_resize(args).await {
                eprintln!("{}: {}", style("Error").red().bold(), e);
                process::exit(1);
            }
        }
    }
}

async fn run_resize(args: ResizeArgs) -> swyft::Result<()> {
    validate_dimensions(&args)?;

    let request = BatchRequest {
        input_folder: args.input,
        output_folder: args.output,
        target_width: args.width,
        target_height: args.height,
        keep_aspect_ratio: args.keep_aspect_ratio,
        overwrite: args.overwrite,
    };

    let processor = BatchProcessor::new(Arc::new(ImageRsBackend), None);
    let summary = processor.run(&request).await?;

    print_summary(&summary);

    // Skips are fine; any per-file failure makes the run non-zero.
    if !summary.is_success() {
        process::exit(1);
    }

    Ok(())
}

/// Enforce the flag-combination invariants before any work starts
fn validate_dimensions(args: &ResizeArgs) -> swyft::Result<()> {
    if args.keep_aspect_ratio && args.width.is_none() && args.height.is_none() {
        return Err(SwyftError::validation(
            "Either width or height is required when keeping aspect ratio",
        ));
    }

    if !args.keep_aspect_ratio && (args.width.is_none() || args.height.is_none()) {
        return Err(SwyftError::validation(
            "Both width and height are required when not preserving aspect ratio",
        ));
    }

    Ok(())
}

fn print_summary(summary: &BatchSummary) {
    println!();
    println!("{}", style("Batch Summary:").bold());
    println!("  {}: {}", style("Resized").green(), summary.resized);
    if summary.skipped_exists > 0 {
        println!(
            "  {}: {}",
            style("Skipped (already exists)").yellow(),
            summary.skipped_exists
        );
    }
    if summary.skipped_unsupported > 0 {
        println!(
            "  {}: {}",
            style("Skipped (unsupported format)").yellow(),
            summary.skipped_unsupported
        );
    }
    if summary.skipped_missing_metadata > 0 {
        println!(
            "  {}: {}",
            style("Skipped (missing metadata)").yellow(),
            summary.skipped_missing_metadata
        );
    }
    if summary.failed > 0 {
        println!("  {}: {}", style("Failed").red(), summary.failed);
    }
    println!(
        "  {}: {:.2}s",
        style("Duration").blue(),
        summary.elapsed.as_secs_f64()
    );

    if summary.is_success() {
        println!("{}", style("All images processed successfully.").bold().blue());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(width: Option<u32>, height: Option<u32>, keep_aspect_ratio: bool) -> ResizeArgs {
        ResizeArgs {
            input: PathBuf::from("in"),
            output: PathBuf::from("out"),
            width,
            height,
            keep_aspect_ratio,
            overwrite: false,
            help: None,
        }
    }

    #[test]
    fn test_plain_mode_requires_both_dimensions() {
        assert!(validate_dimensions(&args(Some(100), Some(100), false)).is_ok());
        assert!(validate_dimensions(&args(Some(100), None, false)).is_err());
        assert!(validate_dimensions(&args(None, Some(100), false)).is_err());
        assert!(validate_dimensions(&args(None, None, false)).is_err());
    }

    #[test]
    fn test_aspect_mode_requires_one_dimension() {
        assert!(validate_dimensions(&args(Some(100), None, true)).is_ok());
        assert!(validate_dimensions(&args(None, Some(100), true)).is_ok());
        assert!(validate_dimensions(&args(Some(100), Some(50), true)).is_ok());
        assert!(validate_dimensions(&args(None, None, true)).is_err());
    }

    #[test]
    fn test_cli_parses_flag_aliases() {
        use clap::CommandFactory;
        Cli::command().debug_assert();

        let cli = Cli::parse_from([
            "swyft", "resize", "-i", "in", "-o", "out", "-w", "100", "-a", "-y",
        ]);
        let Commands::Resize(args) = cli.command;
        assert_eq!(args.width, Some(100));
        assert!(args.keep_aspect_ratio);
        assert!(args.overwrite);
    }

    #[test]
    fn test_short_h_means_height() {
        let cli = Cli::parse_from([
            "swyft", "resize", "-i", "in", "-o", "out", "-w", "10", "-h", "20",
        ]);
        let Commands::Resize(args) = cli.command;
        assert_eq!(args.height, Some(20));
    }

    #[test]
    fn test_zero_dimension_is_rejected() {
        let result =
            Cli::try_parse_from(["swyft", "resize", "-i", "in", "-o", "out", "-w", "0", "-h", "5"]);
        assert!(result.is_err());
    }
}
