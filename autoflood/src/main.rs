use anyhow::{Context, Result};
use autoflood::filter::RescaleOptions;
use autoflood::region::GrowOptions;
use autoflood::{SegmentOptions, segment_file};
use clap::{ArgAction, Parser};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Multipage TIFF (one page per channel) or grayscale PNG.
    input_path: PathBuf,

    /// Page of the input to segment (0-based).
    channel_index: usize,

    /// Seed threshold on stretched intensities; pixels above it start the mask.
    #[arg(allow_negative_numbers = true)]
    start_threshold: i64,

    /// Growth stops before this threshold.
    #[arg(allow_negative_numbers = true)]
    stop_threshold: i64,

    /// Where to write the mask (.tif, .tiff or .png).
    output_path: PathBuf,

    /// Percentile mapped to 0 by the contrast stretch.
    #[arg(long, default_value_t = 1.0)]
    low_percentile: f64,

    /// Percentile mapped to the depth maximum by the contrast stretch.
    #[arg(long, default_value_t = 99.0)]
    high_percentile: f64,

    /// Fail when the stop threshold is not below the start threshold.
    #[arg(long)]
    strict_range: bool,

    /// Raise log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn run(args: &Args) -> Result<()> {
    let rescale = RescaleOptions::new(args.low_percentile, args.high_percentile);
    rescale
        .validate()
        .context("invalid contrast stretch percentiles")?;

    let options = SegmentOptions::new(args.start_threshold, args.stop_threshold)
        .with_rescale(rescale)
        .with_grow(GrowOptions::new().with_strict_range(args.strict_range));

    let mask = segment_file(&args.input_path, args.channel_index, &options).with_context(|| {
        format!(
            "segmenting channel {} of {}",
            args.channel_index,
            args.input_path.display()
        )
    })?;

    autoflood::io::write_mask(&mask, &args.output_path)
        .with_context(|| format!("writing mask to {}", args.output_path.display()))?;

    log::info!(
        "wrote {} of {} pixels to {}",
        mask.count(),
        mask.data().len(),
        args.output_path.display()
    );
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);
    run(&args)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_parse_positionals_and_defaults() {
        let args = Args::try_parse_from(["autoflood", "in.tif", "2", "40000", "-5", "out.png"])
            .unwrap();
        assert_eq!(args.channel_index, 2);
        assert_eq!(args.start_threshold, 40000);
        assert_eq!(args.stop_threshold, -5);
        assert_eq!(args.low_percentile, 1.0);
        assert_eq!(args.high_percentile, 99.0);
        assert!(!args.strict_range);
        assert_eq!(args.verbose, 0);
    }

    #[test]
    fn test_parse_options() {
        let args = Args::try_parse_from([
            "autoflood",
            "-vv",
            "--strict-range",
            "--low-percentile",
            "2.5",
            "in.tif",
            "0",
            "200",
            "100",
            "out.tif",
        ])
        .unwrap();
        assert_eq!(args.verbose, 2);
        assert!(args.strict_range);
        assert_eq!(args.low_percentile, 2.5);
    }

    #[test]
    fn test_missing_positional_is_an_error() {
        assert!(Args::try_parse_from(["autoflood", "in.tif", "0", "200"]).is_err());
        assert!(Args::try_parse_from(["autoflood", "in.tif", "x", "2", "1", "o.tif"]).is_err());
    }
}
