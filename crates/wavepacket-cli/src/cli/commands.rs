use super::CliError;
use super::helpers::{render_human_summary, write_summary};
use std::path::PathBuf;
use std::time::Instant;
use tracing::info;
use wavepacket_core::domain::{ByteOrder, ExtractionConfig};
use wavepacket_core::modules::run_extraction;

#[derive(clap::Args)]
pub(super) struct AlphaDistributionArgs {
    /// Wavepacket archive JSON written in split output mode
    #[arg(value_name = "JSON")]
    archive: PathBuf,

    /// Only process steps whose number is a multiple of STRIDE
    #[arg(
        short = 's',
        long = "stride",
        value_name = "STRIDE",
        default_value_t = 1,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    stride: u64,

    /// Stop after the first processed step at or beyond TIME_END [ps]
    #[arg(short = 'e', long = "time-end", value_name = "TIME_END")]
    time_end: Option<f64>,

    /// Decode out-of-line arrays as big-endian (default little-endian)
    #[arg(long)]
    big_endian: bool,

    /// JSON run summary output path
    #[arg(long, value_name = "PATH")]
    summary: Option<PathBuf>,
}

impl AlphaDistributionArgs {
    pub(super) fn extraction_config(&self) -> ExtractionConfig {
        ExtractionConfig::new(
            self.stride,
            self.time_end,
            ByteOrder::from_big_endian_flag(self.big_endian),
        )
    }
}

pub(super) fn run_alpha_distribution_command(
    args: AlphaDistributionArgs,
    started: Instant,
) -> Result<i32, CliError> {
    let config = args.extraction_config();
    let summary = run_extraction(&args.archive, config, started).map_err(CliError::Compute)?;
    info!(
        elapsed = ?started.elapsed(),
        artifacts = summary.artifacts.len(),
        "alpha distribution extraction finished"
    );

    if let Some(path) = &args.summary {
        write_summary(path, &summary)?;
    }
    println!("{}", render_human_summary(&args.archive, &summary));
    Ok(0)
}
