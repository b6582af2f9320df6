mod commands;
mod dispatch;
mod helpers;

use clap::Parser;
use dispatch::command_alias_from_program_name;
use std::time::Instant;
use wavepacket_core::domain::WavepacketError;

pub fn run_from_env() -> i32 {
    let started = Instant::now();
    helpers::init_tracing();

    let mut args = std::env::args();
    let program_name = args.next().unwrap_or_else(|| "wavepacket-rs".to_string());
    let remaining: Vec<String> = args.collect();

    match run_with_program_name(&program_name, remaining, started) {
        Ok(code) => code,
        Err(error) => {
            let compatibility_error = error.as_wavepacket_error();
            eprintln!("{}", compatibility_error.diagnostic_line());
            if let Some(summary_line) = compatibility_error.fatal_exit_line() {
                eprintln!("{}", summary_line);
            }
            compatibility_error.exit_code()
        }
    }
}

fn run_with_program_name(
    program_name: &str,
    args: Vec<String>,
    started: Instant,
) -> Result<i32, CliError> {
    let alias = command_alias_from_program_name(program_name);
    let full_args = std::iter::once("wavepacket-rs".to_string())
        .chain(alias.map(str::to_string))
        .chain(args)
        .collect::<Vec<_>>();
    parse_and_dispatch(full_args, started)
}

fn parse_and_dispatch(args: Vec<String>, started: Instant) -> Result<i32, CliError> {
    match Cli::try_parse_from(&args) {
        Ok(cli) => dispatch_parsed(cli.command, started),
        Err(err) => match err.kind() {
            clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => {
                print!("{}", err);
                Ok(0)
            }
            _ => Err(CliError::Usage(err.to_string())),
        },
    }
}

#[derive(Parser)]
#[command(
    name = "wavepacket-rs",
    version,
    about = "Wavepacket simulation archive post-processing"
)]
struct Cli {
    #[command(subcommand)]
    command: CliCommand,
}

#[derive(clap::Subcommand)]
enum CliCommand {
    /// Write per-step eigenstate weight distributions of the alpha coefficients
    #[command(name = "alpha-distribution")]
    AlphaDistribution(commands::AlphaDistributionArgs),
}

fn dispatch_parsed(command: CliCommand, started: Instant) -> Result<i32, CliError> {
    match command {
        CliCommand::AlphaDistribution(args) => {
            commands::run_alpha_distribution_command(args, started)
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("{0}")]
    Usage(String),
    #[error("{0}")]
    Compute(WavepacketError),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl CliError {
    fn as_wavepacket_error(&self) -> WavepacketError {
        match self {
            Self::Usage(message) => {
                WavepacketError::input_validation("INPUT.CLI_USAGE", message.trim_end())
            }
            Self::Compute(error) => error.clone(),
            Self::Internal(error) => WavepacketError::io_system("IO.CLI", format!("{error:#}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Cli, CliCommand, CliError};
    use clap::Parser;
    use wavepacket_core::domain::{ErrorCategory, WavepacketError};

    #[test]
    fn alpha_distribution_arguments_parse_with_defaults() {
        let cli = Cli::try_parse_from(["wavepacket-rs", "alpha-distribution", "run/wp.json"])
            .expect("arguments should parse");
        let CliCommand::AlphaDistribution(args) = cli.command;
        let config = args.extraction_config();
        assert_eq!(config.stride, 1);
        assert_eq!(config.time_end_ps, None);
        assert_eq!(config.byte_order.as_str(), "little-endian");
    }

    #[test]
    fn short_flags_match_the_extractor_interface() {
        let cli = Cli::try_parse_from([
            "wavepacket-rs",
            "alpha-distribution",
            "-s",
            "4",
            "-e",
            "1.5",
            "--big-endian",
            "wp.json",
        ])
        .expect("arguments should parse");
        let CliCommand::AlphaDistribution(args) = cli.command;
        let config = args.extraction_config();
        assert_eq!(config.stride, 4);
        assert_eq!(config.time_end_ps, Some(1.5));
        assert_eq!(config.byte_order.as_str(), "big-endian");
    }

    #[test]
    fn zero_stride_is_a_usage_error() {
        let parsed =
            Cli::try_parse_from(["wavepacket-rs", "alpha-distribution", "-s", "0", "wp.json"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn usage_errors_map_to_input_validation_exit_code() {
        let error = CliError::Usage("bad flag\n".to_string()).as_wavepacket_error();
        assert_eq!(error.category(), ErrorCategory::InputValidationError);
        assert_eq!(error.exit_code(), 2);
        assert_eq!(error.message(), "bad flag");

        let compute = CliError::Compute(WavepacketError::computation("RUN.X", "boom"));
        assert_eq!(compute.as_wavepacket_error().exit_code(), 4);
    }
}
