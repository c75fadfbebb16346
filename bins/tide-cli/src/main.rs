//! Tide command-line front end.
//!
//! Evaluates natural logs, extrapolates estimates, integrates the ratio of
//! two estimates over an epoch range, and replays observation series through
//! the alpha-beta filter. All values are printed as exact decimals.

use std::path::{Path, PathBuf};
use std::process;
use std::str::FromStr;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use num_bigint::BigInt;
use serde::Deserialize;
use tide_core::{ChainEpoch, Q0, Q128};
use tide_filter::{extrapolated_cum_sum_of_ratio, AlphaBetaFilter, FilterEstimate};
use tracing::{debug, error, info};

mod config;

use config::CliConfig;

/// Deterministic fixed-point smoothing numerics.
#[derive(Parser, Debug)]
#[command(name = "tide-cli", version, about = "Deterministic fixed-point smoothing numerics")]
struct Cli {
    /// Configuration file (TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log level, overriding the configuration (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Natural logarithm of a decimal value.
    Ln {
        /// Positive decimal, e.g. 2.5
        value: String,
    },
    /// Extrapolate an integer estimate by a number of epochs.
    Extrapolate(ExtrapolateArgs),
    /// Cumulative sum of the ratio of two estimates over an epoch range.
    CumRatio(CumRatioArgs),
    /// Run the alpha-beta filter over a JSON file of observations.
    Filter {
        /// JSON array of {"epoch": <int>, "value": "<integer>"}
        file: PathBuf,
    },
}

#[derive(Args, Debug)]
struct ExtrapolateArgs {
    #[arg(long, allow_hyphen_values = true)]
    position: BigInt,
    #[arg(long, allow_hyphen_values = true)]
    velocity: BigInt,
    #[arg(long, allow_hyphen_values = true)]
    delta: ChainEpoch,
}

#[derive(Args, Debug)]
struct CumRatioArgs {
    #[arg(long, allow_hyphen_values = true)]
    num_position: BigInt,
    #[arg(long, allow_hyphen_values = true, default_value = "0")]
    num_velocity: BigInt,
    #[arg(long, allow_hyphen_values = true)]
    denom_position: BigInt,
    #[arg(long, allow_hyphen_values = true, default_value = "0")]
    denom_velocity: BigInt,
    /// Number of epochs in the range
    #[arg(long)]
    delta: ChainEpoch,
    /// First epoch of the range, relative to the estimates
    #[arg(long, allow_hyphen_values = true, default_value_t = 0)]
    start: ChainEpoch,
}

/// One line of a `filter` input file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
struct Observation {
    epoch: ChainEpoch,
    value: String,
}

impl Observation {
    /// The observed value as an integer. Fractions are rejected, not truncated.
    fn parse_value(&self) -> Result<Q0> {
        let value = BigInt::from_str(self.value.trim())
            .with_context(|| format!("invalid integer {:?} at epoch {}", self.value, self.epoch))?;
        Ok(Q0::from_int(value))
    }
}

fn main() {
    let cli = Cli::parse();

    let config = match CliConfig::load(cli.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e:#}");
            process::exit(1);
        }
    };
    let level = cli.log_level.as_deref().unwrap_or(&config.log_level);
    init_logging(level, &config.log_format);

    debug!(?config, "configuration loaded");

    if let Err(e) = run(cli.command, &config) {
        error!("{e:#}");
        process::exit(1);
    }
}

fn run(command: Commands, config: &CliConfig) -> Result<()> {
    match command {
        Commands::Ln { value } => {
            let x: Q128 = value.parse().with_context(|| format!("invalid value {value:?}"))?;
            let log = x.ln()?;
            println!("{log}");
        }
        Commands::Extrapolate(args) => {
            let est = FilterEstimate::from_integers(args.position, args.velocity);
            println!("{}", est.extrapolate(args.delta));
        }
        Commands::CumRatio(args) => {
            let num = FilterEstimate::from_integers(args.num_position, args.num_velocity);
            let denom = FilterEstimate::from_integers(args.denom_position, args.denom_velocity);
            let csr = extrapolated_cum_sum_of_ratio(args.delta, args.start, &num, &denom)?;
            info!(delta = args.delta, start = args.start, "cumulative ratio computed");
            println!("{csr}");
        }
        Commands::Filter { file } => {
            let observations = read_observations(&file)?;
            for est in replay(&observations, config.alpha()?, config.beta()?)? {
                println!("{}\t{}\t{}", est.0, est.1.position(), est.1.velocity());
            }
        }
    }
    Ok(())
}

fn read_observations(path: &Path) -> Result<Vec<Observation>> {
    let data = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&data).with_context(|| format!("failed to parse {}", path.display()))
}

/// Feed observations through a filter seeded with a constant estimate at
/// the first one. Returns the estimate after every observation.
fn replay(
    observations: &[Observation],
    alpha: Q128,
    beta: Q128,
) -> Result<Vec<(ChainEpoch, FilterEstimate)>> {
    let Some((first, rest)) = observations.split_first() else {
        bail!("no observations");
    };
    let first_value = first.parse_value()?;

    let mut filter = AlphaBetaFilter::new(
        alpha,
        beta,
        FilterEstimate::new(first_value.rescale::<1>(), Q128::zero()),
    );
    let mut estimates = vec![(first.epoch, filter.estimate().clone())];
    let mut last_epoch = first.epoch;

    for obs in rest {
        if obs.epoch <= last_epoch {
            bail!("epochs must be strictly increasing ({} after {})", obs.epoch, last_epoch);
        }
        let value = obs.parse_value()?;
        let est = filter.advance(&value, obs.epoch - last_epoch)?;
        estimates.push((obs.epoch, est.clone()));
        last_epoch = obs.epoch;
    }

    info!(count = estimates.len(), "filter replay complete");
    Ok(estimates)
}

/// Initialize tracing subscriber with the given log level and output format.
///
/// Pass `format = "json"` for structured JSON output. Any other value
/// defaults to human-readable text. `RUST_LOG` takes precedence over `level`.
fn init_logging(level: &str, format: &str) {
    use tracing_subscriber::filter::EnvFilter;
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    if format == "json" {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .init();
    }
}
