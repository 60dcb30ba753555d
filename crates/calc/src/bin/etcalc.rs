//! Command-line exposure-time calculator.
//!
//! Subcommands:
//! - `rv`: RV precision at an exposure time
//! - `exptime-rv`: exposure time for an RV precision
//! - `snr`: SNR at an exposure time and wavelength
//! - `exptime-snr`: exposure time for an SNR at a wavelength
//! - `max-exptime`: longest exposure before any order saturates
//!
//! Grids are read from the FITS directory given by `--grid-dir` or by the
//! `[store]` table of a `--settings` file.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use etcalc::{Calculator, Config, MaxExposure, QueryError, Settings, Target};
use etcalc_grid::{CachedGridStore, FitsGridStore, GridStore, StoreConfig};
use tracing::warn;
use tracing_subscriber::EnvFilter;
use uom::si::{
    f64::{Length, ThermodynamicTemperature, Time, Velocity},
    length::nanometer,
    thermodynamic_temperature::kelvin,
    time::second,
    velocity::meter_per_second,
};

/// Spectrograph RV precision, SNR, and exposure-time calculator
#[derive(Parser, Debug)]
#[command(name = "etcalc")]
#[command(version)]
struct Cli {
    /// TOML settings file with `[store]` and optional `[calculator]` tables
    #[arg(long, global = true)]
    settings: Option<PathBuf>,

    /// Directory holding the FITS grids (overrides the settings file)
    #[arg(long, global = true)]
    grid_dir: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug, Clone, Copy)]
struct TargetArgs {
    /// Effective temperature in K
    #[arg(long, value_parser = required)]
    teff: f64,

    /// V-band magnitude
    #[arg(long, value_parser = required)]
    vmag: f64,
}

impl TargetArgs {
    fn target(self) -> Target {
        Target::new(ThermodynamicTemperature::new::<kelvin>(self.teff), self.vmag)
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// RV precision at an exposure time
    Rv {
        #[command(flatten)]
        target: TargetArgs,

        /// Exposure time in seconds
        #[arg(long, value_parser = required)]
        exptime: f64,

        /// Echelle order number; whole detector if omitted
        #[arg(long)]
        order: Option<i32>,
    },

    /// Exposure time needed for an RV precision
    ExptimeRv {
        #[command(flatten)]
        target: TargetArgs,

        /// Desired RV precision in m/s
        #[arg(long, value_parser = required)]
        precision: f64,

        /// Echelle order number; whole detector if omitted
        #[arg(long)]
        order: Option<i32>,
    },

    /// SNR at an exposure time and wavelength
    Snr {
        #[command(flatten)]
        target: TargetArgs,

        /// Exposure time in seconds
        #[arg(long, value_parser = required)]
        exptime: f64,

        /// Wavelength in nm
        #[arg(long, default_value = "552.97", value_parser = required)]
        wavelength: f64,
    },

    /// Exposure time needed for an SNR at a wavelength
    ExptimeSnr {
        #[command(flatten)]
        target: TargetArgs,

        /// Desired SNR
        #[arg(long, value_parser = required)]
        snr: f64,

        /// Wavelength in nm
        #[arg(long, default_value = "552.97", value_parser = required)]
        wavelength: f64,
    },

    /// Longest recommended exposure time before any order saturates
    MaxExptime {
        #[command(flatten)]
        target: TargetArgs,
    },
}

/// Parses a number the calculator cannot do without; zero counts as missing.
fn required(s: &str) -> Result<f64, String> {
    let value: f64 = s.parse().map_err(|e| format!("{e}"))?;
    if value == 0.0 {
        Err("a non-zero value is required".to_string())
    } else {
        Ok(value)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let (store_config, config) = load_settings(&cli)?;
    let store = FitsGridStore::open(&store_config)
        .with_context(|| format!("cannot open grids in {}", store_config.grid_dir.display()))?;

    if store_config.cache {
        run(&Calculator::with_config(CachedGridStore::new(store), config), cli.command)
    } else {
        run(&Calculator::with_config(store, config), cli.command)
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_settings(cli: &Cli) -> Result<(StoreConfig, Config)> {
    let settings = cli.settings.as_ref().map(Settings::load).transpose()?;

    match (settings, &cli.grid_dir) {
        (Some(settings), Some(dir)) => Ok((
            StoreConfig {
                grid_dir: dir.clone(),
                ..settings.store
            },
            settings.calculator,
        )),
        (Some(settings), None) => Ok((settings.store, settings.calculator)),
        (None, Some(dir)) => Ok((StoreConfig::new(dir), Config::default())),
        (None, None) => bail!("no grid directory: pass --grid-dir or --settings"),
    }
}

fn run<S: GridStore>(calculator: &Calculator<S>, command: Command) -> Result<()> {
    match command {
        Command::Rv {
            target,
            exptime,
            order,
        } => {
            let target = target.target();
            let precision =
                calculator.rv_precision(target, Time::new::<second>(exptime), order)?;
            println!("RV Precision = {:.3} m/s", precision.get::<meter_per_second>());
            advise(calculator, target);
        }

        Command::ExptimeRv {
            target,
            precision,
            order,
        } => {
            let target = target.target();
            let precision = Velocity::new::<meter_per_second>(precision);
            report_exptime(
                calculator,
                target,
                calculator.exptime_for_rv_precision(target, precision, order),
            )?;
        }

        Command::Snr {
            target,
            exptime,
            wavelength,
        } => {
            let target = target.target();
            let snr = calculator.snr(
                target,
                Time::new::<second>(exptime),
                Length::new::<nanometer>(wavelength),
            )?;
            println!("SNR = {snr:.3}");
            advise(calculator, target);
        }

        Command::ExptimeSnr {
            target,
            snr,
            wavelength,
        } => {
            let target = target.target();
            let wavelength = Length::new::<nanometer>(wavelength);
            report_exptime(
                calculator,
                target,
                calculator.exptime_for_snr(target, snr, wavelength),
            )?;
        }

        Command::MaxExptime { target } => {
            let max = calculator.max_exptime(target.target())?;
            println!("{}", advisory_message(&max));
            let binding = max.binding();
            println!(
                "Binding order {} ({:.2} nm): SNR {:.1} at {} s, soft limit {}",
                binding.order.number,
                binding.order.wavelength_nm,
                binding.sample.output,
                binding.sample.input,
                binding.order.soft_limit,
            );
        }
    }

    Ok(())
}

fn report_exptime<S: GridStore>(
    calculator: &Calculator<S>,
    target: Target,
    result: Result<Time, QueryError>,
) -> Result<()> {
    match result {
        Ok(exptime) => {
            println!("Exposure Time = {} s", exptime.get::<second>());
            advise(calculator, target);
        }
        Err(QueryError::Unreachable { ceiling, .. }) => {
            println!("Maximum Exposure Time Exceeded (t>{ceiling}s)");
        }
        Err(err) => return Err(err.into()),
    }
    Ok(())
}

/// Prints the maximum recommended exposure time for `target`, if it can be
/// computed.
fn advise<S: GridStore>(calculator: &Calculator<S>, target: Target) {
    match calculator.max_exptime(target) {
        Ok(max) => println!("{}", advisory_message(&max)),
        Err(err) => warn!(%err, "maximum exposure time unavailable"),
    }
}

fn advisory_message(max: &MaxExposure) -> String {
    let seconds = max.exptime().get::<second>();
    if max.is_capped() {
        format!("Maximum recommended exposure time for this target is >{seconds} seconds")
    } else {
        format!("Maximum recommended exposure time for this target is {seconds:.0} seconds")
    }
}
