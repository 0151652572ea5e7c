use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Tempo frequency-domain signal analysis.
#[derive(Parser)]
#[command(
    name = "tempo",
    version,
    about = "Zero-phase filtering, analytic signal and wavelet analysis of multi-channel time series"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Apply a zero-phase Butterworth or notch filter to every channel.
    Filter(FilterArgs),
    /// Compute the analytic signal or a quantity derived from it.
    Hilbert(HilbertArgs),
    /// Compute the Morlet continuous wavelet transform.
    Cwt(CwtArgs),
}

/// Arguments for the `filter` subcommand.
#[derive(clap::Args)]
pub struct FilterArgs {
    /// Input CSV with a `time` column followed by one column per channel.
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output CSV path.
    #[arg(short, long)]
    pub output: PathBuf,

    /// Optional TOML configuration file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Filter family and frequencies.
    #[command(subcommand)]
    pub kind: FilterCommand,
}

/// Filter families.
#[derive(Subcommand, Clone, Debug, PartialEq)]
pub enum FilterCommand {
    /// Pass frequencies below the cutoff.
    Lowpass {
        /// Cutoff frequency in Hz.
        #[arg(long)]
        cutoff: f64,
        /// Butterworth order (overrides config).
        #[arg(long)]
        order: Option<usize>,
    },
    /// Pass frequencies above the cutoff.
    Highpass {
        /// Cutoff frequency in Hz.
        #[arg(long)]
        cutoff: f64,
        /// Butterworth order (overrides config).
        #[arg(long)]
        order: Option<usize>,
    },
    /// Pass frequencies between two band edges.
    Bandpass {
        /// Lower band edge in Hz.
        #[arg(long)]
        low: f64,
        /// Upper band edge in Hz.
        #[arg(long)]
        high: f64,
        /// Butterworth order (overrides config).
        #[arg(long)]
        order: Option<usize>,
    },
    /// Remove a narrow band around a centre frequency.
    Notch {
        /// Centre frequency in Hz.
        #[arg(long)]
        freq: f64,
        /// Notch width in Hz (overrides config).
        #[arg(long)]
        bandwidth: Option<f64>,
    },
}

/// Quantities derived from the analytic signal.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Quantity {
    /// Real and imaginary parts.
    Analytic,
    /// Instantaneous amplitude (envelope).
    Amplitude,
    /// Instantaneous phase in radians.
    Phase,
    /// Instantaneous frequency in Hz.
    Frequency,
}

/// Arguments for the `hilbert` subcommand.
#[derive(clap::Args)]
pub struct HilbertArgs {
    /// Input CSV with a `time` column followed by one column per channel.
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output CSV path.
    #[arg(short, long)]
    pub output: PathBuf,

    /// Which quantity to write.
    #[arg(short, long, value_enum, default_value_t = Quantity::Analytic)]
    pub quantity: Quantity,
}

/// Arguments for the `cwt` subcommand.
#[derive(clap::Args)]
pub struct CwtArgs {
    /// Input CSV with a `time` column followed by one column per channel.
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output CSV path (long format).
    #[arg(short, long)]
    pub output: PathBuf,

    /// Optional TOML configuration file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Explicit analysis frequencies in Hz, comma separated (overrides config).
    #[arg(long, value_delimiter = ',')]
    pub freqs: Option<Vec<f64>>,

    /// Morlet centre frequency (overrides config).
    #[arg(long)]
    pub omega0: Option<f64>,

    /// Transform channels as separate tasks on a worker pool.
    #[arg(long)]
    pub distributed: bool,

    /// Worker threads for the distributed transform (implies --distributed).
    #[arg(long)]
    pub threads: Option<usize>,
}
