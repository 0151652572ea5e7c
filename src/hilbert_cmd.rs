//! Hilbert command: analytic signal and the quantities derived from it.

use anyhow::{Context, Result};
use tracing::{info, info_span};

use tempo_analytic::{amplitude, analytic_signal, instantaneous_frequency, phase};

use crate::cli::{HilbertArgs, Quantity};
use crate::io;

/// Run the analytic-signal pipeline.
pub fn run(args: HilbertArgs) -> Result<()> {
    let _cmd = info_span!("hilbert").entered();

    info!(path = %args.input.display(), "reading series");
    let series = io::read_series(&args.input)
        .with_context(|| format!("failed to read CSV: {}", args.input.display()))?;
    info!(len = series.len(), channels = series.n_channels(), quantity = ?args.quantity, "loaded series");

    let written = match args.quantity {
        Quantity::Analytic => io::write_analytic(&args.output, &analytic_signal(&series)),
        Quantity::Amplitude => io::write_series(&args.output, &amplitude(&series)),
        Quantity::Phase => io::write_series(&args.output, &phase(&series)),
        Quantity::Frequency => io::write_series(&args.output, &instantaneous_frequency(&series)),
    };
    written.with_context(|| format!("failed to write CSV: {}", args.output.display()))?;
    info!(path = %args.output.display(), "wrote output");
    Ok(())
}
