//! Filter command: zero-phase filtering of every channel of a CSV series.

use anyhow::{Context, Result};
use tracing::{info, info_span};

use tempo_filter::filter_series;

use crate::cli::FilterArgs;
use crate::{config, convert, io};

/// Run the filter pipeline.
pub fn run(args: FilterArgs) -> Result<()> {
    let _cmd = info_span!("filter").entered();

    let cfg = config::load(args.config.as_deref())?;
    let spec = convert::build_filter_spec(&args.kind, &cfg.filter)?;

    info!(path = %args.input.display(), "reading series");
    let series = io::read_series(&args.input)
        .with_context(|| format!("failed to read CSV: {}", args.input.display()))?;
    info!(
        len = series.len(),
        channels = series.n_channels(),
        fs = series.sample_rate(),
        "loaded series"
    );

    let filtered = filter_series(&series, &spec)
        .with_context(|| format!("failed to apply {:?} filter", spec.kind()))?;

    info!(path = %args.output.display(), "writing filtered series");
    io::write_series(&args.output, &filtered)
        .with_context(|| format!("failed to write CSV: {}", args.output.display()))?;
    Ok(())
}
