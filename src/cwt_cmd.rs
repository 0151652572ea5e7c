//! CWT command: Morlet wavelet transform, sequential or one task per channel.

use anyhow::{Context, Result};
use tracing::{info, info_span};

use tempo_dispatch::{RayonPool, cwt_distributed};
use tempo_wavelet::{CwtResult, cwt, estimated_bytes};

use crate::cli::CwtArgs;
use crate::convert::{self, Execution};
use crate::{config, io};

/// Run the wavelet pipeline.
pub fn run(args: CwtArgs) -> Result<()> {
    let _cmd = info_span!("cwt").entered();

    let cfg = config::load(args.config.as_deref())?;
    let wavelet_cfg = convert::build_cwt_config(&cfg.cwt, args.freqs.as_deref(), args.omega0)?;
    let execution = convert::execution(args.distributed, args.threads, &cfg.dispatch);

    info!(path = %args.input.display(), "reading series");
    let series = io::read_series(&args.input)
        .with_context(|| format!("failed to read CSV: {}", args.input.display()))?;
    info!(
        len = series.len(),
        channels = series.n_channels(),
        n_freqs = wavelet_cfg.freqs().len(),
        bytes = estimated_bytes(series.len(), wavelet_cfg.freqs().len(), series.n_channels()),
        "loaded series"
    );

    let result: CwtResult = match execution {
        Execution::Sequential => cwt(&series, &wavelet_cfg).context("wavelet transform failed")?,
        Execution::Distributed { threads } => {
            let pool = match threads {
                Some(n) => RayonPool::with_threads(n).context("failed to start worker pool")?,
                None => RayonPool::global(),
            };
            info!(workers = pool.num_threads(), "distributing channels");
            cwt_distributed(&series, &wavelet_cfg, &pool)
                .context("distributed wavelet transform failed")?
        }
    };

    info!(path = %args.output.display(), "writing coefficients");
    io::write_cwt(&args.output, &result)
        .with_context(|| format!("failed to write CSV: {}", args.output.display()))?;
    Ok(())
}
