//! Scatter/gather CWT across channels.

use std::sync::Arc;

use ndarray::Array2;
use num_complex::Complex;
use tempo_series::TimeSeries;
use tempo_wavelet::{CwtConfig, CwtResult, cwt};
use tracing::{debug, info, warn};

use crate::error::{DispatchError, TaskError};
use crate::pool::{TaskHandle, WorkerPool};

/// Computes the same result as [`cwt`] by transforming each channel as its
/// own task on `pool`.
///
/// A single-channel series is handed straight to [`cwt`]. Otherwise every
/// channel is submitted, every handle is joined, and channel `i`'s
/// coefficients land in slot `i` regardless of completion order.
///
/// This call blocks on every handle's `join`. With a [`RayonPool`] it must not
/// be called from one of that pool's own worker threads.
///
/// [`RayonPool`]: crate::RayonPool
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`DispatchError::Wavelet`] | `config` is invalid (checked before submitting) |
/// | [`DispatchError::WorkerFailure`] | at least one channel task failed |
#[tracing::instrument(
    skip(series, config, pool),
    fields(len = series.len(), channels = series.n_channels())
)]
pub fn cwt_distributed<P: WorkerPool>(
    series: &TimeSeries,
    config: &CwtConfig,
    pool: &P,
) -> Result<CwtResult, DispatchError> {
    if series.n_channels() == 1 {
        return Ok(cwt(series, config)?);
    }
    config.validate()?;

    let shared = Arc::new(config.clone());
    let handles: Vec<_> = series
        .split_channels()
        .into_iter()
        .enumerate()
        .map(|(index, part)| {
            let config = Arc::clone(&shared);
            debug!(channel = index, "submitting channel");
            pool.submit(move || -> Result<Array2<Complex<f64>>, TaskError> {
                let result = cwt(&part, &config)?;
                Ok(result.channel(0).to_owned())
            })
        })
        .collect();

    let mut blocks = Vec::with_capacity(handles.len());
    let mut failed = Vec::new();
    let mut first_error = None;
    for (index, handle) in handles.into_iter().enumerate() {
        match handle.join() {
            Ok(block) => blocks.push(block),
            Err(e) => {
                warn!(channel = index, error = %e, "channel task failed");
                failed.push(index);
                first_error.get_or_insert(e);
            }
        }
    }

    if let Some(source) = first_error {
        return Err(DispatchError::WorkerFailure {
            channel: failed[0],
            failed,
            source,
        });
    }

    info!(channels = blocks.len(), "all channel tasks joined");
    Ok(CwtResult::from_channels(
        series,
        config.freqs().to_vec(),
        blocks,
    ))
}
