//! # tempo-series
//!
//! Validated, uniformly sampled, multi-channel time series shared by every
//! tempo crate.
//!
//! Samples are always stored as an `(n, channels)` matrix. A [`Layout`] tag
//! remembers whether the caller supplied a bare 1-D channel, so transforms
//! can return results in the caller's shape without branching on
//! dimensionality themselves.
//!
//! ## Quick Start
//!
//! ```
//! use tempo_series::{Layout, TimeSeries, sample_rate};
//!
//! let t: Vec<f64> = (0..100).map(|i| i as f64 / 50.0).collect();
//! assert!((sample_rate(&t).unwrap() - 50.0).abs() < 1e-9);
//!
//! let x: Vec<f64> = t.iter().map(|t| (2.0 * std::f64::consts::PI * t).sin()).collect();
//! let ts = TimeSeries::from_channel(x, t).unwrap();
//! assert_eq!(ts.layout(), Layout::Single);
//! ```

mod error;
mod rate;
mod series;

pub use error::SeriesError;
pub use rate::sample_rate;
pub use series::{ComplexTimeSeries, Layout, Sample, TimeSeries};
