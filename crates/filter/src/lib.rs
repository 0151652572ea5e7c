//! # tempo-filter
//!
//! Butterworth and notch filter design with zero-phase application.
//!
//! ## Pipeline
//!
//! ```mermaid
//! graph LR
//!     A["FilterSpec"] -->|"design_filter(&spec, fs)?"| B["FilterCoefficients"]
//!     B -->|"stability check"| B
//!     B -->|"apply_zero_phase(&coeffs, &series)"| C["TimeSeries"]
//!     D["TimeSeries"] -->|"filter_series(&series, &spec)?"| C
//! ```
//!
//! ## Supported Filters
//!
//! | Spec | Parameters | Digital order |
//! |------|------------|---------------|
//! | [`FilterSpec::Lowpass`] | cutoff, order | order |
//! | [`FilterSpec::Highpass`] | cutoff, order | order |
//! | [`FilterSpec::Bandpass`] | low, high, order | 2 × order |
//! | [`FilterSpec::Notch`] | centre, bandwidth | 2 |
//!
//! Every designed filter is checked for stability before it is returned:
//! all roots of the denominator must lie strictly inside the unit circle.
//!
//! ## Quick Start
//!
//! ```
//! use tempo_filter::{FilterSpec, filter_series};
//! use tempo_series::TimeSeries;
//!
//! let x: Vec<f64> = (0..500).map(|i| (i as f64 * 0.1).sin()).collect();
//! let series = TimeSeries::uniform_channel(x, 100.0).unwrap();
//! let smooth = filter_series(&series, &FilterSpec::lowpass(10.0)).unwrap();
//! assert_eq!(smooth.len(), 500);
//! ```

mod coefficients;
mod design;
mod error;
mod ops;
mod roots;
mod spec;
mod zero_phase;

pub use coefficients::FilterCoefficients;
pub use design::{BandType, butterworth, design_filter, notch as design_notch};
pub use error::FilterError;
pub use ops::{bandpass, filter_series, highpass, lowpass, notch};
pub use roots::{max_root_magnitude, poly_roots};
pub use spec::{DEFAULT_NOTCH_BANDWIDTH_HZ, DEFAULT_ORDER, FilterKind, FilterSpec};
pub use zero_phase::{apply_zero_phase, filtfilt, lfilter, lfilter_zi, pad_len};
