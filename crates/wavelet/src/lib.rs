//! # tempo-wavelet
//!
//! Morlet continuous wavelet transform over an explicit list of analysis
//! frequencies, for single- and multi-channel series.
//!
//! ## Analysis Pipeline
//!
//! ```mermaid
//! graph LR
//!     A["TimeSeries"] -->|"cwt(&ts, &config)?"| B["CwtResult"]
//!     B --> C[".into_coefficients()"]
//!     B --> D[".power()"]
//!     B --> E[".global_spectrum(ch)"]
//!     C --> F["Single (n, freqs)"]
//!     C --> G["Multi (n, freqs, channels)"]
//! ```
//!
//! ## Quick Start
//!
//! ```
//! use tempo_series::TimeSeries;
//! use tempo_wavelet::{CwtCoefficients, CwtConfig, cwt};
//!
//! let x: Vec<f64> = (0..512).map(|i| (i as f64 * 0.3).sin()).collect();
//! let series = TimeSeries::uniform_channel(x, 100.0).unwrap();
//! let config = CwtConfig::new().with_log_freqs(1.0, 40.0, 16);
//! let result = cwt(&series, &config).unwrap();
//!
//! match result.into_coefficients() {
//!     CwtCoefficients::Single(m) => assert_eq!(m.dim(), (512, 16)),
//!     CwtCoefficients::Multi(_) => unreachable!(),
//! }
//! ```

mod config;
mod cwt;
mod error;
mod result;

pub use config::{
    CwtConfig, DEFAULT_F_MAX, DEFAULT_F_MIN, DEFAULT_N_FREQS, DEFAULT_OMEGA0, Wavelet, log_spaced,
};
pub use cwt::cwt;
pub use error::WaveletError;
pub use result::{CwtCoefficients, CwtResult, estimated_bytes};
