//! # tempo-dispatch
//!
//! Runs the wavelet transform channel by channel on a worker pool and
//! reassembles the channels in their original order.
//!
//! ## Flow
//!
//! ```mermaid
//! graph LR
//!     A["TimeSeries (n, ch)"] -->|"split_channels()"| B["ch x TimeSeries (n, 1)"]
//!     B -->|"pool.submit(cwt)"| C["ch x Handle"]
//!     C -->|"join all"| D["ch x (n, freqs)"]
//!     D -->|"slot i <- channel i"| E["CwtResult (n, freqs, ch)"]
//! ```
//!
//! ## Pools
//!
//! | Pool | Where tasks run |
//! |------|-----------------|
//! | [`InlinePool`] | calling thread, at submit time |
//! | [`RayonPool::global`] | rayon's global pool |
//! | [`RayonPool::with_threads`] | a dedicated rayon pool |
//!
//! Any type implementing [`WorkerPool`] can be plugged in.
//!
//! ## Quick Start
//!
//! ```
//! use ndarray::Array2;
//! use tempo_dispatch::{RayonPool, cwt_distributed};
//! use tempo_series::TimeSeries;
//! use tempo_wavelet::{CwtConfig, cwt};
//!
//! let samples = Array2::from_shape_fn((256, 3), |(i, j)| ((j + 1) as f64 * i as f64 * 0.1).sin());
//! let series = TimeSeries::uniform(samples, 64.0).unwrap();
//! let config = CwtConfig::new().with_log_freqs(1.0, 20.0, 8);
//!
//! let pool = RayonPool::with_threads(2).unwrap();
//! let distributed = cwt_distributed(&series, &config, &pool).unwrap();
//! let sequential = cwt(&series, &config).unwrap();
//! assert_eq!(distributed.coefficients(), sequential.coefficients());
//! ```

mod distributed;
mod error;
mod pool;

pub use distributed::cwt_distributed;
pub use error::{DispatchError, TaskError};
pub use pool::{InlinePool, RayonHandle, RayonPool, ReadyHandle, TaskHandle, WorkerPool};
