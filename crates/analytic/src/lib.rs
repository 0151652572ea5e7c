//! # tempo-analytic
//!
//! Analytic signal of real time series via the FFT Hilbert transform, and
//! the instantaneous quantities derived from it.
//!
//! | Function | Output | Element type |
//! |----------|--------|--------------|
//! | [`analytic_signal`] | `x + j H(x)` | complex |
//! | [`amplitude`] | envelope `\|z\|` | real |
//! | [`phase`] | `arg(z)` in (-pi, pi] | real |
//! | [`instantaneous_frequency`] | `d(unwrapped phase)/dt / 2pi` in Hz | real |
//!
//! All outputs keep the input's shape, time span, channel names and layout.

mod hilbert;
mod phase;

pub use hilbert::{analytic_signal, hilbert};
pub use phase::{amplitude, instantaneous_frequency, phase, unwrap_phase};
