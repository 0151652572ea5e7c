//! Filter family and cutoff description.

/// Default Butterworth order.
pub const DEFAULT_ORDER: usize = 3;

/// Default notch bandwidth in Hz.
pub const DEFAULT_NOTCH_BANDWIDTH_HZ: f64 = 1.0;

/// Filter family tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FilterKind {
    /// Butterworth low-pass.
    Lowpass,
    /// Butterworth high-pass.
    Highpass,
    /// Butterworth band-pass.
    Bandpass,
    /// Second-order notch (band-stop).
    Notch,
}

/// Which filter to design, with its cutoff frequencies in Hz.
///
/// # Example
///
/// ```
/// use tempo_filter::{FilterKind, FilterSpec};
///
/// let spec = FilterSpec::bandpass(8.0, 13.0).with_order(4);
/// assert_eq!(spec.kind(), FilterKind::Bandpass);
/// assert_eq!(spec.order(), Some(4));
/// assert_eq!(spec.cutoffs_hz(), vec![8.0, 13.0]);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum FilterSpec {
    /// Passes frequencies below `cutoff_hz`.
    Lowpass {
        /// -3 dB frequency (one pass).
        cutoff_hz: f64,
        /// Butterworth order.
        order: usize,
    },
    /// Passes frequencies above `cutoff_hz`.
    Highpass {
        /// -3 dB frequency (one pass).
        cutoff_hz: f64,
        /// Butterworth order.
        order: usize,
    },
    /// Passes frequencies between `low_hz` and `high_hz`.
    Bandpass {
        /// Lower band edge.
        low_hz: f64,
        /// Upper band edge.
        high_hz: f64,
        /// Butterworth order (the digital filter has order `2 * order`).
        order: usize,
    },
    /// Removes a narrow band around `freq_hz`.
    Notch {
        /// Centre frequency of the notch.
        freq_hz: f64,
        /// Width of the notch. This is a bandwidth, not an upper cutoff.
        bandwidth_hz: f64,
    },
}

impl FilterSpec {
    /// Low-pass of the default order.
    pub fn lowpass(cutoff_hz: f64) -> Self {
        Self::Lowpass {
            cutoff_hz,
            order: DEFAULT_ORDER,
        }
    }

    /// High-pass of the default order.
    pub fn highpass(cutoff_hz: f64) -> Self {
        Self::Highpass {
            cutoff_hz,
            order: DEFAULT_ORDER,
        }
    }

    /// Band-pass of the default order.
    pub fn bandpass(low_hz: f64, high_hz: f64) -> Self {
        Self::Bandpass {
            low_hz,
            high_hz,
            order: DEFAULT_ORDER,
        }
    }

    /// Notch with the default 1 Hz bandwidth.
    pub fn notch(freq_hz: f64) -> Self {
        Self::Notch {
            freq_hz,
            bandwidth_hz: DEFAULT_NOTCH_BANDWIDTH_HZ,
        }
    }

    /// Sets the Butterworth order. The notch has a fixed order, so this is a
    /// no-op for [`FilterSpec::Notch`].
    pub fn with_order(mut self, new_order: usize) -> Self {
        match &mut self {
            Self::Lowpass { order, .. }
            | Self::Highpass { order, .. }
            | Self::Bandpass { order, .. } => *order = new_order,
            Self::Notch { .. } => {}
        }
        self
    }

    /// Sets the notch bandwidth. No-op for the Butterworth families.
    pub fn with_bandwidth(mut self, bandwidth: f64) -> Self {
        if let Self::Notch { bandwidth_hz, .. } = &mut self {
            *bandwidth_hz = bandwidth;
        }
        self
    }

    /// Returns the family tag.
    pub fn kind(&self) -> FilterKind {
        match self {
            Self::Lowpass { .. } => FilterKind::Lowpass,
            Self::Highpass { .. } => FilterKind::Highpass,
            Self::Bandpass { .. } => FilterKind::Bandpass,
            Self::Notch { .. } => FilterKind::Notch,
        }
    }

    /// Returns the Butterworth order, or `None` for the notch.
    pub fn order(&self) -> Option<usize> {
        match self {
            Self::Lowpass { order, .. }
            | Self::Highpass { order, .. }
            | Self::Bandpass { order, .. } => Some(*order),
            Self::Notch { .. } => None,
        }
    }

    /// Returns the frequency parameters in Hz, in declaration order.
    ///
    /// For the notch this is `[freq_hz, bandwidth_hz]`.
    pub fn cutoffs_hz(&self) -> Vec<f64> {
        match *self {
            Self::Lowpass { cutoff_hz, .. } | Self::Highpass { cutoff_hz, .. } => vec![cutoff_hz],
            Self::Bandpass {
                low_hz, high_hz, ..
            } => vec![low_hz, high_hz],
            Self::Notch {
                freq_hz,
                bandwidth_hz,
            } => vec![freq_hz, bandwidth_hz],
        }
    }

    /// Returns the frequency parameters divided by the Nyquist frequency `fs / 2`.
    pub fn normalized(&self, fs: f64) -> Vec<f64> {
        let nyq = 0.5 * fs;
        self.cutoffs_hz().into_iter().map(|f| f / nyq).collect()
    }
}
