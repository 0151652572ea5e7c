use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Top-level Tempo configuration.
#[derive(Debug, Deserialize, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct TempoConfig {
    /// Filter defaults.
    #[serde(default)]
    pub filter: FilterToml,

    /// Wavelet transform settings.
    #[serde(default)]
    pub cwt: CwtToml,

    /// Worker pool settings.
    #[serde(default)]
    pub dispatch: DispatchToml,
}

#[derive(Debug, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FilterToml {
    #[serde(default = "default_order")]
    pub order: usize,
    #[serde(default = "default_notch_bandwidth_hz")]
    pub notch_bandwidth_hz: f64,
}

impl Default for FilterToml {
    fn default() -> Self {
        Self {
            order: default_order(),
            notch_bandwidth_hz: default_notch_bandwidth_hz(),
        }
    }
}

fn default_order() -> usize {
    tempo_filter::DEFAULT_ORDER
}
fn default_notch_bandwidth_hz() -> f64 {
    tempo_filter::DEFAULT_NOTCH_BANDWIDTH_HZ
}

/// Either an explicit `freqs` list or a log-spaced `f_min..f_max` grid.
#[derive(Debug, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct CwtToml {
    #[serde(default)]
    pub freqs: Option<Vec<f64>>,
    #[serde(default = "default_f_min")]
    pub f_min: f64,
    #[serde(default = "default_f_max")]
    pub f_max: f64,
    #[serde(default = "default_n_freqs")]
    pub n_freqs: usize,
    #[serde(default = "default_omega0")]
    pub omega0: f64,
}

impl Default for CwtToml {
    fn default() -> Self {
        Self {
            freqs: None,
            f_min: default_f_min(),
            f_max: default_f_max(),
            n_freqs: default_n_freqs(),
            omega0: default_omega0(),
        }
    }
}

fn default_f_min() -> f64 {
    tempo_wavelet::DEFAULT_F_MIN
}
fn default_f_max() -> f64 {
    tempo_wavelet::DEFAULT_F_MAX
}
fn default_n_freqs() -> usize {
    tempo_wavelet::DEFAULT_N_FREQS
}
fn default_omega0() -> f64 {
    tempo_wavelet::DEFAULT_OMEGA0
}

#[derive(Debug, Deserialize, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct DispatchToml {
    #[serde(default)]
    pub distributed: bool,
    #[serde(default)]
    pub threads: Option<usize>,
}

/// Reads `path` if given, otherwise returns the defaults.
pub fn load(path: Option<&Path>) -> Result<TempoConfig> {
    let Some(path) = path else {
        return Ok(TempoConfig::default());
    };
    let toml_str = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config: {}", path.display()))?;
    toml::from_str(&toml_str)
        .with_context(|| format!("failed to parse config TOML: {}", path.display()))
}
