//! Pure conversion functions: CLI flags + TOML config structs -> crate API config types.

use anyhow::{Context, Result, bail};

use tempo_filter::FilterSpec;
use tempo_wavelet::CwtConfig;

use crate::cli::FilterCommand;
use crate::config::{CwtToml, DispatchToml, FilterToml};

/// Builds a filter spec from the subcommand, falling back to the TOML
/// defaults for order and notch bandwidth.
pub fn build_filter_spec(cmd: &FilterCommand, t: &FilterToml) -> Result<FilterSpec> {
    let spec = match *cmd {
        FilterCommand::Lowpass { cutoff, order } => {
            FilterSpec::lowpass(cutoff).with_order(order.unwrap_or(t.order))
        }
        FilterCommand::Highpass { cutoff, order } => {
            FilterSpec::highpass(cutoff).with_order(order.unwrap_or(t.order))
        }
        FilterCommand::Bandpass { low, high, order } => {
            FilterSpec::bandpass(low, high).with_order(order.unwrap_or(t.order))
        }
        FilterCommand::Notch { freq, bandwidth } => {
            FilterSpec::notch(freq).with_bandwidth(bandwidth.unwrap_or(t.notch_bandwidth_hz))
        }
    };
    if spec.cutoffs_hz().iter().any(|f| !f.is_finite()) {
        bail!("filter frequencies must be finite, got {:?}", spec.cutoffs_hz());
    }
    Ok(spec)
}

/// Builds a CWT config. `freqs` and `omega0` from the command line override
/// the TOML values; an explicit TOML `freqs` list overrides the log grid.
pub fn build_cwt_config(
    t: &CwtToml,
    freqs: Option<&[f64]>,
    omega0: Option<f64>,
) -> Result<CwtConfig> {
    let config = match freqs.or(t.freqs.as_deref()) {
        Some(list) => CwtConfig::new().with_freqs(list.to_vec()),
        None => {
            if t.n_freqs == 0 {
                bail!("cwt.n_freqs must be at least 1");
            }
            if !(t.f_min > 0.0 && t.f_min < t.f_max) {
                bail!(
                    "cwt frequency range must satisfy 0 < f_min < f_max, got {}..{}",
                    t.f_min,
                    t.f_max
                );
            }
            CwtConfig::new().with_log_freqs(t.f_min, t.f_max, t.n_freqs)
        }
    };
    let config = config.with_omega0(omega0.unwrap_or(t.omega0));
    config.validate().context("invalid wavelet configuration")?;
    Ok(config)
}

/// How channels of a CWT are scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Execution {
    /// All channels in one call on the current thread.
    Sequential,
    /// One task per channel on a rayon pool; `None` uses the global pool.
    Distributed { threads: Option<usize> },
}

/// Resolves the execution mode. Any of `--distributed`, `--threads` or
/// `dispatch.distributed = true` selects the distributed path.
pub fn execution(distributed: bool, threads: Option<usize>, t: &DispatchToml) -> Execution {
    let threads = threads.or(t.threads);
    if distributed || t.distributed || threads.is_some() {
        Execution::Distributed { threads }
    } else {
        Execution::Sequential
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempo_filter::FilterKind;

    #[test]
    fn filter_order_from_cli_wins() {
        let t = FilterToml::default();
        let spec = build_filter_spec(
            &FilterCommand::Lowpass {
                cutoff: 10.0,
                order: Some(5),
            },
            &t,
        )
        .unwrap();
        assert_eq!(spec.kind(), FilterKind::Lowpass);
        assert_eq!(spec.order(), Some(5));
    }

    #[test]
    fn filter_order_falls_back_to_toml() {
        let t = FilterToml {
            order: 4,
            notch_bandwidth_hz: 2.0,
        };
        let spec = build_filter_spec(
            &FilterCommand::Bandpass {
                low: 1.0,
                high: 8.0,
                order: None,
            },
            &t,
        )
        .unwrap();
        assert_eq!(spec, FilterSpec::bandpass(1.0, 8.0).with_order(4));

        let notch = build_filter_spec(
            &FilterCommand::Notch {
                freq: 50.0,
                bandwidth: None,
            },
            &t,
        )
        .unwrap();
        assert_eq!(notch, FilterSpec::notch(50.0).with_bandwidth(2.0));
        assert_eq!(notch.order(), None);
    }

    #[test]
    fn non_finite_cutoff_rejected() {
        let err = build_filter_spec(
            &FilterCommand::Highpass {
                cutoff: f64::NAN,
                order: None,
            },
            &FilterToml::default(),
        )
        .unwrap_err();
        assert!(err.to_string().contains("finite"));
    }

    #[test]
    fn cwt_defaults_match_library() {
        let config = build_cwt_config(&CwtToml::default(), None, None).unwrap();
        assert_eq!(config, CwtConfig::default());
    }

    #[test]
    fn cwt_cli_freqs_override_toml() {
        let t = CwtToml {
            freqs: Some(vec![1.0, 2.0]),
            ..CwtToml::default()
        };
        let config = build_cwt_config(&t, Some(&[5.0, 10.0, 20.0]), Some(6.0)).unwrap();
        assert_eq!(config.freqs(), &[5.0, 10.0, 20.0]);
        assert_eq!(config.omega0(), 6.0);

        let config = build_cwt_config(&t, None, None).unwrap();
        assert_eq!(config.freqs(), &[1.0, 2.0]);
    }

    #[test]
    fn cwt_bad_range_rejected() {
        let t = CwtToml {
            f_min: 50.0,
            f_max: 10.0,
            ..CwtToml::default()
        };
        assert!(build_cwt_config(&t, None, None).is_err());
        let t = CwtToml {
            n_freqs: 0,
            ..CwtToml::default()
        };
        assert!(build_cwt_config(&t, None, None).is_err());
    }

    #[test]
    fn cwt_invalid_frequency_has_context() {
        let err = build_cwt_config(&CwtToml::default(), Some(&[1.0, -2.0]), None).unwrap_err();
        let msg = format!("{err:#}");
        assert!(msg.contains("invalid wavelet configuration"), "{msg}");
        assert!(msg.contains("index 1"), "{msg}");
    }

    #[test]
    fn execution_mode() {
        let off = DispatchToml::default();
        assert_eq!(execution(false, None, &off), Execution::Sequential);
        assert_eq!(
            execution(true, None, &off),
            Execution::Distributed { threads: None }
        );
        assert_eq!(
            execution(false, Some(3), &off),
            Execution::Distributed { threads: Some(3) }
        );
        let on = DispatchToml {
            distributed: true,
            threads: Some(2),
        };
        assert_eq!(
            execution(false, None, &on),
            Execution::Distributed { threads: Some(2) }
        );
    }
}
