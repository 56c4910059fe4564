//! Pitching configuration.

use std::fmt;
use std::str::FromStr;

use crate::edge::EdgeGradientPitcher;
use crate::error::ConfigError;
use crate::strategy::PoleHeightStrategy;
use crate::volume::VolumeGradientPitcher;

// ── PitchingMethod ─────────────────────────────────────────────────

/// Which pole-height strategy a slab uses.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PitchingMethod {
    /// Per-element gradient bound, filled to
    /// [`VOLUME_FILL`](crate::volume::VOLUME_FILL) in 2D and 3D. Produces
    /// the tallest tents.
    #[default]
    VolumeGradient,
    /// Conservative per-edge bound. Cheaper to evaluate, never taller
    /// than the exact volume bound.
    EdgeGradient,
}

impl PitchingMethod {
    /// A fresh, uninitialised strategy for this method.
    pub fn strategy(self) -> Box<dyn PoleHeightStrategy> {
        match self {
            Self::VolumeGradient => Box::new(VolumeGradientPitcher::new()),
            Self::EdgeGradient => Box::new(EdgeGradientPitcher::new()),
        }
    }
}

impl fmt::Display for PitchingMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::VolumeGradient => f.write_str("vol"),
            Self::EdgeGradient => f.write_str("edge"),
        }
    }
}

impl FromStr for PitchingMethod {
    type Err = ConfigError;

    /// Accepts `vol`, `volume`, `volume-gradient`, `edge`, and
    /// `edge-gradient`, ignoring ASCII case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "vol" | "volume" | "volume-gradient" | "volume_gradient" => Ok(Self::VolumeGradient),
            "edge" | "edge-gradient" | "edge_gradient" => Ok(Self::EdgeGradient),
            _ => Err(ConfigError::UnknownMethod { name: s.to_owned() }),
        }
    }
}

// ── PitchConfig ────────────────────────────────────────────────────

/// Parameters of the advancing-front loop.
#[derive(Clone, Debug, PartialEq)]
pub struct PitchConfig {
    /// Pole-height strategy. Default: [`PitchingMethod::VolumeGradient`].
    pub method: PitchingMethod,
    /// Starting fraction of the reference height a vertex must be able
    /// to advance before it is pitched. Halved on every stalled scan and
    /// restored after every successful round. Default: 0.5.
    pub initial_adv_factor: f64,
    /// Consecutive halvings allowed within one round. Default: 30.
    pub max_stall_retries: u32,
    /// Global causality safety factor in `(0, 1]`, scaling every
    /// admissible height. Default: 1.0.
    pub global_ct: f64,
}

impl Default for PitchConfig {
    fn default() -> Self {
        Self {
            method: PitchingMethod::VolumeGradient,
            initial_adv_factor: 0.5,
            max_stall_retries: 30,
            global_ct: 1.0,
        }
    }
}

impl PitchConfig {
    /// Default configuration with the given method.
    pub fn with_method(method: PitchingMethod) -> Self {
        Self {
            method,
            ..Self::default()
        }
    }

    /// Check that every parameter is in range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let in_unit = |x: f64| x > 0.0 && x <= 1.0;
        if !in_unit(self.initial_adv_factor) {
            return Err(ConfigError::InvalidAdvFactor {
                value: self.initial_adv_factor,
            });
        }
        if !in_unit(self.global_ct) {
            return Err(ConfigError::InvalidGlobalCt {
                value: self.global_ct,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        let cfg = PitchConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.max_stall_retries, 30);
    }

    #[test]
    fn rejects_out_of_range_factors() {
        let cfg = PitchConfig {
            initial_adv_factor: 0.0,
            ..PitchConfig::default()
        };
        assert_eq!(
            cfg.validate(),
            Err(ConfigError::InvalidAdvFactor { value: 0.0 })
        );
        let cfg = PitchConfig {
            global_ct: 1.5,
            ..PitchConfig::default()
        };
        assert_eq!(cfg.validate(), Err(ConfigError::InvalidGlobalCt { value: 1.5 }));
        let cfg = PitchConfig {
            global_ct: f64::NAN,
            ..PitchConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn parses_method_names() {
        assert_eq!("vol".parse::<PitchingMethod>(), Ok(PitchingMethod::VolumeGradient));
        assert_eq!("Volume".parse::<PitchingMethod>(), Ok(PitchingMethod::VolumeGradient));
        assert_eq!(" edge ".parse::<PitchingMethod>(), Ok(PitchingMethod::EdgeGradient));
        assert_eq!(
            "diag".parse::<PitchingMethod>(),
            Err(ConfigError::UnknownMethod { name: "diag".into() })
        );
    }

    #[test]
    fn display_round_trips() {
        for m in [PitchingMethod::VolumeGradient, PitchingMethod::EdgeGradient] {
            assert_eq!(m.to_string().parse::<PitchingMethod>(), Ok(m));
            assert_eq!(m.strategy().name(), m.to_string());
        }
    }
}
