//! Nearby-player matching configuration

use crate::error::ConfigResult;
use crate::validation::Validatable;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchmakingConfig {
    /// First search radius in kilometres
    #[serde(default = "default_initial_radius_km")]
    pub initial_radius_km: f64,

    /// Radius used when the first search finds nobody
    #[serde(default = "default_fallback_radius_km")]
    pub fallback_radius_km: f64,

    /// Upper bound for caller-supplied radii on the nearby listing
    #[serde(default = "default_max_radius_km")]
    pub max_radius_km: f64,
}

impl MatchmakingConfig {
    /// Radii tried in order by the notify flow
    pub fn search_radii(&self) -> Vec<f64> {
        if self.fallback_radius_km > self.initial_radius_km {
            vec![self.initial_radius_km, self.fallback_radius_km]
        } else {
            vec![self.initial_radius_km]
        }
    }
}

impl Default for MatchmakingConfig {
    fn default() -> Self {
        Self {
            initial_radius_km: default_initial_radius_km(),
            fallback_radius_km: default_fallback_radius_km(),
            max_radius_km: default_max_radius_km(),
        }
    }
}

impl Validatable for MatchmakingConfig {
    fn validate(&self) -> ConfigResult<()> {
        self.require_positive("initial_radius_km", self.initial_radius_km)?;
        self.require_positive("fallback_radius_km", self.fallback_radius_km)?;

        if self.fallback_radius_km < self.initial_radius_km {
            return Err(self.invalid("fallback_radius_km must not be smaller than initial_radius_km"));
        }
        if self.max_radius_km < self.fallback_radius_km {
            return Err(self.invalid("max_radius_km must not be smaller than fallback_radius_km"));
        }

        Ok(())
    }

    fn domain_name(&self) -> &'static str {
        "matchmaking"
    }
}

fn default_initial_radius_km() -> f64 {
    3.0
}

fn default_fallback_radius_km() -> f64 {
    7.0
}

fn default_max_radius_km() -> f64 {
    50.0
}
