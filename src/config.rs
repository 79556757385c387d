//! Engine configuration parsed from environment variables.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};

use crate::consts::{DEGENERATE_EPSILON, HIT_TOLERANCE_PX};
use crate::hit::RegionPolicy;

/// Coordinate space the hit tolerance is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToleranceSpace {
    /// Constant in screen pixels; divided by the camera zoom before use.
    #[default]
    Screen,
    /// Constant in logical canvas units regardless of zoom.
    World,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("config parse failed: {var}={value:?}")]
    Parse { var: &'static str, value: String },
}

impl ConfigError {
    /// Stable machine-readable code for this error.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Parse { .. } => "E_CONFIG_PARSE",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineConfig {
    /// Width of the click tolerance band around shape outlines.
    pub hit_tolerance_px: f64,
    /// Whether `hit_tolerance_px` scales with zoom.
    pub tolerance_space: ToleranceSpace,
    /// Which region overlaps select a shape during a rubber-band drag.
    pub region_policy: RegionPolicy,
    /// Size below which a freshly drawn box shape is discarded on release.
    pub degenerate_epsilon: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            hit_tolerance_px: HIT_TOLERANCE_PX,
            tolerance_space: ToleranceSpace::default(),
            region_policy: RegionPolicy::default(),
            degenerate_epsilon: DEGENERATE_EPSILON,
        }
    }
}

impl EngineConfig {
    /// Build typed engine config from environment variables.
    ///
    /// Optional:
    /// - `SKETCH_HIT_TOLERANCE_PX`: non-negative number, default 10
    /// - `SKETCH_TOLERANCE_SPACE`: `screen` (default) or `world`
    /// - `SKETCH_REGION_POLICY`: `full` (default) or `partial`
    /// - `SKETCH_DEGENERATE_EPSILON`: non-negative number, default 1e-6
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` for any value that is set but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            hit_tolerance_px: parse_non_negative(
                "SKETCH_HIT_TOLERANCE_PX",
                env_var("SKETCH_HIT_TOLERANCE_PX").as_deref(),
                defaults.hit_tolerance_px,
            )?,
            tolerance_space: parse_tolerance_space(env_var("SKETCH_TOLERANCE_SPACE").as_deref())?,
            region_policy: parse_region_policy(env_var("SKETCH_REGION_POLICY").as_deref())?,
            degenerate_epsilon: parse_non_negative(
                "SKETCH_DEGENERATE_EPSILON",
                env_var("SKETCH_DEGENERATE_EPSILON").as_deref(),
                defaults.degenerate_epsilon,
            )?,
        })
    }
}

fn env_var(key: &str) -> Option<String> {
    match std::env::var(key) {
        Ok(v) if !v.trim().is_empty() => Some(v),
        _ => None,
    }
}

fn parse_non_negative(var: &'static str, raw: Option<&str>, default: f64) -> Result<f64, ConfigError> {
    let Some(raw) = raw else {
        return Ok(default);
    };
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 => Ok(v),
        _ => Err(ConfigError::Parse { var, value: raw.to_string() }),
    }
}

fn parse_tolerance_space(raw: Option<&str>) -> Result<ToleranceSpace, ConfigError> {
    match raw.map_or("screen", str::trim) {
        "screen" => Ok(ToleranceSpace::Screen),
        "world" => Ok(ToleranceSpace::World),
        other => Err(ConfigError::Parse { var: "SKETCH_TOLERANCE_SPACE", value: other.to_string() }),
    }
}

fn parse_region_policy(raw: Option<&str>) -> Result<RegionPolicy, ConfigError> {
    match raw.map_or("full", str::trim) {
        "full" => Ok(RegionPolicy::Full),
        "partial" => Ok(RegionPolicy::Partial),
        other => Err(ConfigError::Parse { var: "SKETCH_REGION_POLICY", value: other.to_string() }),
    }
}
