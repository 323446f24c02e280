/*
 * Simulation Parameters Module
 *
 * This module defines the parameter structs for the flock and the starfield,
 * plus the top-level BackdropConfig that bundles them. Defaults are the
 * embedded constants the backdrop ships with; a JSON file named by the
 * FISH_BACKDROP_CONFIG environment variable can override any of them.
 */

use std::path::{Path, PathBuf};

use glam::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::{DEPTH_BOUND, FISH_COUNT, STAR_COUNT};

/// Environment variable naming an optional JSON configuration file.
pub const CONFIG_ENV_VAR: &str = "FISH_BACKDROP_CONFIG";

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid configuration: {0}")]
    Invalid(&'static str),
}

// Parameters for the flock simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlockParams {
    pub num_fish: usize,
    pub separation_radius: f32,
    pub alignment_radius: f32,
    pub cohesion_radius: f32,
    pub pointer_radius: f32,
    pub separation_weight: f32,
    pub alignment_weight: f32,
    pub cohesion_weight: f32,
    pub pointer_weight: f32,
    pub max_speed: f32,
    pub damping: f32,
    // Half-range of the uniform per-axis velocity noise
    pub jitter: Vec3,
    // Fraction of velocity kept (and inverted) when a fish hits a wall
    pub bounce: f32,
    pub depth_bound: f32,
    // Below this speed a fish keeps its previous orientation
    pub min_facing_speed: f32,
    // Uniform scale applied to each cloned mesh
    pub fish_scale: f32,
}

impl Default for FlockParams {
    fn default() -> Self {
        Self {
            num_fish: FISH_COUNT,
            separation_radius: 50.0,
            alignment_radius: 80.0,
            cohesion_radius: 120.0,
            pointer_radius: 200.0,
            separation_weight: 0.5,
            alignment_weight: 0.1,
            cohesion_weight: 0.05,
            pointer_weight: 0.3,
            max_speed: 3.0,
            damping: 0.99,
            jitter: Vec3::new(0.01, 0.01, 0.005),
            bounce: 0.8,
            depth_bound: DEPTH_BOUND,
            min_facing_speed: 0.01,
            fish_scale: 1.0,
        }
    }
}

impl FlockParams {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.separation_radius <= 0.0
            || self.alignment_radius <= 0.0
            || self.cohesion_radius <= 0.0
            || self.pointer_radius <= 0.0
        {
            return Err(ConfigError::Invalid("flocking radii must be positive"));
        }
        if self.max_speed <= 0.0 {
            return Err(ConfigError::Invalid("max_speed must be positive"));
        }
        if !(self.damping > 0.0 && self.damping <= 1.0) {
            return Err(ConfigError::Invalid("damping must lie in (0, 1]"));
        }
        if self.jitter.min_element() < 0.0 {
            return Err(ConfigError::Invalid("jitter half-ranges must be non-negative"));
        }
        if !(0.0..=1.0).contains(&self.bounce) {
            return Err(ConfigError::Invalid("bounce must lie in [0, 1]"));
        }
        if self.depth_bound <= 0.0 || self.fish_scale <= 0.0 {
            return Err(ConfigError::Invalid("depth_bound and fish_scale must be positive"));
        }
        Ok(())
    }
}

// Parameters for the twinkling starfield
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StarfieldParams {
    pub num_stars: usize,
    pub twinkle_step: f32,
    pub twinkle_amplitude: f32,
    pub min_base_opacity: f32,
    pub max_base_opacity: f32,
    pub star_radius: f32,
}

impl Default for StarfieldParams {
    fn default() -> Self {
        Self {
            num_stars: STAR_COUNT,
            twinkle_step: 0.02,
            twinkle_amplitude: 0.1,
            min_base_opacity: 0.2,
            max_base_opacity: 0.5,
            star_radius: 1.5,
        }
    }
}

impl StarfieldParams {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_base_opacity < 0.0 || self.min_base_opacity >= self.max_base_opacity {
            return Err(ConfigError::Invalid(
                "base opacity range must be non-negative and non-empty",
            ));
        }
        if self.star_radius <= 0.0 {
            return Err(ConfigError::Invalid("star_radius must be positive"));
        }
        Ok(())
    }
}

/// Everything the backdrop needs at startup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackdropConfig {
    pub flock: FlockParams,
    pub starfield: StarfieldParams,
    /// Optional RNG seed for reproducible backdrops.
    pub rng_seed: Option<u64>,
    /// Location of the fish mesh asset.
    pub asset_path: PathBuf,
}

impl Default for BackdropConfig {
    fn default() -> Self {
        Self {
            flock: FlockParams::default(),
            starfield: StarfieldParams::default(),
            rng_seed: None,
            asset_path: PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/assets/fish.json")),
        }
    }
}

impl BackdropConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.flock.validate()?;
        self.starfield.validate()
    }

    /// Parse and validate a JSON config file. Missing fields keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text).map_err(|err| match err {
            ConfigError::Parse { source, .. } => ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })
    }

    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text).map_err(|source| ConfigError::Parse {
            path: PathBuf::new(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load from the file named by FISH_BACKDROP_CONFIG, or fall back to defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) => {
                let path = PathBuf::from(path);
                info!(path = %path.display(), "loading backdrop configuration");
                Self::from_file(&path)
            }
            None => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(BackdropConfig::default().validate().is_ok());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = BackdropConfig::from_json(r#"{ "flock": { "max_speed": 5.0 }, "rng_seed": 9 }"#)
            .expect("valid config");
        assert_eq!(config.flock.max_speed, 5.0);
        assert_eq!(config.flock.num_fish, FISH_COUNT);
        assert_eq!(config.starfield, StarfieldParams::default());
        assert_eq!(config.rng_seed, Some(9));
    }

    #[test]
    fn rejects_out_of_range_damping() {
        let err = BackdropConfig::from_json(r#"{ "flock": { "damping": 1.5 } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn rejects_inverted_opacity_range() {
        let params = StarfieldParams {
            min_base_opacity: 0.6,
            ..StarfieldParams::default()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = BackdropConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
