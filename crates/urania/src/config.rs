//! Aspect configuration.
//!
//! One explicit table of aspect definitions, body weights and phase settings
//! that is passed to every component. `AspectConfig::default()` carries the
//! stock tables; a TOML file can override any part of it.

use crate::aspects::AspectKind;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Errors raised while loading or validating configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Static definition of one aspect
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AspectDefinition {
    pub kind: AspectKind,
    /// Exact separation in degrees (0-180)
    pub angle: f64,
    /// Maximum allowed deviation from `angle`
    pub orb: f64,
    /// Harmonic family tag, e.g. "4th-harmonic"
    pub family: String,
    /// Qualitative tag: "harmony", "tension" or "neutral"
    pub vibe: String,
}

impl AspectDefinition {
    pub fn new(kind: AspectKind, angle: f64, orb: f64, family: &str, vibe: &str) -> Self {
        Self {
            kind,
            angle,
            orb,
            family: family.to_string(),
            vibe: vibe.to_string(),
        }
    }
}

/// Settings shared by the classifier, detector and scorer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AspectConfig {
    /// Aspect definitions. Order matters: on equal orbs the earlier entry wins.
    pub aspects: Vec<AspectDefinition>,
    /// Importance multiplier per body; unlisted bodies weigh 1.0
    pub body_weights: BTreeMap<String, f64>,
    /// Bodies requested from the position provider
    pub bodies: Vec<String>,
    /// How far (in days) the faster body is projected when deciding phase
    pub phase_step_days: f64,
    /// Relative speeds below this (deg/day) are treated as stationary
    pub stationary_speed_epsilon: f64,
}

impl Default for AspectConfig {
    fn default() -> Self {
        Self {
            aspects: default_aspects(),
            body_weights: default_body_weights(),
            bodies: default_bodies(),
            phase_step_days: 1.0,
            stationary_speed_epsilon: 1e-6,
        }
    }
}

fn default_aspects() -> Vec<AspectDefinition> {
    use AspectKind::*;
    vec![
        AspectDefinition::new(Conjunction, 0.0, 8.0, "1st-harmonic", "neutral"),
        AspectDefinition::new(SemiSextile, 30.0, 2.0, "12th-harmonic", "neutral"),
        AspectDefinition::new(SemiSquare, 45.0, 2.0, "8th-harmonic", "tension"),
        AspectDefinition::new(Sextile, 60.0, 4.0, "6th-harmonic", "harmony"),
        AspectDefinition::new(Quintile, 72.0, 2.0, "5th-harmonic", "harmony"),
        AspectDefinition::new(Square, 90.0, 6.0, "4th-harmonic", "tension"),
        AspectDefinition::new(Trine, 120.0, 6.0, "3rd-harmonic", "harmony"),
        AspectDefinition::new(Sesquiquadrate, 135.0, 2.0, "8th-harmonic", "tension"),
        AspectDefinition::new(Quincunx, 150.0, 3.0, "12th-harmonic", "neutral"),
        AspectDefinition::new(Opposition, 180.0, 8.0, "2nd-harmonic", "tension"),
    ]
}

fn default_body_weights() -> BTreeMap<String, f64> {
    [
        ("sun", 1.25),
        ("moon", 1.25),
        ("mercury", 1.0),
        ("venus", 1.0),
        ("mars", 1.05),
        ("jupiter", 1.05),
        ("saturn", 1.05),
        ("uranus", 0.95),
        ("neptune", 0.95),
    ]
    .into_iter()
    .map(|(name, weight)| (name.to_string(), weight))
    .collect()
}

fn default_bodies() -> Vec<String> {
    [
        "mercury", "venus", "mars", "jupiter", "saturn", "uranus", "neptune", "sun", "moon",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

impl AspectConfig {
    /// Parse and validate a TOML document. Missing fields keep their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let mut config: AspectConfig = toml::from_str(text)?;
        config.validate()?;
        config.body_weights = config
            .body_weights
            .into_iter()
            .map(|(name, weight)| (name.to_lowercase(), weight))
            .collect();
        Ok(config)
    }

    /// Load and validate a TOML config file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.aspects.is_empty() {
            return Err(ConfigError::Invalid("aspect table is empty".to_string()));
        }
        let mut seen = HashSet::new();
        for def in &self.aspects {
            if !seen.insert(def.kind) {
                return Err(ConfigError::Invalid(format!(
                    "aspect {} is defined more than once",
                    def.kind
                )));
            }
            if !(0.0..=180.0).contains(&def.angle) {
                return Err(ConfigError::Invalid(format!(
                    "aspect {} has angle {} outside 0..=180",
                    def.kind, def.angle
                )));
            }
            if !def.orb.is_finite() || def.orb <= 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "aspect {} needs a positive orb, got {}",
                    def.kind, def.orb
                )));
            }
        }
        if let Some((name, weight)) = self
            .body_weights
            .iter()
            .find(|(_, w)| !w.is_finite() || **w < 0.0)
        {
            return Err(ConfigError::Invalid(format!(
                "body weight for {} must be non-negative, got {}",
                name, weight
            )));
        }
        let mut names = HashSet::new();
        if let Some(name) = self
            .body_weights
            .keys()
            .find(|name| !names.insert(name.to_lowercase()))
        {
            return Err(ConfigError::Invalid(format!(
                "body weight for {} is given more than once (names are case-insensitive)",
                name
            )));
        }
        if !self.phase_step_days.is_finite() || self.phase_step_days <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "phase_step_days must be positive, got {}",
                self.phase_step_days
            )));
        }
        if !self.stationary_speed_epsilon.is_finite() || self.stationary_speed_epsilon < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "stationary_speed_epsilon must be non-negative, got {}",
                self.stationary_speed_epsilon
            )));
        }
        Ok(())
    }

    pub fn definition(&self, kind: AspectKind) -> Option<&AspectDefinition> {
        self.aspects.iter().find(|def| def.kind == kind)
    }

    pub fn orb_limit(&self, kind: AspectKind) -> Option<f64> {
        self.definition(kind).map(|def| def.orb)
    }

    /// Case-insensitive weight lookup, 1.0 for unlisted bodies
    pub fn body_weight(&self, name: &str) -> f64 {
        let lower = name.to_lowercase();
        self.body_weights
            .get(&lower)
            .or_else(|| {
                self.body_weights
                    .iter()
                    .find(|(key, _)| key.to_lowercase() == lower)
                    .map(|(_, weight)| weight)
            })
            .copied()
            .unwrap_or(1.0)
    }
}
