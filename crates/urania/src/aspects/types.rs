use crate::rounding;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Named angular relationship between two bodies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AspectKind {
    Conjunction,
    SemiSextile,
    SemiSquare,
    Sextile,
    Quintile,
    Square,
    Trine,
    Sesquiquadrate,
    Quincunx,
    Opposition,
}

impl AspectKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AspectKind::Conjunction => "conjunction",
            AspectKind::SemiSextile => "semi-sextile",
            AspectKind::SemiSquare => "semi-square",
            AspectKind::Sextile => "sextile",
            AspectKind::Quintile => "quintile",
            AspectKind::Square => "square",
            AspectKind::Trine => "trine",
            AspectKind::Sesquiquadrate => "sesquiquadrate",
            AspectKind::Quincunx => "quincunx",
            AspectKind::Opposition => "opposition",
        }
    }
}

impl fmt::Display for AspectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether the orb is currently shrinking or growing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Applying,
    Separating,
}

/// Position of one body of an aspect, as reported alongside the edge
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BodySnapshot {
    /// Longitude in degrees (0-360)
    #[serde(rename = "lon_deg", serialize_with = "rounding::two_places")]
    pub lon: f64,
    /// Zodiac sign name
    pub sign: String,
    /// Speed in longitude (degrees per day)
    #[serde(rename = "speed_deg_per_day", serialize_with = "rounding::three_places")]
    pub speed: f64,
}

/// One aspect between an unordered pair of bodies.
///
/// `body1` always sorts before `body2`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AspectEdge {
    pub body1: String,
    pub body2: String,
    #[serde(rename = "aspect_name")]
    pub kind: AspectKind,
    pub family: String,
    pub vibe: String,
    #[serde(rename = "ideal_angle_deg")]
    pub ideal_angle: f64,
    #[serde(rename = "angle_measured_deg", serialize_with = "rounding::three_places")]
    pub angle: f64,
    /// Deviation from the ideal angle, unrounded
    #[serde(rename = "orb_deg", serialize_with = "rounding::three_places")]
    pub orb: f64,
    pub phase: Phase,
    pub out_of_sign: bool,
    pub positions: BTreeMap<String, BodySnapshot>,
    #[serde(serialize_with = "rounding::three_places")]
    pub importance_score: f64,
}

/// Return the two names in sorted order
pub fn ordered_pair<'a>(a: &'a str, b: &'a str) -> (&'a str, &'a str) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}
