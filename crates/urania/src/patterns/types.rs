use crate::aspects::{ordered_pair, AspectKind};
use crate::rounding;
use serde::Serialize;
use std::fmt;

/// The six aspect configurations the detector knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum PatternType {
    #[serde(rename = "Yod")]
    Yod,
    #[serde(rename = "T-Square")]
    TSquare,
    #[serde(rename = "Grand Trine")]
    GrandTrine,
    #[serde(rename = "Kite")]
    Kite,
    #[serde(rename = "Mystic Rectangle")]
    MysticRectangle,
    #[serde(rename = "Grand Cross")]
    GrandCross,
}

impl PatternType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PatternType::Yod => "Yod",
            PatternType::TSquare => "T-Square",
            PatternType::GrandTrine => "Grand Trine",
            PatternType::Kite => "Kite",
            PatternType::MysticRectangle => "Mystic Rectangle",
            PatternType::GrandCross => "Grand Cross",
        }
    }
}

impl fmt::Display for PatternType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An aspect a pattern relies on
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct PatternEdge {
    pub body1: String,
    pub body2: String,
    #[serde(rename = "aspect_name")]
    pub kind: AspectKind,
}

impl PatternEdge {
    /// Bodies are stored in sorted order
    pub fn new(kind: AspectKind, a: &str, b: &str) -> Self {
        let (body1, body2) = ordered_pair(a, b);
        Self {
            body1: body1.to_string(),
            body2: body2.to_string(),
            kind,
        }
    }
}

/// A detected configuration among 3 or 4 bodies
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Pattern {
    pub pattern_type: PatternType,
    /// Sorted member names
    pub members: Vec<String>,
    /// Edges of the role assignment that matched
    pub edges: Vec<PatternEdge>,
    /// Fixed prior for the pattern type
    pub pattern_score: f64,
    /// Set by the scorer
    pub has_out_of_sign: bool,
    /// Set by the scorer, in [0, 1]
    #[serde(serialize_with = "rounding::three_places")]
    pub pattern_strength_score: f64,
}

impl Pattern {
    /// Dedup key: type plus sorted members
    pub fn fingerprint(&self) -> (PatternType, Vec<String>) {
        (self.pattern_type, self.members.clone())
    }
}
