//! Daily aspect graphs and aspect-pattern detection.
//!
//! Positions for a day become an [`AspectGraph`], the graph is searched for
//! Yods, T-Squares, Grand Trines, Kites, Mystic Rectangles and Grand
//! Crosses, and each pattern is scored by how tight its aspects are.

pub mod aspects;
pub mod config;
pub mod ephemeris;
pub mod patterns;
pub mod pipeline;
pub mod rounding;
pub mod zodiac;

pub use aspects::{AspectClassifier, AspectEdge, AspectGraph, AspectKind, Phase};
pub use config::{AspectConfig, AspectDefinition, ConfigError};
pub use ephemeris::{
    BodyState, EphemerisError, PositionProvider, PositionTable, Positions, SwissEphemerisAdapter,
};
pub use patterns::{Pattern, PatternDetector, PatternScorer, PatternType};
pub use pipeline::{DailyPipeline, DailyReport, PipelineError, RangeReport};
