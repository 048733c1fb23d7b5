pub mod detector;
pub mod motifs;
pub mod scorer;
pub mod types;

pub use detector::PatternDetector;
pub use motifs::{standard_motifs, MotifSpec, RequiredEdge};
pub use scorer::PatternScorer;
pub use types::{Pattern, PatternEdge, PatternType};
