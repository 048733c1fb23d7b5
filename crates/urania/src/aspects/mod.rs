pub mod calculator;
pub mod graph;
pub mod types;

pub use calculator::{angular_separation, tightness, AspectClassifier};
pub use graph::AspectGraph;
pub use types::{ordered_pair, AspectEdge, AspectKind, BodySnapshot, Phase};
