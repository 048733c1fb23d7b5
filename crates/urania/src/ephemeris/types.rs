use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Position and motion of one body at a single instant
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyState {
    /// Ecliptic longitude in degrees (0-360)
    pub lon: f64,
    /// Speed in longitude (degrees per day, negative when retrograde)
    pub speed: f64,
}

impl BodyState {
    pub fn new(lon: f64, speed: f64) -> Self {
        Self { lon, speed }
    }

    pub fn is_retrograde(&self) -> bool {
        self.speed < 0.0
    }
}

/// Body name -> state for one instant, iterated in name order
pub type Positions = BTreeMap<String, BodyState>;
