//! Precomputed positions loaded from JSON.
//!
//! Format: `{"2024-03-01": {"sun": {"lon": 340.9, "speed": 1.0}, ...}, ...}`

use crate::ephemeris::provider::{EphemerisError, PositionProvider};
use crate::ephemeris::types::{BodyState, Positions};
use crate::zodiac::normalize_degrees;
use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// In-memory table of daily positions
#[derive(Debug, Clone, Default)]
pub struct PositionTable {
    days: BTreeMap<NaiveDate, Positions>,
}

impl PositionTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json_str(text: &str) -> Result<Self, EphemerisError> {
        let raw: BTreeMap<String, BTreeMap<String, BodyState>> = serde_json::from_str(text)?;
        let mut table = Self::new();
        for (key, bodies) in raw {
            let date = NaiveDate::parse_from_str(&key, DATE_FORMAT)
                .map_err(|_| EphemerisError::InvalidDate { key: key.clone() })?;
            let positions = bodies
                .into_iter()
                .map(|(name, state)| (name.to_lowercase(), state))
                .collect();
            table.insert(date, positions);
        }
        Ok(table)
    }

    pub fn from_path(path: &Path) -> Result<Self, EphemerisError> {
        let text = fs::read_to_string(path).map_err(|source| EphemerisError::TableIo {
            path: path.display().to_string(),
            source,
        })?;
        let table = Self::from_json_str(&text)?;
        log::info!(
            "Loaded {} days of positions from {}",
            table.days.len(),
            path.display()
        );
        Ok(table)
    }

    /// Add or replace one day. Longitudes are normalized into [0, 360).
    pub fn insert(&mut self, date: NaiveDate, positions: Positions) {
        let normalized = positions
            .into_iter()
            .map(|(name, state)| (name, BodyState::new(normalize_degrees(state.lon), state.speed)))
            .collect();
        self.days.insert(date, normalized);
    }

    pub fn dates(&self) -> impl Iterator<Item = &NaiveDate> {
        self.days.keys()
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

#[async_trait]
impl PositionProvider for PositionTable {
    fn name(&self) -> &str {
        "table"
    }

    async fn positions(
        &self,
        date: NaiveDate,
        bodies: &[String],
    ) -> Result<Positions, EphemerisError> {
        let day = self
            .days
            .get(&date)
            .ok_or(EphemerisError::MissingDate { date })?;

        // An empty request returns the whole day
        if bodies.is_empty() {
            return Ok(day.clone());
        }

        let mut positions = Positions::new();
        for body in bodies {
            let name = body.to_lowercase();
            let state = day.get(&name).ok_or_else(|| EphemerisError::MissingBody {
                body: body.clone(),
                date,
            })?;
            positions.insert(name, *state);
        }
        Ok(positions)
    }
}
