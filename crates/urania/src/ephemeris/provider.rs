use crate::ephemeris::types::Positions;
use async_trait::async_trait;
use chrono::NaiveDate;
use thiserror::Error;

/// Errors that can occur while obtaining body positions
#[derive(Error, Debug)]
pub enum EphemerisError {
    #[error("Ephemeris file not found at path: {path}. {message}")]
    FileNotFound { path: String, message: String },
    #[error("Unknown body: {body}")]
    UnknownBody { body: String },
    #[error("Failed to calculate position for {body} on {date}: {message}")]
    CalculationFailed {
        body: String,
        date: NaiveDate,
        message: String,
    },
    #[error("No positions recorded for {date}")]
    MissingDate { date: NaiveDate },
    #[error("No position recorded for {body} on {date}")]
    MissingBody { body: String, date: NaiveDate },
    #[error("Failed to read position table {path}: {source}")]
    TableIo {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse position table: {0}")]
    TableParse(#[from] serde_json::Error),
    #[error("Invalid date key {key:?} in position table")]
    InvalidDate { key: String },
}

/// Source of body longitudes and speeds for a given day
#[async_trait]
pub trait PositionProvider: Send + Sync {
    fn name(&self) -> &str;

    /// Positions of `bodies` for `date`. Longitudes are in [0, 360), speeds in deg/day.
    async fn positions(
        &self,
        date: NaiveDate,
        bodies: &[String],
    ) -> Result<Positions, EphemerisError>;
}
