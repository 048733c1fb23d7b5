use crate::ephemeris::provider::{EphemerisError, PositionProvider};
use crate::ephemeris::types::{BodyState, Positions};
use crate::zodiac::normalize_degrees;
use async_trait::async_trait;
use chrono::{Datelike, NaiveDate};
use std::env;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use swisseph::swe::{calc_ut, julday, set_ephe_path};

// Swiss Ephemeris planet IDs
// SUN=0, MOON=1, MERCURY=2, VENUS=3, MARS=4, JUPITER=5,
// SATURN=6, URANUS=7, NEPTUNE=8, PLUTO=9, CHIRON=15, TRUE_NODE=11
const PLANET_IDS: &[(&str, i32)] = &[
    ("sun", 0),
    ("moon", 1),
    ("mercury", 2),
    ("venus", 3),
    ("mars", 4),
    ("jupiter", 5),
    ("saturn", 6),
    ("uranus", 7),
    ("neptune", 8),
    ("pluto", 9),
    ("chiron", 15),
    ("north_node", 11), // TRUE_NODE
];

/// FLG_SWIEPH: use Swiss Ephemeris files, geocentric tropical output
const FLAGS: u32 = 2;

/// Gap between the two samples used to derive speed
const SPEED_SAMPLE_DAYS: f64 = 0.5;

/// swisseph keeps one global data path in the C library. Holding this lock
/// serializes every call; the value is the path currently registered.
static SWISSEPH: Mutex<Option<PathBuf>> = Mutex::new(None);

fn swisseph_state() -> MutexGuard<'static, Option<PathBuf>> {
    // The guarded value is only a path, so a poisoned lock is still usable
    SWISSEPH.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Point the C library at `path` unless it already is
fn register_path(current: &mut Option<PathBuf>, path: &Path) {
    if current.as_deref() != Some(path) {
        set_ephe_path(&path.to_string_lossy());
        *current = Some(path.to_path_buf());
    }
}

/// Swiss Ephemeris position provider.
///
/// Longitudes are sampled at 00:00 UTC and speeds are the wrapped change
/// over the following half day.
pub struct SwissEphemerisAdapter {
    ephemeris_path: PathBuf,
}

impl SwissEphemerisAdapter {
    /// Create a new adapter with optional ephemeris path
    pub fn new(ephemeris_path: Option<PathBuf>) -> Result<Self, EphemerisError> {
        let path = ephemeris_path.unwrap_or_else(|| {
            env::var("SWISS_EPHEMERIS_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("/usr/local/share/swisseph"))
        });

        if !path.exists() {
            return Err(EphemerisError::FileNotFound {
                path: path.display().to_string(),
                message: "Ephemeris path does not exist. Please ensure Swiss Ephemeris data files are installed.".to_string(),
            });
        }

        register_path(&mut swisseph_state(), &path);
        log::info!("Using Swiss Ephemeris data at {}", path.display());
        Ok(Self {
            ephemeris_path: path,
        })
    }

    pub fn ephemeris_path(&self) -> &Path {
        &self.ephemeris_path
    }

    /// Longitude and speed of one body at the start of `date`
    pub fn body_state(&self, body: &str, date: NaiveDate) -> Result<BodyState, EphemerisError> {
        let body_lower = body.to_lowercase();

        // South node mirrors the true node
        if body_lower == "south_node" {
            let north = self.body_state("north_node", date)?;
            return Ok(BodyState::new(normalize_degrees(north.lon + 180.0), north.speed));
        }

        let code = PLANET_IDS
            .iter()
            .find(|(id, _)| *id == body_lower)
            .map(|(_, code)| *code)
            .ok_or_else(|| EphemerisError::UnknownBody {
                body: body.to_string(),
            })?;

        let jd0 = date_to_julian_day(date);
        let lon0 = self.longitude(&body_lower, code, jd0, date)?;
        let lon1 = self.longitude(&body_lower, code, jd0 + SPEED_SAMPLE_DAYS, date)?;

        let mut delta = normalize_degrees(lon1 - lon0);
        if delta > 180.0 {
            delta -= 360.0;
        }
        Ok(BodyState::new(lon0, delta / SPEED_SAMPLE_DAYS))
    }

    fn longitude(
        &self,
        body: &str,
        code: i32,
        jd: f64,
        date: NaiveDate,
    ) -> Result<f64, EphemerisError> {
        // Another adapter may have registered a different directory since
        let mut current = swisseph_state();
        register_path(&mut current, &self.ephemeris_path);

        let result = calc_ut(jd, code as u32, FLAGS).map_err(|e| {
            EphemerisError::CalculationFailed {
                body: body.to_string(),
                date,
                message: format!("Swiss Ephemeris error: {}", e),
            }
        })?;

        Ok(normalize_degrees(result.out[0]))
    }
}

#[async_trait]
impl PositionProvider for SwissEphemerisAdapter {
    fn name(&self) -> &str {
        "swisseph"
    }

    async fn positions(
        &self,
        date: NaiveDate,
        bodies: &[String],
    ) -> Result<Positions, EphemerisError> {
        let mut positions = Positions::new();
        for body in bodies {
            let state = self.body_state(body, date)?;
            positions.insert(body.to_lowercase(), state);
        }
        Ok(positions)
    }
}

/// Julian Day at 00:00 UTC of `date`
fn date_to_julian_day(date: NaiveDate) -> f64 {
    // GREG_CAL = 1
    julday(date.year(), date.month() as i32, date.day() as i32, 0.0, 1)
}
