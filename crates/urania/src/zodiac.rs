//! Zodiac sign helpers.
//!
//! Maps longitudes to the twelve 30° sign buckets and derives the aspect a
//! pair of signs "should" form, which is what out-of-sign detection compares
//! against.

use crate::aspects::AspectKind;

pub const SIGN_NAMES: [&str; 12] = [
    "Aries",
    "Taurus",
    "Gemini",
    "Cancer",
    "Leo",
    "Virgo",
    "Libra",
    "Scorpio",
    "Sagittarius",
    "Capricorn",
    "Aquarius",
    "Pisces",
];

/// Normalize degrees to [0, 360).
pub fn normalize_degrees(value: f64) -> f64 {
    let normalized = value.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if normalized >= 360.0 {
        0.0
    } else {
        normalized
    }
}

/// Get sign index (0-11) from longitude
pub fn sign_index(longitude: f64) -> u8 {
    let normalized = normalize_degrees(longitude);
    ((normalized / 30.0).floor() as u8) % 12
}

/// Get sign name from index
pub fn sign_name(index: u8) -> &'static str {
    SIGN_NAMES[(index % 12) as usize]
}

/// Get sign name from longitude
pub fn sign_name_from_longitude(longitude: f64) -> &'static str {
    sign_name(sign_index(longitude))
}

/// The aspect implied purely by how many signs apart two bodies sit.
pub fn expected_aspect(sign_a: u8, sign_b: u8) -> Option<AspectKind> {
    let diff = (i16::from(sign_a) - i16::from(sign_b)).abs() % 12;
    match diff {
        0 => Some(AspectKind::Conjunction),
        2 | 10 => Some(AspectKind::Sextile),
        3 | 9 => Some(AspectKind::Square),
        4 | 8 => Some(AspectKind::Trine),
        6 => Some(AspectKind::Opposition),
        _ => None,
    }
}

/// Whether `found` disagrees with the aspect implied by the two signs.
pub fn is_out_of_sign(found: AspectKind, sign_a: u8, sign_b: u8) -> bool {
    expected_aspect(sign_a, sign_b) != Some(found)
}
