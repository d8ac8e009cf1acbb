//! # Compass Directions
//!
//! Providers report wind and swell bearings in degrees (0° = from the north,
//! clockwise). Observations carry one of eight Portuguese compass labels
//! instead, matching the beach reports this crate feeds.
//!
//! Bearings are snapped to the nearest 45° sector:
//! `label = DIRECTIONS[round(deg / 45) mod 8]`. Ties round away from zero, so
//! 22.5° is Nordeste and 112.5° is Sudeste, the same for every provider. Bearings outside 0..360 wrap.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the eight compass points.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cardinal {
    Norte,
    Nordeste,
    Leste,
    Sudeste,
    Sul,
    Sudoeste,
    Oeste,
    Noroeste,
}

/// Clockwise from north, one entry per 45° sector.
pub const DIRECTIONS: [Cardinal; 8] = [
    Cardinal::Norte,
    Cardinal::Nordeste,
    Cardinal::Leste,
    Cardinal::Sudeste,
    Cardinal::Sul,
    Cardinal::Sudoeste,
    Cardinal::Oeste,
    Cardinal::Noroeste,
];

/// Directions swell can arrive from on Rio's south-facing beaches.
pub const SEAWARD: [Cardinal; 4] = [
    Cardinal::Leste,
    Cardinal::Sudeste,
    Cardinal::Sul,
    Cardinal::Sudoeste,
];

impl Cardinal {
    /// Snap a bearing in degrees to the nearest compass label.
    ///
    /// Non-finite bearings map to [`Cardinal::Norte`]; adapters reject
    /// non-finite payload values before they get here.
    pub fn from_degrees(degrees: f64) -> Self {
        if !degrees.is_finite() {
            return Cardinal::Norte;
        }
        let sector = (degrees / 45.0).round() as i64;
        DIRECTIONS[sector.rem_euclid(8) as usize]
    }

    pub fn label(self) -> &'static str {
        match self {
            Cardinal::Norte => "Norte",
            Cardinal::Nordeste => "Nordeste",
            Cardinal::Leste => "Leste",
            Cardinal::Sudeste => "Sudeste",
            Cardinal::Sul => "Sul",
            Cardinal::Sudoeste => "Sudoeste",
            Cardinal::Oeste => "Oeste",
            Cardinal::Noroeste => "Noroeste",
        }
    }

    /// Two-letter English abbreviation, used by the compact text report.
    pub fn abbrev(self) -> &'static str {
        match self {
            Cardinal::Norte => "N",
            Cardinal::Nordeste => "NE",
            Cardinal::Leste => "E",
            Cardinal::Sudeste => "SE",
            Cardinal::Sul => "S",
            Cardinal::Sudoeste => "SW",
            Cardinal::Oeste => "W",
            Cardinal::Noroeste => "NW",
        }
    }

    pub fn is_seaward(self) -> bool {
        SEAWARD.contains(&self)
    }
}

impl fmt::Display for Cardinal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
