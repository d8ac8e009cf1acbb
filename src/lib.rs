//! # Wave Tracker Core Library
//!
//! This library reports sea-wave and wind conditions for a small, fixed set of
//! Rio de Janeiro beaches. Every lookup produces a fully populated
//! [`Observation`], even when every upstream provider is down.
//!
//! ## Design Philosophy
//!
//! ### Always Answer
//! - **Fixed priority chain**: OpenWeatherMap current weather, then OpenWeatherMap
//!   One Call, then Stormglass. The first provider with usable data wins.
//! - **Simulated floor**: when all providers are unavailable the chain falls back
//!   to a randomized but plausible reading, labelled `"Simulated"`.
//! - **No partial data**: an adapter either produces a complete [`Fragment`] or
//!   reports [`providers::Unavailable`] with a typed reason.
//!
//! ### Bounded Upstream Traffic
//! Observations are cached per location for one hour, measured from the moment
//! the observation was created. Concurrent lookups of the same stale location
//! share a single refresh.
//!
//! ### Data Flow
//! 1. **Lookup**: caller resolves a beach name in the [`locations::Directory`]
//! 2. **Cache**: fresh entry → return as is
//! 3. **Chain**: stale or missing → adapters in order → simulation as last resort
//! 4. **Store**: new observation overwrites the entry for that beach
//!
//! ## Core Types
//! - [`Coordinates`] and [`Location`]: where to look
//! - [`Fragment`]: an adapter's normalized, not yet timestamped reading
//! - [`Observation`]: a timestamped reading for one location

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// Module declarations
pub mod cache;
pub mod chain;
pub mod clock;
pub mod config;
pub mod direction;
pub mod locations;
pub mod providers;
pub mod renderer;
pub mod service;
pub mod simulate;

#[cfg(test)]
mod tests;

pub use direction::Cardinal;

/// Geographic position of a beach, in decimal degrees.
///
/// # Example
/// ```
/// use wave_tracker_lib::Coordinates;
///
/// let copacabana = Coordinates { lat: -22.9714, lon: -43.1823 };
/// assert!(copacabana.lat < 0.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    /// Latitude (negative = south)
    pub lat: f64,
    /// Longitude (negative = west)
    pub lon: f64,
}

/// A named coastal location, the unit of observation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    #[serde(flatten)]
    pub coords: Coordinates,
}

impl Location {
    pub fn new(name: impl Into<String>, lat: f64, lon: f64) -> Self {
        Self {
            name: name.into(),
            coords: Coordinates { lat, lon },
        }
    }
}

/// Normalized reading produced by a single data source.
///
/// Fields are only reachable through [`Fragment::new`], which rejects
/// non-finite numbers, negative heights or speeds, and non-positive periods.
/// All numeric values are rounded to one decimal place.
#[derive(Clone, Debug, PartialEq)]
pub struct Fragment {
    wave_height_m: f64,
    wave_direction: Cardinal,
    wave_period_s: f64,
    water_temperature_c: f64,
    wind_speed_kmh: f64,
    wind_direction: Cardinal,
    source: &'static str,
}

/// Raw measurements handed to [`Fragment::new`].
#[derive(Clone, Copy, Debug)]
pub struct Readings {
    pub wave_height_m: f64,
    pub wave_direction: Cardinal,
    pub wave_period_s: f64,
    pub water_temperature_c: f64,
    pub wind_speed_kmh: f64,
    pub wind_direction: Cardinal,
}

/// Reason a set of [`Readings`] could not become a [`Fragment`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{field} out of range: {value}")]
pub struct InvalidReading {
    pub field: &'static str,
    pub value: f64,
}

impl Fragment {
    pub fn new(readings: Readings, source: &'static str) -> Result<Self, InvalidReading> {
        let Readings {
            wave_height_m,
            wave_direction,
            wave_period_s,
            water_temperature_c,
            wind_speed_kmh,
            wind_direction,
        } = readings;

        // Checked after rounding so a 0.04 s period cannot become 0.0.
        Ok(Self {
            wave_height_m: check("wave_height_m", wave_height_m, |v| v >= 0.0)?,
            wave_direction,
            wave_period_s: check("wave_period_s", wave_period_s, |v| v > 0.0)?,
            water_temperature_c: check("water_temperature_c", water_temperature_c, |_| true)?,
            wind_speed_kmh: check("wind_speed_kmh", wind_speed_kmh, |v| v >= 0.0)?,
            wind_direction,
            source,
        })
    }

    /// Label of the provider (or simulator) that produced this fragment.
    pub fn source(&self) -> &'static str {
        self.source
    }

    pub fn wave_height_m(&self) -> f64 {
        self.wave_height_m
    }

    pub fn wave_direction(&self) -> Cardinal {
        self.wave_direction
    }

    pub fn wave_period_s(&self) -> f64 {
        self.wave_period_s
    }

    pub fn water_temperature_c(&self) -> f64 {
        self.water_temperature_c
    }

    pub fn wind_speed_kmh(&self) -> f64 {
        self.wind_speed_kmh
    }

    pub fn wind_direction(&self) -> Cardinal {
        self.wind_direction
    }

    /// Stamp this fragment for `location` at `timestamp`.
    pub fn into_observation(self, location: &str, timestamp: DateTime<Utc>) -> Observation {
        Observation {
            location: location.to_string(),
            wave_height_m: self.wave_height_m,
            wave_direction: self.wave_direction,
            wave_period_s: self.wave_period_s,
            water_temperature_c: self.water_temperature_c,
            wind_speed_kmh: self.wind_speed_kmh,
            wind_direction: self.wind_direction,
            timestamp,
            source: self.source.to_string(),
        }
    }
}

fn check(field: &'static str, value: f64, ok: impl Fn(f64) -> bool) -> Result<f64, InvalidReading> {
    let rounded = round1(value);
    if rounded.is_finite() && ok(rounded) {
        // -0.0 would print as "-0.0" in reports
        Ok(rounded + 0.0)
    } else {
        Err(InvalidReading { field, value })
    }
}

/// Round to one decimal place, halves away from zero.
pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Sea and wind conditions for one beach at one point in time.
///
/// `timestamp` is the creation time of the reading; the cache measures
/// freshness from it, never from the time of last access.
///
/// # Example
/// ```
/// use chrono::Utc;
/// use wave_tracker_lib::{Cardinal, Fragment, Readings};
///
/// let fragment = Fragment::new(
///     Readings {
///         wave_height_m: 1.24,
///         wave_direction: Cardinal::Sul,
///         wave_period_s: 9.0,
///         water_temperature_c: 22.5,
///         wind_speed_kmh: 12.0,
///         wind_direction: Cardinal::Leste,
///     },
///     "Stormglass",
/// )
/// .unwrap();
///
/// let obs = fragment.into_observation("Ipanema", Utc::now());
/// assert_eq!(obs.wave_height_m, 1.2);
/// assert_eq!(obs.source, "Stormglass");
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Beach name as listed in the directory
    pub location: String,
    /// Significant wave height in meters
    pub wave_height_m: f64,
    /// Direction the swell comes from
    pub wave_direction: Cardinal,
    /// Wave period in seconds
    pub wave_period_s: f64,
    /// Sea surface temperature in °C
    pub water_temperature_c: f64,
    /// Wind speed in km/h
    pub wind_speed_kmh: f64,
    /// Direction the wind blows from
    pub wind_direction: Cardinal,
    /// Creation time of this reading
    pub timestamp: DateTime<Utc>,
    /// Provider label, or `"Simulated"`
    pub source: String,
}

impl Observation {
    /// True if all numeric fields are finite and within their physical ranges.
    pub fn is_well_formed(&self) -> bool {
        [
            self.wave_height_m,
            self.wave_period_s,
            self.water_temperature_c,
            self.wind_speed_kmh,
        ]
        .iter()
        .all(|v| v.is_finite())
            && self.wave_height_m >= 0.0
            && self.wave_period_s > 0.0
            && self.wind_speed_kmh >= 0.0
    }
}
