//! Stormglass point forecast (`/v2/weather/point`).
//!
//! The marine specialist: reports wave height, period and bearing directly.
//! Every parameter is an object keyed by upstream model; the NOAA value is
//! preferred, then Stormglass's own blend. Only the first hourly entry is
//! used, and an empty or missing `hours` array means no data.
//!
//! Authentication uses the raw key in the `Authorization` header.

use super::{credential, endpoint, get_json, Provider, Unavailable, MS_TO_KMH};
use crate::{Cardinal, Coordinates, Fragment, Readings};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

pub const SOURCE: &str = "Stormglass";

const PARAMS: &str = "waveHeight,waveDirection,wavePeriod,waterTemperature,windSpeed,windDirection";
const DEFAULT_WAVE_PERIOD_S: f64 = 8.0;
const DEFAULT_WATER_TEMP_C: f64 = 20.0;

#[derive(Debug, Deserialize)]
pub(crate) struct PointResponse {
    #[serde(default)]
    hours: Vec<Hour>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Hour {
    #[serde(default)]
    wave_height: Option<Sources>,
    #[serde(default)]
    wave_direction: Option<Sources>,
    #[serde(default)]
    wave_period: Option<Sources>,
    #[serde(default)]
    water_temperature: Option<Sources>,
    /// m/s
    #[serde(default)]
    wind_speed: Option<Sources>,
    #[serde(default)]
    wind_direction: Option<Sources>,
}

/// One parameter as reported by each upstream model.
#[derive(Debug, Default, Deserialize)]
struct Sources {
    #[serde(default)]
    noaa: Option<f64>,
    #[serde(default)]
    sg: Option<f64>,
}

impl Sources {
    fn value(&self) -> Option<f64> {
        self.noaa.or(self.sg)
    }
}

fn value_of(param: &Option<Sources>) -> Option<f64> {
    param.as_ref().and_then(Sources::value)
}

#[derive(Debug, Clone)]
pub struct Stormglass {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl Stormglass {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            api_key,
        }
    }
}

#[async_trait]
impl Provider for Stormglass {
    fn source(&self) -> &'static str {
        SOURCE
    }

    async fn fetch(&self, coords: Coordinates) -> Result<Fragment, Unavailable> {
        let key = credential(&self.api_key)?;
        let url = endpoint(&self.base_url, "/v2/weather/point");

        debug!(source = SOURCE, lat = coords.lat, lon = coords.lon, "requesting point forecast");

        let request = self
            .client
            .get(&url)
            .header("Authorization", key)
            .query(&[
                ("lat", coords.lat.to_string()),
                ("lng", coords.lon.to_string()),
                ("params", PARAMS.to_string()),
            ]);
        let payload: PointResponse = get_json(SOURCE, request).await?;
        normalize(&payload)
    }
}

pub(crate) fn normalize(payload: &PointResponse) -> Result<Fragment, Unavailable> {
    let hour = payload
        .hours
        .first()
        .ok_or_else(|| Unavailable::Malformed("empty hours".to_string()))?;

    let wave_height_m = value_of(&hour.wave_height)
        .ok_or_else(|| Unavailable::Malformed("missing waveHeight".to_string()))?;
    let speed_ms = value_of(&hour.wind_speed)
        .ok_or_else(|| Unavailable::Malformed("missing windSpeed".to_string()))?;

    let readings = Readings {
        wave_height_m,
        wave_direction: Cardinal::from_degrees(value_of(&hour.wave_direction).unwrap_or(0.0)),
        wave_period_s: value_of(&hour.wave_period).unwrap_or(DEFAULT_WAVE_PERIOD_S),
        water_temperature_c: value_of(&hour.water_temperature).unwrap_or(DEFAULT_WATER_TEMP_C),
        wind_speed_kmh: speed_ms * MS_TO_KMH,
        wind_direction: Cardinal::from_degrees(value_of(&hour.wind_direction).unwrap_or(0.0)),
    };
    Ok(Fragment::new(readings, SOURCE)?)
}
