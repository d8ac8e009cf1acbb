//! OpenWeatherMap One Call (`/data/3.0/onecall`), current block only.
//!
//! Richer than the free endpoint: wave height, period and bearing are used
//! when the payload carries them. Missing wave height is estimated from wind,
//! missing period defaults to 8 s, and missing wave bearing follows the wind.

use super::{credential, endpoint, get_json, Provider, Unavailable, MS_TO_KMH};
use crate::simulate::Simulator;
use crate::{Cardinal, Coordinates, Fragment, Readings};
use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;
use tracing::debug;

pub const SOURCE: &str = "OpenWeatherMap OneCall";

const DEFAULT_WAVE_PERIOD_S: f64 = 8.0;

#[derive(Debug, Deserialize)]
pub(crate) struct OneCallResponse {
    #[serde(default)]
    current: Option<Current>,
}

#[derive(Debug, Deserialize)]
struct Current {
    temp: Option<f64>,
    /// m/s with `units=metric`
    wind_speed: Option<f64>,
    wind_deg: Option<f64>,
    #[serde(default)]
    wave_height: Option<f64>,
    #[serde(default)]
    wave_period: Option<f64>,
    #[serde(default)]
    wave_deg: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct OpenWeatherOneCall {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    estimates: Arc<Simulator>,
}

impl OpenWeatherOneCall {
    pub fn new(
        client: reqwest::Client,
        base_url: impl Into<String>,
        api_key: Option<String>,
        estimates: Arc<Simulator>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            api_key,
            estimates,
        }
    }
}

#[async_trait]
impl Provider for OpenWeatherOneCall {
    fn source(&self) -> &'static str {
        SOURCE
    }

    async fn fetch(&self, coords: Coordinates) -> Result<Fragment, Unavailable> {
        let key = credential(&self.api_key)?;
        let url = endpoint(&self.base_url, "/data/3.0/onecall");

        debug!(source = SOURCE, lat = coords.lat, lon = coords.lon, "requesting one call");

        let request = self.client.get(&url).query(&[
            ("lat", coords.lat.to_string()),
            ("lon", coords.lon.to_string()),
            ("exclude", "minutely,hourly,daily,alerts".to_string()),
            ("appid", key.to_string()),
            ("units", "metric".to_string()),
        ]);
        let payload: OneCallResponse = get_json(SOURCE, request).await?;
        normalize(&payload, &self.estimates)
    }
}

pub(crate) fn normalize(
    payload: &OneCallResponse,
    estimates: &Simulator,
) -> Result<Fragment, Unavailable> {
    let current = payload
        .current
        .as_ref()
        .ok_or_else(|| Unavailable::Malformed("missing current".to_string()))?;
    let speed_ms = current
        .wind_speed
        .ok_or_else(|| Unavailable::Malformed("missing current.wind_speed".to_string()))?;
    let temp = current
        .temp
        .ok_or_else(|| Unavailable::Malformed("missing current.temp".to_string()))?;

    let wind_direction = Cardinal::from_degrees(current.wind_deg.unwrap_or(0.0));
    let wind_speed_kmh = speed_ms * MS_TO_KMH;

    let wave_height_m = current
        .wave_height
        .unwrap_or_else(|| estimates.wave_height_from_wind(wind_speed_kmh));
    let wave_direction = current
        .wave_deg
        .map(Cardinal::from_degrees)
        .unwrap_or(wind_direction);

    let readings = Readings {
        wave_height_m,
        wave_direction,
        wave_period_s: current.wave_period.unwrap_or(DEFAULT_WAVE_PERIOD_S),
        water_temperature_c: temp,
        wind_speed_kmh,
        wind_direction,
    };
    Ok(Fragment::new(readings, SOURCE)?)
}
