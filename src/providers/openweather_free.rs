//! OpenWeatherMap current weather (`/data/2.5/weather`), free tier.
//!
//! Reports air temperature and wind only. Water temperature is taken as two
//! degrees below air temperature; wave height, period and direction are
//! estimated from the shared random source.

use super::{credential, endpoint, get_json, Provider, Unavailable, MS_TO_KMH};
use crate::simulate::Simulator;
use crate::{Cardinal, Coordinates, Fragment, Readings};
use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;
use tracing::debug;

pub const SOURCE: &str = "OpenWeatherMap Free";

/// Coastal water runs cooler than the air above it.
const WATER_BELOW_AIR_C: f64 = 2.0;

#[derive(Debug, Deserialize)]
pub(crate) struct CurrentWeatherResponse {
    #[serde(default)]
    wind: Option<Wind>,
    #[serde(default)]
    main: Option<Main>,
}

#[derive(Debug, Deserialize)]
struct Wind {
    /// m/s with `units=metric`
    speed: Option<f64>,
    deg: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct Main {
    temp: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct OpenWeatherFree {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    estimates: Arc<Simulator>,
}

impl OpenWeatherFree {
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
impl Provider for OpenWeatherFree {
    fn source(&self) -> &'static str {
        SOURCE
    }

    async fn fetch(&self, coords: Coordinates) -> Result<Fragment, Unavailable> {
        let key = credential(&self.api_key)?;
        let url = endpoint(&self.base_url, "/data/2.5/weather");

        debug!(source = SOURCE, lat = coords.lat, lon = coords.lon, "requesting current weather");

        let request = self.client.get(&url).query(&[
            ("lat", coords.lat.to_string()),
            ("lon", coords.lon.to_string()),
            ("appid", key.to_string()),
            ("units", "metric".to_string()),
        ]);
        let payload: CurrentWeatherResponse = get_json(SOURCE, request).await?;
        normalize(&payload, &self.estimates)
    }
}

pub(crate) fn normalize(
    payload: &CurrentWeatherResponse,
    estimates: &Simulator,
) -> Result<Fragment, Unavailable> {
    let wind = payload
        .wind
        .as_ref()
        .ok_or_else(|| Unavailable::Malformed("missing wind".to_string()))?;
    let speed_ms = wind
        .speed
        .ok_or_else(|| Unavailable::Malformed("missing wind.speed".to_string()))?;
    let air_temp = payload
        .main
        .as_ref()
        .and_then(|m| m.temp)
        .ok_or_else(|| Unavailable::Malformed("missing main.temp".to_string()))?;

    // Calm wind is reported without a bearing.
    let wind_direction = Cardinal::from_degrees(wind.deg.unwrap_or(0.0));
    let wind_speed_kmh = speed_ms * MS_TO_KMH;

    let readings = Readings {
        wave_height_m: estimates.wave_height_from_wind(wind_speed_kmh),
        wave_direction: estimates.seaward_direction(),
        wave_period_s: estimates.wave_period(),
        water_temperature_c: air_temp - WATER_BELOW_AIR_C,
        wind_speed_kmh,
        wind_direction,
    };
    Ok(Fragment::new(readings, SOURCE)?)
}
