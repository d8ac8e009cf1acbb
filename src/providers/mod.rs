//! # Upstream Data Providers
//!
//! Each provider turns one HTTP call into a normalized [`Fragment`] or a typed
//! [`Unavailable`] reason. Providers never retry and never panic: any
//! transport failure, rejected status, missing credential or incomplete
//! payload becomes `Unavailable`, and the fallback chain moves on.
//!
//! ## Providers, in priority order
//! 1. [`OpenWeatherFree`]: current weather, wave metrics estimated from wind
//! 2. [`OpenWeatherOneCall`]: current conditions, wave metrics when reported
//! 3. [`Stormglass`]: marine forecast, first hourly entry
//!
//! ## Units
//! - Speeds arrive in m/s and are converted to km/h (× 3.6)
//! - Bearings arrive in degrees and become [`crate::Cardinal`] labels

mod openweather_free;
mod openweather_onecall;
mod stormglass;

pub use openweather_free::OpenWeatherFree;
pub use openweather_onecall::OpenWeatherOneCall;
pub use stormglass::Stormglass;

use crate::config::HttpConfig;
use crate::{Coordinates, Fragment, InvalidReading};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// m/s → km/h
pub const MS_TO_KMH: f64 = 3.6;

/// Why a provider produced no data for this attempt.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Unavailable {
    /// No API key configured; no request was made
    #[error("credential missing")]
    MissingCredential,

    /// Request could not complete (DNS, connect, timeout, body read)
    #[error("transport error: {0}")]
    Transport(String),

    /// Upstream answered with a non-success status
    #[error("upstream rejected request with status {0}")]
    Rejected(u16),

    /// Body parsed badly, or required fields were absent or out of range
    #[error("malformed payload: {0}")]
    Malformed(String),
}

impl From<InvalidReading> for Unavailable {
    fn from(err: InvalidReading) -> Self {
        Unavailable::Malformed(err.to_string())
    }
}

/// A single upstream marine or weather data source.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Label stamped on observations from this provider.
    fn source(&self) -> &'static str;

    /// Fetch current conditions at `coords`. One request, no retries.
    async fn fetch(&self, coords: Coordinates) -> Result<Fragment, Unavailable>;
}

/// Build the HTTP client shared by every provider.
pub fn build_client(config: &HttpConfig) -> Result<reqwest::Client, reqwest::Error> {
    let mut builder = reqwest::Client::builder()
        .user_agent(config.user_agent.clone())
        .pool_max_idle_per_host(4);
    if config.timeout_secs > 0 {
        builder = builder.timeout(Duration::from_secs(config.timeout_secs));
    }
    builder.build()
}

/// Send `request` and decode a JSON body, mapping every failure onto
/// [`Unavailable`].
pub(crate) async fn get_json<T: DeserializeOwned>(
    source: &'static str,
    request: reqwest::RequestBuilder,
) -> Result<T, Unavailable> {
    let resp = request
        .send()
        .await
        .map_err(|e| Unavailable::Transport(e.without_url().to_string()))?;

    let status = resp.status();
    if !status.is_success() {
        let body: String = resp.text().await.unwrap_or_default().chars().take(200).collect();
        debug!(
            source,
            status = status.as_u16(),
            body = body.as_str(),
            "provider rejected request"
        );
        return Err(Unavailable::Rejected(status.as_u16()));
    }

    let bytes = resp
        .bytes()
        .await
        .map_err(|e| Unavailable::Transport(e.without_url().to_string()))?;

    serde_json::from_slice(&bytes).map_err(|e| Unavailable::Malformed(e.to_string()))
}

/// Join a configured base URL and an API path.
pub(crate) fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), path)
}

/// Treat empty strings as an absent credential.
pub(crate) fn credential(key: &Option<String>) -> Result<&str, Unavailable> {
    match key.as_deref().map(str::trim) {
        Some(k) if !k.is_empty() => Ok(k),
        _ => Err(Unavailable::MissingCredential),
    }
}
