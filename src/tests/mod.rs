//! # Test Suite for the Fallback Chain and Cache
//!
//! Scripted providers and a manual clock make every scenario deterministic:
//! no network, no wall-clock waits.

mod chain_tests;

use crate::chain::FallbackChain;
use crate::clock::{Clock, ManualClock};
use crate::providers::{Provider, Unavailable};
use crate::simulate::Simulator;
use crate::{Cardinal, Coordinates, Fragment, Location, Readings};
use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Provider that returns a fixed outcome and counts how often it was asked.
pub(crate) struct ScriptedProvider {
    source: &'static str,
    outcome: Result<Fragment, Unavailable>,
    delay: Option<Duration>,
    calls: AtomicUsize,
}

impl ScriptedProvider {
    pub(crate) fn succeeding(source: &'static str) -> Arc<Self> {
        Arc::new(Self {
            source,
            outcome: Ok(fragment(source)),
            delay: None,
            calls: AtomicUsize::new(0),
        })
    }

    pub(crate) fn failing(source: &'static str, reason: Unavailable) -> Arc<Self> {
        Arc::new(Self {
            source,
            outcome: Err(reason),
            delay: None,
            calls: AtomicUsize::new(0),
        })
    }

    /// Succeeds after sleeping, to widen race windows.
    pub(crate) fn slow(source: &'static str, delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            source,
            outcome: Ok(fragment(source)),
            delay: Some(delay),
            calls: AtomicUsize::new(0),
        })
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Provider for ScriptedProvider {
    fn source(&self) -> &'static str {
        self.source
    }

    async fn fetch(&self, _coords: Coordinates) -> Result<Fragment, Unavailable> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.outcome.clone()
    }
}

pub(crate) fn fragment(source: &'static str) -> Fragment {
    Fragment::new(
        Readings {
            wave_height_m: 1.4,
            wave_direction: Cardinal::Sul,
            wave_period_s: 10.0,
            water_temperature_c: 23.0,
            wind_speed_kmh: 14.4,
            wind_direction: Cardinal::Sudeste,
        },
        source,
    )
    .expect("test readings are valid")
}

pub(crate) fn start_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 10, 12, 0, 0).unwrap()
}

pub(crate) fn copacabana() -> Location {
    Location::new("Copacabana", -22.9714, -43.1823)
}

/// Chain over scripted providers with a seeded simulator and shared clock.
pub(crate) fn chain_with(
    providers: &[Arc<ScriptedProvider>],
    clock: Arc<ManualClock>,
) -> FallbackChain {
    let providers: Vec<Arc<dyn Provider>> = providers
        .iter()
        .map(|p| p.clone() as Arc<dyn Provider>)
        .collect();
    let clock: Arc<dyn Clock> = clock;
    FallbackChain::new(providers, Arc::new(Simulator::seeded(99)), clock)
}
