//! # Fallback Chain
//!
//! Tries providers one at a time in a fixed priority order and stamps the
//! first usable fragment. When every provider is unavailable the simulator
//! supplies the reading, so resolution never fails.
//!
//! Attempts are strictly sequential: a later provider is only contacted after
//! every earlier one has reported [`Unavailable`].

use crate::clock::Clock;
use crate::config::{Config, Credentials};
use crate::providers::{
    build_client, OpenWeatherFree, OpenWeatherOneCall, Provider, Stormglass, Unavailable,
};
use crate::simulate::Simulator;
use crate::{Location, Observation};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// One provider that was tried and had nothing to offer.
#[derive(Debug, Clone, PartialEq)]
pub struct FailedAttempt {
    pub source: &'static str,
    pub reason: Unavailable,
}

/// Result of one pass through the chain, with the providers that were skipped.
#[derive(Debug, Clone)]
pub struct Resolution {
    pub observation: Observation,
    pub failures: Vec<FailedAttempt>,
}

pub struct FallbackChain {
    providers: Vec<Arc<dyn Provider>>,
    simulator: Arc<Simulator>,
    clock: Arc<dyn Clock>,
}

impl FallbackChain {
    /// Chain over `providers`, tried in the given order.
    pub fn new(
        providers: Vec<Arc<dyn Provider>>,
        simulator: Arc<Simulator>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            providers,
            simulator,
            clock,
        }
    }

    /// The production chain: OpenWeatherMap free tier, OpenWeatherMap One Call,
    /// then Stormglass, all sharing one HTTP client.
    pub fn from_config(
        config: &Config,
        credentials: &Credentials,
        simulator: Arc<Simulator>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, reqwest::Error> {
        let client = build_client(&config.http)?;
        let providers: Vec<Arc<dyn Provider>> = vec![
            Arc::new(OpenWeatherFree::new(
                client.clone(),
                config.providers.openweather_base_url.clone(),
                credentials.openweather.clone(),
                simulator.clone(),
            )),
            Arc::new(OpenWeatherOneCall::new(
                client.clone(),
                config.providers.openweather_base_url.clone(),
                credentials.openweather.clone(),
                simulator.clone(),
            )),
            Arc::new(Stormglass::new(
                client,
                config.providers.stormglass_base_url.clone(),
                credentials.stormglass.clone(),
            )),
        ];
        Ok(Self::new(providers, simulator, clock))
    }

    /// Provider labels in the order they are tried.
    pub fn sources(&self) -> Vec<&'static str> {
        self.providers.iter().map(|p| p.source()).collect()
    }

    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    /// Conditions at `location` from the best available source.
    pub async fn resolve(&self, location: &Location) -> Observation {
        self.resolve_detailed(location).await.observation
    }

    /// Like [`resolve`](Self::resolve), also reporting why each skipped
    /// provider was unavailable.
    pub async fn resolve_detailed(&self, location: &Location) -> Resolution {
        let mut failures = Vec::new();

        for provider in &self.providers {
            match provider.fetch(location.coords).await {
                Ok(fragment) => {
                    info!(
                        location = %location.name,
                        source = fragment.source(),
                        skipped = failures.len(),
                        "resolved conditions"
                    );
                    return Resolution {
                        observation: fragment.into_observation(&location.name, self.clock.now()),
                        failures,
                    };
                }
                Err(reason) => {
                    if reason == Unavailable::MissingCredential {
                        debug!(location = %location.name, source = provider.source(), "provider not configured");
                    } else {
                        warn!(
                            location = %location.name,
                            source = provider.source(),
                            reason = %reason,
                            "provider unavailable, trying next"
                        );
                    }
                    failures.push(FailedAttempt {
                        source: provider.source(),
                        reason,
                    });
                }
            }
        }

        warn!(location = %location.name, "all providers unavailable, using simulated conditions");
        let fragment = self.simulator.simulate();
        Resolution {
            observation: fragment.into_observation(&location.name, self.clock.now()),
            failures,
        }
    }
}

impl std::fmt::Debug for FallbackChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FallbackChain")
            .field("providers", &self.sources())
            .finish()
    }
}
