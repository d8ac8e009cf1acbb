//! Entry point for callers: looks beach names up in the directory and serves
//! observations through the cache.

use crate::cache::ObservationCache;
use crate::chain::FallbackChain;
use crate::clock::{Clock, SystemClock};
use crate::config::{Config, Credentials};
use crate::locations::Directory;
use crate::simulate::Simulator;
use crate::Observation;
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ServiceError {
    /// Name is not in the directory
    #[error("location '{0}' not found or has no beach")]
    NotFound(String),
}

#[derive(Debug)]
pub struct WaveService {
    directory: Directory,
    cache: ObservationCache,
}

impl WaveService {
    pub fn new(directory: Directory, cache: ObservationCache) -> Self {
        Self { directory, cache }
    }

    /// Production wiring: configured providers, wall clock, configured window.
    pub fn from_config(
        config: &Config,
        credentials: &Credentials,
        simulator: Arc<Simulator>,
    ) -> Result<Self, reqwest::Error> {
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);
        let chain = FallbackChain::from_config(config, credentials, simulator, clock)?;
        Ok(Self::new(
            config.directory(),
            ObservationCache::new(chain, config.freshness()),
        ))
    }

    pub fn directory(&self) -> &Directory {
        &self.directory
    }

    pub fn cache(&self) -> &ObservationCache {
        &self.cache
    }

    /// Current conditions at the beach called `name`.
    pub async fn report(&self, name: &str) -> Result<Observation, ServiceError> {
        let location = self
            .directory
            .get(name)
            .ok_or_else(|| ServiceError::NotFound(name.to_string()))?;
        Ok(self.cache.get(location).await)
    }

    /// Current conditions at every beach, in directory order.
    pub async fn report_all(&self) -> Vec<Observation> {
        self.cache.get_all(self.directory.as_slice()).await
    }
}
