//! # Observation Cache
//!
//! Keeps the latest observation per location and serves it until it is older
//! than the freshness window (one hour by default). Age is measured from the
//! observation's own timestamp, so repeated hits never extend its life.
//!
//! ## Concurrency
//! Each location has its own async refresh lock, held across the freshness
//! check, the fallback chain and the write. Concurrent lookups of the same
//! stale location therefore trigger a single upstream resolution; the others
//! wait and receive the fresh entry. Different locations never block each
//! other.
//!
//! The committed observation sits beside the lock, so [`ObservationCache::peek`]
//! and [`ObservationCache::len`] see the last stored value even mid-refresh.
//!
//! Entries are never evicted, only overwritten.

use crate::chain::FallbackChain;
use crate::{Location, Observation};
use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use std::sync::{Arc, RwLock};
use tokio::sync::Mutex;
use tracing::debug;

#[derive(Default)]
struct Slot {
    refresh: Mutex<()>,
    committed: RwLock<Option<Observation>>,
}

impl Slot {
    fn load(&self) -> Option<Observation> {
        self.committed
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    fn store(&self, observation: Observation) {
        *self.committed.write().unwrap_or_else(|e| e.into_inner()) = Some(observation);
    }

    fn is_filled(&self) -> bool {
        self.committed
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .is_some()
    }
}

pub struct ObservationCache {
    chain: FallbackChain,
    entries: DashMap<String, Arc<Slot>>,
    window: Duration,
}

impl ObservationCache {
    pub fn new(chain: FallbackChain, window: Duration) -> Self {
        Self {
            chain,
            entries: DashMap::new(),
            window,
        }
    }

    fn slot(&self, name: &str) -> Arc<Slot> {
        // Clone the Arc so the map shard is unlocked before any await.
        self.entries.entry(name.to_string()).or_default().clone()
    }

    fn is_fresh(&self, observation: &Observation, now: DateTime<Utc>) -> bool {
        now.signed_duration_since(observation.timestamp) < self.window
    }

    /// Cached observation for `location` if fresh, otherwise a new one from
    /// the fallback chain, which replaces the entry.
    pub async fn get(&self, location: &Location) -> Observation {
        let slot = self.slot(&location.name);
        let _refresh = slot.refresh.lock().await;

        if let Some(cached) = slot.load() {
            if self.is_fresh(&cached, self.chain.clock().now()) {
                debug!(location = %location.name, source = %cached.source, "cache hit");
                return cached;
            }
            debug!(location = %location.name, "cache entry stale");
        }

        let observation = self.chain.resolve(location).await;
        slot.store(observation.clone());
        observation
    }

    /// [`get`](Self::get) for each location in order; one observation per
    /// location.
    pub async fn get_all(&self, locations: &[Location]) -> Vec<Observation> {
        let mut observations = Vec::with_capacity(locations.len());
        for location in locations {
            observations.push(self.get(location).await);
        }
        observations
    }

    /// Last stored observation for `name`, fresh or not, without contacting
    /// any provider. A refresh in flight does not hide the previous value.
    pub fn peek(&self, name: &str) -> Option<Observation> {
        self.entries.get(name)?.value().load()
    }

    /// Store `observation` under its location, replacing any previous entry.
    pub async fn put(&self, observation: Observation) {
        let slot = self.slot(&observation.location);
        let _refresh = slot.refresh.lock().await;
        slot.store(observation);
    }

    /// Number of locations holding a stored observation.
    pub fn len(&self) -> usize {
        self.entries.iter().filter(|e| e.value().is_filled()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl std::fmt::Debug for ObservationCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObservationCache")
            .field("chain", &self.chain)
            .field("entries", &self.len())
            .field("window", &self.window)
            .finish()
    }
}
