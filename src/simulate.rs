//! # Simulated Conditions
//!
//! Last link of the fallback chain, and the source of the estimates that
//! adapters use for fields their tier does not report.
//!
//! ## Ranges
//! - **Wave height**: 0.5 to 3.0 m
//! - **Wave period**: 5.0 to 15.0 s
//! - **Water temperature**: 18.0 to 26.0 °C (Rio's yearly range)
//! - **Wind speed**: 0 to 30.0 km/h
//! - **Wave direction**: seaward quadrants only (Leste, Sudeste, Sul, Sudoeste)
//! - **Wind direction**: any of the eight compass points
//!
//! The random source is injected so tests can pin it with a seed.

use crate::direction::{Cardinal, DIRECTIONS, SEAWARD};
use crate::{round1, Fragment};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::sync::Mutex;

/// Source label of simulated readings.
pub const SOURCE: &str = "Simulated";

/// Shared random source for simulated readings and field estimates.
#[derive(Debug)]
pub struct Simulator {
    rng: Mutex<StdRng>,
}

impl Simulator {
    /// Seed from the operating system.
    pub fn from_entropy() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Reproducible sequence for tests and `--seed`.
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            rng: Mutex::new(rng),
        }
    }

    /// Produce a full, plausible reading. Never fails.
    pub fn simulate(&self) -> Fragment {
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        Fragment {
            wave_height_m: round1(rng.gen_range(0.5..=3.0)),
            wave_direction: pick(&mut *rng, &SEAWARD),
            wave_period_s: round1(rng.gen_range(5.0..=15.0)),
            water_temperature_c: round1(rng.gen_range(18.0..=26.0)),
            wind_speed_kmh: round1(rng.gen_range(0.0..=30.0)),
            wind_direction: pick(&mut *rng, &DIRECTIONS),
            source: SOURCE,
        }
    }

    /// Uniform draw in `low..=high`.
    pub fn uniform(&self, low: f64, high: f64) -> f64 {
        self.rng
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .gen_range(low..=high)
    }

    /// Wave height for providers that only report wind: a 0.5 to 3.0 m draw
    /// scaled by wind speed relative to a 20 km/h breeze.
    pub fn wave_height_from_wind(&self, wind_speed_kmh: f64) -> f64 {
        self.uniform(0.5, 3.0) * (wind_speed_kmh.max(0.0) / 20.0)
    }

    /// Wave period for providers that report none.
    pub fn wave_period(&self) -> f64 {
        self.uniform(5.0, 15.0)
    }

    pub fn seaward_direction(&self) -> Cardinal {
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        pick(&mut *rng, &SEAWARD)
    }
}

fn pick<R: Rng + ?Sized>(rng: &mut R, options: &[Cardinal]) -> Cardinal {
    options.choose(rng).copied().unwrap_or(Cardinal::Sul)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simulated_values_in_range() {
        let sim = Simulator::seeded(7);
        for _ in 0..500 {
            let f = sim.simulate();
            assert!((0.5..=3.0).contains(&f.wave_height_m()));
            assert!((5.0..=15.0).contains(&f.wave_period_s()));
            assert!((18.0..=26.0).contains(&f.water_temperature_c()));
            assert!((0.0..=30.0).contains(&f.wind_speed_kmh()));
            assert!(f.wave_direction().is_seaward());
            assert!(DIRECTIONS.contains(&f.wind_direction()));
            assert_eq!(f.source(), SOURCE);
        }
    }

    #[test]
    fn test_simulated_source_label() {
        assert_eq!(Simulator::seeded(1).simulate().source(), "Simulated");
    }

    #[test]
    fn test_seeded_simulator_is_reproducible() {
        let a = Simulator::seeded(42);
        let b = Simulator::seeded(42);
        for _ in 0..10 {
            assert_eq!(a.simulate(), b.simulate());
        }
    }

    #[test]
    fn test_wave_height_from_wind_scales() {
        let sim = Simulator::seeded(1);
        assert_eq!(sim.wave_height_from_wind(0.0), 0.0);
        for _ in 0..100 {
            let h = sim.wave_height_from_wind(40.0);
            assert!((1.0..=6.0).contains(&h), "height {h} out of range");
        }
    }

    #[test]
    fn test_negative_wind_gives_flat_sea() {
        let sim = Simulator::seeded(3);
        assert_eq!(sim.wave_height_from_wind(-5.0), 0.0);
    }
}
