//! Simulated prices for offline runs, tests, and as a stand-in when a real
//! provider fails.

use super::PriceProvider;
use crate::error::Result;
use crate::types::{Observation, SampleRequest};
use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Mutex;

const BASE_PRICE: f64 = 50_000.0;
const PRICE_VARIATION: f64 = 1_000.0;
const CLOSE_VARIATION: f64 = 100.0;

/// Price simulator scattered around a fixed base price.
pub struct MockProvider {
    rng: Mutex<StdRng>,
}

impl MockProvider {
    /// Provider seeded from system entropy.
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Provider producing the same sequence for the same seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    /// Generate a simulated observation for `request`.
    pub fn simulate(&self, request: &SampleRequest) -> Observation {
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());

        let price = BASE_PRICE + rng.gen_range(-PRICE_VARIATION..=PRICE_VARIATION);
        let close = price + rng.gen_range(-CLOSE_VARIATION..=CLOSE_VARIATION);
        let volume = rng.gen_range(1_000_000u64..=10_000_000) as f64;

        Observation {
            timestamp: request.timestamp,
            open: price,
            high: price * 1.002,
            low: price * 0.998,
            close,
            volume,
        }
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PriceProvider for MockProvider {
    fn name(&self) -> &str {
        "mock"
    }

    async fn fetch(&self, request: &SampleRequest) -> Result<Observation> {
        Ok(self.simulate(request))
    }
}
