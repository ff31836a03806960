//! Price providers and the registry that selects one by name.

pub mod binance;
pub mod mock;
pub mod yahoo;

pub use binance::BinanceClient;
pub use mock::MockProvider;
pub use yahoo::YahooFinanceClient;

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::types::{Observation, SampleRequest};
use async_trait::async_trait;
use reqwest::Client;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

/// Fetches one price observation for a scheduled sample.
#[async_trait]
pub trait PriceProvider: Send + Sync {
    /// Registry name of this provider.
    fn name(&self) -> &str;

    /// Fetch the observation closest to `request.timestamp`.
    async fn fetch(&self, request: &SampleRequest) -> Result<Observation>;
}

/// Named price providers, resolved once at startup.
#[derive(Clone, Default)]
pub struct ProviderRegistry {
    providers: HashMap<String, Arc<dyn PriceProvider>>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every built-in provider.
    pub fn with_defaults(config: &Config) -> Self {
        let client = http_client(config.request_timeout_secs);
        let mut registry = Self::new();
        registry.register(Arc::new(BinanceClient::new(
            client.clone(),
            config.api_key.clone(),
        )));
        registry.register(Arc::new(YahooFinanceClient::new(client)));
        registry.register(Arc::new(MockProvider::new()));
        registry
    }

    /// Add or replace a provider under its own name.
    pub fn register(&mut self, provider: Arc<dyn PriceProvider>) {
        self.providers
            .insert(provider.name().to_lowercase(), provider);
    }

    /// Look up a provider by case-insensitive name.
    pub fn resolve(&self, name: &str) -> Result<Arc<dyn PriceProvider>> {
        self.providers
            .get(&name.trim().to_lowercase())
            .cloned()
            .ok_or_else(|| {
                AppError::UnknownProvider(format!(
                    "{} (available: {})",
                    name,
                    self.names().join(", ")
                ))
            })
    }

    /// Registered provider names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.providers.keys().cloned().collect();
        names.sort();
        names
    }
}

fn http_client(timeout_secs: u64) -> Client {
    Client::builder()
        .timeout(Duration::from_secs(timeout_secs.max(1)))
        .user_agent("Trendwatch/1.0")
        .build()
        .unwrap_or_else(|_| Client::new())
}
