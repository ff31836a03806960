//! Yahoo Finance API client for intraday stock data.
//!
//! Returns the 1-minute bar starting at each sample instant.
//! Uses the unofficial chart API, which only keeps recent minute bars.

use super::PriceProvider;
use crate::error::{AppError, Result};
use crate::types::{Observation, SampleRequest};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

const YAHOO_CHART_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart";

/// Yahoo Finance chart response.
#[derive(Debug, Deserialize)]
struct YahooChartResponse {
    chart: YahooChart,
}

#[derive(Debug, Deserialize)]
struct YahooChart {
    result: Option<Vec<YahooResult>>,
    error: Option<YahooError>,
}

#[derive(Debug, Deserialize)]
struct YahooError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct YahooResult {
    timestamp: Option<Vec<i64>>,
    indicators: YahooIndicators,
}

#[derive(Debug, Deserialize)]
struct YahooIndicators {
    quote: Vec<YahooQuote>,
}

#[derive(Debug, Deserialize)]
struct YahooQuote {
    open: Option<Vec<Option<f64>>>,
    high: Option<Vec<Option<f64>>>,
    low: Option<Vec<Option<f64>>>,
    close: Option<Vec<Option<f64>>>,
    volume: Option<Vec<Option<u64>>>,
}

/// Normalize symbol for Yahoo Finance API.
/// Yahoo uses hyphens instead of dots for share classes (e.g., BRK-B not BRK.B)
fn normalize_yahoo_symbol(symbol: &str) -> String {
    symbol.to_uppercase().replace('.', "-")
}

/// Yahoo Finance API client.
pub struct YahooFinanceClient {
    client: Client,
}

impl YahooFinanceClient {
    /// Create a new Yahoo Finance client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PriceProvider for YahooFinanceClient {
    fn name(&self) -> &str {
        "yahoo"
    }

    async fn fetch(&self, request: &SampleRequest) -> Result<Observation> {
        let period1 = request.timestamp.timestamp();
        let url = format!(
            "{}/{}?period1={}&period2={}&interval=1m&includePrePost=false",
            YAHOO_CHART_URL,
            normalize_yahoo_symbol(&request.symbol),
            period1,
            period1 + 60
        );

        debug!("Fetching Yahoo Finance data: {}", url);

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(AppError::ExternalApi(format!(
                "Yahoo API error: {}",
                response.status()
            )));
        }

        let data: YahooChartResponse = response.json().await?;
        first_observation(data, request)
    }
}

/// First valid bar of a chart response, stamped with the scheduled instant.
fn first_observation(data: YahooChartResponse, request: &SampleRequest) -> Result<Observation> {
    if let Some(error) = data.chart.error {
        return Err(AppError::ExternalApi(format!(
            "Yahoo API error: {} - {}",
            error.code, error.description
        )));
    }

    let result = data
        .chart
        .result
        .and_then(|results| results.into_iter().next())
        .ok_or_else(|| AppError::ExternalApi("No results in Yahoo response".to_string()))?;

    let timestamps = result.timestamp.unwrap_or_default();
    let quote = result
        .indicators
        .quote
        .into_iter()
        .next()
        .ok_or_else(|| AppError::ExternalApi("No quote data in Yahoo response".to_string()))?;

    let opens = quote.open.unwrap_or_default();
    let highs = quote.high.unwrap_or_default();
    let lows = quote.low.unwrap_or_default();
    let closes = quote.close.unwrap_or_default();
    let volumes = quote.volume.unwrap_or_default();

    (0..timestamps.len())
        .find_map(|i| {
            let close = closes.get(i).copied().flatten().filter(|c| *c > 0.0)?;
            Some(Observation {
                timestamp: request.timestamp,
                open: opens.get(i).copied().flatten().unwrap_or(close),
                high: highs.get(i).copied().flatten().unwrap_or(close),
                low: lows.get(i).copied().flatten().unwrap_or(close),
                close,
                volume: volumes.get(i).copied().flatten().unwrap_or(0) as f64,
            })
        })
        .ok_or_else(|| {
            AppError::ExternalApi(format!(
                "No Yahoo bar for {} at {}",
                request.symbol, request.timestamp
            ))
        })
}
