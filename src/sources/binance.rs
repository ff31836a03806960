use super::PriceProvider;
use crate::error::{AppError, Result};
use crate::types::{Observation, SampleRequest};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, warn};

const BINANCE_API_URL: &str = "https://api.binance.com/api/v3";
/// Characters of an error body kept in logs.
const ERROR_EXCERPT_CHARS: usize = 200;

/// Binance REST client returning the 1-minute kline at a sample instant.
#[derive(Clone)]
pub struct BinanceClient {
    client: Client,
    api_key: Option<String>,
}

impl BinanceClient {
    /// Create a new Binance client.
    pub fn new(client: Client, api_key: Option<String>) -> Self {
        Self { client, api_key }
    }

    async fn fetch_kline(&self, request: &SampleRequest) -> Result<Vec<Value>> {
        let url = format!("{}/klines", BINANCE_API_URL);
        let start_time = request.timestamp.timestamp_millis().to_string();

        let mut http = self.client.get(&url).query(&[
            ("symbol", request.symbol.to_uppercase().as_str()),
            ("interval", "1m"),
            ("startTime", start_time.as_str()),
            ("limit", "1"),
        ]);
        if let Some(ref key) = self.api_key {
            http = http.header("X-MBX-APIKEY", key);
        }

        let response = http.send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            warn!("Binance API returned {}: {}", status, error_excerpt(&text));
            return Err(AppError::ExternalApi(format!("Binance API error: {}", status)));
        }

        let klines: Vec<Vec<Value>> = response.json().await?;
        klines
            .into_iter()
            .next()
            .ok_or_else(|| AppError::ExternalApi("Binance returned no klines".to_string()))
    }
}

#[async_trait]
impl PriceProvider for BinanceClient {
    fn name(&self) -> &str {
        "binance"
    }

    async fn fetch(&self, request: &SampleRequest) -> Result<Observation> {
        let kline = self.fetch_kline(request).await?;
        let observation = parse_kline(&kline, request)?;
        debug!(
            "Binance kline for {} at {}: close={}",
            request.symbol, request.timestamp, observation.close
        );
        Ok(observation)
    }
}

fn error_excerpt(body: &str) -> String {
    body.chars().take(ERROR_EXCERPT_CHARS).collect()
}

/// Kline layout: `[openTime, "open", "high", "low", "close", "volume", ...]`.
fn parse_kline(kline: &[Value], request: &SampleRequest) -> Result<Observation> {
    let field = |idx: usize| -> Result<f64> {
        kline
            .get(idx)
            .and_then(|v| match v {
                Value::String(s) => s.parse().ok(),
                Value::Number(n) => n.as_f64(),
                _ => None,
            })
            .ok_or_else(|| AppError::ExternalApi(format!("Malformed Binance kline field {}", idx)))
    };

    Ok(Observation {
        timestamp: request.timestamp,
        open: field(1)?,
        high: field(2)?,
        low: field(3)?,
        close: field(4)?,
        volume: field(5)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn request() -> SampleRequest {
        let ts = Utc.with_ymd_and_hms(2025, 1, 1, 0, 5, 0).unwrap();
        SampleRequest {
            window_index: 0,
            sample_index: 1,
            timestamp: ts,
            percentage: 50.0,
            symbol: "BTCUSDT".to_string(),
            window_start: ts,
            window_end: ts,
        }
    }

    // =========================================================================
    // parse_kline Tests
    // =========================================================================

    #[test]
    fn test_parse_kline() {
        let json = r#"[1735689900000, "93500.10", "93600.00", "93400.50", "93550.25", "12.345",
                       1735689959999, "1154000.0", 1000, "6.1", "570000.0", "0"]"#;
        let kline: Vec<Value> = serde_json::from_str(json).unwrap();
        let obs = parse_kline(&kline, &request()).unwrap();

        assert_eq!(obs.open, 93500.10);
        assert_eq!(obs.high, 93600.00);
        assert_eq!(obs.low, 93400.50);
        assert_eq!(obs.close, 93550.25);
        assert_eq!(obs.volume, 12.345);
        assert_eq!(obs.timestamp, request().timestamp);
    }

    #[test]
    fn test_parse_kline_truncated() {
        let kline: Vec<Value> = serde_json::from_str(r#"[1735689900000, "1.0", "2.0"]"#).unwrap();
        let err = parse_kline(&kline, &request()).unwrap_err();
        assert!(matches!(err, AppError::ExternalApi(_)));
    }

    #[test]
    fn test_parse_kline_bad_number() {
        let kline: Vec<Value> =
            serde_json::from_str(r#"[0, "abc", "2.0", "1.0", "1.5", "10"]"#).unwrap();
        assert!(parse_kline(&kline, &request()).is_err());
    }

    // =========================================================================
    // error_excerpt Tests
    // =========================================================================

    #[test]
    fn test_error_excerpt_multibyte_at_cut() {
        let body = format!("{}é rest", "a".repeat(199));
        let excerpt = error_excerpt(&body);
        assert_eq!(excerpt.chars().count(), 200);
        assert!(excerpt.ends_with('é'));
    }

    #[test]
    fn test_error_excerpt_short_body() {
        assert_eq!(error_excerpt("{\"code\":-1121}"), "{\"code\":-1121}");
        assert_eq!(error_excerpt(""), "");
    }

    #[test]
    fn test_client_name() {
        let client = BinanceClient::new(Client::new(), None);
        assert_eq!(client.name(), "binance");
    }
}
