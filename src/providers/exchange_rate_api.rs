use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::StatusCode;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::str::FromStr;
use tracing::{debug, instrument, warn};

use crate::core::{ConversionError, RateProvider, RateQuote};

/// Rate provider backed by the exchangerate-api.com v6 pair endpoint.
pub struct ExchangeRateApiProvider {
    base_url: String,
    api_key: String,
}

impl ExchangeRateApiProvider {
    pub fn new(base_url: &str, api_key: &str) -> Self {
        ExchangeRateApiProvider {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    async fn request_rate(&self, from: &str, to: &str) -> Result<RateQuote, ConversionError> {
        if from.trim().is_empty() || to.trim().is_empty() {
            return Err(ConversionError::MalformedRequest);
        }

        let url = format!("{}/{}/pair/{}/{}", self.base_url, self.api_key, from, to);
        debug!("Requesting rate from {}/***/pair/{}/{}", self.base_url, from, to);

        let client = reqwest::Client::builder()
            .user_agent("fxconv/0.1")
            .build()
            .map_err(|e| {
                debug!(error = %e, "Failed to build HTTP client");
                ConversionError::NetworkFailure
            })?;

        let response = client.get(&url).send().await.map_err(|e| {
            debug!(error = %e, "Request error for pair {}/{}", from, to);
            ConversionError::NetworkFailure
        })?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(ConversionError::RateLimited);
        }
        if !status.is_success() {
            debug!("HTTP error: {} for pair {}/{}", status, from, to);
            return Err(ConversionError::NetworkFailure);
        }

        let text = response.text().await.map_err(|e| {
            debug!(error = %e, "Failed to read response body");
            ConversionError::NetworkFailure
        })?;

        let data: PairResponse = serde_json::from_str(&text).map_err(|e| {
            ConversionError::Unknown(format!("unreadable response for {from}/{to}: {e}"))
        })?;

        if data.result != "success" {
            return Err(ConversionError::from_api_tag(data.error_type.as_deref()));
        }

        let rate = data
            .conversion_rate
            .as_ref()
            .and_then(parse_rate)
            .ok_or_else(|| {
                ConversionError::Unknown(format!("no conversion rate for {from}/{to}"))
            })?;

        let updated_at = data
            .time_last_update_unix
            .and_then(|ts| DateTime::<Utc>::from_timestamp(ts, 0));

        Ok(RateQuote { rate, updated_at })
    }
}

#[derive(Deserialize, Debug)]
struct PairResponse {
    result: String,
    conversion_rate: Option<serde_json::Number>,
    #[serde(rename = "error-type")]
    error_type: Option<String>,
    time_last_update_unix: Option<i64>,
}

// Parse from the number's text so 83.12 stays exactly 83.12.
fn parse_rate(number: &serde_json::Number) -> Option<Decimal> {
    let text = number.to_string();
    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .ok()
}

#[async_trait]
impl RateProvider for ExchangeRateApiProvider {
    #[instrument(
        name = "ExchangeRateFetch",
        skip(self),
        fields(from = %from, to = %to)
    )]
    async fn fetch_rate(&self, from: &str, to: &str) -> Result<RateQuote, ConversionError> {
        self.request_rate(from, to)
            .await
            .inspect(|quote| debug!(rate = %quote.rate, "Received rate"))
            .inspect_err(|e| warn!(kind = e.kind(), "Rate lookup failed: {e}"))
    }
}
