//! Currency abstractions: rate lookup and the currency directory

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::error::{ConversionError, DirectoryError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyPair {
    pub from: String,
    pub to: String,
}

impl CurrencyPair {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }

    pub fn swap(&mut self) {
        std::mem::swap(&mut self.from, &mut self.to);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyRecord {
    pub code: String,
    pub display_name: String,
    /// Lowercase ISO 3166-1 alpha-2 code of the country the record came from.
    pub country_code: String,
}

impl CurrencyRecord {
    pub fn new(code: &str, display_name: &str, country_code: &str) -> Self {
        Self {
            code: code.to_string(),
            display_name: display_name.to_string(),
            country_code: country_code.to_lowercase(),
        }
    }

    pub fn flag_url(&self) -> String {
        format!("https://flagcdn.com/w20/{}.png", self.country_code)
    }
}

/// Drops every record whose code was already seen; the first one wins.
pub fn dedup_by_code(records: impl IntoIterator<Item = CurrencyRecord>) -> Vec<CurrencyRecord> {
    let mut seen = HashSet::new();
    records
        .into_iter()
        .filter(|r| seen.insert(r.code.clone()))
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct RateQuote {
    pub rate: Decimal,
    pub updated_at: Option<DateTime<Utc>>,
}

#[async_trait]
pub trait RateProvider: Send + Sync {
    async fn fetch_rate(&self, from: &str, to: &str) -> Result<RateQuote, ConversionError>;
}

#[async_trait]
pub trait CurrencyDirectory: Send + Sync {
    async fn load_currencies(&self) -> Result<Vec<CurrencyRecord>, DirectoryError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_swap_twice_restores_pair() {
        let mut pair = CurrencyPair::new("USD", "INR");
        pair.swap();
        assert_eq!(pair, CurrencyPair::new("INR", "USD"));
        pair.swap();
        assert_eq!(pair, CurrencyPair::new("USD", "INR"));
    }

    #[test]
    fn test_dedup_keeps_first_record() {
        let records = vec![
            CurrencyRecord::new("USD", "Dollar", "US"),
            CurrencyRecord::new("EUR", "Euro", "DE"),
            CurrencyRecord::new("USD", "Dollar", "EC"),
        ];
        let deduped = dedup_by_code(records);
        assert_eq!(deduped.len(), 2);
        assert_eq!(deduped[0].country_code, "us");
        assert_eq!(deduped[1].code, "EUR");
    }

    #[test]
    fn test_flag_url() {
        let record = CurrencyRecord::new("GBP", "British Pound Sterling", "GB");
        assert_eq!(record.flag_url(), "https://flagcdn.com/w20/gb.png");
    }
}
