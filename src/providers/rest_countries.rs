use async_trait::async_trait;
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use std::fmt;
use tracing::{debug, instrument, warn};

use crate::core::currency::dedup_by_code;
use crate::core::{CurrencyDirectory, CurrencyRecord, DirectoryError};

/// Currency directory built from the REST Countries v3.1 API.
///
/// Records are deduplicated by code (first country wins) and sorted by code.
pub struct RestCountriesDirectory {
    base_url: String,
}

impl RestCountriesDirectory {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    async fn request_countries(&self) -> Result<Vec<Country>, DirectoryError> {
        let url = format!("{}/v3.1/all?fields=currencies,name,cca2", self.base_url);
        debug!("Requesting currency directory from {}", url);

        let client = reqwest::Client::builder()
            .user_agent("fxconv/0.1")
            .build()
            .map_err(|e| DirectoryError::Unavailable(e.to_string()))?;

        let response = client
            .get(&url)
            .send()
            .await
            .map_err(|e| DirectoryError::Unavailable(format!("request error: {e}")))?;

        if !response.status().is_success() {
            return Err(DirectoryError::Unavailable(format!(
                "HTTP error: {}",
                response.status()
            )));
        }

        let text = response
            .text()
            .await
            .map_err(|e| DirectoryError::Unavailable(format!("failed to read body: {e}")))?;

        serde_json::from_str(&text).map_err(|e| {
            DirectoryError::Unavailable(format!("failed to parse JSON response: {e}"))
        })
    }
}

#[derive(Deserialize, Debug)]
struct Country {
    cca2: String,
    // Absent for some territories, `null` for others
    #[serde(default)]
    currencies: Option<CountryCurrencies>,
}

#[derive(Deserialize, Debug)]
struct CurrencyInfo {
    name: Option<String>,
}

/// A country's currencies in the order the API lists them.
#[derive(Debug, Default)]
struct CountryCurrencies(Vec<(String, CurrencyInfo)>);

impl<'de> Deserialize<'de> for CountryCurrencies {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct CurrenciesVisitor;

        impl<'de> Visitor<'de> for CurrenciesVisitor {
            type Value = CountryCurrencies;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of currency code to currency info")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some(entry) = map.next_entry::<String, CurrencyInfo>()? {
                    entries.push(entry);
                }
                Ok(CountryCurrencies(entries))
            }
        }

        deserializer.deserialize_map(CurrenciesVisitor)
    }
}

fn to_records(countries: &[Country]) -> Vec<CurrencyRecord> {
    let mut records = dedup_by_code(countries.iter().flat_map(|country| {
        let entries = country.currencies.as_ref().map_or(&[][..], |c| c.0.as_slice());
        entries.iter().map(move |(code, info)| {
            CurrencyRecord::new(code, info.name.as_deref().unwrap_or(code), &country.cca2)
        })
    }));
    records.sort_by(|a, b| a.code.cmp(&b.code));
    records
}

#[async_trait]
impl CurrencyDirectory for RestCountriesDirectory {
    #[instrument(name = "CurrencyDirectoryLoad", skip(self))]
    async fn load_currencies(&self) -> Result<Vec<CurrencyRecord>, DirectoryError> {
        let countries = self
            .request_countries()
            .await
            .inspect_err(|e| warn!("Failed to load currency directory: {e}"))?;
        let records = to_records(&countries);
        debug!(count = records.len(), "Loaded currency directory");
        Ok(records)
    }
}
