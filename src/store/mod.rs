pub mod disk;
pub mod memory;

use anyhow::Result;
use tracing::{debug, warn};

use crate::core::CurrencyPair;

pub const FROM_CURRENCY_KEY: &str = "fromCurrency";
pub const TO_CURRENCY_KEY: &str = "toCurrency";
pub const DEFAULT_FROM_CURRENCY: &str = "USD";
pub const DEFAULT_TO_CURRENCY: &str = "INR";

/// Durable string key-value storage for user preferences. Last writer wins.
pub trait PreferenceStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// The last-used currency pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preferences {
    pub pair: CurrencyPair,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            pair: CurrencyPair::new(DEFAULT_FROM_CURRENCY, DEFAULT_TO_CURRENCY),
        }
    }
}

impl Preferences {
    /// Reads both keys, substituting the default for anything absent or unreadable.
    pub fn load(store: &dyn PreferenceStore) -> Self {
        let from = read_or_default(store, FROM_CURRENCY_KEY, DEFAULT_FROM_CURRENCY);
        let to = read_or_default(store, TO_CURRENCY_KEY, DEFAULT_TO_CURRENCY);
        debug!(%from, %to, "Loaded currency preferences");
        Self {
            pair: CurrencyPair::new(from, to),
        }
    }

    pub fn save_from(store: &dyn PreferenceStore, code: &str) -> Result<()> {
        store.set(FROM_CURRENCY_KEY, code)
    }

    pub fn save_to(store: &dyn PreferenceStore, code: &str) -> Result<()> {
        store.set(TO_CURRENCY_KEY, code)
    }

    pub fn save(store: &dyn PreferenceStore, pair: &CurrencyPair) -> Result<()> {
        Self::save_from(store, &pair.from)?;
        Self::save_to(store, &pair.to)
    }
}

fn read_or_default(store: &dyn PreferenceStore, key: &str, default: &str) -> String {
    match store.get(key) {
        Ok(Some(value)) if !value.is_empty() => value,
        Ok(_) => default.to_string(),
        Err(e) => {
            warn!(error = %e, "Failed to read preference {key}, using {default}");
            default.to_string()
        }
    }
}
