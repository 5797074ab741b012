use anyhow::{Result, anyhow};
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::debug;

use super::PreferenceStore;

/// In-memory preference store; contents are lost on exit.
#[derive(Default)]
pub struct MemoryPreferenceStore {
    inner: Mutex<HashMap<String, String>>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(HashMap::new()),
        }
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let prefs = self
            .inner
            .lock()
            .map_err(|_| anyhow!("preference store lock poisoned"))?;
        Ok(prefs.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut prefs = self
            .inner
            .lock()
            .map_err(|_| anyhow!("preference store lock poisoned"))?;
        debug!("Preference PUT for key: {key}");
        prefs.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
