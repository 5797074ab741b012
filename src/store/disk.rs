use anyhow::{Context, Result};
use fjall::{Config, Keyspace, PartitionCreateOptions, PartitionHandle, PersistMode};
use std::path::Path;
use tracing::debug;

use super::PreferenceStore;

const PARTITION: &str = "preferences";

/// Preference store persisted in a fjall keyspace.
pub struct DiskPreferenceStore {
    keyspace: Keyspace,
    partition: PartitionHandle,
}

impl DiskPreferenceStore {
    /// Opens (or creates) the keyspace at `{data_path}/preferences`.
    pub fn open(data_path: &Path) -> Result<Self> {
        let path = data_path.join("preferences");
        std::fs::create_dir_all(&path)
            .with_context(|| format!("Failed to create directory: {}", path.display()))?;

        let keyspace = Config::new(&path)
            .open()
            .with_context(|| format!("Failed to open preference store at {}", path.display()))?;
        let partition = keyspace
            .open_partition(PARTITION, PartitionCreateOptions::default())
            .context("Failed to open preference partition")?;
        debug!("Opened preference store at {}", path.display());

        Ok(Self {
            keyspace,
            partition,
        })
    }
}

impl PreferenceStore for DiskPreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let Some(value) = self.partition.get(key)? else {
            debug!("Preference MISS for key: {key}");
            return Ok(None);
        };
        let value = String::from_utf8(value.to_vec())
            .with_context(|| format!("Preference {key} is not valid UTF-8"))?;
        debug!("Preference HIT for key: {key}");
        Ok(Some(value))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.partition.insert(key, value)?;
        self.keyspace.persist(PersistMode::SyncAll)?;
        debug!("Preference PUT for key: {key}");
        Ok(())
    }
}
