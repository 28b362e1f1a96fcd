//! Per-hostname restore maps kept in session storage

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, warn};
use veil_core::RestoreMapEntry;

use crate::{Result, SessionStore};

pub const RESTORE_MAP_KEY_PREFIX: &str = "restore_map_";

/// Session storage key for a page's restore map
pub fn restore_map_key(hostname: &str) -> String {
    format!("{}{}", RESTORE_MAP_KEY_PREFIX, hostname)
}

/// Saves and loads restore maps keyed by page hostname.
///
/// A save replaces whatever map the hostname had before.
pub struct RestoreMapStore<S: SessionStore> {
    store: Arc<S>,
}

impl<S: SessionStore> Clone for RestoreMapStore<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: SessionStore> RestoreMapStore<S> {
    pub fn new(store: S) -> Self {
        Self::from_shared(Arc::new(store))
    }

    pub fn from_shared(store: Arc<S>) -> Self {
        Self { store }
    }

    pub fn session(&self) -> &Arc<S> {
        &self.store
    }

    pub async fn save(&self, hostname: &str, entries: &[RestoreMapEntry]) -> Result<()> {
        let value = serde_json::to_value(entries)?;
        self.store.set(&restore_map_key(hostname), value).await?;
        debug!(hostname, entries = entries.len(), "saved restore map");
        Ok(())
    }

    /// Load the map for `hostname`.
    ///
    /// Missing or unreadable maps come back empty.
    pub async fn get(&self, hostname: &str) -> Result<Vec<RestoreMapEntry>> {
        let Some(value) = self.store.get(&restore_map_key(hostname)).await? else {
            return Ok(Vec::new());
        };

        Ok(parse_entries(hostname, value))
    }

    pub async fn clear(&self, hostname: &str) -> Result<()> {
        self.store.remove(&restore_map_key(hostname)).await
    }
}

fn parse_entries(hostname: &str, value: Value) -> Vec<RestoreMapEntry> {
    match serde_json::from_value(value) {
        Ok(entries) => entries,
        Err(e) => {
            warn!(hostname, error = %e, "discarding malformed restore map");
            Vec::new()
        }
    }
}
