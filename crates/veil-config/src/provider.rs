//! Settings sources

use std::path::PathBuf;

use async_trait::async_trait;
use tracing::warn;
use veil_core::Settings;

use crate::Config;

/// Somewhere settings can be fetched from at runtime.
///
/// `Ok(None)` means the source answered but had nothing to give (for
/// instance an extension context that has been invalidated).
#[async_trait]
pub trait SettingsProvider: Send + Sync {
    async fn get_settings(&self) -> anyhow::Result<Option<Settings>>;
}

/// Settings plus whether they came from the real source
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedSettings {
    pub settings: Settings,
    pub available: bool,
}

/// Fetch settings, falling back to [`Settings::fallback`] when the provider
/// fails or returns nothing.
pub async fn load_settings<P: SettingsProvider + ?Sized>(provider: &P) -> LoadedSettings {
    match provider.get_settings().await {
        Ok(Some(settings)) => LoadedSettings {
            settings,
            available: true,
        },
        Ok(None) => {
            warn!("settings source returned nothing, using defaults");
            fallback()
        }
        Err(e) => {
            warn!(error = %e, "settings source failed, using defaults");
            fallback()
        }
    }
}

fn fallback() -> LoadedSettings {
    LoadedSettings {
        settings: Settings::fallback(),
        available: false,
    }
}

/// Always hands out the same settings
#[derive(Debug, Clone, Default)]
pub struct StaticSettings(pub Settings);

#[async_trait]
impl SettingsProvider for StaticSettings {
    async fn get_settings(&self) -> anyhow::Result<Option<Settings>> {
        Ok(Some(self.0.clone()))
    }
}

/// A source that can no longer be reached
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableSettings;

#[async_trait]
impl SettingsProvider for UnavailableSettings {
    async fn get_settings(&self) -> anyhow::Result<Option<Settings>> {
        Ok(None)
    }
}

/// Reads the `[settings]` table of a config file on every call
#[derive(Debug, Clone)]
pub struct FileSettings {
    path: PathBuf,
}

impl FileSettings {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Provider over the default config file location
    pub fn default_location() -> Self {
        Self::new(Config::config_path())
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

#[async_trait]
impl SettingsProvider for FileSettings {
    async fn get_settings(&self) -> anyhow::Result<Option<Settings>> {
        if !self.path.exists() {
            return Ok(None);
        }
        Ok(Some(Config::load_from(&self.path)?.settings))
    }
}
