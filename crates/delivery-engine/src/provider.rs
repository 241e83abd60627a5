//! Settings storage capability.
//!
//! The engine reads configuration only through [`ConfigurationProvider`] and
//! writes it only through [`SettingsStore`], so it never touches a concrete
//! store itself. Hosts supply their own implementation (the CLI uses a JSON
//! file); [`InMemorySettings`] covers tests and embedded use.

use std::sync::RwLock;

use crate::error::{DeliveryError, Result};
use crate::settings::DeliverySettings;

/// Read access to the stored delivery settings.
pub trait ConfigurationProvider {
    /// Current settings, with defaults applied to anything not stored.
    fn configuration(&self) -> Result<DeliverySettings>;
}

/// Read/write access to the stored delivery settings.
pub trait SettingsStore: ConfigurationProvider {
    fn store(&self, settings: &DeliverySettings) -> Result<()>;
}

impl<T: ConfigurationProvider + ?Sized> ConfigurationProvider for &T {
    fn configuration(&self) -> Result<DeliverySettings> {
        (**self).configuration()
    }
}

impl<T: SettingsStore + ?Sized> SettingsStore for &T {
    fn store(&self, settings: &DeliverySettings) -> Result<()> {
        (**self).store(settings)
    }
}

/// Settings held in process memory.
#[derive(Debug, Default)]
pub struct InMemorySettings {
    inner: RwLock<DeliverySettings>,
}

impl InMemorySettings {
    pub fn new(settings: DeliverySettings) -> Self {
        Self {
            inner: RwLock::new(settings),
        }
    }
}

impl ConfigurationProvider for InMemorySettings {
    fn configuration(&self) -> Result<DeliverySettings> {
        self.inner
            .read()
            .map(|settings| settings.clone())
            .map_err(|e| DeliveryError::Storage(e.to_string()))
    }
}

impl SettingsStore for InMemorySettings {
    fn store(&self, settings: &DeliverySettings) -> Result<()> {
        let mut guard = self
            .inner
            .write()
            .map_err(|e| DeliveryError::Storage(e.to_string()))?;
        *guard = settings.clone();
        Ok(())
    }
}
