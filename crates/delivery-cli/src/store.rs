//! JSON-file settings store.

use std::fs;
use std::io::{self, ErrorKind, Write};
use std::path::{Path, PathBuf};

use delivery_engine::{ConfigurationProvider, DeliveryError, DeliverySettings, SettingsStore};
use tempfile::NamedTempFile;
use tracing::debug;

/// Settings kept as pretty-printed JSON in a single file.
///
/// A missing file reads as the default settings. Writes go to a temporary
/// file in the same directory which is then renamed over the target.
pub struct JsonFileSettings {
    path: PathBuf,
}

impl JsonFileSettings {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    fn storage_error(&self, action: &str, err: impl std::fmt::Display) -> DeliveryError {
        DeliveryError::Storage(format!("{} {}: {}", action, self.path.display(), err))
    }
}

impl ConfigurationProvider for JsonFileSettings {
    fn configuration(&self) -> delivery_engine::Result<DeliverySettings> {
        let data = match fs::read(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no settings file, using defaults");
                return Ok(DeliverySettings::default());
            }
            Err(e) => return Err(self.storage_error("reading", e)),
        };
        serde_json::from_slice(&data).map_err(|e| self.storage_error("parsing", e))
    }
}

impl SettingsStore for JsonFileSettings {
    fn store(&self, settings: &DeliverySettings) -> delivery_engine::Result<()> {
        let json =
            serde_json::to_vec_pretty(settings).map_err(|e| self.storage_error("encoding", e))?;
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut tmp =
            NamedTempFile::new_in(dir).map_err(|e| self.storage_error("creating temp file for", e))?;
        write_synced(&mut tmp, &json).map_err(|e| self.storage_error("writing", e))?;
        tmp.persist(&self.path)
            .map_err(|e| self.storage_error("replacing", e.error))?;

        debug!(path = %self.path.display(), "settings saved");
        Ok(())
    }
}

fn write_synced(tmp: &mut NamedTempFile, data: &[u8]) -> io::Result<()> {
    tmp.write_all(data)?;
    tmp.flush()?;
    tmp.as_file().sync_all()
}
