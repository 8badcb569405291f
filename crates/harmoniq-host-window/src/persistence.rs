//! Saving, loading and resetting plugin state bundles on disk.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use crate::error::PersistenceError;

/// Current on-disk bundle layout.
pub const BUNDLE_FORMAT_VERSION: u32 = 1;

/// A state file location, split the way the OS dialogs report it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistenceTarget {
    pub directory: PathBuf,
    pub file_name: String,
}

impl PersistenceTarget {
    pub fn new(directory: impl Into<PathBuf>, file_name: impl Into<String>) -> Self {
        Self {
            directory: directory.into(),
            file_name: file_name.into(),
        }
    }

    /// Splits a full path. Returns `None` for paths without a file name.
    pub fn from_path(path: &Path) -> Option<Self> {
        let file_name = path.file_name()?.to_str()?.to_owned();
        let directory = path.parent().map(Path::to_path_buf).unwrap_or_default();
        Some(Self {
            directory,
            file_name,
        })
    }

    pub fn path(&self) -> PathBuf {
        self.directory.join(&self.file_name)
    }
}

/// The save/load/reset operations invoked from the window's menu.
pub trait StatePersistence {
    fn save(&self, target: &PersistenceTarget) -> Result<(), PersistenceError>;
    /// Loading a file that does not exist is a no-op.
    fn load(&self, target: &PersistenceTarget) -> Result<(), PersistenceError>;
    /// Restores the per-plugin defaults file, when one exists.
    fn reset(&self) -> Result<(), PersistenceError>;
}

/// Access to the opaque state blob of the hosted plugin.
pub trait PluginStateSource {
    fn plugin_id(&self) -> &str;
    fn save_state(&self) -> Result<Vec<u8>, PersistenceError>;
    fn load_state(&self, data: &[u8]) -> Result<(), PersistenceError>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateBundle {
    pub format_version: u32,
    pub plugin_id: String,
    pub plugin_state: Vec<u8>,
}

/// Stores plugin state as bincode-encoded [`StateBundle`] files.
pub struct BundleStore<S> {
    source: S,
    settings_root: Option<PathBuf>,
    default_state_file: String,
}

impl<S: PluginStateSource> BundleStore<S> {
    pub fn new(
        source: S,
        settings_root: Option<PathBuf>,
        default_state_file: impl Into<String>,
    ) -> Self {
        Self {
            source,
            settings_root,
            default_state_file: default_state_file.into(),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// `<settings root>/<plugin id>/<default state file>`.
    pub fn defaults_path(&self) -> Option<PathBuf> {
        self.settings_root.as_ref().map(|root| {
            root.join(self.source.plugin_id())
                .join(&self.default_state_file)
        })
    }

    fn write_bundle(&self, path: &Path) -> Result<(), PersistenceError> {
        let bundle = StateBundle {
            format_version: BUNDLE_FORMAT_VERSION,
            plugin_id: self.source.plugin_id().to_owned(),
            plugin_state: self.source.save_state()?,
        };
        let bytes = bincode::serialize(&bundle).map_err(PersistenceError::Encoding)?;

        let directory = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut tmp =
            NamedTempFile::new_in(directory).map_err(|err| PersistenceError::io(directory, err))?;
        tmp.write_all(&bytes)
            .and_then(|()| tmp.as_file().sync_all())
            .map_err(|err| PersistenceError::io(tmp.path(), err))?;
        tmp.persist(path)
            .map_err(|err| PersistenceError::io(path, err.error))?;
        tracing::info!(path = %path.display(), "saved plugin state");
        Ok(())
    }

    fn read_bundle(&self, path: &Path) -> Result<(), PersistenceError> {
        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no state file to load");
                return Ok(());
            }
            Err(err) => return Err(PersistenceError::io(path, err)),
        };
        let bundle: StateBundle =
            bincode::deserialize(&bytes).map_err(|source| PersistenceError::Decoding {
                path: path.to_path_buf(),
                source,
            })?;
        if bundle.plugin_id != self.source.plugin_id() {
            return Err(PersistenceError::PluginMismatch {
                expected: self.source.plugin_id().to_owned(),
                found: bundle.plugin_id,
            });
        }
        if bundle.format_version != BUNDLE_FORMAT_VERSION {
            tracing::warn!(
                version = bundle.format_version,
                "loading state bundle with unknown format version"
            );
        }
        self.source.load_state(&bundle.plugin_state)?;
        tracing::info!(path = %path.display(), "loaded plugin state");
        Ok(())
    }
}

impl<S: PluginStateSource> StatePersistence for BundleStore<S> {
    fn save(&self, target: &PersistenceTarget) -> Result<(), PersistenceError> {
        self.write_bundle(&target.path())
    }

    fn load(&self, target: &PersistenceTarget) -> Result<(), PersistenceError> {
        self.read_bundle(&target.path())
    }

    fn reset(&self) -> Result<(), PersistenceError> {
        match self.defaults_path() {
            Some(path) => self.read_bundle(&path),
            None => {
                tracing::debug!("no settings directory, nothing to reset");
                Ok(())
            }
        }
    }
}
