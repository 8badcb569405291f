use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::gui::WindowApi;

/// Failures reported by a native window backend.
#[derive(Debug, Error)]
pub enum WindowError {
    #[error("{operation} failed: {message}")]
    Os {
        operation: &'static str,
        message: String,
    },
    #[error("window has already been destroyed")]
    Released,
}

impl WindowError {
    pub fn os(operation: &'static str, message: impl Into<String>) -> Self {
        Self::Os {
            operation,
            message: message.into(),
        }
    }
}

/// Unrecoverable errors raised while constructing a host window.
///
/// The process boundary is expected to report these and terminate.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("plugin is null")]
    MissingPlugin,
    #[error("plugin GUI is null")]
    MissingGui,
    #[error("host window creation failed: {0}")]
    WindowCreation(#[source] WindowError),
    #[error("window API {api} is not supported by the plugin GUI")]
    UnsupportedApi { api: WindowApi },
    #[error("plugin GUI could not be created for window API {api}")]
    GuiCreation { api: WindowApi },
}

/// Recoverable errors raised by save/load/reset of plugin state.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to encode state bundle: {0}")]
    Encoding(#[source] bincode::Error),
    #[error("failed to decode state bundle {}: {source}", path.display())]
    Decoding {
        path: PathBuf,
        #[source]
        source: bincode::Error,
    },
    #[error("state bundle belongs to plugin {found}, expected {expected}")]
    PluginMismatch { expected: String, found: String },
    #[error("plugin rejected state: {0}")]
    PluginRejected(String),
}

impl PersistenceError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Filesystem error kind, when the failure came from the filesystem.
    pub fn kind(&self) -> Option<io::ErrorKind> {
        match self {
            Self::Io { source, .. } => Some(source.kind()),
            _ => None,
        }
    }
}
