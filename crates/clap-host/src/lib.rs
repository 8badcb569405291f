//! Safe(-ish) wrappers around the CLAP ABI for hosting a single plug-in and
//! embedding its editor.

mod discover;
mod gui;
mod host;
mod instance;
mod state;

pub use discover::{ClapLibrary, ClapPluginDescriptor, PluginDiscovery};
pub use gui::{ClapGui, GuiHandle};
pub use host::{HostIdentity, ResizeHandler, StandaloneHost};
pub use instance::{ActivationError, AudioConfig, ClapInstance};
pub use state::{ClapState, StateError};

/// Re-export the raw bindings for users that need to drop down to the ABI.
pub use clap_sys as ffi;
