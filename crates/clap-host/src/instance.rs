use std::ffi::{c_void, CStr, CString};

use clap_sys::factory::plugin_factory::clap_plugin_factory;
use clap_sys::plugin::clap_plugin;
use thiserror::Error;
use tracing::{debug, warn};

use crate::discover::ClapPluginDescriptor;
use crate::host::StandaloneHost;

#[derive(Debug, Clone, Copy)]
pub struct AudioConfig {
    pub sample_rate: f64,
    pub min_frames_count: u32,
    pub max_frames_count: u32,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            sample_rate: 48_000.0,
            min_frames_count: 32,
            max_frames_count: 1024,
        }
    }
}

#[derive(Debug, Error)]
pub enum ActivationError {
    #[error("plug-in refused to activate")]
    ActivationFailed,
    #[error("plug-in returned null instance")]
    NullInstance,
    #[error("plug-in refused to init")]
    InitFailed,
    #[error("factory missing create_plugin entry point")]
    MissingCreatePlugin,
    #[error("plug-in id contains an interior NUL byte")]
    InvalidId,
}

/// Represents a running CLAP plug-in instance.
///
/// The instance must be dropped before the [`StandaloneHost`] it was created
/// with and before the library that produced the factory.
pub struct ClapInstance {
    plugin: *const clap_plugin,
    descriptor: ClapPluginDescriptor,
    activated: bool,
}

impl ClapInstance {
    /// # Safety
    /// `factory` must come from a loaded CLAP library that outlives the instance.
    pub unsafe fn create(
        factory: &clap_plugin_factory,
        descriptor: &ClapPluginDescriptor,
        host: &StandaloneHost,
    ) -> Result<Self, ActivationError> {
        let id = CString::new(descriptor.id.clone()).map_err(|_| ActivationError::InvalidId)?;
        let Some(create_plugin) = factory.create_plugin else {
            return Err(ActivationError::MissingCreatePlugin);
        };
        let plugin = create_plugin(factory, host.as_raw(), id.as_ptr());
        if plugin.is_null() {
            return Err(ActivationError::NullInstance);
        }

        let plugin_ref = &*plugin;
        if let Some(init) = plugin_ref.init {
            if !init(plugin) {
                if let Some(destroy) = plugin_ref.destroy {
                    destroy(plugin);
                }
                return Err(ActivationError::InitFailed);
            }
        }

        debug!(id = %descriptor.id, "created CLAP plug-in instance");
        Ok(Self {
            plugin,
            descriptor: descriptor.clone(),
            activated: false,
        })
    }

    pub fn as_raw(&self) -> *const clap_plugin {
        self.plugin
    }

    /// Look up a plug-in extension by id, returning null when unsupported.
    pub fn extension(&self, id: &CStr) -> *const c_void {
        let plugin = unsafe { &*self.plugin };
        match plugin.get_extension {
            Some(get_extension) => unsafe { get_extension(self.plugin, id.as_ptr()) },
            None => std::ptr::null(),
        }
    }

    pub fn is_activated(&self) -> bool {
        self.activated
    }

    pub fn activate(&mut self, config: AudioConfig) -> Result<(), ActivationError> {
        if self.activated {
            return Ok(());
        }
        let plugin = unsafe { &*self.plugin };
        if let Some(activate) = plugin.activate {
            let ok = unsafe {
                activate(
                    self.plugin,
                    config.sample_rate,
                    config.min_frames_count,
                    config.max_frames_count,
                )
            };
            if !ok {
                return Err(ActivationError::ActivationFailed);
            }
        }
        self.activated = true;
        Ok(())
    }

    pub fn deactivate(&mut self) {
        if !self.activated {
            return;
        }
        let plugin = unsafe { &*self.plugin };
        if let Some(deactivate) = plugin.deactivate {
            unsafe { deactivate(self.plugin) };
        }
        self.activated = false;
    }

    /// Service a pending `request_callback` from the plug-in.
    pub fn on_main_thread(&self) {
        let plugin = unsafe { &*self.plugin };
        match plugin.on_main_thread {
            Some(on_main_thread) => unsafe { on_main_thread(self.plugin) },
            None => warn!(
                id = %self.descriptor.id,
                "plug-in requested a callback without on_main_thread"
            ),
        }
    }
}

impl Drop for ClapInstance {
    fn drop(&mut self) {
        unsafe {
            let plugin = &*self.plugin;
            if self.activated {
                if let Some(deactivate) = plugin.deactivate {
                    deactivate(self.plugin);
                }
            }
            if let Some(destroy) = plugin.destroy {
                destroy(self.plugin);
            }
        }
        debug!(id = %self.descriptor.id, "destroyed CLAP plug-in instance");
    }
}
