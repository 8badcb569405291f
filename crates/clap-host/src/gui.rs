use std::ffi::{c_void, CStr};

use clap_sys::ext::gui::{clap_plugin_gui, clap_window, clap_window_handle, CLAP_EXT_GUI};
use clap_sys::plugin::clap_plugin;

use crate::instance::ClapInstance;

/// Platform window handle handed to a plug-in as its embedding parent.
#[derive(Clone, Copy, Debug)]
pub struct GuiHandle {
    pub api: &'static CStr,
    pub window: *mut c_void,
}

impl GuiHandle {
    fn to_raw(self) -> clap_window {
        clap_window {
            api: self.api.as_ptr(),
            specific: clap_window_handle { ptr: self.window },
        }
    }
}

/// Thin wrapper over the plug-in's `clap.gui` extension.
///
/// Every call must happen on the main thread, and the wrapper must not
/// outlive the [`ClapInstance`] it was obtained from.
#[derive(Clone, Copy)]
pub struct ClapGui {
    plugin: *const clap_plugin,
    gui: *const clap_plugin_gui,
}

impl ClapGui {
    /// Returns `None` when the plug-in does not implement `clap.gui`.
    pub fn from_instance(instance: &ClapInstance) -> Option<Self> {
        let gui = instance.extension(CLAP_EXT_GUI) as *const clap_plugin_gui;
        if gui.is_null() {
            return None;
        }
        Some(Self {
            plugin: instance.as_raw(),
            gui,
        })
    }

    fn vtable(&self) -> &clap_plugin_gui {
        unsafe { &*self.gui }
    }

    pub fn is_api_supported(&self, api: &CStr, floating: bool) -> bool {
        match self.vtable().is_api_supported {
            Some(f) => unsafe { f(self.plugin, api.as_ptr(), floating) },
            None => false,
        }
    }

    pub fn create(&self, api: &CStr, floating: bool) -> bool {
        match self.vtable().create {
            Some(f) => unsafe { f(self.plugin, api.as_ptr(), floating) },
            None => false,
        }
    }

    pub fn destroy(&self) {
        if let Some(f) = self.vtable().destroy {
            unsafe { f(self.plugin) };
        }
    }

    pub fn set_scale(&self, scale: f64) -> bool {
        match self.vtable().set_scale {
            Some(f) => unsafe { f(self.plugin, scale) },
            None => false,
        }
    }

    pub fn can_resize(&self) -> bool {
        match self.vtable().can_resize {
            Some(f) => unsafe { f(self.plugin) },
            None => false,
        }
    }

    pub fn get_size(&self) -> Option<(u32, u32)> {
        let f = self.vtable().get_size?;
        let (mut width, mut height) = (0u32, 0u32);
        unsafe { f(self.plugin, &mut width, &mut height) }.then_some((width, height))
    }

    /// Lets the plug-in snap `width`/`height`; the proposal is returned unchanged when refused.
    pub fn adjust_size(&self, width: u32, height: u32) -> (u32, u32) {
        let Some(f) = self.vtable().adjust_size else {
            return (width, height);
        };
        let (mut adjusted_width, mut adjusted_height) = (width, height);
        if unsafe { f(self.plugin, &mut adjusted_width, &mut adjusted_height) } {
            (adjusted_width, adjusted_height)
        } else {
            (width, height)
        }
    }

    pub fn set_size(&self, width: u32, height: u32) -> bool {
        match self.vtable().set_size {
            Some(f) => unsafe { f(self.plugin, width, height) },
            None => false,
        }
    }

    pub fn set_parent(&self, handle: GuiHandle) -> bool {
        let window = handle.to_raw();
        match self.vtable().set_parent {
            Some(f) => unsafe { f(self.plugin, &window) },
            None => false,
        }
    }

    pub fn show(&self) -> bool {
        match self.vtable().show {
            Some(f) => unsafe { f(self.plugin) },
            None => false,
        }
    }

    pub fn hide(&self) -> bool {
        match self.vtable().hide {
            Some(f) => unsafe { f(self.plugin) },
            None => false,
        }
    }
}
