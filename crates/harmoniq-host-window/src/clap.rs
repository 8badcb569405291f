//! Bridges the `clap-host` wrappers onto the host window's ports.

use clap_host::{ClapGui, ClapState, GuiHandle};

use crate::error::PersistenceError;
use crate::geometry::ContentSize;
use crate::gui::{EmbeddedGui, WindowApi};
use crate::persistence::PluginStateSource;
use crate::window::WindowHandle;

impl EmbeddedGui for ClapGui {
    fn is_api_supported(&self, api: WindowApi) -> bool {
        ClapGui::is_api_supported(self, api.as_cstr(), false)
    }

    fn create(&self, api: WindowApi) -> bool {
        ClapGui::create(self, api.as_cstr(), false)
    }

    fn destroy(&self) {
        ClapGui::destroy(self)
    }

    fn set_scale(&self, scale: f64) -> bool {
        ClapGui::set_scale(self, scale)
    }

    fn can_resize(&self) -> bool {
        ClapGui::can_resize(self)
    }

    fn preferred_size(&self) -> Option<ContentSize> {
        self.get_size()
            .map(|(width, height)| ContentSize::new(width, height))
    }

    fn adjust_size(&self, proposed: ContentSize) -> ContentSize {
        let (width, height) = ClapGui::adjust_size(self, proposed.width, proposed.height);
        ContentSize::new(width, height)
    }

    fn set_size(&self, size: ContentSize) -> bool {
        ClapGui::set_size(self, size.width, size.height)
    }

    fn set_parent(&self, api: WindowApi, parent: WindowHandle) -> bool {
        ClapGui::set_parent(
            self,
            GuiHandle {
                api: api.as_cstr(),
                window: parent.raw() as *mut std::ffi::c_void,
            },
        )
    }

    fn show(&self) -> bool {
        ClapGui::show(self)
    }

    fn hide(&self) -> bool {
        ClapGui::hide(self)
    }
}

/// Plugin state accessed through `clap.state`.
///
/// Plugins without the extension produce an error on every save or load.
pub struct ClapStateSource {
    plugin_id: String,
    state: Option<ClapState>,
}

impl ClapStateSource {
    pub fn new(plugin_id: impl Into<String>, state: Option<ClapState>) -> Self {
        Self {
            plugin_id: plugin_id.into(),
            state,
        }
    }

    fn state(&self) -> Result<&ClapState, PersistenceError> {
        self.state.as_ref().ok_or_else(|| {
            PersistenceError::PluginRejected("plug-in does not implement clap.state".into())
        })
    }
}

impl PluginStateSource for ClapStateSource {
    fn plugin_id(&self) -> &str {
        &self.plugin_id
    }

    fn save_state(&self) -> Result<Vec<u8>, PersistenceError> {
        self.state()?
            .save()
            .map_err(|err| PersistenceError::PluginRejected(err.to_string()))
    }

    fn load_state(&self, data: &[u8]) -> Result<(), PersistenceError> {
        self.state()?
            .load(data)
            .map_err(|err| PersistenceError::PluginRejected(err.to_string()))
    }
}
