//! Collaborators the host window drives but does not own the logic of.

use clap_host::ResizeHandler;

use crate::persistence::{PersistenceTarget, StatePersistence};
use crate::window::WindowHandle;

/// Audio runtime and process lifetime hooks.
pub trait HostRuntime {
    /// Installs the callback answering plugin-initiated resize requests.
    fn set_resize_handler(&self, handler: ResizeHandler);
    fn start_processing(&self);
    fn stop_processing(&self);
    /// Asks the UI message loop to exit with `code`.
    fn request_exit(&self, code: i32);
}

/// Modal interaction with the user.
pub trait UserPrompts {
    /// Returns `None` when the user cancels.
    fn pick_save_target(&self, owner: WindowHandle, extension: &str) -> Option<PersistenceTarget>;
    fn pick_load_target(&self, owner: WindowHandle, extension: &str) -> Option<PersistenceTarget>;
    fn show_error(&self, owner: WindowHandle, message: &str);
}

/// An optional audio/MIDI settings surface.
pub trait SettingsSurface {
    fn is_visible(&self) -> bool;
    fn show(&self);
    fn hide(&self);
}

/// Everything a host window needs besides the window and the plugin GUI.
pub struct HostServices {
    pub runtime: Box<dyn HostRuntime>,
    pub persistence: Box<dyn StatePersistence>,
    pub prompts: Box<dyn UserPrompts>,
    pub settings: Option<Box<dyn SettingsSurface>>,
}

impl HostServices {
    pub fn new(
        runtime: impl HostRuntime + 'static,
        persistence: impl StatePersistence + 'static,
        prompts: impl UserPrompts + 'static,
    ) -> Self {
        Self {
            runtime: Box::new(runtime),
            persistence: Box::new(persistence),
            prompts: Box::new(prompts),
            settings: None,
        }
    }

    pub fn with_settings(mut self, settings: impl SettingsSurface + 'static) -> Self {
        self.settings = Some(Box::new(settings));
        self
    }
}
