use std::num::NonZeroIsize;
use std::path::PathBuf;

use raw_window_handle::{
    DisplayHandle, HandleError, HasDisplayHandle, HasWindowHandle, RawWindowHandle,
    Win32WindowHandle, WindowHandle as RawHandle,
};
use rfd::{FileDialog, MessageButtons, MessageDialog, MessageLevel};

use crate::persistence::PersistenceTarget;
use crate::services::UserPrompts;
use crate::window::WindowHandle;

/// Dialog owner built from a host window handle.
struct Owner(WindowHandle);

impl HasWindowHandle for Owner {
    fn window_handle(&self) -> Result<RawHandle<'_>, HandleError> {
        let hwnd = NonZeroIsize::new(self.0.raw() as isize).ok_or(HandleError::Unavailable)?;
        let raw = RawWindowHandle::Win32(Win32WindowHandle::new(hwnd));
        Ok(unsafe { RawHandle::borrow_raw(raw) })
    }
}

impl HasDisplayHandle for Owner {
    fn display_handle(&self) -> Result<DisplayHandle<'_>, HandleError> {
        Ok(DisplayHandle::windows())
    }
}

/// Native open/save dialogs and message boxes.
pub struct DialogPrompts {
    title: String,
}

impl DialogPrompts {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }

    fn file_dialog(&self, owner: WindowHandle, extension: &str) -> FileDialog {
        FileDialog::new()
            .set_title(&self.title)
            .add_filter("Plugin state", &[extension])
            .set_parent(&Owner(owner))
    }
}

fn with_extension(mut path: PathBuf, extension: &str) -> PathBuf {
    if path.extension().is_none() {
        path.set_extension(extension);
    }
    path
}

impl UserPrompts for DialogPrompts {
    fn pick_save_target(&self, owner: WindowHandle, extension: &str) -> Option<PersistenceTarget> {
        let path = self.file_dialog(owner, extension).save_file()?;
        PersistenceTarget::from_path(&with_extension(path, extension))
    }

    fn pick_load_target(&self, owner: WindowHandle, extension: &str) -> Option<PersistenceTarget> {
        let path = self.file_dialog(owner, extension).pick_file()?;
        PersistenceTarget::from_path(&path)
    }

    fn show_error(&self, owner: WindowHandle, message: &str) {
        MessageDialog::new()
            .set_level(MessageLevel::Error)
            .set_title(&self.title)
            .set_description(message)
            .set_buttons(MessageButtons::Ok)
            .set_parent(&Owner(owner))
            .show();
    }
}

/// Reports a fatal startup error when no host window exists.
pub fn show_fatal_error(title: &str, message: &str) {
    MessageDialog::new()
        .set_level(MessageLevel::Error)
        .set_title(title)
        .set_description(message)
        .set_buttons(MessageButtons::Ok)
        .show();
}
