//! The plugin-GUI side of the embedding contract.

use std::ffi::CStr;
use std::fmt;

use crate::geometry::ContentSize;
use crate::window::WindowHandle;

/// Windowing API a plugin GUI is embedded through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WindowApi {
    Win32,
    Cocoa,
    X11,
    Wayland,
}

impl WindowApi {
    /// API native to the platform this crate was compiled for.
    pub const fn native() -> Self {
        if cfg!(target_os = "windows") {
            Self::Win32
        } else if cfg!(target_os = "macos") {
            Self::Cocoa
        } else {
            Self::X11
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Win32 => "win32",
            Self::Cocoa => "cocoa",
            Self::X11 => "x11",
            Self::Wayland => "wayland",
        }
    }

    pub fn as_cstr(self) -> &'static CStr {
        match self {
            Self::Win32 => c"win32",
            Self::Cocoa => c"cocoa",
            Self::X11 => c"x11",
            Self::Wayland => c"wayland",
        }
    }
}

impl fmt::Display for WindowApi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle of the plugin's GUI surface.
///
/// `Destroyed` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GuiSurfaceState {
    #[default]
    Uncreated,
    Created,
    Shown,
    Hidden,
    Destroyed,
}

impl GuiSurfaceState {
    /// Whether the surface exists and may receive calls.
    pub const fn is_live(self) -> bool {
        matches!(self, Self::Created | Self::Shown | Self::Hidden)
    }
}

/// Operations the host invokes on an embedded, non-floating plugin GUI.
///
/// All calls happen on the UI thread. Boolean results report whether the
/// plugin accepted the request.
pub trait EmbeddedGui {
    fn is_api_supported(&self, api: WindowApi) -> bool;
    fn create(&self, api: WindowApi) -> bool;
    fn destroy(&self);
    fn set_scale(&self, scale: f64) -> bool;
    fn can_resize(&self) -> bool;
    fn preferred_size(&self) -> Option<ContentSize>;
    /// Snaps a proposed size to one the plugin accepts. Returns the proposal
    /// unchanged when the plugin has no preference.
    fn adjust_size(&self, proposed: ContentSize) -> ContentSize;
    fn set_size(&self, size: ContentSize) -> bool;
    /// Embeds the surface into `parent`, identified as a window of `api`.
    fn set_parent(&self, api: WindowApi, parent: WindowHandle) -> bool;
    fn show(&self) -> bool;
    fn hide(&self) -> bool;
}
