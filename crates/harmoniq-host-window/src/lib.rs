//! Host window for a standalone CLAP plugin: embeds the plugin GUI in an OS
//! top-level window, negotiates its size across DPI changes and exposes
//! state save/load/reset through the window's system menu.

mod clap;
mod controller;
mod error;
mod event;
mod geometry;
mod gui;
mod menu;
mod negotiator;
mod options;
mod persistence;
mod registry;
mod services;
mod window;

pub mod platform;

pub use clap::ClapStateSource;
pub use controller::{HostWindowController, PluginInfo};
pub use error::{PersistenceError, SetupError, WindowError};
pub use event::{EventOutcome, WindowEvent, WindowEventSink};
pub use geometry::{
    ContentSize, DpiContext, FrameInsets, OuterSize, ResizePolicy, WindowStyle,
    USER_DEFAULT_SCREEN_DPI,
};
pub use gui::{EmbeddedGui, GuiSurfaceState, WindowApi};
pub use menu::{system_menu_layout, MenuCommand, MenuEntry, MenuItemPlacement};
pub use negotiator::{
    chrome_for_policy, scale_for_dpi, FrameMetrics, SizeNegotiator, StandardFrameMetrics,
};
pub use options::{HostWindowOptions, SETTINGS_DIR_NAME};
pub use persistence::{
    BundleStore, PersistenceTarget, PluginStateSource, StateBundle, StatePersistence,
    BUNDLE_FORMAT_VERSION,
};
pub use registry::{dispatch, WindowRegistry};
pub use services::{HostRuntime, HostServices, SettingsSurface, UserPrompts};
pub use window::{NativeWindow, WindowHandle};
