use std::rc::Weak;

use crate::error::WindowError;
use crate::event::WindowEventSink;
use crate::geometry::{ContentSize, OuterSize, WindowStyle};
use crate::menu::MenuItemPlacement;
use crate::negotiator::FrameMetrics;

/// Opaque identity of an OS top-level window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowHandle(usize);

impl WindowHandle {
    pub const fn from_raw(raw: usize) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> usize {
        self.0
    }
}

/// A top-level OS window hosting an embedded plugin GUI.
///
/// Implementations own the native window. Dropping one that has not been
/// [released](NativeWindow::release) destroys the native window.
pub trait NativeWindow {
    type Metrics: FrameMetrics;

    fn handle(&self) -> WindowHandle;

    /// Frame metrics matching this window's extended style.
    fn frame_metrics(&self) -> Self::Metrics;

    /// Routes OS notifications for this window to `sink`.
    fn bind_events(&self, sink: Weak<dyn WindowEventSink>);

    fn install_system_menu(&self, entries: &[MenuItemPlacement]) -> Result<(), WindowError>;

    fn style(&self) -> WindowStyle;
    fn set_style(&self, style: WindowStyle) -> Result<(), WindowError>;
    fn has_menu(&self) -> bool;
    fn dpi(&self) -> u32;
    fn client_size(&self) -> Result<ContentSize, WindowError>;

    /// Resizes the outer frame without moving, reordering or activating it.
    fn resize_outer(&self, size: OuterSize) -> Result<(), WindowError>;

    /// Shows the window in its normal state.
    fn show_normal(&self);

    /// Forgets the native window after the OS has destroyed it.
    fn release(&self);
}
