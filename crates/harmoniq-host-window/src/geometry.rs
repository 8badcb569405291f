//! Sizes, frame styles and DPI values exchanged between the OS window and
//! the embedded plugin GUI.

use std::ops::BitOr;

/// DPI the OS treats as 100% scale.
pub const USER_DEFAULT_SCREEN_DPI: u32 = 96;

/// Content-area size in physical pixels, as proposed by the plugin or the OS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ContentSize {
    pub width: u32,
    pub height: u32,
}

impl ContentSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Outer window size, frame and title bar included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct OuterSize {
    pub width: u32,
    pub height: u32,
}

impl OuterSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Pixel distance between each outer edge and the content area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FrameInsets {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl FrameInsets {
    pub const fn horizontal(&self) -> u32 {
        self.left + self.right
    }

    pub const fn vertical(&self) -> u32 {
        self.top + self.bottom
    }
}

/// Window style bits, laid out like the Win32 `WS_*` constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct WindowStyle(u32);

impl WindowStyle {
    pub const OVERLAPPED: Self = Self(0x0000_0000);
    pub const MAXIMIZE_BOX: Self = Self(0x0001_0000);
    pub const MINIMIZE_BOX: Self = Self(0x0002_0000);
    pub const THICK_FRAME: Self = Self(0x0004_0000);
    pub const SYSTEM_MENU: Self = Self(0x0008_0000);
    pub const BORDER: Self = Self(0x0080_0000);
    pub const DIALOG_FRAME: Self = Self(0x0040_0000);
    pub const CAPTION: Self = Self(0x00C0_0000);
    pub const CLIP_CHILDREN: Self = Self(0x0200_0000);
    pub const VISIBLE: Self = Self(0x1000_0000);
    pub const OVERLAPPED_WINDOW: Self = Self(
        Self::OVERLAPPED.0
            | Self::CAPTION.0
            | Self::SYSTEM_MENU.0
            | Self::THICK_FRAME.0
            | Self::MINIMIZE_BOX.0
            | Self::MAXIMIZE_BOX.0,
    );

    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    pub const fn bits(self) -> u32 {
        self.0
    }

    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn difference(self, other: Self) -> Self {
        Self(self.0 & !other.0)
    }

    pub const fn has_caption(self) -> bool {
        self.contains(Self::CAPTION)
    }

    pub const fn is_resizable(self) -> bool {
        self.contains(Self::THICK_FRAME)
    }
}

impl BitOr for WindowStyle {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// Whether the user may resize the host window.
///
/// Fixed once during setup from the plugin's resize capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResizePolicy {
    Fixed,
    UserResizable,
}

impl ResizePolicy {
    pub const fn from_capability(can_resize: bool) -> Self {
        if can_resize {
            Self::UserResizable
        } else {
            Self::Fixed
        }
    }
}

/// Current monitor DPI and the scale factor forwarded to the plugin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DpiContext {
    pub dpi: u32,
    pub scale: f64,
}

impl DpiContext {
    /// A DPI of zero (no monitor information) falls back to the default DPI.
    pub fn from_dpi(dpi: u32) -> Self {
        let dpi = if dpi == 0 { USER_DEFAULT_SCREEN_DPI } else { dpi };
        Self {
            dpi,
            scale: f64::from(dpi) / f64::from(USER_DEFAULT_SCREEN_DPI),
        }
    }
}

impl Default for DpiContext {
    fn default() -> Self {
        Self::from_dpi(USER_DEFAULT_SCREEN_DPI)
    }
}
