//! Content/outer size conversion and frame-chrome selection.
//!
//! Everything in here is pure: the native frame metrics are supplied through
//! [`FrameMetrics`], so the arithmetic can be exercised without an OS window.

use crate::geometry::{
    ContentSize, FrameInsets, OuterSize, ResizePolicy, WindowStyle, USER_DEFAULT_SCREEN_DPI,
};

/// Source of frame insets for a given style, menu presence and DPI.
pub trait FrameMetrics {
    fn insets(&self, style: WindowStyle, has_menu: bool, dpi: u32) -> FrameInsets;
}

/// Default desktop frame metrics, scaled linearly from their 96 DPI values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StandardFrameMetrics {
    pub sizing_border: u32,
    pub fixed_border: u32,
    pub caption: u32,
    pub menu_bar: u32,
}

impl Default for StandardFrameMetrics {
    fn default() -> Self {
        Self {
            sizing_border: 8,
            fixed_border: 3,
            caption: 23,
            menu_bar: 20,
        }
    }
}

impl FrameMetrics for StandardFrameMetrics {
    fn insets(&self, style: WindowStyle, has_menu: bool, dpi: u32) -> FrameInsets {
        let border = if style.is_resizable() {
            self.sizing_border
        } else if style.contains(WindowStyle::DIALOG_FRAME) || style.contains(WindowStyle::BORDER) {
            self.fixed_border
        } else {
            0
        };
        let mut top = border;
        if style.has_caption() {
            top += self.caption;
        }
        if has_menu {
            top += self.menu_bar;
        }
        FrameInsets {
            left: scale_for_dpi(border, dpi),
            top: scale_for_dpi(top, dpi),
            right: scale_for_dpi(border, dpi),
            bottom: scale_for_dpi(border, dpi),
        }
    }
}

/// Scales a 96 DPI metric, rounding to the nearest pixel.
pub fn scale_for_dpi(value: u32, dpi: u32) -> u32 {
    let scaled = u64::from(value) * u64::from(dpi) + u64::from(USER_DEFAULT_SCREEN_DPI / 2);
    (scaled / u64::from(USER_DEFAULT_SCREEN_DPI)) as u32
}

/// Converts between plugin content sizes and OS window sizes.
#[derive(Debug, Clone, Default)]
pub struct SizeNegotiator<M> {
    metrics: M,
}

impl<M: FrameMetrics> SizeNegotiator<M> {
    pub fn new(metrics: M) -> Self {
        Self { metrics }
    }

    /// Outer window size that yields `content` as the client area.
    pub fn outer_size(
        &self,
        content: ContentSize,
        style: WindowStyle,
        has_menu: bool,
        dpi: u32,
    ) -> OuterSize {
        let insets = self.metrics.insets(style, has_menu, dpi);
        OuterSize::new(
            content.width.saturating_add(insets.horizontal()),
            content.height.saturating_add(insets.vertical()),
        )
    }

    /// Client area left by an outer window size. Never underflows.
    pub fn content_size(
        &self,
        outer: OuterSize,
        style: WindowStyle,
        has_menu: bool,
        dpi: u32,
    ) -> ContentSize {
        let insets = self.metrics.insets(style, has_menu, dpi);
        ContentSize::new(
            outer.width.saturating_sub(insets.horizontal()),
            outer.height.saturating_sub(insets.vertical()),
        )
    }
}

/// Frame chrome for a window whose resize policy is `policy`.
///
/// A fixed window keeps its caption, system menu and minimize box but loses
/// the sizing border and maximize box. Bits outside the overlapped-window
/// mask (clip-children, visibility) are preserved.
pub fn chrome_for_policy(policy: ResizePolicy, current: WindowStyle) -> WindowStyle {
    match policy {
        ResizePolicy::UserResizable => current | WindowStyle::OVERLAPPED_WINDOW,
        ResizePolicy::Fixed => {
            current.difference(WindowStyle::OVERLAPPED_WINDOW)
                | WindowStyle::OVERLAPPED
                | WindowStyle::CAPTION
                | WindowStyle::SYSTEM_MENU
                | WindowStyle::MINIMIZE_BOX
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resizable() -> WindowStyle {
        WindowStyle::OVERLAPPED_WINDOW | WindowStyle::CLIP_CHILDREN
    }

    #[test]
    fn outer_size_adds_frame_and_caption() {
        let negotiator = SizeNegotiator::new(StandardFrameMetrics::default());
        let outer = negotiator.outer_size(ContentSize::new(800, 640), resizable(), false, 96);
        assert_eq!(outer, OuterSize::new(816, 679));
    }

    #[test]
    fn menu_bar_adds_to_top_inset() {
        let negotiator = SizeNegotiator::new(StandardFrameMetrics::default());
        let without = negotiator.outer_size(ContentSize::new(400, 300), resizable(), false, 96);
        let with = negotiator.outer_size(ContentSize::new(400, 300), resizable(), true, 96);
        assert_eq!(with.width, without.width);
        assert_eq!(with.height - without.height, 20);
    }

    #[test]
    fn insets_scale_with_dpi() {
        let metrics = StandardFrameMetrics::default();
        let at_96 = metrics.insets(resizable(), false, 96);
        let at_192 = metrics.insets(resizable(), false, 192);
        assert_eq!(at_192.left, at_96.left * 2);
        assert_eq!(at_192.top, at_96.top * 2);
        assert_eq!(scale_for_dpi(23, 144), 35);
    }

    #[test]
    fn content_size_never_underflows() {
        let negotiator = SizeNegotiator::new(StandardFrameMetrics::default());
        let content = negotiator.content_size(OuterSize::new(4, 4), resizable(), true, 288);
        assert_eq!(content, ContentSize::new(0, 0));
    }

    #[test]
    fn fixed_chrome_drops_sizing_border_and_maximize() {
        let style = chrome_for_policy(ResizePolicy::Fixed, resizable());
        assert!(!style.is_resizable());
        assert!(!style.contains(WindowStyle::MAXIMIZE_BOX));
        assert!(style.contains(WindowStyle::MINIMIZE_BOX));
        assert!(style.contains(WindowStyle::SYSTEM_MENU));
        assert!(style.has_caption());
        assert!(style.contains(WindowStyle::CLIP_CHILDREN));
    }

    #[test]
    fn resizable_chrome_restores_overlapped_window() {
        let fixed = chrome_for_policy(ResizePolicy::Fixed, resizable());
        assert_eq!(chrome_for_policy(ResizePolicy::UserResizable, fixed), resizable());
    }

    #[test]
    fn fixed_frame_is_thinner() {
        let negotiator = SizeNegotiator::new(StandardFrameMetrics::default());
        let fixed = chrome_for_policy(ResizePolicy::Fixed, resizable());
        let outer = negotiator.outer_size(ContentSize::new(500, 400), fixed, false, 96);
        assert_eq!(outer, OuterSize::new(506, 429));
    }
}
