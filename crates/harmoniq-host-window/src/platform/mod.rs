//! Native window and dialog backends.

#[cfg(target_os = "windows")]
mod prompts;
#[cfg(target_os = "windows")]
mod win32;

#[cfg(target_os = "windows")]
pub use prompts::{show_fatal_error, DialogPrompts};
#[cfg(target_os = "windows")]
pub use win32::{
    enable_per_monitor_dpi, post_quit, run_message_loop, Win32FrameMetrics, Win32Window,
};
