use std::cell::{Cell, RefCell};
use std::mem::size_of;
use std::rc::Weak;

use once_cell::sync::OnceCell;
use windows::core::{w, HSTRING, PCWSTR, PWSTR};
use windows::Win32::Foundation::{HINSTANCE, HWND, LPARAM, LRESULT, RECT, WPARAM};
use windows::Win32::System::LibraryLoader::GetModuleHandleW;
use windows::Win32::UI::HiDpi::{
    AdjustWindowRectExForDpi, GetDpiForWindow, SetProcessDpiAwarenessContext,
    DPI_AWARENESS_CONTEXT_PER_MONITOR_AWARE_V2,
};
use windows::Win32::UI::WindowsAndMessaging::{
    CreateWindowExW, DefWindowProcW, DestroyWindow, DispatchMessageW, GetClientRect, GetMenu,
    GetMessageW, GetSystemMenu, GetWindowLongPtrW, InsertMenuItemW, LoadCursorW,
    PostQuitMessage, RegisterClassExW, SetTimer, SetWindowLongPtrW, SetWindowPos, ShowWindow,
    TranslateMessage, CS_HREDRAW, CS_VREDRAW, CW_USEDEFAULT, GWL_EXSTYLE, GWL_STYLE, IDC_ARROW,
    MENUITEMINFOW, MFT_SEPARATOR, MIIM_FTYPE, MIIM_ID, MIIM_STRING, MSG, SWP_FRAMECHANGED,
    SWP_NOACTIVATE, SWP_NOMOVE, SWP_NOSIZE, SWP_NOZORDER, SW_NORMAL, WINDOW_EX_STYLE,
    WINDOW_STYLE, WM_DESTROY, WM_DPICHANGED, WM_NCDESTROY, WM_SHOWWINDOW, WM_SYSCOMMAND,
    WM_WINDOWPOSCHANGED, WNDCLASSEXW, WS_CLIPCHILDREN, WS_OVERLAPPEDWINDOW,
};

use crate::error::WindowError;
use crate::event::{EventOutcome, WindowEvent, WindowEventSink};
use crate::geometry::{ContentSize, FrameInsets, OuterSize, WindowStyle};
use crate::menu::{MenuEntry, MenuItemPlacement};
use crate::negotiator::{FrameMetrics, StandardFrameMetrics};
use crate::options::HostWindowOptions;
use crate::registry::{dispatch, WindowRegistry};
use crate::window::{NativeWindow, WindowHandle};

const CLASS_NAME: PCWSTR = w!("HarmoniqStandaloneHostWindow");
const IDLE_TIMER_ID: usize = 1;

static CLASS_REGISTERED: OnceCell<()> = OnceCell::new();

thread_local! {
    static SINKS: RefCell<WindowRegistry> = RefCell::new(WindowRegistry::new());
}

fn os_error(operation: &'static str, err: windows::core::Error) -> WindowError {
    WindowError::os(operation, err.message())
}

fn handle_of(hwnd: HWND) -> WindowHandle {
    WindowHandle::from_raw(hwnd.0 as usize)
}

/// Opts the process into per-monitor DPI notifications.
///
/// Must run before the first window is created.
pub fn enable_per_monitor_dpi() {
    let aware =
        unsafe { SetProcessDpiAwarenessContext(DPI_AWARENESS_CONTEXT_PER_MONITOR_AWARE_V2) };
    if let Err(err) = aware {
        tracing::debug!(error = %err.message(), "dpi awareness already configured");
    }
}

fn register_class(instance: HINSTANCE) -> Result<(), WindowError> {
    CLASS_REGISTERED
        .get_or_try_init(|| {
            let class = WNDCLASSEXW {
                cbSize: size_of::<WNDCLASSEXW>() as u32,
                style: CS_HREDRAW | CS_VREDRAW,
                lpfnWndProc: Some(host_window_proc),
                hInstance: instance,
                hCursor: unsafe { LoadCursorW(None, IDC_ARROW) }
                    .map_err(|err| os_error("LoadCursorW", err))?,
                lpszClassName: CLASS_NAME,
                ..Default::default()
            };
            if unsafe { RegisterClassExW(&class) } == 0 {
                return Err(os_error("RegisterClassExW", windows::core::Error::from_win32()));
            }
            Ok(())
        })
        .map(|_| ())
}

/// Frame insets as computed by the OS for a given extended style.
#[derive(Debug, Clone, Copy)]
pub struct Win32FrameMetrics {
    ex_style: u32,
}

impl FrameMetrics for Win32FrameMetrics {
    fn insets(&self, style: WindowStyle, has_menu: bool, dpi: u32) -> FrameInsets {
        let mut rect = RECT::default();
        let adjusted = unsafe {
            AdjustWindowRectExForDpi(
                &mut rect,
                WINDOW_STYLE(style.bits()),
                has_menu,
                WINDOW_EX_STYLE(self.ex_style),
                dpi,
            )
        };
        match adjusted {
            Ok(()) => FrameInsets {
                left: rect.left.unsigned_abs(),
                top: rect.top.unsigned_abs(),
                right: rect.right.max(0) as u32,
                bottom: rect.bottom.max(0) as u32,
            },
            Err(err) => {
                tracing::warn!(error = %err.message(), "AdjustWindowRectExForDpi failed");
                StandardFrameMetrics::default().insets(style, has_menu, dpi)
            }
        }
    }
}

/// A top-level Win32 window hosting a plugin GUI.
pub struct Win32Window {
    hwnd: HWND,
    released: Cell<bool>,
}

impl Win32Window {
    /// Creates the hidden overlapped window. Call [`NativeWindow::show_normal`]
    /// once the plugin GUI is parented.
    pub fn create(options: &HostWindowOptions) -> Result<Self, WindowError> {
        let module =
            unsafe { GetModuleHandleW(None) }.map_err(|err| os_error("GetModuleHandleW", err))?;
        let instance = HINSTANCE(module.0);
        register_class(instance)?;

        let title = HSTRING::from(options.title.as_str());
        let hwnd = unsafe {
            CreateWindowExW(
                WINDOW_EX_STYLE(0),
                CLASS_NAME,
                &title,
                WS_OVERLAPPEDWINDOW | WS_CLIPCHILDREN,
                CW_USEDEFAULT,
                CW_USEDEFAULT,
                CW_USEDEFAULT,
                CW_USEDEFAULT,
                None,
                None,
                Some(instance),
                None,
            )
        }
        .map_err(|err| os_error("CreateWindowExW", err))?;
        tracing::debug!(hwnd = hwnd.0 as usize, "created host window");

        Ok(Self {
            hwnd,
            released: Cell::new(false),
        })
    }

    /// Wakes the message loop every `interval_ms` so idle work can run.
    pub fn start_idle_timer(&self, interval_ms: u32) {
        if unsafe { SetTimer(Some(self.hwnd), IDLE_TIMER_ID, interval_ms, None) } == 0 {
            tracing::warn!("failed to start idle timer");
        }
    }

    fn live(&self) -> Result<HWND, WindowError> {
        if self.released.get() {
            Err(WindowError::Released)
        } else {
            Ok(self.hwnd)
        }
    }
}

impl NativeWindow for Win32Window {
    type Metrics = Win32FrameMetrics;

    fn handle(&self) -> WindowHandle {
        handle_of(self.hwnd)
    }

    fn frame_metrics(&self) -> Win32FrameMetrics {
        let ex_style = unsafe { GetWindowLongPtrW(self.hwnd, GWL_EXSTYLE) } as u32;
        Win32FrameMetrics { ex_style }
    }

    fn bind_events(&self, sink: Weak<dyn WindowEventSink>) {
        SINKS.with(|sinks| sinks.borrow_mut().register(self.handle(), sink));
    }

    fn install_system_menu(&self, entries: &[MenuItemPlacement]) -> Result<(), WindowError> {
        let hwnd = self.live()?;
        let menu = unsafe { GetSystemMenu(hwnd, false) };
        if menu.is_invalid() {
            return Err(WindowError::os("GetSystemMenu", "window has no system menu"));
        }
        for placement in entries {
            let result = match placement.entry {
                MenuEntry::Separator => {
                    let item = MENUITEMINFOW {
                        cbSize: size_of::<MENUITEMINFOW>() as u32,
                        fMask: MIIM_FTYPE,
                        fType: MFT_SEPARATOR,
                        ..Default::default()
                    };
                    unsafe { InsertMenuItemW(menu, placement.position, true, &item) }
                }
                MenuEntry::Command(command) => {
                    let mut label: Vec<u16> =
                        command.label().encode_utf16().chain(Some(0)).collect();
                    let item = MENUITEMINFOW {
                        cbSize: size_of::<MENUITEMINFOW>() as u32,
                        fMask: MIIM_STRING | MIIM_ID,
                        wID: command.id(),
                        dwTypeData: PWSTR(label.as_mut_ptr()),
                        ..Default::default()
                    };
                    unsafe { InsertMenuItemW(menu, placement.position, true, &item) }
                }
            };
            result.map_err(|err| os_error("InsertMenuItemW", err))?;
        }
        Ok(())
    }

    fn style(&self) -> WindowStyle {
        WindowStyle::from_bits(unsafe { GetWindowLongPtrW(self.hwnd, GWL_STYLE) } as u32)
    }

    fn set_style(&self, style: WindowStyle) -> Result<(), WindowError> {
        let hwnd = self.live()?;
        unsafe {
            SetWindowLongPtrW(hwnd, GWL_STYLE, style.bits() as isize);
            SetWindowPos(
                hwnd,
                None,
                0,
                0,
                0,
                0,
                SWP_FRAMECHANGED | SWP_NOMOVE | SWP_NOSIZE | SWP_NOZORDER | SWP_NOACTIVATE,
            )
        }
        .map_err(|err| os_error("SetWindowPos", err))
    }

    fn has_menu(&self) -> bool {
        !unsafe { GetMenu(self.hwnd) }.is_invalid()
    }

    fn dpi(&self) -> u32 {
        unsafe { GetDpiForWindow(self.hwnd) }
    }

    fn client_size(&self) -> Result<ContentSize, WindowError> {
        let hwnd = self.live()?;
        let mut rect = RECT::default();
        unsafe { GetClientRect(hwnd, &mut rect) }.map_err(|err| os_error("GetClientRect", err))?;
        Ok(ContentSize::new(
            (rect.right - rect.left).max(0) as u32,
            (rect.bottom - rect.top).max(0) as u32,
        ))
    }

    fn resize_outer(&self, size: OuterSize) -> Result<(), WindowError> {
        let hwnd = self.live()?;
        unsafe {
            SetWindowPos(
                hwnd,
                None,
                0,
                0,
                size.width as i32,
                size.height as i32,
                SWP_NOZORDER | SWP_NOACTIVATE | SWP_NOMOVE,
            )
        }
        .map_err(|err| os_error("SetWindowPos", err))
    }

    fn show_normal(&self) {
        if let Ok(hwnd) = self.live() {
            let _ = unsafe { ShowWindow(hwnd, SW_NORMAL) };
        }
    }

    fn release(&self) {
        self.released.set(true);
    }
}

impl Drop for Win32Window {
    fn drop(&mut self) {
        if self.released.replace(true) {
            return;
        }
        if let Err(err) = unsafe { DestroyWindow(self.hwnd) } {
            tracing::warn!(error = %err.message(), "DestroyWindow failed");
        }
    }
}

fn translate(message: u32, wparam: WPARAM) -> Option<WindowEvent> {
    match message {
        WM_SHOWWINDOW => Some(WindowEvent::Show {
            visible: wparam.0 != 0,
        }),
        WM_DPICHANGED => Some(WindowEvent::DpiChanged {
            dpi: (wparam.0 & 0xFFFF) as u32,
        }),
        WM_WINDOWPOSCHANGED => Some(WindowEvent::PositionChanged),
        WM_SYSCOMMAND => Some(WindowEvent::SystemCommand {
            id: wparam.0 as u32,
        }),
        WM_DESTROY => Some(WindowEvent::Destroy),
        _ => None,
    }
}

unsafe extern "system" fn host_window_proc(
    hwnd: HWND,
    message: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    if message == WM_NCDESTROY {
        SINKS.with(|sinks| sinks.borrow_mut().unregister(handle_of(hwnd)));
    } else if let Some(event) = translate(message, wparam) {
        let lookup = |handle| SINKS.with(|sinks| sinks.borrow().lookup(handle));
        if dispatch(lookup, handle_of(hwnd), event) == EventOutcome::Handled {
            return LRESULT(0);
        }
    }
    unsafe { DefWindowProcW(hwnd, message, wparam, lparam) }
}

/// Pumps messages until a quit message arrives and returns its exit code.
///
/// `idle` runs after every dispatched message.
pub fn run_message_loop(mut idle: impl FnMut()) -> i32 {
    let mut message = MSG::default();
    loop {
        let result = unsafe { GetMessageW(&mut message, None, 0, 0) };
        if result.0 == -1 {
            tracing::error!("GetMessageW failed");
            return 1;
        }
        if !result.as_bool() {
            return message.wParam.0 as i32;
        }
        unsafe {
            let _ = TranslateMessage(&message);
            DispatchMessageW(&message);
        }
        idle();
    }
}

pub fn post_quit(code: i32) {
    unsafe { PostQuitMessage(code) };
}
