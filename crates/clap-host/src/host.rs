use std::cell::RefCell;
use std::ffi::{c_char, c_void, CStr, CString};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::thread::{self, ThreadId};

use clap_sys::ext::gui::{clap_host_gui, CLAP_EXT_GUI};
use clap_sys::host::clap_host;
use clap_sys::version::CLAP_VERSION;
use tracing::{debug, info, trace};

/// Handler invoked when the plug-in asks the host to resize its editor.
pub type ResizeHandler = Box<dyn Fn(u32, u32) -> bool>;

/// Names the host reports to plug-ins.
#[derive(Debug, Clone)]
pub struct HostIdentity {
    pub name: String,
    pub vendor: String,
    pub url: String,
    pub version: String,
}

impl Default for HostIdentity {
    fn default() -> Self {
        Self {
            name: "Harmoniq Standalone".to_owned(),
            vendor: "Harmoniq Studio".to_owned(),
            url: "https://github.com/BobTheZombie/Harmoniq-Studio".to_owned(),
            version: env!("CARGO_PKG_VERSION").to_owned(),
        }
    }
}

struct HostShared {
    _strings: [CString; 4],
    main_thread: ThreadId,
    // Main thread only. Off-thread resize requests go through `pending_resize`.
    resize: RefCell<Option<ResizeHandler>>,
    resize_pending: AtomicBool,
    pending_resize: AtomicU64,
    callback_requested: AtomicBool,
    restart_requested: AtomicBool,
    process_requested: AtomicBool,
}

/// Host-side `clap_host` vtable for a single hosted plug-in.
///
/// `host_data` points at heap state owned by this value, so it must outlive
/// every plug-in instance created with it. The thread that constructs the
/// host is treated as the plug-in's main thread.
pub struct StandaloneHost {
    raw: Box<clap_host>,
    shared: Box<HostShared>,
}

static HOST_GUI: clap_host_gui = clap_host_gui {
    resize_hints_changed: Some(resize_hints_changed),
    request_resize: Some(request_resize),
    request_show: Some(request_show),
    request_hide: Some(request_hide),
    closed: Some(closed),
};

impl StandaloneHost {
    pub fn new(identity: HostIdentity) -> Self {
        let strings = [
            to_c_string(identity.name),
            to_c_string(identity.vendor),
            to_c_string(identity.url),
            to_c_string(identity.version),
        ];
        let shared = Box::new(HostShared {
            main_thread: thread::current().id(),
            resize: RefCell::new(None),
            resize_pending: AtomicBool::new(false),
            pending_resize: AtomicU64::new(0),
            callback_requested: AtomicBool::new(false),
            restart_requested: AtomicBool::new(false),
            process_requested: AtomicBool::new(false),
            _strings: strings,
        });
        let raw = Box::new(clap_host {
            clap_version: CLAP_VERSION,
            host_data: &*shared as *const HostShared as *mut c_void,
            name: shared._strings[0].as_ptr(),
            vendor: shared._strings[1].as_ptr(),
            url: shared._strings[2].as_ptr(),
            version: shared._strings[3].as_ptr(),
            get_extension: Some(get_extension),
            request_restart: Some(request_restart),
            request_process: Some(request_process),
            request_callback: Some(request_callback),
        });
        Self { raw, shared }
    }

    pub fn as_raw(&self) -> *const clap_host {
        &*self.raw
    }

    /// Route plug-in initiated resize requests to `handler`, replacing any previous one.
    pub fn set_resize_handler(&self, handler: ResizeHandler) {
        *self.shared.resize.borrow_mut() = Some(handler);
    }

    /// No-op while a resize request is being serviced.
    pub fn clear_resize_handler(&self) {
        match self.shared.resize.try_borrow_mut() {
            Ok(mut handler) => {
                handler.take();
            }
            Err(_) => debug!("resize handler busy, not cleared"),
        }
    }

    /// Runs a resize request that arrived on another thread, if any.
    /// Returns whether one was pending.
    pub fn service_resize_request(&self) -> bool {
        if !self.shared.resize_pending.swap(false, Ordering::AcqRel) {
            return false;
        }
        let (width, height) = unpack_size(self.shared.pending_resize.load(Ordering::Acquire));
        self.shared.dispatch_resize(width, height);
        true
    }

    /// Returns and clears a pending `request_callback`.
    pub fn take_callback_request(&self) -> bool {
        self.shared.callback_requested.swap(false, Ordering::AcqRel)
    }

    pub fn take_restart_request(&self) -> bool {
        self.shared.restart_requested.swap(false, Ordering::AcqRel)
    }

    pub fn take_process_request(&self) -> bool {
        self.shared.process_requested.swap(false, Ordering::AcqRel)
    }
}

impl Default for StandaloneHost {
    fn default() -> Self {
        Self::new(HostIdentity::default())
    }
}

impl HostShared {
    fn dispatch_resize(&self, width: u32, height: u32) -> bool {
        let Ok(handler) = self.resize.try_borrow() else {
            return false;
        };
        match handler.as_ref() {
            Some(handler) => handler(width, height),
            None => {
                debug!(width, height, "resize requested before a host window was registered");
                false
            }
        }
    }
}

fn pack_size(width: u32, height: u32) -> u64 {
    (u64::from(width) << 32) | u64::from(height)
}

fn unpack_size(packed: u64) -> (u32, u32) {
    ((packed >> 32) as u32, packed as u32)
}

fn to_c_string(value: String) -> CString {
    CString::new(value.replace('\0', "")).unwrap_or_default()
}

unsafe fn shared<'a>(host: *const clap_host) -> Option<&'a HostShared> {
    if host.is_null() {
        return None;
    }
    ((*host).host_data as *const HostShared).as_ref()
}

unsafe extern "C" fn get_extension(_host: *const clap_host, id: *const c_char) -> *const c_void {
    if id.is_null() {
        return std::ptr::null();
    }
    if CStr::from_ptr(id) == CLAP_EXT_GUI {
        return &HOST_GUI as *const clap_host_gui as *const c_void;
    }
    std::ptr::null()
}

unsafe extern "C" fn request_restart(host: *const clap_host) {
    if let Some(shared) = shared(host) {
        shared.restart_requested.store(true, Ordering::Release);
    }
}

unsafe extern "C" fn request_process(host: *const clap_host) {
    if let Some(shared) = shared(host) {
        shared.process_requested.store(true, Ordering::Release);
    }
}

unsafe extern "C" fn request_callback(host: *const clap_host) {
    if let Some(shared) = shared(host) {
        shared.callback_requested.store(true, Ordering::Release);
    }
}

unsafe extern "C" fn resize_hints_changed(_host: *const clap_host) {
    trace!("plug-in reported new resize hints; resize policy is fixed for the session");
}

unsafe extern "C" fn request_resize(host: *const clap_host, width: u32, height: u32) -> bool {
    let Some(shared) = shared(host) else {
        return false;
    };
    if thread::current().id() == shared.main_thread {
        return shared.dispatch_resize(width, height);
    }
    // Accepted asynchronously; the latest size wins.
    trace!(width, height, "resize requested off the main thread, deferred");
    shared.pending_resize.store(pack_size(width, height), Ordering::Release);
    shared.resize_pending.store(true, Ordering::Release);
    true
}

unsafe extern "C" fn request_show(_host: *const clap_host) -> bool {
    info!("plug-in requested its editor to be shown");
    false
}

unsafe extern "C" fn request_hide(_host: *const clap_host) -> bool {
    info!("plug-in requested its editor to be hidden");
    false
}

unsafe extern "C" fn closed(_host: *const clap_host, was_destroyed: bool) {
    info!(was_destroyed, "plug-in reported its editor closed");
}
