use std::collections::HashMap;
use std::rc::{Rc, Weak};

use crate::event::{EventOutcome, WindowEvent, WindowEventSink};
use crate::window::WindowHandle;

/// Maps window identities to the sinks handling their notifications.
///
/// Entries are weak, so a registry never keeps a controller alive. Events
/// for unknown or dropped sinks fall through to the default handler.
pub struct WindowRegistry {
    sinks: HashMap<WindowHandle, Weak<dyn WindowEventSink>>,
}

impl WindowRegistry {
    pub fn new() -> Self {
        Self {
            sinks: HashMap::new(),
        }
    }

    pub fn register(&mut self, handle: WindowHandle, sink: Weak<dyn WindowEventSink>) {
        if self.sinks.insert(handle, sink).is_some() {
            tracing::debug!(handle = handle.raw(), "replaced window event sink");
        }
    }

    pub fn unregister(&mut self, handle: WindowHandle) {
        self.sinks.remove(&handle);
    }

    pub fn lookup(&self, handle: WindowHandle) -> Option<Rc<dyn WindowEventSink>> {
        self.sinks.get(&handle).and_then(Weak::upgrade)
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }
}

impl Default for WindowRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Delivers `event` to the sink registered for `handle`.
///
/// The sink is resolved before the call, so `lookup` may hand out a borrow
/// of a registry that the sink re-enters while handling the event.
pub fn dispatch(
    lookup: impl FnOnce(WindowHandle) -> Option<Rc<dyn WindowEventSink>>,
    handle: WindowHandle,
    event: WindowEvent,
) -> EventOutcome {
    match lookup(handle) {
        Some(sink) => sink.handle_event(event),
        None => EventOutcome::PassThrough,
    }
}
