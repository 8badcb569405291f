use std::cell::RefCell;
use std::rc::Rc;

use clap_host::{AudioConfig, ClapInstance, ResizeHandler, StandaloneHost};
use harmoniq_host_window::HostRuntime;
use tracing::{error, info, trace, warn};

/// Activates the hosted plug-in while its window is alive.
pub struct StandaloneRuntime {
    host: Rc<StandaloneHost>,
    instance: Rc<RefCell<ClapInstance>>,
    audio: AudioConfig,
    exit: fn(i32),
}

impl StandaloneRuntime {
    pub fn new(
        host: Rc<StandaloneHost>,
        instance: Rc<RefCell<ClapInstance>>,
        audio: AudioConfig,
        exit: fn(i32),
    ) -> Self {
        Self {
            host,
            instance,
            audio,
            exit,
        }
    }
}

impl HostRuntime for StandaloneRuntime {
    fn set_resize_handler(&self, handler: ResizeHandler) {
        self.host.set_resize_handler(handler);
    }

    fn start_processing(&self) {
        let Ok(mut instance) = self.instance.try_borrow_mut() else {
            warn!("plug-in instance busy, not activated");
            return;
        };
        match instance.activate(self.audio) {
            Ok(()) => info!(
                sample_rate = self.audio.sample_rate,
                max_frames = self.audio.max_frames_count,
                "plug-in activated"
            ),
            Err(err) => error!(%err, "plug-in activation failed"),
        }
    }

    fn stop_processing(&self) {
        self.host.clear_resize_handler();
        match self.instance.try_borrow_mut() {
            Ok(mut instance) => {
                instance.deactivate();
                info!("plug-in deactivated");
            }
            Err(_) => warn!("plug-in instance busy, not deactivated"),
        }
    }

    fn request_exit(&self, code: i32) {
        (self.exit)(code);
    }
}

/// Services requests the plug-in raised through the host since the last call.
pub fn service_host_requests(
    host: &StandaloneHost,
    instance: &RefCell<ClapInstance>,
    audio: AudioConfig,
) {
    host.service_resize_request();
    if host.take_restart_request() {
        match instance.try_borrow_mut() {
            Ok(mut instance) if instance.is_activated() => {
                instance.deactivate();
                if let Err(err) = instance.activate(audio) {
                    error!(%err, "plug-in failed to reactivate after restart request");
                }
            }
            Ok(_) => trace!("restart requested while inactive"),
            Err(_) => warn!("plug-in instance busy, restart request dropped"),
        }
    }
    if host.take_callback_request() {
        match instance.try_borrow() {
            Ok(instance) => instance.on_main_thread(),
            Err(_) => warn!("plug-in instance busy, main-thread callback dropped"),
        }
    }
    if host.take_process_request() {
        trace!("plug-in requested processing");
    }
}
