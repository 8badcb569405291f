use std::cell::RefCell;
use std::rc::Rc;

use anyhow::{Context, Result};
use clap_host::{
    ClapGui, ClapInstance, ClapLibrary, ClapState, HostIdentity, PluginDiscovery, StandaloneHost,
};
use harmoniq_host_window::platform::{self, DialogPrompts, Win32Window};
use harmoniq_host_window::{
    BundleStore, ClapStateSource, HostServices, HostWindowController, PluginInfo, WindowApi,
};
use tracing::info;

use crate::config::StandaloneConfig;
use crate::runtime::{service_host_requests, StandaloneRuntime};

const IDLE_INTERVAL_MS: u32 = 16;

/// Hosts the configured plug-in until its window closes. Returns the exit code.
pub fn run(config: &StandaloneConfig) -> Result<i32> {
    platform::enable_per_monitor_dpi();

    let library = unsafe { ClapLibrary::load(&config.plugin) }?;
    let factory = library.factory()?;

    if config.list {
        for descriptor in PluginDiscovery::new(factory).list() {
            println!(
                "{}\t{} {} ({})",
                descriptor.id, descriptor.name, descriptor.version, descriptor.vendor
            );
        }
        return Ok(0);
    }

    let descriptor = PluginDiscovery::new(factory)
        .select(config.plugin_id.as_deref())
        .with_context(|| match &config.plugin_id {
            Some(id) => format!("{} does not contain plug-in {id}", library.path().display()),
            None => format!("{} does not contain any plug-in", library.path().display()),
        })?;
    info!(id = %descriptor.id, name = %descriptor.name, "hosting plug-in");

    let host = Rc::new(StandaloneHost::new(HostIdentity::default()));
    let instance = unsafe { ClapInstance::create(factory, &descriptor, &host) }
        .with_context(|| format!("failed to instantiate {}", descriptor.id))?;
    let instance = Rc::new(RefCell::new(instance));
    let audio = config.audio_config();

    let (gui, state) = {
        let instance = instance.borrow();
        (ClapGui::from_instance(&instance), ClapState::from_instance(&instance))
    };
    let options = config.window_options(&descriptor.name);
    let persistence = BundleStore::new(
        ClapStateSource::new(descriptor.id.as_str(), state),
        options.resolve_settings_root(),
        options.default_state_file.as_str(),
    );
    let services = HostServices::new(
        StandaloneRuntime::new(Rc::clone(&host), Rc::clone(&instance), audio, platform::post_quit),
        persistence,
        DialogPrompts::new(options.title.as_str()),
    );

    let controller = HostWindowController::create(
        Some(PluginInfo::new(descriptor.id.as_str(), descriptor.name.as_str())),
        gui,
        WindowApi::native(),
        services,
        options,
        |options| {
            let window = Win32Window::create(options)?;
            window.start_idle_timer(IDLE_INTERVAL_MS);
            Ok(window)
        },
    )?;

    let code = platform::run_message_loop(|| service_host_requests(&host, &instance, audio));
    drop(controller);
    info!(code, "host window closed");
    Ok(code)
}
