use std::cell::{Cell, OnceCell};
use std::rc::{Rc, Weak};

use crate::error::{SetupError, WindowError};
use crate::event::{EventOutcome, WindowEvent, WindowEventSink};
use crate::geometry::{ContentSize, DpiContext, ResizePolicy};
use crate::gui::{EmbeddedGui, GuiSurfaceState, WindowApi};
use crate::menu::{system_menu_layout, MenuCommand};
use crate::negotiator::{chrome_for_policy, SizeNegotiator};
use crate::options::HostWindowOptions;
use crate::services::HostServices;
use crate::window::NativeWindow;

/// Identity of the hosted plugin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginInfo {
    pub id: String,
    pub name: String,
}

impl PluginInfo {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Owns one OS top-level window and the plugin GUI embedded in it.
///
/// The controller is shared through `Rc` and mutated through cells, since
/// the OS re-enters it synchronously (a resize request produces a
/// position-changed notification before returning).
pub struct HostWindowController<W: NativeWindow, G> {
    window: W,
    gui: G,
    plugin: PluginInfo,
    api: WindowApi,
    services: HostServices,
    options: HostWindowOptions,
    negotiator: SizeNegotiator<W::Metrics>,
    policy: OnceCell<ResizePolicy>,
    surface: Cell<GuiSurfaceState>,
    dpi: Cell<DpiContext>,
}

impl<W, G> HostWindowController<W, G>
where
    W: NativeWindow + 'static,
    G: EmbeddedGui + 'static,
{
    /// Creates the window, embeds the plugin GUI and starts audio processing.
    ///
    /// Nothing is created when `plugin` or `gui` is missing. On any later
    /// failure the partially built window is destroyed before returning.
    pub fn create<F>(
        plugin: Option<PluginInfo>,
        gui: Option<G>,
        api: WindowApi,
        services: HostServices,
        options: HostWindowOptions,
        create_window: F,
    ) -> Result<Rc<Self>, SetupError>
    where
        F: FnOnce(&HostWindowOptions) -> Result<W, WindowError>,
    {
        let plugin = plugin.ok_or(SetupError::MissingPlugin)?;
        let gui = gui.ok_or(SetupError::MissingGui)?;

        let window = create_window(&options).map_err(SetupError::WindowCreation)?;
        let dpi = DpiContext::from_dpi(window.dpi());
        let negotiator = SizeNegotiator::new(window.frame_metrics());
        let controller = Rc::new(Self {
            window,
            gui,
            plugin,
            api,
            services,
            options,
            negotiator,
            policy: OnceCell::new(),
            surface: Cell::new(GuiSurfaceState::Uncreated),
            dpi: Cell::new(dpi),
        });

        let sink: Rc<dyn WindowEventSink> = controller.clone();
        controller.window.bind_events(Rc::downgrade(&sink));
        drop(sink);

        if let Err(err) = controller.window.install_system_menu(&system_menu_layout()) {
            tracing::warn!(%err, "failed to extend the system menu");
        }
        controller.install_resize_handler(Rc::downgrade(&controller));

        if !controller.gui.is_api_supported(api) {
            return Err(SetupError::UnsupportedApi { api });
        }
        controller.setup_plugin()?;

        controller.window.show_normal();
        controller.services.runtime.start_processing();
        tracing::info!(
            plugin = %controller.plugin.id,
            dpi = dpi.dpi,
            policy = ?controller.resize_policy(),
            "host window ready"
        );
        Ok(controller)
    }

    fn install_resize_handler(&self, controller: Weak<Self>) {
        self.services
            .runtime
            .set_resize_handler(Box::new(move |width, height| {
                controller
                    .upgrade()
                    .map(|controller| controller.request_resize(ContentSize::new(width, height)))
                    .unwrap_or(false)
            }));
    }

    fn setup_plugin(&self) -> Result<(), SetupError> {
        if !self.gui.create(self.api) {
            return Err(SetupError::GuiCreation { api: self.api });
        }
        self.surface.set(GuiSurfaceState::Created);

        let dpi = self.dpi.get();
        if !self.gui.set_scale(dpi.scale) {
            tracing::debug!(scale = dpi.scale, "plugin ignored initial scale");
        }

        let policy = ResizePolicy::from_capability(self.gui.can_resize());
        let _ = self.policy.set(policy);
        if policy == ResizePolicy::Fixed {
            let style = chrome_for_policy(policy, self.window.style());
            if let Err(err) = self.window.set_style(style) {
                tracing::warn!(%err, "failed to apply fixed window chrome");
            }
        }

        match self.gui.preferred_size() {
            Some(size) => {
                if !self.request_resize(size) {
                    tracing::warn!(?size, "failed to apply the plugin's preferred size");
                }
            }
            None => tracing::warn!("plugin did not report a preferred size"),
        }

        if !self.gui.set_parent(self.api, self.window.handle()) {
            tracing::warn!("plugin refused the host window as parent");
        }
        Ok(())
    }

    /// Resizes the window so its content area matches `content`.
    ///
    /// Answers plugin-initiated resize requests. Returns whether the OS
    /// accepted the new size.
    pub fn request_resize(&self, content: ContentSize) -> bool {
        if self.surface.get() == GuiSurfaceState::Destroyed {
            return false;
        }
        let outer = self.negotiator.outer_size(
            content,
            self.window.style(),
            self.window.has_menu(),
            self.dpi.get().dpi,
        );
        match self.window.resize_outer(outer) {
            Ok(()) => {
                tracing::trace!(?content, ?outer, "resized host window");
                true
            }
            Err(err) => {
                tracing::warn!(%err, ?content, "failed to resize host window");
                false
            }
        }
    }

    fn on_show(&self, visible: bool) -> EventOutcome {
        if !self.surface.get().is_live() {
            return EventOutcome::PassThrough;
        }
        if visible {
            self.gui.show();
            self.surface.set(GuiSurfaceState::Shown);
        } else {
            self.gui.hide();
            self.surface.set(GuiSurfaceState::Hidden);
        }
        EventOutcome::Handled
    }

    fn on_dpi_changed(&self, dpi: u32) -> EventOutcome {
        let context = DpiContext::from_dpi(dpi);
        self.dpi.set(context);
        if self.surface.get().is_live() {
            self.gui.set_scale(context.scale);
        }
        tracing::debug!(dpi = context.dpi, scale = context.scale, "dpi changed");
        EventOutcome::Handled
    }

    fn on_position_changed(&self) -> EventOutcome {
        if self.resize_policy() != Some(ResizePolicy::UserResizable)
            || !self.surface.get().is_live()
        {
            return EventOutcome::Handled;
        }
        match self.window.client_size() {
            Ok(client) => {
                let adjusted = self.gui.adjust_size(client);
                self.gui.set_size(adjusted);
            }
            Err(err) => tracing::warn!(%err, "failed to query client size"),
        }
        EventOutcome::Handled
    }

    fn on_destroy(&self) -> EventOutcome {
        if self.surface.get() == GuiSurfaceState::Destroyed {
            return EventOutcome::Handled;
        }
        if self.surface.get().is_live() {
            self.gui.destroy();
        }
        self.surface.set(GuiSurfaceState::Destroyed);
        self.services.runtime.stop_processing();
        self.window.release();
        self.services.runtime.request_exit(0);
        tracing::info!(plugin = %self.plugin.id, "host window destroyed");
        EventOutcome::Handled
    }

    fn on_command(&self, command: MenuCommand) {
        tracing::debug!(?command, "system menu command");
        let owner = self.window.handle();
        let extension = self.options.state_extension.as_str();
        match command {
            MenuCommand::OpenSettings => match &self.services.settings {
                Some(settings) if settings.is_visible() => settings.hide(),
                Some(settings) => settings.show(),
                None => tracing::debug!("no settings surface available"),
            },
            MenuCommand::SaveState => {
                let Some(target) = self.services.prompts.pick_save_target(owner, extension) else {
                    return;
                };
                if let Err(err) = self.services.persistence.save(&target) {
                    tracing::error!(%err, "save failed");
                    self.services
                        .prompts
                        .show_error(owner, &format!("Unable to save state: {err}"));
                }
            }
            MenuCommand::LoadState => {
                let Some(target) = self.services.prompts.pick_load_target(owner, extension) else {
                    return;
                };
                if let Err(err) = self.services.persistence.load(&target) {
                    tracing::error!(%err, "load failed");
                    self.services
                        .prompts
                        .show_error(owner, &format!("Unable to load state: {err}"));
                }
            }
            MenuCommand::ResetState => {
                if let Err(err) = self.services.persistence.reset() {
                    tracing::debug!(%err, "reset to default state failed");
                }
            }
        }
    }

    pub fn window(&self) -> &W {
        &self.window
    }

    pub fn surface_state(&self) -> GuiSurfaceState {
        self.surface.get()
    }

    /// `None` until the plugin GUI has been set up.
    pub fn resize_policy(&self) -> Option<ResizePolicy> {
        self.policy.get().copied()
    }

    pub fn dpi_context(&self) -> DpiContext {
        self.dpi.get()
    }
}

impl<W, G> WindowEventSink for HostWindowController<W, G>
where
    W: NativeWindow + 'static,
    G: EmbeddedGui + 'static,
{
    fn handle_event(&self, event: WindowEvent) -> EventOutcome {
        match event {
            WindowEvent::Show { visible } => self.on_show(visible),
            WindowEvent::DpiChanged { dpi } => self.on_dpi_changed(dpi),
            WindowEvent::PositionChanged => self.on_position_changed(),
            WindowEvent::SystemCommand { id } => match MenuCommand::from_id(id) {
                Some(command) => {
                    self.on_command(command);
                    EventOutcome::Handled
                }
                None => EventOutcome::PassThrough,
            },
            WindowEvent::Destroy => self.on_destroy(),
        }
    }
}
