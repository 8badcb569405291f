use std::cell::{Cell, RefCell};
use std::io;
use std::path::PathBuf;
use std::rc::{Rc, Weak};
use std::sync::Arc;

use anyhow::Result;
use parking_lot::Mutex;

use clap_host::ResizeHandler;
use harmoniq_host_window::{
    chrome_for_policy, system_menu_layout, ContentSize, EmbeddedGui, EventOutcome,
    GuiSurfaceState, HostRuntime, HostServices, HostWindowController, HostWindowOptions,
    MenuCommand, MenuEntry, MenuItemPlacement, NativeWindow, OuterSize, PersistenceError,
    PersistenceTarget, PluginInfo, ResizePolicy, SetupError, SettingsSurface, SizeNegotiator,
    StandardFrameMetrics, StatePersistence, UserPrompts, WindowApi, WindowError, WindowEvent,
    WindowEventSink, WindowHandle, WindowStyle,
};

const HANDLE: WindowHandle = WindowHandle::from_raw(0x00c0_ffee);

#[derive(Debug, Clone, PartialEq)]
enum WindowCall {
    BindEvents,
    InstallMenu(Vec<MenuItemPlacement>),
    SetStyle(WindowStyle),
    ResizeOuter(OuterSize),
    ShowNormal,
    Release,
    Destroyed,
}

struct MockWindow {
    calls: Arc<Mutex<Vec<WindowCall>>>,
    client: Arc<Mutex<ContentSize>>,
    style: Cell<WindowStyle>,
    dpi: Cell<u32>,
    sink: RefCell<Option<Weak<dyn WindowEventSink>>>,
    released: Cell<bool>,
}

impl MockWindow {
    fn new(calls: Arc<Mutex<Vec<WindowCall>>>, client: Arc<Mutex<ContentSize>>) -> Self {
        Self {
            calls,
            client,
            style: Cell::new(WindowStyle::OVERLAPPED_WINDOW | WindowStyle::CLIP_CHILDREN),
            dpi: Cell::new(96),
            sink: RefCell::new(None),
            released: Cell::new(false),
        }
    }

    fn notify(&self, event: WindowEvent) {
        let sink = self.sink.borrow().as_ref().and_then(Weak::upgrade);
        if let Some(sink) = sink {
            sink.handle_event(event);
        }
    }
}

impl NativeWindow for MockWindow {
    type Metrics = StandardFrameMetrics;

    fn handle(&self) -> WindowHandle {
        HANDLE
    }

    fn frame_metrics(&self) -> StandardFrameMetrics {
        StandardFrameMetrics::default()
    }

    fn bind_events(&self, sink: Weak<dyn WindowEventSink>) {
        self.calls.lock().push(WindowCall::BindEvents);
        *self.sink.borrow_mut() = Some(sink);
    }

    fn install_system_menu(&self, entries: &[MenuItemPlacement]) -> Result<(), WindowError> {
        self.calls.lock().push(WindowCall::InstallMenu(entries.to_vec()));
        Ok(())
    }

    fn style(&self) -> WindowStyle {
        self.style.get()
    }

    fn set_style(&self, style: WindowStyle) -> Result<(), WindowError> {
        self.calls.lock().push(WindowCall::SetStyle(style));
        self.style.set(style);
        Ok(())
    }

    fn has_menu(&self) -> bool {
        false
    }

    fn dpi(&self) -> u32 {
        self.dpi.get()
    }

    fn client_size(&self) -> Result<ContentSize, WindowError> {
        Ok(*self.client.lock())
    }

    fn resize_outer(&self, size: OuterSize) -> Result<(), WindowError> {
        self.calls.lock().push(WindowCall::ResizeOuter(size));
        let negotiator = SizeNegotiator::new(StandardFrameMetrics::default());
        *self.client.lock() =
            negotiator.content_size(size, self.style.get(), false, self.dpi.get());
        // The OS reports the new geometry before the resize call returns.
        self.notify(WindowEvent::PositionChanged);
        Ok(())
    }

    fn show_normal(&self) {
        self.calls.lock().push(WindowCall::ShowNormal);
    }

    fn release(&self) {
        self.calls.lock().push(WindowCall::Release);
        self.released.set(true);
    }
}

impl Drop for MockWindow {
    fn drop(&mut self) {
        if !self.released.get() {
            self.calls.lock().push(WindowCall::Destroyed);
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum GuiCall {
    IsApiSupported(WindowApi),
    Create(WindowApi),
    Destroy,
    SetScale(f64),
    CanResize,
    PreferredSize,
    AdjustSize(ContentSize),
    SetSize(ContentSize),
    SetParent(WindowApi, WindowHandle),
    Show,
    Hide,
}

struct MockGui {
    calls: Arc<Mutex<Vec<GuiCall>>>,
    api_supported: bool,
    create_ok: bool,
    resizable: bool,
    preferred: Option<ContentSize>,
    min_height: u32,
}

impl MockGui {
    fn new(calls: Arc<Mutex<Vec<GuiCall>>>) -> Self {
        Self {
            calls,
            api_supported: true,
            create_ok: true,
            resizable: true,
            preferred: Some(ContentSize::new(640, 480)),
            min_height: 0,
        }
    }
}

impl EmbeddedGui for MockGui {
    fn is_api_supported(&self, api: WindowApi) -> bool {
        self.calls.lock().push(GuiCall::IsApiSupported(api));
        self.api_supported
    }

    fn create(&self, api: WindowApi) -> bool {
        self.calls.lock().push(GuiCall::Create(api));
        self.create_ok
    }

    fn destroy(&self) {
        self.calls.lock().push(GuiCall::Destroy);
    }

    fn set_scale(&self, scale: f64) -> bool {
        self.calls.lock().push(GuiCall::SetScale(scale));
        true
    }

    fn can_resize(&self) -> bool {
        self.calls.lock().push(GuiCall::CanResize);
        self.resizable
    }

    fn preferred_size(&self) -> Option<ContentSize> {
        self.calls.lock().push(GuiCall::PreferredSize);
        self.preferred
    }

    fn adjust_size(&self, proposed: ContentSize) -> ContentSize {
        self.calls.lock().push(GuiCall::AdjustSize(proposed));
        ContentSize::new(proposed.width, proposed.height.max(self.min_height))
    }

    fn set_size(&self, size: ContentSize) -> bool {
        self.calls.lock().push(GuiCall::SetSize(size));
        true
    }

    fn set_parent(&self, api: WindowApi, parent: WindowHandle) -> bool {
        self.calls.lock().push(GuiCall::SetParent(api, parent));
        true
    }

    fn show(&self) -> bool {
        self.calls.lock().push(GuiCall::Show);
        true
    }

    fn hide(&self) -> bool {
        self.calls.lock().push(GuiCall::Hide);
        true
    }
}

#[derive(Debug, Clone, PartialEq)]
enum RuntimeCall {
    SetResizeHandler,
    Start,
    Stop,
    RequestExit(i32),
}

struct MockRuntime {
    calls: Arc<Mutex<Vec<RuntimeCall>>>,
    handler: Rc<RefCell<Option<ResizeHandler>>>,
}

impl HostRuntime for MockRuntime {
    fn set_resize_handler(&self, handler: ResizeHandler) {
        self.calls.lock().push(RuntimeCall::SetResizeHandler);
        *self.handler.borrow_mut() = Some(handler);
    }

    fn start_processing(&self) {
        self.calls.lock().push(RuntimeCall::Start);
    }

    fn stop_processing(&self) {
        self.calls.lock().push(RuntimeCall::Stop);
    }

    fn request_exit(&self, code: i32) {
        self.calls.lock().push(RuntimeCall::RequestExit(code));
    }
}

#[derive(Debug, Clone, PartialEq)]
enum PersistenceCall {
    Save(PersistenceTarget),
    Load(PersistenceTarget),
    Reset,
}

struct MockPersistence {
    calls: Arc<Mutex<Vec<PersistenceCall>>>,
    fail_with: Option<fn() -> PersistenceError>,
}

impl MockPersistence {
    fn outcome(&self) -> Result<(), PersistenceError> {
        match self.fail_with {
            Some(failure) => Err(failure()),
            None => Ok(()),
        }
    }
}

fn missing_preset_directory() -> PersistenceError {
    PersistenceError::Io {
        path: PathBuf::from("/presets/warm.clapwrapper"),
        source: io::Error::new(io::ErrorKind::NotFound, "directory does not exist"),
    }
}

fn corrupt_preset() -> PersistenceError {
    PersistenceError::PluginRejected("corrupt".into())
}

impl StatePersistence for MockPersistence {
    fn save(&self, target: &PersistenceTarget) -> Result<(), PersistenceError> {
        self.calls.lock().push(PersistenceCall::Save(target.clone()));
        self.outcome()
    }

    fn load(&self, target: &PersistenceTarget) -> Result<(), PersistenceError> {
        self.calls.lock().push(PersistenceCall::Load(target.clone()));
        self.outcome()
    }

    fn reset(&self) -> Result<(), PersistenceError> {
        self.calls.lock().push(PersistenceCall::Reset);
        self.outcome()
    }
}

struct MockPrompts {
    target: Option<PersistenceTarget>,
    extensions: Arc<Mutex<Vec<String>>>,
    errors: Arc<Mutex<Vec<String>>>,
}

impl UserPrompts for MockPrompts {
    fn pick_save_target(&self, owner: WindowHandle, extension: &str) -> Option<PersistenceTarget> {
        assert_eq!(owner, HANDLE);
        self.extensions.lock().push(extension.to_string());
        self.target.clone()
    }

    fn pick_load_target(&self, owner: WindowHandle, extension: &str) -> Option<PersistenceTarget> {
        assert_eq!(owner, HANDLE);
        self.extensions.lock().push(extension.to_string());
        self.target.clone()
    }

    fn show_error(&self, _owner: WindowHandle, message: &str) {
        self.errors.lock().push(message.to_string());
    }
}

struct MockSettings {
    visible: Rc<Cell<bool>>,
}

impl SettingsSurface for MockSettings {
    fn is_visible(&self) -> bool {
        self.visible.get()
    }

    fn show(&self) {
        self.visible.set(true);
    }

    fn hide(&self) {
        self.visible.set(false);
    }
}

#[derive(Default)]
struct Logs {
    window: Arc<Mutex<Vec<WindowCall>>>,
    client: Arc<Mutex<ContentSize>>,
    gui: Arc<Mutex<Vec<GuiCall>>>,
    runtime: Arc<Mutex<Vec<RuntimeCall>>>,
    persistence: Arc<Mutex<Vec<PersistenceCall>>>,
    extensions: Arc<Mutex<Vec<String>>>,
    errors: Arc<Mutex<Vec<String>>>,
    handler: Rc<RefCell<Option<ResizeHandler>>>,
    settings_visible: Rc<Cell<bool>>,
    windows_created: Rc<Cell<usize>>,
}

impl Logs {
    fn gui_calls(&self) -> Vec<GuiCall> {
        self.gui.lock().clone()
    }

    fn clear_gui(&self) {
        self.gui.lock().clear();
    }

    fn window_calls(&self) -> Vec<WindowCall> {
        self.window.lock().clone()
    }

    fn runtime_calls(&self) -> Vec<RuntimeCall> {
        self.runtime.lock().clone()
    }

    fn request_resize(&self, width: u32, height: u32) -> bool {
        let handler = self.handler.borrow();
        let handler = handler.as_ref().expect("resize handler installed");
        handler(width, height)
    }
}

struct Setup {
    logs: Logs,
    target: Option<PersistenceTarget>,
    fail_with: Option<fn() -> PersistenceError>,
    with_settings: bool,
}

impl Setup {
    fn new() -> Self {
        Self {
            logs: Logs::default(),
            target: Some(PersistenceTarget::new("/presets", "warm.clapwrapper")),
            fail_with: None,
            with_settings: false,
        }
    }

    fn gui(&self) -> MockGui {
        MockGui::new(Arc::clone(&self.logs.gui))
    }

    fn build(
        self,
        plugin: Option<PluginInfo>,
        gui: Option<MockGui>,
    ) -> (Result<Rc<HostWindowController<MockWindow, MockGui>>, SetupError>, Logs) {
        let logs = self.logs;
        let runtime = MockRuntime {
            calls: Arc::clone(&logs.runtime),
            handler: Rc::clone(&logs.handler),
        };
        let persistence = MockPersistence {
            calls: Arc::clone(&logs.persistence),
            fail_with: self.fail_with,
        };
        let prompts = MockPrompts {
            target: self.target,
            extensions: Arc::clone(&logs.extensions),
            errors: Arc::clone(&logs.errors),
        };
        let mut services = HostServices::new(runtime, persistence, prompts);
        if self.with_settings {
            services = services.with_settings(MockSettings {
                visible: Rc::clone(&logs.settings_visible),
            });
        }

        let window_calls = Arc::clone(&logs.window);
        let client = Arc::clone(&logs.client);
        let created = Rc::clone(&logs.windows_created);
        let controller = HostWindowController::create(
            plugin,
            gui,
            WindowApi::Win32,
            services,
            HostWindowOptions::default(),
            move |_options: &HostWindowOptions| {
                created.set(created.get() + 1);
                Ok(MockWindow::new(window_calls, client))
            },
        );
        (controller, logs)
    }
}

fn plugin() -> Option<PluginInfo> {
    Some(PluginInfo::new("org.harmoniq.test-synth", "Test Synth"))
}

fn ready(setup: Setup) -> (Rc<HostWindowController<MockWindow, MockGui>>, Logs) {
    let gui = setup.gui();
    let (controller, logs) = setup.build(plugin(), Some(gui));
    (controller.expect("controller created"), logs)
}

#[test]
fn missing_plugin_never_creates_a_window() {
    let setup = Setup::new();
    let gui = setup.gui();
    let (result, logs) = setup.build(None, Some(gui));
    assert!(matches!(result, Err(SetupError::MissingPlugin)));
    assert_eq!(logs.windows_created.get(), 0);
    assert!(logs.gui_calls().is_empty());
    assert!(logs.runtime_calls().is_empty());
}

#[test]
fn missing_gui_never_creates_a_window() {
    let (result, logs) = Setup::new().build(plugin(), None);
    assert!(matches!(result, Err(SetupError::MissingGui)));
    assert_eq!(logs.windows_created.get(), 0);
    assert!(logs.runtime_calls().is_empty());
}

#[test]
fn unsupported_api_destroys_the_partial_window() {
    let setup = Setup::new();
    let mut gui = setup.gui();
    gui.api_supported = false;
    let (result, logs) = setup.build(plugin(), Some(gui));

    assert!(matches!(
        result,
        Err(SetupError::UnsupportedApi {
            api: WindowApi::Win32
        })
    ));
    assert_eq!(logs.windows_created.get(), 1);
    assert_eq!(logs.window_calls().last(), Some(&WindowCall::Destroyed));
    assert!(!logs.gui_calls().contains(&GuiCall::Create(WindowApi::Win32)));
    assert!(!logs.runtime_calls().contains(&RuntimeCall::Start));
}

#[test]
fn gui_creation_failure_is_fatal() {
    let setup = Setup::new();
    let mut gui = setup.gui();
    gui.create_ok = false;
    let (result, logs) = setup.build(plugin(), Some(gui));

    assert!(matches!(result, Err(SetupError::GuiCreation { .. })));
    assert!(!logs.gui_calls().contains(&GuiCall::Destroy));
    assert!(!logs.runtime_calls().contains(&RuntimeCall::Start));
}

#[test]
fn setup_embeds_gui_before_starting_audio() {
    let (controller, logs) = ready(Setup::new());
    let preferred = ContentSize::new(640, 480);

    assert_eq!(
        logs.gui_calls(),
        vec![
            GuiCall::IsApiSupported(WindowApi::Win32),
            GuiCall::Create(WindowApi::Win32),
            GuiCall::SetScale(1.0),
            GuiCall::CanResize,
            GuiCall::PreferredSize,
            GuiCall::AdjustSize(preferred),
            GuiCall::SetSize(preferred),
            GuiCall::SetParent(WindowApi::Win32, HANDLE),
        ]
    );
    assert_eq!(
        logs.window_calls(),
        vec![
            WindowCall::BindEvents,
            WindowCall::InstallMenu(system_menu_layout().to_vec()),
            WindowCall::ResizeOuter(OuterSize::new(656, 519)),
            WindowCall::ShowNormal,
        ]
    );
    assert_eq!(
        logs.runtime_calls(),
        vec![RuntimeCall::SetResizeHandler, RuntimeCall::Start]
    );
    assert_eq!(controller.resize_policy(), Some(ResizePolicy::UserResizable));
    assert_eq!(controller.surface_state(), GuiSurfaceState::Created);
}

#[test]
fn system_menu_entries_are_inserted_in_order() {
    let (_controller, logs) = ready(Setup::new());
    let installed = logs
        .window_calls()
        .into_iter()
        .find_map(|call| match call {
            WindowCall::InstallMenu(entries) => Some(entries),
            _ => None,
        })
        .expect("menu installed");

    let ids: Vec<Option<u32>> = installed
        .iter()
        .map(|item| match item.entry {
            MenuEntry::Separator => None,
            MenuEntry::Command(command) => Some(command.id()),
        })
        .collect();
    assert_eq!(
        ids,
        vec![None, Some(1001), None, Some(1002), Some(1003), None, Some(1004), None]
    );
    let positions: Vec<u32> = installed.iter().map(|item| item.position).collect();
    assert_eq!(positions, vec![1, 2, 3, 4, 5, 6, 7, 8]);
}

#[test]
fn fixed_policy_never_adjusts_or_sets_size() {
    let setup = Setup::new();
    let mut gui = setup.gui();
    gui.resizable = false;
    gui.preferred = Some(ContentSize::new(640, 480));
    let (result, logs) = setup.build(plugin(), Some(gui));
    let controller = result.expect("controller created");

    let fixed = chrome_for_policy(
        ResizePolicy::Fixed,
        WindowStyle::OVERLAPPED_WINDOW | WindowStyle::CLIP_CHILDREN,
    );
    let window_calls = logs.window_calls();
    assert!(window_calls.contains(&WindowCall::SetStyle(fixed)));
    assert!(window_calls.contains(&WindowCall::ResizeOuter(OuterSize::new(646, 509))));
    assert_eq!(controller.resize_policy(), Some(ResizePolicy::Fixed));

    *logs.client.lock() = ContentSize::new(900, 700);
    assert_eq!(
        controller.handle_event(WindowEvent::PositionChanged),
        EventOutcome::Handled
    );
    assert!(!logs
        .gui_calls()
        .iter()
        .any(|call| matches!(call, GuiCall::AdjustSize(_) | GuiCall::SetSize(_))));
}

#[test]
fn user_resize_is_clamped_by_plugin() {
    let setup = Setup::new();
    let mut gui = setup.gui();
    gui.min_height = 640;
    let (result, logs) = setup.build(plugin(), Some(gui));
    let controller = result.expect("controller created");
    logs.clear_gui();

    *logs.client.lock() = ContentSize::new(800, 600);
    controller.handle_event(WindowEvent::PositionChanged);

    assert_eq!(
        logs.gui_calls(),
        vec![
            GuiCall::AdjustSize(ContentSize::new(800, 600)),
            GuiCall::SetSize(ContentSize::new(800, 640)),
        ]
    );
}

#[test]
fn plugin_resize_request_sizes_the_outer_frame() {
    let (_controller, logs) = ready(Setup::new());
    logs.window.lock().clear();

    assert!(logs.request_resize(600, 400));
    assert_eq!(
        logs.window_calls(),
        vec![WindowCall::ResizeOuter(OuterSize::new(616, 439))]
    );
    assert_eq!(*logs.client.lock(), ContentSize::new(600, 400));
}

#[test]
fn dpi_change_rescales_gui_and_later_resizes() {
    let (controller, logs) = ready(Setup::new());
    logs.clear_gui();
    logs.window.lock().clear();

    assert_eq!(
        controller.handle_event(WindowEvent::DpiChanged { dpi: 144 }),
        EventOutcome::Handled
    );
    assert_eq!(logs.gui_calls(), vec![GuiCall::SetScale(1.5)]);
    assert_eq!(controller.dpi_context().dpi, 144);

    assert!(logs.request_resize(400, 300));
    assert_eq!(
        logs.window_calls(),
        vec![WindowCall::ResizeOuter(OuterSize::new(424, 359))]
    );
}

#[test]
fn show_and_hide_follow_window_visibility() {
    let (controller, logs) = ready(Setup::new());
    logs.clear_gui();

    controller.handle_event(WindowEvent::Show { visible: true });
    assert_eq!(controller.surface_state(), GuiSurfaceState::Shown);
    controller.handle_event(WindowEvent::Show { visible: false });
    assert_eq!(controller.surface_state(), GuiSurfaceState::Hidden);
    assert_eq!(logs.gui_calls(), vec![GuiCall::Show, GuiCall::Hide]);
}

#[test]
fn destroy_is_idempotent() {
    let (controller, logs) = ready(Setup::new());

    assert_eq!(
        controller.handle_event(WindowEvent::Destroy),
        EventOutcome::Handled
    );
    assert_eq!(
        controller.handle_event(WindowEvent::Destroy),
        EventOutcome::Handled
    );

    let destroys = logs
        .gui_calls()
        .into_iter()
        .filter(|call| *call == GuiCall::Destroy)
        .count();
    assert_eq!(destroys, 1);
    assert_eq!(
        logs.runtime_calls(),
        vec![
            RuntimeCall::SetResizeHandler,
            RuntimeCall::Start,
            RuntimeCall::Stop,
            RuntimeCall::RequestExit(0),
        ]
    );
    let releases = logs
        .window_calls()
        .into_iter()
        .filter(|call| *call == WindowCall::Release)
        .count();
    assert_eq!(releases, 1);
    assert_eq!(controller.surface_state(), GuiSurfaceState::Destroyed);

    // Late plugin requests and notifications are ignored.
    assert!(!logs.request_resize(300, 200));
    logs.clear_gui();
    controller.handle_event(WindowEvent::Show { visible: true });
    controller.handle_event(WindowEvent::PositionChanged);
    assert!(logs.gui_calls().is_empty());

    drop(controller);
    assert!(!logs.window_calls().contains(&WindowCall::Destroyed));
}

#[test]
fn resize_handler_outliving_controller_refuses() {
    let (controller, logs) = ready(Setup::new());
    drop(controller);
    assert_eq!(logs.window_calls().last(), Some(&WindowCall::Destroyed));
    assert!(!logs.request_resize(300, 200));
}

#[test]
fn save_failure_reports_error_without_touching_state() {
    let mut setup = Setup::new();
    setup.fail_with = Some(missing_preset_directory);
    let (controller, logs) = ready(setup);
    assert_eq!(missing_preset_directory().kind(), Some(io::ErrorKind::NotFound));

    let outcome = controller.handle_event(WindowEvent::SystemCommand {
        id: MenuCommand::SaveState.id(),
    });
    assert_eq!(outcome, EventOutcome::Handled);
    assert_eq!(
        *logs.persistence.lock(),
        vec![PersistenceCall::Save(PersistenceTarget::new(
            "/presets",
            "warm.clapwrapper"
        ))]
    );
    assert_eq!(
        *logs.errors.lock(),
        vec![
            "Unable to save state: /presets/warm.clapwrapper: directory does not exist"
                .to_string()
        ]
    );
    assert_eq!(*logs.extensions.lock(), vec!["clapwrapper".to_string()]);
}

#[test]
fn load_failure_reports_error() {
    let mut setup = Setup::new();
    setup.fail_with = Some(corrupt_preset);
    let (controller, logs) = ready(setup);

    controller.handle_event(WindowEvent::SystemCommand {
        id: MenuCommand::LoadState.id(),
    });
    assert_eq!(
        *logs.errors.lock(),
        vec!["Unable to load state: plugin rejected state: corrupt".to_string()]
    );
}

#[test]
fn cancelled_dialogs_do_nothing() {
    let mut setup = Setup::new();
    setup.target = None;
    let (controller, logs) = ready(setup);

    controller.handle_event(WindowEvent::SystemCommand {
        id: MenuCommand::SaveState.id(),
    });
    controller.handle_event(WindowEvent::SystemCommand {
        id: MenuCommand::LoadState.id(),
    });
    assert!(logs.persistence.lock().is_empty());
    assert!(logs.errors.lock().is_empty());
}

#[test]
fn reset_failure_is_silent() {
    let mut setup = Setup::new();
    setup.fail_with = Some(missing_preset_directory);
    let (controller, logs) = ready(setup);

    controller.handle_event(WindowEvent::SystemCommand {
        id: MenuCommand::ResetState.id(),
    });
    assert_eq!(*logs.persistence.lock(), vec![PersistenceCall::Reset]);
    assert!(logs.errors.lock().is_empty());
}

#[test]
fn settings_command_toggles_surface() {
    let mut setup = Setup::new();
    setup.with_settings = true;
    let (controller, logs) = ready(setup);
    let open = WindowEvent::SystemCommand {
        id: MenuCommand::OpenSettings.id(),
    };

    controller.handle_event(open);
    assert!(logs.settings_visible.get());
    controller.handle_event(open);
    assert!(!logs.settings_visible.get());
}

#[test]
fn settings_command_without_surface_is_ignored() -> Result<()> {
    let (controller, logs) = ready(Setup::new());
    let outcome = controller.handle_event(WindowEvent::SystemCommand {
        id: MenuCommand::OpenSettings.id(),
    });
    assert_eq!(outcome, EventOutcome::Handled);
    assert!(logs.persistence.lock().is_empty());
    Ok(())
}

#[test]
fn unknown_system_commands_pass_through() {
    let (controller, _logs) = ready(Setup::new());
    // SC_CLOSE
    let outcome = controller.handle_event(WindowEvent::SystemCommand { id: 0xF060 });
    assert_eq!(outcome, EventOutcome::PassThrough);
}
