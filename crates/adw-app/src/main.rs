// ABOUTME: Demo application entry point.
// ABOUTME: Feeds window metrics to the layout synchronizer and maps keys to pane controls.

mod platform;

use std::cell::Cell;
use std::rc::Rc;
use std::sync::Arc;

use anyhow::Result;
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{Key, NamedKey};
use winit::window::{Window, WindowAttributes, WindowId};

use adw_core::{Config, DevicePreset, Metrics, Orientation};
use adw_layout::{
    LayoutSynchronizer, MetricsBroadcaster, OrientationState, Pane, PaneCallbacks, PaneControl,
    PaneControlState, PaneIntent, SyncConfig,
};
use platform::LoggingWorkspace;

struct App {
    config: Config,
    window: Option<Arc<Window>>,
    metrics: MetricsBroadcaster,
    workspace: Rc<LoggingWorkspace>,
    sync: Option<LayoutSynchronizer>,
    pane: PaneControlState,
    /// Preset index and orientation last requested from the keyboard
    preset: Option<(usize, Orientation)>,
}

impl App {
    fn new(config: Config) -> Self {
        tracing::info!(
            "Loaded config: debounce={}ms auto_sync={}",
            config.sync.debounce_delay_ms,
            config.sync.auto_sync
        );

        Self {
            config,
            window: None,
            metrics: MetricsBroadcaster::new(Metrics::default(), Metrics::default()),
            workspace: Rc::new(LoggingWorkspace::default()),
            sync: None,
            pane: PaneControlState::default(),
            preset: None,
        }
    }

    /// Read the window's current metrics and broadcast them
    fn publish_metrics(&self) {
        if let Some(window) = &self.window {
            self.metrics.emit(
                platform::window_metrics(window),
                platform::screen_metrics(window),
            );
        }
    }

    fn apply_preset(&mut self, index: usize, orientation: Orientation) {
        let Some(preset) = DevicePreset::all().get(index) else {
            return;
        };
        let orientation = if preset.supports(orientation) {
            orientation
        } else {
            preset.preferred_orientation()
        };
        self.preset = Some((index, orientation));

        let metrics = preset.metrics(orientation);
        tracing::info!(
            "Preset {} ({}) {}x{}",
            preset.name,
            orientation.label(),
            metrics.width,
            metrics.height
        );

        if let Some(window) = &self.window {
            let size = LogicalSize::new(metrics.width, metrics.height);
            let applied = window.request_inner_size(size);
            // Sizes applied synchronously may not produce a Resized event
            if applied.is_some() {
                self.publish_metrics();
            }
        }
    }

    fn rotate_preset(&mut self) {
        match self.preset {
            Some((index, orientation)) => self.apply_preset(index, orientation.rotated()),
            None => tracing::info!("Pick a preset with 1-4 before rotating"),
        }
    }

    fn on_commit(&self, state: OrientationState) {
        match serde_json::to_string(&state) {
            Ok(json) => tracing::debug!("Committed state {}", json),
            Err(e) => tracing::warn!("Failed to serialize committed state: {}", e),
        }

        let layout = state.recommended_layout();
        tracing::info!(
            "{} {} -> {:?} layout",
            state.device_class.label(),
            state.orientation.label(),
            layout
        );
        if let Some(window) = &self.window {
            window.set_title(&format!(
                "adaptive-panes - {} {} ({:?})",
                state.device_class.label(),
                state.orientation.label(),
                layout
            ));
        }
    }

    /// Press a header control on the demo pane. Returns false when the pane was closed.
    fn press_pane_control(&mut self, control: PaneControl) -> bool {
        let next = Cell::new(self.pane);
        let closed = Cell::new(false);
        let callbacks = PaneCallbacks::new()
            .on_close(|| closed.set(true))
            .on_minimize(|| {
                next.set(PaneControlState {
                    minimized: true,
                    ..next.get()
                })
            })
            .on_maximize(|| {
                next.set(PaneControlState {
                    maximized: true,
                    ..next.get()
                })
            })
            // Restoring from either toggle returns the pane to its normal size
            .on_restore(|| next.set(PaneControlState::default()))
            .on_split(|direction| {
                tracing::info!(
                    "Split {:?} requested; splitting belongs to the workspace engine",
                    direction
                )
            });

        let intent = {
            let mut pane = self.demo_pane().with_callbacks(callbacks);
            pane.press(control)
        };
        tracing::info!("{:?} pressed -> {:?}", control, intent);

        self.pane = next.get();
        if intent != PaneIntent::Close {
            self.log_pane();
        }
        !closed.get()
    }

    fn demo_pane<'a>(&self) -> Pane<'a, ()> {
        Pane::new(())
            .with_title(self.config.pane.title.as_str())
            .with_state(self.pane)
            .with_controls_position(self.config.pane.controls_position)
    }

    fn log_pane(&self) {
        let pane = self.demo_pane();
        let frame = pane.render();
        let controls: Vec<&str> = frame
            .header
            .controls()
            .iter()
            .map(|affordance| affordance.glyph)
            .collect();
        tracing::info!(
            "Pane '{}' controls [{}] content {}",
            frame.header.title(),
            controls.join(" "),
            if frame.content.is_some() { "shown" } else { "hidden" }
        );
    }

    fn handle_key(&mut self, event_loop: &ActiveEventLoop, key: &Key) {
        let control = match key {
            Key::Named(NamedKey::Escape) => {
                event_loop.exit();
                return;
            }
            Key::Character(s) => match s.as_str() {
                "1" | "2" | "3" | "4" => {
                    if let Ok(n) = s.parse::<usize>() {
                        let orientation = DevicePreset::all()
                            .get(n - 1)
                            .map(|preset| preset.preferred_orientation())
                            .unwrap_or(Orientation::Landscape);
                        self.apply_preset(n - 1, orientation);
                    }
                    return;
                }
                "o" => {
                    self.rotate_preset();
                    return;
                }
                "b" => {
                    if let Some(sync) = &self.sync {
                        sync.update_screen_bounds(None);
                    }
                    return;
                }
                "d" => PaneControl::SplitDown,
                "r" => PaneControl::SplitRight,
                "m" => PaneControl::MinimizeToggle,
                "x" => PaneControl::MaximizeToggle,
                "c" => PaneControl::Close,
                _ => return,
            },
            _ => return,
        };

        if !self.press_pane_control(control) {
            tracing::info!("Pane closed, exiting");
            event_loop.exit();
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs = WindowAttributes::default()
            .with_title("adaptive-panes")
            .with_inner_size(LogicalSize::new(
                self.config.window_width,
                self.config.window_height,
            ));

        let window = match event_loop.create_window(attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                tracing::error!("Failed to create window: {}", e);
                event_loop.exit();
                return;
            }
        };
        self.window = Some(window);

        // Seed the provider before the synchronizer takes its initial reading
        self.publish_metrics();

        let config =
            SyncConfig::from_settings(&self.config.sync).with_workspace(self.workspace.clone());
        let sync = LayoutSynchronizer::start(&self.metrics, config);
        self.on_commit(sync.orientation_state());
        self.sync = Some(sync);
        self.log_pane();

        tracing::info!(
            "Keys: 1-4 presets, o rotate, b push bounds, d/r split, m minimize, x maximize, c close"
        );
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                tracing::info!("Close requested, exiting");
                if let Some(sync) = self.sync.as_mut() {
                    sync.stop();
                }
                event_loop.exit();
            }
            WindowEvent::Resized(_) | WindowEvent::ScaleFactorChanged { .. } => {
                self.publish_metrics();
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state == ElementState::Pressed && !event.repeat {
                    self.handle_key(event_loop, &event.logical_key);
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let Some(sync) = &self.sync else {
            return;
        };

        if let Some(state) = sync.poll() {
            self.on_commit(state);
            tracing::debug!(
                "Workspace has received {} bounds pushes, last {:?}",
                self.workspace.push_count(),
                self.workspace.bounds()
            );
        }

        match sync.next_deadline() {
            Some(deadline) => event_loop.set_control_flow(ControlFlow::WaitUntil(deadline)),
            None => event_loop.set_control_flow(ControlFlow::Wait),
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    tracing::info!("Starting adaptive-panes");

    let config = Config::load_or_default();
    let event_loop = EventLoop::new()?;
    let mut app = App::new(config);

    event_loop.run_app(&mut app)?;

    Ok(())
}
