//! Window lifecycle, event dispatch and frame timing.

use glam::Vec2;
use tracing::{debug, info, warn};
use wallcaster_gpu::{DeviceContext, GpuApi};
use wallcaster_input::{ActionId, InputState, KeyCode};

use crate::backend::{PlatformBackend, PlatformEvent};
use crate::clock::{Clock, DeltaClock, SystemClock};
use crate::config::WindowConfig;
use crate::error::{PlatformError, Result};

/// An OS window together with the GPU context bound to it.
struct OpenWindow<W, G: GpuApi> {
    window: W,
    device: DeviceContext<G>,
}

/// Owns one window, its GPU device context and the input state fed by it.
///
/// Lifecycle is closed → open → closed; a closed system can be opened again,
/// which reruns the full device bootstrap. [`update`](Self::update) must be
/// called once per frame while the window is open.
///
/// The OS subsystem is initialized by the first [`open`](Self::open) and
/// shut down when the last window is closed.
pub struct WindowSystem<B: PlatformBackend, G: GpuApi, C: Clock = SystemClock> {
    backend: B,
    gpu: G,
    clock: C,
    config: WindowConfig,
    subsystem_refs: usize,
    window: Option<OpenWindow<B::Window, G>>,
    is_open: bool,
    size: (u32, u32),
    delta: DeltaClock,
    input: InputState,
    events: Vec<PlatformEvent>,
}

impl<B: PlatformBackend, G: GpuApi> WindowSystem<B, G> {
    /// Create a closed window system timed by the system clock.
    pub fn new(backend: B, gpu: G, config: WindowConfig) -> Self {
        Self::with_clock(backend, gpu, SystemClock::new(), config)
    }
}

impl<B: PlatformBackend, G: GpuApi, C: Clock> WindowSystem<B, G, C> {
    /// Create a closed window system timed by `clock`.
    pub fn with_clock(backend: B, gpu: G, clock: C, config: WindowConfig) -> Self {
        let input = InputState::new(config.max_key_binds);
        Self {
            backend,
            gpu,
            clock,
            config,
            subsystem_refs: 0,
            window: None,
            is_open: false,
            size: (0, 0),
            delta: DeltaClock::default(),
            input,
            events: Vec::new(),
        }
    }

    /// Open a window and bootstrap a GPU device for it.
    ///
    /// On failure everything created along the way (device context stages,
    /// the OS window, this open's subsystem reference) is released before
    /// the error is returned.
    pub fn open(&mut self, title: &str, width: u32, height: u32) -> Result<()> {
        if self.window.is_some() {
            return Err(PlatformError::AlreadyOpen);
        }

        self.acquire_subsystem()?;

        let window = match self.backend.create_window(title, width, height) {
            Ok(window) => window,
            Err(e) => {
                self.release_subsystem();
                return Err(e);
            }
        };

        let bootstrap = self.config.bootstrap(title);
        let device = match DeviceContext::bootstrap(&mut self.gpu, &window, &bootstrap) {
            Ok(device) => device,
            Err(e) => {
                self.backend.destroy_window(window);
                self.release_subsystem();
                return Err(e.into());
            }
        };

        self.window = Some(OpenWindow { window, device });
        self.is_open = true;
        self.size = (width, height);
        self.input.release_all();
        self.delta.reset(self.clock.now());

        info!("Opened window '{title}' ({width}x{height})");
        Ok(())
    }

    /// Returns `true` until the window is asked to close.
    pub const fn is_open(&self) -> bool {
        self.is_open
    }

    /// Drain pending OS events, dispatch them, and recompute delta time.
    pub fn update(&mut self) {
        let mut events = std::mem::take(&mut self.events);
        if let Some(open) = &self.window {
            self.backend.poll_events(&open.window, &mut events);
        }

        for event in events.drain(..) {
            match event {
                PlatformEvent::CloseRequested => {
                    debug!("Close requested");
                    self.is_open = false;
                }
                PlatformEvent::KeyDown(key) => self.input.key_down(key),
                PlatformEvent::KeyUp(key) => self.input.key_up(key),
                PlatformEvent::MouseMotion(delta) => self.input.mouse_motion(delta),
            }
        }
        self.events = events;

        self.delta.tick(self.clock.now());
    }

    /// Window size passed to [`open`](Self::open).
    pub const fn size(&self) -> (u32, u32) {
        self.size
    }

    /// Milliseconds between the last two updates. Never negative.
    pub const fn delta_time_ms(&self) -> f32 {
        self.delta.delta_ms()
    }

    /// Switch the mouse to relative motion. Failure leaves the window usable.
    pub fn grab_mouse(&mut self) -> Result<()> {
        let open = self.window.as_ref().ok_or(PlatformError::NotOpen)?;
        self.backend
            .set_relative_mouse_mode(&open.window)
            .inspect_err(|e| warn!("Failed to grab mouse: {e}"))
    }

    /// Mark the window as closed without releasing anything.
    ///
    /// The caller's loop is expected to notice and call [`close`](Self::close).
    pub fn force_close(&mut self) {
        self.is_open = false;
    }

    /// Replace the key-down handler.
    pub fn on_key_down(&mut self, handler: impl FnMut(KeyCode) + 'static) {
        self.input.handlers_mut().on_key_down(handler);
    }

    /// Replace the key-up handler.
    pub fn on_key_up(&mut self, handler: impl FnMut(KeyCode) + 'static) {
        self.input.handlers_mut().on_key_up(handler);
    }

    /// Replace the mouse-move handler.
    pub fn on_mouse_move(&mut self, handler: impl FnMut(Vec2) + 'static) {
        self.input.handlers_mut().on_mouse_move(handler);
    }

    /// Bind an action to a physical key. Duplicate actions are allowed.
    pub fn bind_key(&mut self, action: impl Into<ActionId>, key: KeyCode) -> Result<()> {
        Ok(self.input.bind_key(action, key)?)
    }

    /// Returns `true` if the first bind for `action` is held down.
    pub fn is_bind_pressed(&self, action: impl Into<ActionId>) -> bool {
        self.input.is_bind_pressed(action)
    }

    /// Input state fed by [`update`](Self::update).
    pub const fn input(&self) -> &InputState {
        &self.input
    }

    /// Device context for the renderer, borrowed while the window exists.
    pub fn device_context(&self) -> Option<&DeviceContext<G>> {
        self.window.as_ref().map(|open| &open.device)
    }

    /// The OS window, while it exists.
    pub fn window(&self) -> Option<&B::Window> {
        self.window.as_ref().map(|open| &open.window)
    }

    pub const fn backend(&self) -> &B {
        &self.backend
    }

    pub const fn gpu(&self) -> &G {
        &self.gpu
    }

    /// Destroy the device context (device, surface, instance), then the
    /// window, then drop this window's subsystem reference.
    pub fn close(&mut self) {
        self.is_open = false;
        let Some(open) = self.window.take() else {
            return;
        };

        open.device.destroy(&mut self.gpu);
        self.backend.destroy_window(open.window);
        self.release_subsystem();
        info!("Window closed");
    }

    fn acquire_subsystem(&mut self) -> Result<()> {
        if self.subsystem_refs == 0 {
            debug!("Initializing OS subsystem");
            self.backend.init()?;
        }
        self.subsystem_refs += 1;
        Ok(())
    }

    fn release_subsystem(&mut self) {
        self.subsystem_refs = self.subsystem_refs.saturating_sub(1);
        if self.subsystem_refs == 0 {
            debug!("Shutting down OS subsystem");
            self.backend.shutdown();
        }
    }
}

impl<B: PlatformBackend, G: GpuApi, C: Clock> Drop for WindowSystem<B, G, C> {
    fn drop(&mut self) {
        self.close();
    }
}
