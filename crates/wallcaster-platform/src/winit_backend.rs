//! winit implementation of [`PlatformBackend`].
//!
//! The window system polls once per frame, so events are pulled with
//! winit's pump API instead of handing control to `EventLoop::run_app`.

use std::time::Duration;

use glam::Vec2;
use tracing::debug;
use wallcaster_gpu::VulkanApi;
use winit::application::ApplicationHandler;
use winit::dpi::{PhysicalPosition, PhysicalSize};
use winit::error::OsError;
use winit::event::{DeviceEvent, DeviceId, ElementState, KeyEvent, StartCause, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::PhysicalKey;
use winit::platform::pump_events::{EventLoopExtPumpEvents, PumpStatus};
use winit::window::{CursorGrabMode, Window, WindowAttributes, WindowId};

use crate::backend::{PlatformBackend, PlatformEvent};
use crate::config::WindowConfig;
use crate::error::{PlatformError, Result};
use crate::window::WindowSystem;

/// Window system on winit and Vulkan.
pub type NativeWindowSystem = WindowSystem<WinitBackend, VulkanApi>;

impl NativeWindowSystem {
    /// Create a closed window system using the native backends.
    pub fn native(config: WindowConfig) -> Self {
        Self::new(WinitBackend::new(), VulkanApi::new(), config)
    }
}

/// winit-based windowing backend.
///
/// winit allows a single event loop per process, so the loop is created by
/// the first [`init`](PlatformBackend::init) and kept until the backend is
/// dropped. [`shutdown`](PlatformBackend::shutdown) only discards queued
/// events.
#[derive(Default)]
pub struct WinitBackend {
    event_loop: Option<EventLoop<()>>,
    /// Events delivered while pumping for window creation.
    queued: Vec<PlatformEvent>,
}

impl WinitBackend {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn event_loop(&mut self) -> Result<&mut EventLoop<()>> {
        self.event_loop
            .as_mut()
            .ok_or_else(|| PlatformError::OsSubsystem("event loop not initialized".to_string()))
    }
}

impl PlatformBackend for WinitBackend {
    type Window = Window;

    fn init(&mut self) -> Result<()> {
        if self.event_loop.is_none() {
            let event_loop =
                EventLoop::new().map_err(|e| PlatformError::OsSubsystem(e.to_string()))?;
            event_loop.set_control_flow(ControlFlow::Poll);
            self.event_loop = Some(event_loop);
        }
        Ok(())
    }

    fn shutdown(&mut self) {
        self.queued.clear();
    }

    fn create_window(&mut self, title: &str, width: u32, height: u32) -> Result<Window> {
        let mut queued = std::mem::take(&mut self.queued);
        let mut pump = Pump {
            pending: Some(
                Window::default_attributes()
                    .with_title(title)
                    .with_inner_size(PhysicalSize::new(width, height)),
            ),
            created: None,
            events: &mut queued,
        };

        let status = self
            .event_loop()?
            .pump_app_events(Some(Duration::ZERO), &mut pump);
        let created = pump.created.take();
        self.queued = queued;

        if let PumpStatus::Exit(code) = status {
            return Err(PlatformError::OsSubsystem(format!(
                "event loop exited with code {code}"
            )));
        }

        match created {
            Some(Ok(window)) => Ok(window),
            Some(Err(e)) => Err(PlatformError::WindowCreation(e.to_string())),
            None => Err(PlatformError::WindowCreation(
                "event loop did not become active".to_string(),
            )),
        }
    }

    fn destroy_window(&mut self, window: Window) {
        debug!("Destroying window {:?}", window.id());
        drop(window);
    }

    fn poll_events(&mut self, _window: &Window, events: &mut Vec<PlatformEvent>) {
        events.append(&mut self.queued);

        let Some(event_loop) = self.event_loop.as_mut() else {
            return;
        };

        let mut pump = Pump {
            pending: None,
            created: None,
            events: &mut *events,
        };
        if let PumpStatus::Exit(_) = event_loop.pump_app_events(Some(Duration::ZERO), &mut pump) {
            events.push(PlatformEvent::CloseRequested);
        }
    }

    fn set_relative_mouse_mode(&mut self, window: &Window) -> Result<()> {
        // Fall back to confined mode if locked is not supported
        if let Err(locked) = window.set_cursor_grab(CursorGrabMode::Locked) {
            window
                .set_cursor_grab(CursorGrabMode::Confined)
                .map_err(|e| PlatformError::CursorGrab(format!("{locked}; {e}")))?;
        }
        window.set_cursor_visible(false);
        Ok(())
    }
}

/// Handler for one pump of the event loop.
struct Pump<'a> {
    /// Window to create once the loop is active.
    pending: Option<WindowAttributes>,
    created: Option<std::result::Result<Window, OsError>>,
    events: &'a mut Vec<PlatformEvent>,
}

impl Pump<'_> {
    fn create_pending(&mut self, event_loop: &ActiveEventLoop) {
        let Some(attributes) = self.pending.take() else {
            return;
        };
        let attributes = match centered_position(event_loop, &attributes) {
            Some(position) => attributes.with_position(position),
            None => attributes,
        };
        self.created = Some(event_loop.create_window(attributes));
    }
}

/// Position that centers a window of the requested size on the primary
/// monitor, if one is known.
fn centered_position(
    event_loop: &ActiveEventLoop,
    attributes: &WindowAttributes,
) -> Option<PhysicalPosition<i32>> {
    let monitor = event_loop
        .primary_monitor()
        .or_else(|| event_loop.available_monitors().next())?;
    let size = attributes.inner_size?.to_physical::<i32>(monitor.scale_factor());
    let monitor_size = monitor.size();
    let origin = monitor.position();

    #[allow(clippy::cast_possible_wrap)]
    let (monitor_width, monitor_height) = (monitor_size.width as i32, monitor_size.height as i32);

    Some(PhysicalPosition::new(
        origin.x + (monitor_width - size.width) / 2,
        origin.y + (monitor_height - size.height) / 2,
    ))
}

impl ApplicationHandler for Pump<'_> {
    fn new_events(&mut self, event_loop: &ActiveEventLoop, _cause: StartCause) {
        self.create_pending(event_loop);
    }

    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        self.create_pending(event_loop);
    }

    fn window_event(&mut self, _event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => self.events.push(PlatformEvent::CloseRequested),
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(key),
                        state,
                        ..
                    },
                ..
            } => self.events.push(match state {
                ElementState::Pressed => PlatformEvent::KeyDown(key),
                ElementState::Released => PlatformEvent::KeyUp(key),
            }),
            WindowEvent::KeyboardInput { event, .. } => {
                debug!("Ignoring key without a physical key code: {:?}", event.physical_key);
            }
            _ => {}
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    fn device_event(&mut self, _event_loop: &ActiveEventLoop, _id: DeviceId, event: DeviceEvent) {
        if let DeviceEvent::MouseMotion { delta } = event {
            self.events
                .push(PlatformEvent::MouseMotion(Vec2::new(delta.0 as f32, delta.1 as f32)));
        }
    }
}
