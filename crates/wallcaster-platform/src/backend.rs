//! OS windowing backend seam.

use glam::Vec2;
use raw_window_handle::{HasDisplayHandle, HasWindowHandle};
use winit::keyboard::KeyCode;

use crate::error::Result;

/// An OS event the window system reacts to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlatformEvent {
    /// The user asked to close the window.
    CloseRequested,
    KeyDown(KeyCode),
    KeyUp(KeyCode),
    /// Relative mouse motion.
    MouseMotion(Vec2),
}

/// OS windowing and input subsystem.
///
/// [`init`](Self::init) and [`shutdown`](Self::shutdown) bracket the
/// subsystem's lifetime; the window system reference-counts them across
/// window opens.
pub trait PlatformBackend {
    type Window: HasDisplayHandle + HasWindowHandle;

    /// Bring up the windowing/input subsystem.
    fn init(&mut self) -> Result<()>;

    /// Tear the subsystem down after the last window closed.
    fn shutdown(&mut self);

    /// Create a window with the given inner size, centered on the default
    /// display where the platform allows it.
    fn create_window(&mut self, title: &str, width: u32, height: u32) -> Result<Self::Window>;

    fn destroy_window(&mut self, window: Self::Window);

    /// Append all pending events to `events` in delivery order.
    fn poll_events(&mut self, window: &Self::Window, events: &mut Vec<PlatformEvent>);

    /// Switch the mouse to relative-motion mode.
    fn set_relative_mouse_mode(&mut self, window: &Self::Window) -> Result<()>;
}
