//! Single-slot input callbacks.

use std::fmt;

use glam::Vec2;
use winit::keyboard::KeyCode;

/// Callback for key-down and key-up events.
pub type KeyHandler = Box<dyn FnMut(KeyCode)>;
/// Callback for relative mouse motion.
pub type MouseMoveHandler = Box<dyn FnMut(Vec2)>;

/// At most one handler per event kind.
///
/// Registering a handler replaces whatever was registered before for that
/// kind; there is no fan-out to multiple subscribers. Events with no
/// handler are dropped.
#[derive(Default)]
pub struct InputHandlers {
    key_down: Option<KeyHandler>,
    key_up: Option<KeyHandler>,
    mouse_move: Option<MouseMoveHandler>,
}

impl InputHandlers {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the key-down handler.
    pub fn on_key_down(&mut self, handler: impl FnMut(KeyCode) + 'static) {
        self.key_down = Some(Box::new(handler));
    }

    /// Replace the key-up handler.
    pub fn on_key_up(&mut self, handler: impl FnMut(KeyCode) + 'static) {
        self.key_up = Some(Box::new(handler));
    }

    /// Replace the mouse-move handler. It receives the motion delta.
    pub fn on_mouse_move(&mut self, handler: impl FnMut(Vec2) + 'static) {
        self.mouse_move = Some(Box::new(handler));
    }

    /// Remove all handlers.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub(crate) fn key_down(&mut self, key: KeyCode) {
        if let Some(handler) = &mut self.key_down {
            handler(key);
        }
    }

    pub(crate) fn key_up(&mut self, key: KeyCode) {
        if let Some(handler) = &mut self.key_up {
            handler(key);
        }
    }

    pub(crate) fn mouse_move(&mut self, delta: Vec2) {
        if let Some(handler) = &mut self.mouse_move {
            handler(delta);
        }
    }
}

impl fmt::Debug for InputHandlers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InputHandlers")
            .field("key_down", &self.key_down.is_some())
            .field("key_up", &self.key_up.is_some())
            .field("mouse_move", &self.mouse_move.is_some())
            .finish()
    }
}
