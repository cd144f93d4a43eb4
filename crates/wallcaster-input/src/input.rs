//! Input state combining handlers and key binds.

use glam::Vec2;
use winit::keyboard::KeyCode;

use crate::action::{ActionId, KeyBindTable};
use crate::handlers::InputHandlers;
use crate::Result;

/// Handlers plus key binds, updated one event at a time.
///
/// For every key event the registered handler runs before the bind table
/// is updated, so a handler observes the bind state from before the event.
#[derive(Debug)]
pub struct InputState {
    handlers: InputHandlers,
    binds: KeyBindTable,
}

impl InputState {
    /// Create input state with room for `max_binds` key binds.
    #[must_use]
    pub fn new(max_binds: usize) -> Self {
        Self {
            handlers: InputHandlers::new(),
            binds: KeyBindTable::new(max_binds),
        }
    }

    /// Get the registered handlers.
    pub fn handlers_mut(&mut self) -> &mut InputHandlers {
        &mut self.handlers
    }

    /// Get the key bind table.
    #[must_use]
    pub const fn binds(&self) -> &KeyBindTable {
        &self.binds
    }

    /// Bind an action to a physical key.
    pub fn bind_key(&mut self, action: impl Into<ActionId>, key: KeyCode) -> Result<()> {
        self.binds.bind(action, key)
    }

    /// Returns `true` if the first bind for `action` is held down.
    #[must_use]
    pub fn is_bind_pressed(&self, action: impl Into<ActionId>) -> bool {
        self.binds.is_pressed(action)
    }

    /// Process a key press.
    pub fn key_down(&mut self, key: KeyCode) {
        self.handlers.key_down(key);
        self.binds.set_key_state(key, true);
    }

    /// Process a key release.
    pub fn key_up(&mut self, key: KeyCode) {
        self.handlers.key_up(key);
        self.binds.set_key_state(key, false);
    }

    /// Process relative mouse motion.
    pub fn mouse_motion(&mut self, delta: Vec2) {
        self.handlers.mouse_move(delta);
    }

    /// Release every bind, keeping bindings and handlers.
    pub fn release_all(&mut self) {
        self.binds.release_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::panic::{self, AssertUnwindSafe};
    use std::rc::Rc;

    const FORWARD: ActionId = ActionId(0);
    const BACK: ActionId = ActionId(1);

    #[test]
    fn bind_follows_key_events() {
        let mut input = InputState::new(8);
        input.bind_key(FORWARD, KeyCode::KeyW).unwrap();
        input.bind_key(BACK, KeyCode::KeyS).unwrap();
        assert!(!input.is_bind_pressed(FORWARD));

        input.key_down(KeyCode::KeyW);
        assert!(input.is_bind_pressed(FORWARD));
        assert!(!input.is_bind_pressed(BACK));

        input.key_up(KeyCode::KeyW);
        assert!(!input.is_bind_pressed(FORWARD));
    }

    #[test]
    fn unbound_key_changes_nothing() {
        let mut input = InputState::new(8);
        input.bind_key(FORWARD, KeyCode::KeyW).unwrap();

        input.key_down(KeyCode::KeyQ);
        assert!(!input.is_bind_pressed(FORWARD));
    }

    #[test]
    fn handler_runs_before_bind_update() {
        let mut input = InputState::new(8);
        input.bind_key(FORWARD, KeyCode::KeyW).unwrap();
        input.handlers_mut().on_key_down(|_| panic!("handler aborts dispatch"));

        // The handler unwinds out of key_down; a bind update done first
        // would already be visible.
        let result = panic::catch_unwind(AssertUnwindSafe(|| input.key_down(KeyCode::KeyW)));
        assert!(result.is_err());
        assert!(!input.is_bind_pressed(FORWARD));

        input.handlers_mut().clear();
        input.key_down(KeyCode::KeyW);
        assert!(input.is_bind_pressed(FORWARD));
    }

    #[test]
    fn key_up_handler_runs_before_release() {
        let mut input = InputState::new(8);
        input.bind_key(FORWARD, KeyCode::KeyW).unwrap();
        input.key_down(KeyCode::KeyW);
        input.handlers_mut().on_key_up(|_| panic!("handler aborts dispatch"));

        let result = panic::catch_unwind(AssertUnwindSafe(|| input.key_up(KeyCode::KeyW)));
        assert!(result.is_err());
        assert!(input.is_bind_pressed(FORWARD));
    }

    #[test]
    fn key_down_reaches_handler_and_bind() {
        let mut input = InputState::new(8);
        input.bind_key(FORWARD, KeyCode::KeyW).unwrap();

        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        input
            .handlers_mut()
            .on_key_down(move |key| sink.borrow_mut().push(key));

        input.key_down(KeyCode::KeyW);
        assert_eq!(*seen.borrow(), vec![KeyCode::KeyW]);
        assert!(input.is_bind_pressed(FORWARD));
    }

    #[test]
    fn release_all_keeps_binds() {
        let mut input = InputState::new(8);
        input.bind_key(FORWARD, KeyCode::KeyW).unwrap();
        input.key_down(KeyCode::KeyW);

        input.release_all();
        assert!(!input.is_bind_pressed(FORWARD));

        input.key_down(KeyCode::KeyW);
        assert!(input.is_bind_pressed(FORWARD));
    }
}
