//! Logical action to physical key bindings.

use winit::keyboard::KeyCode;

use crate::{InputError, Result};

/// Application-defined identifier for a user-facing control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ActionId(pub u32);

impl From<u32> for ActionId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

/// One action bound to one physical key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyBind {
    pub action: ActionId,
    pub key: KeyCode,
    pub pressed: bool,
}

/// Ordered table of key binds with a fixed maximum size.
///
/// Action ids need not be unique. Lookups return the first entry in
/// registration order; key events update every entry on that key.
#[derive(Debug)]
pub struct KeyBindTable {
    binds: Vec<KeyBind>,
    capacity: usize,
}

impl KeyBindTable {
    /// Create an empty table that accepts at most `capacity` binds.
    #[must_use]
    pub const fn new(capacity: usize) -> Self {
        Self {
            binds: Vec::new(),
            capacity,
        }
    }

    /// Append a bind in the released state.
    ///
    /// Existing binds for the same action are left in place.
    pub fn bind(&mut self, action: impl Into<ActionId>, key: KeyCode) -> Result<()> {
        if self.binds.len() >= self.capacity {
            return Err(InputError::BindTableFull {
                capacity: self.capacity,
            });
        }
        self.binds.try_reserve(1)?;
        self.binds.push(KeyBind {
            action: action.into(),
            key,
            pressed: false,
        });
        Ok(())
    }

    /// Pressed state of the first bind for `action`.
    ///
    /// Unknown actions are reported as not pressed.
    #[must_use]
    pub fn is_pressed(&self, action: impl Into<ActionId>) -> bool {
        let action = action.into();
        self.binds
            .iter()
            .find(|b| b.action == action)
            .is_some_and(|b| b.pressed)
    }

    /// Set the pressed state of every bind on `key`.
    pub fn set_key_state(&mut self, key: KeyCode, pressed: bool) {
        for bind in self.binds.iter_mut().filter(|b| b.key == key) {
            bind.pressed = pressed;
        }
    }

    /// Mark every bind as released.
    pub fn release_all(&mut self) {
        for bind in &mut self.binds {
            bind.pressed = false;
        }
    }

    /// All binds in registration order.
    #[must_use]
    pub fn binds(&self) -> &[KeyBind] {
        &self.binds
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.binds.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.binds.is_empty()
    }

    /// Maximum number of binds.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const JUMP: ActionId = ActionId(1);
    const FIRE: ActionId = ActionId(2);

    #[test]
    fn unknown_action_is_released() {
        let table = KeyBindTable::new(8);
        assert!(!table.is_pressed(JUMP));
    }

    #[test]
    fn press_and_release() {
        let mut table = KeyBindTable::new(8);
        table.bind(JUMP, KeyCode::Space).unwrap();
        assert!(!table.is_pressed(JUMP));

        table.set_key_state(KeyCode::Space, true);
        assert!(table.is_pressed(JUMP));

        table.set_key_state(KeyCode::Space, false);
        assert!(!table.is_pressed(JUMP));
    }

    #[test]
    fn shared_key_updates_every_bind() {
        let mut table = KeyBindTable::new(8);
        table.bind(JUMP, KeyCode::Space).unwrap();
        table.bind(FIRE, KeyCode::Space).unwrap();

        table.set_key_state(KeyCode::Space, true);
        assert!(table.is_pressed(JUMP));
        assert!(table.is_pressed(FIRE));
    }

    #[test]
    fn duplicate_action_first_wins() {
        let mut table = KeyBindTable::new(8);
        table.bind(JUMP, KeyCode::Space).unwrap();
        table.bind(JUMP, KeyCode::KeyW).unwrap();
        assert_eq!(table.len(), 2);

        // Only the second bind is down; lookup sees the first.
        table.set_key_state(KeyCode::KeyW, true);
        assert!(!table.is_pressed(JUMP));

        table.set_key_state(KeyCode::Space, true);
        assert!(table.is_pressed(JUMP));
    }

    #[test]
    fn capacity_is_enforced() {
        let mut table = KeyBindTable::new(2);
        table.bind(1_u32, KeyCode::KeyA).unwrap();
        table.bind(2_u32, KeyCode::KeyB).unwrap();

        assert!(matches!(
            table.bind(3_u32, KeyCode::KeyC),
            Err(InputError::BindTableFull { capacity: 2 })
        ));
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn release_all() {
        let mut table = KeyBindTable::new(4);
        table.bind(JUMP, KeyCode::Space).unwrap();
        table.set_key_state(KeyCode::Space, true);

        table.release_all();
        assert!(!table.is_pressed(JUMP));
        assert_eq!(table.binds()[0].key, KeyCode::Space);
    }
}
