//! Logical keys and their keyboard bindings.

use bevy::prelude::*;

/// The five inputs the player machine understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Up,
    Left,
    Right,
    Attack,
    Down,
}

impl Key {
    pub const ALL: [Key; 5] = [Key::Up, Key::Left, Key::Right, Key::Attack, Key::Down];

    fn index(self) -> usize {
        self as usize
    }
}

/// Level and edge state of every logical key for the current frame.
#[derive(Resource, Debug, Clone, Default)]
pub struct InputState {
    pressed: [bool; 5],
    just_pressed: [bool; 5],
}

impl InputState {
    pub fn pressed(&self, key: Key) -> bool {
        self.pressed[key.index()]
    }

    pub fn just_pressed(&self, key: Key) -> bool {
        self.just_pressed[key.index()]
    }

    pub fn set(&mut self, key: Key, pressed: bool, just_pressed: bool) {
        self.pressed[key.index()] = pressed;
        self.just_pressed[key.index()] = just_pressed;
    }

    /// Press `key` this frame: held and freshly pressed.
    pub fn tap(&mut self, key: Key) {
        self.set(key, true, true);
    }
}

/// Keyboard layout for the logical keys.
#[derive(Resource, Debug, Clone)]
pub struct KeyBindings {
    pub up: KeyCode,
    pub left: KeyCode,
    pub right: KeyCode,
    pub attack: KeyCode,
    pub down: KeyCode,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            up: KeyCode::ArrowUp,
            left: KeyCode::ArrowLeft,
            right: KeyCode::ArrowRight,
            attack: KeyCode::KeyX,
            down: KeyCode::ArrowDown,
        }
    }
}

impl KeyBindings {
    pub fn code(&self, key: Key) -> KeyCode {
        match key {
            Key::Up => self.up,
            Key::Left => self.left,
            Key::Right => self.right,
            Key::Attack => self.attack,
            Key::Down => self.down,
        }
    }
}

/// Sample the keyboard into [`InputState`].
pub fn read_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    bindings: Res<KeyBindings>,
    mut input: ResMut<InputState>,
) {
    for key in Key::ALL {
        let code = bindings.code(key);
        input.set(key, keyboard.pressed(code), keyboard.just_pressed(code));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tap_sets_level_and_edge() {
        let mut input = InputState::default();
        input.tap(Key::Attack);
        assert!(input.pressed(Key::Attack));
        assert!(input.just_pressed(Key::Attack));
        assert!(!input.pressed(Key::Left));

        input.set(Key::Attack, true, false);
        assert!(input.pressed(Key::Attack));
        assert!(!input.just_pressed(Key::Attack));
    }

    #[test]
    fn default_bindings_use_arrows_and_x() {
        let bindings = KeyBindings::default();
        assert_eq!(bindings.code(Key::Left), KeyCode::ArrowLeft);
        assert_eq!(bindings.code(Key::Attack), KeyCode::KeyX);
    }
}
