//! Player module - the player record, its state machine and input.

mod components;
mod input;
mod machine;
mod plugin;

pub use components::*;
pub use input::{read_input, InputState, Key, KeyBindings};
pub use machine::{draw, tick};
pub use plugin::PlayerPlugin;
