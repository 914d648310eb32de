//! Game flow states and the per-frame system ordering.
//!
//! States decide whether the stage is simulated at all; the stage sets
//! decide the order of work inside a simulated frame.

use bevy::prelude::*;

/// Main game states.
///
/// - Start in `Loading` to read tuning and bindings
/// - `Playing` simulates the current level
/// - `Dead` restarts the level on the next frame
/// - `Complete` freezes the stage after the exit gate
#[derive(States, Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum GameState {
    #[default]
    Loading,
    Playing,
    Dead,
    Complete,
}

/// Ordering of the work done every frame while playing.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StageSet {
    /// Keyboard into logical keys.
    Input,
    /// Enemies, then the player.
    Simulate,
    /// Queued cues, lessons and scene requests out to Bevy events.
    Feedback,
    /// Draw list and camera.
    Present,
}
