//! Swordplay - the combat core of a small 2D fencing game in Bevy.
//!
//! # Architecture
//!
//! The simulation is plain Rust driven by one Bevy resource, the
//! [`world::Stage`]. Plugins only feed it input, step it, publish what it
//! reports and draw it:
//!
//! - **Core**: Game states, outgoing events, the state-dispatch tables
//! - **Combat**: Capsule overlap, strike resolution, tuning
//! - **Enemies**: The registry and the Coin, Dummy, Gate and Merry archetypes
//! - **Player**: The player state machine and keyboard input
//! - **World**: The stage, level layouts, terrain and scene flow
//! - **Rendering**: Draw commands, placeholder visuals, camera

pub mod combat;
pub mod core;
pub mod enemies;
pub mod player;
pub mod rendering;
pub mod world;

use bevy::prelude::*;

/// Main game plugin that adds all sub-plugins.
pub struct SwordplayPlugin;

impl Plugin for SwordplayPlugin {
    fn build(&self, app: &mut App) {
        app
            // Core systems (must be first)
            .add_plugins(core::CorePlugin)

            // Keyboard into logical keys
            .add_plugins(player::PlayerPlugin)

            // Stage setup and stepping
            .add_plugins(world::WorldPlugin)

            // Rendering systems
            .add_plugins(rendering::RenderingPlugin);
    }
}
