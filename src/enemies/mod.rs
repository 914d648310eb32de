//! Enemies module - the registry and the four archetypes.
//!
//! Every archetype is a reaction table over the shared [`Enemy`] record plus
//! a spawn hook; nothing else is archetype-specific.

mod behavior;
mod coin;
mod components;
pub mod data;
mod dummy;
mod gate;
mod merry;
mod registry;

pub use components::*;
pub use registry::Enemies;
