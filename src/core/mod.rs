//! Core game module - states, events, dispatch and animation.
//!
//! This module provides the foundation that all other game systems build upon.

mod animation;
pub mod dispatch;
mod events;
mod feedback;
mod plugin;
mod states;

pub use animation::*;
pub use dispatch::{Machine, Reactions, StateKey};
pub use events::*;
pub use feedback::*;
pub use plugin::CorePlugin;
pub use states::*;
