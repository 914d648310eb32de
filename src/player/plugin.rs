//! Player plugin - keyboard sampling ahead of the simulation step.

use bevy::prelude::*;

use super::input::{read_input, InputState, KeyBindings};
use crate::core::StageSet;

/// Player plugin - owns the logical input state the stage step reads.
pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<InputState>()
            .init_resource::<KeyBindings>()
            .add_systems(Update, read_input.in_set(StageSet::Input));
    }
}
