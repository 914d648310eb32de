//! Core plugin that sets up game states, events and system ordering.

use bevy::prelude::*;

use super::events::*;
use super::states::*;

/// Core plugin - must be added first as other plugins depend on it.
///
/// This plugin sets up:
/// - Game states (Loading, Playing, Dead, Complete)
/// - Outgoing events (AudioCue, LessonEvent, SceneEvent)
/// - The chained `StageSet` order; everything before `Present` only runs
///   while `Playing`, so a finished stage stays on screen
pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app
            .init_state::<GameState>()

            .add_event::<AudioCue>()
            .add_event::<LessonEvent>()
            .add_event::<SceneEvent>()

            .configure_sets(
                Update,
                (
                    StageSet::Input,
                    StageSet::Simulate,
                    StageSet::Feedback,
                    StageSet::Present,
                )
                    .chain(),
            )
            .configure_sets(
                Update,
                (StageSet::Input, StageSet::Simulate, StageSet::Feedback)
                    .run_if(in_state(GameState::Playing)),
            )

            .add_systems(Update, log_scene_events);
    }
}

/// Mirror scene requests into the log so a run can be followed from the
/// console.
fn log_scene_events(mut events: EventReader<SceneEvent>) {
    for event in events.read() {
        match event {
            SceneEvent::Death => info!("Scene death requested"),
            SceneEvent::Complete => info!("Scene complete requested"),
        }
    }
}
