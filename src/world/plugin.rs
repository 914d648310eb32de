//! World plugin - stage setup, the fixed simulation order and scene flow.

use bevy::prelude::*;

use crate::combat::CombatTuning;
use crate::core::{AudioCue, GameState, LessonEvent, SceneEvent, StageSet};
use crate::player::InputState;

use super::level::LevelLayout;
use super::stage::Stage;
use super::terrain::{ActiveTerrain, FlatGround};

/// Longest step the stage takes in one frame. Hitches slow the game down
/// instead of tunnelling through enemies.
const MAX_STEP: f32 = 1.0 / 20.0;

/// World plugin - owns the [`Stage`] resource and drives it each frame.
pub struct WorldPlugin;

impl Plugin for WorldPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ActiveTerrain>()
            .add_systems(OnEnter(GameState::Loading), setup_stage)
            .add_systems(OnEnter(GameState::Playing), start_level)
            .add_systems(OnEnter(GameState::Dead), restart_level)
            .add_systems(Update, step_stage.in_set(StageSet::Simulate))
            .add_systems(
                Update,
                (flush_feedback, handle_scene_events)
                    .chain()
                    .in_set(StageSet::Feedback),
            );
    }
}

/// Read tuning and the level, build an empty stage, then start playing.
fn setup_stage(mut commands: Commands, mut next_state: ResMut<NextState<GameState>>) {
    let tuning = CombatTuning::load();
    let layout = LevelLayout::load();
    let seed = rand::random::<u64>();
    debug!("Stage seed {}", seed);

    commands.insert_resource(Stage::new(tuning, seed));
    commands.insert_resource(layout);
    next_state.set(GameState::Playing);
}

/// Populate the stage from the current layout. Runs on every (re)start.
fn start_level(
    mut stage: ResMut<Stage>,
    mut terrain: ResMut<ActiveTerrain>,
    layout: Res<LevelLayout>,
) {
    stage.clear();
    *terrain = ActiveTerrain(Box::new(FlatGround::new(layout.floor)));
    stage.spawn_layout(&layout);
}

fn restart_level(mut next_state: ResMut<NextState<GameState>>) {
    info!("Restarting level");
    next_state.set(GameState::Playing);
}

fn step_stage(
    time: Res<Time>,
    input: Res<InputState>,
    terrain: Res<ActiveTerrain>,
    mut stage: ResMut<Stage>,
) {
    let dt = time.delta_secs().min(MAX_STEP);
    if dt <= 0.0 {
        return;
    }
    stage.step(dt, &input, terrain.0.as_ref());
}

/// Publish everything the step queued as Bevy events.
fn flush_feedback(
    mut stage: ResMut<Stage>,
    mut cues: EventWriter<AudioCue>,
    mut lessons: EventWriter<LessonEvent>,
    mut scene: EventWriter<SceneEvent>,
) {
    let drained = stage.arena.feedback.drain();

    for cue in drained.cues {
        trace!("cue {:?}", cue);
        cues.send(cue);
    }
    for (lesson, count) in drained.lessons {
        if count == 1 {
            info!("First {:?} lesson", lesson);
        }
        lessons.send(LessonEvent { lesson, count });
    }
    for event in drained.scene {
        scene.send(event);
    }
}

fn handle_scene_events(
    mut events: EventReader<SceneEvent>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    for event in events.read() {
        match event {
            SceneEvent::Death => next_state.set(GameState::Dead),
            SceneEvent::Complete => next_state.set(GameState::Complete),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::state::app::StatesPlugin;

    fn app() -> App {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, StatesPlugin))
            .init_resource::<ButtonInput<KeyCode>>()
            .add_plugins(crate::core::CorePlugin)
            .add_plugins(crate::player::PlayerPlugin)
            .add_plugins(WorldPlugin);
        app
    }

    #[test]
    fn loading_builds_a_stage_and_starts_playing() {
        let mut app = app();
        app.update();
        app.update();

        assert_eq!(
            app.world().resource::<State<GameState>>().get(),
            &GameState::Playing
        );
        let stage = app.world().resource::<Stage>();
        assert!(!stage.enemies.is_empty());
    }

    #[test]
    fn death_restarts_the_level() {
        let mut app = app();
        app.update();
        app.update();

        app.world_mut()
            .resource_mut::<Stage>()
            .arena
            .feedback
            .scene(SceneEvent::Death);
        // One frame to publish the request, one to apply the transition.
        app.update();
        app.update();
        assert_eq!(
            app.world().resource::<State<GameState>>().get(),
            &GameState::Dead
        );

        app.update();
        assert_eq!(
            app.world().resource::<State<GameState>>().get(),
            &GameState::Playing
        );
    }
}
