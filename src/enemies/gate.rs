//! Level exit. Stays shut until every coin is collected.

use std::sync::LazyLock;

use bevy::log::info;
use bevy::math::Vec2;
use rand::Rng;

use super::components::{Archetype, Enemy, EnemyId, GateState};
use super::data::gate::{HALF, STILL};
use super::registry::Enemies;
use crate::combat::Contact;
use crate::core::dispatch::set_state;
use crate::core::{AudioCue, Chord, Lesson, Reactions, SceneEvent};
use crate::world::Arena;

pub(super) fn spawn(enemies: &mut Enemies, arena: &mut Arena, at: Vec2) -> EnemyId {
    enemies.spawn_with(arena, Archetype::Gate, at, HALF, STILL, |e| {
        e.blocker = false;
    })
}

pub(super) fn reactions() -> &'static Reactions<Enemy> {
    static TABLE: LazyLock<Reactions<Enemy>> = LazyLock::new(|| {
        Reactions::<Enemy>::new()
            .on_enter(GateState::Closed.into(), |e, _| e.danger = false)
            .on_enter(GateState::Celebrating.into(), celebrate)
            .on_tick(GateState::Closed.into(), wait_for_coins)
            .on_tick(GateState::Opening.into(), slide_open)
            .on_tick(GateState::Shudder.into(), shudder)
            .on_tick(GateState::Celebrating.into(), finish)
            .on_intersect(GateState::Closed.into(), refuse)
            .on_intersect(GateState::Open.into(), pass_through)
    });
    &TABLE
}

fn jitter(arena: &mut Arena) -> f32 {
    arena.rng.gen::<f32>() * 2.0 - 1.0
}

fn wait_for_coins(e: &mut Enemy, arena: &mut Arena) {
    if arena.score.complete() {
        set_state(e, arena, GateState::Opening.into());
    }
}

fn slide_open(e: &mut Enemy, arena: &mut Arena) {
    let gate = &arena.tuning.gate;
    let t = (e.timer / gate.open_duration).clamp(0.0, 1.0);
    e.pos.y = e.home.y - t * gate.travel;
    e.pos.x = e.home.x + jitter(arena);
    if t >= 1.0 {
        e.pos.x = e.home.x;
        set_state(e, arena, GateState::Open.into());
    }
}

fn shudder(e: &mut Enemy, arena: &mut Arena) {
    e.pos.x = e.home.x;
    if e.timer < arena.tuning.gate.jitter_duration {
        e.pos.x += jitter(arena);
    }
    if e.timer > arena.tuning.gate.shudder_duration {
        set_state(e, arena, GateState::Closed.into());
    }
}

fn celebrate(e: &mut Enemy, arena: &mut Arena) {
    arena.guy.request_celebrate(e.home);
    arena.feedback.report(Lesson::Exit);
    arena.feedback.chord(Chord::G);
    arena.feedback.cue(AudioCue::Fanfare);
}

fn finish(e: &mut Enemy, arena: &mut Arena) {
    if e.timer > arena.tuning.gate.celebrate_delay && !e.completed {
        e.completed = true;
        info!("Exit gate passed");
        arena.feedback.scene(SceneEvent::Complete);
    }
}

fn refuse(e: &mut Enemy, arena: &mut Arena, contact: Contact) {
    if contact == Contact::PlayerTouch {
        set_state(e, arena, GateState::Shudder.into());
    }
}

fn pass_through(e: &mut Enemy, arena: &mut Arena, contact: Contact) {
    if contact == Contact::PlayerTouch {
        set_state(e, arena, GateState::Celebrating.into());
    }
}

#[cfg(test)]
mod tests {
    use bevy::math::Vec2;

    use crate::combat::CombatTuning;
    use crate::core::SceneEvent;
    use crate::enemies::{EnemyId, GateState};
    use crate::world::Stage;

    fn gate_state(stage: &Stage, id: EnemyId) -> GateState {
        match stage.enemies.get(id).unwrap().stat {
            crate::enemies::EnemyState::Gate(s) => s,
            other => panic!("not a gate: {other:?}"),
        }
    }

    #[test]
    fn gate_never_opens_while_coins_are_missing() {
        let mut stage = Stage::new(CombatTuning::default(), 5);
        let gate = stage.spawn_gate(0.0, 0.0);
        stage.spawn_coin(200.0, 0.0);

        stage.arena.guy.pos = Vec2::new(0.0, 0.0);
        for _ in 0..200 {
            stage.tick_enemies(0.05);
            let s = gate_state(&stage, gate);
            assert!(matches!(s, GateState::Closed | GateState::Shudder), "{s:?}");
        }
    }

    #[test]
    fn touching_a_closed_gate_shudders_then_recloses() {
        let mut stage = Stage::new(CombatTuning::default(), 5);
        let gate = stage.spawn_gate(0.0, 0.0);
        stage.spawn_coin(200.0, 0.0);

        stage.arena.guy.pos = Vec2::new(0.0, 0.0);
        stage.tick_enemies(0.05);
        assert_eq!(gate_state(&stage, gate), GateState::Shudder);

        stage.arena.guy.pos = Vec2::new(-300.0, 0.0);
        for _ in 0..41 {
            stage.tick_enemies(0.05);
        }
        assert_eq!(gate_state(&stage, gate), GateState::Closed);
        assert_eq!(stage.enemies.get(gate).unwrap().pos.x, 0.0);
    }

    #[test]
    fn gate_opens_on_the_tick_after_the_last_coin() {
        let mut stage = Stage::new(CombatTuning::default(), 5);
        let gate = stage.spawn_gate(100.0, 0.0);
        stage.spawn_coin(0.0, 0.0);
        stage.arena.guy.pos = Vec2::new(-300.0, 0.0);

        stage.tick_enemies(0.05);
        assert_eq!(gate_state(&stage, gate), GateState::Closed);

        // Collect the coin; the gate ticked before it this frame.
        stage.arena.guy.pos = Vec2::new(0.0, 0.0);
        stage.tick_enemies(0.05);
        assert_eq!(stage.arena.score.collected, 1);
        assert_eq!(gate_state(&stage, gate), GateState::Closed);

        stage.arena.guy.pos = Vec2::new(-300.0, 0.0);
        stage.tick_enemies(0.05);
        assert_eq!(gate_state(&stage, gate), GateState::Opening);

        for _ in 0..30 {
            stage.tick_enemies(0.05);
        }
        let g = stage.enemies.get(gate).unwrap();
        assert_eq!(gate_state(&stage, gate), GateState::Open);
        assert_eq!(g.pos, Vec2::new(100.0, -28.0));
    }

    #[test]
    fn walking_through_the_open_gate_completes_once() {
        let mut stage = Stage::new(CombatTuning::default(), 5);
        let gate = stage.spawn_gate(0.0, 0.0);
        stage.arena.guy.pos = Vec2::new(-300.0, 0.0);
        for _ in 0..30 {
            stage.tick_enemies(0.05);
        }
        assert_eq!(gate_state(&stage, gate), GateState::Open);

        stage.arena.guy.pos = Vec2::new(0.0, -20.0);
        for _ in 0..60 {
            stage.tick_enemies(0.05);
        }
        assert_eq!(gate_state(&stage, gate), GateState::Celebrating);
        let completions = stage
            .arena
            .feedback
            .scene_events()
            .iter()
            .filter(|e| **e == SceneEvent::Complete)
            .count();
        assert_eq!(completions, 1);
        let g = stage.enemies.get(gate).unwrap();
        assert!(g.completed);
        assert!(!g.engaged);
    }
}
