//! Training dummy: a stationary target that drops a coin when destroyed.

use std::sync::LazyLock;

use bevy::math::Vec2;

use super::behavior::face_player;
use super::coin;
use super::components::{Archetype, DummyState, Enemy, EnemyId};
use super::data::dummy::{DEATH, HALF, HIT, IDLE};
use super::registry::Enemies;
use crate::combat::Contact;
use crate::core::dispatch::set_state;
use crate::core::{AudioCue, Chord, PlayMode, Reactions};
use crate::world::Arena;

pub(super) fn spawn(enemies: &mut Enemies, arena: &mut Arena, at: Vec2) -> EnemyId {
    let reward = coin::spawn(enemies, arena, at, false);
    let health = arena.tuning.dummy.health;
    enemies.spawn_with(arena, Archetype::Dummy, at, HALF, IDLE, |e| {
        e.fighter = true;
        e.health = health;
        e.link = Some(reward);
    })
}

pub(super) fn reactions() -> &'static Reactions<Enemy> {
    static TABLE: LazyLock<Reactions<Enemy>> = LazyLock::new(|| {
        Reactions::<Enemy>::new()
            .on_enter(DummyState::Idle.into(), enter_idle)
            .on_enter(DummyState::Hit.into(), enter_hit)
            .on_enter(DummyState::Dead.into(), enter_dead)
            .on_tick(DummyState::Idle.into(), |e, arena| face_player(e, arena))
            .on_tick(DummyState::Hit.into(), recover)
            .on_intersect(DummyState::Idle.into(), struck)
    });
    &TABLE
}

fn enter_idle(e: &mut Enemy, _arena: &mut Arena) {
    e.anim.set_range(IDLE, PlayMode::PingPong);
    e.danger = true;
}

fn enter_hit(e: &mut Enemy, arena: &mut Arena) {
    e.health = (e.health - 1).max(0);
    if e.health == 0 {
        e.anim.reset_range(DEATH, PlayMode::NoLoop);
        set_state(e, arena, DummyState::Dead.into());
        arena.reveal(e.link, e.pos);
    } else {
        e.anim.reset_range(HIT, PlayMode::NoLoop);
    }
}

fn enter_dead(e: &mut Enemy, arena: &mut Arena) {
    arena.feedback.chord(Chord::Bm);
    arena.feedback.cue(AudioCue::Pluck);
    e.danger = false;
    e.blocker = false;
    e.fighter = false;
}

fn recover(e: &mut Enemy, arena: &mut Arena) {
    if e.anim.is_finished() {
        set_state(e, arena, DummyState::Idle.into());
    }
}

fn struck(e: &mut Enemy, arena: &mut Arena, contact: Contact) {
    if contact == Contact::PlayerAttack {
        set_state(e, arena, DummyState::Hit.into());
    }
}
