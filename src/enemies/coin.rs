//! Collectible coin.
//!
//! Coins bob in place until touched or struck, then count towards the gate
//! and fly off. A coin owned by another enemy waits inactive until its owner
//! dies and reveals it with a short hop.

use std::f32::consts::PI;
use std::sync::LazyLock;

use bevy::math::Vec2;
use rand::Rng;

use super::components::{Archetype, CoinState, Enemy, EnemyId};
use super::data::coin::{HALF, SPIN};
use super::registry::Enemies;
use crate::combat::Contact;
use crate::core::dispatch::set_state;
use crate::core::{AudioCue, PlayMode, Reactions};
use crate::world::Arena;

pub(super) fn spawn(enemies: &mut Enemies, arena: &mut Arena, at: Vec2, active: bool) -> EnemyId {
    arena.score.total += 1;
    enemies.spawn_with(arena, Archetype::Coin, at, HALF, SPIN, |e| {
        e.actv = active;
        e.blocker = false;
    })
}

/// Reveal a waiting coin at `at`, hopping away from the player.
pub fn appear(e: &mut Enemy, arena: &mut Arena, at: Vec2) {
    e.actv = true;
    e.pos = at;
    e.home = at;
    let drift = arena.tuning.coin.drift_speed;
    e.dx = if at.x > arena.guy.pos.x { drift } else { -drift };
    set_state(e, arena, CoinState::Appear.into());
}

pub(super) fn reactions() -> &'static Reactions<Enemy> {
    static TABLE: LazyLock<Reactions<Enemy>> = LazyLock::new(|| {
        Reactions::<Enemy>::new()
            .on_enter(CoinState::Idle.into(), enter_idle)
            .on_enter(CoinState::PickedUp.into(), enter_picked_up)
            .on_tick(CoinState::Idle.into(), bob)
            .on_tick(CoinState::Appear.into(), hop)
            .on_tick(CoinState::Leaving.into(), fly_off)
            .on_intersect(CoinState::Idle.into(), pick_up)
            .on_intersect(CoinState::Appear.into(), pick_up_after_hop)
    });
    &TABLE
}

fn enter_idle(e: &mut Enemy, arena: &mut Arena) {
    e.danger = false;
    e.phase = arena.rng.gen::<f32>() * arena.tuning.coin.phase_spread;
    e.anim.set_mode(PlayMode::PingPong);
}

fn enter_picked_up(e: &mut Enemy, arena: &mut Arena) {
    arena.score.collected += 1;
    arena.feedback.cue(AudioCue::Pickup);
    e.anim.reset_range(SPIN, PlayMode::NoLoop);
    set_state(e, arena, CoinState::Leaving.into());
}

fn bob(e: &mut Enemy, arena: &mut Arena) {
    let coin = &arena.tuning.coin;
    let wave = ((e.timer + e.phase) * PI * coin.bob_rate).sin().abs();
    e.pos.y = e.home.y + wave * coin.bob_height;
}

fn hop(e: &mut Enemy, arena: &mut Arena) {
    let coin = &arena.tuning.coin;
    let t = e.timer;
    let height = coin.arc_height - t * coin.arc_decay;
    e.pos.x += arena.dt * e.dx;
    e.pos.y = e.home.y + (t * PI * coin.bob_rate).sin().abs() * height;
    if t >= coin.arc_duration {
        set_state(e, arena, CoinState::Idle.into());
    }
}

fn fly_off(e: &mut Enemy, arena: &mut Arena) {
    let coin = &arena.tuning.coin;
    e.pos.y = e.home.y + e.timer.sqrt() * coin.leave_rise;
    if e.timer > coin.leave_duration {
        arena.remove(e.id);
    }
}

fn pick_up(e: &mut Enemy, arena: &mut Arena, _contact: Contact) {
    set_state(e, arena, CoinState::PickedUp.into());
}

fn pick_up_after_hop(e: &mut Enemy, arena: &mut Arena, _contact: Contact) {
    if e.timer > arena.tuning.coin.arc_duration {
        set_state(e, arena, CoinState::PickedUp.into());
    }
}
