//! Merry, the sword fighter.
//!
//! Merry notices the player with a forward sensor, then holds a standoff
//! distance in garde and lunges on a fixed rhythm. Player strikes are settled
//! by the wildcard contact reaction: while Merry is reeling every strike
//! lands, otherwise a coin flip decides between a hit and a parry, and until
//! the player has learned to parry Merry parries everything.

use std::sync::LazyLock;

use bevy::log::info;
use bevy::math::Vec2;
use rand::Rng;

use super::behavior::{action_due, adjust_standoff, capsule_ahead, check_standoff, drift, face_player};
use super::coin;
use super::components::{Archetype, Enemy, EnemyId, MerryState};
use super::data::merry::*;
use super::registry::Enemies;
use crate::combat::{resolve_strike, Contact, StrikeOutcome};
use crate::core::dispatch::set_state;
use crate::core::{AudioCue, Chord, Lesson, PlayMode, Reactions};
use crate::world::Arena;

pub(super) fn spawn(enemies: &mut Enemies, arena: &mut Arena, at: Vec2) -> EnemyId {
    let reward = coin::spawn(enemies, arena, at, false);
    let health = arena.tuning.merry.health;
    enemies.spawn_with(arena, Archetype::Merry, at, HALF, IDLE, |e| {
        e.health = health;
        e.fighter = true;
        e.link = Some(reward);
    })
}

pub(super) fn reactions() -> &'static Reactions<Enemy> {
    use MerryState::*;

    static TABLE: LazyLock<Reactions<Enemy>> = LazyLock::new(|| {
        Reactions::<Enemy>::new()
            .on_enter(Idle.into(), enter_idle)
            .on_enter(Garde.into(), enter_garde)
            .on_enter(Advance.into(), |e, _| e.anim.set_range(ADVANCE, PlayMode::Loop))
            .on_enter(Hit.into(), enter_hit)
            .on_enter(Windup.into(), |e, _| e.anim.reset_range(WINDUP, PlayMode::NoLoop))
            .on_enter(Lunge.into(), enter_lunge)
            .on_enter(Flinch.into(), |e, _| e.anim.reset_range(FLINCH, PlayMode::NoLoop))
            .on_enter(Parry.into(), enter_parry)
            .on_enter(Dead.into(), enter_dead)
            .on_tick(Idle.into(), watch)
            .on_tick(Garde.into(), hold_garde)
            .on_tick(Advance.into(), advance)
            .on_tick(Hit.into(), reel)
            .on_tick(Windup.into(), |e, arena| after_anim(e, arena, Lunge))
            .on_tick(Lunge.into(), lunge)
            .on_tick(Flinch.into(), flinch)
            .on_tick(Parry.into(), |e, arena| after_anim(e, arena, Garde))
            .on_intersect(Idle.into(), notice)
            .on_intersect_any(arbitrate)
    });
    &TABLE
}

fn enter_idle(e: &mut Enemy, _arena: &mut Arena) {
    e.engaged = false;
    e.vulnerable = true;
}

fn enter_garde(e: &mut Enemy, arena: &mut Arena) {
    e.anim.set_range(GARDE, PlayMode::PingPong);
    if !e.engaged {
        e.action_timer = arena.tuning.merry.engage_head_start;
    }
    e.engaged = true;
    e.vulnerable = true;
}

fn enter_hit(e: &mut Enemy, arena: &mut Arena) {
    e.dx = -e.facing * arena.tuning.merry.knockback_speed;
    e.anim.reset_range(HIT, PlayMode::NoLoop);
    e.health = (e.health - 1).max(0);
    if e.health == 0 {
        info!("Merry defeated");
        arena.feedback.chord(Chord::Bm);
        arena.feedback.cue(AudioCue::Pluck);
        arena.reveal(e.link, e.pos);
        set_state(e, arena, MerryState::Dead.into());
    }
    e.vulnerable = false;
}

fn enter_lunge(e: &mut Enemy, arena: &mut Arena) {
    e.dx = e.facing * arena.tuning.merry.lunge_speed;
    e.anim.reset_range(LUNGE, PlayMode::NoLoop);
}

fn enter_parry(e: &mut Enemy, _arena: &mut Arena) {
    e.anim.reset_range(PARRY, PlayMode::NoLoop);
    e.vulnerable = false;
}

fn enter_dead(e: &mut Enemy, _arena: &mut Arena) {
    e.anim.reset_range(DEATH, PlayMode::NoLoop);
    e.blocker = false;
    e.danger = false;
    e.fighter = false;
}

fn watch(e: &mut Enemy, arena: &mut Arena) {
    face_player(e, arena);
    e.detect = Some(capsule_ahead(e, 0.0, e.facing * arena.tuning.merry.detect_range));
}

fn hold_garde(e: &mut Enemy, arena: &mut Arena) {
    e.danger = true;
    let (near, far) = (arena.tuning.merry.hold_near, arena.tuning.merry.hold_far);
    if check_standoff(e, arena, near, far) {
        set_state(e, arena, MerryState::Advance.into());
    }
    if action_due(e, arena.tuning.merry.action_interval) {
        set_state(e, arena, MerryState::Windup.into());
    }
}

fn advance(e: &mut Enemy, arena: &mut Arena) {
    let m = &arena.tuning.merry;
    let (near, far, speed, interval) = (m.adjust_near, m.adjust_far, m.advance_speed, m.action_interval);
    if adjust_standoff(e, arena, near, far, speed) {
        set_state(e, arena, MerryState::Garde.into());
    }
    if action_due(e, interval) {
        set_state(e, arena, MerryState::Windup.into());
    }
}

fn reel(e: &mut Enemy, arena: &mut Arena) {
    e.danger = false;
    drift(e, arena);
    after_anim(e, arena, MerryState::Garde);
}

fn lunge(e: &mut Enemy, arena: &mut Arena) {
    drift(e, arena);
    // The blade is only live on one frame of the thrust.
    if e.anim.is_relative_frame(arena.tuning.merry.lunge_active_frame) {
        e.attack = Some(capsule_ahead(e, 0.0, e.facing * arena.tuning.merry.reach));
    }
    if e.anim.is_finished() {
        e.action_timer = 0.0;
        set_state(e, arena, MerryState::Garde.into());
    }
}

fn flinch(e: &mut Enemy, arena: &mut Arena) {
    e.danger = false;
    if e.anim.is_finished() {
        e.action_timer = 0.0;
        set_state(e, arena, MerryState::Garde.into());
    }
}

fn after_anim(e: &mut Enemy, arena: &mut Arena, next: MerryState) {
    if e.anim.is_finished() {
        set_state(e, arena, next.into());
    }
}

fn notice(e: &mut Enemy, arena: &mut Arena, contact: Contact) {
    if contact == Contact::PlayerDetected {
        set_state(e, arena, MerryState::Garde.into());
    }
}

fn arbitrate(e: &mut Enemy, arena: &mut Arena, contact: Contact) {
    match contact {
        Contact::PlayerAttack if e.vulnerable => {
            let in_recoil = e.is(MerryState::Flinch) || e.is(MerryState::Hit);
            let taught = arena.feedback.lessons_seen(Lesson::Parry) >= arena.tuning.parry_lessons;
            let roll = arena.rng.gen::<f32>();
            match resolve_strike(in_recoil, roll, taught, arena.tuning.parry_threshold) {
                StrikeOutcome::Parried => {
                    arena.guy.hit_parried();
                    set_state(e, arena, MerryState::Parry.into());
                }
                StrikeOutcome::Hit => {
                    set_state(e, arena, MerryState::Hit.into());
                }
            }
        }
        Contact::PlayerParried => {
            set_state(e, arena, MerryState::Flinch.into());
        }
        _ => {}
    }
}
