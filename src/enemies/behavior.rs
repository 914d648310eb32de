//! Small movement and sensing helpers shared by the archetypes.

use super::components::Enemy;
use crate::combat::{damp, Capsule};
use crate::core::PlayMode;
use crate::world::Arena;

/// Turn to look at the player.
pub fn face_player(e: &mut Enemy, arena: &Arena) {
    e.facing = if arena.guy.pos.x > e.pos.x { 1.0 } else { -1.0 };
}

/// True when the player is outside the `near..=far` band.
pub fn check_standoff(e: &Enemy, arena: &Arena, near: f32, far: f32) -> bool {
    let gx = (arena.guy.pos.x - e.pos.x).abs();
    gx < near || gx > far
}

/// Step toward the `near..=far` band around the player.
///
/// Backing off plays the walk cycle in reverse. Returns true once the enemy
/// is inside the band.
pub fn adjust_standoff(e: &mut Enemy, arena: &Arena, near: f32, far: f32, speed: f32) -> bool {
    face_player(e, arena);
    let gx = (arena.guy.pos.x - e.pos.x).abs();
    if gx < near {
        e.pos.x -= e.facing * speed * arena.dt;
        e.anim.set_mode(PlayMode::LoopReverse);
        return false;
    }
    if gx > far {
        e.pos.x += e.facing * speed * arena.dt;
        e.anim.set_mode(PlayMode::Loop);
        return false;
    }
    true
}

/// Region between the signed offsets `near` and `far` from the body center.
pub fn capsule_ahead(e: &Enemy, near: f32, far: f32) -> Capsule {
    Capsule::ahead(e.pos, near, far, e.half.y)
}

/// Fires once every `interval` seconds of the action timer.
pub fn action_due(e: &mut Enemy, interval: f32) -> bool {
    if e.action_timer > interval {
        e.action_timer = 0.0;
        true
    } else {
        false
    }
}

/// Coast on the current impulse and let it decay.
pub fn drift(e: &mut Enemy, arena: &Arena) {
    e.pos.x += e.dx * arena.dt;
    e.dx = damp(e.dx, arena.tuning.damping, arena.dt);
}
