//! The player character record.

use bevy::math::Vec2;

use crate::combat::{Capsule, CombatTuning};
use crate::core::{AnimInstance, PlayMode};
use crate::enemies::EnemyId;
use crate::rendering::Tint;

/// Player states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GuyState {
    /// Not placed in the level yet.
    #[default]
    Limbo,
    Idle,
    Walk,
    Jump,
    Fall,
    Garde,
    Advance,
    Lunge,
    /// Drawing the sword on the way into garde.
    DrawGarde,
    /// Sheathing the sword on the way out of garde.
    DrawIdle,
    Knockback,
    Celebrate,
    Fake,
    Parry,
}

/// Frame ranges on the player sprite sheet.
pub mod frames {
    use crate::core::FrameRange;

    pub const IDLE: FrameRange = FrameRange::new(0, 3);
    pub const RUN: FrameRange = FrameRange::new(4, 9);
    pub const JUMP: FrameRange = FrameRange::single(10);
    pub const FALL: FrameRange = FrameRange::single(11);
    pub const GARDE: FrameRange = FrameRange::new(12, 13);
    pub const ADVANCE: FrameRange = FrameRange::new(14, 17);
    pub const LUNGE: FrameRange = FrameRange::new(18, 20);
    pub const FAKE: FrameRange = FrameRange::new(21, 23);
    pub const PARRY: FrameRange = FrameRange::new(24, 26);
    pub const DRAW: FrameRange = FrameRange::new(27, 29);
    pub const VICTORY: FrameRange = FrameRange::new(30, 33);
}

/// An enemy that hurt the player this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DamageSource {
    pub id: EnemyId,
    /// Horizontal position at contact; knockback points away from it.
    pub x: f32,
}

/// The player.
#[derive(Debug, Clone)]
pub struct Guy {
    pub pos: Vec2,
    pub half: Vec2,
    pub facing: f32,
    pub dx: f32,
    pub dy: f32,
    /// Seconds since the last transition.
    pub timer: f32,
    pub jump_count: u32,
    pub last_floor: f32,
    pub stat: GuyState,
    /// Sensor that pulls the player into garde when a fighter is near.
    pub garde_check: Capsule,
    /// Nearest dangerous enemy, recomputed every tick.
    pub focus: Option<EnemyId>,
    /// State entered when a jump starts falling.
    pub fall_transition: GuyState,
    /// State the player was in when leaving the ground.
    pub before_jump: GuyState,
    pub attack_box: Option<Capsule>,
    pub parry_box: Option<Capsule>,
    pub in_garde: bool,
    /// Clock time of the last successful parry.
    pub parry_time: f32,
    /// The current lunge was parried by an enemy.
    pub was_parried: bool,
    /// Enemies that hurt the player since the last resolution.
    pub damage: Vec<DamageSource>,
    pub health: i32,
    pub anim: AnimInstance,
    pub tint: Tint,
    pub camera_target: Vec2,
    /// Snap the camera instead of easing this frame.
    pub camera_cut: bool,
    pub(super) requested: Option<GuyState>,
    pub(super) celebrate_at: Vec2,
    pub(super) pending_spawn: Option<Vec2>,
    pub(super) dead: bool,
}

impl Guy {
    pub fn new(tuning: &CombatTuning) -> Self {
        let t = &tuning.guy;
        Self {
            pos: Vec2::ZERO,
            half: Vec2::new(t.half_width, t.half_height),
            facing: 1.0,
            dx: 0.0,
            dy: 0.0,
            timer: 0.0,
            jump_count: 0,
            last_floor: 0.0,
            stat: GuyState::Limbo,
            garde_check: Capsule::new(0.0, 0.0, t.garde_small, t.half_height),
            focus: None,
            fall_transition: GuyState::Fall,
            before_jump: GuyState::Idle,
            attack_box: None,
            parry_box: None,
            in_garde: false,
            parry_time: f32::NEG_INFINITY,
            was_parried: false,
            damage: Vec::new(),
            health: t.health,
            anim: AnimInstance::new(frames::IDLE, PlayMode::Loop, tuning.frame_time),
            tint: Tint::Normal,
            camera_target: Vec2::ZERO,
            camera_cut: false,
            requested: None,
            celebrate_at: Vec2::ZERO,
            pending_spawn: None,
            dead: false,
        }
    }

    pub fn body(&self) -> Capsule {
        Capsule::at(self.pos, self.half)
    }

    /// Queue a hit from enemy `id`. Repeated hits from the same enemy before
    /// the next resolution count once.
    pub fn take_damage(&mut self, id: EnemyId, x: f32) {
        if !self.damage.iter().any(|d| d.id == id) {
            self.damage.push(DamageSource { id, x });
        }
    }

    /// A strike connected. Unless it was parried the lunge loses momentum.
    pub fn hit_landed(&mut self) {
        if !self.was_parried {
            self.dx *= 0.5;
        }
    }

    pub fn hit_parried(&mut self) {
        self.was_parried = true;
    }

    /// Ask the player to celebrate at `at` on its next tick.
    pub fn request_celebrate(&mut self, at: Vec2) {
        if self.stat != GuyState::Celebrate {
            self.requested = Some(GuyState::Celebrate);
            self.celebrate_at = at;
        }
    }

    /// Take the player out of play; the next tick places it at `at`.
    pub fn spawn_at(&mut self, at: Vec2) {
        self.stat = GuyState::Limbo;
        self.requested = Some(GuyState::Idle);
        self.pending_spawn = Some(at);
    }

    /// Scene death has been requested since the last spawn.
    pub fn is_dead(&self) -> bool {
        self.dead
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn landed_hit_slows_the_lunge_unless_it_was_parried() {
        let mut guy = Guy::new(&CombatTuning::default());
        guy.dx = 100.0;
        guy.hit_landed();
        assert_eq!(guy.dx, 50.0);

        guy.dx = 100.0;
        guy.hit_parried();
        guy.hit_landed();
        assert_eq!(guy.dx, 100.0);
    }

    #[test]
    fn repeated_hits_from_one_enemy_queue_once() {
        let mut guy = Guy::new(&CombatTuning::default());
        guy.take_damage(EnemyId(3), 10.0);
        guy.take_damage(EnemyId(3), 12.0);
        guy.take_damage(EnemyId(4), -5.0);
        assert_eq!(guy.damage.len(), 2);
    }
}
