//! The simulated stage: the player, the enemy registry and the shared
//! context every reaction runs against.

use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use super::level::LevelLayout;
use super::terrain::Terrain;
use crate::combat::CombatTuning;
use crate::core::{AudioCue, Feedback, Lesson};
use crate::enemies::{Enemies, EnemyId};
use crate::player::{self, Guy, InputState};
use crate::rendering::SpriteSink;

/// Coins collected against coins placed in the level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Score {
    pub collected: u32,
    pub total: u32,
}

impl Score {
    pub fn complete(&self) -> bool {
        self.collected >= self.total
    }
}

/// Registry changes requested mid-pass, applied once the pass is over.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Deferred {
    /// Activate a hidden coin at a point.
    Reveal { coin: EnemyId, at: Vec2 },
    /// Drop an enemy from the registry.
    Remove(EnemyId),
}

/// Everything an enemy reaction may read or write besides its own record.
pub struct Arena {
    pub guy: Guy,
    pub score: Score,
    pub feedback: Feedback,
    pub tuning: CombatTuning,
    pub rng: StdRng,
    /// Seconds simulated since the stage was created.
    pub clock: f32,
    /// Length of the current step.
    pub dt: f32,
    pub pending: Vec<Deferred>,
}

impl Arena {
    pub fn new(tuning: CombatTuning, seed: u64) -> Self {
        Self {
            guy: Guy::new(&tuning),
            score: Score::default(),
            feedback: Feedback::default(),
            tuning,
            rng: StdRng::seed_from_u64(seed),
            clock: 0.0,
            dt: 0.0,
            pending: Vec::new(),
        }
    }

    /// Ask for `coin` to appear at `at`. Enemies without a linked coin pass
    /// `None` and nothing happens.
    pub fn reveal(&mut self, coin: Option<EnemyId>, at: Vec2) {
        if let Some(coin) = coin {
            self.pending.push(Deferred::Reveal { coin, at });
        }
    }

    pub fn remove(&mut self, id: EnemyId) {
        self.pending.push(Deferred::Remove(id));
    }

    /// The player's parry box caught an enemy blade.
    pub fn parry_succeeded(&mut self) {
        self.feedback.report(Lesson::Parry);
        self.feedback.cue(AudioCue::Parry);
        self.guy.parry_time = self.clock;
        self.guy.dx = -self.guy.facing * self.tuning.guy.parry_recoil;
    }
}

/// The running level.
#[derive(Resource)]
pub struct Stage {
    pub enemies: Enemies,
    pub arena: Arena,
}

impl Stage {
    pub fn new(tuning: CombatTuning, seed: u64) -> Self {
        Self {
            enemies: Enemies::default(),
            arena: Arena::new(tuning, seed),
        }
    }

    pub fn spawn_coin(&mut self, x: f32, y: f32) -> EnemyId {
        self.enemies.spawn_coin(&mut self.arena, Vec2::new(x, y))
    }

    pub fn spawn_dummy(&mut self, x: f32, y: f32) -> EnemyId {
        self.enemies.spawn_dummy(&mut self.arena, Vec2::new(x, y))
    }

    pub fn spawn_gate(&mut self, x: f32, y: f32) -> EnemyId {
        self.enemies.spawn_gate(&mut self.arena, Vec2::new(x, y))
    }

    pub fn spawn_merry(&mut self, x: f32, y: f32) -> EnemyId {
        self.enemies.spawn_merry(&mut self.arena, Vec2::new(x, y))
    }

    /// Place the player at (`x`, `y`) on the next step.
    pub fn spawn_guy(&mut self, x: f32, y: f32) {
        self.arena.guy.spawn_at(Vec2::new(x, y));
    }

    /// Populate an empty stage from a layout.
    pub fn spawn_layout(&mut self, layout: &LevelLayout) {
        for spawn in &layout.enemies {
            self.enemies
                .spawn(&mut self.arena, spawn.kind, Vec2::new(spawn.x, spawn.y));
        }
        let (x, y) = layout.spawn;
        self.spawn_guy(x, y);
        info!(
            "Stage '{}' ready: {} enemies, {} coins",
            layout.name,
            self.enemies.len(),
            self.arena.score.total
        );
    }

    /// Advance the whole stage by `dt`: enemies first, then the player.
    pub fn step(&mut self, dt: f32, input: &InputState, terrain: &dyn Terrain) {
        self.arena.dt = dt;
        self.arena.clock += dt;
        self.enemies.tick_all(&mut self.arena);
        player::tick(&mut self.arena, &self.enemies, input, terrain);
    }

    pub fn draw(&self, sink: &mut dyn SpriteSink) {
        self.enemies.draw_all(sink);
        player::draw(&self.arena.guy, sink);
    }

    /// Empty the registry and the score. The player and lesson history stay.
    pub fn clear(&mut self) {
        self.enemies.clear(&mut self.arena.score);
        self.arena.pending.clear();
    }

    /// Run only the enemy pass.
    #[cfg(test)]
    pub fn tick_enemies(&mut self, dt: f32) {
        self.arena.dt = dt;
        self.arena.clock += dt;
        self.enemies.tick_all(&mut self.arena);
    }
}
