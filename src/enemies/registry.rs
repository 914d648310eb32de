//! The enemy registry: creation, the per-frame pass and removal.

use bevy::log::{debug, info};
use bevy::math::Vec2;

use super::components::{Archetype, Enemy, EnemyId};
use super::{coin, dummy, gate, merry};
use crate::combat::{intersect, Contact};
use crate::core::dispatch;
use crate::core::{AudioCue, FrameRange, Lesson};
use crate::rendering::{DrawCommand, SpriteSink, Tint};
use crate::world::{Arena, Deferred, Score};

/// All enemies of the current level, in spawn order.
#[derive(Debug, Default)]
pub struct Enemies {
    list: Vec<Enemy>,
    next_id: u32,
}

impl Enemies {
    /// Build an enemy, run its initial state entry, then let `hook` override
    /// archetype-specific fields before it joins the registry.
    pub(super) fn spawn_with(
        &mut self,
        arena: &mut Arena,
        archetype: Archetype,
        at: Vec2,
        half: Vec2,
        range: FrameRange,
        hook: impl FnOnce(&mut Enemy),
    ) -> EnemyId {
        let id = EnemyId(self.next_id);
        self.next_id += 1;

        let mut enemy = Enemy::new(id, archetype, at, half, range, arena.tuning.frame_time);
        dispatch::start(&mut enemy, arena, archetype.initial());
        hook(&mut enemy);

        debug!("Spawned {:?} {:?} at ({}, {})", archetype, id, at.x, at.y);
        self.list.push(enemy);
        id
    }

    pub fn spawn_coin(&mut self, arena: &mut Arena, at: Vec2) -> EnemyId {
        coin::spawn(self, arena, at, true)
    }

    /// Spawn a dummy together with the hidden coin it drops.
    pub fn spawn_dummy(&mut self, arena: &mut Arena, at: Vec2) -> EnemyId {
        dummy::spawn(self, arena, at)
    }

    pub fn spawn_gate(&mut self, arena: &mut Arena, at: Vec2) -> EnemyId {
        gate::spawn(self, arena, at)
    }

    /// Spawn Merry together with the hidden coin she drops.
    pub fn spawn_merry(&mut self, arena: &mut Arena, at: Vec2) -> EnemyId {
        merry::spawn(self, arena, at)
    }

    pub fn spawn(&mut self, arena: &mut Arena, archetype: Archetype, at: Vec2) -> EnemyId {
        match archetype {
            Archetype::Coin => self.spawn_coin(arena, at),
            Archetype::Dummy => self.spawn_dummy(arena, at),
            Archetype::Gate => self.spawn_gate(arena, at),
            Archetype::Merry => self.spawn_merry(arena, at),
        }
    }

    /// Advance every active enemy by `arena.dt`.
    ///
    /// Each enemy ticks, then every overlap with the player is classified and
    /// dispatched on its own. Reveals and removals requested along the way
    /// are applied once the pass is over.
    pub fn tick_all(&mut self, arena: &mut Arena) {
        let mut hit_landed = false;

        for e in self.list.iter_mut().filter(|e| e.actv) {
            e.detect = None;
            e.attack = None;

            e.timer += arena.dt;
            e.action_timer += arena.dt;
            dispatch::tick(e, arena);

            if intersect(arena.guy.attack_box, Some(e.body())) {
                dispatch::intersect(e, arena, Contact::PlayerAttack);
                hit_landed = true;
            }

            if arena.guy.body().overlaps(&e.body()) {
                dispatch::intersect(e, arena, Contact::PlayerTouch);
            }

            if intersect(e.detect, Some(arena.guy.body())) {
                dispatch::intersect(e, arena, Contact::PlayerDetected);
            }

            if intersect(e.attack, Some(arena.guy.body())) {
                dispatch::intersect(e, arena, Contact::EnemyAttack);
                arena.guy.take_damage(e.id, e.pos.x);
            }

            if intersect(e.attack, arena.guy.parry_box) {
                dispatch::intersect(e, arena, Contact::PlayerParried);
                arena.parry_succeeded();
            }

            e.anim.tick(arena.dt);
        }

        self.apply_pending(arena);

        if hit_landed {
            arena.feedback.cue(AudioCue::HitLanded);
            arena.feedback.report(Lesson::Lunge);
            arena.guy.hit_landed();
        }
    }

    fn apply_pending(&mut self, arena: &mut Arena) {
        for op in std::mem::take(&mut arena.pending) {
            match op {
                Deferred::Reveal { coin, at } => {
                    match self.list.iter_mut().find(|e| e.id == coin) {
                        Some(e) => coin::appear(e, arena, at),
                        None => debug!("Reveal of removed coin {:?} ignored", coin),
                    }
                }
                Deferred::Remove(id) => self.list.retain(|e| e.id != id),
            }
        }
    }

    /// Report every active enemy to the renderer.
    pub fn draw_all(&self, sink: &mut dyn SpriteSink) {
        for e in self.list.iter().filter(|e| e.actv) {
            sink.draw_sprite(DrawCommand::new(
                e.archetype.sprite(),
                e.anim.frame,
                e.pos,
                e.facing < 0.0,
                Tint::Normal,
            ));
        }
    }

    /// Drop every enemy and reset the coin score.
    pub fn clear(&mut self, score: &mut Score) {
        if !self.list.is_empty() {
            info!("Clearing {} enemies", self.list.len());
        }
        self.list.clear();
        *score = Score::default();
    }

    pub fn get(&self, id: EnemyId) -> Option<&Enemy> {
        self.list.iter().find(|e| e.id == id)
    }

    pub fn get_mut(&mut self, id: EnemyId) -> Option<&mut Enemy> {
        self.list.iter_mut().find(|e| e.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Enemy> {
        self.list.iter()
    }

    /// Active enemies only.
    pub fn active(&self) -> impl Iterator<Item = &Enemy> {
        self.list.iter().filter(|e| e.actv)
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use bevy::math::Vec2;

    use crate::combat::{Capsule, CombatTuning};
    use crate::core::{AudioCue, Lesson};
    use crate::rendering::DrawList;
    use crate::world::Stage;

    #[test]
    fn clear_empties_the_registry_and_resets_the_score() {
        let mut stage = Stage::new(CombatTuning::default(), 2);
        stage.spawn_coin(0.0, 0.0);
        stage.spawn_merry(50.0, 0.0);
        stage.arena.score.collected = 1;

        stage.clear();

        assert!(stage.enemies.is_empty());
        assert_eq!(stage.arena.score.total, 0);
        assert_eq!(stage.arena.score.collected, 0);
    }

    #[test]
    fn hit_landed_is_reported_once_per_pass() {
        let mut stage = Stage::new(CombatTuning::default(), 2);
        stage.arena.guy.pos = Vec2::new(-100.0, 0.0);
        stage.spawn_dummy(10.0, 0.0);
        stage.spawn_dummy(14.0, 0.0);
        stage.arena.guy.attack_box = Some(Capsule::new(12.0, 0.0, 9.0, 12.0));

        stage.tick_enemies(0.016);

        let hits = stage
            .arena
            .feedback
            .cues()
            .iter()
            .filter(|c| **c == AudioCue::HitLanded)
            .count();
        assert_eq!(hits, 1);
        assert_eq!(stage.arena.feedback.lessons_seen(Lesson::Lunge), 1);
    }

    #[test]
    fn hidden_enemies_are_not_drawn() {
        let mut stage = Stage::new(CombatTuning::default(), 2);
        stage.spawn_dummy(10.0, 0.0);
        let mut list = DrawList::default();

        stage.enemies.draw_all(&mut list);

        assert_eq!(stage.enemies.len(), 2);
        assert_eq!(list.commands.len(), 1);
    }

    #[test]
    fn ids_are_not_reused_after_removal() {
        let mut stage = Stage::new(CombatTuning::default(), 2);
        let first = stage.spawn_coin(0.0, 0.0);
        stage.clear();
        let second = stage.spawn_coin(0.0, 0.0);
        assert_ne!(first, second);
        assert!(stage.enemies.get(first).is_none());
    }
}
