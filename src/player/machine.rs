//! The player state machine.
//!
//! Unlike enemies the player is written out by hand, because its transitions
//! depend on gravity and floor contact as much as on input. It keeps the same
//! discipline as the reaction tables: entering a state resets the timer and
//! re-entering the current state does nothing.

use bevy::log::{debug, info};
use bevy::math::Vec2;

use super::components::{frames, Guy, GuyState};
use super::input::{InputState, Key};
use crate::combat::{Capsule, CombatTuning};
use crate::core::{AudioCue, Chord, Feedback, Lesson, PlayMode, SceneEvent};
use crate::enemies::{EnemyId, Enemies};
use crate::rendering::{DrawCommand, SpriteKind, SpriteSink, Tint};
use crate::world::{Arena, Terrain};

/// Advance the player by `arena.dt`. Runs after the enemy pass.
pub fn tick(arena: &mut Arena, enemies: &Enemies, input: &InputState, terrain: &dyn Terrain) {
    let Arena {
        guy,
        feedback,
        tuning,
        clock,
        dt,
        ..
    } = arena;
    let mut step = GuyStep {
        guy,
        feedback,
        tuning,
        enemies,
        input,
        terrain,
        clock: *clock,
        dt: *dt,
        floor: 0.0,
        absx: 0.0,
    };
    step.run();
}

/// Report the player sprite to the renderer.
pub fn draw(guy: &Guy, sink: &mut dyn SpriteSink) {
    if guy.stat == GuyState::Limbo {
        return;
    }
    sink.draw_sprite(DrawCommand::new(
        SpriteKind::Guy,
        guy.anim.frame,
        guy.pos,
        guy.facing < 0.0,
        guy.tint,
    ));
}

/// Everything one player tick reads and writes.
struct GuyStep<'a> {
    guy: &'a mut Guy,
    feedback: &'a mut Feedback,
    tuning: &'a CombatTuning,
    enemies: &'a Enemies,
    input: &'a InputState,
    terrain: &'a dyn Terrain,
    clock: f32,
    dt: f32,
    /// Floor under the player at the start of the tick.
    floor: f32,
    /// Horizontal distance covered last tick at the current speed.
    absx: f32,
}

impl GuyStep<'_> {
    fn run(&mut self) {
        let tuning = self.tuning;
        let dt = self.dt;

        if let Some(at) = self.guy.pending_spawn.take() {
            self.place(at);
        }

        let (x, y, hw) = (self.guy.pos.x, self.guy.pos.y, self.guy.half.x);
        self.floor = self
            .terrain
            .find_floor(Vec2::new(x - hw, y))
            .max(self.terrain.find_floor(Vec2::new(x + hw, y)));
        self.absx = (self.guy.dx * dt).abs();

        self.guy.focus = self.nearest_danger();
        self.guy.timer += dt;

        if let Some(next) = self.guy.requested.take() {
            self.to_state(next);
        }

        if self.guy.stat == GuyState::Limbo {
            return;
        }

        let mut can_face = true;
        let mut walk_ping = false;
        self.guy.attack_box = None;
        self.guy.parry_box = None;
        self.guy.tint = Tint::Normal;

        match self.guy.stat {
            GuyState::Limbo => {}
            GuyState::Idle => {
                if self.horizontal(1.0) {
                    self.to_state(GuyState::Walk);
                }
                if self.jump() {
                    self.to_state(GuyState::Jump);
                }
                self.check_enter_garde();
                self.fall();
            }
            GuyState::Walk => {
                walk_ping = true;
                if self.guy.timer > tuning.guy.move_lesson_after {
                    self.feedback.report(Lesson::Move);
                }
                self.horizontal(1.0);
                if self.absx < 0.1 {
                    self.to_state(GuyState::Idle);
                }
                if self.jump() {
                    self.to_state(GuyState::Jump);
                }
                self.check_enter_garde();
                self.fall();
            }
            GuyState::Jump => {
                self.horizontal(0.75);
                self.fall();
                self.jump();
            }
            GuyState::Fall => {
                self.fall();
                if self.land() {
                    self.to_state(GuyState::Idle);
                } else if self.jump() {
                    self.to_state(GuyState::Jump);
                }
            }
            GuyState::Garde => {
                self.feedback.report(Lesson::Garde);
                can_face = false;
                self.face_focus();
                if self.horizontal(0.5) {
                    self.to_state(GuyState::Advance);
                }
                self.check_rps();
                self.check_exit_garde();
                self.resolve_damage();
                self.fall();
            }
            GuyState::Advance => {
                walk_ping = true;
                can_face = false;
                self.face_focus();
                self.horizontal(0.5);
                if self.absx < 0.1 {
                    self.to_state(GuyState::Garde);
                }
                self.check_rps();
                self.check_exit_garde();
                self.resolve_damage();
                self.fall();
            }
            GuyState::Lunge => {
                can_face = false;
                self.resolve_damage();
                if self.guy.anim.is_relative_frame(0) {
                    let g = &self.guy;
                    self.guy.attack_box = Some(Capsule::new(g.pos.x + g.facing * 8.0, g.pos.y, 9.0, 12.0));
                }
                if self.guy.anim.is_finished() {
                    self.to_state(GuyState::Garde);
                }
                if self.guy.was_parried {
                    // Thrown back the way the lunge came from.
                    self.to_state(GuyState::Knockback);
                    let speed = tuning.guy.parried_knockback;
                    self.guy.dx = -self.guy.facing * speed;
                    self.guy.dy = speed;
                }
            }
            GuyState::Fake => {
                can_face = false;
                self.resolve_damage();
                if self.guy.anim.is_finished() {
                    self.to_state(GuyState::Garde);
                }
            }
            GuyState::Parry => {
                can_face = false;
                if self.guy.anim.is_relative_frame(0) {
                    let g = &self.guy;
                    self.guy.parry_box = Some(Capsule::new(g.pos.x + g.facing * 5.0, g.pos.y, 6.0, 12.0));
                }
                if self.guy.anim.is_finished() {
                    self.to_state(GuyState::Garde);
                }
                self.check_rps();
            }
            GuyState::DrawGarde => {
                can_face = false;
                if self.guy.anim.is_finished() {
                    self.to_state(GuyState::Garde);
                }
            }
            GuyState::DrawIdle => {
                can_face = false;
                if self.guy.anim.is_finished() {
                    self.to_state(GuyState::Idle);
                }
            }
            GuyState::Knockback => {
                if (self.guy.timer * 70.0).sin() > 0.0 {
                    self.guy.tint = Tint::Hurt;
                }
                can_face = false;
                self.fall();
                if self.land() {
                    self.to_state(GuyState::Idle);
                }
            }
            GuyState::Celebrate => {
                can_face = false;
                self.guy.dx = 0.0;
                self.guy.dy = 0.0;
                let t = 1.0 - tuning.damping.powf(dt);
                let target = self.guy.celebrate_at;
                self.guy.pos += (target - self.guy.pos) * t;
            }
        }

        self.guy.damage.clear();
        self.guy.was_parried = false;

        self.guy.dx *= tuning.damping.powf(dt);
        let g = &self.guy;
        self.guy.pos.x = self.terrain.move_horizontal(g.pos.x, g.pos.y, g.half.x, g.dx * dt);

        if can_face {
            self.guy.facing = if self.guy.dx >= 0.0 { 1.0 } else { -1.0 };
        }

        if self.guy.pos.y <= tuning.death_floor + 1.0 {
            self.die();
        }

        self.body_contacts();

        self.guy.garde_check.center = self.guy.pos;

        if self.guy.anim.tick(dt) && walk_ping {
            self.feedback.cue(AudioCue::WalkStep);
        }

        let g = &self.guy;
        self.guy.camera_target = Vec2::new(
            g.pos.x + g.dx / 4.0,
            g.last_floor + (g.pos.y - g.last_floor) / 4.0 + 10.0,
        );
    }

    /// Enter `next`, running its entry effects. Returns whether anything
    /// changed.
    fn to_state(&mut self, next: GuyState) -> bool {
        if self.guy.stat == next {
            return false;
        }
        debug!("guy {:?} -> {:?}", self.guy.stat, next);
        self.guy.stat = next;
        self.guy.timer = 0.0;

        let tuning = self.tuning;
        let g = &tuning.guy;
        match next {
            GuyState::Limbo => {}
            GuyState::Idle => {
                self.guy.anim.set_range(frames::IDLE, PlayMode::Loop);
                if self.absx > 0.2 {
                    self.to_state(GuyState::Walk);
                }
                self.check_enter_garde();
            }
            GuyState::Walk => self.guy.anim.set_range(frames::RUN, PlayMode::Loop),
            GuyState::Jump => {
                self.feedback.cue(AudioCue::Jump);
                self.guy.anim.reset_range(frames::JUMP, PlayMode::Loop);
            }
            GuyState::Fall => self.guy.anim.set_range(frames::FALL, PlayMode::Loop),
            GuyState::Garde => self.guy.anim.set_range(frames::GARDE, PlayMode::Loop),
            GuyState::Advance => self.guy.anim.set_range(frames::ADVANCE, PlayMode::Loop),
            GuyState::Lunge => {
                let fresh_parry = self.clock - self.guy.parry_time < g.parry_window;
                let speed = if fresh_parry { g.lunge_bonus_speed } else { g.lunge_speed };
                self.guy.dx = self.guy.facing * speed;
                self.guy.anim.reset_range(frames::LUNGE, PlayMode::NoLoop);
            }
            GuyState::Fake => {
                self.guy.dx = self.guy.facing * g.fake_speed;
                self.guy.anim.reset_range(frames::FAKE, PlayMode::NoLoop);
            }
            GuyState::Parry => {
                self.guy.dx = -self.guy.facing * g.parry_step;
                self.guy.anim.reset_range(frames::PARRY, PlayMode::NoLoop);
            }
            GuyState::DrawGarde | GuyState::DrawIdle => {
                self.guy.anim.reset_range(frames::DRAW, PlayMode::NoLoop);
            }
            GuyState::Knockback => {
                self.guy.before_jump = GuyState::Knockback;
                self.guy.fall_transition = GuyState::Knockback;
                self.feedback.chord(Chord::Gm);
                self.feedback.cue(AudioCue::Pluck);
                self.guy.tint = Tint::Hurt;
                self.guy.anim.set_range(frames::FALL, PlayMode::Loop);
            }
            GuyState::Celebrate => self.guy.anim.set_range(frames::VICTORY, PlayMode::Loop),
        }
        true
    }

    /// Put the player into the level at `at`, fresh.
    fn place(&mut self, at: Vec2) {
        let guy = &mut *self.guy;
        guy.pos = at;
        guy.dx = 0.0;
        guy.dy = 0.0;
        guy.jump_count = 0;
        let floor = self.terrain.find_floor(at);
        guy.last_floor = if floor.is_finite() { floor } else { at.y };
        guy.health = self.tuning.guy.health;
        guy.damage.clear();
        guy.was_parried = false;
        guy.fall_transition = GuyState::Fall;
        guy.before_jump = GuyState::Idle;
        guy.garde_check.center = at;
        guy.garde_check.half.x = self.tuning.guy.garde_small;
        guy.in_garde = false;
        guy.dead = false;
        guy.camera_target = at;
        guy.camera_cut = true;
        info!("Player placed at ({}, {})", at.x, at.y);
        self.absx = 0.0;
        self.to_state(GuyState::Idle);
    }

    fn horizontal(&mut self, mult: f32) -> bool {
        let speed = self.tuning.guy.acceleration * self.dt * mult;
        if self.input.pressed(Key::Left) {
            self.guy.dx -= speed;
            return true;
        }
        if self.input.pressed(Key::Right) {
            self.guy.dx += speed;
            return true;
        }
        false
    }

    fn jump(&mut self) -> bool {
        let tuning = self.tuning;
        let g = &tuning.guy;
        if self.input.just_pressed(Key::Up) && self.guy.jump_count < g.max_jumps {
            if self.guy.jump_count == 0 {
                self.guy.before_jump = self.guy.stat;
            }
            self.guy.pos.y += 0.1;
            self.guy.dy = g.jump_speed;
            self.guy.jump_count += 1;
            self.guy.fall_transition = GuyState::Fall;
            return true;
        }
        false
    }

    /// Apply gravity while airborne.
    fn fall(&mut self) -> bool {
        if self.guy.pos.y > self.floor || self.guy.dy != 0.0 {
            self.guy.dy -= self.dt * self.tuning.guy.gravity;
            self.guy.pos.y += self.guy.dy * self.dt;
            if self.guy.dy < 0.0 {
                let next = self.guy.fall_transition;
                self.to_state(next);
            }
            return true;
        }
        false
    }

    fn land(&mut self) -> bool {
        if self.guy.pos.y <= self.floor && self.guy.dy <= 0.0 {
            self.guy.pos.y = self.floor;
            self.guy.dy = 0.0;
            self.guy.last_floor = self.floor;
            self.guy.jump_count = 0;
            if self.guy.before_jump != GuyState::Knockback {
                self.feedback.cue(AudioCue::Footstep);
            }
            self.guy.before_jump = GuyState::Idle;
            self.guy.fall_transition = GuyState::Fall;
            return true;
        }
        false
    }

    fn garde_box_hit(&self) -> bool {
        let sensor = self.guy.garde_check;
        self.enemies
            .active()
            .any(|e| e.fighter && e.body().overlaps(&sensor))
    }

    fn check_enter_garde(&mut self) {
        if self.garde_box_hit() {
            if !self.guy.in_garde {
                self.feedback.chord(Chord::Em7);
            }
            self.guy.in_garde = true;
            self.to_state(GuyState::DrawGarde);
            self.guy.garde_check.half.x = self.tuning.guy.garde_large;
        }
    }

    fn check_exit_garde(&mut self) {
        if !self.garde_box_hit() {
            if self.guy.in_garde {
                self.feedback.chord(Chord::G);
            }
            self.guy.in_garde = false;
            self.to_state(GuyState::DrawIdle);
            self.guy.garde_check.half.x = self.tuning.guy.garde_small;
        }
    }

    /// One press picks one of attack, fake or parry.
    fn check_rps(&mut self) -> bool {
        (self.input.just_pressed(Key::Attack) && self.to_state(GuyState::Lunge))
            || (self.input.just_pressed(Key::Down) && self.to_state(GuyState::Fake))
            || (self.input.just_pressed(Key::Up) && self.to_state(GuyState::Parry))
    }

    /// Settle the hits queued since the last resolution.
    fn resolve_damage(&mut self) {
        if self.guy.damage.is_empty() {
            return;
        }
        let sources = std::mem::take(&mut self.guy.damage);
        self.guy.health = (self.guy.health - sources.len() as i32).max(0);
        debug!("guy took {} hit(s), health {}", sources.len(), self.guy.health);
        if self.guy.health == 0 {
            self.die();
        }
        let tuning = self.tuning;
        let g = &tuning.guy;
        for source in &sources {
            self.to_state(GuyState::Knockback);
            self.guy.dx = if self.guy.pos.x < source.x {
                -g.knockback_speed
            } else {
                g.knockback_speed
            };
            self.guy.dy = g.knockback_lift;
        }
    }

    fn die(&mut self) {
        if !self.guy.dead {
            self.guy.dead = true;
            info!("Player died at ({}, {})", self.guy.pos.x, self.guy.pos.y);
            self.feedback.scene(SceneEvent::Death);
        }
    }

    fn nearest_danger(&self) -> Option<EnemyId> {
        let (x, y) = (self.guy.pos.x, self.guy.pos.y);
        let band = self.tuning.guy.focus_band;
        self.enemies
            .active()
            .filter(|e| e.danger && (e.pos.y - y).abs() < band)
            .min_by(|a, b| (a.pos.x - x).abs().total_cmp(&(b.pos.x - x).abs()))
            .map(|e| e.id)
    }

    fn face_focus(&mut self) {
        let focus = self.guy.focus.and_then(|id| self.enemies.get(id));
        if let Some(e) = focus {
            self.guy.facing = if self.guy.pos.x < e.pos.x { 1.0 } else { -1.0 };
        }
    }

    /// Dangerous enemies hurt on touch; blockers push the player out.
    fn body_contacts(&mut self) {
        let enemies = self.enemies;
        for e in enemies.active() {
            if !self.guy.body().overlaps(&e.body()) {
                continue;
            }
            if e.danger {
                self.guy.take_damage(e.id, e.pos.x);
            } else if e.blocker {
                self.guy.pos.x = e.pos.x - (self.guy.half.x + e.half.x) * self.guy.facing;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use bevy::math::Vec2;

    use super::super::components::{frames, GuyState};
    use super::super::input::{InputState, Key};
    use crate::combat::CombatTuning;
    use crate::core::{AudioCue, Chord, Lesson, PlayMode, SceneEvent};
    use crate::enemies::EnemyId;
    use crate::world::{FlatGround, Stage};

    const DT: f32 = 1.0 / 60.0;

    fn placed(at: Vec2) -> (Stage, FlatGround) {
        let mut stage = Stage::new(CombatTuning::default(), 9);
        let ground = FlatGround::new(0.0);
        stage.spawn_guy(at.x, at.y);
        stage.step(DT, &InputState::default(), &ground);
        (stage, ground)
    }

    fn count_cue(stage: &Stage, cue: AudioCue) -> usize {
        stage.arena.feedback.cues().iter().filter(|c| **c == cue).count()
    }

    fn deaths(stage: &Stage) -> usize {
        stage
            .arena
            .feedback
            .scene_events()
            .iter()
            .filter(|e| **e == SceneEvent::Death)
            .count()
    }

    #[test]
    fn spawn_is_deferred_to_the_next_tick() {
        let mut stage = Stage::new(CombatTuning::default(), 9);
        let ground = FlatGround::new(0.0);
        stage.arena.guy.health = 1;

        stage.spawn_guy(30.0, 0.0);
        assert_eq!(stage.arena.guy.stat, GuyState::Limbo);
        assert_eq!(stage.arena.guy.pos, Vec2::ZERO);

        stage.step(DT, &InputState::default(), &ground);
        let guy = &stage.arena.guy;
        assert_eq!(guy.stat, GuyState::Idle);
        assert_eq!(guy.pos, Vec2::new(30.0, 0.0));
        assert_eq!(guy.health, 3);
        assert!(guy.camera_cut);
    }

    #[test]
    fn three_hits_kill_exactly_once() {
        let (mut stage, ground) = placed(Vec2::ZERO);
        let input = InputState::default();

        for n in 0..4 {
            stage.arena.guy.stat = GuyState::Garde;
            stage.arena.guy.take_damage(EnemyId(100 + n), 50.0);
            stage.step(DT, &input, &ground);
            assert_eq!(stage.arena.guy.stat, GuyState::Knockback);
        }

        assert_eq!(stage.arena.guy.health, 0);
        assert_eq!(deaths(&stage), 1);
    }

    #[test]
    fn simultaneous_hits_each_count() {
        let (mut stage, ground) = placed(Vec2::ZERO);
        stage.arena.guy.stat = GuyState::Garde;
        stage.arena.guy.take_damage(EnemyId(1), 10.0);
        stage.arena.guy.take_damage(EnemyId(1), 10.0);
        stage.arena.guy.take_damage(EnemyId(2), -10.0);

        stage.step(DT, &InputState::default(), &ground);

        assert_eq!(stage.arena.guy.health, 1);
        assert!(stage.arena.guy.damage.is_empty());
    }

    #[test]
    fn damage_outside_garde_is_discarded() {
        let (mut stage, ground) = placed(Vec2::ZERO);
        stage.arena.guy.take_damage(EnemyId(1), 10.0);

        stage.step(DT, &InputState::default(), &ground);

        assert_eq!(stage.arena.guy.health, 3);
        assert_eq!(stage.arena.guy.stat, GuyState::Idle);
    }

    #[test]
    fn knockback_points_away_from_the_source() {
        let (mut stage, ground) = placed(Vec2::ZERO);
        stage.arena.guy.stat = GuyState::Garde;
        stage.arena.guy.take_damage(EnemyId(1), 10.0);

        stage.step(DT, &InputState::default(), &ground);

        assert!(stage.arena.guy.dx < 0.0);
        assert!(stage.arena.guy.pos.y > 0.0);
    }

    #[test]
    fn a_nearby_fighter_draws_the_sword() {
        let (mut stage, ground) = placed(Vec2::ZERO);
        stage.spawn_dummy(20.0, 0.0);
        let input = InputState::default();

        stage.step(DT, &input, &ground);
        assert_eq!(stage.arena.guy.stat, GuyState::DrawGarde);
        assert!(stage.arena.guy.in_garde);
        assert_eq!(stage.arena.guy.garde_check.half.x, 52.0);
        assert_eq!(count_cue(&stage, AudioCue::Chord(Chord::Em7)), 1);

        for _ in 0..30 {
            stage.step(DT, &input, &ground);
        }
        assert_eq!(stage.arena.guy.stat, GuyState::Garde);
        assert_eq!(stage.arena.guy.facing, 1.0);
    }

    #[test]
    fn garde_holds_until_the_fighter_leaves_the_wide_sensor() {
        let (mut stage, ground) = placed(Vec2::ZERO);
        let dummy = stage.spawn_dummy(20.0, 0.0);
        let input = InputState::default();
        for _ in 0..31 {
            stage.step(DT, &input, &ground);
        }
        assert_eq!(stage.arena.guy.stat, GuyState::Garde);

        // Too far to draw the sword, close enough to keep it drawn.
        stage.enemies.get_mut(dummy).unwrap().pos.x = 40.0;
        for _ in 0..10 {
            stage.step(DT, &input, &ground);
        }
        assert_eq!(stage.arena.guy.stat, GuyState::Garde);
        assert!(stage.arena.guy.in_garde);
        assert_eq!(count_cue(&stage, AudioCue::Chord(Chord::G)), 0);

        stage.enemies.get_mut(dummy).unwrap().pos.x = 80.0;
        stage.step(DT, &input, &ground);

        let guy = &stage.arena.guy;
        assert_eq!(guy.stat, GuyState::DrawIdle);
        assert!(!guy.in_garde);
        assert_eq!(guy.garde_check.half.x, 26.0);
        assert_eq!(count_cue(&stage, AudioCue::Chord(Chord::G)), 1);
    }

    /// A player standing in garde with a dummy at `dummy_x`.
    fn in_garde(dummy_x: f32) -> (Stage, FlatGround) {
        let (mut stage, ground) = placed(Vec2::ZERO);
        stage.spawn_dummy(dummy_x, 0.0);
        let guy = &mut stage.arena.guy;
        guy.stat = GuyState::Garde;
        guy.in_garde = true;
        guy.garde_check.half.x = 52.0;
        guy.facing = 1.0;
        (stage, ground)
    }

    #[test]
    fn down_in_garde_feints() {
        let (mut stage, ground) = in_garde(30.0);
        let mut input = InputState::default();
        input.tap(Key::Down);

        stage.step(DT, &input, &ground);

        assert_eq!(stage.arena.guy.stat, GuyState::Fake);
        assert!(stage.arena.guy.dx > 0.0);
        assert!(stage.arena.guy.attack_box.is_none());
    }

    #[test]
    fn up_in_garde_parries_instead_of_jumping() {
        let (mut stage, ground) = in_garde(30.0);
        let mut input = InputState::default();
        input.tap(Key::Up);

        stage.step(DT, &input, &ground);

        let guy = &stage.arena.guy;
        assert_eq!(guy.stat, GuyState::Parry);
        assert_eq!(guy.jump_count, 0);
        assert_eq!(guy.dy, 0.0);
        assert_eq!(guy.pos.y, 0.0);
        assert!(guy.dx < 0.0);
        assert_eq!(count_cue(&stage, AudioCue::Jump), 0);
    }

    #[test]
    fn parry_opens_the_parry_box_on_its_first_frame() {
        let (mut stage, ground) = in_garde(30.0);
        let mut input = InputState::default();
        input.tap(Key::Up);
        stage.step(DT, &input, &ground);
        assert!(stage.arena.guy.parry_box.is_none());

        stage.step(DT, &InputState::default(), &ground);

        let guy = &stage.arena.guy;
        assert_eq!(guy.stat, GuyState::Parry);
        let parry = guy.parry_box.unwrap();
        assert!(parry.center.x > guy.pos.x);
        assert_eq!(parry.half, Vec2::new(6.0, 12.0));
        assert!(guy.attack_box.is_none());
    }

    #[test]
    fn garde_turns_to_face_a_danger_behind() {
        let (mut stage, ground) = in_garde(-20.0);

        stage.step(DT, &InputState::default(), &ground);

        let guy = &stage.arena.guy;
        assert_eq!(guy.stat, GuyState::Garde);
        assert!(guy.focus.is_some());
        assert_eq!(guy.facing, -1.0);
    }

    #[test]
    fn respawn_forgets_the_wide_garde_sensor() {
        let (mut stage, ground) = placed(Vec2::ZERO);
        stage.arena.guy.in_garde = true;
        stage.arena.guy.garde_check.half.x = 52.0;
        stage.spawn_dummy(40.0, 0.0);

        stage.spawn_guy(0.0, 0.0);
        stage.step(DT, &InputState::default(), &ground);

        let guy = &stage.arena.guy;
        assert_eq!(guy.stat, GuyState::Idle);
        assert!(!guy.in_garde);
        assert_eq!(guy.garde_check.half.x, 26.0);
    }

    fn lunge_speed_after(parry_age: f32) -> f32 {
        let (mut stage, ground) = placed(Vec2::ZERO);
        stage.spawn_dummy(30.0, 0.0);
        stage.arena.guy.stat = GuyState::Garde;
        stage.arena.guy.in_garde = true;
        stage.arena.guy.garde_check.half.x = 52.0;
        stage.arena.guy.parry_time = stage.arena.clock - parry_age;

        let mut input = InputState::default();
        input.tap(Key::Attack);
        stage.step(DT, &input, &ground);
        assert_eq!(stage.arena.guy.stat, GuyState::Lunge);
        stage.arena.guy.dx
    }

    #[test]
    fn lunge_is_faster_right_after_a_parry() {
        let damping = 0.01f32.powf(DT);
        assert_relative_eq!(lunge_speed_after(1.0), 250.0 * damping, epsilon = 1e-3);
        assert_relative_eq!(lunge_speed_after(5.0), 175.0 * damping, epsilon = 1e-3);
    }

    #[test]
    fn lunge_opens_the_attack_box_on_its_first_frame() {
        let (mut stage, ground) = placed(Vec2::ZERO);
        stage.arena.guy.stat = GuyState::Lunge;
        stage.arena.guy.anim.reset_range(frames::LUNGE, PlayMode::NoLoop);

        stage.step(DT, &InputState::default(), &ground);

        let attack = stage.arena.guy.attack_box.unwrap();
        assert!(attack.center.x > stage.arena.guy.pos.x - 1.0);
        assert_eq!(attack.half, Vec2::new(9.0, 12.0));
    }

    #[test]
    fn parried_lunge_throws_the_player_back() {
        let (mut stage, ground) = placed(Vec2::ZERO);
        stage.arena.guy.stat = GuyState::Lunge;
        stage.arena.guy.facing = 1.0;
        stage.arena.guy.anim.reset_range(frames::LUNGE, PlayMode::NoLoop);
        stage.arena.guy.hit_parried();

        stage.step(DT, &InputState::default(), &ground);

        let guy = &stage.arena.guy;
        assert_eq!(guy.stat, GuyState::Knockback);
        assert!(guy.dx < 0.0);
        assert_eq!(guy.dy, 50.0);
        assert!(!guy.was_parried);
    }

    #[test]
    fn landing_plays_a_footstep_unless_knocked_back() {
        let (mut stage, ground) = placed(Vec2::new(0.0, 20.0));
        let input = InputState::default();
        for _ in 0..60 {
            stage.step(DT, &input, &ground);
        }
        assert_eq!(stage.arena.guy.stat, GuyState::Idle);
        assert_eq!(stage.arena.guy.pos.y, 0.0);
        assert_eq!(count_cue(&stage, AudioCue::Footstep), 1);

        stage.arena.guy.stat = GuyState::Garde;
        stage.arena.guy.take_damage(EnemyId(7), 30.0);
        for _ in 0..120 {
            stage.step(DT, &input, &ground);
        }
        assert_eq!(stage.arena.guy.stat, GuyState::Idle);
        assert_eq!(count_cue(&stage, AudioCue::Footstep), 1);
    }

    #[test]
    fn double_jump_then_no_more() {
        let (mut stage, ground) = placed(Vec2::ZERO);
        let mut jump = InputState::default();
        jump.tap(Key::Up);
        let idle = InputState::default();

        stage.step(DT, &jump, &ground);
        assert_eq!(stage.arena.guy.stat, GuyState::Jump);
        stage.step(DT, &idle, &ground);
        stage.step(DT, &jump, &ground);
        assert_eq!(stage.arena.guy.jump_count, 2);
        let dy = stage.arena.guy.dy;
        stage.step(DT, &jump, &ground);
        assert_eq!(stage.arena.guy.jump_count, 2);
        assert!(stage.arena.guy.dy < dy);
    }

    #[test]
    fn falling_into_a_pit_requests_death_once() {
        let mut stage = Stage::new(CombatTuning::default(), 9);
        let ground = FlatGround::new(0.0).with_pit(-10.0, 10.0);
        stage.spawn_guy(0.0, 0.0);
        let input = InputState::default();
        for _ in 0..600 {
            stage.step(DT, &input, &ground);
        }
        assert!(stage.arena.guy.is_dead());
        assert_eq!(deaths(&stage), 1);
    }

    #[test]
    fn celebration_pulls_the_player_to_the_gate() {
        let (mut stage, ground) = placed(Vec2::ZERO);
        stage.arena.guy.request_celebrate(Vec2::new(40.0, 0.0));
        let input = InputState::default();

        stage.step(DT, &input, &ground);
        assert_eq!(stage.arena.guy.stat, GuyState::Celebrate);
        for _ in 0..180 {
            stage.step(DT, &input, &ground);
        }
        assert_relative_eq!(stage.arena.guy.pos.x, 40.0, epsilon = 0.1);
    }

    #[test]
    fn walking_reports_the_move_lesson() {
        let (mut stage, ground) = placed(Vec2::ZERO);
        let mut input = InputState::default();
        input.set(Key::Right, true, false);

        for _ in 0..30 {
            stage.step(DT, &input, &ground);
        }
        assert_eq!(stage.arena.guy.stat, GuyState::Walk);
        assert!(stage.arena.guy.pos.x > 0.0);
        assert!(stage.arena.feedback.lessons_seen(Lesson::Move) > 0);
    }
}
