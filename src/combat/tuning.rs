//! Combat tuning loaded from an external RON file.
//!
//! Every number the combat protocol and the archetypes depend on lives here,
//! so fights can be retuned without recompiling.

use std::fs;

use bevy::prelude::*;
use serde::Deserialize;

use crate::world::DataLoadError;

/// Default location of the tuning file.
pub const TUNING_PATH: &str = "assets/data/combat/tuning.ron";

/// Tuning shared by the whole stage.
#[derive(Resource, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CombatTuning {
    /// Seconds each sprite frame is shown.
    pub frame_time: f32,
    /// Fraction of an impulse left after one second.
    pub damping: f32,
    /// Roll an enemy has to beat to parry a strike.
    pub parry_threshold: f32,
    /// Parry lessons the player needs before enemies stop parrying every
    /// strike.
    pub parry_lessons: u32,
    /// Falling below this height kills the player.
    pub death_floor: f32,
    pub guy: GuyTuning,
    pub merry: MerryTuning,
    pub dummy: DummyTuning,
    pub coin: CoinTuning,
    pub gate: GateTuning,
}

impl Default for CombatTuning {
    fn default() -> Self {
        Self {
            frame_time: 0.1,
            damping: 0.01,
            parry_threshold: 0.5,
            parry_lessons: 1,
            death_floor: -100.0,
            guy: GuyTuning::default(),
            merry: MerryTuning::default(),
            dummy: DummyTuning::default(),
            coin: CoinTuning::default(),
            gate: GateTuning::default(),
        }
    }
}

/// Player movement and combat numbers.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GuyTuning {
    pub health: i32,
    pub half_width: f32,
    pub half_height: f32,
    pub acceleration: f32,
    pub gravity: f32,
    pub jump_speed: f32,
    pub max_jumps: u32,
    /// Half-width of the garde sensor before and after entering garde.
    pub garde_small: f32,
    pub garde_large: f32,
    pub lunge_speed: f32,
    /// Lunge speed within `parry_window` seconds of a successful parry.
    pub lunge_bonus_speed: f32,
    pub parry_window: f32,
    pub fake_speed: f32,
    pub parry_step: f32,
    pub knockback_speed: f32,
    pub knockback_lift: f32,
    /// Backwards and upwards speed when a lunge gets parried.
    pub parried_knockback: f32,
    pub parry_recoil: f32,
    /// Vertical distance within which an enemy can hold the player's focus.
    pub focus_band: f32,
    pub move_lesson_after: f32,
}

impl Default for GuyTuning {
    fn default() -> Self {
        Self {
            health: 3,
            half_width: 2.0,
            half_height: 12.0,
            acceleration: 500.0,
            gravity: 500.0,
            jump_speed: 150.0,
            max_jumps: 2,
            garde_small: 26.0,
            garde_large: 52.0,
            lunge_speed: 175.0,
            lunge_bonus_speed: 250.0,
            parry_window: 2.0,
            fake_speed: 75.0,
            parry_step: 10.0,
            knockback_speed: 150.0,
            knockback_lift: 100.0,
            parried_knockback: 50.0,
            parry_recoil: 60.0,
            focus_band: 16.0,
            move_lesson_after: 0.25,
        }
    }
}

/// Sword-fighter numbers.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MerryTuning {
    pub health: i32,
    /// Garde is held while the player stays inside `hold_near..=hold_far`.
    pub hold_near: f32,
    pub hold_far: f32,
    /// Advance stops once the player is inside `adjust_near..=adjust_far`.
    pub adjust_near: f32,
    pub adjust_far: f32,
    pub advance_speed: f32,
    pub lunge_speed: f32,
    pub knockback_speed: f32,
    /// Seconds between forced attacks.
    pub action_interval: f32,
    /// Action timer value on first engaging, so the first attack comes sooner.
    pub engage_head_start: f32,
    pub detect_range: f32,
    pub reach: f32,
    /// Frame of the lunge animation on which the blade is live.
    pub lunge_active_frame: u16,
}

impl Default for MerryTuning {
    fn default() -> Self {
        Self {
            health: 5,
            hold_near: 20.0,
            hold_far: 30.0,
            adjust_near: 21.0,
            adjust_far: 29.0,
            advance_speed: 20.0,
            lunge_speed: 50.0,
            knockback_speed: 50.0,
            action_interval: 3.0,
            engage_head_start: 2.0,
            detect_range: 40.0,
            reach: 12.0,
            lunge_active_frame: 1,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DummyTuning {
    pub health: i32,
}

impl Default for DummyTuning {
    fn default() -> Self {
        Self { health: 2 }
    }
}

/// Coin motion.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CoinTuning {
    pub bob_height: f32,
    /// Bob half-cycles per second.
    pub bob_rate: f32,
    /// Bob phase is drawn from `0..phase_spread` seconds.
    pub phase_spread: f32,
    pub arc_height: f32,
    /// Arc height lost per second.
    pub arc_decay: f32,
    pub arc_duration: f32,
    pub drift_speed: f32,
    pub leave_rise: f32,
    pub leave_duration: f32,
}

impl Default for CoinTuning {
    fn default() -> Self {
        Self {
            bob_height: 3.0,
            bob_rate: 3.0,
            phase_spread: 5.0,
            arc_height: 20.0,
            arc_decay: 17.0,
            arc_duration: 1.0,
            drift_speed: 30.0,
            leave_rise: 35.0,
            leave_duration: 0.5,
        }
    }
}

/// Exit gate timings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GateTuning {
    pub open_duration: f32,
    pub travel: f32,
    pub shudder_duration: f32,
    pub jitter_duration: f32,
    pub celebrate_delay: f32,
}

impl Default for GateTuning {
    fn default() -> Self {
        Self {
            open_duration: 1.2,
            travel: 28.0,
            shudder_duration: 2.0,
            jitter_duration: 0.5,
            celebrate_delay: 1.0,
        }
    }
}

impl CombatTuning {
    /// Parse tuning from RON text. `origin` names the source in errors.
    pub fn from_ron(text: &str, origin: &str) -> Result<Self, DataLoadError> {
        let tuning: Self = ron::from_str(text).map_err(|e| DataLoadError::ParseError {
            path: origin.to_string(),
            details: e.to_string(),
        })?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn from_file(path: &str) -> Result<Self, DataLoadError> {
        let text = fs::read_to_string(path).map_err(|e| DataLoadError::from_io(path, e))?;
        Self::from_ron(&text, path)
    }

    /// Load tuning from [`TUNING_PATH`], falling back to defaults.
    pub fn load() -> Self {
        match Self::from_file(TUNING_PATH) {
            Ok(tuning) => {
                info!("Loaded combat tuning from {}", TUNING_PATH);
                tuning
            }
            Err(e @ DataLoadError::FileNotFound(_)) => {
                warn!("{}. Using default tuning.", e);
                Self::default()
            }
            Err(e) => {
                error!("{}. Using default tuning.", e);
                Self::default()
            }
        }
    }

    /// Reject values the simulation cannot run with.
    pub fn validate(&self) -> Result<(), DataLoadError> {
        fn invalid(field: &'static str, reason: impl Into<String>) -> DataLoadError {
            DataLoadError::Invalid {
                field,
                reason: reason.into(),
            }
        }

        if self.frame_time <= 0.0 {
            return Err(invalid("frame_time", "must be positive"));
        }
        if !(self.damping > 0.0 && self.damping <= 1.0) {
            return Err(invalid("damping", "must be in (0, 1]"));
        }
        if !(0.0..=1.0).contains(&self.parry_threshold) {
            return Err(invalid("parry_threshold", "must be in [0, 1]"));
        }
        if self.merry.hold_near >= self.merry.hold_far {
            return Err(invalid("merry.hold_near", "must be below merry.hold_far"));
        }
        if self.merry.adjust_near >= self.merry.adjust_far {
            return Err(invalid("merry.adjust_near", "must be below merry.adjust_far"));
        }
        for (field, health) in [
            ("guy.health", self.guy.health),
            ("merry.health", self.merry.health),
            ("dummy.health", self.dummy.health),
        ] {
            if health <= 0 {
                return Err(invalid(field, format!("must be positive, got {health}")));
            }
        }
        if self.guy.garde_small > self.guy.garde_large {
            return Err(invalid("guy.garde_small", "must not exceed guy.garde_large"));
        }
        Ok(())
    }
}
