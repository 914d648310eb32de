//! Enemy data: identity, per-archetype states and the shared entity record.

use bevy::math::Vec2;
use serde::Deserialize;

use super::{coin, dummy, gate, merry};
use crate::combat::{Capsule, Contact};
use crate::core::{AnimInstance, FrameRange, Machine, PlayMode, Reactions, StateKey};
use crate::rendering::SpriteKind;
use crate::world::Arena;

/// Stable handle to an enemy in the registry.
///
/// Handles are never reused, so a handle to a removed enemy simply stops
/// resolving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EnemyId(pub u32);

/// Enemy kinds. Also used by level files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum Archetype {
    Coin,
    Dummy,
    Gate,
    Merry,
}

impl Archetype {
    /// State every enemy of this kind is created in.
    pub fn initial(self) -> EnemyState {
        match self {
            Archetype::Coin => CoinState::Idle.into(),
            Archetype::Dummy => DummyState::Idle.into(),
            Archetype::Gate => GateState::Closed.into(),
            Archetype::Merry => MerryState::Idle.into(),
        }
    }

    pub fn sprite(self) -> SpriteKind {
        match self {
            Archetype::Coin => SpriteKind::Coin,
            Archetype::Dummy => SpriteKind::Dummy,
            Archetype::Gate => SpriteKind::Gate,
            Archetype::Merry => SpriteKind::Merry,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoinState {
    Idle,
    Appear,
    PickedUp,
    Leaving,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DummyState {
    Idle,
    Hit,
    Dead,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    Closed,
    Shudder,
    Opening,
    Open,
    Celebrating,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MerryState {
    Idle,
    Garde,
    Advance,
    Flinch,
    Hit,
    Windup,
    Lunge,
    Parry,
    Dead,
}

/// Current state of an enemy, tagged by archetype.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyState {
    Coin(CoinState),
    Dummy(DummyState),
    Gate(GateState),
    Merry(MerryState),
}

impl StateKey for EnemyState {
    fn slot(self) -> usize {
        // Each archetype has its own table, so slots only need to be dense
        // within one archetype.
        match self {
            EnemyState::Coin(s) => s as usize,
            EnemyState::Dummy(s) => s as usize,
            EnemyState::Gate(s) => s as usize,
            EnemyState::Merry(s) => s as usize,
        }
    }
}

impl From<CoinState> for EnemyState {
    fn from(s: CoinState) -> Self {
        EnemyState::Coin(s)
    }
}

impl From<DummyState> for EnemyState {
    fn from(s: DummyState) -> Self {
        EnemyState::Dummy(s)
    }
}

impl From<GateState> for EnemyState {
    fn from(s: GateState) -> Self {
        EnemyState::Gate(s)
    }
}

impl From<MerryState> for EnemyState {
    fn from(s: MerryState) -> Self {
        EnemyState::Merry(s)
    }
}

/// One enemy. Which fields matter depends on the archetype.
#[derive(Debug, Clone)]
pub struct Enemy {
    pub id: EnemyId,
    pub archetype: Archetype,
    pub pos: Vec2,
    /// Half-extents of the body.
    pub half: Vec2,
    /// Where the enemy was placed; bobbing and sliding are relative to it.
    pub home: Vec2,
    pub facing: f32,
    pub dx: f32,
    pub stat: EnemyState,
    /// Seconds since the last transition.
    pub timer: f32,
    /// Free-running timer for periodic actions. Survives transitions.
    pub action_timer: f32,
    pub health: i32,
    /// Touching it hurts the player.
    pub danger: bool,
    /// Touching it pushes the player back.
    pub blocker: bool,
    /// Simulated and drawn at all.
    pub actv: bool,
    /// Draws the player into garde.
    pub fighter: bool,
    /// Merry has engaged the player at least once since going idle.
    pub engaged: bool,
    /// The gate has already asked for the scene to complete.
    pub completed: bool,
    /// A player strike can land or be parried.
    pub vulnerable: bool,
    /// Bob offset in seconds, picked once per coin.
    pub phase: f32,
    /// Coin revealed when this enemy dies.
    pub link: Option<EnemyId>,
    pub detect: Option<Capsule>,
    pub attack: Option<Capsule>,
    pub anim: AnimInstance,
}

impl Enemy {
    pub fn new(
        id: EnemyId,
        archetype: Archetype,
        pos: Vec2,
        half: Vec2,
        range: FrameRange,
        frame_time: f32,
    ) -> Self {
        Self {
            id,
            archetype,
            pos,
            half,
            home: pos,
            facing: 1.0,
            dx: 0.0,
            stat: archetype.initial(),
            timer: 0.0,
            action_timer: 0.0,
            health: 2,
            danger: true,
            blocker: true,
            actv: true,
            fighter: false,
            engaged: false,
            completed: false,
            vulnerable: false,
            phase: 0.0,
            link: None,
            detect: None,
            attack: None,
            anim: AnimInstance::new(range, PlayMode::Loop, frame_time),
        }
    }

    pub fn body(&self) -> Capsule {
        Capsule::at(self.pos, self.half)
    }

    pub fn is(&self, state: impl Into<EnemyState>) -> bool {
        self.stat == state.into()
    }
}

impl Machine for Enemy {
    type State = EnemyState;
    type Ctx = Arena;
    type Contact = Contact;

    fn reactions(&self) -> &'static Reactions<Self> {
        match self.archetype {
            Archetype::Coin => coin::reactions(),
            Archetype::Dummy => dummy::reactions(),
            Archetype::Gate => gate::reactions(),
            Archetype::Merry => merry::reactions(),
        }
    }

    fn state(&self) -> EnemyState {
        self.stat
    }

    fn enter(&mut self, next: EnemyState) {
        self.stat = next;
        self.timer = 0.0;
    }
}
