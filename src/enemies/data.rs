//! Sprite-sheet frame ranges and body sizes for each archetype.

use bevy::math::Vec2;

use crate::core::FrameRange;

pub mod coin {
    use super::*;

    pub const HALF: Vec2 = Vec2::new(3.0, 8.0);
    pub const SPIN: FrameRange = FrameRange::new(0, 9);
}

pub mod dummy {
    use super::*;

    pub const HALF: Vec2 = Vec2::new(4.0, 16.0);
    pub const IDLE: FrameRange = FrameRange::new(0, 1);
    pub const HIT: FrameRange = FrameRange::new(2, 4);
    pub const DEATH: FrameRange = FrameRange::new(5, 8);
}

pub mod gate {
    use super::*;

    pub const HALF: Vec2 = Vec2::new(12.0, 64.0);
    pub const STILL: FrameRange = FrameRange::single(0);
}

pub mod merry {
    use super::*;

    pub const HALF: Vec2 = Vec2::new(6.0, 10.0);
    pub const IDLE: FrameRange = FrameRange::new(0, 1);
    pub const GARDE: FrameRange = FrameRange::new(2, 3);
    pub const ADVANCE: FrameRange = FrameRange::new(4, 7);
    pub const HIT: FrameRange = FrameRange::new(8, 10);
    pub const WINDUP: FrameRange = FrameRange::new(11, 13);
    pub const LUNGE: FrameRange = FrameRange::new(14, 17);
    pub const FLINCH: FrameRange = FrameRange::new(18, 20);
    pub const PARRY: FrameRange = FrameRange::new(21, 23);
    pub const DEATH: FrameRange = FrameRange::new(24, 27);
}
