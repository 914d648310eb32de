//! Draw commands the simulation emits and the sinks that collect them.
//!
//! The stage never touches Bevy rendering types. It reports sprite frames
//! at positions and lets a [`SpriteSink`] decide what to do with them.

use bevy::prelude::*;

/// Offset from an entity's position to its sprite's top-left corner.
pub const SPRITE_OFFSET: Vec2 = Vec2::new(-16.0, -24.0);

/// Which sprite sheet a command draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpriteKind {
    Guy,
    Coin,
    Dummy,
    Gate,
    Merry,
}

/// Colour treatment of a sprite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tint {
    #[default]
    Normal,
    /// Flashing while knocked back.
    Hurt,
}

/// One sprite frame to draw this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCommand {
    pub sprite: SpriteKind,
    pub frame: u16,
    pub position: Vec2,
    pub offset: Vec2,
    /// Mirror horizontally.
    pub flip: bool,
    pub tint: Tint,
}

impl DrawCommand {
    pub fn new(sprite: SpriteKind, frame: u16, position: Vec2, flip: bool, tint: Tint) -> Self {
        Self {
            sprite,
            frame,
            position,
            offset: SPRITE_OFFSET,
            flip,
            tint,
        }
    }

    /// Top-left corner of the sprite.
    pub fn corner(&self) -> Vec2 {
        self.position + self.offset
    }
}

/// Anything that accepts draw commands.
pub trait SpriteSink {
    fn draw_sprite(&mut self, cmd: DrawCommand);
}

/// Draw commands collected for the current frame.
#[derive(Resource, Debug, Default)]
pub struct DrawList {
    pub commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn clear(&mut self) {
        self.commands.clear();
    }
}

impl SpriteSink for DrawList {
    fn draw_sprite(&mut self, cmd: DrawCommand) {
        self.commands.push(cmd);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commands_carry_the_standard_offset() {
        let cmd = DrawCommand::new(SpriteKind::Merry, 4, Vec2::new(100.0, 50.0), true, Tint::Normal);
        assert_eq!(cmd.offset, SPRITE_OFFSET);
        assert_eq!(cmd.corner(), Vec2::new(84.0, 26.0));
    }

    #[test]
    fn draw_list_keeps_submission_order() {
        let mut list = DrawList::default();
        list.draw_sprite(DrawCommand::new(SpriteKind::Gate, 0, Vec2::ZERO, false, Tint::Normal));
        list.draw_sprite(DrawCommand::new(SpriteKind::Guy, 2, Vec2::ONE, false, Tint::Hurt));

        let kinds: Vec<_> = list.commands.iter().map(|c| c.sprite).collect();
        assert_eq!(kinds, vec![SpriteKind::Gate, SpriteKind::Guy]);

        list.clear();
        assert!(list.commands.is_empty());
    }
}
