//! Terrain queries the player machine relies on.

use bevy::prelude::*;

/// Floor and wall queries against the level geometry.
pub trait Terrain: Send + Sync {
    /// Height of the highest floor at or below `pos`.
    fn find_floor(&self, pos: Vec2) -> f32;

    /// Move a body of half-width `half_w` at (`x`, `y`) horizontally by `dx`,
    /// stopping at walls. Returns the new `x`.
    fn move_horizontal(&self, x: f32, y: f32, half_w: f32, dx: f32) -> f32;
}

/// A single flat floor, optionally fenced by walls and broken by pits.
#[derive(Debug, Clone, Default)]
pub struct FlatGround {
    pub floor: f32,
    /// Left and right walls.
    pub walls: Option<(f32, f32)>,
    /// Spans with no floor at all.
    pub pits: Vec<(f32, f32)>,
}

impl FlatGround {
    pub fn new(floor: f32) -> Self {
        Self {
            floor,
            ..default()
        }
    }

    pub fn with_walls(mut self, left: f32, right: f32) -> Self {
        self.walls = Some((left, right));
        self
    }

    pub fn with_pit(mut self, from: f32, to: f32) -> Self {
        self.pits.push((from, to));
        self
    }
}

impl Terrain for FlatGround {
    fn find_floor(&self, pos: Vec2) -> f32 {
        if self.pits.iter().any(|&(a, b)| pos.x > a && pos.x < b) {
            f32::NEG_INFINITY
        } else {
            self.floor
        }
    }

    fn move_horizontal(&self, x: f32, _y: f32, half_w: f32, dx: f32) -> f32 {
        let next = x + dx;
        match self.walls {
            Some((left, right)) => next.clamp(left + half_w, (right - half_w).max(left + half_w)),
            None => next,
        }
    }
}

/// The terrain the stage is simulated against.
#[derive(Resource)]
pub struct ActiveTerrain(pub Box<dyn Terrain>);

impl Default for ActiveTerrain {
    fn default() -> Self {
        Self(Box::new(FlatGround::new(0.0)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn walls_stop_horizontal_motion() {
        let ground = FlatGround::new(0.0).with_walls(-50.0, 50.0);
        assert_eq!(ground.move_horizontal(45.0, 0.0, 2.0, 10.0), 48.0);
        assert_eq!(ground.move_horizontal(-45.0, 0.0, 2.0, -10.0), -48.0);
        assert_eq!(ground.move_horizontal(0.0, 0.0, 2.0, 5.0), 5.0);
    }

    #[test]
    fn pits_have_no_floor() {
        let ground = FlatGround::new(4.0).with_pit(10.0, 20.0);
        assert_eq!(ground.find_floor(Vec2::new(5.0, 30.0)), 4.0);
        assert_eq!(ground.find_floor(Vec2::new(15.0, 30.0)), f32::NEG_INFINITY);
    }
}
