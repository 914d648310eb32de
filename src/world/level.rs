//! Level layouts and RON loading.

use bevy::prelude::*;
use serde::Deserialize;
use std::fs;

use super::error::DataLoadError;
use crate::enemies::Archetype;

/// Where the level the game starts with lives.
pub const LEVEL_PATH: &str = "assets/data/levels/training.ron";

/// One enemy placement.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct EnemySpawn {
    pub kind: Archetype,
    pub x: f32,
    pub y: f32,
}

/// A level: a flat floor, a player start and the enemies on it.
#[derive(Resource, Debug, Clone, Deserialize)]
pub struct LevelLayout {
    pub name: String,
    #[serde(default)]
    pub floor: f32,
    pub spawn: (f32, f32),
    #[serde(default)]
    pub enemies: Vec<EnemySpawn>,
}

impl Default for LevelLayout {
    /// A bare practice floor with a single dummy.
    fn default() -> Self {
        Self {
            name: "Fallback".to_string(),
            floor: 0.0,
            spawn: (0.0, 0.0),
            enemies: vec![EnemySpawn {
                kind: Archetype::Dummy,
                x: 60.0,
                y: 0.0,
            }],
        }
    }
}

impl LevelLayout {
    pub fn from_ron(text: &str, origin: &str) -> Result<Self, DataLoadError> {
        let layout: Self = ron::from_str(text).map_err(|e| DataLoadError::ParseError {
            path: origin.to_string(),
            details: e.to_string(),
        })?;
        if layout.spawn.1 < layout.floor {
            return Err(DataLoadError::Invalid {
                field: "spawn",
                reason: format!("player starts below the floor at {}", layout.floor),
            });
        }
        Ok(layout)
    }

    pub fn from_file(path: &str) -> Result<Self, DataLoadError> {
        let text = fs::read_to_string(path).map_err(|e| DataLoadError::from_io(path, e))?;
        Self::from_ron(&text, path)
    }

    /// Load the starting level, falling back to a practice floor.
    pub fn load() -> Self {
        match Self::from_file(LEVEL_PATH) {
            Ok(layout) => {
                info!("Loaded level '{}' from {}", layout.name, LEVEL_PATH);
                layout
            }
            Err(e) => {
                error!("{}. Using fallback level.", e);
                Self::default()
            }
        }
    }
}
