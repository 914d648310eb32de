//! World module - the stage, level layouts and terrain.

mod error;
mod level;
mod plugin;
mod stage;
mod terrain;

pub use error::DataLoadError;
pub use level::{EnemySpawn, LevelLayout, LEVEL_PATH};
pub use plugin::WorldPlugin;
pub use stage::{Arena, Deferred, Score, Stage};
pub use terrain::{ActiveTerrain, FlatGround, Terrain};
