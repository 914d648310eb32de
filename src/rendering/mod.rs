//! Rendering module - draw commands, placeholder visuals and the camera.

mod draw;
mod plugin;
pub mod visual_config;

pub use draw::{DrawCommand, DrawList, SpriteKind, SpriteSink, Tint, SPRITE_OFFSET};
pub use plugin::{RenderingPlugin, StageCamera};
pub use visual_config::VisualConfig;
