//! Visual configuration loaded from an external RON file.
//!
//! Placeholder colours, debug overlays and camera feel can be tweaked
//! without recompiling.

use bevy::prelude::*;
use serde::Deserialize;
use std::fs;

use super::draw::{SpriteKind, Tint};

pub const VISUAL_CONFIG_PATH: &str = "assets/data/rendering/visual_config.ron";

/// Visual configuration loaded from assets/data/rendering/visual_config.ron.
#[derive(Resource, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct VisualConfig {
    pub clear_color: (f32, f32, f32),
    pub floor_color: (f32, f32, f32),
    pub guy_color: (f32, f32, f32),
    pub hurt_color: (f32, f32, f32),
    pub coin_color: (f32, f32, f32),
    pub dummy_color: (f32, f32, f32),
    pub gate_color: (f32, f32, f32),
    pub merry_color: (f32, f32, f32),
    /// Outline attack, parry and detection boxes.
    pub show_hitboxes: bool,
    /// Fraction of the distance to its target the camera closes per second.
    pub camera_follow: f32,
    /// World units per screen pixel.
    pub camera_scale: f32,
}

impl Default for VisualConfig {
    fn default() -> Self {
        Self {
            clear_color: (0.08, 0.07, 0.06),
            floor_color: (0.35, 0.32, 0.28),
            guy_color: (0.85, 0.82, 0.75),
            hurt_color: (0.9, 0.2, 0.2),
            coin_color: (0.95, 0.8, 0.2),
            dummy_color: (0.6, 0.45, 0.3),
            gate_color: (0.45, 0.45, 0.5),
            merry_color: (0.55, 0.7, 0.9),
            show_hitboxes: false,
            camera_follow: 0.99,
            camera_scale: 0.25,
        }
    }
}

fn srgb((r, g, b): (f32, f32, f32)) -> Color {
    Color::srgb(r, g, b)
}

impl VisualConfig {
    /// Load visual config from RON file.
    pub fn load() -> Self {
        match fs::read_to_string(VISUAL_CONFIG_PATH) {
            Ok(contents) => match ron::from_str(&contents) {
                Ok(config) => {
                    info!("Loaded visual config from {}", VISUAL_CONFIG_PATH);
                    config
                }
                Err(e) => {
                    error!("Failed to parse {}: {}. Using defaults.", VISUAL_CONFIG_PATH, e);
                    Self::default()
                }
            },
            Err(e) => {
                warn!("Could not read {}: {}. Using defaults.", VISUAL_CONFIG_PATH, e);
                Self::default()
            }
        }
    }

    /// Placeholder colour for a sprite.
    pub fn color(&self, sprite: SpriteKind, tint: Tint) -> Color {
        if tint == Tint::Hurt {
            return srgb(self.hurt_color);
        }
        srgb(match sprite {
            SpriteKind::Guy => self.guy_color,
            SpriteKind::Coin => self.coin_color,
            SpriteKind::Dummy => self.dummy_color,
            SpriteKind::Gate => self.gate_color,
            SpriteKind::Merry => self.merry_color,
        })
    }

    pub fn clear(&self) -> Color {
        srgb(self.clear_color)
    }

    pub fn floor(&self) -> Color {
        srgb(self.floor_color)
    }
}

/// System to load visual config at startup.
pub fn load_visual_config(mut commands: Commands) {
    let config = VisualConfig::load();
    commands.insert_resource(ClearColor(config.clear()));
    commands.insert_resource(config);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shipped_config_parses() {
        let text = include_str!("../../assets/data/rendering/visual_config.ron");
        let config: VisualConfig = ron::from_str(text).unwrap();
        assert!(config.camera_follow > 0.0 && config.camera_follow < 1.0);
    }

    #[test]
    fn hurt_tint_overrides_sprite_colour() {
        let config = VisualConfig::default();
        assert_eq!(config.color(SpriteKind::Guy, Tint::Hurt), srgb(config.hurt_color));
        assert_ne!(
            config.color(SpriteKind::Guy, Tint::Normal),
            config.color(SpriteKind::Merry, Tint::Normal)
        );
    }
}
