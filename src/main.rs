//! Swordplay - Entry Point
//!
//! Controls:
//! - Left/Right: Walk, or advance while in garde
//! - Up: Jump, or parry while in garde
//! - Down: Feint while in garde
//! - X: Lunge while in garde
//! - F1: Toggle hitboxes

use bevy::prelude::*;

fn main() {
    App::new()
        // Bevy default plugins
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "Swordplay".to_string(),
                        resolution: (1280.0, 720.0).into(),
                        ..default()
                    }),
                    ..default()
                })
                .set(ImagePlugin::default_nearest()),
        )

        // Our game plugin
        .add_plugins(swordplay::SwordplayPlugin)

        .run();
}
