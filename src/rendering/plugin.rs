//! Rendering plugin - placeholder sprites, debug overlays and the camera.
//!
//! Sprites are drawn as gizmo outlines in their palette colour. The frame
//! index travels through the draw list untouched, ready for a real atlas.

use bevy::prelude::*;

use super::draw::DrawList;
use super::visual_config::{load_visual_config, VisualConfig};
use crate::combat::Capsule;
use crate::core::StageSet;
use crate::world::{LevelLayout, Stage};

/// Size of one sprite frame.
const SPRITE_SIZE: Vec2 = Vec2::splat(32.0);

/// Rendering plugin - turns the stage into something on screen.
pub struct RenderingPlugin;

impl Plugin for RenderingPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DrawList>()
            .add_systems(Startup, (load_visual_config, spawn_camera).chain())
            .add_systems(Update, toggle_hitboxes)
            .add_systems(
                Update,
                (
                    collect_draw_list,
                    (draw_floor, draw_sprites, draw_hitboxes),
                    follow_camera,
                )
                    .chain()
                    .in_set(StageSet::Present)
                    .run_if(resource_exists::<Stage>),
            );
    }
}

/// Marker for the camera that follows the player.
#[derive(Component)]
pub struct StageCamera;

fn spawn_camera(mut commands: Commands, config: Res<VisualConfig>) {
    commands.spawn((
        Camera2d,
        OrthographicProjection {
            scale: config.camera_scale,
            ..OrthographicProjection::default_2d()
        },
        StageCamera,
    ));
}

/// Ask the stage what to draw this frame.
fn collect_draw_list(stage: Res<Stage>, mut list: ResMut<DrawList>) {
    list.clear();
    stage.draw(&mut *list);
}

fn draw_sprites(mut gizmos: Gizmos, list: Res<DrawList>, config: Res<VisualConfig>) {
    for cmd in &list.commands {
        let color = config.color(cmd.sprite, cmd.tint);
        let center = cmd.corner() + SPRITE_SIZE / 2.0;
        gizmos.rect_2d(Isometry2d::from_translation(center), SPRITE_SIZE, color);

        let facing = if cmd.flip { -1.0 } else { 1.0 };
        gizmos.line_2d(cmd.position, cmd.position + Vec2::new(6.0 * facing, 0.0), color);
    }
}

fn draw_floor(
    mut gizmos: Gizmos,
    layout: Option<Res<LevelLayout>>,
    stage: Res<Stage>,
    config: Res<VisualConfig>,
) {
    let Some(layout) = layout else {
        return;
    };
    let x = stage.arena.guy.camera_target.x;
    gizmos.line_2d(
        Vec2::new(x - 1000.0, layout.floor),
        Vec2::new(x + 1000.0, layout.floor),
        config.floor(),
    );
}

fn outline(gizmos: &mut Gizmos, capsule: Option<Capsule>, color: Color) {
    if let Some(c) = capsule {
        gizmos.rect_2d(Isometry2d::from_translation(c.center), c.half * 2.0, color);
    }
}

fn draw_hitboxes(mut gizmos: Gizmos, stage: Res<Stage>, config: Res<VisualConfig>) {
    if !config.show_hitboxes {
        return;
    }
    let body = Color::srgb(0.2, 0.8, 0.2);
    let attack = Color::srgb(0.9, 0.1, 0.1);
    let sensor = Color::srgb(0.2, 0.5, 0.9);

    for e in stage.enemies.active() {
        outline(&mut gizmos, Some(e.body()), body);
        outline(&mut gizmos, e.detect, sensor);
        outline(&mut gizmos, e.attack, attack);
    }

    let guy = &stage.arena.guy;
    outline(&mut gizmos, Some(guy.body()), body);
    outline(&mut gizmos, Some(guy.garde_check), sensor);
    outline(&mut gizmos, guy.attack_box, attack);
    outline(&mut gizmos, guy.parry_box, Color::srgb(0.9, 0.9, 0.2));
}

fn toggle_hitboxes(keyboard: Res<ButtonInput<KeyCode>>, config: Option<ResMut<VisualConfig>>) {
    if let Some(mut config) = config {
        if keyboard.just_pressed(KeyCode::F1) {
            config.show_hitboxes = !config.show_hitboxes;
            info!("Hitboxes {}", if config.show_hitboxes { "on" } else { "off" });
        }
    }
}

/// Ease the camera towards the player's target, or snap after a spawn.
fn follow_camera(
    time: Res<Time>,
    config: Res<VisualConfig>,
    mut stage: ResMut<Stage>,
    mut camera: Query<&mut Transform, With<StageCamera>>,
) {
    let Ok(mut transform) = camera.get_single_mut() else {
        return;
    };
    let guy = &mut stage.arena.guy;
    let target = guy.camera_target;
    let current = transform.translation.truncate();

    let next = if guy.camera_cut {
        guy.camera_cut = false;
        target
    } else {
        let t = 1.0 - (1.0 - config.camera_follow).powf(time.delta_secs());
        current.lerp(target, t)
    };
    transform.translation = next.extend(transform.translation.z);
}
