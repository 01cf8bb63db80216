//! Scene camera driven by the core camera animator.

use aeroscope_scene::CameraState;
use bevy::prelude::*;
use bevy_egui::input::egui_wants_any_keyboard_input;

use crate::state::{Composer, ViewerSettings};

pub struct SceneCameraPlugin;

impl Plugin for SceneCameraPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_camera).add_systems(
            Update,
            (
                animate_camera,
                keyboard_navigation.run_if(not(egui_wants_any_keyboard_input)),
            ),
        );
    }
}

/// Marker for the camera the composer drives.
#[derive(Component)]
pub struct SceneCamera;

fn spawn_camera(mut commands: Commands, composer: Res<Composer>, settings: Res<ViewerSettings>) {
    commands.spawn((
        SceneCamera,
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            fov: settings.fov_degrees.to_radians(),
            near: 0.1,
            far: 1_000.0,
            ..default()
        }),
        camera_transform(composer.camera().state()),
    ));
}

/// Advance the animator once per frame and apply the pose.
fn animate_camera(
    time: Res<Time>,
    mut composer: ResMut<Composer>,
    mut camera: Query<&mut Transform, With<SceneCamera>>,
) {
    let Ok(mut transform) = camera.single_mut() else {
        return;
    };
    // Bypass change detection so styling only reruns on real state changes.
    let state = composer.bypass_change_detection().frame(time.elapsed_secs());
    *transform = camera_transform(state);
}

fn camera_transform(state: CameraState) -> Transform {
    Transform::from_translation(state.position).with_rotation(state.rotation())
}

/// Arrow keys step through view modes; C toggles cinema motion.
fn keyboard_navigation(keys: Res<ButtonInput<KeyCode>>, mut composer: ResMut<Composer>) {
    if keys.just_pressed(KeyCode::ArrowRight) {
        composer.next_mode();
    }
    if keys.just_pressed(KeyCode::ArrowLeft) {
        composer.previous_mode();
    }
    if keys.just_pressed(KeyCode::KeyC) {
        let cinema = !composer.cinema();
        composer.set_cinema(cinema);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camera_transform_looks_at_target() {
        let state = CameraState {
            position: Vec3::new(0.0, 0.0, 10.0),
            look_at: Vec3::ZERO,
        };
        let transform = camera_transform(state);
        assert!(transform.forward().as_vec3().distance(Vec3::NEG_Z) < 1e-5);
        assert_eq!(transform.translation, state.position);
    }
}
