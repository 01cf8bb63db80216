//! Pointer picking: cursor ray to hover and click on scene hotspots.

use aeroscope_scene::{ClickOutcome, HotspotTarget, Ray};
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use bevy_egui::EguiContexts;

use crate::camera::SceneCamera;
use crate::schematic::SchematicRequests;
use crate::state::Composer;

pub struct PickingPlugin;

impl Plugin for PickingPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, pointer_input);
    }
}

/// World-space ray under the cursor, if the cursor is in the window.
fn cursor_ray(window: &Window, camera: &Camera, transform: &GlobalTransform) -> Option<Ray> {
    let cursor = window.cursor_position()?;
    let ray = camera.viewport_to_world(transform, cursor).ok()?;
    Some(Ray::new(ray.origin, *ray.direction))
}

fn pointer_input(
    mut contexts: EguiContexts,
    mouse: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    cameras: Query<(&Camera, &GlobalTransform), With<SceneCamera>>,
    mut composer: ResMut<Composer>,
    mut requests: SchematicRequests,
) {
    let over_ui = contexts
        .ctx_mut()
        .ok()
        .is_some_and(|ctx| ctx.is_pointer_over_area());

    let target: Option<HotspotTarget> = if over_ui {
        None
    } else {
        let (Ok(window), Ok((camera, transform))) = (windows.single(), cameras.single()) else {
            return;
        };
        cursor_ray(window, camera, transform)
            .and_then(|ray| composer.pick(ray))
            .map(|hit| hit.target)
    };

    // Only flag the composer as changed when the hover actually moves.
    if composer.bypass_change_detection().hover(target.clone()) {
        composer.set_changed();
    }

    if !mouse.just_pressed(MouseButton::Left) {
        return;
    }
    let Some(target) = target else {
        return;
    };

    match composer.click(&target) {
        ClickOutcome::Navigated(change) => {
            tracing::info!(from = ?change.from, to = ?change.to, "navigated from scene");
        }
        ClickOutcome::Inspect(request) => {
            tracing::info!(part = %request.part, ticket = %request.ticket, "inspect requested");
            requests.start(&request);
        }
        ClickOutcome::MarkerToggled { id, open } => {
            tracing::debug!(%id, open, "marker toggled");
        }
        ClickOutcome::Ignored => {}
    }
}
