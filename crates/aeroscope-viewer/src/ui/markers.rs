//! Marker panels, hub labels and hover tooltips drawn over the scene.

use aeroscope_scene::geometry::BEACON_OFFSET;
use aeroscope_scene::{ActiveView, HotspotTarget, MarkerEntity, ViewMode};
use bevy::{ecs::system::SystemParam, prelude::*};
use bevy_egui::egui;

use super::UiAction;
use crate::camera::SceneCamera;
use crate::state::{Composer, ViewerSettings};

const PANEL_WIDTH: f32 = 260.0;
const PANEL_OFFSET: egui::Vec2 = egui::vec2(16.0, -16.0);

/// Camera access for projecting scene points to the screen.
#[derive(SystemParam)]
pub(super) struct OverlayParams<'w, 's> {
    cameras: Query<'w, 's, (&'static Camera, &'static GlobalTransform), With<SceneCamera>>,
}

impl OverlayParams<'_, '_> {
    /// Screen position of a world point, if it is in front of the camera.
    fn to_screen(&self, world: Vec3) -> Option<egui::Pos2> {
        let (camera, transform) = self.cameras.single().ok()?;
        let screen = camera.world_to_viewport(transform, world).ok()?;
        Some(egui::pos2(screen.x, screen.y))
    }
}

pub(super) fn render_overlay(
    ctx: &egui::Context,
    composer: &Composer,
    settings: &ViewerSettings,
    overlay: &OverlayParams,
    actions: &mut Vec<UiAction>,
) {
    if settings.hub_labels
        && let ActiveView::Globe(globe) = composer.active_view()
    {
        let painter = ctx.layer_painter(egui::LayerId::new(
            egui::Order::Background,
            egui::Id::new("hub-labels"),
        ));
        for hub in &globe.hubs {
            if let Some(pos) = overlay.to_screen(hub.position) {
                painter.text(
                    pos + egui::vec2(8.0, 0.0),
                    egui::Align2::LEFT_CENTER,
                    &hub.id,
                    egui::FontId::monospace(12.0),
                    egui::Color32::from_rgb(0x00, 0xf3, 0xff),
                );
            }
        }
    }

    let scene = composer.scene();
    for marker in composer.markers().open_markers() {
        let target = HotspotTarget::Marker {
            id: marker.id.clone(),
        };
        let Some(anchor) = scene.pivot(&target) else {
            continue;
        };
        let Some(pos) = overlay.to_screen(anchor + BEACON_OFFSET) else {
            continue;
        };
        if marker_panel(ctx, marker, pos + PANEL_OFFSET) {
            actions.push(UiAction::CloseMarker(marker.id.clone()));
        }
    }

    hover_tooltip(ctx, composer);
}

/// Draw one marker's panel. Returns `true` if its close button was clicked.
fn marker_panel(ctx: &egui::Context, marker: &MarkerEntity, pos: egui::Pos2) -> bool {
    let mut close = false;
    egui::Area::new(egui::Id::new(("marker", &marker.id)))
        .fixed_pos(pos)
        .order(egui::Order::Middle)
        .show(ctx, |ui| {
            egui::Frame::popup(ui.style()).show(ui, |ui| {
                ui.set_width(PANEL_WIDTH);
                ui.horizontal(|ui| {
                    ui.strong(&marker.label);
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        close = ui.small_button("x").clicked();
                    });
                });
                ui.separator();
                egui::Grid::new(("marker-stats", &marker.id))
                    .num_columns(2)
                    .show(ui, |ui| {
                        for (key, value) in &marker.stats {
                            ui.weak(key);
                            ui.monospace(value);
                            ui.end_row();
                        }
                    });
                ui.add_space(4.0);
                ui.label(&marker.description);
            });
        });
    close
}

/// Tooltip next to the pointer for the hovered engine or marker.
fn hover_tooltip(ctx: &egui::Context, composer: &Composer) {
    let Some(pointer) = ctx.pointer_hover_pos() else {
        return;
    };
    let (title, hint) = match composer.hovered() {
        Some(HotspotTarget::Engine { label }) => (label.clone(), "Click to inspect"),
        Some(HotspotTarget::Marker { id }) => match composer.markers().entity(id) {
            Ok(marker) => (marker.label.clone(), "Click for details"),
            Err(_) => return,
        },
        Some(HotspotTarget::Aircraft) if composer.mode() != ViewMode::Aircraft => {
            ("Aircraft".to_owned(), "Click to view")
        }
        _ => return,
    };

    egui::Area::new(egui::Id::new("hover-tooltip"))
        .fixed_pos(pointer + egui::vec2(14.0, 14.0))
        .order(egui::Order::Tooltip)
        .interactable(false)
        .show(ctx, |ui| {
            egui::Frame::popup(ui.style()).show(ui, |ui| {
                ui.strong(title);
                ui.weak(hint);
            });
        });
}
