//! The schematic modal shown while a part is inspected.

use aeroscope_scene::{InspectRequest, InspectStatus, Ticket};
use aeroscope_schematic::{Blueprint, Schematic, SchematicImage};
use bevy::prelude::*;
use bevy_egui::egui;

use super::{UiAction, blueprint};
use crate::state::Composer;

/// Canvas aspect ratio (width over height).
const ASPECT: f32 = 1.5;
const MAX_WIDTH: f32 = 900.0;

/// Texture of the generated image currently on display.
#[derive(Resource, Default)]
pub(super) struct SchematicTextures {
    loaded: Option<(Ticket, Option<egui::TextureHandle>)>,
}

impl SchematicTextures {
    /// Texture for `ticket`'s image, decoding and uploading it once.
    ///
    /// `None` if the image could not be decoded.
    fn get(
        &mut self,
        ctx: &egui::Context,
        ticket: Ticket,
        schematic: &Schematic,
    ) -> Option<&egui::TextureHandle> {
        if self.loaded.as_ref().is_none_or(|(t, _)| *t != ticket) {
            let texture = match decode(schematic) {
                Ok(image) => Some(ctx.load_texture(
                    format!("schematic-{}", ticket.get()),
                    image,
                    egui::TextureOptions::LINEAR,
                )),
                Err(e) => {
                    tracing::warn!(%ticket, "failed to decode schematic: {e}");
                    None
                }
            };
            self.loaded = Some((ticket, texture));
        }
        self.loaded.as_ref().and_then(|(_, texture)| texture.as_ref())
    }

    fn clear(&mut self) {
        self.loaded = None;
    }
}

/// Decode a generated image into egui's pixel format.
fn decode(schematic: &Schematic) -> Result<egui::ColorImage, image::ImageError> {
    let rgba = image::load_from_memory(&schematic.data)?.to_rgba8();
    let size = [rgba.width() as usize, rgba.height() as usize];
    Ok(egui::ColorImage::from_rgba_unmultiplied(size, rgba.as_raw()))
}

pub(super) fn render_schematic(
    ctx: &egui::Context,
    composer: &Composer,
    textures: &mut SchematicTextures,
    actions: &mut Vec<UiAction>,
) {
    let (request, image) = match composer.inspect().status() {
        InspectStatus::Idle => {
            textures.clear();
            return;
        }
        InspectStatus::Pending(request) => (request, None),
        InspectStatus::Ready(request, image) => (request, Some(image)),
    };

    let mut open = true;
    egui::Window::new(format!("{} SCHEMATIC", request.part))
        .id(egui::Id::new("schematic-modal"))
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .open(&mut open)
        .show(ctx, |ui| {
            ui.weak(request.propulsion.label());
            ui.separator();
            let width = ui.available_width().min(MAX_WIDTH).max(480.0);
            let size = egui::vec2(width, width / ASPECT);
            match image {
                None => pending(ui, request, size),
                Some(SchematicImage::Generated(schematic)) => {
                    match textures.get(ctx, request.ticket, schematic) {
                        Some(texture) => {
                            ui.add(egui::Image::new((texture.id(), size)));
                        }
                        None => fallback(
                            ui,
                            &Blueprint::fallback(&request.part, request.propulsion.label()),
                            size,
                        ),
                    }
                }
                Some(SchematicImage::Fallback(blueprint)) => fallback(ui, blueprint, size),
            }
        });

    let escape = ctx.input(|i| i.key_pressed(egui::Key::Escape));
    if !open || escape {
        actions.push(UiAction::DismissInspect);
    }
}

fn pending(ui: &mut egui::Ui, request: &InspectRequest, size: egui::Vec2) {
    ui.allocate_ui(size, |ui| {
        ui.centered_and_justified(|ui| {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label(format!("Generating schematic for {}...", request.part));
            });
        });
    });
}

fn fallback(ui: &mut egui::Ui, blueprint: &Blueprint, size: egui::Vec2) {
    let (rect, _) = ui.allocate_exact_size(size, egui::Sense::hover());
    // The blueprint carries its own unavailability note.
    blueprint::paint(ui.painter(), rect, blueprint);
}
