//! View-step scrubber, propulsion selector and cinema toggle.

use aeroscope_scene::{PropulsionType, ViewMode};
use bevy_egui::egui;

use super::UiAction;
use crate::state::{Composer, ViewerSettings};

fn propulsion_color(propulsion: PropulsionType) -> egui::Color32 {
    let rgb = propulsion.config().color;
    egui::Color32::from_rgb(rgb.r, rgb.g, rgb.b)
}

pub(super) fn render_controls(
    ctx: &egui::Context,
    composer: &Composer,
    settings: &ViewerSettings,
    online: bool,
    actions: &mut Vec<UiAction>,
) {
    let mode = composer.mode();

    egui::TopBottomPanel::bottom("controls").show(ctx, |ui| {
        ui.add_space(4.0);

        // View steps, micro to macro.
        ui.horizontal(|ui| {
            if ui
                .add_enabled(mode.previous().is_some(), egui::Button::new("<"))
                .clicked()
                && let Some(previous) = mode.previous()
            {
                actions.push(UiAction::SetMode(previous));
            }
            for step in ViewMode::ALL {
                if ui
                    .selectable_label(step == mode, step.step_label())
                    .clicked()
                    && step != mode
                {
                    actions.push(UiAction::SetMode(step));
                }
            }
            if ui
                .add_enabled(mode.next().is_some(), egui::Button::new(">"))
                .clicked()
                && let Some(next) = mode.next()
            {
                actions.push(UiAction::SetMode(next));
            }
        });

        ui.separator();

        ui.horizontal(|ui| {
            ui.label("Propulsion:");
            let current = composer.propulsion();
            for propulsion in PropulsionType::ALL {
                let text = egui::RichText::new(propulsion.label()).color(propulsion_color(propulsion));
                if ui.selectable_label(propulsion == current, text).clicked() && propulsion != current {
                    actions.push(UiAction::SetPropulsion(propulsion));
                }
            }

            ui.separator();

            let mut cinema = composer.cinema();
            if ui
                .checkbox(&mut cinema, "Cinema")
                .on_hover_text("Continuous camera motion (C)")
                .changed()
            {
                actions.push(UiAction::SetCinema(cinema));
            }

            if mode == ViewMode::Global {
                let mut hub_labels = settings.hub_labels;
                if ui.checkbox(&mut hub_labels, "Hub labels").changed() {
                    actions.push(UiAction::ToggleHubLabels);
                }
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if online {
                    ui.label("Schematics: generative");
                } else {
                    ui.weak("Schematics: local blueprints");
                }
            });
        });

        ui.add_space(4.0);
    });
}
