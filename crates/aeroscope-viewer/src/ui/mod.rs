//! Overlay UI: view steps, propulsion selector, marker panels and the
//! schematic modal.
//!
//! Each panel renders from a read-only view of the composer and returns the
//! actions the user took; they are applied afterwards in one place.

mod blueprint;
mod controls;
mod markers;
mod schematic;

use aeroscope_scene::{PropulsionType, ViewMode};
use bevy::prelude::*;
use bevy_egui::{EguiContexts, EguiPlugin, EguiPrimaryContextPass};

use crate::schematic::SchematicState;
use crate::state::{Composer, ViewerSettings};

/// Plugin for the overlay UI.
pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(EguiPlugin::default())
            .init_resource::<schematic::SchematicTextures>()
            .add_systems(EguiPrimaryContextPass, ui_system);
    }
}

/// Something the user asked for through the overlay.
#[derive(Debug, Clone, PartialEq)]
enum UiAction {
    SetMode(ViewMode),
    SetPropulsion(PropulsionType),
    SetCinema(bool),
    ToggleHubLabels,
    CloseMarker(String),
    DismissInspect,
}

fn ui_system(
    mut contexts: EguiContexts,
    mut composer: ResMut<Composer>,
    mut settings: ResMut<ViewerSettings>,
    schematic_state: Res<SchematicState>,
    mut textures: ResMut<schematic::SchematicTextures>,
    overlay: markers::OverlayParams,
) -> Result {
    let ctx = contexts.ctx_mut()?;

    let mut actions = Vec::new();
    controls::render_controls(ctx, &composer, &settings, schematic_state.is_online(), &mut actions);
    markers::render_overlay(ctx, &composer, &settings, &overlay, &mut actions);
    schematic::render_schematic(ctx, &composer, &mut textures, &mut actions);

    for action in actions {
        apply(action, &mut composer, &mut settings);
    }
    Ok(())
}

fn apply(action: UiAction, composer: &mut Composer, settings: &mut ViewerSettings) {
    match action {
        UiAction::SetMode(mode) => {
            composer.set_mode(mode);
        }
        UiAction::SetPropulsion(propulsion) => {
            composer.set_propulsion(propulsion);
        }
        UiAction::SetCinema(cinema) => {
            composer.set_cinema(cinema);
        }
        UiAction::ToggleHubLabels => settings.hub_labels = !settings.hub_labels,
        UiAction::CloseMarker(id) => {
            composer.close_marker(&id);
        }
        UiAction::DismissInspect => composer.dismiss_inspect(),
    }
}

#[cfg(test)]
mod tests {
    use aeroscope_scene::{HotspotTarget, InspectStatus};

    use super::*;
    use crate::launch_params::LaunchParams;

    fn composer() -> Composer {
        Composer::from_launch(&LaunchParams::default(), &ViewerSettings::default())
    }

    #[test]
    fn test_apply_mode_and_propulsion() {
        let mut composer = composer();
        let mut settings = ViewerSettings::default();
        apply(UiAction::SetMode(ViewMode::Global), &mut composer, &mut settings);
        apply(
            UiAction::SetPropulsion(PropulsionType::LiquidH2),
            &mut composer,
            &mut settings,
        );
        assert_eq!(composer.mode(), ViewMode::Global);
        assert_eq!(composer.propulsion(), PropulsionType::LiquidH2);

        apply(UiAction::ToggleHubLabels, &mut composer, &mut settings);
        assert!(!settings.hub_labels);
    }

    #[test]
    fn test_apply_dismiss_inspect() {
        let mut composer = composer();
        let mut settings = ViewerSettings::default();
        composer.set_mode(ViewMode::Aircraft);
        composer.click(&HotspotTarget::Engine {
            label: "ENG 1".to_owned(),
        });
        assert!(matches!(composer.inspect().status(), InspectStatus::Pending(_)));
        apply(UiAction::DismissInspect, &mut composer, &mut settings);
        assert!(composer.inspect().is_idle());
    }
}
