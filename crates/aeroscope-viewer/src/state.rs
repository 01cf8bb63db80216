//! Shared viewer state.
//!
//! The core [`SceneComposer`] lives in a single resource; every system that
//! reads or mutates view state goes through it.

use aeroscope_scene::{
    CameraAnimator, CameraAnimatorSettings, SceneComposer, ViewModeController,
    camera::INITIAL_CAMERA_POSITION,
};
use aeroscope_schematic::SchematicImage;
use bevy::prelude::*;

use crate::launch_params::LaunchParams;

/// Tunables for the viewer.
#[derive(Resource, Debug, Clone)]
pub struct ViewerSettings {
    /// Camera easing per frame.
    pub camera: CameraAnimatorSettings,
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    /// Show hub labels in the global view.
    pub hub_labels: bool,
}

impl Default for ViewerSettings {
    fn default() -> Self {
        Self {
            camera: CameraAnimatorSettings::default(),
            fov_degrees: 45.0,
            hub_labels: true,
        }
    }
}

/// The scene composer, holding view mode, propulsion, markers, camera and
/// inspect state.
#[derive(Resource, Deref, DerefMut)]
pub struct Composer(pub SceneComposer<SchematicImage>);

impl Composer {
    pub fn from_launch(params: &LaunchParams, settings: &ViewerSettings) -> Self {
        let controller = ViewModeController::new(params.mode, params.propulsion, params.cinema);
        let camera = CameraAnimator::new(INITIAL_CAMERA_POSITION, settings.camera);
        Self(SceneComposer::new(controller, camera))
    }
}

impl FromWorld for Composer {
    fn from_world(world: &mut World) -> Self {
        let params = world.get_resource::<LaunchParams>().cloned().unwrap_or_default();
        let settings = world
            .get_resource::<ViewerSettings>()
            .cloned()
            .unwrap_or_default();
        tracing::info!(
            mode = ?params.mode,
            propulsion = ?params.propulsion,
            cinema = params.cinema,
            "starting viewer"
        );
        Self::from_launch(&params, &settings)
    }
}

#[cfg(test)]
mod tests {
    use aeroscope_scene::{PropulsionType, ViewMode};

    use super::*;

    #[test]
    fn test_composer_from_launch() {
        let params = LaunchParams {
            mode: ViewMode::Global,
            propulsion: PropulsionType::Electric,
            cinema: true,
        };
        let composer = Composer::from_launch(&params, &ViewerSettings::default());
        assert_eq!(composer.mode(), ViewMode::Global);
        assert_eq!(composer.propulsion(), PropulsionType::Electric);
        assert!(composer.cinema());
    }
}
