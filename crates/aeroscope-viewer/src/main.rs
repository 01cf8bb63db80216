//! Interactive viewer for aircraft, airport and route-network scenarios.
//!
//! The view steps from a single aircraft, through the airport's ground
//! infrastructure, out to the global hub network. Engines can be inspected
//! for a generated (or locally drawn) schematic.

mod async_runtime;
mod camera;
mod launch_params;
mod mesh;
mod picking;
mod scene;
mod schematic;
mod state;
mod ui;

use async_runtime::AsyncRuntimePlugin;
use bevy::prelude::*;
use camera::SceneCameraPlugin;
use picking::PickingPlugin;
use scene::SceneSyncPlugin;
use schematic::SchematicPlugin;
use state::{Composer, ViewerSettings};
use ui::UiPlugin;

/// Main application plugin.
pub struct AppPlugin;

impl Plugin for AppPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ViewerSettings>()
            .init_resource::<Composer>()
            .add_plugins((
                SceneSyncPlugin,
                SceneCameraPlugin,
                PickingPlugin,
                SchematicPlugin,
                UiPlugin,
            ));
    }
}

fn main() {
    // Initialize tracing for native platforms.
    #[cfg(not(target_family = "wasm"))]
    {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
        tracing_subscriber::registry()
            .with(tracing_subscriber::fmt::layer())
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
            )
            .init();
    }

    // Initialize tracing for WASM (logs to browser console).
    #[cfg(target_family = "wasm")]
    {
        console_error_panic_hook::set_once();
        tracing_wasm::set_as_global_default();
    }

    let launch_params = launch_params::parse();

    let mut app = App::new();

    #[allow(unused_mut)]
    let mut window = Window {
        title: "aeroscope-viewer".to_string(),
        resolution: (1600, 900).into(),
        position: WindowPosition::Centered(MonitorSelection::Primary),
        ..Default::default()
    };

    // WASM: Fit canvas to parent element and prevent browser event handling.
    #[cfg(target_family = "wasm")]
    {
        window.fit_canvas_to_parent = true;
        window.prevent_default_event_handling = true;
    }

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(window),
        ..Default::default()
    }));

    // Add async runtime (Tokio on native, task pool on WASM).
    app.add_plugins(AsyncRuntimePlugin);

    // Launch parameters must be in place before the composer is built.
    app.insert_resource(launch_params);

    app.add_plugins(AppPlugin).run();
}
