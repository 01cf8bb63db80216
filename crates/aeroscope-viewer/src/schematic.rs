//! Bridges inspect requests to the schematic generator.
//!
//! Requests run on the async runtime and report back over a channel, which a
//! system drains once per frame into the composer. The composer decides
//! whether a completion is still wanted.

use aeroscope_scene::{InspectRequest, Ticket};
use aeroscope_schematic::{SchematicClient, SchematicImage, resolve_schematic};
use async_channel::{Receiver, Sender};
use bevy::{ecs::system::SystemParam, prelude::*};

use crate::async_runtime::{SpawnedTask, TaskSpawner};
use crate::state::Composer;

pub struct SchematicPlugin;

impl Plugin for SchematicPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SchematicState>()
            .add_systems(Update, poll_schematics);
    }
}

/// Generator client and the channel completions arrive on.
#[derive(Resource)]
pub struct SchematicState {
    /// `None` when no API key is configured; every request then falls back.
    client: Option<SchematicClient>,
    result_tx: Sender<(Ticket, SchematicImage)>,
    result_rx: Receiver<(Ticket, SchematicImage)>,
    in_flight: Option<SpawnedTask>,
}

impl Default for SchematicState {
    fn default() -> Self {
        let client = match SchematicClient::from_env() {
            Ok(client) => {
                tracing::info!("schematic generation enabled");
                Some(client)
            }
            Err(e) => {
                tracing::info!("schematic generation offline, using local blueprints: {e}");
                None
            }
        };
        let (result_tx, result_rx) = async_channel::unbounded();
        Self {
            client,
            result_tx,
            result_rx,
            in_flight: None,
        }
    }
}

impl SchematicState {
    /// Whether requests go to the generator at all.
    pub fn is_online(&self) -> bool {
        self.client.is_some()
    }
}

/// Starts schematic generation for inspect requests.
#[derive(SystemParam)]
pub struct SchematicRequests<'w, 's> {
    state: ResMut<'w, SchematicState>,
    spawner: TaskSpawner<'w, 's>,
}

impl SchematicRequests<'_, '_> {
    /// Start generating for `request`, cancelling any superseded request.
    pub fn start(&mut self, request: &InspectRequest) {
        if let Some(task) = self.state.in_flight.take() {
            task.cancel();
        }

        let client = self.state.client.clone();
        let tx = self.state.result_tx.clone();
        let ticket = request.ticket;
        let part = request.part.clone();
        let propulsion = request.propulsion.label();

        let task = self.spawner.spawn(async move {
            let image = resolve_schematic(client.as_ref(), &part, propulsion).await;
            let _ = tx.send((ticket, image)).await;
        });
        self.state.in_flight = Some(task);
    }
}

fn poll_schematics(mut state: ResMut<SchematicState>, mut composer: ResMut<Composer>) {
    while let Ok((ticket, image)) = state.result_rx.try_recv() {
        let fallback = image.is_fallback();
        if composer.complete_inspect(ticket, image) {
            tracing::debug!(%ticket, fallback, "schematic ready");
        } else {
            tracing::debug!(%ticket, "dropping stale schematic");
        }
    }

    // Abandoned requests (dismissed or navigated away) need not keep running.
    if composer.inspect().pending().is_none()
        && let Some(task) = state.in_flight.take()
    {
        task.cancel();
    }
}
