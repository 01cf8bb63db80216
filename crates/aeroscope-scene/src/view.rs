//! The geometry groups visible in each view mode.

use crate::catalog::{MarkerAnchor, MarkerEntity};
use crate::geometry::PlacedHub;
use crate::mode::{PropulsionType, ViewMode};
use crate::projector::SphericalProjector;

#[derive(Debug, Clone, PartialEq)]
pub struct AircraftView {
    pub propulsion: PropulsionType,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AirportView {
    pub propulsion: PropulsionType,
    pub markers: Vec<MarkerEntity>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GlobeView {
    pub hubs: Vec<PlacedHub>,
}

/// Exactly one of these is active at a time, chosen on each mode change.
#[derive(Debug, Clone, PartialEq)]
pub enum ActiveView {
    Aircraft(AircraftView),
    Airport(AirportView),
    Globe(GlobeView),
}

impl ActiveView {
    /// Select the view for `mode`, keeping only the markers that live in it.
    ///
    /// Hubs whose coordinates cannot be projected are skipped with a warning.
    pub fn select(
        mode: ViewMode,
        propulsion: PropulsionType,
        markers: &[MarkerEntity],
        projector: &SphericalProjector,
    ) -> Self {
        let resident = markers.iter().filter(|m| m.home == mode);
        match mode {
            ViewMode::Aircraft => Self::Aircraft(AircraftView { propulsion }),
            ViewMode::Airport => Self::Airport(AirportView {
                propulsion,
                markers: resident.cloned().collect(),
            }),
            ViewMode::Global => Self::Globe(GlobeView {
                hubs: resident
                    .filter_map(|marker| place_hub(marker, projector))
                    .collect(),
            }),
        }
    }

    /// The view mode this view belongs to.
    pub fn mode(&self) -> ViewMode {
        match self {
            Self::Aircraft(_) => ViewMode::Aircraft,
            Self::Airport(_) => ViewMode::Airport,
            Self::Globe(_) => ViewMode::Global,
        }
    }
}

fn place_hub(marker: &MarkerEntity, projector: &SphericalProjector) -> Option<PlacedHub> {
    let MarkerAnchor::Sphere { u, v } = marker.anchor else {
        tracing::warn!(id = %marker.id, "global marker without sphere coordinates");
        return None;
    };
    match projector.project(u, v) {
        Ok(position) => Some(PlacedHub {
            id: marker.id.clone(),
            label: marker.label.clone(),
            position,
        }),
        Err(err) => {
            tracing::warn!(id = %marker.id, %err, "skipping hub");
            None
        }
    }
}
