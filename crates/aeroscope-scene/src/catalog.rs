//! Static scenario data: airport infrastructure and global hubs.

use glam::Vec3;

use crate::mode::ViewMode;

/// Where a marker sits in its home view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MarkerAnchor {
    /// Position relative to the airport group.
    Local(Vec3),
    /// Normalized sphere coordinates, projected onto the globe.
    Sphere { u: f32, v: f32 },
}

/// The model drawn under a marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkerKind {
    StorageFarm,
    Electrolyzer,
    Refueler,
    Hub,
}

/// A point of interest with an information panel.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerEntity {
    pub id: String,
    pub label: String,
    pub anchor: MarkerAnchor,
    pub kind: MarkerKind,
    /// Ordered key/value pairs shown in the panel.
    pub stats: Vec<(String, String)>,
    pub description: String,
    /// The view mode whose scene contains this marker.
    pub home: ViewMode,
}

fn entity(
    id: &str,
    label: &str,
    anchor: MarkerAnchor,
    kind: MarkerKind,
    stats: &[(&str, &str)],
    description: &str,
    home: ViewMode,
) -> MarkerEntity {
    MarkerEntity {
        id: id.to_owned(),
        label: label.to_owned(),
        anchor,
        kind,
        stats: stats
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect(),
        description: description.to_owned(),
        home,
    }
}

/// Hydrogen infrastructure shown in the airport view.
pub fn airport_markers() -> Vec<MarkerEntity> {
    vec![
        entity(
            "h2-farm",
            "LH2 Storage Farm",
            MarkerAnchor::Local(Vec3::new(-15.0, 0.5, -15.0)),
            MarkerKind::StorageFarm,
            &[("Capacity", "50,000 L"), ("Temp", "-253°C")],
            "Cryogenic spherical storage tanks for liquid hydrogen.",
            ViewMode::Airport,
        ),
        entity(
            "electrolyzer",
            "Green H2 Electrolyzer",
            MarkerAnchor::Local(Vec3::new(15.0, 0.5, -10.0)),
            MarkerKind::Electrolyzer,
            &[("Production", "700 kg/day"), ("Source", "Solar PV")],
            "On-site PEM electrolysis unit powered by airfield solar arrays.",
            ViewMode::Airport,
        ),
        entity(
            "refuel-truck",
            "Mobile Refueler",
            MarkerAnchor::Local(Vec3::new(8.0, 0.5, 5.0)),
            MarkerKind::Refueler,
            &[("Flow Rate", "50 L/min"), ("Safety", "ISO 12345")],
            "Autonomous refueling truck with boil-off gas management.",
            ViewMode::Airport,
        ),
    ]
}

/// Route network hubs shown on the globe.
pub fn global_hubs() -> Vec<MarkerEntity> {
    vec![
        entity(
            "LHR",
            "London Heathrow",
            MarkerAnchor::Sphere { u: 0.8, v: 0.6 },
            MarkerKind::Hub,
            &[("Readiness", "High"), ("H2 Hub", "Planned")],
            "Primary testing hub for transatlantic H2 flights.",
            ViewMode::Global,
        ),
        entity(
            "TLS",
            "Toulouse (Airbus)",
            MarkerAnchor::Sphere { u: 0.85, v: 0.55 },
            MarkerKind::Hub,
            &[("Readiness", "Active"), ("Prototype", "ZEROe")],
            "Assembly and flight testing for ZEROe demonstrators.",
            ViewMode::Global,
        ),
        entity(
            "DXB",
            "Dubai Int.",
            MarkerAnchor::Sphere { u: 0.6, v: 0.4 },
            MarkerKind::Hub,
            &[("Readiness", "Medium"), ("Solar", "Abundant")],
            "Potential SAF refinement hub using solar energy.",
            ViewMode::Global,
        ),
    ]
}

/// Every marker in the scenario.
pub fn all_markers() -> Vec<MarkerEntity> {
    let mut markers = airport_markers();
    markers.extend(global_hubs());
    markers
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_marker_ids_are_unique() {
        let markers = all_markers();
        let ids: HashSet<_> = markers.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids.len(), markers.len());
    }

    #[test]
    fn test_stats_keep_order() {
        let farm = &airport_markers()[0];
        let keys: Vec<_> = farm.stats.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, ["Capacity", "Temp"]);
    }

    #[test]
    fn test_home_modes() {
        assert!(airport_markers().iter().all(|m| m.home == ViewMode::Airport));
        assert!(global_hubs().iter().all(|m| m.home == ViewMode::Global));
    }
}
