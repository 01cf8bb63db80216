//! Procedural geometry for every view.
//!
//! Building is a pure function of the active view: the same view always
//! yields an identical [`SceneDescription`], so results can be cached per
//! `(PropulsionType, ViewMode)` pair.

mod aircraft;
mod airport;
mod engine;
mod globe;
mod primitive;
mod starfield;

use glam::Vec3;

pub use aircraft::{AircraftProfile, BASE_FUSELAGE_WIDTH, FUSELAGE_WIDTH_SPREAD, WING_SPAN_SPREAD};
pub use airport::{BEACON, BEACON_OFFSET, GROUND_LEVEL};
pub use engine::{
    EngineSide, GLOW_HOVERED_INTENSITY, NACELLE, NACELLE_HOVERED, glow_material, hovered_material,
};
pub use globe::{GLOBE_RADIUS, PlacedHub};
pub use primitive::{
    Emission, Hotspot, HotspotTarget, Material, Primitive, Rgb, SceneDescription, Shape,
};
pub use starfield::{STAR_COUNT, STAR_DEPTH, STAR_RADIUS, star_positions};

use crate::catalog;
use crate::mode::{PropulsionType, ViewMode};
use crate::projector::SphericalProjector;
use crate::view::ActiveView;
use primitive::{SceneBuilder, tr};

/// Build the scene for an already selected view.
pub fn build_view(view: &ActiveView) -> SceneDescription {
    let mut builder = SceneBuilder::new();
    match view {
        ActiveView::Aircraft(aircraft) => {
            let showcase = tr(Vec3::ZERO, Vec3::new(0.0, aircraft::SHOWCASE_YAW, 0.0));
            builder.group(showcase, |b| aircraft::build(b, aircraft.propulsion));
        }
        ActiveView::Airport(airport) => {
            airport::build(&mut builder, airport.propulsion, &airport.markers);
        }
        ActiveView::Globe(globe) => globe::build(&mut builder, &globe.hubs),
    }
    starfield::build(&mut builder);
    builder.finish()
}

/// Build the scene for `propulsion` and `mode` with the scenario catalog.
pub fn build_scene(propulsion: PropulsionType, mode: ViewMode) -> SceneDescription {
    let view = ActiveView::select(
        mode,
        propulsion,
        &catalog::all_markers(),
        &SphericalProjector::default(),
    );
    build_view(&view)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_is_deterministic() {
        for mode in ViewMode::ALL {
            for propulsion in PropulsionType::ALL {
                assert_eq!(build_scene(propulsion, mode), build_scene(propulsion, mode));
            }
        }
    }

    #[test]
    fn test_globe_ignores_propulsion() {
        assert_eq!(
            build_scene(PropulsionType::Kerosene, ViewMode::Global),
            build_scene(PropulsionType::LiquidH2, ViewMode::Global)
        );
    }

    #[test]
    fn test_airport_differs_only_in_parked_aircraft() {
        let kerosene = build_scene(PropulsionType::Kerosene, ViewMode::Airport);
        let hydrogen = build_scene(PropulsionType::LiquidH2, ViewMode::Airport);
        assert_eq!(kerosene.primitive("terminal"), hydrogen.primitive("terminal"));
        assert_eq!(kerosene.primitive("h2-farm-tank"), hydrogen.primitive("h2-farm-tank"));
        assert_ne!(
            kerosene.primitive("engine-1-glow").unwrap().material,
            hydrogen.primitive("engine-1-glow").unwrap().material
        );
    }

    #[test]
    fn test_aircraft_view_is_turned_around() {
        let scene = build_scene(PropulsionType::Kerosene, ViewMode::Aircraft);
        let nose = scene.primitive("nose").unwrap();
        let position = nose.transform.transform_point3(Vec3::ZERO);
        assert!(position.distance(Vec3::new(0.0, 0.0, -6.0)) < 1e-5);
    }

    #[test]
    fn test_fuselage_radius_follows_profile() {
        let scene = build_scene(PropulsionType::LiquidH2, ViewMode::Aircraft);
        let Shape::Cylinder { radius_bottom, .. } = scene.primitive("fuselage").unwrap().shape
        else {
            panic!("fuselage is a cylinder");
        };
        assert!((radius_bottom - 1.2 * BASE_FUSELAGE_WIDTH * 1.2).abs() < 1e-6);
    }

    #[test]
    fn test_every_view_has_stars() {
        for mode in ViewMode::ALL {
            let scene = build_scene(PropulsionType::Saf, mode);
            let Shape::Points { positions } = &scene.primitive("stars").unwrap().shape else {
                panic!("stars are points");
            };
            assert_eq!(positions.len(), STAR_COUNT);
        }
    }
}
