//! Airfield layout with hydrogen infrastructure.

use std::f32::consts::{FRAC_PI_2, PI};

use glam::{Affine3A, Vec3};

use super::aircraft;
use super::primitive::{HotspotTarget, Material, Rgb, SceneBuilder, Shape, at, tr, trs};
use crate::catalog::{MarkerAnchor, MarkerEntity, MarkerKind};
use crate::mode::PropulsionType;

/// Height of the airport ground group.
pub const GROUND_LEVEL: f32 = -5.0;

/// Offset of a marker's beacon above its anchor.
pub const BEACON_OFFSET: Vec3 = Vec3::new(0.0, 4.0, 0.0);

const RUNWAY: Material = Material::standard(Rgb::new(0x2c, 0x3e, 0x50), 0.0, 0.8);
const GRASS: Material = Material::standard(Rgb::new(0x2d, 0x57, 0x2c), 0.0, 1.0);
const MARKING: Material = Material::unlit(Rgb::WHITE);
const TERMINAL: Material = Material::standard(Rgb::new(0x1e, 0x29, 0x3b), 0.8, 0.2);
const ROOF: Material = Material::standard(Rgb::new(0x0f, 0x17, 0x2a), 0.9, 0.1);
const VEHICLE: Material = Material::standard(Rgb::new(0xff, 0xa5, 0x00), 0.0, 1.0);
const TYRE: Material = Material::standard(Rgb::BLACK, 0.0, 1.0);
const INFRASTRUCTURE: Material = Material::standard(Rgb::new(0x7f, 0x8e, 0xa0), 0.8, 0.3);
const HIGHLIGHT: Material = Material::standard(Rgb::new(0x00, 0xf3, 0xff), 0.0, 1.0)
    .with_emission(Rgb::new(0x00, 0xf3, 0xff), 2.0);
/// Marker beacons.
pub const BEACON: Material = Material::unlit(Rgb::new(0x00, 0xf3, 0xff));

/// Where the parked aircraft sits in world space.
const LANDED_AIRCRAFT_POSITION: Vec3 = Vec3::new(-10.0, -4.3, 15.0);
const LANDED_AIRCRAFT_SCALE: f32 = 0.8;

/// Add the airfield, its markers and a parked aircraft.
pub(crate) fn build(builder: &mut SceneBuilder, propulsion: PropulsionType, markers: &[MarkerEntity]) {
    builder.group(at(Vec3::new(0.0, GROUND_LEVEL, 0.0)), |b| {
        ground(b);
        for marker in markers {
            if let MarkerAnchor::Local(position) = marker.anchor {
                b.group(at(position), |b| infrastructure(b, marker));
            }
        }
        vehicle(b, "vehicle-1", tr(Vec3::new(25.0, -0.1, 10.0), Vec3::new(0.0, -0.8, 0.0)));
        vehicle(b, "vehicle-2", at(Vec3::new(28.0, -0.1, 5.0)));
    });

    let parked = trs(
        LANDED_AIRCRAFT_POSITION,
        Vec3::new(0.0, -FRAC_PI_2, 0.0),
        Vec3::splat(LANDED_AIRCRAFT_SCALE),
    );
    builder.group(parked, |b| aircraft::build(b, propulsion));
}

/// Flat ground features. Planes face +Z, so each is tipped onto the ground.
fn ground(builder: &mut SceneBuilder) {
    let flat = |x: f32, y: f32, z: f32, yaw: f32| {
        tr(Vec3::new(x, y, z), Vec3::new(-FRAC_PI_2, 0.0, yaw))
    };
    let plane = |width: f32, height: f32| Shape::Plane { width, height };

    builder.add("grass", plane(500.0, 500.0), GRASS, flat(0.0, -0.11, 0.0, 0.0));
    builder.add("runway", plane(8.0, 80.0), RUNWAY, flat(-10.0, -0.1, 0.0, 0.0));
    builder.add(
        "runway-threshold",
        plane(4.0, 8.0),
        MARKING,
        flat(-10.0, -0.09, 35.0, 0.0),
    );
    builder.add(
        "runway-centerline",
        plane(0.2, 20.0),
        MARKING,
        flat(-10.0, -0.09, 0.0, 0.0),
    );
    builder.add("taxiway", plane(4.0, 40.0), RUNWAY, flat(5.0, -0.1, 10.0, -0.8));
    builder.add("apron", plane(40.0, 50.0), RUNWAY, flat(30.0, -0.1, 0.0, 0.0));

    builder.add(
        "terminal",
        Shape::Cuboid {
            size: Vec3::new(10.0, 4.0, 50.0),
        },
        TERMINAL,
        at(Vec3::new(48.0, 2.0, 0.0)),
    );
    builder.add(
        "terminal-roof",
        Shape::Cuboid {
            size: Vec3::new(12.0, 0.5, 52.0),
        },
        ROOF,
        at(Vec3::new(48.0, 4.0, 0.0)),
    );
}

fn vehicle(builder: &mut SceneBuilder, name: &str, placement: Affine3A) {
    builder.group(placement, |b| {
        b.add(
            format!("{name}-body"),
            Shape::Cuboid {
                size: Vec3::new(1.0, 0.5, 2.0),
            },
            VEHICLE,
            at(Vec3::ZERO),
        );
        for (i, z) in [0.8, -0.8].into_iter().enumerate() {
            b.add(
                format!("{name}-wheel-{i}"),
                Shape::Cuboid {
                    size: Vec3::splat(0.2),
                },
                TYRE,
                at(Vec3::new(0.0, -0.2, z)),
            );
        }
    });
}

/// The model, beacon and picking volumes of one marker, at its anchor.
fn infrastructure(builder: &mut SceneBuilder, marker: &MarkerEntity) {
    let target = HotspotTarget::Marker {
        id: marker.id.clone(),
    };
    let id = marker.id.as_str();
    builder.owned(target.clone(), |b| {
        match marker.kind {
            MarkerKind::StorageFarm => {
                b.add(
                    format!("{id}-tank"),
                    Shape::Sphere { radius: 2.5 },
                    INFRASTRUCTURE,
                    at(Vec3::ZERO),
                );
                b.add(
                    format!("{id}-support"),
                    Shape::Cylinder {
                        radius_top: 1.5,
                        radius_bottom: 1.5,
                        height: 0.5,
                    },
                    INFRASTRUCTURE,
                    at(Vec3::new(0.0, -2.5, 0.0)),
                );
            }
            MarkerKind::Electrolyzer => {
                b.add(
                    format!("{id}-building"),
                    Shape::Cuboid {
                        size: Vec3::new(6.0, 3.0, 4.0),
                    },
                    INFRASTRUCTURE,
                    at(Vec3::ZERO),
                );
                b.add(
                    format!("{id}-pipes"),
                    Shape::Cylinder {
                        radius_top: 0.2,
                        radius_bottom: 0.2,
                        height: 5.0,
                    },
                    HIGHLIGHT,
                    tr(Vec3::new(0.0, 0.0, 2.5), Vec3::new(0.0, 0.0, PI / 2.0)),
                );
            }
            MarkerKind::Refueler => {
                b.add(
                    format!("{id}-chassis"),
                    Shape::Cuboid {
                        size: Vec3::new(2.0, 1.0, 4.0),
                    },
                    HIGHLIGHT,
                    at(Vec3::ZERO),
                );
                b.add(
                    format!("{id}-cabin"),
                    Shape::Cuboid {
                        size: Vec3::new(1.8, 1.0, 1.5),
                    },
                    INFRASTRUCTURE,
                    at(Vec3::new(0.0, 1.0, 1.0)),
                );
            }
            MarkerKind::Hub => {}
        }
        b.add(
            format!("{id}-beacon"),
            Shape::Sphere { radius: 0.5 },
            BEACON,
            at(BEACON_OFFSET),
        );
    });
    builder.hotspot(target.clone(), BEACON_OFFSET, 1.0);
    builder.hotspot(target, Vec3::ZERO, 3.0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::airport_markers;

    fn airport() -> crate::geometry::SceneDescription {
        let mut builder = SceneBuilder::new();
        build(&mut builder, PropulsionType::Kerosene, &airport_markers());
        builder.finish()
    }

    #[test]
    fn test_ground_sits_below_origin() {
        let scene = airport();
        let runway = scene.primitive("runway").unwrap();
        let center = runway.transform.transform_point3(Vec3::ZERO);
        assert!(center.distance(Vec3::new(-10.0, -5.1, 0.0)) < 1e-5);
        // Tipped planes face up.
        let normal = runway.transform.transform_vector3(Vec3::Z).normalize();
        assert!(normal.distance(Vec3::Y) < 1e-5);
    }

    #[test]
    fn test_every_marker_is_pickable() {
        let scene = airport();
        for marker in airport_markers() {
            let target = HotspotTarget::Marker { id: marker.id };
            let hotspot = scene.hotspot(&target).unwrap();
            let MarkerAnchor::Local(anchor) = marker.anchor else {
                panic!("airport markers are anchored locally");
            };
            let ground = anchor + Vec3::new(0.0, GROUND_LEVEL, 0.0);
            assert!(hotspot.center.distance(ground + BEACON_OFFSET) < 1e-5);
            assert!(scene.pivot(&target).unwrap().distance(ground) < 1e-5);
        }
    }

    #[test]
    fn test_landed_aircraft_is_placed() {
        let scene = airport();
        let fuselage = scene.primitive("fuselage").unwrap();
        let origin = fuselage.transform.transform_point3(Vec3::ZERO);
        assert!(origin.distance(LANDED_AIRCRAFT_POSITION) < 1e-5);
        assert!(
            scene
                .hotspots
                .iter()
                .any(|h| matches!(&h.target, HotspotTarget::Engine { label } if label == "ENG 1"))
        );
    }
}
