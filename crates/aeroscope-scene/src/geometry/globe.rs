//! Wireframe globe with projected route hubs.

use glam::Vec3;

use super::primitive::{HotspotTarget, Material, Rgb, SceneBuilder, Shape, at, trs};

/// Radius of the earth sphere.
pub const GLOBE_RADIUS: f32 = 12.0;

const OCCLUDER_SCALE: f32 = 0.99;
const HUB_SPHERE_RADIUS: f32 = 0.3;

const EARTH: Material = Material::standard(Rgb::new(0x0f, 0x17, 0x2a), 0.0, 1.0)
    .with_emission(Rgb::new(0x1e, 0x29, 0x3b), 0.2)
    .wireframe();
const OCCLUDER: Material = Material::unlit(Rgb::BLACK);
const HUB: Material = Material::unlit(Rgb::new(0x00, 0xf3, 0xff));

/// A hub already projected onto the globe.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedHub {
    pub id: String,
    pub label: String,
    pub position: Vec3,
}

/// Add the globe and one sphere per hub.
pub(crate) fn build(builder: &mut SceneBuilder, hubs: &[PlacedHub]) {
    builder.add(
        "earth",
        Shape::Sphere {
            radius: GLOBE_RADIUS,
        },
        EARTH,
        at(Vec3::ZERO),
    );
    builder.add(
        "earth-occluder",
        Shape::Sphere {
            radius: GLOBE_RADIUS,
        },
        OCCLUDER,
        trs(Vec3::ZERO, Vec3::ZERO, Vec3::splat(OCCLUDER_SCALE)),
    );

    for hub in hubs {
        let target = HotspotTarget::Marker { id: hub.id.clone() };
        builder.owned(target.clone(), |b| {
            b.add(
                format!("hub-{}", hub.id),
                Shape::Sphere { radius: HUB_SPHERE_RADIUS },
                HUB,
                at(hub.position),
            );
        });
        builder.hotspot(target, hub.position, HUB_SPHERE_RADIUS * 2.0);
    }
}
