//! Turbofan engine sub-model.
//!
//! Each engine is an interactive part: hovering highlights it and shows a
//! tooltip, clicking raises an inspect request carrying its label.

use std::f32::consts::FRAC_PI_2;

use glam::Vec3;

use super::primitive::{HotspotTarget, Material, Rgb, SceneBuilder, Shape, at, tr, trs};
use crate::mode::PropulsionType;

/// Nacelle surface when idle.
pub const NACELLE: Material = Material::standard(Rgb::new(0x37, 0x41, 0x51), 0.9, 0.4);
/// Nacelle surface while the pointer is over the engine.
pub const NACELLE_HOVERED: Material = Material::standard(Rgb::new(0x9c, 0xa3, 0xaf), 1.0, 0.2);
/// Glow intensity while the pointer is over the engine.
pub const GLOW_HOVERED_INTENSITY: f32 = 2.0;

const GLOW_BASE_INTENSITY: f32 = 0.5;
const ENGINE_SCALE: f32 = 0.8;

/// Which wing an engine hangs from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EngineSide {
    Left,
    Right,
}

impl EngineSide {
    /// Part label shown in tooltips and sent with inspect requests.
    pub fn label(self) -> &'static str {
        match self {
            Self::Left => "ENG 1",
            Self::Right => "ENG 2",
        }
    }

    fn sign(self) -> f32 {
        match self {
            Self::Left => 1.0,
            Self::Right => -1.0,
        }
    }

    fn slug(self) -> &'static str {
        match self {
            Self::Left => "engine-1",
            Self::Right => "engine-2",
        }
    }
}

/// Glow material for the active propulsion type.
pub fn glow_material(propulsion: PropulsionType) -> Material {
    let config = propulsion.config();
    Material::standard(config.color, 0.0, 1.0)
        .with_emission(config.color, GLOW_BASE_INTENSITY + config.emission)
}

/// Material of an engine part while the pointer is over its engine.
///
/// Nacelle surfaces brighten and the glow intensifies; other parts keep
/// their material.
pub fn hovered_material(base: &Material) -> Material {
    if *base == NACELLE {
        return NACELLE_HOVERED;
    }
    match base.emission {
        Some(emission) => base.with_emission(emission.color, GLOW_HOVERED_INTENSITY),
        None => *base,
    }
}

/// Add one engine, positioned under its wing, to the current group.
pub(crate) fn build(builder: &mut SceneBuilder, propulsion: PropulsionType, side: EngineSide) {
    let sign = side.sign();
    let mount = trs(
        Vec3::new(-3.5 * sign, -1.0, -1.0),
        Vec3::new(0.0, 0.1 * sign, 0.0),
        Vec3::splat(ENGINE_SCALE),
    );
    let target = HotspotTarget::Engine {
        label: side.label().to_owned(),
    };
    let slug = side.slug();
    let along_z = Vec3::new(FRAC_PI_2, 0.0, 0.0);

    builder.group(mount, |b| {
        b.owned(target.clone(), |b| {
            b.add(
                format!("{slug}-nacelle"),
                Shape::Cylinder {
                    radius_top: 1.2,
                    radius_bottom: 1.0,
                    height: 3.0,
                },
                NACELLE,
                tr(Vec3::ZERO, along_z),
            );
            b.add(
                format!("{slug}-intake"),
                Shape::Torus {
                    major_radius: 1.2,
                    minor_radius: 0.1,
                },
                NACELLE_HOVERED,
                at(Vec3::new(0.0, 0.0, 1.5)),
            );
            b.add(
                format!("{slug}-exhaust"),
                Shape::Cylinder {
                    radius_top: 0.8,
                    radius_bottom: 0.5,
                    height: 0.5,
                },
                NACELLE,
                tr(Vec3::new(0.0, 0.0, -1.5), along_z),
            );
            b.add(
                format!("{slug}-glow"),
                Shape::Disc { radius: 1.0 },
                glow_material(propulsion),
                at(Vec3::new(0.0, 0.0, 1.2)),
            );
        });
        b.hotspot(target, Vec3::ZERO, 1.6);
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels() {
        assert_eq!(EngineSide::Left.label(), "ENG 1");
        assert_eq!(EngineSide::Right.label(), "ENG 2");
    }

    #[test]
    fn test_glow_follows_propulsion() {
        for propulsion in PropulsionType::ALL {
            let config = propulsion.config();
            let glow = glow_material(propulsion).emission.unwrap();
            assert_eq!(glow.color, config.color);
            assert!((glow.intensity - (GLOW_BASE_INTENSITY + config.emission)).abs() < 1e-6);
        }
    }

    #[test]
    fn test_hovered_material() {
        assert_eq!(hovered_material(&NACELLE), NACELLE_HOVERED);
        assert_eq!(hovered_material(&NACELLE_HOVERED), NACELLE_HOVERED);
        let glow = hovered_material(&glow_material(PropulsionType::Saf));
        assert_eq!(glow.emission.unwrap().intensity, GLOW_HOVERED_INTENSITY);
    }

    #[test]
    fn test_engine_parts_are_owned_by_engine() {
        let mut builder = SceneBuilder::new();
        build(&mut builder, PropulsionType::Kerosene, EngineSide::Right);
        let scene = builder.finish();

        let target = HotspotTarget::Engine {
            label: "ENG 2".to_owned(),
        };
        assert_eq!(scene.primitives.len(), 4);
        assert!(scene.primitives.iter().all(|p| p.owner.as_ref() == Some(&target)));

        let hotspot = scene.hotspot(&target).unwrap();
        assert!(hotspot.center.distance(Vec3::new(3.5, -1.0, -1.0)) < 1e-5);
        assert!((hotspot.radius - 1.6 * ENGINE_SCALE).abs() < 1e-5);
    }
}
