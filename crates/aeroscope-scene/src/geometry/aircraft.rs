//! Parametric airliner.
//!
//! The body is modeled nose towards +Z. Shape parameters interpolate linearly
//! with the propulsion morph factor through [`AircraftProfile`].

use std::f32::consts::{FRAC_PI_2, PI};

use glam::{Vec2, Vec3};

use super::engine::{self, EngineSide};
use super::primitive::{
    HotspotTarget, Material, OutlineBuilder, Rgb, SceneBuilder, Shape, at, tr, trs,
};
use crate::mode::PropulsionType;

/// Fuselage width with a morph factor of zero.
pub const BASE_FUSELAGE_WIDTH: f32 = 1.0;

/// Relative fuselage widening at full morph.
pub const FUSELAGE_WIDTH_SPREAD: f32 = 0.2;

/// Relative wing span growth at full morph.
pub const WING_SPAN_SPREAD: f32 = 0.15;

/// Yaw of the aircraft in the aircraft view.
pub(crate) const SHOWCASE_YAW: f32 = PI;

const WINDOWS_PER_SIDE: usize = 10;

const FUSELAGE: Material = Material::standard(Rgb::new(0xe2, 0xe8, 0xf0), 0.9, 0.1);
const WING: Material = Material::standard(Rgb::new(0xcb, 0xd5, 0xe1), 0.8, 0.3);
const TAIL: Material = Material::standard(Rgb::new(0xb0, 0xb8, 0xc4), 0.8, 0.3);
const WINDOW: Material = Material::standard(Rgb::new(0x0f, 0x17, 0x2a), 0.95, 0.05);

/// Morph-dependent shape parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AircraftProfile {
    pub fuselage_width: f32,
    pub wing_span_scale: f32,
}

impl AircraftProfile {
    /// Interpolate the profile for a morph factor in `[0, 1]`.
    pub fn from_morph(morph_factor: f32) -> Self {
        let morph = morph_factor.clamp(0.0, 1.0);
        Self {
            fuselage_width: BASE_FUSELAGE_WIDTH * (1.0 + morph * FUSELAGE_WIDTH_SPREAD),
            wing_span_scale: 1.0 + morph * WING_SPAN_SPREAD,
        }
    }

    pub fn for_propulsion(propulsion: PropulsionType) -> Self {
        Self::from_morph(propulsion.config().morph_factor)
    }
}

/// Add a complete aircraft to the current group.
pub(crate) fn build(builder: &mut SceneBuilder, propulsion: PropulsionType) {
    let profile = AircraftProfile::for_propulsion(propulsion);
    builder.owned(HotspotTarget::Aircraft, |b| {
        fuselage(b, profile);
        wings(b, profile);
        tail(b);
    });
    for side in [EngineSide::Left, EngineSide::Right] {
        engine::build(builder, propulsion, side);
    }
}

fn fuselage(builder: &mut SceneBuilder, profile: AircraftProfile) {
    let w = profile.fuselage_width;
    // Cylinders run along Y; a quarter turn about X lays them along Z.
    let along_z = Vec3::new(FRAC_PI_2, 0.0, 0.0);

    builder.add(
        "fuselage",
        Shape::Cylinder {
            radius_top: 0.8 * w,
            radius_bottom: 1.2 * w,
            height: 12.0,
        },
        FUSELAGE,
        tr(Vec3::ZERO, along_z),
    );
    builder.add(
        "nose",
        Shape::Dome { radius: 0.8 * w },
        FUSELAGE,
        tr(Vec3::new(0.0, 0.0, 6.0), along_z),
    );
    builder.add(
        "tail-cone",
        Shape::Cylinder {
            radius_top: 1.2 * w,
            radius_bottom: 0.4 * w,
            height: 3.0,
        },
        FUSELAGE,
        tr(Vec3::new(0.0, 0.0, -7.5), along_z),
    );

    for i in 0..WINDOWS_PER_SIDE {
        #[allow(clippy::cast_precision_loss)]
        let z = -2.0 + i as f32 * 0.8;
        for (side, x) in [("left", 1.1 * w), ("right", -1.1 * w)] {
            builder.add(
                format!("window-{side}-{i}"),
                Shape::Cuboid {
                    size: Vec3::new(0.1, 0.2, 0.1),
                },
                WINDOW,
                at(Vec3::new(x, 0.5, z)),
            );
        }
    }

    builder.add(
        "cockpit",
        Shape::Cuboid {
            size: Vec3::new(w, 0.6, 1.0),
        },
        WINDOW,
        tr(Vec3::new(0.0, 0.8, 5.5), Vec3::new(-0.2, 0.0, 0.0)),
    );
    builder.add(
        "windshield",
        Shape::Cuboid {
            size: Vec3::new(0.8 * w, 0.2, 0.8),
        },
        WINDOW,
        tr(Vec3::new(0.0, 1.1, 5.4), Vec3::new(-0.4, 0.0, 0.0)),
    );

    for (i, z) in [-6.0, -3.0, 0.0, 3.0, 6.0].into_iter().enumerate() {
        let radius = if i == 0 { 1.4 * w } else { 1.6 * w };
        builder.hotspot(HotspotTarget::Aircraft, Vec3::new(0.0, 0.0, z), radius);
    }
}

/// Swept wing planform. The span grows along +X.
pub(crate) fn wing_outline(span_scale: f32) -> Vec<Vec2> {
    let s = span_scale;
    OutlineBuilder::move_to(0.0, 0.0)
        .quad_to(2.0 * s, 0.5, 8.0 * s, 0.3)
        .quad_to(8.5 * s, 0.0, 8.0 * s, -1.5)
        .quad_to(2.0 * s, -0.8, 0.0, -0.5)
        .close()
}

fn winglet_outline() -> Vec<Vec2> {
    OutlineBuilder::move_to(0.0, 0.0)
        .line_to(0.5, 1.0)
        .line_to(0.3, 1.0)
        .line_to(0.0, 0.1)
        .close()
}

fn wings(builder: &mut SceneBuilder, profile: AircraftProfile) {
    let span = profile.wing_span_scale;
    // The right wing is the left one mirrored in X.
    for (side, sign) in [("left", 1.0_f32), ("right", -1.0_f32)] {
        let wing = trs(
            Vec3::new(-0.5 * sign, -0.2, 0.0),
            Vec3::new(0.0, -0.4 * sign, -0.1 * sign),
            Vec3::new(sign, 1.0, 1.0),
        );
        builder.group(wing, |b| {
            b.add(
                format!("wing-{side}"),
                Shape::Extrusion {
                    outline: wing_outline(span),
                    depth: 0.2,
                },
                WING,
                at(Vec3::ZERO),
            );
            b.add(
                format!("winglet-{side}"),
                Shape::Extrusion {
                    outline: winglet_outline(),
                    depth: 0.1,
                },
                WING,
                tr(Vec3::new(8.0 * span, -0.5, 0.0), Vec3::new(0.4, 0.0, 0.5)),
            );
        });
    }
}

fn tail(builder: &mut SceneBuilder) {
    let fin = OutlineBuilder::move_to(0.0, 0.0)
        .line_to(0.0, 3.0)
        .line_to(-1.0, 3.5)
        .line_to(-2.5, -1.0)
        .close();
    builder.add(
        "fin",
        Shape::Extrusion {
            outline: fin,
            depth: 0.15,
        },
        TAIL,
        tr(Vec3::new(0.0, 2.0, -7.0), Vec3::new(0.0, 0.0, 0.05)),
    );

    let stabilizer = OutlineBuilder::move_to(0.0, 0.0)
        .line_to(3.0, 0.2)
        .line_to(3.0, -0.2)
        .line_to(0.0, -0.3)
        .close();
    for (side, sign) in [("left", 1.0_f32), ("right", -1.0_f32)] {
        builder.add(
            format!("stabilizer-{side}"),
            Shape::Extrusion {
                outline: stabilizer.clone(),
                depth: 0.1,
            },
            TAIL,
            trs(
                Vec3::new(-1.5 * sign, 0.0, -7.5),
                Vec3::new(0.0, -0.5 * sign, 0.0),
                Vec3::new(sign, 1.0, 1.0),
            ),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ORDERED: [PropulsionType; 4] = [
        PropulsionType::Kerosene,
        PropulsionType::Saf,
        PropulsionType::Electric,
        PropulsionType::LiquidH2,
    ];

    #[test]
    fn test_profile_is_monotonic_in_morph() {
        let profiles: Vec<_> = ORDERED
            .iter()
            .map(|p| AircraftProfile::for_propulsion(*p))
            .collect();
        for pair in profiles.windows(2) {
            assert!(pair[0].fuselage_width <= pair[1].fuselage_width);
            assert!(pair[0].wing_span_scale <= pair[1].wing_span_scale);
        }
    }

    #[test]
    fn test_hydrogen_widens_fuselage_by_a_fifth() {
        let profile = AircraftProfile::for_propulsion(PropulsionType::LiquidH2);
        assert!((profile.fuselage_width - BASE_FUSELAGE_WIDTH * 1.2).abs() < 1e-6);
        let kerosene = AircraftProfile::for_propulsion(PropulsionType::Kerosene);
        assert!((kerosene.fuselage_width - BASE_FUSELAGE_WIDTH).abs() < 1e-6);
        assert!((kerosene.wing_span_scale - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_wing_outline_scales_with_span() {
        let max_x = |outline: &[Vec2]| outline.iter().map(|p| p.x).fold(f32::MIN, f32::max);
        let base = max_x(&wing_outline(1.0));
        let wide = max_x(&wing_outline(1.15));
        assert!(wide > base);
        assert!((wide / base - 1.15).abs() < 1e-4);
    }

    #[test]
    fn test_aircraft_has_windows_and_engines() {
        let mut builder = SceneBuilder::new();
        build(&mut builder, PropulsionType::Saf);
        let scene = builder.finish();

        let windows = scene
            .primitives
            .iter()
            .filter(|p| p.name.starts_with("window-"))
            .count();
        assert_eq!(windows, 2 * WINDOWS_PER_SIDE);
        assert_eq!(
            scene
                .hotspots
                .iter()
                .filter(|h| matches!(h.target, HotspotTarget::Engine { .. }))
                .count(),
            2
        );
    }
}
