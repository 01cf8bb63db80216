//! Renderer-independent scene description.
//!
//! Shapes follow a Y-up, right-handed convention:
//!
//! - cylinders run along Y with `radius_top` at +Y,
//! - domes are the +Y half of a sphere,
//! - tori, discs, planes and extrusion outlines lie in the XY plane facing +Z,
//!   extrusions grow from z = 0 to z = `depth`.

use glam::{Affine3A, EulerRot, Quat, Vec2, Vec3};

/// An sRGB color with 8 bits per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(0xff, 0xff, 0xff);
    pub const BLACK: Rgb = Rgb::new(0x00, 0x00, 0x00);

    /// Create a color from channel values.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Channels normalized to `[0, 1]` (still sRGB encoded).
    pub fn to_f32_array(self) -> [f32; 3] {
        [
            f32::from(self.r) / 255.0,
            f32::from(self.g) / 255.0,
            f32::from(self.b) / 255.0,
        ]
    }

    /// Lowercase `#rrggbb` notation.
    pub fn to_hex_string(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Self-illumination of a surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Emission {
    pub color: Rgb,
    pub intensity: f32,
}

/// Surface appearance of a primitive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub base_color: Rgb,
    pub metallic: f32,
    pub roughness: f32,
    pub emission: Option<Emission>,
    /// Ignore scene lighting.
    pub unlit: bool,
    /// Draw edges only.
    pub wireframe: bool,
    /// Render both faces.
    pub double_sided: bool,
}

impl Material {
    /// A lit, physically based material.
    pub const fn standard(base_color: Rgb, metallic: f32, roughness: f32) -> Self {
        Self {
            base_color,
            metallic,
            roughness,
            emission: None,
            unlit: false,
            wireframe: false,
            double_sided: false,
        }
    }

    /// A flat color that ignores lighting.
    pub const fn unlit(base_color: Rgb) -> Self {
        Self {
            base_color,
            metallic: 0.0,
            roughness: 1.0,
            emission: None,
            unlit: true,
            wireframe: false,
            double_sided: false,
        }
    }

    #[must_use]
    pub const fn with_emission(mut self, color: Rgb, intensity: f32) -> Self {
        self.emission = Some(Emission { color, intensity });
        self
    }

    #[must_use]
    pub const fn wireframe(mut self) -> Self {
        self.wireframe = true;
        self
    }

    #[must_use]
    pub const fn double_sided(mut self) -> Self {
        self.double_sided = true;
        self
    }
}

/// Geometry of a single primitive, in its local frame.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// Tapered cylinder along Y.
    Cylinder {
        radius_top: f32,
        radius_bottom: f32,
        height: f32,
    },
    Sphere {
        radius: f32,
    },
    /// Upper (+Y) hemisphere.
    Dome {
        radius: f32,
    },
    Cuboid {
        size: Vec3,
    },
    /// Ring around the Z axis.
    Torus {
        major_radius: f32,
        minor_radius: f32,
    },
    /// Filled circle in the XY plane.
    Disc {
        radius: f32,
    },
    /// Rectangle in the XY plane.
    Plane {
        width: f32,
        height: f32,
    },
    /// Closed outline in the XY plane swept along +Z.
    Extrusion {
        outline: Vec<Vec2>,
        depth: f32,
    },
    /// Unconnected points, drawn as-is.
    Points {
        positions: Vec<Vec3>,
    },
}

/// A positioned, colored shape.
#[derive(Debug, Clone, PartialEq)]
pub struct Primitive {
    pub name: String,
    pub shape: Shape,
    pub material: Material,
    /// Local-to-world transform, already composed with every parent group.
    pub transform: Affine3A,
    /// The interactive entity this primitive belongs to, if any.
    pub owner: Option<HotspotTarget>,
}

/// Something a pointer can hover or click.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum HotspotTarget {
    /// The aircraft body. Clicking it navigates to the aircraft view.
    Aircraft,
    /// An engine. Clicking it raises an inspect request for `label`.
    Engine { label: String },
    /// A marker or hub, addressed by its catalog id.
    Marker { id: String },
}

/// A world-space picking volume.
#[derive(Debug, Clone, PartialEq)]
pub struct Hotspot {
    pub target: HotspotTarget,
    pub center: Vec3,
    pub radius: f32,
}

/// Everything a renderer needs to draw one view.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SceneDescription {
    pub primitives: Vec<Primitive>,
    pub hotspots: Vec<Hotspot>,
}

impl SceneDescription {
    /// Find the first primitive with the given name.
    pub fn primitive(&self, name: &str) -> Option<&Primitive> {
        self.primitives.iter().find(|p| p.name == name)
    }

    /// Find the hotspot for `target`.
    pub fn hotspot(&self, target: &HotspotTarget) -> Option<&Hotspot> {
        self.hotspots.iter().find(|h| &h.target == target)
    }

    /// Centre of the largest hotspot for `target`, used as the pivot when
    /// emphasizing it.
    pub fn pivot(&self, target: &HotspotTarget) -> Option<Vec3> {
        self.hotspots
            .iter()
            .filter(|h| &h.target == target)
            .max_by(|a, b| a.radius.total_cmp(&b.radius))
            .map(|h| h.center)
    }
}

/// Transform from translation, XYZ Euler angles and scale.
pub fn trs(translation: Vec3, euler_xyz: Vec3, scale: Vec3) -> Affine3A {
    let rotation = Quat::from_euler(EulerRot::XYZ, euler_xyz.x, euler_xyz.y, euler_xyz.z);
    Affine3A::from_scale_rotation_translation(scale, rotation, translation)
}

/// Transform from translation and XYZ Euler angles.
pub fn tr(translation: Vec3, euler_xyz: Vec3) -> Affine3A {
    trs(translation, euler_xyz, Vec3::ONE)
}

/// Transform from translation only.
pub fn at(translation: Vec3) -> Affine3A {
    Affine3A::from_translation(translation)
}

/// Accumulates primitives and hotspots under a stack of group transforms.
pub(crate) struct SceneBuilder {
    scene: SceneDescription,
    stack: Vec<Affine3A>,
    owner: Option<HotspotTarget>,
}

impl SceneBuilder {
    pub(crate) fn new() -> Self {
        Self {
            scene: SceneDescription::default(),
            stack: vec![Affine3A::IDENTITY],
            owner: None,
        }
    }

    fn current(&self) -> Affine3A {
        self.stack.last().copied().unwrap_or(Affine3A::IDENTITY)
    }

    /// Run `f` with `local` composed onto the current group transform.
    pub(crate) fn group(&mut self, local: Affine3A, f: impl FnOnce(&mut Self)) {
        let world = self.current() * local;
        self.stack.push(world);
        f(self);
        self.stack.pop();
    }

    /// Run `f` with every added primitive attributed to `owner`.
    pub(crate) fn owned(&mut self, owner: HotspotTarget, f: impl FnOnce(&mut Self)) {
        let previous = self.owner.replace(owner);
        f(self);
        self.owner = previous;
    }

    /// Add a primitive with a transform relative to the current group.
    pub(crate) fn add(
        &mut self,
        name: impl Into<String>,
        shape: Shape,
        material: Material,
        local: Affine3A,
    ) {
        let transform = self.current() * local;
        self.scene.primitives.push(Primitive {
            name: name.into(),
            shape,
            material,
            transform,
            owner: self.owner.clone(),
        });
    }

    /// Add a picking sphere relative to the current group.
    pub(crate) fn hotspot(&mut self, target: HotspotTarget, center: Vec3, radius: f32) {
        let current = self.current();
        let scale = current
            .matrix3
            .x_axis
            .length()
            .max(current.matrix3.y_axis.length())
            .max(current.matrix3.z_axis.length());
        self.scene.hotspots.push(Hotspot {
            target,
            center: current.transform_point3(center),
            radius: radius * scale,
        });
    }

    pub(crate) fn finish(self) -> SceneDescription {
        self.scene
    }
}

/// Builds a closed 2D outline from line and quadratic curve segments.
#[derive(Debug, Clone, Default)]
pub(crate) struct OutlineBuilder {
    points: Vec<Vec2>,
}

/// Samples per quadratic curve segment.
pub(crate) const CURVE_SEGMENTS: u32 = 12;

impl OutlineBuilder {
    pub(crate) fn move_to(x: f32, y: f32) -> Self {
        Self {
            points: vec![Vec2::new(x, y)],
        }
    }

    #[must_use]
    pub(crate) fn line_to(mut self, x: f32, y: f32) -> Self {
        self.points.push(Vec2::new(x, y));
        self
    }

    #[must_use]
    pub(crate) fn quad_to(mut self, cx: f32, cy: f32, x: f32, y: f32) -> Self {
        let start = self.points.last().copied().unwrap_or(Vec2::ZERO);
        let control = Vec2::new(cx, cy);
        let end = Vec2::new(x, y);
        for i in 1..=CURVE_SEGMENTS {
            #[allow(clippy::cast_precision_loss)]
            let t = i as f32 / CURVE_SEGMENTS as f32;
            let a = start.lerp(control, t);
            let b = control.lerp(end, t);
            self.points.push(a.lerp(b, t));
        }
        self
    }

    /// Close the outline, dropping a trailing point equal to the first.
    pub(crate) fn close(mut self) -> Vec<Vec2> {
        if self.points.len() > 1 && self.points.first() == self.points.last() {
            self.points.pop();
        }
        self.points
    }
}
