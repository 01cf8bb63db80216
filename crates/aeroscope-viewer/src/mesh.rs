//! Conversion of scene shapes to Bevy meshes.
//!
//! Shapes arrive in the scene crate's conventions (cylinders along Y, flat
//! shapes in the XY plane facing +Z), which match Bevy's for most primitives.
//! Tori are rotated into the XY plane; domes, planes, extrusions, point
//! clouds and wireframe spheres are built by hand.

use std::f32::consts::{FRAC_PI_2, PI, TAU};

use aeroscope_scene::Shape;
use bevy::asset::RenderAssetUsages;
use bevy::mesh::{Indices, PrimitiveTopology};
use bevy::prelude::*;
use earcutr::earcut;

/// Radial segments for round shapes.
const SEGMENTS: u32 = 32;
/// Latitude and longitude lines of wireframe spheres.
const WIRE_RINGS: u32 = 16;
const WIRE_MERIDIANS: u32 = 32;

/// Build the mesh for `shape`. Wireframe spheres become line lists.
pub fn shape_mesh(shape: &Shape, wireframe: bool) -> Mesh {
    match shape {
        Shape::Cylinder {
            radius_top,
            radius_bottom,
            height,
        } => ConicalFrustum {
            radius_top: *radius_top,
            radius_bottom: *radius_bottom,
            height: *height,
        }
        .mesh()
        .resolution(SEGMENTS)
        .build(),
        Shape::Sphere { radius } if wireframe => sphere_wireframe(*radius, WIRE_RINGS, WIRE_MERIDIANS),
        Shape::Sphere { radius } => Sphere::new(*radius).mesh().uv(SEGMENTS, SEGMENTS / 2),
        Shape::Dome { radius } => dome(*radius, SEGMENTS, SEGMENTS / 4),
        Shape::Cuboid { size } => Cuboid::from_size(*size).into(),
        Shape::Torus {
            major_radius,
            minor_radius,
        } => Mesh::from(Torus {
            minor_radius: *minor_radius,
            major_radius: *major_radius,
        })
        .rotated_by(Quat::from_rotation_x(FRAC_PI_2)),
        Shape::Disc { radius } => Circle::new(*radius).mesh().resolution(SEGMENTS).build(),
        Shape::Plane { width, height } => plane(*width, *height),
        Shape::Extrusion { outline, depth } => extrusion(outline, *depth),
        Shape::Points { positions } => points(positions),
    }
}

fn triangle_mesh(
    positions: Vec<[f32; 3]>,
    normals: Vec<[f32; 3]>,
    uvs: Vec<[f32; 2]>,
    indices: Vec<u32>,
) -> Mesh {
    let mut mesh = Mesh::new(
        PrimitiveTopology::TriangleList,
        RenderAssetUsages::default(),
    );
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, positions);
    mesh.insert_attribute(Mesh::ATTRIBUTE_NORMAL, normals);
    mesh.insert_attribute(Mesh::ATTRIBUTE_UV_0, uvs);
    mesh.insert_indices(Indices::U32(indices));
    mesh
}

/// Rectangle in the XY plane facing +Z.
pub fn plane(width: f32, height: f32) -> Mesh {
    let (x, y) = (width / 2.0, height / 2.0);
    triangle_mesh(
        vec![[-x, -y, 0.0], [x, -y, 0.0], [x, y, 0.0], [-x, y, 0.0]],
        vec![[0.0, 0.0, 1.0]; 4],
        vec![[0.0, 1.0], [1.0, 1.0], [1.0, 0.0], [0.0, 0.0]],
        vec![0, 1, 2, 0, 2, 3],
    )
}

/// Upper (+Y) hemisphere, open at the equator.
pub fn dome(radius: f32, segments: u32, rings: u32) -> Mesh {
    let mut positions = Vec::new();
    let mut normals = Vec::new();
    let mut uvs = Vec::new();

    for ring in 0..=rings {
        #[allow(clippy::cast_precision_loss)]
        let v = ring as f32 / rings as f32;
        // Polar angle from +Y down to the equator.
        let phi = v * FRAC_PI_2;
        for segment in 0..=segments {
            #[allow(clippy::cast_precision_loss)]
            let u = segment as f32 / segments as f32;
            let theta = u * TAU;
            let normal = Vec3::new(-theta.cos() * phi.sin(), phi.cos(), theta.sin() * phi.sin());
            positions.push((normal * radius).to_array());
            normals.push(normal.to_array());
            uvs.push([u, v]);
        }
    }

    let stride = segments + 1;
    let mut indices = Vec::new();
    for ring in 0..rings {
        for segment in 0..segments {
            let a = ring * stride + segment;
            let b = a + stride;
            indices.extend([a, b, a + 1, b, b + 1, a + 1]);
        }
    }
    triangle_mesh(positions, normals, uvs, indices)
}

/// Sweep a closed XY outline from z = 0 to z = `depth`.
pub fn extrusion(outline: &[Vec2], depth: f32) -> Mesh {
    let mut positions = Vec::new();
    let mut normals = Vec::new();
    let mut uvs = Vec::new();
    let mut indices = Vec::new();

    let ccw = signed_area(outline) >= 0.0;
    let triangles = triangulate(outline);

    // Caps: front faces +Z, back faces -Z.
    for (z, normal, front) in [(depth, 1.0, true), (0.0, -1.0, false)] {
        let base = u32::try_from(positions.len()).unwrap_or(u32::MAX);
        for point in outline {
            positions.push([point.x, point.y, z]);
            normals.push([0.0, 0.0, normal]);
            uvs.push([point.x, point.y]);
        }
        for [a, b, c] in &triangles {
            let (a, b, c) = (base + a, base + b, base + c);
            // Triangulation winds counter-clockwise.
            if front {
                indices.extend([a, b, c]);
            } else {
                indices.extend([a, c, b]);
            }
        }
    }

    // Walls with flat normals.
    let n = outline.len();
    for i in 0..n {
        let p = outline[i];
        let q = outline[(i + 1) % n];
        let edge = q - p;
        if edge.length_squared() == 0.0 {
            continue;
        }
        // Outward for counter-clockwise outlines.
        let mut normal = Vec3::new(edge.y, -edge.x, 0.0).normalize();
        if !ccw {
            normal = -normal;
        }
        let base = u32::try_from(positions.len()).unwrap_or(u32::MAX);
        for (point, z) in [(p, 0.0), (q, 0.0), (q, depth), (p, depth)] {
            positions.push([point.x, point.y, z]);
            normals.push(normal.to_array());
            uvs.push([point.x, z]);
        }
        if ccw {
            indices.extend([base, base + 1, base + 2, base, base + 2, base + 3]);
        } else {
            indices.extend([base, base + 2, base + 1, base, base + 3, base + 2]);
        }
    }

    triangle_mesh(positions, normals, uvs, indices)
}

fn signed_area(outline: &[Vec2]) -> f32 {
    let n = outline.len();
    (0..n)
        .map(|i| outline[i].perp_dot(outline[(i + 1) % n]))
        .sum::<f32>()
        / 2.0
}

/// Triangulate a simple polygon with earcut.
///
/// Triangles are returned counter-clockwise regardless of input winding.
/// Outlines earcut rejects yield no triangles.
pub fn triangulate(outline: &[Vec2]) -> Vec<[u32; 3]> {
    let coords: Vec<f64> = outline
        .iter()
        .flat_map(|p| [f64::from(p.x), f64::from(p.y)])
        .collect();
    let indices = match earcut(&coords, &[], 2) {
        Ok(indices) => indices,
        Err(e) => {
            tracing::warn!(points = outline.len(), "failed to triangulate outline: {e:?}");
            return Vec::new();
        }
    };

    indices
        .chunks_exact(3)
        .filter_map(|tri| {
            let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| u32::try_from(i).ok());
            let (a, b, c) = (a?, b?, c?);
            let (pa, pb, pc) = (outline[tri[0]], outline[tri[1]], outline[tri[2]]);
            // Wind every triangle counter-clockwise.
            if (pb - pa).perp_dot(pc - pa) < 0.0 {
                Some([a, c, b])
            } else {
                Some([a, b, c])
            }
        })
        .collect()
}

/// Unconnected points.
pub fn points(positions: &[Vec3]) -> Mesh {
    let mut mesh = Mesh::new(PrimitiveTopology::PointList, RenderAssetUsages::default());
    let positions: Vec<[f32; 3]> = positions.iter().map(|p| p.to_array()).collect();
    let normals = vec![[0.0, 1.0, 0.0]; positions.len()];
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, positions);
    mesh.insert_attribute(Mesh::ATTRIBUTE_NORMAL, normals);
    mesh
}

/// Latitude and longitude lines of a sphere.
pub fn sphere_wireframe(radius: f32, rings: u32, meridians: u32) -> Mesh {
    let point = |ring: u32, meridian: u32| {
        #[allow(clippy::cast_precision_loss)]
        let phi = ring as f32 / rings as f32 * PI;
        #[allow(clippy::cast_precision_loss)]
        let theta = meridian as f32 / meridians as f32 * TAU;
        Vec3::new(phi.sin() * theta.cos(), phi.cos(), phi.sin() * theta.sin())
    };

    let mut positions = Vec::new();
    let mut normals = Vec::new();
    let mut push = |a: Vec3, b: Vec3| {
        for p in [a, b] {
            positions.push((p * radius).to_array());
            normals.push(p.to_array());
        }
    };
    for ring in 1..rings {
        for meridian in 0..meridians {
            push(point(ring, meridian), point(ring, meridian + 1));
        }
    }
    for meridian in 0..meridians {
        for ring in 0..rings {
            push(point(ring, meridian), point(ring + 1, meridian));
        }
    }

    let mut mesh = Mesh::new(PrimitiveTopology::LineList, RenderAssetUsages::default());
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, positions);
    mesh.insert_attribute(Mesh::ATTRIBUTE_NORMAL, normals);
    mesh
}
