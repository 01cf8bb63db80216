//! Deterministic ray picking against hotspot spheres.

use glam::Vec3;

use crate::geometry::{Hotspot, HotspotTarget};

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub dir: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, dir: Vec3) -> Self {
        Self { origin, dir }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PickHit {
    pub target: HotspotTarget,
    /// Index of the hit hotspot in the scanned slice.
    pub index: usize,
    pub distance: f32,
    pub point: Vec3,
}

/// Find the closest hotspot along `ray`.
///
/// Ordering contract:
/// - The smallest entry distance along the normalized ray wins.
/// - Equal distances go to the lower hotspot index.
/// - A ray starting inside a sphere hits it at distance zero.
pub fn pick_ray(hotspots: &[Hotspot], ray: Ray) -> Option<PickHit> {
    let dir = ray.dir.try_normalize()?;

    let mut best: Option<(f32, usize)> = None;
    for (index, hotspot) in hotspots.iter().enumerate() {
        let Some(t) = ray_sphere_hit_t(ray.origin, dir, hotspot.center, hotspot.radius) else {
            continue;
        };
        best = match best {
            Some((bt, bi)) if bt.total_cmp(&t).then(bi.cmp(&index)).is_le() => Some((bt, bi)),
            _ => Some((t, index)),
        };
    }

    let (distance, index) = best?;
    Some(PickHit {
        target: hotspots[index].target.clone(),
        index,
        distance,
        point: ray.origin + dir * distance,
    })
}

/// Entry distance of a unit-direction ray into a sphere.
fn ray_sphere_hit_t(origin: Vec3, dir: Vec3, center: Vec3, radius: f32) -> Option<f32> {
    let to_origin = origin - center;
    let b = to_origin.dot(dir);
    let c = to_origin.length_squared() - radius * radius;
    if c <= 0.0 {
        return Some(0.0);
    }
    // Outside and pointing away.
    if b > 0.0 {
        return None;
    }
    let discriminant = b * b - c;
    if discriminant < 0.0 {
        return None;
    }
    Some(-b - discriminant.sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sphere(id: &str, center: Vec3, radius: f32) -> Hotspot {
        Hotspot {
            target: HotspotTarget::Marker { id: id.to_owned() },
            center,
            radius,
        }
    }

    #[test]
    fn test_closest_hit_wins() {
        let hotspots = [
            sphere("far", Vec3::new(0.0, 0.0, -10.0), 1.0),
            sphere("near", Vec3::new(0.0, 0.0, -5.0), 1.0),
        ];
        let hit = pick_ray(&hotspots, Ray::new(Vec3::ZERO, Vec3::NEG_Z)).unwrap();
        assert_eq!(hit.index, 1);
        assert!((hit.distance - 4.0).abs() < 1e-5);
        assert!(hit.point.distance(Vec3::new(0.0, 0.0, -4.0)) < 1e-5);
    }

    #[test]
    fn test_ties_go_to_lower_index() {
        let hotspots = [
            sphere("a", Vec3::new(0.0, 0.0, -5.0), 1.0),
            sphere("b", Vec3::new(0.0, 0.0, -5.0), 1.0),
        ];
        let hit = pick_ray(&hotspots, Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -3.0))).unwrap();
        assert_eq!(hit.index, 0);
    }

    #[test]
    fn test_misses() {
        let hotspots = [sphere("a", Vec3::new(0.0, 5.0, -5.0), 1.0)];
        assert!(pick_ray(&hotspots, Ray::new(Vec3::ZERO, Vec3::NEG_Z)).is_none());
        assert!(pick_ray(&hotspots, Ray::new(Vec3::ZERO, Vec3::ZERO)).is_none());
        // Behind the ray origin.
        let behind = [sphere("b", Vec3::new(0.0, 0.0, 5.0), 1.0)];
        assert!(pick_ray(&behind, Ray::new(Vec3::ZERO, Vec3::NEG_Z)).is_none());
    }

    #[test]
    fn test_origin_inside_sphere() {
        let hotspots = [sphere("a", Vec3::ZERO, 2.0)];
        let hit = pick_ray(&hotspots, Ray::new(Vec3::X, Vec3::X)).unwrap();
        assert!(hit.distance.abs() < f32::EPSILON);
    }
}
