//! Projection of normalized hub coordinates onto a sphere.

use std::f32::consts::TAU;

use glam::Vec3;

use crate::error::{CoordinateAxis, Result, SceneError};

/// Radius at which globe hubs sit, just above the earth sphere.
pub const HUB_RADIUS: f32 = 12.2;

/// Maps normalized `(u, v)` coordinates to points on a sphere of fixed radius.
///
/// `θ = 2πu` and `φ = acos(2v - 1)`, so uniformly distributed `(u, v)` yield
/// uniformly distributed surface points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphericalProjector {
    radius: f32,
}

impl SphericalProjector {
    /// Create a projector for a sphere of the given radius.
    pub fn new(radius: f32) -> Self {
        Self { radius }
    }

    /// The sphere radius.
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Project `(u, v)` onto the sphere surface.
    ///
    /// Both coordinates must be finite and within `[0, 1]`. Out-of-range input
    /// is rejected rather than clamped so that bad hub tables surface early.
    pub fn project(&self, u: f32, v: f32) -> Result<Vec3> {
        check_unit(CoordinateAxis::U, u)?;
        check_unit(CoordinateAxis::V, v)?;

        // 2v - 1 can leave [-1, 1] by an ulp at the bounds.
        let phi = (2.0 * v - 1.0).clamp(-1.0, 1.0).acos();
        let theta = TAU * u;

        let (sin_phi, cos_phi) = phi.sin_cos();
        let (sin_theta, cos_theta) = theta.sin_cos();

        Ok(Vec3::new(
            self.radius * sin_phi * cos_theta,
            self.radius * sin_phi * sin_theta,
            self.radius * cos_phi,
        ))
    }
}

impl Default for SphericalProjector {
    fn default() -> Self {
        Self::new(HUB_RADIUS)
    }
}

fn check_unit(axis: CoordinateAxis, value: f32) -> Result<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(SceneError::InvalidCoordinate { axis, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_poles() {
        let projector = SphericalProjector::new(2.0);
        // v = 1 gives φ = 0, the +Z pole.
        let north = projector.project(0.3, 1.0).unwrap();
        assert!((north - Vec3::new(0.0, 0.0, 2.0)).length() < 1e-5);
        // v = 0 gives φ = π, the -Z pole.
        let south = projector.project(0.7, 0.0).unwrap();
        assert!((south - Vec3::new(0.0, 0.0, -2.0)).length() < 1e-5);
    }

    #[test]
    fn test_equator() {
        let projector = SphericalProjector::new(1.0);
        let p = projector.project(0.25, 0.5).unwrap();
        assert!((p - Vec3::Y).length() < 1e-5, "{p:?}");
    }

    #[test]
    fn test_rejects_out_of_range_v() {
        let projector = SphericalProjector::default();
        assert_eq!(
            projector.project(0.5, 1.5),
            Err(SceneError::InvalidCoordinate {
                axis: CoordinateAxis::V,
                value: 1.5
            })
        );
        assert!(projector.project(0.5, -0.01).is_err());
    }

    #[test]
    fn test_rejects_out_of_range_u_and_nan() {
        let projector = SphericalProjector::default();
        assert!(matches!(
            projector.project(1.2, 0.5),
            Err(SceneError::InvalidCoordinate {
                axis: CoordinateAxis::U,
                ..
            })
        ));
        assert!(projector.project(f32::NAN, 0.5).is_err());
        assert!(projector.project(0.5, f32::NAN).is_err());
    }

    #[test]
    fn test_deterministic() {
        let projector = SphericalProjector::default();
        assert_eq!(projector.project(0.8, 0.6), projector.project(0.8, 0.6));
    }

    proptest! {
        #[test]
        fn test_projection_lies_on_sphere(u in 0.0f32..=1.0, v in 0.0f32..=1.0, r in 0.1f32..100.0) {
            let projector = SphericalProjector::new(r);
            let p = projector.project(u, v).unwrap();
            prop_assert!((p.length() - r).abs() <= r * 1e-5);
        }
    }
}
