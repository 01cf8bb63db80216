//! Per-frame camera motion.
//!
//! Each view mode has a static camera target and a cinema target that moves
//! with time. Every frame the camera position is moved a fixed fraction of the
//! way towards the target (first-order smoothing, no velocity state), then
//! oriented towards the world origin.
//!
//! | Mode     | Static target | Cinema target                      |
//! |----------|---------------|------------------------------------|
//! | Aircraft | (10, 5, 10)   | (15 sin 0.2t, 5, 15 cos 0.2t)      |
//! | Airport  | (0, 40, 40)   | (20, 40, 40)                       |
//! | Global   | (0, 0, 35)    | (35 sin 0.1t, 10, 35 cos 0.1t)     |

use glam::{Mat4, Quat, Vec3};

use crate::mode::ViewMode;

/// Default fraction of the remaining distance covered each frame.
pub const DEFAULT_SMOOTHING: f32 = 0.05;

/// Camera position before the first frame.
pub const INITIAL_CAMERA_POSITION: Vec3 = Vec3::new(20.0, 10.0, 20.0);

/// Tunables for the camera animator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraAnimatorSettings {
    /// Interpolation factor applied once per frame, in `(0, 1]`.
    pub smoothing: f32,
}

impl Default for CameraAnimatorSettings {
    fn default() -> Self {
        Self {
            smoothing: DEFAULT_SMOOTHING,
        }
    }
}

/// Camera pose produced by one animator step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraState {
    /// Camera position in world space.
    pub position: Vec3,
    /// Point the camera looks at. Always the world origin.
    pub look_at: Vec3,
}

impl CameraState {
    /// Rotation that points the camera's -Z axis at `look_at` with +Y up.
    ///
    /// Falls back to identity when the camera sits on the look-at point.
    pub fn rotation(&self) -> Quat {
        let forward = self.look_at - self.position;
        if forward.length_squared() < 1e-12 {
            return Quat::IDENTITY;
        }
        let up = if forward.normalize().cross(Vec3::Y).length_squared() < 1e-8 {
            Vec3::Z
        } else {
            Vec3::Y
        };
        let view = Mat4::look_at_rh(self.position, self.look_at, up);
        Quat::from_mat4(&view.inverse())
    }
}

/// Target camera position for `mode` at `elapsed` seconds.
pub fn camera_target(mode: ViewMode, cinema: bool, elapsed: f32) -> Vec3 {
    match (mode, cinema) {
        (ViewMode::Aircraft, false) => Vec3::new(10.0, 5.0, 10.0),
        (ViewMode::Aircraft, true) => {
            let t = elapsed * 0.2;
            Vec3::new(t.sin() * 15.0, 5.0, t.cos() * 15.0)
        }
        (ViewMode::Airport, false) => Vec3::new(0.0, 40.0, 40.0),
        (ViewMode::Airport, true) => Vec3::new(20.0, 40.0, 40.0),
        (ViewMode::Global, false) => Vec3::new(0.0, 0.0, 35.0),
        (ViewMode::Global, true) => {
            let t = elapsed * 0.1;
            Vec3::new(t.sin() * 35.0, 10.0, t.cos() * 35.0)
        }
    }
}

/// Owns the camera position and advances it once per frame.
#[derive(Debug, Clone)]
pub struct CameraAnimator {
    position: Vec3,
    settings: CameraAnimatorSettings,
}

impl Default for CameraAnimator {
    fn default() -> Self {
        Self::new(INITIAL_CAMERA_POSITION, CameraAnimatorSettings::default())
    }
}

impl CameraAnimator {
    /// Create an animator starting at `position`.
    pub fn new(position: Vec3, settings: CameraAnimatorSettings) -> Self {
        Self { position, settings }
    }

    /// Current camera position.
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Current settings.
    pub fn settings(&self) -> CameraAnimatorSettings {
        self.settings
    }

    /// Advance one frame towards the target for `mode`.
    ///
    /// `elapsed` is the absolute scene time in seconds, supplied by the caller.
    pub fn tick(&mut self, mode: ViewMode, cinema: bool, elapsed: f32) -> CameraState {
        let target = camera_target(mode, cinema, elapsed);
        self.step_towards(target)
    }

    /// Advance one frame towards an explicit target.
    pub fn step_towards(&mut self, target: Vec3) -> CameraState {
        self.position = self.position.lerp(target, self.settings.smoothing);
        self.state()
    }

    /// The pose for the current position, without advancing.
    pub fn state(&self) -> CameraState {
        CameraState {
            position: self.position,
            look_at: Vec3::ZERO,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_targets() {
        assert_eq!(
            camera_target(ViewMode::Aircraft, false, 123.0),
            Vec3::new(10.0, 5.0, 10.0)
        );
        assert_eq!(
            camera_target(ViewMode::Airport, false, 0.0),
            Vec3::new(0.0, 40.0, 40.0)
        );
        assert_eq!(
            camera_target(ViewMode::Global, false, 9.0),
            Vec3::new(0.0, 0.0, 35.0)
        );
    }

    #[test]
    fn test_cinema_targets() {
        assert_eq!(
            camera_target(ViewMode::Airport, true, 42.0),
            Vec3::new(20.0, 40.0, 40.0)
        );
        let t = 10.0_f32;
        let aircraft = camera_target(ViewMode::Aircraft, true, t);
        assert!((aircraft.x - (0.2 * t).sin() * 15.0).abs() < 1e-5);
        assert!((aircraft.z - (0.2 * t).cos() * 15.0).abs() < 1e-5);
        assert!((aircraft.y - 5.0).abs() < f32::EPSILON);
        // The orbit keeps a constant horizontal radius.
        let global = camera_target(ViewMode::Global, true, 3.7);
        assert!((Vec3::new(global.x, 0.0, global.z).length() - 35.0).abs() < 1e-4);
    }

    #[test]
    fn test_convergence_bound() {
        let start = Vec3::new(-100.0, 250.0, 3.0);
        let mut animator = CameraAnimator::new(start, CameraAnimatorSettings::default());
        let target = camera_target(ViewMode::Global, false, 0.0);
        let initial = start.distance(target);

        for n in 1..=200 {
            animator.tick(ViewMode::Global, false, n as f32 / 60.0);
            let residual = animator.position().distance(target);
            let bound = 0.95_f32.powi(n) * initial;
            assert!(
                residual <= bound * (1.0 + 1e-4) + 1e-4,
                "frame {n}: residual {residual} > bound {bound}"
            );
        }
    }

    #[test]
    fn test_no_overshoot() {
        let mut animator = CameraAnimator::default();
        let target = camera_target(ViewMode::Airport, false, 0.0);
        let mut previous = animator.position().distance(target);
        for _ in 0..100 {
            animator.tick(ViewMode::Airport, false, 0.0);
            let distance = animator.position().distance(target);
            assert!(distance <= previous);
            previous = distance;
        }
    }

    #[test]
    fn test_state_looks_at_origin() {
        let mut animator = CameraAnimator::default();
        let state = animator.tick(ViewMode::Aircraft, false, 0.0);
        assert_eq!(state.look_at, Vec3::ZERO);
        let forward = state.rotation() * Vec3::NEG_Z;
        let expected = (-state.position).normalize();
        assert!(forward.distance(expected) < 1e-4, "{forward:?} vs {expected:?}");
    }

    #[test]
    fn test_rotation_degenerate_cases() {
        let at_origin = CameraState {
            position: Vec3::ZERO,
            look_at: Vec3::ZERO,
        };
        assert_eq!(at_origin.rotation(), Quat::IDENTITY);

        let overhead = CameraState {
            position: Vec3::new(0.0, 10.0, 0.0),
            look_at: Vec3::ZERO,
        };
        let forward = overhead.rotation() * Vec3::NEG_Z;
        assert!(forward.distance(Vec3::NEG_Y) < 1e-4);
    }
}
