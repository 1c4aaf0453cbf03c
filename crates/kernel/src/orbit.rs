//! Planet rotation under the plane.
//!
//! The plane never leaves the top of the planet; the planet turns beneath it
//! instead. Each step pre-multiplies a small rotation onto the accumulated
//! orientation. The orientation is kept as a quaternion and pulled back to
//! unit length whenever rounding moves its norm out of tolerance, so long
//! sessions do not shear the planet.

use crate::config::OrbitConfig;
use glam::{Mat4, Quat, Vec3};
use tracing::trace;

/// Allowed drift of the squared quaternion norm before renormalizing.
const RENORMALIZE_TOLERANCE: f32 = 1e-5;

#[derive(Debug, Clone, PartialEq)]
pub struct PlanetState {
    orientation: Quat,
    base_transform: Mat4,
    world_transform: Mat4,
}

impl Default for PlanetState {
    fn default() -> Self {
        Self::new(Mat4::IDENTITY)
    }
}

impl PlanetState {
    /// A planet at rest with the given model transform.
    pub fn new(base_transform: Mat4) -> Self {
        Self {
            orientation: Quat::IDENTITY,
            base_transform,
            world_transform: base_transform,
        }
    }

    pub fn orientation(&self) -> Quat {
        self.orientation
    }

    pub fn orientation_matrix(&self) -> Mat4 {
        Mat4::from_quat(self.orientation)
    }

    pub fn world_transform(&self) -> Mat4 {
        self.world_transform
    }
}

/// Turns a [`PlanetState`] according to plane heading and speed.
#[derive(Debug, Clone)]
pub struct OrbitalRotator {
    config: OrbitConfig,
}

impl OrbitalRotator {
    pub fn new(config: OrbitConfig) -> Self {
        Self { config }
    }

    /// Rotate the planet about `axis` by `dt * plane_speed / speed_divisor`.
    pub fn rotate(&self, planet: &mut PlanetState, axis: Vec3, plane_speed: f32, dt: f32) {
        let angle = dt * plane_speed / self.config.speed_divisor;
        if angle == 0.0 {
            return;
        }
        let Some(axis) = axis.try_normalize() else {
            return;
        };

        let incremental = Quat::from_axis_angle(axis, angle);
        let mut orientation = incremental * planet.orientation;
        if (orientation.length_squared() - 1.0).abs() > RENORMALIZE_TOLERANCE {
            trace!(norm = orientation.length(), "renormalizing planet orientation");
            orientation = orientation.normalize();
        }
        planet.orientation = orientation;
        planet.world_transform = Mat4::from_quat(orientation) * planet.base_transform;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    fn rotator() -> OrbitalRotator {
        OrbitalRotator::new(OrbitConfig::default())
    }

    #[test]
    fn starts_at_identity() {
        let p = PlanetState::default();
        assert_eq!(p.orientation_matrix(), Mat4::IDENTITY);
        assert_eq!(p.world_transform(), Mat4::IDENTITY);
    }

    #[test]
    fn zero_dt_is_exact_noop() {
        let r = rotator();
        let mut p = PlanetState::default();
        for _ in 0..10 {
            r.rotate(&mut p, Vec3::new(-1.0, 0.0, 0.3), 42.0, 0.016);
        }
        let before = p.clone();
        r.rotate(&mut p, Vec3::NEG_X, 42.0, 0.0);
        assert_eq!(p, before);
    }

    #[test]
    fn angle_scales_with_speed() {
        let r = rotator();
        let mut p = PlanetState::default();
        // 50 units/s for 1 s at divisor 100 is half a radian.
        r.rotate(&mut p, Vec3::NEG_X, 50.0, 1.0);
        let (axis, angle) = p.orientation().to_axis_angle();
        assert!((angle - 0.5).abs() < 1e-5);
        assert!(axis.abs_diff_eq(Vec3::NEG_X, 1e-5));
    }

    #[test]
    fn increments_compose_by_premultiplication() {
        let r = rotator();
        let mut p = PlanetState::default();
        r.rotate(&mut p, Vec3::X, 100.0, FRAC_PI_2);
        r.rotate(&mut p, Vec3::Y, 100.0, FRAC_PI_2);
        let expected = Mat4::from_rotation_y(FRAC_PI_2) * Mat4::from_rotation_x(FRAC_PI_2);
        assert!(p.orientation_matrix().abs_diff_eq(expected, 1e-5));
        assert!(p.world_transform().abs_diff_eq(expected, 1e-5));
    }

    #[test]
    fn world_transform_keeps_base() {
        let r = rotator();
        let base = Mat4::from_translation(Vec3::new(0.0, -5.0, 0.0));
        let mut p = PlanetState::new(base);
        r.rotate(&mut p, Vec3::Z, 100.0, 0.3);
        let expected = Mat4::from_rotation_z(0.3) * base;
        assert!(p.world_transform().abs_diff_eq(expected, 1e-5));
    }

    #[test]
    fn long_runs_stay_unit_length() {
        let r = rotator();
        let mut p = PlanetState::default();
        for i in 0..200_000 {
            let axis = Vec3::new((i as f32 * 0.01).cos(), 0.0, (i as f32 * 0.01).sin());
            r.rotate(&mut p, axis, 60.0, 0.016);
        }
        assert!((p.orientation().length() - 1.0).abs() < 1e-4);
        let m = p.orientation_matrix();
        let x = m.x_axis.truncate();
        let y = m.y_axis.truncate();
        assert!(x.dot(y).abs() < 1e-4);
    }

    #[test]
    fn degenerate_axis_is_ignored() {
        let r = rotator();
        let mut p = PlanetState::default();
        r.rotate(&mut p, Vec3::ZERO, 42.0, 0.016);
        assert_eq!(p, PlanetState::default());
    }
}
