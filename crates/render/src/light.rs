use flagflight_common::PlanePart;
use glam::{Mat4, Vec3};

/// Part carrying each plane light, same order as [`PLANE_LIGHT_DIRECTIONS`].
pub const PLANE_LIGHT_PARTS: [PlanePart; 6] = [
    PlanePart::LightLeftWing,
    PlanePart::StrobeLeftWing,
    PlanePart::LightRightWing,
    PlanePart::StrobeRightWing,
    PlanePart::LightRudder,
    PlanePart::StrobeRudder,
];

/// Directions of the six plane lights, in plane space: left wing red and
/// strobe, right wing green and strobe, rudder white, rudder red strobe.
pub const PLANE_LIGHT_DIRECTIONS: [Vec3; 6] = [
    Vec3::new(1.0, 0.0, 0.0),
    Vec3::new(1.0, 0.0, 0.0),
    Vec3::new(-1.0, 0.0, 0.0),
    Vec3::new(-1.0, 0.0, 0.0),
    Vec3::new(0.0, 0.0, 1.0),
    Vec3::new(0.0, 1.0, 0.0),
];

/// Positions of the six plane lights, in plane space, same order as
/// [`PLANE_LIGHT_DIRECTIONS`].
pub const PLANE_LIGHT_POSITIONS: [Vec3; 6] = [
    Vec3::new(6.270, 0.925, 0.371),
    Vec3::new(6.280, 0.924, 0.291),
    Vec3::new(-6.270, 0.925, 0.371),
    Vec3::new(-6.280, 0.924, 0.291),
    Vec3::new(0.0, 1.993, -6.332),
    Vec3::new(0.0, 2.1, -5.703),
];

/// One plane light placed in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaneLight {
    pub part: PlanePart,
    pub position: Vec3,
    pub direction: Vec3,
    pub on: bool,
}

impl PlaneLight {
    /// Place all six lights with the plane body transform. `is_on` reports
    /// whether a light part currently emits.
    pub fn place(body: Mat4, is_on: impl Fn(PlanePart) -> bool) -> [PlaneLight; 6] {
        std::array::from_fn(|i| PlaneLight {
            part: PLANE_LIGHT_PARTS[i],
            position: body.transform_point3(PLANE_LIGHT_POSITIONS[i]),
            direction: body.transform_vector3(PLANE_LIGHT_DIRECTIONS[i]).normalize_or_zero(),
            on: is_on(PLANE_LIGHT_PARTS[i]),
        })
    }
}

/// The scene's single directional-ish light with Phong coefficients.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneLight {
    pub position: Vec3,
    pub color: Vec3,
    pub global_ambient_color: Vec3,
    /// Ambient coefficient in `[0, 1]`.
    pub ka: f32,
    /// Diffuse coefficient in `[0, 1]`.
    pub kd: f32,
    /// Specular coefficient in `[0, 1]`.
    pub ks: f32,
}

impl SceneLight {
    /// High warm sun.
    pub fn day() -> Self {
        Self {
            position: Vec3::new(0.0, 500.0, 0.0),
            color: Vec3::new(1.0, 0.9, 0.8),
            global_ambient_color: Vec3::new(182.0 / 255.0, 0.5, 0.6),
            ka: 0.5,
            kd: 0.9,
            ks: 0.6,
        }
    }

    /// Low orange light: a flatter angle leaves the planet mostly dark.
    pub fn night() -> Self {
        Self {
            position: Vec3::new(100.0, 100.0, 0.0),
            color: Vec3::new(0.9, 0.5, 0.2),
            global_ambient_color: Vec3::new(0.3, 0.9, 0.6),
            ka: 0.1,
            kd: 0.3,
            ks: 0.2,
        }
    }

    pub fn for_daylight(is_day: bool) -> Self {
        if is_day { Self::day() } else { Self::night() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn night_is_dimmer_than_day() {
        let day = SceneLight::day();
        let night = SceneLight::night();
        assert!(night.ka < day.ka);
        assert!(night.kd < day.kd);
        assert!(night.ks < day.ks);
        assert!(night.position.y < day.position.y);
    }

    #[test]
    fn selects_by_daylight() {
        assert_eq!(SceneLight::for_daylight(true), SceneLight::day());
        assert_eq!(SceneLight::for_daylight(false), SceneLight::night());
    }

    #[test]
    fn lights_follow_the_body() {
        let body = Mat4::from_translation(Vec3::new(0.0, 52.0, 0.0));
        let lights = PlaneLight::place(body, |p| p == PlanePart::LightRudder);
        assert_eq!(lights[4].part, PlanePart::LightRudder);
        assert!(lights[4].on);
        assert!(!lights[0].on);
        assert!(
            lights[0]
                .position
                .abs_diff_eq(PLANE_LIGHT_POSITIONS[0] + Vec3::new(0.0, 52.0, 0.0), 1e-5)
        );
        assert_eq!(lights[0].direction, PLANE_LIGHT_DIRECTIONS[0]);
    }

    #[test]
    fn turned_body_turns_light_directions() {
        let body = Mat4::from_rotation_y(std::f32::consts::FRAC_PI_2);
        let lights = PlaneLight::place(body, |_| true);
        // RotY(90deg) maps +X onto -Z.
        assert!(lights[0].direction.abs_diff_eq(Vec3::NEG_Z, 1e-6));
        assert!(lights.iter().all(|l| l.on));
    }

    #[test]
    fn light_parts_are_lights() {
        assert!(PLANE_LIGHT_PARTS.iter().all(|p| p.is_light()));
    }

    #[test]
    fn wing_lights_are_mirrored() {
        assert_eq!(PLANE_LIGHT_POSITIONS[0].x, -PLANE_LIGHT_POSITIONS[2].x);
        assert_eq!(PLANE_LIGHT_DIRECTIONS[0], -PLANE_LIGHT_DIRECTIONS[2]);
    }
}
