//! Final per-object transforms of the plane, its propeller and the towed flag.

use crate::config::PropellerConfig;
use crate::flight::FlightState;
use flagflight_common::PlanePart;
use flagflight_common::angle::fold_turns;
use glam::{Mat4, Vec3};

/// Builds world transforms for every plane part and the flag from the
/// integrated flight state.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneComposer {
    propeller: PropellerConfig,
    part_offsets: [Mat4; PlanePart::COUNT],
    flag_offset: Mat4,
    propeller_angle: f32,
    part_world: [Mat4; PlanePart::COUNT],
    flag_world: Mat4,
}

impl SceneComposer {
    /// Parts start at their modelled positions; the flag hangs at `flag_offset`.
    pub fn new(propeller: PropellerConfig, flag_offset: Vec3) -> Self {
        Self {
            propeller,
            part_offsets: [Mat4::IDENTITY; PlanePart::COUNT],
            flag_offset: Mat4::from_translation(flag_offset),
            propeller_angle: 0.0,
            part_world: [Mat4::IDENTITY; PlanePart::COUNT],
            flag_world: Mat4::from_translation(flag_offset),
        }
    }

    /// Override the static offset of one part relative to the plane body.
    pub fn set_part_offset(&mut self, part: PlanePart, offset: Mat4) {
        self.part_offsets[part.index()] = offset;
    }

    /// Propeller spin rate at `speed_factor`, in radians per second.
    pub fn propeller_rate(&self, speed_factor: f32) -> f32 {
        let p = &self.propeller;
        p.min_rotation_speed + speed_factor * (p.max_rotation_speed - p.min_rotation_speed)
    }

    /// Spin the propeller for `dt` seconds.
    pub fn animate_propeller(&mut self, speed_factor: f32, dt: f32) {
        let angle = self.propeller_angle + dt * self.propeller_rate(speed_factor);
        self.propeller_angle = fold_turns(angle);
    }

    pub fn propeller_angle(&self) -> f32 {
        self.propeller_angle
    }

    /// Local transform of a part, including the propeller's own spin.
    pub fn part_local(&self, part: PlanePart) -> Mat4 {
        let offset = self.part_offsets[part.index()];
        match part {
            PlanePart::Propeller => Mat4::from_rotation_z(self.propeller_angle) * offset,
            _ => offset,
        }
    }

    /// Recompute every world transform from the plane's current state.
    pub fn compose(&mut self, plane: &FlightState) {
        let body = plane.world_transform();
        for part in PlanePart::ALL {
            self.part_world[part.index()] = body * self.part_local(part);
        }
        self.flag_world = body * self.flag_offset * plane.flag_counter_rotation();
    }

    pub fn part_world(&self, part: PlanePart) -> Mat4 {
        self.part_world[part.index()]
    }

    pub fn flag_world(&self) -> Mat4 {
        self.flag_world
    }
}
