//! Procedural flag surface: a superposition of three directional sine waves.
//!
//! The render layer evaluates the same formula per vertex on the GPU; the
//! functions here are the CPU reference and are used for sampling and tests.

use crate::cloth::ClothSim;
use crate::config::WaveParameters;
use glam::Vec2;

impl WaveParameters {
    /// Height of this single wave at `position` after `time` of cloth time.
    pub fn value(&self, position: Vec2, time: f32) -> f32 {
        let phase = self.direction.normalize().dot(position) * self.omega + time * self.phi;
        self.amplitude * phase.sin()
    }
}

/// Displacement of the flag surface at `position`, orthogonal to the flag.
///
/// `position.y` runs from 0 at the mounted edge to `min_reference_height` at
/// the free edge, so the sum of the waves is scaled from nothing at the mount
/// to full amplitude at the free end.
pub fn displacement(position: Vec2, sim: &ClothSim, min_reference_height: f32) -> f32 {
    let time = sim.accumulated_time();
    let sum: f32 = sim.waves().iter().map(|w| w.value(position, time)).sum();
    sum * (position.y / min_reference_height)
}
