use bytemuck::{Pod, Zeroable};
use flagflight_kernel::Scene;

/// Per-frame inputs of the flag's vertex displacement, laid out for upload
/// as one tightly packed block of `f32`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct FlagUniforms {
    pub amplitudes: [f32; 3],
    pub phases: [f32; 3],
    pub frequencies: [f32; 3],
    pub directions: [[f32; 2]; 3],
    /// Free-edge coordinate the falloff divides by.
    pub reference_height: f32,
    pub accumulated_time: f32,
    /// Strength of the displacement texture added on top of the waves.
    pub displacement_scale: f32,
}

impl FlagUniforms {
    pub fn from_scene(scene: &Scene) -> Self {
        let cloth = scene.cloth();
        let waves = cloth.waves();
        let cfg = &scene.config().cloth;
        Self {
            amplitudes: waves.map(|w| w.amplitude),
            phases: waves.map(|w| w.phi),
            frequencies: waves.map(|w| w.omega),
            directions: waves.map(|w| w.direction.to_array()),
            reference_height: cfg.min_reference_height,
            accumulated_time: cloth.accumulated_time(),
            displacement_scale: cfg.displacement_scale,
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flagflight_common::ControlInput;
    use flagflight_kernel::SimConfig;

    #[test]
    fn block_is_tightly_packed() {
        assert_eq!(std::mem::size_of::<FlagUniforms>(), 18 * 4);
    }

    #[test]
    fn mirrors_scene_cloth() {
        let mut scene = Scene::new(SimConfig::default()).unwrap();
        scene.step(0.1, ControlInput::NEUTRAL);
        let u = FlagUniforms::from_scene(&scene);
        let cfg = SimConfig::default().cloth;
        assert_eq!(u.accumulated_time, scene.cloth().accumulated_time());
        assert_eq!(u.reference_height, -8.0);
        assert_eq!(u.phases[2], cfg.waves[2].phi);
        assert_eq!(u.directions[1], cfg.waves[1].direction.to_array());
        assert_eq!(u.as_bytes().len(), std::mem::size_of::<FlagUniforms>());
    }
}
