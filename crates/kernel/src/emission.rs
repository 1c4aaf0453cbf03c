//! Switchable emission of plane lights and glowing planet materials.
//!
//! Each table keeps the "on" color and texture captured at load time. Turning
//! emission off swaps in black and the neutral texture; turning it on again
//! restores the captured values.

use flagflight_common::{PlanePart, TextureHandle};
use glam::Vec3;

/// Emission color and texture of one material.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Emission {
    pub color: Vec3,
    pub texture: TextureHandle,
}

impl Emission {
    pub const OFF: Self = Self {
        color: Vec3::ZERO,
        texture: TextureHandle::NO_EMISSION,
    };
}

/// Emission of the plane's light parts, one slot per [`PlanePart`].
#[derive(Debug, Clone, PartialEq)]
pub struct PlaneEmission {
    sources: [Option<Emission>; PlanePart::COUNT],
    enabled: [bool; PlanePart::COUNT],
}

impl Default for PlaneEmission {
    fn default() -> Self {
        Self {
            sources: [None; PlanePart::COUNT],
            enabled: [true; PlanePart::COUNT],
        }
    }
}

impl PlaneEmission {
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture the "on" emission of a part. Only light parts are switchable;
    /// other parts are ignored and keep their material emission.
    pub fn register(&mut self, part: PlanePart, on: Emission) {
        if part.is_light() {
            self.sources[part.index()] = Some(on);
        }
    }

    /// Switch every registered light part on or off.
    pub fn set_light_emission(&mut self, on: bool) {
        for part in PlanePart::ALL {
            if self.sources[part.index()].is_some() {
                self.enabled[part.index()] = on;
            }
        }
    }

    /// Switch a single light part.
    pub fn set_part_emission(&mut self, part: PlanePart, on: bool) {
        self.enabled[part.index()] = on;
    }

    pub fn is_enabled(&self, part: PlanePart) -> bool {
        self.sources[part.index()].is_some() && self.enabled[part.index()]
    }

    /// Current emission of a switchable part, or `None` for parts whose
    /// emission is not managed here.
    pub fn current(&self, part: PlanePart) -> Option<Emission> {
        let on = self.sources[part.index()]?;
        Some(if self.enabled[part.index()] {
            on
        } else {
            Emission::OFF
        })
    }

    /// Parts with a captured emission.
    pub fn parts(&self) -> impl Iterator<Item = PlanePart> + '_ {
        PlanePart::ALL
            .into_iter()
            .filter(|p| self.sources[p.index()].is_some())
    }
}

/// Captured emission of one planet material.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaterialEmission {
    pub part: usize,
    pub material: usize,
    /// Only materials that glow get their color switched.
    pub color: Option<Vec3>,
    pub texture: TextureHandle,
}

/// Current emission of a planet material as seen by the render layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaterialEmissionState {
    pub part: usize,
    pub material: usize,
    /// `None` leaves the material's own color untouched.
    pub color: Option<Vec3>,
    pub texture: TextureHandle,
}

/// Emission of every planet material.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanetEmission {
    materials: Vec<MaterialEmission>,
    enabled: bool,
}

impl Default for PlanetEmission {
    fn default() -> Self {
        Self {
            materials: Vec::new(),
            enabled: true,
        }
    }
}

impl PlanetEmission {
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture one material. A color counts as glowing when any channel is
    /// positive.
    pub fn register(&mut self, part: usize, material: usize, color: Vec3, texture: TextureHandle) {
        let glowing = color.cmpgt(Vec3::ZERO).any();
        self.materials.push(MaterialEmission {
            part,
            material,
            color: glowing.then_some(color),
            texture,
        });
    }

    pub fn set_emission(&mut self, on: bool) {
        self.enabled = on;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Number of materials whose color is switched.
    pub fn glowing_count(&self) -> usize {
        self.materials.iter().filter(|m| m.color.is_some()).count()
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }

    pub fn current(&self) -> impl Iterator<Item = MaterialEmissionState> + '_ {
        let on = self.enabled;
        self.materials.iter().map(move |m| MaterialEmissionState {
            part: m.part,
            material: m.material,
            color: m.color.map(|c| if on { c } else { Vec3::ZERO }),
            texture: if on {
                m.texture
            } else {
                TextureHandle::NO_EMISSION
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn red() -> Emission {
        Emission {
            color: Vec3::new(1.0, 0.0, 0.0),
            texture: TextureHandle(7),
        }
    }

    #[test]
    fn lights_toggle_between_captured_and_off() {
        let mut e = PlaneEmission::new();
        e.register(PlanePart::LightLeftWing, red());
        assert_eq!(e.current(PlanePart::LightLeftWing), Some(red()));

        e.set_light_emission(false);
        assert_eq!(e.current(PlanePart::LightLeftWing), Some(Emission::OFF));
        assert!(!e.is_enabled(PlanePart::LightLeftWing));

        e.set_light_emission(true);
        assert_eq!(e.current(PlanePart::LightLeftWing), Some(red()));
    }

    #[test]
    fn single_part_toggle_leaves_others() {
        let mut e = PlaneEmission::new();
        e.register(PlanePart::LightLeftWing, red());
        e.register(PlanePart::StrobeRudder, red());
        e.set_part_emission(PlanePart::StrobeRudder, false);
        assert_eq!(e.current(PlanePart::StrobeRudder), Some(Emission::OFF));
        assert_eq!(e.current(PlanePart::LightLeftWing), Some(red()));
    }

    #[test]
    fn non_light_parts_are_unmanaged() {
        let mut e = PlaneEmission::new();
        e.register(PlanePart::Hull, red());
        assert_eq!(e.current(PlanePart::Hull), None);
        assert_eq!(e.parts().count(), 0);
    }

    #[test]
    fn planet_switches_only_glowing_colors() {
        let mut e = PlanetEmission::new();
        e.register(0, 0, Vec3::new(0.0, 0.4, 0.0), TextureHandle(3));
        e.register(0, 1, Vec3::ZERO, TextureHandle(4));
        assert_eq!(e.glowing_count(), 1);
        assert_eq!(e.len(), 2);

        e.set_emission(false);
        let off: Vec<_> = e.current().collect();
        assert_eq!(off[0].color, Some(Vec3::ZERO));
        assert_eq!(off[1].color, None);
        assert!(off.iter().all(|m| m.texture == TextureHandle::NO_EMISSION));

        e.set_emission(true);
        let on: Vec<_> = e.current().collect();
        assert_eq!(on[0].color, Some(Vec3::new(0.0, 0.4, 0.0)));
        assert_eq!(on[1].texture, TextureHandle(4));
    }
}
