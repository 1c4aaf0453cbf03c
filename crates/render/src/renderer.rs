use crate::light::{PlaneLight, SceneLight};
use crate::uniforms::FlagUniforms;
use flagflight_common::PlanePart;
use flagflight_kernel::Scene;
use flagflight_kernel::emission::{Emission, MaterialEmissionState};
use glam::Mat4;
use tracing::debug;

/// Which shading the draw loop uses for every object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    /// Lit, textured colors.
    #[default]
    Color,
    /// Surface normals as colors.
    Normal,
}

impl RenderMode {
    pub fn next(self) -> Self {
        match self {
            Self::Color => Self::Normal,
            Self::Normal => Self::Color,
        }
    }
}

impl std::fmt::Display for RenderMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Color => f.write_str("COLOR"),
            Self::Normal => f.write_str("NORMAL"),
        }
    }
}

/// One plane part as the draw loop needs it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PartView {
    pub part: PlanePart,
    pub world: Mat4,
    /// Switched emission, or `None` when the part's material keeps its own.
    pub emission: Option<Emission>,
}

/// Read-only capture of everything drawn in one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameView {
    pub frame: u64,
    pub mode: RenderMode,
    /// Follow-camera field of view in radians.
    pub field_of_view: f32,
    pub light: SceneLight,
    pub parts: Vec<PartView>,
    pub plane_lights: [PlaneLight; 6],
    pub flag_world: Mat4,
    pub flag: FlagUniforms,
    pub planet_world: Mat4,
    pub planet_emission: Vec<MaterialEmissionState>,
}

impl FrameView {
    pub fn capture(scene: &Scene, mode: RenderMode) -> Self {
        let composer = scene.composer();
        let emission = scene.plane_emission();
        let parts = PlanePart::ALL
            .into_iter()
            .map(|part| PartView {
                part,
                world: composer.part_world(part),
                emission: emission.current(part),
            })
            .collect();
        Self {
            frame: scene.frame(),
            mode,
            field_of_view: scene.field_of_view(),
            light: SceneLight::for_daylight(scene.is_day()),
            parts,
            plane_lights: PlaneLight::place(scene.plane().world_transform(), |part| {
                emission.is_enabled(part)
            }),
            flag_world: composer.flag_world(),
            flag: FlagUniforms::from_scene(scene),
            planet_world: scene.planet().world_transform(),
            planet_emission: scene.planet_emission().current().collect(),
        }
    }

    pub fn part(&self, part: PlanePart) -> &PartView {
        &self.parts[part.index()]
    }
}

/// Renderer-agnostic interface. All renderers implement this trait.
///
/// A renderer reads a captured frame and produces output. It never sees the
/// mutable scene.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render one captured frame.
    fn render(&self, view: &FrameView) -> Self::Output;
}

/// Text renderer for headless runs: one block of lines per frame.
#[derive(Debug, Default)]
pub struct DebugTextRenderer {
    /// Also list every plane part.
    pub show_parts: bool,
}

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_parts(mut self) -> Self {
        self.show_parts = true;
        self
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&self, view: &FrameView) -> String {
        debug!(frame = view.frame, "rendering debug text");
        let mut out = String::new();
        let plane = view.part(PlanePart::Hull).world.w_axis;
        let flag = view.flag_world.w_axis;
        let lit = view.plane_lights.iter().filter(|l| l.on);
        out.push_str(&format!(
            "=== Frame {} ({}, fov={:.1}) ===\n",
            view.frame,
            view.mode,
            view.field_of_view.to_degrees()
        ));
        out.push_str(&format!(
            "Plane: pos=({:.2}, {:.2}, {:.2}) lights_on={}\n",
            plane.x,
            plane.y,
            plane.z,
            lit.count()
        ));
        out.push_str(&format!(
            "Flag: pos=({:.2}, {:.2}, {:.2}) cloth_t={:.3}\n",
            flag.x, flag.y, flag.z, view.flag.accumulated_time
        ));
        let up = view.planet_world.y_axis;
        out.push_str(&format!(
            "Planet: up=({:.3}, {:.3}, {:.3}) glowing={}\n",
            up.x,
            up.y,
            up.z,
            view.planet_emission
                .iter()
                .filter(|m| m.color.is_some_and(|c| c != glam::Vec3::ZERO))
                .count()
        ));
        out.push_str(&format!(
            "Light: pos=({:.0}, {:.0}, {:.0}) ka={:.2} kd={:.2} ks={:.2}\n",
            view.light.position.x,
            view.light.position.y,
            view.light.position.z,
            view.light.ka,
            view.light.kd,
            view.light.ks
        ));
        if self.show_parts {
            for p in &view.parts {
                let t = p.world.w_axis;
                out.push_str(&format!(
                    "  [{}] pos=({:.2}, {:.2}, {:.2})\n",
                    p.part, t.x, t.y, t.z
                ));
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flagflight_common::{Axis, ControlInput, TextureHandle};
    use flagflight_kernel::{PlaneEmission, PlanetEmission, SceneModels, SimConfig};
    use glam::Vec3;

    fn scene() -> Scene {
        let mut plane = PlaneEmission::new();
        plane.register(
            PlanePart::LightLeftWing,
            Emission {
                color: Vec3::X,
                texture: TextureHandle(3),
            },
        );
        let mut planet = PlanetEmission::new();
        planet.register(0, 0, Vec3::ONE, TextureHandle(4));
        Scene::new(SimConfig::default())
            .unwrap()
            .with_models(SceneModels {
                plane_emission: plane,
                planet_emission: planet,
                ..SceneModels::default()
            })
    }

    #[test]
    fn render_mode_cycles() {
        assert_eq!(RenderMode::Color.next(), RenderMode::Normal);
        assert_eq!(RenderMode::Normal.next(), RenderMode::Color);
        assert_eq!(RenderMode::default(), RenderMode::Color);
    }

    #[test]
    fn capture_mirrors_scene() {
        let mut s = scene();
        s.step(0.05, ControlInput::new(Axis::Positive, Axis::Positive, Axis::Neutral));
        let view = FrameView::capture(&s, RenderMode::Normal);
        assert_eq!(view.frame, 1);
        assert_eq!(view.parts.len(), PlanePart::COUNT);
        assert_eq!(view.part(PlanePart::Propeller).part, PlanePart::Propeller);
        assert_eq!(view.flag_world, s.composer().flag_world());
        assert_eq!(view.planet_world, s.planet().world_transform());
        assert_eq!(view.field_of_view, s.field_of_view());
        assert_eq!(view.light, SceneLight::day());
    }

    #[test]
    fn night_capture_lights_up() {
        let mut s = scene();
        s.set_daylight(false);
        let view = FrameView::capture(&s, RenderMode::Color);
        assert_eq!(view.light, SceneLight::night());
        let wing = view.part(PlanePart::LightLeftWing).emission.unwrap();
        assert_eq!(wing.texture, TextureHandle(3));
        assert_eq!(view.part(PlanePart::Hull).emission, None);
        assert_eq!(view.planet_emission[0].color, Some(Vec3::ONE));
        let lit: Vec<_> = view.plane_lights.iter().filter(|l| l.on).map(|l| l.part).collect();
        assert_eq!(lit, vec![PlanePart::LightLeftWing]);
    }

    #[test]
    fn debug_renderer_reports_frame() {
        let mut s = scene();
        s.set_daylight(false);
        s.step(0.016, ControlInput::NEUTRAL);
        let view = FrameView::capture(&s, RenderMode::Color);
        let text = DebugTextRenderer::new().render(&view);
        assert!(text.contains("=== Frame 1 (COLOR"));
        assert!(text.contains("lights_on=1"));
        assert!(text.contains("glowing=1"));
        assert!(!text.contains("[Hull]"));
    }

    #[test]
    fn debug_renderer_lists_parts() {
        let s = scene();
        let view = FrameView::capture(&s, RenderMode::Color);
        let text = DebugTextRenderer::new().with_parts().render(&view);
        assert!(text.contains("[Hull]"));
        assert!(text.contains("[Glass]"));
    }
}
