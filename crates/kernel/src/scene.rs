use crate::cloth::ClothSim;
use crate::compose::SceneComposer;
use crate::config::{ConfigError, SimConfig};
use crate::emission::{PlaneEmission, PlanetEmission};
use crate::flight::{FlightController, FlightState};
use crate::orbit::{OrbitalRotator, PlanetState};
use flagflight_common::{ControlInput, PlanePart};
use glam::Mat4;
use tracing::{debug, info, warn};

/// One recorded frame: the wall-clock delta and the controls held during it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameInput {
    pub dt: f32,
    pub controls: ControlInput,
}

/// Everything that changes a [`Scene`], in the order it happened.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SceneEvent {
    Frame(FrameInput),
    SetDaylight(bool),
    TogglePlaneLights,
}

/// What the loaded models contribute to a scene: captured emission tables
/// and the static offset of every plane part.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SceneModels {
    pub plane_emission: PlaneEmission,
    pub planet_emission: PlanetEmission,
    pub part_offsets: [Mat4; PlanePart::COUNT],
}

/// The whole simulated scene: plane, flag cloth, planet and lighting state.
///
/// All mutation goes through [`Scene::step`] and the toggle operations. The
/// render layer only reads. A scene built with [`Scene::with_recording`] logs
/// every event so the run can be replayed; the log is kept until
/// [`Scene::drain_events`] takes it.
#[derive(Debug, Clone)]
pub struct Scene {
    config: SimConfig,
    controller: FlightController,
    rotator: OrbitalRotator,
    plane: FlightState,
    cloth: ClothSim,
    planet: PlanetState,
    composer: SceneComposer,
    plane_emission: PlaneEmission,
    planet_emission: PlanetEmission,
    is_day: bool,
    frame: u64,
    recording: bool,
    event_log: Vec<SceneEvent>,
}

impl Scene {
    /// Validate `config` and build a scene in its initial state.
    pub fn new(config: SimConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let controller = FlightController::new(config.flight);
        let plane = controller.spawn();
        let mut composer = SceneComposer::new(config.propeller, config.scene.flag_offset);
        composer.compose(&plane);
        let mut scene = Self {
            config,
            controller,
            rotator: OrbitalRotator::new(config.orbit),
            plane,
            cloth: ClothSim::new(&config.cloth),
            planet: PlanetState::default(),
            composer,
            plane_emission: PlaneEmission::new(),
            planet_emission: PlanetEmission::new(),
            is_day: config.scene.start_in_daylight,
            frame: 0,
            recording: false,
            event_log: Vec::new(),
        };
        scene.apply_daylight();
        info!(
            speed = scene.plane.speed,
            altitude = scene.plane.altitude(),
            day = scene.is_day,
            "scene initialized"
        );
        Ok(scene)
    }

    /// Attach the emission tables and part offsets captured when the models
    /// were loaded.
    pub fn with_models(mut self, models: SceneModels) -> Self {
        self.plane_emission = models.plane_emission;
        self.planet_emission = models.planet_emission;
        for part in PlanePart::ALL {
            self.composer
                .set_part_offset(part, models.part_offsets[part.index()]);
        }
        self.composer.compose(&self.plane);
        self.apply_daylight();
        self
    }

    /// Start logging events for [`Scene::replay`].
    pub fn with_recording(mut self) -> Self {
        self.recording = true;
        self
    }

    /// Rebuild a scene by feeding a recorded event log through a fresh one
    /// built from the same configuration and models.
    pub fn replay(
        config: SimConfig,
        models: SceneModels,
        events: &[SceneEvent],
    ) -> Result<Self, ConfigError> {
        let mut scene = Self::new(config)?.with_models(models);
        for event in events {
            match *event {
                SceneEvent::Frame(f) => scene.step(f.dt, f.controls),
                SceneEvent::SetDaylight(is_day) => scene.set_daylight(is_day),
                SceneEvent::TogglePlaneLights => scene.toggle_plane_lights(),
            }
        }
        Ok(scene)
    }

    /// Advance the scene by one rendered frame.
    ///
    /// Frames longer than `max_substep` are split into equal sub-steps so the
    /// damping integrators stay stable after a stall. At most `max_substeps`
    /// are taken; the rest of a longer frame is dropped. Non-positive or
    /// non-finite deltas are ignored.
    pub fn step(&mut self, dt: f32, controls: ControlInput) {
        if !(dt.is_finite() && dt > 0.0) {
            warn!(dt, "ignoring frame with invalid delta");
            return;
        }
        let max = self.config.scene.max_substep;
        let max_substeps = self.config.scene.max_substeps;
        let longest = max * max_substeps as f32;
        let simulated = if dt > longest {
            warn!(dt, longest, "clamping stalled frame");
            longest
        } else {
            dt
        };
        let substeps = ((simulated / max).ceil() as u32).clamp(1, max_substeps);
        if substeps > 1 {
            debug!(dt = simulated, substeps, "splitting long frame");
        }
        let sub_dt = simulated / substeps as f32;
        for _ in 0..substeps {
            self.integrate(sub_dt, controls);
        }
        self.frame += 1;
        self.record(SceneEvent::Frame(FrameInput { dt, controls }));
    }

    fn record(&mut self, event: SceneEvent) {
        if self.recording {
            self.event_log.push(event);
        }
    }

    fn integrate(&mut self, dt: f32, controls: ControlInput) {
        self.controller.step(&mut self.plane, controls, dt);
        let speed_factor = self.controller.speed_factor(&self.plane);
        self.composer.animate_propeller(speed_factor, dt);
        self.cloth.advance(speed_factor, dt);
        self.rotator.rotate(
            &mut self.planet,
            self.plane.turning_axis(),
            self.plane.speed,
            dt,
        );
        self.composer.compose(&self.plane);
    }

    /// Switch between day and night. Night lights up the plane and the planet.
    pub fn set_daylight(&mut self, is_day: bool) {
        self.is_day = is_day;
        self.apply_daylight();
        self.record(SceneEvent::SetDaylight(is_day));
        info!(day = is_day, "daylight changed");
    }

    pub fn toggle_daylight(&mut self) {
        self.set_daylight(!self.is_day);
    }

    /// Flip the plane's navigation lights independently of the time of day.
    pub fn toggle_plane_lights(&mut self) {
        let on = !self.plane_lights_on();
        self.plane_emission.set_light_emission(on);
        self.record(SceneEvent::TogglePlaneLights);
        debug!(on, "plane lights toggled");
    }

    pub fn plane_lights_on(&self) -> bool {
        self.plane_emission
            .parts()
            .any(|p| self.plane_emission.is_enabled(p))
    }

    fn apply_daylight(&mut self) {
        let glow = !self.is_day;
        self.plane_emission.set_light_emission(glow);
        self.planet_emission.set_emission(glow);
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn controller(&self) -> &FlightController {
        &self.controller
    }

    pub fn plane(&self) -> &FlightState {
        &self.plane
    }

    pub fn cloth(&self) -> &ClothSim {
        &self.cloth
    }

    pub fn planet(&self) -> &PlanetState {
        &self.planet
    }

    pub fn composer(&self) -> &SceneComposer {
        &self.composer
    }

    pub fn plane_emission(&self) -> &PlaneEmission {
        &self.plane_emission
    }

    pub fn planet_emission(&self) -> &PlanetEmission {
        &self.planet_emission
    }

    pub fn is_day(&self) -> bool {
        self.is_day
    }

    /// Number of frames stepped so far.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn speed_factor(&self) -> f32 {
        self.controller.speed_factor(&self.plane)
    }

    /// Follow-camera field of view in radians.
    pub fn field_of_view(&self) -> f32 {
        self.controller.field_of_view(&self.plane)
    }

    pub fn is_recording(&self) -> bool {
        self.recording
    }

    /// Read-only access to the event log.
    pub fn events(&self) -> &[SceneEvent] {
        &self.event_log
    }

    /// Drain and return the event log.
    pub fn drain_events(&mut self) -> Vec<SceneEvent> {
        std::mem::take(&mut self.event_log)
    }

    /// FNV-1a hash over the simulated and lighting state, for replay
    /// comparison.
    pub fn state_hash(&self) -> u64 {
        let mut h: u64 = 0xcbf2_9ce4_8422_2325;
        let mut mix = |value: f32| {
            for b in value.to_le_bytes() {
                h ^= b as u64;
                h = h.wrapping_mul(0x0100_0000_01b3);
            }
        };
        let p = &self.plane;
        let q = self.planet.orientation();
        for v in [
            p.position.x,
            p.position.y,
            p.position.z,
            p.angles.pitch,
            p.angles.yaw,
            p.angles.roll,
            p.yaw_rate_memory,
            p.speed,
            self.cloth.accumulated_time(),
            self.composer.propeller_angle(),
            q.x,
            q.y,
            q.z,
            q.w,
        ] {
            mix(v);
        }
        let mut flags = vec![self.is_day, self.planet_emission.is_enabled()];
        flags.extend(PlanePart::ALL.map(|p| self.plane_emission.is_enabled(p)));
        for b in self
            .frame
            .to_le_bytes()
            .into_iter()
            .chain(flags.into_iter().map(u8::from))
        {
            h ^= b as u64;
            h = h.wrapping_mul(0x0100_0000_01b3);
        }
        h
    }

    pub fn summary(&self) -> SceneSummary {
        SceneSummary {
            frame: self.frame,
            speed: self.plane.speed,
            altitude: self.plane.altitude(),
            heading_degrees: self.plane.angles.yaw.to_degrees(),
            bank_degrees: self.plane.angles.roll.to_degrees(),
            cloth_time: self.cloth.accumulated_time(),
            is_day: self.is_day,
        }
    }
}

/// One-line summary of the scene for logs and tools.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneSummary {
    pub frame: u64,
    pub speed: f32,
    pub altitude: f32,
    pub heading_degrees: f32,
    pub bank_degrees: f32,
    pub cloth_time: f32,
    pub is_day: bool,
}

impl std::fmt::Display for SceneSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Scene: frame={} speed={:.2} altitude={:.2} heading={:.1} bank={:.1} cloth_t={:.2} {}",
            self.frame,
            self.speed,
            self.altitude,
            self.heading_degrees,
            self.bank_degrees,
            self.cloth_time,
            if self.is_day { "day" } else { "night" }
        )
    }
}
