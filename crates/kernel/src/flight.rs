//! Plane flight integrator.
//!
//! Discrete per-frame controls drive speed, heading, bank and pitch. Bank,
//! pitch and the remembered yaw rate each leak back toward zero with the
//! configured damping time constant, so the plane levels out on its own once
//! the controls are released.
//!
//! # Invariants
//! - `min_speed <= speed <= max_speed`
//! - `min_altitude <= position.y <= max_altitude`
//! - `yaw` stays in `(-PI, PI]`

use crate::config::FlightConfig;
use flagflight_common::ControlInput;
use flagflight_common::angle::wrap_once;
use glam::{Mat3, Mat4, Vec3};

/// Speed gained per second of full throttle.
const THROTTLE_ACCEL: f32 = 10.0;
/// Heading change per second of full turn input, in radians.
const TURN_RATE: f32 = 0.5;
/// Full turn input banks by `1 / ROLL_DIVISOR` radians per second.
const ROLL_DIVISOR: f32 = 1.5;
/// Full pitch input changes pitch by `1 / PITCH_DIVISOR` radians per second.
const PITCH_DIVISOR: f32 = 4.0;
/// Fraction of the bank the flag counter-rotates against.
const FLAG_ROLL_COMPENSATION: f32 = 0.75;

/// Attitude angles in radians.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EulerAngles {
    pub pitch: f32,
    pub yaw: f32,
    pub roll: f32,
}

/// Integrated flight state of the plane.
#[derive(Debug, Clone, PartialEq)]
pub struct FlightState {
    pub position: Vec3,
    pub angles: EulerAngles,
    /// Low-pass filtered yaw rate, only used to swing the flag.
    pub yaw_rate_memory: f32,
    pub speed: f32,
    orientation: Mat4,
    world_transform: Mat4,
    flag_counter_rotation: Mat4,
}

impl FlightState {
    pub fn orientation(&self) -> Mat4 {
        self.orientation
    }

    pub fn world_transform(&self) -> Mat4 {
        self.world_transform
    }

    pub fn flag_counter_rotation(&self) -> Mat4 {
        self.flag_counter_rotation
    }

    pub fn altitude(&self) -> f32 {
        self.position.y
    }

    /// Axis the planet turns about so the plane appears to fly over it.
    pub fn turning_axis(&self) -> Vec3 {
        Mat3::from_rotation_y(self.angles.yaw) * Vec3::NEG_X
    }
}

/// Applies [`ControlInput`] to a [`FlightState`] within a flight envelope.
#[derive(Debug, Clone)]
pub struct FlightController {
    config: FlightConfig,
}

impl FlightController {
    pub fn new(config: FlightConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FlightConfig {
        &self.config
    }

    /// A freshly loaded plane: slowest speed, level, at the base position.
    pub fn spawn(&self) -> FlightState {
        let position = self.config.base_position;
        FlightState {
            position,
            angles: EulerAngles::default(),
            yaw_rate_memory: 0.0,
            speed: self.config.min_speed,
            orientation: Mat4::IDENTITY,
            world_transform: Mat4::from_translation(position),
            flag_counter_rotation: Mat4::IDENTITY,
        }
    }

    /// Advance the plane by one step of `dt` seconds.
    pub fn step(&self, state: &mut FlightState, controls: ControlInput, dt: f32) {
        self.throttle(state, controls.throttle.value(), dt);
        self.turn(state, controls.turn.value(), dt);
        self.pitch(state, controls.pitch.value(), dt);
        state.world_transform = Mat4::from_translation(state.position) * state.orientation;
    }

    fn throttle(&self, state: &mut FlightState, throttle: f32, dt: f32) {
        let speed = state.speed + throttle * dt * THROTTLE_ACCEL;
        state.speed = speed.clamp(self.config.min_speed, self.config.max_speed);
    }

    fn turn(&self, state: &mut FlightState, turn: f32, dt: f32) {
        let tau = self.config.damping_time_constant;
        let angles = &mut state.angles;

        let d_yaw = dt * turn * TURN_RATE;
        angles.yaw += d_yaw;
        state.yaw_rate_memory += d_yaw - dt * state.yaw_rate_memory / tau;
        angles.roll -= dt * turn / ROLL_DIVISOR + dt * angles.roll / tau;
        angles.yaw = wrap_once(angles.yaw);

        state.orientation = Mat4::from_rotation_y(angles.yaw) * Mat4::from_rotation_z(angles.roll);

        state.flag_counter_rotation = if angles.roll.abs() > f32::EPSILON
            || state.yaw_rate_memory.abs() > f32::EPSILON
        {
            Mat4::from_rotation_y(-state.yaw_rate_memory)
                * Mat4::from_rotation_z(-angles.roll * FLAG_ROLL_COMPENSATION)
        } else {
            Mat4::IDENTITY
        };
    }

    fn pitch(&self, state: &mut FlightState, pitch: f32, dt: f32) {
        let cfg = &self.config;
        let altitude = state.position.y;
        let floor_blocked = altitude <= cfg.min_altitude + cfg.altitude_margin && pitch < 0.0;
        let ceiling_blocked = altitude >= cfg.max_altitude - cfg.altitude_margin && pitch > 0.0;
        if !floor_blocked && !ceiling_blocked {
            state.angles.pitch += dt * -pitch / PITCH_DIVISOR;
        }
        state.angles.pitch -= dt * state.angles.pitch / cfg.damping_time_constant;

        state.orientation = state.orientation * Mat4::from_rotation_x(state.angles.pitch);
        let altitude = altitude - dt * state.angles.pitch * state.speed;
        state.position.y = altitude.clamp(cfg.min_altitude, cfg.max_altitude);
    }

    /// Normalized speed in `[0, 1]`.
    pub fn speed_factor(&self, state: &FlightState) -> f32 {
        (state.speed - self.config.min_speed) / (self.config.max_speed - self.config.min_speed)
    }

    /// Follow-camera field of view for the current speed, in radians.
    pub fn field_of_view(&self, state: &FlightState) -> f32 {
        let degrees =
            self.config.min_fov + self.speed_factor(state) * (self.config.max_fov - self.config.min_fov);
        degrees.to_radians()
    }
}
