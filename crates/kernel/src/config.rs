//! Load-time configuration for the scene core.
//!
//! Every constant the simulation divides by is checked in
//! [`SimConfig::validate`], so the per-frame code never guards a division.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};
use std::f32::consts::FRAC_PI_4;
use std::path::Path;
use tracing::info;

/// Errors from loading or validating a [`SimConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("{field} must be finite")]
    NonFinite { field: &'static str },
    #[error("{field} must be non-zero")]
    ZeroDivisor { field: &'static str },
    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: f32 },
    #[error("{min_field} ({min}) must be below {max_field} ({max})")]
    InvertedRange {
        min_field: &'static str,
        max_field: &'static str,
        min: f32,
        max: f32,
    },
    #[error("base altitude {altitude} lies outside [{min}, {max}]")]
    BaseOutsideBand { altitude: f32, min: f32, max: f32 },
    #[error("max_substep {value} must lie in (0, {limit})")]
    SubstepOutOfRange { value: f32, limit: f32 },
    #[error("{field} must be at least 1")]
    ZeroCount { field: &'static str },
    #[error("wave {index} has a zero-length direction")]
    ZeroDirection { index: usize },
}

/// One directional sine wave of the flag surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WaveParameters {
    pub amplitude: f32,
    /// Spatial angular frequency.
    pub omega: f32,
    /// Temporal phase rate, multiplied by the accumulated cloth time.
    pub phi: f32,
    /// Travel direction in the flag plane. Normalized when evaluated.
    pub direction: Vec2,
}

/// Plane flight envelope and control tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlightConfig {
    pub base_position: Vec3,
    pub min_speed: f32,
    pub max_speed: f32,
    pub min_altitude: f32,
    pub max_altitude: f32,
    /// Field of view at minimum speed, in degrees.
    pub min_fov: f32,
    /// Field of view at maximum speed, in degrees.
    pub max_fov: f32,
    /// Time constant of the roll, pitch and yaw-rate leaky integrators.
    pub damping_time_constant: f32,
    /// Distance from either altitude bound at which pitch input stops acting.
    pub altitude_margin: f32,
}

impl Default for FlightConfig {
    fn default() -> Self {
        Self {
            base_position: Vec3::new(0.0, 52.0, 0.0),
            min_speed: 10.0,
            max_speed: 60.0,
            min_altitude: 47.0,
            max_altitude: 60.0,
            min_fov: 60.0,
            max_fov: 90.0,
            damping_time_constant: FRAC_PI_4,
            altitude_margin: 0.5,
        }
    }
}

/// Flag cloth clock and wave field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClothConfig {
    /// Cloth time rate at minimum plane speed.
    pub min_rate_factor: f32,
    /// Cloth time rate at maximum plane speed.
    pub max_rate_factor: f32,
    /// Flag-plane coordinate of the free edge. The wave falloff divides by it.
    pub min_reference_height: f32,
    /// Scale of the displacement texture applied on top of the waves.
    pub displacement_scale: f32,
    pub waves: [WaveParameters; 3],
}

impl Default for ClothConfig {
    fn default() -> Self {
        Self {
            min_rate_factor: 1.0,
            max_rate_factor: 5.0,
            min_reference_height: -8.0,
            displacement_scale: 0.1,
            waves: [
                WaveParameters {
                    amplitude: 0.35,
                    omega: 0.8,
                    phi: 2.0,
                    direction: Vec2::new(0.2, 1.0),
                },
                WaveParameters {
                    amplitude: 0.2,
                    omega: 1.4,
                    phi: 3.3,
                    direction: Vec2::new(-0.3, 0.9),
                },
                WaveParameters {
                    amplitude: 0.08,
                    omega: 2.7,
                    phi: 5.1,
                    direction: Vec2::new(1.0, 1.0),
                },
            ],
        }
    }
}

/// Planet rotation driven by the plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbitConfig {
    /// Plane speed divided by this gives the planet's angular speed.
    pub speed_divisor: f32,
}

impl Default for OrbitConfig {
    fn default() -> Self {
        Self {
            speed_divisor: 100.0,
        }
    }
}

/// Propeller spin, in radians per second.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PropellerConfig {
    pub min_rotation_speed: f32,
    pub max_rotation_speed: f32,
}

impl Default for PropellerConfig {
    fn default() -> Self {
        Self {
            min_rotation_speed: 20.0,
            max_rotation_speed: 60.0,
        }
    }
}

/// Frame stepping and scene layout.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Longest single integration step. Longer frames are split evenly.
    pub max_substep: f32,
    /// Most sub-steps one frame may take. Anything past
    /// `max_substep * max_substeps` seconds is dropped from the frame.
    pub max_substeps: u32,
    /// Flag mount point relative to the plane body.
    pub flag_offset: Vec3,
    pub start_in_daylight: bool,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            max_substep: 1.0 / 30.0,
            max_substeps: 240,
            flag_offset: Vec3::new(0.0, 0.9, -7.0),
            start_in_daylight: true,
        }
    }
}

/// Complete configuration of the scene core.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub flight: FlightConfig,
    pub cloth: ClothConfig,
    pub orbit: OrbitConfig,
    pub propeller: PropellerConfig,
    pub scene: SceneConfig,
}

impl SimConfig {
    /// Parse a YAML document and validate it. Missing fields take defaults.
    pub fn from_yaml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a YAML configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_yaml_str(&text)?;
        info!(path = %path.as_ref().display(), "loaded scene configuration");
        Ok(config)
    }

    /// Serialize to YAML, e.g. to dump the effective defaults.
    pub fn to_yaml_string(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Reject configurations the per-frame arithmetic cannot handle.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let f = &self.flight;
        for (field, value) in [
            ("flight.base_position.x", f.base_position.x),
            ("flight.base_position.y", f.base_position.y),
            ("flight.base_position.z", f.base_position.z),
            ("flight.min_speed", f.min_speed),
            ("flight.max_speed", f.max_speed),
            ("flight.min_altitude", f.min_altitude),
            ("flight.max_altitude", f.max_altitude),
            ("flight.min_fov", f.min_fov),
            ("flight.max_fov", f.max_fov),
            ("flight.damping_time_constant", f.damping_time_constant),
            ("flight.altitude_margin", f.altitude_margin),
            ("cloth.min_rate_factor", self.cloth.min_rate_factor),
            ("cloth.max_rate_factor", self.cloth.max_rate_factor),
            ("cloth.min_reference_height", self.cloth.min_reference_height),
            ("cloth.displacement_scale", self.cloth.displacement_scale),
            ("orbit.speed_divisor", self.orbit.speed_divisor),
            ("propeller.min_rotation_speed", self.propeller.min_rotation_speed),
            ("propeller.max_rotation_speed", self.propeller.max_rotation_speed),
            ("scene.max_substep", self.scene.max_substep),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { field });
            }
        }

        ordered("flight.min_speed", f.min_speed, "flight.max_speed", f.max_speed)?;
        ordered(
            "flight.min_altitude",
            f.min_altitude,
            "flight.max_altitude",
            f.max_altitude,
        )?;
        if f.min_fov > f.max_fov {
            return Err(ConfigError::InvertedRange {
                min_field: "flight.min_fov",
                max_field: "flight.max_fov",
                min: f.min_fov,
                max: f.max_fov,
            });
        }
        if f.damping_time_constant == 0.0 {
            return Err(ConfigError::ZeroDivisor {
                field: "flight.damping_time_constant",
            });
        }
        non_negative("flight.damping_time_constant", f.damping_time_constant)?;
        non_negative("flight.altitude_margin", f.altitude_margin)?;
        if !(f.min_altitude..=f.max_altitude).contains(&f.base_position.y) {
            return Err(ConfigError::BaseOutsideBand {
                altitude: f.base_position.y,
                min: f.min_altitude,
                max: f.max_altitude,
            });
        }

        let c = &self.cloth;
        non_negative("cloth.min_rate_factor", c.min_rate_factor)?;
        non_negative("cloth.max_rate_factor", c.max_rate_factor)?;
        if c.min_rate_factor > c.max_rate_factor {
            return Err(ConfigError::InvertedRange {
                min_field: "cloth.min_rate_factor",
                max_field: "cloth.max_rate_factor",
                min: c.min_rate_factor,
                max: c.max_rate_factor,
            });
        }
        if c.min_reference_height == 0.0 {
            return Err(ConfigError::ZeroDivisor {
                field: "cloth.min_reference_height",
            });
        }
        for (index, wave) in c.waves.iter().enumerate() {
            let finite = wave.amplitude.is_finite()
                && wave.omega.is_finite()
                && wave.phi.is_finite()
                && wave.direction.is_finite();
            if !finite {
                return Err(ConfigError::NonFinite {
                    field: "cloth.waves",
                });
            }
            if wave.direction.length_squared() == 0.0 {
                return Err(ConfigError::ZeroDirection { index });
            }
        }

        if self.orbit.speed_divisor == 0.0 {
            return Err(ConfigError::ZeroDivisor {
                field: "orbit.speed_divisor",
            });
        }

        let limit = f.damping_time_constant;
        let step = self.scene.max_substep;
        if step <= 0.0 || step >= limit {
            return Err(ConfigError::SubstepOutOfRange { value: step, limit });
        }
        if self.scene.max_substeps == 0 {
            return Err(ConfigError::ZeroCount {
                field: "scene.max_substeps",
            });
        }
        Ok(())
    }
}

fn ordered(
    min_field: &'static str,
    min: f32,
    max_field: &'static str,
    max: f32,
) -> Result<(), ConfigError> {
    if min < max {
        Ok(())
    } else {
        Err(ConfigError::InvertedRange {
            min_field,
            max_field,
            min,
            max,
        })
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value < 0.0 {
        Err(ConfigError::Negative { field, value })
    } else {
        Ok(())
    }
}
