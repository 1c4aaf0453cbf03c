use crate::config::{ClothConfig, WaveParameters};

/// Flag cloth clock: accumulated cloth time and the waves it drives.
///
/// Cloth time runs faster than wall time as the plane speeds up, so the flag
/// flutters harder at speed. It only ever moves forward.
#[derive(Debug, Clone, PartialEq)]
pub struct ClothSim {
    accumulated_time: f32,
    min_rate_factor: f32,
    max_rate_factor: f32,
    waves: [WaveParameters; 3],
}

impl ClothSim {
    pub fn new(config: &ClothConfig) -> Self {
        Self {
            accumulated_time: 0.0,
            min_rate_factor: config.min_rate_factor,
            max_rate_factor: config.max_rate_factor,
            waves: config.waves,
        }
    }

    pub fn accumulated_time(&self) -> f32 {
        self.accumulated_time
    }

    pub fn waves(&self) -> &[WaveParameters; 3] {
        &self.waves
    }

    /// Cloth time gained per second of wall time at `speed_factor`.
    pub fn rate(&self, speed_factor: f32) -> f32 {
        (self.max_rate_factor - self.min_rate_factor) * speed_factor + self.min_rate_factor
    }

    /// Advance cloth time by `dt` of wall time at `speed_factor` in `[0, 1]`.
    pub fn advance(&mut self, speed_factor: f32, dt: f32) {
        let gained = self.rate(speed_factor.clamp(0.0, 1.0)) * dt;
        debug_assert!(gained >= 0.0, "cloth time must not run backwards");
        self.accumulated_time += gained;
    }
}
