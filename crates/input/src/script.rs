//! Scripted flights: a list of segments, each holding one set of controls
//! for a number of frames. Used for headless runs and replay checks.

use flagflight_common::ControlInput;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// Errors from loading a [`FlightScript`].
#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("script has no frames")]
    Empty,
}

/// Controls held for `frames` consecutive frames.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub frames: u32,
    #[serde(flatten)]
    pub controls: ControlInput,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightScript {
    pub segments: Vec<Segment>,
}

impl FlightScript {
    pub fn from_yaml_str(text: &str) -> Result<Self, ScriptError> {
        let script: Self = serde_yaml::from_str(text)?;
        if script.total_frames() == 0 {
            return Err(ScriptError::Empty);
        }
        Ok(script)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ScriptError> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let script = Self::from_yaml_str(&text)?;
        info!(
            path = %path.as_ref().display(),
            segments = script.segments.len(),
            frames = script.total_frames(),
            "loaded flight script"
        );
        Ok(script)
    }

    /// A short tour: speed up, bank left, climb, bank right, dive, coast.
    pub fn demo() -> Self {
        use flagflight_common::Axis::{Negative as N, Neutral as O, Positive as P};
        let seg = |frames, throttle, turn, pitch| Segment {
            frames,
            controls: ControlInput::new(throttle, turn, pitch),
        };
        Self {
            segments: vec![
                seg(120, P, O, O),
                seg(90, O, P, O),
                seg(60, O, O, P),
                seg(90, O, N, O),
                seg(60, N, O, N),
                seg(120, O, O, O),
            ],
        }
    }

    pub fn total_frames(&self) -> u64 {
        self.segments.iter().map(|s| s.frames as u64).sum()
    }

    /// Controls for each frame in order.
    pub fn frames(&self) -> impl Iterator<Item = ControlInput> + Clone + '_ {
        self.segments
            .iter()
            .flat_map(|s| std::iter::repeat_n(s.controls, s.frames as usize))
    }

    /// Controls of every frame, repeating the script to fill `count` frames.
    pub fn cycle(&self, count: usize) -> impl Iterator<Item = ControlInput> + '_ {
        self.frames().cycle().take(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flagflight_common::Axis;
    use std::io::Write;

    #[test]
    fn parses_flattened_controls() {
        let script = FlightScript::from_yaml_str(
            "segments:\n  - frames: 3\n    throttle: positive\n  - frames: 2\n    turn: negative\n    pitch: positive\n",
        )
        .unwrap();
        assert_eq!(script.total_frames(), 5);
        let frames: Vec<_> = script.frames().collect();
        assert_eq!(frames[0].throttle, Axis::Positive);
        assert_eq!(frames[0].turn, Axis::Neutral);
        assert_eq!(frames[4].turn, Axis::Negative);
        assert_eq!(frames[4].pitch, Axis::Positive);
    }

    #[test]
    fn empty_script_rejected() {
        let err = FlightScript::from_yaml_str("segments: []\n").unwrap_err();
        assert!(matches!(err, ScriptError::Empty));
    }

    #[test]
    fn cycle_repeats_script() {
        let script = FlightScript::demo();
        let total = script.total_frames() as usize;
        let frames: Vec<_> = script.cycle(total + 5).collect();
        assert_eq!(frames.len(), total + 5);
        assert_eq!(frames[total], frames[0]);
    }

    #[test]
    fn load_from_file() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        writeln!(tmp, "segments:\n  - frames: 10\n    throttle: negative").unwrap();
        let script = FlightScript::load(tmp.path()).unwrap();
        assert_eq!(script.total_frames(), 10);
    }
}
