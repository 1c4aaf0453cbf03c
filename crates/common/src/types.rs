use serde::{Deserialize, Serialize};

/// A signed, discrete control axis as produced by a pair of opposing keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    Negative,
    #[default]
    Neutral,
    Positive,
}

impl Axis {
    /// Combine a positive and a negative key: both or neither cancel out.
    pub fn from_keys(positive: bool, negative: bool) -> Self {
        match (positive, negative) {
            (true, false) => Self::Positive,
            (false, true) => Self::Negative,
            _ => Self::Neutral,
        }
    }

    /// The axis as -1.0, 0.0 or 1.0.
    pub fn value(self) -> f32 {
        match self {
            Self::Negative => -1.0,
            Self::Neutral => 0.0,
            Self::Positive => 1.0,
        }
    }
}

/// One frame's worth of flight controls.
///
/// `throttle` positive = faster, `turn` positive = left,
/// `pitch` positive = climb.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ControlInput {
    #[serde(default)]
    pub throttle: Axis,
    #[serde(default)]
    pub turn: Axis,
    #[serde(default)]
    pub pitch: Axis,
}

impl ControlInput {
    pub const NEUTRAL: Self = Self {
        throttle: Axis::Neutral,
        turn: Axis::Neutral,
        pitch: Axis::Neutral,
    };

    pub fn new(throttle: Axis, turn: Axis, pitch: Axis) -> Self {
        Self {
            throttle,
            turn,
            pitch,
        }
    }
}

/// The closed set of rigid parts a plane model is made of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PlanePart {
    Hull,
    Windows,
    Propeller,
    StrobeRudder,
    LightLeftWing,
    StrobeRightWing,
    StrobeLeftWing,
    LightRightWing,
    LightRudder,
    FlagConnector,
}

impl PlanePart {
    pub const COUNT: usize = 10;

    pub const ALL: [PlanePart; Self::COUNT] = [
        Self::Hull,
        Self::Windows,
        Self::Propeller,
        Self::StrobeRudder,
        Self::LightLeftWing,
        Self::StrobeRightWing,
        Self::StrobeLeftWing,
        Self::LightRightWing,
        Self::LightRudder,
        Self::FlagConnector,
    ];

    /// Resolve the object name used in the plane model file.
    pub fn from_model_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.model_name() == name)
    }

    /// Object name of this part inside the plane model file.
    pub fn model_name(self) -> &'static str {
        match self {
            Self::Hull => "Hull",
            Self::Windows => "Glass",
            Self::Propeller => "Propeller",
            Self::StrobeRudder => "StrobeRudder",
            Self::LightLeftWing => "LightLeftWing",
            Self::StrobeRightWing => "StrobeRightWing",
            Self::StrobeLeftWing => "StrobeLeftWing",
            Self::LightRightWing => "LightRightWing",
            Self::LightRudder => "LightRudder",
            Self::FlagConnector => "FlagConnector",
        }
    }

    /// Navigation lights and strobes: the parts whose emission is switched.
    pub fn is_light(self) -> bool {
        matches!(
            self,
            Self::StrobeRudder
                | Self::LightLeftWing
                | Self::StrobeRightWing
                | Self::StrobeLeftWing
                | Self::LightRightWing
                | Self::LightRudder
        )
    }

    /// Position of the part in fixed-size part tables.
    pub fn index(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for PlanePart {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.model_name())
    }
}

/// Opaque handle to a texture owned by the render layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TextureHandle(pub u32);

impl TextureHandle {
    /// The 1x1 black texture bound in place of a switched-off emission map.
    pub const NO_EMISSION: Self = Self(0);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn axis_from_keys_cancels() {
        assert_eq!(Axis::from_keys(true, true), Axis::Neutral);
        assert_eq!(Axis::from_keys(false, false), Axis::Neutral);
        assert_eq!(Axis::from_keys(true, false), Axis::Positive);
        assert_eq!(Axis::from_keys(false, true), Axis::Negative);
    }

    #[test]
    fn axis_values() {
        assert_eq!(Axis::Negative.value(), -1.0);
        assert_eq!(Axis::Neutral.value(), 0.0);
        assert_eq!(Axis::Positive.value(), 1.0);
    }

    #[test]
    fn part_names_round_trip() {
        for part in PlanePart::ALL {
            assert_eq!(PlanePart::from_model_name(part.model_name()), Some(part));
        }
        assert_eq!(PlanePart::from_model_name("Wing"), None);
    }

    #[test]
    fn part_indices_match_table_order() {
        for (i, part) in PlanePart::ALL.iter().enumerate() {
            assert_eq!(part.index(), i);
        }
    }

    #[test]
    fn six_parts_are_lights() {
        let lights = PlanePart::ALL.iter().filter(|p| p.is_light()).count();
        assert_eq!(lights, 6);
        assert!(!PlanePart::Hull.is_light());
    }
}
