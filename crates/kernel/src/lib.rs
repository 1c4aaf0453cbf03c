//! Scene kernel: the simulated state behind the towed-flag flight scene.
//!
//! # Invariants
//! - All mutation happens in [`Scene::step`] and the explicit toggles; the
//!   render layer only reads.
//! - Plane speed and altitude stay inside the configured envelope and the
//!   heading stays in `(-PI, PI]`.
//! - Cloth time never runs backwards.
//! - Configurations that would divide by zero are rejected at load time.

pub mod cloth;
pub mod compose;
pub mod config;
pub mod emission;
pub mod flight;
pub mod orbit;
pub mod scene;
pub mod wave;

pub use cloth::ClothSim;
pub use compose::SceneComposer;
pub use config::{
    ClothConfig, ConfigError, FlightConfig, OrbitConfig, PropellerConfig, SceneConfig, SimConfig,
    WaveParameters,
};
pub use emission::{Emission, PlaneEmission, PlanetEmission};
pub use flight::{EulerAngles, FlightController, FlightState};
pub use orbit::{OrbitalRotator, PlanetState};
pub use scene::{FrameInput, Scene, SceneEvent, SceneModels, SceneSummary};
