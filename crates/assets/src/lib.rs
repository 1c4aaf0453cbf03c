//! Model manifests for the scene's three objects.
//!
//! Mesh and texture decoding belong to the render layer. What the scene core
//! needs from a loaded model is its object names and the emission of each
//! material, so that is all a manifest carries. Textures are referenced by
//! the handles the render layer assigned when it uploaded them.

mod parts;

pub use parts::{FlagModel, PlaneModel, PlanetModel, scene_models};

use flagflight_common::{PlanePart, TextureHandle};
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// Errors from manifest loading and part resolution.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("plane has {found} parts, expected {expected}")]
    PartCountMismatch { expected: usize, found: usize },
    #[error("unknown plane part name: {0}")]
    UnknownPart(String),
    #[error("plane part {0} appears more than once")]
    DuplicatePart(PlanePart),
    #[error("plane part {0} has no materials")]
    MissingMaterial(PlanePart),
    #[error("flag must be a single model, found {0}")]
    FlagPartCount(usize),
    #[error("planet has no parts")]
    EmptyPlanet,
}

/// Emission-relevant slice of one material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialDesc {
    pub name: String,
    #[serde(default)]
    pub emission: Vec3,
    #[serde(default = "no_emission")]
    pub emission_texture: TextureHandle,
}

fn no_emission() -> TextureHandle {
    TextureHandle::NO_EMISSION
}

/// One named object of a model file with its materials.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelDesc {
    pub name: String,
    /// Static translation of the object relative to its model's origin.
    #[serde(default)]
    pub offset: Vec3,
    #[serde(default)]
    pub materials: Vec<MaterialDesc>,
}

impl ModelDesc {
    pub fn new(name: impl Into<String>, materials: Vec<MaterialDesc>) -> Self {
        Self {
            name: name.into(),
            offset: Vec3::ZERO,
            materials,
        }
    }
}

/// All objects of one model file, in file order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelManifest {
    pub models: Vec<ModelDesc>,
}

impl ModelManifest {
    pub fn from_json_str(text: &str) -> Result<Self, AssetError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Load a manifest written next to a model file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, AssetError> {
        let file = std::fs::File::open(path.as_ref())?;
        let manifest: Self = serde_json::from_reader(file)?;
        info!(
            path = %path.as_ref().display(),
            models = manifest.models.len(),
            "loaded model manifest"
        );
        Ok(manifest)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), AssetError> {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    /// The stock plane: ten parts, navigation lights and strobes glowing.
    pub fn builtin_plane() -> Self {
        let lit = |color: Vec3, texture: u32| {
            vec![MaterialDesc {
                name: "light".into(),
                emission: color,
                emission_texture: TextureHandle(texture),
            }]
        };
        let plain = |name: &str| {
            vec![MaterialDesc {
                name: name.into(),
                emission: Vec3::ZERO,
                emission_texture: TextureHandle::NO_EMISSION,
            }]
        };
        let red = Vec3::new(1.0, 0.0, 0.0);
        let green = Vec3::new(0.0, 1.0, 0.0);
        let white = Vec3::ONE;
        let models = PlanePart::ALL
            .into_iter()
            .map(|part| {
                let materials = match part {
                    PlanePart::Hull => plain("body"),
                    PlanePart::Windows => plain("glass"),
                    PlanePart::Propeller => plain("propeller"),
                    PlanePart::FlagConnector => plain("rope"),
                    PlanePart::LightLeftWing => lit(red, 11),
                    PlanePart::StrobeLeftWing => lit(white, 12),
                    PlanePart::LightRightWing => lit(green, 13),
                    PlanePart::StrobeRightWing => lit(white, 14),
                    PlanePart::LightRudder => lit(white, 15),
                    PlanePart::StrobeRudder => lit(red, 16),
                };
                ModelDesc::new(part.model_name(), materials)
            })
            .collect();
        Self { models }
    }

    /// The stock flag: one cloth object.
    pub fn builtin_flag() -> Self {
        Self {
            models: vec![ModelDesc::new(
                "Flag",
                vec![MaterialDesc {
                    name: "flag".into(),
                    emission: Vec3::ZERO,
                    emission_texture: TextureHandle(20),
                }],
            )],
        }
    }

    /// The stock planet: land and sea plus glowing city lights.
    pub fn builtin_planet() -> Self {
        let material = |name: &str, emission: Vec3, texture: u32| MaterialDesc {
            name: name.into(),
            emission,
            emission_texture: TextureHandle(texture),
        };
        Self {
            models: vec![
                ModelDesc::new(
                    "Earth",
                    vec![
                        material("sea", Vec3::ZERO, 0),
                        material("land", Vec3::ZERO, 0),
                    ],
                ),
                ModelDesc::new(
                    "Cities",
                    vec![material("windows", Vec3::new(1.0, 0.85, 0.4), 31)],
                ),
            ],
        }
    }
}

pub fn crate_info() -> &'static str {
    "flagflight-assets v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_manifest_with_defaults() {
        let manifest = ModelManifest::from_json_str(
            r#"{ "models": [ { "name": "Hull", "materials": [ { "name": "body" } ] } ] }"#,
        )
        .unwrap();
        assert_eq!(manifest.models[0].offset, Vec3::ZERO);
        let m = &manifest.models[0].materials[0];
        assert_eq!(m.emission, Vec3::ZERO);
        assert_eq!(m.emission_texture, TextureHandle::NO_EMISSION);
    }

    #[test]
    fn malformed_manifest_is_json_error() {
        let err = ModelManifest::from_json_str("{ models: ").unwrap_err();
        assert!(matches!(err, AssetError::Json(_)));
    }

    #[test]
    fn save_and_load() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        let manifest = ModelManifest::builtin_plane();
        manifest.save(tmp.path()).unwrap();
        let loaded = ModelManifest::load(tmp.path()).unwrap();
        assert_eq!(loaded, manifest);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = ModelManifest::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, AssetError::Io(_)));
    }

    #[test]
    fn builtin_plane_has_every_part() {
        assert_eq!(ModelManifest::builtin_plane().models.len(), PlanePart::COUNT);
    }
}
