//! Resolution of manifest objects into the scene's fixed part tables.

use crate::{AssetError, ModelDesc, ModelManifest};
use flagflight_common::PlanePart;
use flagflight_kernel::{Emission, PlaneEmission, PlanetEmission, SceneModels};
use glam::Mat4;
use tracing::{debug, info};

/// A plane model with every object resolved to its [`PlanePart`].
#[derive(Debug, Clone, PartialEq)]
pub struct PlaneModel {
    parts: Vec<ModelDesc>,
}

impl PlaneModel {
    /// Map each object onto a part. Unknown or repeated names, a wrong object
    /// count, or a light part without a material are load errors.
    pub fn resolve(manifest: ModelManifest) -> Result<Self, AssetError> {
        let found = manifest.models.len();
        if found != PlanePart::COUNT {
            return Err(AssetError::PartCountMismatch {
                expected: PlanePart::COUNT,
                found,
            });
        }

        let mut slots: [Option<ModelDesc>; PlanePart::COUNT] = Default::default();
        for model in manifest.models {
            let part = PlanePart::from_model_name(&model.name)
                .ok_or_else(|| AssetError::UnknownPart(model.name.clone()))?;
            if part.is_light() && model.materials.is_empty() {
                return Err(AssetError::MissingMaterial(part));
            }
            let slot = &mut slots[part.index()];
            if slot.is_some() {
                return Err(AssetError::DuplicatePart(part));
            }
            debug!(%part, materials = model.materials.len(), "resolved plane part");
            *slot = Some(model);
        }

        // Ten distinct known names fill all ten slots.
        let parts: Vec<ModelDesc> = slots.into_iter().flatten().collect();
        info!(parts = parts.len(), "plane model resolved");
        Ok(Self { parts })
    }

    pub fn part(&self, part: PlanePart) -> &ModelDesc {
        &self.parts[part.index()]
    }

    /// Static transform of every part relative to the plane body.
    pub fn part_offsets(&self) -> [Mat4; PlanePart::COUNT] {
        PlanePart::ALL.map(|part| Mat4::from_translation(self.part(part).offset))
    }

    /// Capture the first material's emission of every light part.
    pub fn emission(&self) -> PlaneEmission {
        let mut table = PlaneEmission::new();
        for part in PlanePart::ALL.into_iter().filter(|p| p.is_light()) {
            if let Some(material) = self.part(part).materials.first() {
                table.register(
                    part,
                    Emission {
                        color: material.emission,
                        texture: material.emission_texture,
                    },
                );
            }
        }
        table
    }
}

/// Everything the scene keeps from the loaded plane and planet.
pub fn scene_models(plane: &PlaneModel, planet: &PlanetModel) -> SceneModels {
    SceneModels {
        plane_emission: plane.emission(),
        planet_emission: planet.emission(),
        part_offsets: plane.part_offsets(),
    }
}

/// The towed flag: a single cloth object.
#[derive(Debug, Clone, PartialEq)]
pub struct FlagModel {
    model: ModelDesc,
}

impl FlagModel {
    pub fn resolve(manifest: ModelManifest) -> Result<Self, AssetError> {
        let mut models = manifest.models;
        if models.len() != 1 {
            return Err(AssetError::FlagPartCount(models.len()));
        }
        let model = models.remove(0);
        Ok(Self { model })
    }

    pub fn model(&self) -> &ModelDesc {
        &self.model
    }
}

/// The planet: any number of objects, some with glowing materials.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanetModel {
    parts: Vec<ModelDesc>,
}

impl PlanetModel {
    pub fn resolve(manifest: ModelManifest) -> Result<Self, AssetError> {
        if manifest.models.is_empty() {
            return Err(AssetError::EmptyPlanet);
        }
        Ok(Self {
            parts: manifest.models,
        })
    }

    pub fn parts(&self) -> &[ModelDesc] {
        &self.parts
    }

    /// Capture every material's emission texture and every glowing color.
    pub fn emission(&self) -> PlanetEmission {
        let mut table = PlanetEmission::new();
        for (part_id, part) in self.parts.iter().enumerate() {
            for (material_id, material) in part.materials.iter().enumerate() {
                table.register(
                    part_id,
                    material_id,
                    material.emission,
                    material.emission_texture,
                );
            }
        }
        info!(
            materials = table.len(),
            glowing = table.glowing_count(),
            "planet emission captured"
        );
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MaterialDesc;
    use flagflight_common::TextureHandle;
    use glam::Vec3;

    #[test]
    fn scene_models_carry_offsets_and_emission() {
        let mut manifest = ModelManifest::builtin_plane();
        manifest.models[PlanePart::Propeller.index()].offset = Vec3::new(0.0, 0.2, 3.1);
        let plane = PlaneModel::resolve(manifest).unwrap();
        let planet = PlanetModel::resolve(ModelManifest::builtin_planet()).unwrap();

        let models = scene_models(&plane, &planet);
        assert_eq!(
            models.part_offsets[PlanePart::Propeller.index()],
            Mat4::from_translation(Vec3::new(0.0, 0.2, 3.1))
        );
        assert_eq!(models.part_offsets[PlanePart::Hull.index()], Mat4::IDENTITY);
        assert_eq!(models.plane_emission.parts().count(), 6);
        assert_eq!(models.planet_emission.glowing_count(), 1);
    }

    #[test]
    fn builtin_plane_resolves() {
        let plane = PlaneModel::resolve(ModelManifest::builtin_plane()).unwrap();
        assert_eq!(plane.part(PlanePart::Windows).name, "Glass");
        let emission = plane.emission();
        assert_eq!(emission.parts().count(), 6);
        assert_eq!(
            emission.current(PlanePart::LightLeftWing).unwrap().color,
            Vec3::new(1.0, 0.0, 0.0)
        );
    }

    #[test]
    fn resolution_ignores_file_order() {
        let mut manifest = ModelManifest::builtin_plane();
        manifest.models.reverse();
        let plane = PlaneModel::resolve(manifest).unwrap();
        for part in PlanePart::ALL {
            assert_eq!(plane.part(part).name, part.model_name());
        }
    }

    #[test]
    fn unknown_part_name_fails() {
        let mut manifest = ModelManifest::builtin_plane();
        manifest.models[3].name = "Wingtip".into();
        let err = PlaneModel::resolve(manifest).unwrap_err();
        assert!(matches!(err, AssetError::UnknownPart(ref n) if n == "Wingtip"));
    }

    #[test]
    fn part_count_mismatch_fails() {
        let mut manifest = ModelManifest::builtin_plane();
        manifest.models.pop();
        assert!(matches!(
            PlaneModel::resolve(manifest),
            Err(AssetError::PartCountMismatch {
                expected: 10,
                found: 9
            })
        ));
    }

    #[test]
    fn duplicate_part_fails() {
        let mut manifest = ModelManifest::builtin_plane();
        manifest.models[1].name = "Hull".into();
        assert!(matches!(
            PlaneModel::resolve(manifest),
            Err(AssetError::DuplicatePart(PlanePart::Hull))
        ));
    }

    #[test]
    fn light_without_material_fails() {
        let mut manifest = ModelManifest::builtin_plane();
        let idx = PlanePart::LightRudder.index();
        manifest.models[idx].materials.clear();
        assert!(matches!(
            PlaneModel::resolve(manifest),
            Err(AssetError::MissingMaterial(PlanePart::LightRudder))
        ));
    }

    #[test]
    fn flag_needs_exactly_one_model() {
        assert!(FlagModel::resolve(ModelManifest::builtin_flag()).is_ok());
        let mut two = ModelManifest::builtin_flag();
        two.models.push(two.models[0].clone());
        assert!(matches!(
            FlagModel::resolve(two),
            Err(AssetError::FlagPartCount(2))
        ));
    }

    #[test]
    fn empty_planet_fails() {
        assert!(matches!(
            PlanetModel::resolve(ModelManifest::default()),
            Err(AssetError::EmptyPlanet)
        ));
    }

    #[test]
    fn planet_emission_captures_glowing_materials() {
        let manifest = ModelManifest {
            models: vec![ModelDesc::new(
                "Earth",
                vec![
                    MaterialDesc {
                        name: "city".into(),
                        emission: Vec3::new(0.0, 0.0, 0.3),
                        emission_texture: TextureHandle(4),
                    },
                    MaterialDesc {
                        name: "rock".into(),
                        emission: Vec3::ZERO,
                        emission_texture: TextureHandle(5),
                    },
                ],
            )],
        };
        let table = PlanetModel::resolve(manifest).unwrap().emission();
        assert_eq!(table.len(), 2);
        assert_eq!(table.glowing_count(), 1);
    }
}
