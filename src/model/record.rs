// Copyright 2025 the Morph Builder Authors
// SPDX-License-Identifier: Apache-2.0

//! On-disk shape of a package.
//!
//! Records mirror the JSON document field for field. Every record is
//! `#[serde(default)]` with a `Default` equal to the builder defaults, so
//! a field missing from an older file takes its default value while the
//! fields that are present win. Enum values stay strings here and are
//! validated when a record is turned into the typed model.

use std::collections::BTreeMap;

use kurbo::{Point, Size, Vec2};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::error::ModelError;
use super::package::{
    AcceleratorInfo, BlockInfo, BreakableInfo, Level, Morph, Package, PlacedObject, RolePayload,
    Target, Texture, TextureBinding, TextureInfo,
};
use super::states::{PerMorph, Role};

// ============================================================================
// RECORDS
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct PackageRecord {
    pub name: String,
    pub textures: Vec<Vec<String>>,
    pub levels: Vec<LevelRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct LevelRecord {
    pub name: String,
    pub dimension: [f64; 2],
    pub available_morphs: BTreeMap<String, u32>,
    pub morph: MorphRecord,
    pub target: TargetRecord,
    pub objects: Vec<ObjectRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct MorphRecord {
    pub position: [f64; 2],
    pub state: String,
    #[serde(deserialize_with = "deserialize_layer")]
    pub layer: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct TargetRecord {
    pub position: [f64; 2],
    #[serde(deserialize_with = "deserialize_layer")]
    pub layer: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct ObjectRecord {
    pub name: String,
    pub position: [f64; 2],
    pub size: [f64; 2],
    pub rotation: f64,
    pub role: String,
    pub texture: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub texture_info: Option<TextureInfoRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block: Option<BlockRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accelerator: Option<AcceleratorRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breakable: Option<BreakableRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct TextureInfoRecord {
    #[serde(deserialize_with = "deserialize_layer")]
    pub layer: i32,
    pub plane: String,
    pub animation: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct BlockRecord {
    pub particles: Vec<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct AcceleratorRecord {
    pub direction: String,
    pub amplitude: f64,
    pub morph: BTreeMap<String, bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct BreakableRecord {
    pub group: u32,
}

/// Layers from older builders may be written as floats. Integral values
/// within `i32` are accepted.
pub(crate) fn layer_from_f64(value: f64) -> Option<i32> {
    let in_range = value >= f64::from(i32::MIN) && value <= f64::from(i32::MAX);
    (value.fract() == 0.0 && in_range).then_some(value as i32)
}

fn deserialize_layer<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i32, D::Error> {
    let value = f64::deserialize(deserializer)?;
    layer_from_f64(value)
        .ok_or_else(|| serde::de::Error::custom(format!("layer {value} is not an integer")))
}

// ============================================================================
// DEFAULTS
// ============================================================================
// Defaults are derived from the typed model so the two cannot drift.

impl Default for PackageRecord {
    fn default() -> Self {
        Self::from(&Package::default())
    }
}

impl Default for LevelRecord {
    fn default() -> Self {
        Self::from(&Level::default())
    }
}

impl Default for MorphRecord {
    fn default() -> Self {
        Self::from(&Morph::default())
    }
}

impl Default for TargetRecord {
    fn default() -> Self {
        Self::from(&Target::default())
    }
}

impl Default for ObjectRecord {
    fn default() -> Self {
        Self::from(&PlacedObject::default())
    }
}

impl Default for TextureInfoRecord {
    fn default() -> Self {
        Self::from(&TextureInfo::default())
    }
}

impl Default for AcceleratorRecord {
    fn default() -> Self {
        Self::from(&AcceleratorInfo::default())
    }
}

// ============================================================================
// MODEL -> RECORD
// ============================================================================

fn pair(x: f64, y: f64) -> [f64; 2] {
    [x, y]
}

impl From<&Package> for PackageRecord {
    fn from(package: &Package) -> Self {
        Self {
            name: package.name.clone(),
            textures: package
                .textures
                .iter()
                .map(|texture| texture.frames().to_vec())
                .collect(),
            levels: package.levels.iter().map(LevelRecord::from).collect(),
        }
    }
}

impl From<&Level> for LevelRecord {
    fn from(level: &Level) -> Self {
        Self {
            name: level.name.clone(),
            dimension: pair(level.dimension.width, level.dimension.height),
            available_morphs: level.available_morphs.to_named(),
            morph: MorphRecord::from(&level.morph),
            target: TargetRecord::from(&level.target),
            objects: level.objects.iter().map(ObjectRecord::from).collect(),
        }
    }
}

impl From<&Morph> for MorphRecord {
    fn from(morph: &Morph) -> Self {
        Self {
            position: pair(morph.position.x, morph.position.y),
            state: morph.state.name().to_string(),
            layer: morph.layer,
        }
    }
}

impl From<&Target> for TargetRecord {
    fn from(target: &Target) -> Self {
        Self {
            position: pair(target.position.x, target.position.y),
            layer: target.layer,
        }
    }
}

impl From<&PlacedObject> for ObjectRecord {
    fn from(object: &PlacedObject) -> Self {
        Self {
            name: object.name.clone(),
            position: pair(object.position.x, object.position.y),
            size: pair(object.size.x, object.size.y),
            rotation: object.rotation,
            role: object.role().name().to_string(),
            texture: object.texture_ref(),
            texture_info: object.texture_info().map(TextureInfoRecord::from),
            block: object.block().map(|info| BlockRecord {
                particles: info.particles.clone(),
            }),
            accelerator: object.accelerator().map(AcceleratorRecord::from),
            breakable: object
                .breakable()
                .map(|info| BreakableRecord { group: info.group }),
        }
    }
}

impl From<&TextureInfo> for TextureInfoRecord {
    fn from(info: &TextureInfo) -> Self {
        Self {
            layer: info.layer,
            plane: info.plane.name().to_string(),
            animation: info.animation,
        }
    }
}

impl From<&AcceleratorInfo> for AcceleratorRecord {
    fn from(info: &AcceleratorInfo) -> Self {
        Self {
            direction: info.direction.name().to_string(),
            amplitude: info.amplitude,
            morph: info.morph.to_named(),
        }
    }
}

// ============================================================================
// RECORD -> MODEL
// ============================================================================

impl TryFrom<PackageRecord> for Package {
    type Error = ModelError;

    fn try_from(record: PackageRecord) -> Result<Self, Self::Error> {
        let textures = record
            .textures
            .into_iter()
            .enumerate()
            .map(|(index, frames)| {
                Texture::from_frames(frames).ok_or_else(|| {
                    ModelError::malformed(format!("texture {index} has no frames"))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let levels = record
            .levels
            .into_iter()
            .map(|level| level.into_model(&textures))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Package {
            name: record.name,
            textures,
            levels,
        })
    }
}

impl LevelRecord {
    fn into_model(self, textures: &[Texture]) -> Result<Level, ModelError> {
        Ok(Level {
            name: self.name,
            dimension: Size::new(self.dimension[0], self.dimension[1]),
            available_morphs: PerMorph::from_named(&self.available_morphs, 0)?,
            morph: Morph {
                position: Point::new(self.morph.position[0], self.morph.position[1]),
                state: self.morph.state.parse()?,
                layer: self.morph.layer,
            },
            target: Target {
                position: Point::new(self.target.position[0], self.target.position[1]),
                layer: self.target.layer,
            },
            objects: self
                .objects
                .into_iter()
                .map(|object| object.into_model(textures))
                .collect::<Result<Vec<_>, _>>()?,
        })
    }
}

impl ObjectRecord {
    fn into_model(self, textures: &[Texture]) -> Result<PlacedObject, ModelError> {
        let role: Role = self.role.parse()?;

        // Only the payload matching the role survives; a missing one is
        // created from defaults.
        let payload = match role {
            Role::None => RolePayload::None,
            Role::Spikes => RolePayload::Spikes,
            Role::Grid => RolePayload::Grid,
            Role::Block => RolePayload::Block(BlockInfo {
                particles: self.block.unwrap_or_default().particles,
            }),
            Role::Breakable => RolePayload::Breakable(BreakableInfo {
                group: self.breakable.unwrap_or_default().group,
            }),
            Role::Accelerator => {
                let record = self.accelerator.unwrap_or_default();
                RolePayload::Accelerator(AcceleratorInfo {
                    direction: record.direction.parse()?,
                    amplitude: record.amplitude,
                    morph: PerMorph::from_named(&record.morph, false)?,
                })
            }
        };

        let texture = match self.texture {
            -1 => None,
            index => match usize::try_from(index).ok().and_then(|i| textures.get(i)) {
                Some(bound) => {
                    let record = self.texture_info.unwrap_or_default();
                    let mut info = TextureInfo {
                        layer: record.layer,
                        plane: record.plane.parse()?,
                        animation: record.animation,
                    };
                    if !bound.is_animated() {
                        info.animation = 0.0;
                    }
                    Some(TextureBinding {
                        index: index as usize,
                        info,
                    })
                }
                None => {
                    let err = ModelError::ReferenceOutOfRange {
                        index,
                        len: textures.len(),
                    };
                    tracing::warn!("Object {}: {}, treating as untextured", self.name, err);
                    None
                }
            },
        };

        Ok(PlacedObject::from_parts(
            self.name,
            Point::new(self.position[0], self.position[1]),
            Vec2::new(self.size[0], self.size[1]),
            self.rotation,
            payload,
            texture,
        ))
    }
}

// ============================================================================
// SERDE FOR THE TYPED MODEL
// ============================================================================

impl Serialize for Package {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        PackageRecord::from(self).serialize(serializer)
    }
}

/// Deserializing a package always runs the migration, so any file the
/// builder ever wrote can be read back.
impl<'de> Deserialize<'de> for Package {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = serde_json::Value::deserialize(deserializer)?;
        super::migrate::migrate(raw).map_err(serde::de::Error::custom)
    }
}
