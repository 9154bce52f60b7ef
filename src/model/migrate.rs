// Copyright 2025 the Morph Builder Authors
// SPDX-License-Identifier: Apache-2.0

//! Upgrading stored packages to the current schema.
//!
//! Migration runs in two passes. The first rewrites legacy layouts on the
//! raw JSON tree (things the typed records cannot even express, such as
//! a texture referenced by filename). The second decodes the tree into
//! records, where every missing field takes its default, and converts the
//! records into the typed model.
//!
//! Both passes are no-ops on current data, so migrating an already
//! migrated package returns it unchanged.

use serde_json::{Map, Value};

use super::error::ModelError;
use super::package::{Package, TextureInfo};
use super::record::{PackageRecord, layer_from_f64};

/// Upgrade a parsed package document of any known schema version
pub fn migrate(raw: Value) -> Result<Package, ModelError> {
    let Value::Object(mut root) = raw else {
        return Err(ModelError::malformed("package is not a JSON object"));
    };

    if upgrade_legacy_textures(&mut root)? {
        tracing::info!("Upgraded legacy texture references");
    }

    let record: PackageRecord = serde_json::from_value(Value::Object(root))?;
    let package = Package::try_from(record)?;
    tracing::debug!(
        "Migrated package {} ({} textures, {} levels)",
        package.name,
        package.textures.len(),
        package.levels.len()
    );
    Ok(package)
}

/// Parse and upgrade a package document
pub fn migrate_str(json: &str) -> Result<Package, ModelError> {
    let raw: Value = serde_json::from_str(json)?;
    migrate(raw)
}

// ============================================================================
// LEGACY TEXTURES
// ============================================================================
// Old packages stored `textures` as a flat list of filenames and objects
// referenced textures by filename, with their draw layer and plane as
// top-level `layer` / `texture_plane` fields.

/// Rewrite filename texture references into indices plus `texture_info`,
/// and a flat texture list into single-frame sequences. Returns whether
/// anything changed.
fn upgrade_legacy_textures(root: &mut Map<String, Value>) -> Result<bool, ModelError> {
    let textures = match root.get("textures") {
        None => Vec::new(),
        Some(Value::Array(textures)) => textures.clone(),
        Some(_) => return Err(ModelError::malformed("`textures` is not a list")),
    };

    // The first entry decides the layout, as older builders wrote it
    let flat = textures.first().is_some_and(|first| !first.is_array());
    let names = texture_names(&textures, flat)?;

    let mut changed = false;
    for object in objects_mut(root)? {
        changed |= upgrade_object(object, &names)?;
    }

    if flat {
        let wrapped = names
            .into_iter()
            .map(|name| Value::Array(vec![Value::String(name)]))
            .collect();
        root.insert("textures".to_string(), Value::Array(wrapped));
        changed = true;
    }

    Ok(changed)
}

/// Filenames used to resolve string references: the entries of a flat
/// list, or the base frame of each sequence.
fn texture_names(textures: &[Value], flat: bool) -> Result<Vec<String>, ModelError> {
    textures
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let name = if flat {
                entry.as_str()
            } else {
                entry
                    .as_array()
                    .and_then(|frames| frames.first())
                    .and_then(Value::as_str)
            };
            name.map(str::to_string).ok_or_else(|| {
                ModelError::malformed(format!("texture {index} is not a filename or frame list"))
            })
        })
        .collect()
}

/// Upgrade one object if it still references its texture by name.
/// Legacy fields that are present must be well typed; only absent ones
/// fall back to the defaults.
fn upgrade_object(object: &mut Map<String, Value>, names: &[String]) -> Result<bool, ModelError> {
    let Some(Value::String(filename)) = object.get("texture") else {
        return Ok(false);
    };
    let index = names.iter().position(|name| name == filename);

    let defaults = TextureInfo::default();
    let layer = match object.remove("layer") {
        None => defaults.layer,
        Some(value) => value.as_f64().and_then(layer_from_f64).ok_or_else(|| {
            ModelError::malformed(format!("legacy `layer` {value} is not an integer"))
        })?,
    };
    let plane = match object.remove("texture_plane") {
        None => defaults.plane.name().to_string(),
        Some(Value::String(plane)) => plane,
        Some(value) => {
            return Err(ModelError::malformed(format!(
                "legacy `texture_plane` {value} is not a name"
            )));
        }
    };

    match index {
        Some(index) => {
            let mut info = Map::new();
            info.insert("layer".to_string(), Value::from(layer));
            info.insert("plane".to_string(), Value::String(plane));
            info.insert("animation".to_string(), Value::from(defaults.animation));

            object.insert("texture".to_string(), Value::from(index));
            object.insert("texture_info".to_string(), Value::Object(info));
        }
        None => {
            tracing::warn!("Legacy texture reference not found in package, dropping");
            object.insert("texture".to_string(), Value::from(-1));
            object.remove("texture_info");
        }
    }
    Ok(true)
}

/// Every object map in every level, checking the nesting on the way
fn objects_mut(root: &mut Map<String, Value>) -> Result<Vec<&mut Map<String, Value>>, ModelError> {
    let levels = match root.get_mut("levels") {
        None => return Ok(Vec::new()),
        Some(Value::Array(levels)) => levels,
        Some(_) => return Err(ModelError::malformed("`levels` is not a list")),
    };

    let mut objects = Vec::new();
    for (level_index, level) in levels.iter_mut().enumerate() {
        let Value::Object(level) = level else {
            return Err(ModelError::malformed(format!(
                "level {level_index} is not an object"
            )));
        };
        match level.get_mut("objects") {
            None => {}
            Some(Value::Array(list)) => {
                for (object_index, object) in list.iter_mut().enumerate() {
                    let Value::Object(object) = object else {
                        return Err(ModelError::malformed(format!(
                            "object {object_index} of level {level_index} is not an object"
                        )));
                    };
                    objects.push(object);
                }
            }
            Some(_) => {
                return Err(ModelError::malformed(format!(
                    "`objects` of level {level_index} is not a list"
                )));
            }
        }
    }
    Ok(objects)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::package::{Level, PlacedObject, Texture};
    use crate::model::states::{MorphState, Plane, Role};
    use kurbo::Point;
    use serde_json::json;

    fn sample_package() -> Package {
        let mut package = Package::new();
        package.name = "caves".to_string();
        package.add_texture("rock.png");
        package.textures.push(
            Texture::from_frames(vec!["fire0.png".to_string(), "fire1.png".to_string()]).unwrap(),
        );

        let mut level = Level::new();
        level.name = "first".to_string();
        level.morph.state = MorphState::Water;
        level.target.position = Point::new(4.0, 2.5);

        let mut block = PlacedObject::new();
        block.set_role(Role::Block);
        block.block_mut().unwrap().particles = vec![0, 2];
        block.set_texture(Some(0), &package.textures).unwrap();

        let mut fire = PlacedObject::new();
        fire.rotation = 0.75;
        fire.set_role(Role::Accelerator);
        fire.set_texture(Some(1), &package.textures).unwrap();
        fire.texture_info_mut().unwrap().animation = 0.25;

        let mut glass = PlacedObject::new();
        glass.set_role(Role::Breakable);
        glass.breakable_mut().unwrap().group = 3;

        level.objects = vec![block, fire, glass];
        package.levels.push(level);
        package
    }

    #[test]
    fn current_package_is_unchanged() {
        let package = sample_package();
        let value = serde_json::to_value(&package).unwrap();
        let migrated = migrate(value.clone()).unwrap();
        assert_eq!(migrated, package);

        // Twice is the same as once
        let again = migrate(serde_json::to_value(&migrated).unwrap()).unwrap();
        assert_eq!(again, package);
        assert_eq!(serde_json::to_value(&again).unwrap(), value);
    }

    #[test]
    fn legacy_flat_textures() {
        let package = migrate(json!({
            "textures": ["a.png", "b.png"],
            "levels": [{
                "objects": [{ "texture": "b.png", "layer": 3, "texture_plane": "Mid" }]
            }]
        }))
        .unwrap();

        assert_eq!(
            package.textures,
            vec![Texture::new("a.png"), Texture::new("b.png")]
        );
        let object = &package.levels[0].objects[0];
        assert_eq!(object.texture_ref(), 1);
        assert_eq!(
            object.texture_info(),
            Some(&TextureInfo {
                layer: 3,
                plane: Plane::Mid,
                animation: 0.0
            })
        );

        let value = serde_json::to_value(&package).unwrap();
        let object = &value["levels"][0]["objects"][0];
        assert!(object.get("layer").is_none());
        assert!(object.get("texture_plane").is_none());
        assert_eq!(value["textures"], json!([["a.png"], ["b.png"]]));
    }

    #[test]
    fn legacy_unknown_filename_is_untextured() {
        let package = migrate(json!({
            "textures": ["a.png"],
            "levels": [{ "objects": [{ "texture": "gone.png", "layer": 1, "texture_plane": "Far" }] }]
        }))
        .unwrap();
        let object = &package.levels[0].objects[0];
        assert_eq!(object.texture_ref(), -1);
        assert!(object.texture_info().is_none());
    }

    #[test]
    fn legacy_fields_keep_their_values() {
        let package = migrate(json!({
            "textures": ["a.png"],
            "levels": [{
                "objects": [{ "texture": "a.png", "layer": 3.0, "texture_plane": "Mid" }]
            }]
        }))
        .unwrap();
        let info = package.levels[0].objects[0].texture_info().unwrap();
        assert_eq!(info.layer, 3);
        assert_eq!(info.plane, Plane::Mid);

        for object in [
            json!({ "texture": "a.png", "layer": 2.5 }),
            json!({ "texture": "a.png", "layer": "3" }),
            json!({ "texture": "a.png", "texture_plane": 2 }),
        ] {
            let raw = json!({ "textures": ["a.png"], "levels": [{ "objects": [object] }] });
            let err = migrate(raw).unwrap_err();
            assert!(err.is_malformed(), "{err}");
        }
    }

    #[test]
    fn legacy_missing_layer_takes_defaults() {
        let package = migrate(json!({
            "textures": ["a.png"],
            "levels": [{ "objects": [{ "texture": "a.png" }] }]
        }))
        .unwrap();
        let info = package.levels[0].objects[0].texture_info().unwrap();
        assert_eq!(info, &TextureInfo::default());
    }

    #[test]
    fn missing_fields_take_defaults() {
        let package = migrate(json!({
            "name": "old",
            "levels": [{ "name": "one", "morph": { "state": "Bubble" } }]
        }))
        .unwrap();
        assert_eq!(package.name, "old");
        assert!(package.textures.is_empty());

        let level = &package.levels[0];
        assert_eq!(level.name, "one");
        assert_eq!(level.morph.state, MorphState::Bubble);
        assert_eq!(level.morph.position, Point::new(0.0, 1.0));
        assert_eq!(level.target, Level::default().target);
        assert_eq!(level.available_morphs, Level::default().available_morphs);
        assert!(level.objects.is_empty());

        assert_eq!(migrate(json!({})).unwrap(), Package::default());
    }

    #[test]
    fn level_without_target_keeps_morph() {
        let package = migrate(json!({
            "levels": [{ "morph": { "position": [3.0, 4.0], "state": "Rubber", "layer": 2 } }]
        }))
        .unwrap();
        let level = &package.levels[0];
        assert_eq!(level.morph.position, Point::new(3.0, 4.0));
        assert_eq!(level.morph.layer, 2);
        assert_eq!(level.target.position, Point::new(0.0, -1.0));
    }

    #[test]
    fn role_payloads_are_created() {
        let package = migrate(json!({
            "levels": [{
                "objects": [
                    { "role": "Block" },
                    { "role": "Breakable" },
                    { "role": "Accelerator" }
                ]
            }]
        }))
        .unwrap();
        let objects = &package.levels[0].objects;
        assert_eq!(objects[0].block(), Some(&Default::default()));
        assert_eq!(objects[1].breakable(), Some(&Default::default()));
        assert_eq!(objects[2].accelerator(), Some(&Default::default()));
    }

    #[test]
    fn malformed_inputs() {
        assert!(migrate(json!([1, 2])).unwrap_err().is_malformed());
        assert!(migrate(json!({ "levels": 3 })).unwrap_err().is_malformed());
        assert!(migrate(json!({ "textures": "a.png" })).unwrap_err().is_malformed());
        assert!(
            migrate(json!({ "levels": [{ "objects": {} }] }))
                .unwrap_err()
                .is_malformed()
        );
        assert!(migrate(json!({ "levels": ["x"] })).unwrap_err().is_malformed());
        assert!(
            migrate(json!({ "textures": ["a.png", ["b.png"]] }))
                .unwrap_err()
                .is_malformed()
        );
        assert!(migrate_str("not json").unwrap_err().is_malformed());
    }

    #[test]
    fn package_deserializes_through_migration() {
        let package: Package =
            serde_json::from_str(r#"{"textures":["a.png"],"levels":[]}"#).unwrap();
        assert_eq!(package.textures, vec![Texture::new("a.png")]);
    }
}
