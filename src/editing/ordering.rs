// Copyright 2025 the Morph Builder Authors
// SPDX-License-Identifier: Apache-2.0

//! Stacking order of level entities.
//!
//! An entity's draw key is its plane's base minus its layer; larger keys
//! draw in front. Planes own disjoint bands as long as every layer stays
//! inside `0..LAYER_BOUND`; with equal layers a nearer plane always wins.

use crate::model::{Level, ModelError, Morph, PlacedObject, Plane, Target};
use crate::settings::ordering::{LAYER_BOUND, UNTEXTURED_LAYER};

/// Draw key for a plane and a layer within it. Saturates for layers far
/// outside the band, which package files do not rule out.
pub fn draw_order(plane: Plane, layer: i32) -> i32 {
    plane.base().saturating_sub(layer)
}

/// Plane base looked up by name, for callers holding raw strings
pub fn plane_base(name: &str) -> Result<i32, ModelError> {
    Ok(name.parse::<Plane>()?.base())
}

/// Whether a layer keeps its entity inside its plane's band
pub fn layer_in_band(layer: i32) -> bool {
    (0..LAYER_BOUND).contains(&layer)
}

/// Anything with a plane and a layer
pub trait Layered {
    fn plane(&self) -> Plane;
    fn layer(&self) -> i32;

    fn draw_order(&self) -> i32 {
        draw_order(self.plane(), self.layer())
    }
}

impl Layered for Morph {
    fn plane(&self) -> Plane {
        Plane::View
    }

    fn layer(&self) -> i32 {
        self.layer
    }
}

impl Layered for Target {
    fn plane(&self) -> Plane {
        Plane::View
    }

    fn layer(&self) -> i32 {
        self.layer
    }
}

/// Textured objects use their texture's plane and layer; bare objects sit
/// on the View plane at a fixed layer.
impl Layered for PlacedObject {
    fn plane(&self) -> Plane {
        self.texture_info().map_or(Plane::View, |info| info.plane)
    }

    fn layer(&self) -> i32 {
        self.texture_info()
            .map_or(UNTEXTURED_LAYER, |info| info.layer)
    }
}

/// One drawable entity of a level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Drawable {
    Morph,
    Target,
    Object(usize),
}

/// Draw key of one entity, noting layers that leave their plane's band
fn draw_key(entity: &impl Layered, item: Drawable) -> i32 {
    let layer = entity.layer();
    if !layer_in_band(layer) {
        tracing::warn!(
            "{:?} has layer {} outside 0..{}, planes may interleave",
            item,
            layer,
            LAYER_BOUND
        );
    }
    entity.draw_order()
}

/// Level entities sorted back to front. Ties keep document order, with
/// the markers before the objects.
pub fn back_to_front(level: &Level) -> Vec<Drawable> {
    let mut items: Vec<(i32, Drawable)> = vec![
        (draw_key(&level.morph, Drawable::Morph), Drawable::Morph),
        (draw_key(&level.target, Drawable::Target), Drawable::Target),
    ];
    items.extend(level.objects.iter().enumerate().map(|(index, object)| {
        let item = Drawable::Object(index);
        (draw_key(object, item), item)
    }));
    items.sort_by_key(|(key, _)| *key);
    items.into_iter().map(|(_, item)| item).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Texture;

    #[test]
    fn view_outranks_mid() {
        for layer in -99..=99 {
            assert!(draw_order(Plane::View, layer) > draw_order(Plane::Mid, layer));
            assert!(draw_order(Plane::Near, layer) > draw_order(Plane::View, layer));
        }
        // Bands stay disjoint for in-band layers
        for view_layer in 0..100 {
            for mid_layer in [0, 5, 99] {
                assert!(draw_order(Plane::View, view_layer) > draw_order(Plane::Mid, mid_layer));
            }
        }
        assert!(plane_base("View").unwrap() - 11 > plane_base("Mid").unwrap() - 5);
    }

    #[test]
    fn unknown_plane_name() {
        assert!(matches!(plane_base("Back"), Err(ModelError::UnknownPlane(_))));
    }

    #[test]
    fn extreme_layers_saturate() {
        assert_eq!(draw_order(Plane::Far, i32::MIN), i32::MAX);
        assert_eq!(draw_order(Plane::Near, i32::MAX), 400 - i32::MAX);

        let mut level = Level::new();
        level.morph.layer = i32::MIN;
        level.target.layer = i32::MAX;
        assert_eq!(
            back_to_front(&level),
            vec![Drawable::Target, Drawable::Morph]
        );
    }

    #[test]
    fn layer_band() {
        assert!(layer_in_band(0));
        assert!(layer_in_band(99));
        assert!(!layer_in_band(-1));
        assert!(!layer_in_band(100));
    }

    #[test]
    fn markers_and_objects() {
        let mut level = Level::new();
        level.morph.layer = 2;
        assert_eq!(level.morph.draw_order(), 298);
        assert_eq!(level.target.draw_order(), 300);

        let textures = vec![Texture::new("far.png")];
        let bare = PlacedObject::new();
        assert_eq!(bare.draw_order(), 289);

        let mut far = PlacedObject::new();
        far.set_texture(Some(0), &textures).unwrap();
        far.texture_info_mut().unwrap().plane = Plane::Far;
        assert_eq!(far.draw_order(), 95);

        level.objects = vec![bare, far];
        assert_eq!(
            back_to_front(&level),
            vec![
                Drawable::Object(1),
                Drawable::Object(0),
                Drawable::Morph,
                Drawable::Target
            ]
        );
    }
}
