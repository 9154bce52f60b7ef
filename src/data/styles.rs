// Copyright 2025 the Morph Builder Authors
// SPDX-License-Identifier: Apache-2.0

//! Element styles for the level view.
//!
//! Every entity of the selected level is rendered as one absolutely
//! positioned element. This module computes what the front end needs to
//! style it: the screen box, stacking index, visibility and image.

use std::collections::HashSet;

use super::{EditorState, object_element_id};
use crate::editing::{Layered, Placement, ScreenBox, to_screen};
use crate::model::Plane;
use crate::settings::{markers, paths};
use kurbo::Vec2;

/// Which planes are currently shown
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaneVisibility {
    hidden: HashSet<Plane>,
}

impl PlaneVisibility {
    pub fn is_visible(&self, plane: Plane) -> bool {
        !self.hidden.contains(&plane)
    }

    pub fn set(&mut self, plane: Plane, visible: bool) {
        if visible {
            self.hidden.remove(&plane);
        } else {
            self.hidden.insert(plane);
        }
    }

    /// Flip a plane's visibility, returning the new state
    pub fn toggle(&mut self, plane: Plane) -> bool {
        let visible = !self.is_visible(plane);
        self.set(plane, visible);
        visible
    }
}

/// Computed style of one level element
#[derive(Debug, Clone, PartialEq)]
pub struct ElementStyle {
    pub element_id: String,
    pub screen: ScreenBox,
    /// Stacking index; larger draws in front
    pub z_index: i32,
    pub visible: bool,
    /// Image URL, if the element shows one
    pub background_image: Option<String>,
    /// Textured objects show only their image
    pub transparent: bool,
}

impl ElementStyle {
    /// The style as CSS property/value pairs
    pub fn css_properties(&self) -> Vec<(&'static str, String)> {
        let mut properties = vec![
            ("width", self.screen.css_width()),
            ("height", self.screen.css_height()),
            ("transform", self.screen.css_transform()),
            ("z-index", self.z_index.to_string()),
            (
                "visibility",
                if self.visible { "visible" } else { "hidden" }.to_string(),
            ),
        ];
        if self.transparent {
            properties.push(("background-color", "rgba(0,0,0,0)".to_string()));
        }
        if let Some(url) = &self.background_image {
            properties.push(("background-image", format!("url('{url}')")));
        }
        properties
    }
}

impl EditorState {
    fn marker_style(
        &self,
        element_id: &str,
        placement: Placement,
        entity: &impl Layered,
        image: String,
    ) -> ElementStyle {
        ElementStyle {
            element_id: element_id.to_string(),
            screen: to_screen(self.unit_scale, &placement),
            z_index: entity.draw_order(),
            visible: self.plane_visibility.is_visible(entity.plane()),
            background_image: Some(image),
            transparent: false,
        }
    }

    /// Style of the morph start marker
    pub fn morph_style(&self) -> Option<ElementStyle> {
        let morph = &self.current_level()?.morph;
        let half = markers::MORPH_HALF_SIZE;
        Some(self.marker_style(
            "morph",
            Placement::new(morph.position, Vec2::new(half, half), 0.0),
            morph,
            format!("{}img/{}.png", paths::ASSETS_DIR, morph.state),
        ))
    }

    /// Style of the target marker
    pub fn target_style(&self) -> Option<ElementStyle> {
        let target = &self.current_level()?.target;
        let half = markers::TARGET_HALF_SIZE;
        Some(self.marker_style(
            "target",
            Placement::new(target.position, Vec2::new(half, half), 0.0),
            target,
            format!("{}img/target.png", paths::ASSETS_DIR),
        ))
    }

    /// Style of an object of the selected level
    pub fn object_style(&self, index: usize) -> Option<ElementStyle> {
        let object = self.current_level()?.objects.get(index)?;
        let placement = Placement::new(object.position, object.size, object.rotation);
        let background_image = object
            .texture_index()
            .and_then(|texture| self.texture_url(texture));
        Some(ElementStyle {
            element_id: object_element_id(index),
            screen: to_screen(self.unit_scale, &placement),
            z_index: object.draw_order(),
            visible: self.plane_visibility.is_visible(object.plane()),
            transparent: background_image.is_some(),
            background_image,
        })
    }

    /// CSS class of an object: its role in lowercase
    pub fn object_class(&self, index: usize) -> Option<String> {
        let object = self.current_level()?.objects.get(index)?;
        Some(object.role().name().to_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{MorphState, Role};

    fn state_with_object() -> EditorState {
        let mut state = EditorState::new();
        state.package.name = "caves".to_string();
        state.add_level();
        state.add_object();
        state
    }

    #[test]
    fn visibility_toggles() {
        let mut visibility = PlaneVisibility::default();
        assert!(Plane::ALL.iter().all(|&plane| visibility.is_visible(plane)));
        assert!(!visibility.toggle(Plane::Far));
        assert!(!visibility.is_visible(Plane::Far));
        assert!(visibility.is_visible(Plane::View));
        assert!(visibility.toggle(Plane::Far));
    }

    #[test]
    fn marker_styles() {
        let mut state = state_with_object();
        state.current_level_mut().unwrap().morph.state = MorphState::Water;

        let morph = state.morph_style().unwrap();
        assert_eq!(morph.element_id, "morph");
        assert_eq!(morph.z_index, 300);
        assert_eq!(
            morph.background_image.as_deref(),
            Some("assets/builder/img/Water.png")
        );

        let target = state.target_style().unwrap();
        let px = state.unit_scale.pixels_per_unit();
        assert!((target.screen.size.width - 3.0 * px).abs() < 1e-9);
        assert_eq!(
            target.background_image.as_deref(),
            Some("assets/builder/img/target.png")
        );

        state.plane_visibility.set(Plane::View, false);
        assert!(!state.morph_style().unwrap().visible);
    }

    #[test]
    fn untextured_object_style() {
        let state = state_with_object();
        let style = state.object_style(0).unwrap();
        assert_eq!(style.element_id, "object-0");
        assert_eq!(style.z_index, 289);
        assert!(style.background_image.is_none());
        assert!(!style.transparent);
        assert!(state.object_style(1).is_none());
    }

    #[test]
    fn textured_object_style() {
        let mut state = state_with_object();
        state.add_textures(["rock.png"]);
        state.set_object_texture(Some(0));
        {
            let info = state.selected_object_mut().unwrap().texture_info_mut().unwrap();
            info.plane = Plane::Mid;
            info.layer = 7;
        }
        state.plane_visibility.set(Plane::Mid, false);

        let style = state.object_style(0).unwrap();
        assert_eq!(style.z_index, 193);
        assert!(!style.visible);
        assert!(style.transparent);
        assert_eq!(
            style.background_image.as_deref(),
            Some("assets/level/caves/rock.png")
        );

        let css = style.css_properties();
        assert!(css.contains(&("visibility", "hidden".to_string())));
        assert!(css.contains(&("background-color", "rgba(0,0,0,0)".to_string())));
        assert!(css.contains(&(
            "background-image",
            "url('assets/level/caves/rock.png')".to_string()
        )));
    }

    #[test]
    fn object_class_is_lowercase_role() {
        let mut state = state_with_object();
        assert_eq!(state.object_class(0).as_deref(), Some("none"));
        state.set_object_role(Role::Accelerator);
        assert_eq!(state.object_class(0).as_deref(), Some("accelerator"));
    }
}
