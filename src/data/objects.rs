// Copyright 2025 the Morph Builder Authors
// SPDX-License-Identifier: Apache-2.0

//! Object editing for EditorState: selection, attribute changes, drag
//! feedback and zoom.
//!
//! Drag handling follows the round trip the level view relies on: the
//! focused entity is shown with `to_screen`, a drag helper rewrites the
//! element, and `apply_drag` reads the new placement back with
//! `from_screen`.

use super::{EditorState, Focus};
use crate::editing::{MeasureElement, Placement, ScreenBox, from_screen, to_screen};
use crate::model::{ModelError, Role};
use crate::settings::{markers, zoom};
use anyhow::{Context, Result};
use kurbo::Vec2;

impl EditorState {
    /// Append a default object to the selected level and focus it
    pub fn add_object(&mut self) -> Option<usize> {
        let index = self.current_level_mut()?.add_object();
        self.focus = Focus::Object(index);
        Some(index)
    }

    /// Remove the focused object
    pub fn remove_object(&mut self) -> bool {
        let Focus::Object(index) = self.focus else {
            return false;
        };
        self.focus = Focus::Nothing;
        match self.current_level_mut() {
            Some(level) if index < level.objects.len() => {
                level.objects.remove(index);
                true
            }
            _ => false,
        }
    }

    /// Focus an object of the selected level
    pub fn select_object(&mut self, index: usize) -> bool {
        let exists = self
            .current_level()
            .is_some_and(|level| index < level.objects.len());
        self.focus = if exists {
            Focus::Object(index)
        } else {
            Focus::Nothing
        };
        exists
    }

    pub fn unselect_object(&mut self) {
        self.focus = Focus::Nothing;
    }

    pub fn select_morph(&mut self) {
        self.focus = Focus::Morph;
    }

    pub fn select_target(&mut self) {
        self.focus = Focus::Target;
    }

    /// Change the focused object's role, rebuilding its payload
    pub fn set_object_role(&mut self, role: Role) -> bool {
        match self.selected_object_mut() {
            Some(object) => {
                object.set_role(role);
                true
            }
            None => false,
        }
    }

    /// Bind the focused object to a texture, or unbind it with `None`.
    ///
    /// An index past the texture list is treated as "no texture". Returns
    /// whether the requested binding was applied.
    pub fn set_object_texture(&mut self, texture: Option<usize>) -> bool {
        let Focus::Object(index) = self.focus else {
            return false;
        };
        let Some(level) = self.level_index.and_then(|i| self.package.levels.get_mut(i)) else {
            return false;
        };
        let Some(object) = level.objects.get_mut(index) else {
            return false;
        };
        match object.set_texture(texture, &self.package.textures) {
            Ok(()) => true,
            Err(e @ ModelError::ReferenceOutOfRange { .. }) => {
                tracing::warn!("{}, clearing texture of {}", e, object.name);
                object.clear_texture();
                false
            }
            Err(e) => {
                tracing::error!("Failed to set texture: {}", e);
                false
            }
        }
    }

    // ------------------------------------------------------------------------
    // Drag feedback
    // ------------------------------------------------------------------------

    /// Placement of the focused entity in level space
    pub fn focused_placement(&self) -> Option<Placement> {
        let level = self.current_level()?;
        match self.focus {
            Focus::Nothing => None,
            Focus::Morph => Some(Placement::new(
                level.morph.position,
                Vec2::new(markers::MORPH_HALF_SIZE, markers::MORPH_HALF_SIZE),
                0.0,
            )),
            Focus::Target => Some(Placement::new(
                level.target.position,
                Vec2::new(markers::TARGET_HALF_SIZE, markers::TARGET_HALF_SIZE),
                0.0,
            )),
            Focus::Object(index) => {
                let object = level.objects.get(index)?;
                Some(Placement::new(object.position, object.size, object.rotation))
            }
        }
    }

    /// Screen box the drag handles should follow
    pub fn focused_screen_box(&self) -> Option<ScreenBox> {
        self.focused_placement()
            .map(|placement| to_screen(self.unit_scale, &placement))
    }

    /// Take over a dragged element's geometry. Objects take position, size
    /// and rotation; the markers can only move.
    pub fn apply_drag(&mut self, screen: &ScreenBox) -> bool {
        let placement = from_screen(self.unit_scale, screen);
        let focus = self.focus;
        let Some(level) = self.current_level_mut() else {
            return false;
        };
        match focus {
            Focus::Nothing => false,
            Focus::Morph => {
                level.morph.position = placement.position;
                true
            }
            Focus::Target => {
                level.target.position = placement.position;
                true
            }
            Focus::Object(index) => match level.objects.get_mut(index) {
                Some(object) => {
                    object.position = placement.position;
                    object.size = placement.size;
                    object.rotation = placement.rotation;
                    true
                }
                None => false,
            },
        }
    }

    /// Measure the focused element through the host and apply its geometry
    pub fn apply_drag_from(&mut self, measure: &impl MeasureElement) -> Result<bool> {
        let Some(element_id) = self.focus.element_id() else {
            return Ok(false);
        };
        let measured = measure
            .measure(&element_id)
            .with_context(|| format!("Element {} is not rendered", element_id))?;
        let screen = measured
            .screen_box()
            .with_context(|| format!("Failed to read transform of {}", element_id))?;
        Ok(self.apply_drag(&screen))
    }

    // ------------------------------------------------------------------------
    // Zoom
    // ------------------------------------------------------------------------

    pub fn zoom_in(&mut self) {
        self.set_zoom(self.zoom * zoom::IN_FACTOR);
    }

    pub fn zoom_out(&mut self) {
        self.set_zoom(self.zoom * zoom::OUT_FACTOR);
    }

    /// Clamp and apply a zoom level. The unit scale follows so geometry
    /// stays consistent until the host measures the reference again.
    fn set_zoom(&mut self, requested: f64) {
        self.unselect_object();
        let clamped = requested.clamp(zoom::MIN, zoom::MAX);
        self.unit_scale = self.unit_scale.scaled(clamped / self.zoom);
        self.zoom = clamped;
        tracing::debug!("Zoom set to {:.3}", self.zoom);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editing::MeasuredElement;
    use crate::model::Plane;
    use kurbo::{Affine, Point};
    use std::collections::HashMap;

    struct FakeDom(HashMap<String, MeasuredElement>);

    impl MeasureElement for FakeDom {
        fn measure(&self, element_id: &str) -> Option<MeasuredElement> {
            self.0.get(element_id).cloned()
        }
    }

    fn state_with_object() -> EditorState {
        let mut state = EditorState::new();
        state.add_level();
        state.add_object();
        state
    }

    #[test]
    fn add_and_remove_objects() {
        let mut state = EditorState::new();
        assert_eq!(state.add_object(), None);

        state.add_level();
        assert_eq!(state.add_object(), Some(0));
        assert_eq!(state.add_object(), Some(1));
        assert_eq!(state.object_index(), Some(1));

        assert!(state.remove_object());
        assert_eq!(state.current_level().unwrap().objects.len(), 1);
        assert_eq!(state.focus, Focus::Nothing);
        assert!(!state.remove_object());
    }

    #[test]
    fn role_changes_go_to_focused_object() {
        let mut state = state_with_object();
        assert!(state.set_object_role(Role::Block));
        assert!(state.selected_object().unwrap().block().is_some());

        assert!(state.set_object_role(Role::Accelerator));
        let object = state.selected_object().unwrap();
        assert!(object.block().is_none());
        assert!(object.accelerator().is_some());

        state.unselect_object();
        assert!(!state.set_object_role(Role::Grid));
    }

    #[test]
    fn bad_texture_index_is_tolerated() {
        let mut state = state_with_object();
        state.add_textures(["a.png"]);
        assert!(state.set_object_texture(Some(0)));
        state
            .selected_object_mut()
            .unwrap()
            .texture_info_mut()
            .unwrap()
            .plane = Plane::Near;

        assert!(!state.set_object_texture(Some(5)));
        let object = state.selected_object().unwrap();
        assert_eq!(object.texture_ref(), -1);
        assert!(object.texture_info().is_none());
    }

    #[test]
    fn object_drag_updates_all_fields() {
        let mut state = state_with_object();
        let mut screen = state.focused_screen_box().unwrap();
        screen.size.width *= 2.0;
        screen.transform = Affine::translate((32.0, 0.0)) * screen.transform;
        assert!(state.apply_drag(&screen));

        let object = state.selected_object().unwrap();
        let px = state.unit_scale.pixels_per_unit();
        assert!((object.size.x - 2.0).abs() < 1e-9);
        assert!((object.size.y - 1.0).abs() < 1e-9);
        // Left edge moved right by 32 px, and the box grew to the right
        assert!((object.position.x - (32.0 / px + 1.0)).abs() < 1e-9);
        assert!(object.position.y.abs() < 1e-9);
    }

    #[test]
    fn marker_drag_only_moves() {
        let mut state = state_with_object();
        state.select_morph();
        let mut screen = state.focused_screen_box().unwrap();
        screen.size.width *= 3.0;
        screen.transform = Affine::translate((0.0, -64.0)) * screen.transform;
        assert!(state.apply_drag(&screen));

        let level = state.current_level().unwrap();
        let px = state.unit_scale.pixels_per_unit();
        // The marker size is fixed, only the position is taken over
        assert!((level.morph.position.y - (1.0 + 64.0 / px)).abs() < 1e-9);
    }

    #[test]
    fn drag_through_measurement() {
        let mut state = state_with_object();
        state.select_target();
        let screen = state.focused_screen_box().unwrap();

        let mut dom = HashMap::new();
        dom.insert(
            "target".to_string(),
            MeasuredElement {
                width: screen.size.width,
                height: screen.size.height,
                transform: screen.css_transform(),
            },
        );
        assert!(state.apply_drag_from(&FakeDom(dom)).unwrap());
        let target = &state.current_level().unwrap().target;
        assert!((target.position - Point::new(0.0, -1.0)).hypot() < 1e-9);

        state.select_morph();
        assert!(state.apply_drag_from(&FakeDom(HashMap::new())).is_err());
    }

    #[test]
    fn zoom_is_clamped_and_rescales_units() {
        let mut state = state_with_object();
        let before = state.unit_scale.pixels_per_unit();
        state.zoom_in();
        assert_eq!(state.focus, Focus::Nothing);
        assert!((state.unit_scale.pixels_per_unit() - before * 1.25).abs() < 1e-9);

        for _ in 0..20 {
            state.zoom_in();
        }
        assert_eq!(state.zoom, zoom::MAX);
        for _ in 0..40 {
            state.zoom_out();
        }
        assert_eq!(state.zoom, zoom::MIN);
    }
}
