// Copyright 2025 the Morph Builder Authors
// SPDX-License-Identifier: Apache-2.0

//! Builder state (`EditorState`) that the editor front end drives.
//!
//! `EditorState` owns the package being edited together with the current
//! selection, zoom and view toggles. The front end reads from it to
//! render and calls its methods from event callbacks; nothing is global.
//! Sub-modules split the methods by domain: file I/O, levels, textures,
//! objects (selection, drag, zoom) and element styles.

mod file_io;
mod levels;
mod objects;
mod styles;
mod textures;

pub use styles::{ElementStyle, PlaneVisibility};

use crate::editing::UnitScale;
use crate::model::{Level, Package, PlacedObject};
use crate::settings;

/// What the drag handles are attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Nothing,
    Morph,
    Target,
    /// Object index within the selected level
    Object(usize),
}

impl Focus {
    /// Id of the element the focus is rendered as
    pub fn element_id(self) -> Option<String> {
        match self {
            Focus::Nothing => None,
            Focus::Morph => Some("morph".to_string()),
            Focus::Target => Some("target".to_string()),
            Focus::Object(index) => Some(object_element_id(index)),
        }
    }
}

/// Element id of the object at `index`
pub fn object_element_id(index: usize) -> String {
    format!("object-{index}")
}

/// Main builder state
pub struct EditorState {
    /// The package being edited
    pub package: Package,

    /// Selected level, if any
    pub level_index: Option<usize>,

    /// Selected texture in the texture list, if any
    pub texture_index: Option<usize>,

    /// Entity the drag handles are attached to
    pub focus: Focus,

    /// Current zoom level (see `settings::zoom`)
    pub zoom: f64,

    /// Units-to-pixels ratio of the level view
    pub unit_scale: UnitScale,

    /// Which planes are shown
    pub plane_visibility: PlaneVisibility,

    /// Error message to display, if any
    pub error_message: Option<String>,

    /// When the package was last saved (formatted time string for UI)
    pub last_saved: Option<String>,
}

impl EditorState {
    /// Create a builder with an empty default package
    pub fn new() -> Self {
        Self {
            package: Package::default(),
            level_index: None,
            texture_index: None,
            focus: Focus::Nothing,
            zoom: settings::zoom::DEFAULT,
            unit_scale: UnitScale::default().scaled(settings::zoom::DEFAULT),
            plane_visibility: PlaneVisibility::default(),
            error_message: None,
            last_saved: None,
        }
    }

    /// Reset to an empty default package with nothing selected.
    /// Zoom and plane visibility are view settings and survive.
    pub fn clear(&mut self) {
        self.package = Package::default();
        self.level_index = None;
        self.texture_index = None;
        self.focus = Focus::Nothing;
    }

    /// The host measured the reference element again. A measurement that
    /// cannot be divided by keeps the previous scale.
    pub fn set_reference_height(&mut self, pixels: f64) -> bool {
        match UnitScale::try_from_reference_height(pixels) {
            Some(scale) => {
                self.unit_scale = scale;
                true
            }
            None => {
                tracing::warn!("Ignoring reference height {}, keeping previous scale", pixels);
                false
            }
        }
    }

    /// The selected level
    pub fn current_level(&self) -> Option<&Level> {
        self.level_index.and_then(|i| self.package.levels.get(i))
    }

    pub fn current_level_mut(&mut self) -> Option<&mut Level> {
        self.level_index.and_then(|i| self.package.levels.get_mut(i))
    }

    /// The focused object of the selected level
    pub fn selected_object(&self) -> Option<&PlacedObject> {
        let Focus::Object(index) = self.focus else {
            return None;
        };
        self.current_level()?.objects.get(index)
    }

    pub fn selected_object_mut(&mut self) -> Option<&mut PlacedObject> {
        let Focus::Object(index) = self.focus else {
            return None;
        };
        self.current_level_mut()?.objects.get_mut(index)
    }

    /// Index of the focused object, if an object has focus
    pub fn object_index(&self) -> Option<usize> {
        match self.focus {
            Focus::Object(index) => Some(index),
            _ => None,
        }
    }
}

impl Default for EditorState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_state_is_empty() {
        let state = EditorState::new();
        assert_eq!(state.package, Package::default());
        assert!(state.current_level().is_none());
        assert!(state.selected_object().is_none());
        assert_eq!(state.zoom, settings::zoom::DEFAULT);
        assert_eq!(
            state.unit_scale.reference_height(),
            settings::units::REFERENCE_HEIGHT * settings::zoom::DEFAULT
        );
    }

    #[test]
    fn clear_keeps_view_settings() {
        let mut state = EditorState::new();
        state.add_level();
        state.zoom_in();
        let zoom = state.zoom;
        state.clear();
        assert!(state.package.levels.is_empty());
        assert_eq!(state.level_index, None);
        assert_eq!(state.zoom, zoom);
    }

    #[test]
    fn zero_reference_height_keeps_scale() {
        let mut state = EditorState::new();
        state.add_level();
        state.add_object();
        let before = state.unit_scale;

        assert!(!state.set_reference_height(0.0));
        assert!(!state.set_reference_height(f64::NAN));
        assert_eq!(state.unit_scale, before);

        let screen = state.focused_screen_box().unwrap();
        assert!(state.apply_drag(&screen));
        let object = state.selected_object().unwrap();
        assert!(object.position.x.is_finite() && object.position.y.is_finite());

        let json = state.save_to_string().unwrap();
        let mut reloaded = EditorState::new();
        reloaded.load_from_str(&json).unwrap();
        assert_eq!(reloaded.package, state.package);

        assert!(state.set_reference_height(640.0));
        assert_eq!(state.unit_scale.reference_height(), 640.0);
    }

    #[test]
    fn focus_element_ids() {
        assert_eq!(Focus::Nothing.element_id(), None);
        assert_eq!(Focus::Morph.element_id().as_deref(), Some("morph"));
        assert_eq!(Focus::Object(4).element_id().as_deref(), Some("object-4"));
    }
}
