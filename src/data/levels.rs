// Copyright 2025 the Morph Builder Authors
// SPDX-License-Identifier: Apache-2.0

//! Level list management for EditorState

use super::{EditorState, Focus};
use crate::model::Level;

impl EditorState {
    /// Select a level by index. Returns false (and selects nothing) if the
    /// index is out of range.
    pub fn select_level(&mut self, index: usize) -> bool {
        self.focus = Focus::Nothing;
        if index < self.package.levels.len() {
            self.level_index = Some(index);
            true
        } else {
            self.level_index = None;
            false
        }
    }

    /// Append a default level and select it
    pub fn add_level(&mut self) -> usize {
        self.package.levels.push(Level::default());
        let index = self.package.levels.len() - 1;
        self.select_level(index);
        index
    }

    /// Remove the selected level
    pub fn remove_level(&mut self) -> Option<Level> {
        self.focus = Focus::Nothing;
        let index = self.level_index.take()?;
        if index >= self.package.levels.len() {
            return None;
        }
        let level = self.package.levels.remove(index);
        tracing::debug!("Removed level {} ({})", index, level.name);
        Some(level)
    }

    /// Swap the selected level with the one before it
    pub fn move_level_up(&mut self) -> bool {
        match self.level_index {
            Some(index) if index > 0 && index < self.package.levels.len() => {
                self.package.levels.swap(index - 1, index);
                self.select_level(index - 1)
            }
            _ => false,
        }
    }

    /// Swap the selected level with the one after it
    pub fn move_level_down(&mut self) -> bool {
        match self.level_index {
            Some(index) if index + 1 < self.package.levels.len() => {
                self.package.levels.swap(index, index + 1);
                self.select_level(index + 1)
            }
            _ => false,
        }
    }
}
