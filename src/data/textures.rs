// Copyright 2025 the Morph Builder Authors
// SPDX-License-Identifier: Apache-2.0

//! Texture list management for EditorState.
//!
//! Texture images are not stored in the package; only their file names
//! are. The images are expected under `<TEXTURE_DIR><package>/<file>`.

use super::EditorState;
use crate::model::Texture;
use crate::settings::paths;

impl EditorState {
    /// Select a texture by index. Returns false if out of range.
    pub fn select_texture(&mut self, index: usize) -> bool {
        if index < self.package.textures.len() {
            self.texture_index = Some(index);
            true
        } else {
            self.texture_index = None;
            false
        }
    }

    pub fn unselect_texture(&mut self) {
        self.texture_index = None;
    }

    /// The selected texture
    pub fn current_texture(&self) -> Option<&Texture> {
        self.texture_index.and_then(|i| self.package.textures.get(i))
    }

    /// Add one single-frame texture per picked file. Files already used as
    /// a base frame are skipped. The last added texture is selected.
    pub fn add_textures<I, S>(&mut self, filenames: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut added = 0;
        for filename in filenames {
            if let Some(index) = self.package.add_texture(filename) {
                self.select_texture(index);
                added += 1;
            }
        }
        tracing::debug!("Added {} textures", added);
        added
    }

    /// Append frames to the selected texture, skipping frames it already has
    pub fn add_frames<I, S>(&mut self, filenames: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let Some(texture) = self
            .texture_index
            .and_then(|i| self.package.textures.get_mut(i))
        else {
            return 0;
        };
        filenames
            .into_iter()
            .map(|filename| texture.push_frame(filename))
            .filter(|&pushed| pushed)
            .count()
    }

    /// Remove the selected texture and reindex every object that uses a
    /// later texture
    pub fn remove_texture(&mut self) -> Option<Texture> {
        let index = self.texture_index.take()?;
        self.package.remove_texture(index)
    }

    /// URL of a texture's base frame
    pub fn texture_url(&self, index: usize) -> Option<String> {
        let texture = self.package.textures.get(index)?;
        Some(format!(
            "{}{}/{}",
            paths::TEXTURE_DIR,
            self.package.name,
            texture.base_frame()
        ))
    }
}
