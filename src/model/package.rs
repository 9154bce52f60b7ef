// Copyright 2025 the Morph Builder Authors
// SPDX-License-Identifier: Apache-2.0

//! Level package data model.
//!
//! A `Package` owns its textures and levels; levels own their objects.
//! The only reference between entities is an object's texture index,
//! which `Package::remove_texture` keeps pointing at the same texture.
//!
//! Role payloads and texture bindings are modelled as enums/options so
//! an object can never carry a payload that disagrees with its role, or
//! texture attributes without a texture.

use kurbo::{Point, Size, Vec2};

use super::error::ModelError;
use super::states::{AccelerationDirection, MorphState, PerMorph, Plane, Role};

// ============================================================================
// PACKAGE
// ============================================================================

/// Top-level save unit: textures plus an ordered list of levels
#[derive(Debug, Clone, PartialEq)]
pub struct Package {
    pub name: String,
    pub textures: Vec<Texture>,
    pub levels: Vec<Level>,
}

impl Package {
    pub fn new() -> Self {
        Self {
            name: "new_package".to_string(),
            textures: Vec::new(),
            levels: Vec::new(),
        }
    }

    /// Look up a texture by its stored index (`-1` meaning none)
    pub fn texture(&self, index: i64) -> Result<&Texture, ModelError> {
        usize::try_from(index)
            .ok()
            .and_then(|i| self.textures.get(i))
            .ok_or(ModelError::ReferenceOutOfRange {
                index,
                len: self.textures.len(),
            })
    }

    /// Append a single-frame texture unless a texture with the same base
    /// frame already exists. Returns the index of the new texture.
    pub fn add_texture(&mut self, filename: impl Into<String>) -> Option<usize> {
        let filename = filename.into();
        if self.textures.iter().any(|t| t.base_frame() == filename) {
            tracing::debug!("Texture {} already in package, skipping", filename);
            return None;
        }
        self.textures.push(Texture::new(filename));
        Some(self.textures.len() - 1)
    }

    /// Remove a texture and shift every object reference at or above it
    /// down by one. A reference that would drop below zero is cleared.
    pub fn remove_texture(&mut self, index: usize) -> Option<Texture> {
        if index >= self.textures.len() {
            return None;
        }
        let removed = self.textures.remove(index);

        let mut shifted = 0usize;
        for level in &mut self.levels {
            for object in &mut level.objects {
                if object.shift_texture_down(index) {
                    shifted += 1;
                }
            }
        }
        tracing::info!(
            "Removed texture {} ({}), reindexed {} objects",
            index,
            removed.base_frame(),
            shifted
        );

        self.reconcile_textures();
        Some(removed)
    }

    /// Re-establish the texture invariants on every object: bindings must
    /// point at an existing texture and still images carry no animation.
    pub fn reconcile_textures(&mut self) {
        let textures = &self.textures;
        for level in &mut self.levels {
            for object in &mut level.objects {
                object.sync_texture(textures);
            }
        }
    }

    /// Iterate over every placed object in every level
    pub fn objects(&self) -> impl Iterator<Item = &PlacedObject> {
        self.levels.iter().flat_map(|level| level.objects.iter())
    }
}

impl Default for Package {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// TEXTURE
// ============================================================================

/// Frame sequence: one frame is a still image, more frames animate.
/// Always holds at least one frame; the first is the poster frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Texture {
    frames: Vec<String>,
}

impl Texture {
    /// Single-frame texture
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            frames: vec![base.into()],
        }
    }

    /// Texture from a frame list; `None` when the list is empty
    pub fn from_frames(frames: Vec<String>) -> Option<Self> {
        if frames.is_empty() {
            None
        } else {
            Some(Self { frames })
        }
    }

    pub fn frames(&self) -> &[String] {
        &self.frames
    }

    pub fn base_frame(&self) -> &str {
        &self.frames[0]
    }

    pub fn is_animated(&self) -> bool {
        self.frames.len() >= 2
    }

    /// Append a frame unless it is already part of the sequence
    pub fn push_frame(&mut self, filename: impl Into<String>) -> bool {
        let filename = filename.into();
        if self.frames.contains(&filename) {
            return false;
        }
        self.frames.push(filename);
        true
    }
}

// ============================================================================
// LEVEL
// ============================================================================

/// One playable level
#[derive(Debug, Clone, PartialEq)]
pub struct Level {
    pub name: String,
    /// Playfield extent in units
    pub dimension: Size,
    /// How many times each state may be used
    pub available_morphs: PerMorph<u32>,
    pub morph: Morph,
    pub target: Target,
    pub objects: Vec<PlacedObject>,
}

impl Level {
    pub fn new() -> Self {
        Self {
            name: "-".to_string(),
            dimension: Size::new(10.0, 10.0),
            available_morphs: PerMorph::splat(2),
            morph: Morph::default(),
            target: Target::default(),
            objects: Vec::new(),
        }
    }

    /// Append a default object, returning its index
    pub fn add_object(&mut self) -> usize {
        self.objects.push(PlacedObject::default());
        self.objects.len() - 1
    }
}

impl Default for Level {
    fn default() -> Self {
        Self::new()
    }
}

/// Player start marker
#[derive(Debug, Clone, PartialEq)]
pub struct Morph {
    pub position: Point,
    pub state: MorphState,
    pub layer: i32,
}

impl Default for Morph {
    fn default() -> Self {
        Self {
            position: Point::new(0.0, 1.0),
            state: MorphState::Metal,
            layer: 0,
        }
    }
}

/// Win marker
#[derive(Debug, Clone, PartialEq)]
pub struct Target {
    pub position: Point,
    pub layer: i32,
}

impl Default for Target {
    fn default() -> Self {
        Self {
            position: Point::new(0.0, -1.0),
            layer: 0,
        }
    }
}

// ============================================================================
// PLACED OBJECT
// ============================================================================

/// An object placed in a level
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedObject {
    pub name: String,
    /// Center in level units
    pub position: Point,
    /// Half extents in level units
    pub size: Vec2,
    /// Radians
    pub rotation: f64,
    payload: RolePayload,
    texture: Option<TextureBinding>,
}

impl PlacedObject {
    pub fn new() -> Self {
        Self {
            name: "-".to_string(),
            position: Point::ZERO,
            size: Vec2::new(1.0, 1.0),
            rotation: 0.0,
            payload: RolePayload::None,
            texture: None,
        }
    }

    pub(crate) fn from_parts(
        name: String,
        position: Point,
        size: Vec2,
        rotation: f64,
        payload: RolePayload,
        texture: Option<TextureBinding>,
    ) -> Self {
        Self {
            name,
            position,
            size,
            rotation,
            payload,
            texture,
        }
    }

    pub fn role(&self) -> Role {
        self.payload.role()
    }

    pub fn payload(&self) -> &RolePayload {
        &self.payload
    }

    /// Change the role. A different role replaces the payload with the
    /// new role's default; setting the current role keeps the payload.
    pub fn set_role(&mut self, role: Role) {
        if self.payload.role() != role {
            self.payload = RolePayload::default_for(role);
        }
    }

    pub fn block(&self) -> Option<&BlockInfo> {
        match &self.payload {
            RolePayload::Block(info) => Some(info),
            _ => None,
        }
    }

    pub fn block_mut(&mut self) -> Option<&mut BlockInfo> {
        match &mut self.payload {
            RolePayload::Block(info) => Some(info),
            _ => None,
        }
    }

    pub fn accelerator(&self) -> Option<&AcceleratorInfo> {
        match &self.payload {
            RolePayload::Accelerator(info) => Some(info),
            _ => None,
        }
    }

    pub fn accelerator_mut(&mut self) -> Option<&mut AcceleratorInfo> {
        match &mut self.payload {
            RolePayload::Accelerator(info) => Some(info),
            _ => None,
        }
    }

    pub fn breakable(&self) -> Option<&BreakableInfo> {
        match &self.payload {
            RolePayload::Breakable(info) => Some(info),
            _ => None,
        }
    }

    pub fn breakable_mut(&mut self) -> Option<&mut BreakableInfo> {
        match &mut self.payload {
            RolePayload::Breakable(info) => Some(info),
            _ => None,
        }
    }

    /// Index of the bound texture, if any
    pub fn texture_index(&self) -> Option<usize> {
        self.texture.as_ref().map(|binding| binding.index)
    }

    /// Texture index as stored in package files (`-1` for none)
    pub fn texture_ref(&self) -> i64 {
        self.texture_index().map_or(-1, |index| index as i64)
    }

    pub fn texture_info(&self) -> Option<&TextureInfo> {
        self.texture.as_ref().map(|binding| &binding.info)
    }

    pub fn texture_info_mut(&mut self) -> Option<&mut TextureInfo> {
        self.texture.as_mut().map(|binding| &mut binding.info)
    }

    /// Bind or unbind a texture.
    ///
    /// Rebinding keeps the current texture attributes; a first binding
    /// starts from the default attributes. An index past the end of
    /// `textures` is rejected and leaves the object unchanged.
    pub fn set_texture(
        &mut self,
        index: Option<usize>,
        textures: &[Texture],
    ) -> Result<(), ModelError> {
        let Some(index) = index else {
            self.clear_texture();
            return Ok(());
        };
        if index >= textures.len() {
            return Err(ModelError::ReferenceOutOfRange {
                index: index as i64,
                len: textures.len(),
            });
        }
        let info = self
            .texture
            .take()
            .map(|binding| binding.info)
            .unwrap_or_default();
        self.texture = Some(TextureBinding { index, info });
        self.sync_texture(textures);
        Ok(())
    }

    /// Unbind the texture along with its attributes
    pub fn clear_texture(&mut self) {
        self.texture = None;
    }

    /// Drop a dangling binding and zero the animation of still images
    pub(crate) fn sync_texture(&mut self, textures: &[Texture]) {
        let Some(binding) = &mut self.texture else {
            return;
        };
        match textures.get(binding.index) {
            Some(texture) => {
                if !texture.is_animated() {
                    binding.info.animation = 0.0;
                }
            }
            None => {
                tracing::warn!(
                    "Object {} references missing texture {}, clearing",
                    self.name,
                    binding.index
                );
                self.texture = None;
            }
        }
    }

    /// Follow the removal of texture `removed`. Returns true if the
    /// reference changed.
    fn shift_texture_down(&mut self, removed: usize) -> bool {
        let Some(binding) = &mut self.texture else {
            return false;
        };
        if binding.index < removed {
            return false;
        }
        if binding.index == 0 {
            self.texture = None;
        } else {
            binding.index -= 1;
        }
        true
    }
}

impl Default for PlacedObject {
    fn default() -> Self {
        Self::new()
    }
}

/// Role-specific attributes; only the variant matching the role exists
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RolePayload {
    #[default]
    None,
    Block(BlockInfo),
    Spikes,
    Breakable(BreakableInfo),
    Grid,
    Accelerator(AcceleratorInfo),
}

impl RolePayload {
    pub fn role(&self) -> Role {
        match self {
            Self::None => Role::None,
            Self::Block(_) => Role::Block,
            Self::Spikes => Role::Spikes,
            Self::Breakable(_) => Role::Breakable,
            Self::Grid => Role::Grid,
            Self::Accelerator(_) => Role::Accelerator,
        }
    }

    pub fn default_for(role: Role) -> Self {
        match role {
            Role::None => Self::None,
            Role::Block => Self::Block(BlockInfo::default()),
            Role::Spikes => Self::Spikes,
            Role::Breakable => Self::Breakable(BreakableInfo::default()),
            Role::Grid => Self::Grid,
            Role::Accelerator => Self::Accelerator(AcceleratorInfo::default()),
        }
    }
}

/// A texture index together with its draw attributes
#[derive(Debug, Clone, PartialEq)]
pub struct TextureBinding {
    pub index: usize,
    pub info: TextureInfo,
}

/// How a textured object is drawn
#[derive(Debug, Clone, PartialEq)]
pub struct TextureInfo {
    pub layer: i32,
    pub plane: Plane,
    /// Animation speed; always 0 for single-frame textures
    pub animation: f64,
}

impl Default for TextureInfo {
    fn default() -> Self {
        Self {
            layer: 5,
            plane: Plane::View,
            animation: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct BlockInfo {
    pub particles: Vec<usize>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AcceleratorInfo {
    pub direction: AccelerationDirection,
    pub amplitude: f64,
    /// States the accelerator acts on
    pub morph: PerMorph<bool>,
}

impl Default for AcceleratorInfo {
    fn default() -> Self {
        Self {
            direction: AccelerationDirection::Right,
            amplitude: 1.0,
            morph: PerMorph::splat(false),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct BreakableInfo {
    pub group: u32,
}
