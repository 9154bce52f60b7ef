// Copyright 2025 the Morph Builder Authors
// SPDX-License-Identifier: Apache-2.0

//! Level package data model

pub mod error;
pub mod migrate;
pub mod package;
mod record;
pub mod states;

pub use error::ModelError;
pub use migrate::{migrate, migrate_str};
pub use package::{
    AcceleratorInfo, BlockInfo, BreakableInfo, Level, Morph, Package, PlacedObject, RolePayload,
    Target, Texture, TextureBinding, TextureInfo,
};
pub use states::{AccelerationDirection, MorphState, PerMorph, Plane, Role};
