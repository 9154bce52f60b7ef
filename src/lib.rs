// Copyright 2025 the Morph Builder Authors
// SPDX-License-Identifier: Apache-2.0

//! Morph Builder: the level package editor core for Morph.
//!
//! A package is a named bundle of levels and the textures they use. This
//! crate holds the package model with its JSON format and migration
//! (`model`), the screen geometry and stacking of the level view
//! (`editing`), and the editor state a front end drives (`data`).

pub mod data;
pub mod editing;
pub mod model;
pub mod settings;

pub use data::{EditorState, ElementStyle, Focus, PlaneVisibility};
pub use model::{ModelError, Package, migrate, migrate_str};

use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber.
///
/// The filter comes from `RUST_LOG` when set and defaults to
/// `morph_builder=info`. Calling this more than once is harmless.
pub fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("morph_builder=info"));
    if tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .is_err()
    {
        tracing::debug!("Tracing subscriber already installed");
    }
}
