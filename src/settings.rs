// Copyright 2025 the Morph Builder Authors
// SPDX-License-Identifier: Apache-2.0

//! Builder settings and configuration constants.
//!
//! This module holds the fixed numbers the builder shares with the game:
//! zoom limits, the size of the reference element used for unit
//! conversion, marker sizes, asset locations and the draw-order bands.

// ============================================================================
// ZOOM SETTINGS
// ============================================================================
/// Zoom level of a freshly opened builder
const DEFAULT_ZOOM: f64 = 2.0;

/// Multiplier applied by one zoom-in step
const ZOOM_IN_FACTOR: f64 = 1.25;

/// Multiplier applied by one zoom-out step
const ZOOM_OUT_FACTOR: f64 = 0.8;

/// Maximum zoom level
const MAX_ZOOM: f64 = 8.0;

/// Minimum zoom level (0.8^6)
const MIN_ZOOM: f64 = 0.262144;

// ============================================================================
// UNIT SETTINGS
// ============================================================================
/// Abstract units spanned by the reference ("sizer") element
const UNITS_PER_REFERENCE: f64 = 100.0;

/// Reference element height in pixels at zoom 1.0
const REFERENCE_HEIGHT_AT_UNIT_ZOOM: f64 = 1600.0;

// ============================================================================
// MARKER SETTINGS
// ============================================================================
/// Half extent of the morph start marker (units)
const MORPH_HALF_SIZE: f64 = 1.0;

/// Half extent of the target marker (units)
const TARGET_HALF_SIZE: f64 = 1.5;

// ============================================================================
// ASSET PATHS
// ============================================================================
/// Builder-owned images (morph states, target)
const ASSETS_DIR: &str = "assets/builder/";

/// Root of package textures: `<TEXTURE_DIR><package>/<file>`
const TEXTURE_DIR: &str = "assets/level/";

// ============================================================================
// DRAW ORDER SETTINGS
// ============================================================================
// Each plane owns a band of 100 z-indices. Layers subtract from the band
// base, so a layer must stay inside 0..100 to keep planes apart.

const PLANE_BASE_NEAR: i32 = 400;
const PLANE_BASE_VIEW: i32 = 300;
const PLANE_BASE_MID: i32 = 200;
const PLANE_BASE_FAR: i32 = 100;

/// Exclusive upper bound on a layer that keeps planes from interleaving
const LAYER_BOUND: i32 = 100;

/// Layer used for objects without a texture (drawn on the View plane)
const UNTEXTURED_LAYER: i32 = 11;

// ============================================================================
// PUBLIC API
// ============================================================================

/// Zoom limits and step factors
pub mod zoom {
    pub const DEFAULT: f64 = super::DEFAULT_ZOOM;
    pub const IN_FACTOR: f64 = super::ZOOM_IN_FACTOR;
    pub const OUT_FACTOR: f64 = super::ZOOM_OUT_FACTOR;
    pub const MAX: f64 = super::MAX_ZOOM;
    pub const MIN: f64 = super::MIN_ZOOM;
}

/// Unit conversion settings
pub mod units {
    /// Abstract units represented by the reference element
    pub const PER_REFERENCE: f64 = super::UNITS_PER_REFERENCE;

    /// Reference element height (pixels) at zoom 1.0
    pub const REFERENCE_HEIGHT: f64 = super::REFERENCE_HEIGHT_AT_UNIT_ZOOM;
}

/// Fixed marker sizes (half extents in units)
pub mod markers {
    pub const MORPH_HALF_SIZE: f64 = super::MORPH_HALF_SIZE;
    pub const TARGET_HALF_SIZE: f64 = super::TARGET_HALF_SIZE;
}

/// Asset locations
pub mod paths {
    pub const ASSETS_DIR: &str = super::ASSETS_DIR;
    pub const TEXTURE_DIR: &str = super::TEXTURE_DIR;
}

/// Plane bands and layer limits
pub mod ordering {
    pub const NEAR: i32 = super::PLANE_BASE_NEAR;
    pub const VIEW: i32 = super::PLANE_BASE_VIEW;
    pub const MID: i32 = super::PLANE_BASE_MID;
    pub const FAR: i32 = super::PLANE_BASE_FAR;
    pub const LAYER_BOUND: i32 = super::LAYER_BOUND;
    pub const UNTEXTURED_LAYER: i32 = super::UNTEXTURED_LAYER;
}
