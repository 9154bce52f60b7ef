// Copyright 2025 the Morph Builder Authors
// SPDX-License-Identifier: Apache-2.0

//! Screen geometry and stacking for the level view

pub mod ordering;
pub mod transform;
pub mod units;

pub use ordering::{Drawable, Layered, back_to_front, draw_order};
pub use transform::{
    MeasureElement, MeasuredElement, Placement, ScreenBox, from_screen, normalize_angle,
    parse_css_matrix, to_screen,
};
pub use units::UnitScale;
