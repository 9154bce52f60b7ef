// Copyright 2025 the Morph Builder Authors
// SPDX-License-Identifier: Apache-2.0

//! Conversion between level units and screen pixels.
//!
//! The host measures a reference element that spans a fixed number of
//! units (see `settings::units`) and hands its pixel height to
//! `UnitScale`. Everything else derives from that ratio.

use crate::settings::units;

/// Pixels-per-unit ratio derived from the reference element's height
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitScale {
    reference_height: f64,
}

impl UnitScale {
    /// Scale from the measured pixel height of the reference element
    pub fn from_reference_height(reference_height: f64) -> Self {
        Self { reference_height }
    }

    /// Scale from a measurement that may not be usable yet. A reference
    /// that is not laid out (zero height) or not finite gives `None`.
    pub fn try_from_reference_height(reference_height: f64) -> Option<Self> {
        (reference_height.is_finite() && reference_height > 0.0)
            .then(|| Self::from_reference_height(reference_height))
    }

    pub fn reference_height(&self) -> f64 {
        self.reference_height
    }

    pub fn pixels_per_unit(&self) -> f64 {
        self.reference_height / units::PER_REFERENCE
    }

    pub fn to_pixels(&self, units: f64) -> f64 {
        units * self.pixels_per_unit()
    }

    pub fn to_units(&self, pixels: f64) -> f64 {
        pixels / self.pixels_per_unit()
    }

    /// The same scale with the reference element grown by `factor`
    pub fn scaled(&self, factor: f64) -> Self {
        Self::from_reference_height(self.reference_height * factor)
    }
}

impl Default for UnitScale {
    fn default() -> Self {
        Self::from_reference_height(units::REFERENCE_HEIGHT)
    }
}
