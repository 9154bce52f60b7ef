// Copyright 2025 the Morph Builder Authors
// SPDX-License-Identifier: Apache-2.0

//! Mapping between level placements and on-screen boxes.
//!
//! Level space is y-up with the origin at the level center; objects are
//! described by their center, half extents and a rotation in radians.
//! Screen space is y-down; an element is a `width` x `height` box whose
//! top-left corner is moved into place by a CSS-style `matrix(a,b,c,d,e,f)`.
//! `kurbo::Affine` uses the same coefficient order, so the matrix is
//! stored as one.
//!
//! `to_screen` produces the box for display. While the user drags, resizes
//! or rotates, a drag helper rewrites the element's size and matrix;
//! `from_screen` recovers the placement from whatever is there now.
//! Reading the live element is host-specific and sits behind
//! `MeasureElement`.

use std::f64::consts::{PI, TAU};

use kurbo::{Affine, Point, Size, Vec2};

use super::units::UnitScale;
use crate::model::ModelError;

// ============================================================================
// TYPES
// ============================================================================

/// Where an entity sits in level space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// Center (units, y-up)
    pub position: Point,
    /// Half extents (units)
    pub size: Vec2,
    /// Radians
    pub rotation: f64,
}

impl Placement {
    pub fn new(position: Point, size: Vec2, rotation: f64) -> Self {
        Self {
            position,
            size,
            rotation,
        }
    }
}

/// An element's rendered size and transform
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenBox {
    /// Box size in pixels
    pub size: Size,
    /// Rotation block plus top-left translation, CSS coefficient order
    pub transform: Affine,
}

impl ScreenBox {
    /// `matrix(a,b,c,d,e,f)` for the element's `transform` style
    pub fn css_transform(&self) -> String {
        let [a, b, c, d, e, f] = self.transform.as_coeffs();
        format!("matrix({a},{b},{c},{d},{e},{f})")
    }

    pub fn css_width(&self) -> String {
        format!("{}px", self.size.width)
    }

    pub fn css_height(&self) -> String {
        format!("{}px", self.size.height)
    }
}

/// Raw measurement of a live element, as a host reads it
#[derive(Debug, Clone, PartialEq)]
pub struct MeasuredElement {
    /// Rendered width in pixels
    pub width: f64,
    /// Rendered height in pixels
    pub height: f64,
    /// Current value of the element's `transform` style
    pub transform: String,
}

impl MeasuredElement {
    pub fn screen_box(&self) -> Result<ScreenBox, ModelError> {
        Ok(ScreenBox {
            size: Size::new(self.width, self.height),
            transform: parse_css_matrix(&self.transform)?,
        })
    }
}

/// Host hook for reading an element's current geometry by id
pub trait MeasureElement {
    fn measure(&self, element_id: &str) -> Option<MeasuredElement>;
}

// ============================================================================
// TRANSFORMS
// ============================================================================

/// Screen box for a placement
pub fn to_screen(scale: UnitScale, placement: &Placement) -> ScreenBox {
    let Placement {
        position,
        size,
        rotation,
    } = *placement;

    let width = scale.to_pixels(size.x * 2.0);
    let height = scale.to_pixels(size.y * 2.0);
    let left = scale.to_pixels(position.x - size.x);
    // y flips: the top edge is the larger level y
    let top = -scale.to_pixels(position.y + size.y);

    let (sin, cos) = rotation.sin_cos();
    ScreenBox {
        size: Size::new(width, height),
        transform: Affine::new([cos, -sin, sin, cos, left, top]),
    }
}

/// Placement recovered from a (possibly user-modified) screen box
pub fn from_screen(scale: UnitScale, screen: &ScreenBox) -> Placement {
    let [a, b, _, _, e, f] = screen.transform.as_coeffs();

    let half_width = scale.to_units(screen.size.width / 2.0);
    let half_height = scale.to_units(screen.size.height / 2.0);
    let x = scale.to_units(e) + half_width;
    let y = -scale.to_units(f) - half_height;

    Placement {
        position: Point::new(x, y),
        size: Vec2::new(half_width, half_height),
        rotation: normalize_angle(-b.atan2(a)),
    }
}

/// Map an angle into (-pi, pi]
pub fn normalize_angle(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(TAU);
    if wrapped > PI { wrapped - TAU } else { wrapped }
}

/// Parse a CSS `matrix(a, b, c, d, e, f)` value. `none` is the identity.
pub fn parse_css_matrix(value: &str) -> Result<Affine, ModelError> {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed == "none" {
        return Ok(Affine::IDENTITY);
    }
    let malformed = || ModelError::MalformedTransform(value.to_string());

    let inner = trimmed
        .strip_prefix("matrix(")
        .and_then(|rest| rest.strip_suffix(')'))
        .ok_or_else(malformed)?;

    let coeffs = inner
        .split(',')
        .map(|part| part.trim().parse::<f64>().map_err(|_| malformed()))
        .collect::<Result<Vec<_>, _>>()?;
    let coeffs: [f64; 6] = coeffs.try_into().map_err(|_| malformed())?;
    Ok(Affine::new(coeffs))
}
