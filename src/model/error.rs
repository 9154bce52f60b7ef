// Copyright 2025 the Morph Builder Authors
// SPDX-License-Identifier: Apache-2.0

//! Typed failures of the package model and the geometry layer.

use thiserror::Error;

/// Errors produced by the data model, migration and transform functions
#[derive(Debug, Error)]
pub enum ModelError {
    /// Input is not shaped like a package (wrong JSON types, bad nesting)
    #[error("malformed package: {0}")]
    MalformedPackage(String),

    /// JSON text could not be parsed or decoded
    #[error("malformed package: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unknown plane `{0}`")]
    UnknownPlane(String),

    #[error("unknown role `{0}`")]
    UnknownRole(String),

    #[error("unknown morph state `{0}`")]
    UnknownMorphState(String),

    #[error("unknown acceleration direction `{0}`")]
    UnknownDirection(String),

    /// A texture index that is neither -1 nor a valid position
    #[error("texture index {index} out of range ({len} textures)")]
    ReferenceOutOfRange { index: i64, len: usize },

    /// A CSS `matrix(...)` string that could not be parsed
    #[error("malformed transform `{0}`")]
    MalformedTransform(String),
}

impl ModelError {
    /// Shorthand for a `MalformedPackage` with a formatted reason
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedPackage(reason.into())
    }

    /// Whether this error means the input was structurally invalid
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::MalformedPackage(_) | Self::Json(_))
    }
}
