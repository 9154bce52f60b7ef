// Copyright 2025 the Morph Builder Authors
// SPDX-License-Identifier: Apache-2.0

//! Closed vocabularies of the package format: morph states, object roles,
//! depth planes and accelerator directions.
//!
//! Every enum round-trips through its variant name, which is also how the
//! package JSON spells it. Parsing an unknown name yields the matching
//! `Unknown*` error instead of a generic decode failure.

use std::collections::BTreeMap;
use std::fmt;
use std::ops::{Index, IndexMut};
use std::str::FromStr;

use super::error::ModelError;
use crate::settings::ordering;

// ============================================================================
// MORPH STATE
// ============================================================================

/// Material the player-controlled morph is in
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MorphState {
    Metal,
    Rubber,
    Water,
    Bubble,
}

impl MorphState {
    pub const ALL: [MorphState; 4] = [Self::Metal, Self::Rubber, Self::Water, Self::Bubble];

    pub fn name(self) -> &'static str {
        match self {
            Self::Metal => "Metal",
            Self::Rubber => "Rubber",
            Self::Water => "Water",
            Self::Bubble => "Bubble",
        }
    }
}

impl FromStr for MorphState {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|state| state.name() == s)
            .ok_or_else(|| ModelError::UnknownMorphState(s.to_string()))
    }
}

// ============================================================================
// ROLE
// ============================================================================

/// Gameplay role of a placed object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Role {
    #[default]
    None,
    Block,
    Spikes,
    Breakable,
    Grid,
    Accelerator,
}

impl Role {
    pub const ALL: [Role; 6] = [
        Self::None,
        Self::Block,
        Self::Spikes,
        Self::Breakable,
        Self::Grid,
        Self::Accelerator,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Block => "Block",
            Self::Spikes => "Spikes",
            Self::Breakable => "Breakable",
            Self::Grid => "Grid",
            Self::Accelerator => "Accelerator",
        }
    }
}

impl FromStr for Role {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|role| role.name() == s)
            .ok_or_else(|| ModelError::UnknownRole(s.to_string()))
    }
}

// ============================================================================
// PLANE
// ============================================================================

/// Coarse depth band an object is drawn in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Plane {
    #[default]
    View,
    Far,
    Mid,
    Near,
}

impl Plane {
    pub const ALL: [Plane; 4] = [Self::View, Self::Far, Self::Mid, Self::Near];

    pub fn name(self) -> &'static str {
        match self {
            Self::View => "View",
            Self::Far => "Far",
            Self::Mid => "Mid",
            Self::Near => "Near",
        }
    }

    /// Base z-index of the plane's band
    pub fn base(self) -> i32 {
        match self {
            Self::Near => ordering::NEAR,
            Self::View => ordering::VIEW,
            Self::Mid => ordering::MID,
            Self::Far => ordering::FAR,
        }
    }
}

impl FromStr for Plane {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|plane| plane.name() == s)
            .ok_or_else(|| ModelError::UnknownPlane(s.to_string()))
    }
}

// ============================================================================
// ACCELERATION DIRECTION
// ============================================================================

/// Direction an accelerator pushes the morph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AccelerationDirection {
    #[default]
    Right,
    Left,
    Up,
    Down,
}

impl AccelerationDirection {
    pub const ALL: [AccelerationDirection; 4] = [Self::Right, Self::Left, Self::Up, Self::Down];

    pub fn name(self) -> &'static str {
        match self {
            Self::Right => "Right",
            Self::Left => "Left",
            Self::Up => "Up",
            Self::Down => "Down",
        }
    }
}

impl FromStr for AccelerationDirection {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|dir| dir.name() == s)
            .ok_or_else(|| ModelError::UnknownDirection(s.to_string()))
    }
}

macro_rules! display_by_name {
    ($($ty:ty),*) => {
        $(impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.name())
            }
        })*
    };
}

display_by_name!(MorphState, Role, Plane, AccelerationDirection);

// ============================================================================
// PER-MORPH TABLE
// ============================================================================

/// One value per morph state (availability counts, accelerator filters)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PerMorph<T> {
    pub metal: T,
    pub rubber: T,
    pub water: T,
    pub bubble: T,
}

impl<T: Copy> PerMorph<T> {
    /// Same value for every state
    pub fn splat(value: T) -> Self {
        Self {
            metal: value,
            rubber: value,
            water: value,
            bubble: value,
        }
    }

    /// Iterate `(state, value)` in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (MorphState, T)> + '_ {
        MorphState::ALL.into_iter().map(move |state| (state, self[state]))
    }

    /// Build from a name-keyed map; states missing from the map take
    /// `missing`, unknown names are rejected
    pub fn from_named(map: &BTreeMap<String, T>, missing: T) -> Result<Self, ModelError> {
        let mut table = Self::splat(missing);
        for (name, value) in map {
            let state: MorphState = name.parse()?;
            table[state] = *value;
        }
        Ok(table)
    }

    /// Name-keyed map as written to package files
    pub fn to_named(&self) -> BTreeMap<String, T> {
        self.iter()
            .map(|(state, value)| (state.name().to_string(), value))
            .collect()
    }
}

impl<T> Index<MorphState> for PerMorph<T> {
    type Output = T;

    fn index(&self, state: MorphState) -> &T {
        match state {
            MorphState::Metal => &self.metal,
            MorphState::Rubber => &self.rubber,
            MorphState::Water => &self.water,
            MorphState::Bubble => &self.bubble,
        }
    }
}

impl<T> IndexMut<MorphState> for PerMorph<T> {
    fn index_mut(&mut self, state: MorphState) -> &mut T {
        match state {
            MorphState::Metal => &mut self.metal,
            MorphState::Rubber => &mut self.rubber,
            MorphState::Water => &mut self.water,
            MorphState::Bubble => &mut self.bubble,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for role in Role::ALL {
            assert_eq!(role.name().parse::<Role>().unwrap(), role);
        }
        for plane in Plane::ALL {
            assert_eq!(plane.to_string().parse::<Plane>().unwrap(), plane);
        }
        for state in MorphState::ALL {
            assert_eq!(state.name().parse::<MorphState>().unwrap(), state);
        }
    }

    #[test]
    fn unknown_names_have_typed_errors() {
        assert!(matches!("Portal".parse::<Role>(), Err(ModelError::UnknownRole(_))));
        assert!(matches!("Sky".parse::<Plane>(), Err(ModelError::UnknownPlane(_))));
        assert!(matches!(
            "Gas".parse::<MorphState>(),
            Err(ModelError::UnknownMorphState(_))
        ));
        // Names are case sensitive, like the package files
        assert!("view".parse::<Plane>().is_err());
    }

    #[test]
    fn plane_bases() {
        assert_eq!(Plane::Near.base(), 400);
        assert_eq!(Plane::View.base(), 300);
        assert_eq!(Plane::Mid.base(), 200);
        assert_eq!(Plane::Far.base(), 100);
    }

    #[test]
    fn direction_names() {
        for direction in AccelerationDirection::ALL {
            let parsed: AccelerationDirection = direction.to_string().parse().unwrap();
            assert_eq!(parsed, direction);
        }
        assert!(matches!(
            "Sideways".parse::<AccelerationDirection>(),
            Err(ModelError::UnknownDirection(_))
        ));
    }

    #[test]
    fn per_morph_from_named_fills_missing() {
        let mut map = BTreeMap::new();
        map.insert("Water".to_string(), 7u32);
        let table = PerMorph::from_named(&map, 0).unwrap();
        assert_eq!(table[MorphState::Water], 7);
        assert_eq!(table[MorphState::Metal], 0);
        assert_eq!(table.to_named().len(), 4);
    }

    #[test]
    fn per_morph_rejects_unknown_state() {
        let mut map = BTreeMap::new();
        map.insert("Lava".to_string(), true);
        assert!(matches!(
            PerMorph::from_named(&map, false),
            Err(ModelError::UnknownMorphState(name)) if name == "Lava"
        ));
    }
}
