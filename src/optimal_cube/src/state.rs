//! The positional encoding of a cube.
//!
//! A cube is twenty cubie codes. Entries `0..8` describe the eight corner
//! cubies and entries `8..20` the twelve edge cubies. A corner code is
//! `position * 3 + orientation` with `position` in `0..8`, an edge code is
//! `position * 2 + orientation` with `position` in `0..12`. Turning the cube
//! only ever relabels codes, so the position digits of each orbit always
//! form a permutation.

use std::fmt;
use thiserror::Error;

pub const CORNER_COUNT: usize = 8;
pub const EDGE_COUNT: usize = 12;
pub const CUBIE_COUNT: usize = CORNER_COUNT + EDGE_COUNT;
pub const CORNER_ORIENTATIONS: u8 = 3;
pub const EDGE_ORIENTATIONS: u8 = 2;

/// An immutable cube configuration. Every operation that changes the cube
/// returns a new state.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct CubeState([u8; CUBIE_COUNT]);

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum CubieKind {
    Corner,
    Edge,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum StateError {
    #[error("Cubie code {code} at index {index} is out of range, expected a value below {max}")]
    CodeOutOfRange { index: usize, code: u8, max: u8 },
    #[error("{kind} position {position} is occupied by more than one cubie")]
    DuplicatePosition { kind: CubieKind, position: u8 },
}

impl fmt::Display for CubieKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CubieKind::Corner => f.write_str("Corner"),
            CubieKind::Edge => f.write_str("Edge"),
        }
    }
}

impl CubeState {
    /// The solved cube: corner `i` holds `3 * i`, edge `i` holds `2 * i`.
    pub const SOLVED: Self = {
        let mut codes = [0; CUBIE_COUNT];
        let mut i = 0;
        while i < CORNER_COUNT {
            codes[i] = i as u8 * CORNER_ORIENTATIONS;
            i += 1;
        }
        while i < CUBIE_COUNT {
            codes[i] = (i - CORNER_COUNT) as u8 * EDGE_ORIENTATIONS;
            i += 1;
        }
        Self(codes)
    };

    /// Create a cube from raw cubie codes.
    ///
    /// Only the shape of the encoding is checked: every code must be in range
    /// and each orbit must be a permutation. Parity and orientation sums are
    /// trusted.
    ///
    /// # Errors
    ///
    /// If a code is out of range or two cubies of an orbit share a position.
    pub fn new(codes: [u8; CUBIE_COUNT]) -> Result<Self, StateError> {
        let mut corners_seen = [false; CORNER_COUNT];
        let mut edges_seen = [false; EDGE_COUNT];

        for (index, &code) in codes.iter().enumerate() {
            let (kind, orientations, seen) = if index < CORNER_COUNT {
                (CubieKind::Corner, CORNER_ORIENTATIONS, &mut corners_seen[..])
            } else {
                (CubieKind::Edge, EDGE_ORIENTATIONS, &mut edges_seen[..])
            };
            let max = seen.len() as u8 * orientations;
            if code >= max {
                return Err(StateError::CodeOutOfRange { index, code, max });
            }
            let position = code / orientations;
            if std::mem::replace(&mut seen[position as usize], true) {
                return Err(StateError::DuplicatePosition { kind, position });
            }
        }

        Ok(Self(codes))
    }

    pub(crate) const fn from_codes_unchecked(codes: [u8; CUBIE_COUNT]) -> Self {
        Self(codes)
    }

    #[must_use]
    pub const fn solved() -> Self {
        Self::SOLVED
    }

    #[must_use]
    pub fn is_solved(&self) -> bool {
        *self == Self::SOLVED
    }

    #[must_use]
    pub fn codes(&self) -> &[u8; CUBIE_COUNT] {
        &self.0
    }

    #[must_use]
    pub fn corner_codes(&self) -> &[u8] {
        &self.0[..CORNER_COUNT]
    }

    #[must_use]
    pub fn edge_codes(&self) -> &[u8] {
        &self.0[CORNER_COUNT..]
    }
}

impl Default for CubeState {
    fn default() -> Self {
        Self::SOLVED
    }
}

impl fmt::Display for CubeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{ ")?;
        for code in self.0 {
            write!(f, "{code} ")?;
        }
        f.write_str("}")
    }
}

impl TryFrom<[u8; CUBIE_COUNT]> for CubeState {
    type Error = StateError;

    fn try_from(codes: [u8; CUBIE_COUNT]) -> Result<Self, Self::Error> {
        Self::new(codes)
    }
}
