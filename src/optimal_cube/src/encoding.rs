//! Dense ranks of cubie subgroups, used to index pattern databases.
//!
//! A rank is a mixed-radix number with one digit per tracked cubie. The
//! digit of a cubie combines its orientation with its position among the
//! positions not yet claimed by earlier cubies of the same group, so the
//! radices shrink as the rank is built: `3 * 8, 3 * 7, ...` for corners and
//! `2 * 12, 2 * 11, ...` for edges. The last corner is left out since its
//! position and orientation follow from the other seven.

use crate::state::{
    CORNER_COUNT, CORNER_ORIENTATIONS, CUBIE_COUNT, CubeState, EDGE_COUNT, EDGE_ORIENTATIONS,
};
use std::fmt;

/// Number of edges tracked by a single edge pattern database.
pub const EDGE_GROUP_SIZE: usize = 6;

const CORNER_DIGITS: usize = CORNER_COUNT - 1;

pub const CORNER_TABLE_SIZE: usize =
    table_size(CORNER_COUNT, CORNER_ORIENTATIONS as usize, CORNER_DIGITS);
pub const EDGE_TABLE_SIZE: usize =
    table_size(EDGE_COUNT, EDGE_ORIENTATIONS as usize, EDGE_GROUP_SIZE);

/// `[3_674_160, 174_960, 9_720, 648, 54, 6, 1, 0]`
const CORNER_WEIGHTS: [u64; CORNER_COUNT] =
    rank_weights(CORNER_COUNT, CORNER_ORIENTATIONS as u64, CORNER_DIGITS);

/// `[1_774_080, 80_640, 4_032, 224, 14, 1]`
const EDGE_WEIGHTS: [u64; EDGE_GROUP_SIZE] =
    rank_weights(EDGE_COUNT, EDGE_ORIENTATIONS as u64, EDGE_GROUP_SIZE);

/// The place value of every digit. Digit `i` can take
/// `ori_count * (piece_count - i)` values, so its weight is the product of
/// the radices of the digits after it. Entries past `digits` are zero.
const fn rank_weights<const N: usize>(piece_count: usize, ori_count: u64, digits: usize) -> [u64; N] {
    let mut weights = [0; N];
    let mut i = 0;
    while i < digits {
        let mut weight = 1;
        let mut j = i + 1;
        while j < digits {
            weight *= ori_count * (piece_count - j) as u64;
            j += 1;
        }
        weights[i] = weight;
        i += 1;
    }
    weights
}

const fn table_size(piece_count: usize, ori_count: usize, digits: usize) -> usize {
    let mut size = 1;
    let mut j = 0;
    while j < digits {
        size *= ori_count * (piece_count - j);
        j += 1;
    }
    size
}

/// A cubie subgroup with its own pattern database.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum CubieGroup {
    /// All eight corners.
    Corners,
    /// Six edges, the cube state entries `start..end`.
    Edges { start: usize, end: usize },
}

impl CubieGroup {
    pub const EDGES_ONE: Self = CubieGroup::Edges { start: 8, end: 14 };
    pub const EDGES_TWO: Self = CubieGroup::Edges { start: 14, end: 20 };
    pub const ALL: [Self; 3] = [CubieGroup::Corners, Self::EDGES_ONE, Self::EDGES_TWO];

    #[must_use]
    pub const fn table_size(self) -> usize {
        match self {
            CubieGroup::Corners => CORNER_TABLE_SIZE,
            CubieGroup::Edges { .. } => EDGE_TABLE_SIZE,
        }
    }

    /// The rank of `state` projected onto this group, in `0..table_size()`.
    #[must_use]
    pub fn rank(self, state: &CubeState) -> usize {
        match self {
            CubieGroup::Corners => rank_corners(state),
            CubieGroup::Edges { start, end } => rank_edges(state, start, end),
        }
    }
}

impl fmt::Display for CubieGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            CubieGroup::Corners => f.write_str("corners"),
            g if g == Self::EDGES_ONE => f.write_str("edge group one"),
            g if g == Self::EDGES_TWO => f.write_str("edge group two"),
            CubieGroup::Edges { start, end } => write!(f, "edges {start}..{end}"),
        }
    }
}

/// Rank the corners of `state` in `0..CORNER_TABLE_SIZE`.
#[must_use]
pub fn rank_corners(state: &CubeState) -> usize {
    let rank = rank_orbit::<CORNER_COUNT>(state.corner_codes(), CORNER_ORIENTATIONS, &CORNER_WEIGHTS);
    debug_assert!(rank < CORNER_TABLE_SIZE, "corner rank {rank} of {state} out of range");
    rank
}

/// Rank the edges `start..end` of `state` in `0..EDGE_TABLE_SIZE`. Edges
/// outside of the group are ignored.
///
/// # Panics
///
/// If `start..end` is not a run of [`EDGE_GROUP_SIZE`] edge entries.
#[must_use]
pub fn rank_edges(state: &CubeState, start: usize, end: usize) -> usize {
    assert!(
        CORNER_COUNT <= start && start <= end && end <= CUBIE_COUNT,
        "edge group {start}..{end} lies outside the edge entries {CORNER_COUNT}..{CUBIE_COUNT}"
    );
    assert_eq!(
        end - start,
        EDGE_GROUP_SIZE,
        "edge groups track exactly {EDGE_GROUP_SIZE} edges"
    );
    let rank = rank_orbit::<EDGE_COUNT>(&state.codes()[start..end], EDGE_ORIENTATIONS, &EDGE_WEIGHTS);
    debug_assert!(rank < EDGE_TABLE_SIZE, "edge rank {rank} of {state} out of range");
    rank
}

fn rank_orbit<const PIECE_COUNT: usize>(codes: &[u8], ori_count: u8, weights: &[u64]) -> usize {
    // `shift[p]` is `ori_count` times the number of already ranked cubies
    // sitting at a position below `p`
    let mut shift = [0_u8; PIECE_COUNT];
    let mut rank = 0;
    for (&code, &weight) in codes.iter().zip(weights) {
        let position = usize::from(code / ori_count);
        rank += weight * u64::from(code - shift[position]);
        for later in &mut shift[position + 1..] {
            *later += ori_count;
        }
    }
    usize::try_from(rank).expect("ranks fit in usize")
}
