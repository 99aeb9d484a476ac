//! The rotation engine: the single transition function of the cube.

use crate::state::{
    CORNER_COUNT, CORNER_ORIENTATIONS, CUBIE_COUNT, CubeState, EDGE_COUNT, EDGE_ORIENTATIONS,
};
use itertools::Itertools;
use std::{fmt, str::FromStr};
use thiserror::Error;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Face {
    Front,
    Rear,
    Left,
    Right,
    Top,
    Bottom,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    Clockwise,
    CounterClockwise,
    HalfTurn,
}

/// A face turn. Moves are generated in the order of [`Move::ALL`], which is
/// also the order ties between equally short solutions are broken in.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Move {
    pub face: Face,
    pub direction: Direction,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum MoveParseError {
    #[error("Unknown face `{0}`")]
    UnknownFace(String),
    #[error("Unknown direction `{0}`")]
    UnknownDirection(String),
    #[error("Move `{0}` is missing its direction")]
    MissingDirection(String),
}

/// The eight positions a face turn cycles. Corner positions go top-left,
/// top-right, bottom-right, bottom-left; edge positions go top, right,
/// bottom, left. A clockwise turn moves the cubie at entry `k` to entry
/// `k + 1`.
struct FaceLayout {
    corners: [u8; 4],
    edges: [u8; 4],
    /// Twist added to a corner leaving an even and an odd cycle entry.
    corner_twist: [u8; 2],
    edge_flip: u8,
}

const NO_TWIST: [u8; 2] = [0, 0];
const SIDE_TWIST: [u8; 2] = [1, 2];
const CAP_TWIST: [u8; 2] = [2, 1];

impl Face {
    pub const ALL: [Self; 6] = {
        use Face::*;
        let v = [Front, Rear, Left, Right, Top, Bottom];

        let mut i = 0;
        while i < v.len() {
            assert!(i == v[i] as usize);
            i += 1;
        }

        v
    };

    fn layout(self) -> &'static FaceLayout {
        // Edge positions are numbered from zero, i.e. the edge cubie whose
        // code lives at state index `8 + p` starts at position `p`
        static LAYOUTS: [FaceLayout; 6] = [
            FaceLayout {
                corners: [0, 1, 2, 3],
                edges: [0, 11, 10, 4],
                corner_twist: NO_TWIST,
                edge_flip: 0,
            },
            FaceLayout {
                corners: [4, 5, 6, 7],
                edges: [2, 6, 7, 8],
                corner_twist: NO_TWIST,
                edge_flip: 0,
            },
            FaceLayout {
                corners: [7, 0, 3, 4],
                edges: [3, 4, 5, 6],
                corner_twist: SIDE_TWIST,
                edge_flip: 1,
            },
            FaceLayout {
                corners: [1, 6, 5, 2],
                edges: [1, 8, 9, 11],
                corner_twist: SIDE_TWIST,
                edge_flip: 1,
            },
            FaceLayout {
                corners: [7, 6, 1, 0],
                edges: [2, 1, 0, 3],
                corner_twist: CAP_TWIST,
                edge_flip: 0,
            },
            FaceLayout {
                corners: [3, 2, 5, 4],
                edges: [10, 9, 7, 5],
                corner_twist: CAP_TWIST,
                edge_flip: 0,
            },
        ];
        &LAYOUTS[self as usize]
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Face::Front => "FRONT",
            Face::Rear => "REAR",
            Face::Left => "LEFT",
            Face::Right => "RIGHT",
            Face::Top => "TOP",
            Face::Bottom => "BOTTOM",
        }
    }
}

impl Direction {
    pub const ALL: [Self; 3] = [
        Direction::Clockwise,
        Direction::CounterClockwise,
        Direction::HalfTurn,
    ];

    #[must_use]
    pub fn inverse(self) -> Self {
        match self {
            Direction::Clockwise => Direction::CounterClockwise,
            Direction::CounterClockwise => Direction::Clockwise,
            Direction::HalfTurn => Direction::HalfTurn,
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Direction::Clockwise => "CLOCKWISE",
            Direction::CounterClockwise => "COUNTER_CLOCKWISE",
            Direction::HalfTurn => "HALF_TURN",
        }
    }
}

impl Move {
    /// All eighteen moves, faces outermost, in declaration order.
    pub const ALL: [Self; 18] = {
        let mut moves = [Move {
            face: Face::Front,
            direction: Direction::Clockwise,
        }; 18];
        let mut i = 0;
        while i < moves.len() {
            moves[i] = Move {
                face: Face::ALL[i / 3],
                direction: Direction::ALL[i % 3],
            };
            i += 1;
        }
        moves
    };

    #[must_use]
    pub const fn new(face: Face, direction: Direction) -> Self {
        Self { face, direction }
    }

    #[must_use]
    pub fn inverse(self) -> Self {
        Self::new(self.face, self.direction.inverse())
    }
}

impl CubeState {
    /// Turn `face` in `direction`, returning the new state.
    #[must_use]
    pub fn apply(&self, face: Face, direction: Direction) -> Self {
        match direction {
            Direction::Clockwise => self.quarter_turn(face, 1),
            Direction::CounterClockwise => self.quarter_turn(face, 3),
            Direction::HalfTurn => self.quarter_turn(face, 1).quarter_turn(face, 1),
        }
    }

    #[must_use]
    pub fn apply_move(&self, move_: Move) -> Self {
        self.apply(move_.face, move_.direction)
    }

    #[must_use]
    pub fn apply_moves<'a>(&self, moves: impl IntoIterator<Item = &'a Move>) -> Self {
        moves
            .into_iter()
            .fold(*self, |state, &move_| state.apply_move(move_))
    }

    /// Cycle the eight cubies of `face` by `steps` entries of its layout:
    /// one for clockwise, three for counter-clockwise.
    fn quarter_turn(&self, face: Face, steps: usize) -> Self {
        let layout = face.layout();
        let codes = self.codes();

        // Which cubie sits at each position
        let mut corner_at = [0; CORNER_COUNT];
        for (cubie, &code) in codes[..CORNER_COUNT].iter().enumerate() {
            corner_at[usize::from(code / CORNER_ORIENTATIONS)] = cubie;
        }
        let mut edge_at = [0; EDGE_COUNT];
        for (cubie, &code) in codes[CORNER_COUNT..].iter().enumerate() {
            edge_at[usize::from(code / EDGE_ORIENTATIONS)] = CORNER_COUNT + cubie;
        }

        let mut next: [u8; CUBIE_COUNT] = *codes;
        for k in 0..4 {
            let cubie = corner_at[usize::from(layout.corners[k])];
            let orientation = codes[cubie] % CORNER_ORIENTATIONS;
            let twisted = (orientation + layout.corner_twist[k % 2]) % CORNER_ORIENTATIONS;
            next[cubie] = layout.corners[(k + steps) % 4] * CORNER_ORIENTATIONS + twisted;

            let cubie = edge_at[usize::from(layout.edges[k])];
            let orientation = codes[cubie] % EDGE_ORIENTATIONS;
            let flipped = (orientation + layout.edge_flip) % EDGE_ORIENTATIONS;
            next[cubie] = layout.edges[(k + steps) % 4] * EDGE_ORIENTATIONS + flipped;
        }

        CubeState::from_codes_unchecked(next)
    }
}

impl fmt::Display for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.face, self.direction)
    }
}

impl FromStr for Face {
    type Err = MoveParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Face::ALL
            .into_iter()
            .find(|face| face.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| MoveParseError::UnknownFace(s.to_owned()))
    }
}

impl FromStr for Direction {
    type Err = MoveParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Direction::ALL
            .into_iter()
            .find(|direction| direction.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| MoveParseError::UnknownDirection(s.to_owned()))
    }
}

impl FromStr for Move {
    type Err = MoveParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some((face, direction)) = s.trim().split_once(':') else {
            return Err(MoveParseError::MissingDirection(s.to_owned()));
        };
        Ok(Move::new(face.trim().parse()?, direction.trim().parse()?))
    }
}

/// Parse a colon-delimited list of `FACE:DIRECTION` tokens, such as
/// `RIGHT:CLOCKWISE:TOP:HALF_TURN`. A trailing colon is allowed.
///
/// # Errors
///
/// If a face or direction is unknown, or a face has no direction.
pub fn parse_move_sequence(s: &str) -> Result<Vec<Move>, MoveParseError> {
    let tokens = s
        .split(':')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .collect_vec();
    tokens
        .chunks(2)
        .map(|chunk| match *chunk {
            [face, direction] => Ok(Move::new(face.parse()?, direction.parse()?)),
            [face] => Err(MoveParseError::MissingDirection(face.to_owned())),
            _ => unreachable!("chunks of two"),
        })
        .collect()
}

/// The inverse of [`parse_move_sequence`].
#[must_use]
pub fn format_move_sequence(moves: &[Move]) -> String {
    moves.iter().join(":")
}
