#![warn(clippy::pedantic)]
#![allow(clippy::similar_names, clippy::too_many_lines)]

//! Optimal solving of the 3x3x3 cube.
//!
//! A cube is a [`CubeState`] of twenty cubie codes. Face turns are applied by
//! the rotation engine in [`rotation`], three pattern databases are built from
//! the solved state by [`pruning`], and [`solver`] runs IDA* with the maximum
//! of the three databases as its admissible heuristic.

pub mod encoding;
pub mod facelets;
pub mod node;
pub mod pruning;
pub mod rotation;
pub mod solver;
pub mod state;

pub use encoding::CubieGroup;
pub use pruning::{Parallelism, PruningTable, PruningTables};
pub use rotation::{Direction, Face, Move};
pub use solver::{Solution, Solver};
pub use state::CubeState;

#[macro_export]
macro_rules! start {
    ($msg:expr) => {
        concat!("⏳ ", $msg)
    };
}

#[macro_export]
macro_rules! working {
    ($msg:expr) => {
        concat!("🛠  ", $msg)
    };
}

#[macro_export]
macro_rules! success {
    ($msg:expr) => {
        concat!("✅ ", $msg)
    };
}
