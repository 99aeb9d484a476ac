#![allow(dead_code)]

use optimal_cube::{CubeState, Move, Parallelism, PruningTables};
use std::{collections::HashMap, sync::LazyLock};

/// Deep enough for the test scrambles, shallow enough to build in seconds.
pub const TEST_DEPTH: u8 = 5;

pub static TABLES: LazyLock<PruningTables> =
    LazyLock::new(|| PruningTables::generate_all(TEST_DEPTH, Parallelism::Threaded));

/// Breadth first distances from solved of every state at most `depth` turns
/// away.
pub fn distances_within(depth: u8) -> HashMap<CubeState, u8> {
    let mut distances = HashMap::from([(CubeState::SOLVED, 0)]);
    let mut frontier = vec![CubeState::SOLVED];
    for distance in 1..=depth {
        let mut next = vec![];
        for state in frontier {
            for move_ in Move::ALL {
                let child = state.apply_move(move_);
                distances.entry(child).or_insert_with(|| {
                    next.push(child);
                    distance
                });
            }
        }
        frontier = next;
    }
    distances
}

/// Whether some sequence of at most `depth` turns solves `state`, by brute
/// force.
pub fn solvable_within(state: &CubeState, depth: u8) -> bool {
    fn search(state: &CubeState, depth: u8, last: Option<Move>) -> bool {
        if state.is_solved() {
            return true;
        }
        depth > 0
            && Move::ALL
                .into_iter()
                .filter(|move_| last.is_none_or(|last| last.face != move_.face))
                .any(|move_| search(&state.apply_move(move_), depth - 1, Some(move_)))
    }
    search(state, depth, None)
}

pub fn random_scramble(length: usize) -> Vec<Move> {
    let mut moves: Vec<Move> = Vec::with_capacity(length);
    while moves.len() < length {
        let move_ = Move::ALL[fastrand::usize(..Move::ALL.len())];
        if moves.last().is_none_or(|last| last.face != move_.face) {
            moves.push(move_);
        }
    }
    moves
}
