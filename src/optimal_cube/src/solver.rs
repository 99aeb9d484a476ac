use crate::{
    node::{NodeId, SearchNode, SearchTree},
    pruning::PruningTables,
    rotation::{Move, format_move_sequence},
    start,
    state::CubeState,
    success, working,
};
use log::{debug, info};
use std::{fmt, time::Instant};
use thiserror::Error;

/// IDA* over the three pattern databases.
///
/// The search runs on a single thread. Root branches are tried in
/// [`Move::ALL`] order, which decides between solutions of equal length.
pub struct Solver<'a> {
    tables: &'a PruningTables,
    max_solution_length: Option<u8>,
}

struct SolverMutable {
    tree: SearchTree,
    nodes_generated: u64,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SolverError {
    #[error("A deep search still did not find a solution. It is unlikely that one exists")]
    SolutionDoesNotExist,
    #[error("Max solution length exceeded")]
    MaxSolutionLengthExceeded,
}

/// The result of a bounded search from one node.
enum Bounded {
    Found(NodeId),
    /// The smallest cost that exceeded the bound, `u8::MAX` if none did.
    Exceeded(u8),
}

/// What [`Solver::solve`] found. An already solved cube is reported as such
/// rather than as an empty sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Solution {
    AlreadySolved,
    Moves {
        moves: Vec<Move>,
        nodes_generated: u64,
    },
}

impl Solution {
    #[must_use]
    pub fn moves(&self) -> &[Move] {
        match self {
            Solution::AlreadySolved => &[],
            Solution::Moves { moves, .. } => moves,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.moves().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.moves().is_empty()
    }

    #[must_use]
    pub fn is_already_solved(&self) -> bool {
        matches!(self, Solution::AlreadySolved)
    }

    #[must_use]
    pub fn nodes_generated(&self) -> u64 {
        match self {
            Solution::AlreadySolved => 0,
            Solution::Moves {
                nodes_generated, ..
            } => *nodes_generated,
        }
    }
}

impl fmt::Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Solution::AlreadySolved => f.write_str("already solved"),
            Solution::Moves { moves, .. } => f.write_str(&format_move_sequence(moves)),
        }
    }
}

impl<'a> Solver<'a> {
    #[must_use]
    pub fn new(tables: &'a PruningTables) -> Self {
        Self {
            tables,
            max_solution_length: None,
        }
    }

    #[must_use]
    pub fn with_max_solution_length(mut self, max_solution_length: u8) -> Self {
        self.max_solution_length = Some(max_solution_length);
        self
    }

    /// Bounded depth first search below `id`, whose path cost is its depth.
    /// Successors are generated in [`Move::ALL`] order, skipping the face
    /// that produced the node, and entered only when `cost + 1 + h` stays
    /// within `bound`.
    fn search_for_solution(
        &self,
        mutable: &mut SolverMutable,
        id: NodeId,
        bound: u8,
    ) -> Bounded {
        let node = &mutable.tree[id];
        if node.state.is_solved() {
            return Bounded::Found(id);
        }
        let state = node.state;
        let cost = node.depth;
        let last_face = node.generator.map(|move_| move_.face);

        let mut next_bound = u8::MAX;
        for move_ in Move::ALL {
            if Some(move_.face) == last_face {
                continue;
            }
            let child = state.apply_move(move_);
            let heuristic = self.tables.admissible_heuristic(&child);
            mutable.nodes_generated += 1;

            let estimate = cost.saturating_add(1).saturating_add(heuristic);
            if estimate > bound {
                next_bound = next_bound.min(estimate);
                continue;
            }

            let child_id = mutable
                .tree
                .push(SearchNode::child(id, move_, child, cost + 1).with_heuristic(heuristic));
            match self.search_for_solution(mutable, child_id, bound) {
                found @ Bounded::Found(_) => return found,
                Bounded::Exceeded(exceeded) => next_bound = next_bound.min(exceeded),
            }
            mutable.tree.truncate_after(id);
        }
        Bounded::Exceeded(next_bound)
    }

    /// Find a shortest move sequence that solves `start_state`.
    ///
    /// # Errors
    ///
    /// If the bound grows past the maximum solution length, or past what a
    /// `u8` can hold.
    pub fn solve(&self, start_state: &CubeState) -> Result<Solution, SolverError> {
        if start_state.is_solved() {
            info!(success!("The cube is already solved"));
            return Ok(Solution::AlreadySolved);
        }

        info!(start!("Searching for an optimal solution"));
        let start = Instant::now();

        let heuristic = self.tables.admissible_heuristic(start_state);
        let mut mutable = SolverMutable {
            tree: SearchTree::new(SearchNode::root(*start_state).with_heuristic(heuristic)),
            nodes_generated: 0,
        };
        let root = mutable.tree.root();
        // Not solved, so at least one move away
        let mut bound = heuristic.max(1);

        loop {
            if let Some(max_solution_length) = self.max_solution_length
                && bound > max_solution_length
            {
                return Err(SolverError::MaxSolutionLengthExceeded);
            }

            debug!(working!("Searching depth {}..."), bound);
            let depth_start = Instant::now();
            let nodes_before = mutable.nodes_generated;

            let outcome = self.search_for_solution(&mut mutable, root, bound);

            debug!(
                working!("Generated {} nodes in {:.3}s"),
                mutable.nodes_generated - nodes_before,
                depth_start.elapsed().as_secs_f64()
            );

            match outcome {
                Bounded::Found(goal) => {
                    let moves = mutable.tree.path_to(goal);
                    info!(
                        success!("Found a {} move solution in {:.3}s after {} nodes"),
                        moves.len(),
                        start.elapsed().as_secs_f64(),
                        mutable.nodes_generated
                    );
                    return Ok(Solution::Moves {
                        moves,
                        nodes_generated: mutable.nodes_generated,
                    });
                }
                Bounded::Exceeded(u8::MAX) => return Err(SolverError::SolutionDoesNotExist),
                Bounded::Exceeded(next_bound) => {
                    debug_assert!(next_bound > bound);
                    bound = next_bound;
                }
            }
        }
    }
}
