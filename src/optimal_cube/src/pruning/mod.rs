//! Pattern databases: for every rank of a cubie group, the fewest turns that
//! bring the group from the solved cube to that rank.
//!
//! Tables are generated by iterative deepening from the solved state. During
//! iteration `budget` only the nodes at exactly that depth are recorded, and
//! only when their rank has not been seen yet, so the value written first is
//! also the minimal one.

use crate::{
    encoding::CubieGroup,
    node::{NodeId, SearchNode, SearchTree},
    rotation::Move,
    start,
    state::CubeState,
    success, working,
};
use log::{debug, info};
use std::{thread, time::Instant};
use thiserror::Error;

pub mod storage;

/// The deepest level tables are generated to by default.
pub const DEFAULT_DEPTH_LIMIT: u8 = 11;

// The goal rank is only ever reached by the root, whose distance is zero
// anyway, so zero doubles as the unseen marker
const UNSEEN: u8 = 0;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum PruningTableError {
    #[error("A {group} table has {expected} entries, got {actual}")]
    SizeMismatch {
        group: CubieGroup,
        expected: usize,
        actual: usize,
    },
    #[error("Expected a {expected} table, got a {actual} table")]
    GroupMismatch {
        expected: CubieGroup,
        actual: CubieGroup,
    },
}

/// How independent tables are generated.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum Parallelism {
    Sequential,
    /// One scoped thread per table.
    #[default]
    Threaded,
}

/// A single pattern database, indexed by [`CubieGroup::rank`].
#[derive(Clone, PartialEq, Eq)]
pub struct PruningTable {
    group: CubieGroup,
    values: Box<[u8]>,
}

/// The three pattern databases the solver consults.
#[derive(Clone)]
pub struct PruningTables {
    corners: PruningTable,
    edges_one: PruningTable,
    edges_two: PruningTable,
}

struct TableGenerator<'a> {
    group: CubieGroup,
    goal_rank: usize,
    values: &'a mut [u8],
    nodes_generated: u64,
    discovered: u64,
}

impl TableGenerator<'_> {
    /// Depth limited expansion of `id`, recording the ranks of the nodes at
    /// depth `budget`.
    fn deepen(&mut self, tree: &mut SearchTree, id: NodeId, budget: u8) {
        let node = &tree[id];
        let depth = node.depth;
        let state = node.state;
        let last_face = node.generator.map(|move_| move_.face);

        if depth >= budget {
            let rank = node.rank.expect("pattern database nodes are always ranked");
            if self.values[rank] == UNSEEN && rank != self.goal_rank {
                self.values[rank] = budget;
                self.discovered += 1;
            }
            return;
        }

        for move_ in Move::ALL {
            // Two turns of one face in a row collapse into a single turn or
            // none, so they never lead anywhere new at a minimal depth
            if Some(move_.face) == last_face {
                continue;
            }
            let child = state.apply_move(move_);
            let rank = self.group.rank(&child);
            // A minimal path never passes through the goal again
            if rank == self.goal_rank {
                continue;
            }
            self.nodes_generated += 1;
            let child_id = tree.push(SearchNode::child(id, move_, child, depth + 1).with_rank(rank));
            self.deepen(tree, child_id, budget);
            tree.truncate_after(id);
        }
    }
}

impl PruningTable {
    /// Build the table for `group` by iterative deepening from the solved
    /// state up to and including `depth_limit`. Ranks not reached within the
    /// limit are left at zero.
    #[must_use]
    pub fn generate(group: CubieGroup, depth_limit: u8) -> Self {
        info!(
            start!("Generating the {} pattern database to depth {}"),
            group, depth_limit
        );
        let start = Instant::now();

        let mut values = vec![UNSEEN; group.table_size()].into_boxed_slice();
        let goal_rank = group.rank(&CubeState::SOLVED);
        let mut generator = TableGenerator {
            group,
            goal_rank,
            values: &mut values,
            nodes_generated: 0,
            discovered: 0,
        };
        let mut tree = SearchTree::new(SearchNode::root(CubeState::SOLVED).with_rank(goal_rank));
        let root = tree.root();

        for budget in 0..=depth_limit {
            debug!(working!("Searching {} at depth {}..."), group, budget);
            let depth_start = Instant::now();
            let nodes_before = generator.nodes_generated;
            let discovered_before = generator.discovered;

            generator.deepen(&mut tree, root, budget);

            debug!(
                working!("Generated {} nodes and discovered {} new ranks in {:.3}s"),
                generator.nodes_generated - nodes_before,
                generator.discovered - discovered_before,
                depth_start.elapsed().as_secs_f64()
            );
        }

        info!(
            success!("Generated the {} pattern database in {:.3}s, {} of {} ranks reached"),
            group,
            start.elapsed().as_secs_f64(),
            generator.discovered + 1,
            group.table_size()
        );

        Self { group, values }
    }

    /// Wrap already computed values, e.g. ones read from disk.
    ///
    /// # Errors
    ///
    /// If `values` does not have exactly one entry per rank of `group`.
    pub fn from_values(group: CubieGroup, values: Box<[u8]>) -> Result<Self, PruningTableError> {
        if values.len() == group.table_size() {
            Ok(Self { group, values })
        } else {
            Err(PruningTableError::SizeMismatch {
                group,
                expected: group.table_size(),
                actual: values.len(),
            })
        }
    }

    #[must_use]
    pub fn group(&self) -> CubieGroup {
        self.group
    }

    #[must_use]
    pub fn values(&self) -> &[u8] {
        &self.values
    }

    /// The recorded distance of `state`'s projection onto this table's group.
    #[must_use]
    pub fn lookup(&self, state: &CubeState) -> u8 {
        self.values[self.group.rank(state)]
    }
}

impl std::fmt::Debug for PruningTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PruningTable")
            .field("group", &self.group)
            .field("len", &self.values.len())
            .finish_non_exhaustive()
    }
}

impl PruningTables {
    /// Bundle three tables, checking each one covers the expected group.
    ///
    /// # Errors
    ///
    /// If a table was generated for a different group.
    pub fn new(
        corners: PruningTable,
        edges_one: PruningTable,
        edges_two: PruningTable,
    ) -> Result<Self, PruningTableError> {
        for (table, expected) in [&corners, &edges_one, &edges_two]
            .into_iter()
            .zip(CubieGroup::ALL)
        {
            if table.group != expected {
                return Err(PruningTableError::GroupMismatch {
                    expected,
                    actual: table.group,
                });
            }
        }
        Ok(Self {
            corners,
            edges_one,
            edges_two,
        })
    }

    /// Generate all three tables. The result does not depend on
    /// `parallelism`.
    #[must_use]
    pub fn generate_all(depth_limit: u8, parallelism: Parallelism) -> Self {
        let [corners, edges_one, edges_two] = match parallelism {
            Parallelism::Sequential => {
                CubieGroup::ALL.map(|group| PruningTable::generate(group, depth_limit))
            }
            Parallelism::Threaded => thread::scope(|s| {
                CubieGroup::ALL
                    .map(|group| s.spawn(move || PruningTable::generate(group, depth_limit)))
                    .map(|handle| {
                        handle
                            .join()
                            .unwrap_or_else(|payload| std::panic::resume_unwind(payload))
                    })
            }),
        };
        Self {
            corners,
            edges_one,
            edges_two,
        }
    }

    /// The largest of the three table values. Each one is a lower bound on
    /// the number of turns needed to solve `state`, and so is their maximum.
    #[must_use]
    pub fn admissible_heuristic(&self, state: &CubeState) -> u8 {
        self.corners
            .lookup(state)
            .max(self.edges_one.lookup(state))
            .max(self.edges_two.lookup(state))
    }

    #[must_use]
    pub fn tables(&self) -> [&PruningTable; 3] {
        [&self.corners, &self.edges_one, &self.edges_two]
    }

    #[must_use]
    pub fn into_tables(self) -> [PruningTable; 3] {
        [self.corners, self.edges_one, self.edges_two]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rotation::{Direction, Face};

    #[test]
    fn depth_zero_only_knows_the_goal() {
        let table = PruningTable::generate(CubieGroup::EDGES_ONE, 0);
        assert!(table.values().iter().all(|&value| value == 0));
    }

    #[test]
    fn depth_one_records_single_turns() {
        let table = PruningTable::generate(CubieGroup::Corners, 1);
        for move_ in Move::ALL {
            let state = CubeState::SOLVED.apply_move(move_);
            assert_eq!(table.lookup(&state), 1, "{move_}");
        }
        // Every single turn moves the corners differently
        assert_eq!(table.values().iter().filter(|&&value| value == 1).count(), 18);
        // Two turns are past the limit
        let two = CubeState::SOLVED
            .apply(Face::Front, Direction::Clockwise)
            .apply(Face::Rear, Direction::Clockwise);
        assert_eq!(table.lookup(&two), 0);
    }

    #[test]
    fn rejects_mismatched_tables() {
        assert_eq!(
            PruningTable::from_values(CubieGroup::Corners, vec![0; 3].into_boxed_slice()),
            Err(PruningTableError::SizeMismatch {
                group: CubieGroup::Corners,
                expected: 88_179_840,
                actual: 3
            })
        );

        let corners = PruningTable::generate(CubieGroup::Corners, 0);
        let edges = PruningTable::generate(CubieGroup::EDGES_ONE, 0);
        assert_eq!(
            PruningTables::new(corners, edges.clone(), edges).err(),
            Some(PruningTableError::GroupMismatch {
                expected: CubieGroup::EDGES_TWO,
                actual: CubieGroup::EDGES_ONE
            })
        );
    }
}
