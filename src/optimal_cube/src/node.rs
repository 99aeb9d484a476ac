//! Search nodes and the arena that owns them.
//!
//! Children refer to their parent by [`NodeId`], never by ownership. Both
//! searches in this crate are depth first, so the arena only ever holds the
//! active path: a node is pushed when it is expanded and the arena is
//! truncated back to its parent once its subtree is exhausted.

use crate::{rotation::Move, state::CubeState};
use std::ops::Index;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug, Clone)]
pub struct SearchNode {
    pub state: CubeState,
    pub parent: Option<NodeId>,
    /// The move that produced this node from its parent.
    pub generator: Option<Move>,
    /// The number of moves from the root to this node.
    pub depth: u8,
    /// An admissible estimate of the distance to solved, only set while
    /// solving.
    pub heuristic: Option<u8>,
    /// The pattern database rank of the state, only set while building.
    pub rank: Option<usize>,
}

impl SearchNode {
    #[must_use]
    pub fn root(state: CubeState) -> Self {
        Self {
            state,
            parent: None,
            generator: None,
            depth: 0,
            heuristic: None,
            rank: None,
        }
    }

    #[must_use]
    pub fn child(parent: NodeId, generator: Move, state: CubeState, depth: u8) -> Self {
        Self {
            state,
            parent: Some(parent),
            generator: Some(generator),
            depth,
            heuristic: None,
            rank: None,
        }
    }

    #[must_use]
    pub fn with_heuristic(mut self, heuristic: u8) -> Self {
        self.heuristic = Some(heuristic);
        self
    }

    #[must_use]
    pub fn with_rank(mut self, rank: usize) -> Self {
        self.rank = Some(rank);
        self
    }
}

#[derive(Debug, Clone)]
pub struct SearchTree {
    nodes: Vec<SearchNode>,
}

impl SearchTree {
    #[must_use]
    pub fn new(root: SearchNode) -> Self {
        debug_assert!(root.parent.is_none());
        let mut nodes = Vec::with_capacity(32);
        nodes.push(root);
        Self { nodes }
    }

    #[must_use]
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Add `node` to the tree. Its parent must already be in the tree.
    pub fn push(&mut self, node: SearchNode) -> NodeId {
        debug_assert!(node.parent.is_some_and(|NodeId(parent)| parent < self.nodes.len()));
        self.nodes.push(node);
        NodeId(self.nodes.len() - 1)
    }

    /// Drop every node added after `id`, reclaiming abandoned subtrees.
    pub fn truncate_after(&mut self, id: NodeId) {
        self.nodes.truncate(id.0 + 1);
    }

    /// The moves leading from the root to `id`, in application order.
    #[must_use]
    pub fn path_to(&self, id: NodeId) -> Vec<Move> {
        let mut moves = vec![];
        let mut current = &self[id];
        while let (Some(parent), Some(generator)) = (current.parent, current.generator) {
            moves.push(generator);
            current = &self[parent];
        }
        moves.reverse();
        moves
    }
}

impl Index<NodeId> for SearchTree {
    type Output = SearchNode;

    fn index(&self, index: NodeId) -> &Self::Output {
        &self.nodes[index.0]
    }
}
