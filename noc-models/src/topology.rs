// Copyright (c) 2025 Graphcore Ltd. All rights reserved.

//! Mesh topologies and small-world augmentation.
//!
//! A topology is a rectangular grid of `rows x cols` nodes. Each node is
//! identified by its `(row, col)` coordinate and also by a linear index laid
//! out row-major:
//!
//! ```txt
//!            col 0   col 1   col 2
//!          +-------+-------+-------+
//!   row 0  |   0   |   1   |   2   |
//!          +-------+-------+-------+
//!   row 1  |   3   |   4   |   5   |
//!          +-------+-------+-------+
//! ```
//!
//! Edges are undirected and stored once per node pair. The base mesh joins
//! every node to its in-bounds north/south/east/west neighbours (there is no
//! wraparound). A small-world topology adds long-range shortcut edges between
//! nodes that are at least two hops apart on the grid.

use std::collections::BTreeSet;
use std::fmt;

use log::{debug, trace};
use rand::Rng;
use rand::seq::index;
use serde::{Deserialize, Serialize};

use crate::sim_error;
use crate::types::SimResult;

/// Once fewer than one in this many node pairs can still take a shortcut,
/// stop sampling random pairs and pick directly from the eligible pairs.
const DIRECT_PICK_RATIO: usize = 8;

/// A grid coordinate within a topology.
#[derive(
    Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Node {
    pub row: usize,
    pub col: usize,
}

impl Node {
    #[must_use]
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Number of mesh hops between two nodes when no shortcuts are used.
    #[must_use]
    pub fn manhattan_distance(&self, other: &Node) -> usize {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[must_use]
pub fn node_to_index(cols: usize, node: Node) -> usize {
    node.row * cols + node.col
}

#[must_use]
pub fn index_to_node(cols: usize, index: usize) -> Node {
    Node::new(index / cols, index % cols)
}

/// Number of grid-adjacent node pairs in a `rows x cols` grid.
#[must_use]
pub fn num_mesh_edges(rows: usize, cols: usize) -> usize {
    rows * cols.saturating_sub(1) + cols * rows.saturating_sub(1)
}

/// An undirected graph of nodes on a rectangular grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Topology {
    rows: usize,
    cols: usize,

    /// Neighbour indices of each node, indexed by the node's linear index.
    adjacency: Vec<BTreeSet<usize>>,
    num_edges: usize,
}

impl Topology {
    fn empty(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            adjacency: vec![BTreeSet::new(); rows * cols],
            num_edges: 0,
        }
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[must_use]
    pub fn num_nodes(&self) -> usize {
        self.adjacency.len()
    }

    #[must_use]
    pub fn num_edges(&self) -> usize {
        self.num_edges
    }

    /// All nodes in linear index order.
    pub fn nodes(&self) -> impl Iterator<Item = Node> + '_ {
        (0..self.num_nodes()).map(|i| self.node_at(i))
    }

    #[must_use]
    pub fn contains(&self, node: Node) -> bool {
        node.row < self.rows && node.col < self.cols
    }

    /// Returns the linear index of a node, or `None` if it lies outside the
    /// grid.
    #[must_use]
    pub fn index_of(&self, node: Node) -> Option<usize> {
        self.contains(node).then(|| node_to_index(self.cols, node))
    }

    /// Returns the node at a linear index.
    ///
    /// The index must be less than [`num_nodes`](Self::num_nodes).
    #[must_use]
    pub fn node_at(&self, index: usize) -> Node {
        index_to_node(self.cols, index)
    }

    #[must_use]
    pub fn has_edge(&self, a: Node, b: Node) -> bool {
        match (self.index_of(a), self.index_of(b)) {
            (Some(a), Some(b)) => self.adjacency[a].contains(&b),
            _ => false,
        }
    }

    /// Linear indices of the neighbours of the node at `index`, in ascending
    /// order.
    pub fn neighbour_indices(&self, index: usize) -> impl Iterator<Item = usize> + '_ {
        self.adjacency[index].iter().copied()
    }

    /// Neighbours of a node. Empty if the node is not part of the topology.
    pub fn neighbours(&self, node: Node) -> impl Iterator<Item = Node> + '_ {
        self.index_of(node)
            .into_iter()
            .flat_map(move |i| self.neighbour_indices(i))
            .map(|i| self.node_at(i))
    }

    /// Every edge exactly once, lower linear index first.
    pub fn edges(&self) -> impl Iterator<Item = (Node, Node)> + '_ {
        self.adjacency.iter().enumerate().flat_map(move |(a, ns)| {
            ns.range(a + 1..)
                .map(move |&b| (self.node_at(a), self.node_at(b)))
        })
    }

    /// Edges that are not part of the base mesh.
    pub fn shortcut_edges(&self) -> impl Iterator<Item = (Node, Node)> + '_ {
        self.edges().filter(|(a, b)| a.manhattan_distance(b) > 1)
    }

    /// Insert an undirected edge, returning whether it was new.
    fn add_edge(&mut self, a: usize, b: usize) -> bool {
        if a == b || !self.adjacency[a].insert(b) {
            return false;
        }
        self.adjacency[b].insert(a);
        self.num_edges += 1;
        true
    }

    fn is_shortcut_candidate(&self, a: usize, b: usize) -> bool {
        a != b
            && !self.adjacency[a].contains(&b)
            && self.node_at(a).manhattan_distance(&self.node_at(b)) > 1
    }

    /// Number of node pairs that could still take a new shortcut.
    ///
    /// Every grid-adjacent pair is either a mesh edge or ineligible, so the
    /// count is all pairs less the adjacent pairs less the existing shortcuts.
    fn num_shortcut_candidates(&self) -> usize {
        let n = self.num_nodes();
        let all_pairs = n * n.saturating_sub(1) / 2;
        let adjacent_pairs = num_mesh_edges(self.rows, self.cols);
        all_pairs - adjacent_pairs - self.shortcut_edges().count()
    }

    fn shortcut_candidates(&self) -> Vec<(usize, usize)> {
        let n = self.num_nodes();
        (0..n)
            .flat_map(|a| (a + 1..n).map(move |b| (a, b)))
            .filter(|&(a, b)| self.is_shortcut_candidate(a, b))
            .collect()
    }
}

impl fmt::Display for Topology {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}x{} topology with {} edges",
            self.rows, self.cols, self.num_edges
        )
    }
}

/// Build a `rows x cols` mesh.
///
/// Both dimensions must be at least one.
pub fn build_mesh(rows: usize, cols: usize) -> SimResult<Topology> {
    if rows == 0 || cols == 0 {
        return sim_error!(format!("Cannot build a {rows}x{cols} mesh"));
    }

    let mut topology = Topology::empty(rows, cols);
    for row in 0..rows {
        for col in 0..cols {
            let here = node_to_index(cols, Node::new(row, col));
            if col + 1 < cols {
                topology.add_edge(here, here + 1);
            }
            if row + 1 < rows {
                topology.add_edge(here, here + cols);
            }
        }
    }

    debug!("Built {topology}");
    Ok(topology)
}

/// Return a copy of `topology` with up to `count` random shortcut edges added.
///
/// Shortcuts join two distinct nodes that are not already connected and are
/// more than one grid hop apart. Pairs are drawn uniformly from all such
/// pairs. If the topology runs out of eligible pairs fewer than `count`
/// shortcuts are added.
///
/// A `count` of zero is accepted and returns an unchanged copy; callers that
/// treat it as a configuration error must reject it themselves.
pub fn add_shortcuts<R>(topology: &Topology, count: usize, rng: &mut R) -> Topology
where
    R: Rng + ?Sized,
{
    let mut augmented = topology.clone();
    let num_nodes = augmented.num_nodes();
    let all_pairs = num_nodes * num_nodes.saturating_sub(1) / 2;

    let mut remaining = augmented.num_shortcut_candidates();
    let mut candidates: Option<Vec<(usize, usize)>> = None;
    let mut added = 0;

    while added < count {
        if remaining == 0 {
            debug!("Topology saturated after {added} of {count} shortcuts");
            break;
        }

        if candidates.is_none() && remaining * DIRECT_PICK_RATIO < all_pairs {
            candidates = Some(augmented.shortcut_candidates());
        }

        let (a, b) = match candidates.as_mut() {
            Some(candidates) => {
                let pick = rng.random_range(0..candidates.len());
                candidates.swap_remove(pick)
            }
            None => {
                let pair = index::sample(rng, num_nodes, 2);
                let (a, b) = (pair.index(0), pair.index(1));
                if !augmented.is_shortcut_candidate(a, b) {
                    continue;
                }
                (a, b)
            }
        };

        augmented.add_edge(a, b);
        trace!(
            "Shortcut {} <-> {}",
            augmented.node_at(a),
            augmented.node_at(b)
        );
        added += 1;
        remaining -= 1;
    }

    debug!("Added {added} shortcuts: {augmented}");
    augmented
}
