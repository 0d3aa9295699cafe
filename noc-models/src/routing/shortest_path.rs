// Copyright (c) 2025 Graphcore Ltd. All rights reserved.

//! Minimum-hop routing over an arbitrary topology.
//!
//! A breadth-first search from the source. Neighbours are visited in
//! ascending linear index order, so the path returned among several of equal
//! length is stable for a given topology, but callers should only rely on its
//! length.

use std::collections::VecDeque;

use crate::topology::{Node, Topology};

/// Find a minimum-hop path from `source` to `destination`, inclusive of both.
///
/// Returns `None` if either node is outside the topology or the destination
/// cannot be reached.
#[must_use]
pub fn shortest_path(topology: &Topology, source: Node, destination: Node) -> Option<Vec<Node>> {
    let from = topology.index_of(source)?;
    let to = topology.index_of(destination)?;

    if from == to {
        return Some(vec![source]);
    }

    let mut previous: Vec<Option<usize>> = vec![None; topology.num_nodes()];
    let mut visited = vec![false; topology.num_nodes()];
    let mut frontier = VecDeque::new();
    visited[from] = true;
    frontier.push_back(from);

    'search: while let Some(current) = frontier.pop_front() {
        for next in topology.neighbour_indices(current) {
            if visited[next] {
                continue;
            }
            visited[next] = true;
            previous[next] = Some(current);
            if next == to {
                break 'search;
            }
            frontier.push_back(next);
        }
    }

    if !visited[to] {
        return None;
    }

    let mut path = vec![destination];
    let mut current = to;
    while let Some(prev) = previous[current] {
        path.push(topology.node_at(prev));
        current = prev;
    }
    path.reverse();
    Some(path)
}

/// Number of hops on a minimum-hop path, or `None` if there is no path.
#[must_use]
pub fn hop_count(topology: &Topology, source: Node, destination: Node) -> Option<usize> {
    shortest_path(topology, source, destination).map(|path| path.len() - 1)
}
