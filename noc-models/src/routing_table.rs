// Copyright (c) 2025 Graphcore Ltd. All rights reserved.

//! Static next-hop routing tables for a mesh with hard-wired shortcuts.
//!
//! The table holds, for every router and every destination, the port the
//! router sends a packet out of. It is laid out as `ports[source][destination]`
//! and prints as one line per source router:
//!
//! ```txt
//! 4 1 2 1
//! 3 4 3 2
//! 0 1 4 1
//! 3 0 3 4
//! ```

use std::fmt;

use log::debug;

use crate::routing::dimension_order::{Port, ShortcutMap, next_hop_with_shortcuts};
use crate::sim_error;
use crate::types::SimResult;

/// A complete `N x N` table of egress ports for a mesh of `N` routers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoutingTable {
    num_nodes: usize,
    ports: Vec<Port>,
}

impl RoutingTable {
    #[must_use]
    pub fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    #[must_use]
    pub fn port(&self, source: usize, destination: usize) -> Port {
        self.ports[source * self.num_nodes + destination]
    }

    /// The row of ports used by router `source`.
    #[must_use]
    pub fn row(&self, source: usize) -> &[Port] {
        let start = source * self.num_nodes;
        &self.ports[start..start + self.num_nodes]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Port]> {
        self.ports.chunks(self.num_nodes)
    }

    /// Port identifiers, row-major by source.
    #[must_use]
    pub fn to_ids(&self) -> Vec<Vec<usize>> {
        self.rows()
            .map(|row| row.iter().map(Port::id).collect())
            .collect()
    }
}

impl fmt::Display for RoutingTable {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in self.rows() {
            let line: Vec<String> = row.iter().map(|port| port.id().to_string()).collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}

/// Build the routing table for a `width x height` mesh.
///
/// Every shortcut must join two distinct routers of the mesh.
pub fn synthesize(width: usize, height: usize, shortcuts: &ShortcutMap) -> SimResult<RoutingTable> {
    if width == 0 || height == 0 {
        return sim_error!(format!(
            "Cannot build a routing table for a {width}x{height} mesh"
        ));
    }
    let num_nodes = width * height;
    shortcuts.validate(num_nodes)?;

    let ports = (0..num_nodes)
        .flat_map(|source| {
            (0..num_nodes).map(move |destination| {
                next_hop_with_shortcuts(width, shortcuts, source, destination)
            })
        })
        .collect();

    debug!(
        "Routing table for {width}x{height} mesh with {} shortcuts",
        shortcuts.len()
    );
    Ok(RoutingTable { num_nodes, ports })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_by_two_text() {
        let table = synthesize(2, 2, &ShortcutMap::default()).unwrap();
        assert_eq!(table.to_string(), "4 1 2 1\n3 4 3 2\n0 1 4 1\n3 0 3 4\n");
    }

    #[test]
    fn row_matches_port() {
        let table = synthesize(3, 2, &ShortcutMap::new(&[(0, 5)])).unwrap();
        assert_eq!(table.row(5)[0], table.port(5, 0));
        assert_eq!(table.port(5, 0), Port::Shortcut(5));
    }
}
