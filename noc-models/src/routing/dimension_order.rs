// Copyright (c) 2025 Graphcore Ltd. All rights reserved.

//! Dimension-order (XY) next-hop routing for a mesh router.
//!
//! Routers are identified by linear index `i` in a mesh `width` nodes wide,
//! with `x = i % width` and `y = i / width`. `y` grows towards the south:
//!
//! ```txt
//!                 North (y - 1)
//!                      ^
//!                      |
//!  West (x - 1) <-- router --> East (x + 1)
//!                      |
//!                      v
//!                 South (y + 1)
//! ```
//!
//! The X dimension is always resolved before the Y dimension. A
//! [ShortcutMap] can bind router pairs to dedicated shortcut ports, and a
//! configured shortcut always takes precedence over the XY decision.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::sim_error;
use crate::types::SimResult;

/// Identifier of the first shortcut port. Shortcut ports are numbered from
/// here in the order their pairs are declared.
pub const FIRST_SHORTCUT_PORT: usize = 5;

/// The egress port chosen by a router.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Port {
    North,
    East,
    South,
    West,
    Local,
    /// A dedicated shortcut channel, holding its port identifier.
    Shortcut(usize),
}

impl Port {
    /// The integer identifier used in routing tables.
    #[must_use]
    pub fn id(&self) -> usize {
        match self {
            Port::North => 0,
            Port::East => 1,
            Port::South => 2,
            Port::West => 3,
            Port::Local => 4,
            Port::Shortcut(id) => *id,
        }
    }

    #[must_use]
    pub fn is_shortcut(&self) -> bool {
        matches!(self, Port::Shortcut(_))
    }

    /// Linear index of the router reached by leaving `index` through this
    /// port.
    ///
    /// Returns `None` for shortcut ports (whose far end is not implied by the
    /// port) and for moves that would leave the mesh on the north or west
    /// edge.
    #[must_use]
    pub fn step(&self, index: usize, width: usize) -> Option<usize> {
        match self {
            Port::North => index.checked_sub(width),
            Port::East => Some(index + 1),
            Port::South => Some(index + width),
            Port::West => index.checked_sub(1),
            Port::Local => Some(index),
            Port::Shortcut(_) => None,
        }
    }
}

impl fmt::Display for Port {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Port::North => write!(f, "north"),
            Port::East => write!(f, "east"),
            Port::South => write!(f, "south"),
            Port::West => write!(f, "west"),
            Port::Local => write!(f, "local"),
            Port::Shortcut(id) => write!(f, "shortcut_{id}"),
        }
    }
}

/// Decide the next hop from router `source` towards router `destination`.
///
/// `width` must be non-zero.
#[must_use]
pub fn next_hop(width: usize, source: usize, destination: usize) -> Port {
    let (src_x, src_y) = (source % width, source / width);
    let (dst_x, dst_y) = (destination % width, destination / width);

    if source == destination {
        Port::Local
    } else if dst_x > src_x {
        Port::East
    } else if dst_x < src_x {
        Port::West
    } else if dst_y > src_y {
        Port::South
    } else {
        Port::North
    }
}

/// Hard-wired bidirectional shortcut links between pairs of routers.
///
/// Each declared pair is bound to its own port: the first pair to
/// [FIRST_SHORTCUT_PORT], the next to the one after, and so on.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ShortcutMap {
    pairs: Vec<(usize, usize)>,
}

impl ShortcutMap {
    #[must_use]
    pub fn new(pairs: &[(usize, usize)]) -> Self {
        Self {
            pairs: pairs.to_vec(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Declared pairs with their ports, in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, Port)> + '_ {
        self.pairs
            .iter()
            .enumerate()
            .map(|(i, &(a, b))| (a, b, Port::Shortcut(FIRST_SHORTCUT_PORT + i)))
    }

    /// The shortcut port joining `source` and `destination` in either
    /// direction. If a pair is declared twice the first declaration is used.
    #[must_use]
    pub fn port_for(&self, source: usize, destination: usize) -> Option<Port> {
        self.iter()
            .find(|&(a, b, _)| (a, b) == (source, destination) || (b, a) == (source, destination))
            .map(|(_, _, port)| port)
    }

    /// Check that every pair joins two distinct routers of a mesh with
    /// `num_nodes` routers.
    pub fn validate(&self, num_nodes: usize) -> SimResult {
        for (a, b, port) in self.iter() {
            if a == b {
                return sim_error!(format!("Shortcut {port} joins router {a} to itself"));
            }
            if a >= num_nodes || b >= num_nodes {
                return sim_error!(format!(
                    "Shortcut {port} ({a} <-> {b}) is outside a mesh of {num_nodes} routers"
                ));
            }
        }
        Ok(())
    }
}

/// Decide the next hop, using a shortcut port if one joins the two routers
/// and dimension-order routing otherwise.
#[must_use]
pub fn next_hop_with_shortcuts(
    width: usize,
    shortcuts: &ShortcutMap,
    source: usize,
    destination: usize,
) -> Port {
    shortcuts
        .port_for(source, destination)
        .unwrap_or_else(|| next_hop(width, source, destination))
}
