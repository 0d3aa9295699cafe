// Copyright (c) 2025 Graphcore Ltd. All rights reserved.

//! Named constants shared by the benchmarking and routing table tools.

use crate::routing::dimension_order::ShortcutMap;
use crate::types::Cycles;

/// Cycles per hop of an unmodified router.
pub const LATENCY_PER_HOP_STANDARD: Cycles = 5;

/// Cycles per hop of an optimised router.
pub const LATENCY_PER_HOP_OPTIMIZED: Cycles = 3;

/// Mesh sizes (rows, columns) compared by default.
pub const GRID_SIZES: [(usize, usize); 3] = [(4, 4), (6, 6), (8, 8)];

/// Packets generated per node of the mesh being evaluated.
pub const PACKETS_PER_NODE: usize = 250;

/// One small-world shortcut is added for this many nodes.
pub const NODES_PER_SHORTCUT: usize = 4;

/// Width of the mesh the static routing table is built for.
pub const TABLE_WIDTH: usize = 8;

/// Height of the mesh the static routing table is built for.
pub const TABLE_HEIGHT: usize = 4;

/// Hard-wired shortcut pairs of the static routing table. These take ports 5
/// to 8 in this order.
pub const TABLE_SHORTCUTS: [(usize, usize); 4] = [(0, 31), (7, 24), (12, 20), (4, 28)];

#[must_use]
pub fn table_shortcut_map() -> ShortcutMap {
    ShortcutMap::new(&TABLE_SHORTCUTS)
}
