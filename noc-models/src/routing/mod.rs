// Copyright (c) 2025 Graphcore Ltd. All rights reserved.

//! Routing strategies.
//!
//! The two strategies answer different questions and are deliberately kept
//! apart:
//!  - [shortest_path] finds a complete minimum-hop path across any
//!    [Topology](crate::topology::Topology). It is used to estimate the
//!    latency of packets in a [simulation](crate::simulation).
//!  - [dimension_order] makes a single next-hop decision at one router of a
//!    mesh, with an optional table of hard-wired shortcut ports. It is used to
//!    build [routing tables](crate::routing_table).

pub mod dimension_order;
pub mod shortest_path;
