// Copyright (c) 2025 Graphcore Ltd. All rights reserved.

//! Compare NoC topologies and build static routing tables.
//!
//! Two applications are built from this crate:
//!  - `sim-noc` builds a regular mesh and a small-world mesh for each
//!    configured grid size, routes the same random workload over both, and
//!    prints latency and throughput for standard and optimized routers.
//!  - `noc-routing-table` prints the dimension-order routing table of a mesh
//!    with hard-wired shortcut ports, one line of port numbers per router.
//!
//! # Examples
//!
//! Running the default comparison of 4x4, 6x6 and 8x8 meshes:
//! ```text
//! cargo run --release --bin sim-noc
//! ```
//!
//! Evaluating a single size with a different seed and less traffic:
//! ```text
//! cargo run --release --bin sim-noc -- --grid-sizes 10x10 --seed 7 --packets-per-node 50
//! ```
//!
//! Printing the routing table of the default 8x4 mesh with four shortcuts:
//! ```text
//! cargo run --release --bin noc-routing-table
//! ```
//!
//! All options can also be given in a TOML file or as `NOC_` environment
//! variables, see [config].

pub mod config;
pub mod experiment;
pub mod logging;
pub mod report;
