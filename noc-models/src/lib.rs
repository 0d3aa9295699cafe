// Copyright (c) 2025 Graphcore Ltd. All rights reserved.

#![doc(test(attr(warn(unused))))]

//! Models for comparing on-chip network topologies.
//!
//! The library provides:
//!  - [topology]: rectangular meshes and small-world meshes with random
//!    long-range shortcuts.
//!  - [workload]: synthetic uniform-random traffic.
//!  - [routing]: minimum-hop path finding and dimension-order next-hop
//!    decisions.
//!  - [simulation]: hop-count latency and throughput estimates for a workload.
//!  - [routing_table]: static per-router routing tables for a mesh with
//!    hard-wired shortcut ports.
//!
//! All randomness comes from an RNG supplied by the caller, so a run is
//! reproducible from its seed.
//!
//! # Simple Application
//!
//! ```rust
//! use noc_models::presets::LATENCY_PER_HOP_STANDARD;
//! use noc_models::simulation::simulate;
//! use noc_models::topology::{add_shortcuts, build_mesh};
//! use noc_models::workload::generate;
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//!
//! let mut rng = StdRng::seed_from_u64(1);
//! let mesh = build_mesh(4, 4).expect("4x4 is a valid mesh");
//! let small_world = add_shortcuts(&mesh, 4, &mut rng);
//!
//! let nodes: Vec<_> = mesh.nodes().collect();
//! let mut workload = generate(100, &nodes, &mut rng).expect("mesh has 16 nodes");
//!
//! let (mesh_summary, _) = simulate(&mesh, &mut workload, LATENCY_PER_HOP_STANDARD, "mesh");
//! let (sw_summary, _) =
//!     simulate(&small_world, &mut workload, LATENCY_PER_HOP_STANDARD, "small-world");
//! assert!(sw_summary.average_latency <= mesh_summary.average_latency);
//! ```

pub mod presets;
pub mod routing;
pub mod routing_table;
pub mod simulation;
pub mod topology;
pub mod types;
pub mod workload;
