// Copyright (c) 2025 Graphcore Ltd. All rights reserved.

//! Compare a regular mesh with a small-world mesh of the same size.
//!
//! For each grid size three scenarios are simulated over the same workload:
//!  - the regular mesh with standard routers,
//!  - the small-world mesh with standard routers,
//!  - the small-world mesh with optimized routers.

use log::info;
use noc_models::simulation::{SimulationSummary, simulate};
use noc_models::topology::{Node, Topology, add_shortcuts, build_mesh};
use noc_models::types::{Cycles, SimResult};
use noc_models::workload::generate;
use rand::Rng;

use crate::config::{GridSize, SimSettings};

pub const REGULAR_MESH: &str = "Regular Mesh";
pub const SMALL_WORLD_MESH: &str = "Small-World Mesh";
pub const SMALL_WORLD_OPTIMIZED: &str = "Small-World + Optimized Router";

/// The parameters that scale an experiment to a grid size.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ExperimentParams {
    pub packets_per_node: usize,
    pub nodes_per_shortcut: usize,
    pub latency_standard: Cycles,
    pub latency_optimized: Cycles,
}

impl From<&SimSettings> for ExperimentParams {
    fn from(settings: &SimSettings) -> Self {
        Self {
            packets_per_node: settings.packets_per_node,
            nodes_per_shortcut: settings.nodes_per_shortcut,
            latency_standard: settings.latency_standard,
            latency_optimized: settings.latency_optimized,
        }
    }
}

impl ExperimentParams {
    #[must_use]
    pub fn num_packets(&self, grid: GridSize) -> usize {
        self.packets_per_node * grid.num_nodes()
    }

    #[must_use]
    pub fn num_shortcuts(&self, grid: GridSize) -> usize {
        grid.num_nodes() / self.nodes_per_shortcut
    }
}

/// Everything produced for one grid size.
#[derive(Clone, Debug)]
pub struct GridResult {
    pub grid: GridSize,
    pub mesh: Topology,
    pub small_world: Topology,
    pub num_packets: usize,
    pub summaries: Vec<SimulationSummary>,
}

impl GridResult {
    /// Number of shortcuts actually added to the small-world mesh.
    #[must_use]
    pub fn num_shortcuts(&self) -> usize {
        self.small_world.num_edges() - self.mesh.num_edges()
    }
}

/// Build both topologies and a workload for `grid`, then simulate the three
/// scenarios.
///
/// The shortcuts are drawn from `rng` before the workload.
pub fn run_grid_size<R>(
    grid: GridSize,
    params: &ExperimentParams,
    rng: &mut R,
) -> SimResult<GridResult>
where
    R: Rng + ?Sized,
{
    let num_packets = params.num_packets(grid);
    let num_shortcuts = params.num_shortcuts(grid);

    let mesh = build_mesh(grid.rows, grid.cols)?;
    let small_world = add_shortcuts(&mesh, num_shortcuts, rng);
    info!(
        "{grid}: {} mesh edges, {} shortcuts requested, {} added",
        mesh.num_edges(),
        num_shortcuts,
        small_world.num_edges() - mesh.num_edges()
    );

    let nodes: Vec<Node> = mesh.nodes().collect();
    let mut workload = generate(num_packets, &nodes, rng)?;

    let scenarios = [
        (&mesh, params.latency_standard, REGULAR_MESH),
        (&small_world, params.latency_standard, SMALL_WORLD_MESH),
        (&small_world, params.latency_optimized, SMALL_WORLD_OPTIMIZED),
    ];
    let summaries = scenarios
        .into_iter()
        .map(|(topology, latency_per_hop, label)| {
            let (summary, _) = simulate(topology, &mut workload, latency_per_hop, label);
            summary
        })
        .collect();

    Ok(GridResult {
        grid,
        mesh,
        small_world,
        num_packets,
        summaries,
    })
}
