// Copyright (c) 2025 Graphcore Ltd. All rights reserved.

//! Hop-count simulation of a workload over a topology.
//!
//! Each packet takes a minimum-hop path and spends `latency_per_hop` cycles
//! on every hop. There is no modelling of contention or buffering: packets
//! never interact, so the latency of a packet depends only on its own route.
//!
//! Throughput is reported in packets per billion cycles.

use log::{debug, info};
use serde::Serialize;

use crate::routing::shortest_path::shortest_path;
use crate::topology::Topology;
use crate::types::Cycles;
use crate::workload::Packet;

/// Scale applied to packets-per-cycle to report throughput.
pub const THROUGHPUT_SCALE: f64 = 1e9;

/// The outcome of one delivered packet.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PacketResult {
    pub packet_id: usize,
    pub latency: Cycles,
    pub hop_count: usize,
}

/// Aggregate statistics for one simulation run.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SimulationSummary {
    pub topology_name: String,

    /// Mean latency of delivered packets, in cycles.
    pub average_latency: f64,

    /// Delivered packets per billion cycles.
    pub throughput: f64,
}

/// Route every packet of `workload` across `topology` and summarise the run.
///
/// Packets are processed in workload order and have their `end_time` and
/// `hop_count` filled in. A packet with no path to its destination is
/// dropped: it is left with zero `end_time` and `hop_count` and contributes to
/// none of the statistics. The per-packet results are in packet id order.
///
/// Latencies and end times saturate at [Cycles::MAX] rather than wrapping.
pub fn simulate(
    topology: &Topology,
    workload: &mut [Packet],
    latency_per_hop: Cycles,
    label: &str,
) -> (SimulationSummary, Vec<PacketResult>) {
    let mut results = Vec::with_capacity(workload.len());
    let mut simulation_end_time: Cycles = 0;
    let mut total_latency: u128 = 0;

    for packet in workload.iter_mut() {
        let Some(path) = shortest_path(topology, packet.source, packet.destination) else {
            debug!(
                "{label}: packet {} from {} to {} has no route, dropped",
                packet.id, packet.source, packet.destination
            );
            packet.end_time = 0;
            packet.hop_count = 0;
            continue;
        };

        let hop_count = path.len() - 1;
        let latency = (hop_count as Cycles).saturating_mul(latency_per_hop);
        packet.hop_count = hop_count;
        packet.end_time = packet.start_time.saturating_add(latency);

        simulation_end_time = simulation_end_time.max(packet.end_time);
        total_latency = total_latency.saturating_add(latency as u128);
        results.push(PacketResult {
            packet_id: packet.id,
            latency,
            hop_count,
        });
    }
    results.sort_by_key(|r| r.packet_id);

    let packets_delivered = results.len();
    let average_latency = if packets_delivered == 0 {
        0.0
    } else {
        total_latency as f64 / packets_delivered as f64
    };
    let throughput = if simulation_end_time > 0 {
        packets_delivered as f64 / simulation_end_time as f64 * THROUGHPUT_SCALE
    } else {
        0.0
    };

    info!(
        "{label}: delivered {packets_delivered}/{} packets by cycle {simulation_end_time}",
        workload.len()
    );

    let summary = SimulationSummary {
        topology_name: label.to_string(),
        average_latency,
        throughput,
    };
    (summary, results)
}
