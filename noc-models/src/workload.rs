// Copyright (c) 2025 Graphcore Ltd. All rights reserved.

//! Synthetic uniform-random traffic.

use log::debug;
use rand::Rng;
use rand::seq::index;
use serde::Serialize;

use crate::sim_error;
use crate::topology::Node;
use crate::types::{Cycles, SimResult};

/// Cycles between the start times of consecutive packets.
pub const PACKET_SPACING_CYCLES: Cycles = 2;

/// A single packet to be routed from `source` to `destination`.
///
/// `end_time` and `hop_count` are zero until the packet has been through a
/// [simulation](crate::simulation::simulate).
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Packet {
    pub id: usize,
    pub source: Node,
    pub destination: Node,
    pub start_time: Cycles,
    pub end_time: Cycles,
    pub hop_count: usize,
}

impl Packet {
    #[must_use]
    pub fn new(id: usize, source: Node, destination: Node, start_time: Cycles) -> Self {
        Self {
            id,
            source,
            destination,
            start_time,
            end_time: 0,
            hop_count: 0,
        }
    }
}

/// Packets in issue order.
pub type Workload = Vec<Packet>;

/// Generate `num_packets` packets between distinct nodes chosen uniformly at
/// random from `nodes`.
///
/// Packet `i` starts at cycle `i * PACKET_SPACING_CYCLES`. A `num_packets` of
/// zero is accepted and gives an empty workload; callers that treat it as a
/// configuration error must reject it themselves.
pub fn generate<R>(num_packets: usize, nodes: &[Node], rng: &mut R) -> SimResult<Workload>
where
    R: Rng + ?Sized,
{
    if nodes.len() < 2 {
        return sim_error!(format!(
            "Workload needs at least 2 nodes, given {}",
            nodes.len()
        ));
    }

    let workload: Workload = (0..num_packets)
        .map(|id| {
            let pair = index::sample(rng, nodes.len(), 2);
            Packet::new(
                id,
                nodes[pair.index(0)],
                nodes[pair.index(1)],
                id as Cycles * PACKET_SPACING_CYCLES,
            )
        })
        .collect();

    debug!(
        "Generated {} packets over {} nodes",
        workload.len(),
        nodes.len()
    );
    Ok(workload)
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256PlusPlus;

    use super::*;

    #[test]
    fn start_times_are_spaced() {
        let nodes = [Node::new(0, 0), Node::new(0, 1), Node::new(1, 0)];
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(7);
        let workload = generate(5, &nodes, &mut rng).unwrap();

        for (i, packet) in workload.iter().enumerate() {
            assert_eq!(packet.id, i);
            assert_eq!(packet.start_time, 2 * i as u64);
            assert_eq!(packet.end_time, 0);
            assert_eq!(packet.hop_count, 0);
            assert_ne!(packet.source, packet.destination);
        }
    }

    #[test]
    fn zero_packets_is_empty() {
        let nodes = [Node::new(0, 0), Node::new(0, 1)];
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(7);
        assert!(generate(0, &nodes, &mut rng).unwrap().is_empty());
    }

    #[test]
    fn single_node_rejected() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(1);
        assert!(generate(1, &[Node::new(0, 0)], &mut rng).is_err());
        assert!(generate(0, &[], &mut rng).is_err());
    }
}
