// Copyright (c) 2025 Graphcore Ltd. All rights reserved.

//! Plain-text reporting of experiment results.

use std::io::{self, Write};

use crate::experiment::GridResult;

const NAME_WIDTH: usize = 32;

/// Write a comparison table of the summaries for one grid size.
///
/// ```text
/// NoC benchmarking results (4x4): 4000 packets, 4 shortcuts
/// Topology                          Avg latency (cycles)  Throughput (pkts/1e9 cycles)
/// Regular Mesh                                     13.30                      5.00e8
/// ```
pub fn write_comparison(out: &mut impl Write, result: &GridResult) -> io::Result<()> {
    writeln!(
        out,
        "NoC benchmarking results ({}): {} packets, {} shortcuts",
        result.grid,
        result.num_packets,
        result.num_shortcuts()
    )?;
    writeln!(
        out,
        "{:<NAME_WIDTH$}  {:>20}  {:>28}",
        "Topology", "Avg latency (cycles)", "Throughput (pkts/1e9 cycles)"
    )?;
    for summary in &result.summaries {
        writeln!(
            out,
            "{:<NAME_WIDTH$}  {:>20.2}  {:>28.2e}",
            summary.topology_name, summary.average_latency, summary.throughput
        )?;
    }
    writeln!(out)
}
