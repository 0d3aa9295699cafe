// Copyright (c) 2025 Graphcore Ltd. All rights reserved.

//! Compare mesh and small-world NoC topologies.
//!
//! See `lib.rs` for details.

use std::io::{self, Write};

use indicatif::ProgressBar;
use log::info;
use noc_models::types::{SimError, SimResult};
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;
use sim_noc::config::{GridSize, SimSettings};
use sim_noc::experiment::{ExperimentParams, run_grid_size};
use sim_noc::logging::init_logger;
use sim_noc::report::write_comparison;

const BANNER: &str = "=========================";

/// Each grid size gets its own RNG so its results do not depend on which
/// other sizes are run.
fn grid_seed(seed: u64, grid: GridSize) -> u64 {
    seed ^ (((grid.rows as u64) << 32) | grid.cols as u64)
}

fn main() -> SimResult {
    let settings = SimSettings::parse_all_sources()?;
    init_logger(settings.log_level)?;

    info!(
        "Evaluating {} grid sizes with random seed {}",
        settings.grid_sizes.len(),
        settings.seed
    );
    let params = ExperimentParams::from(&settings);

    let progress_bar = settings
        .progress
        .then(|| ProgressBar::new(settings.grid_sizes.len() as u64));

    let stdout = io::stdout();
    for &grid in &settings.grid_sizes {
        info!("{BANNER} RUNNING SIMULATION FOR {grid} GRID {BANNER}");

        let mut rng = Xoshiro256PlusPlus::seed_from_u64(grid_seed(settings.seed, grid));
        let result = run_grid_size(grid, &params, &mut rng)?;

        let mut out = stdout.lock();
        write_comparison(&mut out, &result)
            .and_then(|()| out.flush())
            .map_err(|e| SimError(format!("Unable to write results: {e}")))?;

        info!("{BANNER} COMPLETED SIMULATION FOR {grid} GRID {BANNER}");
        if let Some(progress_bar) = &progress_bar {
            progress_bar.inc(1);
        }
    }

    if let Some(progress_bar) = progress_bar {
        progress_bar.finish();
    }
    Ok(())
}
