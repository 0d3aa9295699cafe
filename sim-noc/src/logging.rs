// Copyright (c) 2025 Graphcore Ltd. All rights reserved.

use std::io;

use log::LevelFilter;
use noc_models::types::{SimError, SimResult};
use simplelog::{ConfigBuilder, WriteLogger};

/// Install the console logger.
///
/// Messages go to stderr so that stdout only carries program output. They are
/// printed without timestamps, locations, thread or target so that output is
/// the same from run to run.
pub fn init_logger(level: LevelFilter) -> SimResult {
    let config = ConfigBuilder::new()
        .set_time_level(LevelFilter::Off)
        .set_location_level(LevelFilter::Off)
        .set_thread_level(LevelFilter::Off)
        .set_target_level(LevelFilter::Off)
        .build();
    WriteLogger::init(level, config, io::stderr())
        .map_err(|e| SimError(format!("Unable to start logger: {e}")))
}
