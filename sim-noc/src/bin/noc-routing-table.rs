// Copyright (c) 2025 Graphcore Ltd. All rights reserved.

//! Print the static routing table of a mesh with hard-wired shortcuts.
//!
//! One line is printed per source router, holding the egress port to use for
//! every destination router (`0` north, `1` east, `2` south, `3` west, `4`
//! local, `5` upwards for the shortcut ports).

use std::io::{self, Write};

use log::info;
use noc_models::routing_table::synthesize;
use noc_models::types::{SimError, SimResult};
use sim_noc::config::TableSettings;
use sim_noc::logging::init_logger;

fn main() -> SimResult {
    let settings = TableSettings::parse_all_sources()?;
    init_logger(settings.log_level)?;

    let shortcuts = settings.shortcut_map();
    for (a, b, port) in shortcuts.iter() {
        info!("Shortcut {a} <-> {b} on port {}", port.id());
    }

    let table = synthesize(settings.width, settings.height, &shortcuts)?;

    let mut out = io::stdout().lock();
    write!(out, "{table}")
        .and_then(|()| out.flush())
        .map_err(|e| SimError(format!("Unable to write routing table: {e}")))
}
