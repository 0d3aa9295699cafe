// Copyright (c) 2025 Graphcore Ltd. All rights reserved.

//! Layered configuration for the applications.
//!
//! Settings are merged from the following sources, later sources overriding
//! earlier ones:
//!  1. Built-in defaults.
//!  2. A TOML file in the working directory named after the application
//!     (`sim-noc.toml` or `noc-routing-table.toml`), if present.
//!  3. A TOML file passed with `--conf-file`.
//!  4. Environment variables prefixed with `NOC_`, for example
//!     `NOC_SEED=3` or `NOC_GRID_SIZES="[4x4, 8x8]"`.
//!  5. Command-line arguments.
//!
//! The command-line structures only hold the options the user actually
//! passed, so that an absent argument never hides a value from a file or the
//! environment.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use clap::Parser;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use log::LevelFilter;
use noc_models::presets::{
    GRID_SIZES, LATENCY_PER_HOP_OPTIMIZED, LATENCY_PER_HOP_STANDARD, NODES_PER_SHORTCUT,
    PACKETS_PER_NODE, TABLE_HEIGHT, TABLE_SHORTCUTS, TABLE_WIDTH,
};
use noc_models::routing::dimension_order::ShortcutMap;
use noc_models::sim_error;
use noc_models::types::{Cycles, SimError, SimResult};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Prefix of environment variables read by all applications.
pub const ENV_PREFIX: &str = "NOC_";

pub const SIM_CONF_FILE: &str = "sim-noc.toml";
pub const TABLE_CONF_FILE: &str = "noc-routing-table.toml";

/// Mesh dimensions written as `ROWSxCOLS`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct GridSize {
    pub rows: usize,
    pub cols: usize,
}

impl GridSize {
    #[must_use]
    pub fn num_nodes(&self) -> usize {
        self.rows * self.cols
    }
}

impl fmt::Display for GridSize {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}x{}", self.rows, self.cols)
    }
}

impl FromStr for GridSize {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some((rows, cols)) = s.trim().split_once(['x', 'X']) else {
            return sim_error!(format!("Grid size '{s}' is not of the form ROWSxCOLS"));
        };
        let parse = |v: &str| {
            v.trim()
                .parse::<usize>()
                .map_err(|e| SimError(format!("Grid size '{s}': {e}")))
        };
        Ok(Self {
            rows: parse(rows)?,
            cols: parse(cols)?,
        })
    }
}

impl TryFrom<String> for GridSize {
    type Error = SimError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<GridSize> for String {
    fn from(value: GridSize) -> Self {
        value.to_string()
    }
}

/// A hard-wired shortcut between two routers written as `A-B`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ShortcutPair(pub usize, pub usize);

impl fmt::Display for ShortcutPair {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}-{}", self.0, self.1)
    }
}

impl FromStr for ShortcutPair {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some((a, b)) = s.trim().split_once('-') else {
            return sim_error!(format!("Shortcut '{s}' is not of the form A-B"));
        };
        let parse = |v: &str| {
            v.trim()
                .parse::<usize>()
                .map_err(|e| SimError(format!("Shortcut '{s}': {e}")))
        };
        Ok(Self(parse(a)?, parse(b)?))
    }
}

impl TryFrom<String> for ShortcutPair {
    type Error = SimError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ShortcutPair> for String {
    fn from(value: ShortcutPair) -> Self {
        value.to_string()
    }
}

/// Merge all configuration sources into `S`.
///
/// `cli` must only serialize the options given on the command line.
pub fn load_settings<S, C>(
    defaults: S,
    default_conf_file: &str,
    extra_conf_file: Option<&Path>,
    cli: &C,
) -> SimResult<S>
where
    S: Serialize + DeserializeOwned,
    C: Serialize,
{
    let mut figment = Figment::new()
        .merge(Serialized::defaults(defaults))
        .merge(Toml::file(default_conf_file));
    if let Some(path) = extra_conf_file {
        if !path.exists() {
            return sim_error!(format!(
                "Configuration file '{}' not found",
                path.display()
            ));
        }
        figment = figment.merge(Toml::file(path));
    }
    figment
        .merge(Env::prefixed(ENV_PREFIX))
        .merge(Serialized::defaults(cli))
        .extract()
        .map_err(|e| SimError(format!("Invalid configuration: {e}")))
}

/// Command-line arguments of `sim-noc`.
#[derive(Parser, Debug, Default, Serialize)]
#[command(about = "Compare mesh and small-world NoC topologies")]
pub struct SimCli {
    /// Level of log message to display [default: info]
    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_level: Option<LevelFilter>,

    /// Seed for random number generator [default: 1]
    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,

    /// Comma-separated mesh sizes to evaluate, each as ROWSxCOLS [default:
    /// 4x4,6x6,8x8]
    #[arg(long, value_delimiter = ',')]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grid_sizes: Option<Vec<GridSize>>,

    /// Packets to simulate per node of the mesh [default: 250]
    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub packets_per_node: Option<usize>,

    /// Add one small-world shortcut per this many nodes [default: 4]
    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nodes_per_shortcut: Option<usize>,

    /// Cycles per hop of a standard router [default: 5]
    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latency_standard: Option<Cycles>,

    /// Cycles per hop of an optimized router [default: 3]
    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latency_optimized: Option<Cycles>,

    /// Show a progress bar of completed grid sizes
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<bool>,

    /// Path to additional configuration file (TOML)
    #[arg(long)]
    #[serde(skip)]
    pub conf_file: Option<PathBuf>,
}

/// Resolved settings of `sim-noc`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimSettings {
    pub log_level: LevelFilter,
    pub seed: u64,
    pub grid_sizes: Vec<GridSize>,
    pub packets_per_node: usize,
    pub nodes_per_shortcut: usize,
    pub latency_standard: Cycles,
    pub latency_optimized: Cycles,
    pub progress: bool,
}

impl Default for SimSettings {
    fn default() -> Self {
        Self {
            log_level: LevelFilter::Info,
            seed: 1,
            grid_sizes: GRID_SIZES
                .iter()
                .map(|&(rows, cols)| GridSize { rows, cols })
                .collect(),
            packets_per_node: PACKETS_PER_NODE,
            nodes_per_shortcut: NODES_PER_SHORTCUT,
            latency_standard: LATENCY_PER_HOP_STANDARD,
            latency_optimized: LATENCY_PER_HOP_OPTIMIZED,
            progress: false,
        }
    }
}

impl SimSettings {
    /// Parse the command line and merge it with all other sources.
    pub fn parse_all_sources() -> SimResult<Self> {
        Self::from_cli(&SimCli::parse())
    }

    pub fn from_cli(cli: &SimCli) -> SimResult<Self> {
        let settings: Self = load_settings(
            Self::default(),
            SIM_CONF_FILE,
            cli.conf_file.as_deref(),
            cli,
        )?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> SimResult {
        if self.grid_sizes.is_empty() {
            return sim_error!("No grid sizes to evaluate");
        }
        if let Some(grid) = self.grid_sizes.iter().find(|g| g.num_nodes() < 2) {
            return sim_error!(format!("Grid {grid} has fewer than 2 nodes"));
        }
        if self.packets_per_node == 0 {
            return sim_error!("packets_per_node must be at least 1");
        }
        if self.nodes_per_shortcut == 0 {
            return sim_error!("nodes_per_shortcut must be at least 1");
        }
        Ok(())
    }
}

/// Command-line arguments of `noc-routing-table`.
#[derive(Parser, Debug, Default, Serialize)]
#[command(about = "Print the static XY routing table of a mesh with shortcut ports")]
pub struct TableCli {
    /// Level of log message to display [default: warn]
    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_level: Option<LevelFilter>,

    /// Number of routers in the X dimension [default: 8]
    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<usize>,

    /// Number of routers in the Y dimension [default: 4]
    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<usize>,

    /// Comma-separated shortcut router pairs, each as A-B. Ports are
    /// allocated from 5 in the order given [default: 0-31,7-24,12-20,4-28]
    #[arg(long, value_delimiter = ',')]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shortcuts: Option<Vec<ShortcutPair>>,

    /// Path to additional configuration file (TOML)
    #[arg(long)]
    #[serde(skip)]
    pub conf_file: Option<PathBuf>,
}

/// Resolved settings of `noc-routing-table`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TableSettings {
    pub log_level: LevelFilter,
    pub width: usize,
    pub height: usize,
    pub shortcuts: Vec<ShortcutPair>,
}

impl Default for TableSettings {
    fn default() -> Self {
        Self {
            log_level: LevelFilter::Warn,
            width: TABLE_WIDTH,
            height: TABLE_HEIGHT,
            shortcuts: TABLE_SHORTCUTS
                .iter()
                .map(|&(a, b)| ShortcutPair(a, b))
                .collect(),
        }
    }
}

impl TableSettings {
    /// Parse the command line and merge it with all other sources.
    pub fn parse_all_sources() -> SimResult<Self> {
        Self::from_cli(&TableCli::parse())
    }

    pub fn from_cli(cli: &TableCli) -> SimResult<Self> {
        load_settings(
            Self::default(),
            TABLE_CONF_FILE,
            cli.conf_file.as_deref(),
            cli,
        )
    }

    #[must_use]
    pub fn shortcut_map(&self) -> ShortcutMap {
        let pairs: Vec<(usize, usize)> = self.shortcuts.iter().map(|p| (p.0, p.1)).collect();
        ShortcutMap::new(&pairs)
    }
}
