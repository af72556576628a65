//! Configuration structures for the rail traffic simulator
//!
//! This module contains the simulation configuration structure and validation logic
//! used to control the headless driver and the initial train roster.

use super::{OperatorPolicy, OutputFormat};
use crate::dispatch::Disruption;
use crate::network::{default_roster, Train};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Fixed arbitration policy constants
pub mod policy {
    use crate::types::TrackId;
    use std::ops::Range;

    /// Length of the normalized track axis
    pub const TRACK_LENGTH: f64 = 100.0;

    /// Lowest train priority
    pub const MIN_PRIORITY: u8 = 1;

    /// Highest train priority
    pub const MAX_PRIORITY: u8 = 10;

    /// The only track whose junction is checked for contention
    pub const MONITORED_TRACK: TrackId = TrackId(1);

    /// Exclusive lower bound of the junction approach zone
    pub const JUNCTION_ZONE_START: f64 = 70.0;

    /// Exclusive upper bound of the junction approach zone
    pub const JUNCTION_ZONE_END: f64 = 85.0;

    /// Speed multiplier applied to trains granted right-of-way
    pub const PROCEED_SPEED_FACTOR: f64 = 1.2;

    /// Confidence reported for conflict resolutions
    pub const CONFLICT_CONFIDENCE: f64 = 0.87;

    /// Confidence reported for flow advisories
    pub const ADVISORY_CONFIDENCE: f64 = 0.92;

    /// Delay saved by a conflict resolution, in minutes (half-open)
    pub const CONFLICT_DELAY_SAVED_MINUTES: Range<u32> = 5..15;

    /// Delay saved by a flow advisory, in minutes (half-open)
    pub const ADVISORY_DELAY_SAVED_MINUTES: Range<u32> = 2..10;

    /// Chance that an advisory grants proceed rather than halt
    pub const ADVISORY_PROCEED_PROBABILITY: f64 = 0.5;

    /// Lowest efficiency score ever reported
    pub const EFFICIENCY_FLOOR: u32 = 85;

    /// Efficiency score of a network with no delay
    pub const EFFICIENCY_CEILING: u32 = 100;

    /// Default wall-clock tick period
    pub const DEFAULT_TICK_INTERVAL_MS: u64 = 1000;
}

/// Command line arguments structure
#[derive(Debug, Clone, Parser)]
#[command(
    name = "railoptic",
    version = "0.1.0",
    about = "RailOptic - Rail traffic simulation and junction conflict arbitration",
    long_about = "Advances trains along shared tracks, detects trains converging on the monitored junction and produces prioritized proceed/halt recommendations that an operator policy accepts or rejects.

EXAMPLES:
    # Run the default roster for 60 ticks
    railoptic

    # Use a configuration file
    railoptic --config scenario.json

    # Reproducible run with a recommendation every 5 ticks
    railoptic --seed 42 --recommend-every 5 --operator-policy accept

    # Inject disruptions before the run
    railoptic --disrupt F205:5 --disrupt P302:3

    # Pace ticks on the wall clock
    railoptic --realtime --tick-interval-ms 250 --ticks 20

    # Generate configuration template
    railoptic --print-config > scenario.json

    # Validate configuration without running
    railoptic --config scenario.json --dry-run

CONFIGURATION:
    Configuration can be provided via:
    1. Command line arguments (highest priority)
    2. Configuration file (--config flag)
    3. Default values (lowest priority)

    Supported configuration file formats: JSON (.json)

    Use --print-config to generate a template configuration file."
)]
pub struct CliArgs {
    /// Configuration file path (JSON format)
    #[arg(
        short,
        long,
        help = "Configuration file path (JSON format)",
        long_help = "Path to a JSON configuration file. CLI arguments will override file settings."
    )]
    pub config: Option<String>,

    /// Number of ticks to simulate
    #[arg(
        long,
        help = "Number of ticks to simulate",
        long_help = "Length of the headless run in ticks. Must be greater than 0. Default: 60"
    )]
    pub ticks: Option<u64>,

    /// Wall-clock tick period in milliseconds
    #[arg(
        long,
        help = "Tick period in milliseconds",
        long_help = "Wall-clock period between ticks when --realtime is set, also used for the MM:SS clock. Must be greater than 0. Default: 1000"
    )]
    pub tick_interval_ms: Option<u64>,

    /// Random seed for reproducible results
    #[arg(long, help = "Random seed for reproducible results")]
    pub seed: Option<u64>,

    /// Ticks between automatic recommendation requests
    #[arg(
        long,
        help = "Ticks between recommendation requests (0 = never)",
        long_help = "Request a recommendation every N ticks and resolve it with the operator policy. 0 disables requests. Default: 0"
    )]
    pub recommend_every: Option<u64>,

    /// How pending recommendations are resolved
    #[arg(long, help = "Operator policy (accept, reject or hold)")]
    pub operator_policy: Option<OperatorPolicy>,

    /// Output format for the final report
    #[arg(long, help = "Output format (text or json)")]
    pub output_format: Option<OutputFormat>,

    /// Disruptions applied before the first tick
    #[arg(
        long = "disrupt",
        value_name = "TRAIN_ID:MINUTES",
        help = "Inject a delay before the run (repeatable)",
        long_help = "Inject a delay of MINUTES into TRAIN_ID before the first tick, e.g. F205:5. May be given several times; replaces disruptions from the config file."
    )]
    pub disrupt: Vec<Disruption>,

    /// Pace ticks on the wall clock
    #[arg(long, help = "Pace ticks on the wall clock instead of running flat out")]
    pub realtime: bool,

    /// Enable verbose logging
    #[arg(short, long, help = "Enable verbose logging")]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(short, long, help = "Enable debug logging")]
    pub debug: bool,

    /// Emit logs as JSON
    #[arg(long, help = "Emit structured JSON logs")]
    pub json_logs: bool,

    /// Directory for daily rolling log files
    #[arg(long, help = "Also write logs to daily rolling files in this directory")]
    pub log_dir: Option<String>,

    /// Dry run mode - validate configuration without running simulation
    #[arg(long, help = "Validate configuration without running simulation")]
    pub dry_run: bool,

    /// Print default configuration and exit
    #[arg(long, help = "Print default configuration in JSON format and exit")]
    pub print_config: bool,
}

/// Configuration file structure (allows partial configuration)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ConfigFile {
    /// Number of ticks to simulate
    pub ticks: Option<u64>,

    /// Wall-clock tick period in milliseconds
    pub tick_interval_ms: Option<u64>,

    /// Random seed for reproducible results
    pub seed: Option<u64>,

    /// Ticks between automatic recommendation requests
    pub recommend_every: Option<u64>,

    /// How pending recommendations are resolved
    pub operator_policy: Option<OperatorPolicy>,

    /// Output format for the final report
    pub output_format: Option<OutputFormat>,

    /// Pace ticks on the wall clock
    pub realtime: Option<bool>,

    /// Disruptions applied before the first tick
    pub disruptions: Option<Vec<Disruption>>,

    /// Roster override
    pub trains: Option<Vec<Train>>,
}

/// Configuration for the rail traffic simulation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Number of ticks the headless driver runs
    pub ticks: u64,

    /// Wall-clock tick period in milliseconds
    pub tick_interval_ms: u64,

    /// Random seed for reproducible results
    pub seed: Option<u64>,

    /// Ticks between automatic recommendation requests (0 = never)
    pub recommend_every: u64,

    /// How pending recommendations are resolved
    pub operator_policy: OperatorPolicy,

    /// Output format for the final report
    pub output_format: OutputFormat,

    /// Pace ticks on the wall clock
    pub realtime: bool,

    /// Disruptions applied before the first tick
    pub disruptions: Vec<Disruption>,

    /// Initial roster
    pub trains: Vec<Train>,
}

/// Configuration loading and validation errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Configuration file not found
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    /// Configuration file read error
    #[error("Failed to read configuration file: {0}")]
    ReadError(#[from] std::io::Error),

    /// JSON parsing error
    #[error("Failed to parse JSON configuration: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Unsupported configuration file format
    #[error("Unsupported configuration file format: {0} (supported: .json)")]
    UnsupportedFormat(String),
}

/// Validation errors for simulation configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    /// Tick count is invalid
    #[error("Tick count must be greater than 0, got {0}")]
    InvalidTickCount(u64),

    /// Tick interval is invalid
    #[error("Tick interval must be greater than 0 ms, got {0}")]
    InvalidTickInterval(u64),

    /// A roster entry is out of range
    #[error("Invalid train {id}: {reason}")]
    InvalidTrain {
        /// Id of the offending train
        id: String,
        /// What is wrong with it
        reason: String,
    },

    /// Two roster entries share an id
    #[error("Duplicate train id in roster: {0}")]
    DuplicateTrainId(String),

    /// A configured disruption is malformed
    #[error("Invalid disruption {0}: {1}")]
    InvalidDisruption(String, String),
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            ticks: 60,
            tick_interval_ms: policy::DEFAULT_TICK_INTERVAL_MS,
            seed: None,
            recommend_every: 0,
            operator_policy: OperatorPolicy::default(),
            output_format: OutputFormat::default(),
            realtime: false,
            disruptions: Vec::new(),
            trains: default_roster(),
        }
    }
}

impl SimulationConfig {
    /// Create a new configuration from command line arguments and optional config file
    pub fn from_args() -> Result<Self, ConfigError> {
        let args = CliArgs::parse();
        Self::from_cli_args(args)
    }

    /// Create configuration from parsed CLI arguments
    pub fn from_cli_args(args: CliArgs) -> Result<Self, ConfigError> {
        // Start with default configuration
        let mut config = Self::default();

        // Load from config file if specified
        if let Some(config_path) = &args.config {
            config = Self::from_file(config_path)?;
        }

        // Override with command line arguments (CLI takes precedence)
        Self::apply_cli_overrides(&mut config, args);

        Ok(config)
    }

    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()));
        }

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => {
                let content = fs::read_to_string(path)?;
                let config_file: ConfigFile = serde_json::from_str(&content)?;
                Ok(Self::from_config_file(config_file))
            }
            Some(ext) => Err(ConfigError::UnsupportedFormat(ext.to_string())),
            None => Err(ConfigError::UnsupportedFormat("no extension".to_string())),
        }
    }

    /// Create configuration from a config file, merging with defaults
    fn from_config_file(config_file: ConfigFile) -> Self {
        let defaults = Self::default();

        Self {
            ticks: config_file.ticks.unwrap_or(defaults.ticks),
            tick_interval_ms: config_file.tick_interval_ms.unwrap_or(defaults.tick_interval_ms),
            seed: config_file.seed.or(defaults.seed),
            recommend_every: config_file.recommend_every.unwrap_or(defaults.recommend_every),
            operator_policy: config_file.operator_policy.unwrap_or(defaults.operator_policy),
            output_format: config_file.output_format.unwrap_or(defaults.output_format),
            realtime: config_file.realtime.unwrap_or(defaults.realtime),
            disruptions: config_file.disruptions.unwrap_or(defaults.disruptions),
            trains: config_file.trains.unwrap_or(defaults.trains),
        }
    }

    /// Apply CLI argument overrides to configuration
    fn apply_cli_overrides(config: &mut Self, args: CliArgs) {
        if let Some(value) = args.ticks {
            config.ticks = value;
        }
        if let Some(value) = args.tick_interval_ms {
            config.tick_interval_ms = value;
        }
        if let Some(value) = args.seed {
            config.seed = Some(value);
        }
        if let Some(value) = args.recommend_every {
            config.recommend_every = value;
        }
        if let Some(value) = args.operator_policy {
            config.operator_policy = value;
        }
        if let Some(value) = args.output_format {
            config.output_format = value;
        }
        if args.realtime {
            config.realtime = true;
        }
        if !args.disrupt.is_empty() {
            config.disruptions = args.disrupt;
        }
    }

    /// Save configuration to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Print configuration as JSON
    pub fn print_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Validate the configuration parameters
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.ticks == 0 {
            return Err(ConfigValidationError::InvalidTickCount(self.ticks));
        }

        if self.tick_interval_ms == 0 {
            return Err(ConfigValidationError::InvalidTickInterval(self.tick_interval_ms));
        }

        let mut seen = HashSet::new();
        for train in &self.trains {
            train.validate().map_err(|reason| ConfigValidationError::InvalidTrain {
                id: train.id.to_string(),
                reason,
            })?;
            if !seen.insert(train.id.as_str()) {
                return Err(ConfigValidationError::DuplicateTrainId(train.id.to_string()));
            }
        }

        // Disruptions naming unknown trains are legal and simply have no effect
        for disruption in &self.disruptions {
            disruption.validate().map_err(|e| {
                ConfigValidationError::InvalidDisruption(disruption.to_string(), e.to_string())
            })?;
        }

        Ok(())
    }

    /// Wall-clock tick period
    pub fn tick_interval(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.tick_interval_ms)
    }

    /// Whether the driver should request a recommendation after this tick
    pub fn recommendation_due(&self, tick: u64) -> bool {
        self.recommend_every > 0 && tick > 0 && tick % self.recommend_every == 0
    }
}
