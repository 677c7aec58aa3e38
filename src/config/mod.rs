pub mod cli;
pub mod toml_config;

use crate::core::ConfigProvider;
use crate::domain::catalog::DEFAULT_ACCOUNTS;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use clap::Parser;
use serde::{Deserialize, Serialize};
use toml_config::TomlConfig;

pub const DEFAULT_OUTPUT_PATH: &str = "./output";
pub const DEFAULT_FILE_NAME: &str = "sample_scan_data.json";
pub const DEFAULT_MIN_PER_TYPE: usize = 5;
pub const DEFAULT_MAX_PER_TYPE: usize = 15;

pub fn default_accounts() -> Vec<(String, String)> {
    DEFAULT_ACCOUNTS
        .iter()
        .map(|(id, name)| (id.to_string(), name.to_string()))
        .collect()
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Parser)]
#[command(name = "sample-scan-gen")]
#[command(about = "Generate a fabricated unused-cloud-resource report for demos and tests")]
pub struct CliConfig {
    /// Directory the report is written to [default: ./output]
    #[arg(long)]
    pub output_path: Option<String>,

    /// Report file name [default: sample_scan_data.json]
    #[arg(long)]
    pub file_name: Option<String>,

    /// Seed for a reproducible report
    #[arg(long)]
    pub seed: Option<u64>,

    /// Fewest resources generated per type [default: 5]
    #[arg(long)]
    pub min_per_type: Option<usize>,

    /// Most resources generated per type [default: 15]
    #[arg(long)]
    pub max_per_type: Option<usize>,

    /// Also write a flat CSV of the resources next to the report
    #[arg(long)]
    pub csv: bool,

    /// TOML configuration file; flags given here override it
    #[arg(short, long)]
    pub config: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    /// Emit JSON log lines
    #[arg(long)]
    pub log_json: bool,

    /// Log process CPU and memory after each stage
    #[arg(long)]
    pub monitor: bool,
}

impl CliConfig {
    /// Flags given on the command line win over the file.
    pub fn apply_overrides(&self, config: &mut TomlConfig) {
        if let Some(path) = &self.output_path {
            config.output.path = Some(path.clone());
        }
        if let Some(file_name) = &self.file_name {
            config.output.file_name = Some(file_name.clone());
        }
        if self.csv {
            config.output.csv = Some(true);
        }
        if let Some(seed) = self.seed {
            config.generator.seed = Some(seed);
        }
        if let Some(min) = self.min_per_type {
            config.generator.min_per_type = Some(min);
        }
        if let Some(max) = self.max_per_type {
            config.generator.max_per_type = Some(max);
        }
        if self.monitor {
            config.set_monitoring(true);
        }
    }
}

impl ConfigProvider for CliConfig {
    fn output_path(&self) -> &str {
        self.output_path.as_deref().unwrap_or(DEFAULT_OUTPUT_PATH)
    }

    fn file_name(&self) -> &str {
        self.file_name.as_deref().unwrap_or(DEFAULT_FILE_NAME)
    }

    fn seed(&self) -> Option<u64> {
        self.seed
    }

    fn min_per_type(&self) -> usize {
        self.min_per_type.unwrap_or(DEFAULT_MIN_PER_TYPE)
    }

    fn max_per_type(&self) -> usize {
        self.max_per_type.unwrap_or(DEFAULT_MAX_PER_TYPE)
    }

    fn accounts(&self) -> Vec<(String, String)> {
        default_accounts()
    }

    fn csv_export(&self) -> bool {
        self.csv
    }
}

/// Checks shared by every `ConfigProvider`.
pub fn validate_provider<C: ConfigProvider>(config: &C) -> Result<()> {
    validation::validate_path("output_path", config.output_path())?;
    validation::validate_file_name("file_name", config.file_name(), "json")?;
    validation::validate_per_type_bounds(config.min_per_type(), config.max_per_type())?;
    validation::validate_accounts("accounts", &config.accounts())?;
    Ok(())
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_provider(self)
    }
}
