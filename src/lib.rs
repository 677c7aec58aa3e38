pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use crate::config::{cli::LocalStorage, toml_config::TomlConfig, CliConfig};
pub use crate::core::{engine::ReportEngine, pipeline::SamplePipeline};
pub use crate::domain::catalog::ResourceType;
pub use crate::domain::model::ScanData;
pub use crate::utils::error::{ReportError, Result};
