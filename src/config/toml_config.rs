use crate::config::{
    default_accounts, validate_provider, DEFAULT_FILE_NAME, DEFAULT_MAX_PER_TYPE,
    DEFAULT_MIN_PER_TYPE, DEFAULT_OUTPUT_PATH,
};
use crate::core::ConfigProvider;
use crate::utils::error::{ReportError, Result};
use crate::utils::validation::Validate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub generator: GeneratorConfig,
    #[serde(default)]
    pub accounts: Option<Vec<AccountConfig>>,
    #[serde(default)]
    pub output: OutputConfig,
    pub monitoring: Option<MonitoringConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeneratorConfig {
    pub seed: Option<u64>,
    pub min_per_type: Option<usize>,
    pub max_per_type: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountConfig {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    pub path: Option<String>,
    pub file_name: Option<String>,
    pub csv: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: bool,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ReportError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ReportError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${REPORT_DIR})；未定義的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ReportError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validate_provider(self)
    }

    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.as_ref().map(|m| m.enabled).unwrap_or(false)
    }

    pub fn set_monitoring(&mut self, enabled: bool) {
        self.monitoring = Some(MonitoringConfig { enabled });
    }
}

impl ConfigProvider for TomlConfig {
    fn output_path(&self) -> &str {
        self.output.path.as_deref().unwrap_or(DEFAULT_OUTPUT_PATH)
    }

    fn file_name(&self) -> &str {
        self.output.file_name.as_deref().unwrap_or(DEFAULT_FILE_NAME)
    }

    fn seed(&self) -> Option<u64> {
        self.generator.seed
    }

    fn min_per_type(&self) -> usize {
        self.generator.min_per_type.unwrap_or(DEFAULT_MIN_PER_TYPE)
    }

    fn max_per_type(&self) -> usize {
        self.generator.max_per_type.unwrap_or(DEFAULT_MAX_PER_TYPE)
    }

    fn accounts(&self) -> Vec<(String, String)> {
        match &self.accounts {
            Some(accounts) => accounts
                .iter()
                .map(|a| (a.id.clone(), a.name.clone()))
                .collect(),
            None => default_accounts(),
        }
    }

    fn csv_export(&self) -> bool {
        self.output.csv.unwrap_or(false)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
