use crate::core::ConfigProvider;
use crate::utils::error::{PivotError, Result};
use crate::utils::validation::{
    validate_distinct_dirs, validate_non_empty_string, validate_path, validate_required_field,
    Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub batch: BatchInfo,
    pub source: SourceConfig,
    pub output: OutputConfig,
    pub report: Option<ReportConfig>,
    pub error_handling: Option<ErrorHandlingConfig>,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchInfo {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    pub dir: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub dir: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    pub enabled: bool,
    pub path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorHandlingConfig {
    pub strict: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub format: Option<String>,
    pub verbose: Option<bool>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(PivotError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| PivotError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${EXPORT_DIR})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| PivotError::ConfigError {
            message: format!("Invalid placeholder pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.into_owned())
    }

    pub fn validate_config(&self) -> Result<()> {
        validate_non_empty_string("batch.name", &self.batch.name)?;
        validate_path("source.dir", &self.source.dir)?;
        validate_path("output.dir", &self.output.dir)?;
        validate_distinct_dirs("output.dir", &self.source.dir, &self.output.dir)?;

        if let Some(report) = self.report.as_ref().filter(|r| r.enabled) {
            let path = validate_required_field("report.path", &report.path)?;
            validate_path("report.path", path)?;
        }

        if let Some(format) = self.logging.as_ref().and_then(|l| l.format.as_deref()) {
            if !matches!(format, "compact" | "json") {
                return Err(PivotError::InvalidConfigValueError {
                    field: "logging.format".to_string(),
                    value: format.to_string(),
                    reason: "Supported formats: compact, json".to_string(),
                });
            }
        }

        Ok(())
    }

    pub fn json_logs(&self) -> bool {
        self.logging
            .as_ref()
            .and_then(|l| l.format.as_deref())
            .map(|f| f == "json")
            .unwrap_or(false)
    }

    pub fn verbose(&self) -> bool {
        self.logging
            .as_ref()
            .and_then(|l| l.verbose)
            .unwrap_or(false)
    }
}

impl ConfigProvider for TomlConfig {
    fn source_dir(&self) -> &str {
        &self.source.dir
    }

    fn output_dir(&self) -> &str {
        &self.output.dir
    }

    fn report_path(&self) -> Option<&str> {
        self.report
            .as_ref()
            .filter(|r| r.enabled)
            .and_then(|r| r.path.as_deref())
    }

    fn strict(&self) -> bool {
        self.error_handling
            .as_ref()
            .and_then(|e| e.strict)
            .unwrap_or(false)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
