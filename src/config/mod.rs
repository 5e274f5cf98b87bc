pub mod cli;
pub mod toml_config;

use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_distinct_dirs, validate_path, Validate};
use serde::{Deserialize, Serialize};

pub const DEFAULT_SOURCE_DIR: &str = "./json-files";
pub const DEFAULT_OUTPUT_DIR: &str = "./SALESFORCE_RO";

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, clap::Parser)]
#[command(name = "pricebook-pivot")]
#[command(about = "Pivot pricebook-entry JSON exports into one CSV per file")]
pub struct CliConfig {
    #[arg(long, default_value = DEFAULT_SOURCE_DIR)]
    pub source_dir: String,

    #[arg(long, default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: String,

    #[arg(long, help = "Write a JSON batch summary to this path")]
    pub report: Option<String>,

    #[arg(long, help = "Exit with code 2 when any file fails")]
    pub strict: bool,

    #[arg(long, help = "Log as JSON lines")]
    pub json_logs: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl Default for CliConfig {
    fn default() -> Self {
        Self {
            source_dir: DEFAULT_SOURCE_DIR.to_string(),
            output_dir: DEFAULT_OUTPUT_DIR.to_string(),
            report: None,
            strict: false,
            json_logs: false,
            verbose: false,
        }
    }
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn source_dir(&self) -> &str {
        &self.source_dir
    }

    fn output_dir(&self) -> &str {
        &self.output_dir
    }

    fn report_path(&self) -> Option<&str> {
        self.report.as_deref()
    }

    fn strict(&self) -> bool {
        self.strict
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_path("source_dir", &self.source_dir)?;
        validate_path("output_dir", &self.output_dir)?;
        validate_distinct_dirs("output_dir", &self.source_dir, &self.output_dir)?;
        if let Some(report) = &self.report {
            validate_path("report", report)?;
        }
        Ok(())
    }
}
