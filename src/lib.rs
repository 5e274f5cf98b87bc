pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::{cli::LocalStorage, toml_config::TomlConfig};
pub use core::{
    batch::{BatchEngine, BatchSummary, FileOutcome, FileStatus},
    pipeline::PivotPipeline,
};
pub use utils::error::{PivotError, Result};
