pub mod aggregator;
pub mod batch;
pub mod header;
pub mod normalizer;
pub mod pipeline;
pub mod writer;

pub use crate::domain::model::{FileJob, PivotTable, PricebookExport};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
