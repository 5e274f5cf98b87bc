use crate::domain::model::{FileJob, PivotTable, PricebookExport};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    /// File names (not paths) directly inside `dir`.
    fn list_files(&self, dir: &str) -> impl std::future::Future<Output = Result<Vec<String>>> + Send;
    fn create_dir(&self, dir: &str) -> impl std::future::Future<Output = Result<()>> + Send;
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn source_dir(&self) -> &str;
    fn output_dir(&self) -> &str;
    fn report_path(&self) -> Option<&str>;
    fn strict(&self) -> bool;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    /// Lists the exports to convert and prepares the output directory.
    async fn discover(&self) -> Result<Vec<FileJob>>;
    async fn extract(&self, job: &FileJob) -> Result<PricebookExport>;
    async fn transform(&self, job: &FileJob, export: PricebookExport) -> Result<PivotTable>;
    async fn load(&self, job: &FileJob, table: &PivotTable) -> Result<String>;
}
