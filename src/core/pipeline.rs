use crate::core::aggregator::{discover_currencies, pivot};
use crate::core::header::{derive_columns, foreign_book_ids};
use crate::core::normalizer::normalize_records;
use crate::core::writer::write_csv;
use crate::core::{ConfigProvider, FileJob, Pipeline, PivotTable, PricebookExport, Storage};
use crate::utils::error::{PivotError, Result};
use std::path::Path;

pub struct PivotPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> PivotPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }

    /// 找出來源目錄中的 JSON 檔，並對應到輸出 CSV 路徑
    pub async fn plan(&self) -> Result<Vec<FileJob>> {
        let source_dir = self.config.source_dir();
        let names = self
            .storage
            .list_files(source_dir)
            .await
            .map_err(|e| match e {
                PivotError::IoError(source) => PivotError::DirectoryError {
                    path: source_dir.to_string(),
                    source,
                },
                other => other,
            })?;

        let mut jobs: Vec<FileJob> = names
            .into_iter()
            .filter(|name| is_json_file(name))
            .map(|name| {
                let stem = Path::new(&name)
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .unwrap_or(name.as_str())
                    .to_string();
                FileJob {
                    input_path: join(source_dir, &name),
                    output_path: join(self.config.output_dir(), &format!("{}.csv", stem)),
                    name,
                }
            })
            .collect();
        jobs.sort_by(|a, b| a.name.cmp(&b.name));

        Ok(jobs)
    }
}

fn is_json_file(name: &str) -> bool {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false)
}

fn join(dir: &str, name: &str) -> String {
    Path::new(dir).join(name).to_string_lossy().into_owned()
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for PivotPipeline<S, C> {
    async fn discover(&self) -> Result<Vec<FileJob>> {
        let jobs = self.plan().await?;
        tracing::info!(
            "📂 Found {} JSON export(s) in {}",
            jobs.len(),
            self.config.source_dir()
        );

        let output_dir = self.config.output_dir();
        self.storage
            .create_dir(output_dir)
            .await
            .map_err(|e| PivotError::WriteError {
                path: output_dir.to_string(),
                message: e.to_string(),
            })?;

        Ok(jobs)
    }

    async fn extract(&self, job: &FileJob) -> Result<PricebookExport> {
        tracing::debug!("Reading {}", job.input_path);
        let parse_error = |message: String| PivotError::ParseError {
            path: job.input_path.clone(),
            message,
        };

        let data = self
            .storage
            .read_file(&job.input_path)
            .await
            .map_err(|e| parse_error(e.to_string()))?;

        serde_json::from_slice(&data).map_err(|e| parse_error(e.to_string()))
    }

    async fn transform(&self, job: &FileJob, export: PricebookExport) -> Result<PivotTable> {
        let entries = normalize_records(&export.records)?;

        // 欄位標題只採用第一筆記錄的 Pricebook2Id；沒有記錄時只輸出標題列
        let book_id = entries
            .first()
            .map(|entry| entry.book_id.clone())
            .unwrap_or_default();

        let foreign = foreign_book_ids(&book_id, &entries);
        if !foreign.is_empty() {
            tracing::warn!(
                "⚠️ {} mixes pricebooks: columns are labelled with {} but records also reference {}; their prices are not exported",
                job.name,
                book_id,
                foreign.join(", ")
            );
        }

        let currencies = discover_currencies(&entries);
        let rows = pivot(&entries, &currencies);
        tracing::debug!(
            "🔄 {}: {} records -> {} rows x {} currencies",
            job.name,
            entries.len(),
            rows.len(),
            currencies.len()
        );

        Ok(PivotTable {
            columns: derive_columns(&book_id, &currencies),
            book_id,
            currencies,
            rows,
        })
    }

    async fn load(&self, job: &FileJob, table: &PivotTable) -> Result<String> {
        let write_error = |message: String| PivotError::WriteError {
            path: job.output_path.clone(),
            message,
        };

        let data = write_csv(table).map_err(|e| write_error(e.to_string()))?;
        self.storage
            .write_file(&job.output_path, &data)
            .await
            .map_err(|e| write_error(e.to_string()))?;

        tracing::info!("💾 CSV file {} successfully written", job.output_path);
        Ok(job.output_path.clone())
    }
}
