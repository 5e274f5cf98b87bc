use crate::core::{FileJob, Pipeline, Storage};
use crate::utils::error::{ErrorCategory, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::time::Instant;

/// 單一檔案的處理結果
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FileStatus {
    Converted {
        output_path: String,
        rows: usize,
        currencies: usize,
    },
    Failed {
        category: ErrorCategory,
        reason: String,
    },
}

#[derive(Debug, Clone, Serialize)]
pub struct FileOutcome {
    pub file: String,
    pub input_path: String,
    pub duration_ms: u64,
    #[serde(flatten)]
    pub status: FileStatus,
}

impl FileOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self.status, FileStatus::Converted { .. })
    }
}

/// 整個批次的摘要，可輸出成 JSON 報告
#[derive(Debug, Clone, Serialize)]
pub struct BatchSummary {
    pub source_dir: String,
    pub output_dir: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub total_files: usize,
    pub converted: usize,
    pub failed: usize,
    pub files: Vec<FileOutcome>,
}

impl BatchSummary {
    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }

    pub fn failures(&self) -> impl Iterator<Item = &FileOutcome> {
        self.files.iter().filter(|outcome| !outcome.is_success())
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub async fn save<S: Storage>(&self, storage: &S, path: &str) -> Result<()> {
        storage.write_file(path, self.to_json()?.as_bytes()).await?;
        tracing::info!("📊 Batch summary exported to: {}", path);
        Ok(())
    }

    /// 預設維持 0；strict 模式下有失敗檔案時回傳 2
    pub fn exit_code(&self, strict: bool) -> i32 {
        if strict && self.has_failures() {
            2
        } else {
            0
        }
    }
}

pub struct BatchEngine<P: Pipeline> {
    pipeline: P,
    source_dir: String,
    output_dir: String,
}

impl<P: Pipeline> BatchEngine<P> {
    pub fn new(pipeline: P, source_dir: impl Into<String>, output_dir: impl Into<String>) -> Self {
        Self {
            pipeline,
            source_dir: source_dir.into(),
            output_dir: output_dir.into(),
        }
    }

    /// Converts every discovered export.
    ///
    /// Only discovery failures are returned as errors; a failing file is
    /// logged, recorded in the summary and the batch moves on.
    pub async fn run(&self) -> Result<BatchSummary> {
        let started_at = Utc::now();
        tracing::info!("🚀 Starting pricebook conversion from {}", self.source_dir);

        let jobs = self.pipeline.discover().await.map_err(|e| {
            tracing::error!("❌ Error reading directory: {}", e);
            e
        })?;

        let mut files = Vec::with_capacity(jobs.len());
        for job in &jobs {
            files.push(self.run_file(job).await);
        }

        let converted = files.iter().filter(|f| f.is_success()).count();
        let summary = BatchSummary {
            source_dir: self.source_dir.clone(),
            output_dir: self.output_dir.clone(),
            started_at,
            finished_at: Utc::now(),
            total_files: files.len(),
            converted,
            failed: files.len() - converted,
            files,
        };

        tracing::info!(
            "✅ Batch finished: {} converted, {} failed, {} total",
            summary.converted,
            summary.failed,
            summary.total_files
        );

        Ok(summary)
    }

    async fn run_file(&self, job: &FileJob) -> FileOutcome {
        let start = Instant::now();
        let status = match self.convert(job).await {
            Ok(status) => status,
            Err(e) => {
                tracing::error!("❌ {}: {}", job.name, e);
                tracing::debug!("💡 {}", e.recovery_suggestion());
                FileStatus::Failed {
                    category: e.category(),
                    reason: e.to_string(),
                }
            }
        };

        FileOutcome {
            file: job.name.clone(),
            input_path: job.input_path.clone(),
            duration_ms: start.elapsed().as_millis() as u64,
            status,
        }
    }

    async fn convert(&self, job: &FileJob) -> Result<FileStatus> {
        let export = self.pipeline.extract(job).await?;
        tracing::debug!("📥 {}: {} records", job.name, export.records.len());

        let table = self.pipeline.transform(job, export).await?;
        let output_path = self.pipeline.load(job, &table).await?;

        Ok(FileStatus::Converted {
            output_path,
            rows: table.rows.len(),
            currencies: table.currencies.len(),
        })
    }
}
