use clap::Parser;
use pricebook_pivot::core::ConfigProvider;
use pricebook_pivot::utils::{logger, validation::Validate};
use pricebook_pivot::{BatchEngine, CliConfig, LocalStorage, PivotPipeline};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    // 初始化日誌
    if config.json_logs {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting pricebook-pivot");
    tracing::debug!("CLI config: {:?}", config);

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(e.exit_code());
    }

    let storage = LocalStorage::default();
    let strict = config.strict();
    let report_path = config.report_path().map(str::to_string);
    let engine = BatchEngine::new(
        PivotPipeline::new(storage.clone(), config.clone()),
        config.source_dir(),
        config.output_dir(),
    );

    let summary = match engine.run().await {
        Ok(summary) => summary,
        Err(e) => {
            tracing::error!(
                "❌ Batch aborted: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(e.exit_code());
        }
    };

    for failure in summary.failures() {
        eprintln!("❌ {} was skipped", failure.file);
    }

    if let Some(path) = &report_path {
        summary.save(&storage, path).await?;
    }

    println!(
        "✅ {} of {} file(s) converted into {}",
        summary.converted, summary.total_files, summary.output_dir
    );

    let exit_code = summary.exit_code(strict);
    if exit_code > 0 {
        std::process::exit(exit_code);
    }

    Ok(())
}
