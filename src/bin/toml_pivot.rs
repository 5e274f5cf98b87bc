use clap::Parser;
use pricebook_pivot::config::cli::dir_exists;
use pricebook_pivot::config::toml_config::TomlConfig;
use pricebook_pivot::core::{ConfigProvider, FileJob};
use pricebook_pivot::utils::{logger, validation::Validate};
use pricebook_pivot::{BatchEngine, LocalStorage, PivotPipeline};

#[derive(Parser)]
#[command(name = "toml-pivot")]
#[command(about = "Pricebook pivot driven by a TOML configuration file")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "pivot-config.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override strict mode from config
    #[arg(long)]
    strict: Option<bool>,

    /// Dry run - list the files that would be converted without writing anything
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // 載入 TOML 配置
    let mut config = match TomlConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    let verbose = args.verbose || config.verbose();
    if config.json_logs() {
        logger::init_json_logger(verbose);
    } else {
        logger::init_cli_logger(verbose);
    }

    tracing::info!("🚀 Starting TOML-based pricebook pivot");
    tracing::info!("📁 Loaded configuration from: {}", args.config);

    // 應用命令列覆蓋設定
    if let Some(strict) = args.strict {
        let handling = config.error_handling.get_or_insert(
            pricebook_pivot::config::toml_config::ErrorHandlingConfig { strict: None },
        );
        handling.strict = Some(strict);
        tracing::info!("🔧 Strict mode overridden to: {}", strict);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(e.exit_code());
    }

    display_config_summary(&config, &args);

    let storage = LocalStorage::default();
    let pipeline = PivotPipeline::new(storage.clone(), config.clone());

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - No files will be written");
        match pipeline.plan().await {
            Ok(jobs) => print_plan(&jobs, config.output_dir()),
            Err(e) => {
                eprintln!("❌ {}", e.user_friendly_message());
                std::process::exit(e.exit_code());
            }
        }
        return Ok(());
    }

    let engine = BatchEngine::new(pipeline, config.source_dir(), config.output_dir());
    let summary = match engine.run().await {
        Ok(summary) => summary,
        Err(e) => {
            tracing::error!(
                "❌ Batch aborted: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(e.exit_code());
        }
    };

    if let Some(path) = config.report_path() {
        summary.save(&storage, path).await?;
    }

    println!(
        "✅ {}: {} converted, {} failed",
        config.batch.name, summary.converted, summary.failed
    );

    let exit_code = summary.exit_code(config.strict());
    if exit_code > 0 {
        std::process::exit(exit_code);
    }

    Ok(())
}

fn display_config_summary(config: &TomlConfig, args: &Args) {
    println!("📋 Configuration Summary:");
    println!("  Batch: {}", config.batch.name);
    if let Some(description) = &config.batch.description {
        println!("  Description: {}", description);
    }
    println!("  Source: {}", config.source_dir());
    println!("  Output: {}", config.output_dir());
    println!("  Strict: {}", config.strict());

    if let Some(report) = config.report_path() {
        println!("  Report: {}", report);
    }

    if args.dry_run {
        println!("  🔍 DRY RUN MODE ENABLED");
    }

    println!();
}

fn print_plan(jobs: &[FileJob], output_dir: &str) {
    println!("🔍 Dry Run Analysis:");
    if !dir_exists(output_dir) {
        println!("  Output directory {} will be created", output_dir);
    }
    if jobs.is_empty() {
        println!("  No JSON exports found");
    }
    for job in jobs {
        let marker = if std::path::Path::new(&job.output_path).exists() {
            "overwrite"
        } else {
            "new"
        };
        println!("  {} -> {} ({})", job.input_path, job.output_path, marker);
    }
    println!();
}
