use clap::Parser;
use tennis_pointlog::config::toml_config::TomlConfig;
use tennis_pointlog::utils::{logger, validation::Validate};
use tennis_pointlog::{EtlEngine, LocalStorage, PointLogPipeline};

#[derive(Parser)]
#[command(name = "pointlog-toml")]
#[command(about = "Point-log normalizer driven by a TOML configuration")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "pointlog.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override compression setting from config
    #[arg(long)]
    zip: Option<bool>,

    /// Dry run - show what would be processed without executing
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
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

    // 初始化日誌
    if config.json_logs() {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(args.verbose || config.verbose());
    }
    tracing::info!("🚀 Starting TOML-based point-log tool");
    tracing::info!("📁 Loaded configuration from: {}", args.config);

    // 應用命令列覆蓋設定
    if let Some(zip) = args.zip {
        let compression = config
            .load
            .compression
            .get_or_insert(tennis_pointlog::config::toml_config::CompressionConfig { enabled: zip });
        compression.enabled = zip;
        tracing::info!("🔧 Compression overridden to: {}", zip);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    display_config_summary(&config);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - No actual processing will occur");
        perform_dry_run(&config);
        return Ok(());
    }

    let mut exit_code = 0;
    for job in config.jobs() {
        let input = job.input_path.clone();
        let pipeline = PointLogPipeline::new(LocalStorage::new(String::new()), job);
        let engine = EtlEngine::new(pipeline);

        match engine.run().await {
            Ok(report) => {
                println!(
                    "✅ {}: {} rows -> {} records ({} unclassified)",
                    input,
                    report.audit.input_rows,
                    report.audit.output_records,
                    report.audit.unknown_total()
                );
                for path in &report.output_paths {
                    println!("📁 Output saved to: {}", path);
                }
            }
            Err(e) => {
                tracing::error!(
                    "❌ {} failed: {} (Category: {:?}, Severity: {:?})",
                    input,
                    e,
                    e.category(),
                    e.severity()
                );
                eprintln!("❌ {}: {}", input, e.user_friendly_message());
                eprintln!("💡 建議: {}", e.recovery_suggestion());
                exit_code = exit_code.max(e.exit_code());
            }
        }
    }

    if exit_code > 0 {
        std::process::exit(exit_code);
    }
    Ok(())
}

fn display_config_summary(config: &TomlConfig) {
    println!("📋 Configuration Summary:");
    println!(
        "  Pipeline: {} v{}",
        config.pipeline.name,
        config.pipeline.version.as_deref().unwrap_or("-")
    );
    println!("  Inputs: {}", config.inputs().join(", "));
    println!("  Output: {}", config.output_path());
    println!("  Formats: {}", config.load.output_formats.join(", "));
    println!("  Compression: {}", config.compression_enabled());
    println!();
}

fn perform_dry_run(config: &TomlConfig) {
    println!("🔍 Dry Run Analysis:");
    for job in config.jobs() {
        let exists = std::path::Path::new(&job.input_path).exists();
        println!(
            "  {} {} (score: {}, info: {}, delimiter: {:?})",
            if exists { "✅" } else { "⚠️" },
            job.input_path,
            job.score_column,
            job.info_column,
            job.delimiter
        );
    }
    println!();
    println!("✅ Dry run analysis complete. Use --verbose for more details during actual run.");
}
