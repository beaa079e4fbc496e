use clap::Parser;
use tennis_pointlog::utils::{logger, validation::Validate};
use tennis_pointlog::{CliConfig, EtlEngine, LocalStorage, PointLogPipeline};
use tokio::task::JoinSet;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    // 初始化日誌
    if config.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting tennis-pointlog CLI");
    tracing::debug!("CLI config: {:?}", config);

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    // 每個比賽記錄互相獨立，可以同時處理
    let mut tasks = JoinSet::new();
    for job in config.jobs() {
        tasks.spawn(async move {
            let input = job.input_path.clone();
            let engine = EtlEngine::new(PointLogPipeline::new(LocalStorage::new(String::new()), job));
            (input, engine.run().await)
        });
    }

    let mut exit_code = 0;
    while let Some(joined) = tasks.join_next().await {
        let (input, outcome) = joined?;
        match outcome {
            Ok(report) => {
                tracing::info!(
                    "✅ {} processed in {:?}: {} rows -> {} records",
                    input,
                    report.elapsed,
                    report.audit.input_rows,
                    report.audit.output_records
                );
                if report.audit.unknown_total() > 0 {
                    println!(
                        "⚠️ {}: {} points could not be classified",
                        input,
                        report.audit.unknown_total()
                    );
                }
                for path in &report.output_paths {
                    println!("📁 Output saved to: {}", path);
                }
            }
            Err(e) => {
                // 記錄詳細錯誤信息
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
