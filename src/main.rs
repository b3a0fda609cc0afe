use clap::Parser;
use trip_extract::utils::{logger, validation::Validate};
use trip_extract::{CliConfig, LocalStorage, TripEngine, TripPipeline};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    // 初始化日誌 (stderr)
    logger::init_logger(config.verbose, config.json_logs);

    tracing::info!("Starting trip-extract CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(e.severity().exit_code());
    }

    tracing::info!("🧭 Strategy: {}", config.strategy);

    let storage = LocalStorage::new(config.output_path.clone());
    let pipeline = TripPipeline::new(storage, config)?;
    let engine = TripEngine::new(pipeline);

    match engine.run().await {
        Ok(output) => {
            for record in &output.records {
                println!("{}", serde_json::to_string_pretty(record)?);
            }
            tracing::info!("✅ Extracted {} records", output.records.len());
            tracing::info!("📁 Output: {}", output.output_path);
        }
        Err(e) => {
            tracing::error!(
                "❌ Extraction failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 建議: {}", e.recovery_suggestion());

            let exit_code = e.severity().exit_code();
            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}
