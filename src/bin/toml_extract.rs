use clap::Parser;
use trip_extract::domain::ports::ConfigProvider;
use trip_extract::utils::{logger, validation::Validate};
use trip_extract::{LocalStorage, Strategy, TomlConfig, TripEngine, TripPipeline};

#[derive(Parser)]
#[command(name = "toml-extract")]
#[command(about = "Trip extraction with TOML configuration support")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "trip-config.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override the extraction strategy from config
    #[arg(long, value_enum)]
    strategy: Option<Strategy>,

    /// Dry run - show what would be processed without executing
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // 初始化日誌
    logger::init_cli_logger(args.verbose);

    tracing::info!("🚀 Starting TOML-based trip extraction");
    tracing::info!("📁 Loading configuration from: {}", args.config);

    // 載入 TOML 配置
    let mut config = match TomlConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(e.severity().exit_code());
        }
    };

    // 應用命令列覆蓋設定
    if let Some(strategy) = args.strategy {
        config.extraction.strategy = Some(strategy);
        tracing::info!("🔧 Strategy overridden to: {}", strategy);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(e.severity().exit_code());
    }

    tracing::info!("✅ Configuration loaded and validated successfully");

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - No actual processing will occur");
        display_config_summary(&config);
        return Ok(());
    }

    let storage = LocalStorage::new(config.output_path().to_string());
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

fn display_config_summary(config: &TomlConfig) {
    println!("📋 Configuration Summary:");
    println!(
        "  Pipeline: {} v{}",
        config.pipeline.name,
        config.pipeline.version.as_deref().unwrap_or("0.0.0")
    );
    if let Some(description) = &config.pipeline.description {
        println!("  Description: {}", description);
    }
    println!("  Strategy: {}", config.strategy());
    println!("  Default Year: {}", config.default_year());

    match config.input_file() {
        Some(file) => println!(
            "  Input: {} inline sentences + {}",
            config.sentences().len(),
            file
        ),
        None if config.sentences().is_empty() => println!("  Input: bundled samples"),
        None => println!("  Input: {} inline sentences", config.sentences().len()),
    }

    let lexicon = &config.lexicon;
    println!(
        "  Lexicon extras: {} locations, {} stop words, {} titles, {} triggers",
        lexicon.extra_locations.len(),
        lexicon.extra_stop_words.len(),
        lexicon.extra_titles.len(),
        lexicon.extra_triggers.len()
    );

    if let Some(ner) = config.ner_settings() {
        println!("  NER Endpoint: {}", ner.endpoint);
        println!(
            "  NER Token: {}",
            if ner.api_token.is_some() { "set" } else { "not set" }
        );
    }

    println!("  Output: {}", config.output_path());
    if config.output_formats().is_empty() {
        println!("  Formats: stdout only");
    } else {
        println!("  Formats: {}", config.output_formats().join(", "));
    }
    if config.compress_output() {
        println!("  Archive: {}", config.archive_name());
    }
}
