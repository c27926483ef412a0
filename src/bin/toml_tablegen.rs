use clap::Parser;
use xid_tablegen::config::{describe, TomlConfig};
use xid_tablegen::core::ConfigProvider;
use xid_tablegen::utils::{logger, validation::Validate};
use xid_tablegen::{EtlEngine, LocalStorage, TablePipeline};

#[derive(Parser)]
#[command(name = "toml-tablegen")]
#[command(about = "Generate Unicode property range tables from a TOML configuration")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "tablegen.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override monitoring setting from config
    #[arg(long)]
    monitor: Option<bool>,

    /// Show what would be generated without fetching anything
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // 載入 TOML 配置
    let config = match TomlConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    // 初始化日誌
    let verbose = args.verbose || config.log_level() == Some("debug");
    logger::init_cli_logger(verbose);

    tracing::info!("🚀 Starting TOML-based table generation");
    tracing::info!("📁 Configuration loaded from: {}", args.config);

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    display_config_summary(&config);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - nothing will be downloaded or written");
        println!("{}", describe(&config));
        return;
    }

    // 決定監控設定
    let monitor_enabled = args.monitor.unwrap_or_else(|| config.monitoring_enabled());
    if monitor_enabled {
        tracing::info!("🔍 System monitoring enabled");
    }

    let pipeline = TablePipeline::new(LocalStorage::default(), config);
    let engine = EtlEngine::new_with_monitoring(pipeline, monitor_enabled);

    match engine.run().await {
        Ok(location) => {
            tracing::info!("✅ Tables generated: {}", location);
        }
        Err(e) => {
            tracing::error!(
                "❌ Table generation failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());

            let exit_code = e.exit_code();
            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }
}

fn display_config_summary(config: &TomlConfig) {
    tracing::info!("📋 Pipeline: {}", config.pipeline.name);
    if let Some(description) = &config.pipeline.description {
        tracing::info!("   {}", description);
    }
    tracing::info!("🔗 Source: {}", config.source_file().unwrap_or(config.source_url()));
    tracing::info!("🔤 Properties: {}", config.properties().join(", "));
    tracing::info!("🧩 Merge policy: {}", config.merge_policy());
    tracing::info!(
        "📁 Output: {}",
        config.output_dir().unwrap_or("stdout")
    );
}
