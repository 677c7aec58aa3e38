use clap::Parser;
use sample_scan_gen::core::ConfigProvider;
use sample_scan_gen::utils::{logger, validation::Validate};
use sample_scan_gen::{
    CliConfig, LocalStorage, ReportEngine, ReportError, SamplePipeline, TomlConfig,
};

fn exit_with(e: &ReportError) -> ! {
    tracing::error!(
        "❌ Report generation failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
    std::process::exit(e.exit_code().max(1));
}

async fn generate<C: ConfigProvider + Validate>(config: C, monitor_enabled: bool) {
    if let Err(e) = config.validate() {
        exit_with(&e);
    }

    match config.seed() {
        Some(seed) => tracing::info!("🎲 Using seed {}", seed),
        None => tracing::debug!("No seed given, drawing from entropy"),
    }
    if monitor_enabled {
        tracing::info!("🔍 System monitoring enabled");
    }

    let storage = LocalStorage::new(config.output_path().to_string());
    let pipeline = SamplePipeline::new(storage, config);
    let engine = ReportEngine::new_with_monitoring(pipeline, monitor_enabled);

    match engine.run().await {
        Ok(output_path) => {
            tracing::info!("✅ Sample report generated");
            println!("Sample data written to {}", output_path);
        }
        Err(e) => exit_with(&e),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    logger::init_logger(cli.verbose, cli.log_json);
    tracing::info!("Starting sample-scan-gen");
    tracing::debug!("CLI config: {:?}", cli);

    match cli.config.clone() {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);
            let mut config = match TomlConfig::from_file(&path) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("❌ Failed to load config file '{}': {}", path, e);
                    eprintln!("💡 Make sure the file exists and is valid TOML format");
                    std::process::exit(1);
                }
            };
            cli.apply_overrides(&mut config);
            let monitor_enabled = config.monitoring_enabled();
            generate(config, monitor_enabled).await;
        }
        None => {
            let monitor_enabled = cli.monitor;
            generate(cli, monitor_enabled).await;
        }
    }

    Ok(())
}
