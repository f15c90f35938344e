use anyhow::Context;
use clap::Parser;
use spotify_extract::core::ConfigProvider;
use spotify_extract::utils::error::ErrorSeverity;
use spotify_extract::utils::logger::{self, LogFormat};
use spotify_extract::utils::validation::Validate;
use spotify_extract::{CliConfig, EtlEngine, SnapshotPipeline};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    logger::init(LogFormat::Compact, config.verbose);

    tracing::info!("Starting spotify-extract");
    if config.verbose {
        tracing::debug!(
            "Target: {} -> {}/{}",
            config.playlist_link(),
            config.bucket(),
            config.key_prefix()
        );
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(3);
    }

    let storage = config
        .prepare_storage()
        .await
        .with_context(|| format!("preparing bucket directory under {}", config.output_path))?;

    let pipeline = SnapshotPipeline::new(storage, config);
    let engine = EtlEngine::new(pipeline);

    match engine.run().await {
        Ok(key) => {
            tracing::info!("📁 Snapshot saved to: {}", key);
            println!("✅ Playlist snapshot saved to: {}", key);
            Ok(())
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
            eprintln!("💡 {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };
            std::process::exit(exit_code);
        }
    }
}
