#[cfg(feature = "lambda")]
use aws_config::BehaviorVersion;
#[cfg(feature = "lambda")]
use aws_sdk_s3::config::Region;
#[cfg(feature = "lambda")]
use aws_sdk_s3::Client as S3Client;
#[cfg(feature = "lambda")]
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
#[cfg(feature = "lambda")]
use spotify_extract::utils::logger::{self, LogFormat};
use spotify_extract::utils::validation::Validate;
#[cfg(feature = "lambda")]
use spotify_extract::{EtlEngine, LambdaConfig, S3Storage, SnapshotPipeline};

/// Scheduled trigger entry point. The event payload carries nothing the job
/// needs; every setting comes from the function environment.
#[cfg(feature = "lambda")]
async fn function_handler(event: LambdaEvent<serde_json::Value>) -> Result<(), Error> {
    tracing::info!(request_id = %event.context.request_id, "Starting playlist extraction");

    let lambda_config = LambdaConfig::from_env()?;
    lambda_config.validate()?;

    let sdk_config = aws_config::load_defaults(BehaviorVersion::latest()).await;
    let mut s3_config = aws_sdk_s3::config::Builder::from(&sdk_config);
    if let Some(region) = &lambda_config.s3_region {
        s3_config = s3_config.region(Region::new(region.clone()));
    }
    let s3_client = S3Client::from_conf(s3_config.build());

    let storage = S3Storage::new(s3_client);
    let pipeline = SnapshotPipeline::new(storage, lambda_config);

    let engine = EtlEngine::new(pipeline);
    match engine.run().await {
        Ok(key) => {
            tracing::info!("✅ Playlist snapshot stored at {}", key);
            Ok(())
        }
        Err(e) => {
            tracing::error!(
                category = ?e.category(),
                severity = ?e.severity(),
                "❌ Extraction failed: {}",
                e
            );
            Err(e.into())
        }
    }
}

#[cfg(feature = "lambda")]
#[tokio::main]
async fn main() -> Result<(), Error> {
    logger::init(LogFormat::Json, false);

    run(service_fn(function_handler)).await
}
