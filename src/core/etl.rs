use crate::core::Pipeline;
use crate::utils::error::Result;
use std::time::Instant;

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    /// Runs extract then load, returning the key of the landed object.
    ///
    /// Load is never attempted when extraction fails.
    pub async fn run(&self) -> Result<String> {
        let started = Instant::now();
        tracing::info!("Starting extraction run");

        let result = self.pipeline.extract().await?;
        tracing::info!("Extraction finished, landing snapshot");

        let key = self.pipeline.load(result).await?;
        tracing::info!("✅ Snapshot landed at {} in {:?}", key, started.elapsed());

        Ok(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ExtractionResult;
    use crate::utils::error::EtlError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct RecordingPipeline {
        fail_extract: bool,
        fail_load: bool,
        extracts: AtomicUsize,
        loads: AtomicUsize,
    }

    #[async_trait]
    impl Pipeline for RecordingPipeline {
        async fn extract(&self) -> Result<ExtractionResult> {
            self.extracts.fetch_add(1, Ordering::SeqCst);
            if self.fail_extract {
                return Err(EtlError::AuthenticationError {
                    message: "missing credentials".to_string(),
                });
            }
            Ok(ExtractionResult {
                payload: serde_json::json!({"items": []}),
                captured_at: chrono::Utc::now(),
            })
        }

        async fn load(&self, _result: ExtractionResult) -> Result<String> {
            self.loads.fetch_add(1, Ordering::SeqCst);
            if self.fail_load {
                return Err(EtlError::StorageWriteError {
                    key: "k".to_string(),
                    message: "NoSuchBucket".to_string(),
                });
            }
            Ok("raw_data/to_processed/spotify_raw_x.json".to_string())
        }
    }

    #[tokio::test]
    async fn test_run_returns_landed_key() {
        let engine = EtlEngine::new(RecordingPipeline::default());
        let key = tokio_test::assert_ok!(engine.run().await);
        assert_eq!(key, "raw_data/to_processed/spotify_raw_x.json");
    }

    #[tokio::test]
    async fn test_failed_extract_skips_load() {
        let engine = EtlEngine::new(RecordingPipeline {
            fail_extract: true,
            ..Default::default()
        });

        let err = tokio_test::assert_err!(engine.run().await);

        assert!(matches!(err, EtlError::AuthenticationError { .. }));
        assert_eq!(engine.pipeline.extracts.load(Ordering::SeqCst), 1);
        assert_eq!(engine.pipeline.loads.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_failed_load_surfaces_after_extract() {
        let engine = EtlEngine::new(RecordingPipeline {
            fail_load: true,
            ..Default::default()
        });

        let err = tokio_test::assert_err!(engine.run().await);

        assert!(matches!(err, EtlError::StorageWriteError { .. }));
        assert_eq!(engine.pipeline.extracts.load(Ordering::SeqCst), 1);
        assert_eq!(engine.pipeline.loads.load(Ordering::SeqCst), 1);
    }
}
