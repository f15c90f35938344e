use crate::core::extractor::{PlaylistExtractor, SpotifyEndpoints};
use crate::core::landing::LandingWriter;
use crate::core::{ConfigProvider, ExtractionResult, Pipeline, Storage};
use crate::domain::model::PlaylistRef;
use crate::utils::error::Result;

/// Extract-and-land job for a single playlist snapshot.
pub struct SnapshotPipeline<S: Storage, C: ConfigProvider> {
    extractor: PlaylistExtractor,
    writer: LandingWriter<S>,
    config: C,
}

impl<S: Storage, C: ConfigProvider> SnapshotPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        let endpoints = SpotifyEndpoints {
            token_url: config.token_url().to_string(),
            api_base_url: config.api_base_url().to_string(),
        };

        Self {
            extractor: PlaylistExtractor::new(endpoints),
            writer: LandingWriter::new(storage),
            config,
        }
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for SnapshotPipeline<S, C> {
    async fn extract(&self) -> Result<ExtractionResult> {
        let playlist = PlaylistRef::parse(self.config.playlist_link())?;
        let credentials = self.config.credentials();
        self.extractor.extract(&credentials, &playlist).await
    }

    async fn load(&self, result: ExtractionResult) -> Result<String> {
        self.writer
            .land(result, self.config.bucket(), self.config.key_prefix())
            .await
    }
}
