use crate::domain::model::{Credentials, ExtractionResult};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Object storage addressed by bucket and key.
pub trait Storage: Send + Sync {
    fn write_object(
        &self,
        bucket: &str,
        key: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn credentials(&self) -> Credentials;
    fn playlist_link(&self) -> &str;
    fn bucket(&self) -> &str;
    fn key_prefix(&self) -> &str;
    fn token_url(&self) -> &str;
    fn api_base_url(&self) -> &str;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<ExtractionResult>;
    async fn load(&self, result: ExtractionResult) -> Result<String>;
}
