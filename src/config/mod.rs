#[cfg(feature = "cli")]
pub mod cli;
#[cfg(feature = "lambda")]
pub mod lambda;

#[cfg(feature = "cli")]
use crate::core::ConfigProvider;
#[cfg(feature = "cli")]
use crate::domain::model::{
    Credentials, DEFAULT_API_BASE_URL, DEFAULT_BUCKET, DEFAULT_KEY_PREFIX, DEFAULT_PLAYLIST_URL,
    DEFAULT_TOKEN_URL,
};
#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "spotify-extract")]
#[command(about = "Snapshot a Spotify playlist's tracks into a raw landing zone")]
pub struct CliConfig {
    #[arg(
        long,
        env = "client_id",
        default_value = "",
        hide_env_values = true,
        hide_default_value = true
    )]
    pub client_id: String,

    #[arg(
        long,
        env = "client_secret",
        default_value = "",
        hide_env_values = true,
        hide_default_value = true
    )]
    pub client_secret: String,

    #[arg(long, default_value = DEFAULT_BUCKET)]
    pub bucket: String,

    #[arg(long, default_value = DEFAULT_KEY_PREFIX)]
    pub key_prefix: String,

    #[arg(long, default_value = "./output", help = "Directory that holds one folder per bucket")]
    pub output_path: String,

    #[arg(
        long,
        help = "Create the bucket folder if it is missing; otherwise it must already exist"
    )]
    pub create_bucket: bool,

    #[arg(long, default_value = DEFAULT_TOKEN_URL, hide = true)]
    pub token_url: String,

    #[arg(long, default_value = DEFAULT_API_BASE_URL, hide = true)]
    pub api_base_url: String,

    #[arg(skip = String::from(DEFAULT_PLAYLIST_URL))]
    pub playlist_link: String,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// Storage rooted at `output_path`. The bucket folder is only created on
    /// request, so a missing bucket surfaces as a write failure after
    /// extraction.
    pub async fn prepare_storage(&self) -> crate::utils::error::Result<cli::LocalStorage> {
        let storage = cli::LocalStorage::new(self.output_path.clone());
        if self.create_bucket {
            storage.create_bucket(&self.bucket).await?;
            tracing::info!("🪣 Bucket folder ready: {}/{}", self.output_path, self.bucket);
        }
        Ok(storage)
    }
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn credentials(&self) -> Credentials {
        Credentials::new(&self.client_id, &self.client_secret)
    }

    fn playlist_link(&self) -> &str {
        &self.playlist_link
    }

    fn bucket(&self) -> &str {
        &self.bucket
    }

    fn key_prefix(&self) -> &str {
        &self.key_prefix
    }

    fn token_url(&self) -> &str {
        &self.token_url
    }

    fn api_base_url(&self) -> &str {
        &self.api_base_url
    }
}

#[cfg(feature = "cli")]
impl crate::utils::validation::Validate for CliConfig {
    fn validate(&self) -> crate::utils::error::Result<()> {
        use crate::utils::validation::*;

        validate_url("token_url", &self.token_url)?;
        validate_url("api_base_url", &self.api_base_url)?;
        validate_s3_bucket_name("bucket", &self.bucket)?;
        validate_key_prefix("key_prefix", &self.key_prefix)?;
        validate_non_empty_string("output_path", &self.output_path)?;

        tracing::info!("✅ CLI configuration validation passed");
        Ok(())
    }
}
