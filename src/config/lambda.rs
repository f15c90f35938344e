use crate::core::{ConfigProvider, Storage};
use crate::domain::model::{
    Credentials, DEFAULT_API_BASE_URL, DEFAULT_BUCKET, DEFAULT_KEY_PREFIX, DEFAULT_PLAYLIST_URL,
    DEFAULT_TOKEN_URL,
};
use crate::utils::error::{EtlError, Result};
use aws_sdk_s3::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_s3::operation::put_object::PutObjectError;
use aws_sdk_s3::Client as S3Client;
use std::env;

#[derive(Debug, Clone)]
pub struct LambdaConfig {
    pub credentials: Credentials,
    pub playlist_link: String,
    pub s3_bucket: String,
    pub s3_prefix: String,
    pub s3_region: Option<String>,
    pub token_url: String,
    pub api_base_url: String,
}

impl LambdaConfig {
    /// Reads the invocation's settings from the function environment.
    ///
    /// Missing `client_id`/`client_secret` are kept as empty strings so the
    /// extractor reports them as an authentication failure.
    pub fn from_env() -> Result<Self> {
        let var_or =
            |name: &str, default: &str| env::var(name).unwrap_or_else(|_| default.to_string());

        Ok(Self {
            credentials: Credentials::new(var_or("client_id", ""), var_or("client_secret", "")),
            playlist_link: DEFAULT_PLAYLIST_URL.to_string(),
            s3_bucket: var_or("S3_BUCKET", DEFAULT_BUCKET),
            s3_prefix: var_or("S3_PREFIX", DEFAULT_KEY_PREFIX),
            s3_region: env::var("S3_REGION").ok().filter(|r| !r.is_empty()),
            token_url: var_or("SPOTIFY_TOKEN_URL", DEFAULT_TOKEN_URL),
            api_base_url: var_or("SPOTIFY_API_BASE_URL", DEFAULT_API_BASE_URL),
        })
    }
}

impl ConfigProvider for LambdaConfig {
    fn credentials(&self) -> Credentials {
        self.credentials.clone()
    }

    fn playlist_link(&self) -> &str {
        &self.playlist_link
    }

    fn bucket(&self) -> &str {
        &self.s3_bucket
    }

    fn key_prefix(&self) -> &str {
        &self.s3_prefix
    }

    fn token_url(&self) -> &str {
        &self.token_url
    }

    fn api_base_url(&self) -> &str {
        &self.api_base_url
    }
}

impl crate::utils::validation::Validate for LambdaConfig {
    fn validate(&self) -> Result<()> {
        use crate::utils::validation::*;

        validate_url("SPOTIFY_TOKEN_URL", &self.token_url)?;
        validate_url("SPOTIFY_API_BASE_URL", &self.api_base_url)?;
        validate_s3_bucket_name("S3_BUCKET", &self.s3_bucket)?;
        validate_key_prefix("S3_PREFIX", &self.s3_prefix)?;
        if let Some(region) = &self.s3_region {
            validate_aws_region("S3_REGION", region)?;
        }

        tracing::info!("✅ Lambda configuration validation passed");
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct S3Storage {
    client: S3Client,
}

impl S3Storage {
    pub fn new(client: S3Client) -> Self {
        Self { client }
    }
}

fn put_object_message(err: &PutObjectError) -> String {
    match err {
        PutObjectError::EncryptionTypeMismatch(e) => format!("encryption type mismatch: {}", e),
        PutObjectError::InvalidRequest(e) => format!("invalid request: {}", e),
        PutObjectError::TooManyParts(e) => format!("too many parts: {}", e),
        err => match (err.code(), err.message()) {
            (Some(code), Some(message)) => format!("{}: {}", code, message),
            (Some(code), None) => code.to_string(),
            _ => DisplayErrorContext(err).to_string(),
        },
    }
}

impl Storage for S3Storage {
    async fn write_object(&self, bucket: &str, key: &str, data: &[u8]) -> Result<()> {
        let result = self
            .client
            .put_object()
            .bucket(bucket)
            .key(key)
            .content_type("application/json")
            .body(data.to_vec().into())
            .send()
            .await;

        let err = match result {
            Ok(_output) => return Ok(()),
            Err(err) => err,
        };

        let message = match &err {
            SdkError::ServiceError(service_err) => put_object_message(service_err.err()),
            other => DisplayErrorContext(other).to_string(),
        };
        tracing::error!("❌ put_object s3://{}/{} failed: {}", bucket, key, message);

        // Request never got an answer from the bucket.
        if matches!(err, SdkError::DispatchFailure(_) | SdkError::TimeoutError(_)) {
            return Err(EtlError::TransientNetworkError(
                format!("put_object s3://{}/{}: {}", bucket, key, message).into(),
            ));
        }

        Err(EtlError::StorageWriteError {
            key: key.to_string(),
            message,
        })
    }
}
