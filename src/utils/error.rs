use thiserror::Error;

#[derive(Error, Debug)]
pub enum EtlError {
    #[error("Authentication failed: {message}")]
    AuthenticationError { message: String },

    #[error("Resource not found: {resource} ({message})")]
    ResourceNotFoundError { resource: String, message: String },

    /// Connectivity failure on either side of the job: the Spotify API or
    /// the object store.
    #[error("Network request failed: {0}")]
    TransientNetworkError(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("API returned status {status}: {message}")]
    ApiError { status: u16, message: String },

    #[error("Failed to write object {key}: {message}")]
    StorageWriteError { key: String, message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

impl From<reqwest::Error> for EtlError {
    fn from(err: reqwest::Error) -> Self {
        EtlError::TransientNetworkError(Box::new(err))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Authentication,
    Source,
    Network,
    Storage,
    Data,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl EtlError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            EtlError::AuthenticationError { .. } => ErrorCategory::Authentication,
            EtlError::ResourceNotFoundError { .. } | EtlError::ApiError { .. } => {
                ErrorCategory::Source
            }
            EtlError::TransientNetworkError(_) => ErrorCategory::Network,
            EtlError::StorageWriteError { .. } | EtlError::IoError(_) => ErrorCategory::Storage,
            EtlError::SerializationError(_) => ErrorCategory::Data,
            EtlError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Source | ErrorCategory::Storage | ErrorCategory::Data => {
                ErrorSeverity::High
            }
            ErrorCategory::Authentication | ErrorCategory::Configuration => {
                ErrorSeverity::Critical
            }
        }
    }

    /// Whether running the same invocation again may succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            EtlError::TransientNetworkError(_) => true,
            EtlError::ApiError { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            EtlError::AuthenticationError { .. } => {
                "Check that client_id and client_secret are set and belong to an active Spotify app"
            }
            EtlError::ResourceNotFoundError { .. } => {
                "Check that the playlist link points to an existing public playlist"
            }
            EtlError::TransientNetworkError(_) => {
                "Check network connectivity and trigger the extraction again"
            }
            EtlError::ApiError { .. } => {
                "Inspect the API response; rate limits and server errors usually clear on a later run"
            }
            EtlError::StorageWriteError { .. } | EtlError::IoError(_) => {
                "Check that the bucket exists and the caller has write permission"
            }
            EtlError::SerializationError(_) => "Inspect the raw API response for malformed JSON",
            EtlError::InvalidConfigValueError { .. } => "Fix the configuration value and run again",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            EtlError::AuthenticationError { .. } => {
                "Could not authenticate with the Spotify API".to_string()
            }
            EtlError::ResourceNotFoundError { resource, .. } => {
                format!("Playlist {} could not be found", resource)
            }
            EtlError::TransientNetworkError(_) => {
                "A network error interrupted the extraction".to_string()
            }
            EtlError::ApiError { status, .. } => {
                format!("The Spotify API rejected the request (HTTP {})", status)
            }
            EtlError::StorageWriteError { key, .. } => {
                format!("The snapshot could not be stored under {}", key)
            }
            EtlError::IoError(e) => format!("Local storage failed: {}", e),
            EtlError::SerializationError(_) => "The API response could not be encoded".to_string(),
            EtlError::InvalidConfigValueError { field, reason, .. } => {
                format!("Invalid setting {}: {}", field, reason)
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, EtlError>;
