use crate::utils::error::{EtlError, Result};
use chrono::{DateTime, Utc};
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;
use url::Url;

pub const DEFAULT_PLAYLIST_URL: &str =
    "https://open.spotify.com/playlist/6nvDix6ABiGTqZghg4qaHs";
pub const DEFAULT_BUCKET: &str = "spotify-etl-project-olusegun";
pub const DEFAULT_KEY_PREFIX: &str = "raw_data/to_processed/";
pub const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_API_BASE_URL: &str = "https://api.spotify.com/v1";

static PLAYLIST_ID_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9A-Za-z]{22}$").expect("valid playlist id pattern"));

/// Client-credentials pair for the Spotify Web API.
///
/// Built once per invocation by the entry point; the secret is never logged.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
}

impl Credentials {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }

    pub fn is_complete(&self) -> bool {
        !self.client_id.trim().is_empty() && !self.client_secret.trim().is_empty()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}

/// A playlist as addressed by the API: the id taken from a share link,
/// a `spotify:playlist:` URI, or the bare id itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistRef {
    link: String,
    id: String,
}

impl PlaylistRef {
    pub fn parse(link: &str) -> Result<Self> {
        let link = link.trim();
        let candidate = if let Some(id) = link.strip_prefix("spotify:playlist:") {
            id.to_string()
        } else if link.contains("://") {
            let url = Url::parse(link).map_err(|e| EtlError::ResourceNotFoundError {
                resource: link.to_string(),
                message: format!("invalid playlist link: {}", e),
            })?;
            url.path_segments()
                .and_then(|segments| segments.filter(|s| !s.is_empty()).last())
                .unwrap_or_default()
                .to_string()
        } else {
            link.to_string()
        };

        if !PLAYLIST_ID_PATTERN.is_match(&candidate) {
            return Err(EtlError::ResourceNotFoundError {
                resource: link.to_string(),
                message: format!("'{}' is not a valid playlist id", candidate),
            });
        }

        Ok(Self {
            link: link.to_string(),
            id: candidate,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn link(&self) -> &str {
        &self.link
    }
}

impl fmt::Display for PlaylistRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "spotify:playlist:{}", self.id)
    }
}

/// Raw API response paired with the instant the read was issued.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionResult {
    pub payload: serde_json::Value,
    pub captured_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LandingObject {
    pub bucket: String,
    pub key: String,
    pub body: Vec<u8>,
}
