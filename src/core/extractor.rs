use crate::domain::model::{
    Credentials, ExtractionResult, PlaylistRef, DEFAULT_API_BASE_URL, DEFAULT_TOKEN_URL,
};
use crate::utils::error::{EtlError, Result};
use chrono::Utc;
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;

/// Page size requested for the single playlist read; the API's maximum.
const PAGE_LIMIT: &str = "100";

#[derive(Debug, Clone)]
pub struct SpotifyEndpoints {
    pub token_url: String,
    pub api_base_url: String,
}

impl Default for SpotifyEndpoints {
    fn default() -> Self {
        Self {
            token_url: DEFAULT_TOKEN_URL.to_string(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    token_type: Option<String>,
    #[serde(default)]
    expires_in: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct AuthErrorResponse {
    error: String,
    #[serde(default)]
    error_description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Authenticates with client credentials and reads the first page of a
/// playlist's tracks.
pub struct PlaylistExtractor {
    client: Client,
    endpoints: SpotifyEndpoints,
}

impl PlaylistExtractor {
    pub fn new(endpoints: SpotifyEndpoints) -> Self {
        Self::with_client(Client::new(), endpoints)
    }

    pub fn with_client(client: Client, endpoints: SpotifyEndpoints) -> Self {
        Self { client, endpoints }
    }

    pub async fn extract(
        &self,
        credentials: &Credentials,
        playlist: &PlaylistRef,
    ) -> Result<ExtractionResult> {
        tracing::info!("🚀 Extracting tracks for {}", playlist);

        let access_token = self.request_access_token(credentials).await?;

        let captured_at = Utc::now();
        let payload = self.fetch_playlist_tracks(&access_token, playlist).await?;

        tracing::info!("📊 Captured playlist snapshot at {}", captured_at);
        Ok(ExtractionResult {
            payload,
            captured_at,
        })
    }

    async fn request_access_token(&self, credentials: &Credentials) -> Result<String> {
        if !credentials.is_complete() {
            return Err(EtlError::AuthenticationError {
                message: "client_id and client_secret must both be set".to_string(),
            });
        }

        tracing::debug!("Requesting access token from: {}", self.endpoints.token_url);
        let response = self
            .client
            .post(&self.endpoints.token_url)
            .basic_auth(&credentials.client_id, Some(&credentials.client_secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("Token response status: {}", status);

        if !status.is_success() {
            let body = response.text().await?;
            let message = serde_json::from_str::<AuthErrorResponse>(&body)
                .map(|e| e.error_description.unwrap_or(e.error))
                .unwrap_or(body);

            return Err(match status {
                StatusCode::BAD_REQUEST | StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                    EtlError::AuthenticationError { message }
                }
                _ => EtlError::ApiError {
                    status: status.as_u16(),
                    message,
                },
            });
        }

        let token: TokenResponse = serde_json::from_slice(&response.bytes().await?)?;
        if token.access_token.is_empty() {
            return Err(EtlError::AuthenticationError {
                message: "token endpoint returned an empty access token".to_string(),
            });
        }

        tracing::debug!(
            "Obtained {} token valid for {}s",
            token.token_type.as_deref().unwrap_or("bearer"),
            token.expires_in.unwrap_or_default()
        );
        Ok(token.access_token)
    }

    async fn fetch_playlist_tracks(
        &self,
        access_token: &str,
        playlist: &PlaylistRef,
    ) -> Result<serde_json::Value> {
        let url = format!(
            "{}/playlists/{}/tracks",
            self.endpoints.api_base_url.trim_end_matches('/'),
            playlist.id()
        );

        tracing::debug!("Making API request to: {}", url);
        let response = self
            .client
            .get(&url)
            .bearer_auth(access_token)
            .query(&[
                ("limit", PAGE_LIMIT),
                ("offset", "0"),
                ("additional_types", "track"),
            ])
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("API response status: {}", status);

        if !status.is_success() {
            return Err(playlist_error(status, playlist, response).await);
        }

        let payload = serde_json::from_slice(&response.bytes().await?)?;
        Ok(payload)
    }
}

async fn playlist_error(
    status: StatusCode,
    playlist: &PlaylistRef,
    response: Response,
) -> EtlError {
    let message = match response.text().await {
        Ok(body) => serde_json::from_str::<ApiErrorResponse>(&body)
            .map(|e| e.error.message)
            .unwrap_or(body),
        Err(e) => return EtlError::from(e),
    };

    match status {
        StatusCode::UNAUTHORIZED => EtlError::AuthenticationError { message },
        StatusCode::BAD_REQUEST | StatusCode::NOT_FOUND => EtlError::ResourceNotFoundError {
            resource: playlist.to_string(),
            message,
        },
        _ => EtlError::ApiError {
            status: status.as_u16(),
            message,
        },
    }
}
