//! Spotify catalog search client
//!
//! Authenticates with the client-credentials flow and searches for the
//! single best track match for a free-text query. The bearer token is cached
//! until shortly before its expiry and refreshed on demand; the cache is
//! auth plumbing, not result caching.

use async_trait::async_trait;
use serde::Deserialize;
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio::sync::Mutex;

use super::CatalogSearcher;

const SPOTIFY_ACCOUNTS_URL: &str = "https://accounts.spotify.com/api/token";
const SPOTIFY_API_URL: &str = "https://api.spotify.com";

/// Refresh the cached token this long before it actually expires.
const TOKEN_EXPIRY_MARGIN: Duration = Duration::from_secs(60);

/// Catalog client errors
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Request could not be sent or the body could not be read
    #[error("Network error: {0}")]
    Network(String),

    /// Token endpoint rejected the client credentials
    #[error("Auth error: {0}")]
    Auth(String),

    /// Search endpoint returned a non-success status
    #[error("API error {0}: {1}")]
    Api(u16, String),

    /// Response body did not match the expected shape
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Catalog metadata for one matched track.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackMatch {
    /// Canonical link to the track
    pub spotify_url: String,
    /// First album cover image, when the album has any
    pub album_cover: Option<String>,
}

struct CachedToken {
    access_token: String,
    expires_at: Instant,
}

/// Spotify API client using the client-credentials flow
pub struct SpotifyClient {
    client_id: String,
    client_secret: String,
    accounts_url: String,
    api_url: String,
    http: reqwest::Client,
    token: Mutex<Option<CachedToken>>,
}

impl SpotifyClient {
    pub fn new(client_id: String, client_secret: String) -> Self {
        Self::with_base_urls(
            client_id,
            client_secret,
            SPOTIFY_ACCOUNTS_URL.to_string(),
            SPOTIFY_API_URL.to_string(),
        )
    }

    /// Construct against alternate endpoints (integration tests).
    pub fn with_base_urls(
        client_id: String,
        client_secret: String,
        accounts_url: String,
        api_url: String,
    ) -> Self {
        Self {
            client_id,
            client_secret,
            accounts_url,
            api_url,
            http: reqwest::Client::new(),
            token: Mutex::new(None),
        }
    }

    /// Return a valid bearer token, fetching a fresh one when the cached
    /// token is absent or about to expire.
    async fn bearer_token(&self) -> Result<String, CatalogError> {
        let mut cached = self.token.lock().await;

        if let Some(token) = cached.as_ref() {
            if token.expires_at > Instant::now() {
                return Ok(token.access_token.clone());
            }
        }

        let res = self
            .http
            .post(&self.accounts_url)
            .timeout(Duration::from_secs(30))
            .basic_auth(&self.client_id, Some(&self.client_secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await
            .map_err(|e| CatalogError::Network(e.to_string()))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|e| CatalogError::Network(e.to_string()))?;

        if !status.is_success() {
            return Err(CatalogError::Auth(format!(
                "token request failed with status {status}"
            )));
        }

        let token: TokenResponse =
            serde_json::from_str(&body).map_err(|e| CatalogError::Parse(e.to_string()))?;

        let lifetime = Duration::from_secs(token.expires_in)
            .saturating_sub(TOKEN_EXPIRY_MARGIN);
        *cached = Some(CachedToken {
            access_token: token.access_token.clone(),
            expires_at: Instant::now() + lifetime,
        });

        Ok(token.access_token)
    }
}

#[async_trait]
impl CatalogSearcher for SpotifyClient {
    async fn find_track(&self, query: &str) -> Result<Option<TrackMatch>, CatalogError> {
        let token = self.bearer_token().await?;

        let url = format!("{}/v1/search", self.api_url);
        let res = self
            .http
            .get(&url)
            .timeout(Duration::from_secs(30))
            .bearer_auth(token)
            .query(&[("q", query), ("type", "track"), ("limit", "1")])
            .send()
            .await
            .map_err(|e| CatalogError::Network(e.to_string()))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|e| CatalogError::Network(e.to_string()))?;

        if !status.is_success() {
            return Err(CatalogError::Api(status.as_u16(), truncate_body(&body)));
        }

        let parsed: SearchResponse =
            serde_json::from_str(&body).map_err(|e| CatalogError::Parse(e.to_string()))?;

        Ok(parsed.tracks.items.into_iter().next().map(track_to_match))
    }
}

fn track_to_match(track: Track) -> TrackMatch {
    TrackMatch {
        spotify_url: track.external_urls.spotify,
        album_cover: track.album.images.into_iter().next().map(|i| i.url),
    }
}

/// Truncate an upstream body for error messages, respecting char boundaries.
fn truncate_body(body: &str) -> String {
    const MAX_CHARS: usize = 200;
    match body.char_indices().nth(MAX_CHARS) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: u64,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    tracks: SearchTracks,
}

#[derive(Debug, Deserialize)]
struct SearchTracks {
    items: Vec<Track>,
}

#[derive(Debug, Deserialize)]
struct Track {
    external_urls: ExternalUrls,
    album: Album,
}

#[derive(Debug, Deserialize)]
struct ExternalUrls {
    spotify: String,
}

#[derive(Debug, Deserialize)]
struct Album {
    images: Vec<Image>,
}

#[derive(Debug, Deserialize)]
struct Image {
    url: String,
}
