//! Jikan (MyAnimeList mirror) API client.

use std::num::NonZeroU32;
use std::time::Duration;

use governor::Quota;
use governor::RateLimiter;
use governor::clock::QuantaClock;
use governor::state::InMemoryState;
use governor::state::direct::NotKeyed;
use log::debug;
use log::info;
use log::warn;
use reqwest::Client;
use reqwest::StatusCode;
use reqwest::header::HeaderMap;
use reqwest::header::HeaderValue;
use reqwest::header::USER_AGENT;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::Config;
use crate::jikan::error::JikanError;
use crate::jikan::model::AnimeCharacterEntry;
use crate::jikan::model::AnimeData;
use crate::jikan::model::CharacterData;
use crate::jikan::model::GenreData;
use crate::jikan::model::JikanPage;
use crate::jikan::model::MagazineData;
use crate::jikan::model::MangaCharacterEntry;
use crate::jikan::model::MangaData;
use crate::jikan::model::PersonData;
use crate::jikan::model::ProducerData;
use crate::model::GenreKind;

pub mod error;
pub mod model;

/// Rate-limited HTTP client for the Jikan REST API.
pub struct JikanClient {
    /// API root without a trailing slash. Public so tests can point it at a
    /// mock server.
    pub base_url: String,
    client: Client,
    limiter: RateLimiter<NotKeyed, InMemoryState, QuantaClock>,
    max_retries: u32,
    retry_delay: Duration,
}

impl JikanClient {
    /// Creates a new client with rate limiting from the loaded config.
    pub fn new(config: &Config) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static("trackyrs/0.3"));
        let client = Client::builder()
            .default_headers(headers)
            .build()
            .expect("Failed to create client");

        // NOTE: See https://docs.api.jikan.moe/#section/Information/Rate-Limiting
        // Jikan allows 60 requests per minute and 3 per second. A per-minute
        // quota with a burst of 3 stays under both.
        let limiter = RateLimiter::direct(
            Quota::per_minute(NonZeroU32::new(60).unwrap())
                .allow_burst(NonZeroU32::new(3).unwrap()),
        );

        Self {
            base_url: config.jikan_base_url.clone(),
            client,
            limiter,
            max_retries: config.jikan_max_retries,
            retry_delay: config.jikan_retry_delay,
        }
    }

    pub async fn anime_page(&self, page: i32) -> Result<JikanPage<AnimeData>, JikanError> {
        self.send_get_json(&format!("/anime?page={page}")).await
    }

    pub async fn manga_page(&self, page: i32) -> Result<JikanPage<MangaData>, JikanError> {
        self.send_get_json(&format!("/manga?page={page}")).await
    }

    pub async fn characters_page(&self, page: i32) -> Result<JikanPage<CharacterData>, JikanError> {
        self.send_get_json(&format!("/characters?page={page}"))
            .await
    }

    pub async fn people_page(&self, page: i32) -> Result<JikanPage<PersonData>, JikanError> {
        self.send_get_json(&format!("/people?page={page}")).await
    }

    pub async fn producers_page(&self, page: i32) -> Result<JikanPage<ProducerData>, JikanError> {
        self.send_get_json(&format!("/producers?page={page}")).await
    }

    pub async fn magazines_page(&self, page: i32) -> Result<JikanPage<MagazineData>, JikanError> {
        self.send_get_json(&format!("/magazines?page={page}")).await
    }

    /// Fetches the full genre list for one catalog. Not paginated upstream.
    pub async fn genres(&self, kind: GenreKind) -> Result<JikanPage<GenreData>, JikanError> {
        let path = match kind {
            GenreKind::Anime => "/genres/anime",
            GenreKind::Manga => "/genres/manga",
        };
        self.send_get_json(path).await
    }

    pub async fn anime_characters(
        &self,
        mal_id: i64,
    ) -> Result<JikanPage<AnimeCharacterEntry>, JikanError> {
        self.send_get_json(&format!("/anime/{mal_id}/characters"))
            .await
    }

    pub async fn manga_characters(
        &self,
        mal_id: i64,
    ) -> Result<JikanPage<MangaCharacterEntry>, JikanError> {
        self.send_get_json(&format!("/manga/{mal_id}/characters"))
            .await
    }

    /// Sends a GET request, waiting on the limiter and retrying on 429.
    ///
    /// 429 is the only status that triggers a retry. Anything else is
    /// returned to the caller as-is.
    async fn send_get(&self, path: &str) -> Result<reqwest::Response, JikanError> {
        let url = format!("{}{path}", self.base_url);
        let mut attempts = 0u32;

        loop {
            if self.limiter.check().is_err() {
                info!("Jikan is ratelimited. Waiting...");
            }
            self.limiter.until_ready().await;

            debug!("Making request to: {url}");
            let response = self.client.get(&url).send().await?;

            if response.status() != StatusCode::TOO_MANY_REQUESTS {
                return Ok(response);
            }

            attempts += 1;
            if attempts > self.max_retries {
                return Err(JikanError::RateLimited {
                    attempts,
                    path: path.to_string(),
                });
            }
            warn!(
                "Got 429 from Jikan for {path} (attempt {attempts}/{}). Retrying in {}s...",
                self.max_retries,
                self.retry_delay.as_secs()
            );
            tokio::time::sleep(self.retry_delay).await;
        }
    }

    async fn send_get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, JikanError> {
        let response = self.send_get(path).await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(JikanError::NotFound {
                path: path.to_string(),
            });
        }
        if !status.is_success() {
            let message = Self::error_message(response).await;
            return Err(JikanError::ApiError {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await?;
        let parsed: T = serde_json::from_str(&body)?;
        Ok(parsed)
    }

    /// Pulls the `message` field out of a Jikan error body, if there is one.
    async fn error_message(response: reqwest::Response) -> String {
        response
            .text()
            .await
            .ok()
            .and_then(|body| serde_json::from_str::<Value>(&body).ok())
            .and_then(|resp| {
                resp.get("message")
                    .and_then(|v| v.as_str())
                    .map(|s| s.to_string())
            })
            .unwrap_or_else(|| "Unknown API error".to_string())
    }
}
