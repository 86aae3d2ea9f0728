use std::sync::Arc;

use crate::model::AnimeTrackingModel;
use crate::model::MangaTrackingModel;
use crate::model::ReadStatus;
use crate::model::TrackedAnimeRow;
use crate::model::TrackedMangaRow;
use crate::model::WatchStatus;
use crate::repository::Repository;
use crate::service::error::ServiceError;

/// Per-user watch and read lists.
pub struct TrackingService {
    db: Arc<Repository>,
}

impl TrackingService {
    pub fn new(db: Arc<Repository>) -> Self {
        Self { db }
    }

    /// Creates or updates one user's tracking for an anime.
    pub async fn set_anime(
        &self,
        user_id: i64,
        anime_id: i64,
        status: WatchStatus,
        score: Option<i32>,
        episodes_watched: Option<i32>,
    ) -> Result<AnimeTrackingModel, ServiceError> {
        validate_score(score)?;
        let episodes_watched = episodes_watched.unwrap_or(0);
        if episodes_watched < 0 {
            return Err(ServiceError::Validation(
                "Episodes watched cannot be negative".to_string(),
            ));
        }
        if self.db.anime.select(anime_id).await?.is_none() {
            return Err(ServiceError::NotFound("Anime not found".to_string()));
        }

        let model = AnimeTrackingModel {
            user_id,
            anime_id,
            status,
            score,
            episodes_watched,
            ..Default::default()
        };
        Ok(self.db.tracking.upsert_anime(&model).await?)
    }

    pub async fn list_anime(
        &self,
        user_id: i64,
        status: Option<WatchStatus>,
    ) -> Result<Vec<TrackedAnimeRow>, ServiceError> {
        Ok(self.db.tracking.list_anime(user_id, status).await?)
    }

    pub async fn remove_anime(&self, user_id: i64, anime_id: i64) -> Result<(), ServiceError> {
        if !self.db.tracking.delete_anime(user_id, anime_id).await? {
            return Err(ServiceError::NotFound("Tracking not found".to_string()));
        }
        Ok(())
    }

    /// Creates or updates one user's tracking for a manga.
    pub async fn set_manga(
        &self,
        user_id: i64,
        manga_id: i64,
        status: ReadStatus,
        score: Option<i32>,
        chapters_read: Option<i32>,
        volumes_read: Option<i32>,
    ) -> Result<MangaTrackingModel, ServiceError> {
        validate_score(score)?;
        let chapters_read = chapters_read.unwrap_or(0);
        let volumes_read = volumes_read.unwrap_or(0);
        if chapters_read < 0 || volumes_read < 0 {
            return Err(ServiceError::Validation(
                "Read counts cannot be negative".to_string(),
            ));
        }
        if self.db.manga.select(manga_id).await?.is_none() {
            return Err(ServiceError::NotFound("Manga not found".to_string()));
        }

        let model = MangaTrackingModel {
            user_id,
            manga_id,
            status,
            score,
            chapters_read,
            volumes_read,
            ..Default::default()
        };
        Ok(self.db.tracking.upsert_manga(&model).await?)
    }

    pub async fn list_manga(
        &self,
        user_id: i64,
        status: Option<ReadStatus>,
    ) -> Result<Vec<TrackedMangaRow>, ServiceError> {
        Ok(self.db.tracking.list_manga(user_id, status).await?)
    }

    pub async fn remove_manga(&self, user_id: i64, manga_id: i64) -> Result<(), ServiceError> {
        if !self.db.tracking.delete_manga(user_id, manga_id).await? {
            return Err(ServiceError::NotFound("Tracking not found".to_string()));
        }
        Ok(())
    }
}

fn validate_score(score: Option<i32>) -> Result<(), ServiceError> {
    if let Some(score) = score {
        if !(1..=10).contains(&score) {
            return Err(ServiceError::Validation(
                "Score must be between 1 and 10".to_string(),
            ));
        }
    }
    Ok(())
}
