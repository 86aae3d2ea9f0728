use sqlx::PgPool;

use crate::model::AnimeTrackingModel;
use crate::model::MangaTrackingModel;
use crate::model::ReadStatus;
use crate::model::TrackedAnimeRow;
use crate::model::TrackedMangaRow;
use crate::model::WatchStatus;
use crate::repository::BaseTable;
use crate::repository::error::DatabaseError;

/// Per-user watch and read lists, one table for each medium.
///
/// A user has at most one tracking per entry, so writes upsert on
/// `(user_id, anime_id)` / `(user_id, manga_id)`.
#[derive(Clone)]
pub struct TrackingTable {
    base: BaseTable,
}

impl TrackingTable {
    pub fn new(pool: PgPool) -> Self {
        Self {
            base: BaseTable::new(pool),
        }
    }

    pub async fn upsert_anime(
        &self,
        model: &AnimeTrackingModel,
    ) -> Result<AnimeTrackingModel, DatabaseError> {
        Ok(sqlx::query_as::<_, AnimeTrackingModel>(
            r#"
            INSERT INTO anime_trackings (user_id, anime_id, status, score, episodes_watched)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (user_id, anime_id) DO UPDATE SET
                status = EXCLUDED.status,
                score = EXCLUDED.score,
                episodes_watched = EXCLUDED.episodes_watched,
                updated_at = now()
            RETURNING id, user_id, anime_id, status, score, episodes_watched,
                      created_at, updated_at
            "#,
        )
        .bind(model.user_id)
        .bind(model.anime_id)
        .bind(model.status)
        .bind(model.score)
        .bind(model.episodes_watched)
        .fetch_one(&self.base.pool)
        .await?)
    }

    pub async fn upsert_manga(
        &self,
        model: &MangaTrackingModel,
    ) -> Result<MangaTrackingModel, DatabaseError> {
        Ok(sqlx::query_as::<_, MangaTrackingModel>(
            r#"
            INSERT INTO manga_trackings (user_id, manga_id, status, score, chapters_read, volumes_read)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (user_id, manga_id) DO UPDATE SET
                status = EXCLUDED.status,
                score = EXCLUDED.score,
                chapters_read = EXCLUDED.chapters_read,
                volumes_read = EXCLUDED.volumes_read,
                updated_at = now()
            RETURNING id, user_id, manga_id, status, score, chapters_read,
                      volumes_read, created_at, updated_at
            "#,
        )
        .bind(model.user_id)
        .bind(model.manga_id)
        .bind(model.status)
        .bind(model.score)
        .bind(model.chapters_read)
        .bind(model.volumes_read)
        .fetch_one(&self.base.pool)
        .await?)
    }

    /// One user's anime list joined with the entries it points at, most
    /// recently updated first. `status` narrows the list when given.
    pub async fn list_anime(
        &self,
        user_id: i64,
        status: Option<WatchStatus>,
    ) -> Result<Vec<TrackedAnimeRow>, DatabaseError> {
        let mut sql = String::from(
            "SELECT t.id, t.anime_id, t.status, t.score, t.episodes_watched, \
             t.updated_at, a.mal_id, a.title, a.image_url, a.episodes, a.airing \
             FROM anime_trackings t \
             JOIN anime a ON a.id = t.anime_id \
             WHERE t.user_id = $1",
        );
        if status.is_some() {
            sql.push_str(" AND t.status = $2");
        }
        sql.push_str(" ORDER BY t.updated_at DESC");

        let mut q = sqlx::query_as::<_, TrackedAnimeRow>(&sql).bind(user_id);
        if let Some(status) = status {
            q = q.bind(status);
        }
        Ok(q.fetch_all(&self.base.pool).await?)
    }

    /// One user's manga list joined with the entries it points at.
    pub async fn list_manga(
        &self,
        user_id: i64,
        status: Option<ReadStatus>,
    ) -> Result<Vec<TrackedMangaRow>, DatabaseError> {
        let mut sql = String::from(
            "SELECT t.id, t.manga_id, t.status, t.score, t.chapters_read, \
             t.volumes_read, t.updated_at, m.mal_id, m.title, m.image_url, \
             m.chapters, m.volumes, m.publishing \
             FROM manga_trackings t \
             JOIN manga m ON m.id = t.manga_id \
             WHERE t.user_id = $1",
        );
        if status.is_some() {
            sql.push_str(" AND t.status = $2");
        }
        sql.push_str(" ORDER BY t.updated_at DESC");

        let mut q = sqlx::query_as::<_, TrackedMangaRow>(&sql).bind(user_id);
        if let Some(status) = status {
            q = q.bind(status);
        }
        Ok(q.fetch_all(&self.base.pool).await?)
    }

    /// Removes one anime tracking. Returns whether a row was deleted.
    pub async fn delete_anime(&self, user_id: i64, anime_id: i64) -> Result<bool, DatabaseError> {
        let result = sqlx::query(
            "DELETE FROM anime_trackings WHERE user_id = $1 AND anime_id = $2",
        )
        .bind(user_id)
        .bind(anime_id)
        .execute(&self.base.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Removes one manga tracking. Returns whether a row was deleted.
    pub async fn delete_manga(&self, user_id: i64, manga_id: i64) -> Result<bool, DatabaseError> {
        let result = sqlx::query(
            "DELETE FROM manga_trackings WHERE user_id = $1 AND manga_id = $2",
        )
        .bind(user_id)
        .bind(manga_id)
        .execute(&self.base.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
