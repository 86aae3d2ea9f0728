use sqlx::PgPool;

use crate::model::AnimeModel;
use crate::model::AnimeSearchOpt;
use crate::model::SearchOrder;
use crate::model::SeasonRow;
use crate::repository::BaseTable;
use crate::repository::error::DatabaseError;
use crate::repository::impl_table_base;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, mal_id, url, title, title_english, title_japanese, title_synonyms, \
     image_url, trailer_url, approved, anime_type, source, episodes, status, airing, \
     aired_from, aired_to, duration, rating, score, scored_by, rank, popularity, members, \
     favorites, synopsis, background, season, year, broadcast_day, broadcast_time, \
     broadcast_timezone, created_at, updated_at";

#[derive(Clone)]
pub struct AnimeTable {
    base: BaseTable,
}

impl AnimeTable {
    pub fn new(pool: PgPool) -> Self {
        Self {
            base: BaseTable::new(pool),
        }
    }

    /// Inserts or refreshes one anime row, keyed on `mal_id`.
    ///
    /// Re-ingesting the same payload leaves the row unchanged apart from
    /// `updated_at`. Returns the internal id relation rows point at.
    pub async fn upsert(&self, model: &AnimeModel) -> Result<i64, DatabaseError> {
        let row: (i64,) = sqlx::query_as(
            r#"
            INSERT INTO anime (
                mal_id, url, title, title_english, title_japanese, title_synonyms,
                image_url, trailer_url, approved, anime_type, source, episodes,
                status, airing, aired_from, aired_to, duration, rating, score,
                scored_by, rank, popularity, members, favorites, synopsis,
                background, season, year, broadcast_day, broadcast_time,
                broadcast_timezone
            ) VALUES (
                $1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15,
                $16, $17, $18, $19, $20, $21, $22, $23, $24, $25, $26, $27, $28,
                $29, $30, $31
            )
            ON CONFLICT (mal_id) DO UPDATE SET
                url = EXCLUDED.url,
                title = EXCLUDED.title,
                title_english = EXCLUDED.title_english,
                title_japanese = EXCLUDED.title_japanese,
                title_synonyms = EXCLUDED.title_synonyms,
                image_url = EXCLUDED.image_url,
                trailer_url = EXCLUDED.trailer_url,
                approved = EXCLUDED.approved,
                anime_type = EXCLUDED.anime_type,
                source = EXCLUDED.source,
                episodes = EXCLUDED.episodes,
                status = EXCLUDED.status,
                airing = EXCLUDED.airing,
                aired_from = EXCLUDED.aired_from,
                aired_to = EXCLUDED.aired_to,
                duration = EXCLUDED.duration,
                rating = EXCLUDED.rating,
                score = EXCLUDED.score,
                scored_by = EXCLUDED.scored_by,
                rank = EXCLUDED.rank,
                popularity = EXCLUDED.popularity,
                members = EXCLUDED.members,
                favorites = EXCLUDED.favorites,
                synopsis = EXCLUDED.synopsis,
                background = EXCLUDED.background,
                season = EXCLUDED.season,
                year = EXCLUDED.year,
                broadcast_day = EXCLUDED.broadcast_day,
                broadcast_time = EXCLUDED.broadcast_time,
                broadcast_timezone = EXCLUDED.broadcast_timezone,
                updated_at = now()
            RETURNING id
            "#,
        )
        .bind(model.mal_id)
        .bind(&model.url)
        .bind(&model.title)
        .bind(&model.title_english)
        .bind(&model.title_japanese)
        .bind(&model.title_synonyms)
        .bind(&model.image_url)
        .bind(&model.trailer_url)
        .bind(model.approved)
        .bind(&model.anime_type)
        .bind(&model.source)
        .bind(model.episodes)
        .bind(&model.status)
        .bind(model.airing)
        .bind(model.aired_from)
        .bind(model.aired_to)
        .bind(&model.duration)
        .bind(&model.rating)
        .bind(model.score)
        .bind(model.scored_by)
        .bind(model.rank)
        .bind(model.popularity)
        .bind(model.members)
        .bind(model.favorites)
        .bind(&model.synopsis)
        .bind(&model.background)
        .bind(&model.season)
        .bind(model.year)
        .bind(&model.broadcast_day)
        .bind(&model.broadcast_time)
        .bind(&model.broadcast_timezone)
        .fetch_one(&self.base.pool)
        .await?;
        Ok(row.0)
    }

    pub async fn select(&self, id: i64) -> Result<Option<AnimeModel>, DatabaseError> {
        let query = format!("SELECT {COLUMNS} FROM anime WHERE id = $1");
        Ok(sqlx::query_as::<_, AnimeModel>(&query)
            .bind(id)
            .fetch_optional(&self.base.pool)
            .await?)
    }

    pub async fn select_by_mal_id(&self, mal_id: i64) -> Result<Option<AnimeModel>, DatabaseError> {
        let query = format!("SELECT {COLUMNS} FROM anime WHERE mal_id = $1");
        Ok(sqlx::query_as::<_, AnimeModel>(&query)
            .bind(mal_id)
            .fetch_optional(&self.base.pool)
            .await?)
    }

    pub async fn search(&self, opt: &AnimeSearchOpt) -> Result<Vec<AnimeModel>, DatabaseError> {
        let (where_clause, bind_idx) = Self::where_clause(opt);
        let order = match opt.order_by {
            SearchOrder::Score => "score DESC NULLS LAST",
            SearchOrder::Popularity => "popularity ASC NULLS LAST",
            SearchOrder::Title => "title ASC",
            SearchOrder::Newest => "aired_from DESC NULLS LAST",
        };
        let query = format!(
            "SELECT {COLUMNS} FROM anime {where_clause} \
             ORDER BY {order}, mal_id ASC LIMIT ${bind_idx} OFFSET ${offset_idx}",
            offset_idx = bind_idx + 1,
        );

        let mut q = sqlx::query_as::<_, AnimeModel>(&query);
        if let Some(ref text) = opt.query {
            q = q.bind(format!("%{text}%"));
        }
        if let Some(genre_id) = opt.genre_id {
            q = q.bind(genre_id);
        }
        if let Some(ref season) = opt.season {
            q = q.bind(season);
        }
        if let Some(year) = opt.year {
            q = q.bind(year);
        }
        if let Some(ref status) = opt.status {
            q = q.bind(status);
        }
        if let Some(ref anime_type) = opt.anime_type {
            q = q.bind(anime_type);
        }

        let limit = opt.per_page as i64;
        let offset = (opt.page.max(1) - 1) as i64 * limit;
        q = q.bind(limit).bind(offset);

        Ok(q.fetch_all(&self.base.pool).await?)
    }

    /// How many rows [`AnimeTable::search`] would match without pagination.
    pub async fn count_search(&self, opt: &AnimeSearchOpt) -> Result<i64, DatabaseError> {
        let (where_clause, _) = Self::where_clause(opt);
        let query = format!("SELECT COUNT(*) FROM anime {where_clause}");

        let mut q = sqlx::query_scalar::<_, i64>(&query);
        if let Some(ref text) = opt.query {
            q = q.bind(format!("%{text}%"));
        }
        if let Some(genre_id) = opt.genre_id {
            q = q.bind(genre_id);
        }
        if let Some(ref season) = opt.season {
            q = q.bind(season);
        }
        if let Some(year) = opt.year {
            q = q.bind(year);
        }
        if let Some(ref status) = opt.status {
            q = q.bind(status);
        }
        if let Some(ref anime_type) = opt.anime_type {
            q = q.bind(anime_type);
        }

        Ok(q.fetch_one(&self.base.pool).await?)
    }

    /// Every `(year, season)` pair present in the catalog, newest first.
    pub async fn seasons(&self) -> Result<Vec<SeasonRow>, DatabaseError> {
        Ok(sqlx::query_as::<_, SeasonRow>(
            r#"
            SELECT year, season, COUNT(*) AS count
            FROM anime
            WHERE year IS NOT NULL AND season IS NOT NULL
            GROUP BY year, season
            ORDER BY year DESC,
                CASE season
                    WHEN 'winter' THEN 0
                    WHEN 'spring' THEN 1
                    WHEN 'summer' THEN 2
                    WHEN 'fall' THEN 3
                    ELSE 4
                END DESC
            "#,
        )
        .fetch_all(&self.base.pool)
        .await?)
    }

    /// The next batch of stored `mal_id`s after `last`, in ascending order.
    ///
    /// Drives the per-entry cast walk, which checkpoints on `mal_id` rather
    /// than on a page number.
    pub async fn select_mal_ids_after(
        &self,
        last: i64,
        limit: i64,
    ) -> Result<Vec<i64>, DatabaseError> {
        Ok(sqlx::query_scalar::<_, i64>(
            "SELECT mal_id FROM anime WHERE mal_id > $1 ORDER BY mal_id ASC LIMIT $2",
        )
        .bind(last)
        .bind(limit)
        .fetch_all(&self.base.pool)
        .await?)
    }

    fn where_clause(opt: &AnimeSearchOpt) -> (String, u32) {
        let mut conditions = Vec::new();
        let mut bind_idx = 1u32;

        if opt.query.is_some() {
            conditions.push(format!(
                "(title ILIKE ${bind_idx} OR title_english ILIKE ${bind_idx})"
            ));
            bind_idx += 1;
        }
        if opt.genre_id.is_some() {
            conditions.push(format!(
                "EXISTS (SELECT 1 FROM anime_genres ag \
                 WHERE ag.anime_id = anime.id AND ag.genre_id = ${bind_idx})"
            ));
            bind_idx += 1;
        }
        if opt.season.is_some() {
            conditions.push(format!("season ILIKE ${bind_idx}"));
            bind_idx += 1;
        }
        if opt.year.is_some() {
            conditions.push(format!("year = ${bind_idx}"));
            bind_idx += 1;
        }
        if opt.status.is_some() {
            conditions.push(format!("status ILIKE ${bind_idx}"));
            bind_idx += 1;
        }
        if opt.anime_type.is_some() {
            conditions.push(format!("anime_type ILIKE ${bind_idx}"));
            bind_idx += 1;
        }

        let clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };
        (clause, bind_idx)
    }
}

impl_table_base!(AnimeTable, "anime");
