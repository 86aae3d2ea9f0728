use sqlx::PgPool;

use crate::model::MangaModel;
use crate::model::MangaSearchOpt;
use crate::model::SearchOrder;
use crate::repository::BaseTable;
use crate::repository::error::DatabaseError;
use crate::repository::impl_table_base;

const COLUMNS: &str = "id, mal_id, url, title, title_english, title_japanese, title_synonyms, \
     image_url, approved, manga_type, chapters, volumes, status, publishing, published_from, \
     published_to, score, scored_by, rank, popularity, members, favorites, synopsis, \
     background, created_at, updated_at";

#[derive(Clone)]
pub struct MangaTable {
    base: BaseTable,
}

impl MangaTable {
    pub fn new(pool: PgPool) -> Self {
        Self {
            base: BaseTable::new(pool),
        }
    }

    /// Inserts or refreshes one manga row, keyed on `mal_id`.
    pub async fn upsert(&self, model: &MangaModel) -> Result<i64, DatabaseError> {
        let row: (i64,) = sqlx::query_as(
            r#"
            INSERT INTO manga (
                mal_id, url, title, title_english, title_japanese, title_synonyms,
                image_url, approved, manga_type, chapters, volumes, status,
                publishing, published_from, published_to, score, scored_by, rank,
                popularity, members, favorites, synopsis, background
            ) VALUES (
                $1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15,
                $16, $17, $18, $19, $20, $21, $22, $23
            )
            ON CONFLICT (mal_id) DO UPDATE SET
                url = EXCLUDED.url,
                title = EXCLUDED.title,
                title_english = EXCLUDED.title_english,
                title_japanese = EXCLUDED.title_japanese,
                title_synonyms = EXCLUDED.title_synonyms,
                image_url = EXCLUDED.image_url,
                approved = EXCLUDED.approved,
                manga_type = EXCLUDED.manga_type,
                chapters = EXCLUDED.chapters,
                volumes = EXCLUDED.volumes,
                status = EXCLUDED.status,
                publishing = EXCLUDED.publishing,
                published_from = EXCLUDED.published_from,
                published_to = EXCLUDED.published_to,
                score = EXCLUDED.score,
                scored_by = EXCLUDED.scored_by,
                rank = EXCLUDED.rank,
                popularity = EXCLUDED.popularity,
                members = EXCLUDED.members,
                favorites = EXCLUDED.favorites,
                synopsis = EXCLUDED.synopsis,
                background = EXCLUDED.background,
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
        .bind(model.approved)
        .bind(&model.manga_type)
        .bind(model.chapters)
        .bind(model.volumes)
        .bind(&model.status)
        .bind(model.publishing)
        .bind(model.published_from)
        .bind(model.published_to)
        .bind(model.score)
        .bind(model.scored_by)
        .bind(model.rank)
        .bind(model.popularity)
        .bind(model.members)
        .bind(model.favorites)
        .bind(&model.synopsis)
        .bind(&model.background)
        .fetch_one(&self.base.pool)
        .await?;
        Ok(row.0)
    }

    pub async fn select(&self, id: i64) -> Result<Option<MangaModel>, DatabaseError> {
        let query = format!("SELECT {COLUMNS} FROM manga WHERE id = $1");
        Ok(sqlx::query_as::<_, MangaModel>(&query)
            .bind(id)
            .fetch_optional(&self.base.pool)
            .await?)
    }

    pub async fn select_by_mal_id(&self, mal_id: i64) -> Result<Option<MangaModel>, DatabaseError> {
        let query = format!("SELECT {COLUMNS} FROM manga WHERE mal_id = $1");
        Ok(sqlx::query_as::<_, MangaModel>(&query)
            .bind(mal_id)
            .fetch_optional(&self.base.pool)
            .await?)
    }

    pub async fn search(&self, opt: &MangaSearchOpt) -> Result<Vec<MangaModel>, DatabaseError> {
        let (where_clause, bind_idx) = Self::where_clause(opt);
        let order = match opt.order_by {
            SearchOrder::Score => "score DESC NULLS LAST",
            SearchOrder::Popularity => "popularity ASC NULLS LAST",
            SearchOrder::Title => "title ASC",
            SearchOrder::Newest => "published_from DESC NULLS LAST",
        };
        let query = format!(
            "SELECT {COLUMNS} FROM manga {where_clause} \
             ORDER BY {order}, mal_id ASC LIMIT ${bind_idx} OFFSET ${offset_idx}",
            offset_idx = bind_idx + 1,
        );

        let mut q = sqlx::query_as::<_, MangaModel>(&query);
        if let Some(ref text) = opt.query {
            q = q.bind(format!("%{text}%"));
        }
        if let Some(genre_id) = opt.genre_id {
            q = q.bind(genre_id);
        }
        if let Some(ref status) = opt.status {
            q = q.bind(status);
        }
        if let Some(ref manga_type) = opt.manga_type {
            q = q.bind(manga_type);
        }

        let limit = opt.per_page as i64;
        let offset = (opt.page.max(1) - 1) as i64 * limit;
        q = q.bind(limit).bind(offset);

        Ok(q.fetch_all(&self.base.pool).await?)
    }

    /// How many rows [`MangaTable::search`] would match without pagination.
    pub async fn count_search(&self, opt: &MangaSearchOpt) -> Result<i64, DatabaseError> {
        let (where_clause, _) = Self::where_clause(opt);
        let query = format!("SELECT COUNT(*) FROM manga {where_clause}");

        let mut q = sqlx::query_scalar::<_, i64>(&query);
        if let Some(ref text) = opt.query {
            q = q.bind(format!("%{text}%"));
        }
        if let Some(genre_id) = opt.genre_id {
            q = q.bind(genre_id);
        }
        if let Some(ref status) = opt.status {
            q = q.bind(status);
        }
        if let Some(ref manga_type) = opt.manga_type {
            q = q.bind(manga_type);
        }

        Ok(q.fetch_one(&self.base.pool).await?)
    }

    /// The next batch of stored `mal_id`s after `last`, in ascending order.
    pub async fn select_mal_ids_after(
        &self,
        last: i64,
        limit: i64,
    ) -> Result<Vec<i64>, DatabaseError> {
        Ok(sqlx::query_scalar::<_, i64>(
            "SELECT mal_id FROM manga WHERE mal_id > $1 ORDER BY mal_id ASC LIMIT $2",
        )
        .bind(last)
        .bind(limit)
        .fetch_all(&self.base.pool)
        .await?)
    }

    fn where_clause(opt: &MangaSearchOpt) -> (String, u32) {
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
                "EXISTS (SELECT 1 FROM manga_genres mg \
                 WHERE mg.manga_id = manga.id AND mg.genre_id = ${bind_idx})"
            ));
            bind_idx += 1;
        }
        if opt.status.is_some() {
            conditions.push(format!("status ILIKE ${bind_idx}"));
            bind_idx += 1;
        }
        if opt.manga_type.is_some() {
            conditions.push(format!("manga_type ILIKE ${bind_idx}"));
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

impl_table_base!(MangaTable, "manga");
