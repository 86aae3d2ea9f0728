use sqlx::PgPool;

use crate::model::CharacterModel;
use crate::repository::BaseTable;
use crate::repository::error::DatabaseError;
use crate::repository::impl_table_base;

const COLUMNS: &str = "id, mal_id, url, name, name_kanji, nicknames, image_url, favorites, \
     about, created_at, updated_at";

#[derive(Clone)]
pub struct CharacterTable {
    base: BaseTable,
}

impl CharacterTable {
    pub fn new(pool: PgPool) -> Self {
        Self {
            base: BaseTable::new(pool),
        }
    }

    /// Inserts or refreshes a fully-enriched character row.
    pub async fn upsert(&self, model: &CharacterModel) -> Result<i64, DatabaseError> {
        let row: (i64,) = sqlx::query_as(
            r#"
            INSERT INTO characters (
                mal_id, url, name, name_kanji, nicknames, image_url, favorites, about
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (mal_id) DO UPDATE SET
                url = EXCLUDED.url,
                name = EXCLUDED.name,
                name_kanji = EXCLUDED.name_kanji,
                nicknames = EXCLUDED.nicknames,
                image_url = EXCLUDED.image_url,
                favorites = EXCLUDED.favorites,
                about = EXCLUDED.about,
                updated_at = now()
            RETURNING id
            "#,
        )
        .bind(model.mal_id)
        .bind(&model.url)
        .bind(&model.name)
        .bind(&model.name_kanji)
        .bind(&model.nicknames)
        .bind(&model.image_url)
        .bind(model.favorites)
        .bind(&model.about)
        .fetch_one(&self.base.pool)
        .await?;
        Ok(row.0)
    }

    /// Inserts a stub row from a cast payload, or touches an existing one.
    ///
    /// Cast payloads only carry name, url and image, so an existing enriched
    /// row keeps its `name_kanji`, `nicknames`, `favorites` and `about`
    /// untouched. The image is only filled in, never cleared.
    pub async fn upsert_ref(
        &self,
        mal_id: i64,
        name: &str,
        url: &str,
        image_url: Option<&str>,
    ) -> Result<i64, DatabaseError> {
        let row: (i64,) = sqlx::query_as(
            r#"
            INSERT INTO characters (mal_id, url, name, image_url)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (mal_id) DO UPDATE SET
                url = EXCLUDED.url,
                name = EXCLUDED.name,
                image_url = COALESCE(EXCLUDED.image_url, characters.image_url),
                updated_at = now()
            RETURNING id
            "#,
        )
        .bind(mal_id)
        .bind(url)
        .bind(name)
        .bind(image_url)
        .fetch_one(&self.base.pool)
        .await?;
        Ok(row.0)
    }

    pub async fn select(&self, id: i64) -> Result<Option<CharacterModel>, DatabaseError> {
        let query = format!("SELECT {COLUMNS} FROM characters WHERE id = $1");
        Ok(sqlx::query_as::<_, CharacterModel>(&query)
            .bind(id)
            .fetch_optional(&self.base.pool)
            .await?)
    }

    pub async fn select_by_mal_id(
        &self,
        mal_id: i64,
    ) -> Result<Option<CharacterModel>, DatabaseError> {
        let query = format!("SELECT {COLUMNS} FROM characters WHERE mal_id = $1");
        Ok(sqlx::query_as::<_, CharacterModel>(&query)
            .bind(mal_id)
            .fetch_optional(&self.base.pool)
            .await?)
    }

    /// Name search ordered by upstream favorites count.
    pub async fn search(
        &self,
        query: Option<&str>,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<CharacterModel>, DatabaseError> {
        let where_clause = if query.is_some() {
            "WHERE name ILIKE $1"
        } else {
            ""
        };
        let (limit_idx, offset_idx) = if query.is_some() { (2, 3) } else { (1, 2) };
        let sql = format!(
            "SELECT {COLUMNS} FROM characters {where_clause} \
             ORDER BY favorites DESC NULLS LAST, mal_id ASC \
             LIMIT ${limit_idx} OFFSET ${offset_idx}"
        );

        let mut q = sqlx::query_as::<_, CharacterModel>(&sql);
        if let Some(text) = query {
            q = q.bind(format!("%{text}%"));
        }
        let limit = per_page as i64;
        let offset = (page.max(1) - 1) as i64 * limit;
        q = q.bind(limit).bind(offset);

        Ok(q.fetch_all(&self.base.pool).await?)
    }

    pub async fn count_search(&self, query: Option<&str>) -> Result<i64, DatabaseError> {
        let mut q = match query {
            Some(_) => sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM characters WHERE name ILIKE $1"),
            None => sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM characters"),
        };
        if let Some(text) = query {
            q = q.bind(format!("%{text}%"));
        }
        Ok(q.fetch_one(&self.base.pool).await?)
    }
}

impl_table_base!(CharacterTable, "characters");
