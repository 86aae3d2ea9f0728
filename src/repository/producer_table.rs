use sqlx::PgPool;

use crate::model::ProducerModel;
use crate::repository::BaseTable;
use crate::repository::error::DatabaseError;
use crate::repository::impl_table_base;

const COLUMNS: &str = "id, mal_id, name, titles, url, image_url, established, favorites, \
     about, count, created_at, updated_at";

#[derive(Clone)]
pub struct ProducerTable {
    base: BaseTable,
}

impl ProducerTable {
    pub fn new(pool: PgPool) -> Self {
        Self {
            base: BaseTable::new(pool),
        }
    }

    /// Inserts or refreshes a fully-enriched producer row.
    pub async fn upsert(&self, model: &ProducerModel) -> Result<i64, DatabaseError> {
        let row: (i64,) = sqlx::query_as(
            r#"
            INSERT INTO producers (
                mal_id, name, titles, url, image_url, established, favorites,
                about, count
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ON CONFLICT (mal_id) DO UPDATE SET
                name = EXCLUDED.name,
                titles = EXCLUDED.titles,
                url = EXCLUDED.url,
                image_url = EXCLUDED.image_url,
                established = EXCLUDED.established,
                favorites = EXCLUDED.favorites,
                about = EXCLUDED.about,
                count = EXCLUDED.count,
                updated_at = now()
            RETURNING id
            "#,
        )
        .bind(model.mal_id)
        .bind(&model.name)
        .bind(&model.titles)
        .bind(&model.url)
        .bind(&model.image_url)
        .bind(model.established)
        .bind(model.favorites)
        .bind(&model.about)
        .bind(model.count)
        .fetch_one(&self.base.pool)
        .await?;
        Ok(row.0)
    }

    /// Stub upsert from an anime payload's producer/licensor/studio arrays.
    ///
    /// Those arrays carry only name and url; enriched columns on an existing
    /// row are left alone.
    pub async fn upsert_ref(
        &self,
        mal_id: i64,
        name: &str,
        url: &str,
    ) -> Result<i64, DatabaseError> {
        let row: (i64,) = sqlx::query_as(
            r#"
            INSERT INTO producers (mal_id, name, url)
            VALUES ($1, $2, $3)
            ON CONFLICT (mal_id) DO UPDATE SET
                name = EXCLUDED.name,
                url = EXCLUDED.url,
                updated_at = now()
            RETURNING id
            "#,
        )
        .bind(mal_id)
        .bind(name)
        .bind(url)
        .fetch_one(&self.base.pool)
        .await?;
        Ok(row.0)
    }

    /// Name search ordered alphabetically.
    pub async fn search(
        &self,
        query: Option<&str>,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<ProducerModel>, DatabaseError> {
        let where_clause = if query.is_some() {
            "WHERE name ILIKE $1"
        } else {
            ""
        };
        let (limit_idx, offset_idx) = if query.is_some() { (2, 3) } else { (1, 2) };
        let sql = format!(
            "SELECT {COLUMNS} FROM producers {where_clause} \
             ORDER BY name ASC, mal_id ASC LIMIT ${limit_idx} OFFSET ${offset_idx}"
        );

        let mut q = sqlx::query_as::<_, ProducerModel>(&sql);
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
            Some(_) => {
                sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM producers WHERE name ILIKE $1")
            }
            None => sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM producers"),
        };
        if let Some(text) = query {
            q = q.bind(format!("%{text}%"));
        }
        Ok(q.fetch_one(&self.base.pool).await?)
    }
}

impl_table_base!(ProducerTable, "producers");
