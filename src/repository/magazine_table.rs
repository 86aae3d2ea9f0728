use sqlx::PgPool;

use crate::model::MagazineModel;
use crate::repository::BaseTable;
use crate::repository::error::DatabaseError;
use crate::repository::impl_table_base;

const COLUMNS: &str = "id, mal_id, name, url, count, created_at, updated_at";

#[derive(Clone)]
pub struct MagazineTable {
    base: BaseTable,
}

impl MagazineTable {
    pub fn new(pool: PgPool) -> Self {
        Self {
            base: BaseTable::new(pool),
        }
    }

    pub async fn upsert(&self, model: &MagazineModel) -> Result<i64, DatabaseError> {
        let row: (i64,) = sqlx::query_as(
            r#"
            INSERT INTO magazines (mal_id, name, url, count)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (mal_id) DO UPDATE SET
                name = EXCLUDED.name,
                url = EXCLUDED.url,
                count = EXCLUDED.count,
                updated_at = now()
            RETURNING id
            "#,
        )
        .bind(model.mal_id)
        .bind(&model.name)
        .bind(&model.url)
        .bind(model.count)
        .fetch_one(&self.base.pool)
        .await?;
        Ok(row.0)
    }

    /// Stub upsert from a manga payload's serializations array, which has no
    /// entry count.
    pub async fn upsert_ref(
        &self,
        mal_id: i64,
        name: &str,
        url: &str,
    ) -> Result<i64, DatabaseError> {
        let row: (i64,) = sqlx::query_as(
            r#"
            INSERT INTO magazines (mal_id, name, url)
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
    ) -> Result<Vec<MagazineModel>, DatabaseError> {
        let where_clause = if query.is_some() {
            "WHERE name ILIKE $1"
        } else {
            ""
        };
        let (limit_idx, offset_idx) = if query.is_some() { (2, 3) } else { (1, 2) };
        let sql = format!(
            "SELECT {COLUMNS} FROM magazines {where_clause} \
             ORDER BY name ASC, mal_id ASC LIMIT ${limit_idx} OFFSET ${offset_idx}"
        );

        let mut q = sqlx::query_as::<_, MagazineModel>(&sql);
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
                sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM magazines WHERE name ILIKE $1")
            }
            None => sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM magazines"),
        };
        if let Some(text) = query {
            q = q.bind(format!("%{text}%"));
        }
        Ok(q.fetch_one(&self.base.pool).await?)
    }
}

impl_table_base!(MagazineTable, "magazines");
