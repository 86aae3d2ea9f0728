use sqlx::PgPool;

use crate::model::GenreKind;
use crate::model::GenreModel;
use crate::repository::BaseTable;
use crate::repository::error::DatabaseError;
use crate::repository::impl_table_base;

const COLUMNS: &str = "id, mal_id, kind, name, url, count, created_at, updated_at";

/// Genres are keyed on `(mal_id, kind)`: the upstream numbering for anime
/// genres and manga genres overlaps.
#[derive(Clone)]
pub struct GenreTable {
    base: BaseTable,
}

impl GenreTable {
    pub fn new(pool: PgPool) -> Self {
        Self {
            base: BaseTable::new(pool),
        }
    }

    pub async fn upsert(&self, model: &GenreModel) -> Result<i64, DatabaseError> {
        let row: (i64,) = sqlx::query_as(
            r#"
            INSERT INTO genres (mal_id, kind, name, url, count)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (mal_id, kind) DO UPDATE SET
                name = EXCLUDED.name,
                url = EXCLUDED.url,
                count = EXCLUDED.count,
                updated_at = now()
            RETURNING id
            "#,
        )
        .bind(model.mal_id)
        .bind(model.kind)
        .bind(&model.name)
        .bind(&model.url)
        .bind(model.count)
        .fetch_one(&self.base.pool)
        .await?;
        Ok(row.0)
    }

    /// Stub upsert from an entry payload's genre arrays, which carry no entry
    /// count. An existing row keeps its `count`.
    pub async fn upsert_ref(
        &self,
        mal_id: i64,
        kind: GenreKind,
        name: &str,
        url: &str,
    ) -> Result<i64, DatabaseError> {
        let row: (i64,) = sqlx::query_as(
            r#"
            INSERT INTO genres (mal_id, kind, name, url)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (mal_id, kind) DO UPDATE SET
                name = EXCLUDED.name,
                url = EXCLUDED.url,
                updated_at = now()
            RETURNING id
            "#,
        )
        .bind(mal_id)
        .bind(kind)
        .bind(name)
        .bind(url)
        .fetch_one(&self.base.pool)
        .await?;
        Ok(row.0)
    }

    pub async fn select_by_mal_id(
        &self,
        mal_id: i64,
        kind: GenreKind,
    ) -> Result<Option<GenreModel>, DatabaseError> {
        let query = format!("SELECT {COLUMNS} FROM genres WHERE mal_id = $1 AND kind = $2");
        Ok(sqlx::query_as::<_, GenreModel>(&query)
            .bind(mal_id)
            .bind(kind)
            .fetch_optional(&self.base.pool)
            .await?)
    }

    pub async fn select_all(&self, kind: Option<GenreKind>) -> Result<Vec<GenreModel>, DatabaseError> {
        match kind {
            Some(kind) => {
                let query = format!("SELECT {COLUMNS} FROM genres WHERE kind = $1 ORDER BY name ASC");
                Ok(sqlx::query_as::<_, GenreModel>(&query)
                    .bind(kind)
                    .fetch_all(&self.base.pool)
                    .await?)
            }
            None => {
                let query = format!("SELECT {COLUMNS} FROM genres ORDER BY kind ASC, name ASC");
                Ok(sqlx::query_as::<_, GenreModel>(&query)
                    .fetch_all(&self.base.pool)
                    .await?)
            }
        }
    }
}

impl_table_base!(GenreTable, "genres");
