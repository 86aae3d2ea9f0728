use sqlx::PgPool;

use crate::model::PersonModel;
use crate::repository::BaseTable;
use crate::repository::error::DatabaseError;
use crate::repository::impl_table_base;

const COLUMNS: &str = "id, mal_id, url, website_url, name, given_name, family_name, \
     alternate_names, birthday, image_url, favorites, about, created_at, updated_at";

#[derive(Clone)]
pub struct PeopleTable {
    base: BaseTable,
}

impl PeopleTable {
    pub fn new(pool: PgPool) -> Self {
        Self {
            base: BaseTable::new(pool),
        }
    }

    /// Inserts or refreshes a fully-enriched person row.
    pub async fn upsert(&self, model: &PersonModel) -> Result<i64, DatabaseError> {
        let row: (i64,) = sqlx::query_as(
            r#"
            INSERT INTO people (
                mal_id, url, website_url, name, given_name, family_name,
                alternate_names, birthday, image_url, favorites, about
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            ON CONFLICT (mal_id) DO UPDATE SET
                url = EXCLUDED.url,
                website_url = EXCLUDED.website_url,
                name = EXCLUDED.name,
                given_name = EXCLUDED.given_name,
                family_name = EXCLUDED.family_name,
                alternate_names = EXCLUDED.alternate_names,
                birthday = EXCLUDED.birthday,
                image_url = EXCLUDED.image_url,
                favorites = EXCLUDED.favorites,
                about = EXCLUDED.about,
                updated_at = now()
            RETURNING id
            "#,
        )
        .bind(model.mal_id)
        .bind(&model.url)
        .bind(&model.website_url)
        .bind(&model.name)
        .bind(&model.given_name)
        .bind(&model.family_name)
        .bind(&model.alternate_names)
        .bind(model.birthday)
        .bind(&model.image_url)
        .bind(model.favorites)
        .bind(&model.about)
        .fetch_one(&self.base.pool)
        .await?;
        Ok(row.0)
    }

    /// Stub upsert from a voice-actor or author payload.
    ///
    /// Enriched columns on an existing row are left alone; the image is only
    /// filled in, never cleared.
    pub async fn upsert_ref(
        &self,
        mal_id: i64,
        name: &str,
        url: &str,
        image_url: Option<&str>,
    ) -> Result<i64, DatabaseError> {
        let row: (i64,) = sqlx::query_as(
            r#"
            INSERT INTO people (mal_id, url, name, image_url)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (mal_id) DO UPDATE SET
                url = EXCLUDED.url,
                name = EXCLUDED.name,
                image_url = COALESCE(EXCLUDED.image_url, people.image_url),
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

    pub async fn select(&self, id: i64) -> Result<Option<PersonModel>, DatabaseError> {
        let query = format!("SELECT {COLUMNS} FROM people WHERE id = $1");
        Ok(sqlx::query_as::<_, PersonModel>(&query)
            .bind(id)
            .fetch_optional(&self.base.pool)
            .await?)
    }

    pub async fn select_by_mal_id(
        &self,
        mal_id: i64,
    ) -> Result<Option<PersonModel>, DatabaseError> {
        let query = format!("SELECT {COLUMNS} FROM people WHERE mal_id = $1");
        Ok(sqlx::query_as::<_, PersonModel>(&query)
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
    ) -> Result<Vec<PersonModel>, DatabaseError> {
        let where_clause = if query.is_some() {
            "WHERE name ILIKE $1"
        } else {
            ""
        };
        let (limit_idx, offset_idx) = if query.is_some() { (2, 3) } else { (1, 2) };
        let sql = format!(
            "SELECT {COLUMNS} FROM people {where_clause} \
             ORDER BY favorites DESC NULLS LAST, mal_id ASC \
             LIMIT ${limit_idx} OFFSET ${offset_idx}"
        );

        let mut q = sqlx::query_as::<_, PersonModel>(&sql);
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
                sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM people WHERE name ILIKE $1")
            }
            None => sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM people"),
        };
        if let Some(text) = query {
            q = q.bind(format!("%{text}%"));
        }
        Ok(q.fetch_one(&self.base.pool).await?)
    }
}

impl_table_base!(PeopleTable, "people");
