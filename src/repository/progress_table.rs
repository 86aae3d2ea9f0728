use sqlx::PgPool;

use crate::model::ScrapeProgressModel;
use crate::repository::BaseTable;
use crate::repository::error::DatabaseError;
use crate::repository::impl_table_base;

const COLUMNS: &str = "job, last_page, last_mal_id, total_pages, finished, updated_at";

/// Scraper checkpoints, one row per job name.
#[derive(Clone)]
pub struct ProgressTable {
    base: BaseTable,
}

impl ProgressTable {
    pub fn new(pool: PgPool) -> Self {
        Self {
            base: BaseTable::new(pool),
        }
    }

    pub async fn select(&self, job: &str) -> Result<Option<ScrapeProgressModel>, DatabaseError> {
        let query = format!("SELECT {COLUMNS} FROM scrape_progress WHERE job = $1");
        Ok(sqlx::query_as::<_, ScrapeProgressModel>(&query)
            .bind(job)
            .fetch_optional(&self.base.pool)
            .await?)
    }

    pub async fn select_all(&self) -> Result<Vec<ScrapeProgressModel>, DatabaseError> {
        let query = format!("SELECT {COLUMNS} FROM scrape_progress ORDER BY job ASC");
        Ok(sqlx::query_as::<_, ScrapeProgressModel>(&query)
            .fetch_all(&self.base.pool)
            .await?)
    }

    /// Checkpoint for a page-walking job.
    pub async fn record_page(
        &self,
        job: &str,
        last_page: i32,
        total_pages: Option<i32>,
        finished: bool,
    ) -> Result<(), DatabaseError> {
        sqlx::query(
            r#"
            INSERT INTO scrape_progress (job, last_page, total_pages, finished)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (job) DO UPDATE SET
                last_page = EXCLUDED.last_page,
                total_pages = EXCLUDED.total_pages,
                finished = EXCLUDED.finished,
                updated_at = now()
            "#,
        )
        .bind(job)
        .bind(last_page)
        .bind(total_pages)
        .bind(finished)
        .execute(&self.base.pool)
        .await?;
        Ok(())
    }

    /// Checkpoint for a per-entry job walking stored `mal_id`s.
    pub async fn record_mal_id(
        &self,
        job: &str,
        last_mal_id: i64,
        finished: bool,
    ) -> Result<(), DatabaseError> {
        sqlx::query(
            r#"
            INSERT INTO scrape_progress (job, last_mal_id, finished)
            VALUES ($1, $2, $3)
            ON CONFLICT (job) DO UPDATE SET
                last_mal_id = EXCLUDED.last_mal_id,
                finished = EXCLUDED.finished,
                updated_at = now()
            "#,
        )
        .bind(job)
        .bind(last_mal_id)
        .bind(finished)
        .execute(&self.base.pool)
        .await?;
        Ok(())
    }

    /// Drops one job's checkpoint so its next run starts from scratch.
    pub async fn reset(&self, job: &str) -> Result<bool, DatabaseError> {
        let result = sqlx::query("DELETE FROM scrape_progress WHERE job = $1")
            .bind(job)
            .execute(&self.base.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

impl_table_base!(ProgressTable, "scrape_progress");
