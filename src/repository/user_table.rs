use sqlx::PgPool;

use crate::model::UserModel;
use crate::repository::BaseTable;
use crate::repository::error::DatabaseError;
use crate::repository::impl_table_base;

const COLUMNS: &str = "id, username, email, password_hash, created_at, updated_at";

#[derive(Clone)]
pub struct UserTable {
    base: BaseTable,
}

impl UserTable {
    pub fn new(pool: PgPool) -> Self {
        Self {
            base: BaseTable::new(pool),
        }
    }

    /// Inserts a new account. A duplicate username or email surfaces as a
    /// unique-violation [`DatabaseError`]; callers match on the constraint
    /// name to tell the two apart.
    pub async fn insert(
        &self,
        username: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<UserModel, DatabaseError> {
        let query = format!(
            "INSERT INTO users (username, email, password_hash) \
             VALUES ($1, $2, $3) RETURNING {COLUMNS}"
        );
        Ok(sqlx::query_as::<_, UserModel>(&query)
            .bind(username)
            .bind(email)
            .bind(password_hash)
            .fetch_one(&self.base.pool)
            .await?)
    }

    pub async fn select(&self, id: i64) -> Result<Option<UserModel>, DatabaseError> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        Ok(sqlx::query_as::<_, UserModel>(&query)
            .bind(id)
            .fetch_optional(&self.base.pool)
            .await?)
    }

    pub async fn select_by_username(
        &self,
        username: &str,
    ) -> Result<Option<UserModel>, DatabaseError> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE username = $1");
        Ok(sqlx::query_as::<_, UserModel>(&query)
            .bind(username)
            .fetch_optional(&self.base.pool)
            .await?)
    }

    pub async fn select_by_email(&self, email: &str) -> Result<Option<UserModel>, DatabaseError> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE email = $1");
        Ok(sqlx::query_as::<_, UserModel>(&query)
            .bind(email)
            .fetch_optional(&self.base.pool)
            .await?)
    }
}

impl_table_base!(UserTable, "users");
