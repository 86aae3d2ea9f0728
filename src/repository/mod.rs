//! Postgres storage built on SQLx.

use log::debug;
use log::info;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use crate::repository::anime_table::AnimeTable;
use crate::repository::character_table::CharacterTable;
use crate::repository::error::DatabaseError;
use crate::repository::genre_table::GenreTable;
use crate::repository::magazine_table::MagazineTable;
use crate::repository::manga_table::MangaTable;
use crate::repository::people_table::PeopleTable;
use crate::repository::producer_table::ProducerTable;
use crate::repository::progress_table::ProgressTable;
use crate::repository::relation_table::AnimeRelationTable;
use crate::repository::relation_table::MangaRelationTable;
use crate::repository::tracking_table::TrackingTable;
use crate::repository::user_table::UserTable;

pub mod anime_table;
pub mod character_table;
pub mod error;
pub mod genre_table;
pub mod magazine_table;
pub mod manga_table;
pub mod people_table;
pub mod producer_table;
pub mod progress_table;
pub mod relation_table;
pub mod tracking_table;
pub mod user_table;

/// Base table struct providing database pool access.
#[derive(Clone)]
pub struct BaseTable {
    pub pool: PgPool,
}

impl BaseTable {
    /// Creates a new base table with the given pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Base trait for table operations.
#[async_trait::async_trait]
pub trait TableBase {
    /// The table's name in the database.
    fn table_name(&self) -> &'static str;

    /// Returns a handle to the connection pool.
    fn pool(&self) -> &PgPool;

    /// Counts all rows in the table.
    async fn count(&self) -> Result<i64, DatabaseError> {
        let total =
            sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM {}", self.table_name()))
                .fetch_one(self.pool())
                .await?;
        Ok(total)
    }

    /// Deletes all rows from the table.
    async fn delete_all(&self) -> Result<(), DatabaseError> {
        sqlx::query(&format!("DELETE FROM {}", self.table_name()))
            .execute(self.pool())
            .await?;
        Ok(())
    }
}

macro_rules! impl_table_base {
    ($table_struct:ty, $table_name:literal) => {
        #[async_trait::async_trait]
        impl crate::repository::TableBase for $table_struct {
            fn table_name(&self) -> &'static str {
                $table_name
            }

            fn pool(&self) -> &sqlx::PgPool {
                &self.base.pool
            }
        }
    };
}
pub(crate) use impl_table_base;

/// Main storage struct containing all table handlers.
pub struct Repository {
    pool: PgPool,
    pub anime: AnimeTable,
    pub manga: MangaTable,
    pub character: CharacterTable,
    pub people: PeopleTable,
    pub producer: ProducerTable,
    pub genre: GenreTable,
    pub magazine: MagazineTable,
    pub anime_relation: AnimeRelationTable,
    pub manga_relation: MangaRelationTable,
    pub user: UserTable,
    pub tracking: TrackingTable,
    pub progress: ProgressTable,
}

impl Repository {
    /// Connects to the database and initializes table handlers.
    pub async fn new(db_url: &str) -> anyhow::Result<Self> {
        debug!("Connecting to db...");
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(db_url)
            .await?;
        info!("Connected to db.");
        Ok(Self::from_pool(pool))
    }

    /// Wraps an existing pool. Used by tests that bring their own database.
    pub fn from_pool(pool: PgPool) -> Self {
        let anime = AnimeTable::new(pool.clone());
        let manga = MangaTable::new(pool.clone());
        let character = CharacterTable::new(pool.clone());
        let people = PeopleTable::new(pool.clone());
        let producer = ProducerTable::new(pool.clone());
        let genre = GenreTable::new(pool.clone());
        let magazine = MagazineTable::new(pool.clone());
        let anime_relation = AnimeRelationTable::new(pool.clone());
        let manga_relation = MangaRelationTable::new(pool.clone());
        let user = UserTable::new(pool.clone());
        let tracking = TrackingTable::new(pool.clone());
        let progress = ProgressTable::new(pool.clone());

        Self {
            pool,
            anime,
            manga,
            character,
            people,
            producer,
            genre,
            magazine,
            anime_relation,
            manga_relation,
            user,
            tracking,
            progress,
        }
    }

    /// Runs database migrations from the migrations directory.
    pub async fn run_migrations(&self) -> anyhow::Result<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }

    /// Deletes every scraped row and all stored progress. Relation and
    /// tracking rows empty out through `ON DELETE CASCADE`; user accounts
    /// survive.
    pub async fn delete_catalog(&self) -> Result<(), DatabaseError> {
        self.anime.delete_all().await?;
        self.manga.delete_all().await?;
        self.character.delete_all().await?;
        self.people.delete_all().await?;
        self.producer.delete_all().await?;
        self.genre.delete_all().await?;
        self.magazine.delete_all().await?;
        self.progress.delete_all().await?;
        Ok(())
    }
}
