use chrono::DateTime;
use chrono::Utc;
use derive_builder::Builder;
use serde::Deserialize;
use serde::Serialize;
use sqlx::FromRow;
use sqlx::types::Json;

/// Which catalog a genre belongs to.
///
/// MyAnimeList numbers anime and manga genres independently, so the same
/// `mal_id` can mean two different genres. Rows are therefore unique on
/// `(mal_id, kind)` rather than `mal_id` alone.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, Default, PartialEq, Eq)]
#[sqlx(type_name = "genre_kind", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum GenreKind {
    #[default]
    Anime,
    Manga,
}

/// Which of the four genre arrays a relation came from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, Default, PartialEq, Eq)]
#[sqlx(type_name = "genre_role", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum GenreRole {
    #[default]
    Genre,
    ExplicitGenre,
    Theme,
    Demographic,
}

/// How a company is involved with an anime.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, Default, PartialEq, Eq)]
#[sqlx(type_name = "producer_role", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ProducerRole {
    #[default]
    Producer,
    Licensor,
    Studio,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, Default, PartialEq, Eq)]
#[sqlx(type_name = "watch_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum WatchStatus {
    Watching,
    Completed,
    OnHold,
    Dropped,
    #[default]
    PlanToWatch,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, Default, PartialEq, Eq)]
#[sqlx(type_name = "read_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ReadStatus {
    Reading,
    Completed,
    OnHold,
    Dropped,
    #[default]
    PlanToRead,
}

/// An anime row mirrored from the Jikan catalog.
///
/// Columns follow the upstream payload one-to-one; `mal_id` is the upstream
/// identity and `id` the internal key every relation table points at.
/// Re-ingesting the same payload only moves `updated_at`.
#[derive(FromRow, Serialize, Default, Clone, Debug)]
pub struct AnimeModel {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub mal_id: i64,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub title_english: Option<String>,
    #[serde(default)]
    pub title_japanese: Option<String>,
    #[serde(default)]
    pub title_synonyms: Json<Vec<String>>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub trailer_url: Option<String>,
    #[serde(default)]
    pub approved: bool,
    /// Media format (e.g., "TV", "Movie", "OVA")
    #[serde(default)]
    pub anime_type: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub episodes: Option<i32>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub airing: bool,
    #[serde(default)]
    pub aired_from: Option<DateTime<Utc>>,
    #[serde(default)]
    pub aired_to: Option<DateTime<Utc>>,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub rating: Option<String>,
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub scored_by: Option<i64>,
    #[serde(default)]
    pub rank: Option<i64>,
    #[serde(default)]
    pub popularity: Option<i64>,
    #[serde(default)]
    pub members: Option<i64>,
    #[serde(default)]
    pub favorites: Option<i64>,
    #[serde(default)]
    pub synopsis: Option<String>,
    #[serde(default)]
    pub background: Option<String>,
    #[serde(default)]
    pub season: Option<String>,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub broadcast_day: Option<String>,
    #[serde(default)]
    pub broadcast_time: Option<String>,
    #[serde(default)]
    pub broadcast_timezone: Option<String>,
    #[serde(default)]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: DateTime<Utc>,
}

/// A manga row mirrored from the Jikan catalog.
#[derive(FromRow, Serialize, Default, Clone, Debug)]
pub struct MangaModel {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub mal_id: i64,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub title_english: Option<String>,
    #[serde(default)]
    pub title_japanese: Option<String>,
    #[serde(default)]
    pub title_synonyms: Json<Vec<String>>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub approved: bool,
    /// Media format (e.g., "Manga", "Novel", "One-shot")
    #[serde(default)]
    pub manga_type: Option<String>,
    #[serde(default)]
    pub chapters: Option<i32>,
    #[serde(default)]
    pub volumes: Option<i32>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub publishing: bool,
    #[serde(default)]
    pub published_from: Option<DateTime<Utc>>,
    #[serde(default)]
    pub published_to: Option<DateTime<Utc>>,
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub scored_by: Option<i64>,
    #[serde(default)]
    pub rank: Option<i64>,
    #[serde(default)]
    pub popularity: Option<i64>,
    #[serde(default)]
    pub members: Option<i64>,
    #[serde(default)]
    pub favorites: Option<i64>,
    #[serde(default)]
    pub synopsis: Option<String>,
    #[serde(default)]
    pub background: Option<String>,
    #[serde(default)]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: DateTime<Utc>,
}

#[derive(FromRow, Serialize, Default, Clone, Debug)]
pub struct CharacterModel {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub mal_id: i64,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub name_kanji: Option<String>,
    #[serde(default)]
    pub nicknames: Json<Vec<String>>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub favorites: Option<i64>,
    #[serde(default)]
    pub about: Option<String>,
    #[serde(default)]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: DateTime<Utc>,
}

/// A voice actor, staff member, or author.
#[derive(FromRow, Serialize, Default, Clone, Debug)]
pub struct PersonModel {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub mal_id: i64,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub website_url: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub given_name: Option<String>,
    #[serde(default)]
    pub family_name: Option<String>,
    #[serde(default)]
    pub alternate_names: Json<Vec<String>>,
    #[serde(default)]
    pub birthday: Option<DateTime<Utc>>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub favorites: Option<i64>,
    #[serde(default)]
    pub about: Option<String>,
    #[serde(default)]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: DateTime<Utc>,
}

/// A studio, producer, or licensor company.
#[derive(FromRow, Serialize, Default, Clone, Debug)]
pub struct ProducerModel {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub mal_id: i64,
    /// Default display title; the full set lives in `titles`.
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub titles: Json<Vec<ProducerTitle>>,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub established: Option<DateTime<Utc>>,
    #[serde(default)]
    pub favorites: Option<i64>,
    #[serde(default)]
    pub about: Option<String>,
    #[serde(default)]
    pub count: Option<i32>,
    #[serde(default)]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Default, Clone, Debug)]
pub struct ProducerTitle {
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
}

#[derive(FromRow, Serialize, Default, Clone, Debug)]
pub struct GenreModel {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub mal_id: i64,
    #[serde(default)]
    pub kind: GenreKind,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub url: String,
    /// Number of entries tagged with this genre upstream.
    #[serde(default)]
    pub count: Option<i32>,
    #[serde(default)]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: DateTime<Utc>,
}

#[derive(FromRow, Serialize, Default, Clone, Debug)]
pub struct MagazineModel {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub mal_id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub count: Option<i32>,
    #[serde(default)]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: DateTime<Utc>,
}

/// A registered account. The password hash never leaves the server.
#[derive(FromRow, Serialize, Default, Clone, Debug)]
pub struct UserModel {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, skip_serializing)]
    pub password_hash: String,
    #[serde(default)]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: DateTime<Utc>,
}

/// One user's state for one anime.
#[derive(FromRow, Serialize, Default, Clone, Debug)]
pub struct AnimeTrackingModel {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub user_id: i64,
    #[serde(default)]
    pub anime_id: i64,
    #[serde(default)]
    pub status: WatchStatus,
    #[serde(default)]
    pub score: Option<i32>,
    #[serde(default)]
    pub episodes_watched: i32,
    #[serde(default)]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: DateTime<Utc>,
}

/// One user's state for one manga.
#[derive(FromRow, Serialize, Default, Clone, Debug)]
pub struct MangaTrackingModel {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub user_id: i64,
    #[serde(default)]
    pub manga_id: i64,
    #[serde(default)]
    pub status: ReadStatus,
    #[serde(default)]
    pub score: Option<i32>,
    #[serde(default)]
    pub chapters_read: i32,
    #[serde(default)]
    pub volumes_read: i32,
    #[serde(default)]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: DateTime<Utc>,
}

/// Checkpoint row for one scraper job.
#[derive(FromRow, Serialize, Default, Clone, Debug)]
pub struct ScrapeProgressModel {
    #[serde(default)]
    pub job: String,
    #[serde(default)]
    pub last_page: i32,
    #[serde(default)]
    pub last_mal_id: i64,
    #[serde(default)]
    pub total_pages: Option<i32>,
    #[serde(default)]
    pub finished: bool,
    #[serde(default)]
    pub updated_at: DateTime<Utc>,
}

/// Genre joined through a relation table, carrying which array it came from.
#[derive(FromRow, Serialize, Clone, Debug)]
pub struct GenreWithRoleRow {
    pub id: i64,
    pub mal_id: i64,
    pub name: String,
    pub url: String,
    pub role: GenreRole,
}

#[derive(FromRow, Serialize, Clone, Debug)]
pub struct ProducerWithRoleRow {
    pub id: i64,
    pub mal_id: i64,
    pub name: String,
    pub url: String,
    pub role: ProducerRole,
}

/// Cast entry joined through `anime_characters` / `manga_characters`.
#[derive(FromRow, Serialize, Clone, Debug)]
pub struct CastCharacterRow {
    pub character_id: i64,
    pub mal_id: i64,
    pub name: String,
    pub image_url: Option<String>,
    pub role: String,
}

#[derive(FromRow, Serialize, Clone, Debug)]
pub struct CastVoiceActorRow {
    pub character_id: i64,
    pub person_id: i64,
    pub mal_id: i64,
    pub name: String,
    pub image_url: Option<String>,
    pub language: String,
}

/// Tracking entry joined with the anime it points at.
#[derive(FromRow, Serialize, Clone, Debug)]
pub struct TrackedAnimeRow {
    // Tracking fields
    pub id: i64,
    pub anime_id: i64,
    pub status: WatchStatus,
    pub score: Option<i32>,
    pub episodes_watched: i32,
    pub updated_at: DateTime<Utc>,

    // Anime fields
    pub mal_id: i64,
    pub title: String,
    pub image_url: Option<String>,
    pub episodes: Option<i32>,
    pub airing: bool,
}

/// Tracking entry joined with the manga it points at.
#[derive(FromRow, Serialize, Clone, Debug)]
pub struct TrackedMangaRow {
    // Tracking fields
    pub id: i64,
    pub manga_id: i64,
    pub status: ReadStatus,
    pub score: Option<i32>,
    pub chapters_read: i32,
    pub volumes_read: i32,
    pub updated_at: DateTime<Utc>,

    // Manga fields
    pub mal_id: i64,
    pub title: String,
    pub image_url: Option<String>,
    pub chapters: Option<i32>,
    pub volumes: Option<i32>,
    pub publishing: bool,
}

/// One broadcast season present in the catalog.
#[derive(FromRow, Serialize, Clone, Debug)]
pub struct SeasonRow {
    pub year: i32,
    pub season: String,
    pub count: i64,
}

#[derive(Builder, Clone, Default)]
#[builder(pattern = "immutable", default)]
pub struct AnimeSearchOpt {
    pub query: Option<String>,
    pub genre_id: Option<i64>,
    pub season: Option<String>,
    pub year: Option<i32>,
    pub status: Option<String>,
    pub anime_type: Option<String>,
    pub order_by: SearchOrder,
    pub page: u32,
    pub per_page: u32,
}

#[derive(Builder, Clone, Default)]
#[builder(pattern = "immutable", default)]
pub struct MangaSearchOpt {
    pub query: Option<String>,
    pub genre_id: Option<i64>,
    pub status: Option<String>,
    pub manga_type: Option<String>,
    pub order_by: SearchOrder,
    pub page: u32,
    pub per_page: u32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SearchOrder {
    Score,
    #[default]
    Popularity,
    Title,
    Newest,
}
