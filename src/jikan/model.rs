//! Typed views of Jikan v4 response payloads.
//!
//! Every list endpoint wraps its data in the same envelope, so the shapes
//! here are generic over the entity payload. Fields the pipeline does not
//! store are left out; serde ignores them on deserialization.

use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;

/// The standard Jikan envelope: `{ "pagination": ..., "data": [...] }`.
///
/// Unpaginated endpoints (genres, per-entry character lists) omit the
/// `pagination` object.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct JikanPage<T> {
    #[serde(default)]
    pub pagination: Option<JikanPagination>,
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct JikanPagination {
    #[serde(default)]
    pub last_visible_page: i32,
    #[serde(default)]
    pub has_next_page: bool,
    #[serde(default)]
    pub current_page: i32,
}

/// Embedded reference to another catalog entity
/// (`{ "mal_id": 1, "name": ..., "url": ... }`).
#[derive(Debug, Clone, Deserialize, Default)]
pub struct MalEntry {
    pub mal_id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct JikanImages {
    #[serde(default)]
    pub jpg: Option<JikanImageSet>,
    #[serde(default)]
    pub webp: Option<JikanImageSet>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct JikanImageSet {
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub small_image_url: Option<String>,
    #[serde(default)]
    pub large_image_url: Option<String>,
}

impl JikanImages {
    /// Preferred display image: jpg first, webp as fallback.
    pub fn display_url(&self) -> Option<String> {
        self.jpg
            .as_ref()
            .and_then(|set| set.image_url.clone())
            .or_else(|| self.webp.as_ref().and_then(|set| set.image_url.clone()))
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct JikanTrailer {
    #[serde(default)]
    pub youtube_id: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub embed_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct JikanDateRange {
    #[serde(default)]
    pub from: Option<DateTime<Utc>>,
    #[serde(default)]
    pub to: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct JikanBroadcast {
    #[serde(default)]
    pub day: Option<String>,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub timezone: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct JikanTitle {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub title: String,
}

/// One entry from `/anime`.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AnimeData {
    pub mal_id: i64,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub images: Option<JikanImages>,
    #[serde(default)]
    pub trailer: Option<JikanTrailer>,
    #[serde(default)]
    pub approved: bool,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub title_english: Option<String>,
    #[serde(default)]
    pub title_japanese: Option<String>,
    #[serde(default)]
    pub title_synonyms: Vec<String>,
    #[serde(rename = "type", default)]
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
    pub aired: Option<JikanDateRange>,
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
    pub broadcast: Option<JikanBroadcast>,
    #[serde(default)]
    pub producers: Vec<MalEntry>,
    #[serde(default)]
    pub licensors: Vec<MalEntry>,
    #[serde(default)]
    pub studios: Vec<MalEntry>,
    #[serde(default)]
    pub genres: Vec<MalEntry>,
    #[serde(default)]
    pub explicit_genres: Vec<MalEntry>,
    #[serde(default)]
    pub themes: Vec<MalEntry>,
    #[serde(default)]
    pub demographics: Vec<MalEntry>,
}

/// One entry from `/manga`.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct MangaData {
    pub mal_id: i64,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub images: Option<JikanImages>,
    #[serde(default)]
    pub approved: bool,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub title_english: Option<String>,
    #[serde(default)]
    pub title_japanese: Option<String>,
    #[serde(default)]
    pub title_synonyms: Vec<String>,
    #[serde(rename = "type", default)]
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
    pub published: Option<JikanDateRange>,
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
    pub authors: Vec<MalEntry>,
    #[serde(default)]
    pub serializations: Vec<MalEntry>,
    #[serde(default)]
    pub genres: Vec<MalEntry>,
    #[serde(default)]
    pub explicit_genres: Vec<MalEntry>,
    #[serde(default)]
    pub themes: Vec<MalEntry>,
    #[serde(default)]
    pub demographics: Vec<MalEntry>,
}

/// One entry from `/characters`.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct CharacterData {
    pub mal_id: i64,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub images: Option<JikanImages>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub name_kanji: Option<String>,
    #[serde(default)]
    pub nicknames: Vec<String>,
    #[serde(default)]
    pub favorites: Option<i64>,
    #[serde(default)]
    pub about: Option<String>,
}

/// One entry from `/people`.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct PersonData {
    pub mal_id: i64,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub website_url: Option<String>,
    #[serde(default)]
    pub images: Option<JikanImages>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub given_name: Option<String>,
    #[serde(default)]
    pub family_name: Option<String>,
    #[serde(default)]
    pub alternate_names: Vec<String>,
    #[serde(default)]
    pub birthday: Option<DateTime<Utc>>,
    #[serde(default)]
    pub favorites: Option<i64>,
    #[serde(default)]
    pub about: Option<String>,
}

/// One entry from `/producers`.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ProducerData {
    pub mal_id: i64,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub titles: Vec<JikanTitle>,
    #[serde(default)]
    pub images: Option<JikanImages>,
    #[serde(default)]
    pub established: Option<DateTime<Utc>>,
    #[serde(default)]
    pub favorites: Option<i64>,
    #[serde(default)]
    pub about: Option<String>,
    #[serde(default)]
    pub count: Option<i32>,
}

impl ProducerData {
    /// The "Default"-typed title, falling back to the first one listed.
    pub fn default_title(&self) -> Option<&str> {
        self.titles
            .iter()
            .find(|t| t.kind == "Default")
            .or_else(|| self.titles.first())
            .map(|t| t.title.as_str())
    }
}

/// One entry from `/genres/anime` or `/genres/manga`.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct GenreData {
    pub mal_id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub count: Option<i32>,
}

/// One entry from `/magazines`.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct MagazineData {
    pub mal_id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub count: Option<i32>,
}

/// One cast entry from `/anime/{id}/characters`.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AnimeCharacterEntry {
    pub character: CharacterRef,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub voice_actors: Vec<VoiceActorEntry>,
}

/// One cast entry from `/manga/{id}/characters`.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct MangaCharacterEntry {
    pub character: CharacterRef,
    #[serde(default)]
    pub role: String,
}

/// Compact character object embedded in cast entries.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct CharacterRef {
    pub mal_id: i64,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub images: Option<JikanImages>,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct VoiceActorEntry {
    pub person: PersonRef,
    #[serde(default)]
    pub language: String,
}

/// Compact person object embedded in voice actor entries.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct PersonRef {
    pub mal_id: i64,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub images: Option<JikanImages>,
    #[serde(default)]
    pub name: String,
}
