//! Pulls the Jikan catalog into Postgres.
//!
//! Each job walks one upstream listing and lands it through idempotent
//! upserts, checkpointing into `scrape_progress` as it goes. A full import
//! takes hours at upstream's rate limit, so every job is built to be
//! interrupted and resumed.

use std::fmt;
use std::sync::Arc;

use log::info;
use log::warn;
use sqlx::types::Json;

use crate::jikan::JikanClient;
use crate::jikan::error::JikanError;
use crate::jikan::model::AnimeData;
use crate::jikan::model::CharacterData;
use crate::jikan::model::GenreData;
use crate::jikan::model::MagazineData;
use crate::jikan::model::MangaData;
use crate::jikan::model::PersonData;
use crate::jikan::model::ProducerData;
use crate::model::AnimeModel;
use crate::model::CharacterModel;
use crate::model::GenreKind;
use crate::model::GenreModel;
use crate::model::GenreRole;
use crate::model::MagazineModel;
use crate::model::MangaModel;
use crate::model::PersonModel;
use crate::model::ProducerModel;
use crate::model::ProducerRole;
use crate::repository::Repository;
use crate::service::error::ServiceError;

pub const JOB_ANIME: &str = "anime";
pub const JOB_MANGA: &str = "manga";
pub const JOB_CHARACTERS: &str = "characters";
pub const JOB_PEOPLE: &str = "people";
pub const JOB_PRODUCERS: &str = "producers";
pub const JOB_MAGAZINES: &str = "magazines";
pub const JOB_ANIME_CHARACTERS: &str = "anime_characters";
pub const JOB_MANGA_CHARACTERS: &str = "manga_characters";

/// How many stored mal_ids the cast jobs pull per query.
const CAST_BATCH: i64 = 100;

/// Run options shared by every job.
///
/// `start_page` and `max_pages` count pages for the list jobs; the cast
/// jobs cost one request per stored entry, so `max_pages` caps entries
/// there and `start_page` is ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScrapeOpts {
    pub resume: bool,
    pub start_page: Option<i32>,
    pub max_pages: Option<i32>,
}

/// What one job run did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestSummary {
    /// Requests that returned a payload.
    pub pages: u32,
    /// Entries received from upstream.
    pub fetched: u64,
    /// Entries written to the database.
    pub upserted: u64,
    /// Entries skipped (currently only upstream 404s during cast jobs).
    pub skipped: u64,
}

impl IngestSummary {
    fn absorb(&mut self, other: IngestSummary) {
        self.pages += other.pages;
        self.fetched += other.fetched;
        self.upserted += other.upserted;
        self.skipped += other.skipped;
    }
}

impl fmt::Display for IngestSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} pages, {} fetched, {} upserted, {} skipped",
            self.pages, self.fetched, self.upserted, self.skipped
        )
    }
}

/// Service that drives catalog imports.
pub struct IngestService {
    db: Arc<Repository>,
    jikan: Arc<JikanClient>,
}

impl IngestService {
    pub fn new(db: Arc<Repository>, jikan: Arc<JikanClient>) -> Self {
        Self { db, jikan }
    }

    /// Imports both genre catalogs. Unpaginated upstream, so no checkpoint.
    pub async fn scrape_genres(&self) -> Result<IngestSummary, ServiceError> {
        let mut summary = IngestSummary::default();
        for kind in [GenreKind::Anime, GenreKind::Manga] {
            let page = self.jikan.genres(kind).await?;
            summary.pages += 1;
            summary.fetched += page.data.len() as u64;
            for data in &page.data {
                self.db.genre.upsert(&map_genre(data, kind)).await?;
                summary.upserted += 1;
            }
            info!("genres: imported {} {kind:?} genres", page.data.len());
        }
        Ok(summary)
    }

    /// Walks `/anime` page by page.
    ///
    /// Each entry is upserted together with its genre and producer links;
    /// the links are replaced wholesale so removals upstream propagate.
    pub async fn scrape_anime(&self, opts: &ScrapeOpts) -> Result<IngestSummary, ServiceError> {
        let mut summary = IngestSummary::default();
        let mut page = self.start_page(JOB_ANIME, opts).await?;

        loop {
            if Self::page_budget_spent(opts, summary.pages) {
                break;
            }
            let response = self.jikan.anime_page(page).await?;
            let pagination = response.pagination.unwrap_or_default();
            summary.pages += 1;
            summary.fetched += response.data.len() as u64;

            for data in &response.data {
                self.ingest_anime_entry(data).await?;
                summary.upserted += 1;
            }

            let finished = !pagination.has_next_page;
            self.record_page(JOB_ANIME, page, &pagination, finished)
                .await?;
            info!(
                "anime: page {page}/{} done ({} entries)",
                pagination.last_visible_page,
                response.data.len()
            );
            if finished {
                break;
            }
            page += 1;
        }
        Ok(summary)
    }

    /// Walks `/manga` page by page, mirroring [`IngestService::scrape_anime`].
    pub async fn scrape_manga(&self, opts: &ScrapeOpts) -> Result<IngestSummary, ServiceError> {
        let mut summary = IngestSummary::default();
        let mut page = self.start_page(JOB_MANGA, opts).await?;

        loop {
            if Self::page_budget_spent(opts, summary.pages) {
                break;
            }
            let response = self.jikan.manga_page(page).await?;
            let pagination = response.pagination.unwrap_or_default();
            summary.pages += 1;
            summary.fetched += response.data.len() as u64;

            for data in &response.data {
                self.ingest_manga_entry(data).await?;
                summary.upserted += 1;
            }

            let finished = !pagination.has_next_page;
            self.record_page(JOB_MANGA, page, &pagination, finished)
                .await?;
            info!(
                "manga: page {page}/{} done ({} entries)",
                pagination.last_visible_page,
                response.data.len()
            );
            if finished {
                break;
            }
            page += 1;
        }
        Ok(summary)
    }

    /// Walks `/characters`. No relationships to resolve on this listing.
    pub async fn scrape_characters(
        &self,
        opts: &ScrapeOpts,
    ) -> Result<IngestSummary, ServiceError> {
        let mut summary = IngestSummary::default();
        let mut page = self.start_page(JOB_CHARACTERS, opts).await?;

        loop {
            if Self::page_budget_spent(opts, summary.pages) {
                break;
            }
            let response = self.jikan.characters_page(page).await?;
            let pagination = response.pagination.unwrap_or_default();
            summary.pages += 1;
            summary.fetched += response.data.len() as u64;

            for data in &response.data {
                self.db.character.upsert(&map_character(data)).await?;
                summary.upserted += 1;
            }

            let finished = !pagination.has_next_page;
            self.record_page(JOB_CHARACTERS, page, &pagination, finished)
                .await?;
            info!(
                "characters: page {page}/{} done ({} entries)",
                pagination.last_visible_page,
                response.data.len()
            );
            if finished {
                break;
            }
            page += 1;
        }
        Ok(summary)
    }

    /// Walks `/people`.
    pub async fn scrape_people(&self, opts: &ScrapeOpts) -> Result<IngestSummary, ServiceError> {
        let mut summary = IngestSummary::default();
        let mut page = self.start_page(JOB_PEOPLE, opts).await?;

        loop {
            if Self::page_budget_spent(opts, summary.pages) {
                break;
            }
            let response = self.jikan.people_page(page).await?;
            let pagination = response.pagination.unwrap_or_default();
            summary.pages += 1;
            summary.fetched += response.data.len() as u64;

            for data in &response.data {
                self.db.people.upsert(&map_person(data)).await?;
                summary.upserted += 1;
            }

            let finished = !pagination.has_next_page;
            self.record_page(JOB_PEOPLE, page, &pagination, finished)
                .await?;
            info!(
                "people: page {page}/{} done ({} entries)",
                pagination.last_visible_page,
                response.data.len()
            );
            if finished {
                break;
            }
            page += 1;
        }
        Ok(summary)
    }

    /// Walks `/producers`.
    pub async fn scrape_producers(
        &self,
        opts: &ScrapeOpts,
    ) -> Result<IngestSummary, ServiceError> {
        let mut summary = IngestSummary::default();
        let mut page = self.start_page(JOB_PRODUCERS, opts).await?;

        loop {
            if Self::page_budget_spent(opts, summary.pages) {
                break;
            }
            let response = self.jikan.producers_page(page).await?;
            let pagination = response.pagination.unwrap_or_default();
            summary.pages += 1;
            summary.fetched += response.data.len() as u64;

            for data in &response.data {
                self.db.producer.upsert(&map_producer(data)).await?;
                summary.upserted += 1;
            }

            let finished = !pagination.has_next_page;
            self.record_page(JOB_PRODUCERS, page, &pagination, finished)
                .await?;
            info!(
                "producers: page {page}/{} done ({} entries)",
                pagination.last_visible_page,
                response.data.len()
            );
            if finished {
                break;
            }
            page += 1;
        }
        Ok(summary)
    }

    /// Walks `/magazines`.
    pub async fn scrape_magazines(
        &self,
        opts: &ScrapeOpts,
    ) -> Result<IngestSummary, ServiceError> {
        let mut summary = IngestSummary::default();
        let mut page = self.start_page(JOB_MAGAZINES, opts).await?;

        loop {
            if Self::page_budget_spent(opts, summary.pages) {
                break;
            }
            let response = self.jikan.magazines_page(page).await?;
            let pagination = response.pagination.unwrap_or_default();
            summary.pages += 1;
            summary.fetched += response.data.len() as u64;

            for data in &response.data {
                self.db.magazine.upsert(&map_magazine(data)).await?;
                summary.upserted += 1;
            }

            let finished = !pagination.has_next_page;
            self.record_page(JOB_MAGAZINES, page, &pagination, finished)
                .await?;
            info!(
                "magazines: page {page}/{} done ({} entries)",
                pagination.last_visible_page,
                response.data.len()
            );
            if finished {
                break;
            }
            page += 1;
        }
        Ok(summary)
    }

    /// Fetches `/anime/{mal_id}/characters` for every stored anime past the
    /// checkpoint, replacing that anime's cast and voice actor links.
    ///
    /// An upstream 404 means the entry was removed from MyAnimeList after we
    /// ingested it; that item is skipped with a warning. Any other error
    /// aborts, leaving the checkpoint at the last completed entry.
    pub async fn scrape_anime_characters(
        &self,
        opts: &ScrapeOpts,
    ) -> Result<IngestSummary, ServiceError> {
        let mut summary = IngestSummary::default();
        let mut last = self.start_mal_id(JOB_ANIME_CHARACTERS, opts).await?;

        'outer: loop {
            let mal_ids = self.db.anime.select_mal_ids_after(last, CAST_BATCH).await?;
            if mal_ids.is_empty() {
                self.db
                    .progress
                    .record_mal_id(JOB_ANIME_CHARACTERS, last, true)
                    .await?;
                break;
            }
            for mal_id in mal_ids {
                if Self::page_budget_spent(opts, summary.pages) {
                    break 'outer;
                }
                match self.jikan.anime_characters(mal_id).await {
                    Ok(response) => {
                        summary.pages += 1;
                        summary.fetched += response.data.len() as u64;

                        // The entity row exists: select_mal_ids_after read it.
                        let Some(anime) = self.db.anime.select_by_mal_id(mal_id).await? else {
                            return Err(ServiceError::UnexpectedResult {
                                message: format!("Anime {mal_id} vanished mid-run"),
                            });
                        };

                        let mut characters = Vec::new();
                        let mut voice_actors = Vec::new();
                        for entry in &response.data {
                            let character_id = self
                                .db
                                .character
                                .upsert_ref(
                                    entry.character.mal_id,
                                    &entry.character.name,
                                    &entry.character.url,
                                    entry
                                        .character
                                        .images
                                        .as_ref()
                                        .and_then(|i| i.display_url())
                                        .as_deref(),
                                )
                                .await?;
                            characters.push((character_id, entry.role.clone()));
                            summary.upserted += 1;

                            for va in &entry.voice_actors {
                                let person_id = self
                                    .db
                                    .people
                                    .upsert_ref(
                                        va.person.mal_id,
                                        &va.person.name,
                                        &va.person.url,
                                        va.person
                                            .images
                                            .as_ref()
                                            .and_then(|i| i.display_url())
                                            .as_deref(),
                                    )
                                    .await?;
                                voice_actors.push((
                                    character_id,
                                    person_id,
                                    va.language.clone(),
                                ));
                            }
                        }
                        self.db
                            .anime_relation
                            .replace_cast(anime.id, &characters, &voice_actors)
                            .await?;
                    }
                    Err(JikanError::NotFound { .. }) => {
                        warn!("anime {mal_id}: gone upstream, skipping cast");
                        summary.skipped += 1;
                    }
                    Err(err) => return Err(err.into()),
                }
                last = mal_id;
                self.db
                    .progress
                    .record_mal_id(JOB_ANIME_CHARACTERS, last, false)
                    .await?;
            }
            info!("anime cast: checkpoint at mal_id {last}");
        }
        Ok(summary)
    }

    /// Fetches `/manga/{mal_id}/characters` for every stored manga past the
    /// checkpoint. Same skip rules as the anime cast job; manga cast entries
    /// carry no voice actors.
    pub async fn scrape_manga_characters(
        &self,
        opts: &ScrapeOpts,
    ) -> Result<IngestSummary, ServiceError> {
        let mut summary = IngestSummary::default();
        let mut last = self.start_mal_id(JOB_MANGA_CHARACTERS, opts).await?;

        'outer: loop {
            let mal_ids = self.db.manga.select_mal_ids_after(last, CAST_BATCH).await?;
            if mal_ids.is_empty() {
                self.db
                    .progress
                    .record_mal_id(JOB_MANGA_CHARACTERS, last, true)
                    .await?;
                break;
            }
            for mal_id in mal_ids {
                if Self::page_budget_spent(opts, summary.pages) {
                    break 'outer;
                }
                match self.jikan.manga_characters(mal_id).await {
                    Ok(response) => {
                        summary.pages += 1;
                        summary.fetched += response.data.len() as u64;

                        let Some(manga) = self.db.manga.select_by_mal_id(mal_id).await? else {
                            return Err(ServiceError::UnexpectedResult {
                                message: format!("Manga {mal_id} vanished mid-run"),
                            });
                        };

                        let mut characters = Vec::new();
                        for entry in &response.data {
                            let character_id = self
                                .db
                                .character
                                .upsert_ref(
                                    entry.character.mal_id,
                                    &entry.character.name,
                                    &entry.character.url,
                                    entry
                                        .character
                                        .images
                                        .as_ref()
                                        .and_then(|i| i.display_url())
                                        .as_deref(),
                                )
                                .await?;
                            characters.push((character_id, entry.role.clone()));
                            summary.upserted += 1;
                        }
                        self.db
                            .manga_relation
                            .replace_cast(manga.id, &characters)
                            .await?;
                    }
                    Err(JikanError::NotFound { .. }) => {
                        warn!("manga {mal_id}: gone upstream, skipping cast");
                        summary.skipped += 1;
                    }
                    Err(err) => return Err(err.into()),
                }
                last = mal_id;
                self.db
                    .progress
                    .record_mal_id(JOB_MANGA_CHARACTERS, last, false)
                    .await?;
            }
            info!("manga cast: checkpoint at mal_id {last}");
        }
        Ok(summary)
    }

    /// Runs every job in dependency order: lookup tables before the entries
    /// that reference them, cast jobs last so they walk a full catalog.
    pub async fn scrape_all(&self, opts: &ScrapeOpts) -> Result<IngestSummary, ServiceError> {
        let mut total = IngestSummary::default();
        total.absorb(self.scrape_genres().await?);
        total.absorb(self.scrape_producers(opts).await?);
        total.absorb(self.scrape_magazines(opts).await?);
        total.absorb(self.scrape_anime(opts).await?);
        total.absorb(self.scrape_manga(opts).await?);
        total.absorb(self.scrape_characters(opts).await?);
        total.absorb(self.scrape_people(opts).await?);
        total.absorb(self.scrape_anime_characters(opts).await?);
        total.absorb(self.scrape_manga_characters(opts).await?);
        Ok(total)
    }

    /// Upserts one anime and replaces its genre and producer links.
    ///
    /// # Performance
    /// * DB calls: 3 + one per embedded ref
    async fn ingest_anime_entry(&self, data: &AnimeData) -> Result<(), ServiceError> {
        let anime_id = self.db.anime.upsert(&map_anime(data)).await?;

        let mut genre_rows = Vec::new();
        for (entries, role) in [
            (&data.genres, GenreRole::Genre),
            (&data.explicit_genres, GenreRole::ExplicitGenre),
            (&data.themes, GenreRole::Theme),
            (&data.demographics, GenreRole::Demographic),
        ] {
            for entry in entries {
                let genre_id = self
                    .db
                    .genre
                    .upsert_ref(entry.mal_id, GenreKind::Anime, &entry.name, &entry.url)
                    .await?;
                genre_rows.push((genre_id, role));
            }
        }
        self.db
            .anime_relation
            .replace_genres(anime_id, &genre_rows)
            .await?;

        let mut producer_rows = Vec::new();
        for (entries, role) in [
            (&data.producers, ProducerRole::Producer),
            (&data.licensors, ProducerRole::Licensor),
            (&data.studios, ProducerRole::Studio),
        ] {
            for entry in entries {
                let producer_id = self
                    .db
                    .producer
                    .upsert_ref(entry.mal_id, &entry.name, &entry.url)
                    .await?;
                producer_rows.push((producer_id, role));
            }
        }
        self.db
            .anime_relation
            .replace_producers(anime_id, &producer_rows)
            .await?;

        Ok(())
    }

    /// Upserts one manga and replaces its genre, author and magazine links.
    async fn ingest_manga_entry(&self, data: &MangaData) -> Result<(), ServiceError> {
        let manga_id = self.db.manga.upsert(&map_manga(data)).await?;

        let mut genre_rows = Vec::new();
        for (entries, role) in [
            (&data.genres, GenreRole::Genre),
            (&data.explicit_genres, GenreRole::ExplicitGenre),
            (&data.themes, GenreRole::Theme),
            (&data.demographics, GenreRole::Demographic),
        ] {
            for entry in entries {
                let genre_id = self
                    .db
                    .genre
                    .upsert_ref(entry.mal_id, GenreKind::Manga, &entry.name, &entry.url)
                    .await?;
                genre_rows.push((genre_id, role));
            }
        }
        self.db
            .manga_relation
            .replace_genres(manga_id, &genre_rows)
            .await?;

        let mut author_ids = Vec::new();
        for entry in &data.authors {
            let person_id = self
                .db
                .people
                .upsert_ref(entry.mal_id, &entry.name, &entry.url, None)
                .await?;
            author_ids.push(person_id);
        }
        self.db
            .manga_relation
            .replace_authors(manga_id, &author_ids)
            .await?;

        let mut magazine_ids = Vec::new();
        for entry in &data.serializations {
            let magazine_id = self
                .db
                .magazine
                .upsert_ref(entry.mal_id, &entry.name, &entry.url)
                .await?;
            magazine_ids.push(magazine_id);
        }
        self.db
            .manga_relation
            .replace_magazines(manga_id, &magazine_ids)
            .await?;

        Ok(())
    }

    /// Where a page-walking job should start this run.
    async fn start_page(&self, job: &str, opts: &ScrapeOpts) -> Result<i32, ServiceError> {
        if let Some(start) = opts.start_page {
            return Ok(start.max(1));
        }
        if !opts.resume {
            return Ok(1);
        }
        match self.db.progress.select(job).await? {
            Some(progress) => {
                let page = progress.last_page + 1;
                info!("{job}: resuming from page {page}");
                Ok(page)
            }
            None => Ok(1),
        }
    }

    /// Where a cast job should start this run (exclusive lower bound).
    async fn start_mal_id(&self, job: &str, opts: &ScrapeOpts) -> Result<i64, ServiceError> {
        if !opts.resume {
            return Ok(0);
        }
        match self.db.progress.select(job).await? {
            Some(progress) => {
                info!("{job}: resuming after mal_id {}", progress.last_mal_id);
                Ok(progress.last_mal_id)
            }
            None => Ok(0),
        }
    }

    async fn record_page(
        &self,
        job: &str,
        page: i32,
        pagination: &crate::jikan::model::JikanPagination,
        finished: bool,
    ) -> Result<(), ServiceError> {
        let total_pages =
            (pagination.last_visible_page > 0).then_some(pagination.last_visible_page);
        self.db
            .progress
            .record_page(job, page, total_pages, finished)
            .await?;
        Ok(())
    }

    fn page_budget_spent(opts: &ScrapeOpts, pages_done: u32) -> bool {
        opts.max_pages
            .is_some_and(|max| pages_done >= max.max(0) as u32)
    }
}

fn map_anime(data: &AnimeData) -> AnimeModel {
    let (aired_from, aired_to) = data
        .aired
        .as_ref()
        .map(|range| (range.from, range.to))
        .unwrap_or((None, None));
    let broadcast = data.broadcast.clone().unwrap_or_default();

    AnimeModel {
        mal_id: data.mal_id,
        url: data.url.clone(),
        title: data.title.clone(),
        title_english: data.title_english.clone(),
        title_japanese: data.title_japanese.clone(),
        title_synonyms: Json(data.title_synonyms.clone()),
        image_url: data.images.as_ref().and_then(|i| i.display_url()),
        trailer_url: data.trailer.as_ref().and_then(|t| t.url.clone()),
        approved: data.approved,
        anime_type: data.anime_type.clone(),
        source: data.source.clone(),
        episodes: data.episodes,
        status: data.status.clone(),
        airing: data.airing,
        aired_from,
        aired_to,
        duration: data.duration.clone(),
        rating: data.rating.clone(),
        score: data.score,
        scored_by: data.scored_by,
        rank: data.rank,
        popularity: data.popularity,
        members: data.members,
        favorites: data.favorites,
        synopsis: data.synopsis.clone(),
        background: data.background.clone(),
        season: data.season.clone(),
        year: data.year,
        broadcast_day: broadcast.day,
        broadcast_time: broadcast.time,
        broadcast_timezone: broadcast.timezone,
        ..Default::default()
    }
}

fn map_manga(data: &MangaData) -> MangaModel {
    let (published_from, published_to) = data
        .published
        .as_ref()
        .map(|range| (range.from, range.to))
        .unwrap_or((None, None));

    MangaModel {
        mal_id: data.mal_id,
        url: data.url.clone(),
        title: data.title.clone(),
        title_english: data.title_english.clone(),
        title_japanese: data.title_japanese.clone(),
        title_synonyms: Json(data.title_synonyms.clone()),
        image_url: data.images.as_ref().and_then(|i| i.display_url()),
        approved: data.approved,
        manga_type: data.manga_type.clone(),
        chapters: data.chapters,
        volumes: data.volumes,
        status: data.status.clone(),
        publishing: data.publishing,
        published_from,
        published_to,
        score: data.score,
        scored_by: data.scored_by,
        rank: data.rank,
        popularity: data.popularity,
        members: data.members,
        favorites: data.favorites,
        synopsis: data.synopsis.clone(),
        background: data.background.clone(),
        ..Default::default()
    }
}

fn map_character(data: &CharacterData) -> CharacterModel {
    CharacterModel {
        mal_id: data.mal_id,
        url: data.url.clone(),
        name: data.name.clone(),
        name_kanji: data.name_kanji.clone(),
        nicknames: Json(data.nicknames.clone()),
        image_url: data.images.as_ref().and_then(|i| i.display_url()),
        favorites: data.favorites,
        about: data.about.clone(),
        ..Default::default()
    }
}

fn map_person(data: &PersonData) -> PersonModel {
    PersonModel {
        mal_id: data.mal_id,
        url: data.url.clone(),
        website_url: data.website_url.clone(),
        name: data.name.clone(),
        given_name: data.given_name.clone(),
        family_name: data.family_name.clone(),
        alternate_names: Json(data.alternate_names.clone()),
        birthday: data.birthday,
        image_url: data.images.as_ref().and_then(|i| i.display_url()),
        favorites: data.favorites,
        about: data.about.clone(),
        ..Default::default()
    }
}

fn map_producer(data: &ProducerData) -> ProducerModel {
    ProducerModel {
        mal_id: data.mal_id,
        name: data.default_title().unwrap_or_default().to_string(),
        titles: Json(
            data.titles
                .iter()
                .map(|t| crate::model::ProducerTitle {
                    kind: t.kind.clone(),
                    title: t.title.clone(),
                })
                .collect(),
        ),
        url: data.url.clone(),
        image_url: data.images.as_ref().and_then(|i| i.display_url()),
        established: data.established,
        favorites: data.favorites,
        about: data.about.clone(),
        count: data.count,
        ..Default::default()
    }
}

fn map_genre(data: &GenreData, kind: GenreKind) -> GenreModel {
    GenreModel {
        mal_id: data.mal_id,
        kind,
        name: data.name.clone(),
        url: data.url.clone(),
        count: data.count,
        ..Default::default()
    }
}

fn map_magazine(data: &MagazineData) -> MagazineModel {
    MagazineModel {
        mal_id: data.mal_id,
        name: data.name.clone(),
        url: data.url.clone(),
        count: data.count,
        ..Default::default()
    }
}
