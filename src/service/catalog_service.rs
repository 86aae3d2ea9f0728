//! Read side of the catalog: searches, detail assembly, counts.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;

use crate::model::AnimeModel;
use crate::model::AnimeSearchOpt;
use crate::model::CastCharacterRow;
use crate::model::CastVoiceActorRow;
use crate::model::CharacterModel;
use crate::model::GenreKind;
use crate::model::GenreModel;
use crate::model::GenreWithRoleRow;
use crate::model::MagazineModel;
use crate::model::MangaModel;
use crate::model::MangaSearchOpt;
use crate::model::PersonModel;
use crate::model::ProducerModel;
use crate::model::ProducerWithRoleRow;
use crate::model::SeasonRow;
use crate::repository::Repository;
use crate::repository::TableBase;
use crate::service::error::ServiceError;

/// One page of search results plus the numbers needed to page further.
#[derive(Debug, Serialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub total: i64,
    pub page: u32,
    pub per_page: u32,
}

/// An anime row with everything the detail page shows.
#[derive(Serialize)]
pub struct AnimeDetail {
    #[serde(flatten)]
    pub anime: AnimeModel,
    pub genres: Vec<GenreWithRoleRow>,
    pub producers: Vec<ProducerWithRoleRow>,
    pub cast: Vec<AnimeCastEntry>,
}

#[derive(Serialize)]
pub struct AnimeCastEntry {
    pub character_id: i64,
    pub mal_id: i64,
    pub name: String,
    pub image_url: Option<String>,
    pub role: String,
    pub voice_actors: Vec<VoiceActorView>,
}

#[derive(Serialize)]
pub struct VoiceActorView {
    pub person_id: i64,
    pub mal_id: i64,
    pub name: String,
    pub image_url: Option<String>,
    pub language: String,
}

#[derive(Serialize)]
pub struct MangaDetail {
    #[serde(flatten)]
    pub manga: MangaModel,
    pub genres: Vec<GenreWithRoleRow>,
    pub magazines: Vec<MagazineModel>,
    pub authors: Vec<PersonModel>,
    pub cast: Vec<CastCharacterRow>,
}

/// Row counts per catalog table.
#[derive(Debug, Serialize)]
pub struct CatalogOverview {
    pub anime: i64,
    pub manga: i64,
    pub characters: i64,
    pub people: i64,
    pub producers: i64,
    pub magazines: i64,
    pub genres: i64,
}

pub struct CatalogService {
    db: Arc<Repository>,
}

impl CatalogService {
    pub fn new(db: Arc<Repository>) -> Self {
        Self { db }
    }

    pub async fn search_anime(
        &self,
        opt: &AnimeSearchOpt,
    ) -> Result<Paginated<AnimeModel>, ServiceError> {
        let items = self.db.anime.search(opt).await?;
        let total = self.db.anime.count_search(opt).await?;
        Ok(Paginated {
            items,
            total,
            page: opt.page,
            per_page: opt.per_page,
        })
    }

    /// Assembles one anime's detail view.
    ///
    /// # Performance
    /// * DB calls: 4
    pub async fn anime_detail(&self, id: i64) -> Result<Option<AnimeDetail>, ServiceError> {
        let Some(anime) = self.db.anime.select(id).await? else {
            return Ok(None);
        };
        let genres = self.db.anime_relation.genres_for(id).await?;
        let producers = self.db.anime_relation.producers_for(id).await?;
        let characters = self.db.anime_relation.characters_for(id).await?;
        let voice_actors = self.db.anime_relation.voice_actors_for(id).await?;

        Ok(Some(AnimeDetail {
            anime,
            genres,
            producers,
            cast: group_cast(characters, voice_actors),
        }))
    }

    pub async fn anime_seasons(&self) -> Result<Vec<SeasonRow>, ServiceError> {
        Ok(self.db.anime.seasons().await?)
    }

    pub async fn search_manga(
        &self,
        opt: &MangaSearchOpt,
    ) -> Result<Paginated<MangaModel>, ServiceError> {
        let items = self.db.manga.search(opt).await?;
        let total = self.db.manga.count_search(opt).await?;
        Ok(Paginated {
            items,
            total,
            page: opt.page,
            per_page: opt.per_page,
        })
    }

    pub async fn manga_detail(&self, id: i64) -> Result<Option<MangaDetail>, ServiceError> {
        let Some(manga) = self.db.manga.select(id).await? else {
            return Ok(None);
        };
        let genres = self.db.manga_relation.genres_for(id).await?;
        let magazines = self.db.manga_relation.magazines_for(id).await?;
        let authors = self.db.manga_relation.authors_for(id).await?;
        let cast = self.db.manga_relation.characters_for(id).await?;

        Ok(Some(MangaDetail {
            manga,
            genres,
            magazines,
            authors,
            cast,
        }))
    }

    pub async fn list_characters(
        &self,
        query: Option<&str>,
        page: u32,
        per_page: u32,
    ) -> Result<Paginated<CharacterModel>, ServiceError> {
        let items = self.db.character.search(query, page, per_page).await?;
        let total = self.db.character.count_search(query).await?;
        Ok(Paginated {
            items,
            total,
            page,
            per_page,
        })
    }

    pub async fn character_detail(&self, id: i64) -> Result<Option<CharacterModel>, ServiceError> {
        Ok(self.db.character.select(id).await?)
    }

    pub async fn list_people(
        &self,
        query: Option<&str>,
        page: u32,
        per_page: u32,
    ) -> Result<Paginated<PersonModel>, ServiceError> {
        let items = self.db.people.search(query, page, per_page).await?;
        let total = self.db.people.count_search(query).await?;
        Ok(Paginated {
            items,
            total,
            page,
            per_page,
        })
    }

    pub async fn person_detail(&self, id: i64) -> Result<Option<PersonModel>, ServiceError> {
        Ok(self.db.people.select(id).await?)
    }

    pub async fn list_genres(
        &self,
        kind: Option<GenreKind>,
    ) -> Result<Vec<GenreModel>, ServiceError> {
        Ok(self.db.genre.select_all(kind).await?)
    }

    pub async fn list_producers(
        &self,
        query: Option<&str>,
        page: u32,
        per_page: u32,
    ) -> Result<Paginated<ProducerModel>, ServiceError> {
        let items = self.db.producer.search(query, page, per_page).await?;
        let total = self.db.producer.count_search(query).await?;
        Ok(Paginated {
            items,
            total,
            page,
            per_page,
        })
    }

    pub async fn list_magazines(
        &self,
        query: Option<&str>,
        page: u32,
        per_page: u32,
    ) -> Result<Paginated<MagazineModel>, ServiceError> {
        let items = self.db.magazine.search(query, page, per_page).await?;
        let total = self.db.magazine.count_search(query).await?;
        Ok(Paginated {
            items,
            total,
            page,
            per_page,
        })
    }

    /// Row counts across the catalog. Drives the scraper's `status` output.
    pub async fn overview(&self) -> Result<CatalogOverview, ServiceError> {
        Ok(CatalogOverview {
            anime: self.db.anime.count().await?,
            manga: self.db.manga.count().await?,
            characters: self.db.character.count().await?,
            people: self.db.people.count().await?,
            producers: self.db.producer.count().await?,
            magazines: self.db.magazine.count().await?,
            genres: self.db.genre.count().await?,
        })
    }
}

/// Merges the two cast row sets into one entry per character, keeping the
/// character ordering (main roles first).
fn group_cast(
    characters: Vec<CastCharacterRow>,
    voice_actors: Vec<CastVoiceActorRow>,
) -> Vec<AnimeCastEntry> {
    let mut by_character: HashMap<i64, Vec<VoiceActorView>> = HashMap::new();
    for row in voice_actors {
        by_character
            .entry(row.character_id)
            .or_default()
            .push(VoiceActorView {
                person_id: row.person_id,
                mal_id: row.mal_id,
                name: row.name,
                image_url: row.image_url,
                language: row.language,
            });
    }

    characters
        .into_iter()
        .map(|row| AnimeCastEntry {
            voice_actors: by_character.remove(&row.character_id).unwrap_or_default(),
            character_id: row.character_id,
            mal_id: row.mal_id,
            name: row.name,
            image_url: row.image_url,
            role: row.role,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn character(character_id: i64, name: &str, role: &str) -> CastCharacterRow {
        CastCharacterRow {
            character_id,
            mal_id: character_id * 10,
            name: name.to_string(),
            image_url: None,
            role: role.to_string(),
        }
    }

    fn voice_actor(character_id: i64, person_id: i64, language: &str) -> CastVoiceActorRow {
        CastVoiceActorRow {
            character_id,
            person_id,
            mal_id: person_id * 10,
            name: format!("Person {person_id}"),
            image_url: None,
            language: language.to_string(),
        }
    }

    #[test]
    fn group_cast_attaches_voice_actors_to_their_character() {
        let characters = vec![
            character(1, "Spike Spiegel", "Main"),
            character(2, "Ein", "Supporting"),
        ];
        let voice_actors = vec![
            voice_actor(1, 11, "Japanese"),
            voice_actor(1, 12, "English"),
        ];

        let cast = group_cast(characters, voice_actors);
        assert_eq!(cast.len(), 2);
        assert_eq!(cast[0].voice_actors.len(), 2);
        assert!(cast[1].voice_actors.is_empty());
    }

    #[test]
    fn group_cast_keeps_character_ordering() {
        let characters = vec![
            character(3, "Main A", "Main"),
            character(1, "Supporting B", "Supporting"),
        ];
        let cast = group_cast(characters, Vec::new());
        assert_eq!(cast[0].character_id, 3);
        assert_eq!(cast[1].character_id, 1);
    }
}
