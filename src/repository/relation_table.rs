use sqlx::PgPool;

use crate::model::CastCharacterRow;
use crate::model::CastVoiceActorRow;
use crate::model::GenreRole;
use crate::model::GenreWithRoleRow;
use crate::model::MagazineModel;
use crate::model::PersonModel;
use crate::model::ProducerRole;
use crate::model::ProducerWithRoleRow;
use crate::repository::BaseTable;
use crate::repository::error::DatabaseError;

/// Junction tables hanging off `anime`.
///
/// Writes replace the full row set for one anime inside a transaction, so a
/// re-ingested payload converges on exactly what upstream currently lists.
/// Upstream payloads occasionally repeat an entry, hence the
/// `ON CONFLICT DO NOTHING` on every insert.
#[derive(Clone)]
pub struct AnimeRelationTable {
    base: BaseTable,
}

impl AnimeRelationTable {
    pub fn new(pool: PgPool) -> Self {
        Self {
            base: BaseTable::new(pool),
        }
    }

    /// Replaces genre links. `rows` holds `(genre_id, role)` pairs.
    pub async fn replace_genres(
        &self,
        anime_id: i64,
        rows: &[(i64, GenreRole)],
    ) -> Result<(), DatabaseError> {
        let mut tx = self.base.pool.begin().await?;
        sqlx::query("DELETE FROM anime_genres WHERE anime_id = $1")
            .bind(anime_id)
            .execute(&mut *tx)
            .await?;
        for (genre_id, role) in rows {
            sqlx::query(
                "INSERT INTO anime_genres (anime_id, genre_id, role) \
                 VALUES ($1, $2, $3) ON CONFLICT DO NOTHING",
            )
            .bind(anime_id)
            .bind(genre_id)
            .bind(role)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;
        Ok(())
    }

    /// Replaces producer links. `rows` holds `(producer_id, role)` pairs.
    pub async fn replace_producers(
        &self,
        anime_id: i64,
        rows: &[(i64, ProducerRole)],
    ) -> Result<(), DatabaseError> {
        let mut tx = self.base.pool.begin().await?;
        sqlx::query("DELETE FROM anime_producers WHERE anime_id = $1")
            .bind(anime_id)
            .execute(&mut *tx)
            .await?;
        for (producer_id, role) in rows {
            sqlx::query(
                "INSERT INTO anime_producers (anime_id, producer_id, role) \
                 VALUES ($1, $2, $3) ON CONFLICT DO NOTHING",
            )
            .bind(anime_id)
            .bind(producer_id)
            .bind(role)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;
        Ok(())
    }

    /// Replaces the cast of one anime: character links plus their voice
    /// actors, in a single transaction.
    ///
    /// `characters` holds `(character_id, role)`, `voice_actors` holds
    /// `(character_id, person_id, language)`.
    pub async fn replace_cast(
        &self,
        anime_id: i64,
        characters: &[(i64, String)],
        voice_actors: &[(i64, i64, String)],
    ) -> Result<(), DatabaseError> {
        let mut tx = self.base.pool.begin().await?;
        sqlx::query("DELETE FROM anime_character_voice_actors WHERE anime_id = $1")
            .bind(anime_id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM anime_characters WHERE anime_id = $1")
            .bind(anime_id)
            .execute(&mut *tx)
            .await?;
        for (character_id, role) in characters {
            sqlx::query(
                "INSERT INTO anime_characters (anime_id, character_id, role) \
                 VALUES ($1, $2, $3) ON CONFLICT DO NOTHING",
            )
            .bind(anime_id)
            .bind(character_id)
            .bind(role)
            .execute(&mut *tx)
            .await?;
        }
        for (character_id, person_id, language) in voice_actors {
            sqlx::query(
                "INSERT INTO anime_character_voice_actors \
                 (anime_id, character_id, person_id, language) \
                 VALUES ($1, $2, $3, $4) ON CONFLICT DO NOTHING",
            )
            .bind(anime_id)
            .bind(character_id)
            .bind(person_id)
            .bind(language)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;
        Ok(())
    }

    pub async fn genres_for(&self, anime_id: i64) -> Result<Vec<GenreWithRoleRow>, DatabaseError> {
        Ok(sqlx::query_as::<_, GenreWithRoleRow>(
            r#"
            SELECT g.id, g.mal_id, g.name, g.url, ag.role
            FROM anime_genres ag
            JOIN genres g ON g.id = ag.genre_id
            WHERE ag.anime_id = $1
            ORDER BY ag.role ASC, g.name ASC
            "#,
        )
        .bind(anime_id)
        .fetch_all(&self.base.pool)
        .await?)
    }

    pub async fn producers_for(
        &self,
        anime_id: i64,
    ) -> Result<Vec<ProducerWithRoleRow>, DatabaseError> {
        Ok(sqlx::query_as::<_, ProducerWithRoleRow>(
            r#"
            SELECT p.id, p.mal_id, p.name, p.url, ap.role
            FROM anime_producers ap
            JOIN producers p ON p.id = ap.producer_id
            WHERE ap.anime_id = $1
            ORDER BY ap.role ASC, p.name ASC
            "#,
        )
        .bind(anime_id)
        .fetch_all(&self.base.pool)
        .await?)
    }

    /// Cast list, main roles first.
    pub async fn characters_for(
        &self,
        anime_id: i64,
    ) -> Result<Vec<CastCharacterRow>, DatabaseError> {
        Ok(sqlx::query_as::<_, CastCharacterRow>(
            r#"
            SELECT c.id AS character_id, c.mal_id, c.name, c.image_url, ac.role
            FROM anime_characters ac
            JOIN characters c ON c.id = ac.character_id
            WHERE ac.anime_id = $1
            ORDER BY CASE WHEN ac.role = 'Main' THEN 0 ELSE 1 END, c.name ASC
            "#,
        )
        .bind(anime_id)
        .fetch_all(&self.base.pool)
        .await?)
    }

    pub async fn voice_actors_for(
        &self,
        anime_id: i64,
    ) -> Result<Vec<CastVoiceActorRow>, DatabaseError> {
        Ok(sqlx::query_as::<_, CastVoiceActorRow>(
            r#"
            SELECT va.character_id, p.id AS person_id, p.mal_id, p.name,
                   p.image_url, va.language
            FROM anime_character_voice_actors va
            JOIN people p ON p.id = va.person_id
            WHERE va.anime_id = $1
            ORDER BY va.character_id ASC, va.language ASC, p.name ASC
            "#,
        )
        .bind(anime_id)
        .fetch_all(&self.base.pool)
        .await?)
    }
}

/// Junction tables hanging off `manga`.
#[derive(Clone)]
pub struct MangaRelationTable {
    base: BaseTable,
}

impl MangaRelationTable {
    pub fn new(pool: PgPool) -> Self {
        Self {
            base: BaseTable::new(pool),
        }
    }

    /// Replaces genre links. `rows` holds `(genre_id, role)` pairs.
    pub async fn replace_genres(
        &self,
        manga_id: i64,
        rows: &[(i64, GenreRole)],
    ) -> Result<(), DatabaseError> {
        let mut tx = self.base.pool.begin().await?;
        sqlx::query("DELETE FROM manga_genres WHERE manga_id = $1")
            .bind(manga_id)
            .execute(&mut *tx)
            .await?;
        for (genre_id, role) in rows {
            sqlx::query(
                "INSERT INTO manga_genres (manga_id, genre_id, role) \
                 VALUES ($1, $2, $3) ON CONFLICT DO NOTHING",
            )
            .bind(manga_id)
            .bind(genre_id)
            .bind(role)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;
        Ok(())
    }

    pub async fn replace_magazines(
        &self,
        manga_id: i64,
        magazine_ids: &[i64],
    ) -> Result<(), DatabaseError> {
        let mut tx = self.base.pool.begin().await?;
        sqlx::query("DELETE FROM manga_magazines WHERE manga_id = $1")
            .bind(manga_id)
            .execute(&mut *tx)
            .await?;
        for magazine_id in magazine_ids {
            sqlx::query(
                "INSERT INTO manga_magazines (manga_id, magazine_id) \
                 VALUES ($1, $2) ON CONFLICT DO NOTHING",
            )
            .bind(manga_id)
            .bind(magazine_id)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;
        Ok(())
    }

    pub async fn replace_authors(
        &self,
        manga_id: i64,
        person_ids: &[i64],
    ) -> Result<(), DatabaseError> {
        let mut tx = self.base.pool.begin().await?;
        sqlx::query("DELETE FROM manga_authors WHERE manga_id = $1")
            .bind(manga_id)
            .execute(&mut *tx)
            .await?;
        for person_id in person_ids {
            sqlx::query(
                "INSERT INTO manga_authors (manga_id, person_id) \
                 VALUES ($1, $2) ON CONFLICT DO NOTHING",
            )
            .bind(manga_id)
            .bind(person_id)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;
        Ok(())
    }

    /// Replaces the character list. `characters` holds `(character_id, role)`.
    pub async fn replace_cast(
        &self,
        manga_id: i64,
        characters: &[(i64, String)],
    ) -> Result<(), DatabaseError> {
        let mut tx = self.base.pool.begin().await?;
        sqlx::query("DELETE FROM manga_characters WHERE manga_id = $1")
            .bind(manga_id)
            .execute(&mut *tx)
            .await?;
        for (character_id, role) in characters {
            sqlx::query(
                "INSERT INTO manga_characters (manga_id, character_id, role) \
                 VALUES ($1, $2, $3) ON CONFLICT DO NOTHING",
            )
            .bind(manga_id)
            .bind(character_id)
            .bind(role)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;
        Ok(())
    }

    pub async fn genres_for(&self, manga_id: i64) -> Result<Vec<GenreWithRoleRow>, DatabaseError> {
        Ok(sqlx::query_as::<_, GenreWithRoleRow>(
            r#"
            SELECT g.id, g.mal_id, g.name, g.url, mg.role
            FROM manga_genres mg
            JOIN genres g ON g.id = mg.genre_id
            WHERE mg.manga_id = $1
            ORDER BY mg.role ASC, g.name ASC
            "#,
        )
        .bind(manga_id)
        .fetch_all(&self.base.pool)
        .await?)
    }

    pub async fn magazines_for(&self, manga_id: i64) -> Result<Vec<MagazineModel>, DatabaseError> {
        Ok(sqlx::query_as::<_, MagazineModel>(
            r#"
            SELECT m.id, m.mal_id, m.name, m.url, m.count, m.created_at, m.updated_at
            FROM manga_magazines mm
            JOIN magazines m ON m.id = mm.magazine_id
            WHERE mm.manga_id = $1
            ORDER BY m.name ASC
            "#,
        )
        .bind(manga_id)
        .fetch_all(&self.base.pool)
        .await?)
    }

    pub async fn authors_for(&self, manga_id: i64) -> Result<Vec<PersonModel>, DatabaseError> {
        Ok(sqlx::query_as::<_, PersonModel>(
            r#"
            SELECT p.id, p.mal_id, p.url, p.website_url, p.name, p.given_name,
                   p.family_name, p.alternate_names, p.birthday, p.image_url,
                   p.favorites, p.about, p.created_at, p.updated_at
            FROM manga_authors ma
            JOIN people p ON p.id = ma.person_id
            WHERE ma.manga_id = $1
            ORDER BY p.name ASC
            "#,
        )
        .bind(manga_id)
        .fetch_all(&self.base.pool)
        .await?)
    }

    /// Cast list, main roles first.
    pub async fn characters_for(
        &self,
        manga_id: i64,
    ) -> Result<Vec<CastCharacterRow>, DatabaseError> {
        Ok(sqlx::query_as::<_, CastCharacterRow>(
            r#"
            SELECT c.id AS character_id, c.mal_id, c.name, c.image_url, mc.role
            FROM manga_characters mc
            JOIN characters c ON c.id = mc.character_id
            WHERE mc.manga_id = $1
            ORDER BY CASE WHEN mc.role = 'Main' THEN 0 ELSE 1 END, c.name ASC
            "#,
        )
        .bind(manga_id)
        .fetch_all(&self.base.pool)
        .await?)
    }
}
