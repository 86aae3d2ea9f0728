//! End-to-end ingestion tests: a mock Jikan server on one side, a real
//! database on the other.

use std::sync::Arc;
use std::time::Duration;

use httpmock::Method::GET;
use httpmock::MockServer;
use sqlx::PgPool;
use trackyrs::config::Config;
use trackyrs::jikan::JikanClient;
use trackyrs::model::GenreKind;
use trackyrs::model::GenreRole;
use trackyrs::model::ProducerRole;
use trackyrs::repository::Repository;
use trackyrs::repository::TableBase;
use trackyrs::service::ingest_service::IngestService;
use trackyrs::service::ingest_service::JOB_ANIME;
use trackyrs::service::ingest_service::JOB_ANIME_CHARACTERS;
use trackyrs::service::ingest_service::ScrapeOpts;

mod common;

use common::get_response;
use common::sample_anime;
use common::sample_manga;

fn ingest_service(pool: PgPool, server: &MockServer) -> (Arc<Repository>, IngestService) {
    let db = Arc::new(Repository::from_pool(pool));
    let config = Config {
        jikan_base_url: server.url(""),
        jikan_max_retries: 0,
        jikan_retry_delay: Duration::from_millis(10),
        ..Config::default()
    };
    let jikan = Arc::new(JikanClient::new(&config));
    (db.clone(), IngestService::new(db, jikan))
}

fn resume_opts() -> ScrapeOpts {
    ScrapeOpts {
        resume: true,
        start_page: None,
        max_pages: None,
    }
}

fn mock_page(server: &MockServer, path: &'static str, page: &'static str, fixture: &str) {
    let body = get_response(fixture);
    server.mock(|when, then| {
        when.method(GET).path(path).query_param("page", page);
        then.status(200)
            .header("content-type", "application/json")
            .body(body);
    });
}

#[sqlx::test]
async fn anime_walk_lands_rows_and_relations(pool: PgPool) {
    let server = MockServer::start();
    let (db, ingest) = ingest_service(pool, &server);
    mock_page(&server, "/anime", "1", "anime_page1.json");
    mock_page(&server, "/anime", "2", "anime_page2.json");

    let summary = ingest.scrape_anime(&resume_opts()).await.unwrap();

    assert_eq!(summary.pages, 2);
    assert_eq!(summary.fetched, 4);
    assert_eq!(summary.upserted, 4);
    assert_eq!(db.anime.count().await.unwrap(), 4);

    let bebop = db.anime.select_by_mal_id(1).await.unwrap().unwrap();
    assert_eq!(bebop.title, "Cowboy Bebop");
    assert_eq!(bebop.season.as_deref(), Some("spring"));
    assert!(bebop.image_url.is_some_and(|url| url.ends_with("19644.jpg")));
    assert!(
        bebop
            .trailer_url
            .is_some_and(|url| url.contains("qig4KOK2R2g"))
    );

    // Genre arrays land with the role describing which array they came from.
    let genres = db.anime_relation.genres_for(bebop.id).await.unwrap();
    assert!(
        genres
            .iter()
            .any(|g| g.name == "Action" && g.role == GenreRole::Genre)
    );
    assert!(
        genres
            .iter()
            .any(|g| g.name == "Space" && g.role == GenreRole::Theme)
    );

    let producers = db.anime_relation.producers_for(bebop.id).await.unwrap();
    assert!(
        producers
            .iter()
            .any(|p| p.name == "Sunrise" && p.role == ProducerRole::Studio)
    );
    assert!(
        producers
            .iter()
            .any(|p| p.name == "Funimation" && p.role == ProducerRole::Licensor)
    );
    assert!(
        producers
            .iter()
            .any(|p| p.name == "Bandai Visual" && p.role == ProducerRole::Producer)
    );

    // Stub genre rows exist under the anime kind.
    let action = db
        .genre
        .select_by_mal_id(1, GenreKind::Anime)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(action.name, "Action");

    let progress = db.progress.select(JOB_ANIME).await.unwrap().unwrap();
    assert_eq!(progress.last_page, 2);
    assert_eq!(progress.total_pages, Some(2));
    assert!(progress.finished);
}

#[sqlx::test]
async fn anime_walk_rerun_is_idempotent(pool: PgPool) {
    let server = MockServer::start();
    mock_page(&server, "/anime", "1", "anime_page1.json");
    mock_page(&server, "/anime", "2", "anime_page2.json");

    let no_resume = ScrapeOpts {
        resume: false,
        start_page: None,
        max_pages: None,
    };

    let (db, ingest) = ingest_service(pool.clone(), &server);
    ingest.scrape_anime(&no_resume).await.unwrap();

    let anime_count = db.anime.count().await.unwrap();
    let genre_count = db.genre.count().await.unwrap();
    let producer_count = db.producer.count().await.unwrap();

    // Fresh service, same pages: nothing should be duplicated.
    let (db, ingest) = ingest_service(pool, &server);
    ingest.scrape_anime(&no_resume).await.unwrap();

    assert_eq!(db.anime.count().await.unwrap(), anime_count);
    assert_eq!(db.genre.count().await.unwrap(), genre_count);
    assert_eq!(db.producer.count().await.unwrap(), producer_count);

    let bebop = db.anime.select_by_mal_id(1).await.unwrap().unwrap();
    assert_eq!(db.anime_relation.genres_for(bebop.id).await.unwrap().len(), 4);
}

#[sqlx::test]
async fn anime_walk_resumes_from_checkpoint(pool: PgPool) {
    let server = MockServer::start();
    let (db, ingest) = ingest_service(pool, &server);

    // Page 1 was already ingested by an earlier run.
    db.progress
        .record_page(JOB_ANIME, 1, Some(2), false)
        .await
        .unwrap();

    let body = get_response("anime_page2.json");
    let page2 = server.mock(|when, then| {
        when.method(GET).path("/anime").query_param("page", "2");
        then.status(200)
            .header("content-type", "application/json")
            .body(body);
    });

    let summary = ingest.scrape_anime(&resume_opts()).await.unwrap();

    page2.assert();
    assert_eq!(summary.pages, 1);
    assert_eq!(db.anime.count().await.unwrap(), 2);
    assert!(db.anime.select_by_mal_id(20).await.unwrap().is_some());

    let progress = db.progress.select(JOB_ANIME).await.unwrap().unwrap();
    assert_eq!(progress.last_page, 2);
    assert!(progress.finished);
}

#[sqlx::test]
async fn max_pages_caps_the_walk(pool: PgPool) {
    let server = MockServer::start();
    let (db, ingest) = ingest_service(pool, &server);
    mock_page(&server, "/anime", "1", "anime_page1.json");

    let opts = ScrapeOpts {
        resume: true,
        start_page: None,
        max_pages: Some(1),
    };
    let summary = ingest.scrape_anime(&opts).await.unwrap();

    assert_eq!(summary.pages, 1);
    assert_eq!(db.anime.count().await.unwrap(), 2);

    // The job is checkpointed but not finished.
    let progress = db.progress.select(JOB_ANIME).await.unwrap().unwrap();
    assert_eq!(progress.last_page, 1);
    assert!(!progress.finished);
}

#[sqlx::test]
async fn genres_job_imports_both_catalogs(pool: PgPool) {
    let server = MockServer::start();
    let (db, ingest) = ingest_service(pool, &server);

    let anime_body = get_response("genres_anime.json");
    server.mock(|when, then| {
        when.method(GET).path("/genres/anime");
        then.status(200)
            .header("content-type", "application/json")
            .body(anime_body);
    });
    let manga_body = get_response("genres_manga.json");
    server.mock(|when, then| {
        when.method(GET).path("/genres/manga");
        then.status(200)
            .header("content-type", "application/json")
            .body(manga_body);
    });

    let summary = ingest.scrape_genres().await.unwrap();

    assert_eq!(summary.fetched, 7);
    assert_eq!(db.genre.select_all(None).await.unwrap().len(), 7);
    assert_eq!(
        db.genre.select_all(Some(GenreKind::Anime)).await.unwrap().len(),
        4
    );

    // Same upstream id, different catalogs, two rows.
    let anime_action = db
        .genre
        .select_by_mal_id(1, GenreKind::Anime)
        .await
        .unwrap()
        .unwrap();
    let manga_action = db
        .genre
        .select_by_mal_id(1, GenreKind::Manga)
        .await
        .unwrap()
        .unwrap();
    assert_ne!(anime_action.id, manga_action.id);
    assert_eq!(anime_action.count, Some(5316));
}

#[sqlx::test]
async fn manga_walk_links_authors_and_serializations(pool: PgPool) {
    let server = MockServer::start();
    let (db, ingest) = ingest_service(pool, &server);
    mock_page(&server, "/manga", "1", "manga_page1.json");

    ingest.scrape_manga(&resume_opts()).await.unwrap();

    assert_eq!(db.manga.count().await.unwrap(), 2);
    let monster = db.manga.select_by_mal_id(1).await.unwrap().unwrap();
    assert_eq!(monster.title, "Monster");
    assert_eq!(monster.chapters, Some(162));

    let genres = db.manga_relation.genres_for(monster.id).await.unwrap();
    assert!(
        genres
            .iter()
            .any(|g| g.name == "Mystery" && g.role == GenreRole::Genre)
    );
    assert!(
        genres
            .iter()
            .any(|g| g.name == "Seinen" && g.role == GenreRole::Demographic)
    );

    let authors = db.manga_relation.authors_for(monster.id).await.unwrap();
    assert_eq!(authors.len(), 1);
    assert_eq!(authors[0].name, "Urasawa, Naoki");

    let magazines = db.manga_relation.magazines_for(monster.id).await.unwrap();
    assert_eq!(magazines.len(), 1);
    assert_eq!(magazines[0].name, "Big Comic Original");

    // The author landed as a stub row in people.
    assert!(db.people.select_by_mal_id(1867).await.unwrap().is_some());
}

#[sqlx::test]
async fn anime_cast_job_links_characters_and_voice_actors(pool: PgPool) {
    let server = MockServer::start();
    let (db, ingest) = ingest_service(pool, &server);
    let anime_id = db.anime.upsert(&sample_anime(1, "Cowboy Bebop")).await.unwrap();

    let body = get_response("anime_characters.json");
    server.mock(|when, then| {
        when.method(GET).path("/anime/1/characters");
        then.status(200)
            .header("content-type", "application/json")
            .body(body);
    });

    let summary = ingest.scrape_anime_characters(&resume_opts()).await.unwrap();
    assert_eq!(summary.pages, 1);
    assert_eq!(summary.fetched, 3);

    let cast = db.anime_relation.characters_for(anime_id).await.unwrap();
    assert_eq!(cast.len(), 3);
    assert_eq!(cast[0].name, "Jet Black");
    assert_eq!(cast[0].role, "Main");
    assert_eq!(cast[2].name, "Punch");
    assert_eq!(cast[2].role, "Supporting");

    let voices = db.anime_relation.voice_actors_for(anime_id).await.unwrap();
    assert_eq!(voices.len(), 4);
    assert!(
        voices
            .iter()
            .any(|v| v.name == "Blum, Steven" && v.language == "English")
    );

    // Stub rows exist for every referenced character and person.
    assert!(db.character.select_by_mal_id(13271).await.unwrap().is_some());
    assert!(db.people.select_by_mal_id(68).await.unwrap().is_some());

    let progress = db
        .progress
        .select(JOB_ANIME_CHARACTERS)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(progress.last_mal_id, 1);
    assert!(progress.finished);
}

#[sqlx::test]
async fn cast_job_skips_entries_gone_upstream(pool: PgPool) {
    let server = MockServer::start();
    let (db, ingest) = ingest_service(pool, &server);
    db.anime.upsert(&sample_anime(1, "Cowboy Bebop")).await.unwrap();
    let trigun_id = db.anime.upsert(&sample_anime(6, "Trigun")).await.unwrap();

    server.mock(|when, then| {
        when.method(GET).path("/anime/1/characters");
        then.status(404)
            .header("content-type", "application/json")
            .body(r#"{"status":404,"type":"BadResponseException","message":"Resource does not exist"}"#);
    });
    let body = get_response("anime_characters.json");
    server.mock(|when, then| {
        when.method(GET).path("/anime/6/characters");
        then.status(200)
            .header("content-type", "application/json")
            .body(body);
    });

    let summary = ingest.scrape_anime_characters(&resume_opts()).await.unwrap();

    assert_eq!(summary.skipped, 1);
    assert_eq!(summary.pages, 1);
    assert_eq!(
        db.anime_relation.characters_for(trigun_id).await.unwrap().len(),
        3
    );

    // The skip still advances the checkpoint.
    let progress = db
        .progress
        .select(JOB_ANIME_CHARACTERS)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(progress.last_mal_id, 6);
    assert!(progress.finished);
}

#[sqlx::test]
async fn manga_cast_job_links_characters(pool: PgPool) {
    let server = MockServer::start();
    let (db, ingest) = ingest_service(pool, &server);
    let manga_id = db.manga.upsert(&sample_manga(1, "Monster")).await.unwrap();

    let body = get_response("manga_characters.json");
    server.mock(|when, then| {
        when.method(GET).path("/manga/1/characters");
        then.status(200)
            .header("content-type", "application/json")
            .body(body);
    });

    ingest.scrape_manga_characters(&resume_opts()).await.unwrap();

    let cast = db.manga_relation.characters_for(manga_id).await.unwrap();
    assert_eq!(cast.len(), 3);
    assert_eq!(cast[0].name, "Liebert, Johan");
    assert_eq!(cast[0].role, "Main");
    assert_eq!(cast[2].name, "Fortner, Nina");
    assert_eq!(cast[2].role, "Supporting");
}
