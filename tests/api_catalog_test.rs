//! HTTP-level tests for the public catalog endpoints.

use axum::http::StatusCode;
use sqlx::PgPool;
use trackyrs::model::GenreKind;
use trackyrs::model::GenreRole;
use trackyrs::model::ProducerRole;
use trackyrs::repository::Repository;

mod common;

use common::body_json;
use common::build_test_app;
use common::get;
use common::sample_anime;
use common::sample_manga;

#[sqlx::test]
async fn health_endpoint_wraps_in_envelope(pool: PgPool) {
    let app = build_test_app(pool);

    let response = get(&app, "/health").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"], "ok");
    assert!(body.get("message").is_none());
}

#[sqlx::test]
async fn anime_search_paginates(pool: PgPool) {
    let db = Repository::from_pool(pool.clone());
    db.anime.upsert(&sample_anime(47, "Akira")).await.unwrap();
    db.anime.upsert(&sample_anime(1, "Cowboy Bebop")).await.unwrap();
    db.anime.upsert(&sample_anime(6, "Trigun")).await.unwrap();
    let app = build_test_app(pool);

    let response = get(&app, "/api/anime?order_by=title&per_page=2").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"]["total"], 3);
    assert_eq!(body["data"]["page"], 1);
    assert_eq!(body["data"]["per_page"], 2);
    let items = body["data"]["items"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["title"], "Akira");
    assert_eq!(items[1]["title"], "Cowboy Bebop");

    let response = get(&app, "/api/anime?order_by=title&per_page=2&page=2").await;
    let body = body_json(response).await;
    let items = body["data"]["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["title"], "Trigun");

    // Out-of-range values are clamped, not rejected.
    let response = get(&app, "/api/anime?per_page=500").await;
    let body = body_json(response).await;
    assert_eq!(body["data"]["per_page"], 50);
}

#[sqlx::test]
async fn anime_search_rejects_unknown_order(pool: PgPool) {
    let app = build_test_app(pool);

    let response = get(&app, "/api/anime?order_by=rating").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Unknown order_by value: rating");
}

#[sqlx::test]
async fn anime_detail_includes_relations(pool: PgPool) {
    let db = Repository::from_pool(pool.clone());

    let mut bebop = sample_anime(1, "Cowboy Bebop");
    bebop.episodes = Some(26);
    let anime_id = db.anime.upsert(&bebop).await.unwrap();

    let genre_id = db
        .genre
        .upsert_ref(1, GenreKind::Anime, "Action", "https://example.com/action")
        .await
        .unwrap();
    db.anime_relation
        .replace_genres(anime_id, &[(genre_id, GenreRole::Genre)])
        .await
        .unwrap();

    let sunrise = db
        .producer
        .upsert_ref(14, "Sunrise", "https://example.com/sunrise")
        .await
        .unwrap();
    db.anime_relation
        .replace_producers(anime_id, &[(sunrise, ProducerRole::Studio)])
        .await
        .unwrap();

    let spike = db
        .character
        .upsert_ref(1, "Spike Spiegel", "https://example.com/spike", None)
        .await
        .unwrap();
    let yamadera = db
        .people
        .upsert_ref(11, "Yamadera, Kouichi", "https://example.com/yamadera", None)
        .await
        .unwrap();
    db.anime_relation
        .replace_cast(
            anime_id,
            &[(spike, "Main".to_string())],
            &[(spike, yamadera, "Japanese".to_string())],
        )
        .await
        .unwrap();

    let app = build_test_app(pool);
    let response = get(&app, &format!("/api/anime/{anime_id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let data = &body["data"];

    // Entity columns are flattened next to the relation arrays.
    assert_eq!(data["title"], "Cowboy Bebop");
    assert_eq!(data["episodes"], 26);
    assert_eq!(data["genres"][0]["name"], "Action");
    assert_eq!(data["genres"][0]["role"], "genre");
    assert_eq!(data["producers"][0]["name"], "Sunrise");
    assert_eq!(data["producers"][0]["role"], "studio");

    let cast = data["cast"].as_array().unwrap();
    assert_eq!(cast.len(), 1);
    assert_eq!(cast[0]["name"], "Spike Spiegel");
    assert_eq!(cast[0]["role"], "Main");
    assert_eq!(cast[0]["voice_actors"][0]["name"], "Yamadera, Kouichi");
    assert_eq!(cast[0]["voice_actors"][0]["language"], "Japanese");
}

#[sqlx::test]
async fn anime_detail_handles_bad_ids(pool: PgPool) {
    let app = build_test_app(pool);

    let response = get(&app, "/api/anime/999").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Anime not found");

    // A non-numeric id is a client error, still in the envelope.
    let response = get(&app, "/api/anime/bebop").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["success"], false);
}

#[sqlx::test]
async fn anime_seasons_lists_groups(pool: PgPool) {
    let db = Repository::from_pool(pool.clone());
    let mut bebop = sample_anime(1, "Cowboy Bebop");
    bebop.season = Some("spring".to_string());
    bebop.year = Some(1998);
    db.anime.upsert(&bebop).await.unwrap();
    let mut naruto = sample_anime(20, "Naruto");
    naruto.season = Some("fall".to_string());
    naruto.year = Some(2002);
    db.anime.upsert(&naruto).await.unwrap();

    let app = build_test_app(pool);
    let response = get(&app, "/api/anime/seasons").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let seasons = body["data"].as_array().unwrap();
    assert_eq!(seasons.len(), 2);
    assert_eq!(seasons[0]["year"], 2002);
    assert_eq!(seasons[0]["season"], "fall");
    assert_eq!(seasons[0]["count"], 1);
}

#[sqlx::test]
async fn manga_search_and_detail(pool: PgPool) {
    let db = Repository::from_pool(pool.clone());
    let mut monster = sample_manga(1, "Monster");
    monster.chapters = Some(162);
    let manga_id = db.manga.upsert(&monster).await.unwrap();
    db.manga.upsert(&sample_manga(2, "Berserk")).await.unwrap();

    let urasawa = db
        .people
        .upsert_ref(1867, "Urasawa, Naoki", "https://example.com/urasawa", None)
        .await
        .unwrap();
    db.manga_relation
        .replace_authors(manga_id, &[urasawa])
        .await
        .unwrap();
    let magazine = db
        .magazine
        .upsert_ref(1, "Big Comic Original", "https://example.com/bco")
        .await
        .unwrap();
    db.manga_relation
        .replace_magazines(manga_id, &[magazine])
        .await
        .unwrap();

    let app = build_test_app(pool);

    let response = get(&app, "/api/manga?q=monster").await;
    let body = body_json(response).await;
    assert_eq!(body["data"]["total"], 1);
    assert_eq!(body["data"]["items"][0]["title"], "Monster");

    let response = get(&app, &format!("/api/manga/{manga_id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"]["title"], "Monster");
    assert_eq!(body["data"]["chapters"], 162);
    assert_eq!(body["data"]["authors"][0]["name"], "Urasawa, Naoki");
    assert_eq!(body["data"]["magazines"][0]["name"], "Big Comic Original");
}

#[sqlx::test]
async fn characters_list_filters_by_name(pool: PgPool) {
    let db = Repository::from_pool(pool.clone());
    let spike = db
        .character
        .upsert_ref(1, "Spike Spiegel", "https://example.com/spike", None)
        .await
        .unwrap();
    db.character
        .upsert_ref(2, "Faye Valentine", "https://example.com/faye", None)
        .await
        .unwrap();

    let app = build_test_app(pool);

    let response = get(&app, "/api/characters?q=spike").await;
    let body = body_json(response).await;
    assert_eq!(body["data"]["total"], 1);
    assert_eq!(body["data"]["items"][0]["name"], "Spike Spiegel");

    let response = get(&app, &format!("/api/characters/{spike}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["name"], "Spike Spiegel");

    let response = get(&app, "/api/characters/424242").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["message"], "Character not found");
}

#[sqlx::test]
async fn genres_endpoint_filters_by_kind(pool: PgPool) {
    let db = Repository::from_pool(pool.clone());
    db.genre
        .upsert_ref(1, GenreKind::Anime, "Action", "https://example.com/a1")
        .await
        .unwrap();
    db.genre
        .upsert_ref(7, GenreKind::Manga, "Mystery", "https://example.com/m7")
        .await
        .unwrap();

    let app = build_test_app(pool);

    let response = get(&app, "/api/genres").await;
    let body = body_json(response).await;
    let genres = body["data"].as_array().unwrap();
    assert_eq!(genres.len(), 1);
    assert_eq!(genres[0]["name"], "Action");
    assert_eq!(genres[0]["kind"], "anime");

    let response = get(&app, "/api/genres?kind=manga").await;
    let body = body_json(response).await;
    assert_eq!(body["data"][0]["name"], "Mystery");

    let response = get(&app, "/api/genres?kind=podcast").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await["message"],
        "Unknown genre kind: podcast"
    );
}

#[sqlx::test]
async fn producers_and_magazines_lists(pool: PgPool) {
    let db = Repository::from_pool(pool.clone());
    db.producer
        .upsert_ref(14, "Sunrise", "https://example.com/sunrise")
        .await
        .unwrap();
    db.producer
        .upsert_ref(11, "Madhouse", "https://example.com/madhouse")
        .await
        .unwrap();
    db.magazine
        .upsert_ref(2, "Young Animal", "https://example.com/ya")
        .await
        .unwrap();

    let app = build_test_app(pool);

    let response = get(&app, "/api/producers").await;
    let body = body_json(response).await;
    assert_eq!(body["data"]["total"], 2);
    // Name order.
    assert_eq!(body["data"]["items"][0]["name"], "Madhouse");

    let response = get(&app, "/api/producers?q=sun").await;
    let body = body_json(response).await;
    assert_eq!(body["data"]["total"], 1);

    let response = get(&app, "/api/magazines?q=animal").await;
    let body = body_json(response).await;
    assert_eq!(body["data"]["total"], 1);
    assert_eq!(body["data"]["items"][0]["name"], "Young Animal");
}

#[sqlx::test]
async fn people_detail_and_404(pool: PgPool) {
    let db = Repository::from_pool(pool.clone());
    let person_id = db
        .people
        .upsert_ref(1867, "Urasawa, Naoki", "https://example.com/urasawa", None)
        .await
        .unwrap();

    let app = build_test_app(pool);

    let response = get(&app, &format!("/api/people/{person_id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["name"], "Urasawa, Naoki");

    let response = get(&app, "/api/people/424242").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["message"], "Person not found");
}
