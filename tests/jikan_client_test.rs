//! Tests for the Jikan client using a mock server.
//!
//! Covers envelope parsing, the 429 retry loop, and error mapping for the
//! statuses the client treats specially.

use std::time::Duration;

use httpmock::Method::GET;
use httpmock::MockServer;
use trackyrs::config::Config;
use trackyrs::jikan::JikanClient;
use trackyrs::jikan::error::JikanError;
use trackyrs::model::GenreKind;

mod common;

use common::get_response;

fn test_client(server: &MockServer, max_retries: u32, retry_delay: Duration) -> JikanClient {
    let config = Config {
        jikan_base_url: server.url(""),
        jikan_max_retries: max_retries,
        jikan_retry_delay: retry_delay,
        ..Config::default()
    };
    JikanClient::new(&config)
}

#[tokio::test]
async fn anime_page_parses_envelope() {
    let server = MockServer::start();
    let client = test_client(&server, 0, Duration::from_millis(50));

    let mock = server.mock(|when, then| {
        when.method(GET).path("/anime").query_param("page", "1");
        then.status(200)
            .header("content-type", "application/json")
            .body(get_response("anime_page1.json"));
    });

    let page = client.anime_page(1).await.expect("Failed to fetch page");

    mock.assert();
    let pagination = page.pagination.expect("Listing should be paginated");
    assert_eq!(pagination.current_page, 1);
    assert_eq!(pagination.last_visible_page, 2);
    assert!(pagination.has_next_page);

    assert_eq!(page.data.len(), 2);
    let bebop = &page.data[0];
    assert_eq!(bebop.mal_id, 1);
    assert_eq!(bebop.title, "Cowboy Bebop");
    assert_eq!(bebop.anime_type.as_deref(), Some("TV"));
    assert_eq!(bebop.episodes, Some(26));
    assert_eq!(bebop.year, Some(1998));
    assert_eq!(bebop.genres.len(), 2);
    assert_eq!(bebop.themes.len(), 2);
    assert_eq!(bebop.studios[0].name, "Sunrise");
    assert!(
        bebop
            .images
            .as_ref()
            .and_then(|images| images.display_url())
            .is_some_and(|url| url.ends_with("19644.jpg"))
    );
    assert!(
        bebop
            .aired
            .as_ref()
            .and_then(|range| range.from)
            .is_some_and(|from| from.to_rfc3339().starts_with("1998-04-03"))
    );
}

#[tokio::test]
async fn genres_endpoint_has_no_pagination() {
    let server = MockServer::start();
    let client = test_client(&server, 0, Duration::from_millis(50));

    let mock = server.mock(|when, then| {
        when.method(GET).path("/genres/manga");
        then.status(200)
            .header("content-type", "application/json")
            .body(get_response("genres_manga.json"));
    });

    let page = client
        .genres(GenreKind::Manga)
        .await
        .expect("Failed to fetch genres");

    mock.assert();
    assert!(page.pagination.is_none());
    assert_eq!(page.data.len(), 3);
    assert_eq!(page.data[0].name, "Action");
}

#[tokio::test]
async fn rate_limited_request_recovers_after_retry() {
    let server = MockServer::start();
    let client = test_client(&server, 3, Duration::from_millis(300));

    let mut limited = server.mock(|when, then| {
        when.method(GET).path("/genres/anime");
        then.status(429)
            .header("content-type", "application/json")
            .body(r#"{"status":429,"type":"RateLimitException","message":"You are being rate-limited."}"#);
    });

    let (result, ()) = tokio::join!(client.genres(GenreKind::Anime), async {
        // Let the first request hit the 429, then swap the mock for a 200
        // before the retry fires.
        tokio::time::sleep(Duration::from_millis(100)).await;
        limited.delete();
        let _ok = server.mock(|when, then| {
            when.method(GET).path("/genres/anime");
            then.status(200)
                .header("content-type", "application/json")
                .body(get_response("genres_anime.json"));
        });
    });

    let page = result.expect("Request should succeed once the 429 clears");
    assert_eq!(page.data.len(), 4);
}

#[tokio::test]
async fn rate_limit_errors_after_max_retries() {
    let server = MockServer::start();
    let client = test_client(&server, 1, Duration::from_millis(50));

    let mock = server.mock(|when, then| {
        when.method(GET).path("/anime").query_param("page", "1");
        then.status(429)
            .header("content-type", "application/json")
            .body(r#"{"status":429,"type":"RateLimitException","message":"You are being rate-limited."}"#);
    });

    let err = client.anime_page(1).await.unwrap_err();

    // One initial request plus one retry.
    mock.assert_hits(2);
    match err {
        JikanError::RateLimited { attempts, path } => {
            assert_eq!(attempts, 2);
            assert_eq!(path, "/anime?page=1");
        }
        other => panic!("Expected RateLimited, got {other:?}"),
    }
}

#[tokio::test]
async fn missing_entry_maps_to_not_found() {
    let server = MockServer::start();
    let client = test_client(&server, 0, Duration::from_millis(50));

    let mock = server.mock(|when, then| {
        when.method(GET).path("/anime/999999/characters");
        then.status(404)
            .header("content-type", "application/json")
            .body(r#"{"status":404,"type":"BadResponseException","message":"Resource does not exist"}"#);
    });

    let err = client.anime_characters(999999).await.unwrap_err();

    mock.assert();
    assert!(matches!(err, JikanError::NotFound { path } if path.contains("999999")));
}

#[tokio::test]
async fn server_error_is_not_retried() {
    let server = MockServer::start();
    let client = test_client(&server, 3, Duration::from_millis(50));

    let mock = server.mock(|when, then| {
        when.method(GET).path("/people").query_param("page", "1");
        then.status(500)
            .header("content-type", "application/json")
            .body(r#"{"status":500,"type":"Exception","message":"Something went wrong"}"#);
    });

    let err = client.people_page(1).await.unwrap_err();

    // A 500 must not burn retry attempts.
    mock.assert();
    match err {
        JikanError::ApiError { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "Something went wrong");
        }
        other => panic!("Expected ApiError, got {other:?}"),
    }
}
