//! Authenticated watch/read list endpoints.

use axum::Router;
use axum::extract::State;
use axum::routing::get;
use axum::routing::put;
use serde::Deserialize;

use crate::api::AppState;
use crate::api::error::ApiError;
use crate::api::extract::ApiJson;
use crate::api::extract::ApiPath;
use crate::api::extract::ApiQuery;
use crate::api::extract::AuthUser;
use crate::api::response::ApiResponse;
use crate::model::AnimeTrackingModel;
use crate::model::MangaTrackingModel;
use crate::model::ReadStatus;
use crate::model::TrackedAnimeRow;
use crate::model::TrackedMangaRow;
use crate::model::WatchStatus;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/trackings/anime", get(list_anime))
        .route(
            "/trackings/anime/{anime_id}",
            put(set_anime).delete(remove_anime),
        )
        .route("/trackings/manga", get(list_manga))
        .route(
            "/trackings/manga/{manga_id}",
            put(set_manga).delete(remove_manga),
        )
}

#[derive(Deserialize, Default)]
struct StatusQuery {
    status: Option<String>,
}

#[derive(Deserialize)]
struct SetAnimePayload {
    status: WatchStatus,
    score: Option<i32>,
    episodes_watched: Option<i32>,
}

#[derive(Deserialize)]
struct SetMangaPayload {
    status: ReadStatus,
    score: Option<i32>,
    chapters_read: Option<i32>,
    volumes_read: Option<i32>,
}

async fn list_anime(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiQuery(query): ApiQuery<StatusQuery>,
) -> Result<ApiResponse<Vec<TrackedAnimeRow>>, ApiError> {
    let status = query
        .status
        .as_deref()
        .map(parse_watch_status)
        .transpose()?;
    Ok(ApiResponse::ok(
        state
            .services
            .tracking
            .list_anime(auth.user_id, status)
            .await?,
    ))
}

async fn set_anime(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(anime_id): ApiPath<i64>,
    ApiJson(payload): ApiJson<SetAnimePayload>,
) -> Result<ApiResponse<AnimeTrackingModel>, ApiError> {
    let tracking = state
        .services
        .tracking
        .set_anime(
            auth.user_id,
            anime_id,
            payload.status,
            payload.score,
            payload.episodes_watched,
        )
        .await?;
    Ok(ApiResponse::ok(tracking))
}

async fn remove_anime(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(anime_id): ApiPath<i64>,
) -> Result<ApiResponse<()>, ApiError> {
    state
        .services
        .tracking
        .remove_anime(auth.user_id, anime_id)
        .await?;
    Ok(ApiResponse::message("Tracking removed"))
}

async fn list_manga(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiQuery(query): ApiQuery<StatusQuery>,
) -> Result<ApiResponse<Vec<TrackedMangaRow>>, ApiError> {
    let status = query
        .status
        .as_deref()
        .map(parse_read_status)
        .transpose()?;
    Ok(ApiResponse::ok(
        state
            .services
            .tracking
            .list_manga(auth.user_id, status)
            .await?,
    ))
}

async fn set_manga(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(manga_id): ApiPath<i64>,
    ApiJson(payload): ApiJson<SetMangaPayload>,
) -> Result<ApiResponse<MangaTrackingModel>, ApiError> {
    let tracking = state
        .services
        .tracking
        .set_manga(
            auth.user_id,
            manga_id,
            payload.status,
            payload.score,
            payload.chapters_read,
            payload.volumes_read,
        )
        .await?;
    Ok(ApiResponse::ok(tracking))
}

async fn remove_manga(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(manga_id): ApiPath<i64>,
) -> Result<ApiResponse<()>, ApiError> {
    state
        .services
        .tracking
        .remove_manga(auth.user_id, manga_id)
        .await?;
    Ok(ApiResponse::message("Tracking removed"))
}

fn parse_watch_status(raw: &str) -> Result<WatchStatus, ApiError> {
    match raw {
        "watching" => Ok(WatchStatus::Watching),
        "completed" => Ok(WatchStatus::Completed),
        "on_hold" => Ok(WatchStatus::OnHold),
        "dropped" => Ok(WatchStatus::Dropped),
        "plan_to_watch" => Ok(WatchStatus::PlanToWatch),
        other => Err(ApiError::BadRequest(format!(
            "Unknown status value: {other}"
        ))),
    }
}

fn parse_read_status(raw: &str) -> Result<ReadStatus, ApiError> {
    match raw {
        "reading" => Ok(ReadStatus::Reading),
        "completed" => Ok(ReadStatus::Completed),
        "on_hold" => Ok(ReadStatus::OnHold),
        "dropped" => Ok(ReadStatus::Dropped),
        "plan_to_read" => Ok(ReadStatus::PlanToRead),
        other => Err(ApiError::BadRequest(format!(
            "Unknown status value: {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_strings_match_database_enums() {
        assert!(matches!(
            parse_watch_status("plan_to_watch"),
            Ok(WatchStatus::PlanToWatch)
        ));
        assert!(matches!(
            parse_read_status("plan_to_read"),
            Ok(ReadStatus::PlanToRead)
        ));
        assert!(parse_watch_status("planning").is_err());
        assert!(parse_read_status("").is_err());
    }
}
