use axum::Router;
use axum::extract::State;
use axum::routing::get;
use serde::Deserialize;

use crate::api::AppState;
use crate::api::error::ApiError;
use crate::api::extract::ApiPath;
use crate::api::extract::ApiQuery;
use crate::api::page_of;
use crate::api::parse_order;
use crate::api::per_page_of;
use crate::api::response::ApiResponse;
use crate::model::AnimeModel;
use crate::model::AnimeSearchOptBuilder;
use crate::model::SeasonRow;
use crate::service::catalog_service::AnimeDetail;
use crate::service::catalog_service::Paginated;
use crate::service::error::ServiceError;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/anime", get(search))
        .route("/anime/seasons", get(seasons))
        .route("/anime/{id}", get(detail))
}

#[derive(Deserialize, Default)]
struct AnimeQuery {
    q: Option<String>,
    genre_id: Option<i64>,
    season: Option<String>,
    year: Option<i32>,
    status: Option<String>,
    anime_type: Option<String>,
    order_by: Option<String>,
    page: Option<u32>,
    per_page: Option<u32>,
}

async fn search(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<AnimeQuery>,
) -> Result<ApiResponse<Paginated<AnimeModel>>, ApiError> {
    let order_by = parse_order(query.order_by.as_deref())?;
    let opt = AnimeSearchOptBuilder::default()
        .query(query.q)
        .genre_id(query.genre_id)
        .season(query.season.map(|s| s.to_lowercase()))
        .year(query.year)
        .status(query.status)
        .anime_type(query.anime_type)
        .order_by(order_by)
        .page(page_of(query.page))
        .per_page(per_page_of(query.per_page))
        .build()
        .map_err(|e| {
            ApiError::Service(ServiceError::UnexpectedResult {
                message: e.to_string(),
            })
        })?;

    Ok(ApiResponse::ok(
        state.services.catalog.search_anime(&opt).await?,
    ))
}

async fn seasons(
    State(state): State<AppState>,
) -> Result<ApiResponse<Vec<SeasonRow>>, ApiError> {
    Ok(ApiResponse::ok(
        state.services.catalog.anime_seasons().await?,
    ))
}

async fn detail(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<ApiResponse<AnimeDetail>, ApiError> {
    let detail = state
        .services
        .catalog
        .anime_detail(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Anime not found".to_string()))?;
    Ok(ApiResponse::ok(detail))
}
