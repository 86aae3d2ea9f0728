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
use crate::model::MangaModel;
use crate::model::MangaSearchOptBuilder;
use crate::service::catalog_service::MangaDetail;
use crate::service::catalog_service::Paginated;
use crate::service::error::ServiceError;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/manga", get(search))
        .route("/manga/{id}", get(detail))
}

#[derive(Deserialize, Default)]
struct MangaQuery {
    q: Option<String>,
    genre_id: Option<i64>,
    status: Option<String>,
    manga_type: Option<String>,
    order_by: Option<String>,
    page: Option<u32>,
    per_page: Option<u32>,
}

async fn search(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<MangaQuery>,
) -> Result<ApiResponse<Paginated<MangaModel>>, ApiError> {
    let order_by = parse_order(query.order_by.as_deref())?;
    let opt = MangaSearchOptBuilder::default()
        .query(query.q)
        .genre_id(query.genre_id)
        .status(query.status)
        .manga_type(query.manga_type)
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
        state.services.catalog.search_manga(&opt).await?,
    ))
}

async fn detail(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<ApiResponse<MangaDetail>, ApiError> {
    let detail = state
        .services
        .catalog
        .manga_detail(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Manga not found".to_string()))?;
    Ok(ApiResponse::ok(detail))
}
