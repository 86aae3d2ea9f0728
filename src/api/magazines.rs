use axum::Router;
use axum::extract::State;
use axum::routing::get;
use serde::Deserialize;

use crate::api::AppState;
use crate::api::error::ApiError;
use crate::api::extract::ApiQuery;
use crate::api::page_of;
use crate::api::per_page_of;
use crate::api::response::ApiResponse;
use crate::model::MagazineModel;
use crate::service::catalog_service::Paginated;

pub fn router() -> Router<AppState> {
    Router::new().route("/magazines", get(list))
}

#[derive(Deserialize, Default)]
struct ListQuery {
    q: Option<String>,
    page: Option<u32>,
    per_page: Option<u32>,
}

async fn list(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<ListQuery>,
) -> Result<ApiResponse<Paginated<MagazineModel>>, ApiError> {
    let page = state
        .services
        .catalog
        .list_magazines(
            query.q.as_deref(),
            page_of(query.page),
            per_page_of(query.per_page),
        )
        .await?;
    Ok(ApiResponse::ok(page))
}
