use axum::Router;
use axum::extract::State;
use axum::routing::get;
use serde::Deserialize;

use crate::api::AppState;
use crate::api::error::ApiError;
use crate::api::extract::ApiPath;
use crate::api::extract::ApiQuery;
use crate::api::page_of;
use crate::api::per_page_of;
use crate::api::response::ApiResponse;
use crate::model::PersonModel;
use crate::service::catalog_service::Paginated;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/people", get(list))
        .route("/people/{id}", get(detail))
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
) -> Result<ApiResponse<Paginated<PersonModel>>, ApiError> {
    let page = state
        .services
        .catalog
        .list_people(
            query.q.as_deref(),
            page_of(query.page),
            per_page_of(query.per_page),
        )
        .await?;
    Ok(ApiResponse::ok(page))
}

async fn detail(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<ApiResponse<PersonModel>, ApiError> {
    let person = state
        .services
        .catalog
        .person_detail(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Person not found".to_string()))?;
    Ok(ApiResponse::ok(person))
}
