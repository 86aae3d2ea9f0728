use axum::Router;
use axum::extract::State;
use axum::routing::get;
use serde::Deserialize;

use crate::api::AppState;
use crate::api::error::ApiError;
use crate::api::extract::ApiQuery;
use crate::api::response::ApiResponse;
use crate::model::GenreKind;
use crate::model::GenreModel;

pub fn router() -> Router<AppState> {
    Router::new().route("/genres", get(list))
}

#[derive(Deserialize, Default)]
struct GenresQuery {
    kind: Option<String>,
}

async fn list(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<GenresQuery>,
) -> Result<ApiResponse<Vec<GenreModel>>, ApiError> {
    let kind = match query.kind.as_deref() {
        None | Some("anime") => GenreKind::Anime,
        Some("manga") => GenreKind::Manga,
        Some(other) => {
            return Err(ApiError::BadRequest(format!(
                "Unknown genre kind: {other}"
            )));
        }
    };
    Ok(ApiResponse::ok(
        state.services.catalog.list_genres(Some(kind)).await?,
    ))
}
