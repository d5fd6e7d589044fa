//! Operator endpoints
//!
//! GET /operators      - All operators with abilities folded in
//! GET /operator/:id   - One operator (`data: null` when unknown)

use armory_core::{ArmoryStore, Operator};
use axum::{
    extract::{Extension, Path},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};

use super::{not_found, ApiResponse, ApiResult};

pub fn operators_routes() -> Router {
    Router::new()
        .route("/operators", get(list_operators))
        .route("/operator/:id", get(get_operator))
}

async fn list_operators(Extension(store): Extension<ArmoryStore>) -> ApiResult<Vec<Operator>> {
    let operators = store.list_operators().await?;
    Ok(Json(ApiResponse::success(operators)))
}

async fn get_operator(
    Extension(store): Extension<ArmoryStore>,
    Path(raw_id): Path<String>,
) -> Response {
    // Non-numeric ids do not match the route.
    let Ok(id) = raw_id.parse::<i64>() else {
        return not_found().await;
    };

    match store.get_operator(id).await {
        Ok(operator) => Json(ApiResponse::<Option<Operator>>::success(operator)).into_response(),
        Err(e) => super::ApiError(e).into_response(),
    }
}
