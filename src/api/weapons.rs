//! Weapon endpoints
//!
//! GET /weapons              - The six weapon categories
//! GET /weapon/:id           - Weapon detail with ammo (`weapon: null` when unknown)
//! GET /weapons/:category    - Weapons in a category (`?prev_weapon_id=` echoed back)

use armory_core::{ArmoryStore, Weapon, WeaponCategory, WeaponDetail};
use axum::{
    extract::{Extension, Path, Query},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use super::{not_found, ApiError, ApiResponse, ApiResult};

/// One entry of the category index.
#[derive(Debug, Serialize)]
pub struct CategorySummary {
    pub key: &'static str,
    pub label: &'static str,
}

/// Weapons listed under a category key.
#[derive(Debug, Serialize)]
pub struct CategoryListing {
    pub category: String,
    pub label: Option<&'static str>,
    pub weapons: Vec<Weapon>,
    pub prev_weapon_id: Option<i64>,
}

/// Query string of the category page. Kept as raw text so an empty or
/// malformed value is ignored instead of rejecting the request.
#[derive(Debug, Default, Deserialize)]
pub struct CategoryParams {
    /// Weapon the visitor navigated back from
    #[serde(default)]
    pub prev_weapon_id: Option<String>,
}

impl CategoryParams {
    fn prev_weapon_id(&self) -> Option<i64> {
        self.prev_weapon_id
            .as_deref()
            .and_then(|raw| raw.trim().parse().ok())
    }
}

pub fn weapons_routes() -> Router {
    Router::new()
        .route("/weapons", get(list_categories))
        .route("/weapon/:id", get(weapon_detail))
        .route("/weapons/:category", get(weapons_in_category))
}

async fn list_categories() -> Json<ApiResponse<Vec<CategorySummary>>> {
    let categories = WeaponCategory::ALL
        .iter()
        .map(|c| CategorySummary {
            key: c.as_str(),
            label: c.label(),
        })
        .collect();
    Json(ApiResponse::success(categories))
}

async fn weapon_detail(
    Extension(store): Extension<ArmoryStore>,
    Path(raw_id): Path<String>,
) -> Response {
    let Ok(id) = raw_id.parse::<i64>() else {
        return not_found().await;
    };

    match store.weapon_detail(id).await {
        Ok(detail) => Json(ApiResponse::<WeaponDetail>::success(detail)).into_response(),
        Err(e) => ApiError(e).into_response(),
    }
}

async fn weapons_in_category(
    Extension(store): Extension<ArmoryStore>,
    Path(category): Path<String>,
    Query(params): Query<CategoryParams>,
) -> ApiResult<CategoryListing> {
    let weapons = store.weapons_by_category_key(&category).await?;
    let label = WeaponCategory::parse(&category).map(|c| c.label());

    Ok(Json(ApiResponse::success(CategoryListing {
        category,
        label,
        weapons,
        prev_weapon_id: params.prev_weapon_id(),
    })))
}
