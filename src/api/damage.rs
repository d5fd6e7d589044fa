//! Damage simulator endpoints
//!
//! GET  /damage_simulator - Weapons and hit parts available to the form
//! POST /damage_simulator - Simulate one hit (form: weapon, hit_part, distance)

use armory_core::{
    damage::FALLOFF_STEP_DISTANCE, simulate_query, ArmoryStore, DamageQuery, DamageResult, Error,
    HitPart, WeaponCategory, BASE_HEALTH,
};
use axum::{extract::Extension, routing::get, Form, Json, Router};
use serde::{Deserialize, Serialize};

use super::{ApiResponse, ApiResult};

/// Weapon choice offered by the form.
#[derive(Debug, Serialize)]
pub struct WeaponOption {
    pub id: i64,
    pub name: String,
    pub category: Option<WeaponCategory>,
    pub damage: i64,
}

/// Simulator form descriptor.
#[derive(Debug, Serialize)]
pub struct SimulatorPage {
    pub weapons: Vec<WeaponOption>,
    pub hit_parts: Vec<&'static str>,
    pub base_health: i64,
    pub falloff_step_distance: i64,
}

/// Raw form submission; every field is optional so absence can be reported.
#[derive(Debug, Default, Deserialize)]
pub struct SimulatorForm {
    #[serde(default)]
    pub weapon: Option<String>,
    #[serde(default)]
    pub hit_part: Option<String>,
    #[serde(default)]
    pub distance: Option<String>,
}

impl SimulatorForm {
    /// Validate presence and numeric fields.
    pub fn into_query(self) -> Result<DamageQuery, Error> {
        let present = |v: Option<String>| v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty());
        let weapon = present(self.weapon);
        let hit_part = present(self.hit_part);
        let distance = present(self.distance);

        let missing: Vec<&str> = [
            ("weapon", weapon.is_none()),
            ("hit_part", hit_part.is_none()),
            ("distance", distance.is_none()),
        ]
        .into_iter()
        .filter_map(|(name, absent)| absent.then_some(name))
        .collect();

        let (Some(weapon), Some(hit_part), Some(distance)) = (weapon, hit_part, distance) else {
            return Err(Error::Validation(format!(
                "missing required field(s): {}",
                missing.join(", ")
            )));
        };

        let weapon_id = weapon
            .parse::<i64>()
            .map_err(|_| Error::Validation(format!("weapon must be an integer id (got '{weapon}')")))?;
        let distance = distance
            .parse::<i64>()
            .map_err(|_| Error::Validation(format!("distance must be an integer (got '{distance}')")))?;

        Ok(DamageQuery {
            weapon_id,
            hit_part,
            distance,
        })
    }
}

pub fn damage_routes() -> Router {
    Router::new().route("/damage_simulator", get(simulator_page).post(run_simulation))
}

async fn simulator_page(Extension(store): Extension<ArmoryStore>) -> ApiResult<SimulatorPage> {
    let weapons = store
        .list_weapons()
        .await?
        .into_iter()
        .map(|w| WeaponOption {
            category: w.effective_category(),
            id: w.id,
            name: w.name,
            damage: w.damage,
        })
        .collect();

    Ok(Json(ApiResponse::success(SimulatorPage {
        weapons,
        hit_parts: HitPart::CHOICES.to_vec(),
        base_health: BASE_HEALTH,
        falloff_step_distance: FALLOFF_STEP_DISTANCE,
    })))
}

async fn run_simulation(
    Extension(store): Extension<ArmoryStore>,
    Form(form): Form<SimulatorForm>,
) -> ApiResult<DamageResult> {
    let query = form.into_query()?;
    let result = simulate_query(&store, &query).await?;
    Ok(Json(ApiResponse::success(result)))
}
