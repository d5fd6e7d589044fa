//! Armory Core: domain model and storage for the Armory reference service
//!
//! Provides:
//! - Damage simulation (hit location multiplier + range falloff)
//! - Weapon category classification (explicit column or legacy id ranges)
//! - Aggregation of operator/ability join rows into one record per operator
//! - Salted password hashing
//! - SQLite repository for weapons, operators, accounts and sessions
//!
//! # Architecture
//!
//! ```text
//! HTTP handler ──► ArmoryStore (SQLite)
//!                   │        │
//!          operator_rows   Weapon rows
//!                   │        │
//!      aggregate_operators  WeaponCategory::resolve
//!                                │
//!                          damage::simulate
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod aggregate;
pub mod category;
pub mod damage;
pub mod error;
pub mod password;
pub mod store;
pub mod types;

pub use aggregate::aggregate_operators;
pub use category::{WeaponCategory, CATEGORY_RANGES};
pub use damage::{simulate, DamageOutcome, DamageQuery, DamageResult, HitPart, BASE_HEALTH};
pub use error::{Error, Result};
pub use store::{ArmoryStore, ReferenceData};
pub use types::{
    Account, Ammo, NewAccount, Operator, OperatorRow, Role, Session, Weapon, WeaponDetail,
};

/// Run a simulation against a stored weapon.
///
/// Fails with [`Error::NotFound`] when the weapon id is unknown and with
/// [`Error::Validation`] for a negative distance.
pub async fn simulate_query(store: &ArmoryStore, query: &DamageQuery) -> Result<DamageResult> {
    let weapon = store
        .get_weapon(query.weapon_id)
        .await?
        .ok_or_else(|| Error::NotFound(format!("weapon {}", query.weapon_id)))?;

    let hit_part = HitPart::from_form_value(&query.hit_part);
    let outcome = simulate(weapon.damage, hit_part, query.distance)?;

    tracing::debug!(
        weapon_id = weapon.id,
        hit_part = %query.hit_part,
        distance = query.distance,
        damage = outcome.damage,
        "Damage simulated"
    );

    Ok(DamageResult {
        category: weapon.effective_category(),
        weapon_name: weapon.name,
        hit_part: query.hit_part.clone(),
        distance: query.distance,
        damage: outcome.damage,
        remaining_hp: outcome.remaining_hp,
    })
}
