use super::operators::{write_country, write_legacy_ability, write_operator};
use super::weapons::{write_ammo, write_ammo_link, write_weapon};
use super::ArmoryStore;
use crate::error::Result;
use crate::types::{Ammo, OperatorRow, Weapon};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Reference data bundle loaded by `armory import`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReferenceData {
    /// Countries referenced by operators
    #[serde(default)]
    pub countries: Vec<CountryRecord>,
    /// Weapons
    #[serde(default)]
    pub weapons: Vec<Weapon>,
    /// Ammunition and the weapons that take it
    #[serde(default)]
    pub ammo: Vec<AmmoRecord>,
    /// Operators
    #[serde(default)]
    pub operators: Vec<OperatorRecord>,
}

/// A country row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountryRecord {
    /// Country id
    pub id: i64,
    /// Country name
    pub name: String,
}

/// An ammo row plus its weapon links.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmmoRecord {
    /// Ammo id
    pub id: i64,
    /// Display name
    pub name: String,
    /// Description
    #[serde(default)]
    pub info: Option<String>,
    /// Weapons that accept this ammo
    #[serde(default)]
    pub weapon_ids: Vec<i64>,
}

/// An operator in the flattened layout, optionally with legacy ability rows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperatorRecord {
    /// Operator id
    pub id: i64,
    /// Operator name
    pub name: String,
    /// Biography
    #[serde(default)]
    pub info: Option<String>,
    /// Country id
    #[serde(default)]
    pub country_id: Option<i64>,
    /// Passive trait
    #[serde(default, rename = "trait")]
    pub trait_name: Option<String>,
    /// Tactical gear
    #[serde(default)]
    pub tactical_gear: Option<String>,
    /// First gadget
    #[serde(default)]
    pub gadget1: Option<String>,
    /// Second gadget
    #[serde(default)]
    pub gadget2: Option<String>,
    /// Abilities stored in the join-table layout
    #[serde(default)]
    pub legacy_abilities: Vec<LegacyAbilityRecord>,
}

/// One row of the legacy `Ability` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LegacyAbilityRecord {
    /// Ability id
    pub ability_id: i64,
    /// Passive trait
    #[serde(default, rename = "trait")]
    pub trait_name: Option<String>,
    /// Tactical gear
    #[serde(default)]
    pub tactical_gear: Option<String>,
    /// First gadget
    #[serde(default)]
    pub gadget1: Option<String>,
    /// Second gadget
    #[serde(default)]
    pub gadget2: Option<String>,
}

impl ArmoryStore {
    // ── Import ──────────────────────────────────────────────────

    /// Upsert a reference data bundle. Re-importing the same bundle is a no-op.
    ///
    /// The bundle is written in one transaction: if any row fails (for
    /// example an ammo link to a weapon that does not exist), nothing from
    /// the bundle is kept.
    pub async fn import(&self, data: &ReferenceData) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        for country in &data.countries {
            write_country(&mut tx, country.id, &country.name).await?;
        }

        for weapon in &data.weapons {
            write_weapon(&mut tx, weapon).await?;
        }

        for ammo in &data.ammo {
            write_ammo(
                &mut tx,
                &Ammo {
                    id: ammo.id,
                    name: ammo.name.clone(),
                    info: ammo.info.clone(),
                },
            )
            .await?;
            for weapon_id in &ammo.weapon_ids {
                write_ammo_link(&mut tx, *weapon_id, ammo.id).await?;
            }
        }

        for op in &data.operators {
            let row = OperatorRow {
                id: op.id,
                name: op.name.clone(),
                info: op.info.clone(),
                country_name: None,
                trait_name: op.trait_name.clone(),
                tactical_gear: op.tactical_gear.clone(),
                gadget1: op.gadget1.clone(),
                gadget2: op.gadget2.clone(),
            };
            write_operator(&mut tx, &row, op.country_id).await?;

            for ability in &op.legacy_abilities {
                let ability_row = OperatorRow {
                    trait_name: ability.trait_name.clone(),
                    tactical_gear: ability.tactical_gear.clone(),
                    gadget1: ability.gadget1.clone(),
                    gadget2: ability.gadget2.clone(),
                    ..Default::default()
                };
                write_legacy_ability(&mut tx, op.id, ability.ability_id, &ability_row).await?;
            }
        }

        tx.commit().await?;

        info!(
            countries = data.countries.len(),
            weapons = data.weapons.len(),
            ammo = data.ammo.len(),
            operators = data.operators.len(),
            "Reference data imported"
        );
        Ok(())
    }
}
