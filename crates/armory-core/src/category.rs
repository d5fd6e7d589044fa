//! Weapon category classification.
//!
//! Current weapon rows carry an explicit `category` column. Rows imported
//! from the older schema generation have no category and are classified by
//! the id interval they fall into ([`CATEGORY_RANGES`]). The range table is
//! only a compatibility path for those rows; an explicit category always wins.

use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// Coarse weapon category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeaponCategory {
    /// Assault rifles
    AssaultRifle,
    /// Submachine guns
    SubmachineGun,
    /// Shotguns
    Shotgun,
    /// Light machine guns
    #[serde(rename = "lightmachine_gun")]
    LightMachineGun,
    /// Designated marksman rifles
    MarksmanRifle,
    /// Bolt-action and anti-materiel rifles
    SniperRifle,
}

/// Legacy id intervals (inclusive) for rows without an explicit category.
pub const CATEGORY_RANGES: [(WeaponCategory, RangeInclusive<i64>); 6] = [
    (WeaponCategory::AssaultRifle, 1..=19),
    (WeaponCategory::SubmachineGun, 20..=27),
    (WeaponCategory::Shotgun, 28..=31),
    (WeaponCategory::LightMachineGun, 32..=35),
    (WeaponCategory::MarksmanRifle, 36..=42),
    (WeaponCategory::SniperRifle, 43..=46),
];

impl WeaponCategory {
    /// All categories in display order.
    pub const ALL: [WeaponCategory; 6] = [
        Self::AssaultRifle,
        Self::SubmachineGun,
        Self::Shotgun,
        Self::LightMachineGun,
        Self::MarksmanRifle,
        Self::SniperRifle,
    ];

    /// Key used in URLs and in the `Weapon.category` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AssaultRifle => "assault_rifle",
            Self::SubmachineGun => "submachine_gun",
            Self::Shotgun => "shotgun",
            Self::LightMachineGun => "lightmachine_gun",
            Self::MarksmanRifle => "marksman_rifle",
            Self::SniperRifle => "sniper_rifle",
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::AssaultRifle => "Assault Rifle",
            Self::SubmachineGun => "Submachine Gun",
            Self::Shotgun => "Shotgun",
            Self::LightMachineGun => "Light Machine Gun",
            Self::MarksmanRifle => "Marksman Rifle",
            Self::SniperRifle => "Sniper Rifle",
        }
    }

    /// Parse a category key. Unknown keys yield `None`.
    pub fn parse(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == key)
    }

    /// Classify a weapon id against the legacy range table.
    pub fn from_weapon_id(id: i64) -> Option<Self> {
        CATEGORY_RANGES
            .iter()
            .find(|(_, range)| range.contains(&id))
            .map(|(category, _)| *category)
    }

    /// Legacy id interval for this category.
    pub fn id_range(&self) -> RangeInclusive<i64> {
        CATEGORY_RANGES
            .iter()
            .find(|(category, _)| category == self)
            .map(|(_, range)| range.clone())
            .unwrap_or(0..=-1)
    }

    /// Effective category of a weapon: explicit column first, then id range.
    ///
    /// An explicit value that is not a known key classifies to `None` rather
    /// than falling back to the id range. Only spaces are trimmed, matching
    /// SQLite's `TRIM()` in the category query.
    pub fn resolve(id: i64, explicit: Option<&str>) -> Option<Self> {
        match explicit.map(|s| s.trim_matches(' ')).filter(|s| !s.is_empty()) {
            Some(key) => Self::parse(key),
            None => Self::from_weapon_id(id),
        }
    }
}

impl std::fmt::Display for WeaponCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
