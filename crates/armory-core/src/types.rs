//! Typed records read from and written to the store.

use crate::category::WeaponCategory;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A weapon as stored in the `Weapon` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Weapon {
    /// Weapon id
    pub id: i64,
    /// Display name
    pub name: String,
    /// Explicit category key; `None` for rows from the id-range schema
    pub category: Option<String>,
    /// Base damage per hit
    pub damage: i64,
    /// Rounds per minute
    pub fire_rate: Option<i64>,
    /// Free-form description
    pub info: Option<String>,
}

impl Weapon {
    /// Effective category (explicit column, else legacy id range).
    pub fn effective_category(&self) -> Option<WeaponCategory> {
        WeaponCategory::resolve(self.id, self.category.as_deref())
    }
}

/// Ammunition compatible with one or more weapons.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ammo {
    /// Ammo id
    pub id: i64,
    /// Display name
    pub name: String,
    /// Free-form description
    pub info: Option<String>,
}

/// Weapon detail view: the weapon (if found) plus its ammo.
#[derive(Debug, Clone, Serialize)]
pub struct WeaponDetail {
    /// Requested weapon; `None` when the id is unknown
    pub weapon: Option<Weapon>,
    /// Effective category of the weapon
    pub category: Option<WeaponCategory>,
    /// Compatible ammunition
    pub ammo: Vec<Ammo>,
}

/// One row of the operator/ability join.
///
/// Flattened rows carry every ability column; legacy join rows usually carry
/// just one. A row with no ability data is still meaningful: it keeps an
/// operator without abilities in the output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OperatorRow {
    /// Operator id (grouping key)
    pub id: i64,
    /// Operator name
    pub name: String,
    /// Biography
    pub info: Option<String>,
    /// Country name from the `Country` join
    pub country_name: Option<String>,
    /// Passive trait
    pub trait_name: Option<String>,
    /// Tactical gear
    pub tactical_gear: Option<String>,
    /// First gadget
    pub gadget1: Option<String>,
    /// Second gadget
    pub gadget2: Option<String>,
}

/// An operator with its abilities folded into one record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operator {
    /// Operator id
    pub id: i64,
    /// Operator name
    pub name: String,
    /// Biography
    pub info: Option<String>,
    /// Country name
    pub country_name: Option<String>,
    /// Passive trait
    #[serde(rename = "trait")]
    pub trait_name: Option<String>,
    /// Tactical gear
    pub tactical_gear: Option<String>,
    /// First gadget
    pub gadget1: Option<String>,
    /// Second gadget
    pub gadget2: Option<String>,
    /// Display lines, e.g. `"Gadget 1: Breaching Charge"`
    pub abilities: Vec<String>,
}

/// Account role.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Regular member
    #[default]
    User,
    /// Site administrator
    Admin,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::User => write!(f, "user"),
            Self::Admin => write!(f, "admin"),
        }
    }
}

impl Role {
    /// Parse from the stored column value.
    pub fn from_str_lossy(s: &str) -> Self {
        match s {
            "admin" => Self::Admin,
            _ => Self::User,
        }
    }
}

/// A registered account. The password hash never leaves the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Account {
    /// Account id
    pub id: i64,
    /// Display name
    pub name: String,
    /// Unique email
    pub email: String,
    /// Role
    pub role: Role,
    /// Registration time
    pub created_at: DateTime<Utc>,
}

/// Registration input.
#[derive(Debug, Clone, Deserialize)]
pub struct NewAccount {
    /// Display name
    pub name: String,
    /// Email (must be unique)
    pub email: String,
    /// Plaintext password; hashed before storage
    pub password: String,
    /// Role; defaults to [`Role::User`]
    #[serde(default)]
    pub role: Role,
}

/// A login session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Session {
    /// Opaque session token (cookie value)
    pub token: String,
    /// Owning account
    pub account_id: i64,
    /// When the session was opened
    pub created_at: DateTime<Utc>,
}
