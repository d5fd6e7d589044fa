//! Damage simulation.
//!
//! A hit is scaled by where it lands, then reduced by one 10% falloff step
//! per 50 units of range (at most six steps). Every intermediate value is
//! truncated toward zero. Health is a fixed pool of [`BASE_HEALTH`].

use crate::category::WeaponCategory;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Health pool every target starts with.
pub const BASE_HEALTH: i64 = 100;

/// Range covered by a single falloff step.
pub const FALLOFF_STEP_DISTANCE: i64 = 50;

/// Maximum number of falloff steps applied.
pub const MAX_FALLOFF_STEPS: i64 = 6;

/// Damage retained per falloff step.
pub const FALLOFF_FACTOR: f64 = 0.9;

const HEAD_MULTIPLIER: f64 = 1.8;
const LIMB_MULTIPLIER: f64 = 0.9;

/// Body location struck by a shot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HitPart {
    /// Head shot
    Head,
    /// Torso; also the fallback for unrecognised values
    Body,
    /// Legs or arms
    Limbs,
}

impl HitPart {
    /// Values offered by the simulator form.
    pub const CHOICES: [&'static str; 4] = ["head", "chest", "legs", "limbs"];

    /// Map a form value to a hit part. Matching is exact (case-sensitive);
    /// anything that is not `head`, `legs` or `limbs` counts as a body hit.
    pub fn from_form_value(value: &str) -> Self {
        match value {
            "head" => Self::Head,
            "legs" | "limbs" => Self::Limbs,
            _ => Self::Body,
        }
    }

    /// Apply the location multiplier, truncating toward zero.
    pub fn apply(&self, base_damage: i64) -> i64 {
        match self {
            Self::Head => (base_damage as f64 * HEAD_MULTIPLIER) as i64,
            Self::Limbs => (base_damage as f64 * LIMB_MULTIPLIER) as i64,
            Self::Body => base_damage,
        }
    }
}

/// Input to a single simulation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DamageQuery {
    /// Weapon fired
    pub weapon_id: i64,
    /// Raw hit-part value as submitted
    pub hit_part: String,
    /// Distance to target
    pub distance: i64,
}

/// Outcome of a simulation against a specific weapon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DamageResult {
    /// Weapon name
    pub weapon_name: String,
    /// Effective weapon category, if any
    pub category: Option<WeaponCategory>,
    /// Hit part as submitted
    pub hit_part: String,
    /// Distance to target
    pub distance: i64,
    /// Damage dealt
    pub damage: i64,
    /// Health left out of [`BASE_HEALTH`]
    pub remaining_hp: i64,
}

/// Damage dealt and health left after one hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DamageOutcome {
    /// Damage after location and range adjustments
    pub damage: i64,
    /// `BASE_HEALTH - damage`, floored at zero
    pub remaining_hp: i64,
}

/// Number of falloff steps for a distance.
pub fn falloff_steps(distance: i64) -> i64 {
    (distance / FALLOFF_STEP_DISTANCE).min(MAX_FALLOFF_STEPS)
}

/// Compute damage for one hit.
///
/// Negative `base_damage` or `distance` is rejected with [`Error::Validation`].
pub fn simulate(base_damage: i64, hit_part: HitPart, distance: i64) -> Result<DamageOutcome> {
    if base_damage < 0 {
        return Err(Error::Validation(format!(
            "base damage must not be negative (got {base_damage})"
        )));
    }
    if distance < 0 {
        return Err(Error::Validation(format!(
            "distance must not be negative (got {distance})"
        )));
    }

    let adjusted = hit_part.apply(base_damage);
    let steps = falloff_steps(distance) as i32;
    let damage = (adjusted as f64 * FALLOFF_FACTOR.powi(steps)) as i64;

    Ok(DamageOutcome {
        damage,
        remaining_hp: (BASE_HEALTH - damage).max(0),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headshot_point_blank() {
        let out = simulate(100, HitPart::Head, 0).unwrap();
        assert_eq!(out.damage, 180);
        assert_eq!(out.remaining_hp, 0);
    }

    #[test]
    fn test_chest_one_step() {
        let out = simulate(100, HitPart::from_form_value("chest"), 50).unwrap();
        assert_eq!(out.damage, 90);
        assert_eq!(out.remaining_hp, 10);
    }

    #[test]
    fn test_legs_max_falloff() {
        let out = simulate(100, HitPart::from_form_value("legs"), 300).unwrap();
        assert_eq!(out.damage, 47);
        assert_eq!(out.remaining_hp, 53);
    }

    #[test]
    fn test_falloff_caps_at_six_steps() {
        let far = simulate(100, HitPart::Body, 1000).unwrap();
        let cap = simulate(100, HitPart::Body, 300).unwrap();
        assert_eq!(far, cap);
        assert_eq!(falloff_steps(1000), 6);
        assert_eq!(falloff_steps(49), 0);
        assert_eq!(falloff_steps(99), 1);
    }

    #[test]
    fn test_deterministic() {
        let a = simulate(37, HitPart::Limbs, 175).unwrap();
        let b = simulate(37, HitPart::Limbs, 175).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_truncation_of_multipliers() {
        // 33 * 1.8 = 59.4, 33 * 0.9 = 29.7
        assert_eq!(HitPart::Head.apply(33), 59);
        assert_eq!(HitPart::Limbs.apply(33), 29);
        assert_eq!(HitPart::Body.apply(33), 33);
    }

    #[test]
    fn test_hit_part_fallback_is_case_sensitive() {
        assert_eq!(HitPart::from_form_value("head"), HitPart::Head);
        assert_eq!(HitPart::from_form_value("limbs"), HitPart::Limbs);
        assert_eq!(HitPart::from_form_value("HEAD"), HitPart::Body);
        assert_eq!(HitPart::from_form_value("torso"), HitPart::Body);
        assert_eq!(HitPart::from_form_value(""), HitPart::Body);
    }

    #[test]
    fn test_rejects_negative_inputs() {
        assert!(matches!(
            simulate(100, HitPart::Body, -1),
            Err(Error::Validation(_))
        ));
        assert!(matches!(
            simulate(-5, HitPart::Body, 0),
            Err(Error::Validation(_))
        ));
    }

    #[test]
    fn test_zero_damage_leaves_full_health() {
        let out = simulate(0, HitPart::Head, 0).unwrap();
        assert_eq!(out.damage, 0);
        assert_eq!(out.remaining_hp, BASE_HEALTH);
    }
}
