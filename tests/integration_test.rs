//! Integration tests for Armory
//!
//! These tests exercise armory-core end to end through the public API:
//! - Damage model anchors and range falloff
//! - Weapon classification across both schema generations
//! - Operator aggregation from flattened and join-table rows
//! - Account registration, login and sessions

use armory_core::store::{AmmoRecord, CountryRecord, LegacyAbilityRecord, OperatorRecord};
use armory_core::{
    aggregate_operators, simulate, simulate_query, ArmoryStore, DamageQuery, Error, HitPart,
    NewAccount, OperatorRow, ReferenceData, Role, Weapon, WeaponCategory,
};

fn weapon(id: i64, name: &str, category: Option<&str>, damage: i64) -> Weapon {
    Weapon {
        id,
        name: name.to_string(),
        category: category.map(String::from),
        damage,
        fire_rate: None,
        info: None,
    }
}

fn bundle() -> ReferenceData {
    ReferenceData {
        countries: vec![CountryRecord {
            id: 1,
            name: "Norway".into(),
        }],
        weapons: vec![
            weapon(1, "M4A1", None, 40),
            weapon(20, "MP5", None, 30),
            weapon(44, "AWM", None, 100),
            // explicit column wins over the id range
            weapon(50, "Vector", Some("submachine_gun"), 28),
        ],
        ammo: vec![AmmoRecord {
            id: 1,
            name: "5.56x45".into(),
            info: None,
            weapon_ids: vec![1],
        }],
        operators: vec![
            OperatorRecord {
                id: 1,
                name: "Fuchsia".into(),
                info: Some("Breacher".into()),
                country_id: Some(1),
                trait_name: Some("Armored".into()),
                tactical_gear: None,
                gadget1: Some("Breaching Charge".into()),
                gadget2: None,
                legacy_abilities: vec![],
            },
            OperatorRecord {
                id: 2,
                name: "Wisdom".into(),
                info: None,
                country_id: None,
                trait_name: None,
                tactical_gear: None,
                gadget1: None,
                gadget2: None,
                legacy_abilities: vec![
                    LegacyAbilityRecord {
                        ability_id: 10,
                        trait_name: Some("Tracker".into()),
                        tactical_gear: None,
                        gadget1: None,
                        gadget2: None,
                    },
                    LegacyAbilityRecord {
                        ability_id: 11,
                        trait_name: None,
                        tactical_gear: Some("Drone".into()),
                        gadget1: None,
                        gadget2: None,
                    },
                ],
            },
        ],
    }
}

// ============================================================================
// Damage model
// ============================================================================

#[test]
fn test_damage_anchors() {
    let head = simulate(100, HitPart::Head, 0).unwrap();
    assert_eq!((head.damage, head.remaining_hp), (180, 0));

    let body = simulate(100, HitPart::from_form_value("chest"), 0).unwrap();
    assert_eq!((body.damage, body.remaining_hp), (100, 0));

    let legs = simulate(30, HitPart::from_form_value("legs"), 100).unwrap();
    // 30 * 0.9 = 27, two steps: 27 * 0.81 = 21.87
    assert_eq!((legs.damage, legs.remaining_hp), (21, 79));

    let far = simulate(100, HitPart::Body, 10_000).unwrap();
    assert_eq!(far.damage, 53);
}

#[test]
fn test_negative_distance_rejected() {
    assert!(matches!(
        simulate(40, HitPart::Body, -1),
        Err(Error::Validation(_))
    ));
}

// ============================================================================
// Classification and aggregation
// ============================================================================

#[test]
fn test_category_boundaries() {
    assert_eq!(
        WeaponCategory::resolve(19, None),
        Some(WeaponCategory::AssaultRifle)
    );
    assert_eq!(
        WeaponCategory::resolve(20, Some("  ")),
        Some(WeaponCategory::SubmachineGun)
    );
    assert_eq!(
        WeaponCategory::resolve(46, None),
        Some(WeaponCategory::SniperRifle)
    );
    assert_eq!(WeaponCategory::resolve(47, None), None);
    assert_eq!(
        WeaponCategory::resolve(1, Some("shotgun")),
        Some(WeaponCategory::Shotgun)
    );
}

#[test]
fn test_aggregate_keeps_first_identity() {
    let rows = vec![
        OperatorRow {
            id: 7,
            name: "First".into(),
            trait_name: Some("Scout".into()),
            ..Default::default()
        },
        OperatorRow {
            id: 7,
            name: "Second".into(),
            gadget2: Some("Smoke".into()),
            ..Default::default()
        },
    ];
    let ops = aggregate_operators(rows);
    assert_eq!(ops.len(), 1);
    assert_eq!(ops[0].name, "First");
    assert_eq!(ops[0].abilities, vec!["Trait: Scout", "Gadget 2: Smoke"]);
}

// ============================================================================
// Store round trips
// ============================================================================

#[tokio::test]
async fn test_reference_bundle_end_to_end() {
    let store = ArmoryStore::in_memory().await.unwrap();
    store.import(&bundle()).await.unwrap();

    let smgs = store
        .weapons_by_category(WeaponCategory::SubmachineGun)
        .await
        .unwrap();
    let names: Vec<_> = smgs.iter().map(|w| w.name.as_str()).collect();
    assert_eq!(names, vec!["MP5", "Vector"]);

    let detail = store.weapon_detail(1).await.unwrap();
    assert_eq!(detail.category, Some(WeaponCategory::AssaultRifle));
    assert_eq!(detail.ammo.len(), 1);

    let ops = store.list_operators().await.unwrap();
    assert_eq!(ops.len(), 2);
    assert_eq!(ops[0].country_name.as_deref(), Some("Norway"));
    assert_eq!(
        ops[0].abilities,
        vec!["Trait: Armored", "Gadget 1: Breaching Charge"]
    );
    assert_eq!(
        ops[1].abilities,
        vec!["Trait: Tracker", "Tactical Gear: Drone"]
    );

    let result = simulate_query(
        &store,
        &DamageQuery {
            weapon_id: 44,
            hit_part: "head".into(),
            distance: 75,
        },
    )
    .await
    .unwrap();
    // 100 * 1.8 = 180, one step: 162
    assert_eq!(result.damage, 162);
    assert_eq!(result.category, Some(WeaponCategory::SniperRifle));
}

#[tokio::test]
async fn test_account_lifecycle() {
    let store = ArmoryStore::in_memory().await.unwrap();
    let new = NewAccount {
        name: "Pathfinder".into(),
        email: "pf@example.com".into(),
        password: "hunter2".into(),
        role: Role::User,
    };

    let account = store.create_account(&new).await.unwrap();
    assert!(matches!(
        store.create_account(&new).await,
        Err(Error::DuplicateEmail(_))
    ));

    assert!(matches!(
        store.verify_credentials("pf@example.com", "wrong").await,
        Err(Error::InvalidCredentials)
    ));
    let verified = store
        .verify_credentials("pf@example.com", "hunter2")
        .await
        .unwrap();
    assert_eq!(verified.id, account.id);

    let session = store.create_session(account.id).await.unwrap();
    let resolved = store.session_account(&session.token).await.unwrap();
    assert_eq!(resolved.map(|a| a.id), Some(account.id));

    assert!(store.delete_session(&session.token).await.unwrap());
    assert!(store.session_account(&session.token).await.unwrap().is_none());
}
