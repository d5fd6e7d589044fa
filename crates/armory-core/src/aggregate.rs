//! Folds operator/ability join rows into one record per operator.

use crate::types::{Operator, OperatorRow};
use std::collections::HashMap;

/// Group rows by operator id.
///
/// Output order follows the first appearance of each id. Identity fields come
/// from the first row seen for an id. Every non-empty ability field on every
/// row sets the matching field and appends a display line, in the order
/// trait, tactical gear, gadget 1, gadget 2.
pub fn aggregate_operators<I>(rows: I) -> Vec<Operator>
where
    I: IntoIterator<Item = OperatorRow>,
{
    let mut operators: Vec<Operator> = Vec::new();
    let mut index: HashMap<i64, usize> = HashMap::new();

    for row in rows {
        let slot = *index.entry(row.id).or_insert_with(|| {
            operators.push(Operator {
                id: row.id,
                name: row.name.clone(),
                info: row.info.clone(),
                country_name: row.country_name.clone(),
                trait_name: None,
                tactical_gear: None,
                gadget1: None,
                gadget2: None,
                abilities: Vec::new(),
            });
            operators.len() - 1
        });
        merge_abilities(&mut operators[slot], row);
    }

    operators
}

fn merge_abilities(op: &mut Operator, row: OperatorRow) {
    let fields = [
        ("Trait", row.trait_name, &mut op.trait_name),
        ("Tactical Gear", row.tactical_gear, &mut op.tactical_gear),
        ("Gadget 1", row.gadget1, &mut op.gadget1),
        ("Gadget 2", row.gadget2, &mut op.gadget2),
    ];

    for (label, value, target) in fields {
        let Some(value) = value.filter(|v| !v.is_empty()) else {
            continue;
        };
        op.abilities.push(format!("{label}: {value}"));
        *target = Some(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: i64, name: &str) -> OperatorRow {
        OperatorRow {
            id,
            name: name.into(),
            info: Some(format!("{name} bio")),
            country_name: Some("France".into()),
            ..Default::default()
        }
    }

    #[test]
    fn test_legacy_rows_merge() {
        let rows = vec![
            OperatorRow {
                trait_name: Some("X".into()),
                ..row(1, "Vyron")
            },
            OperatorRow {
                tactical_gear: Some("Y".into()),
                ..row(1, "Vyron")
            },
        ];
        let ops = aggregate_operators(rows);
        assert_eq!(ops.len(), 1);
        assert_eq!(ops[0].abilities, vec!["Trait: X", "Tactical Gear: Y"]);
        assert_eq!(ops[0].trait_name.as_deref(), Some("X"));
        assert_eq!(ops[0].tactical_gear.as_deref(), Some("Y"));
        assert_eq!(ops[0].gadget1, None);
    }

    #[test]
    fn test_flattened_row_order() {
        let rows = vec![OperatorRow {
            trait_name: Some("Adrenaline".into()),
            tactical_gear: Some("Smoke".into()),
            gadget1: Some("Drone".into()),
            gadget2: Some("Shield".into()),
            ..row(7, "Hackclaw")
        }];
        let ops = aggregate_operators(rows);
        assert_eq!(
            ops[0].abilities,
            vec![
                "Trait: Adrenaline",
                "Tactical Gear: Smoke",
                "Gadget 1: Drone",
                "Gadget 2: Shield"
            ]
        );
    }

    #[test]
    fn test_operator_without_abilities() {
        let ops = aggregate_operators(vec![row(3, "Stinger")]);
        assert_eq!(ops.len(), 1);
        assert!(ops[0].abilities.is_empty());
        assert_eq!(ops[0].trait_name, None);
        assert_eq!(ops[0].gadget2, None);
    }

    #[test]
    fn test_first_appearance_order_and_first_seen_fields() {
        let rows = vec![
            row(5, "Shepherd"),
            row(2, "Luna"),
            OperatorRow {
                name: "renamed".into(),
                gadget1: Some("Arrow".into()),
                ..row(5, "Shepherd")
            },
        ];
        let ops = aggregate_operators(rows);
        let ids: Vec<i64> = ops.iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![5, 2]);
        assert_eq!(ops[0].name, "Shepherd");
        assert_eq!(ops[0].abilities, vec!["Gadget 1: Arrow"]);
    }

    #[test]
    fn test_empty_strings_are_skipped() {
        let rows = vec![OperatorRow {
            trait_name: Some(String::new()),
            gadget2: Some("Mine".into()),
            ..row(9, "Uluru")
        }];
        let ops = aggregate_operators(rows);
        assert_eq!(ops[0].trait_name, None);
        assert_eq!(ops[0].abilities, vec!["Gadget 2: Mine"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(aggregate_operators(Vec::new()).is_empty());
    }
}
