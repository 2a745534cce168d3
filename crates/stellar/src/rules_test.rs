use dice::Roller;
use gametable::{Table, TableError};

use crate::error::StellarError;
use crate::rules::{names, RuleTables};

#[test]
fn standard_rules_load() {
    let rules = RuleTables::standard().unwrap();
    for name in names::REQUIRED {
        assert!(rules.tables().contains(name), "{name}");
    }
    let presence = rules.tables().get(names::STAR_PRESENCE).unwrap();
    assert_eq!(presence.mods().get("giant"), Some(&1));
}

#[test]
fn star_type_chain_resolves_to_types_classes_or_exotics() {
    let rules = RuleTables::standard().unwrap();
    let mut roller = Roller::new("chain");
    let allowed = [
        "O", "B", "A", "F", "G", "K", "M", "Ia", "Ib", "II", "III", "IV", "VI", "D", "BD", "NS",
        "PSR", "BH", "Protostar", "Nebula", "Cluster", "Anomaly",
    ];
    for _ in 0..2000 {
        let result = rules.roll(&mut roller, names::STAR_TYPE, &[]).unwrap();
        assert!(allowed.contains(&result.as_str()), "{result}");
    }
}

#[test]
fn other_result_cascades_into_other_table() {
    let rules = RuleTables::standard().unwrap();
    let mut roller = Roller::new("other");
    for _ in 0..500 {
        let cascade = rules
            .cascade(&mut roller, names::SECONDARY_STAR, &[], 0)
            .unwrap();
        if cascade.steps.len() == 2 {
            assert_eq!(cascade.path(), vec![names::SECONDARY_STAR, names::OTHER]);
            assert!(["D", "BD"].contains(&cascade.result.as_str()));
        } else {
            assert!(["Random", "Lesser", "Sibling", "Twin"].contains(&cascade.result.as_str()));
        }
    }
}

#[test]
fn numeric_tables_parse() {
    let rules = RuleTables::standard().unwrap();
    let mut roller = Roller::new("numbers");
    for _ in 0..200 {
        let subtype = rules
            .roll_number(&mut roller, names::NUMERIC_SUBTYPE, &[], 0)
            .unwrap();
        assert!((0..=9).contains(&subtype));
    }
    assert!(matches!(
        rules.roll_number(&mut roller, names::STAR_TYPE, &[], 20),
        Err(StellarError::UnexpectedResult { .. })
    ));
}

#[test]
fn missing_tables_are_rejected() {
    let only_one = [Table::new(names::STAR_TYPE, "2d6", [("2+", "G")]).unwrap()];
    assert!(matches!(
        RuleTables::from_tables(only_one),
        Err(StellarError::Table(TableError::TableNotFound(_)))
    ));
}
