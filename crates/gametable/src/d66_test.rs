use crate::d66::D66Table;
use crate::error::TableError;
use crate::testing::ScriptedRoller;

fn encounters() -> D66Table {
    D66Table::new(
        "Encounters",
        "d66",
        [
            ("11..16", "Merchant"),
            ("21..36", "Patrol"),
            ("41..56", "Pirate"),
            ("61+", "Derelict"),
        ],
    )
    .unwrap()
    .with_modifier("frontier", 2)
}

#[test]
fn rolls_resolve_by_code() {
    let table = encounters();
    let mut roller = ScriptedRoller::new([14, 33, 62]);
    assert_eq!(table.roll(&mut roller, &[]).unwrap(), ("14".to_string(), "Merchant"));
    assert_eq!(table.roll(&mut roller, &[]).unwrap(), ("33".to_string(), "Patrol"));
    assert_eq!(table.roll(&mut roller, &[]).unwrap(), ("62".to_string(), "Derelict"));
}

#[test]
fn modifiers_shift_the_first_die() {
    let table = encounters();
    let mut roller = ScriptedRoller::new([25]);
    assert_eq!(
        table.roll(&mut roller, &["frontier"]).unwrap(),
        ("45".to_string(), "Pirate")
    );
    assert_eq!(roller.expressions, vec!["2d66m2;0"]);
}

#[test]
fn codes_outside_every_row_fail() {
    let table = encounters();
    assert!(matches!(
        table.find_by_roll("17"),
        Err(TableError::NoMatch { roll: 17, .. })
    ));
}

#[test]
fn non_numeric_codes_name_the_code() {
    let table = encounters();
    let err = table.find_by_roll("ab").unwrap_err();
    assert!(matches!(
        &err,
        TableError::InvalidCode { code, .. } if code == "ab"
    ));
    assert!(err.to_string().contains("'ab'"));
}

#[test]
fn unknown_modifier_is_rejected() {
    let table = encounters();
    let mut roller = ScriptedRoller::new([11]);
    assert!(matches!(
        table.roll(&mut roller, &["core"]),
        Err(TableError::UnknownModifier { .. })
    ));
}
