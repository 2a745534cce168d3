use std::collections::BTreeMap;

use crate::designation::{Designation, Slot, Zone};
use crate::error::GenerationError;

fn d(code: &str) -> Designation {
    code.parse().unwrap()
}

#[test]
fn codes_round_trip_through_display() {
    for code in ["Aa", "Ab", "Ba", "Bb", "Ca", "Cb", "Da", "Db"] {
        assert_eq!(d(code).to_string(), code);
    }
}

#[test]
fn malformed_codes_are_rejected() {
    for code in ["", "A", "Ea", "AA", "Aab", "ab"] {
        assert!(
            matches!(
                code.parse::<Designation>(),
                Err(GenerationError::InvalidDesignation(_))
            ),
            "{code}"
        );
    }
}

#[test]
fn sorting_is_lexical() {
    let mut designations = vec![d("Db"), d("Ba"), d("Ab"), d("Ca"), d("Aa"), d("Bb")];
    designations.sort();
    let codes: Vec<String> = designations.iter().map(|d| d.to_string()).collect();
    assert_eq!(codes, ["Aa", "Ab", "Ba", "Bb", "Ca", "Db"]);
}

#[test]
fn orbital_parents() {
    assert_eq!(Designation::PRIMARY.orbital_parent(), None);
    assert_eq!(d("Ab").orbital_parent(), Some(Designation::PRIMARY));
    assert_eq!(d("Ca").orbital_parent(), Some(Designation::PRIMARY));
    assert_eq!(d("Cb").orbital_parent(), Some(d("Ca")));
}

#[test]
fn slots_map_to_zones() {
    assert_eq!(Slot::A.zone(), None);
    assert_eq!(Slot::B.zone(), Some(Zone::Close));
    assert_eq!(Slot::C.zone(), Some(Zone::Near));
    assert_eq!(Slot::D.zone(), Some(Zone::Far));
    for zone in Zone::ALL {
        assert_eq!(Slot::from_zone(zone).zone(), Some(zone));
    }
}

#[test]
fn position_ordinals() {
    assert_eq!(d("Ba").position_ordinal(), 0);
    assert_eq!(d("Ca").position_ordinal(), 1);
    assert_eq!(d("Da").position_ordinal(), 2);
    assert_eq!(d("Db").position_ordinal(), 0);
    assert_eq!(d("Ab").position_ordinal(), 0);
}

#[test]
fn serializes_as_code_and_map_key() {
    assert_eq!(serde_json::to_string(&d("Cb")).unwrap(), "\"Cb\"");

    let map: BTreeMap<Designation, u32> = [(d("Ab"), 2), (d("Aa"), 1)].into_iter().collect();
    let json = serde_json::to_string(&map).unwrap();
    assert_eq!(json, r#"{"Aa":1,"Ab":2}"#);
    let back: BTreeMap<Designation, u32> = serde_json::from_str(&json).unwrap();
    assert_eq!(back, map);
}
