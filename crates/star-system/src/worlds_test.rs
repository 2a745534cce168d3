use stellar::{Classification, RuleTables, Star};

use crate::testing::Scripted;
use crate::worlds::{roll_world_counts, WorldCounts};

fn star(code: &str) -> Star {
    Star::new(code.parse::<Classification>().unwrap())
}

fn counts(stars: &[&Star], rolls: &[i32]) -> (WorldCounts, Vec<String>) {
    let rules = RuleTables::standard().unwrap();
    let mut roller = Scripted::new(rolls.to_vec());
    let counts = roll_world_counts(&mut roller, &rules, stars).unwrap();
    assert_eq!(roller.remaining(), 0);
    (counts, roller.expressions)
}

#[test]
fn lone_dwarf_gets_a_gas_giant_bonus() {
    let sun = star("G2 V");
    let (counts, expressions) = counts(&[&sun], &[9, 6, 8, 7, 9]);
    assert_eq!(
        counts,
        WorldCounts {
            gas_giants: 3,
            planetoid_belts: 2,
            terrestrial_planets: 7,
        }
    );
    assert_eq!(expressions, ["2d6", "2d6+1", "2d6", "2d6+1", "2d6-2"]);
    assert_eq!(counts.total(), 12);
}

#[test]
fn remnants_strip_worlds() {
    let dwarf = star("D");
    let pulsar = star("NS");
    let (counts, expressions) = counts(&[&dwarf, &pulsar], &[5, 6, 3, 4, 2]);
    assert_eq!(
        counts,
        WorldCounts {
            gas_giants: 1,
            planetoid_belts: 0,
            terrestrial_planets: 4,
        }
    );
    assert_eq!(expressions[1], "2d6-2");
    assert_eq!(expressions[4], "1d3");
}

#[test]
fn absent_giants_and_belts() {
    let sun = star("K4 V");
    let (counts, _) = counts(&[&sun], &[10, 2, 12]);
    assert_eq!(
        counts,
        WorldCounts {
            gas_giants: 0,
            planetoid_belts: 0,
            terrestrial_planets: 10,
        }
    );
}

#[test]
fn markers_hold_no_worlds() {
    let nebula = star("Nebula");
    let (counts, expressions) = counts(&[&nebula], &[]);
    assert_eq!(counts, WorldCounts::default());
    assert!(expressions.is_empty());
}
