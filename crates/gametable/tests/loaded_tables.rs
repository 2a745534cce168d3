use dice::Roller;
use gametable::{Format, Table, TableCollection};

const STAR_TYPE: &str = r#"
name = "Star Type"
dice_expression = "2d6"

[rows]
"2-" = "Special"
"3..6" = "M"
"7..8" = "K"
"9..10" = "G"
"11" = "F"
"12+" = "Hot"
"#;

const HOT: &str = r#"{"name": "Hot", "dice_expression": "2d6", "rows": {"9-": "A", "10..11": "B", "12+": "O"}}"#;

const SPECIAL: &str = "
name: Special
dice_expression: 2d6
rows:
  2-: VI
  3..5: VI
  6..8: IV
  9..10: III
  11+: II
";

#[test]
fn mixed_format_tables_cascade_together() {
    let mut tables = TableCollection::with_roller(Roller::new("loaded"));
    for text in [STAR_TYPE, HOT, SPECIAL] {
        tables.add(Table::load(text).unwrap()).unwrap();
    }
    assert_eq!(tables.len(), 3);

    let allowed = ["M", "K", "G", "F", "A", "B", "O", "VI", "IV", "III", "II"];
    for _ in 0..1000 {
        let cascade = tables.roll_cascade("Star Type", &[]).unwrap();
        assert!(allowed.contains(&cascade.result.as_str()), "{}", cascade.result);
        assert_eq!(cascade.steps[0].table, "Star Type");
        assert!(cascade.steps.len() <= 2);
    }
}

#[test]
fn tables_survive_a_format_change() {
    let table = Table::load(STAR_TYPE).unwrap();
    let yaml = table.serialize(Format::Yaml).unwrap();
    let reloaded = Table::load(&yaml).unwrap();
    for roll in 0..=14 {
        assert_eq!(table.find_by_roll(roll).unwrap(), reloaded.find_by_roll(roll).unwrap());
    }
}
