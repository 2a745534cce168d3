use std::collections::VecDeque;

use approx::assert_relative_eq;
use dice::{DiceError, RollDirectives, Roller};
use gametable::DiceRoller;
use units::{Mass, Time};

use crate::classification::Classification;
use crate::generation::*;
use crate::interpolation::StellarTables;
use crate::rules::RuleTables;
use crate::spectral::{LuminosityClass, SpectralType};
use crate::star::AGE_OF_UNIVERSE;

/// Returns scripted dice totals, plus whatever additive DM the expression carries
struct Scripted {
    rolls: VecDeque<i32>,
    expressions: Vec<String>,
}

impl Scripted {
    fn new(rolls: impl IntoIterator<Item = i32>) -> Self {
        Self {
            rolls: rolls.into_iter().collect(),
            expressions: Vec::new(),
        }
    }
}

impl DiceRoller for Scripted {
    fn roll(&mut self, expression: &str) -> Result<i32, DiceError> {
        let directives = RollDirectives::parse(expression)?;
        self.expressions.push(expression.to_string());
        Ok(self.rolls.pop_front().expect("script exhausted") + directives.additive())
    }

    fn concat_roll(&mut self, _expression: &str) -> Result<String, DiceError> {
        unimplemented!("no concatenation rolls in star generation")
    }
}

fn registries() -> (StellarTables, RuleTables) {
    (StellarTables::standard(), RuleTables::standard().unwrap())
}

// ============================================================================
// Type and class
// ============================================================================

#[test]
fn plain_type_roll_is_main_sequence() {
    let (_, rules) = registries();
    let mut roller = Scripted::new([9]);
    let classification = roll_type_and_class(&mut roller, &rules).unwrap();
    assert_eq!(classification.spectral_type, SpectralType::G);
    assert_eq!(classification.class, Some(LuminosityClass::V));
    assert_eq!(classification.subtype, None);
}

#[test]
fn class_result_reenters_with_a_dm() {
    let (_, rules) = registries();
    // Star Type 2 -> Special 7 -> IV, then Star Type 8+1 -> G
    let mut roller = Scripted::new([2, 7, 8]);
    let classification = roll_type_and_class(&mut roller, &rules).unwrap();
    assert_eq!(classification.spectral_type, SpectralType::G);
    assert_eq!(classification.class, Some(LuminosityClass::IV));
    assert_eq!(roller.expressions, vec!["2d6", "2d6", "2d6+1"]);
}

#[test]
fn invalid_type_for_class_is_rerolled() {
    let (_, rules) = registries();
    // IV, then 3+1 -> M (not a subgiant type), then 6+1 -> K
    let mut roller = Scripted::new([2, 7, 3, 6]);
    let classification = roll_type_and_class(&mut roller, &rules).unwrap();
    assert_eq!(classification.spectral_type, SpectralType::K);
    assert_eq!(classification.class, Some(LuminosityClass::IV));
}

#[test]
fn exotic_result_ends_the_chain() {
    let (_, rules) = registries();
    // Star Type 2 -> Special 2 -> Unusual 9 -> D
    let mut roller = Scripted::new([2, 2, 9]);
    let classification = roll_type_and_class(&mut roller, &rules).unwrap();
    assert_eq!(classification, Classification::exotic(SpectralType::D));
}

#[test]
fn giants_chain_sets_the_class() {
    let (_, rules) = registries();
    // Star Type 2 -> Special 11 -> Giants 12 -> Ia, then Star Type 11+1 -> Hot 5 -> A
    let mut roller = Scripted::new([2, 11, 12, 11, 5]);
    let classification = roll_type_and_class(&mut roller, &rules).unwrap();
    assert_eq!(classification.spectral_type, SpectralType::A);
    assert_eq!(classification.class, Some(LuminosityClass::IA));
}

// ============================================================================
// Subtype
// ============================================================================

#[test]
fn subtype_uses_the_numeric_table() {
    let (_, rules) = registries();
    let mut classification = Classification {
        spectral_type: SpectralType::G,
        subtype: None,
        class: Some(LuminosityClass::V),
    };
    roll_subtype(&mut Scripted::new([7]), &rules, &mut classification).unwrap();
    assert_eq!(classification.subtype, Some(9));
}

#[test]
fn m_stars_use_their_own_table() {
    let (_, rules) = registries();
    let mut classification = Classification {
        spectral_type: SpectralType::M,
        subtype: None,
        class: Some(LuminosityClass::V),
    };
    roll_subtype(&mut Scripted::new([7]), &rules, &mut classification).unwrap();
    assert_eq!(classification.subtype, Some(2));
}

#[test]
fn k_subgiant_subtype_shifts_down() {
    let (_, rules) = registries();
    let mut classification = Classification {
        spectral_type: SpectralType::K,
        subtype: None,
        class: Some(LuminosityClass::IV),
    };
    roll_subtype(&mut Scripted::new([9]), &rules, &mut classification).unwrap();
    assert_eq!(classification.subtype, Some(1));
}

#[test]
fn f_subdwarf_subtype_shifts_up() {
    let (_, rules) = registries();
    let mut classification = Classification {
        spectral_type: SpectralType::F,
        subtype: None,
        class: Some(LuminosityClass::VI),
    };
    roll_subtype(&mut Scripted::new([11]), &rules, &mut classification).unwrap();
    assert_eq!(classification.subtype, Some(7));
}

#[test]
fn exotics_get_no_subtype() {
    let (_, rules) = registries();
    let mut classification = Classification::exotic(SpectralType::BD);
    roll_subtype(&mut Scripted::new([]), &rules, &mut classification).unwrap();
    assert_eq!(classification.subtype, None);
}

// ============================================================================
// Mass and age
// ============================================================================

#[test]
fn open_ended_keeps_rolling_on_six() {
    assert_eq!(open_ended_d6(&mut Scripted::new([6, 6, 3])).unwrap(), 15);
    assert_eq!(open_ended_d6(&mut Scripted::new([2])).unwrap(), 2);
}

#[test]
fn remnant_and_dwarf_masses_use_dice() {
    let tables = StellarTables::standard();
    let mass = |t, rolls: &[i32]| {
        roll_mass(
            &mut Scripted::new(rolls.to_vec()),
            &tables,
            &Classification::exotic(t),
        )
        .unwrap()
        .to_solar_masses()
    };
    assert_relative_eq!(mass(SpectralType::D, &[7, 5]), 0.64, epsilon = 1e-9);
    assert_relative_eq!(mass(SpectralType::BD, &[12]), 0.085, epsilon = 1e-9);
    assert_relative_eq!(mass(SpectralType::NS, &[6, 2]), 1.8, epsilon = 1e-9);
    assert_relative_eq!(mass(SpectralType::BH, &[4, 5]), 5.6, epsilon = 1e-9);
    assert_eq!(mass(SpectralType::Nebula, &[]), 0.0);
}

#[test]
fn main_sequence_mass_is_interpolated() {
    let tables = StellarTables::standard();
    let sun = Classification::new(SpectralType::G, 2, LuminosityClass::V);
    let mass = roll_mass(&mut Scripted::new([]), &tables, &sun).unwrap();
    assert_relative_eq!(mass.to_solar_masses(), 1.02, epsilon = 1e-9);
}

#[test]
fn main_sequence_age_is_a_fraction_of_lifespan() {
    let sun = Classification::new(SpectralType::G, 2, LuminosityClass::V);
    let mass = Mass::from_solar_masses(1.02);
    let age = roll_age(&mut Scripted::new([50]), &sun, mass).unwrap();
    let expected = main_sequence_lifespan(mass) * 0.5;
    assert_relative_eq!(age.to_gyr(), expected.to_gyr(), epsilon = 1e-9);
}

#[test]
fn giant_age_includes_later_phases() {
    let giant = Classification::new(SpectralType::K, 0, LuminosityClass::III);
    let mass = Mass::from_solar_masses(2.0);
    let lifespan = main_sequence_lifespan(mass).to_gyr();
    let expected = lifespan + lifespan / 6.0 + lifespan / 80.0 * 0.25;
    let age = roll_age(&mut Scripted::new([25]), &giant, mass).unwrap();
    assert_relative_eq!(age.to_gyr(), expected, epsilon = 1e-9);
}

#[test]
fn subgiant_age_includes_subgiant_phase() {
    let subgiant = Classification::new(SpectralType::G, 0, LuminosityClass::IV);
    let mass = Mass::from_solar_masses(1.3);
    let lifespan = main_sequence_lifespan(mass).to_gyr();
    let age = roll_age(&mut Scripted::new([100]), &subgiant, mass).unwrap();
    assert_relative_eq!(age.to_gyr(), lifespan + lifespan / 5.3, epsilon = 1e-9);
}

#[test]
fn age_never_exceeds_the_universe() {
    let red_dwarf = Classification::new(SpectralType::M, 5, LuminosityClass::V);
    let age = roll_age(&mut Scripted::new([90]), &red_dwarf, Mass::from_solar_masses(0.16)).unwrap();
    assert_eq!(age, Time::from_gyr(AGE_OF_UNIVERSE));
    assert_relative_eq!(age.to_gyr(), AGE_OF_UNIVERSE);
}

// ============================================================================
// Whole stars
// ============================================================================

#[test]
fn completed_sun_like_star() {
    let tables = StellarTables::standard();
    let sun = Classification::new(SpectralType::G, 2, LuminosityClass::V);
    let star = complete_star(&mut Roller::new("sol"), &tables, sun, None).unwrap();
    assert_relative_eq!(star.mass.to_solar_masses(), 1.02, epsilon = 1e-9);
    assert_relative_eq!(star.diameter.to_solar_diameters(), 1.04, epsilon = 1e-9);
    assert_relative_eq!(star.temperature.to_kelvin(), 5840.0, epsilon = 1e-9);
    assert!(star.age > Time::zero() && star.age <= Time::from_gyr(AGE_OF_UNIVERSE));
    assert!(star.luminosity > 1.0 && star.luminosity < 1.5);
}

#[test]
fn fixed_age_is_kept() {
    let tables = StellarTables::standard();
    let dwarf = Classification::exotic(SpectralType::D);
    let age = Time::from_gyr(1.0);
    let star = complete_star(&mut Scripted::new([7, 5]), &tables, dwarf, Some(age)).unwrap();
    assert_eq!(star.age, age);
    assert_relative_eq!(star.temperature.to_kelvin(), 8000.0, max_relative = 1e-9);
    assert_relative_eq!(
        star.diameter.to_au(),
        white_dwarf_diameter(star.mass).to_au(),
        epsilon = 1e-12
    );
    assert_relative_eq!(star.mass.to_solar_masses(), 0.64, epsilon = 1e-9);
}

#[test]
fn markers_are_massless() {
    let tables = StellarTables::standard();
    let nebula = Classification::exotic(SpectralType::Nebula);
    let star = complete_star(&mut Scripted::new([]), &tables, nebula, None).unwrap();
    assert_eq!(star.mass, Mass::zero());
    assert_eq!(star.luminosity, 0.0);
    assert_eq!(star.age, Time::zero());
}

#[test]
fn invalid_classification_is_refused() {
    let tables = StellarTables::standard();
    let bad = Classification::new(SpectralType::M, 2, LuminosityClass::IV);
    assert!(complete_star(&mut Scripted::new([]), &tables, bad, None).is_err());
}

#[test]
fn minimum_orbits() {
    let tables = StellarTables::standard();
    let sun = complete_star(
        &mut Roller::new("mao"),
        &tables,
        Classification::new(SpectralType::G, 0, LuminosityClass::V),
        None,
    )
    .unwrap();
    assert_relative_eq!(minimum_allowed_orbit(&tables, &sun).unwrap(), 0.03);

    let bd = complete_star(
        &mut Scripted::new([7, 50]),
        &tables,
        Classification::exotic(SpectralType::BD),
        None,
    )
    .unwrap();
    assert_relative_eq!(minimum_allowed_orbit(&tables, &bd).unwrap(), 0.005);
}

#[test]
fn same_seed_same_star() {
    let (tables, rules) = registries();
    for seed in ["alpha", "beta", "gamma"] {
        let first = generate_star(&mut Roller::new(seed), &tables, &rules).unwrap();
        let second = generate_star(&mut Roller::new(seed), &tables, &rules).unwrap();
        assert_eq!(first, second);
    }
}
