use approx::assert_relative_eq;
use stellar::{Classification, RuleTables, StellarTables};
use units::{Length, Mass};

use crate::builder::{generate_star_system, presence_mods, BuildState, StarSystemBuilder};
use crate::config::GeneratorConfig;
use crate::designation::Designation;
use crate::error::GenerationError;
use crate::metadata::{Multiplicity, SystemMetadata};
use crate::orbit::period;
use crate::secondary::Relation;
use crate::testing::Scripted;

fn d(code: &str) -> Designation {
    code.parse().unwrap()
}

fn registries() -> (StellarTables, RuleTables) {
    (StellarTables::standard(), RuleTables::standard().unwrap())
}

fn known(code: &str) -> GeneratorConfig {
    GeneratorConfig {
        allow_multiple_stars: true,
        world_counts: false,
        known_primary: Some(code.parse::<Classification>().unwrap()),
    }
}

// ============================================================================
// State machine
// ============================================================================

#[test]
fn single_star_skips_the_layout_states() {
    let (tables, rules) = registries();
    let config = GeneratorConfig {
        allow_multiple_stars: false,
        ..known("G2 V")
    };
    let mut builder = StarSystemBuilder::new(Scripted::new([50]), config, &tables, &rules);
    assert_eq!(builder.state(), BuildState::TypeClassPending);

    let mut states = Vec::new();
    while builder.state() != BuildState::Complete {
        states.push(builder.step().unwrap());
    }
    assert_eq!(
        states,
        [
            BuildState::SubtypePending,
            BuildState::PhysicalPropertiesPending,
            BuildState::ValidationPending,
            BuildState::Validated,
            BuildState::Complete,
        ]
    );
    // Stepping a finished builder is a no-op
    assert_eq!(builder.step().unwrap(), BuildState::Complete);

    let system = builder.finish(SystemMetadata::from_seed("single")).unwrap();
    assert_eq!(system.len(), 1);
    assert_eq!(system.metadata.multiplicity, Multiplicity::Solitary);
    assert!(system.world_counts.is_none());
    assert!(system.primary().unwrap().orbit.is_none());
}

#[test]
fn unfinished_builder_cannot_finish() {
    let (tables, rules) = registries();
    let builder = StarSystemBuilder::new(Scripted::new([]), known("G2 V"), &tables, &rules);
    assert!(matches!(
        builder.finish(SystemMetadata::from_seed("early")),
        Err(GenerationError::NotFinished(_))
    ));
}

#[test]
fn marker_primary_has_no_secondaries() {
    let (tables, rules) = registries();
    let builder = StarSystemBuilder::new(Scripted::new([]), known("Nebula"), &tables, &rules);
    let system = builder.build(SystemMetadata::from_seed("nebula")).unwrap();
    assert_eq!(system.len(), 1);
    assert_eq!(system.total_mass(), Mass::zero());
}

// ============================================================================
// A scripted triple system
// ============================================================================

const TRIPLE: [i32; 25] = [
    50, // primary age
    10, 4, 11, // Close present, Near absent, Far present
    3, 12, 2, // companions for A, B, D: only Bb
    5, 3, // Ba orbit 2.4
    2, 7, // Bb orbit 0.2
    1, 4, // Da orbit 15.0
    4, 1, // Ba circular, 0.0
    6, 2, // Bb slight, 0.01
    5, 2, // Da low, 0.05
    10, 3, // Ba sibling, three subtypes cooler
    11, // Bb twin of Ba
    7, 5, // Da lesser, subtype 5
    2, // Bb twin loses 2% of its mass
];

fn triple<'a>(
    tables: &'a StellarTables,
    rules: &'a RuleTables,
) -> StarSystemBuilder<'a, Scripted> {
    StarSystemBuilder::new(Scripted::new(TRIPLE), known("G2 V"), tables, rules)
}

#[test]
fn layout_places_designations_in_order() {
    let (tables, rules) = registries();
    let mut builder = triple(&tables, &rules);
    for _ in 0..4 {
        builder.step().unwrap();
    }
    assert_eq!(builder.state(), BuildState::EccentricityPending);
    assert_eq!(builder.designations(), vec![d("Aa"), d("Ba"), d("Bb"), d("Da")]);

    assert_relative_eq!(builder.orbit(d("Ba")).unwrap().orbit_number, 2.4, epsilon = 1e-9);
    assert_relative_eq!(builder.orbit(d("Bb")).unwrap().orbit_number, 0.2, epsilon = 1e-9);
    assert_relative_eq!(builder.orbit(d("Da")).unwrap().orbit_number, 15.0, epsilon = 1e-9);
    assert_eq!(builder.orbit(d("Bb")).unwrap().parent, d("Ba"));
    assert_eq!(builder.orbit(d("Da")).unwrap().parent, d("Aa"));
}

#[test]
fn scripted_triple_system() {
    let (tables, rules) = registries();
    let system = triple(&tables, &rules).build(SystemMetadata::from_seed("triple")).unwrap();

    assert_eq!(system.metadata.multiplicity, Multiplicity::Multiple);
    let codes: Vec<String> = system.stars().map(|entry| entry.star.code()).collect();
    assert_eq!(codes, ["G2 V", "G5 V", "G5 V", "K5 V"]);

    let primary = system.primary().unwrap();
    let ba = system.get(d("Ba")).unwrap();
    let bb = system.get(d("Bb")).unwrap();
    let da = system.get(d("Da")).unwrap();

    // Everything shares the primary's age
    for entry in system.stars() {
        assert_eq!(entry.star.age, primary.star.age);
    }

    // Twin mass
    assert_relative_eq!(
        bb.star.mass.to_solar_masses(),
        ba.star.mass.to_solar_masses() * 0.98,
        epsilon = 1e-9
    );

    let ba_orbit = ba.orbit.unwrap();
    let bb_orbit = bb.orbit.unwrap();
    let da_orbit = da.orbit.unwrap();
    assert_relative_eq!(ba_orbit.semi_major_axis.to_au(), 0.82, epsilon = 1e-9);
    assert_relative_eq!(bb_orbit.semi_major_axis.to_au(), 0.08, epsilon = 1e-9);
    assert_relative_eq!(da_orbit.semi_major_axis.to_au(), 2500.0);
    assert_relative_eq!(ba_orbit.eccentricity, 0.0);
    assert_relative_eq!(bb_orbit.eccentricity, 0.01, epsilon = 1e-9);
    assert_relative_eq!(da_orbit.eccentricity, 0.05, epsilon = 1e-9);

    // Companions orbit their lead star; secondaries orbit the primary pair
    let bb_period = period(ba.star.mass, bb.star.mass, Length::from_au(0.08));
    assert_relative_eq!(bb_orbit.period.to_years(), bb_period.to_years(), epsilon = 1e-12);
    let ba_period = period(
        primary.star.mass,
        ba.star.mass + bb.star.mass,
        Length::from_au(0.82),
    );
    assert_relative_eq!(ba_orbit.period.to_years(), ba_period.to_years(), epsilon = 1e-12);
    assert_relative_eq!(
        system.total_mass().to_solar_masses(),
        (primary.star.mass + ba.star.mass + bb.star.mass + da.star.mass).to_solar_masses(),
        epsilon = 1e-12
    );
}

#[test]
fn scripted_triple_records_relations() {
    let (tables, rules) = registries();
    let mut builder = triple(&tables, &rules);
    for _ in 0..6 {
        builder.step().unwrap();
    }
    assert_eq!(builder.state(), BuildState::MassPending);
    assert_eq!(builder.relation(d("Ba")), Some(Relation::Sibling));
    assert_eq!(builder.relation(d("Bb")), Some(Relation::Twin));
    assert_eq!(builder.relation(d("Da")), Some(Relation::Lesser));
    assert_eq!(builder.relation(d("Aa")), None);
    assert_eq!(builder.classification(d("Da")).unwrap().to_string(), "K5 V");
    assert!(builder.star(d("Da")).is_none());
}

#[test]
fn allowed_orbits_in_the_triple() {
    let (tables, rules) = registries();
    let system = triple(&tables, &rules)
        .build(SystemMetadata::from_seed("triple"))
        .unwrap();
    let mao = system.primary().unwrap().minimum_orbit;

    let spans: Vec<(f64, f64)> = system
        .allowed_orbits(Designation::PRIMARY)
        .iter()
        .map(|range| (range.start, range.end))
        .collect();
    assert_eq!(spans.len(), 3);
    assert_relative_eq!(spans[0].0, mao);
    assert_relative_eq!(spans[0].1, 1.4, epsilon = 1e-9);
    assert_relative_eq!(spans[1].0, 3.4, epsilon = 1e-9);
    assert_relative_eq!(spans[1].1, 14.0, epsilon = 1e-9);
    assert_relative_eq!(spans[2].0, 16.0, epsilon = 1e-9);
    assert_relative_eq!(spans[2].1, 20.0);

    // Ba is too close in to keep planets of its own
    assert!(system.allowed_orbits(d("Ba")).is_empty());
    assert!(system.allowed_orbits(d("Bb")).is_empty());

    let far = system.allowed_orbits(d("Da"));
    assert_eq!(far.len(), 1);
    assert_relative_eq!(far[0].end, 12.0, epsilon = 1e-9);
}

// ============================================================================
// Validation
// ============================================================================

#[test]
fn secondary_inside_the_companion_band_is_rejected() {
    let (tables, rules) = registries();
    let rolls = [
        50, // primary age
        10, 2, 2, // Close present only
        10, 2, // Ab present, Bb absent
        6, 12, // Ab orbit 0.65
        1, 2, // Ba orbit 1.0
        10, 12, // Ab high, 0.65
        4, 1, // Ba circular
        11, // Ab twin
        11, // Ba twin
        1, 1, // twin mass losses
    ];
    let builder = StarSystemBuilder::new(Scripted::new(rolls), known("G2 V"), &tables, &rules);
    let result = builder.build(SystemMetadata::from_seed("crowded"));
    match result {
        Err(GenerationError::OrbitConflict { designation, other }) => {
            assert_eq!(designation, d("Ba"));
            assert_eq!(other, d("Ab"));
        }
        other => panic!("expected an orbit conflict, got {other:?}"),
    }
}

/// Ba at orbit 4.0 and Ca at orbit 6.0, with Ba's eccentricity rolls
/// supplied by the caller
fn close_and_near(ba_eccentricity: [i32; 2]) -> Vec<i32> {
    let mut rolls = vec![
        50, // primary age
        10, 10, 2, // Close and Near present
        2, 2, 2, // no companions
        1, 5, // Ba orbit 4.0
        1, 1, // Ca orbit 6.0
    ];
    rolls.extend(ba_eccentricity);
    rolls.extend([
        2, 1, // Ca circular, 0.0
        11, // Ba twin
        11, // Ca twin
        1, 1, // twin mass losses
    ]);
    rolls
}

#[test]
fn eccentric_secondary_swinging_into_another_band_is_rejected() {
    let (tables, rules) = registries();

    // Circular, the two bands stay apart
    let builder = StarSystemBuilder::new(
        Scripted::new(close_and_near([4, 1])),
        known("G2 V"),
        &tables,
        &rules,
    );
    let system = builder.build(SystemMetadata::from_seed("apart")).unwrap();
    assert_eq!(system.len(), 3);

    // Extreme 0.9 carries Ba's apoapsis past orbit 5, into Ca's band
    let builder = StarSystemBuilder::new(
        Scripted::new(close_and_near([11, 12])),
        known("G2 V"),
        &tables,
        &rules,
    );
    match builder.build(SystemMetadata::from_seed("crossing")) {
        Err(GenerationError::OrbitConflict { designation, other }) => {
            assert_eq!(designation, d("Ba"));
            assert_eq!(other, d("Ca"));
        }
        other => panic!("expected an orbit conflict, got {other:?}"),
    }
}

#[test]
fn invalid_known_primary_aborts() {
    let (tables, rules) = registries();
    let config = GeneratorConfig {
        known_primary: Some(Classification {
            spectral_type: stellar::SpectralType::M,
            subtype: Some(2),
            class: Some(stellar::LuminosityClass::IV),
        }),
        ..GeneratorConfig::default()
    };
    let builder = StarSystemBuilder::new(Scripted::new([]), config, &tables, &rules);
    assert!(matches!(
        builder.build(SystemMetadata::from_seed("bad")),
        Err(GenerationError::Stellar(_))
    ));
}

// ============================================================================
// Presence modifiers
// ============================================================================

#[test]
fn presence_modifiers_follow_the_primary() {
    let star = |code: &str| stellar::Star::new(code.parse::<Classification>().unwrap());
    assert_eq!(presence_mods(&star("K0 III")), ["giant"]);
    assert_eq!(presence_mods(&star("A2 V")), ["hot_dwarf"]);
    assert_eq!(presence_mods(&star("M4 V")), ["red_dwarf"]);
    assert_eq!(presence_mods(&star("D")), ["remnant"]);
    assert_eq!(presence_mods(&star("BD")), ["remnant"]);
    assert!(presence_mods(&star("G2 V")).is_empty());
}

// ============================================================================
// Seeded generation
// ============================================================================

#[test]
fn same_seed_same_system() {
    let (tables, rules) = registries();
    let config = GeneratorConfig::default();
    for seed in ["alpha", "beta", "gamma", "delta"] {
        let first = generate_star_system(seed, &config, &tables, &rules);
        let second = generate_star_system(seed, &config, &tables, &rules);
        assert_eq!(format!("{first:?}"), format!("{second:?}"));
    }
}

#[test]
fn world_counts_are_rolled_when_enabled() {
    let (tables, rules) = registries();
    let config = GeneratorConfig::single_star();
    let system = generate_star_system("worlds", &config, &tables, &rules).unwrap();
    let counts = system.world_counts.unwrap();
    assert!(counts.terrestrial_planets >= 3);
    assert_eq!(system.metadata.seed, "worlds");
}
