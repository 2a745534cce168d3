use dice::Roller;
use stellar::{generate_star, RuleTables, SpectralType, StellarTables, AGE_OF_UNIVERSE};
use units::{Length, Mass, Time};

#[test]
fn ten_thousand_primaries_stay_pure() {
    let tables = StellarTables::standard();
    let rules = RuleTables::standard().unwrap();
    let mut roller = Roller::new("purity");

    let mut exotic = 0;
    for _ in 0..10_000 {
        let star = generate_star(&mut roller, &tables, &rules).unwrap();
        star.validate_tsc().unwrap();

        if star.is_exotic() {
            exotic += 1;
            assert!(star.luminosity_class.is_none(), "{}", star.code());
            assert!(star.subtype.is_none(), "{}", star.code());
        } else {
            assert!(star.luminosity_class.is_some(), "{}", star.code());
            assert!(star.mass > Mass::zero(), "{}", star.code());
            assert!(star.diameter > Length::zero(), "{}", star.code());
        }

        if !star.spectral_type.is_marker() {
            assert!(star.mass > Mass::zero(), "{}", star.code());
            assert!(star.age > Time::zero(), "{}", star.code());
            assert!(star.age <= Time::from_gyr(AGE_OF_UNIVERSE), "{}", star.code());
        }
        if star.spectral_type == SpectralType::BH {
            assert!(star.mass.to_solar_masses() > 2.1);
        }
    }

    // Exotics need two rolls of 2 in a row
    assert!(exotic < 100, "{exotic}");
}
