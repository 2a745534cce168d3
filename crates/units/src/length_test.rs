use approx::assert_relative_eq;

use crate::length::{Length, AU_TO_KM, SOLAR_RADIUS_AU};

#[test]
fn converts_au_and_kilometers() {
    let orbit = Length::from_au(1.0);
    assert_relative_eq!(orbit.to_km(), AU_TO_KM);
    assert_relative_eq!(Length::from_km(AU_TO_KM).to_au(), 1.0);
}

#[test]
fn solar_diameters_are_two_radii() {
    let sun = Length::from_solar_diameters(1.0);
    assert_relative_eq!(sun.to_au(), 2.0 * SOLAR_RADIUS_AU);
    assert_relative_eq!(sun.to_solar_radii(), 2.0, max_relative = 1e-12);
    assert_relative_eq!(
        Length::from_solar_diameters(1.04).to_solar_diameters(),
        1.04,
        max_relative = 1e-12
    );
}

#[test]
fn arithmetic_keeps_the_unit() {
    let a = Length::from_au(2.0);
    let b = Length::from_au(0.5);

    assert_relative_eq!((a + b).to_au(), 2.5);
    assert_relative_eq!((a - b).to_au(), 1.5);
    assert_relative_eq!((a * 1.5).to_au(), 3.0);
    assert_relative_eq!((2.0 * b).to_au(), 1.0);
    assert_relative_eq!((a / 4.0).to_au(), 0.5);
    assert_relative_eq!(a / b, 4.0);
    assert_relative_eq!(a.powi(3), 8.0);
    assert!(b < a);
}
