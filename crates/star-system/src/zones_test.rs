use approx::assert_relative_eq;

use crate::designation::{Designation, Zone};
use crate::orbit::Orbit;
use crate::zones::*;

fn spans(ranges: &[Interval]) -> Vec<(f64, f64)> {
    ranges.iter().map(|range| (range.start, range.end)).collect()
}

#[test]
fn subtraction_splits_on_overlap() {
    let ranges = subtract(&[Interval::new(0.0, 20.0)], Interval::new(5.0, 7.0));
    assert_eq!(spans(&ranges), vec![(0.0, 5.0), (7.0, 20.0)]);
}

#[test]
fn subtraction_trims_edges() {
    let ranges = subtract(&[Interval::new(1.0, 10.0)], Interval::new(-1.0, 2.0));
    assert_eq!(spans(&ranges), vec![(2.0, 10.0)]);
    let ranges = subtract(&[Interval::new(1.0, 10.0)], Interval::new(8.0, 12.0));
    assert_eq!(spans(&ranges), vec![(1.0, 8.0)]);
}

#[test]
fn covered_ranges_are_dropped() {
    let ranges = subtract(
        &[Interval::new(1.0, 2.0), Interval::new(5.0, 9.0)],
        Interval::new(0.0, 3.0),
    );
    assert_eq!(spans(&ranges), vec![(5.0, 9.0)]);
}

#[test]
fn disjoint_exclusions_leave_ranges_alone() {
    let ranges = subtract(&[Interval::new(1.0, 2.0)], Interval::new(2.0, 3.0));
    assert_eq!(spans(&ranges), vec![(1.0, 2.0)]);
}

#[test]
fn companion_band_widens_with_eccentricity() {
    let orbit = Orbit::new(Designation::PRIMARY, 0.3, 0.2);
    let band = companion_exclusion(&orbit);
    assert_relative_eq!(band.start, -0.4, epsilon = 1e-9);
    assert_relative_eq!(band.end, 1.0, epsilon = 1e-9);
}

#[test]
fn secondary_band_widths() {
    assert_relative_eq!(secondary_exclusion_width(0.1, Zone::Close), 1.0);
    assert_relative_eq!(secondary_exclusion_width(0.3, Zone::Near), 2.0);
    assert_relative_eq!(secondary_exclusion_width(0.6, Zone::Near), 3.0);
    assert_relative_eq!(secondary_exclusion_width(0.6, Zone::Far), 2.0);

    let orbit = Orbit::new(Designation::PRIMARY, 8.0, 0.6);
    let band = secondary_exclusion(&orbit, Zone::Near);
    assert_relative_eq!(band.start, 5.0);
    assert_relative_eq!(band.end, 11.0);
}

#[test]
fn allowed_orbits_start_at_the_minimum() {
    let ranges = allowed_orbits(
        0.5,
        30.0,
        [Interval::new(-0.4, 1.0), Interval::new(5.0, 11.0)],
    );
    assert_eq!(spans(&ranges), vec![(1.0, 5.0), (11.0, 20.0)]);
}

#[test]
fn inverted_range_allows_nothing() {
    assert!(allowed_orbits(2.0, 1.0, []).is_empty());
    assert!(Interval::new(2.0, 1.0).is_empty());
    assert_eq!(Interval::new(2.0, 1.0).width(), 0.0);
}
