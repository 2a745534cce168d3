//! Tabulated stellar properties by type, subtype and class.
//!
//! Each row lists one value per class, in the order Ia, Ib, II, III, IV, V,
//! VI. `NA` marks a class that does not exist for that type. Only the
//! representative subtypes are tabulated; everything between them is
//! interpolated.

use crate::spectral::SpectralType::{self, *};

pub(crate) const NA: f64 = f64::NAN;

pub(crate) type DataRow = (SpectralType, u8, [f64; 7]);

/// Solar masses
#[rustfmt::skip]
pub(crate) const MASS: &[DataRow] = &[
    //      Ia     Ib     II     III    IV     V      VI
    (O, 0, [200.0, 150.0, 130.0, 110.0, NA,    90.0,  NA]),
    (O, 5, [80.0,  60.0,  40.0,  30.0,  NA,    60.0,  NA]),
    (B, 0, [60.0,  40.0,  30.0,  20.0,  20.0,  18.0,  NA]),
    (B, 5, [30.0,  25.0,  20.0,  10.0,  10.0,  5.0,   NA]),
    (A, 0, [20.0,  15.0,  14.0,  8.0,   4.0,   2.2,   NA]),
    (A, 5, [15.0,  13.0,  11.0,  6.0,   2.3,   1.8,   NA]),
    (F, 0, [13.0,  12.0,  10.0,  4.0,   2.0,   1.5,   NA]),
    (F, 5, [12.0,  10.0,  8.0,   3.0,   1.5,   1.3,   0.8]),
    (G, 0, [12.0,  10.0,  8.0,   2.5,   1.3,   1.1,   0.7]),
    (G, 5, [13.0,  11.0,  10.0,  2.4,   1.2,   0.9,   0.6]),
    (K, 0, [14.0,  12.0,  10.0,  1.1,   1.1,   0.8,   0.5]),
    (K, 4, [NA,    NA,    NA,    NA,    1.0,   NA,    NA]),
    (K, 5, [18.0,  15.0,  12.0,  1.5,   NA,    0.7,   0.4]),
    (M, 0, [20.0,  16.0,  14.0,  1.8,   NA,    0.5,   0.3]),
    (M, 5, [25.0,  20.0,  16.0,  2.4,   NA,    0.16,  0.1]),
    (M, 9, [30.0,  25.0,  18.0,  3.0,   NA,    0.08,  0.06]),
];

/// Solar diameters
#[rustfmt::skip]
pub(crate) const DIAMETER: &[DataRow] = &[
    //      Ia      Ib     II     III    IV    V      VI
    (O, 0, [25.0,   24.0,  22.0,  21.0,  NA,   20.0,  NA]),
    (O, 5, [22.0,   20.0,  18.0,  15.0,  NA,   12.0,  NA]),
    (B, 0, [20.0,   14.0,  12.0,  10.0,  4.0,  7.0,   NA]),
    (B, 5, [60.0,   25.0,  14.0,  6.0,   3.5,  3.5,   NA]),
    (A, 0, [120.0,  50.0,  30.0,  5.0,   3.0,  2.2,   NA]),
    (A, 5, [180.0,  75.0,  45.0,  5.0,   2.7,  2.0,   NA]),
    (F, 0, [210.0,  85.0,  50.0,  5.0,   2.6,  1.7,   NA]),
    (F, 5, [280.0,  115.0, 66.0,  5.0,   2.2,  1.5,   1.0]),
    (G, 0, [330.0,  135.0, 77.0,  10.0,  2.0,  1.1,   0.8]),
    (G, 5, [360.0,  150.0, 90.0,  15.0,  2.3,  0.95,  0.7]),
    (K, 0, [420.0,  180.0, 110.0, 20.0,  2.3,  0.9,   0.6]),
    (K, 4, [NA,     NA,    NA,    NA,    2.5,  NA,    NA]),
    (K, 5, [600.0,  260.0, 160.0, 40.0,  NA,   0.8,   0.5]),
    (M, 0, [900.0,  380.0, 230.0, 60.0,  NA,   0.7,   0.4]),
    (M, 5, [1200.0, 600.0, 350.0, 100.0, NA,   0.2,   0.1]),
    (M, 9, [1800.0, 800.0, 500.0, 200.0, NA,   0.1,   0.08]),
];

/// Kelvin
#[rustfmt::skip]
pub(crate) const TEMPERATURE: &[DataRow] = &[
    //      Ia       Ib       II       III      IV       V        VI
    (O, 0, [50000.0, 50000.0, 50000.0, 50000.0, NA,      50000.0, NA]),
    (O, 5, [40000.0, 40000.0, 40000.0, 40000.0, NA,      40000.0, NA]),
    (B, 0, [30000.0, 30000.0, 30000.0, 30000.0, 30000.0, 30000.0, NA]),
    (B, 5, [15000.0, 15000.0, 15000.0, 15000.0, 15000.0, 15000.0, NA]),
    (A, 0, [10000.0, 10000.0, 10000.0, 10000.0, 10000.0, 10000.0, NA]),
    (A, 5, [8000.0,  8000.0,  8000.0,  8000.0,  8000.0,  8000.0,  NA]),
    (F, 0, [7500.0,  7500.0,  7500.0,  7500.0,  7500.0,  7500.0,  NA]),
    (F, 5, [6500.0,  6500.0,  6500.0,  6500.0,  6500.0,  6500.0,  6500.0]),
    (G, 0, [5700.0,  5700.0,  5700.0,  5700.0,  6000.0,  6000.0,  6000.0]),
    (G, 5, [5000.0,  5000.0,  5000.0,  5000.0,  5600.0,  5600.0,  5600.0]),
    (K, 0, [4600.0,  4600.0,  4600.0,  4600.0,  5200.0,  5200.0,  5200.0]),
    (K, 4, [NA,      NA,      NA,      NA,      4600.0,  NA,      NA]),
    (K, 5, [4000.0,  4000.0,  4000.0,  4000.0,  NA,      4400.0,  4400.0]),
    (M, 0, [3600.0,  3600.0,  3600.0,  3600.0,  NA,      3700.0,  3700.0]),
    (M, 5, [3100.0,  3100.0,  3100.0,  3100.0,  NA,      3000.0,  3000.0]),
    (M, 9, [2700.0,  2700.0,  2700.0,  2700.0,  NA,      2400.0,  2400.0]),
];

/// Minimum allowed orbit, as an orbit number
#[rustfmt::skip]
pub(crate) const MINIMUM_ORBIT: &[DataRow] = &[
    //      Ia    Ib    II    III   IV    V     VI
    (O, 0, [0.63, 0.6,  0.55, 0.53, NA,   0.5,  NA]),
    (O, 5, [0.55, 0.5,  0.45, 0.38, NA,   0.3,  NA]),
    (B, 0, [0.5,  0.35, 0.3,  0.25, 0.2,  0.18, NA]),
    (B, 5, [1.67, 0.63, 0.35, 0.15, 0.13, 0.09, NA]),
    (A, 0, [3.34, 1.4,  0.75, 0.13, 0.1,  0.06, NA]),
    (A, 5, [4.17, 2.17, 1.17, 0.13, 0.07, 0.05, NA]),
    (F, 0, [4.42, 2.5,  1.33, 0.13, 0.06, 0.04, NA]),
    (F, 5, [5.0,  3.25, 1.87, 0.13, 0.05, 0.03, 0.02]),
    (G, 0, [5.21, 3.59, 2.24, 0.25, 0.07, 0.03, 0.02]),
    (G, 5, [5.34, 3.84, 2.67, 0.38, 0.1,  0.02, 0.02]),
    (K, 0, [5.59, 4.17, 3.17, 0.5,  0.2,  0.02, 0.02]),
    (K, 4, [NA,   NA,   NA,   NA,   0.25, NA,   NA]),
    (K, 5, [6.17, 4.84, 4.0,  1.0,  NA,   0.02, 0.01]),
    (M, 0, [6.8,  5.42, 4.59, 1.68, NA,   0.02, 0.01]),
    (M, 5, [7.2,  6.17, 5.34, 3.0,  NA,   0.01, 0.01]),
    (M, 9, [7.8,  6.59, 5.92, 4.34, NA,   0.01, 0.01]),
];

/// White dwarf temperature (Kelvin) by age since formation (gigayears)
pub(crate) const WHITE_DWARF_COOLING: &[(f64, f64)] = &[
    (0.0, 100000.0),
    (0.1, 25000.0),
    (0.5, 10000.0),
    (1.0, 8000.0),
    (1.5, 7000.0),
    (2.5, 5500.0),
    (5.0, 5000.0),
    (10.0, 4000.0),
    (13.8, 3800.0),
];
