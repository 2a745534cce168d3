//! Single-star generation: type and class, subtype, then physical properties.
//!
//! Each step is a separate function so a caller can drive them one at a
//! time; [`generate_star`] runs them all in order.

use gametable::DiceRoller;
use tracing::{debug, warn};
use units::{Length, Mass, Temperature, Time};

use crate::classification::Classification;
use crate::error::StellarError;
use crate::interpolation::StellarTables;
use crate::rules::{names, RuleTables};
use crate::spectral::{LuminosityClass, SpectralType};
use crate::star::{Star, AGE_OF_UNIVERSE};

/// Rolls on the type chain before giving up
pub const MAX_TYPE_ROLLS: u32 = 100;
const MAX_AGE_ROLLS: u32 = 100;

/// Brown dwarf diameter in solar diameters
pub const BROWN_DWARF_DIAMETER: f64 = 0.1;
/// Neutron star diameter in solar diameters (about 20 km)
pub const NEUTRON_STAR_DIAMETER: f64 = 1.5e-5;
/// Event horizon diameter of one solar mass, in solar diameters
pub const SCHWARZSCHILD_DIAMETER: f64 = 4.24e-6;

enum TypeResult {
    Type(SpectralType),
    Class(LuminosityClass),
}

fn parse_type_result(result: &str) -> Result<TypeResult, StellarError> {
    if let Ok(spectral_type) = result.parse::<SpectralType>() {
        return Ok(TypeResult::Type(spectral_type));
    }
    if let Ok(class) = result.parse::<LuminosityClass>() {
        return Ok(TypeResult::Class(class));
    }
    Err(StellarError::UnexpectedResult {
        table: names::STAR_TYPE.to_string(),
        result: result.to_string(),
    })
}

/// Roll the type chain until both a type and a class are known
///
/// A class result (from the special and giant tables) re-enters the chain
/// with DM+1 for each re-entry. A plain type result without an earlier class
/// is class V. Exotic results end the loop with no class. A type the class
/// cannot carry is rolled again.
pub fn roll_type_and_class<R: DiceRoller + ?Sized>(
    roller: &mut R,
    rules: &RuleTables,
) -> Result<Classification, StellarError> {
    let mut class: Option<LuminosityClass> = None;
    let mut dm = 0;

    for _ in 0..MAX_TYPE_ROLLS {
        let cascade = rules.cascade(roller, names::STAR_TYPE, &[], dm)?;
        debug!(path = ?cascade.path(), result = %cascade.result, dm, "star type roll");

        match parse_type_result(&cascade.result)? {
            TypeResult::Type(spectral_type) if spectral_type.is_exotic() => {
                return Ok(Classification::exotic(spectral_type));
            }
            TypeResult::Type(spectral_type) => {
                let resolved = class.unwrap_or(LuminosityClass::V);
                if resolved.allows(spectral_type) {
                    return Ok(Classification {
                        spectral_type,
                        subtype: None,
                        class: Some(resolved),
                    });
                }
                warn!(%spectral_type, class = %resolved, "type not valid for class, rerolling type");
            }
            TypeResult::Class(rolled) => {
                class.get_or_insert(rolled);
                dm += 1;
            }
        }
    }
    Err(StellarError::TypeUnresolved(MAX_TYPE_ROLLS))
}

/// Roll the subtype digit and apply the class-specific corrections
pub fn roll_subtype<R: DiceRoller + ?Sized>(
    roller: &mut R,
    rules: &RuleTables,
    classification: &mut Classification,
) -> Result<(), StellarError> {
    if classification.is_exotic() {
        return classification.validate();
    }

    let table = match classification.spectral_type {
        SpectralType::M => names::M_SUBTYPE,
        _ => names::NUMERIC_SUBTYPE,
    };
    let rolled = rules.roll_number(roller, table, &[], 0)?;
    let mut subtype = u8::try_from(rolled)
        .ok()
        .filter(|subtype| *subtype <= 9)
        .ok_or_else(|| StellarError::UnexpectedResult {
            table: table.to_string(),
            result: rolled.to_string(),
        })?;

    match (classification.spectral_type, classification.class) {
        (SpectralType::K, Some(LuminosityClass::IV)) if subtype > 4 => {
            warn!(subtype, "K IV subtype above 4, shifting down by 5");
            subtype -= 5;
        }
        (SpectralType::F, Some(LuminosityClass::VI)) if subtype < 5 => {
            warn!(subtype, "F VI subtype below 5, shifting up by 5");
            subtype += 5;
        }
        _ => {}
    }

    classification.subtype = Some(subtype);
    classification.validate()
}

/// Sum of d6 rolls, rolling again each time a 6 comes up
pub fn open_ended_d6<R: DiceRoller + ?Sized>(roller: &mut R) -> Result<i32, StellarError> {
    let mut total = 0;
    loop {
        let roll = roller.roll("1d6")?;
        total += roll;
        if roll < 6 {
            return Ok(total);
        }
    }
}

/// Mass from the tables, or dice formulas for remnants and brown dwarfs
pub fn roll_mass<R: DiceRoller + ?Sized>(
    roller: &mut R,
    tables: &StellarTables,
    classification: &Classification,
) -> Result<Mass, StellarError> {
    let mass = match classification.spectral_type {
        SpectralType::D => {
            (roller.roll("2d6")? - 1) as f64 / 10.0 + (roller.roll("1d10")? - 1) as f64 / 100.0
        }
        SpectralType::BD => 0.015 + (roller.roll("2d6")? - 2) as f64 * 0.007,
        SpectralType::NS | SpectralType::PSR => 1.0 + open_ended_d6(roller)? as f64 / 10.0,
        SpectralType::BH => {
            2.1 + (open_ended_d6(roller)? - 1) as f64 + roller.roll("1d10")? as f64 / 10.0
        }
        t if t.is_marker() => 0.0,
        _ => return tables.mass(classification),
    };
    Ok(Mass::from_solar_masses(mass))
}

/// Main sequence lifespan, ten billion years for one solar mass
pub fn main_sequence_lifespan(mass: Mass) -> Time {
    Time::from_gyr(10.0 / mass.powf(2.5))
}

/// Age, never above the age of the universe
///
/// Main sequence stars sit somewhere within their lifespan; subgiants and
/// giants have used it up and are partway through the later phases.
pub fn roll_age<R: DiceRoller + ?Sized>(
    roller: &mut R,
    classification: &Classification,
    mass: Mass,
) -> Result<Time, StellarError> {
    if classification.spectral_type.is_marker() {
        return Ok(Time::zero());
    }

    let oldest = Time::from_gyr(AGE_OF_UNIVERSE);
    for _ in 0..MAX_AGE_ROLLS {
        let variance = roller.roll("1d100")? as f64 / 100.0;
        let age = if classification.is_exotic() {
            oldest * variance
        } else {
            let solar_masses = mass.to_solar_masses();
            let lifespan = main_sequence_lifespan(mass);
            let subgiant = lifespan / (4.0 + solar_masses);
            let giant = lifespan / (10.0 * mass.powi(3));
            match classification.class {
                Some(LuminosityClass::IV) => lifespan + subgiant * variance,
                Some(class) if class.is_giant() => lifespan + subgiant + giant * variance,
                _ => lifespan * variance,
            }
        };
        let age = if age > oldest { oldest } else { age };
        if age > Time::zero() {
            return Ok(age);
        }
    }
    Err(StellarError::AgeUnresolved(MAX_AGE_ROLLS))
}

pub fn white_dwarf_diameter(mass: Mass) -> Length {
    Length::from_solar_diameters(0.01 * mass.powf(-1.0 / 3.0))
}

pub fn brown_dwarf_temperature(mass: Mass) -> Temperature {
    Temperature::from_kelvin(300.0 + 26000.0 * mass.to_solar_masses())
}

pub fn neutron_star_temperature(age: Time) -> Temperature {
    Temperature::from_kelvin(600_000.0 / (1.0 + 100.0 * age.to_gyr()).sqrt())
}

/// Fill in mass, age, diameter, temperature and luminosity
///
/// `age` fixes the age instead of rolling it, as for stars that share a
/// system with an older primary.
pub fn complete_star<R: DiceRoller + ?Sized>(
    roller: &mut R,
    tables: &StellarTables,
    classification: Classification,
    age: Option<Time>,
) -> Result<Star, StellarError> {
    classification.validate()?;
    let mut star = Star::new(classification);
    star.mass = roll_mass(roller, tables, &classification)?;
    star.age = match age {
        Some(age) => age,
        None => roll_age(roller, &classification, star.mass)?,
    };

    let (diameter, temperature) = match classification.spectral_type {
        SpectralType::D => (
            white_dwarf_diameter(star.mass),
            tables.white_dwarf_cooling.temperature(star.age),
        ),
        SpectralType::BD => (
            Length::from_solar_diameters(BROWN_DWARF_DIAMETER),
            brown_dwarf_temperature(star.mass),
        ),
        SpectralType::NS | SpectralType::PSR => (
            Length::from_solar_diameters(NEUTRON_STAR_DIAMETER),
            neutron_star_temperature(star.age),
        ),
        SpectralType::BH => (
            Length::from_solar_diameters(SCHWARZSCHILD_DIAMETER * star.mass.to_solar_masses()),
            Temperature::zero(),
        ),
        t if t.is_marker() => (Length::zero(), Temperature::zero()),
        _ => (
            tables.diameter(&classification)?,
            tables.temperature(&classification)?,
        ),
    };
    star.diameter = diameter;
    star.temperature = temperature;
    star.update_luminosity();

    debug!(
        code = %star.code(),
        mass = star.mass.to_solar_masses(),
        age_gyr = star.age.to_gyr(),
        "star completed"
    );
    Ok(star)
}

/// Minimum allowed orbit number around a star
pub fn minimum_allowed_orbit(tables: &StellarTables, star: &Star) -> Result<f64, StellarError> {
    match star.spectral_type {
        SpectralType::D => Ok(0.001),
        SpectralType::BD => Ok(0.005),
        SpectralType::NS | SpectralType::PSR | SpectralType::BH => Ok(0.0),
        t if t.is_marker() => Ok(0.0),
        _ => tables.minimum_orbit(&star.classification()),
    }
}

/// Roll a complete star from nothing
pub fn generate_star<R: DiceRoller + ?Sized>(
    roller: &mut R,
    tables: &StellarTables,
    rules: &RuleTables,
) -> Result<Star, StellarError> {
    let mut classification = roll_type_and_class(roller, rules)?;
    roll_subtype(roller, rules, &mut classification)?;
    complete_star(roller, tables, classification, None)
}
