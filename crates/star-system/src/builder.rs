//! Step-by-step system generation.
//!
//! [`StarSystemBuilder`] walks a fixed sequence of states, one roll phase per
//! call to [`step`](StarSystemBuilder::step):
//!
//! ```text
//! TypeClassPending -> SubtypePending -> PhysicalPropertiesPending
//!   -> OrbitLayoutPending -> EccentricityPending -> SecondaryClassPending
//!   -> MassPending -> PeriodPending -> ValidationPending -> Validated -> Complete
//! ```
//!
//! Single-star systems go straight from the physical properties to
//! validation. Any failure aborts the run; nothing is retried here.

use std::collections::BTreeMap;
use std::fmt;

use dice::Roller;
use gametable::DiceRoller;
use serde::{Deserialize, Serialize};
use stellar::{
    complete_star, minimum_allowed_orbit, names, roll_subtype, roll_type_and_class,
    Classification, LuminosityClass, RuleTables, SpectralType, Star, StellarTables,
};
use tracing::{debug, info};
use units::{Mass, Time};

use crate::config::GeneratorConfig;
use crate::designation::{Designation, Slot, Zone};
use crate::error::GenerationError;
use crate::metadata::{Multiplicity, SystemMetadata};
use crate::orbit::{
    au_to_orbit_number, period, roll_eccentricity, roll_orbit_number, Orbit, MAX_ORBIT,
};
use crate::secondary::{derive_classification, roll_relation, Relation};
use crate::system::{StarSystem, SystemStar};
use crate::worlds::{is_present, roll_world_counts, WorldCounts};
use crate::zones::{companion_exclusion, secondary_exclusion, Interval};

/// Smallest orbit number a non-primary star may keep
pub const MIN_ORBIT: f64 = 0.02;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BuildState {
    TypeClassPending,
    SubtypePending,
    PhysicalPropertiesPending,
    OrbitLayoutPending,
    EccentricityPending,
    SecondaryClassPending,
    MassPending,
    PeriodPending,
    ValidationPending,
    Validated,
    Complete,
}

impl fmt::Display for BuildState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

#[derive(Debug, Clone, Default)]
struct Draft {
    classification: Option<Classification>,
    relation: Option<Relation>,
    star: Option<Star>,
    orbit: Option<Orbit>,
}

/// Modifiers on the star presence table, from the primary
pub fn presence_mods(primary: &Star) -> Vec<&'static str> {
    let mut mods = Vec::new();
    let spectral_type = primary.spectral_type;
    let dwarf = matches!(
        primary.luminosity_class,
        Some(LuminosityClass::V | LuminosityClass::VI)
    );

    if primary.luminosity_class.is_some_and(|class| class.is_giant()) {
        mods.push("giant");
    }
    if dwarf
        && matches!(
            spectral_type,
            SpectralType::O | SpectralType::B | SpectralType::A | SpectralType::F
        )
    {
        mods.push("hot_dwarf");
    }
    if dwarf && spectral_type == SpectralType::M {
        mods.push("red_dwarf");
    }
    if spectral_type == SpectralType::BD || spectral_type.is_post_stellar() {
        mods.push("remnant");
    }
    mods
}

/// Generator state for one system
///
/// Owns the roller for the run and borrows the shared, read-only data
/// registries.
pub struct StarSystemBuilder<'a, R = Roller> {
    roller: R,
    config: GeneratorConfig,
    tables: &'a StellarTables,
    rules: &'a RuleTables,
    state: BuildState,
    drafts: BTreeMap<Designation, Draft>,
    world_counts: Option<WorldCounts>,
}

impl<'a, R: DiceRoller> StarSystemBuilder<'a, R> {
    pub fn new(
        roller: R,
        config: GeneratorConfig,
        tables: &'a StellarTables,
        rules: &'a RuleTables,
    ) -> Self {
        let mut drafts = BTreeMap::new();
        drafts.insert(Designation::PRIMARY, Draft::default());
        Self {
            roller,
            config,
            tables,
            rules,
            state: BuildState::TypeClassPending,
            drafts,
            world_counts: None,
        }
    }

    pub fn state(&self) -> BuildState {
        self.state
    }

    /// Designations placed so far, in order
    pub fn designations(&self) -> Vec<Designation> {
        self.drafts.keys().copied().collect()
    }

    pub fn classification(&self, designation: Designation) -> Option<Classification> {
        self.drafts.get(&designation)?.classification
    }

    pub fn star(&self, designation: Designation) -> Option<&Star> {
        self.drafts.get(&designation)?.star.as_ref()
    }

    pub fn orbit(&self, designation: Designation) -> Option<&Orbit> {
        self.drafts.get(&designation)?.orbit.as_ref()
    }

    pub fn relation(&self, designation: Designation) -> Option<Relation> {
        self.drafts.get(&designation)?.relation
    }

    /// Run the current phase and move to the next state
    ///
    /// Stepping a complete builder does nothing.
    pub fn step(&mut self) -> Result<BuildState, GenerationError> {
        let next = match self.state {
            BuildState::TypeClassPending => self.type_and_class()?,
            BuildState::SubtypePending => self.subtype()?,
            BuildState::PhysicalPropertiesPending => self.physical_properties()?,
            BuildState::OrbitLayoutPending => self.orbit_layout()?,
            BuildState::EccentricityPending => self.eccentricity()?,
            BuildState::SecondaryClassPending => self.secondary_classes()?,
            BuildState::MassPending => self.masses()?,
            BuildState::PeriodPending => self.periods()?,
            BuildState::ValidationPending => self.validate()?,
            BuildState::Validated => self.worlds()?,
            BuildState::Complete => BuildState::Complete,
        };
        if next != self.state {
            debug!(from = %self.state, to = %next, "build step");
        }
        self.state = next;
        Ok(next)
    }

    /// Step until complete
    pub fn run(&mut self) -> Result<(), GenerationError> {
        while self.state != BuildState::Complete {
            self.step()?;
        }
        Ok(())
    }

    /// Turn a complete builder into a system
    pub fn finish(self, metadata: SystemMetadata) -> Result<StarSystem, GenerationError> {
        if self.state != BuildState::Complete {
            return Err(GenerationError::NotFinished(self.state.to_string()));
        }

        let mut stars = BTreeMap::new();
        for (designation, draft) in self.drafts {
            let star = draft
                .star
                .ok_or(GenerationError::Incomplete(designation))?;
            let minimum_orbit = minimum_allowed_orbit(self.tables, &star)?;
            stars.insert(
                designation,
                SystemStar {
                    designation,
                    star,
                    minimum_orbit,
                    orbit: draft.orbit,
                },
            );
        }

        let metadata = metadata.with_multiplicity(Multiplicity::from_star_count(stars.len()));
        Ok(StarSystem::new(metadata, stars, self.world_counts))
    }

    /// Run every remaining step and finish
    pub fn build(mut self, metadata: SystemMetadata) -> Result<StarSystem, GenerationError> {
        self.run()?;
        self.finish(metadata)
    }

    fn draft(&self, designation: Designation) -> Result<&Draft, GenerationError> {
        self.drafts
            .get(&designation)
            .ok_or(GenerationError::MissingParent(designation))
    }

    fn primary_star(&self) -> Result<&Star, GenerationError> {
        self.draft(Designation::PRIMARY)?
            .star
            .as_ref()
            .ok_or(GenerationError::Incomplete(Designation::PRIMARY))
    }

    fn secondaries(&self) -> Vec<Designation> {
        self.drafts
            .keys()
            .copied()
            .filter(|designation| !designation.is_primary())
            .collect()
    }

    fn type_and_class(&mut self) -> Result<BuildState, GenerationError> {
        let classification = match self.config.known_primary {
            Some(known) => known,
            None => roll_type_and_class(&mut self.roller, self.rules)?,
        };
        debug!(%classification, "primary type and class");
        self.drafts
            .entry(Designation::PRIMARY)
            .or_default()
            .classification = Some(classification);
        Ok(BuildState::SubtypePending)
    }

    fn subtype(&mut self) -> Result<BuildState, GenerationError> {
        let draft = self.drafts.entry(Designation::PRIMARY).or_default();
        let mut classification = draft
            .classification
            .ok_or(GenerationError::Incomplete(Designation::PRIMARY))?;
        if classification.subtype.is_none() {
            roll_subtype(&mut self.roller, self.rules, &mut classification)?;
        } else {
            classification.validate()?;
        }
        draft.classification = Some(classification);
        Ok(BuildState::PhysicalPropertiesPending)
    }

    fn physical_properties(&mut self) -> Result<BuildState, GenerationError> {
        let draft = self.drafts.entry(Designation::PRIMARY).or_default();
        let classification = draft
            .classification
            .ok_or(GenerationError::Incomplete(Designation::PRIMARY))?;
        let star = complete_star(&mut self.roller, self.tables, classification, None)?;
        let marker = star.spectral_type.is_marker();
        draft.star = Some(star);

        if self.config.allow_multiple_stars && !marker {
            Ok(BuildState::OrbitLayoutPending)
        } else {
            Ok(BuildState::ValidationPending)
        }
    }

    fn orbit_layout(&mut self) -> Result<BuildState, GenerationError> {
        let mods = presence_mods(self.primary_star()?);

        let mut slots = vec![Slot::A];
        for zone in Zone::ALL {
            if is_present(&mut self.roller, self.rules, names::STAR_PRESENCE, &mods)? {
                slots.push(Slot::from_zone(zone));
            }
        }
        let mut placed: Vec<Designation> = slots
            .iter()
            .filter(|slot| **slot != Slot::A)
            .map(|slot| Designation::lead(*slot))
            .collect();
        for slot in slots {
            if is_present(&mut self.roller, self.rules, names::STAR_PRESENCE, &mods)? {
                placed.push(Designation::companion_of(slot));
            }
        }
        placed.sort();

        if placed.is_empty() {
            return Ok(BuildState::ValidationPending);
        }

        for designation in placed {
            let parent = designation
                .orbital_parent()
                .ok_or(GenerationError::MissingParent(designation))?;
            let orbit_number = roll_orbit_number(&mut self.roller, designation)?;
            self.drafts.insert(
                designation,
                Draft {
                    orbit: Some(Orbit::new(parent, orbit_number, 0.0)),
                    ..Draft::default()
                },
            );
        }
        info!(
            stars = self.drafts.len(),
            designations = ?self.designations(),
            "system layout"
        );
        Ok(BuildState::EccentricityPending)
    }

    fn eccentricity(&mut self) -> Result<BuildState, GenerationError> {
        for (designation, draft) in self.drafts.iter_mut() {
            let Some(orbit) = draft.orbit.as_mut() else {
                continue;
            };
            orbit.eccentricity = roll_eccentricity(&mut self.roller, self.rules, *designation)?;
        }
        Ok(BuildState::SecondaryClassPending)
    }

    fn secondary_classes(&mut self) -> Result<BuildState, GenerationError> {
        let evolved = self.primary_star()?.luminosity_class.is_some_and(|class| {
            matches!(class, LuminosityClass::III | LuminosityClass::IV)
        });

        for designation in self.secondaries() {
            let parent = designation
                .orbital_parent()
                .ok_or(GenerationError::MissingParent(designation))?;
            let parent_classification = self
                .draft(parent)?
                .classification
                .ok_or(GenerationError::Incomplete(parent))?;

            let relation = roll_relation(&mut self.roller, self.rules, designation, evolved)?;
            let classification = derive_classification(
                &mut self.roller,
                self.rules,
                &parent_classification,
                relation,
            )?;
            debug!(%designation, %relation, %classification, parent = %parent_classification, "secondary classified");

            let draft = self.drafts.entry(designation).or_default();
            draft.relation = Some(relation);
            draft.classification = Some(classification);
        }
        Ok(BuildState::MassPending)
    }

    fn masses(&mut self) -> Result<BuildState, GenerationError> {
        let age = self.primary_star()?.age;

        for designation in self.secondaries() {
            let draft = self.draft(designation)?;
            let relation = draft.relation;
            let classification = draft
                .classification
                .ok_or(GenerationError::Incomplete(designation))?;

            let star = match relation {
                Some(Relation::Twin) => {
                    let parent = designation
                        .orbital_parent()
                        .ok_or(GenerationError::MissingParent(designation))?;
                    let mut twin = self
                        .draft(parent)?
                        .star
                        .clone()
                        .ok_or(GenerationError::Incomplete(parent))?;
                    let loss = self.roller.roll("1d6")? as f64 / 100.0;
                    twin.mass = twin.mass * (1.0 - loss);
                    twin
                }
                _ => complete_star(&mut self.roller, self.tables, classification, Some(age))?,
            };
            self.drafts.entry(designation).or_default().star = Some(star);
        }
        Ok(BuildState::PeriodPending)
    }

    fn mass_of(&self, designation: Designation) -> Mass {
        self.drafts
            .get(&designation)
            .and_then(|draft| draft.star.as_ref())
            .map_or(Mass::zero(), |star| star.mass)
    }

    fn slot_mass(&self, slot: Slot) -> Mass {
        self.mass_of(Designation::lead(slot)) + self.mass_of(Designation::companion_of(slot))
    }

    fn periods(&mut self) -> Result<BuildState, GenerationError> {
        for designation in self.secondaries() {
            let (inner, outer) = if designation.companion {
                (
                    self.mass_of(Designation::lead(designation.slot)),
                    self.mass_of(designation),
                )
            } else {
                (self.slot_mass(Slot::A), self.slot_mass(designation.slot))
            };

            let draft = self.drafts.entry(designation).or_default();
            let orbit = draft
                .orbit
                .as_mut()
                .ok_or(GenerationError::Incomplete(designation))?;
            orbit.period = period(inner, outer, orbit.semi_major_axis);
        }
        Ok(BuildState::ValidationPending)
    }

    fn validate(&mut self) -> Result<BuildState, GenerationError> {
        for (designation, draft) in &self.drafts {
            let star = draft
                .star
                .as_ref()
                .ok_or(GenerationError::Incomplete(*designation))?;
            star.validate_tsc()?;
            if !star.spectral_type.is_marker() && star.mass <= Mass::zero() {
                return Err(GenerationError::ZeroMass(*designation));
            }

            if designation.is_primary() {
                continue;
            }
            let orbit = draft
                .orbit
                .as_ref()
                .ok_or(GenerationError::Incomplete(*designation))?;
            if !(MIN_ORBIT..=MAX_ORBIT).contains(&orbit.orbit_number) {
                return Err(GenerationError::OrbitOutOfRange {
                    designation: *designation,
                    orbit_number: orbit.orbit_number,
                });
            }
            if orbit.eccentricity < 0.0 {
                return Err(GenerationError::NegativeEccentricity {
                    designation: *designation,
                    eccentricity: orbit.eccentricity,
                });
            }
            if orbit.period <= Time::zero() {
                return Err(GenerationError::ZeroPeriod(*designation));
            }
        }

        self.check_orbit_clearance()?;
        Ok(BuildState::Validated)
    }

    /// Lead secondaries may not swing into the band the primary's companion
    /// keeps clear, nor into the band around any other lead secondary
    fn check_orbit_clearance(&self) -> Result<(), GenerationError> {
        let companion = Designation::companion_of(Slot::A);
        let mut bands: Vec<(Designation, Interval)> = self
            .orbit(companion)
            .map(|orbit| (companion, companion_exclusion(orbit)))
            .into_iter()
            .collect();

        let leads: Vec<(Designation, &Orbit)> = self
            .secondaries()
            .into_iter()
            .filter(|designation| !designation.companion)
            .filter_map(|designation| Some((designation, self.orbit(designation)?)))
            .collect();
        for (designation, orbit) in &leads {
            if let Some(zone) = designation.zone() {
                bands.push((*designation, secondary_exclusion(orbit, zone)));
            }
        }

        for (designation, orbit) in &leads {
            let swing =
                [orbit.periapsis(), orbit.apoapsis()].map(|end| au_to_orbit_number(end.to_au()));
            let conflict = bands.iter().find(|(other, band)| {
                other != designation && swing.iter().any(|number| band.contains(*number))
            });
            if let Some((other, band)) = conflict {
                debug!(%designation, %other, ?band, ?swing, "orbit crosses an exclusion band");
                return Err(GenerationError::OrbitConflict {
                    designation: *designation,
                    other: *other,
                });
            }
        }
        Ok(())
    }

    fn worlds(&mut self) -> Result<BuildState, GenerationError> {
        if self.config.world_counts {
            let stars: Vec<&Star> = self
                .drafts
                .values()
                .filter_map(|draft| draft.star.as_ref())
                .collect();
            self.world_counts = Some(roll_world_counts(&mut self.roller, self.rules, &stars)?);
        }
        Ok(BuildState::Complete)
    }
}

/// Generate a complete system from a seed string
///
/// Each call builds its own roller, so the same seed, config and registries
/// always give the same system. An empty seed rolls from the clock.
pub fn generate_star_system(
    seed: &str,
    config: &GeneratorConfig,
    tables: &StellarTables,
    rules: &RuleTables,
) -> Result<StarSystem, GenerationError> {
    let metadata = SystemMetadata::from_seed(seed);
    debug!(seed, catalog = %metadata.catalog_name(), "generating star system");
    StarSystemBuilder::new(Roller::new(seed), config.clone(), tables, rules).build(metadata)
}
