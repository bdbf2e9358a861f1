//! Trait families
//!
//! Each family module declares its vocabulary, key and unit tables and its
//! ordered battery, and exposes a `family()` constructor that compiles them
//! into an immutable [`Family`].
//!
//! - `body_mass.rs` - Weights in grams (compound lb/oz, shorthand weight slot)
//! - `length.rs` - Total, tail, hind-foot and ear lengths in millimeters
//! - `testes_size.rs` - Testes length by width, single or per side
//! - `nipple_count.rs` - Nipple/mammae counts
//! - `sex.rs` - Sex words
//! - `life_stage.rs` - Life stage words and phrases

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{TraitError, TraitResult};
use crate::notation::Family;

pub mod body_mass;
pub mod length;
pub mod life_stage;
pub mod nipple_count;
pub mod sex;
pub mod testes_size;

pub use length::LengthTrait;

#[cfg(test)]
mod tests;

/// Keys that introduce a shorthand chain without naming a quantity
/// (`measurements:`, `catalog`, `tag 12 = male,`)
pub(crate) const SHORTHAND_KEY: &str = r"(?: on \s* tag | specimens? | catalog
    | (?: measurements? | meas ) [:.,]{0,2} (?: \s* length \s* )? (?: \s* [({\[] ? [a-z]{1,2} [)}\]]? \.? )?
    | tag \s+ \d+ \s* =? (?: male | female )? \s* ,
    | measurements? | mesurements? | measurementsnt )";

// ==================== FAMILY REGISTRY ====================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraitFamily {
    BodyMass,
    TotalLength,
    TailLength,
    HindFootLength,
    EarLength,
    TestesSize,
    NippleCount,
    Sex,
    LifeStage,
}

impl TraitFamily {
    /// Every family, in output order
    pub const ALL: [TraitFamily; 9] = [
        TraitFamily::BodyMass,
        TraitFamily::TotalLength,
        TraitFamily::TailLength,
        TraitFamily::HindFootLength,
        TraitFamily::EarLength,
        TraitFamily::TestesSize,
        TraitFamily::NippleCount,
        TraitFamily::Sex,
        TraitFamily::LifeStage,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TraitFamily::BodyMass => body_mass::NAME,
            TraitFamily::TotalLength => LengthTrait::Total.name(),
            TraitFamily::TailLength => LengthTrait::Tail.name(),
            TraitFamily::HindFootLength => LengthTrait::HindFoot.name(),
            TraitFamily::EarLength => LengthTrait::Ear.name(),
            TraitFamily::TestesSize => testes_size::NAME,
            TraitFamily::NippleCount => nipple_count::NAME,
            TraitFamily::Sex => sex::NAME,
            TraitFamily::LifeStage => life_stage::NAME,
        }
    }

    /// Compile this family's battery and tables
    pub fn build(&self) -> TraitResult<Family> {
        match self {
            TraitFamily::BodyMass => body_mass::family(),
            TraitFamily::TotalLength => length::family(LengthTrait::Total),
            TraitFamily::TailLength => length::family(LengthTrait::Tail),
            TraitFamily::HindFootLength => length::family(LengthTrait::HindFoot),
            TraitFamily::EarLength => length::family(LengthTrait::Ear),
            TraitFamily::TestesSize => testes_size::family(),
            TraitFamily::NippleCount => nipple_count::family(),
            TraitFamily::Sex => sex::family(),
            TraitFamily::LifeStage => life_stage::family(),
        }
    }
}

impl fmt::Display for TraitFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TraitFamily {
    type Err = TraitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace(['-', ' '], "_");
        TraitFamily::ALL
            .iter()
            .copied()
            .find(|family| family.as_str() == wanted)
            .ok_or_else(|| TraitError::UnknownFamily(s.to_string()))
    }
}
