//! Trait family: one battery plus the tables and limits its normalizer uses.

use super::battery::Battery;
use super::exclusion::ExclusionFilter;
use super::record::TraitRecord;
use super::scanner;
use super::units::{KeyTable, UnitTable};
use crate::error::{TraitError, TraitResult};

/// Turns a raw text capture into its canonical form, or rejects it
pub type TextCanonicalizer = fn(&str) -> Option<String>;

#[derive(Debug, Clone)]
pub struct Family {
    name: &'static str,
    units: Option<UnitTable>,
    keys: KeyTable,
    max_value: Option<f64>,
    canonicalize: Option<TextCanonicalizer>,
    battery: Battery,
    exclusion: ExclusionFilter,
}

impl Family {
    pub fn new(keys: KeyTable, battery: Battery) -> TraitResult<Self> {
        let exclusion = ExclusionFilter::uuid().map_err(|source| TraitError::Pattern {
            pattern: "uuid".to_string(),
            source,
        })?;
        Ok(Self {
            name: battery.family(),
            units: None,
            keys,
            max_value: None,
            canonicalize: None,
            battery,
            exclusion,
        })
    }

    pub fn with_units(mut self, units: UnitTable) -> Self {
        self.units = Some(units);
        self
    }

    /// Values above this are implausible and produce no record
    pub fn with_max_value(mut self, max: f64) -> Self {
        self.max_value = Some(max);
        self
    }

    pub fn with_canonicalizer(mut self, canonicalize: TextCanonicalizer) -> Self {
        self.canonicalize = Some(canonicalize);
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn units(&self) -> Option<&UnitTable> {
        self.units.as_ref()
    }

    pub fn keys(&self) -> &KeyTable {
        &self.keys
    }

    pub fn max_value(&self) -> Option<f64> {
        self.max_value
    }

    pub fn canonicalizer(&self) -> Option<TextCanonicalizer> {
        self.canonicalize
    }

    pub fn battery(&self) -> &Battery {
        &self.battery
    }

    pub fn exclusion(&self) -> &ExclusionFilter {
        &self.exclusion
    }

    /// Scan `text`, reporting offsets shifted by `origin`
    pub fn scan(&self, text: &str, origin: usize) -> Vec<TraitRecord> {
        scanner::scan(self, text, origin)
    }
}
