//! Unit & key tables
//!
//! Lookups are exact matches on a normalized spelling, never pattern
//! matches, so the tables stay pure data.

use std::collections::HashMap;

// =============================================================================
// Units
// =============================================================================

pub const POUND_TO_GRAMS: f64 = 453.593;
pub const OUNCE_TO_GRAMS: f64 = 28.349;
pub const FOOT_TO_MM: f64 = 304.8;
pub const INCH_TO_MM: f64 = 25.4;

/// Canonical unit and its factor to the family base unit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitDef {
    pub canonical: &'static str,
    pub factor: f64,
}

impl UnitDef {
    /// Convert a value written in this unit to the base unit. Values that
    /// need no conversion keep their written precision.
    pub fn to_base(&self, value: f64) -> f64 {
        if self.factor == 1.0 {
            value
        } else {
            round2(value * self.factor)
        }
    }
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Lower-case and drop dots and whitespace: `"k. g"` -> `"kg"`
pub fn normalize_unit(raw: &str) -> String {
    raw.chars()
        .filter(|c| *c != '.' && !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

#[derive(Debug, Clone)]
pub struct UnitTable {
    base: UnitDef,
    entries: HashMap<String, UnitDef>,
}

impl UnitTable {
    pub fn new(base: &'static str) -> Self {
        let base = UnitDef {
            canonical: base,
            factor: 1.0,
        };
        Self {
            base,
            entries: HashMap::new(),
        }
    }

    pub fn with(mut self, canonical: &'static str, factor: f64, spellings: &[&str]) -> Self {
        let def = UnitDef { canonical, factor };
        self.entries.insert(canonical.to_string(), def);
        for spelling in spellings {
            self.entries.insert(normalize_unit(spelling), def);
        }
        self
    }

    /// Grams
    pub fn mass() -> Self {
        Self::new("g")
            .with("g", 1.0, &["g", "gs", "gm", "gms", "gr", "grs", "gram", "grams"])
            .with("mg", 0.001, &["mg", "mgs", "milligram", "milligrams"])
            .with("kg", 1000.0, &["kg", "kgs", "kilogram", "kilograms"])
            .with("lbs", POUND_TO_GRAMS, &["lb", "lbs", "pound", "pounds"])
            .with("ozs", OUNCE_TO_GRAMS, &["oz", "ozs", "ounce", "ounces"])
    }

    /// Millimeters
    pub fn length() -> Self {
        Self::new("mm")
            .with(
                "mm",
                1.0,
                &["mm", "millimeter", "millimeters", "millimetre", "millimetres"],
            )
            .with("cm", 10.0, &["cm", "centimeter", "centimeters"])
            .with("m", 1000.0, &["m", "meter", "meters"])
            .with(
                "ft",
                FOOT_TO_MM,
                &["ft", "fts", "foot", "foots", "feet", "feets", "'"],
            )
            .with("in", INCH_TO_MM, &["in", "ins", "inch", "inches", "\""])
    }

    pub fn base(&self) -> UnitDef {
        self.base
    }

    pub fn lookup(&self, raw: &str) -> Option<UnitDef> {
        self.entries.get(&normalize_unit(raw)).copied()
    }
}

// =============================================================================
// Keys
// =============================================================================

/// Lower-case, treat `_` `-` and whitespace as word breaks, drop all other
/// punctuation: `"Body Wt."` -> `"body wt"`, `"w.t."` -> `"wt"`
pub fn normalize_key(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut pending_space = false;
    for c in raw.chars() {
        if c.is_alphanumeric() {
            if pending_space && !out.is_empty() {
                out.push(' ');
            }
            pending_space = false;
            out.extend(c.to_lowercase());
        } else if c.is_whitespace() || c == '_' || c == '-' {
            pending_space = true;
        }
    }
    out
}

/// Raw key spellings to canonical keys. Unknown spellings resolve to the
/// family sentinel instead of failing.
#[derive(Debug, Clone)]
pub struct KeyTable {
    sentinel: &'static str,
    entries: HashMap<String, &'static str>,
}

impl KeyTable {
    pub fn new(sentinel: &'static str) -> Self {
        Self {
            sentinel,
            entries: HashMap::new(),
        }
    }

    pub fn with(mut self, canonical: &'static str, spellings: &[&str]) -> Self {
        self.entries.insert(normalize_key(canonical), canonical);
        for spelling in spellings {
            self.entries.insert(normalize_key(spelling), canonical);
        }
        self
    }

    pub fn sentinel(&self) -> &'static str {
        self.sentinel
    }

    pub fn canonical(&self, raw: &str) -> &'static str {
        self.entries
            .get(&normalize_key(raw))
            .copied()
            .unwrap_or(self.sentinel)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
