//! Trait records: the output of one accepted notation.

use serde::{Deserialize, Serialize};

// =============================================================================
// Types
// =============================================================================

/// Value carried by a record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TraitValue {
    Number(f64),
    /// Range ends, cross dimensions, or the two halves of a compound reading
    Pair([f64; 2]),
    /// Canonical text for the descriptive families (sex, life stage)
    Text(String),
}

impl TraitValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            TraitValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_pair(&self) -> Option<[f64; 2]> {
        match self {
            TraitValue::Pair(p) => Some(*p),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            TraitValue::Text(t) => Some(t),
            _ => None,
        }
    }
}

/// Canonical unit spelling, or a pair for compound notations ("2 lbs 3 oz")
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Units {
    Single(String),
    Pair([String; 2]),
}

impl Units {
    pub fn single(unit: &str) -> Self {
        Units::Single(unit.to_string())
    }

    pub fn pair(first: &str, second: &str) -> Self {
        Units::Pair([first.to_string(), second.to_string()])
    }

    pub fn as_single(&self) -> Option<&str> {
        match self {
            Units::Single(u) => Some(u),
            Units::Pair(_) => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
    Both,
}

impl Side {
    /// Parse a side word, bracketed letter, or the numeric suffix used by
    /// paired gonad fields (`_1` is left, `_2` is right).
    pub fn parse(raw: &str) -> Option<Side> {
        match raw.trim().to_lowercase().as_str() {
            "left" | "lft" | "l" | "1" => Some(Side::Left),
            "right" | "rt" | "r" | "2" => Some(Side::Right),
            "both" => Some(Side::Both),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Left => "left",
            Side::Right => "right",
            Side::Both => "both",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    Length,
    Width,
}

impl Dimension {
    pub fn parse(raw: &str) -> Option<Dimension> {
        match raw.trim().to_lowercase().as_str() {
            "length" => Some(Dimension::Length),
            "width" => Some(Dimension::Width),
            _ => None,
        }
    }
}

fn is_false(b: &bool) -> bool {
    !*b
}

/// Independent record flags
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flags {
    /// Value was written inside `[` `]`
    #[serde(default, skip_serializing_if = "is_false")]
    pub estimated_value: bool,
    /// No unit text in the notation; the family base unit was substituted
    #[serde(default, skip_serializing_if = "is_false")]
    pub units_inferred: bool,
    /// Key could name more than one quantity
    #[serde(default, skip_serializing_if = "is_false")]
    pub ambiguous_key: bool,
}

impl Flags {
    pub fn is_empty(&self) -> bool {
        !(self.estimated_value || self.units_inferred || self.ambiguous_key)
    }
}

/// One extracted trait fact
///
/// Offsets are half-open character offsets into the scanned text, shifted by
/// the caller's origin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraitRecord {
    #[serde(rename = "trait")]
    pub trait_name: String,
    /// Canonical key
    pub key: String,
    pub value: TraitValue,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub units: Option<Units>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub side: Option<Side>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimension: Option<Dimension>,
    #[serde(default, skip_serializing_if = "Flags::is_empty")]
    pub flags: Flags,
    pub start: usize,
    pub end: usize,
    /// Raw chain text for shorthand and count notations
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notation: Option<String>,
    /// Source field identifier, for traceability only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl TraitRecord {
    pub fn number(&self) -> Option<f64> {
        self.value.as_number()
    }

    pub fn unit(&self) -> Option<&str> {
        self.units.as_ref().and_then(Units::as_single)
    }

    pub fn span(&self) -> (usize, usize) {
        (self.start, self.end)
    }

    pub fn overlaps(&self, other: &TraitRecord) -> bool {
        self.start < other.end && other.start < self.end
    }
}
