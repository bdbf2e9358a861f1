//! Exclusion filter
//!
//! Vetoes a match whose value text looks like an identifier. Only the
//! producer's value groups are checked, never the whole notation, so a real
//! measurement sitting next to a UUID is left alone.

use regex::{Captures, Regex};

use super::battery::Producer;
use super::fragments::UUID;

#[derive(Debug, Clone)]
pub struct ExclusionFilter {
    forbidden: Regex,
}

impl ExclusionFilter {
    pub fn uuid() -> Result<Self, regex::Error> {
        Ok(Self {
            forbidden: Regex::new(&format!("(?ix){UUID}"))?,
        })
    }

    pub fn forbids(&self, value_text: &str) -> bool {
        self.forbidden.is_match(value_text)
    }

    /// True when any participating value group of this match is forbidden
    pub fn vetoes(&self, producer: Producer, caps: &Captures<'_>) -> bool {
        producer
            .value_groups()
            .iter()
            .filter_map(|group| caps.name(group))
            .any(|m| self.forbids(m.as_str()))
    }
}
