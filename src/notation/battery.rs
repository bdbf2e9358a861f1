//! Notation battery
//!
//! An ordered list of whole-notation patterns for one trait family, from most
//! specific to most permissive. The order is part of the family's behavior:
//! at any scan position the first pattern (in battery order) that matches,
//! passes its guards, survives exclusion and normalizes to at least one
//! record wins.
//!
//! Patterns are declared with [`PatternDef`], a small builder that
//! concatenates fragment sources and collects their guards, and compiled once
//! into an immutable [`Battery`].

use regex::{Captures, Regex};

use super::fragments::{Fragment, SEPARATORS, SEP_SLOT};
use super::guard::Guard;
use crate::error::{TraitError, TraitResult};

// ==================== PATTERN KINDS ====================

/// What a pattern contributes to the output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternKind {
    /// One record
    Single,
    /// Two linked records, one per body side
    Double,
    /// Consumes its span without emitting anything
    Skip,
}

/// Shorthand chain slot read by a shorthand producer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    TotalLength,
    TailLength,
    HindFootLength,
    EarLength,
    Weight,
}

impl Slot {
    pub fn group(&self) -> &'static str {
        match self {
            Slot::TotalLength => "sh_tl",
            Slot::TailLength => "sh_tal",
            Slot::HindFootLength => "sh_hfl",
            Slot::EarLength => "sh_el",
            Slot::Weight => "sh_wt",
        }
    }

    pub fn estimate_group(&self) -> &'static str {
        match self {
            Slot::TotalLength => "est_tl",
            Slot::TailLength => "est_tal",
            Slot::HindFootLength => "est_hfl",
            Slot::EarLength => "est_el",
            Slot::Weight => "est_wt",
        }
    }
}

/// How a match becomes records
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Producer {
    /// Range plus optional units
    Measure,
    /// Whole plus numerator/denominator
    Fraction,
    /// Two unit-tagged ranges summed into one value (`2 lbs 3 oz`)
    Compound,
    /// One slot of a shorthand chain
    Shorthand(Slot),
    /// Length by width
    Cross,
    /// Two side-tagged crosses
    SideCross,
    /// Integer count, or the sum of two typed counts
    Count,
    /// Canonicalized text
    Text,
    Skip,
}

impl Producer {
    pub fn kind(&self) -> PatternKind {
        match self {
            Producer::SideCross => PatternKind::Double,
            Producer::Skip => PatternKind::Skip,
            _ => PatternKind::Single,
        }
    }

    /// Groups holding the value text, checked by the exclusion filter
    pub fn value_groups(&self) -> &'static [&'static str] {
        match self {
            Producer::Measure => &["range"],
            Producer::Fraction => &["fraction"],
            Producer::Compound => &["range_a", "range_b"],
            Producer::Shorthand(_) => &["notation"],
            Producer::Cross => &["cross"],
            Producer::SideCross => &["cross_1", "cross_2"],
            Producer::Count => &["notation", "value"],
            Producer::Text => &["value"],
            Producer::Skip => &[],
        }
    }
}

/// When a pattern's key is flagged as ambiguous
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum KeyAmbiguity {
    #[default]
    Never,
    /// Only when the notation carried no key
    WhenKeyless,
    Always,
}

// ==================== DEFINITIONS ====================

/// Declarative pattern, built from fragments
#[derive(Debug, Clone)]
pub struct PatternDef {
    name: &'static str,
    producer: Producer,
    parts: Vec<Fragment>,
    default_key: Option<&'static str>,
    ambiguity: KeyAmbiguity,
}

impl PatternDef {
    pub fn new(name: &'static str, producer: Producer) -> Self {
        Self {
            name,
            producer,
            parts: Vec::new(),
            default_key: None,
            ambiguity: KeyAmbiguity::Never,
        }
    }

    pub fn part(mut self, part: impl Into<Fragment>) -> Self {
        self.parts.push(part.into());
        self
    }

    pub fn parts(mut self, parts: impl IntoIterator<Item = Fragment>) -> Self {
        self.parts.extend(parts);
        self
    }

    /// Canonical key used when the notation has no `key` group
    pub fn default_key(mut self, key: &'static str) -> Self {
        self.default_key = Some(key);
        self
    }

    pub fn ambiguous_when_keyless(mut self) -> Self {
        self.ambiguity = KeyAmbiguity::WhenKeyless;
        self
    }

    pub fn always_ambiguous(mut self) -> Self {
        self.ambiguity = KeyAmbiguity::Always;
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn source(&self) -> String {
        self.parts
            .iter()
            .map(|p| p.source.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Expanded sources, one per shorthand separator when the pattern holds
    /// a separator slot
    fn variant_sources(&self) -> Vec<String> {
        let source = self.source();
        if source.contains(SEP_SLOT) {
            SEPARATORS
                .iter()
                .map(|sep| format!("(?ix){}", source.replace(SEP_SLOT, sep)))
                .collect()
        } else {
            vec![format!("(?ix){source}")]
        }
    }
}

// ==================== COMPILED ====================

#[derive(Debug, Clone)]
pub struct CompiledPattern {
    name: &'static str,
    producer: Producer,
    default_key: Option<&'static str>,
    ambiguity: KeyAmbiguity,
    variants: Vec<Regex>,
    guards: Vec<Guard>,
}

impl CompiledPattern {
    pub fn compile(def: PatternDef) -> TraitResult<Self> {
        let variants = def
            .variant_sources()
            .iter()
            .map(|source| {
                Regex::new(source).map_err(|source| TraitError::Pattern {
                    pattern: def.name.to_string(),
                    source,
                })
            })
            .collect::<TraitResult<Vec<_>>>()?;

        let mut guards = Vec::new();
        for spec in def.parts.iter().flat_map(|p| p.guards.iter()) {
            let known = variants[0]
                .capture_names()
                .flatten()
                .any(|name| name == spec.group);
            if !known {
                return Err(TraitError::UnknownGuardGroup {
                    pattern: def.name.to_string(),
                    group: spec.group.clone(),
                });
            }
            guards.push(spec.compile().map_err(|source| TraitError::Pattern {
                pattern: def.name.to_string(),
                source,
            })?);
        }

        Ok(Self {
            name: def.name,
            producer: def.producer,
            default_key: def.default_key,
            ambiguity: def.ambiguity,
            variants,
            guards,
        })
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn producer(&self) -> Producer {
        self.producer
    }

    pub fn kind(&self) -> PatternKind {
        self.producer.kind()
    }

    pub fn default_key(&self) -> Option<&'static str> {
        self.default_key
    }

    pub fn ambiguity(&self) -> KeyAmbiguity {
        self.ambiguity
    }

    pub fn variants(&self) -> &[Regex] {
        &self.variants
    }

    /// All guards hold for this candidate
    pub fn guards_allow(&self, caps: &Captures<'_>, text: &str) -> bool {
        self.guards.iter().all(|g| g.allows(caps, text))
    }
}

/// Immutable, priority-ordered pattern list for one family
#[derive(Debug, Clone)]
pub struct Battery {
    family: &'static str,
    patterns: Vec<CompiledPattern>,
}

impl Battery {
    pub fn build(family: &'static str, defs: Vec<PatternDef>) -> TraitResult<Self> {
        if defs.is_empty() {
            return Err(TraitError::EmptyBattery {
                family: family.to_string(),
            });
        }
        let patterns = defs
            .into_iter()
            .map(CompiledPattern::compile)
            .collect::<TraitResult<Vec<_>>>()?;

        let battery = Self { family, patterns };
        tracing::debug!(
            family,
            patterns = battery.len(),
            variants = battery.variant_count(),
            "battery built"
        );
        Ok(battery)
    }

    pub fn family(&self) -> &'static str {
        self.family
    }

    pub fn patterns(&self) -> &[CompiledPattern] {
        &self.patterns
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn variant_count(&self) -> usize {
        self.patterns.iter().map(|p| p.variants.len()).sum()
    }

    pub fn pattern_names(&self) -> Vec<&'static str> {
        self.patterns.iter().map(|p| p.name).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notation::fragments::{self, ShorthandWeight};
    use crate::notation::guard::GuardSpec;

    #[test]
    fn test_kinds_follow_producers() {
        assert_eq!(Producer::SideCross.kind(), PatternKind::Double);
        assert_eq!(Producer::Skip.kind(), PatternKind::Skip);
        assert_eq!(Producer::Shorthand(Slot::Weight).kind(), PatternKind::Single);
        assert!(Producer::Skip.value_groups().is_empty());
    }

    #[test]
    fn test_builder_concatenates_parts() {
        let def = PatternDef::new("demo", Producer::Measure)
            .part(r"\b (?P<key> wt )")
            .part(fragments::range(""))
            .default_key("total weight");

        assert!(def.source().starts_with(r"\b (?P<key> wt )"));
        let compiled = CompiledPattern::compile(def).unwrap();
        assert_eq!(compiled.variants().len(), 1);
        assert_eq!(compiled.default_key(), Some("total weight"));
        assert!(compiled.variants()[0].is_match("WT12"));
    }

    #[test]
    fn test_shorthand_gets_three_variants() {
        let def = PatternDef::new("chain", Producer::Shorthand(Slot::TotalLength))
            .part(fragments::shorthand(ShorthandWeight::Optional));
        let compiled = CompiledPattern::compile(def).unwrap();
        assert_eq!(compiled.variants().len(), 3);
        assert!(compiled.variants()[1].is_match("308/190/45/20"));
        assert!(!compiled.variants()[1].is_match("308/190-45/20"));
    }

    #[test]
    fn test_compile_error_names_pattern() {
        let def = PatternDef::new("broken", Producer::Measure).part("(?P<key> wt");
        match CompiledPattern::compile(def) {
            Err(TraitError::Pattern { pattern, .. }) => assert_eq!(pattern, "broken"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_unknown_guard_group_rejected() {
        let frag = fragments::Fragment::new(r"(?P<value> \d+ )")
            .guard(GuardSpec::not_followed_by("missing", r"\d"));
        let def = PatternDef::new("guarded", Producer::Count).part(frag);
        assert!(matches!(
            CompiledPattern::compile(def),
            Err(TraitError::UnknownGuardGroup { .. })
        ));
    }

    #[test]
    fn test_empty_battery_rejected() {
        assert!(matches!(
            Battery::build("nothing", vec![]),
            Err(TraitError::EmptyBattery { .. })
        ));
    }

    #[test]
    fn test_battery_keeps_order() {
        let battery = Battery::build(
            "demo",
            vec![
                PatternDef::new("first", Producer::Measure).part(fragments::range("")),
                PatternDef::new("second", Producer::Skip).part(fragments::UUID),
            ],
        )
        .unwrap();
        assert_eq!(battery.pattern_names(), vec!["first", "second"]);
        assert_eq!(battery.variant_count(), 2);
        assert_eq!(battery.family(), "demo");
    }
}
