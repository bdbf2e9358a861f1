//! Value normalizer
//!
//! Turns the captures of one accepted pattern into trait records:
//! - numeric coercion (thousands separators stripped)
//! - canonical key lookup, falling back to the pattern default or the family
//!   sentinel
//! - unit resolution: explicit unit text, then units named inside the key,
//!   then the family base unit with `units_inferred`
//! - conversion to the family base unit
//! - flag assignment and plausibility limits
//!
//! Anything that cannot be coerced is a rejection, never an error.

use regex::Captures;

use super::battery::{CompiledPattern, KeyAmbiguity, Producer, Slot};
use super::family::Family;
use super::record::{Dimension, Flags, Side, TraitRecord, TraitValue, Units};
use super::units::{round2, UnitDef};

/// Result of normalizing one match
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Records(Vec<TraitRecord>),
    /// Span consumed without output (skip patterns)
    Consumed,
    /// Treated exactly like no match
    Rejected,
}

/// Normalize a match spanning the character range `span`
pub fn normalize(
    family: &Family,
    pattern: &CompiledPattern,
    caps: &Captures<'_>,
    span: (usize, usize),
) -> Outcome {
    let cx = Context {
        family,
        pattern,
        caps,
        span,
    };
    let records = match pattern.producer() {
        Producer::Skip => return Outcome::Consumed,
        Producer::Measure => cx.measure().map(|r| vec![r]),
        Producer::Fraction => cx.fraction().map(|r| vec![r]),
        Producer::Compound => cx.compound().map(|r| vec![r]),
        Producer::Shorthand(slot) => cx.shorthand(slot).map(|r| vec![r]),
        Producer::Cross => cx.cross().map(|r| vec![r]),
        Producer::SideCross => cx.side_cross(),
        Producer::Count => cx.count().map(|r| vec![r]),
        Producer::Text => cx.text_value().map(|r| vec![r]),
    };
    match records {
        Some(records) if !records.is_empty() => Outcome::Records(records),
        _ => Outcome::Rejected,
    }
}

pub(crate) fn parse_number(raw: &str) -> Option<f64> {
    let cleaned: String = raw.chars().filter(|c| *c != ',' && !c.is_whitespace()).collect();
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Unit applied to one value, and whether it was substituted
#[derive(Debug, Clone, Copy)]
struct ResolvedUnit {
    def: UnitDef,
    inferred: bool,
}

struct Context<'a, 't> {
    family: &'a Family,
    pattern: &'a CompiledPattern,
    caps: &'a Captures<'t>,
    span: (usize, usize),
}

impl<'a, 't> Context<'a, 't> {
    fn text(&self, group: &str) -> Option<&'t str> {
        self.caps.name(group).map(|m| m.as_str())
    }

    fn number(&self, group: &str) -> Option<f64> {
        self.text(group).and_then(parse_number)
    }

    /// `None` when the group is absent, `Some(None)` when present but not a number
    fn optional_number(&self, group: &str) -> Option<Option<f64>> {
        self.text(group).map(parse_number)
    }

    fn estimated(&self, group: &str) -> bool {
        self.text(group).is_some_and(|t| t.contains('['))
    }

    fn key(&self) -> &'static str {
        match self.text("key") {
            Some(raw) => self.family.keys().canonical(raw),
            None => self
                .pattern
                .default_key()
                .unwrap_or_else(|| self.family.keys().sentinel()),
        }
    }

    fn ambiguous(&self) -> bool {
        match self.pattern.ambiguity() {
            KeyAmbiguity::Never => false,
            KeyAmbiguity::Always => true,
            KeyAmbiguity::WhenKeyless => self.caps.name("key").is_none(),
        }
    }

    fn plausible(&self, value: f64) -> bool {
        self.family.max_value().map_or(true, |max| value <= max)
    }

    /// First present group in `explicit`, then `kunits`, then the base unit
    fn resolve_units(&self, explicit: &[&str]) -> Option<ResolvedUnit> {
        let table = self.family.units()?;
        if let Some(raw) = explicit.iter().find_map(|g| self.text(g)) {
            return table.lookup(raw).map(|def| ResolvedUnit { def, inferred: false });
        }
        if let Some(raw) = self.text("kunits") {
            return table.lookup(raw).map(|def| ResolvedUnit { def, inferred: false });
        }
        Some(ResolvedUnit {
            def: table.base(),
            inferred: true,
        })
    }

    fn record(&self, value: TraitValue, units: Option<Units>, mut flags: Flags) -> TraitRecord {
        flags.ambiguous_key |= self.ambiguous();
        TraitRecord {
            trait_name: self.family.name().to_string(),
            key: self.key().to_string(),
            value,
            units,
            side: None,
            dimension: None,
            flags,
            start: self.span.0,
            end: self.span.1,
            notation: self.text("notation").map(|n| n.trim().to_string()),
            field: None,
        }
    }

    // ----- Producers -----

    fn measure(&self) -> Option<TraitRecord> {
        let v1 = self.number("value1")?;
        let v2 = match self.optional_number("value2") {
            Some(parsed) => Some(parsed?),
            None => None,
        };
        let unit = self.resolve_units(&["units"])?;

        let value = match v2 {
            Some(v2) => {
                let pair = [unit.def.to_base(v1), unit.def.to_base(v2)];
                if !pair.iter().all(|v| self.plausible(*v)) {
                    return None;
                }
                TraitValue::Pair(pair)
            }
            None => {
                let v = unit.def.to_base(v1);
                if !self.plausible(v) {
                    return None;
                }
                TraitValue::Number(v)
            }
        };
        let flags = Flags {
            estimated_value: self.estimated("estimated"),
            units_inferred: unit.inferred,
            ambiguous_key: false,
        };
        Some(self.record(value, Some(Units::single(unit.def.canonical)), flags))
    }

    fn fraction(&self) -> Option<TraitRecord> {
        let numerator = self.number("numerator")?;
        let denominator = self.number("denominator")?;
        if denominator == 0.0 {
            return None;
        }
        let whole = match self.optional_number("whole") {
            Some(parsed) => parsed?,
            None => 0.0,
        };
        let unit = self.resolve_units(&["units"])?;
        let value = unit.def.to_base(whole + numerator / denominator);
        if !self.plausible(value) {
            return None;
        }
        let flags = Flags {
            units_inferred: unit.inferred,
            ..Flags::default()
        };
        Some(self.record(
            TraitValue::Number(value),
            Some(Units::single(unit.def.canonical)),
            flags,
        ))
    }

    /// Major and minor unit readings summed into one base-unit value; a
    /// range in either component yields a pair
    fn compound(&self) -> Option<TraitRecord> {
        let table = self.family.units()?;
        let major = table.lookup(self.text("units_a")?)?;
        let minor = table.lookup(self.text("units_b")?)?;

        let a1 = self.number("value1_a")?;
        let b1 = self.number("value1_b")?;
        let a2 = self.optional_number("value2_a");
        let b2 = self.optional_number("value2_b");

        let low = round2(a1 * major.factor + b1 * minor.factor);
        let value = if a2.is_some() || b2.is_some() {
            let a2 = a2.map_or(Some(a1), |v| v)?;
            let b2 = b2.map_or(Some(b1), |v| v)?;
            TraitValue::Pair([low, round2(a2 * major.factor + b2 * minor.factor)])
        } else {
            TraitValue::Number(low)
        };

        let flags = Flags {
            estimated_value: self.estimated("estimated_a") || self.estimated("estimated_b"),
            ..Flags::default()
        };
        Some(self.record(
            value,
            Some(Units::pair(major.canonical, minor.canonical)),
            flags,
        ))
    }

    fn shorthand(&self, slot: Slot) -> Option<TraitRecord> {
        let raw = self.text(slot.group())?;
        let cleaned = raw.trim_matches(|c: char| c == '[' || c == ']' || c.is_whitespace());
        // `?`, `x` and `n/d` mark an unknown slot
        let number = parse_number(cleaned)?;

        let unit = match slot {
            Slot::Weight => self.resolve_units(&["sh_wt_units"])?,
            _ => self.resolve_units(&[])?,
        };
        let value = unit.def.to_base(number);
        if !self.plausible(value) {
            return None;
        }
        let flags = Flags {
            estimated_value: self.estimated(slot.estimate_group()),
            units_inferred: unit.inferred,
            ambiguous_key: false,
        };
        Some(self.record(
            TraitValue::Number(value),
            Some(Units::single(unit.def.canonical)),
            flags,
        ))
    }

    /// One cross fragment instance; `s` is its group suffix
    fn cross_value(&self, s: &str) -> Option<(TraitValue, Units, Flags)> {
        let g = |name: &str| format!("{name}{s}");

        let v1 = self.number(&g("value1"))?;
        let v2_group = [g("value2a"), g("value2b"), g("value2c")]
            .into_iter()
            .find(|name| self.caps.name(name).is_some());
        let v2 = match v2_group {
            Some(name) => Some(self.number(&name)?),
            None => None,
        };

        let (units1a, units1b, units1c) = (g("units1a"), g("units1b"), g("units1c"));
        let first = self.resolve_units(&[units1a.as_str(), units1b.as_str(), units1c.as_str()])?;
        let second = match self.text(&g("units2")) {
            Some(raw) => ResolvedUnit {
                def: self.family.units()?.lookup(raw)?,
                inferred: false,
            },
            None => first,
        };

        let value = match v2 {
            Some(v2) => TraitValue::Pair([first.def.to_base(v1), second.def.to_base(v2)]),
            None => TraitValue::Number(first.def.to_base(v1)),
        };
        let in_range = match &value {
            TraitValue::Number(v) => self.plausible(*v),
            TraitValue::Pair(p) => p.iter().all(|v| self.plausible(*v)),
            TraitValue::Text(_) => true,
        };
        if !in_range {
            return None;
        }

        let units = if first.def.canonical == second.def.canonical {
            Units::single(first.def.canonical)
        } else {
            Units::pair(first.def.canonical, second.def.canonical)
        };
        let flags = Flags {
            estimated_value: self.estimated(&g("estimated")),
            units_inferred: first.inferred,
            ambiguous_key: false,
        };
        Some((value, units, flags))
    }

    fn side(&self, s: &str) -> Option<Side> {
        self.text(&format!("side1{s}"))
            .or_else(|| self.text(&format!("side2{s}")))
            .and_then(Side::parse)
    }

    fn cross(&self) -> Option<TraitRecord> {
        let (value, units, flags) = self.cross_value("")?;
        let mut record = self.record(value, Some(units), flags);
        record.side = self
            .side("")
            .or_else(|| self.text("dimside").and_then(Side::parse));
        record.dimension = self.text("dim").and_then(Dimension::parse);
        Some(record)
    }

    /// Two records, one per explicitly named side; the sides must differ
    fn side_cross(&self) -> Option<Vec<TraitRecord>> {
        let first_side = self.side("_1")?;
        let second_side = self.side("_2")?;
        if first_side == second_side {
            return None;
        }
        let mut records = Vec::with_capacity(2);
        for (suffix, side) in [("_1", first_side), ("_2", second_side)] {
            let (value, units, flags) = self.cross_value(suffix)?;
            let mut record = self.record(value, Some(units), flags);
            record.side = Some(side);
            records.push(record);
        }
        Some(records)
    }

    fn count(&self) -> Option<TraitRecord> {
        let count = match self.text("value") {
            Some(raw) => parse_count(raw)?,
            None => parse_count(self.text("c1")?)? + parse_count(self.text("c2")?)?,
        };
        let value = f64::from(count);
        if !self.plausible(value) {
            return None;
        }
        Some(self.record(TraitValue::Number(value), None, Flags::default()))
    }

    fn text_value(&self) -> Option<TraitRecord> {
        let raw = self.text("value")?;
        let canonical = match self.family.canonicalizer() {
            Some(canonicalize) => canonicalize(raw)?,
            None => raw.trim().to_string(),
        };
        if canonical.is_empty() {
            return None;
        }
        Some(self.record(TraitValue::Text(canonical), None, Flags::default()))
    }
}

/// Integer count; the word "none" is zero
fn parse_count(raw: &str) -> Option<u32> {
    let raw = raw.trim();
    if raw.eq_ignore_ascii_case("none") {
        return Some(0);
    }
    raw.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notation::battery::{Battery, PatternDef};
    use crate::notation::fragments::{self, weight_units};
    use crate::notation::units::{KeyTable, UnitTable};

    fn mass_family(defs: Vec<PatternDef>) -> Family {
        let keys = KeyTable::new("total weight").with("total weight", &["weight", "wt"]);
        Family::new(keys, Battery::build("body_mass", defs).unwrap())
            .unwrap()
            .with_units(UnitTable::mass())
    }

    fn run(family: &Family, text: &str) -> Outcome {
        let pattern = &family.battery().patterns()[0];
        let caps = pattern.variants()[0].captures(text).unwrap();
        normalize(family, pattern, &caps, (0, text.chars().count()))
    }

    fn records(outcome: Outcome) -> Vec<TraitRecord> {
        match outcome {
            Outcome::Records(records) => records,
            other => panic!("expected records, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number("1,192.0"), Some(1192.0));
        assert_eq!(parse_number(".5"), Some(0.5));
        assert_eq!(parse_number("n/d"), None);
    }

    #[test]
    fn test_parse_count() {
        assert_eq!(parse_count("none"), Some(0));
        assert_eq!(parse_count("12"), Some(12));
        assert_eq!(parse_count("x"), None);
    }

    #[test]
    fn test_measure_with_explicit_units() {
        let units = weight_units();
        let family = mass_family(vec![PatternDef::new("m", Producer::Measure)
            .part(r"(?P<key> weight ) \s* = \s*")
            .part(fragments::range(""))
            .part(format!(r"(?: \s* (?P<units> {units} ) )?"))]);

        let rec = records(run(&family, "weight=2 kg")).remove(0);
        assert_eq!(rec.number(), Some(2000.0));
        assert_eq!(rec.unit(), Some("kg"));
        assert_eq!(rec.key, "total weight");
        assert!(rec.flags.is_empty());
    }

    #[test]
    fn test_measure_infers_base_unit() {
        let family = mass_family(vec![PatternDef::new("m", Producer::Measure)
            .part(r"(?P<key> wt ) \s*")
            .part(fragments::range(""))]);

        let rec = records(run(&family, "wt [20]")).remove(0);
        assert_eq!(rec.number(), Some(20.0));
        assert_eq!(rec.unit(), Some("g"));
        assert!(rec.flags.units_inferred);
        assert!(rec.flags.estimated_value);
    }

    #[test]
    fn test_range_becomes_pair() {
        let family = mass_family(vec![PatternDef::new("m", Producer::Measure)
            .part(r"(?P<key> wt ) \s*")
            .part(fragments::range(""))]);

        let rec = records(run(&family, "wt 20.5-31.8")).remove(0);
        assert_eq!(rec.value, TraitValue::Pair([20.5, 31.8]));
    }

    #[test]
    fn test_default_key_and_keyless_ambiguity() {
        let family = mass_family(vec![PatternDef::new("m", Producer::Measure)
            .part(fragments::range(""))
            .part(r"\s* (?P<units> g )")
            .ambiguous_when_keyless()]);

        let rec = records(run(&family, "20 g")).remove(0);
        assert_eq!(rec.key, "total weight");
        assert!(rec.flags.ambiguous_key);
        assert!(!rec.flags.units_inferred);
    }

    #[test]
    fn test_skip_consumes() {
        let family = mass_family(vec![PatternDef::new("skip", Producer::Skip).part(r"\d+")]);
        assert_eq!(run(&family, "12"), Outcome::Consumed);
    }

    #[test]
    fn test_plausibility_limit() {
        let keys = KeyTable::new("nipple count");
        let family = Family::new(
            keys,
            Battery::build(
                "nipple_count",
                vec![PatternDef::new("n", Producer::Count).part(r"(?P<value> \d+ ) \s* teats")],
            )
            .unwrap(),
        )
        .unwrap()
        .with_max_value(100.0);

        assert_eq!(run(&family, "110 teats"), Outcome::Rejected);
        let rec = records(run(&family, "8 teats")).remove(0);
        assert_eq!(rec.number(), Some(8.0));
        assert!(rec.units.is_none());
    }
}
