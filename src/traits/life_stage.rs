//! Life stage
//!
//! Keyed values may be free words; unkeyed text only yields the intrinsic
//! vocabulary (`adult`, `juvenile`, ...) or an age phrase (`first year`).

use crate::error::TraitResult;
use crate::notation::fragments::Fragment;
use crate::notation::{Battery, Family, GuardSpec, KeyTable, PatternDef, Producer};

pub const NAME: &str = "life_stage";

const LIFE_STAGE: &str = "life stage";

const TIME_UNITS: &str = r"(?: years? | months? | weeks? | days? | hours? )";

const ORDINALS: &str = r"(?: first | second | third | fourth | fifth | 1st | 2nd | 3rd | 4th | 5th )";

const INTRINSIC: &str = r"(?: yolk \s? sac | young [\s-]? of [\s-]? the [\s-]? year | adult \s* young | young \s* adult
    | ads? | adulte?s? | chicks? | fledgelings? | fleglings? | fry | hatched | hatchlings?
    | imagos? | imms? | immatures? | jeunes? | juvs? | juveniles? | juvéniles? | larvae? | larvals?
    | larves? | leptocephales? | leptocephalus | matures? | metamorphs? | neonates? | nestlings?
    | nulliparous | premetamorphs? | sub-adults? | subads? | subadulte?s? | tadpoles? | têtard
    | yearlings? | yg | ygs | young )";

/// A word that may carry inner punctuation: `sub-adult`, `5-6`, `wks.`
const WORD: &str = r"(?: \w (?: [\w?./-]* [\w?] )? )";

fn keys() -> KeyTable {
    KeyTable::new(LIFE_STAGE)
        .with(
            LIFE_STAGE,
            &[
                "life stage", "lifestage", "life stage remarks", "lifestage remarks",
                "life stage remark",
            ],
        )
        .with("age class", &["age class", "ageclass"])
        .with(
            "age",
            &[
                "age", "age in years", "age in months", "age in weeks", "age in days",
                "age in hours",
            ],
        )
}

/// Lower-cased with runs of whitespace collapsed
pub fn canonicalize(raw: &str) -> Option<String> {
    let value = raw
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ");
    (!value.is_empty()).then_some(value)
}

/// `age determined by ...` is a method, not a stage
fn not_determined(fragment: Fragment) -> Fragment {
    fragment.guard(GuardSpec::not_starting_with("value", r"determin"))
}

fn battery() -> TraitResult<Battery> {
    let key = format!(
        r#"\b (?P<key> life [\s_-]* stage (?: [\s_-]* remarks? )? | age [\s_-]* class
            | age [\s_-]* in [\s_-]* (?P<time_units> {TIME_UNITS} ) | age ) \b [\s:="]*"#
    );
    let intrinsic = format!(r"(?: {INTRINSIC} ) \b");
    let as_time = format!(
        r"(?: (?: after \s+ )? (?: {ORDINALS} | hatching ) \s+ {TIME_UNITS} )"
    );
    let stage_or_word = format!("(?: {intrinsic} | {WORD} )");

    let defs = vec![
        // juvenile/yearling
        PatternDef::new("key_joined", Producer::Text)
            .part(key.clone())
            .part(not_determined(Fragment::new(format!(
                r"(?P<value> {stage_or_word} \s* [/-] \s* {intrinsic} )"
            )))),
        // young adult
        PatternDef::new("key_pair", Producer::Text)
            .part(key.clone())
            .part(not_determined(Fragment::new(format!(
                r"(?P<value> {stage_or_word} \s+ {intrinsic} )"
            )))),
        PatternDef::new("key_time", Producer::Text)
            .part(key.clone())
            .part(format!(r"(?P<value> {as_time} )")),
        PatternDef::new("key_intrinsic", Producer::Text)
            .part(key.clone())
            .part(format!(r"(?P<value> {intrinsic} )")),
        // 5-6 wks
        PatternDef::new("key_words", Producer::Text)
            .part(key)
            .part(
                not_determined(Fragment::new(format!(
                    r"(?P<value> {stage_or_word} (?: \s* [/-]? \s* {stage_or_word} ){{0,4}} )"
                )))
                .guard(GuardSpec::followed_by("value", r#"\s* (?: [;,"?] | $ )"#)),
            ),
        PatternDef::new("time", Producer::Text).part(format!(r"\b (?P<value> {as_time} ) \b")),
        PatternDef::new("intrinsic", Producer::Text).part(format!(r"\b (?P<value> {intrinsic} )")),
    ];
    Battery::build(NAME, defs)
}

pub fn family() -> TraitResult<Family> {
    Ok(Family::new(keys(), battery()?)?.with_canonicalizer(canonicalize))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonicalize_collapses_whitespace() {
        assert_eq!(canonicalize("Young   Adult").as_deref(), Some("young adult"));
        assert_eq!(canonicalize("  "), None);
    }
}
