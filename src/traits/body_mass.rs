//! Body mass
//!
//! Reported in grams. Every key spelling resolves to `total weight`; live,
//! dead and "body" weights are not told apart.

use super::SHORTHAND_KEY;
use crate::error::TraitResult;
use crate::notation::fragments::{self, ShorthandWeight, KEY_END, NUMBER, SEP_SLOT, SHORTHAND_VALUE};
use crate::notation::{Battery, Family, KeyTable, PatternDef, Producer, Slot, UnitTable};

pub const NAME: &str = "body_mass";

const TOTAL_WEIGHT: &str = "total weight";

const WT_KEY_WORD: &str = r"(?: weights? | weigh (?: s | ed | ing ) | mass | w \.? t s? \.? )";

/// Keys that must be followed by mass units to count
const KEY_UNITS_REQ: &str = r"(?: measurements? | body | total )";

const POUNDS_WRITTEN: &str = r"(?: (?: pound | lb ) s? \.? )";
const OUNCES_WRITTEN: &str = r"(?: (?: ounce | oz ) s? \.? )";

/// `weightInGrams`, `body mass`, `total wt.`
fn total_wt_key() -> String {
    format!(
        r"(?: (?: weight | mass ) [\s_-]* in [\s_-]* (?P<kunits> grams | g | kilograms | kg )
            | (?: body | full | observed | total ) \.? \s* {WT_KEY_WORD} )"
    )
}

fn other_wt_key() -> String {
    format!(r"(?: (?: dead | live ) \.? \s* {WT_KEY_WORD} )")
}

fn keys() -> KeyTable {
    KeyTable::new(TOTAL_WEIGHT).with(
        TOTAL_WEIGHT,
        &[
            "weight", "weights", "weighs", "weighed", "weighing", "wt", "wts", "mass",
            "body weight", "body wt", "body mass", "full weight", "observed weight",
            "total weight", "total wt", "total mass", "live weight", "live wt",
            "dead weight", "dead wt", "weightingrams", "weight in grams",
            "massingrams", "mass in grams", "weightinkg", "body", "total",
            "measurement", "measurements", "meas", "catalog", "specimen",
            "specimens", "on tag",
        ],
    )
}

fn battery() -> TraitResult<Battery> {
    let units = fragments::weight_units();
    let total_key = total_wt_key();
    let other_key = other_wt_key();
    let all_keys = format!(
        "(?: {total_key} | {other_key} | {WT_KEY_WORD} | {KEY_UNITS_REQ} | {SHORTHAND_KEY} )"
    );
    let optional_units = format!(r"(?: \s* (?P<units> {units} ) )?");
    let required_units = format!(r"\s* (?P<units> {units} )");

    let defs = vec![
        // 2 lbs. 3.1 - 4.5 oz
        PatternDef::new("en_wt", Producer::Compound)
            .part(format!(r"\b (?: (?P<key> {all_keys} ) {KEY_END} )?"))
            .part(fragments::range("_a"))
            .part(format!(r"\s* (?P<units_a> {POUNDS_WRITTEN} ) \s*"))
            .part(fragments::range("_b"))
            .part(format!(r"\s* (?P<units_b> {OUNCES_WRITTEN} )"))
            .default_key(TOTAL_WEIGHT)
            .ambiguous_when_keyless(),
        PatternDef::new("total_wt_key", Producer::Measure)
            .part(format!(r"\b (?P<key> {total_key} ) {KEY_END}"))
            .part(fragments::range(""))
            .part(optional_units.clone()),
        PatternDef::new("other_wt_key", Producer::Measure)
            .part(format!(r"\b (?P<key> {other_key} ) {KEY_END}"))
            .part(fragments::range(""))
            .part(optional_units.clone()),
        PatternDef::new("key_units_req", Producer::Measure)
            .part(format!(r"\b (?P<key> {KEY_UNITS_REQ} ) {KEY_END}"))
            .part(fragments::range(""))
            .part(required_units.clone()),
        // Total weight as recorded in the field: 23 g
        PatternDef::new("wt_in_phrase", Producer::Measure)
            .part(format!(r"\b (?P<key> total \s+ {WT_KEY_WORD} ) \D{{1,32}}"))
            .part(fragments::range(""))
            .part(optional_units.clone()),
        // Weight (g) 0.77
        PatternDef::new("wt_key_word", Producer::Measure)
            .part(format!(
                r"\b (?P<key> {WT_KEY_WORD} ) \s* [(\[] \s* (?P<units> {units} ) \s* [)\]] \s*"
            ))
            .part(fragments::range("")),
        PatternDef::new("wt_key_word_req", Producer::Measure)
            .part(format!(r"\b (?P<key> {WT_KEY_WORD} ) {KEY_END}"))
            .part(fragments::range(""))
            .part(required_units),
        PatternDef::new("wt_shorthand", Producer::Shorthand(Slot::Weight))
            .part(format!(r"(?: \b (?P<key> {all_keys} ) {KEY_END} )?"))
            .part(fragments::shorthand(ShorthandWeight::Required))
            .default_key(TOTAL_WEIGHT),
        // 220hb-110-25-18-12=22 g
        PatternDef::new("wt_shorthand_euro", Producer::Measure)
            .part(format!(r"(?: \b (?P<key> {all_keys} ) {KEY_END} )?"))
            .part(format!(
                r"(?P<notation> \b {NUMBER} hb (?: {SEP_SLOT} {SHORTHAND_VALUE} [a-z]* ){{4,8}} = ) \s*"
            ))
            .part(fragments::plain_value(""))
            .part(optional_units.clone())
            .default_key(TOTAL_WEIGHT),
        // fa64-35g trailing a longer chain
        PatternDef::new("wt_fa", Producer::Measure)
            .part(r"\b fa \d* -")
            .part(fragments::plain_value(""))
            .part(optional_units.clone())
            .default_key(TOTAL_WEIGHT),
        PatternDef::new("wt_key_ambiguous", Producer::Measure)
            .part(format!(r"\b (?P<key> {WT_KEY_WORD} ) {KEY_END}"))
            .part(fragments::range(""))
            .part(optional_units),
        PatternDef::new("wt_units_only", Producer::Measure)
            .part(fragments::range(""))
            .part(format!(r"\s* (?P<units> {units} ) \b"))
            .default_key(TOTAL_WEIGHT)
            .ambiguous_when_keyless(),
    ];
    Battery::build(NAME, defs)
}

pub fn family() -> TraitResult<Family> {
    Ok(Family::new(keys(), battery()?)?.with_units(UnitTable::mass()))
}
