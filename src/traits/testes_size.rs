//! Testes size
//!
//! Length by width in millimeters, for one testis or for both sides at
//! once (`left 10x5 mm, right 10x6 mm`). Gonad keys do not say which sex
//! they describe and the single letter `T` could stand for anything, so both
//! are always flagged as ambiguous.

use crate::error::TraitResult;
use crate::notation::fragments::{self, Fragment, DIMENSION, KEY_END, METRIC_LENGTH, UUID};
use crate::notation::{Battery, Family, KeyTable, PatternDef, Producer, UnitTable};

pub const NAME: &str = "testes_size";

const TESTES_SIZE: &str = "testes size";

/// `reproductive data:`, `repro. condition=`
const LABEL: &str =
    r"(?: reproductive | repro \.? ) [\s_-]* (?: data | condition | state ) [\s:=]*";

const TESTES: &str = r"(?: testes | testis | testicles? | test )";

const ABBREV: &str = r"(?: tes | ts | tnd | td | tns | ta )";

const CHAR_KEY: &str = r"(?: t )";

const STATE: &str = r"(?: (?: (?: non | not | partially | fully ) [\s-]* )? descended
    | scrotal | abdominal | inguinal | enlarged | regressed )";

const GONAD: &str = r"(?: gonads? )";

/// Filler allowed between a key and its value
const SEP_CHARS: &str = r"[\s,;:=-]";

fn keys() -> KeyTable {
    KeyTable::new(TESTES_SIZE).with(
        TESTES_SIZE,
        &[
            "testes", "testis", "testicle", "testicles", "test", "tes", "ts", "tnd", "td",
            "tns", "ta", "t", "testes size",
        ],
    )
}

/// `left 10x5 mm, right 10x6 mm`: two crosses, each led by a side
fn side_cross() -> Vec<Fragment> {
    vec![
        Fragment::new(format!(r"{} \s*", fragments::side("_1"))),
        fragments::cross("_1"),
        Fragment::new(format!(
            r"\s* (?: [&,;] | and )? \s* {} \s*",
            fragments::side("_2")
        )),
        fragments::cross("_2"),
    ]
}

fn battery() -> TraitResult<Battery> {
    let key = format!("(?P<key> {TESTES} | {ABBREV} | {CHAR_KEY} )");
    let side = fragments::side("");

    let defs = vec![
        PatternDef::new("uuid", Producer::Skip).part(UUID),
        PatternDef::new("label_key_double", Producer::SideCross)
            .part(format!(
                r"\b (?P<label> {LABEL} ) \s* \b {key} \b {SEP_CHARS}*"
            ))
            .parts(side_cross()),
        PatternDef::new("label_double", Producer::SideCross)
            .part(format!(r"\b (?P<label> {LABEL} ) \s*"))
            .parts(side_cross()),
        PatternDef::new("key_double", Producer::SideCross)
            .part(format!(r"\b {key} \b {SEP_CHARS}*"))
            .parts(side_cross()),
        // testes (R) 6 x 1.5
        PatternDef::new("key_side", Producer::Cross)
            .part(format!(r"\b {key} \b {SEP_CHARS}* {side} {SEP_CHARS}*"))
            .part(fragments::cross("")),
        PatternDef::new("label_key", Producer::Cross)
            .part(format!(
                r"\b (?P<label> {LABEL} ) \s* \b {key} \b {SEP_CHARS}* (?: {side} {SEP_CHARS}* )?"
            ))
            .part(fragments::cross("")),
        PatternDef::new("label_side_key", Producer::Cross)
            .part(format!(
                r"\b (?P<label> {LABEL} ) \s* {side} \s* \b {key} \b {SEP_CHARS}*"
            ))
            .part(fragments::cross("")),
        PatternDef::new("label_side", Producer::Cross)
            .part(format!(
                r"\b (?P<label> {LABEL} ) \s* (?: {side} {SEP_CHARS}* )?"
            ))
            .part(fragments::cross("")),
        // reproductive data=NS; T=9x4
        PatternDef::new("label_words_key", Producer::Cross)
            .part(format!(
                r"\b (?P<label> {LABEL} ) (?: {SEP_CHARS}* \b [a-z]+ \b ){{0,3}} {SEP_CHARS}*
                    \b (?P<key> {TESTES} | {ABBREV} | {STATE} | {CHAR_KEY} ) \b {SEP_CHARS}*"
            ))
            .part(fragments::cross("")),
        // gonadLengthInMM_1, LeftGonadWidth
        PatternDef::new("gonad_key", Producer::Cross)
            .part(format!(
                r"\b (?P<key> (?: {side} [\s_-]* )? {GONAD} [\s_-]* {DIMENSION}
                    (?: [\s_-]* in [\s_-]* (?P<kunits> {METRIC_LENGTH} ) )?
                    (?: [\s_-]* (?P<dimside> [12] ) )? ) \b {KEY_END}"
            ))
            .part(fragments::cross(""))
            .always_ambiguous(),
        // testes descended -10x7 mm
        PatternDef::new("testes_words", Producer::Cross)
            .part(format!(
                r"\b (?P<key> {TESTES} ) (?: {SEP_CHARS}+ (?: {STATE} | {ABBREV} | {CHAR_KEY} | [a-z]+ ) ){{0,3}} {SEP_CHARS}*"
            ))
            .part(fragments::cross("")),
        PatternDef::new("state_key", Producer::Cross)
            .part(format!(r"\b (?P<key> {STATE} | {ABBREV} ) \b {SEP_CHARS}*"))
            .part(fragments::cross("")),
        // a lone `T` needs a pair or units behind it
        PatternDef::new("char_key", Producer::Cross)
            .part(format!(r"\b (?P<key> {CHAR_KEY} ) \b {SEP_CHARS}*"))
            .part(fragments::measured_cross(""))
            .always_ambiguous(),
    ];
    Battery::build(NAME, defs)
}

pub fn family() -> TraitResult<Family> {
    Ok(Family::new(keys(), battery()?)?.with_units(UnitTable::length()))
}
