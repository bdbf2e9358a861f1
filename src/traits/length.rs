//! Body lengths: total, tail, hind foot and ear.
//!
//! The four families share one grammar and differ in their key vocabulary
//! and in which shorthand slot they read. Values are millimeters.
//!
//! Only total length accepts a keyless feet/inches reading or a bare
//! `length` key; both are flagged as ambiguous.

use super::SHORTHAND_KEY;
use crate::error::TraitResult;
use crate::notation::fragments::{
    self, Fragment, ShorthandWeight, DOT, FEET, FEET_MARK, INCHES, INCH_MARK, KEY_END,
};
use crate::notation::{Battery, Family, GuardSpec, KeyTable, PatternDef, Producer, Slot, UnitTable};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LengthTrait {
    Total,
    Tail,
    HindFoot,
    Ear,
}

impl LengthTrait {
    pub fn name(&self) -> &'static str {
        match self {
            LengthTrait::Total => "total_length",
            LengthTrait::Tail => "tail_length",
            LengthTrait::HindFoot => "hind_foot_length",
            LengthTrait::Ear => "ear_length",
        }
    }

    /// Sentinel canonical key, also used for keyless notations
    pub fn canonical_key(&self) -> &'static str {
        match self {
            LengthTrait::Total => "total length",
            LengthTrait::Tail => "tail length",
            LengthTrait::HindFoot => "hind foot length",
            LengthTrait::Ear => "ear length",
        }
    }

    pub fn slot(&self) -> Slot {
        match self {
            LengthTrait::Total => Slot::TotalLength,
            LengthTrait::Tail => Slot::TailLength,
            LengthTrait::HindFoot => Slot::HindFootLength,
            LengthTrait::Ear => Slot::EarLength,
        }
    }

    fn key_words(&self) -> &'static str {
        match self {
            LengthTrait::Total => {
                r"(?: total [\s_-]* length s? | t \.? o? \.? l \.? | body [\s_-]* length s?
                    | standard [\s_-]* length s? | s \.? l \.? | snout [\s_-]* vent [\s_-]* length s?
                    | s \.? v \.? l \.? | fork [\s_-]* length s? | total
                    | head [\s_-]* body [\s_-]* length s? )"
            }
            LengthTrait::Tail => {
                r"(?: tail [\s_-]* length s? | tail [\s_-]* len \.? | t \.? a \.? l \.? | tail )"
            }
            LengthTrait::HindFoot => {
                r"(?: hind [\s_-]* foot (?: [\s_-]* (?: length | len \.? ) )? (?: [\s_-]* with [\s_-]* claw )?
                    | h \.? f \.? l? \.? | foot [\s_-]* length )"
            }
            LengthTrait::Ear => {
                r"(?: ear [\s_-]* (?: from [\s_-]* (?: notch | crown ) [\s_-]* )? (?: length | len \.? )
                    | e \.? l \.? | ear | e )"
            }
        }
    }

    /// Keys naming their own units: `totalLengthInMM`
    fn key_with_units(&self) -> String {
        let stem = match self {
            LengthTrait::Total => r"total [\s_-]* length",
            LengthTrait::Tail => r"tail [\s_-]* length",
            LengthTrait::HindFoot => r"hind [\s_-]* foot [\s_-]* length",
            LengthTrait::Ear => r"ear [\s_-]* length",
        };
        format!(
            r"(?: {stem} [\s_-]* in [\s_-]* (?P<kunits> mm | millimeters | cm | centimeters ) )"
        )
    }

    fn keys(&self) -> KeyTable {
        let keys = KeyTable::new(self.canonical_key());
        match self {
            LengthTrait::Total => keys
                .with(
                    "total length",
                    &[
                        "total length", "total lengths", "totallength", "tl", "tol",
                        "total", "length", "len",
                    ],
                )
                .with("body length", &["body length", "bodylength"])
                .with("standard length", &["standard length", "standardlength", "sl"])
                .with(
                    "snout vent length",
                    &["snout vent length", "snoutventlength", "svl"],
                )
                .with("fork length", &["fork length", "forklength"])
                .with("head body length", &["head body length", "headbodylength"]),
            LengthTrait::Tail => keys.with(
                "tail length",
                &["tail length", "tail lengths", "taillength", "tail len", "tal", "tail"],
            ),
            LengthTrait::HindFoot => keys.with(
                "hind foot length",
                &[
                    "hind foot", "hindfoot", "hind foot length", "hindfootlength",
                    "hind foot len", "hind foot with claw", "hind foot length with claw",
                    "hf", "hfl", "foot length",
                ],
            ),
            LengthTrait::Ear => keys.with(
                "ear length",
                &[
                    "ear", "ear length", "earlength", "ear len", "el", "e",
                    "ear from notch", "ear from notch length", "earfromnotch",
                    "ear from crown", "ear from crown length",
                ],
            ),
        }
    }
}

/// Unit text must not run on into a longer word (`20 minutes`)
fn units_guard(group: &str) -> GuardSpec {
    GuardSpec::not_followed_by(group, r"[a-dgi-km-ru-z]")
}

fn battery(kind: LengthTrait) -> TraitResult<Battery> {
    let words = kind.key_words();
    let with_units = kind.key_with_units();
    let units = fragments::length_units();
    let canonical = kind.canonical_key();
    let trailing = fragments::trailing_length_units();
    let optional_units = format!(r"(?: (?P<units> {trailing} ) {DOT} )?");
    let keyed = format!(r"\b (?P<key> {words} ) {KEY_END}");

    // feet/inches without a key only make sense as a whole-body length
    let compound_key = match kind {
        LengthTrait::Total => "?",
        _ => "",
    };

    let mut defs = vec![
        // t.l.= 2 feet 3.1 - 4.5 inches, 5' 3"
        PatternDef::new("en_len", Producer::Compound)
            .part(format!(r"\b (?: (?P<key> {words} ) {KEY_END} ){compound_key}"))
            .part(fragments::range("_a"))
            .part(format!(r"(?P<units_a> {FEET_MARK} | \s* {FEET} {DOT} ) \s*"))
            .part(fragments::range("_b"))
            .part(
                Fragment::new(format!(r"(?P<units_b> {INCH_MARK} | \s* {INCHES} ) {DOT}"))
                    .guard(units_guard("units_b")),
            )
            .default_key(canonical)
            .ambiguous_when_keyless(),
        PatternDef::new("key_with_units", Producer::Measure)
            .part(format!(r"\b (?P<key> {with_units} ) {KEY_END}"))
            .part(fragments::range("")),
        PatternDef::new("len_fraction", Producer::Fraction)
            .part(keyed.clone())
            .part(fragments::fraction(""))
            .part(optional_units.clone()),
        PatternDef::new("len_key", Producer::Measure)
            .part(keyed)
            .part(fragments::range(""))
            .part(optional_units.clone()),
        // TL (mm) 44
        PatternDef::new("key_units_paren", Producer::Measure)
            .part(format!(
                r"\b (?P<key> {words} ) \s* [(\[] \s* (?P<units> {units} ) \s* [)\]] \s*"
            ))
            .part(fragments::range("")),
        // 20-28mm SL
        PatternDef::new("value_units_key", Producer::Measure)
            .part(fragments::range(""))
            .part(Fragment::new(format!(r"\s* (?P<units> {units} )")).guard(units_guard("units")))
            .part(format!(r"\s* (?P<key> {words} ) \b")),
        PatternDef::new("len_in_phrase", Producer::Measure)
            .part(format!(r"\b (?P<key> {words} ) [^\d;]{{1,32}}?"))
            .part(fragments::range(""))
            .part(optional_units.clone()),
    ];

    if kind == LengthTrait::Total {
        defs.push(
            PatternDef::new("ambiguous_len", Producer::Measure)
                .part(
                    Fragment::new(r"\b (?P<key> length | len )")
                        .guard(GuardSpec::not_preceded_by("key", r"\w [\s_-]?")),
                )
                .part(KEY_END)
                .part(fragments::range(""))
                .part(optional_units)
                .always_ambiguous(),
        );
    }

    defs.push(
        PatternDef::new("shorthand", Producer::Shorthand(kind.slot()))
            .part(format!(
                r"(?: \b (?P<key> {SHORTHAND_KEY} | {with_units} ) {KEY_END} )?"
            ))
            .part(fragments::shorthand(ShorthandWeight::Optional))
            .default_key(canonical),
    );

    if kind != LengthTrait::Ear {
        defs.push(
            // a bare `5/12/98` is a date, so the short chain needs its key
            PatternDef::new("triple", Producer::Shorthand(kind.slot()))
                .part(format!(r"\b (?P<key> {SHORTHAND_KEY} ) {KEY_END}"))
                .part(fragments::triple())
                .default_key(canonical),
        );
    }

    Battery::build(kind.name(), defs)
}

pub fn family(kind: LengthTrait) -> TraitResult<Family> {
    Ok(Family::new(kind.keys(), battery(kind)?)?.with_units(UnitTable::length()))
}
