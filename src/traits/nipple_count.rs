//! Nipple count
//!
//! Counts carry no units. Typed counts (`4 inguinal 2 pectoral`) and
//! operator-joined pairs without a total (`mammae 1+2`) are summed; two bare
//! numbers (`3 4 teats`) are not a formula. Identifier shapes are skipped
//! first so their digits are never counted.

use crate::error::TraitResult;
use crate::notation::fragments::{Fragment, UUID};
use crate::notation::{Battery, Family, GuardSpec, KeyTable, PatternDef, Producer};

pub const NAME: &str = "nipple_count";

const NIPPLE_COUNT: &str = "nipple count";

/// No animal has this many
const MAX_COUNT: f64 = 100.0;

const NIPPLE: &str = r"(?: nipples? | teats? | mammae | mamm?ary [\s_-]* glands? | nipple [\s_-]* count | mammaries )";

const MODIFIER: &str = r"(?: inguinal | ing | pectoral | pec | pr | visible | enlarged | small | prominent | abdominal | axillary )";

const OPERATOR: &str = r"(?: [:+&] | and )";

const EQUALS: &str = r"(?: is | eq | equals? | = )";

fn keys() -> KeyTable {
    KeyTable::new(NIPPLE_COUNT).with(
        NIPPLE_COUNT,
        &[
            "nipple", "nipples", "teat", "teats", "mammae", "mammary gland",
            "mammary glands", "mamary glands", "mammaries",
        ],
    )
}

/// One count, standing alone: not part of `12-3`, `2.5` or `40%`
fn count(group: &str) -> Fragment {
    Fragment::new(format!(r"(?P<{group}> \d+ | none )"))
        .guard(GuardSpec::not_followed_by(group, r"[%\d-]"))
        .guard(GuardSpec::not_preceded_by(group, r"[\d.-]"))
}

/// `c1 [modifier] [op] c2 [modifier] = value`
fn totalled_formula() -> Vec<Fragment> {
    vec![
        Fragment::new("(?P<notation>"),
        count("c1"),
        Fragment::new(format!(r"\s* (?: {MODIFIER} \s* )? {OPERATOR}? \s*")),
        count("c2"),
        Fragment::new(format!(r"(?: \s* {MODIFIER} )? \s* {EQUALS} \s*")),
        count("value"),
        Fragment::new(")"),
    ]
}

/// `c1 [modifier] op c2 [modifier]`, read as a sum
fn summed_formula() -> Vec<Fragment> {
    vec![
        Fragment::new("(?P<notation>"),
        count("c1"),
        Fragment::new(format!(r"\s* (?: {MODIFIER} \s* )? {OPERATOR} \s*")),
        count("c2"),
        Fragment::new(format!(r"(?: \s* {MODIFIER} )? )")),
    ]
}

fn battery() -> TraitResult<Battery> {
    let key = format!("(?P<key> {NIPPLE} )");

    let defs = vec![
        PatternDef::new("uuid", Producer::Skip).part(UUID),
        PatternDef::new("id", Producer::Skip).part(r"\b \d+ - \d+ \b"),
        PatternDef::new("number", Producer::Skip).part(format!(
            r"(?: \b number | \b no \. | \# ) \s* {EQUALS}? \s* \d+ \b"
        )),
        // 4 inguinal 2 pectoral nipples
        PatternDef::new("typed", Producer::Count)
            .part("(?P<notation>")
            .part(count("c1"))
            .part(format!(r"\s* {MODIFIER} \s* {OPERATOR}? \s*"))
            .part(count("c2"))
            .part(format!(r"\s* {MODIFIER} ) \s* \b {key} \b")),
        // nipples 1:2 = 6
        PatternDef::new("nipple_notation", Producer::Count)
            .part(format!(r"\b {key} \b \s* {OPERATOR}? \s*"))
            .parts(totalled_formula()),
        // 1:2 = 6 mammae
        PatternDef::new("notation_nipple", Producer::Count)
            .parts(totalled_formula())
            .part(format!(r"\s* \b {key} \b")),
        // mammae 1+2
        PatternDef::new("nipple_sum", Producer::Count)
            .part(format!(r"\b {key} \b \s* {OPERATOR}? \s*"))
            .parts(summed_formula()),
        // 2+2 teats
        PatternDef::new("sum_nipple", Producer::Count)
            .parts(summed_formula())
            .part(format!(r"\s* \b {key} \b")),
        PatternDef::new("count_nipple", Producer::Count)
            .part(count("value"))
            .part(format!(r"\s* (?: {MODIFIER} \s* )? \b {key} \b")),
        PatternDef::new("nipple_count", Producer::Count)
            .part(format!(r"\b {key} \b [\s:=]*"))
            .part(count("value")),
    ];
    Battery::build(NAME, defs)
}

pub fn family() -> TraitResult<Family> {
    Ok(Family::new(keys(), battery()?)?.with_max_value(MAX_COUNT))
}
