//! Sub-pattern library
//!
//! Shared regex fragments for numbers, ranges, crosses, fractions, shorthand
//! chains, sides and units. Every family battery is composed from these by
//! plain text concatenation, so a change here reaches every consumer.
//!
//! All sources are written for verbose, case-insensitive mode (`(?ix)`):
//! whitespace is insignificant and a literal `#` must be escaped.
//!
//! Fragments that may occur more than once in a single pattern take a group
//! suffix (`_a`, `_1`, ...) because capture names must be unique.

use super::guard::GuardSpec;

// ==================== NUMERIC GRAMMAR ====================

/// Digits with optional thousands separators and decimals, or a bare
/// decimal fragment such as `.5`
pub const NUMBER: &str = r"(?: (?: \d{1,3} (?: , \d{3} ){1,3} | \d+ ) (?: \. \d+ )? | \. \d+ )";

pub const RANGE_JOINER: &str = r"(?: - | to )";

pub const CROSS_JOINER: &str = r"(?: x | by | \* | - )";

/// Optional trailing abbreviation dot
pub const DOT: &str = r"\.?";

/// Punctuation allowed between a key and its value (`=`, `:`, `":"`, ...)
pub const KEY_END: &str = r"(?: \s* [^\w.\[(\s]{0,4} \s* )";

/// One slot of a shorthand chain: a number or an unknown marker
pub const SHORTHAND_VALUE: &str = r"(?: \d+ (?: \. \d+ )? | \. \d+ | [?x]{1,2} | n/?d )";

/// Triple chain slots are capped at three digits
pub const TRIPLE_VALUE: &str = r"(?: \d{1,3} (?: \. \d+ )? | [?x]{1,2} | n/?d )";

/// Any 8-4-4-4-12 hex identifier, whatever its version and variant digits
pub const UUID: &str =
    r"\b [0-9a-f]{8} - [0-9a-f]{4} - [0-9a-f]{4} - [0-9a-f]{4} - [0-9a-f]{12} \b";

// ==================== UNIT GROUPS ====================

pub const METRIC_LENGTH: &str = r"(?: (?: milli | centi )? meters? | [cm] [\s.]? m )";
pub const FEET: &str = r"(?: foot s? | feet s? | ft s? )";
pub const INCHES: &str = r"(?: inch (?: es )? | ins? )";

/// `5'` and `3"`, written straight after the number
pub const FEET_MARK: &str = "'";
pub const INCH_MARK: &str = "\"";

pub const POUNDS: &str = r"(?: pounds? | lbs? )";
pub const OUNCES: &str = r"(?: ounces? | ozs? )";
pub const METRIC_MASS: &str =
    r"(?: (?: milligram | kilogram | gram ) s? | m \.? g s? | k \.? \s? g s? | g [mr]? s? )";

/// Any length unit
pub fn length_units() -> String {
    format!("(?: {METRIC_LENGTH} | {FEET} | {INCHES} )")
}

/// A length unit written after a value: the feet mark with no gap, or a
/// unit word that ends at a word boundary, so `in` never reads the start of
/// `inguinal` and an optional unit slot simply stays empty.
///
/// The leading whitespace is inside the expression so callers can wrap it
/// in a group; unit lookup ignores it.
pub fn trailing_length_units() -> String {
    format!(r"(?: {FEET_MARK} | \s* (?: {METRIC_LENGTH} | {FEET} | {INCHES} ) \b )")
}

/// Any mass unit, used to keep crosses from swallowing weights
pub fn mass_units() -> String {
    format!("(?: {METRIC_MASS} | {POUNDS} | {OUNCES} )")
}

/// Mass units with their optional abbreviation dot, as written after a value
pub fn weight_units() -> String {
    format!(
        r"(?: (?: gram | milligram | kilogram | pound | ounce ) s? | (?: m {DOT} g | k {DOT} g | g[mr]? | lb | oz ) s? {DOT} )"
    )
}

// ==================== FRAGMENTS ====================

/// A piece of pattern source plus the context guards it needs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fragment {
    pub source: String,
    pub guards: Vec<GuardSpec>,
}

impl Fragment {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            guards: Vec::new(),
        }
    }

    pub fn guard(mut self, guard: GuardSpec) -> Self {
        self.guards.push(guard);
        self
    }
}

impl From<&str> for Fragment {
    fn from(source: &str) -> Self {
        Fragment::new(source)
    }
}

impl From<String> for Fragment {
    fn from(source: String) -> Self {
        Fragment::new(source)
    }
}

/// `value1 [- value2]`, with an optional bracket estimate around `value1`.
///
/// Groups: `range`, `estimated`, `value1`, `value2` (all suffixed).
/// Guards keep ranges from starting inside dates or punctuated numeric runs
/// and from stopping short of a trailing digit.
pub fn range(suffix: &str) -> Fragment {
    let s = suffix;
    Fragment::new(format!(
        r"(?P<range{s}>
            (?P<estimated{s}> \[ \s* )?
            (?P<value1{s}> {NUMBER} )
            (?: \s* \] )?
            (?: \s* {RANGE_JOINER} \s* (?P<value2{s}> {NUMBER} ) )? )"
    ))
    .guard(GuardSpec::not_preceded_by(
        format!("range{s}"),
        r"(?: \d | \d [|,.\#+-] | \b to \s | \# )",
    ))
    .guard(GuardSpec::not_followed_by(
        format!("range{s}"),
        r"(?: \d | [|,.+-] \d | \s+ to \b )",
    ))
}

/// A single number wearing the `range` group names, for notations where a
/// hyphen before the value is part of the key (`fa64-35g`)
pub fn plain_value(suffix: &str) -> Fragment {
    let s = suffix;
    Fragment::new(format!(r"(?P<range{s}> (?P<value1{s}> {NUMBER} ) )"))
        .guard(GuardSpec::not_followed_by(format!("range{s}"), r"(?: \d | [|,.+-] \d )"))
}

/// Two linear dimensions: `10 x 5 mm`, `10 mm x 5 mm`, `10x5`, or a single
/// value with optional units.
///
/// Groups: `cross`, `estimated`, `value1`, then one of
/// `units1a value2a units2` / `value2b units1b` / `value2c` / `units1c`.
pub fn cross(suffix: &str) -> Fragment {
    cross_fragment(suffix, true)
}

/// A cross that carries a second value or explicit units; a bare number
/// never qualifies (`T 9x4`, not `T=9`)
pub fn measured_cross(suffix: &str) -> Fragment {
    cross_fragment(suffix, false)
}

fn cross_fragment(suffix: &str, bare: bool) -> Fragment {
    let s = suffix;
    let units = trailing_length_units();
    let tail = if bare { "?" } else { "" };
    Fragment::new(format!(
        r"(?P<cross{s}>
            (?P<estimated{s}> \[ \s* )?
            (?P<value1{s}> {NUMBER} )
            (?: \s* \] )?
            (?: (?P<units1a{s}> {units} ) \s* {CROSS_JOINER} \s* (?P<value2a{s}> {NUMBER} ) (?P<units2{s}> {units} )
              | \s* {CROSS_JOINER} \s* (?P<value2b{s}> {NUMBER} ) (?P<units1b{s}> {units} )
              | \s* {CROSS_JOINER} \s* (?P<value2c{s}> {NUMBER} )
              | (?P<units1c{s}> {units} )
            ){tail} )"
    ))
    .guard(GuardSpec::not_preceded_by(
        format!("cross{s}"),
        r"(?: [\d/,.-]? \d | \b by )",
    ))
    .guard(GuardSpec::not_followed_by(
        format!("cross{s}"),
        format!(r"(?: \d | \s* \]? \s* {} \b | [a-z] )", mass_units()),
    ))
}

/// `[whole] numerator/denominator`, never part of a `d/d/dd` date
pub fn fraction(suffix: &str) -> Fragment {
    let s = suffix;
    Fragment::new(format!(
        r"(?P<fraction{s}>
            (?: (?P<whole{s}> \d+ ) \s+ )?
            (?P<numerator{s}> \d+ ) / (?P<denominator{s}> \d+ ) )"
    ))
    .guard(GuardSpec::not_preceded_by(format!("fraction{s}"), r"[\d/]"))
    .guard(GuardSpec::not_followed_by(format!("fraction{s}"), r"(?: / \d | \d )"))
}

/// Body side, either parenthesized (`(l)`, `/r`) or as a word
pub fn side(suffix: &str) -> String {
    let s = suffix;
    format!(
        r"(?: [/(\[] \s* (?P<side1{s}> [lr] \b ) \s* [)\]]? | (?P<side2{s}> both | left | right | lft | rt | [lr] \b ) )"
    )
}

/// Disambiguating dimension word
pub const DIMENSION: &str = r"(?P<dim> length | width )";

// ==================== SHORTHAND CHAINS ====================

/// Placeholder for the chain separator. Patterns containing it are compiled
/// once per entry of [`SEPARATORS`], so a chain can never mix separators.
pub const SEP_SLOT: &str = "%SEP%";

pub const SEPARATORS: [&str; 3] = [":", "/", r"\-"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShorthandWeight {
    Required,
    Optional,
}

fn slot(name: &str, estimate: &str, value: &str) -> String {
    format!(r"(?P<{name}> (?P<{estimate}> \[ )? {value} \]? )")
}

fn chain_guards(fragment: Fragment) -> Fragment {
    fragment
        .guard(GuardSpec::not_preceded_by("notation", r"[\d/a-z-]"))
        .guard(GuardSpec::not_followed_by("notation", r"[\d/:=a-z-]"))
}

/// `TL-TAL-HFL-EL[-tagN]*[=WT[units]]`
///
/// Groups: `notation`, `sep`, `sh_tl`, `sh_tal`, `sh_hfl`, `sh_el` (each with
/// an `est_*` bracket marker), `sh_ext`, `est_wt`, `sh_wt`, `sh_wt_units`.
pub fn shorthand(weight: ShorthandWeight) -> Fragment {
    let v = SHORTHAND_VALUE;
    let tl = slot("sh_tl", "est_tl", v);
    let tal = slot("sh_tal", "est_tal", v);
    let hfl = slot("sh_hfl", "est_hfl", v);
    let el = slot("sh_el", "est_el", v);
    let optional = match weight {
        ShorthandWeight::Required => "",
        ShorthandWeight::Optional => "?",
    };
    let source = format!(
        r"(?P<notation>
            {tl} (?P<sep> {SEP_SLOT} ) {tal} {SEP_SLOT} {hfl} {SEP_SLOT} {el}
            (?P<sh_ext> (?: {SEP_SLOT} [a-z]{{1,4}} {v} ){{0,8}} )
            (?: [\s=:/-] \s*
                (?P<est_wt> \[? \s* )
                (?P<sh_wt> {v} ) \s*
                \]?
                (?P<sh_wt_units> {METRIC_MASS} )?
                (?: \s* \] )? ){optional} )"
    );
    chain_guards(Fragment::new(source))
}

/// `TL-TAL-HFL`, the three-slot form without ear or weight
pub fn triple() -> Fragment {
    let v = TRIPLE_VALUE;
    let tl = slot("sh_tl", "est_tl", v);
    let tal = slot("sh_tal", "est_tal", v);
    let hfl = slot("sh_hfl", "est_hfl", v);
    chain_guards(Fragment::new(format!(
        r"(?P<notation> {tl} (?P<sep> {SEP_SLOT} ) {tal} {SEP_SLOT} {hfl} )"
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;

    fn compile(source: &str) -> Regex {
        Regex::new(&format!("(?ix){source}")).unwrap()
    }

    fn anchored(source: &str) -> Regex {
        Regex::new(&format!("(?ix)^(?:{source})$")).unwrap()
    }

    #[test]
    fn test_number_forms() {
        let re = anchored(NUMBER);
        for ok in ["20", "1,192.0", "2435.0", ".5", "12,345,678"] {
            assert!(re.is_match(ok), "{ok}");
        }
        for bad in ["1,2", "a", "."] {
            assert!(!re.is_match(bad), "{bad}");
        }
    }

    #[test]
    fn test_range_groups() {
        let re = compile(&range("").source);
        let caps = re.captures("20.5 - 31.8").unwrap();
        assert_eq!(&caps["value1"], "20.5");
        assert_eq!(&caps["value2"], "31.8");

        let caps = re.captures("[62]").unwrap();
        assert_eq!(&caps["estimated"], "[");
        assert_eq!(&caps["value1"], "62");
    }

    #[test]
    fn test_suffixed_fragments_compose() {
        let source = format!("{} \\s* {}", range("_a").source, range("_b").source);
        let re = compile(&source);
        let caps = re.captures("2 3").unwrap();
        assert_eq!(&caps["value1_a"], "2");
        assert_eq!(&caps["value1_b"], "3");
    }

    #[test]
    fn test_range_guards_target_group() {
        let frag = range("_b");
        assert_eq!(frag.guards.len(), 2);
        assert!(frag.guards.iter().all(|g| g.group == "range_b"));
    }

    #[test]
    fn test_cross_variants() {
        let re = compile(&cross("").source);

        let caps = re.captures("10x5 mm").unwrap();
        assert_eq!(&caps["value2b"], "5");
        assert_eq!(caps["units1b"].trim(), "mm");

        let caps = re.captures("10 mm x 5 mm").unwrap();
        assert_eq!(caps["units1a"].trim(), "mm");
        assert_eq!(caps["units2"].trim(), "mm");

        let caps = re.captures("5 by 3").unwrap();
        assert_eq!(&caps["value2c"], "3");

        let caps = re.captures("9mm").unwrap();
        assert_eq!(&caps["units1c"], "mm");

        let caps = re.captures(".5'").unwrap();
        assert_eq!(&caps["units1c"], "'");
    }

    #[test]
    fn test_cross_units_stop_at_word_end() {
        let re = compile(&cross("").source);

        // `in` is the start of a word here, so the pair ends at the number
        let caps = re.captures("5x3 inguinal").unwrap();
        assert_eq!(&caps["cross"], "5x3");
        assert_eq!(&caps["value2c"], "3");
        assert!(caps.name("units1b").is_none());

        let caps = re.captures("5x3 in.").unwrap();
        assert_eq!(caps["units1b"].trim(), "in");
    }

    #[test]
    fn test_measured_cross_needs_pair_or_units() {
        let re = anchored(&measured_cross("").source);
        assert!(re.is_match("9x4"));
        assert!(re.is_match("9 mm"));
        assert!(!re.is_match("9"));
        assert_eq!(measured_cross("_2").guards.len(), 2);
    }

    #[test]
    fn test_feet_mark_follows_the_number() {
        let re = anchored(&format!("{NUMBER} (?P<units> {} )", trailing_length_units()));
        assert_eq!(&re.captures(".5'").unwrap()["units"], "'");
        assert_eq!(re.captures("12 mm").unwrap()["units"].trim(), "mm");
        assert!(!re.is_match("5 '"));
        assert!(!re.is_match("5 ing"));
    }

    #[test]
    fn test_fraction() {
        let re = compile(&fraction("").source);
        let caps = re.captures("1 3/4").unwrap();
        assert_eq!(&caps["whole"], "1");
        assert_eq!(&caps["numerator"], "3");
        assert_eq!(&caps["denominator"], "4");
    }

    #[test]
    fn test_side_forms() {
        let re = compile(&side(""));
        assert_eq!(&re.captures("(l)").unwrap()["side1"], "l");
        assert_eq!(&re.captures("right").unwrap()["side2"], "right");
    }

    #[test]
    fn test_shorthand_expands_per_separator() {
        let frag = shorthand(ShorthandWeight::Optional);
        assert_eq!(frag.source.matches(SEP_SLOT).count(), 4);

        let dash = compile(&frag.source.replace(SEP_SLOT, r"\-"));
        let caps = dash.captures("91-0-17-22-[62]g").unwrap();
        assert_eq!(&caps["sh_tl"], "91");
        assert_eq!(&caps["sh_el"], "22");
        assert_eq!(&caps["sh_wt"], "62");
        assert_eq!(&caps["sh_wt_units"], "g");
        assert!(caps["est_wt"].contains('['));

        // mixed separators never match a single variant
        assert!(dash.captures("91-0:17-22").is_none());
        let colon = compile(&frag.source.replace(SEP_SLOT, ":"));
        assert!(colon.captures("91-0:17-22").is_none());
    }

    #[test]
    fn test_shorthand_extension_fields() {
        let frag = shorthand(ShorthandWeight::Required);
        let re = compile(&frag.source.replace(SEP_SLOT, r"\-"));
        let caps = re.captures("82-00-15-21-tr7-fa63-41g").unwrap();
        assert_eq!(&caps["sh_ext"], "-tr7-fa63");
        assert_eq!(&caps["sh_wt"], "41");
    }

    #[test]
    fn test_uuid() {
        let re = compile(UUID);
        assert!(re.is_match("c701563b-dbd9-4500-184f-1ad61eb8da11"));
        assert!(re.is_match("12345678-1234-4500-1234-123456789012"));
        assert!(!re.is_match("91-0-17-22-62"));
        assert!(!re.is_match("c701563b-dbd9-4500-184f-1ad61eb8da11f"));
    }

    #[test]
    fn test_units() {
        let mass = anchored(&weight_units());
        for ok in ["g", "gr.", "lbs.", "kg", "k.g", "ounces", "mgs"] {
            assert!(mass.is_match(ok), "{ok}");
        }
        let len = anchored(&length_units());
        for ok in ["mm", "c.m", "feet", "in", "millimeters"] {
            assert!(len.is_match(ok), "{ok}");
        }
    }
}
