//! Sex

use crate::error::TraitResult;
use crate::notation::fragments::Fragment;
use crate::notation::{Battery, Family, GuardSpec, KeyTable, PatternDef, Producer};

pub const NAME: &str = "sex";

const SEX_WORD: &str = r"(?: females? | males? )";

/// Any word after `sex=`, up to whitespace or a field delimiter
const WORD: &str = r#"(?: [a-z] [^\s;,"]* )"#;

fn keys() -> KeyTable {
    KeyTable::new("sex").with("sex", &["sex"])
}

/// Abbreviations of male or female (`M`, `Fem.`, `males`) become `male` or
/// `female`; anything else is kept lower-cased. A trailing `?` survives as
/// part of the value.
pub fn canonicalize(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    let (body, doubtful) = match trimmed.strip_suffix('?') {
        Some(rest) => (rest.trim_end(), true),
        None => (trimmed, false),
    };
    let words: Vec<String> = body.split_whitespace().map(str::to_lowercase).collect();
    if words.is_empty() {
        return None;
    }

    let mut value = match words.as_slice() {
        [word] => {
            let stem = word.trim_end_matches('.');
            if !stem.is_empty() && "males".starts_with(stem) {
                "male".to_string()
            } else if !stem.is_empty() && "females".starts_with(stem) {
                "female".to_string()
            } else {
                word.clone()
            }
        }
        _ => words.join(" "),
    };
    if doubtful {
        value.push('?');
    }
    Some(value)
}

fn value_guard(fragment: Fragment) -> Fragment {
    fragment.guard(GuardSpec::not_starting_with("value", r"(?: and | is | was ) \b"))
}

fn battery() -> TraitResult<Battery> {
    let key = r"\b (?P<key> sex ) \b [\s:=]*";
    let either = format!("(?: {SEX_WORD} | {WORD} )");

    let defs = vec![
        // sex=female juvenile;
        PatternDef::new("sex_phrase", Producer::Text)
            .part(key)
            .part(
                value_guard(Fragment::new(format!(
                    r"(?P<value> {either} (?: \s+ {either} ) (?: \s* \? )? )"
                )))
                .guard(GuardSpec::followed_by("value", r#"\s* (?: [;,"] | $ )"#)),
            ),
        PatternDef::new("sex_word", Producer::Text)
            .part(key)
            .part(value_guard(Fragment::new(format!(
                r"(?P<value> {either} (?: \s* \? )? )"
            )))),
        PatternDef::new("sex", Producer::Text)
            .part(format!(r"\b (?P<value> {SEX_WORD} \b (?: \s* \? )? )")),
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
    fn test_canonicalize_words() {
        assert_eq!(canonicalize("F").as_deref(), Some("female"));
        assert_eq!(canonicalize("Males").as_deref(), Some("male"));
        assert_eq!(canonicalize("female ?").as_deref(), Some("female?"));
        assert_eq!(canonicalize("Fem.").as_deref(), Some("female"));
        assert_eq!(canonicalize("unknown").as_deref(), Some("unknown"));
        assert_eq!(canonicalize("mixed").as_deref(), Some("mixed"));
        assert_eq!(canonicalize("Female  Juvenile").as_deref(), Some("female juvenile"));
        assert_eq!(canonicalize(" ? "), None);
    }
}
