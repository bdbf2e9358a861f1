//! Context guards.
//!
//! Rust regex has no lookaround, so every "not preceded by" / "not followed
//! by" condition of the notation grammar is a guard attached to one named
//! group boundary and checked after the main pattern matches. A behind guard
//! tests `(?:pat)$` on the text before the boundary, an ahead guard tests
//! `^(?:pat)` on the text after it.
//!
//! A guard sees only the match the regex committed to. It can reject the
//! pattern but never shorten the match, so a condition that should let an
//! optional part fall away belongs in the pattern itself (see
//! `fragments::trailing_length_units`).

use regex::{Captures, Regex};

/// Which edge of the group the guard looks from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Start,
    End,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Look {
    Behind,
    Ahead,
}

/// Uncompiled guard, carried by fragments until the battery is built
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuardSpec {
    pub group: String,
    pub anchor: Anchor,
    pub look: Look,
    pub pattern: String,
    /// True for "must not match" guards
    pub negated: bool,
}

impl GuardSpec {
    /// Group must not be preceded by `pattern`
    pub fn not_preceded_by(group: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            anchor: Anchor::Start,
            look: Look::Behind,
            pattern: pattern.into(),
            negated: true,
        }
    }

    /// Group must not be followed by `pattern`
    pub fn not_followed_by(group: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            anchor: Anchor::End,
            look: Look::Ahead,
            pattern: pattern.into(),
            negated: true,
        }
    }

    /// Group must be followed by `pattern`
    pub fn followed_by(group: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            anchor: Anchor::End,
            look: Look::Ahead,
            pattern: pattern.into(),
            negated: false,
        }
    }

    /// Group must not begin with `pattern`
    pub fn not_starting_with(group: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            anchor: Anchor::Start,
            look: Look::Ahead,
            pattern: pattern.into(),
            negated: true,
        }
    }

    pub fn compile(&self) -> Result<Guard, regex::Error> {
        let source = match self.look {
            Look::Behind => format!("(?ix)(?:{})$", self.pattern),
            Look::Ahead => format!("(?ix)^(?:{})", self.pattern),
        };
        Ok(Guard {
            group: self.group.clone(),
            anchor: self.anchor,
            look: self.look,
            regex: Regex::new(&source)?,
            negated: self.negated,
        })
    }
}

/// Compiled guard
#[derive(Debug, Clone)]
pub struct Guard {
    group: String,
    anchor: Anchor,
    look: Look,
    regex: Regex,
    negated: bool,
}

impl Guard {
    /// Check the guard against one candidate match. Groups that did not
    /// participate in the match are not constrained.
    pub fn allows(&self, caps: &Captures<'_>, text: &str) -> bool {
        let Some(m) = caps.name(&self.group) else {
            return true;
        };
        let pos = match self.anchor {
            Anchor::Start => m.start(),
            Anchor::End => m.end(),
        };
        let hit = match self.look {
            Look::Behind => self.regex.is_match(&text[..pos]),
            Look::Ahead => self.regex.is_match(&text[pos..]),
        };
        hit != self.negated
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn caps<'t>(re: &Regex, text: &'t str) -> Captures<'t> {
        re.captures(text).unwrap()
    }

    #[test]
    fn test_not_preceded_by() {
        let re = Regex::new(r"(?P<num>\d+)g").unwrap();
        let guard = GuardSpec::not_preceded_by("num", r"\d -").compile().unwrap();

        let text = "12-35g";
        let m = re.captures_at(text, 3).unwrap();
        assert!(!guard.allows(&m, text));

        let text = "wt 35g";
        assert!(guard.allows(&caps(&re, text), text));
    }

    #[test]
    fn test_not_followed_by() {
        let re = Regex::new(r"(?P<num>\d+)").unwrap();
        let guard = GuardSpec::not_followed_by("num", r"[.,] \d").compile().unwrap();

        assert!(!guard.allows(&caps(&re, "12,5"), "12,5"));
        assert!(guard.allows(&caps(&re, "12, 5"), "12, 5"));
    }

    #[test]
    fn test_followed_by_is_positive() {
        let re = Regex::new(r"(?P<word>[a-z]+)").unwrap();
        let guard = GuardSpec::followed_by("word", r"\s* (?: ; | $ )").compile().unwrap();

        assert!(guard.allows(&caps(&re, "female;"), "female;"));
        assert!(guard.allows(&caps(&re, "female"), "female"));
        assert!(!guard.allows(&caps(&re, "female x"), "female x"));
    }

    #[test]
    fn test_not_starting_with() {
        let re = Regex::new(r"sex\s+(?P<value>[a-z]+)").unwrap();
        let guard = GuardSpec::not_starting_with("value", r"(?: and | is ) \b")
            .compile()
            .unwrap();

        assert!(!guard.allows(&caps(&re, "sex and"), "sex and"));
        assert!(guard.allows(&caps(&re, "sex island"), "sex island"));
    }

    #[test]
    fn test_missing_group_is_unconstrained() {
        let re = Regex::new(r"(?P<a>x)(?P<b>y)?").unwrap();
        let guard = GuardSpec::not_followed_by("b", r"z").compile().unwrap();
        assert!(guard.allows(&caps(&re, "xz"), "xz"));
    }
}
