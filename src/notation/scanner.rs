//! Scanner/dispatcher
//!
//! Walks the text left to right. At the leftmost position where any battery
//! pattern matches, candidates starting there are tried in battery order;
//! the first one that passes guards and exclusion and normalizes wins. Its
//! records are emitted and scanning resumes at its end. When every candidate
//! at that position fails, scanning resumes one character later. Emitted
//! spans are never revisited, so records come out sorted and disjoint (the
//! two records of a double producer share one span).
//!
//! Each compiled variant keeps its last search result until the cursor
//! passes the result's start; leftmost-first search from any position up to
//! that start would find the same match.

use regex::{Captures, Regex};

use super::family::Family;
use super::normalize::{normalize, Outcome};
use super::record::TraitRecord;

enum Candidate<'t> {
    Unsearched,
    Found(Captures<'t>),
    Exhausted,
}

fn start_of(caps: &Captures<'_>) -> usize {
    caps.get(0).map_or(usize::MAX, |m| m.start())
}

/// Byte index of the character after the one at `at`
fn next_boundary(text: &str, at: usize) -> usize {
    text[at..]
        .chars()
        .next()
        .map_or(text.len() + 1, |c| at + c.len_utf8())
}

/// Leftmost non-empty match at or after `from`
fn search<'t>(re: &Regex, text: &'t str, from: usize) -> Candidate<'t> {
    let mut at = from;
    while at <= text.len() {
        let Some(caps) = re.captures_at(text, at) else {
            return Candidate::Exhausted;
        };
        let Some(m) = caps.get(0) else {
            return Candidate::Exhausted;
        };
        if m.end() > m.start() {
            return Candidate::Found(caps);
        }
        at = next_boundary(text, m.start());
    }
    Candidate::Exhausted
}

/// Byte to character offsets, shifted by the caller's origin
struct Offsets<'t> {
    text: &'t str,
    ascii: bool,
    origin: usize,
}

impl<'t> Offsets<'t> {
    fn new(text: &'t str, origin: usize) -> Self {
        Self {
            text,
            ascii: text.is_ascii(),
            origin,
        }
    }

    fn at(&self, byte: usize) -> usize {
        let chars = if self.ascii {
            byte
        } else {
            self.text[..byte].chars().count()
        };
        self.origin + chars
    }
}

/// Scan `text` with one family's battery
pub fn scan(family: &Family, text: &str, origin: usize) -> Vec<TraitRecord> {
    let mut records = Vec::new();
    if text.is_empty() {
        return records;
    }

    let patterns = family.battery().patterns();
    let offsets = Offsets::new(text, origin);
    let mut slots: Vec<Vec<Candidate<'_>>> = patterns
        .iter()
        .map(|p| p.variants().iter().map(|_| Candidate::Unsearched).collect())
        .collect();

    let mut pos = 0;
    while pos < text.len() {
        // Refresh stale candidates and find the leftmost start
        let mut leftmost: Option<usize> = None;
        for (pattern, pattern_slots) in patterns.iter().zip(slots.iter_mut()) {
            for (re, slot) in pattern.variants().iter().zip(pattern_slots.iter_mut()) {
                let stale = match slot {
                    Candidate::Unsearched => true,
                    Candidate::Found(caps) => start_of(caps) < pos,
                    Candidate::Exhausted => false,
                };
                if stale {
                    *slot = search(re, text, pos);
                }
                if let Candidate::Found(caps) = slot {
                    let s = start_of(caps);
                    leftmost = Some(leftmost.map_or(s, |l| l.min(s)));
                }
            }
        }
        let Some(start) = leftmost else {
            break;
        };

        // Battery order decides among candidates sharing that start
        let mut accepted: Option<(usize, Outcome)> = None;
        'battery: for (pattern, pattern_slots) in patterns.iter().zip(slots.iter()) {
            for slot in pattern_slots {
                let Candidate::Found(caps) = slot else {
                    continue;
                };
                let Some(m) = caps.get(0) else {
                    continue;
                };
                if m.start() != start
                    || !pattern.guards_allow(caps, text)
                    || family.exclusion().vetoes(pattern.producer(), caps)
                {
                    continue;
                }
                let span = (offsets.at(m.start()), offsets.at(m.end()));
                match normalize(family, pattern, caps, span) {
                    Outcome::Rejected => continue,
                    outcome => {
                        tracing::trace!(
                            family = family.name(),
                            pattern = pattern.name(),
                            start = span.0,
                            end = span.1,
                            "notation accepted"
                        );
                        accepted = Some((m.end(), outcome));
                        break 'battery;
                    }
                }
            }
        }

        match accepted {
            Some((end, outcome)) => {
                if let Outcome::Records(found) = outcome {
                    records.extend(found);
                }
                pos = end;
            }
            None => pos = next_boundary(text, start),
        }
    }

    records
}
