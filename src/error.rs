//! Errors raised while building trait batteries or loading configuration.
//!
//! Scanning itself never fails: text that does not parse simply yields no
//! records. Everything here surfaces at construction time.

/// Errors that can occur while assembling an extractor.
#[derive(Debug, thiserror::Error)]
pub enum TraitError {
    #[error("Pattern {pattern} failed to compile: {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Guard in pattern {pattern} refers to unknown group {group}")]
    UnknownGuardGroup { pattern: String, group: String },

    #[error("Family {family} has an empty battery")]
    EmptyBattery { family: String },

    #[error("Unknown trait family: {0}")]
    UnknownFamily(String),

    #[error("Invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

pub type TraitResult<T> = Result<T, TraitError>;
