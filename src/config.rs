//! Extractor configuration
//!
//! Every family is on unless switched off. Batteries themselves are not
//! configurable; they are compiled once when the extractor is built.

use serde::{Deserialize, Serialize};

use crate::error::TraitResult;
use crate::traits::TraitFamily;

/// Default input bound, in characters
pub const DEFAULT_MAX_INPUT_CHARS: usize = 100_000;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ExtractorConfig {
    #[serde(default = "default_true")]
    pub enable_body_mass: bool,
    #[serde(default = "default_true")]
    pub enable_total_length: bool,
    #[serde(default = "default_true")]
    pub enable_tail_length: bool,
    #[serde(default = "default_true")]
    pub enable_hind_foot_length: bool,
    #[serde(default = "default_true")]
    pub enable_ear_length: bool,
    #[serde(default = "default_true")]
    pub enable_testes_size: bool,
    #[serde(default = "default_true")]
    pub enable_nipple_count: bool,
    #[serde(default = "default_true")]
    pub enable_sex: bool,
    #[serde(default = "default_true")]
    pub enable_life_stage: bool,
    /// Longer input is cut at this many characters before scanning
    #[serde(default = "default_max_input_chars")]
    pub max_input_chars: usize,
}

fn default_true() -> bool { true }

fn default_max_input_chars() -> usize { DEFAULT_MAX_INPUT_CHARS }

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            enable_body_mass: true,
            enable_total_length: true,
            enable_tail_length: true,
            enable_hind_foot_length: true,
            enable_ear_length: true,
            enable_testes_size: true,
            enable_nipple_count: true,
            enable_sex: true,
            enable_life_stage: true,
            max_input_chars: DEFAULT_MAX_INPUT_CHARS,
        }
    }
}

impl ExtractorConfig {
    pub fn from_json(json: &str) -> TraitResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn is_enabled(&self, family: TraitFamily) -> bool {
        match family {
            TraitFamily::BodyMass => self.enable_body_mass,
            TraitFamily::TotalLength => self.enable_total_length,
            TraitFamily::TailLength => self.enable_tail_length,
            TraitFamily::HindFootLength => self.enable_hind_foot_length,
            TraitFamily::EarLength => self.enable_ear_length,
            TraitFamily::TestesSize => self.enable_testes_size,
            TraitFamily::NippleCount => self.enable_nipple_count,
            TraitFamily::Sex => self.enable_sex,
            TraitFamily::LifeStage => self.enable_life_stage,
        }
    }

    /// Enabled families in output order
    pub fn enabled_families(&self) -> Vec<TraitFamily> {
        TraitFamily::ALL
            .iter()
            .copied()
            .filter(|family| self.is_enabled(*family))
            .collect()
    }

    /// Cut `text` to `max_input_chars` on a character boundary
    pub fn bound<'a>(&self, text: &'a str) -> (&'a str, bool) {
        match text.char_indices().nth(self.max_input_chars) {
            Some((cut, _)) => {
                tracing::warn!(
                    max_chars = self.max_input_chars,
                    dropped_bytes = text.len() - cut,
                    "input truncated before trait scan"
                );
                (&text[..cut], true)
            }
            None => (text, false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = ExtractorConfig::default();
        assert_eq!(config.enabled_families().len(), TraitFamily::ALL.len());
        assert_eq!(config.max_input_chars, DEFAULT_MAX_INPUT_CHARS);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config =
            ExtractorConfig::from_json(r#"{"enable_sex": false, "max_input_chars": 10}"#).unwrap();
        assert!(!config.is_enabled(TraitFamily::Sex));
        assert!(config.is_enabled(TraitFamily::BodyMass));
        assert_eq!(config.max_input_chars, 10);
        assert!(!config.enabled_families().contains(&TraitFamily::Sex));
    }

    #[test]
    fn test_invalid_json_is_config_error() {
        let err = ExtractorConfig::from_json("{enable_sex").unwrap_err();
        assert!(matches!(err, crate::error::TraitError::Config(_)));
    }

    #[test]
    fn test_bound_cuts_on_char_boundary() {
        let config = ExtractorConfig {
            max_input_chars: 3,
            ..ExtractorConfig::default()
        };
        assert_eq!(config.bound("ééééé"), ("ééé", true));
        assert_eq!(config.bound("abc"), ("abc", false));
        assert_eq!(config.bound(""), ("", false));
    }
}
