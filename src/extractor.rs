//! TraitExtractor: one call runs every enabled family over a field
//!
//! Each family scans the text independently; records are merged in start
//! order. Designed for WASM with a single cross-boundary call per field.

use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

use crate::config::ExtractorConfig;
use crate::error::TraitResult;
use crate::notation::{Family, TraitRecord};
use crate::traits::TraitFamily;

// =============================================================================
// Types
// =============================================================================

/// Record count and time spent for one family
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FamilyStats {
    pub family: TraitFamily,
    pub records: usize,
    pub elapsed_us: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ExtractionStats {
    pub families: Vec<FamilyStats>,
    pub total_records: usize,
    pub total_us: u64,
    /// Input was longer than `max_input_chars`
    pub truncated: bool,
}

impl ExtractionStats {
    pub fn records_for(&self, family: TraitFamily) -> usize {
        self.families
            .iter()
            .find(|stats| stats.family == family)
            .map_or(0, |stats| stats.records)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ExtractionResult {
    pub records: Vec<TraitRecord>,
    pub stats: ExtractionStats,
}

impl ExtractionResult {
    pub fn of_trait<'a>(&'a self, family: TraitFamily) -> impl Iterator<Item = &'a TraitRecord> + 'a {
        let name = family.as_str();
        self.records.iter().filter(move |r| r.trait_name == name)
    }
}

// =============================================================================
// TraitExtractor
// =============================================================================

#[wasm_bindgen]
pub struct TraitExtractor {
    config: ExtractorConfig,
    /// Every family, compiled, in output order
    families: Vec<(TraitFamily, Family)>,
}

impl Default for TraitExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl TraitExtractor {
    /// All families enabled. Panics only if a built-in battery fails to
    /// compile, which is a programming error.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        match Self::try_new(ExtractorConfig::default()) {
            Ok(extractor) => extractor,
            Err(e) => panic!("[TraitExtractor] battery build failed: {}", e),
        }
    }

    /// Build from a JS config object; `null`/`undefined` give the defaults
    #[wasm_bindgen(js_name = withConfig)]
    pub fn js_with_config(config: JsValue) -> Result<TraitExtractor, JsValue> {
        let config: ExtractorConfig = if config.is_null() || config.is_undefined() {
            ExtractorConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)
                .map_err(|e| JsValue::from_str(&format!("Invalid config: {}", e)))?
        };
        Self::try_new(config).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Scan one field with every enabled family (JS binding)
    #[wasm_bindgen(js_name = scan)]
    pub fn js_scan(&self, text: &str, field: Option<String>) -> JsValue {
        let result = self.scan(text, field.as_deref());
        match serde_wasm_bindgen::to_value(&result) {
            Ok(v) => v,
            Err(e) => {
                web_sys::console::error_1(&format!("[TraitExtractor] Serialization failed: {:?}", e).into());
                JsValue::NULL
            }
        }
    }

    /// Single family pass over `text`, offsets shifted by `origin` (JS binding)
    #[wasm_bindgen(js_name = scanFamily)]
    pub fn js_scan_family(&self, name: &str, text: &str, origin: usize) -> Result<JsValue, JsValue> {
        let family: TraitFamily = name
            .parse()
            .map_err(|e: crate::error::TraitError| JsValue::from_str(&e.to_string()))?;
        let records = self.scan_family(family, text, origin);
        serde_wasm_bindgen::to_value(&records)
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
    }

    /// Names of the enabled families (JS binding)
    #[wasm_bindgen(js_name = families)]
    pub fn js_families(&self) -> JsValue {
        let names: Vec<&str> = self.families().iter().map(TraitFamily::as_str).collect();
        serde_wasm_bindgen::to_value(&names).unwrap_or(JsValue::NULL)
    }
}

impl TraitExtractor {
    pub fn try_new(config: ExtractorConfig) -> TraitResult<Self> {
        let families = TraitFamily::ALL
            .iter()
            .map(|family| Ok((*family, family.build()?)))
            .collect::<TraitResult<Vec<_>>>()?;
        Ok(Self { config, families })
    }

    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Enabled families, in output order
    pub fn families(&self) -> Vec<TraitFamily> {
        self.config.enabled_families()
    }

    /// Run every enabled family over one field
    ///
    /// Records come back ordered by start offset. Ties keep family order, so
    /// the two halves of a double notation stay adjacent.
    pub fn scan(&self, text: &str, field: Option<&str>) -> ExtractionResult {
        let overall_start = instant::Instant::now();
        let (text, truncated) = self.config.bound(text);

        let mut result = ExtractionResult::default();
        result.stats.truncated = truncated;

        for (family, compiled) in &self.families {
            if !self.config.is_enabled(*family) {
                continue;
            }
            let family_start = instant::Instant::now();
            let mut records = compiled.scan(text, 0);
            result.stats.families.push(FamilyStats {
                family: *family,
                records: records.len(),
                elapsed_us: family_start.elapsed().as_micros() as u64,
            });
            result.records.append(&mut records);
        }

        // stable: equal starts keep family order
        result.records.sort_by_key(|r| r.start);
        if let Some(field) = field {
            for record in &mut result.records {
                record.field = Some(field.to_string());
            }
        }

        result.stats.total_records = result.records.len();
        result.stats.total_us = overall_start.elapsed().as_micros() as u64;

        tracing::debug!(
            field = field.unwrap_or(""),
            records = result.stats.total_records,
            elapsed_us = result.stats.total_us,
            "trait scan complete"
        );
        result
    }

    /// One family over `text`, with offsets shifted by `origin`
    ///
    /// Runs whether or not the family is enabled in the config.
    pub fn scan_family(&self, family: TraitFamily, text: &str, origin: usize) -> Vec<TraitRecord> {
        let (text, _) = self.config.bound(text);
        self.families
            .iter()
            .find(|(f, _)| *f == family)
            .map(|(_, compiled)| compiled.scan(text, origin))
            .unwrap_or_default()
    }

    /// Scan several `(field, text)` pairs
    pub fn scan_fields(&self, fields: &[(&str, &str)]) -> Vec<ExtractionResult> {
        fields
            .iter()
            .map(|(field, text)| self.scan(text, Some(field)))
            .collect()
    }
}

// =============================================================================
// Tests
// =============================================================================
