//! TraitCore: Specimen Trait Notation Engine
//!
//! A Rust/WASM parser for the free-text trait notations found in natural
//! history specimen records: body mass, body lengths, testes size, nipple
//! counts, sex and life stage.
//!
//! # Architecture
//!
//! ## Notation Engine
//! - `fragments.rs` - Sub-pattern library (numbers, ranges, crosses, shorthand chains)
//! - `guard.rs` - Context guards in place of lookaround
//! - `units.rs` - Unit and key tables
//! - `battery.rs` - Ordered per-family pattern batteries
//! - `exclusion.rs` - UUID exclusion filter
//! - `normalize.rs` - Captures to trait records
//! - `scanner.rs` - Leftmost-first scan and advance
//!
//! ## Trait Families
//! - `body_mass`, `total_length`, `tail_length`, `hind_foot_length`,
//!   `ear_length`, `testes_size`, `nipple_count`, `sex`, `life_stage`
//!
//! # Usage (WASM)
//! ```javascript,ignore
//! import init, { TraitExtractor } from 'traitcore';
//!
//! await init();
//!
//! const extractor = new TraitExtractor();
//! const result = extractor.scan("762-292-121-76 2435.0g", "dynamicproperties");
//!
//! console.log(result.records); // [{ trait: "body_mass", value: 2435, units: "g", ... }]
//! console.log(result.stats);   // Record counts and timing per family
//! ```

pub mod config;
pub mod error;
pub mod extractor;
pub mod notation;
pub mod traits;

pub use config::ExtractorConfig;
pub use error::{TraitError, TraitResult};
pub use extractor::{ExtractionResult, ExtractionStats, FamilyStats, TraitExtractor};
pub use notation::{Dimension, Family, Flags, Side, TraitRecord, TraitValue, Units};
pub use traits::{LengthTrait, TraitFamily};

use wasm_bindgen::prelude::*;

// When the `wee_alloc` feature is enabled, use `wee_alloc` as the global
// allocator for smaller WASM bundle size.
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

/// Initialize panic hook for better error messages in browser console
#[wasm_bindgen(start)]
pub fn main() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Get version information
#[wasm_bindgen]
pub fn version() -> String {
    format!("traitcore v{}", env!("CARGO_PKG_VERSION"))
}
