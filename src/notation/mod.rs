//! Notation engine
//!
//! - `fragments.rs` - Sub-pattern library (number, range, cross, fraction, shorthand, side, uuid)
//! - `guard.rs` - Context guards standing in for lookaround
//! - `units.rs` - Unit & key tables
//! - `battery.rs` - Ordered, compiled whole-notation patterns
//! - `exclusion.rs` - Value-group veto (UUIDs)
//! - `normalize.rs` - Captures to trait records
//! - `scanner.rs` - Scan-and-advance dispatcher
//! - `family.rs` - A battery plus its tables and limits
//! - `record.rs` - Output record model

pub mod battery;
pub mod exclusion;
pub mod family;
pub mod fragments;
pub mod guard;
pub mod normalize;
pub mod record;
pub mod scanner;
pub mod units;

pub use battery::{Battery, CompiledPattern, KeyAmbiguity, PatternDef, PatternKind, Producer, Slot};
pub use exclusion::ExclusionFilter;
pub use family::{Family, TextCanonicalizer};
pub use fragments::{Fragment, ShorthandWeight};
pub use guard::{Guard, GuardSpec};
pub use normalize::Outcome;
pub use record::{Dimension, Flags, Side, TraitRecord, TraitValue, Units};
pub use units::{KeyTable, UnitDef, UnitTable};
