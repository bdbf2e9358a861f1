mod life_stage_tests;
mod nipple_count_tests;
mod sex_tests;

use crate::notation::TraitRecord;
use crate::traits::TraitFamily;

pub(super) fn scan(family: TraitFamily, text: &str) -> Vec<TraitRecord> {
    family.build().unwrap().scan(text, 0)
}

pub(super) fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

pub(super) fn assert_pair(actual: Option<[f64; 2]>, expected: [f64; 2]) {
    let actual = actual.expect("pair value");
    assert_close(actual[0], expected[0]);
    assert_close(actual[1], expected[1]);
}

#[test]
fn test_every_family_builds() {
    for family in TraitFamily::ALL {
        let built = family.build().unwrap();
        assert_eq!(built.name(), family.as_str());
        assert!(!built.battery().is_empty());
    }
}

#[test]
fn test_family_names_round_trip() {
    for family in TraitFamily::ALL {
        assert_eq!(family.as_str().parse::<TraitFamily>().unwrap(), family);
    }
    assert_eq!("Hind-Foot Length".parse::<TraitFamily>().unwrap(), TraitFamily::HindFootLength);
    assert!("wingspan".parse::<TraitFamily>().is_err());
}
