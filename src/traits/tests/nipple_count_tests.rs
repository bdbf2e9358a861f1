use super::{assert_close, scan};
use crate::traits::TraitFamily;

fn nipples(text: &str) -> Vec<crate::notation::TraitRecord> {
    scan(TraitFamily::NippleCount, text)
}

#[test]
fn test_keyed_count() {
    let records = nipples("nipples 8");
    assert_eq!(records.len(), 1);
    assert_close(records[0].number().unwrap(), 8.0);
    assert_eq!(records[0].key, "nipple count");
    assert!(records[0].units.is_none());
    assert_eq!(records[0].span(), (0, 9));
}

#[test]
fn test_count_before_key() {
    let records = nipples("6 teats");
    assert_eq!(records.len(), 1);
    assert_close(records[0].number().unwrap(), 6.0);
    assert_eq!(records[0].span(), (0, 7));
}

#[test]
fn test_typed_counts_are_summed() {
    let records = nipples("4 inguinal 2 pectoral nipples");
    assert_eq!(records.len(), 1);
    assert_close(records[0].number().unwrap(), 6.0);
    assert_eq!(records[0].notation.as_deref(), Some("4 inguinal 2 pectoral"));
    assert_eq!(records[0].span(), (0, 29));
}

#[test]
fn test_formula_notations() {
    let records = nipples("mammae 1+2");
    assert_eq!(records.len(), 1);
    assert_close(records[0].number().unwrap(), 3.0);
    assert_eq!(records[0].notation.as_deref(), Some("1+2"));

    let records = nipples("mammae 1:2 = 6");
    assert_close(records[0].number().unwrap(), 6.0);
    assert_eq!(records[0].span(), (0, 14));

    let records = nipples("1:2 = 6 mammae");
    assert_close(records[0].number().unwrap(), 6.0);
    assert_eq!(records[0].notation.as_deref(), Some("1:2 = 6"));

    let records = nipples("2+2 teats");
    assert_eq!(records.len(), 1);
    assert_close(records[0].number().unwrap(), 4.0);
    assert_eq!(records[0].notation.as_deref(), Some("2+2"));
}

#[test]
fn test_two_bare_numbers_are_not_summed() {
    let records = nipples("3 4 teats");
    assert_eq!(records.len(), 1);
    assert_close(records[0].number().unwrap(), 4.0);
    assert!(records[0].notation.is_none());
    assert_eq!(records[0].span(), (2, 9));

    let records = nipples("specimen 12 8 teats");
    assert_eq!(records.len(), 1);
    assert_close(records[0].number().unwrap(), 8.0);
    assert_eq!(records[0].span(), (12, 19));
}

#[test]
fn test_none_counts_as_zero() {
    let records = nipples("nipples=none");
    assert_eq!(records.len(), 1);
    assert_close(records[0].number().unwrap(), 0.0);
}

#[test]
fn test_identifiers_are_skipped() {
    assert!(nipples("12-3 nipples").is_empty());

    let records = nipples("c701563b-dbd9-4500-184f-1ad61eb8da11 4 teats");
    assert_eq!(records.len(), 1);
    assert_close(records[0].number().unwrap(), 4.0);
    assert_eq!(records[0].span(), (37, 44));

    let records = nipples("catalog no. 12 nipples 3");
    assert_eq!(records.len(), 1);
    assert_close(records[0].number().unwrap(), 3.0);
    assert_eq!(records[0].span(), (15, 24));
}

#[test]
fn test_implausible_count_is_dropped() {
    assert!(nipples("nipple count: 150").is_empty());
    assert!(nipples("no nipples").is_empty());
}
