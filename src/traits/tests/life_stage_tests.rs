use super::scan;
use crate::traits::TraitFamily;

fn life_stage(text: &str) -> Vec<crate::notation::TraitRecord> {
    scan(TraitFamily::LifeStage, text)
}

#[test]
fn test_keyed_intrinsic_word() {
    let records = life_stage("life stage=adult");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].value.as_text(), Some("adult"));
    assert_eq!(records[0].key, "life stage");
    assert_eq!(records[0].span(), (0, 16));
}

#[test]
fn test_joined_and_paired_stages() {
    let records = life_stage("age class: juvenile/yearling");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].value.as_text(), Some("juvenile/yearling"));
    assert_eq!(records[0].key, "age class");
    assert_eq!(records[0].span(), (0, 28));

    let records = life_stage("life stage remarks: sub-adult");
    assert_eq!(records[0].value.as_text(), Some("sub-adult"));
    assert_eq!(records[0].key, "life stage");

    let records = life_stage("age: young adult");
    assert_eq!(records[0].value.as_text(), Some("young adult"));
    assert_eq!(records[0].key, "age");
}

#[test]
fn test_age_phrases() {
    let records = life_stage("age first year");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].value.as_text(), Some("first year"));
    assert_eq!(records[0].span(), (0, 14));

    let records = life_stage("Age in years: 2nd year");
    assert_eq!(records[0].value.as_text(), Some("2nd year"));
    assert_eq!(records[0].span(), (0, 22));
}

#[test]
fn test_free_words_up_to_delimiter() {
    let records = life_stage("lifeStage: 5-6 wks;");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].value.as_text(), Some("5-6 wks"));
    assert_eq!(records[0].span(), (0, 18));
}

#[test]
fn test_unkeyed_intrinsic_word() {
    let records = life_stage("adult");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].span(), (0, 5));
}

#[test]
fn test_determination_method_is_not_a_stage() {
    assert!(life_stage("age determined by skull").is_empty());
}
