use super::scan;
use crate::traits::TraitFamily;

fn sex(text: &str) -> Vec<crate::notation::TraitRecord> {
    scan(TraitFamily::Sex, text)
}

fn values(text: &str) -> Vec<String> {
    sex(text)
        .into_iter()
        .filter_map(|r| r.value.as_text().map(str::to_string))
        .collect()
}

#[test]
fn test_keyed_words() {
    assert_eq!(values("sex=male"), vec!["male"]);
    assert_eq!(values("sex=F"), vec!["female"]);
    assert_eq!(values("sex=unknown"), vec!["unknown"]);
    assert_eq!(sex("sex=male")[0].span(), (0, 8));
    assert_eq!(sex("sex=male")[0].key, "sex");
}

#[test]
fn test_doubtful_value_keeps_question_mark() {
    let records = sex("sex=female ?");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].value.as_text(), Some("female?"));
    assert_eq!(records[0].span(), (0, 12));
}

#[test]
fn test_two_word_phrase() {
    let records = sex("sex=female juvenile;");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].value.as_text(), Some("female juvenile"));
    assert_eq!(records[0].span(), (0, 19));
}

#[test]
fn test_unkeyed_sex_words() {
    assert_eq!(values("Female"), vec!["female"]);
    let records = sex("males and females");
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].span(), (0, 5));
    assert_eq!(records[1].value.as_text(), Some("female"));
    assert_eq!(records[1].span(), (10, 17));
}

#[test]
fn test_connective_after_key_is_not_a_value() {
    let records = sex("sex is female");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].value.as_text(), Some("female"));
    assert_eq!(records[0].span(), (7, 13));
}
