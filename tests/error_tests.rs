use assert_matches::assert_matches;
use crimesort::prelude::*;
use crimesort::{Error, topk::parse_count};

fn sample() -> Vec<Record> {
    vec![
        Record::crime("Seoul", "Theft", 5),
        Record::crime("Busan", "Fraud", 1),
    ]
}

#[test]
fn test_missing_field_is_incomparable() {
    let result = sort(
        Sequence::records(sample(), "population"),
        Algorithm::Bubble,
        Direction::Ascending,
    );
    assert_matches!(result, Err(Error::IncomparableKey { field, .. }) if field == "population");
}

#[test]
fn test_partially_missing_field_is_incomparable() {
    let mut records = sample();
    records.push(Record::new().with("region", "Daegu"));
    let result = FieldKey::resolve(&records, "count");
    assert_matches!(result, Err(Error::IncomparableKey { .. }));
}

#[test]
fn test_mixed_kinds_are_incomparable() {
    let records = vec![
        Record::new().with("k", 1),
        Record::new().with("k", "1.5"),
    ];
    let result = sort(
        Sequence::records(records, "k"),
        Algorithm::Insertion,
        Direction::Ascending,
    );
    assert_matches!(result, Err(Error::IncomparableKey { .. }));

    let result = sort(
        Sequence::Values {
            values: vec![Value::from("a"), Value::from(2)],
        },
        Algorithm::Selection,
        Direction::Descending,
    );
    assert_matches!(result, Err(Error::IncomparableKey { .. }));
}

#[test]
fn test_failed_top_k_leaves_records_untouched() {
    let records = sample();
    let before = records.clone();
    assert_matches!(
        top_k(&records, 1, "missing", Direction::Descending),
        Err(Error::IncomparableKey { .. })
    );
    assert_eq!(records, before);
}

#[test]
fn test_negative_count_is_invalid() {
    assert_matches!(
        top_k(&sample(), -1, "count", Direction::Descending),
        Err(Error::InvalidCount(k)) if k == "-1"
    );
    assert_matches!(
        top_k(&sample(), i64::MIN, "count", Direction::Ascending),
        Err(Error::InvalidCount(_))
    );
}

#[test]
fn test_parse_count() {
    assert_eq!(parse_count("3").unwrap(), 3);
    assert_matches!(parse_count("3.5"), Err(Error::InvalidCount(_)));
    assert_matches!(parse_count(""), Err(Error::InvalidCount(_)));
}

#[test]
fn test_empty_input_is_not_an_error() {
    let top = top_k(&[], 5, "count", Direction::Descending).unwrap();
    assert!(top.is_empty());
}
