use hana_core::{NewPoem, PoemRecord, PoemValidationError};

#[test]
fn new_record_gets_uuid_identity() {
    let first = PoemRecord::new("Ann", "verse", 10);
    let second = PoemRecord::new("Ann", "verse", 10);

    assert!(first.has_id());
    assert_ne!(first.identity_key(), second.identity_key());
    assert!(uuid::Uuid::parse_str(first.id.as_deref().unwrap()).is_ok());
}

#[test]
fn ensure_id_keeps_existing_identity() {
    let mut record = PoemRecord::with_id("keep-me", "Ann", "verse", 10);
    record.ensure_id();
    assert_eq!(record.id.as_deref(), Some("keep-me"));
}

#[test]
fn parse_trims_and_validates_input() {
    let draft = NewPoem::parse("  Mina  ", "\n rain \n", 55).unwrap();
    assert_eq!(draft.author, "Mina");
    assert_eq!(draft.poem, "rain");

    let record = draft.into_record();
    assert!(record.has_id());
    assert_eq!(record.score, 55);
    assert!(record.validate().is_ok());
}

#[test]
fn parse_rejects_blank_fields_and_high_scores() {
    assert_eq!(
        NewPoem::parse(" ", "poem", 0).unwrap_err(),
        PoemValidationError::BlankAuthor
    );
    assert_eq!(
        NewPoem::parse("Mina", "\t", 0).unwrap_err(),
        PoemValidationError::BlankPoem
    );
    assert_eq!(
        NewPoem::parse("Mina", "poem", 120).unwrap_err(),
        PoemValidationError::ScoreOutOfRange(120)
    );
}

#[test]
fn serialized_record_omits_absent_optionals() {
    let record = PoemRecord::with_id("x", "A", "line one\nline two", 50);
    let value = serde_json::to_value(&record).unwrap();
    assert_eq!(
        value,
        serde_json::json!({"id": "x", "author": "A", "poem": "line one\nline two", "score": 50})
    );
}

#[test]
fn legacy_record_without_id_or_score_deserializes() {
    let record: PoemRecord = serde_json::from_str(r#"{"author": "Old", "poem": "text"}"#).unwrap();
    assert_eq!(record.id, None);
    assert_eq!(record.score, 0);
    assert_eq!(record.identity_key(), "Old-text");
}

#[test]
fn baseline_shaped_record_keeps_title() {
    let record: PoemRecord = serde_json::from_str(
        r#"{"id": "initial-dance", "title": "The Dance of Dawn", "author": "Aurora Light", "poem": "p", "score": 68}"#,
    )
    .unwrap();
    assert_eq!(record.title.as_deref(), Some("The Dance of Dawn"));
    assert_eq!(record.identity_key(), "initial-dance");
}
