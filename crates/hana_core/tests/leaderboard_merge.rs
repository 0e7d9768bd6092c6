use hana_core::leaderboard::baseline::{builtin, parse_baseline, BaselineError};
use hana_core::{merge_and_rank, top_n, BaselineSource, PoemRecord};

fn legacy(author: &str, poem: &str, score: u8) -> PoemRecord {
    PoemRecord {
        id: None,
        title: None,
        author: author.to_string(),
        poem: poem.to_string(),
        score,
    }
}

fn ids_and_scores(poems: &[PoemRecord]) -> Vec<(String, u8)> {
    poems
        .iter()
        .map(|poem| (poem.identity_key(), poem.score))
        .collect()
}

#[test]
fn persisted_record_wins_over_baseline_on_same_id() {
    let persisted = vec![PoemRecord::with_id("x", "A", "P1", 50)];
    let baseline = vec![
        PoemRecord::with_id("x", "A", "P1", 10),
        PoemRecord::with_id("y", "B", "P2", 90),
    ];

    let ranked = merge_and_rank(&persisted, &baseline);

    assert_eq!(
        ids_and_scores(&ranked),
        vec![("y".to_string(), 90), ("x".to_string(), 50)]
    );
}

#[test]
fn merging_collection_with_itself_does_not_duplicate() {
    let poems = vec![
        PoemRecord::with_id("a", "Ann", "first", 40),
        legacy("Ben", "second", 70),
        PoemRecord::with_id("c", "Cat", "third", 55),
    ];

    let ranked = merge_and_rank(&poems, &poems);

    assert_eq!(ranked.len(), 3);
    assert_eq!(
        ids_and_scores(&ranked),
        vec![
            ("Ben-second".to_string(), 70),
            ("c".to_string(), 55),
            ("a".to_string(), 40),
        ]
    );
}

#[test]
fn equal_scores_keep_input_order() {
    let persisted = vec![
        PoemRecord::with_id("p1", "A", "one", 60),
        PoemRecord::with_id("p2", "B", "two", 80),
        PoemRecord::with_id("p3", "C", "three", 60),
    ];
    let baseline = vec![PoemRecord::with_id("b1", "D", "four", 60)];

    let ranked = merge_and_rank(&persisted, &baseline);

    let order: Vec<_> = ranked.iter().map(|poem| poem.identity_key()).collect();
    assert_eq!(order, vec!["p2", "p1", "p3", "b1"]);
}

#[test]
fn legacy_records_collapse_on_author_and_text() {
    let persisted = vec![legacy("Mina", "rain song", 30), legacy("Mina", "rain song", 45)];
    let baseline = vec![legacy("Mina", "rain song", 99)];

    let ranked = merge_and_rank(&persisted, &baseline);

    assert_eq!(ranked.len(), 1);
    assert_eq!(ranked[0].score, 45);
}

#[test]
fn blank_id_falls_back_to_author_and_text_key() {
    let mut record = legacy("Ann", "verse", 20);
    record.id = Some("   ".to_string());
    assert_eq!(record.identity_key(), "Ann-verse");
    assert!(!record.has_id());
}

#[test]
fn malformed_records_are_skipped() {
    let persisted = vec![legacy("  ", "orphan poem", 99), legacy("Ann", "valid", 10)];
    let baseline = vec![legacy("Ben", "", 80)];

    let ranked = merge_and_rank(&persisted, &baseline);

    assert_eq!(ids_and_scores(&ranked), vec![("Ann-valid".to_string(), 10)]);
}

#[test]
fn top_n_truncates_without_reordering() {
    let ranked = merge_and_rank(&[], &builtin());

    assert_eq!(top_n(&ranked, 10).len(), 3);
    let top_two: Vec<_> = top_n(&ranked, 2).iter().map(|p| p.score).collect();
    assert_eq!(top_two, vec![75, 72]);
    assert!(top_n(&ranked, 0).is_empty());
}

#[test]
fn builtin_baseline_has_titled_seed_poems() {
    let baseline = BaselineSource::Builtin.load().unwrap();
    assert_eq!(baseline.len(), 3);
    assert!(baseline.iter().all(|poem| poem.title.is_some() && poem.has_id()));
    assert_eq!(baseline[0].id.as_deref(), Some("initial-whispers"));
}

#[test]
fn baseline_file_accepts_records_without_id() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("poems.json");
    std::fs::write(
        &path,
        r#"[
            {"title": "Dawn", "author": "Aurora", "poem": "light", "score": 61},
            {"id": "n2", "title": "Dusk", "author": "Vesper", "poem": "shade", "score": 58},
            {"title": "Broken", "poem": "no author"}
        ]"#,
    )
    .unwrap();

    let baseline = BaselineSource::File(path).load().unwrap();

    assert_eq!(baseline.len(), 2);
    assert_eq!(baseline[0].identity_key(), "Aurora-light");
    assert_eq!(baseline[1].identity_key(), "n2");
}

#[test]
fn baseline_must_be_an_array() {
    let err = parse_baseline(r#"{"poems": []}"#).unwrap_err();
    assert!(matches!(err, BaselineError::NotAnArray("object")));

    let err = parse_baseline("not json").unwrap_err();
    assert!(matches!(err, BaselineError::Parse(_)));
}

#[test]
fn missing_baseline_file_reports_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = BaselineSource::File(dir.path().join("missing.json"))
        .load()
        .unwrap_err();
    assert!(matches!(err, BaselineError::Io { .. }));
}
