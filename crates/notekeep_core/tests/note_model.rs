use notekeep_core::{Label, LabelId, Note, NoteId, NoteState, Snapshot};

#[test]
fn note_new_sets_defaults() {
    let note = Note::new(NoteId::from("n1"), "hello", 1_700_000_000_000);

    assert_eq!(note.content, "hello");
    assert!(note.label_ids.is_empty());
    assert!(!note.is_bookmarked);
    assert!(!note.is_deleted);
    assert_eq!(note.color, None);
    assert_eq!(note.state(), NoteState::Active);
    assert!(note.is_active());
}

#[test]
fn note_serialization_uses_expected_wire_fields() {
    let mut note = Note::new(NoteId::from("note-1"), "Closures", 1_700_000_000_000);
    note.label_ids = vec![LabelId::from("l1"), LabelId::from("l2")];
    note.is_bookmarked = true;
    note.color = Some("#222".to_string());

    let json = serde_json::to_value(&note).unwrap();
    assert_eq!(json["id"], "note-1");
    assert_eq!(json["content"], "Closures");
    assert_eq!(json["labelIds"], serde_json::json!(["l1", "l2"]));
    assert_eq!(json["updatedAt"], 1_700_000_000_000_i64);
    assert_eq!(json["isBookmarked"], true);
    assert_eq!(json["isDeleted"], false);
    assert_eq!(json["color"], "#222");

    let decoded: Note = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, note);
}

#[test]
fn note_deserialization_fills_optional_fields() {
    let note: Note = serde_json::from_str(
        r#"{"id":"n9","content":"bare","updatedAt":5}"#,
    )
    .unwrap();

    assert!(note.label_ids.is_empty());
    assert!(!note.is_bookmarked);
    assert!(!note.is_deleted);
    assert_eq!(note.color, None);
}

#[test]
fn has_label_and_state_follow_fields() {
    let mut note = Note::new(NoteId::from("n1"), "x", 0);
    note.label_ids.push(LabelId::from("l1"));
    note.is_deleted = true;

    assert!(note.has_label(&LabelId::from("l1")));
    assert!(!note.has_label(&LabelId::from("l2")));
    assert_eq!(note.state(), NoteState::Trashed);
}

#[test]
fn snapshot_json_keeps_order() {
    let snapshot = Snapshot {
        notes: vec![
            Note::new(NoteId::from("b"), "second", 2),
            Note::new(NoteId::from("a"), "first", 1),
        ],
        labels: vec![Label::new(LabelId::from("l1"), "Work")],
    };

    let text = serde_json::to_string(&snapshot).unwrap();
    let decoded: Snapshot = serde_json::from_str(&text).unwrap();
    assert_eq!(decoded, snapshot);
    assert_eq!(decoded.notes[0].id.as_str(), "b");

    let empty: Snapshot = serde_json::from_str("{}").unwrap();
    assert_eq!(empty, Snapshot::default());
}
