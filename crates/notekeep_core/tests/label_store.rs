use notekeep_core::{LabelCascade, LabelId, LabelLookup, LabelStore, StoreError};

#[derive(Default)]
struct RecordingCascade {
    removed: Vec<LabelId>,
}

impl LabelCascade for RecordingCascade {
    fn remove_label(&mut self, label_id: &LabelId) -> usize {
        self.removed.push(label_id.clone());
        0
    }
}

#[test]
fn create_label_trims_and_assigns_unique_ids() {
    let mut store = LabelStore::new();
    let work = store.create_label("  Work ").unwrap();
    let home = store.create_label("Home").unwrap();

    assert_eq!(work.text, "Work");
    assert_ne!(work.id, home.id);
    assert!(store.contains_label(&work.id));
    assert_eq!(store.len(), 2);
}

#[test]
fn create_label_rejects_blank_text() {
    let mut store = LabelStore::new();
    let err = store.create_label("   ").unwrap_err();
    assert_eq!(err, StoreError::EmptyLabelText);
    assert!(err.is_validation());
    assert!(store.is_empty());
}

#[test]
fn create_label_rejects_case_insensitive_duplicate() {
    let mut store = LabelStore::new();
    store.create_label("Work").unwrap();

    let err = store.create_label("work").unwrap_err();
    assert!(matches!(err, StoreError::DuplicateLabelText(ref text) if text == "work"));
    assert!(err.is_validation());
    assert_eq!(store.len(), 1);
}

#[test]
fn rename_label_updates_text_in_place() {
    let mut store = LabelStore::new();
    let first = store.create_label("Draft").unwrap();
    store.create_label("Other").unwrap();

    let renamed = store.rename_label(&first.id, " Final ").unwrap();
    assert_eq!(renamed.id, first.id);
    assert_eq!(renamed.text, "Final");

    let listed = store.list_labels();
    assert_eq!(listed[0].text, "Final");
    assert_eq!(listed[1].text, "Other");
}

#[test]
fn rename_label_to_own_text_with_new_casing_is_allowed() {
    let mut store = LabelStore::new();
    let label = store.create_label("rust").unwrap();
    let renamed = store.rename_label(&label.id, "Rust").unwrap();
    assert_eq!(renamed.text, "Rust");
}

#[test]
fn rename_label_with_blank_text_keeps_old_text() {
    let mut store = LabelStore::new();
    let label = store.create_label("Keep me").unwrap();

    let err = store.rename_label(&label.id, "").unwrap_err();
    assert_eq!(err, StoreError::EmptyLabelText);
    assert_eq!(store.get_label(&label.id).unwrap().text, "Keep me");
}

#[test]
fn rename_label_rejects_duplicate_of_other_label() {
    let mut store = LabelStore::new();
    store.create_label("Work").unwrap();
    let home = store.create_label("Home").unwrap();

    let err = store.rename_label(&home.id, "WORK").unwrap_err();
    assert!(matches!(err, StoreError::DuplicateLabelText(_)));
    assert_eq!(store.get_label(&home.id).unwrap().text, "Home");
}

#[test]
fn rename_missing_label_is_not_found() {
    let mut store = LabelStore::new();
    let missing = LabelId::from("label-missing");
    let err = store.rename_label(&missing, "x").unwrap_err();
    assert_eq!(err, StoreError::LabelNotFound(missing));
    assert!(err.is_not_found());
}

#[test]
fn delete_label_runs_cascade_and_fails_second_time() {
    let mut store = LabelStore::new();
    let label = store.create_label("Temp").unwrap();
    let mut cascade = RecordingCascade::default();

    store.delete_label(&label.id, &mut cascade).unwrap();
    assert_eq!(cascade.removed, vec![label.id.clone()]);
    assert!(!store.contains_label(&label.id));

    let err = store.delete_label(&label.id, &mut cascade).unwrap_err();
    assert!(matches!(err, StoreError::LabelNotFound(_)));
    assert_eq!(cascade.removed.len(), 1);
}

#[test]
fn list_labels_keeps_insertion_order() {
    let mut store = LabelStore::new();
    for text in ["zeta", "alpha", "mid"] {
        store.create_label(text).unwrap();
    }
    let texts: Vec<String> = store.list_labels().into_iter().map(|l| l.text).collect();
    assert_eq!(texts, vec!["zeta", "alpha", "mid"]);
}

#[test]
fn filter_labels_matches_substring_ignoring_case() {
    let mut store = LabelStore::new();
    for text in ["React Native", "JavaScript", "Mobile Development"] {
        store.create_label(text).unwrap();
    }

    let hits: Vec<String> = store
        .filter_labels("SCRIPT")
        .into_iter()
        .map(|l| l.text)
        .collect();
    assert_eq!(hits, vec!["JavaScript"]);

    assert_eq!(store.filter_labels("").len(), 3);
    assert_eq!(store.filter_labels("  ").len(), 3);
    assert!(store.filter_labels("python").is_empty());
}
