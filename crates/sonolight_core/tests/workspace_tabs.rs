use serde_json::{json, Value};
use sonolight_core::{Collection, Record, RecordStore, Workspace, WorkspaceError};
use std::fs;
use uuid::Uuid;

fn record(value: Value) -> Record {
    match value {
        Value::Object(map) => map,
        other => panic!("fixture must be an object, got {other}"),
    }
}

#[test]
fn tabs_follow_collection_order() {
    let dir = tempfile::tempdir().unwrap();
    let workspace = Workspace::new(RecordStore::new(dir.path()));

    let labels = workspace
        .tabs()
        .into_iter()
        .map(|tab| tab.label)
        .collect::<Vec<_>>();

    assert_eq!(
        labels,
        vec![
            "Clients",
            "Products",
            "Services",
            "Quotes",
            "Invoices",
            "Events",
            "Accounting",
            "Settings"
        ]
    );
}

#[test]
fn open_tab_loads_once_until_reloaded() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("clients.json");
    fs::write(&path, r#"[{"name": "Alice"}]"#).unwrap();
    let mut workspace = Workspace::new(RecordStore::new(dir.path()));

    assert!(!workspace.is_open(Collection::Clients));
    assert_eq!(workspace.open_tab(Collection::Clients).unwrap().len(), 1);

    fs::write(&path, r#"[{"name": "Alice"}, {"name": "Bob"}]"#).unwrap();
    assert_eq!(workspace.open_tab(Collection::Clients).unwrap().len(), 1);
    assert_eq!(workspace.reload_tab(Collection::Clients).unwrap().len(), 2);
}

#[test]
fn insert_assigns_an_id_and_marks_tab_dirty() {
    let dir = tempfile::tempdir().unwrap();
    let mut workspace = Workspace::new(RecordStore::new(dir.path()));

    let id = workspace
        .insert_record(Collection::Clients, record(json!({"name": "Alice"})))
        .unwrap();

    assert!(workspace.is_dirty(Collection::Clients));
    assert_eq!(workspace.dirty_tabs(), vec![Collection::Clients]);
    let stored = workspace.record(Collection::Clients, id).unwrap();
    assert_eq!(stored["id"], json!(id.to_string()));
    assert!(!workspace.store().exists(Collection::Clients));
}

#[test]
fn insert_keeps_an_existing_id() {
    let dir = tempfile::tempdir().unwrap();
    let mut workspace = Workspace::new(RecordStore::new(dir.path()));
    let id = Uuid::new_v4();

    let assigned = workspace
        .insert_record(
            Collection::Products,
            record(json!({"id": id.to_string(), "ref": "SPK-1"})),
        )
        .unwrap();

    assert_eq!(assigned, id);
}

#[test]
fn replace_keeps_id_and_remove_drops_record() {
    let dir = tempfile::tempdir().unwrap();
    let mut workspace = Workspace::new(RecordStore::new(dir.path()));
    let id = workspace
        .insert_record(Collection::Events, record(json!({"title": "Mariage"})))
        .unwrap();

    workspace
        .replace_record(
            Collection::Events,
            id,
            record(json!({"id": Uuid::new_v4().to_string(), "title": "Mariage civil"})),
        )
        .unwrap();
    let stored = workspace.record(Collection::Events, id).unwrap();
    assert_eq!(stored["title"], json!("Mariage civil"));
    assert_eq!(stored["id"], json!(id.to_string()));

    assert!(workspace.remove_record(Collection::Events, id).unwrap());
    assert!(!workspace.remove_record(Collection::Events, id).unwrap());
    assert!(workspace.records(Collection::Events).unwrap().is_empty());
}

#[test]
fn replace_unknown_record_fails() {
    let dir = tempfile::tempdir().unwrap();
    let mut workspace = Workspace::new(RecordStore::new(dir.path()));

    let err = workspace
        .replace_record(Collection::Quotes, Uuid::new_v4(), Record::new())
        .unwrap_err();

    assert!(matches!(err, WorkspaceError::RecordNotFound { .. }));
    assert!(!workspace.is_dirty(Collection::Quotes));
}

#[test]
fn save_all_persists_only_dirty_tabs() {
    let dir = tempfile::tempdir().unwrap();
    let mut workspace = Workspace::new(RecordStore::new(dir.path()));
    workspace.open_tab(Collection::Products).unwrap();
    workspace
        .insert_record(Collection::Clients, record(json!({"name": "Alice"})))
        .unwrap();
    workspace
        .insert_record(Collection::Events, record(json!({"title": "Gig"})))
        .unwrap();

    let saved = workspace.save_all().unwrap();

    assert_eq!(saved, vec![Collection::Clients, Collection::Events]);
    assert!(workspace.dirty_tabs().is_empty());
    assert!(dir.path().join("clients.json").is_file());
    assert!(dir.path().join("events.json").is_file());
    assert!(!dir.path().join("products.json").exists());

    let reopened = Workspace::new(RecordStore::new(dir.path()))
        .open_tab(Collection::Clients)
        .map(|records| records.to_vec())
        .unwrap();
    assert_eq!(reopened[0]["name"], json!("Alice"));
}

#[test]
fn close_tab_reports_unsaved_edits() {
    let dir = tempfile::tempdir().unwrap();
    let mut workspace = Workspace::new(RecordStore::new(dir.path()));
    workspace
        .insert_record(Collection::Clients, record(json!({"name": "Alice"})))
        .unwrap();

    assert!(workspace.close_tab(Collection::Clients));
    assert!(!workspace.close_tab(Collection::Clients));
    assert!(workspace.records(Collection::Clients).is_none());
}

#[test]
fn malformed_file_keeps_tab_closed() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("quotes.json"), "{not json").unwrap();
    let mut workspace = Workspace::new(RecordStore::new(dir.path()));

    let err = workspace.open_tab(Collection::Quotes).unwrap_err();

    assert!(matches!(err, WorkspaceError::Store(_)));
    assert!(!workspace.is_open(Collection::Quotes));
}
