use rusqlite::{params, Connection};
use smartnote_core::db::{open_db, open_db_in_memory};
use smartnote_core::{
    Color, ColorBucket, KeywordTable, Note, NotePersistence, NotesService, PersistenceError,
    SqliteBlobStore,
};
use uuid::Uuid;

fn note(content: &str, color: Color, tags: &[&str]) -> Note {
    Note::new(
        "título",
        content,
        color,
        tags.iter().map(|tag| tag.to_string()).collect(),
    )
}

#[test]
fn missing_blob_loads_as_empty() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteBlobStore::try_new(&conn).unwrap();
    assert!(store.load().unwrap().is_empty());
}

#[test]
fn save_then_load_preserves_order_and_fields() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteBlobStore::try_new(&conn).unwrap();
    let notes = vec![
        note("pagar factura", Color::Green, &["General"]),
        note("idea de proyecto", Color::Blue, &["Proyecto", "Estudio"]),
    ];

    store.save(&notes).unwrap();
    assert_eq!(store.load().unwrap(), notes);

    store.save(&notes[1..]).unwrap();
    assert_eq!(store.load().unwrap(), notes[1..].to_vec());
}

#[test]
fn persisted_record_uses_expected_wire_fields() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteBlobStore::try_new(&conn).unwrap();
    let saved = note("urgente", Color::Red, &["Trabajo"]);
    store.save(std::slice::from_ref(&saved)).unwrap();

    let raw: String = conn
        .query_row(
            "SELECT value FROM blobs WHERE key = 'smartNotes';",
            [],
            |row| row.get(0),
        )
        .unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(json[0]["id"], saved.id.to_string());
    assert_eq!(json[0]["color"], "red");
    assert_eq!(json[0]["tags"], serde_json::json!(["Trabajo"]));
    assert_eq!(json[0]["createdAt"], saved.created_at);
}

#[test]
fn corrupt_blob_is_an_error_and_service_starts_empty() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO blobs (key, value) VALUES (?1, ?2);",
        params!["smartNotes", "{not json"],
    )
    .unwrap();

    let store = SqliteBlobStore::try_new(&conn).unwrap();
    assert!(matches!(store.load(), Err(PersistenceError::Decode(_))));

    let mut service = NotesService::new(store);
    assert_eq!(service.load(), 0);
    assert!(service.notes().is_empty());
}

#[test]
fn blob_with_one_invalid_record_is_rejected_whole() {
    let conn = open_db_in_memory().unwrap();
    let raw = serde_json::json!([
        {
            "id": Uuid::new_v4().to_string(),
            "title": "ok",
            "content": "válida",
            "color": "gray",
            "tags": ["General"],
            "createdAt": 1
        },
        {
            "id": Uuid::new_v4().to_string(),
            "title": "bad",
            "content": "   ",
            "color": "gray",
            "tags": ["General"],
            "createdAt": 2
        }
    ])
    .to_string();
    conn.execute(
        "INSERT INTO blobs (key, value) VALUES ('smartNotes', ?1);",
        [raw],
    )
    .unwrap();

    let store = SqliteBlobStore::try_new(&conn).unwrap();
    assert!(matches!(store.load(), Err(PersistenceError::Invalid(_))));
}

#[test]
fn keys_are_isolated() {
    let conn = open_db_in_memory().unwrap();
    let first = SqliteBlobStore::with_key(&conn, "first").unwrap();
    let second = SqliteBlobStore::with_key(&conn, "second").unwrap();

    first.save(&[note("comprar", Color::Green, &["General"])]).unwrap();
    assert_eq!(first.load().unwrap().len(), 1);
    assert!(second.load().unwrap().is_empty());
}

#[test]
fn try_new_requires_migrated_connection() {
    let conn = Connection::open_in_memory().unwrap();
    let err = SqliteBlobStore::try_new(&conn).err().unwrap();
    assert!(matches!(err, PersistenceError::MissingRequiredTable("blobs")));
}

#[test]
fn notes_survive_reopening_file_database() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.db");

    let committed_id = {
        let conn = open_db(&path).unwrap();
        let mut service = NotesService::new(SqliteBlobStore::try_new(&conn).unwrap());
        service.update_draft_text("Gym", "ejercicio y salud");
        service.commit_draft().unwrap().id
    };

    let conn = open_db(&path).unwrap();
    let mut service = NotesService::new(SqliteBlobStore::try_new(&conn).unwrap());
    assert_eq!(service.load(), 1);
    let loaded = service.notes().get(committed_id).unwrap();
    assert_eq!(loaded.tags, vec!["Salud".to_string(), "Ejercicio".to_string()]);
    assert_eq!(loaded.title, "Gym");
}

#[test]
fn custom_table_with_repeated_tag_words_keeps_notes_loadable() {
    let conn = open_db_in_memory().unwrap();
    let table = KeywordTable::new(
        vec![ColorBucket::new(Color::Blue, ["clean"])],
        ["home", "Home "],
    );

    let storage = SqliteBlobStore::try_new(&conn).unwrap();
    let mut service = NotesService::with_table(storage, &table);
    service.update_draft_text("", "older note");
    service.commit_draft().unwrap();
    service.update_draft_text("", "clean at home");
    let committed = service.commit_draft().unwrap();
    assert_eq!(committed.tags, vec!["Home".to_string()]);
    assert!(committed.validate().is_ok());

    let storage = SqliteBlobStore::try_new(&conn).unwrap();
    let mut reloaded = NotesService::with_table(storage, &table);
    assert_eq!(reloaded.load(), 2);
    assert_eq!(reloaded.notes().all().next(), Some(&committed));
}
