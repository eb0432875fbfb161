//! Asynchronous enhancement of builtin themes.

use std::fs;
use std::sync::Arc;

use serde_json::{Value, json};
use tempfile::TempDir;
use tinct::{
    BUILTIN_IDS, DefinitionSource, DirectorySource, EngineConfig, Enhancement, FetchError,
    MemoryScope, MemoryStorage, StoreError, ThemeStore, spawn_enhancements,
};

fn store() -> ThemeStore<MemoryScope> {
    ThemeStore::new(
        MemoryScope::new(),
        Box::new(MemoryStorage::new()),
        EngineConfig::default(),
    )
}

fn write_definition(dir: &TempDir, id: &str, definition: &Value) {
    fs::write(dir.path().join(format!("{id}.json")), definition.to_string()).unwrap();
}

fn rich_nord() -> Value {
    json!({
        "meta": {"id": "nord", "name": "Nord", "author": "Arctic Ice Studio", "version": "2.0.0"},
        "colors": {"bg-primary": "#2e3440", "accent": "#8fbcbb"}
    })
}

#[tokio::test]
async fn test_directory_source_reads_and_reports_missing() {
    let dir = TempDir::new().unwrap();
    write_definition(&dir, "nord", &rich_nord());
    fs::write(dir.path().join("broken.json"), "{").unwrap();
    let source = DirectorySource::new(dir.path());

    let nord = source.fetch("nord").await.unwrap();
    assert_eq!(nord["meta"]["version"], "2.0.0");
    assert!(matches!(source.fetch("dracula").await, Err(FetchError::Missing(id)) if id == "dracula"));
    assert!(matches!(source.fetch("broken").await, Err(FetchError::Json(_))));
}

#[tokio::test]
async fn test_only_successful_fetches_arrive() {
    let dir = TempDir::new().unwrap();
    write_definition(&dir, "nord", &rich_nord());
    write_definition(
        &dir,
        "dracula",
        &json!({"id": "dracula", "name": "Dracula", "version": "2.0.0"}),
    );

    let mut store = store();
    store.start();
    let rx = spawn_enhancements(Arc::new(DirectorySource::new(dir.path())), BUILTIN_IDS);
    let applied = store.receive_enhancements(rx).await;

    assert_eq!(applied, 2);
    assert_eq!(store.get("nord").unwrap().version(), "2.0.0");
    assert_eq!(store.get("dracula").unwrap().version(), "2.0.0");
    assert_eq!(store.get("sakura").unwrap().version(), "1.0.0");
}

#[tokio::test]
async fn test_active_builtin_is_reapplied() {
    let dir = TempDir::new().unwrap();
    write_definition(&dir, "nord", &rich_nord());

    let mut store = store();
    store.set_theme("nord");
    assert_eq!(store.scope().get("--accent"), Some("#88c0d0"));

    let rx = spawn_enhancements(Arc::new(DirectorySource::new(dir.path())), ["nord"]);
    store.receive_enhancements(rx).await;
    assert_eq!(store.scope().get("--accent"), Some("#8fbcbb"));
}

#[tokio::test]
async fn test_inactive_builtin_is_not_applied() {
    let dir = TempDir::new().unwrap();
    write_definition(&dir, "nord", &rich_nord());

    let mut store = store();
    store.set_theme("dracula");
    let before = store.scope().clone();

    let rx = spawn_enhancements(Arc::new(DirectorySource::new(dir.path())), ["nord"]);
    store.receive_enhancements(rx).await;
    assert_eq!(store.scope(), &before);
    assert_eq!(store.get("nord").unwrap().author(), "Arctic Ice Studio");
}

#[test]
fn test_enhancement_must_match_a_builtin_id() {
    let mut store = store();

    let user = Enhancement {
        id: "mine".into(),
        definition: json!({"id": "mine", "name": "Mine"}),
    };
    assert!(matches!(store.apply_enhancement(&user), Err(StoreError::NotBuiltin(_))));

    let mismatched = Enhancement {
        id: "nord".into(),
        definition: json!({"id": "dracula", "name": "Dracula"}),
    };
    assert!(matches!(
        store.apply_enhancement(&mismatched),
        Err(StoreError::IdMismatch { .. })
    ));
    assert_eq!(store.get("dracula").unwrap().author(), "tinct");
}

#[test]
fn test_drain_registers_waiting_enhancements() {
    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
    tx.send(Enhancement {
        id: "sakura".into(),
        definition: json!({"id": "sakura", "name": "Sakura", "type": "light", "version": "3.0.0"}),
    })
    .unwrap();
    tx.send(Enhancement {
        id: "sakura".into(),
        definition: json!({"nonsense": true}),
    })
    .unwrap();

    let mut store = store();
    assert_eq!(store.drain_enhancements(&mut rx), 1);
    assert_eq!(store.get("sakura").unwrap().version(), "3.0.0");
    assert_eq!(store.drain_enhancements(&mut rx), 0);
}

/// Answers every id immediately and counts the calls.
#[derive(Default)]
struct CountingSource(std::sync::atomic::AtomicUsize);

impl DefinitionSource for CountingSource {
    async fn fetch(&self, id: &str) -> Result<Value, FetchError> {
        self.0.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        Ok(json!({"id": id, "name": id}))
    }
}

#[tokio::test]
async fn test_dropped_receiver_discards_fetched_definitions() {
    let source = Arc::new(CountingSource::default());
    let rx = spawn_enhancements(Arc::clone(&source), BUILTIN_IDS);
    drop(rx);

    while source.0.load(std::sync::atomic::Ordering::SeqCst) < BUILTIN_IDS.len() {
        tokio::task::yield_now().await;
    }
    tokio::task::yield_now().await;
    assert_eq!(
        source.0.load(std::sync::atomic::Ordering::SeqCst),
        BUILTIN_IDS.len()
    );
}
