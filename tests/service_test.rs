mod common;

use common::{no_editor, reconciler, MockTranslator};
use dictionary::service::{ServiceStats, WatchService};
use dictionary::store::MemoryStore;
use dictionary::watcher::FileChangeEvent;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};

const NOTE: &str = "/vault/daily.de-en.md";

fn event(path: &str) -> FileChangeEvent {
    FileChangeEvent::from_path(path).unwrap()
}

#[tokio::test]
async fn burst_of_events_runs_once() {
    let store = Arc::new(MemoryStore::new());
    store.insert(NOTE, "Hund\nKatze");
    let translator = Arc::new(MockTranslator::new().word("Hund", "dog").word("Katze", "cat"));
    let r = Arc::new(reconciler(translator.clone(), store.clone(), no_editor()));

    let (tx, rx) = mpsc::unbounded_channel();
    for _ in 0..5 {
        tx.send(event(NOTE)).unwrap();
    }
    drop(tx);

    let stats = WatchService::new(r, Duration::from_millis(30))
        .run(rx, std::future::pending())
        .await;

    assert_eq!(
        stats,
        ServiceStats {
            written: 1,
            unchanged: 0,
            conflicts: 0,
            failures: 0
        }
    );
    assert_eq!(translator.calls().len(), 2);
    assert_eq!(
        store.get(Path::new(NOTE)).unwrap(),
        "Hund : dog\nKatze : cat"
    );
}

#[tokio::test]
async fn failures_are_counted_and_other_notes_still_processed() {
    let store = Arc::new(MemoryStore::new());
    store.insert("/vault/a.de-en.md", "kaputt");
    store.insert("/vault/b.de-en.md", "gut");
    store.insert("/vault/c.md", "egal");
    let translator = Arc::new(MockTranslator::new().failing_on("kaputt").word("gut", "good"));
    let r = Arc::new(reconciler(translator, store.clone(), no_editor()));

    let (tx, rx) = mpsc::unbounded_channel();
    tx.send(event("/vault/a.de-en.md")).unwrap();
    tx.send(event("/vault/b.de-en.md")).unwrap();
    tx.send(event("/vault/c.md")).unwrap();
    drop(tx);

    let stats = WatchService::new(r, Duration::from_millis(10))
        .run(rx, std::future::pending())
        .await;

    assert_eq!(stats.written, 1);
    assert_eq!(stats.failures, 1);
    assert_eq!(store.get(Path::new("/vault/a.de-en.md")).unwrap(), "kaputt");
    assert_eq!(store.get(Path::new("/vault/b.de-en.md")).unwrap(), "gut : good");
    assert_eq!(store.get(Path::new("/vault/c.md")).unwrap(), "egal");
}

#[tokio::test]
async fn shutdown_waits_for_pending_work() {
    let store = Arc::new(MemoryStore::new());
    store.insert(NOTE, "Haus");
    let translator = Arc::new(MockTranslator::new().with_delay(Duration::from_millis(50)));
    let r = Arc::new(reconciler(translator, store.clone(), no_editor()));

    let (tx, rx) = mpsc::unbounded_channel();
    let (stop_tx, stop_rx) = oneshot::channel::<()>();
    tx.send(event(NOTE)).unwrap();

    let service = tokio::spawn(
        WatchService::new(r, Duration::from_millis(5)).run(rx, async move {
            let _ = stop_rx.await;
        }),
    );

    tokio::time::sleep(Duration::from_millis(20)).await;
    stop_tx.send(()).unwrap();
    let stats = service.await.unwrap();

    assert_eq!(stats.written, 1);
    assert_eq!(store.get(Path::new(NOTE)).unwrap(), "Haus : <en:Haus>");
    drop(tx);
}
