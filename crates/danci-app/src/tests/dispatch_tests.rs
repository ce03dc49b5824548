use std::time::Duration;

use danci_types::AppEvent;
use tokio::time::timeout;

use crate::ui::dispatch;

async fn dispatched(line: &str) -> AppEvent {
    let (tx, rx) = kanal::unbounded_async::<AppEvent>();
    let keep_running = dispatch(&tx, line).await.expect("dispatch failed");
    assert!(keep_running);

    timeout(Duration::from_millis(200), rx.recv())
        .await
        .expect("no event dispatched")
        .expect("channel error")
}

async fn dispatches_nothing(line: &str) {
    let (tx, rx) = kanal::unbounded_async::<AppEvent>();
    let keep_running = dispatch(&tx, line).await.expect("dispatch failed");
    assert!(keep_running);

    assert!(
        timeout(Duration::from_millis(50), rx.recv()).await.is_err(),
        "unexpected event for {line:?}"
    );
}

#[tokio::test]
async fn plain_text_becomes_a_search() {
    let event = dispatched("不客气").await;
    assert!(matches!(event, AppEvent::Search(term) if term == "不客气"));
}

#[tokio::test]
async fn use_selects_a_candidate_one_based() {
    let event = dispatched("use 2").await;
    assert!(matches!(event, AppEvent::SelectCandidate(1)));
}

#[tokio::test]
async fn open_and_del_and_list_map_to_store_events() {
    assert!(matches!(dispatched("open 1").await, AppEvent::OpenSaved(0)));
    assert!(matches!(
        dispatched("del abc-123").await,
        AppEvent::DeleteSaved(id) if id == "abc-123"
    ));
    assert!(matches!(dispatched("list").await, AppEvent::ListSaved));
    assert!(matches!(dispatched("save").await, AppEvent::SaveCurrent));
}

#[tokio::test]
async fn malformed_use_sends_nothing() {
    dispatches_nothing("use zero").await;
    dispatches_nothing("use 0").await;
    dispatches_nothing("").await;
}

#[tokio::test]
async fn quit_stops_the_loop() {
    let (tx, _rx) = kanal::unbounded_async::<AppEvent>();
    assert!(!dispatch(&tx, "quit").await.unwrap());
    assert!(!dispatch(&tx, "exit").await.unwrap());
}
