//! Stored layout and recovery from damaged data.

use super::helpers::{seed, service_over, store, stored, texts};
use rstest::rstest;
use serde_json::Value;
use taskkeep::task::adapters::memory::InMemoryKeyValueStore;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn one_malformed_record_does_not_hide_the_rest(store: InMemoryKeyValueStore) {
    seed(
        &store,
        r#"[
            {"id":"a1","text":"Well formed","completed":false,"createdAt":"2024-05-01T10:00:00.000Z"},
            {"id":"a2","completed":true,"createdAt":"2024-05-01T10:00:01.000Z"}
        ]"#,
    );
    let service = service_over(&store);

    let tasks = service.get_tasks().await.expect("read should succeed");

    assert_eq!(texts(&tasks), ["Well formed"]);
    let only = tasks.first().expect("one task");
    assert_eq!(only.id().as_str(), "a1");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unparseable_blob_reads_as_empty(store: InMemoryKeyValueStore) {
    seed(&store, "invalid json");
    let service = service_over(&store);

    let tasks = service.get_tasks().await.expect("read should not fail");

    assert!(tasks.is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn adding_over_corrupt_data_starts_a_fresh_list(store: InMemoryKeyValueStore) {
    seed(&store, "{not json");
    let service = service_over(&store);

    service.add_task("Fresh").await.expect("add should succeed");

    let tasks = service.get_tasks().await.expect("read should succeed");
    assert_eq!(texts(&tasks), ["Fresh"]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn stored_layout_is_a_flat_json_array(store: InMemoryKeyValueStore) {
    let service = service_over(&store);
    let task = service.add_task("Layout").await.expect("add should succeed");

    let raw = stored(&store).expect("collection should be stored");
    let parsed: Value = serde_json::from_str(&raw).expect("stored value should be JSON");
    let records = parsed.as_array().expect("stored value should be an array");
    let record = records
        .first()
        .and_then(Value::as_object)
        .expect("one record object");

    let mut keys: Vec<&str> = record.keys().map(String::as_str).collect();
    keys.sort_unstable();
    assert_eq!(keys, ["completed", "createdAt", "id", "text"]);
    assert_eq!(record.get("id").and_then(Value::as_str), Some(task.id().as_str()));
    assert_eq!(record.get("completed"), Some(&Value::Bool(false)));
    let created_at = record
        .get("createdAt")
        .and_then(Value::as_str)
        .expect("createdAt string");
    assert_eq!(created_at.len(), "2024-01-01T00:00:00.000Z".len());
    assert!(created_at.ends_with('Z'));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn previously_stored_data_is_read_back(store: InMemoryKeyValueStore) {
    seed(
        &store,
        r#"[{"id":"lq2x8k0abc123def","text":"Legacy","completed":true,"createdAt":"2023-11-14T22:13:20.000Z"}]"#,
    );
    let service = service_over(&store);

    let stats = service.get_task_stats().await.expect("stats should succeed");
    let tasks = service.get_tasks().await.expect("read should succeed");

    assert_eq!((stats.total, stats.completed, stats.active), (1, 1, 0));
    let legacy = tasks.first().expect("one task");
    assert_eq!(legacy.created_at().timestamp_millis(), 1_700_000_000_000);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn round_trip_keeps_millisecond_timestamps(store: InMemoryKeyValueStore) {
    let service = service_over(&store);
    let added = service.add_task("Precise").await.expect("add should succeed");

    let reloaded = service_over(&store)
        .find_task(added.id())
        .await
        .expect("read should succeed")
        .expect("task should exist");

    assert_eq!(
        reloaded.created_at().timestamp_millis(),
        added.created_at().timestamp_millis()
    );
    assert_eq!(reloaded.text(), added.text());
    assert_eq!(reloaded.is_completed(), added.is_completed());
}
