//! End-to-end task list flows through the service.

use super::helpers::{InMemoryService, service_over, store, stored, texts};
use rstest::rstest;
use taskkeep::task::{
    adapters::memory::InMemoryKeyValueStore,
    domain::{Task, TaskId, TaskUpdate},
    ports::TaskRepositoryError,
    services::TaskServiceError,
};

async fn add_all(service: &InMemoryService, labels: &[&str]) -> Vec<TaskId> {
    let mut ids = Vec::new();
    for label in labels {
        let task = service.add_task(label).await.expect("add should succeed");
        ids.push(task.id().clone());
    }
    ids
}

/// Asserts exactly one task in `tasks` has `expected_id`.
///
/// # Errors
///
/// Returns an error if zero or several tasks carry the identifier.
fn assert_single_task_with_id(tasks: &[Task], expected_id: &TaskId) -> Result<(), eyre::Report> {
    let matching = tasks.iter().filter(|task| task.id() == expected_id).count();
    eyre::ensure!(
        matching == 1,
        "expected exactly one task with id {expected_id}, found {matching}"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn every_added_task_is_stored_exactly_once(
    store: InMemoryKeyValueStore,
) -> Result<(), eyre::Report> {
    let service = service_over(&store);
    let ids = add_all(&service, &["  padded  ", "plain", "  trailing"]).await;

    let tasks = service.get_tasks().await?;

    eyre::ensure!(tasks.len() == 3, "expected three tasks, found {}", tasks.len());
    for id in &ids {
        assert_single_task_with_id(&tasks, id)?;
    }
    eyre::ensure!(
        texts(&tasks) == ["padded", "plain", "trailing"],
        "stored text should be trimmed"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn adding_one_task_lists_one_task(store: InMemoryKeyValueStore) {
    let service = service_over(&store);

    let task = service.add_task("Buy milk").await.expect("add should succeed");

    assert_eq!(task.text(), "Buy milk");
    assert!(!task.is_completed());
    let tasks = service.get_tasks().await.expect("read should succeed");
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks.first(), Some(&task));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn toggling_splits_active_and_completed_views(store: InMemoryKeyValueStore) {
    let service = service_over(&store);
    let ids = add_all(&service, &["A", "B", "C"]).await;
    let b = ids.get(1).expect("three tasks");

    service.toggle_task(b).await.expect("toggle should succeed");

    let completed = service
        .get_filtered_tasks("completed")
        .await
        .expect("read should succeed");
    let active = service
        .get_filtered_tasks("active")
        .await
        .expect("read should succeed");
    assert_eq!(texts(&completed), ["B"]);
    assert_eq!(texts(&active), ["A", "C"]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleted_task_cannot_be_deleted_twice(store: InMemoryKeyValueStore) {
    let service = service_over(&store);
    let ids = add_all(&service, &["Only"]).await;
    let id = ids.first().expect("one task");

    service.delete_task(id).await.expect("delete should succeed");
    assert!(service.get_tasks().await.expect("read should succeed").is_empty());
    let before = stored(&store);

    let again = service.delete_task(id).await;

    assert!(matches!(
        again,
        Err(TaskServiceError::Repository(TaskRepositoryError::NotFound(_)))
    ));
    assert_eq!(stored(&store), before);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn editing_keeps_identity_and_creation_time(store: InMemoryKeyValueStore) {
    let service = service_over(&store);
    let original = service.add_task("Draft").await.expect("add should succeed");

    let edited = service
        .update_task(
            original.id(),
            TaskUpdate::new().with_text("New").with_completed(true),
        )
        .await
        .expect("update should succeed");

    assert_eq!(edited.id(), original.id());
    assert_eq!(edited.created_at(), original.created_at());
    let reread = service
        .find_task(original.id())
        .await
        .expect("read should succeed");
    assert_eq!(reread, Some(edited.clone()));
    assert_eq!(edited.text(), "New");
    assert!(edited.is_completed());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn separate_services_share_one_store(store: InMemoryKeyValueStore) {
    let writer = service_over(&store);
    let reader = service_over(&store);

    add_all(&writer, &["A", "B"]).await;

    let stats = reader.get_task_stats().await.expect("stats should succeed");
    assert_eq!(stats.total, 2);
    assert_eq!(stats.active + stats.completed, stats.total);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn full_lifecycle_keeps_stats_consistent(store: InMemoryKeyValueStore) {
    let service = service_over(&store);
    let ids = add_all(&service, &["A", "B", "C", "D"]).await;

    for id in ids.iter().step_by(2) {
        service.toggle_task(id).await.expect("toggle should succeed");
        let stats = service.get_task_stats().await.expect("stats should succeed");
        assert_eq!(stats.active + stats.completed, stats.total);
    }

    let cleared = service.clear_completed().await.expect("clear should succeed");
    assert_eq!(cleared, 2);
    let remaining = service.get_tasks().await.expect("read should succeed");
    assert_eq!(texts(&remaining), ["B", "D"]);
}
