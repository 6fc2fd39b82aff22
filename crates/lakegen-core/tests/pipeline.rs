//! End-to-end pipeline tests against in-memory storage and queue backends.

use std::collections::HashSet;
use std::sync::Arc;

use bytes::Bytes;

use lakegen_core::queue::MemoryQueue;
use lakegen_core::storage::{MemoryBackend, StorageBackend};
use lakegen_core::{Error, GenerateEngine, QueueTrigger, WorkRequest};

async fn seed(storage: &MemoryBackend, container: &str, objects: &[(&str, usize)]) {
    for (name, size) in objects {
        storage
            .put(container, name, Bytes::from(vec![b'x'; *size]))
            .await
            .unwrap();
    }
}

fn extension(name: &str) -> &str {
    match name.rfind('.') {
        Some(idx) if idx > 0 => &name[idx..],
        _ => "",
    }
}

#[tokio::test]
async fn generates_exactly_the_requested_count_from_a_smaller_source() {
    let storage = Arc::new(MemoryBackend::new());
    seed(&storage, "seed", &[("a.txt", 10), ("b.jpg", 20), ("c.txt", 5)]).await;

    let request = WorkRequest {
        source_container: "seed".to_string(),
        destination_container: "out".to_string(),
        target_count: 5,
        size_class: "M".to_string(),
    };
    let engine = GenerateEngine::new(storage.clone(), Some(4));
    let report = engine.run(&request).await.unwrap();

    assert_eq!(report.attempted, 5);
    assert_eq!(report.succeeded, 5);

    let generated = storage.list("out").await.unwrap();
    assert_eq!(generated.len(), 5);

    let source_names: HashSet<&str> = ["a.txt", "b.jpg", "c.txt"].into_iter().collect();
    let source_sizes: HashSet<u64> = [10, 20, 5].into_iter().collect();
    let mut seen_names = HashSet::new();
    for object in &generated {
        // Fresh names that still carry a source extension and size.
        assert!(!source_names.contains(object.name.as_str()));
        assert!(matches!(extension(&object.name), ".txt" | ".jpg"));
        assert!(source_sizes.contains(&object.size));
        assert!(seen_names.insert(object.name.clone()));
    }

    // The source container is untouched.
    assert_eq!(storage.list("seed").await.unwrap().len(), 3);
}

#[tokio::test]
async fn truncates_a_larger_source_without_duplication() {
    let storage = Arc::new(MemoryBackend::new());
    let objects: Vec<(String, usize)> = (0..15).map(|i| (format!("f{}.dat", i), 100 + i)).collect();
    for (name, size) in &objects {
        storage
            .put("seed", name, Bytes::from(vec![b'x'; *size]))
            .await
            .unwrap();
    }

    let request = WorkRequest {
        source_container: "seed".to_string(),
        destination_container: "out".to_string(),
        target_count: 10,
        size_class: "M".to_string(),
    };
    let report = GenerateEngine::new(storage.clone(), Some(4))
        .run(&request)
        .await
        .unwrap();
    assert_eq!(report.succeeded, 10);

    // Sizes are unique per seed object, so a surplus batch must not repeat any.
    let generated = storage.list("out").await.unwrap();
    assert_eq!(generated.len(), 10);
    let sizes: HashSet<u64> = generated.iter().map(|o| o.size).collect();
    assert_eq!(sizes.len(), 10);
}

#[tokio::test]
async fn empty_source_fails_with_insufficient_data() {
    let storage = Arc::new(MemoryBackend::new());

    let request = WorkRequest {
        source_container: "seed".to_string(),
        destination_container: "out".to_string(),
        target_count: 5,
        size_class: "M".to_string(),
    };
    let err = GenerateEngine::new(storage, Some(2))
        .run(&request)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        Error::InsufficientSourceData { requested: 5 }
    ));
}

#[tokio::test]
async fn delivery_is_acknowledged_only_after_a_successful_run() {
    let storage = Arc::new(MemoryBackend::new());
    seed(&storage, "seed", &[("a.txt", 10), ("b.txt", 20)]).await;

    let queue = Arc::new(MemoryQueue::new());
    queue.push("src_bucket=seed&dest_bucket=out&num_files=4&size=S");

    let trigger = QueueTrigger::new(queue.clone(), GenerateEngine::new(storage.clone(), Some(2)));
    let report = trigger.run_once().await.unwrap().unwrap();

    assert_eq!(report.succeeded, 4);
    assert_eq!(storage.list("out").await.unwrap().len(), 4);
    assert_eq!(queue.deleted_count(), 1);
    assert_eq!(queue.pending_len(), 0);
    assert_eq!(queue.in_flight_len(), 0);
}

#[tokio::test]
async fn failed_run_leaves_the_delivery_unacknowledged() {
    // No seed data: the run fails before any copy is attempted.
    let storage = Arc::new(MemoryBackend::new());
    let queue = Arc::new(MemoryQueue::new());
    queue.push("src_bucket=seed&dest_bucket=out&num_files=5");

    let trigger = QueueTrigger::new(queue.clone(), GenerateEngine::new(storage, Some(2)));
    let err = trigger.run_once().await.unwrap_err();
    assert!(matches!(
        err,
        Error::InsufficientSourceData { requested: 5 }
    ));

    assert_eq!(queue.deleted_count(), 0);
    assert_eq!(queue.in_flight_len(), 1);

    // The backend's redelivery policy makes it visible again.
    queue.redeliver();
    assert_eq!(queue.pending_len(), 1);
}

#[tokio::test]
async fn malformed_delivery_is_rejected_and_not_acknowledged() {
    let storage = Arc::new(MemoryBackend::new());
    seed(&storage, "seed", &[("a.txt", 10)]).await;

    let queue = Arc::new(MemoryQueue::new());
    queue.push("src_bucket=seed&num_files=3");

    let trigger = QueueTrigger::new(queue.clone(), GenerateEngine::new(storage, Some(2)));
    let err = trigger.run_once().await.unwrap_err();
    assert!(matches!(err, Error::MalformedRequest(_)));
    assert_eq!(queue.deleted_count(), 0);
}

#[tokio::test]
async fn missing_and_unparseable_counts_fall_back_to_the_default() {
    let storage = Arc::new(MemoryBackend::new());
    seed(&storage, "seed", &[("a.txt", 10)]).await;
    let queue = Arc::new(MemoryQueue::new());
    queue.push("src_bucket=seed&dest_bucket=out");
    queue.push("src_bucket=seed&dest_bucket=out&num_files=notanumber");

    let trigger = QueueTrigger::new(queue.clone(), GenerateEngine::new(storage, Some(2)));

    let report = trigger.run_once().await.unwrap().unwrap();
    assert_eq!(report.attempted, 10);

    let report = trigger.run_once().await.unwrap().unwrap();
    assert_eq!(report.attempted, 10);

    assert_eq!(queue.deleted_count(), 2);
}

#[tokio::test]
async fn run_once_processes_at_most_one_delivery() {
    let storage = Arc::new(MemoryBackend::new());
    seed(&storage, "seed", &[("a.txt", 10)]).await;

    let queue = Arc::new(MemoryQueue::new());
    queue.push("src_bucket=seed&dest_bucket=out&num_files=2");
    queue.push("src_bucket=seed&dest_bucket=out&num_files=2");

    let trigger = QueueTrigger::new(queue.clone(), GenerateEngine::new(storage, Some(2)));
    let report = trigger.run_once().await.unwrap().unwrap();

    // The second message stays queued for the next invocation.
    assert_eq!(report.succeeded, 2);
    assert_eq!(queue.deleted_count(), 1);
    assert_eq!(queue.pending_len(), 1);
}

#[tokio::test]
async fn run_once_on_an_empty_queue_is_a_no_op() {
    let storage = Arc::new(MemoryBackend::new());
    let queue = Arc::new(MemoryQueue::new());

    let trigger = QueueTrigger::new(queue, GenerateEngine::new(storage, Some(2)));
    assert!(trigger.run_once().await.unwrap().is_none());
}
