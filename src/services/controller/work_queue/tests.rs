use crate::services::controller::work_queue::WorkQueue;
use std::time::Duration;

const DEFAULT_TEST_TIMEOUT: Duration = Duration::from_secs(5);

#[tokio::test]
async fn test_coalesces_pending_duplicates() {
    let queue = WorkQueue::<String>::new();

    queue.add("a".to_string()).await;
    queue.add("a".to_string()).await;
    queue.add("b".to_string()).await;
    queue.add("a".to_string()).await;

    assert_eq!(queue.len().await, 2);
    assert_eq!(queue.get().await, Some("a".to_string()));
    assert_eq!(queue.get().await, Some("b".to_string()));
    assert!(queue.is_empty().await);
}

#[tokio::test]
async fn test_defers_key_while_processing() {
    let queue = WorkQueue::<String>::new();
    queue.add("a".to_string()).await;
    let key = queue.get().await.unwrap();

    // Re-added twice while in flight
    queue.add("a".to_string()).await;
    queue.add("a".to_string()).await;
    assert!(queue.is_empty().await);

    queue.done(&key).await;

    assert_eq!(queue.len().await, 1);
    assert_eq!(queue.get().await, Some("a".to_string()));
    queue.done(&key).await;
    assert!(queue.is_empty().await);
}

#[tokio::test]
async fn test_done_without_readd_does_not_redeliver() {
    let queue = WorkQueue::<String>::new();
    queue.add("a".to_string()).await;
    let key = queue.get().await.unwrap();

    queue.done(&key).await;

    assert!(queue.is_empty().await);
}

#[tokio::test]
async fn test_get_waits_for_add() {
    let queue = WorkQueue::<String>::new();
    let consumer = {
        let queue = queue.clone();
        tokio::spawn(async move { queue.get().await })
    };

    tokio::time::sleep(Duration::from_millis(50)).await;
    queue.add("a".to_string()).await;

    let key = tokio::time::timeout(DEFAULT_TEST_TIMEOUT, consumer).await.unwrap().unwrap();
    assert_eq!(key, Some("a".to_string()));
}

#[tokio::test]
async fn test_wakes_every_waiting_consumer() {
    let queue = WorkQueue::<String>::new();
    let consumers: Vec<_> = (0..3)
        .map(|_| {
            let queue = queue.clone();
            tokio::spawn(async move { queue.get().await })
        })
        .collect();

    tokio::time::sleep(Duration::from_millis(50)).await;
    for key in ["a", "b", "c"] {
        queue.add(key.to_string()).await;
    }

    let mut received = Vec::new();
    for consumer in consumers {
        let key = tokio::time::timeout(DEFAULT_TEST_TIMEOUT, consumer).await.unwrap().unwrap();
        received.push(key.unwrap());
    }
    received.sort();
    assert_eq!(received, vec!["a".to_string(), "b".to_string(), "c".to_string()]);
}

#[tokio::test(start_paused = true)]
async fn test_add_after_delays_delivery() {
    let queue = WorkQueue::<String>::new();

    queue.add_after("a".to_string(), Duration::from_secs(10));
    tokio::time::sleep(Duration::from_secs(5)).await;
    assert!(queue.is_empty().await);

    tokio::time::sleep(Duration::from_secs(6)).await;
    assert_eq!(queue.len().await, 1);
}

#[tokio::test]
async fn test_shutdown_releases_consumers_and_rejects_adds() {
    let queue = WorkQueue::<String>::new();
    queue.add("pending".to_string()).await;
    let consumer = {
        let queue = queue.clone();
        tokio::spawn(async move {
            let first = queue.get().await;
            let second = queue.get().await;
            (first, second)
        })
    };
    tokio::time::sleep(Duration::from_millis(50)).await;

    queue.shutdown().await;
    queue.add("late".to_string()).await;

    let (first, second) = tokio::time::timeout(DEFAULT_TEST_TIMEOUT, consumer).await.unwrap().unwrap();
    assert_eq!(first, Some("pending".to_string()));
    assert_eq!(second, None);
    assert_eq!(queue.get().await, None);
    assert!(queue.is_empty().await);
}

#[tokio::test(start_paused = true)]
async fn test_add_after_keeps_earliest_deadline() {
    let queue = WorkQueue::<String>::new();

    queue.add_after("a".to_string(), Duration::from_secs(10));
    queue.add_after("a".to_string(), Duration::from_secs(1));
    queue.add_after("a".to_string(), Duration::from_secs(30));
    assert_eq!(queue.delayed_len(), 1);

    tokio::time::sleep(Duration::from_secs(2)).await;
    assert_eq!(queue.delayed_len(), 0);
    assert_eq!(queue.get().await, Some("a".to_string()));
    queue.done(&"a".to_string()).await;

    // The later timers were dropped and never fire
    tokio::time::sleep(Duration::from_secs(60)).await;
    assert!(queue.is_empty().await);
}

#[tokio::test(start_paused = true)]
async fn test_shutdown_cancels_delayed_adds() {
    let queue = WorkQueue::<String>::new();
    queue.add_after("a".to_string(), Duration::from_secs(1000));
    queue.add_after("b".to_string(), Duration::from_secs(5));
    assert_eq!(queue.delayed_len(), 2);

    queue.shutdown().await;
    queue.add_after("c".to_string(), Duration::from_secs(1));

    assert_eq!(queue.delayed_len(), 0);
    tokio::time::sleep(Duration::from_secs(2000)).await;
    assert!(queue.is_empty().await);
}
