use crate::services::controller::backoff::ItemExponentialBackoff;
use std::time::Duration;

#[test]
fn test_delay_doubles_per_failure() {
    let backoff = ItemExponentialBackoff::new(Duration::from_millis(5), Duration::from_secs(60));
    let key = "a".to_string();

    let delays: Vec<Duration> = (0..4).map(|_| backoff.next_delay(&key)).collect();

    assert_eq!(
        delays,
        vec![
            Duration::from_millis(5),
            Duration::from_millis(10),
            Duration::from_millis(20),
            Duration::from_millis(40)
        ]
    );
    assert_eq!(backoff.failures(&key), 4);
}

#[test]
fn test_delay_is_capped() {
    let backoff = ItemExponentialBackoff::new(Duration::from_secs(1), Duration::from_secs(10));
    let key = "a".to_string();

    for _ in 0..64 {
        backoff.next_delay(&key);
    }

    assert_eq!(backoff.next_delay(&key), Duration::from_secs(10));
}

#[test]
fn test_keys_are_independent_and_forgettable() {
    let backoff = ItemExponentialBackoff::<String>::default();
    let a = "a".to_string();
    let b = "b".to_string();

    backoff.next_delay(&a);
    backoff.next_delay(&a);
    assert_eq!(backoff.next_delay(&b), ItemExponentialBackoff::<String>::DEFAULT_BASE);

    backoff.forget(&a);

    assert_eq!(backoff.failures(&a), 0);
    assert_eq!(backoff.next_delay(&a), ItemExponentialBackoff::<String>::DEFAULT_BASE);
}
