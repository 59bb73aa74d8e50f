//! Integration Tests for the public cache API
//!
//! Exercises the full walk-through, hooks, and the concurrency contract.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier, Mutex};
use std::thread::{self, sleep};
use std::time::Duration;

use ttl_lru_cache::{Cache, CacheConfig, CacheError};

// == Helper Functions ==

type Evicted = Arc<Mutex<Vec<(String, i32)>>>;

fn recording_cache(max_size: usize, ttl: Duration) -> (Cache<String, i32>, Evicted) {
    let evicted: Evicted = Arc::new(Mutex::new(Vec::new()));
    let sink = evicted.clone();
    let cache = Cache::builder()
        .max_size(max_size)
        .ttl(ttl)
        .on_evict(move |key: &String, value: &i32| sink.lock().unwrap().push((key.clone(), *value)))
        .build()
        .unwrap();
    (cache, evicted)
}

fn k(s: &str) -> String {
    s.to_string()
}

// == Walk-through ==

#[test]
fn test_end_to_end_scenario() {
    let ttl = Duration::from_millis(500);
    let (cache, evicted) = recording_cache(3, ttl);

    cache.put(k("a"), 100);
    cache.put(k("b"), 200);
    cache.put(k("c"), 300);

    assert_eq!(cache.get("a"), Some(100));
    assert_eq!(cache.get("b"), Some(200));
    assert_eq!(cache.get("c"), Some(300));

    // Reads left recency at a, b, c so a is the victim
    cache.put(k("d"), 400);
    assert_eq!(*evicted.lock().unwrap(), vec![(k("a"), 100)]);

    assert_eq!(cache.get("a"), None);
    assert_eq!(cache.get("b"), Some(200));
    assert_eq!(cache.get("c"), Some(300));
    assert_eq!(cache.get("d"), Some(400));

    sleep(ttl + Duration::from_millis(200));

    // The read above did not extend b's lifetime
    assert_eq!(cache.get("b"), None);
    assert_eq!(evicted.lock().unwrap().last(), Some(&(k("b"), 200)));

    let computed = cache.with_cache(k("e"), || Some(500));
    assert_eq!(computed, Some(500));

    let cached = cache.with_cache(k("e"), || Some(999));
    assert_eq!(cached, Some(500));
}

#[test]
fn test_construction_fails_on_invalid_config() {
    let zero_size = Cache::<String, i32>::new(0, Duration::from_secs(1));
    assert!(matches!(zero_size, Err(CacheError::InvalidConfig(_))));

    let zero_ttl = Cache::<String, i32>::from_config(&CacheConfig::new(3, Duration::ZERO));
    assert!(matches!(zero_ttl, Err(CacheError::InvalidConfig(_))));
}

// == Eviction Hook ==

#[test]
fn test_eviction_hook_fires_for_every_single_removal() {
    let ttl = Duration::from_millis(50);
    let (cache, evicted) = recording_cache(2, ttl);

    cache.put(k("x"), 1);
    cache.put(k("y"), 2);
    cache.put(k("z"), 3); // capacity: x
    cache.evict("y"); // explicit: y
    cache.put(k("w"), 4);
    cache.evict_lru(); // lru: z

    sleep(ttl * 2);
    assert_eq!(cache.get("w"), None); // ttl: w

    assert_eq!(
        *evicted.lock().unwrap(),
        vec![(k("x"), 1), (k("y"), 2), (k("z"), 3), (k("w"), 4)]
    );

    let stats = cache.stats();
    assert_eq!(stats.evictions, 1);
    assert_eq!(stats.removals, 2);
    assert_eq!(stats.expirations, 1);
}

#[test]
fn test_clear_skips_eviction_hook() {
    let (cache, evicted) = recording_cache(5, Duration::from_secs(60));

    for (i, key) in ["a", "b", "c"].iter().enumerate() {
        cache.put(k(key), i as i32);
    }
    cache.clear();

    for key in ["a", "b", "c"] {
        assert!(!cache.contains(key));
        assert_eq!(cache.get(key), None);
    }
    assert!(evicted.lock().unwrap().is_empty());
}

#[test]
fn test_contains_is_a_peek() {
    let ttl = Duration::from_millis(40);
    let (cache, evicted) = recording_cache(2, ttl);

    cache.put(k("old"), 1);
    cache.put(k("new"), 2);

    // contains does not promote: old is still the LRU victim
    assert!(cache.contains("old"));
    cache.put(k("newest"), 3);
    assert!(!cache.contains("old"));

    sleep(ttl * 2);

    // Expired but unread entries are still reported present
    assert!(cache.contains("new"));
    assert_eq!(cache.len(), 2);
    assert_eq!(evicted.lock().unwrap().len(), 1);
}

#[test]
fn test_logger_receives_operation_trace() {
    let lines = Arc::new(Mutex::new(Vec::new()));
    let sink = lines.clone();
    let cache: Cache<u32, &str> = Cache::builder()
        .max_size(1)
        .logger(move |msg| sink.lock().unwrap().push(msg.to_string()))
        .build()
        .unwrap();

    cache.put(1, "one");
    cache.put(1, "uno");
    cache.get(&1);
    cache.put(2, "two");
    cache.evict(&2);
    cache.clear();

    assert_eq!(
        *lines.lock().unwrap(),
        vec![
            "PUT: 1",
            "UPDATE: 1",
            "GET: 1",
            "EVICT: 1",
            "PUT: 2",
            "EVICT: 2",
            "CLEAR: All cache entries have been removed.",
        ]
    );
}

#[test]
fn test_panicking_hook_leaves_cache_usable() {
    let cache: Cache<String, i32> = Cache::builder()
        .max_size(2)
        .on_evict(|key: &String, _: &i32| {
            if key == "boom" {
                panic!("listener failure");
            }
        })
        .build()
        .unwrap();

    cache.put(k("boom"), 1);
    cache.put(k("ok"), 2);

    let result = catch_unwind(AssertUnwindSafe(|| cache.evict("boom")));
    assert!(result.is_err());

    // The listener ran before unlinking, so the entry survived intact
    assert!(cache.contains("boom"));
    assert_eq!(cache.len(), 2);
    assert_eq!(cache.evict("ok"), Some(2));
    assert_eq!(cache.get("boom"), Some(1));
}

// == Concurrency ==

#[test]
fn test_concurrent_mixed_operations_respect_capacity() {
    let cache = Arc::new(Cache::new(16, Duration::from_secs(60)).unwrap());

    let handles: Vec<_> = (0..8)
        .map(|t| {
            let cache = cache.clone();
            thread::spawn(move || {
                for i in 0..500u32 {
                    let key = (t * 7 + i) % 40;
                    match i % 4 {
                        0 | 1 => {
                            cache.put(key, i);
                        }
                        2 => {
                            cache.get(&key);
                        }
                        _ => {
                            cache.with_cache(key, || Some(i));
                        }
                    }
                    assert!(cache.len() <= 16);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert!(cache.len() <= 16);
    assert_eq!(cache.stats().total_entries, cache.len());
}

#[test]
fn test_with_cache_has_no_single_flight() {
    let cache = Arc::new(Cache::<String, usize>::new(10, Duration::from_secs(60)).unwrap());
    let calls = Arc::new(AtomicUsize::new(0));
    let barrier = Arc::new(Barrier::new(2));

    let handles: Vec<_> = (0..2)
        .map(|t| {
            let cache = cache.clone();
            let calls = calls.clone();
            let barrier = barrier.clone();
            thread::spawn(move || {
                cache.with_cache(k("shared"), || {
                    calls.fetch_add(1, Ordering::SeqCst);
                    // Both producers are in flight together: the lock is not held here
                    barrier.wait();
                    Some(t)
                })
            })
        })
        .collect();

    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert!(results.iter().all(Option::is_some));
    assert_eq!(cache.len(), 1);
    assert!(cache.get("shared").is_some());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_with_cache_async_across_tasks() {
    let cache = Arc::new(Cache::<u64, u64>::new(8, Duration::from_secs(60)).unwrap());

    let mut tasks = Vec::new();
    for i in 0..8u64 {
        let cache = cache.clone();
        tasks.push(tokio::spawn(async move {
            cache
                .with_cache_async(i, async move {
                    tokio::time::sleep(Duration::from_millis(10)).await;
                    Some(i * i)
                })
                .await
        }));
    }

    for (i, task) in tasks.into_iter().enumerate() {
        assert_eq!(task.await.unwrap(), Some((i * i) as u64));
    }

    assert_eq!(cache.len(), 8);
    assert_eq!(cache.get(&3), Some(9));
}
