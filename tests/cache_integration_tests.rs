//! Integration tests for the concurrent cache handle
//!
//! Exercises the public API end to end: TTL expiration through the
//! background sweep, weighted LRU eviction under concurrent writers, and
//! janitor lifecycle management.

use std::time::Duration;

use ttlru::{Cache, CacheConfig};

fn fast_sweep(default_ttl: Option<Duration>, capacity: usize) -> CacheConfig {
    CacheConfig::new(default_ttl, capacity).sweep_interval(Duration::from_millis(10))
}

#[tokio::test]
async fn roundtrip_simple_write() {
    let cache: Cache<String> = Cache::new(None, 100);

    cache.set("greeting", "hello".to_string()).await;

    assert_eq!(cache.get("greeting").await, Some("hello".to_string()));
    assert_eq!(cache.hit_count(), 1);
    assert_eq!(cache.miss_count(), 0);
}

#[tokio::test]
async fn lru_eviction_on_capacity_overflow() {
    let cache: Cache<u32> = Cache::new(None, 3);

    cache.set("a", 1).await;
    cache.set("b", 2).await;
    cache.set("c", 3).await;
    cache.set("d", 4).await;

    assert_eq!(cache.get("a").await, None);
    assert_eq!(cache.get("b").await, Some(2));
    assert_eq!(cache.get("c").await, Some(3));
    assert_eq!(cache.get("d").await, Some(4));
    assert_eq!(cache.len().await, 3);
}

#[tokio::test]
async fn recency_promotion_changes_eviction_victim() {
    let cache: Cache<u32> = Cache::new(None, 3);

    cache.set("a", 1).await;
    cache.set("b", 2).await;
    cache.set("c", 3).await;

    // Reading the oldest key shifts the victim to the next-oldest
    assert_eq!(cache.get("a").await, Some(1));
    cache.set("d", 4).await;

    assert_eq!(cache.get("a").await, Some(1));
    assert_eq!(cache.get("b").await, None);
}

#[tokio::test]
async fn ttl_expiry_is_lazy_then_swept() {
    let cache: Cache<String> = Cache::with_config(fast_sweep(None, 100));

    cache
        .set_with("brief", "v".to_string(), 1, Some(Duration::from_millis(30)))
        .await;
    assert_eq!(cache.get("brief").await, Some("v".to_string()));

    tokio::time::sleep(Duration::from_millis(100)).await;

    // Hidden from reads and, after the sweep interval, physically gone
    assert_eq!(cache.get("brief").await, None);
    assert_eq!(cache.len().await, 0);
    assert_eq!(cache.used().await, 0);
}

#[tokio::test]
async fn default_ttl_applies_to_simple_writes() {
    let cache: Cache<String> =
        Cache::with_config(fast_sweep(Some(Duration::from_millis(30)), 100));

    cache.set("fleeting", "v".to_string()).await;
    assert!(cache.get("fleeting").await.is_some());

    tokio::time::sleep(Duration::from_millis(100)).await;

    assert_eq!(cache.get("fleeting").await, None);
    assert_eq!(cache.len().await, 0);
}

#[tokio::test]
async fn oversized_write_never_lands() {
    let cache: Cache<String> = Cache::new(None, 5);

    cache.set("small", "v".to_string()).await;
    cache.set_with("huge", "x".to_string(), 6, None).await;

    assert_eq!(cache.get("huge").await, None);
    assert_eq!(cache.get("small").await, Some("v".to_string()));
    assert_eq!(cache.used().await, 1);
}

#[tokio::test]
async fn update_resets_weight_accounting() {
    let cache: Cache<String> = Cache::new(None, 100);

    cache.set_with("k", "v1".to_string(), 3, None).await;
    cache.set_with("k", "v2".to_string(), 5, None).await;

    assert_eq!(cache.used().await, 5);
    assert_eq!(cache.len().await, 1);
    assert_eq!(cache.get("k").await, Some("v2".to_string()));
}

#[tokio::test]
async fn remove_is_idempotent_and_permanent() {
    let cache: Cache<u32> = Cache::new(None, 100);

    cache.set("k", 1).await;
    cache.remove("k").await;
    cache.remove("k").await;
    cache.remove("never-existed").await;

    assert_eq!(cache.used().await, 0);
    assert_eq!(cache.len().await, 0);
    for _ in 0..10 {
        assert_eq!(cache.get("k").await, None);
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_writers_never_exceed_capacity() {
    let capacity = 50;
    let cache: Cache<String> = Cache::new(None, capacity);

    let mut handles = Vec::new();
    for w in 0..8 {
        let cache = cache.clone();
        handles.push(tokio::spawn(async move {
            for i in 0..25 {
                let key = format!("writer{w}_key{i}");
                cache.set(key.clone(), format!("value_{key}")).await;
                // Interleave some reads to churn the recency order
                let _ = cache.get(&key).await;
            }
        }));
    }
    for handle in handles {
        handle.await.expect("writer task panicked");
    }

    assert!(cache.used().await <= capacity);
    assert!(cache.len().await <= capacity);

    // Whatever survived must read back intact
    for w in 0..8 {
        for i in 0..25 {
            let key = format!("writer{w}_key{i}");
            if let Some(value) = cache.get(&key).await {
                assert_eq!(value, format!("value_{key}"));
            }
        }
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_readers_and_sweep_coexist() {
    let cache: Cache<u64> = Cache::with_config(fast_sweep(Some(Duration::from_millis(25)), 64));

    let mut handles = Vec::new();
    for t in 0..4 {
        let cache = cache.clone();
        handles.push(tokio::spawn(async move {
            for round in 0..50u64 {
                let key = format!("t{t}_r{}", round % 8);
                cache.set(key.clone(), round).await;
                let _ = cache.get(&key).await;
                tokio::time::sleep(Duration::from_millis(1)).await;
            }
        }));
    }
    for handle in handles {
        handle.await.expect("task panicked");
    }

    // Stop the sweep so the state cannot shift between the two reads below
    cache.close();
    let snap = cache.stats().await;
    assert!(snap.used <= 64);
    assert_eq!(snap.entries, cache.len().await);
}

#[tokio::test]
async fn counters_are_monotonic_and_lock_free() {
    let cache: Cache<u32> = Cache::new(None, 100);
    cache.set("a", 1).await;

    let mut last_hits = 0;
    let mut last_misses = 0;
    for _ in 0..5 {
        cache.get("a").await;
        cache.get("missing").await;

        // Counter reads take no lock and never regress
        let hits = cache.hit_count();
        let misses = cache.miss_count();
        assert!(hits > last_hits);
        assert!(misses > last_misses);
        last_hits = hits;
        last_misses = misses;
    }

    assert_eq!(last_hits, 5);
    assert_eq!(last_misses, 5);
}

#[tokio::test]
async fn close_stops_sweep_but_keeps_cache_usable() {
    let cache: Cache<String> = Cache::with_config(fast_sweep(None, 100));
    cache.close();

    cache
        .set_with("k", "v".to_string(), 1, Some(Duration::from_millis(20)))
        .await;
    tokio::time::sleep(Duration::from_millis(80)).await;

    // Expiry is now lazy only: hidden from reads, still resident
    assert_eq!(cache.get("k").await, None);
    assert_eq!(cache.len().await, 1);

    // The handle still accepts new work
    cache.set("fresh", "v".to_string()).await;
    assert!(cache.get("fresh").await.is_some());
}
