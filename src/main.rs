//! TTL LRU Cache - demonstration driver
//!
//! Walks through LRU eviction, TTL expiry and compute-or-fetch on a small
//! cache, then prints the statistics snapshot.

use std::time::Duration;

use anyhow::Context;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ttl_lru_cache::{tracing_logger, Cache, CacheConfig};

const DEMO_MAX_SIZE: usize = 3;
const DEMO_TTL: Duration = Duration::from_millis(5000);

/// Main entry point for the demonstration.
///
/// # Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration (env overrides the demo defaults)
/// 3. Fill the cache, read every entry, insert one more to force an LRU eviction
/// 4. Sleep past the TTL and observe lazy expiry
/// 5. Use the async compute-or-fetch helper on a miss and on a hit
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "debug" for this crate so the operation trace is visible,
    // can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ttl_lru_cache=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = CacheConfig::from_env_or(CacheConfig::new(DEMO_MAX_SIZE, DEMO_TTL));
    info!(
        "Configuration loaded: max_size={}, ttl={}ms",
        config.max_size,
        config.ttl.as_millis()
    );

    let cache: Cache<String, i32> = Cache::builder()
        .config(config.clone())
        .logger(tracing_logger())
        .on_evict(|key: &String, value: &i32| info!("[EVICTED]: key={key}, value={value}"))
        .build()
        .context("invalid cache configuration")?;

    info!("Adding items to the cache...");
    cache.put("key1".to_string(), 100);
    cache.put("key2".to_string(), 200);
    cache.put("key3".to_string(), 300);

    info!("Retrieving items from the cache...");
    for key in ["key1", "key2", "key3"] {
        report(key, cache.get(key));
    }

    info!("Adding a 4th item to trigger eviction...");
    cache.put("key4".to_string(), 400);
    for key in ["key1", "key2", "key3", "key4"] {
        report(key, cache.get(key));
    }

    info!("Waiting for the TTL to elapse...");
    tokio::time::sleep(config.ttl + Duration::from_millis(1000)).await;
    report("key2", cache.get("key2"));

    info!("Using compute-or-fetch for an absent key...");
    let computed = cache
        .with_cache_async("key5".to_string(), async {
            info!("Computing value for key5...");
            Some(500)
        })
        .await;
    report("key5", computed);

    info!("Using compute-or-fetch for a cached key...");
    let cached = cache
        .with_cache_async("key5".to_string(), async {
            warn!("This computation should not run, key5 is cached");
            Some(999)
        })
        .await;
    report("key5", cached);

    let stats = serde_json::to_string_pretty(&cache.stats())?;
    info!("Final statistics:\n{stats}");

    Ok(())
}

fn report(key: &str, value: Option<i32>) {
    match value {
        Some(value) => info!("{key}: {value}"),
        None => info!("{key} not found in the cache"),
    }
}
