//! End-to-end tests against the public store API

use forcecache_cache::{Lookup, MissReason, Store, StoreConfigBuilder};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

async fn open(temp_dir: &TempDir) -> Store {
    Store::new(temp_dir.path().to_path_buf(), Duration::ZERO)
        .await
        .unwrap()
}

#[tokio::test]
async fn test_response_round_trip() {
    let temp_dir = TempDir::new().unwrap();
    let store = open(&temp_dir).await;

    store
        .set("GET|host|/a", b"hello", Duration::from_secs(10))
        .await
        .unwrap();
    assert_eq!(store.get("GET|host|/a").await, Some(b"hello".to_vec()));

    let path = store.path_for("GET|host|/a");
    assert_eq!(
        path,
        temp_dir
            .path()
            .join("f3")
            .join("cf")
            .join("3e")
            .join("4a")
            .join("GET%7Chost%7C%2Fa")
    );

    // Header is the little-endian expiry, the rest is the payload verbatim
    let bytes = std::fs::read(&path).unwrap();
    assert_eq!(&bytes[8..], b"hello");
    let expires_at = u64::from_le_bytes(bytes[..8].try_into().unwrap());
    let now = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_secs();
    assert!(expires_at > now && expires_at <= now + 11);
}

#[tokio::test]
async fn test_store_reopens_existing_records() {
    let temp_dir = TempDir::new().unwrap();
    {
        let store = open(&temp_dir).await;
        store
            .set("GETlocalhost/some/path", b"persisted", Duration::from_secs(60))
            .await
            .unwrap();
    }

    let store = open(&temp_dir).await;
    assert_eq!(
        store.get_detailed("GETlocalhost/some/path").await,
        Lookup::Hit(b"persisted".to_vec())
    );
}

#[tokio::test]
async fn test_remove_then_absent() {
    let temp_dir = TempDir::new().unwrap();
    let store = open(&temp_dir).await;

    store.set("k", b"v", Duration::from_secs(60)).await.unwrap();
    assert!(store.remove("k").await.unwrap());
    assert!(!store.remove("k").await.unwrap());
    assert_eq!(
        store.get_detailed("k").await,
        Lookup::Miss(MissReason::Absent)
    );
}

#[tokio::test]
async fn test_open_from_config() {
    let temp_dir = TempDir::new().unwrap();
    let config = StoreConfigBuilder::new()
        .with_path(temp_dir.path().join("nested").join("root"))
        .with_cleanup(Duration::from_secs(3600))
        .build()
        .unwrap();

    let store = Store::from_config(&config).await.unwrap();
    assert!(store.root().is_dir());
    assert!(store.vacuum_running());
    store.shutdown().await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_clients_share_store() {
    let temp_dir = TempDir::new().unwrap();
    let store = Arc::new(open(&temp_dir).await);

    let mut handles = Vec::new();
    for client in 0..8u8 {
        let store = store.clone();
        handles.push(tokio::spawn(async move {
            for round in 0..25u8 {
                let key = format!("GET|host|/shared/{}", round % 5);
                let payload = vec![client; 256 + round as usize];
                store
                    .set(&key, &payload, Duration::from_secs(60))
                    .await
                    .unwrap();

                let read = store.get(&key).await.expect("record present");
                // Whole record from some writer, never a mix
                assert!(read.iter().all(|b| *b == read[0]));
            }
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    let stats = store.stats();
    assert_eq!(stats.writes, 200);
    assert_eq!(stats.write_errors, 0);
    assert_eq!(stats.lock_entries, 0);
}

#[tokio::test]
#[ignore = "waits for a real ten second expiry"]
async fn test_ten_second_expiry() {
    let temp_dir = TempDir::new().unwrap();
    let store = open(&temp_dir).await;

    store
        .set("GET|host|/a", b"hello", Duration::from_secs(10))
        .await
        .unwrap();
    tokio::time::sleep(Duration::from_secs(12)).await;
    assert_eq!(store.get("GET|host|/a").await, None);
}
