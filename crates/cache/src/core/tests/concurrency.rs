//! Concurrent access tests

use crate::core::Store;
use crate::errors::Result;
use std::time::Duration;
use tempfile::TempDir;

const TTL: Duration = Duration::from_secs(60);

fn payload(byte: u8, len: usize) -> Vec<u8> {
    vec![byte; len]
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_same_key_never_torn() -> Result<()> {
    let temp_dir = TempDir::new().unwrap();
    let store = Store::new(temp_dir.path().to_path_buf(), Duration::ZERO).await?;
    store.set("hot", &payload(0, 4096), TTL).await?;

    let mut tasks = Vec::new();
    for i in 0..16u8 {
        let store = store.clone();
        tasks.push(tokio::spawn(async move {
            for round in 0..25usize {
                if (i as usize + round) % 2 == 0 {
                    // Lengths differ so a mixed record would be detectable
                    store
                        .set("hot", &payload(i + 1, 1024 + i as usize * 97), TTL)
                        .await
                        .unwrap();
                } else {
                    let value = store.get("hot").await.expect("record must stay readable");
                    let first = value[0];
                    assert!(value.iter().all(|b| *b == first), "mixed payload");
                    let expected_len = match first {
                        0 => 4096,
                        writer => 1024 + (writer as usize - 1) * 97,
                    };
                    assert_eq!(value.len(), expected_len);
                }
            }
        }));
    }
    for task in tasks {
        task.await.unwrap();
    }

    let stats = store.stats();
    assert_eq!(stats.corrupt, 0);
    assert_eq!(stats.read_errors, 0);
    assert_eq!(stats.lock_entries, 0);

    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_distinct_keys_in_parallel() -> Result<()> {
    let temp_dir = TempDir::new().unwrap();
    let store = Store::new(temp_dir.path().to_path_buf(), Duration::ZERO).await?;

    let mut tasks = Vec::new();
    for i in 0..64 {
        let store = store.clone();
        tasks.push(tokio::spawn(async move {
            let key = format!("GET|host|/item/{i}");
            for round in 0..5 {
                let value = format!("{key}#{round}");
                store.set(&key, value.as_bytes(), TTL).await.unwrap();
                assert_eq!(store.get(&key).await, Some(value.into_bytes()));
            }
        }));
    }

    tokio::time::timeout(Duration::from_secs(30), join_all(tasks))
        .await
        .expect("operations on distinct keys deadlocked");

    for i in 0..64 {
        let key = format!("GET|host|/item/{i}");
        assert_eq!(store.get(&key).await, Some(format!("{key}#4").into_bytes()));
    }

    Ok(())
}

async fn join_all(tasks: Vec<tokio::task::JoinHandle<()>>) {
    for task in tasks {
        task.await.unwrap();
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_writer_waits_for_reader_lock() -> Result<()> {
    let temp_dir = TempDir::new().unwrap();
    let store = Store::new(temp_dir.path().to_path_buf(), Duration::ZERO).await?;
    store.set("k", b"old", TTL).await?;

    let path = store.path_for("k");
    let reader = store.inner.locks.read(&path).await;

    let writer = {
        let store = store.clone();
        tokio::spawn(async move { store.set("k", b"new", TTL).await })
    };
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(!writer.is_finished());
    assert_eq!(std::fs::read(&path).unwrap()[8..], *b"old");

    drop(reader);
    writer.await.unwrap()?;
    assert_eq!(store.get("k").await, Some(b"new".to_vec()));

    Ok(())
}
