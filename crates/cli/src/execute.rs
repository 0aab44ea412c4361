use crate::commands::Commands;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use forcecache_cache::storage::read_expiry;
use forcecache_cache::{Lookup, Store};
use std::io::Write;
use std::process::ExitCode;
use std::time::Duration;
use tokio::io::AsyncReadExt;

impl Commands {
    pub async fn execute(self, store: &Store) -> Result<ExitCode> {
        match self {
            Commands::Get { key } => match store.get(&key).await {
                Some(payload) => {
                    let mut stdout = std::io::stdout().lock();
                    stdout.write_all(&payload)?;
                    stdout.flush()?;
                    Ok(ExitCode::SUCCESS)
                }
                None => {
                    tracing::info!("Cache miss for {}", key);
                    Ok(ExitCode::FAILURE)
                }
            },
            Commands::Set {
                key,
                value,
                file,
                ttl,
            } => {
                let payload = match (value, file) {
                    (Some(value), _) => value.into_bytes(),
                    (None, Some(file)) => tokio::fs::read(&file)
                        .await
                        .with_context(|| format!("failed to read {}", file.display()))?,
                    (None, None) => {
                        let mut buffer = Vec::new();
                        tokio::io::stdin()
                            .read_to_end(&mut buffer)
                            .await
                            .context("failed to read payload from stdin")?;
                        buffer
                    }
                };
                store
                    .set(&key, &payload, Duration::from_secs(ttl))
                    .await?;
                tracing::info!("Stored {} bytes for {} (ttl {}s)", payload.len(), key, ttl);
                Ok(ExitCode::SUCCESS)
            }
            Commands::Remove { key } => {
                if store.remove(&key).await? {
                    println!("removed {key}");
                } else {
                    println!("{key} not cached");
                }
                Ok(ExitCode::SUCCESS)
            }
            Commands::Locate { key } => {
                println!("{}", store.path_for(&key).display());
                Ok(ExitCode::SUCCESS)
            }
            Commands::Inspect { key } => inspect(store, &key).await,
            Commands::Vacuum => {
                let report = store.vacuum().await;
                println!("{}", serde_json::to_string_pretty(&report)?);
                Ok(ExitCode::SUCCESS)
            }
        }
    }
}

async fn inspect(store: &Store, key: &str) -> Result<ExitCode> {
    let path = store.path_for(key);
    println!("key:     {key}");
    println!("path:    {}", path.display());

    match store.get_detailed(key).await {
        Lookup::Hit(payload) => {
            println!("status:  hit");
            println!("length:  {} bytes", payload.len());
            // The record may have been replaced since the read; report what is there now
            if let Ok(expires_at) = read_expiry(&path).await {
                println!("expires: {}", format_epoch(expires_at));
            }
            Ok(ExitCode::SUCCESS)
        }
        Lookup::Miss(reason) => {
            println!("status:  miss ({reason})");
            if let Ok(expires_at) = read_expiry(&path).await {
                println!("expired: {}", format_epoch(expires_at));
            }
            Ok(ExitCode::FAILURE)
        }
    }
}

fn format_epoch(secs: u64) -> String {
    i64::try_from(secs)
        .ok()
        .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0))
        .map(|at| at.to_rfc3339())
        .unwrap_or_else(|| format!("{secs} (out of range)"))
}
