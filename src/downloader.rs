// src/downloader.rs

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use tokio::task::JoinSet;
use tracing::{debug, info};

use crate::error::DownloadError;
use crate::fetcher::fetch_chunk;
use crate::planner::plan_chunks;
use crate::probe::fetch_metadata;
use crate::writer::ChunkWriter;

/// Tuning knobs for a download.
#[derive(Debug, Clone)]
pub struct DownloadOptions {
    /// Smallest byte span worth giving its own worker.
    pub min_chunk_size: i64,
    /// Upper bound on concurrent chunk fetches.
    pub max_workers: usize,
    /// Per-request timeout applied to the probe and to every chunk fetch.
    pub timeout: Duration,
}

impl Default for DownloadOptions {
    fn default() -> Self {
        Self {
            min_chunk_size: 1024 * 1024,
            max_workers: 8,
            timeout: Duration::from_secs(30),
        }
    }
}

/// Orchestrates one download: probe, plan, pre-size the destination, fetch
/// chunks concurrently, write each at its offset.
#[derive(Debug, Clone)]
pub struct Downloader {
    client: Client,
    options: DownloadOptions,
}

impl Downloader {
    /// Create a downloader over an existing HTTP client.
    pub fn new(client: Client, options: DownloadOptions) -> Self {
        Self { client, options }
    }

    /// Download `url` into the file at `destination`.
    ///
    /// Each chunk runs as its own task. The first failure aborts the
    /// remaining tasks and becomes this call's error; a partially written
    /// destination is left on disk as-is, with correct bytes in completed
    /// ranges and zeros elsewhere.
    pub async fn download(&self, url: &str, destination: &Path) -> Result<(), DownloadError> {
        let metadata = fetch_metadata(&self.client, url, self.options.timeout).await?;
        let chunks = plan_chunks(&metadata, &self.options);
        info!(
            url,
            size = metadata.size,
            chunks = chunks.len(),
            "starting download"
        );

        let writer = Arc::new(ChunkWriter::create(destination)?);
        writer.set_len(metadata.size)?;

        let mut tasks = JoinSet::new();
        for chunk in chunks {
            let client = self.client.clone();
            let url = url.to_string();
            let writer = Arc::clone(&writer);
            let timeout = self.options.timeout;
            tasks.spawn(async move {
                let data = fetch_chunk(&client, &url, &chunk, timeout).await?;
                debug!(chunk = chunk.id, bytes = data.len(), "chunk fetched");
                writer.write_chunk(chunk.start_byte as u64, data).await
            });
        }

        // Join in completion order; the first failure cancels the rest.
        // The set is still drained to the end so that no task outlives the
        // writer handle.
        let mut first_error: Option<DownloadError> = None;
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    if first_error.is_none() {
                        tasks.abort_all();
                        first_error = Some(e);
                    }
                }
                Err(e) if e.is_panic() => std::panic::resume_unwind(e.into_panic()),
                Err(_) => {} // an aborted sibling
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => {
                info!(destination = %destination.display(), "download completed");
                Ok(())
            }
        }
    }
}
