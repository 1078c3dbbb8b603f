use std::time::Duration;

use futures_util::StreamExt;
use reqwest::header::RANGE;
use reqwest::Client;

use crate::error::DownloadError;
use crate::models::Chunk;

/// Fetch the bytes for one chunk.
///
/// Bounded chunks are requested with `Range: bytes=<start>-<end>`;
/// unbounded chunks fetch the whole resource in one plain GET. Any 2xx
/// status (206 Partial Content included) is a success. A single failed
/// attempt is terminal for the chunk — no retry happens here.
pub async fn fetch_chunk(
    client: &Client,
    url: &str,
    chunk: &Chunk,
    timeout: Duration,
) -> Result<Vec<u8>, DownloadError> {
    let mut request = client.get(url).timeout(timeout);
    if let Some(range) = chunk.range_header() {
        request = request.header(RANGE, range);
    }

    let response = request
        .send()
        .await
        .map_err(|e| DownloadError::from_transport(e, url))?;

    let status = response.status();
    if !status.is_success() {
        return Err(DownloadError::ChunkDownload {
            chunk_id: chunk.id,
            status,
        });
    }

    let mut data = Vec::with_capacity(chunk.size_hint());
    let mut stream = response.bytes_stream();
    while let Some(piece) = stream.next().await {
        // Transport faults can also surface mid-body; classify them the
        // same way as failures at send time.
        let bytes = piece.map_err(|e| DownloadError::from_transport(e, url))?;
        data.extend_from_slice(&bytes);
    }

    Ok(data)
}
