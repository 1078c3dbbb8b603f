use std::time::Duration;

use reqwest::header::{HeaderMap, ACCEPT_RANGES, CONTENT_LENGTH};
use reqwest::Client;
use tracing::debug;

use crate::error::DownloadError;
use crate::models::FileMetadata;

/// Probe the resource with a single HEAD round trip.
///
/// A non-success status is a hard error; a missing or malformed
/// `Content-Length` is not and degrades to a size of 0.
pub async fn fetch_metadata(
    client: &Client,
    url: &str,
    timeout: Duration,
) -> Result<FileMetadata, DownloadError> {
    debug!(url, "sending HEAD request");
    let response = client
        .head(url)
        .timeout(timeout)
        .send()
        .await
        .map_err(|e| DownloadError::from_transport(e, url))?;

    let status = response.status();
    if !status.is_success() {
        return Err(DownloadError::MetadataFetch { status });
    }

    Ok(FileMetadata {
        size: content_length(response.headers()),
        supports_range_requests: accepts_byte_ranges(response.headers()),
    })
}

/// `Content-Length` parsed as a non-negative integer, 0 otherwise.
fn content_length(headers: &HeaderMap) -> i64 {
    headers
        .get(CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.parse::<u64>().ok())
        .and_then(|n| i64::try_from(n).ok())
        .unwrap_or(0)
}

/// Range fetches are supported iff `Accept-Ranges` equals `"bytes"`,
/// case-insensitively. Absent or any other value means no.
fn accepts_byte_ranges(headers: &HeaderMap) -> bool {
    headers
        .get(ACCEPT_RANGES)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.eq_ignore_ascii_case("bytes"))
        .unwrap_or(false)
}
