use std::io;

use reqwest::StatusCode;
use thiserror::Error;

/// Everything a download can fail with.
///
/// None of these are retried or recovered internally; a chunk-level failure
/// is promoted to a whole-download failure. Each variant carries the
/// context needed to diagnose it without re-deriving from logs.
#[derive(Debug, Error)]
pub enum DownloadError {
    /// The capability probe answered with a non-success status.
    #[error("metadata probe failed with HTTP status {status}")]
    MetadataFetch { status: StatusCode },

    /// A chunk fetch answered with a non-success status.
    #[error("failed to download chunk {chunk_id}, HTTP status {status}")]
    ChunkDownload { chunk_id: usize, status: StatusCode },

    /// The probe or a fetch exceeded the transport timeout.
    #[error("request timed out for {url}")]
    RequestTimeout {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// A network fault other than a timeout.
    #[error("connection failed for {url}")]
    Connection {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Destination open, pre-size, or write failed.
    #[error("{context}")]
    FileWrite {
        context: String,
        #[source]
        source: Option<io::Error>,
    },
}

impl DownloadError {
    /// Classify a transport-level failure; timeouts stay distinguishable
    /// from every other network fault.
    pub(crate) fn from_transport(source: reqwest::Error, url: &str) -> Self {
        if source.is_timeout() {
            Self::RequestTimeout {
                url: url.to_string(),
                source,
            }
        } else {
            Self::Connection {
                url: url.to_string(),
                source,
            }
        }
    }

    pub(crate) fn file_write(context: impl Into<String>, source: io::Error) -> Self {
        Self::FileWrite {
            context: context.into(),
            source: Some(source),
        }
    }
}
