//! Concurrent range-request file downloader: probe a resource's size and
//! range support, split it into disjoint byte ranges, fetch them in
//! parallel, and write each at its offset in a pre-sized destination file.

pub mod downloader;
pub mod error;
pub mod fetcher;
pub mod models;
pub mod planner;
pub mod probe;
pub mod writer;

/// Convenient re-exports of the common surface.
pub mod prelude {
    pub use crate::downloader::{DownloadOptions, Downloader};
    pub use crate::error::DownloadError;
    pub use crate::models::{Chunk, FileMetadata};
}
