use crate::downloader::DownloadOptions;
use crate::models::{Chunk, FileMetadata};

/// Partition the resource's byte space into an ordered, gapless sequence of
/// chunks. Pure; no I/O.
///
/// When the server cannot serve ranges, or the size is unknown (zero or
/// negative), the whole resource becomes a single chunk. Otherwise the
/// span is split across `size / min_chunk_size` workers, clamped to
/// `[1, max_workers]`; integer division leaves the remainder to the last
/// chunk rather than distributing it.
pub fn plan_chunks(metadata: &FileMetadata, options: &DownloadOptions) -> Vec<Chunk> {
    if !metadata.supports_range_requests || metadata.size <= 0 {
        return vec![Chunk {
            id: 0,
            start_byte: 0,
            end_byte: metadata.size - 1,
        }];
    }

    let worker_count = worker_count(metadata.size, options);
    let chunk_size = metadata.size / worker_count as i64;

    (0..worker_count)
        .map(|i| {
            let start_byte = i as i64 * chunk_size;
            let end_byte = if i == worker_count - 1 {
                metadata.size - 1
            } else {
                start_byte + chunk_size - 1
            };
            Chunk {
                id: i,
                start_byte,
                end_byte,
            }
        })
        .collect()
}

fn worker_count(total_size: i64, options: &DownloadOptions) -> usize {
    let desired = total_size / options.min_chunk_size.max(1);
    desired.clamp(1, options.max_workers.max(1) as i64) as usize
}
