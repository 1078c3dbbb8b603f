// src/main.rs

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use parget::prelude::*;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Download a file over HTTP using concurrent range requests.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// URL of the resource to download.
    url: String,

    /// Destination path; defaults to the file-name part of the URL.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Upper bound on concurrent chunk fetches.
    #[arg(long, default_value_t = DownloadOptions::default().max_workers)]
    workers: usize,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let args = Args::parse();
    let destination = args
        .output
        .clone()
        .unwrap_or_else(|| destination_from_url(&args.url));

    let options = DownloadOptions {
        max_workers: args.workers,
        ..DownloadOptions::default()
    };
    let downloader = Downloader::new(reqwest::Client::new(), options);

    info!(url = %args.url, destination = %destination.display(), "starting download");
    downloader
        .download(&args.url, &destination)
        .await
        .with_context(|| format!("download of {} failed", args.url))?;
    info!(destination = %destination.display(), "successfully downloaded file");

    Ok(())
}

/// File-name part of the URL: the last path segment with any query string
/// stripped, falling back to a fixed name for URLs ending in `/`.
fn destination_from_url(url: &str) -> PathBuf {
    let name = url
        .rsplit('/')
        .next()
        .unwrap_or("")
        .split('?')
        .next()
        .unwrap_or("");

    if name.is_empty() {
        PathBuf::from("downloaded-file")
    } else {
        PathBuf::from(name)
    }
}
