use std::path::PathBuf;

use futures_util::StreamExt;
use sha1::{Digest, Sha1};
use thiserror::Error;
use tokio::{
    fs::{create_dir_all, File},
    io::AsyncWriteExt,
};

use super::{error::HttpError, fetch::CLIENT};

/// Number of downloads allowed in flight at once. Keeps the socket and open
/// file descriptor count bounded on large asset batches.
pub const CONCURRENT_DOWNLOADS: usize = 16;

/// One unit of download work: where to fetch from, where the bytes land, and
/// the digest they have to match.
#[derive(Debug, Clone)]
pub struct DownloadJob {
    pub url: String,
    pub path: PathBuf,
    pub sha1: Option<String>,
}

#[derive(Debug)]
pub struct FailedDownload {
    pub job: DownloadJob,
    pub error: HttpError,
}

#[derive(Error, Debug)]
#[error("{} of {} downloads failed", failed.len(), total)]
pub struct BatchError {
    pub total: usize,
    pub failed: Vec<FailedDownload>,
}

/// Fetches a single job to its destination.
///
/// An already existing destination file is trusted and skipped. The response
/// body is streamed to disk while being hashed; a digest that does not match
/// the job's expected hash fails the job and leaves the partial file on disk
/// so a later run can replace it.
pub async fn download(job: &DownloadJob) -> Result<(), HttpError> {
    if job.path.exists() {
        return Ok(());
    }

    if let Some(parent) = job.path.parent() {
        if !parent.is_dir() {
            create_dir_all(parent).await?;
        }
    }

    let response = CLIENT.get(&job.url).send().await?;
    if !response.status().is_success() {
        return Err(HttpError::Status(response.status().to_string()));
    }

    let mut file = File::create(&job.path).await?;
    let mut hasher = Sha1::new();

    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        hasher.update(&chunk);
        file.write_all(&chunk).await?;
    }
    file.flush().await?;

    if let Some(expected) = &job.sha1 {
        let actual = format!("{:x}", hasher.finalize());
        if &actual != expected {
            return Err(HttpError::Integrity {
                path: job.path.clone(),
                expected: expected.clone(),
                actual,
            });
        }
    }

    Ok(())
}

/// Runs every job with bounded parallelism and blocks until all of them have
/// finished, success or not.
///
/// A failed job does not cancel the rest of the batch; the error carries the
/// complete list of failures so the caller can see exactly what is missing.
/// There is no retry.
pub async fn download_all(jobs: Vec<DownloadJob>) -> Result<(), BatchError> {
    let total = jobs.len();

    let outcomes = futures_util::stream::iter(jobs.into_iter().map(|job| async move {
        let result = download(&job).await;
        (job, result)
    }))
    .buffer_unordered(CONCURRENT_DOWNLOADS)
    .collect::<Vec<_>>()
    .await;

    let failed: Vec<FailedDownload> = outcomes
        .into_iter()
        .filter_map(|(job, result)| match result {
            Ok(()) => None,
            Err(error) => {
                log::warn!("Download of {} failed: {}", job.url, error);
                Some(FailedDownload { job, error })
            }
        })
        .collect();

    if failed.is_empty() {
        Ok(())
    } else {
        Err(BatchError { total, failed })
    }
}
