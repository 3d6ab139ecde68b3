//! Batch orchestration: enumerate, classify, fan out, aggregate

use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::fs;
use tokio::sync::Semaphore;
use tracing::{error, info, warn};

use crate::backend::ImageBackend;
use crate::error::{Result, SwyftError};
use crate::formats::has_supported_extension;
use crate::resize::{ResizeOutcome, ResizeRequest, Resizer};

/// Options for one batch run
#[derive(Debug, Clone)]
pub struct BatchRequest {
    pub input_folder: PathBuf,
    pub output_folder: PathBuf,
    pub target_width: Option<u32>,
    pub target_height: Option<u32>,
    pub keep_aspect_ratio: bool,
    pub overwrite: bool,
}

/// Aggregate result of a batch run
#[derive(Debug, Default, Clone)]
pub struct BatchSummary {
    pub resized: usize,
    pub skipped_exists: usize,
    pub skipped_unsupported: usize,
    pub skipped_missing_metadata: usize,
    pub failed: usize,
    pub elapsed: Duration,
}

impl BatchSummary {
    /// Total number of directory entries the run classified
    pub fn total(&self) -> usize {
        self.resized
            + self.skipped_exists
            + self.skipped_unsupported
            + self.skipped_missing_metadata
            + self.failed
    }

    /// True when no per-file failure occurred (skips are not failures)
    pub fn is_success(&self) -> bool {
        self.failed == 0
    }
}

/// Orchestrator driving concurrent per-file resize tasks
pub struct BatchProcessor<B: ImageBackend> {
    resizer: Arc<Resizer<B>>,
    max_concurrent: usize,
}

impl<B: ImageBackend> BatchProcessor<B> {
    /// Create a processor. `max_concurrent` defaults to the logical CPU
    /// count capped at 16; per-file tasks never exceed this bound.
    pub fn new(backend: Arc<B>, max_concurrent: Option<usize>) -> Self {
        let max_concurrent = max_concurrent
            .filter(|&n| n > 0)
            .unwrap_or_else(|| num_cpus::get().min(16));

        Self {
            resizer: Arc::new(Resizer::new(backend)),
            max_concurrent,
        }
    }

    /// Run one batch: list the input folder, skip unsupported and
    /// already-existing outputs, resize the rest concurrently, and wait
    /// for every task before returning.
    ///
    /// Per-file errors are logged and counted in the summary; only
    /// directory-level problems abort the run.
    pub async fn run(&self, request: &BatchRequest) -> Result<BatchSummary> {
        let start = Instant::now();

        match fs::metadata(&request.input_folder).await {
            Ok(meta) if meta.is_dir() => {}
            _ => return Err(SwyftError::input_not_found(&request.input_folder)),
        }

        // Non-recursive listing; subdirectory entries fall through the
        // extension filter like any other unsupported name.
        let mut entries = fs::read_dir(&request.input_folder).await?;
        let mut file_names = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            file_names.push(entry.file_name());
        }

        if file_names.is_empty() {
            return Err(SwyftError::empty_input(&request.input_folder));
        }

        // Deterministic classification order; completion order stays up
        // to the scheduler.
        file_names.sort();

        fs::create_dir_all(&request.output_folder).await?;

        let mut summary = BatchSummary::default();
        let semaphore = Arc::new(Semaphore::new(self.max_concurrent));
        let mut tasks = Vec::new();

        for file_name in file_names {
            let input_path = request.input_folder.join(&file_name);

            if !has_supported_extension(&input_path) {
                info!(file = %file_name.to_string_lossy(), "Skipped: unsupported format");
                summary.skipped_unsupported += 1;
                continue;
            }

            let output_path = request.output_folder.join(&file_name);

            if !request.overwrite && fs::try_exists(&output_path).await? {
                info!(file = %file_name.to_string_lossy(), "Skipped: file already exists");
                summary.skipped_exists += 1;
                continue;
            }

            let resizer = Arc::clone(&self.resizer);
            let semaphore = Arc::clone(&semaphore);
            let resize_request = ResizeRequest {
                input_path,
                output_path,
                target_width: request.target_width,
                target_height: request.target_height,
                keep_aspect_ratio: request.keep_aspect_ratio,
            };

            tasks.push(tokio::spawn(async move {
                let _permit = semaphore.acquire().await.unwrap();
                resizer.resize(resize_request).await
            }));
        }

        for task in futures::future::join_all(tasks).await {
            match task {
                Ok(Ok(ResizeOutcome::Resized)) => summary.resized += 1,
                Ok(Ok(ResizeOutcome::MissingMetadata)) => summary.skipped_missing_metadata += 1,
                Ok(Err(e)) => {
                    error!("{e}");
                    summary.failed += 1;
                }
                Err(join_error) => {
                    error!("Resize task panicked: {join_error}");
                    summary.failed += 1;
                }
            }
        }

        summary.elapsed = start.elapsed();

        if summary.is_success() {
            info!(
                elapsed_secs = format!("{:.2}", summary.elapsed.as_secs_f64()),
                resized = summary.resized,
                "All images processed successfully"
            );
        } else {
            warn!(
                elapsed_secs = format!("{:.2}", summary.elapsed.as_secs_f64()),
                failed = summary.failed,
                "Batch finished with failures"
            );
        }

        Ok(summary)
    }
}
