//! Per-file resize pipeline and aspect-ratio dimension derivation

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{debug, error, info};

use crate::backend::ImageBackend;
use crate::error::{Result, SwyftError};

/// Options for resizing a single file
#[derive(Debug, Clone)]
pub struct ResizeRequest {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub target_width: Option<u32>,
    pub target_height: Option<u32>,
    pub keep_aspect_ratio: bool,
}

/// Terminal state of a single resize operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeOutcome {
    /// The output file was written
    Resized,
    /// Aspect-ratio mode was requested but the source has no readable
    /// dimensions; nothing was written and the run continues
    MissingMetadata,
}

/// Derive a missing target dimension so the source width:height ratio
/// is preserved: `round(given / source_given * source_missing)`.
///
/// Uses `f64::round` (half away from zero) and never returns 0.
pub fn derive_missing_dimension(given: u32, source_given: u32, source_missing: u32) -> u32 {
    let derived = (f64::from(given) / f64::from(source_given) * f64::from(source_missing)).round();
    derived.max(1.0) as u32
}

/// Resizer for single files, generic over the image backend
pub struct Resizer<B: ImageBackend> {
    backend: Arc<B>,
}

impl<B: ImageBackend> Resizer<B> {
    pub fn new(backend: Arc<B>) -> Self {
        Self { backend }
    }

    /// Resize one file according to the request.
    ///
    /// Decode, resample, and encode run on the blocking pool. Errors carry
    /// the offending path and are scoped to this file; the caller decides
    /// how they affect the batch.
    pub async fn resize(&self, request: ResizeRequest) -> Result<ResizeOutcome> {
        let backend = Arc::clone(&self.backend);
        let input = request.input_path.clone();
        let metadata = tokio::task::spawn_blocking(move || backend.metadata(&input)).await??;

        if request.keep_aspect_ratio
            && (metadata.width.is_none() || metadata.height.is_none())
        {
            error!(
                input = %request.input_path.display(),
                "Cannot preserve aspect ratio without width and height metadata"
            );
            return Ok(ResizeOutcome::MissingMetadata);
        }

        let mut width = request.target_width;
        let mut height = request.target_height;

        if request.keep_aspect_ratio {
            if let (Some(src_w), Some(src_h)) = (metadata.width, metadata.height) {
                match (width, height) {
                    (Some(w), None) => height = Some(derive_missing_dimension(w, src_w, src_h)),
                    (None, Some(h)) => width = Some(derive_missing_dimension(h, src_h, src_w)),
                    // Both dimensions explicit: used as-is, the ratio is
                    // not corrected.
                    _ => {}
                }
            }
        }

        if width.is_none() && height.is_none() {
            return Err(SwyftError::resize(
                &request.input_path,
                "no target dimensions resolved",
            ));
        }

        debug!(
            input = %request.input_path.display(),
            ?width,
            ?height,
            "Resolved target dimensions"
        );

        let backend = Arc::clone(&self.backend);
        let input = request.input_path.clone();
        let output = request.output_path.clone();
        tokio::task::spawn_blocking(move || backend.resize_file(&input, &output, width, height))
            .await??;

        info!(
            input = %request.input_path.display(),
            output = %request.output_path.display(),
            "Resized"
        );

        Ok(ResizeOutcome::Resized)
    }
}
