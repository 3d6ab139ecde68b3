//! Image backend seam
//!
//! Decode, resample, and encode are delegated to the `image` crate behind
//! a small trait so dimension derivation and batch policy stay testable
//! against a fake backend.

use std::path::Path;

use image::imageops::FilterType;
use tracing::debug;

use crate::error::{Result, SwyftError};
use crate::resize::derive_missing_dimension;

/// Intrinsic metadata read from a source image
#[derive(Debug, Clone)]
pub struct ImageMetadata {
    pub width: Option<u32>,
    pub height: Option<u32>,
}

/// Capability interface over an image-processing library.
///
/// Both operations are blocking; callers run them on the blocking pool.
pub trait ImageBackend: Send + Sync + 'static {
    /// Read pixel dimensions without performing the transform
    fn metadata(&self, path: &Path) -> Result<ImageMetadata>;

    /// Decode `input`, resize to the given dimensions, and encode to
    /// `output` with the format inferred from its extension. An absent
    /// dimension is computed proportionally from the source.
    fn resize_file(
        &self,
        input: &Path,
        output: &Path,
        width: Option<u32>,
        height: Option<u32>,
    ) -> Result<()>;
}

/// Production backend wrapping the `image` crate
#[derive(Debug, Default, Clone, Copy)]
pub struct ImageRsBackend;

impl ImageBackend for ImageRsBackend {
    fn metadata(&self, path: &Path) -> Result<ImageMetadata> {
        let (width, height) = image::image_dimensions(path)
            .map_err(|e| SwyftError::decode(path, e.to_string()))?;

        Ok(ImageMetadata {
            width: Some(width),
            height: Some(height),
        })
    }

    fn resize_file(
        &self,
        input: &Path,
        output: &Path,
        width: Option<u32>,
        height: Option<u32>,
    ) -> Result<()> {
        let img = image::open(input).map_err(|e| SwyftError::decode(input, e.to_string()))?;

        let (target_width, target_height) = match (width, height) {
            (Some(w), Some(h)) => (w, h),
            (Some(w), None) => (w, derive_missing_dimension(w, img.width(), img.height())),
            (None, Some(h)) => (derive_missing_dimension(h, img.height(), img.width()), h),
            (None, None) => {
                return Err(SwyftError::resize(
                    input,
                    "at least one target dimension is required",
                ))
            }
        };

        debug!(
            input = %input.display(),
            "{}x{} -> {}x{}",
            img.width(),
            img.height(),
            target_width,
            target_height
        );

        let resized = img.resize_exact(target_width, target_height, FilterType::Lanczos3);

        if let Some(parent) = output.parent() {
            std::fs::create_dir_all(parent).map_err(|e| SwyftError::write(output, e.to_string()))?;
        }

        resized
            .save(output)
            .map_err(|e| SwyftError::write(output, e.to_string()))?;

        Ok(())
    }
}
