//! Swyft - Batch Image Resizer
//!
//! Resizes every supported image in a folder into an output folder,
//! deriving a missing dimension when aspect-ratio preservation is
//! requested and skipping files whose output already exists.
//!
//! Decoding, resampling, and encoding are delegated to the `image`
//! crate behind the [`backend::ImageBackend`] seam; the crate itself
//! owns the dimension-derivation policy and the concurrent batch
//! fan-out.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::path::PathBuf;
//! use std::sync::Arc;
//! use swyft::{BatchProcessor, BatchRequest, ImageRsBackend};
//!
//! #[tokio::main]
//! async fn main() -> swyft::Result<()> {
//!     let request = BatchRequest {
//!         input_folder: PathBuf::from("photos"),
//!         output_folder: PathBuf::from("thumbs"),
//!         target_width: Some(320),
//!         target_height: None,
//!         keep_aspect_ratio: true,
//!         overwrite: false,
//!     };
//!
//!     let processor = BatchProcessor::new(Arc::new(ImageRsBackend), None);
//!     let summary = processor.run(&request).await?;
//!     println!("resized {} files in {:.2}s", summary.resized, summary.elapsed.as_secs_f64());
//!     Ok(())
//! }
//! ```

#![warn(clippy::all)]

pub mod backend;
pub mod batch;
pub mod error;
pub mod formats;
pub mod resize;

// Re-export commonly used types
pub use backend::{ImageBackend, ImageMetadata, ImageRsBackend};
pub use batch::{BatchProcessor, BatchRequest, BatchSummary};
pub use error::{Result, SwyftError};
pub use resize::{ResizeOutcome, ResizeRequest, Resizer};

use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins over `default_level`. Safe to call more than once;
/// later calls are no-ops.
pub fn init(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    if tracing::subscriber::set_global_default(
        tracing_subscriber::FmtSubscriber::builder()
            .with_env_filter(filter)
            .finish(),
    )
    .is_ok()
    {
        debug!("swyft v{} initialized", VERSION);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
        assert!(VERSION.contains('.'));
    }

    #[test]
    fn test_init_is_idempotent() {
        init("info");
        init("debug");
    }
}
