//! Dimensionality reduction from embedding space to the visual cube.
//!
//! ```text
//! labels + vectors ─> EmbeddingBatch::new (validate)
//!                         └─> project (PCA, 3 components)
//!                                 └─> normalise ([-1, 1], one global scale)
//!                                         └─> PreparedBatch
//! ```
//!
//! Everything in this module is pure and runs before any GPU resource is touched.

/// Batch validation and the combined `prepare_batch` entry point.
pub mod batch;

/// Global-range normalisation into the [-1, 1] cube.
pub mod normalise;

/// Principal component projection to three dimensions.
pub mod pca;

pub use batch::{EmbeddingBatch, PreparedBatch, prepare_batch};
pub use normalise::{NormalisationTransform, normalise};
pub use pca::{ProjectedPoint, project};
