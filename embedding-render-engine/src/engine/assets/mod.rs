//! Batch-scoped data owned by the engine.

/// Demonstration batch loaded from JSON on native builds.
pub mod batch_manifest;

/// Geometry, labels and highlight state for the current batch.
pub mod point_cloud_model;
