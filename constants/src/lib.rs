//! Shared constants for the embedding visualiser.
//!
//! Values here are the defaults the engine starts from; most of them can be
//! overridden at runtime through `VisualiserSettings`.

pub mod camera;
pub mod diagnostics;
pub mod picking;
pub mod render_settings;
pub mod scene;
