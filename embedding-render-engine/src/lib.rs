//! Interactive 3D explorer for embedding vectors.
//!
//! A batch of labelled high-dimensional vectors is reduced to three principal
//! components, normalised into the `[-1, 1]` cube and drawn as a point cloud.
//! Hovering or clicking a point reports its label.
//!
//! Batches enter through [`LoadBatchRequest`](engine::scene::point_cloud_loader::LoadBatchRequest),
//! sent directly, over the host RPC bridge, or from the demo batch file.

pub mod engine;
pub mod error;
pub mod rpc;
pub mod tools;

pub use engine::core::app_setup::{VisualiserCorePlugin, VisualiserRenderPlugin, create_app};
pub use error::{Result, VisualiserError};
