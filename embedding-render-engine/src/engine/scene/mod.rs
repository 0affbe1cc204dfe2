//! Scene entities: camera and lights, axis gizmo, label overlay and the
//! point cloud lifecycle.

pub mod axes;
pub mod label_overlay;
pub mod point_cloud_loader;
pub mod scene_graph;
