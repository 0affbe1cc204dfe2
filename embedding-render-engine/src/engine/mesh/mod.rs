//! Geometry uploaded for the point cloud.

/// Screen-aligned quad expansion: six vertices per point carrying its identity.
pub mod point_quad_mesh;
